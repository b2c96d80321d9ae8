//! Decoder initialization and the audio output device

use std::marker::PhantomData;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::backend::Mixer;
use crate::config::AudioConfig;
use crate::error::{InitError, InitResult};

/// Largest channel, chunk and music volume
pub const MAX_VOLUME: i32 = 128;
/// Output frequency used when nothing else is configured
pub const DEFAULT_FREQUENCY: i32 = 44_100;
/// Stereo output
pub const DEFAULT_CHANNELS: i32 = 2;
/// Bytes per mixing chunk used when nothing else is configured
pub const DEFAULT_CHUNK_SIZE: i32 = 2048;

bitflags! {
    /// Dynamically loaded decoders
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MixerFlags: i32 {
        /// FLAC
        const FLAC = 0x0000_0001;
        /// Tracker modules
        const MOD = 0x0000_0002;
        /// MP3
        const MP3 = 0x0000_0008;
        /// Ogg Vorbis
        const OGG = 0x0000_0010;
        /// MIDI
        const MID = 0x0000_0020;
        /// Opus
        const OPUS = 0x0000_0040;
        /// All of the above
        const EVERYTHING = Self::FLAC.bits()
            | Self::MOD.bits()
            | Self::MP3.bits()
            | Self::OGG.bits()
            | Self::MID.bits()
            | Self::OPUS.bits();
    }
}

bitflags! {
    /// Spec fields the device may change when it cannot match the request
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AllowedChanges: i32 {
        /// Output frequency
        const FREQUENCY = 0x0000_0001;
        /// Sample format
        const FORMAT = 0x0000_0002;
        /// Channel count
        const CHANNELS = 0x0000_0004;
        /// Buffer size
        const SAMPLES = 0x0000_0008;
        /// Any of them
        const ANY = 0x0000_000F;
    }
}

/// Native sample format value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioFormat(pub u16);

impl AudioFormat {
    /// Unsigned 8-bit
    pub const U8: Self = Self(0x0008);
    /// Signed 8-bit
    pub const S8: Self = Self(0x8008);
    /// Unsigned 16-bit, little endian
    pub const U16LSB: Self = Self(0x0010);
    /// Signed 16-bit, little endian
    pub const S16LSB: Self = Self(0x8010);
    /// Unsigned 16-bit, big endian
    pub const U16MSB: Self = Self(0x1010);
    /// Signed 16-bit, big endian
    pub const S16MSB: Self = Self(0x9010);
    /// Signed 32-bit, little endian
    pub const S32LSB: Self = Self(0x8020);
    /// Signed 32-bit, big endian
    pub const S32MSB: Self = Self(0x9020);
    /// 32-bit float, little endian
    pub const F32LSB: Self = Self(0x8120);
    /// 32-bit float, big endian
    pub const F32MSB: Self = Self(0x9120);
    /// Signed 16-bit in native byte order
    #[cfg(target_endian = "little")]
    pub const S16SYS: Self = Self::S16LSB;
    /// Signed 16-bit in native byte order
    #[cfg(target_endian = "big")]
    pub const S16SYS: Self = Self::S16MSB;
    /// Format the mixer uses when nothing else is configured
    pub const DEFAULT: Self = Self::S16SYS;

    /// Raw native value
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Bits per sample
    pub const fn bit_size(self) -> u16 {
        self.0 & 0xFF
    }

    /// Whether samples are signed
    pub const fn is_signed(self) -> bool {
        self.0 & 0x8000 != 0
    }

    /// Whether samples are floating point
    pub const fn is_float(self) -> bool {
        self.0 & 0x0100 != 0
    }

    /// Whether samples are big endian
    pub const fn is_big_endian(self) -> bool {
        self.0 & 0x1000 != 0
    }
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters the device actually runs with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSpec {
    /// Output frequency in Hz
    pub frequency: i32,
    /// Sample format
    pub format: AudioFormat,
    /// Output channels, 2 for stereo
    pub channels: i32,
}

/// Load decoders; returns the ones that are now loaded
pub fn init<B: Mixer>(flags: MixerFlags) -> MixerFlags {
    MixerFlags::from_bits_retain(B::mix_init(flags.bits()))
}

/// Unload every decoder
pub fn quit<B: Mixer>() {
    B::mix_quit();
}

/// Scope guard for the mixer decoders
///
/// Does not open the output device, see [`AudioDevice`] for that.
#[must_use = "the decoders unload when the guard is dropped"]
pub struct MixerRoot<B: Mixer> {
    loaded: MixerFlags,
    _backend: PhantomData<(fn() -> B, *const ())>,
}

impl<B: Mixer> MixerRoot<B> {
    /// Load `flags`; failure trips a debug assertion
    pub fn new(flags: MixerFlags) -> Self {
        let loaded = init::<B>(flags);
        let ok = loaded.contains(flags);
        if ok {
            log::info!("loaded mixer decoders {flags:?}");
        } else {
            log::error!("failed to load mixer decoders {flags:?}: {}", B::last_error());
        }
        debug_assert!(ok, "failed to initialize mixer decoders {flags:?}");
        Self { loaded, _backend: PhantomData }
    }

    /// Load `flags`, reporting missing decoders as an error
    ///
    /// Decoders that did load stay loaded until [`quit`] is called.
    pub fn try_new(flags: MixerFlags) -> InitResult<Self> {
        let loaded = init::<B>(flags);
        if !loaded.contains(flags) {
            let message = B::last_error();
            log::error!("failed to load mixer decoders {flags:?}: {message}");
            return Err(InitError::Mixer { requested: flags, message });
        }
        log::info!("loaded mixer decoders {flags:?}");
        Ok(Self { loaded, _backend: PhantomData })
    }

    /// Decoders loaded at construction
    pub fn loaded(&self) -> MixerFlags {
        self.loaded
    }
}

impl<B: Mixer> Drop for MixerRoot<B> {
    fn drop(&mut self) {
        log::debug!("unloading mixer decoders {:?}", self.loaded);
        B::mix_quit();
    }
}

/// Open the default output device
pub fn open_audio<B: Mixer>(frequency: i32, format: AudioFormat, channels: i32, chunk_size: i32) -> bool {
    B::open_audio(frequency, format.bits(), channels, chunk_size) == 0
}

/// Open a named output device, `None` picks the default one
pub fn open_audio_device<B: Mixer>(
    frequency: i32,
    format: AudioFormat,
    channels: i32,
    chunk_size: i32,
    device: Option<&str>,
    allowed_changes: AllowedChanges,
) -> bool {
    B::open_audio_device(frequency, format.bits(), channels, chunk_size, device, allowed_changes.bits()) == 0
}

/// Resize the mixing channel pool; a negative count only queries it
///
/// Returns the number of channels now allocated.
pub fn allocate_channels<B: Mixer>(count: i32) -> i32 {
    B::allocate_channels(count)
}

/// Parameters of the open device, `None` when closed
pub fn query_spec<B: Mixer>() -> Option<AudioSpec> {
    let (mut frequency, mut format, mut channels) = (0, 0, 0);
    (B::query_spec(&mut frequency, &mut format, &mut channels) != 0).then_some(AudioSpec {
        frequency,
        format: AudioFormat(format),
        channels,
    })
}

/// Close the output device once per successful open
pub fn close_audio<B: Mixer>() {
    B::close_audio();
}

/// Set the value used to synchronize music playback
pub fn set_synchro_value<B: Mixer>(value: i32) -> bool {
    B::set_synchro_value(value) == 0
}

/// Value used to synchronize music playback
pub fn synchro_value<B: Mixer>() -> i32 {
    B::synchro_value()
}

/// Set the `;` separated SoundFont paths used by the MIDI decoder
pub fn set_sound_fonts<B: Mixer>(paths: &str) -> bool {
    B::set_sound_fonts(paths) == 1
}

/// SoundFont paths used by the MIDI decoder
pub fn sound_fonts<B: Mixer>() -> Option<String> {
    B::sound_fonts()
}

/// Scope guard for the audio output device
///
/// Opens the device from an [`AudioConfig`] and closes it on drop.
#[must_use = "the audio device closes when the guard is dropped"]
pub struct AudioDevice<B: Mixer> {
    spec: AudioSpec,
    _backend: PhantomData<(fn() -> B, *const ())>,
}

impl<B: Mixer> AudioDevice<B> {
    /// Open the configured device and allocate its mixing channels
    pub fn open(config: &AudioConfig) -> InitResult<Self> {
        let opened = match config.device.as_deref() {
            Some(name) => open_audio_device::<B>(
                config.frequency,
                config.format,
                config.channels,
                config.chunk_size,
                Some(name),
                AllowedChanges::empty(),
            ),
            None => open_audio::<B>(config.frequency, config.format, config.channels, config.chunk_size),
        };
        if !opened {
            let message = B::last_error();
            log::error!("failed to open audio device: {message}");
            return Err(InitError::AudioDevice(message));
        }
        if let Some(count) = config.mixing_channels {
            allocate_channels::<B>(count);
        }
        let spec = query_spec::<B>().unwrap_or(AudioSpec {
            frequency: config.frequency,
            format: config.format,
            channels: config.channels,
        });
        log::info!(
            "opened audio device at {} Hz, {} channels, format {:#06x}",
            spec.frequency,
            spec.channels,
            spec.format.bits()
        );
        Ok(Self { spec, _backend: PhantomData })
    }

    /// Parameters the device runs with
    pub fn spec(&self) -> AudioSpec {
        self.spec
    }
}

impl<B: Mixer> Drop for AudioDevice<B> {
    fn drop(&mut self) {
        log::debug!("closing audio device");
        B::close_audio();
    }
}

impl<B: Mixer> std::fmt::Debug for AudioDevice<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDevice").field("spec", &self.spec).finish()
    }
}
