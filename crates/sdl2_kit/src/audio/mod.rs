//! Mixer wrappers
//!
//! [`MixerRoot`] loads the decoders, [`AudioDevice`] keeps the output device
//! open. Samples ([`Sound`]) play on numbered [`Channel`]s which can be tagged
//! into [`ChannelGroup`]s; a single [`Music`] stream plays beside them.
//!
//! Channels and groups are plain ids. They own nothing and stay valid only as
//! long as the mixer keeps that many channels allocated.

use std::time::Duration;

pub mod channel;
pub mod device;
pub mod group;
pub mod music;
pub mod sound;

pub use channel::{Channel, Fading};
pub use device::{
    allocate_channels, close_audio, open_audio, open_audio_device, query_spec, set_sound_fonts, set_synchro_value,
    sound_fonts, synchro_value, AllowedChanges, AudioDevice, AudioFormat, AudioSpec, MixerFlags, MixerRoot,
    DEFAULT_CHANNELS, DEFAULT_CHUNK_SIZE, DEFAULT_FREQUENCY, MAX_VOLUME,
};
pub use group::ChannelGroup;
pub use music::{Music, MusicType};
pub use sound::Sound;

/// Duration as the native millisecond count, saturating
pub(crate) fn millis(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(250)), 250);
        assert_eq!(millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
