//! Mixer bookkeeping without an output device
//!
//! Channels, groups and music keep the state the native mixer reports back,
//! but nothing is decoded or mixed. A channel plays until it is halted.

use std::path::Path;
use std::ptr::NonNull;

use super::{create, destroy, object, pointer, record, set_error, status, take_fault, with_state};
use super::{Call, Failure, Fault, Headless, Outcome, Resource, AUDIO};
use crate::audio::MixerFlags;
use crate::backend::Mixer;
use crate::foundation::handle::NativeResource;

const MAX_VOLUME: i32 = 128;
const DEFAULT_CHANNELS: usize = 8;
const DEVICE: &str = "headless";
const FADING_OUT: i32 = 1;
const FADING_IN: i32 = 2;

const CHUNK_DECODERS: [&str; 6] = ["WAVE", "AIFF", "VOC", "OGG", "MP3", "FLAC"];
const MUSIC_DECODERS: [&str; 4] = ["WAVE", "OGG", "MP3", "FLAC"];

const FORMATS: [u16; 10] = [
    0x0008, 0x8008, 0x0010, 0x8010, 0x1010, 0x9010, 0x8020, 0x9020, 0x8120, 0x9120,
];

/// A loaded sample
#[derive(Debug)]
pub struct HeadlessChunk {
    volume: i32,
}

impl NativeResource for HeadlessChunk {
    const KIND: &'static str = "chunk";

    unsafe fn release(raw: NonNull<Self>) {
        with_state(|s| {
            for voice in s.mixer.voices.iter_mut().filter(|v| v.chunk == Some(raw)) {
                voice.halt();
            }
        });
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Chunk, raw) }
    }
}

/// A loaded music stream
#[derive(Debug)]
pub struct HeadlessMusic {
    kind: i32,
}

impl NativeResource for HeadlessMusic {
    const KIND: &'static str = "music";

    unsafe fn release(raw: NonNull<Self>) {
        with_state(|s| {
            if s.mixer.music.current == Some(raw) {
                s.mixer.music.halt();
            }
        });
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Music, raw) }
    }
}

/// Music type the file extension implies
fn music_kind(path: &str) -> Option<i32> {
    let extension = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    let kind = match extension.as_str() {
        "wav" => 2,
        "mod" | "xm" | "s3m" | "it" => 3,
        "mid" | "midi" => 4,
        "ogg" => 5,
        "mp3" => 6,
        "flac" => 8,
        "opus" => 10,
        _ => return None,
    };
    Some(kind)
}

/// One mixing channel
#[derive(Debug, Clone)]
struct Voice {
    chunk: Option<NonNull<HeadlessChunk>>,
    paused: bool,
    volume: i32,
    tag: i32,
    started: u64,
    fading: i32,
    expire: Option<i32>,
    effects: u32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            chunk: None,
            paused: false,
            volume: MAX_VOLUME,
            tag: -1,
            started: 0,
            fading: 0,
            expire: None,
            effects: 0,
        }
    }
}

impl Voice {
    fn is_playing(&self) -> bool {
        self.chunk.is_some()
    }

    fn in_group(&self, tag: i32) -> bool {
        tag == -1 || self.tag == tag
    }

    fn halt(&mut self) {
        self.chunk = None;
        self.paused = false;
        self.fading = 0;
        self.expire = None;
    }
}

#[derive(Debug, Clone)]
struct MusicState {
    current: Option<NonNull<HeadlessMusic>>,
    paused: bool,
    fading: i32,
    volume: i32,
    position: f64,
    command: Option<String>,
}

impl Default for MusicState {
    fn default() -> Self {
        Self {
            current: None,
            paused: false,
            fading: 0,
            volume: MAX_VOLUME,
            position: 0.0,
            command: None,
        }
    }
}

impl MusicState {
    fn halt(&mut self) {
        self.current = None;
        self.paused = false;
        self.fading = 0;
        self.position = 0.0;
    }
}

/// Decoders, device and channel state of the current thread
#[derive(Debug, Default)]
pub(super) struct MixerState {
    loaded: i32,
    opened: u32,
    spec: (i32, u16, i32),
    voices: Vec<Voice>,
    reserved: usize,
    clock: u64,
    music: MusicState,
    synchro: i32,
    sound_fonts: Option<String>,
}

impl MixerState {
    fn voice(&mut self, channel: i32) -> Outcome<&mut Voice> {
        usize::try_from(channel)
            .ok()
            .and_then(|i| self.voices.get_mut(i))
            .ok_or(Failure::Unsupported(format!("Invalid channel {channel}")))
    }

    /// Apply `f` to one channel, or to all of them for `-1`, summing the results
    fn each(&mut self, channel: i32, f: impl FnMut(&mut Voice) -> i32) -> i32 {
        if channel == -1 {
            self.voices.iter_mut().map(f).sum()
        } else {
            self.voice(channel).map_or(0, f)
        }
    }

    fn start(&mut self, channel: i32, chunk: NonNull<HeadlessChunk>, ticks: i32, fading: i32) -> Outcome<i32> {
        if self.opened == 0 {
            return Err(Failure::AudioClosed);
        }
        let index = if channel == -1 {
            let free = self.voices.iter().skip(self.reserved).position(|v| !v.is_playing());
            free.map(|i| i + self.reserved)
                .ok_or(Failure::Unsupported("No free channels available".to_string()))?
        } else {
            self.voice(channel)?;
            channel as usize
        };
        self.clock += 1;
        let started = self.clock;
        let voice = &mut self.voices[index];
        voice.chunk = Some(chunk);
        voice.paused = false;
        voice.started = started;
        voice.fading = fading;
        voice.expire = (ticks > 0).then_some(ticks);
        Ok(index as i32)
    }

    fn close(&mut self) {
        for voice in &mut self.voices {
            voice.halt();
        }
        self.voices.clear();
        self.reserved = 0;
        self.music.halt();
    }
}

fn mixer<R>(f: impl FnOnce(&mut MixerState) -> R) -> R {
    with_state(|s| f(&mut s.mixer))
}

fn require_open() -> Outcome<()> {
    if mixer(|m| m.opened) == 0 {
        return Err(Failure::AudioClosed);
    }
    Ok(())
}

/// Fail like the native loader does for a file it cannot open
fn require_file(path: &str) -> Outcome<()> {
    std::fs::metadata(path).map(drop).map_err(|source| Failure::Io {
        path: path.to_string(),
        source,
    })
}

fn open_device(frequency: i32, format: u16, channels: i32, chunk_size: i32, device: Option<&str>) -> Outcome<()> {
    if frequency <= 0 {
        return Err(Failure::InvalidParam("frequency"));
    }
    if !(1..=8).contains(&channels) {
        return Err(Failure::InvalidParam("channels"));
    }
    if chunk_size <= 0 {
        return Err(Failure::InvalidParam("chunksize"));
    }
    if !FORMATS.contains(&format) {
        return Err(Failure::Unsupported(format!("Unsupported audio format {format:#06x}")));
    }
    if device.is_some_and(|d| d != DEVICE) {
        return Err(Failure::Unsupported(format!("Audio device '{}' not found", device.unwrap_or_default())));
    }
    if take_fault(Fault::OpenAudio) {
        return Err(Failure::Injected(Fault::OpenAudio));
    }
    record(Call::OpenAudio);
    with_state(|s| {
        s.subsystems |= AUDIO;
        let m = &mut s.mixer;
        if m.opened == 0 {
            m.spec = (frequency, format, channels);
            m.voices = vec![Voice::default(); DEFAULT_CHANNELS];
        }
        m.opened += 1;
    });
    Ok(())
}

fn decoder(list: &[&str], index: i32) -> Option<String> {
    usize::try_from(index).ok().and_then(|i| list.get(i)).map(ToString::to_string)
}

fn has_decoder(list: &[&str], name: &str) -> bool {
    list.iter().any(|d| d.eq_ignore_ascii_case(name))
}

impl Mixer for Headless {
    type Chunk = HeadlessChunk;
    type Music = HeadlessMusic;

    fn mix_init(flags: i32) -> i32 {
        record(Call::MixInit(flags));
        if take_fault(Fault::MixInit) {
            set_error(&Failure::Injected(Fault::MixInit));
            return 0;
        }
        let supported = (MixerFlags::FLAC | MixerFlags::MP3 | MixerFlags::OGG).bits();
        let missing = MixerFlags::from_bits_truncate(flags & !supported);
        for (name, _) in missing.iter_names() {
            set_error(&Failure::Unsupported(format!("{name} support not available")));
        }
        mixer(|m| {
            m.loaded |= flags & supported;
            m.loaded
        })
    }

    fn mix_quit() {
        record(Call::MixQuit);
        mixer(|m| m.loaded = 0);
    }

    fn open_audio(frequency: i32, format: u16, channels: i32, chunk_size: i32) -> i32 {
        status(open_device(frequency, format, channels, chunk_size, None))
    }

    fn open_audio_device(
        frequency: i32,
        format: u16,
        channels: i32,
        chunk_size: i32,
        device: Option<&str>,
        _allowed_changes: i32,
    ) -> i32 {
        status(open_device(frequency, format, channels, chunk_size, device))
    }

    fn allocate_channels(count: i32) -> i32 {
        mixer(|m| {
            if let Ok(count) = usize::try_from(count) {
                m.voices.resize_with(count, Voice::default);
                m.reserved = m.reserved.min(count);
            }
            m.voices.len() as i32
        })
    }

    fn query_spec(frequency: &mut i32, format: &mut u16, channels: &mut i32) -> i32 {
        let (opened, spec) = mixer(|m| (m.opened, m.spec));
        if opened == 0 {
            set_error(&Failure::AudioClosed);
            return 0;
        }
        (*frequency, *format, *channels) = spec;
        opened as i32
    }

    fn close_audio() {
        let closing = with_state(|s| {
            if s.mixer.opened == 0 {
                return false;
            }
            s.mixer.opened -= 1;
            if s.mixer.opened == 0 {
                s.mixer.close();
                s.subsystems &= !AUDIO;
            }
            true
        });
        if closing {
            record(Call::CloseAudio);
        }
    }

    fn set_synchro_value(value: i32) -> i32 {
        mixer(|m| m.synchro = value);
        0
    }

    fn synchro_value() -> i32 {
        mixer(|m| m.synchro)
    }

    fn set_sound_fonts(paths: &str) -> i32 {
        if paths.is_empty() {
            return 0;
        }
        mixer(|m| m.sound_fonts = Some(paths.to_string()));
        1
    }

    fn sound_fonts() -> Option<String> {
        mixer(|m| m.sound_fonts.clone())
    }

    fn load_wav(path: &str) -> *mut HeadlessChunk {
        let loaded = require_open()
            .and_then(|()| require_file(path))
            .and_then(|()| create(Resource::Chunk, HeadlessChunk { volume: MAX_VOLUME }));
        pointer(loaded)
    }

    fn num_chunk_decoders() -> i32 {
        CHUNK_DECODERS.len() as i32
    }

    fn chunk_decoder(index: i32) -> Option<String> {
        decoder(&CHUNK_DECODERS, index)
    }

    fn has_chunk_decoder(name: &str) -> bool {
        has_decoder(&CHUNK_DECODERS, name)
    }

    fn volume_chunk(chunk: NonNull<HeadlessChunk>, volume: i32) -> i32 {
        let chunk = object(chunk);
        let previous = chunk.volume;
        if volume >= 0 {
            chunk.volume = volume.min(MAX_VOLUME);
        }
        previous
    }

    fn play_channel_timed(channel: i32, chunk: NonNull<HeadlessChunk>, _loops: i32, ticks: i32) -> i32 {
        mixer(|m| m.start(channel, chunk, ticks, 0)).unwrap_or_else(|e| status(Err(e)))
    }

    fn fade_in_channel_timed(channel: i32, chunk: NonNull<HeadlessChunk>, _loops: i32, _ms: i32, ticks: i32) -> i32 {
        mixer(|m| m.start(channel, chunk, ticks, FADING_IN)).unwrap_or_else(|e| status(Err(e)))
    }

    fn volume(channel: i32, volume: i32) -> i32 {
        let set = |v: &mut Voice| {
            let previous = v.volume;
            if volume >= 0 {
                v.volume = volume.min(MAX_VOLUME);
            }
            previous
        };
        mixer(|m| {
            if channel == -1 {
                let count = m.voices.len() as i32;
                let total = m.each(-1, set);
                if count == 0 {
                    0
                } else {
                    total / count
                }
            } else {
                m.each(channel, set)
            }
        })
    }

    fn halt_channel(channel: i32) -> i32 {
        mixer(|m| {
            m.each(channel, |v| {
                v.halt();
                0
            })
        });
        0
    }

    fn expire_channel(channel: i32, ticks: i32) -> i32 {
        mixer(|m| {
            m.each(channel, |v| {
                v.expire = (ticks > 0).then_some(ticks);
                1
            })
        })
    }

    fn fade_out_channel(channel: i32, ms: i32) -> i32 {
        mixer(|m| {
            m.each(channel, |v| {
                if !v.is_playing() || ms <= 0 || v.fading == FADING_OUT {
                    return 0;
                }
                v.fading = FADING_OUT;
                1
            })
        })
    }

    fn playing(channel: i32) -> i32 {
        mixer(|m| m.each(channel, |v| i32::from(v.is_playing())))
    }

    fn paused(channel: i32) -> i32 {
        mixer(|m| m.each(channel, |v| i32::from(v.is_playing() && v.paused)))
    }

    fn fading_channel(channel: i32) -> i32 {
        if channel < 0 {
            return 0;
        }
        mixer(|m| m.each(channel, |v| if v.is_playing() { v.fading } else { 0 }))
    }

    fn pause(channel: i32) {
        mixer(|m| {
            m.each(channel, |v| {
                v.paused = v.is_playing();
                0
            })
        });
    }

    fn resume(channel: i32) {
        mixer(|m| {
            m.each(channel, |v| {
                v.paused = false;
                0
            })
        });
    }

    fn unregister_all_effects(channel: i32) -> i32 {
        effect(channel, |v| v.effects = 0)
    }

    fn set_panning(channel: i32, _left: u8, _right: u8) -> i32 {
        effect(channel, |v| v.effects += 1)
    }

    fn set_position(channel: i32, _angle: i16, _distance: u8) -> i32 {
        effect(channel, |v| v.effects += 1)
    }

    fn set_distance(channel: i32, _distance: u8) -> i32 {
        effect(channel, |v| v.effects += 1)
    }

    fn set_reverse_stereo(channel: i32, _flip: i32) -> i32 {
        effect(channel, |v| v.effects += 1)
    }

    fn reserve_channels(count: i32) -> i32 {
        mixer(|m| {
            m.reserved = usize::try_from(count).unwrap_or(0).min(m.voices.len());
            m.reserved as i32
        })
    }

    fn group_channel(channel: i32, tag: i32) -> i32 {
        mixer(|m| m.voice(channel).map_or(0, |v| {
            v.tag = tag;
            1
        }))
    }

    fn group_channels(from: i32, to: i32, tag: i32) -> i32 {
        (from..=to).map(|channel| Self::group_channel(channel, tag)).sum()
    }

    fn group_available(tag: i32) -> i32 {
        mixer(|m| {
            m.voices
                .iter()
                .position(|v| v.in_group(tag) && !v.is_playing())
                .map_or(-1, |i| i as i32)
        })
    }

    fn group_count(tag: i32) -> i32 {
        mixer(|m| m.voices.iter().filter(|v| v.in_group(tag)).count() as i32)
    }

    fn group_oldest(tag: i32) -> i32 {
        mixer(|m| {
            let playing = m.voices.iter().enumerate().filter(|(_, v)| v.in_group(tag) && v.is_playing());
            playing.min_by_key(|(_, v)| v.started).map_or(-1, |(i, _)| i as i32)
        })
    }

    fn group_newer(tag: i32) -> i32 {
        mixer(|m| {
            let playing = m.voices.iter().enumerate().filter(|(_, v)| v.in_group(tag) && v.is_playing());
            playing.max_by_key(|(_, v)| v.started).map_or(-1, |(i, _)| i as i32)
        })
    }

    fn halt_group(tag: i32) -> i32 {
        mixer(|m| {
            for voice in m.voices.iter_mut().filter(|v| v.in_group(tag)) {
                voice.halt();
            }
        });
        0
    }

    fn fade_out_group(tag: i32, ms: i32) -> i32 {
        let members: Vec<i32> = mixer(|m| {
            let indexed = m.voices.iter().enumerate();
            indexed.filter(|(_, v)| v.in_group(tag)).map(|(i, _)| i as i32).collect()
        });
        members.into_iter().map(|i| Self::fade_out_channel(i, ms)).sum()
    }

    fn load_mus(path: &str) -> *mut HeadlessMusic {
        let loaded = require_open().and_then(|()| require_file(path)).and_then(|()| {
            let kind = music_kind(path).ok_or(Failure::Unsupported("Unrecognized audio format".to_string()))?;
            create(Resource::Music, HeadlessMusic { kind })
        });
        pointer(loaded)
    }

    fn num_music_decoders() -> i32 {
        MUSIC_DECODERS.len() as i32
    }

    fn music_decoder(index: i32) -> Option<String> {
        decoder(&MUSIC_DECODERS, index)
    }

    fn has_music_decoder(name: &str) -> bool {
        has_decoder(&MUSIC_DECODERS, name)
    }

    fn play_music(music: NonNull<HeadlessMusic>, loops: i32) -> i32 {
        Self::fade_in_music_pos(music, loops, 0, 0.0)
    }

    fn fade_in_music(music: NonNull<HeadlessMusic>, loops: i32, ms: i32) -> i32 {
        Self::fade_in_music_pos(music, loops, ms, 0.0)
    }

    fn fade_in_music_pos(music: NonNull<HeadlessMusic>, _loops: i32, ms: i32, position: f64) -> i32 {
        status(require_open().map(|()| {
            mixer(|m| {
                m.music.current = Some(music);
                m.music.paused = false;
                m.music.fading = if ms > 0 { FADING_IN } else { 0 };
                m.music.position = position;
            });
        }))
    }

    fn music_type(music: Option<NonNull<HeadlessMusic>>) -> i32 {
        match music {
            Some(music) => object(music).kind,
            None => mixer(|m| m.music.current).map_or(0, |current| object(current).kind),
        }
    }

    fn volume_music(volume: i32) -> i32 {
        mixer(|m| {
            let previous = m.music.volume;
            if volume >= 0 {
                m.music.volume = volume.min(MAX_VOLUME);
            }
            previous
        })
    }

    fn halt_music() -> i32 {
        mixer(|m| m.music.halt());
        0
    }

    fn fade_out_music(ms: i32) -> i32 {
        mixer(|m| {
            if m.music.current.is_none() {
                return 0;
            }
            if ms <= 0 {
                m.music.halt();
            } else {
                m.music.fading = FADING_OUT;
            }
            1
        })
    }

    fn fading_music() -> i32 {
        mixer(|m| if m.music.current.is_some() { m.music.fading } else { 0 })
    }

    fn pause_music() {
        mixer(|m| m.music.paused = m.music.current.is_some());
    }

    fn resume_music() {
        mixer(|m| m.music.paused = false);
    }

    fn rewind_music() {
        mixer(|m| m.music.position = 0.0);
    }

    fn paused_music() -> i32 {
        mixer(|m| i32::from(m.music.paused))
    }

    fn playing_music() -> i32 {
        mixer(|m| i32::from(m.music.current.is_some()))
    }

    fn set_music_position(position: f64) -> i32 {
        let moved = mixer(|m| {
            if m.music.current.is_none() {
                return Err(Failure::Unsupported("Music isn't playing".to_string()));
            }
            m.music.position = position;
            Ok(())
        });
        status(moved)
    }

    fn set_music_cmd(command: Option<&str>) -> i32 {
        mixer(|m| m.music.command = command.map(str::to_string));
        0
    }
}

/// Change the effect chain of a channel; 1 on success, 0 for a bad channel
fn effect(channel: i32, change: impl FnOnce(&mut Voice)) -> i32 {
    match mixer(|m| m.voice(channel).map(change)) {
        Ok(()) => 1,
        Err(e) => {
            set_error(&e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{journal, reset};
    use crate::backend::Core;

    fn open() {
        reset();
        assert_eq!(Headless::open_audio(44_100, 0x8010, 2, 1024), 0);
    }

    #[test]
    fn test_nested_open_needs_matching_close() {
        open();
        assert_eq!(Headless::open_audio(22_050, 0x0008, 1, 512), 0);
        let (mut f, mut fmt, mut ch) = (0, 0, 0);
        assert_eq!(Headless::query_spec(&mut f, &mut fmt, &mut ch), 2);
        assert_eq!(f, 44_100);
        Headless::close_audio();
        assert_eq!(Headless::playing(-1), 0);
        assert_eq!(Headless::allocate_channels(-1), 8);
        Headless::close_audio();
        Headless::close_audio();
        assert_eq!(Headless::allocate_channels(-1), 0);
        assert_eq!(
            journal(),
            vec![Call::OpenAudio, Call::OpenAudio, Call::CloseAudio, Call::CloseAudio]
        );
    }

    #[test]
    fn test_mix_init_names_missing_decoders() {
        reset();
        let loaded = Headless::mix_init((MixerFlags::OGG | MixerFlags::MID).bits());
        assert_eq!(loaded, MixerFlags::OGG.bits());
        assert!(Headless::last_error().contains("MID"));
    }

    #[test]
    fn test_music_kind_from_extension() {
        assert_eq!(music_kind("a/b/song.OGG"), Some(5));
        assert_eq!(music_kind("tune.it"), Some(3));
        assert_eq!(music_kind("noext"), None);
    }

    #[test]
    fn test_shrinking_halts_dropped_channels() {
        open();
        let mut chunk = HeadlessChunk { volume: MAX_VOLUME };
        let chunk = NonNull::from(&mut chunk);
        assert_eq!(Headless::play_channel_timed(7, chunk, 0, -1), 7);
        assert_eq!(Headless::allocate_channels(4), 4);
        assert_eq!(Headless::playing(-1), 0);
        assert_eq!(Headless::play_channel_timed(7, chunk, 0, -1), -1);
    }
}
