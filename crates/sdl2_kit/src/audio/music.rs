//! Music stream
//!
//! Only one music stream plays at a time, so most controls are associated
//! functions acting on whatever is playing.

use std::path::Path;
use std::ptr::NonNull;
use std::time::Duration;

use crate::audio::channel::Fading;
use crate::audio::millis;
use crate::backend::Mixer;
use crate::foundation::handle::{Borrowed, Owned, View};

/// Non-owning alias of a native music stream
pub type MusicView<'a, B> = View<'a, <B as Mixer>::Music>;

/// Container format of a music stream
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MusicType {
    /// No music
    #[default]
    None = 0,
    /// External command
    Cmd = 1,
    /// WAVE/RIFF
    Wav = 2,
    /// Tracker module
    Mod = 3,
    /// MIDI
    Mid = 4,
    /// Ogg Vorbis
    Ogg = 5,
    /// MP3
    Mp3 = 6,
    /// FLAC
    Flac = 8,
    /// Opus
    Opus = 10,
}

impl MusicType {
    /// Map a native value, unknown values become [`MusicType::None`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Cmd,
            2 => Self::Wav,
            3 => Self::Mod,
            4 => Self::Mid,
            5 => Self::Ogg,
            6 => Self::Mp3,
            8 => Self::Flac,
            10 => Self::Opus,
            _ => Self::None,
        }
    }
}

/// Owning music stream handle
///
/// Dropping the stream that is playing halts the music.
pub struct Music<B: Mixer> {
    handle: Owned<B::Music>,
}

impl<B: Mixer> Music<B> {
    /// Open a music file
    pub fn load(path: impl AsRef<Path>) -> Self {
        // SAFETY: fresh stream from the loader
        unsafe { Self::from_raw(B::load_mus(&path.as_ref().to_string_lossy())) }
    }

    /// Take ownership of a raw music stream
    ///
    /// # Safety
    /// `raw` must be null or a live stream of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Music) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a stream owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: MusicView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native stream is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Music {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> MusicView<'_, B> {
        self.handle.view()
    }

    fn raw(&self) -> Option<NonNull<B::Music>> {
        self.handle.get()
    }

    /// Play `loops` times, `-1` loops forever; replaces the current music
    pub fn play(&self, loops: i32) -> bool {
        self.raw().is_some_and(|m| B::play_music(m, loops) == 0)
    }

    /// Like [`Music::play`], fading in over `fade`
    pub fn fade_in(&self, loops: i32, fade: Duration) -> bool {
        self.raw().is_some_and(|m| B::fade_in_music(m, loops, millis(fade)) == 0)
    }

    /// Fade in starting at `position`, see [`Music::set_position`]
    pub fn fade_in_from(&self, loops: i32, fade: Duration, position: f64) -> bool {
        self.raw()
            .is_some_and(|m| B::fade_in_music_pos(m, loops, millis(fade), position) == 0)
    }

    /// Container format of this stream
    pub fn music_type(&self) -> Option<MusicType> {
        self.raw().map(|m| MusicType::from_raw(B::music_type(Some(m))))
    }

    /// Container format of the playing stream
    pub fn playing_type() -> MusicType {
        MusicType::from_raw(B::music_type(None))
    }

    /// Number of music decoders available
    pub fn decoder_count() -> i32 {
        B::num_music_decoders()
    }

    /// Name of a music decoder
    pub fn decoder(index: i32) -> Option<String> {
        B::music_decoder(index)
    }

    /// Whether a music decoder is available, case-insensitive
    pub fn has_decoder(name: &str) -> bool {
        B::has_music_decoder(name)
    }

    /// Set the music volume; returns the previous one
    ///
    /// A negative value leaves the volume unchanged.
    pub fn set_volume(volume: i32) -> i32 {
        B::volume_music(volume)
    }

    /// Music volume
    pub fn volume() -> i32 {
        B::volume_music(-1)
    }

    /// Stop the music
    pub fn halt() -> bool {
        B::halt_music() == 0
    }

    /// Fade out over `over` then stop; false when nothing is playing
    pub fn fade_out(over: Duration) -> bool {
        B::fade_out_music(millis(over)) == 1
    }

    /// Fade state of the music
    pub fn fading() -> Fading {
        Fading::from_raw(B::fading_music())
    }

    /// Pause the music
    pub fn pause() {
        B::pause_music();
    }

    /// Resume paused music
    pub fn resume() {
        B::resume_music();
    }

    /// Restart the music from the beginning
    pub fn rewind() {
        B::rewind_music();
    }

    /// Whether the music is paused
    pub fn is_paused() -> bool {
        B::paused_music() != 0
    }

    /// Whether music is playing, paused music included
    pub fn is_playing() -> bool {
        B::playing_music() != 0
    }

    /// Jump within the music
    ///
    /// Seconds for most formats, a pattern number for tracker modules.
    pub fn set_position(position: f64) -> bool {
        B::set_music_position(position) == 0
    }

    /// Play music through an external command, `None` goes back to the
    /// built-in decoders
    pub fn set_command(command: Option<&str>) -> bool {
        B::set_music_cmd(command) == 0
    }
}

impl<B: Mixer> Default for Music<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Mixer> std::fmt::Debug for Music<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Music").field("handle", &self.handle).finish()
    }
}
