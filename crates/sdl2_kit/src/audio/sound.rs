//! Sample chunks

use std::path::Path;
use std::ptr::NonNull;
use std::time::Duration;

use crate::audio::channel::Channel;
use crate::audio::millis;
use crate::backend::Mixer;
use crate::foundation::handle::{Borrowed, Owned, View};

/// Non-owning alias of a native sample chunk
pub type SoundView<'a, B> = View<'a, <B as Mixer>::Chunk>;

/// Owning handle of a decoded sample
///
/// Needs an open [`crate::audio::AudioDevice`] to load. Dropping a sound
/// stops the channels playing it.
pub struct Sound<B: Mixer> {
    handle: Owned<B::Chunk>,
}

impl<B: Mixer> Sound<B> {
    /// Load and decode a sample file
    pub fn load(path: impl AsRef<Path>) -> Self {
        // SAFETY: fresh chunk from the loader
        unsafe { Self::from_raw(B::load_wav(&path.as_ref().to_string_lossy())) }
    }

    /// Take ownership of a raw chunk
    ///
    /// # Safety
    /// `raw` must be null or a live chunk of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Chunk) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a chunk owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: SoundView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native chunk is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Chunk {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> SoundView<'_, B> {
        self.handle.view()
    }

    fn raw(&self) -> Option<NonNull<B::Chunk>> {
        self.handle.get()
    }

    fn start(&self, play: impl FnOnce(NonNull<B::Chunk>) -> i32) -> Option<Channel<B>> {
        let id = play(self.raw()?);
        (id >= 0).then(|| Channel::new(id))
    }

    /// Play `loops + 1` times (`-1` loops forever) on `channel`
    ///
    /// [`Channel::any`] picks the first free unreserved channel. Returns the
    /// channel used.
    pub fn play(&self, loops: i32, channel: Channel<B>) -> Option<Channel<B>> {
        self.start(|c| B::play_channel_timed(channel.id(), c, loops, -1))
    }

    /// Like [`Sound::play`], stopping after `limit`
    pub fn play_timed(&self, loops: i32, channel: Channel<B>, limit: Duration) -> Option<Channel<B>> {
        self.start(|c| B::play_channel_timed(channel.id(), c, loops, millis(limit)))
    }

    /// Like [`Sound::play`], fading in over `fade`
    pub fn fade_in(&self, loops: i32, channel: Channel<B>, fade: Duration) -> Option<Channel<B>> {
        self.start(|c| B::fade_in_channel_timed(channel.id(), c, loops, millis(fade), -1))
    }

    /// Fade in over `fade` and stop after `limit`
    pub fn fade_in_timed(&self, loops: i32, channel: Channel<B>, fade: Duration, limit: Duration) -> Option<Channel<B>> {
        self.start(|c| B::fade_in_channel_timed(channel.id(), c, loops, millis(fade), millis(limit)))
    }

    /// Set the sample volume; returns the previous one
    ///
    /// Values above [`crate::audio::MAX_VOLUME`] are clamped and a negative
    /// value leaves the volume unchanged.
    pub fn set_volume(&mut self, volume: i32) -> Option<i32> {
        self.raw().map(|c| B::volume_chunk(c, volume))
    }

    /// Sample volume
    pub fn volume(&self) -> Option<i32> {
        self.raw().map(|c| B::volume_chunk(c, -1))
    }

    /// Number of sample decoders available
    pub fn decoder_count() -> i32 {
        B::num_chunk_decoders()
    }

    /// Name of a sample decoder ("WAVE", "OGG", ...)
    pub fn decoder(index: i32) -> Option<String> {
        B::chunk_decoder(index)
    }

    /// Whether a sample decoder is available, case-insensitive
    pub fn has_decoder(name: &str) -> bool {
        B::has_chunk_decoder(name)
    }
}

impl<B: Mixer> Default for Sound<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Mixer> std::fmt::Debug for Sound<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sound").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{open_audio, AudioFormat, MAX_VOLUME};
    use crate::backend::headless::{self, Call, Headless, Resource};

    type Ch = Channel<Headless>;

    fn open() {
        crate::foundation::logging::init_for_tests();
        headless::reset();
        assert!(open_audio::<Headless>(44_100, AudioFormat::DEFAULT, 2, 1024));
    }

    #[test]
    fn test_default_sound_cannot_play() {
        let mut s = Sound::<Headless>::default();
        assert!(!s.is_valid());
        assert!(s.play(0, Ch::any()).is_none());
        assert_eq!(s.set_volume(10), None);
    }

    #[test]
    fn test_load_requires_open_device() {
        headless::reset();
        let path = headless::fixture("sound_closed.wav", b"RIFF");
        assert!(!Sound::<Headless>::load(&path).is_valid());
        assert!(crate::system::last_error::<Headless>().contains("Audio device"));
    }

    #[test]
    fn test_load_missing_file() {
        open();
        assert!(!Sound::<Headless>::load("/missing/boom.wav").is_valid());
    }

    #[test]
    fn test_release_is_journaled_once() {
        open();
        let path = headless::fixture("sound_release.wav", b"RIFF");
        let mut a = Sound::<Headless>::load(&path);
        let b = std::mem::take(&mut a);
        drop(a);
        assert_eq!(headless::count(&Call::Release(Resource::Chunk)), 0);
        drop(b);
        assert_eq!(headless::count(&Call::Create(Resource::Chunk)), 1);
        assert_eq!(headless::count(&Call::Release(Resource::Chunk)), 1);
    }

    #[test]
    fn test_drop_stops_channels() {
        open();
        let sound = Sound::<Headless>::load(headless::fixture("sound_stop.wav", b"RIFF"));
        let ch = sound.play(-1, Ch::any()).unwrap();
        assert!(ch.is_playing());
        drop(sound);
        assert!(!ch.is_playing());
    }

    #[test]
    fn test_playback_variants() {
        open();
        let sound = Sound::<Headless>::load(headless::fixture("sound_variants.wav", b"RIFF"));
        assert_eq!(sound.play(0, Ch::new(4)), Some(Ch::new(4)));
        assert_eq!(sound.play_timed(1, Ch::any(), Duration::from_millis(500)), Some(Ch::new(0)));
        assert_eq!(sound.fade_in_timed(0, Ch::any(), Duration::from_millis(20), Duration::from_secs(2)), Some(Ch::new(1)));
        assert!(sound.play(0, Ch::new(8)).is_none());
    }

    #[test]
    fn test_volume() {
        open();
        let mut sound = Sound::<Headless>::load(headless::fixture("sound_volume.wav", b"RIFF"));
        assert_eq!(sound.volume(), Some(MAX_VOLUME));
        assert_eq!(sound.set_volume(10), Some(MAX_VOLUME));
        assert_eq!(sound.volume(), Some(10));
    }

    #[test]
    fn test_negative_volume_only_queries() {
        open();
        let mut sound = Sound::<Headless>::load(headless::fixture("sound_query.wav", b"RIFF"));
        assert_eq!(sound.set_volume(-1), Some(MAX_VOLUME));
        assert_eq!(sound.volume(), Some(MAX_VOLUME));
        sound.set_volume(20);
        assert_eq!(sound.set_volume(-5), Some(20));
        assert_eq!(sound.volume(), Some(20));
    }

    #[test]
    fn test_decoders() {
        headless::reset();
        assert!(Sound::<Headless>::decoder_count() > 0);
        assert_eq!(Sound::<Headless>::decoder(0).as_deref(), Some("WAVE"));
        assert!(Sound::<Headless>::has_decoder("wave"));
        assert!(!Sound::<Headless>::has_decoder("TRACKER"));
        assert_eq!(Sound::<Headless>::decoder(-1), None);
    }
}
