//! Mixing channels

use std::marker::PhantomData;
use std::time::Duration;

use crate::audio::group::ChannelGroup;
use crate::audio::millis;
use crate::backend::Mixer;

/// Fade state of a channel or of the music
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fading {
    /// Not fading
    #[default]
    NoFading = 0,
    /// Fading out
    FadingOut = 1,
    /// Fading in
    FadingIn = 2,
}

impl Fading {
    /// Map a native value, unknown values become [`Fading::NoFading`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::FadingOut,
            2 => Self::FadingIn,
            _ => Self::NoFading,
        }
    }
}

/// Id of one mixing channel
///
/// [`Channel::any`] stands for "every channel" in the calls that accept it
/// and for "first free channel" when playing a [`crate::audio::Sound`].
pub struct Channel<B: Mixer> {
    id: i32,
    _backend: PhantomData<fn() -> B>,
}

impl<B: Mixer> Channel<B> {
    /// Channel with a known id
    pub const fn new(id: i32) -> Self {
        Self { id, _backend: PhantomData }
    }

    /// The `-1` wildcard
    pub const fn any() -> Self {
        Self::new(-1)
    }

    /// Native channel number
    pub fn id(self) -> i32 {
        self.id
    }

    /// Whether this is the wildcard
    pub fn is_any(self) -> bool {
        self.id < 0
    }

    /// Remove every effect registered on the channel
    pub fn unregister_all_effects(self) -> bool {
        B::unregister_all_effects(self.id) != 0
    }

    /// Set left/right volume, 255 is full volume
    pub fn set_panning(self, left: u8, right: u8) -> bool {
        B::set_panning(self.id, left, right) != 0
    }

    /// Simulate a source at `angle` degrees (0 is straight ahead, clockwise)
    /// and `distance` (0 is closest, 255 farthest)
    pub fn set_position(self, angle: i16, distance: u8) -> bool {
        B::set_position(self.id, angle, distance) != 0
    }

    /// Attenuate by distance only
    pub fn set_distance(self, distance: u8) -> bool {
        B::set_distance(self.id, distance) != 0
    }

    /// Swap left and right output
    pub fn reverse_stereo(self, flip: bool) -> bool {
        B::set_reverse_stereo(self.id, i32::from(flip)) != 0
    }

    /// Tag the channel as a member of `group`
    pub fn group(self, group: ChannelGroup<B>) -> bool {
        B::group_channel(self.id, group.tag()) == 1
    }

    /// Stop playback
    pub fn halt(self) -> bool {
        B::halt_channel(self.id) == 0
    }

    /// Stop playback after `after`; true when a channel was scheduled
    pub fn expire(self, after: Duration) -> bool {
        B::expire_channel(self.id, millis(after)) > 0
    }

    /// Cancel a scheduled stop
    pub fn unexpire(self) -> bool {
        B::expire_channel(self.id, -1) > 0
    }

    /// Fade to silence over `over` then stop; true when a fade started
    pub fn fade_out(self, over: Duration) -> bool {
        B::fade_out_channel(self.id, millis(over)) > 0
    }

    /// Set the volume, clamped to [`crate::audio::MAX_VOLUME`]; a negative
    /// value only queries
    ///
    /// Returns the previous volume; for the wildcard, the average of all
    /// channels.
    pub fn set_volume(self, volume: i32) -> i32 {
        B::volume(self.id, volume)
    }

    /// Current volume
    pub fn volume(self) -> i32 {
        B::volume(self.id, -1)
    }

    /// Whether a sample is playing, paused samples included
    pub fn is_playing(self) -> bool {
        B::playing(self.id) != 0
    }

    /// Whether playback is paused
    pub fn is_paused(self) -> bool {
        B::paused(self.id) != 0
    }

    /// Fade state
    pub fn fading(self) -> Fading {
        Fading::from_raw(B::fading_channel(self.id))
    }

    /// Pause playback
    pub fn pause(self) {
        B::pause(self.id);
    }

    /// Resume paused playback
    pub fn resume(self) {
        B::resume(self.id);
    }

    /// Keep the first `count` channels out of automatic selection
    ///
    /// Returns the number actually reserved.
    pub fn reserve(count: i32) -> i32 {
        B::reserve_channels(count)
    }

    /// Set the volume of every channel; returns the previous average
    pub fn set_all_volume(volume: i32) -> i32 {
        Self::any().set_volume(volume)
    }

    /// Number of channels playing
    pub fn playing_count() -> i32 {
        B::playing(-1)
    }

    /// Number of channels paused
    pub fn paused_count() -> i32 {
        B::paused(-1)
    }
}

impl<B: Mixer> Clone for Channel<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Mixer> Copy for Channel<B> {}

impl<B: Mixer> PartialEq for Channel<B> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<B: Mixer> Eq for Channel<B> {}

impl<B: Mixer> std::fmt::Debug for Channel<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Channel").field(&self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{open_audio, AudioFormat, Sound, MAX_VOLUME};
    use crate::backend::headless::{self, Headless};

    type Ch = Channel<Headless>;

    fn open_with_sound() -> Sound<Headless> {
        crate::foundation::logging::init_for_tests();
        headless::reset();
        assert!(open_audio::<Headless>(44_100, AudioFormat::DEFAULT, 2, 1024));
        let path = headless::fixture("channel_test.wav", b"RIFF....WAVEfmt ");
        let sound = Sound::load(&path);
        assert!(sound.is_valid());
        sound
    }

    #[test]
    fn test_any_is_wildcard() {
        assert!(Ch::any().is_any());
        assert_eq!(Ch::any().id(), -1);
        assert!(!Ch::new(3).is_any());
        assert_eq!(Ch::new(3), Ch::new(3));
    }

    #[test]
    fn test_play_pause_halt() {
        let sound = open_with_sound();
        let ch = sound.play(0, Ch::any()).unwrap();
        assert_eq!(ch.id(), 0);
        assert!(ch.is_playing());
        ch.pause();
        assert!(ch.is_paused());
        assert!(ch.is_playing());
        assert_eq!(Ch::paused_count(), 1);
        ch.resume();
        assert!(!ch.is_paused());
        assert_eq!(Ch::playing_count(), 1);
        assert!(ch.halt());
        assert!(!ch.is_playing());
    }

    #[test]
    fn test_volume() {
        let _sound = open_with_sound();
        let ch = Ch::new(2);
        assert_eq!(ch.volume(), MAX_VOLUME);
        assert_eq!(ch.set_volume(32), MAX_VOLUME);
        assert_eq!(ch.volume(), 32);
        assert_eq!(ch.set_volume(1000), 32);
        assert_eq!(ch.volume(), MAX_VOLUME);
        Ch::set_all_volume(64);
        assert_eq!(Ch::new(7).volume(), 64);
    }

    #[test]
    fn test_negative_volume_only_queries() {
        let _sound = open_with_sound();
        let ch = Ch::new(3);
        assert_eq!(ch.set_volume(-1), MAX_VOLUME);
        assert_eq!(ch.volume(), MAX_VOLUME);
        ch.set_volume(40);
        assert_eq!(ch.set_volume(-1), 40);
        assert_eq!(ch.volume(), 40);
    }

    #[test]
    fn test_fading_and_expiry() {
        let sound = open_with_sound();
        let ch = sound.fade_in(0, Ch::any(), Duration::from_millis(100)).unwrap();
        assert_eq!(ch.fading(), Fading::FadingIn);
        assert!(ch.fade_out(Duration::from_millis(50)));
        assert_eq!(ch.fading(), Fading::FadingOut);
        assert!(ch.expire(Duration::from_secs(1)));
        assert!(ch.unexpire());
        assert!(!Ch::new(99).expire(Duration::from_secs(1)));
        assert!(!Ch::new(5).fade_out(Duration::from_millis(50)));
    }

    #[test]
    fn test_effects_need_valid_channel() {
        let _sound = open_with_sound();
        let ch = Ch::new(1);
        assert!(ch.set_panning(255, 0));
        assert!(ch.set_position(90, 10));
        assert!(ch.set_distance(200));
        assert!(ch.reverse_stereo(true));
        assert!(ch.unregister_all_effects());
        assert!(!Ch::new(42).set_panning(0, 255));
        assert!(!Ch::new(42).unregister_all_effects());
    }

    #[test]
    fn test_reserved_channels_are_skipped() {
        let sound = open_with_sound();
        assert_eq!(Ch::reserve(2), 2);
        let ch = sound.play(0, Ch::any()).unwrap();
        assert_eq!(ch.id(), 2);
        assert_eq!(Ch::reserve(100), 8);
        assert!(sound.play(0, Ch::any()).is_none());
        assert!(sound.play(0, Ch::new(0)).is_some());
    }

    #[test]
    fn test_group_membership() {
        let _sound = open_with_sound();
        let group = ChannelGroup::<Headless>::new(5);
        assert!(Ch::new(3).group(group));
        assert_eq!(group.count(), 1);
        assert!(!Ch::new(30).group(group));
    }
}
