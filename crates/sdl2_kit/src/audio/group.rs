//! Tagged channel groups

use std::marker::PhantomData;
use std::time::Duration;

use crate::audio::channel::Channel;
use crate::audio::millis;
use crate::backend::Mixer;

/// Tag shared by a set of channels
///
/// Tag `-1` is the default group, which contains every channel.
pub struct ChannelGroup<B: Mixer> {
    tag: i32,
    _backend: PhantomData<fn() -> B>,
}

impl<B: Mixer> ChannelGroup<B> {
    /// Group with a given tag
    pub const fn new(tag: i32) -> Self {
        Self { tag, _backend: PhantomData }
    }

    /// The default group holding every channel
    pub const fn all() -> Self {
        Self::new(-1)
    }

    /// Native tag
    pub fn tag(self) -> i32 {
        self.tag
    }

    /// Tag every channel from `from` to `to` inclusive
    ///
    /// True only when every channel in the range was tagged.
    pub fn assign(self, from: Channel<B>, to: Channel<B>) -> bool {
        let wanted = to.id() - from.id() + 1;
        wanted > 0 && B::group_channels(from.id(), to.id(), self.tag) == wanted
    }

    /// Stop every channel of the group
    pub fn halt(self) -> bool {
        B::halt_group(self.tag) == 0
    }

    /// First member channel that is not playing
    pub fn available(self) -> Option<Channel<B>> {
        channel(B::group_available(self.tag))
    }

    /// Whether some member channel is not playing
    pub fn is_available(self) -> bool {
        self.available().is_some()
    }

    /// Number of member channels
    pub fn count(self) -> i32 {
        B::group_count(self.tag)
    }

    /// Member channel that has been playing the longest
    pub fn oldest(self) -> Option<Channel<B>> {
        channel(B::group_oldest(self.tag))
    }

    /// Member channel that started playing most recently
    pub fn newest(self) -> Option<Channel<B>> {
        channel(B::group_newer(self.tag))
    }

    /// Fade out every member channel; returns how many started fading
    pub fn fade_out(self, over: Duration) -> i32 {
        B::fade_out_group(self.tag, millis(over))
    }
}

fn channel<B: Mixer>(id: i32) -> Option<Channel<B>> {
    (id >= 0).then(|| Channel::new(id))
}

impl<B: Mixer> Clone for ChannelGroup<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Mixer> Copy for ChannelGroup<B> {}

impl<B: Mixer> PartialEq for ChannelGroup<B> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl<B: Mixer> Eq for ChannelGroup<B> {}

impl<B: Mixer> std::fmt::Debug for ChannelGroup<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ChannelGroup").field(&self.tag).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{open_audio, AudioFormat, Fading, Sound};
    use crate::backend::headless::{self, Headless};

    type Group = ChannelGroup<Headless>;
    type Ch = Channel<Headless>;

    fn setup() -> Sound<Headless> {
        crate::foundation::logging::init_for_tests();
        headless::reset();
        assert!(open_audio::<Headless>(44_100, AudioFormat::DEFAULT, 2, 1024));
        Sound::load(headless::fixture("group_test.wav", b"RIFF....WAVEfmt "))
    }

    #[test]
    fn test_assign_and_count() {
        let _sound = setup();
        let group = Group::new(1);
        assert_eq!(group.count(), 0);
        assert!(group.assign(Ch::new(2), Ch::new(4)));
        assert_eq!(group.count(), 3);
        assert_eq!(Group::all().count(), 8);
        assert!(!group.assign(Ch::new(6), Ch::new(9)));
        assert!(!group.assign(Ch::new(4), Ch::new(2)));
    }

    #[test]
    fn test_availability_and_age() {
        let sound = setup();
        let group = Group::new(7);
        group.assign(Ch::new(0), Ch::new(1));
        assert_eq!(group.available(), Some(Ch::new(0)));
        assert_eq!(group.oldest(), None);

        sound.play(0, Ch::new(1)).unwrap();
        sound.play(0, Ch::new(0)).unwrap();
        assert!(!group.is_available());
        assert_eq!(group.oldest(), Some(Ch::new(1)));
        assert_eq!(group.newest(), Some(Ch::new(0)));

        assert_eq!(group.fade_out(Duration::from_millis(10)), 2);
        assert_eq!(Ch::new(0).fading(), Fading::FadingOut);
        assert!(group.halt());
        assert!(group.is_available());
    }

    #[test]
    fn test_default_group_sees_every_channel() {
        let sound = setup();
        sound.play(0, Ch::new(3)).unwrap();
        assert_eq!(Group::all().available(), Some(Ch::new(0)));
        assert_eq!(Group::all().oldest(), Some(Ch::new(3)));
    }
}
