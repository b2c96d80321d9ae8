//! Core library lifetime
//!
//! [`Root`] ties the process-wide library initialization to a scope. The free
//! functions forward to the matching native calls for callers that manage
//! subsystems by hand.

use std::marker::PhantomData;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::backend::Core;
use crate::error::{InitError, InitResult};

pub mod filesystem;
pub mod messagebox;
pub mod platform;
pub mod power;

bitflags! {
    /// Library subsystems
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SystemFlags: u32 {
        /// Timer subsystem
        const TIMER = 0x0000_0001;
        /// Audio subsystem
        const AUDIO = 0x0000_0010;
        /// Video subsystem, implies EVENTS
        const VIDEO = 0x0000_0020;
        /// Joystick subsystem, implies EVENTS
        const JOYSTICK = 0x0000_0200;
        /// Force feedback
        const HAPTIC = 0x0000_1000;
        /// Game controllers, implies JOYSTICK
        const GAMECONTROLLER = 0x0000_2000;
        /// Event queue
        const EVENTS = 0x0000_4000;
        /// Sensors
        const SENSOR = 0x0000_8000;
        /// Ignored, kept for compatibility
        const NOPARACHUTE = 0x0010_0000;
        /// Every subsystem
        const EVERYTHING = Self::TIMER.bits()
            | Self::AUDIO.bits()
            | Self::VIDEO.bits()
            | Self::EVENTS.bits()
            | Self::JOYSTICK.bits()
            | Self::HAPTIC.bits()
            | Self::GAMECONTROLLER.bits()
            | Self::SENSOR.bits();
    }
}

/// Initialize subsystems; true on success
pub fn init<B: Core>(flags: SystemFlags) -> bool {
    B::init(flags.bits()) == 0
}

/// Initialize additional subsystems; true on success
pub fn init_subsystem<B: Core>(flags: SystemFlags) -> bool {
    B::init_subsystem(flags.bits()) == 0
}

/// Which of `flags` are initialized; an empty mask asks about all of them
pub fn was_init<B: Core>(flags: SystemFlags) -> SystemFlags {
    SystemFlags::from_bits_truncate(B::was_init(flags.bits()))
}

/// Shut down specific subsystems
pub fn quit_subsystem<B: Core>(flags: SystemFlags) {
    B::quit_subsystem(flags.bits());
}

/// Shut down every subsystem
pub fn quit<B: Core>() {
    B::quit();
}

/// Last error message reported by the native library
pub fn last_error<B: Core>() -> String {
    B::last_error()
}

/// Clear the native error message
pub fn clear_error<B: Core>() {
    B::clear_error();
}

/// Scope guard for the core library
///
/// Construction initializes the requested subsystems, drop shuts the whole
/// library down. Guards are not reference counted: nesting two of them quits
/// the library when the inner one drops.
#[must_use = "the library shuts down when the guard is dropped"]
pub struct Root<B: Core> {
    flags: SystemFlags,
    _backend: PhantomData<(fn() -> B, *const ())>,
}

impl<B: Core> Root<B> {
    /// Initialize `flags`
    ///
    /// Failure is a programming error: it trips a debug assertion and is
    /// ignored in release builds. Use [`Root::try_new`] to handle it.
    pub fn new(flags: SystemFlags) -> Self {
        let ok = B::init(flags.bits()) == 0;
        if ok {
            log::info!("initialized subsystems {flags:?}");
        } else {
            log::error!("failed to initialize subsystems {flags:?}: {}", B::last_error());
        }
        debug_assert!(ok, "failed to initialize subsystems {flags:?}");
        Self { flags, _backend: PhantomData }
    }

    /// Initialize `flags`, reporting failure as an error
    pub fn try_new(flags: SystemFlags) -> InitResult<Self> {
        if B::init(flags.bits()) != 0 {
            let message = B::last_error();
            log::error!("failed to initialize subsystems {flags:?}: {message}");
            return Err(InitError::Core { flags, message });
        }
        log::info!("initialized subsystems {flags:?}");
        Ok(Self { flags, _backend: PhantomData })
    }

    /// Subsystems requested at construction
    pub fn flags(&self) -> SystemFlags {
        self.flags
    }
}

impl<B: Core> Drop for Root<B> {
    fn drop(&mut self) {
        log::debug!("shutting down subsystems {:?}", self.flags);
        B::quit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Fault, Headless};

    #[test]
    fn test_everything_excludes_noparachute() {
        assert!(!SystemFlags::EVERYTHING.contains(SystemFlags::NOPARACHUTE));
        assert_eq!(SystemFlags::EVERYTHING.bits(), 0xF231);
        assert_eq!((SystemFlags::AUDIO | SystemFlags::VIDEO).bits(), 0x30);
    }

    #[test]
    fn test_root_calls_init_then_quit_once() {
        headless::reset();
        {
            let root = Root::<Headless>::new(SystemFlags::VIDEO);
            assert_eq!(root.flags(), SystemFlags::VIDEO);
            assert!(was_init::<Headless>(SystemFlags::VIDEO).contains(SystemFlags::VIDEO));
        }
        assert_eq!(headless::journal(), vec![Call::Init(0x20), Call::Quit]);
        assert!(was_init::<Headless>(SystemFlags::empty()).is_empty());
    }

    #[test]
    fn test_try_new_reports_error() {
        headless::reset();
        headless::inject(Fault::Init);
        let err = Root::<Headless>::try_new(SystemFlags::AUDIO).err().unwrap();
        assert!(matches!(err, InitError::Core { flags, .. } if flags == SystemFlags::AUDIO));
        assert!(!last_error::<Headless>().is_empty());
        // No guard, no quit
        assert_eq!(headless::journal(), vec![Call::Init(0x10)]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "failed to initialize")]
    fn test_new_asserts_on_failure() {
        headless::reset();
        headless::inject(Fault::Init);
        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
    }

    #[test]
    fn test_subsystem_functions() {
        headless::reset();
        assert!(init::<Headless>(SystemFlags::TIMER));
        assert!(init_subsystem::<Headless>(SystemFlags::GAMECONTROLLER));
        let active = was_init::<Headless>(SystemFlags::empty());
        assert!(active.contains(SystemFlags::JOYSTICK | SystemFlags::EVENTS | SystemFlags::TIMER));
        quit_subsystem::<Headless>(SystemFlags::GAMECONTROLLER);
        assert!(!was_init::<Headless>(SystemFlags::GAMECONTROLLER).contains(SystemFlags::GAMECONTROLLER));
        quit::<Headless>();
        assert!(was_init::<Headless>(SystemFlags::empty()).is_empty());
        clear_error::<Headless>();
        assert!(last_error::<Headless>().is_empty());
    }
}
