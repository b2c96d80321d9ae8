//! Font rendering
//!
//! [`TtfRoot`] scopes the font library; [`Font`] opens faces and renders
//! UTF-8 text into [`crate::render::Surface`]s.

use std::marker::PhantomData;

use crate::backend::Ttf;
use crate::error::{InitError, InitResult};

pub mod font;

pub use font::{Font, FontHinting, FontStyle, FontView, GlyphMetrics};

/// Whether the font library is initialized
pub fn was_init<B: Ttf>() -> bool {
    B::ttf_was_init() > 0
}

/// Scope guard for the font library
#[must_use = "the font library shuts down when the guard is dropped"]
pub struct TtfRoot<B: Ttf> {
    _backend: PhantomData<(fn() -> B, *const ())>,
}

impl<B: Ttf> TtfRoot<B> {
    /// Initialize the font library
    ///
    /// Failure trips a debug assertion; use [`TtfRoot::try_new`] to handle it.
    pub fn new() -> Self {
        let ok = B::ttf_init() == 0;
        if ok {
            log::info!("initialized font rendering");
        } else {
            log::error!("failed to initialize font rendering: {}", B::last_error());
        }
        debug_assert!(ok, "failed to initialize font rendering");
        Self { _backend: PhantomData }
    }

    /// Initialize the font library, reporting failure as an error
    pub fn try_new() -> InitResult<Self> {
        if B::ttf_init() != 0 {
            let message = B::last_error();
            log::error!("failed to initialize font rendering: {message}");
            return Err(InitError::Ttf(message));
        }
        log::info!("initialized font rendering");
        Ok(Self { _backend: PhantomData })
    }
}

impl<B: Ttf> Default for TtfRoot<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Ttf> Drop for TtfRoot<B> {
    fn drop(&mut self) {
        log::debug!("shutting down font rendering");
        B::ttf_quit();
    }
}

impl<B: Ttf> std::fmt::Debug for TtfRoot<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TtfRoot")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Fault, Headless};

    #[test]
    fn test_root_init_and_quit() {
        headless::reset();
        assert!(!was_init::<Headless>());
        {
            let _ttf = TtfRoot::<Headless>::new();
            assert!(was_init::<Headless>());
        }
        assert!(!was_init::<Headless>());
        assert_eq!(headless::journal(), vec![Call::TtfInit, Call::TtfQuit]);
    }

    #[test]
    fn test_try_new_failure() {
        headless::reset();
        headless::inject(Fault::TtfInit);
        let err = TtfRoot::<Headless>::try_new().unwrap_err();
        assert!(matches!(err, InitError::Ttf(_)));
        assert!(!was_init::<Headless>());
        // No guard, no quit
        assert_eq!(headless::journal(), vec![Call::TtfInit]);
    }
}
