//! Logging utilities
//!
//! The wrappers only log lifecycle events: guard setup at `info`, guard
//! teardown at `debug`, handle release at `trace` and initialization failures
//! at `error`. Forwarded operations stay silent.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from `RUST_LOG`, defaulting to `info`
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Initialize logging for tests; repeated calls are ignored
pub fn init_for_tests() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_for_tests_is_repeatable() {
        init_for_tests();
        init_for_tests();
        info!("test logging ready");
        assert!(log::max_level() >= log::LevelFilter::Error);
    }
}
