//! Application directories

use std::path::PathBuf;

use crate::backend::Core;

/// Per-user writable directory for `org`/`app`, created when missing
pub fn pref_path<B: Core>(org: &str, app: &str) -> Option<PathBuf> {
    B::pref_path(org, app).map(PathBuf::from)
}

/// Directory the application was run from
pub fn base_path<B: Core>() -> Option<PathBuf> {
    B::base_path().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;

    #[test]
    fn test_pref_path_is_created() {
        let path = pref_path::<Headless>("sdl2_kit", "pref_path_test").unwrap();
        assert!(path.is_dir());
        assert!(path.ends_with("sdl2_kit/pref_path_test"));
    }

    #[test]
    fn test_pref_path_rejects_empty_app() {
        assert!(pref_path::<Headless>("org", "").is_none());
    }

    #[test]
    fn test_base_path_exists() {
        assert!(base_path::<Headless>().unwrap().is_dir());
    }
}
