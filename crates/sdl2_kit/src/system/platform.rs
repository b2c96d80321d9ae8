//! Platform identification

use crate::backend::Core;

/// Name of the running platform ("Linux", "Windows", "Mac OS X", ...)
pub fn name<B: Core>() -> String {
    B::platform()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::Headless;

    #[test]
    fn test_headless_platform_name() {
        assert_eq!(name::<Headless>(), "Headless");
    }
}
