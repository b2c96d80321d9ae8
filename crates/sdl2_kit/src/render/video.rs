//! Video driver and display queries

use crate::backend::Video;
use crate::foundation::geometry::Rect;
use crate::render::types::DisplayOrientation;

/// Start the video driver, `None` picks the default one
///
/// Usually done by `Root` with `SystemFlags::VIDEO`.
pub fn init<B: Video>(driver: Option<&str>) -> bool {
    B::video_init(driver) == 0
}

/// Stop the video driver
pub fn quit<B: Video>() {
    B::video_quit();
}

/// Name of the running video driver
pub fn current_driver<B: Video>() -> Option<String> {
    B::current_video_driver()
}

/// Number of video drivers compiled in
pub fn driver_count<B: Video>() -> i32 {
    B::num_video_drivers()
}

/// Name of a compiled-in video driver
pub fn driver<B: Video>(index: i32) -> Option<String> {
    B::video_driver(index)
}

/// Desktop area covered by a display
pub fn display_bounds<B: Video>(index: i32) -> Option<Rect> {
    let mut rect = Rect::default();
    (B::display_bounds(index, &mut rect) == 0).then_some(rect)
}

/// Display area minus taskbars and docks
pub fn display_usable_bounds<B: Video>(index: i32) -> Option<Rect> {
    let mut rect = Rect::default();
    (B::display_usable_bounds(index, &mut rect) == 0).then_some(rect)
}

/// Physical orientation of a display
pub fn display_orientation<B: Video>(index: i32) -> DisplayOrientation {
    DisplayOrientation::from_raw(B::display_orientation(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Headless};
    use crate::system::{Root, SystemFlags};

    #[test]
    fn test_driver_listing() {
        headless::reset();
        assert_eq!(driver_count::<Headless>(), 1);
        assert_eq!(driver::<Headless>(0).as_deref(), Some("headless"));
        assert_eq!(driver::<Headless>(1), None);
    }

    #[test]
    fn test_current_driver_follows_init() {
        headless::reset();
        assert_eq!(current_driver::<Headless>(), None);
        assert!(init::<Headless>(None));
        assert_eq!(current_driver::<Headless>().as_deref(), Some("headless"));
        quit::<Headless>();
        assert_eq!(current_driver::<Headless>(), None);
        assert!(!init::<Headless>(Some("x11")));
    }

    #[test]
    fn test_display_queries() {
        headless::reset();
        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
        assert_eq!(display_bounds::<Headless>(0), Some(Rect::new(0, 0, 1920, 1080)));
        assert_eq!(display_usable_bounds::<Headless>(0), Some(Rect::new(0, 0, 1920, 1040)));
        assert_eq!(display_bounds::<Headless>(1), None);
        assert_eq!(display_orientation::<Headless>(0), DisplayOrientation::Landscape);
        assert_eq!(display_orientation::<Headless>(3), DisplayOrientation::Unknown);
    }
}
