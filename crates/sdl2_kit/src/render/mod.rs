//! Video subsystem wrappers
//!
//! Windows, 2D renderers, textures and software surfaces, plus the flag sets
//! and value enums they use. Every wrapper is generic over the [`Video`]
//! backend.

use crate::backend::Video;

mod buffer;
pub mod renderer;
pub mod surface;
pub mod texture;
pub mod types;
pub mod video;
pub mod window;

pub use renderer::{Renderer, RendererView};
pub use surface::{
    set_yuv_conversion_mode, yuv_conversion_mode, yuv_conversion_mode_for_resolution, BlitTarget, Surface, SurfaceView,
};
pub use texture::{Texture, TextureAttributes, TextureView};
pub use types::{
    position, BlendMode, DisplayMode, DisplayOrientation, Flip, PixelFormat, RendererFlags, RendererInfo, ScaleMode,
    SurfaceFlags, TextureAccess, WindowFlags, YuvConversion,
};
pub use window::{Window, WindowView};

/// Create a window and a default renderer for it in one call
///
/// Both wrappers are invalid when the call fails.
pub fn create_window_and_renderer<B: Video>(w: i32, h: i32, flags: WindowFlags) -> (Window<B>, Renderer<B>) {
    let mut window = std::ptr::null_mut();
    let mut renderer = std::ptr::null_mut();
    if B::create_window_and_renderer(w, h, flags.bits(), &mut window, &mut renderer) != 0 {
        return (Window::default(), Renderer::default());
    }
    // SAFETY: both handles are fresh from the creation call
    unsafe { (Window::from_raw(window), Renderer::from_raw(renderer)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Headless, Resource};
    use crate::foundation::geometry::Size;
    use crate::system::{Root, SystemFlags};

    #[test]
    fn test_create_window_and_renderer() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let (window, renderer) = create_window_and_renderer::<Headless>(64, 32, WindowFlags::HIDDEN);
        assert!(window.is_valid());
        assert!(renderer.is_valid());
        assert_eq!(renderer.output_size(), Some(Size::new(64, 32)));
        drop(renderer);
        drop(window);
        drop(root);
        assert_eq!(headless::count(&Call::Release(Resource::Renderer)), 1);
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 1);
    }

    #[test]
    fn test_create_window_and_renderer_without_video() {
        headless::reset();
        let (window, renderer) = create_window_and_renderer::<Headless>(64, 32, WindowFlags::empty());
        assert!(!window.is_valid());
        assert!(!renderer.is_valid());
    }
}
