//! 2D renderer handle

use std::ptr::NonNull;

use crate::backend::Video;
use crate::config::RendererConfig;
use crate::foundation::geometry::{Color, FPoint, FRect, Point, Rect, Size};
use crate::foundation::handle::{Borrowed, Owned, View};
use crate::render::buffer;
use crate::render::surface::Surface;
use crate::render::texture::Texture;
use crate::render::types::{BlendMode, Flip, PixelFormat, RendererFlags, RendererInfo};
use crate::render::window::Window;

/// Non-owning alias of a native renderer
pub type RendererView<'a, B> = View<'a, <B as Video>::Renderer>;

/// Owning renderer handle
///
/// Coordinates are relative to the viewport and scaled by the render scale.
pub struct Renderer<B: Video> {
    handle: Owned<B::Renderer>,
}

impl<B: Video> Renderer<B> {
    /// Create a renderer for a window
    ///
    /// `index` picks a render driver, `-1` takes the first one supporting
    /// `flags`.
    pub fn new(window: &Window<B>, flags: RendererFlags, index: i32) -> Self {
        let raw = window
            .raw()
            .map_or(std::ptr::null_mut(), |w| B::create_renderer(w, index, flags.bits()));
        // SAFETY: fresh renderer from the creation call
        unsafe { Self::from_raw(raw) }
    }

    /// Create a renderer from its configuration section
    pub fn from_config(window: &Window<B>, config: &RendererConfig) -> Self {
        Self::new(window, config.flags, config.driver_index)
    }

    /// Create a software renderer drawing into a surface
    pub fn software(surface: &mut Surface<B>) -> Self {
        let raw = surface.raw().map_or(std::ptr::null_mut(), B::create_software_renderer);
        // SAFETY: fresh renderer from the creation call
        unsafe { Self::from_raw(raw) }
    }

    /// Take ownership of a raw renderer
    ///
    /// # Safety
    /// `raw` must be null or a live renderer of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Renderer) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a renderer owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: RendererView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native renderer is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Renderer {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> RendererView<'_, B> {
        self.handle.view()
    }

    pub(crate) fn raw(&self) -> Option<NonNull<B::Renderer>> {
        self.handle.get()
    }

    /// Number of render drivers
    pub fn driver_count() -> i32 {
        B::num_render_drivers()
    }

    /// Description of a render driver
    pub fn driver_info(index: i32) -> Option<RendererInfo> {
        let mut info = RendererInfo::default();
        (B::render_driver_info(index, &mut info) == 0).then_some(info)
    }

    /// Description of this renderer
    pub fn info(&self) -> Option<RendererInfo> {
        let renderer = self.raw()?;
        let mut info = RendererInfo::default();
        (B::renderer_info(renderer, &mut info) == 0).then_some(info)
    }

    /// Size of the output in pixels
    pub fn output_size(&self) -> Option<Size> {
        let renderer = self.raw()?;
        let mut s = Size::default();
        (B::renderer_output_size(renderer, &mut s.w, &mut s.h) == 0).then_some(s)
    }

    /// Whether textures can be render targets
    pub fn is_target_supported(&self) -> bool {
        self.raw().is_some_and(B::render_target_supported)
    }

    /// Current render target, invalid for the default target
    pub fn target(&self) -> Borrowed<'_, Texture<B>> {
        let raw = self.raw().map_or(std::ptr::null_mut(), B::render_target);
        // SAFETY: the texture outlives its use as target; Borrowed never releases
        Borrowed::new(unsafe { Texture::from_raw(raw) })
    }

    /// Draw into a texture, `None` restores the default target
    pub fn set_target(&mut self, texture: Option<&Texture<B>>) -> bool {
        self.raw()
            .is_some_and(|r| B::set_render_target(r, texture.and_then(Texture::raw)) == 0)
    }

    /// Device independent resolution, zero when unset
    pub fn logical_size(&self) -> Option<Size> {
        let renderer = self.raw()?;
        let mut s = Size::default();
        B::render_logical_size(renderer, &mut s.w, &mut s.h);
        Some(s)
    }

    /// Set a device independent resolution
    pub fn set_logical_size(&mut self, w: i32, h: i32) -> bool {
        self.raw().is_some_and(|r| B::set_render_logical_size(r, w, h) == 0)
    }

    /// Whether logical scaling is restricted to integers
    pub fn integer_scale(&self) -> bool {
        self.raw().is_some_and(B::render_integer_scale)
    }

    /// Restrict logical scaling to integers
    pub fn set_integer_scale(&mut self, enable: bool) -> bool {
        self.raw().is_some_and(|r| B::set_render_integer_scale(r, enable) == 0)
    }

    /// Drawing scale factors
    pub fn scale(&self) -> Option<(f32, f32)> {
        let renderer = self.raw()?;
        let (mut x, mut y) = (1.0, 1.0);
        B::render_scale(renderer, &mut x, &mut y);
        Some((x, y))
    }

    /// Set the drawing scale factors
    pub fn set_scale(&mut self, x: f32, y: f32) -> bool {
        self.raw().is_some_and(|r| B::set_render_scale(r, x, y) == 0)
    }

    /// Drawing area of the target
    pub fn viewport(&self) -> Option<Rect> {
        let renderer = self.raw()?;
        let mut rect = Rect::default();
        B::render_viewport(renderer, &mut rect);
        Some(rect)
    }

    /// Restrict drawing to an area
    pub fn set_viewport(&mut self, rect: &Rect) -> bool {
        self.raw().is_some_and(|r| B::set_render_viewport(r, Some(rect)) == 0)
    }

    /// Draw to the whole target again
    pub fn reset_viewport(&mut self) -> bool {
        self.raw().is_some_and(|r| B::set_render_viewport(r, None) == 0)
    }

    /// Clip area, `None` when clipping is disabled
    pub fn clip_rect(&self) -> Option<Rect> {
        let renderer = self.raw()?;
        let mut rect = Rect::default();
        B::render_clip_rect(renderer, &mut rect);
        (!rect.is_empty()).then_some(rect)
    }

    /// Clip drawing to an area of the viewport
    pub fn set_clip_rect(&mut self, rect: &Rect) -> bool {
        self.raw().is_some_and(|r| B::set_render_clip_rect(r, Some(rect)) == 0)
    }

    /// Turn clipping off
    pub fn disable_clip(&mut self) -> bool {
        self.raw().is_some_and(|r| B::set_render_clip_rect(r, None) == 0)
    }

    /// Whether clipping is on
    pub fn is_clip_enabled(&self) -> bool {
        self.raw().is_some_and(B::render_clip_enabled)
    }

    /// Color used by clear and primitives
    pub fn draw_color(&self) -> Option<Color> {
        let renderer = self.raw()?;
        let mut color = Color::default();
        (B::render_draw_color(renderer, &mut color) == 0).then_some(color)
    }

    /// Set the color used by clear and primitives
    pub fn set_draw_color(&mut self, color: Color) -> bool {
        self.raw().is_some_and(|r| B::set_render_draw_color(r, color) == 0)
    }

    /// Blend mode used by primitives
    pub fn draw_blend_mode(&self) -> Option<BlendMode> {
        let renderer = self.raw()?;
        let mut mode = BlendMode::None;
        (B::render_draw_blend_mode(renderer, &mut mode) == 0).then_some(mode)
    }

    /// Set the blend mode used by primitives
    pub fn set_draw_blend_mode(&mut self, mode: BlendMode) -> bool {
        self.raw().is_some_and(|r| B::set_render_draw_blend_mode(r, mode) == 0)
    }

    /// Draw one point
    pub fn draw_point(&mut self, p: Point) -> bool {
        self.raw().is_some_and(|r| B::render_draw_point(r, p.x, p.y) == 0)
    }

    /// Draw one point at subpixel precision
    pub fn draw_point_f(&mut self, p: FPoint) -> bool {
        self.raw().is_some_and(|r| B::render_draw_point_f(r, p.x, p.y) == 0)
    }

    /// Draw several points
    pub fn draw_points(&mut self, points: &[Point]) -> bool {
        self.raw().is_some_and(|r| B::render_draw_points(r, points) == 0)
    }

    /// Draw a line, both ends included
    pub fn draw_line(&mut self, start: Point, end: Point) -> bool {
        self.raw()
            .is_some_and(|r| B::render_draw_line(r, start.x, start.y, end.x, end.y) == 0)
    }

    /// Draw a line at subpixel precision
    pub fn draw_line_f(&mut self, start: FPoint, end: FPoint) -> bool {
        self.raw()
            .is_some_and(|r| B::render_draw_line_f(r, start.x, start.y, end.x, end.y) == 0)
    }

    /// Draw a connected polyline
    pub fn draw_lines(&mut self, points: &[Point]) -> bool {
        self.raw().is_some_and(|r| B::render_draw_lines(r, points) == 0)
    }

    /// Outline a rectangle
    pub fn draw_rect(&mut self, rect: &Rect) -> bool {
        self.raw().is_some_and(|r| B::render_draw_rect(r, rect) == 0)
    }

    /// Outline a rectangle at subpixel precision
    pub fn draw_rect_f(&mut self, rect: &FRect) -> bool {
        self.raw().is_some_and(|r| B::render_draw_rect_f(r, rect) == 0)
    }

    /// Outline several rectangles
    pub fn draw_rects(&mut self, rects: &[Rect]) -> bool {
        self.raw().is_some_and(|r| B::render_draw_rects(r, rects) == 0)
    }

    /// Fill a rectangle, `None` fills the viewport
    pub fn fill_rect(&mut self, rect: Option<&Rect>) -> bool {
        self.raw().is_some_and(|r| B::render_fill_rect(r, rect) == 0)
    }

    /// Fill a rectangle at subpixel precision
    pub fn fill_rect_f(&mut self, rect: Option<&FRect>) -> bool {
        self.raw().is_some_and(|r| B::render_fill_rect_f(r, rect) == 0)
    }

    /// Fill several rectangles
    pub fn fill_rects(&mut self, rects: &[Rect]) -> bool {
        self.raw().is_some_and(|r| B::render_fill_rects(r, rects) == 0)
    }

    /// Copy part of a texture, `None` means the whole texture or target
    pub fn copy(&mut self, texture: &Texture<B>, src: Option<&Rect>, dst: Option<&Rect>) -> bool {
        match (self.raw(), texture.raw()) {
            (Some(r), Some(t)) => B::render_copy(r, t, src, dst) == 0,
            _ => false,
        }
    }

    /// Copy to a subpixel destination
    pub fn copy_f(&mut self, texture: &Texture<B>, src: Option<&Rect>, dst: Option<&FRect>) -> bool {
        match (self.raw(), texture.raw()) {
            (Some(r), Some(t)) => B::render_copy_f(r, t, src, dst) == 0,
            _ => false,
        }
    }

    /// Copy with rotation (degrees, clockwise) around `center` and mirroring
    ///
    /// A `None` center rotates around the middle of `dst`.
    pub fn copy_ex(
        &mut self,
        texture: &Texture<B>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
        angle: f64,
        center: Option<&Point>,
        flip: Flip,
    ) -> bool {
        match (self.raw(), texture.raw()) {
            (Some(r), Some(t)) => B::render_copy_ex(r, t, src, dst, angle, center, flip) == 0,
            _ => false,
        }
    }

    /// Rotated and mirrored copy to a subpixel destination
    pub fn copy_ex_f(
        &mut self,
        texture: &Texture<B>,
        src: Option<&Rect>,
        dst: Option<&FRect>,
        angle: f64,
        center: Option<&FPoint>,
        flip: Flip,
    ) -> bool {
        match (self.raw(), texture.raw()) {
            (Some(r), Some(t)) => B::render_copy_ex_f(r, t, src, dst, angle, center, flip) == 0,
            _ => false,
        }
    }

    /// Read back pixels of the current target, `None` reads the viewport
    ///
    /// `format` must be a packed format. `rect` must lie inside the output,
    /// and `pixels` must hold the whole area (the whole output for `None`) at
    /// `pitch`.
    pub fn read_pixels(&self, rect: Option<&Rect>, format: PixelFormat, pixels: &mut [u8], pitch: usize) -> bool {
        if format == PixelFormat::UNKNOWN || format.is_fourcc() {
            return false;
        }
        let Some(output) = self.output_size() else {
            return false;
        };
        let Some(area) = buffer::area_within(rect, output.w, output.h) else {
            return false;
        };
        let Some(native_pitch) = buffer::native_pitch(pitch) else {
            return false;
        };
        if !buffer::covers(format, &area, pixels.len(), pitch) {
            return false;
        }
        self.raw()
            .is_some_and(|r| B::render_read_pixels(r, rect, format.bits(), pixels, native_pitch) == 0)
    }

    /// Fill the whole target with the draw color
    pub fn clear(&mut self) -> bool {
        self.raw().is_some_and(|r| B::render_clear(r) == 0)
    }

    /// Show everything drawn since the last present
    pub fn present(&mut self) {
        if let Some(r) = self.raw() {
            B::render_present(r);
        }
    }

    /// Submit batched commands now
    pub fn flush(&mut self) -> bool {
        self.raw().is_some_and(|r| B::render_flush(r) == 0)
    }
}

impl<B: Video> Default for Renderer<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Video> std::fmt::Debug for Renderer<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Headless, Resource};
    use crate::render::{TextureAccess, WindowFlags};
    use crate::system::{Root, SystemFlags};
    use approx::assert_relative_eq;

    struct Scene {
        renderer: Renderer<Headless>,
        _window: Window<Headless>,
        _root: Root<Headless>,
    }

    fn scene(w: i32, h: i32) -> Scene {
        headless::reset();
        let root = Root::new(SystemFlags::VIDEO);
        let window = Window::new("renderer", 0, 0, w, h, WindowFlags::HIDDEN);
        let renderer = Renderer::new(&window, RendererFlags::ACCELERATED, -1);
        assert!(renderer.is_valid());
        Scene { renderer, _window: window, _root: root }
    }

    fn read(renderer: &Renderer<Headless>, x: i32, y: i32) -> u32 {
        let mut bytes = [0u8; 4];
        assert!(renderer.read_pixels(Some(&Rect::new(x, y, 1, 1)), PixelFormat::ARGB8888, &mut bytes, 4));
        u32::from_le_bytes(bytes)
    }

    #[test]
    fn test_default_renderer_fails_everything() {
        let mut r = Renderer::<Headless>::default();
        assert!(!r.is_valid());
        assert!(!r.clear());
        assert!(!r.draw_point(Point::new(0, 0)));
        assert_eq!(r.output_size(), None);
    }

    #[test]
    fn test_renderer_needs_valid_window() {
        headless::reset();
        let r = Renderer::<Headless>::new(&Window::default(), RendererFlags::empty(), -1);
        assert!(!r.is_valid());
        assert!(headless::journal().is_empty());
    }

    #[test]
    fn test_release_order_in_journal() {
        let s = scene(8, 8);
        drop(s);
        let journal = headless::journal();
        assert_eq!(
            journal,
            vec![
                Call::Init(0x20),
                Call::Create(Resource::Window),
                Call::Create(Resource::Renderer),
                Call::Release(Resource::Renderer),
                Call::Release(Resource::Window),
                Call::Quit,
            ]
        );
    }

    #[test]
    fn test_driver_queries() {
        let s = scene(8, 8);
        assert_eq!(Renderer::<Headless>::driver_count(), 1);
        let info = Renderer::<Headless>::driver_info(0).unwrap();
        assert_eq!(info.name, "headless");
        assert!(info.flags.contains(RendererFlags::TARGETTEXTURE));
        assert!(Renderer::<Headless>::driver_info(1).is_none());
        assert_eq!(s.renderer.info().unwrap().name, "headless");
        assert_eq!(s.renderer.output_size(), Some(Size::new(8, 8)));
        assert!(s.renderer.is_target_supported());
    }

    #[test]
    fn test_clear_and_fill_rasterize() {
        let mut s = scene(8, 8);
        let r = &mut s.renderer;
        assert!(r.set_draw_color(Color::rgb(0, 0, 255)));
        assert_eq!(r.draw_color(), Some(Color::rgb(0, 0, 255)));
        assert!(r.clear());
        assert!(r.set_draw_color(Color::rgb(255, 0, 0)));
        assert!(r.fill_rect(Some(&Rect::new(2, 2, 2, 2))));
        assert_eq!(read(r, 0, 0), 0xFF00_00FF);
        assert_eq!(read(r, 3, 3), 0xFFFF_0000);
        assert_eq!(read(r, 4, 4), 0xFF00_00FF);
    }

    #[test]
    fn test_lines_and_points() {
        let mut s = scene(8, 8);
        let r = &mut s.renderer;
        r.set_draw_color(Color::BLACK);
        r.clear();
        r.set_draw_color(Color::WHITE);
        assert!(r.draw_line(Point::new(0, 7), Point::new(7, 0)));
        assert_eq!(read(r, 0, 7), 0xFFFF_FFFF);
        assert_eq!(read(r, 7, 0), 0xFFFF_FFFF);
        assert_eq!(read(r, 3, 4), 0xFFFF_FFFF);
        assert_eq!(read(r, 0, 0), 0xFF00_0000);

        assert!(r.draw_points(&[Point::new(1, 1), Point::new(6, 6)]));
        assert_eq!(read(r, 6, 6), 0xFFFF_FFFF);

        assert!(r.draw_lines(&[Point::new(0, 0), Point::new(2, 0), Point::new(2, 2)]));
        assert_eq!(read(r, 1, 0), 0xFFFF_FFFF);
        assert_eq!(read(r, 2, 1), 0xFFFF_FFFF);

        assert!(r.draw_rect(&Rect::new(4, 4, 3, 3)));
        assert_eq!(read(r, 6, 4), 0xFFFF_FFFF);
        assert_eq!(read(r, 5, 5), 0xFF00_0000);

        assert!(r.draw_point_f(FPoint::new(0.2, 5.4)));
        assert_eq!(read(r, 0, 5), 0xFFFF_FFFF);
    }

    #[test]
    fn test_viewport_and_clip() {
        let mut s = scene(8, 8);
        let r = &mut s.renderer;
        r.set_draw_color(Color::BLACK);
        r.clear();
        assert_eq!(r.viewport(), Some(Rect::new(0, 0, 8, 8)));
        assert!(r.set_viewport(&Rect::new(4, 4, 4, 4)));
        r.set_draw_color(Color::WHITE);
        assert!(r.fill_rect(Some(&Rect::new(0, 0, 1, 1))));
        assert!(r.reset_viewport());
        assert_eq!(read(r, 4, 4), 0xFFFF_FFFF);
        assert_eq!(read(r, 0, 0), 0xFF00_0000);

        assert!(!r.is_clip_enabled());
        assert_eq!(r.clip_rect(), None);
        assert!(r.set_clip_rect(&Rect::new(0, 0, 2, 2)));
        assert!(r.is_clip_enabled());
        assert_eq!(r.clip_rect(), Some(Rect::new(0, 0, 2, 2)));
        assert!(r.fill_rect(None));
        assert_eq!(read(r, 1, 1), 0xFFFF_FFFF);
        assert_eq!(read(r, 2, 2), 0xFF00_0000);
        assert!(r.disable_clip());
        assert!(!r.is_clip_enabled());
    }

    #[test]
    fn test_scale_and_logical_size() {
        let mut s = scene(8, 8);
        let r = &mut s.renderer;
        assert!(r.set_scale(2.0, 2.0));
        let (x, y) = r.scale().unwrap();
        assert_relative_eq!(x, 2.0);
        assert_relative_eq!(y, 2.0);
        r.set_draw_color(Color::WHITE);
        assert!(r.fill_rect(Some(&Rect::new(1, 1, 1, 1))));
        assert_eq!(read(r, 3, 3), 0xFFFF_FFFF);
        assert!(!r.set_scale(0.0, 1.0));

        assert_eq!(r.logical_size(), Some(Size::new(0, 0)));
        assert!(r.set_logical_size(4, 4));
        assert_eq!(r.logical_size(), Some(Size::new(4, 4)));
        assert!(r.set_integer_scale(true));
        assert!(r.integer_scale());
    }

    #[test]
    fn test_blend_mode_blends_fill() {
        let mut s = scene(2, 2);
        let r = &mut s.renderer;
        r.set_draw_color(Color::BLACK);
        r.clear();
        assert_eq!(r.draw_blend_mode(), Some(BlendMode::None));
        assert!(r.set_draw_blend_mode(BlendMode::Blend));
        r.set_draw_color(Color::rgba(255, 255, 255, 128));
        r.fill_rect(None);
        let red = (read(r, 0, 0) >> 16) & 0xFF;
        assert!((127..=129).contains(&red), "red = {red}");
        assert!(!r.set_draw_blend_mode(BlendMode::Invalid));
    }

    #[test]
    fn test_copies_and_targets() {
        let mut s = scene(8, 8);
        let texture = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Target, 4, 4);
        let plain = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Static, 4, 4);
        let r = &mut s.renderer;

        assert!(r.copy(&texture, None, None));
        assert!(r.copy_f(&texture, None, Some(&FRect::new(0.5, 0.5, 2.0, 2.0))));
        assert!(r.copy_ex(&texture, None, Some(&Rect::new(0, 0, 4, 4)), 90.0, None, Flip::HORIZONTAL | Flip::VERTICAL));
        assert!(r.copy_ex_f(&texture, None, None, 45.0, Some(&FPoint::new(1.0, 1.0)), Flip::NONE));
        assert!(!r.copy(&Texture::default(), None, None));
        assert_eq!(headless::draw_calls(r), 4);

        assert!(!r.target().is_valid());
        assert!(r.set_target(Some(&texture)));
        assert_eq!(r.target().as_raw(), texture.as_raw());
        assert!(!r.set_target(Some(&plain)));
        assert!(r.set_target(None));
        assert!(!r.target().is_valid());
    }

    #[test]
    fn test_present_and_flush() {
        let mut s = scene(4, 4);
        s.renderer.present();
        s.renderer.present();
        assert!(s.renderer.flush());
        assert_eq!(headless::presents(&s.renderer), 2);
    }

    #[test]
    fn test_read_pixels_rejects_short_buffer() {
        let s = scene(4, 4);
        let mut bytes = [0u8; 8];
        assert!(!s.renderer.read_pixels(None, PixelFormat::ARGB8888, &mut bytes, 16));
    }

    #[test]
    fn test_read_pixels_checks_area_and_pitch() {
        let s = scene(4, 4);
        let r = &s.renderer;
        let mut bytes = [0u8; 64];
        assert!(r.read_pixels(None, PixelFormat::ARGB8888, &mut bytes, 16));
        // Pitch shorter than one row
        assert!(!r.read_pixels(None, PixelFormat::ARGB8888, &mut bytes, 8));
        // Area outside the output, or with a negative size
        assert!(!r.read_pixels(Some(&Rect::new(2, 2, 4, 4)), PixelFormat::ARGB8888, &mut bytes, 16));
        assert!(!r.read_pixels(Some(&Rect::new(0, 0, -1, 2)), PixelFormat::ARGB8888, &mut bytes, 16));
        // A 4 byte buffer holds one pixel, not the whole output
        let mut pixel = [0u8; 4];
        assert!(r.read_pixels(Some(&Rect::new(3, 3, 1, 1)), PixelFormat::ARGB8888, &mut pixel, 4));
        assert!(!r.read_pixels(None, PixelFormat::ARGB8888, &mut pixel, 4));
        assert!(!r.read_pixels(None, PixelFormat::IYUV, &mut bytes, 16));
    }

    #[test]
    fn test_software_renderer() {
        headless::reset();
        let mut surface = Surface::<Headless>::with_format(4, 4, PixelFormat::ARGB8888);
        let mut r = Renderer::software(&mut surface);
        assert!(r.is_valid());
        assert_eq!(r.output_size(), Some(Size::new(4, 4)));
        assert!(r.info().unwrap().flags.contains(RendererFlags::SOFTWARE));
        r.set_draw_color(Color::rgb(1, 2, 3));
        assert!(r.clear());
        drop(r);
    }
}
