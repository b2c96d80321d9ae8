//! Texture handle
//!
//! Textures live in renderer memory. They must not outlive the renderer that
//! created them; the native library frees a renderer's textures with it.

use std::ptr::NonNull;

use crate::backend::Video;
use crate::foundation::geometry::{Color, Rect, Size};
use crate::foundation::handle::{Borrowed, Owned, View};
use crate::render::buffer;
use crate::render::renderer::Renderer;
use crate::render::surface::Surface;
use crate::render::types::{BlendMode, PixelFormat, ScaleMode, TextureAccess};

/// Non-owning alias of a native texture
pub type TextureView<'a, B> = View<'a, <B as Video>::Texture>;

/// Format, access and size of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureAttributes {
    /// Pixel format
    pub format: PixelFormat,
    /// Access pattern
    pub access: TextureAccess,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
}

/// Owning texture handle
pub struct Texture<B: Video> {
    handle: Owned<B::Texture>,
}

impl<B: Video> Texture<B> {
    /// Allocate a texture
    pub fn new(renderer: &Renderer<B>, format: PixelFormat, access: TextureAccess, w: i32, h: i32) -> Self {
        let raw = renderer.raw().map_or(std::ptr::null_mut(), |r| {
            B::create_texture(r, format.bits(), access as i32, w, h)
        });
        // SAFETY: fresh texture from the creation call
        unsafe { Self::from_raw(raw) }
    }

    /// Upload a surface; the surface may be dropped afterwards
    pub fn from_surface(renderer: &Renderer<B>, surface: &Surface<B>) -> Self {
        let raw = match (renderer.raw(), surface.raw()) {
            (Some(r), Some(s)) => B::create_texture_from_surface(r, s),
            _ => std::ptr::null_mut(),
        };
        // SAFETY: fresh texture from the creation call
        unsafe { Self::from_raw(raw) }
    }

    /// Take ownership of a raw texture
    ///
    /// # Safety
    /// `raw` must be null or a live texture of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Texture) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a texture owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: TextureView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native texture is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Texture {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> TextureView<'_, B> {
        self.handle.view()
    }

    pub(crate) fn raw(&self) -> Option<NonNull<B::Texture>> {
        self.handle.get()
    }

    /// Format, access and size in one query
    pub fn attributes(&self) -> Option<TextureAttributes> {
        let texture = self.raw()?;
        let (mut format, mut access, mut w, mut h) = (0, 0, 0, 0);
        if B::query_texture(texture, &mut format, &mut access, &mut w, &mut h) != 0 {
            return None;
        }
        Some(TextureAttributes {
            format: PixelFormat(format),
            access: TextureAccess::from_raw(access)?,
            w,
            h,
        })
    }

    /// Pixel format
    pub fn format(&self) -> Option<PixelFormat> {
        self.attributes().map(|a| a.format)
    }

    /// Access pattern
    pub fn access(&self) -> Option<TextureAccess> {
        self.attributes().map(|a| a.access)
    }

    /// Size in pixels
    pub fn size(&self) -> Option<Size> {
        self.attributes().map(|a| Size::new(a.w, a.h))
    }

    /// Replace pixels of an area, `None` updates the whole texture
    ///
    /// `rect` must lie inside the texture and `pixels` must hold the whole
    /// area at `pitch`, chroma planes included for planar formats.
    pub fn update(&mut self, rect: Option<&Rect>, pixels: &[u8], pitch: usize) -> bool {
        let Some(attributes) = self.attributes() else {
            return false;
        };
        let Some(area) = buffer::area_within(rect, attributes.w, attributes.h) else {
            return false;
        };
        let Some(native_pitch) = buffer::native_pitch(pitch) else {
            return false;
        };
        if !buffer::covers(attributes.format, &area, pixels.len(), pitch) {
            return false;
        }
        self.raw().is_some_and(|t| B::update_texture(t, rect, pixels, native_pitch) == 0)
    }

    /// Replace pixels of a planar YV12 or IYUV texture
    pub fn update_yuv(
        &mut self,
        rect: Option<&Rect>,
        y_plane: &[u8],
        y_pitch: usize,
        u_plane: &[u8],
        u_pitch: usize,
        v_plane: &[u8],
        v_pitch: usize,
    ) -> bool {
        let Some(attributes) = self.attributes() else {
            return false;
        };
        let Some(area) = buffer::area_within(rect, attributes.w, attributes.h) else {
            return false;
        };
        let (cw, ch) = buffer::chroma(area.w, area.h);
        let fits = |plane: &[u8], row: usize, rows: usize, pitch: usize| {
            buffer::span(row, rows, pitch).is_some_and(|needed| plane.len() >= needed)
        };
        if !fits(y_plane, area.w as usize, area.h as usize, y_pitch)
            || !fits(u_plane, cw, ch, u_pitch)
            || !fits(v_plane, cw, ch, v_pitch)
        {
            return false;
        }
        let (Some(y_native), Some(u_native), Some(v_native)) =
            (buffer::native_pitch(y_pitch), buffer::native_pitch(u_pitch), buffer::native_pitch(v_pitch))
        else {
            return false;
        };
        self.raw().is_some_and(|t| {
            B::update_yuv_texture(t, rect, y_plane, y_native, u_plane, u_native, v_plane, v_native) == 0
        })
    }

    /// Lock a streaming texture area for writing, `(bytes, pitch)`
    ///
    /// The bytes are write-only: their initial content is undefined. The
    /// texture is unlocked when the closure returns.
    ///
    /// `None` when `rect` reaches outside the texture.
    pub fn with_lock<R>(&mut self, rect: Option<&Rect>, f: impl FnOnce(&mut [u8], usize) -> R) -> Option<R> {
        let attributes = self.attributes()?;
        let area = buffer::area_within(rect, attributes.w, attributes.h)?;
        let row = buffer::row_bytes(attributes.format, area.w)?;
        let texture = self.raw()?;
        let (mut pixels, mut pitch) = (std::ptr::null_mut(), 0);
        if B::lock_texture(texture, rect, &mut pixels, &mut pitch) != 0 || pixels.is_null() {
            return None;
        }
        let layout = usize::try_from(pitch)
            .ok()
            .and_then(|pitch| Some((pitch, buffer::span(row, area.h as usize, pitch)?)));
        let Some((pitch, len)) = layout else {
            B::unlock_texture(texture);
            return None;
        };
        // SAFETY: `area` lies inside the texture, and a successful lock exposes
        // its rows `pitch` bytes apart, each at least `row` bytes long
        let bytes = unsafe { std::slice::from_raw_parts_mut(pixels, len) };
        let result = f(bytes, pitch);
        B::unlock_texture(texture);
        Some(result)
    }

    /// Blend mode used by copies
    pub fn blend_mode(&self) -> Option<BlendMode> {
        let texture = self.raw()?;
        let mut mode = BlendMode::None;
        (B::texture_blend_mode(texture, &mut mode) == 0).then_some(mode)
    }

    /// Set the blend mode used by copies
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> bool {
        self.raw().is_some_and(|t| B::set_texture_blend_mode(t, mode) == 0)
    }

    /// Filtering used when scaled
    pub fn scale_mode(&self) -> Option<ScaleMode> {
        let texture = self.raw()?;
        let mut mode = ScaleMode::Nearest;
        (B::texture_scale_mode(texture, &mut mode) == 0).then_some(mode)
    }

    /// Set the filtering used when scaled
    pub fn set_scale_mode(&mut self, mode: ScaleMode) -> bool {
        self.raw().is_some_and(|t| B::set_texture_scale_mode(t, mode) == 0)
    }

    /// Color and alpha multiplied into copies
    pub fn color(&self) -> Option<Color> {
        let texture = self.raw()?;
        let mut c = Color::WHITE;
        if B::texture_color_mod(texture, &mut c.r, &mut c.g, &mut c.b) != 0 {
            return None;
        }
        (B::texture_alpha_mod(texture, &mut c.a) == 0).then_some(c)
    }

    /// Set the color and alpha multiplied into copies
    pub fn set_color(&mut self, color: Color) -> bool {
        self.raw().is_some_and(|t| {
            B::set_texture_color_mod(t, color.r, color.g, color.b) == 0 && B::set_texture_alpha_mod(t, color.a) == 0
        })
    }
}

impl<B: Video> Default for Texture<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Video> std::fmt::Debug for Texture<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Headless, Resource};
    use crate::render::{RendererFlags, Window, WindowFlags};
    use crate::system::{Root, SystemFlags};

    // Fields drop top to bottom
    struct Scene {
        renderer: Renderer<Headless>,
        _window: Window<Headless>,
        _root: Root<Headless>,
    }

    fn scene() -> Scene {
        headless::reset();
        let root = Root::new(SystemFlags::VIDEO);
        let window = Window::new("tex", 0, 0, 64, 64, WindowFlags::HIDDEN);
        let renderer = Renderer::new(&window, RendererFlags::ACCELERATED, -1);
        Scene { renderer, _window: window, _root: root }
    }

    #[test]
    fn test_default_texture() {
        let t = Texture::<Headless>::default();
        assert!(!t.is_valid());
        assert_eq!(t.attributes(), None);
        assert_eq!(t.color(), None);
    }

    #[test]
    fn test_attributes() {
        let s = scene();
        let t = Texture::new(&s.renderer, PixelFormat::RGBA8888, TextureAccess::Streaming, 16, 8);
        assert!(t.is_valid());
        let a = t.attributes().unwrap();
        assert_eq!(a.format, PixelFormat::RGBA8888);
        assert_eq!(a.access, TextureAccess::Streaming);
        assert_eq!(t.size(), Some(Size::new(16, 8)));
        drop(t);
        assert_eq!(headless::count(&Call::Release(Resource::Texture)), 1);
    }

    #[test]
    fn test_zero_sized_texture_fails() {
        let s = scene();
        let t = Texture::new(&s.renderer, PixelFormat::RGBA8888, TextureAccess::Static, 0, 8);
        assert!(!t.is_valid());
    }

    #[test]
    fn test_from_surface_uses_argb() {
        let s = scene();
        let mut surface = Surface::<Headless>::with_format(4, 4, PixelFormat::RGB24);
        surface.fill_rect(None, 0x00AA_BBCC);
        let t = Texture::from_surface(&s.renderer, &surface);
        drop(surface);
        assert_eq!(t.format(), Some(PixelFormat::ARGB8888));
        assert_eq!(t.access(), Some(TextureAccess::Static));
        assert_eq!(t.blend_mode(), Some(BlendMode::None));
    }

    #[test]
    fn test_update_and_lock() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4);
        let pixels = vec![0xAB; 4 * 4 * 4];
        assert!(t.update(None, &pixels, 16));
        assert!(!t.update(None, &pixels[..8], 16));

        let seen = t.with_lock(Some(&Rect::new(1, 1, 2, 2)), |bytes, pitch| {
            bytes[0] = 1;
            (bytes.len(), pitch)
        });
        assert_eq!(seen, Some((16 + 8, 16)));
        assert!(!headless::texture_is_locked(&t));
    }

    #[test]
    fn test_update_checks_area_and_pitch() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4);
        let pixels = vec![0x11; 4 * 4 * 4];
        assert!(t.update(Some(&Rect::new(2, 2, 2, 2)), &pixels, 8));
        assert!(!t.update(Some(&Rect::new(2, 2, 4, 4)), &pixels, 16));
        assert!(!t.update(Some(&Rect::new(-1, 0, 2, 2)), &pixels, 16));
        assert!(!t.update(Some(&Rect::new(0, 0, -2, 2)), &pixels, 16));
        assert!(!t.update(None, &pixels, 12));
    }

    #[test]
    fn test_lock_rejects_rect_outside_texture() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4);
        assert_eq!(t.with_lock(Some(&Rect::new(0, 0, -3, 2)), |b, _| b.len()), None);
        assert_eq!(t.with_lock(Some(&Rect::new(3, 3, 2, 2)), |b, _| b.len()), None);
        assert!(!headless::texture_is_locked(&t));
        assert_eq!(t.with_lock(None, |b, pitch| (b.len(), pitch)), Some((64, 16)));
    }

    #[test]
    fn test_update_yuv_checks_planes() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::IYUV, TextureAccess::Streaming, 4, 4);
        let y = [16u8; 16];
        let uv = [128u8; 4];
        assert!(!t.update_yuv(None, &y[..12], 4, &uv, 2, &uv, 2));
        assert!(!t.update_yuv(None, &y, 4, &uv[..3], 2, &uv, 2));
        assert!(!t.update_yuv(None, &y, 2, &uv, 2, &uv, 2));
        assert!(!t.update_yuv(Some(&Rect::new(2, 2, 4, 4)), &y, 4, &uv, 2, &uv, 2));
        assert!(t.update_yuv(Some(&Rect::new(2, 2, 2, 2)), &y, 4, &uv, 1, &uv, 1));
    }

    #[test]
    fn test_static_texture_cannot_lock() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Static, 4, 4);
        assert_eq!(t.with_lock(None, |b, _| b.len()), None);
    }

    #[test]
    fn test_update_yuv() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::IYUV, TextureAccess::Streaming, 4, 4);
        let y = [16u8; 16];
        let uv = [128u8; 4];
        assert!(t.update_yuv(None, &y, 4, &uv, 2, &uv, 2));
        let mut rgb = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 4, 4);
        assert!(!rgb.update_yuv(None, &y, 4, &uv, 2, &uv, 2));
    }

    #[test]
    fn test_modes_and_color() {
        let s = scene();
        let mut t = Texture::new(&s.renderer, PixelFormat::ARGB8888, TextureAccess::Target, 2, 2);
        assert_eq!(t.color(), Some(Color::WHITE));
        assert!(t.set_color(Color::rgba(1, 2, 3, 4)));
        assert_eq!(t.color(), Some(Color::rgba(1, 2, 3, 4)));
        assert!(t.set_blend_mode(BlendMode::Mod));
        assert_eq!(t.blend_mode(), Some(BlendMode::Mod));
        assert!(t.set_scale_mode(ScaleMode::Linear));
        assert_eq!(t.scale_mode(), Some(ScaleMode::Linear));
    }
}
