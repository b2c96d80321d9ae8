//! Software surface handle
//!
//! A [`Surface`] owns a block of pixels in main memory. Pixel access goes
//! through [`Surface::with_pixels`] and [`Surface::with_pixels_mut`], which lock
//! and unlock RLE surfaces around the closure.

use std::path::Path;
use std::ptr::NonNull;

use crate::backend::Video;
use crate::foundation::geometry::Rect;
use crate::foundation::handle::{Borrowed, BorrowedMut, Owned, View};
use crate::render::types::{BlendMode, PixelFormat, SurfaceFlags, YuvConversion};

/// Non-owning alias of a native surface
pub type SurfaceView<'a, B> = View<'a, <B as Video>::Surface>;

/// Owning surface handle
pub struct Surface<B: Video> {
    handle: Owned<B::Surface>,
}

impl<B: Video> Surface<B> {
    /// Allocate a surface from a depth and channel masks
    ///
    /// `masks` are red, green, blue and alpha. All zero picks a default format
    /// for the depth.
    pub fn new_rgb(flags: SurfaceFlags, w: i32, h: i32, depth: i32, masks: [u32; 4]) -> Self {
        // SAFETY: fresh surface from the creation call
        unsafe { Self::from_raw(B::create_rgb_surface(flags.bits(), w, h, depth, masks)) }
    }

    /// Allocate a surface of the given pixel format
    pub fn with_format(w: i32, h: i32, format: PixelFormat) -> Self {
        let depth = format.bits_per_pixel() as i32;
        // SAFETY: fresh surface from the creation call
        unsafe { Self::from_raw(B::create_rgb_surface_with_format(0, w, h, depth, format.bits())) }
    }

    /// Load a BMP file
    pub fn load_bmp(path: impl AsRef<Path>) -> Self {
        // SAFETY: fresh surface from the loader
        unsafe { Self::from_raw(B::load_bmp(&path.as_ref().to_string_lossy())) }
    }

    /// Take ownership of a raw surface
    ///
    /// # Safety
    /// `raw` must be null or a live surface of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Surface) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a surface owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: SurfaceView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native surface is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Surface {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> SurfaceView<'_, B> {
        self.handle.view()
    }

    pub(crate) fn raw(&self) -> Option<NonNull<B::Surface>> {
        self.handle.get()
    }

    fn info(&self) -> Option<crate::backend::SurfaceInfo> {
        self.raw().map(B::surface_info)
    }

    /// Width in pixels, 0 when invalid
    pub fn width(&self) -> i32 {
        self.info().map_or(0, |i| i.w)
    }

    /// Height in pixels, 0 when invalid
    pub fn height(&self) -> i32 {
        self.info().map_or(0, |i| i.h)
    }

    /// Bytes per row, 0 when invalid
    pub fn pitch(&self) -> i32 {
        self.info().map_or(0, |i| i.pitch)
    }

    /// Surface flags
    pub fn flags(&self) -> SurfaceFlags {
        self.info().map_or(SurfaceFlags::empty(), |i| SurfaceFlags::from_bits_retain(i.flags))
    }

    /// Pixel format, `UNKNOWN` when invalid
    pub fn format(&self) -> PixelFormat {
        self.info().map_or(PixelFormat::UNKNOWN, |i| PixelFormat(i.format))
    }

    /// Whether pixel access requires a lock
    pub fn must_lock(&self) -> bool {
        self.flags().contains(SurfaceFlags::RLEACCEL)
    }

    /// Lock for direct pixel access; locks nest
    pub fn lock(&mut self) -> bool {
        self.raw().is_some_and(|s| B::lock_surface(s) == 0)
    }

    /// Release one lock level
    pub fn unlock(&mut self) {
        if let Some(s) = self.raw() {
            B::unlock_surface(s);
        }
    }

    fn pixel_region(&self) -> Option<(NonNull<B::Surface>, *mut u8, usize, usize)> {
        let surface = self.raw()?;
        let info = B::surface_info(surface);
        Some((surface, B::surface_pixels(surface), info.pitch as usize, info.h as usize))
    }

    /// Read the pixels, `(bytes, pitch)`, with the surface locked if needed
    pub fn with_pixels<R>(&self, f: impl FnOnce(&[u8], usize) -> R) -> Option<R> {
        let (surface, _, _, _) = self.pixel_region()?;
        let must_lock = self.must_lock();
        if must_lock && B::lock_surface(surface) != 0 {
            return None;
        }
        let (_, pixels, pitch, rows) = self.pixel_region()?;
        let result = (!pixels.is_null()).then(|| {
            // SAFETY: an accessible surface exposes pitch * h bytes at `pixels`
            let bytes = unsafe { std::slice::from_raw_parts(pixels, pitch * rows) };
            f(bytes, pitch)
        });
        if must_lock {
            B::unlock_surface(surface);
        }
        result
    }

    /// Write the pixels, `(bytes, pitch)`, with the surface locked if needed
    pub fn with_pixels_mut<R>(&mut self, f: impl FnOnce(&mut [u8], usize) -> R) -> Option<R> {
        let (surface, _, _, _) = self.pixel_region()?;
        let must_lock = self.must_lock();
        if must_lock && B::lock_surface(surface) != 0 {
            return None;
        }
        let (_, pixels, pitch, rows) = self.pixel_region()?;
        let result = (!pixels.is_null()).then(|| {
            // SAFETY: as above, and `&mut self` keeps other wrapper access out
            let bytes = unsafe { std::slice::from_raw_parts_mut(pixels, pitch * rows) };
            f(bytes, pitch)
        });
        if must_lock {
            B::unlock_surface(surface);
        }
        result
    }

    /// Write the surface as a BMP file
    pub fn save_bmp(&self, path: impl AsRef<Path>) -> bool {
        self.raw().is_some_and(|s| B::save_bmp(s, &path.as_ref().to_string_lossy()) == 0)
    }

    /// Enable or disable run-length acceleration
    pub fn set_rle(&mut self, enable: bool) -> bool {
        self.raw().is_some_and(|s| B::set_surface_rle(s, enable) == 0)
    }

    /// Set or clear the transparent pixel value
    pub fn set_color_key(&mut self, key: Option<u32>) -> bool {
        self.raw()
            .is_some_and(|s| B::set_color_key(s, key.is_some(), key.unwrap_or(0)) == 0)
    }

    /// Whether a color key is set
    pub fn has_color_key(&self) -> bool {
        self.raw().is_some_and(B::has_color_key)
    }

    /// Transparent pixel value
    pub fn color_key(&self) -> Option<u32> {
        let surface = self.raw()?;
        let mut key = 0;
        (B::color_key(surface, &mut key) == 0).then_some(key)
    }

    /// Color multiplied into blits, `(r, g, b)`
    pub fn color_mod(&self) -> Option<(u8, u8, u8)> {
        let surface = self.raw()?;
        let (mut r, mut g, mut b) = (0, 0, 0);
        (B::surface_color_mod(surface, &mut r, &mut g, &mut b) == 0).then_some((r, g, b))
    }

    /// Set the color multiplied into blits
    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) -> bool {
        self.raw().is_some_and(|s| B::set_surface_color_mod(s, r, g, b) == 0)
    }

    /// Alpha multiplied into blits
    pub fn alpha_mod(&self) -> Option<u8> {
        let surface = self.raw()?;
        let mut alpha = 0;
        (B::surface_alpha_mod(surface, &mut alpha) == 0).then_some(alpha)
    }

    /// Set the alpha multiplied into blits
    pub fn set_alpha_mod(&mut self, alpha: u8) -> bool {
        self.raw().is_some_and(|s| B::set_surface_alpha_mod(s, alpha) == 0)
    }

    /// Blend mode used by blits
    pub fn blend_mode(&self) -> Option<BlendMode> {
        let surface = self.raw()?;
        let mut mode = BlendMode::None;
        (B::surface_blend_mode(surface, &mut mode) == 0).then_some(mode)
    }

    /// Set the blend mode used by blits
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> bool {
        self.raw().is_some_and(|s| B::set_surface_blend_mode(s, mode) == 0)
    }

    /// Area blits into this surface are clipped to
    pub fn clip_rect(&self) -> Option<Rect> {
        let surface = self.raw()?;
        let mut rect = Rect::default();
        B::clip_rect(surface, &mut rect);
        Some(rect)
    }

    /// Set the clip area, `None` clips to the whole surface
    ///
    /// False when the area misses the surface, which disables drawing.
    pub fn set_clip_rect(&mut self, rect: Option<&Rect>) -> bool {
        self.raw().is_some_and(|s| B::set_clip_rect(s, rect))
    }

    /// Deep copy
    pub fn duplicate(&self) -> Surface<B> {
        let raw = self.raw().map_or(std::ptr::null_mut(), B::duplicate_surface);
        // SAFETY: fresh surface from the copy call
        unsafe { Surface::from_raw(raw) }
    }

    /// Copy converted to another pixel format
    pub fn convert_format(&self, format: PixelFormat) -> Surface<B> {
        let raw = self
            .raw()
            .map_or(std::ptr::null_mut(), |s| B::convert_surface_format(s, format.bits()));
        // SAFETY: fresh surface from the conversion call
        unsafe { Surface::from_raw(raw) }
    }

    /// Fill an area, `None` fills the clip area; `color` is a pixel value
    pub fn fill_rect(&mut self, rect: Option<&Rect>, color: u32) -> bool {
        self.raw().is_some_and(|s| B::fill_rect(s, rect, color) == 0)
    }

    /// Fill several areas with one pixel value
    pub fn fill_rects(&mut self, rects: &[Rect], color: u32) -> bool {
        self.raw().is_some_and(|s| B::fill_rects(s, rects, color) == 0)
    }

    /// Copy pixels onto `dst`
    ///
    /// Only the position of `dst_rect` is used. It is updated to the area that
    /// was actually drawn after clipping.
    pub fn blit(&self, src_rect: Option<&Rect>, dst: &mut impl BlitTarget<B>, dst_rect: Option<&mut Rect>) -> bool {
        match (self.raw(), dst.target()) {
            (Some(s), Some(d)) => B::blit_surface(s, src_rect, d, dst_rect) == 0,
            _ => false,
        }
    }

    /// Copy pixels onto `dst`, scaling to fill `dst_rect`
    pub fn blit_scaled(&self, src_rect: Option<&Rect>, dst: &mut impl BlitTarget<B>, dst_rect: Option<&mut Rect>) -> bool {
        match (self.raw(), dst.target()) {
            (Some(s), Some(d)) => B::blit_scaled(s, src_rect, d, dst_rect) == 0,
            _ => false,
        }
    }

    /// Nearest-neighbour stretch between surfaces of the same format
    pub fn soft_stretch(&self, src_rect: Option<&Rect>, dst: &mut impl BlitTarget<B>, dst_rect: Option<&Rect>) -> bool {
        match (self.raw(), dst.target()) {
            (Some(s), Some(d)) => B::soft_stretch(s, src_rect, d, dst_rect) == 0,
            _ => false,
        }
    }
}

impl<B: Video> Default for Surface<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Video> std::fmt::Debug for Surface<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface").field("handle", &self.handle).finish()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A surface that can receive a blit: an owned [`Surface`] or the exclusive
/// alias from [`crate::render::Window::surface`]
pub trait BlitTarget<B: Video>: sealed::Sealed {
    /// Raw destination handle
    #[doc(hidden)]
    fn target(&mut self) -> Option<NonNull<B::Surface>>;
}

impl<B: Video> sealed::Sealed for Surface<B> {}

impl<B: Video> BlitTarget<B> for Surface<B> {
    fn target(&mut self) -> Option<NonNull<B::Surface>> {
        self.raw()
    }
}

impl<B: Video> sealed::Sealed for BorrowedMut<'_, Surface<B>> {}

impl<B: Video> BlitTarget<B> for BorrowedMut<'_, Surface<B>> {
    fn target(&mut self) -> Option<NonNull<B::Surface>> {
        self.raw()
    }
}

/// Mutating forwards for a surface owned by a window
impl<B: Video> BorrowedMut<'_, Surface<B>> {
    /// See [`Surface::lock`]
    pub fn lock(&mut self) -> bool {
        self.inner_mut().lock()
    }

    /// See [`Surface::unlock`]
    pub fn unlock(&mut self) {
        self.inner_mut().unlock();
    }

    /// See [`Surface::with_pixels_mut`]
    pub fn with_pixels_mut<R>(&mut self, f: impl FnOnce(&mut [u8], usize) -> R) -> Option<R> {
        self.inner_mut().with_pixels_mut(f)
    }

    /// See [`Surface::set_rle`]
    pub fn set_rle(&mut self, enable: bool) -> bool {
        self.inner_mut().set_rle(enable)
    }

    /// See [`Surface::set_color_key`]
    pub fn set_color_key(&mut self, key: Option<u32>) -> bool {
        self.inner_mut().set_color_key(key)
    }

    /// See [`Surface::set_color_mod`]
    pub fn set_color_mod(&mut self, r: u8, g: u8, b: u8) -> bool {
        self.inner_mut().set_color_mod(r, g, b)
    }

    /// See [`Surface::set_alpha_mod`]
    pub fn set_alpha_mod(&mut self, alpha: u8) -> bool {
        self.inner_mut().set_alpha_mod(alpha)
    }

    /// See [`Surface::set_blend_mode`]
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> bool {
        self.inner_mut().set_blend_mode(mode)
    }

    /// See [`Surface::set_clip_rect`]
    pub fn set_clip_rect(&mut self, rect: Option<&Rect>) -> bool {
        self.inner_mut().set_clip_rect(rect)
    }

    /// See [`Surface::fill_rect`]
    pub fn fill_rect(&mut self, rect: Option<&Rect>, color: u32) -> bool {
        self.inner_mut().fill_rect(rect, color)
    }

    /// See [`Surface::fill_rects`]
    pub fn fill_rects(&mut self, rects: &[Rect], color: u32) -> bool {
        self.inner_mut().fill_rects(rects, color)
    }
}

/// Set the YUV conversion standard used by texture uploads
pub fn set_yuv_conversion_mode<B: Video>(mode: YuvConversion) {
    B::set_yuv_conversion_mode(mode as i32);
}

/// Current YUV conversion standard
pub fn yuv_conversion_mode<B: Video>() -> YuvConversion {
    YuvConversion::from_raw(B::yuv_conversion_mode())
}

/// YUV conversion standard applied to a resolution; resolves `Automatic`
pub fn yuv_conversion_mode_for_resolution<B: Video>(w: i32, h: i32) -> YuvConversion {
    YuvConversion::from_raw(B::yuv_conversion_mode_for_resolution(w, h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Headless, Resource};

    const ARGB_MASKS: [u32; 4] = [0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000];

    fn argb(w: i32, h: i32) -> Surface<Headless> {
        Surface::with_format(w, h, PixelFormat::ARGB8888)
    }

    fn pixel(surface: &Surface<Headless>, x: usize, y: usize) -> u32 {
        surface
            .with_pixels(|bytes, pitch| {
                let at = y * pitch + x * 4;
                u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
            })
            .unwrap()
    }

    #[test]
    fn test_default_surface() {
        let s = Surface::<Headless>::default();
        assert!(!s.is_valid());
        assert_eq!(s.width(), 0);
        assert_eq!(s.format(), PixelFormat::UNKNOWN);
        assert_eq!(s.with_pixels(|b, _| b.len()), None);
        assert!(!s.duplicate().is_valid());
    }

    #[test]
    fn test_creation_and_accessors() {
        headless::reset();
        let s = Surface::<Headless>::new_rgb(SurfaceFlags::SWSURFACE, 10, 5, 32, ARGB_MASKS);
        assert!(s.is_valid());
        assert_eq!((s.width(), s.height(), s.pitch()), (10, 5, 40));
        assert_eq!(s.format(), PixelFormat::ARGB8888);
        assert_eq!(s.blend_mode(), Some(BlendMode::Blend));

        let rgb = Surface::<Headless>::with_format(3, 2, PixelFormat::RGB24);
        assert_eq!(rgb.pitch(), 12);
        assert_eq!(rgb.blend_mode(), Some(BlendMode::None));

        let bad = Surface::<Headless>::new_rgb(SurfaceFlags::SWSURFACE, 4, 4, 16, [1, 2, 3, 4]);
        assert!(!bad.is_valid());

        drop(s);
        drop(rgb);
        assert_eq!(headless::count(&Call::Create(Resource::Surface)), 2);
        assert_eq!(headless::count(&Call::Release(Resource::Surface)), 2);
    }

    #[test]
    fn test_fill_respects_clip() {
        headless::reset();
        let mut s = argb(4, 4);
        assert!(s.fill_rect(None, 0xFF00_0000));
        assert!(s.set_clip_rect(Some(&Rect::new(1, 1, 2, 2))));
        assert!(s.fill_rect(None, 0xFFFF_FFFF));
        assert_eq!(pixel(&s, 0, 0), 0xFF00_0000);
        assert_eq!(pixel(&s, 1, 1), 0xFFFF_FFFF);
        assert_eq!(pixel(&s, 2, 2), 0xFFFF_FFFF);
        assert_eq!(pixel(&s, 3, 3), 0xFF00_0000);

        assert!(!s.set_clip_rect(Some(&Rect::new(10, 10, 2, 2))));
        assert!(s.set_clip_rect(None));
        assert_eq!(s.clip_rect(), Some(Rect::new(0, 0, 4, 4)));

        assert!(s.fill_rects(&[Rect::new(0, 0, 1, 1), Rect::new(3, 3, 1, 1)], 0xFF12_3456));
        assert_eq!(pixel(&s, 0, 0), 0xFF12_3456);
        assert_eq!(pixel(&s, 3, 3), 0xFF12_3456);
    }

    #[test]
    fn test_blit_clips_and_reports_rect() {
        headless::reset();
        let mut src = argb(4, 4);
        src.fill_rect(None, 0xFFFF_0000);
        assert!(src.set_blend_mode(BlendMode::None));
        let mut dst = argb(6, 6);
        dst.fill_rect(None, 0xFF00_0000);

        let mut at = Rect::new(4, 4, 0, 0);
        assert!(src.blit(None, &mut dst, Some(&mut at)));
        assert_eq!(at, Rect::new(4, 4, 2, 2));
        assert_eq!(pixel(&dst, 5, 5), 0xFFFF_0000);
        assert_eq!(pixel(&dst, 3, 3), 0xFF00_0000);
    }

    #[test]
    fn test_blit_honors_color_key() {
        headless::reset();
        let mut src = argb(2, 1);
        src.set_blend_mode(BlendMode::None);
        src.fill_rect(Some(&Rect::new(0, 0, 1, 1)), 0xFF00_FF00);
        src.fill_rect(Some(&Rect::new(1, 0, 1, 1)), 0xFF00_00FF);
        assert!(src.set_color_key(Some(0xFF00_FF00)));
        assert!(src.has_color_key());
        assert_eq!(src.color_key(), Some(0xFF00_FF00));

        let mut dst = argb(2, 1);
        dst.fill_rect(None, 0xFFFF_FFFF);
        assert!(src.blit(None, &mut dst, None));
        assert_eq!(pixel(&dst, 0, 0), 0xFFFF_FFFF);
        assert_eq!(pixel(&dst, 1, 0), 0xFF00_00FF);

        assert!(src.set_color_key(None));
        assert_eq!(src.color_key(), None);
    }

    #[test]
    fn test_alpha_blending_blit() {
        headless::reset();
        let mut src = argb(1, 1);
        src.fill_rect(None, 0x80FF_FFFF);
        let mut dst = argb(1, 1);
        dst.fill_rect(None, 0xFF00_0000);
        assert!(src.blit(None, &mut dst, None));
        let value = pixel(&dst, 0, 0);
        let red = (value >> 16) & 0xFF;
        assert!((127..=129).contains(&red), "red = {red}");
    }

    #[test]
    fn test_scaled_blit_and_stretch() {
        headless::reset();
        let mut src = argb(2, 2);
        src.set_blend_mode(BlendMode::None);
        src.fill_rect(Some(&Rect::new(0, 0, 1, 2)), 0xFFFF_0000);
        src.fill_rect(Some(&Rect::new(1, 0, 1, 2)), 0xFF00_00FF);

        let mut dst = argb(4, 4);
        assert!(src.blit_scaled(None, &mut dst, None));
        assert_eq!(pixel(&dst, 1, 3), 0xFFFF_0000);
        assert_eq!(pixel(&dst, 2, 0), 0xFF00_00FF);

        let mut other = argb(8, 2);
        assert!(src.soft_stretch(None, &mut other, Some(&Rect::new(0, 0, 8, 2))));
        assert_eq!(pixel(&other, 3, 1), 0xFFFF_0000);
        assert_eq!(pixel(&other, 4, 1), 0xFF00_00FF);

        let mut rgb = Surface::<Headless>::with_format(2, 2, PixelFormat::RGB24);
        assert!(!src.soft_stretch(None, &mut rgb, None));
    }

    #[test]
    fn test_convert_and_duplicate() {
        headless::reset();
        let mut src = argb(2, 2);
        src.fill_rect(None, 0xFF11_2233);

        let rgba = src.convert_format(PixelFormat::RGBA8888);
        assert_eq!(rgba.format(), PixelFormat::RGBA8888);
        assert_eq!(pixel(&rgba, 1, 1), 0x1122_33FF);

        let rgb24 = src.convert_format(PixelFormat::RGB24);
        let first = rgb24.with_pixels(|b, _| [b[0], b[1], b[2]]).unwrap();
        assert_eq!(first, [0x11, 0x22, 0x33]);

        let copy = src.duplicate();
        assert_ne!(copy.as_raw(), src.as_raw());
        assert_eq!(pixel(&copy, 0, 1), 0xFF11_2233);

        assert!(!src.convert_format(PixelFormat::YV12).is_valid());
    }

    #[test]
    fn test_rle_requires_lock() {
        headless::reset();
        let mut s = argb(2, 2);
        assert!(!s.must_lock());
        assert!(s.set_rle(true));
        assert!(s.must_lock());
        assert!(s.flags().contains(SurfaceFlags::RLEACCEL));
        let written = s.with_pixels_mut(|bytes, pitch| {
            bytes[..4].copy_from_slice(&0xFFAB_CDEFu32.to_le_bytes());
            pitch
        });
        assert_eq!(written, Some(8));
        assert!(!headless::surface_is_locked(&s));
        assert_eq!(pixel(&s, 0, 0), 0xFFAB_CDEF);
        assert!(s.lock());
        assert!(headless::surface_is_locked(&s));
        s.unlock();
        assert!(!headless::surface_is_locked(&s));
    }

    #[test]
    fn test_modulation_state() {
        headless::reset();
        let mut s = argb(1, 1);
        assert_eq!(s.color_mod(), Some((255, 255, 255)));
        assert!(s.set_color_mod(10, 20, 30));
        assert_eq!(s.color_mod(), Some((10, 20, 30)));
        assert!(s.set_alpha_mod(40));
        assert_eq!(s.alpha_mod(), Some(40));
        assert!(s.set_blend_mode(BlendMode::Add));
        assert_eq!(s.blend_mode(), Some(BlendMode::Add));
        assert!(!s.set_blend_mode(BlendMode::Invalid));
    }

    #[test]
    fn test_bmp_round_trip() {
        headless::reset();
        let path = std::env::temp_dir().join(format!("sdl2_kit_surface_{}.bmp", std::process::id()));
        let mut s = argb(3, 2);
        s.fill_rect(None, 0xFF40_8020);
        assert!(s.save_bmp(&path));

        let loaded = Surface::<Headless>::load_bmp(&path);
        assert!(loaded.is_valid());
        assert_eq!((loaded.width(), loaded.height()), (3, 2));
        let rgba = loaded.with_pixels(|b, _| [b[0], b[1], b[2], b[3]]).unwrap();
        assert_eq!(rgba, [0x40, 0x80, 0x20, 0xFF]);
        std::fs::remove_file(&path).ok();

        assert!(!Surface::<Headless>::load_bmp("/definitely/missing.bmp").is_valid());
    }

    #[test]
    fn test_yuv_conversion_mode() {
        headless::reset();
        assert_eq!(yuv_conversion_mode::<Headless>(), YuvConversion::Bt601);
        set_yuv_conversion_mode::<Headless>(YuvConversion::Automatic);
        assert_eq!(yuv_conversion_mode::<Headless>(), YuvConversion::Automatic);
        assert_eq!(yuv_conversion_mode_for_resolution::<Headless>(640, 480), YuvConversion::Bt601);
        assert_eq!(yuv_conversion_mode_for_resolution::<Headless>(1920, 1080), YuvConversion::Bt709);
    }
}
