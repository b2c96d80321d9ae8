//! Image file loading and saving
//!
//! Formats are detected from the file contents. BMP is always available;
//! [`ImageRoot`] preloads the optional codecs.

use std::marker::PhantomData;
use std::path::Path;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::backend::Image;
use crate::error::{InitError, InitResult};
use crate::render::{Renderer, Surface, Texture};

bitflags! {
    /// Optional image codecs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ImageFlags: i32 {
        /// JPEG
        const JPG = 0x0000_0001;
        /// PNG
        const PNG = 0x0000_0002;
        /// TIFF
        const TIF = 0x0000_0004;
        /// WebP
        const WEBP = 0x0000_0008;
    }
}

/// Load codecs; returns the ones that are now loaded
pub fn init<B: Image>(flags: ImageFlags) -> ImageFlags {
    ImageFlags::from_bits_retain(B::img_init(flags.bits()))
}

/// Unload every codec
pub fn quit<B: Image>() {
    B::img_quit();
}

/// Scope guard for the image codecs
#[must_use = "the codecs unload when the guard is dropped"]
pub struct ImageRoot<B: Image> {
    loaded: ImageFlags,
    _backend: PhantomData<(fn() -> B, *const ())>,
}

impl<B: Image> ImageRoot<B> {
    /// Load `flags`; failure trips a debug assertion
    pub fn new(flags: ImageFlags) -> Self {
        let loaded = init::<B>(flags);
        let ok = loaded.contains(flags);
        if ok {
            log::info!("loaded image codecs {flags:?}");
        } else {
            log::error!("failed to load image codecs {flags:?}: {}", B::last_error());
        }
        debug_assert!(ok, "failed to initialize image codecs {flags:?}");
        Self { loaded, _backend: PhantomData }
    }

    /// Load `flags`, reporting missing codecs as an error
    pub fn try_new(flags: ImageFlags) -> InitResult<Self> {
        let loaded = init::<B>(flags);
        if !loaded.contains(flags) {
            let message = B::last_error();
            log::error!("failed to load image codecs {flags:?}: {message}");
            return Err(InitError::Image { requested: flags, message });
        }
        log::info!("loaded image codecs {flags:?}");
        Ok(Self { loaded, _backend: PhantomData })
    }

    /// Codecs loaded at construction
    pub fn loaded(&self) -> ImageFlags {
        self.loaded
    }
}

impl<B: Image> Drop for ImageRoot<B> {
    fn drop(&mut self) {
        log::debug!("unloading image codecs {:?}", self.loaded);
        B::img_quit();
    }
}

impl<B: Image> std::fmt::Debug for ImageRoot<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRoot").field("loaded", &self.loaded).finish()
    }
}

/// Decode an image file into a new surface
pub fn load_surface<B: Image>(path: impl AsRef<Path>) -> Surface<B> {
    // SAFETY: fresh surface from the loader
    unsafe { Surface::from_raw(B::img_load(&path.as_ref().to_string_lossy())) }
}

/// Decode an image file straight into a static texture of `renderer`
pub fn load_texture<B: Image>(renderer: &Renderer<B>, path: impl AsRef<Path>) -> Texture<B> {
    renderer.raw().map_or_else(Texture::default, |r| {
        // SAFETY: fresh texture from the loader
        unsafe { Texture::from_raw(B::img_load_texture(r, &path.as_ref().to_string_lossy())) }
    })
}

/// Write `surface` as a PNG file
pub fn save_png<B: Image>(surface: &Surface<B>, path: impl AsRef<Path>) -> bool {
    surface
        .raw()
        .is_some_and(|s| B::img_save_png(s, &path.as_ref().to_string_lossy()) == 0)
}

/// Write `surface` as a JPEG file, `quality` from 0 to 100
pub fn save_jpg<B: Image>(surface: &Surface<B>, path: impl AsRef<Path>, quality: i32) -> bool {
    surface
        .raw()
        .is_some_and(|s| B::img_save_jpg(s, &path.as_ref().to_string_lossy(), quality.clamp(0, 100)) == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Fault, Headless};
    use crate::foundation::geometry::{Rect, Size};
    use crate::render::{PixelFormat, RendererFlags, TextureAccess, Window, WindowFlags};
    use crate::system::{Root, SystemFlags};

    fn checker() -> Surface<Headless> {
        let mut s = Surface::with_format(4, 2, PixelFormat::ARGB8888);
        s.fill_rect(None, 0xFF00_00FF);
        s.fill_rect(Some(&Rect::new(0, 0, 2, 2)), 0xFFFF_0000);
        s
    }

    fn rgba_at(surface: &Surface<Headless>, x: usize, y: usize) -> [u8; 4] {
        surface
            .with_pixels(|bytes, pitch| {
                let at = y * pitch + x * 4;
                [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]
            })
            .unwrap()
    }

    #[test]
    fn test_root_journal() {
        headless::reset();
        {
            let root = ImageRoot::<Headless>::new(ImageFlags::PNG | ImageFlags::JPG);
            assert_eq!(root.loaded(), ImageFlags::PNG | ImageFlags::JPG);
        }
        assert_eq!(headless::journal(), vec![Call::ImgInit(0x3), Call::ImgQuit]);
    }

    #[test]
    fn test_root_reports_missing_codec() {
        headless::reset();
        let err = ImageRoot::<Headless>::try_new(ImageFlags::TIF).unwrap_err();
        assert!(matches!(err, InitError::Image { requested, .. } if requested == ImageFlags::TIF));
        assert!(err.to_string().contains("TIF"));

        headless::inject(Fault::ImgInit);
        assert!(ImageRoot::<Headless>::try_new(ImageFlags::PNG).is_err());
    }

    #[test]
    fn test_png_round_trip() {
        headless::reset();
        let path = headless::fixture("image_round_trip.png", b"");
        assert!(save_png(&checker(), &path));

        let loaded = load_surface::<Headless>(&path);
        assert!(loaded.is_valid());
        assert_eq!((loaded.width(), loaded.height()), (4, 2));
        assert_eq!(loaded.format(), PixelFormat::ABGR8888);
        assert_eq!(rgba_at(&loaded, 0, 0), [255, 0, 0, 255]);
        assert_eq!(rgba_at(&loaded, 3, 1), [0, 0, 255, 255]);
    }

    #[test]
    fn test_jpg_save_and_load() {
        headless::reset();
        let path = headless::fixture("image_save.jpg", b"");
        assert!(save_jpg(&checker(), &path, 90));
        let loaded = load_surface::<Headless>(&path);
        assert_eq!((loaded.width(), loaded.height()), (4, 2));
    }

    #[test]
    fn test_failures() {
        headless::reset();
        assert!(!load_surface::<Headless>("/missing/picture.png").is_valid());
        let garbage = headless::fixture("image_garbage.png", b"not an image");
        assert!(!load_surface::<Headless>(&garbage).is_valid());
        assert!(!save_png(&Surface::<Headless>::default(), headless::fixture("image_none.png", b"")));
    }

    #[test]
    fn test_load_texture() {
        headless::reset();
        let path = headless::fixture("image_texture.png", b"");
        assert!(save_png(&checker(), &path));

        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
        let window = Window::<Headless>::new("image", 0, 0, 16, 16, WindowFlags::HIDDEN);
        let renderer = Renderer::new(&window, RendererFlags::empty(), -1);
        let texture = load_texture(&renderer, &path);
        assert!(texture.is_valid());
        assert_eq!(texture.size(), Some(Size::new(4, 2)));
        assert_eq!(texture.access(), Some(TextureAccess::Static));
        assert!(!load_texture(&Renderer::<Headless>::default(), &path).is_valid());
    }
}
