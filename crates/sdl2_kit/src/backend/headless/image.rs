//! Image codecs backed by the `image` crate

use std::fs::File;
use std::io::BufWriter;
use std::ptr::NonNull;

use ::image::codecs::jpeg::JpegEncoder;
use ::image::{DynamicImage, ImageFormat, RgbaImage};

use super::renderer::{HeadlessRenderer, HeadlessTexture};
use super::surface::HeadlessSurface;
use super::{create, object, pointer, record, set_error, status, take_fault, with_state};
use super::{Call, Failure, Fault, Headless, Outcome, Resource};
use crate::backend::Image;
use crate::image::ImageFlags;

/// Codecs the `image` crate is built with
const AVAILABLE: ImageFlags = ImageFlags::JPG.union(ImageFlags::PNG);

/// Decode a file into an RGBA surface, guessing the format when `format` is `None`
pub(super) fn decode_file(path: &str, format: Option<ImageFormat>) -> Outcome<HeadlessSurface> {
    let bytes = std::fs::read(path).map_err(|source| Failure::Io {
        path: path.to_string(),
        source,
    })?;
    let decoded = match format {
        Some(format) => ::image::load_from_memory_with_format(&bytes, format)?,
        None => ::image::load_from_memory(&bytes)?,
    };
    let rgba = decoded.to_rgba8();
    HeadlessSurface::from_rgba(rgba.width(), rgba.height(), rgba.as_raw())
}

fn rgba_image(surface: &HeadlessSurface) -> Outcome<RgbaImage> {
    let (w, h) = surface.size();
    RgbaImage::from_raw(w as u32, h as u32, surface.to_rgba()?)
        .ok_or_else(|| Failure::Unsupported("Surface pixels do not match its size".to_string()))
}

/// Encode a surface into `path`
pub(super) fn encode_file(surface: &HeadlessSurface, path: &str, format: ImageFormat) -> Outcome<()> {
    rgba_image(surface)?.save_with_format(path, format)?;
    Ok(())
}

fn encode_jpg(surface: &HeadlessSurface, path: &str, quality: i32) -> Outcome<()> {
    let rgb = DynamicImage::ImageRgba8(rgba_image(surface)?).to_rgb8();
    let file = File::create(path).map_err(|source| Failure::Io {
        path: path.to_string(),
        source,
    })?;
    let quality = quality.clamp(0, 100) as u8;
    JpegEncoder::new_with_quality(BufWriter::new(file), quality).encode_image(&rgb)?;
    Ok(())
}

fn load_texture(renderer: NonNull<HeadlessRenderer>, path: &str) -> Outcome<*mut HeadlessTexture> {
    let surface = decode_file(path, None)?;
    let texture = HeadlessTexture::from_surface(object(renderer).id(), &surface)?;
    create(Resource::Texture, texture)
}

impl Image for Headless {
    fn img_init(flags: i32) -> i32 {
        record(Call::ImgInit(flags));
        if take_fault(Fault::ImgInit) {
            set_error(&Failure::Injected(Fault::ImgInit));
            return 0;
        }
        let requested = ImageFlags::from_bits_retain(flags);
        let missing = requested.difference(AVAILABLE);
        if let Some((name, _)) = missing.iter_names().next() {
            set_error(&Failure::Unsupported(format!("{name} images are not supported")));
        }
        let available = requested.intersection(AVAILABLE).bits();
        with_state(|s| {
            s.img_loaded |= available;
            s.img_loaded
        })
    }

    fn img_quit() {
        record(Call::ImgQuit);
        with_state(|s| s.img_loaded = 0);
    }

    fn img_load(path: &str) -> *mut HeadlessSurface {
        pointer(decode_file(path, None).and_then(|s| create(Resource::Surface, s)))
    }

    fn img_load_texture(renderer: NonNull<HeadlessRenderer>, path: &str) -> *mut HeadlessTexture {
        pointer(load_texture(renderer, path))
    }

    fn img_save_png(surface: NonNull<HeadlessSurface>, path: &str) -> i32 {
        status(encode_file(object(surface), path, ImageFormat::Png))
    }

    fn img_save_jpg(surface: NonNull<HeadlessSurface>, path: &str, quality: i32) -> i32 {
        status(encode_jpg(object(surface), path, quality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Core;

    #[test]
    fn test_init_accumulates_codecs() {
        super::super::reset();
        assert_eq!(Headless::img_init(ImageFlags::PNG.bits()), 0x2);
        assert_eq!(Headless::img_init(ImageFlags::JPG.bits()), 0x3);
        assert_eq!(Headless::img_init((ImageFlags::WEBP | ImageFlags::PNG).bits()), 0x3);
        assert!(Headless::last_error().contains("WEBP"));
        Headless::img_quit();
        assert_eq!(with_state(|s| s.img_loaded), 0);
    }

    #[test]
    fn test_decode_rejects_wrong_format() {
        let path = super::super::fixture("image_not_bmp.bin", b"BMjunk");
        assert!(decode_file(&path.to_string_lossy(), Some(ImageFormat::Bmp)).is_err());
        assert!(matches!(decode_file("/missing/file.bmp", None), Err(Failure::Io { .. })));
    }
}
