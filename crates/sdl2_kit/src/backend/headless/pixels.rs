//! Packed pixel formats and the raster primitives shared by surfaces, textures
//! and renderers

use crate::foundation::geometry::{Color, Rect};
use crate::render::{BlendMode, PixelFormat};

/// Bit offsets of the channels inside a little-endian pixel value
struct Layout {
    r: u32,
    g: u32,
    b: u32,
    a: Option<u32>,
}

fn layout(format: PixelFormat) -> Option<Layout> {
    let (r, g, b, a) = match format {
        PixelFormat::RGB888 | PixelFormat::BGR24 => (16, 8, 0, None),
        PixelFormat::BGR888 | PixelFormat::RGB24 => (0, 8, 16, None),
        PixelFormat::ARGB8888 => (16, 8, 0, Some(24)),
        PixelFormat::RGBA8888 => (24, 16, 8, Some(0)),
        PixelFormat::ABGR8888 => (0, 8, 16, Some(24)),
        PixelFormat::BGRA8888 => (8, 16, 24, Some(0)),
        _ => return None,
    };
    Some(Layout { r, g, b, a })
}

/// Whether [`decode`] and [`encode`] understand `format`
pub(super) fn is_packed_rgb(format: PixelFormat) -> bool {
    format == PixelFormat::RGB565 || layout(format).is_some()
}

/// Channels of a raw pixel value
pub(super) fn decode(format: PixelFormat, value: u32) -> Color {
    if format == PixelFormat::RGB565 {
        let expand = |v: u32, max: u32| (v * 255 / max) as u8;
        return Color::rgb(expand((value >> 11) & 0x1F, 31), expand((value >> 5) & 0x3F, 63), expand(value & 0x1F, 31));
    }
    layout(format).map_or(Color::TRANSPARENT, |l| Color {
        r: (value >> l.r) as u8,
        g: (value >> l.g) as u8,
        b: (value >> l.b) as u8,
        a: l.a.map_or(255, |a| (value >> a) as u8),
    })
}

/// Raw pixel value of `color`; formats without alpha drop it
pub(super) fn encode(format: PixelFormat, color: Color) -> u32 {
    if format == PixelFormat::RGB565 {
        return (u32::from(color.r) >> 3) << 11 | (u32::from(color.g) >> 2) << 5 | u32::from(color.b) >> 3;
    }
    layout(format).map_or(0, |l| {
        let alpha = l.a.map_or(0, |a| u32::from(color.a) << a);
        u32::from(color.r) << l.r | u32::from(color.g) << l.g | u32::from(color.b) << l.b | alpha
    })
}

fn scale(a: u8, b: u8) -> u8 {
    ((u32::from(a) * u32::from(b) + 127) / 255) as u8
}

/// Apply color and alpha modulation
pub(super) fn modulate(color: Color, (r, g, b): (u8, u8, u8), alpha: u8) -> Color {
    Color::rgba(scale(color.r, r), scale(color.g, g), scale(color.b, b), scale(color.a, alpha))
}

/// Combine `src` onto `dst` the way the native blend modes do
pub(super) fn blend(src: Color, dst: Color, mode: BlendMode) -> Color {
    let over = |s: u8, d: u8| ((u32::from(s) * u32::from(src.a) + u32::from(d) * (255 - u32::from(src.a)) + 127) / 255) as u8;
    let add = |s: u8, d: u8| (u32::from(scale(s, src.a)) + u32::from(d)).min(255) as u8;
    let mul = |s: u8, d: u8| (u32::from(scale(s, d)) + u32::from(scale(d, 255 - src.a))).min(255) as u8;
    match mode {
        BlendMode::Blend => Color::rgba(over(src.r, dst.r), over(src.g, dst.g), over(src.b, dst.b), {
            (u32::from(src.a) + u32::from(scale(dst.a, 255 - src.a))).min(255) as u8
        }),
        BlendMode::Add => Color::rgba(add(src.r, dst.r), add(src.g, dst.g), add(src.b, dst.b), dst.a),
        BlendMode::Mod => Color::rgba(scale(src.r, dst.r), scale(src.g, dst.g), scale(src.b, dst.b), dst.a),
        BlendMode::Mul => Color::rgba(mul(src.r, dst.r), mul(src.g, dst.g), mul(src.b, dst.b), dst.a),
        BlendMode::None | BlendMode::Invalid => src,
    }
}

/// Row pitch of a surface: rows are padded to four bytes
pub(super) fn surface_pitch(format: PixelFormat, w: i32) -> usize {
    (w.max(0) as usize * format.bytes_per_pixel() as usize + 3) & !3
}

/// A rectangular pixel buffer
///
/// Coordinates are in pixels; out-of-bounds access is ignored on write and reads
/// as zero.
pub(super) struct Plane<P> {
    pub pixels: P,
    pub pitch: usize,
    pub w: i32,
    pub h: i32,
    pub format: PixelFormat,
}

impl<P: AsRef<[u8]>> Plane<P> {
    pub fn bounds(&self) -> Rect {
        Rect::with_size(self.w, self.h)
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let inside = x >= 0 && y >= 0 && x < self.w && y < self.h;
        inside.then(|| y as usize * self.pitch + x as usize * self.format.bytes_per_pixel() as usize)
    }

    /// Raw value at `(x, y)`
    pub fn get(&self, x: i32, y: i32) -> u32 {
        let bpp = self.format.bytes_per_pixel() as usize;
        self.offset(x, y).map_or(0, |at| {
            let mut raw = [0u8; 4];
            raw[..bpp].copy_from_slice(&self.pixels.as_ref()[at..at + bpp]);
            u32::from_le_bytes(raw)
        })
    }

    /// Decoded color at `(x, y)`
    pub fn color(&self, x: i32, y: i32) -> Color {
        decode(self.format, self.get(x, y))
    }
}

impl<P: AsRef<[u8]> + AsMut<[u8]>> Plane<P> {
    /// Store a raw value at `(x, y)`
    pub fn set(&mut self, x: i32, y: i32, value: u32) {
        let bpp = self.format.bytes_per_pixel() as usize;
        if let Some(at) = self.offset(x, y) {
            self.pixels.as_mut()[at..at + bpp].copy_from_slice(&value.to_le_bytes()[..bpp]);
        }
    }

    /// Blend `color` into the pixel at `(x, y)`
    pub fn plot(&mut self, x: i32, y: i32, color: Color, mode: BlendMode) {
        let value = match mode {
            BlendMode::None | BlendMode::Invalid => color,
            _ => blend(color, self.color(x, y), mode),
        };
        self.set(x, y, encode(self.format, value));
    }

    /// Store `value` in every pixel of `rect`, clipped to the plane
    pub fn fill_raw(&mut self, rect: &Rect, value: u32) {
        if let Some(area) = rect.intersection(&self.bounds()) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    self.set(x, y, value);
                }
            }
        }
    }

    /// Blend `color` into every pixel of `rect`, clipped to the plane
    pub fn fill(&mut self, rect: &Rect, color: Color, mode: BlendMode) {
        if let Some(area) = rect.intersection(&self.bounds()) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    self.plot(x, y, color, mode);
                }
            }
        }
    }
}

/// Visit every pixel of the line from `(x1, y1)` to `(x2, y2)`, both ends included
pub(super) fn line(x1: i32, y1: i32, x2: i32, y2: i32, mut visit: impl FnMut(i32, i32)) {
    let (dx, dy) = ((x2 - x1).abs(), -(y2 - y1).abs());
    let (sx, sy) = (if x1 < x2 { 1 } else { -1 }, if y1 < y2 { 1 } else { -1 });
    let (mut x, mut y, mut err) = (x1, y1, dx + dy);
    loop {
        visit(x, y);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_layouts() {
        let c = Color::rgba(0x11, 0x22, 0x33, 0x44);
        assert_eq!(encode(PixelFormat::ARGB8888, c), 0x4411_2233);
        assert_eq!(encode(PixelFormat::RGBA8888, c), 0x1122_3344);
        assert_eq!(encode(PixelFormat::ABGR8888, c), 0x4433_2211);
        assert_eq!(encode(PixelFormat::RGB888, c), 0x0011_2233);
        assert_eq!(decode(PixelFormat::RGB888, 0x0011_2233).a, 255);
        assert_eq!(encode(PixelFormat::RGB24, c).to_le_bytes()[..3], [0x11, 0x22, 0x33]);
        assert_eq!(decode(PixelFormat::RGB565, 0xF800), Color::rgb(255, 0, 0));
        assert!(!is_packed_rgb(PixelFormat::YV12));
    }

    #[test]
    fn test_blend_over() {
        let out = blend(Color::rgba(255, 255, 255, 128), Color::BLACK, BlendMode::Blend);
        assert_eq!(out.r, 128);
        assert_eq!(out.a, 255);
        assert_eq!(blend(Color::rgb(200, 0, 0), Color::rgb(100, 0, 0), BlendMode::Add).r, 255);
        assert_eq!(blend(Color::rgb(255, 0, 0), Color::rgb(100, 50, 0), BlendMode::Mod), Color::rgb(100, 0, 0));
    }

    #[test]
    fn test_line_includes_both_ends() {
        let mut seen = Vec::new();
        line(0, 0, 3, 1, |x, y| seen.push((x, y)));
        assert_eq!(seen.first(), Some(&(0, 0)));
        assert_eq!(seen.last(), Some(&(3, 1)));
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_plane_fill_clips() {
        let mut bytes = vec![0u8; 16];
        let mut plane = Plane { pixels: &mut bytes[..], pitch: 8, w: 2, h: 2, format: PixelFormat::ARGB8888 };
        plane.fill_raw(&Rect::new(1, 1, 5, 5), 0xFFFF_FFFF);
        assert_eq!(plane.get(1, 1), 0xFFFF_FFFF);
        assert_eq!(plane.get(0, 0), 0);
        assert_eq!(plane.get(7, 7), 0);
        assert_eq!(surface_pitch(PixelFormat::RGB24, 3), 12);
    }
}
