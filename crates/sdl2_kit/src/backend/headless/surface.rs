//! Software surfaces

use std::ptr::NonNull;

use super::pixels::{self, Plane};
use super::{destroy, with_state, Failure, Outcome, Resource};
use crate::foundation::geometry::{Color, Rect};
use crate::foundation::handle::NativeResource;
use crate::render::{BlendMode, PixelFormat, SurfaceFlags};

/// Surface pixels plus the blit state the native surface carries
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    flags: u32,
    format: PixelFormat,
    w: i32,
    h: i32,
    pitch: usize,
    pixels: Vec<u8>,
    clip: Rect,
    color_key: Option<u32>,
    color_mod: (u8, u8, u8),
    alpha_mod: u8,
    blend: BlendMode,
    locks: u32,
}

impl NativeResource for HeadlessSurface {
    const KIND: &'static str = "surface";

    unsafe fn release(raw: NonNull<Self>) {
        with_state(|s| s.video.forget_surface(raw));
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Surface, raw) }
    }
}

impl HeadlessSurface {
    /// Zeroed surface of a packed format
    pub(super) fn new(format: PixelFormat, w: i32, h: i32) -> Outcome<Self> {
        if format == PixelFormat::UNKNOWN || format.is_fourcc() {
            return Err(Failure::Unsupported(format!("Unknown pixel format {:#x}", format.bits())));
        }
        if w < 0 || h < 0 {
            return Err(Failure::InvalidParam("size"));
        }
        let pitch = pixels::surface_pitch(format, w);
        Ok(Self {
            flags: 0,
            format,
            w,
            h,
            pitch,
            pixels: vec![0; pitch * h as usize],
            clip: Rect::with_size(w, h),
            color_key: None,
            color_mod: (255, 255, 255),
            alpha_mod: 255,
            blend: if format.has_alpha() { BlendMode::Blend } else { BlendMode::None },
            locks: 0,
        })
    }

    /// Surface over tightly packed RGBA bytes
    pub(super) fn from_rgba(w: u32, h: u32, rgba: &[u8]) -> Outcome<Self> {
        let mut surface = Self::new(PixelFormat::ABGR8888, w as i32, h as i32)?;
        let row = w as usize * 4;
        for (dst, src) in surface.pixels.chunks_mut(surface.pitch).zip(rgba.chunks(row)) {
            dst[..row].copy_from_slice(src);
        }
        Ok(surface)
    }

    /// Pixels as tightly packed RGBA bytes
    pub(super) fn to_rgba(&self) -> Outcome<Vec<u8>> {
        self.require_packed()?;
        let plane = self.plane();
        let mut rgba = Vec::with_capacity(self.w as usize * self.h as usize * 4);
        for y in 0..self.h {
            for x in 0..self.w {
                let c = plane.color(x, y);
                rgba.extend_from_slice(&[c.r, c.g, c.b, c.a]);
            }
        }
        Ok(rgba)
    }

    pub(super) fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    pub(super) fn format(&self) -> PixelFormat {
        self.format
    }

    pub(super) fn flags(&self) -> u32 {
        self.flags
    }

    pub(super) fn pitch(&self) -> usize {
        self.pitch
    }

    pub(super) fn pixels_ptr(&mut self) -> *mut u8 {
        self.pixels.as_mut_ptr()
    }

    pub(super) fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub(super) fn color_key(&self) -> Option<u32> {
        self.color_key
    }

    pub(super) fn is_locked(&self) -> bool {
        self.locks > 0
    }

    pub(super) fn plane(&self) -> Plane<&[u8]> {
        Plane {
            pixels: &self.pixels,
            pitch: self.pitch,
            w: self.w,
            h: self.h,
            format: self.format,
        }
    }

    pub(super) fn plane_mut(&mut self) -> Plane<&mut [u8]> {
        Plane {
            pixels: &mut self.pixels,
            pitch: self.pitch,
            w: self.w,
            h: self.h,
            format: self.format,
        }
    }

    fn require_packed(&self) -> Outcome<()> {
        if pixels::is_packed_rgb(self.format) {
            Ok(())
        } else {
            Err(Failure::Unsupported(format!("Unsupported pixel format {:#x}", self.format.bits())))
        }
    }

    pub(super) fn lock(&mut self) {
        self.locks += 1;
    }

    pub(super) fn unlock(&mut self) {
        self.locks = self.locks.saturating_sub(1);
    }

    pub(super) fn set_rle(&mut self, enable: bool) {
        if enable {
            self.flags |= SurfaceFlags::RLEACCEL.bits();
        } else {
            self.flags &= !SurfaceFlags::RLEACCEL.bits();
        }
    }

    pub(super) fn set_color_key(&mut self, key: Option<u32>) {
        self.color_key = key;
    }

    pub(super) fn color_mod(&self) -> (u8, u8, u8) {
        self.color_mod
    }

    pub(super) fn set_color_mod(&mut self, r: u8, g: u8, b: u8) {
        self.color_mod = (r, g, b);
    }

    pub(super) fn alpha_mod(&self) -> u8 {
        self.alpha_mod
    }

    pub(super) fn set_alpha_mod(&mut self, alpha: u8) {
        self.alpha_mod = alpha;
    }

    pub(super) fn set_blend_mode(&mut self, mode: BlendMode) -> Outcome<()> {
        if mode == BlendMode::Invalid {
            return Err(Failure::InvalidParam("blendMode"));
        }
        self.blend = mode;
        Ok(())
    }

    pub(super) fn clip(&self) -> Rect {
        self.clip
    }

    /// Clip to `rect` within the surface; false when nothing remains
    pub(super) fn set_clip(&mut self, rect: Option<&Rect>) -> bool {
        let bounds = Rect::with_size(self.w, self.h);
        match rect {
            None => {
                self.clip = bounds;
                true
            }
            Some(r) => match r.intersection(&bounds) {
                Some(area) => {
                    self.clip = area;
                    true
                }
                None => {
                    self.clip = Rect::new(r.x, r.y, 0, 0);
                    false
                }
            },
        }
    }

    /// Copy with fresh lock state
    pub(super) fn duplicate(&self) -> Self {
        Self { locks: 0, ..self.clone() }
    }

    pub(super) fn convert(&self, format: PixelFormat) -> Outcome<Self> {
        self.require_packed()?;
        if !pixels::is_packed_rgb(format) {
            return Err(Failure::Unsupported(format!("Unsupported pixel format {:#x}", format.bits())));
        }
        let mut out = Self::new(format, self.w, self.h)?;
        let src = self.plane();
        let mut dst = out.plane_mut();
        for y in 0..self.h {
            for x in 0..self.w {
                dst.set(x, y, pixels::encode(format, src.color(x, y)));
            }
        }
        out.color_key = self.color_key.map(|key| pixels::encode(format, pixels::decode(self.format, key)));
        Ok(out)
    }

    /// Store `value` in `rect` clipped to the clip rectangle
    pub(super) fn fill(&mut self, rect: Option<&Rect>, value: u32) {
        let area = match rect {
            None => Some(self.clip),
            Some(r) => r.intersection(&self.clip),
        };
        if let Some(area) = area {
            self.plane_mut().fill_raw(&area, value);
        }
    }

    /// Source pixel as it enters a blit, `None` when the color key hides it
    fn blit_source(&self, plane: &Plane<&[u8]>, x: i32, y: i32) -> Option<Color> {
        let raw = plane.get(x, y);
        if self.color_key == Some(raw) {
            return None;
        }
        Some(pixels::modulate(pixels::decode(self.format, raw), self.color_mod, self.alpha_mod))
    }

    fn check_blit(&self, dst: &Self) -> Outcome<()> {
        if self.locks > 0 || dst.locks > 0 {
            return Err(Failure::Unsupported("Surfaces must not be locked during blit".to_string()));
        }
        self.require_packed()?;
        dst.require_packed()
    }

    /// Unscaled blit; returns the destination area actually written
    pub(super) fn blit(&self, src_rect: Option<&Rect>, dst: &mut Self, at: (i32, i32)) -> Outcome<Rect> {
        self.check_blit(dst)?;
        let bounds = Rect::with_size(self.w, self.h);
        let requested = src_rect.copied().unwrap_or(bounds);
        let Some(from) = requested.intersection(&bounds) else {
            return Ok(Rect::new(at.0, at.1, 0, 0));
        };
        // Clipping the source shifts the destination by the same amount
        let target = Rect::new(at.0 + from.x - requested.x, at.1 + from.y - requested.y, from.w, from.h);
        let Some(area) = target.intersection(&dst.clip) else {
            return Ok(Rect::new(target.x, target.y, 0, 0));
        };

        let src = self.plane();
        let mode = self.blend;
        let mut out = dst.plane_mut();
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let (sx, sy) = (from.x + x - target.x, from.y + y - target.y);
                if let Some(color) = self.blit_source(&src, sx, sy) {
                    out.plot(x, y, color, mode);
                }
            }
        }
        Ok(area)
    }

    /// Nearest-neighbor scaled blit; returns the destination area written
    pub(super) fn blit_scaled(&self, src_rect: Option<&Rect>, dst: &mut Self, dst_rect: Option<&Rect>) -> Outcome<Rect> {
        self.check_blit(dst)?;
        let from = src_rect.copied().unwrap_or(Rect::with_size(self.w, self.h));
        let to = dst_rect.copied().unwrap_or(Rect::with_size(dst.w, dst.h));
        if from.is_empty() || to.is_empty() {
            return Ok(Rect::new(to.x, to.y, 0, 0));
        }
        let Some(area) = to.intersection(&dst.clip) else {
            return Ok(Rect::new(to.x, to.y, 0, 0));
        };

        let src = self.plane();
        let mode = self.blend;
        let mut out = dst.plane_mut();
        for y in area.y..area.bottom() {
            let sy = from.y + (y - to.y) * from.h / to.h;
            for x in area.x..area.right() {
                let sx = from.x + (x - to.x) * from.w / to.w;
                if let Some(color) = self.blit_source(&src, sx, sy) {
                    out.plot(x, y, color, mode);
                }
            }
        }
        Ok(area)
    }

    /// Nearest-neighbor raw copy between surfaces of one format
    pub(super) fn stretch(&self, src_rect: Option<&Rect>, dst: &mut Self, dst_rect: Option<&Rect>) -> Outcome<()> {
        if self.format != dst.format {
            return Err(Failure::Unsupported("Only works with same format surfaces".to_string()));
        }
        let from = src_rect.copied().unwrap_or(Rect::with_size(self.w, self.h));
        let to = dst_rect.copied().unwrap_or(Rect::with_size(dst.w, dst.h));
        if from.is_empty() || to.is_empty() {
            return Ok(());
        }
        let src = self.plane();
        let mut out = dst.plane_mut();
        for y in to.y..to.bottom() {
            let sy = from.y + (y - to.y) * from.h / to.h;
            for x in to.x..to.right() {
                let sx = from.x + (x - to.x) * from.w / to.w;
                out.set(x, y, src.get(sx, sy));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_from_clipped_source_shifts_destination() {
        let mut src = HeadlessSurface::new(PixelFormat::ARGB8888, 4, 4).unwrap();
        src.fill(None, 0xFFFF_0000);
        let mut dst = HeadlessSurface::new(PixelFormat::ARGB8888, 8, 8).unwrap();
        let area = src.blit(Some(&Rect::new(-2, -2, 4, 4)), &mut dst, (0, 0)).unwrap();
        assert_eq!(area, Rect::new(2, 2, 2, 2));
        assert_eq!(dst.plane().get(2, 2), 0xFFFF_0000);
        assert_eq!(dst.plane().get(1, 1), 0);
    }

    #[test]
    fn test_locked_surfaces_do_not_blit() {
        let mut src = HeadlessSurface::new(PixelFormat::ARGB8888, 1, 1).unwrap();
        let mut dst = src.duplicate();
        src.lock();
        assert!(src.blit(None, &mut dst, (0, 0)).is_err());
        src.unlock();
        assert!(src.blit(None, &mut dst, (0, 0)).is_ok());
    }

    #[test]
    fn test_rgba_round_trip_keeps_bytes() {
        let rgba = [1, 2, 3, 4, 5, 6, 7, 8];
        let surface = HeadlessSurface::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(surface.format(), PixelFormat::ABGR8888);
        assert_eq!(surface.to_rgba().unwrap(), rgba);
    }
}
