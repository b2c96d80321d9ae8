//! Renderers rasterizing into memory, and their textures

use std::ptr::NonNull;

use super::pixels::{self, Plane};
use super::surface::HeadlessSurface;
use super::{destroy, object, with_state, Failure, Outcome, Resource};
use crate::foundation::geometry::{Color, Rect};
use crate::foundation::handle::NativeResource;
use crate::render::{BlendMode, PixelFormat, RendererFlags, RendererInfo, ScaleMode, TextureAccess};

const DRIVER: &str = "headless";
const MAX_TEXTURE_SIZE: i32 = 16_384;

/// Capabilities of the only render driver
pub(super) fn driver_info() -> RendererInfo {
    RendererInfo {
        name: DRIVER.to_string(),
        flags: RendererFlags::SOFTWARE
            | RendererFlags::ACCELERATED
            | RendererFlags::PRESENTVSYNC
            | RendererFlags::TARGETTEXTURE,
        texture_formats: vec![
            PixelFormat::ARGB8888,
            PixelFormat::ABGR8888,
            PixelFormat::RGB888,
            PixelFormat::BGR888,
            PixelFormat::RGBA8888,
            PixelFormat::BGRA8888,
            PixelFormat::YV12,
            PixelFormat::IYUV,
        ],
        max_texture_width: MAX_TEXTURE_SIZE,
        max_texture_height: MAX_TEXTURE_SIZE,
    }
}

fn is_planar(format: PixelFormat) -> bool {
    matches!(format, PixelFormat::YV12 | PixelFormat::IYUV | PixelFormat::NV12 | PixelFormat::NV21)
}

fn is_packed_yuv(format: PixelFormat) -> bool {
    matches!(format, PixelFormat::YUY2 | PixelFormat::UYVY | PixelFormat::YVYU)
}

/// Chroma plane size of a planar texture
fn chroma_size(w: i32, h: i32) -> (usize, usize) {
    ((w as usize).div_ceil(2), (h as usize).div_ceil(2))
}

/// Texture pixels and copy state
#[derive(Debug)]
pub struct HeadlessTexture {
    renderer: u32,
    format: PixelFormat,
    access: TextureAccess,
    w: i32,
    h: i32,
    pitch: usize,
    pixels: Vec<u8>,
    blend: BlendMode,
    scale: ScaleMode,
    color_mod: (u8, u8, u8),
    alpha_mod: u8,
    locked: bool,
}

impl NativeResource for HeadlessTexture {
    const KIND: &'static str = "texture";

    unsafe fn release(raw: NonNull<Self>) {
        with_state(|s| {
            for &renderer in &s.video.renderers {
                object(renderer).forget_target(raw);
            }
        });
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Texture, raw) }
    }
}

impl HeadlessTexture {
    pub(super) fn new(renderer: u32, format: PixelFormat, access: i32, w: i32, h: i32) -> Outcome<Self> {
        let access = TextureAccess::from_raw(access).ok_or(Failure::InvalidParam("access"))?;
        if w <= 0 || h <= 0 {
            return Err(Failure::Unsupported("Texture dimensions can't be 0".to_string()));
        }
        if w > MAX_TEXTURE_SIZE || h > MAX_TEXTURE_SIZE {
            return Err(Failure::Unsupported(format!(
                "Texture dimensions are limited to {MAX_TEXTURE_SIZE}x{MAX_TEXTURE_SIZE}"
            )));
        }
        let packed = pixels::is_packed_rgb(format);
        if !packed && !is_planar(format) && !is_packed_yuv(format) {
            return Err(Failure::Unsupported(format!("Texture format {:#x} not supported", format.bits())));
        }
        if access == TextureAccess::Target && !packed {
            return Err(Failure::Unsupported("Render targets need an RGB format".to_string()));
        }

        let (pitch, len) = if is_planar(format) {
            let (cw, ch) = chroma_size(w, h);
            (w as usize, w as usize * h as usize + 2 * cw * ch)
        } else if is_packed_yuv(format) {
            let pitch = (w as usize).div_ceil(2) * 4;
            (pitch, pitch * h as usize)
        } else {
            let pitch = w as usize * format.bytes_per_pixel() as usize;
            (pitch, pitch * h as usize)
        };
        Ok(Self {
            renderer,
            format,
            access,
            w,
            h,
            pitch,
            pixels: vec![0; len],
            blend: if format.has_alpha() { BlendMode::Blend } else { BlendMode::None },
            scale: ScaleMode::Nearest,
            color_mod: (255, 255, 255),
            alpha_mod: 255,
            locked: false,
        })
    }

    /// Static ARGB copy of a surface; color-keyed pixels become transparent
    pub(super) fn from_surface(renderer: u32, surface: &HeadlessSurface) -> Outcome<Self> {
        if !pixels::is_packed_rgb(surface.format()) {
            return Err(Failure::Unsupported(format!(
                "Surface format {:#x} not supported",
                surface.format().bits()
            )));
        }
        let (w, h) = surface.size();
        let mut texture = Self::new(renderer, PixelFormat::ARGB8888, TextureAccess::Static as i32, w, h)?;
        let key = surface.color_key();
        let src = surface.plane();
        let mut dst = texture.plane_mut();
        for y in 0..h {
            for x in 0..w {
                let raw = src.get(x, y);
                let color = if key == Some(raw) {
                    Color::TRANSPARENT
                } else {
                    pixels::decode(surface.format(), raw)
                };
                dst.set(x, y, pixels::encode(PixelFormat::ARGB8888, color));
            }
        }
        texture.blend = if key.is_some() { BlendMode::Blend } else { surface.blend_mode() };
        Ok(texture)
    }

    pub(super) fn renderer(&self) -> u32 {
        self.renderer
    }

    pub(super) fn access(&self) -> TextureAccess {
        self.access
    }

    pub(super) fn query(&self) -> (PixelFormat, TextureAccess, i32, i32) {
        (self.format, self.access, self.w, self.h)
    }

    pub(super) fn is_locked(&self) -> bool {
        self.locked
    }

    fn plane_mut(&mut self) -> Plane<&mut [u8]> {
        Plane {
            pixels: &mut self.pixels,
            pitch: self.pitch,
            w: self.w,
            h: self.h,
            format: self.format,
        }
    }

    /// `rect` if it lies inside the texture, the whole texture for `None`
    fn area(&self, rect: Option<&Rect>) -> Outcome<Rect> {
        let bounds = Rect::with_size(self.w, self.h);
        match rect {
            None => Ok(bounds),
            Some(r) if r.intersection(&bounds) == Some(*r) => Ok(*r),
            Some(_) => Err(Failure::InvalidParam("rect")),
        }
    }

    /// Bytes per pixel of the first plane
    fn bpp(&self) -> usize {
        if is_packed_yuv(self.format) {
            2
        } else {
            self.format.bytes_per_pixel() as usize
        }
    }

    /// Replace pixels of `rect`; planar formats only update the Y plane here
    pub(super) fn update(&mut self, rect: Option<&Rect>, data: &[u8], pitch: i32) -> Outcome<()> {
        let area = self.area(rect)?;
        let bpp = self.bpp();
        let row = area.w as usize * bpp;
        copy_rows(data, pitch, row, area.h as usize, &mut self.pixels, self.pitch, area.y as usize * self.pitch + area.x as usize * bpp)
    }

    pub(super) fn update_yuv(
        &mut self,
        rect: Option<&Rect>,
        (y_plane, y_pitch): (&[u8], i32),
        (u_plane, u_pitch): (&[u8], i32),
        (v_plane, v_pitch): (&[u8], i32),
    ) -> Outcome<()> {
        if !matches!(self.format, PixelFormat::YV12 | PixelFormat::IYUV) {
            return Err(Failure::Unsupported("Texture format must be YV12 or IYUV".to_string()));
        }
        let area = self.area(rect)?;
        let (cols, rows) = (area.w as usize, area.h as usize);
        let w = self.w as usize;
        copy_rows(y_plane, y_pitch, cols, rows, &mut self.pixels, w, area.y as usize * w + area.x as usize)?;

        let (cw, ch) = chroma_size(self.w, self.h);
        let (u_at, v_at) = if self.format == PixelFormat::IYUV {
            (w * self.h as usize, w * self.h as usize + cw * ch)
        } else {
            (w * self.h as usize + cw * ch, w * self.h as usize)
        };
        let (chroma_cols, chroma_rows) = (cols.div_ceil(2), rows.div_ceil(2));
        let offset = area.y as usize / 2 * cw + area.x as usize / 2;
        copy_rows(u_plane, u_pitch, chroma_cols, chroma_rows, &mut self.pixels, cw, u_at + offset)?;
        copy_rows(v_plane, v_pitch, chroma_cols, chroma_rows, &mut self.pixels, cw, v_at + offset)
    }

    /// Lock a streaming texture; returns the first byte of `rect` and the pitch
    pub(super) fn lock(&mut self, rect: Option<&Rect>) -> Outcome<(*mut u8, i32)> {
        if self.access != TextureAccess::Streaming {
            return Err(Failure::Unsupported("Texture must be streaming to lock".to_string()));
        }
        let area = self.area(rect)?;
        let offset = area.y as usize * self.pitch + area.x as usize * self.bpp();
        self.locked = true;
        // SAFETY: `area` lies inside the texture, so the offset stays in the buffer
        let first = unsafe { self.pixels.as_mut_ptr().add(offset) };
        Ok((first, self.pitch as i32))
    }

    pub(super) fn unlock(&mut self) {
        self.locked = false;
    }

    pub(super) fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub(super) fn set_blend_mode(&mut self, mode: BlendMode) -> Outcome<()> {
        if mode == BlendMode::Invalid {
            return Err(Failure::InvalidParam("blendMode"));
        }
        self.blend = mode;
        Ok(())
    }

    pub(super) fn scale_mode(&self) -> ScaleMode {
        self.scale
    }

    pub(super) fn set_scale_mode(&mut self, mode: ScaleMode) {
        self.scale = mode;
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
}

/// Copy `rows` rows of `row` bytes from a pitched source into a pitched buffer
fn copy_rows(src: &[u8], src_pitch: i32, row: usize, rows: usize, dst: &mut [u8], dst_pitch: usize, at: usize) -> Outcome<()> {
    if src_pitch < 0 || (src_pitch as usize) < row {
        return Err(Failure::InvalidParam("pitch"));
    }
    let src_pitch = src_pitch as usize;
    if rows == 0 || row == 0 {
        return Ok(());
    }
    if src.len() < src_pitch * (rows - 1) + row {
        return Err(Failure::Unsupported("Pixel buffer is too small".to_string()));
    }
    for r in 0..rows {
        let from = r * src_pitch;
        let to = at + r * dst_pitch;
        dst[to..to + row].copy_from_slice(&src[from..from + row]);
    }
    Ok(())
}

/// Where a renderer's pixels go when no texture target is set
#[derive(Debug)]
enum Output {
    /// Window backbuffer, ARGB8888
    Frame { pixels: Vec<u8>, w: i32, h: i32 },
    /// Caller-owned surface; `None` once that surface was freed
    Software(Option<NonNull<HeadlessSurface>>),
}

/// Render state and output buffer
#[derive(Debug)]
pub struct HeadlessRenderer {
    id: u32,
    flags: RendererFlags,
    output: Output,
    target: Option<NonNull<HeadlessTexture>>,
    viewport: Option<Rect>,
    clip: Option<Rect>,
    scale: (f32, f32),
    logical: (i32, i32),
    integer_scale: bool,
    color: Color,
    blend: BlendMode,
    draw_calls: u32,
    presents: u32,
}

impl NativeResource for HeadlessRenderer {
    const KIND: &'static str = "renderer";

    unsafe fn release(raw: NonNull<Self>) {
        with_state(|s| s.video.renderers.retain(|&r| r != raw));
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Renderer, raw) }
    }
}

impl HeadlessRenderer {
    fn with_output(id: u32, flags: RendererFlags, output: Output) -> Self {
        Self {
            id,
            flags,
            output,
            target: None,
            viewport: None,
            clip: None,
            scale: (1.0, 1.0),
            logical: (0, 0),
            integer_scale: false,
            color: Color::BLACK,
            blend: BlendMode::None,
            draw_calls: 0,
            presents: 0,
        }
    }

    /// Renderer for a window of `w` x `h` pixels
    pub(super) fn for_window(id: u32, w: i32, h: i32, requested: u32) -> Self {
        let vsync = RendererFlags::from_bits_truncate(requested) & RendererFlags::PRESENTVSYNC;
        let pixels = vec![0; w.max(0) as usize * h.max(0) as usize * 4];
        let flags = RendererFlags::ACCELERATED | RendererFlags::TARGETTEXTURE | vsync;
        Self::with_output(id, flags, Output::Frame { pixels, w, h })
    }

    /// Renderer drawing straight into `surface`
    pub(super) fn for_surface(id: u32, surface: NonNull<HeadlessSurface>) -> Self {
        let flags = RendererFlags::SOFTWARE | RendererFlags::TARGETTEXTURE;
        Self::with_output(id, flags, Output::Software(Some(surface)))
    }

    pub(super) fn id(&self) -> u32 {
        self.id
    }

    pub(super) fn draw_calls(&self) -> u32 {
        self.draw_calls
    }

    pub(super) fn presents(&self) -> u32 {
        self.presents
    }

    pub(super) fn info(&self) -> RendererInfo {
        RendererInfo {
            flags: self.flags,
            ..driver_info()
        }
    }

    /// Drop references to a texture that is being freed
    fn forget_target(&mut self, texture: NonNull<HeadlessTexture>) {
        if self.target == Some(texture) {
            self.target = None;
            self.viewport = None;
            self.clip = None;
        }
    }

    /// Drop references to a surface that is being freed
    pub(super) fn forget_surface(&mut self, surface: NonNull<HeadlessSurface>) {
        if let Output::Software(slot) = &mut self.output {
            if *slot == Some(surface) {
                *slot = None;
            }
        }
    }

    /// Size of the current target
    pub(super) fn output_size(&self) -> Outcome<(i32, i32)> {
        if let Some(texture) = self.target {
            let (_, _, w, h) = object(texture).query();
            return Ok((w, h));
        }
        match &self.output {
            Output::Frame { w, h, .. } => Ok((*w, *h)),
            Output::Software(Some(surface)) => Ok(object(*surface).size()),
            Output::Software(None) => Err(Failure::Unsupported("Renderer's surface was freed".to_string())),
        }
    }

    fn canvas(&mut self) -> Outcome<Plane<&mut [u8]>> {
        if let Some(texture) = self.target {
            return Ok(object(texture).plane_mut());
        }
        match &mut self.output {
            Output::Frame { pixels, w, h } => Ok(Plane {
                pitch: *w as usize * 4,
                pixels,
                w: *w,
                h: *h,
                format: PixelFormat::ARGB8888,
            }),
            Output::Software(Some(surface)) => Ok(object(*surface).plane_mut()),
            Output::Software(None) => Err(Failure::Unsupported("Renderer's surface was freed".to_string())),
        }
    }

    pub(super) fn target(&self) -> Option<NonNull<HeadlessTexture>> {
        self.target
    }

    pub(super) fn set_target(&mut self, texture: Option<NonNull<HeadlessTexture>>) -> Outcome<()> {
        if let Some(t) = texture {
            let t = object(t);
            if t.renderer() != self.id {
                return Err(Failure::Unsupported("Texture was not created with this renderer".to_string()));
            }
            if t.access() != TextureAccess::Target {
                return Err(Failure::Unsupported("Texture not created with TEXTUREACCESS_TARGET".to_string()));
            }
        }
        self.target = texture;
        self.viewport = None;
        self.clip = None;
        Ok(())
    }

    pub(super) fn logical_size(&self) -> (i32, i32) {
        self.logical
    }

    pub(super) fn set_logical_size(&mut self, w: i32, h: i32) -> Outcome<()> {
        if w < 0 || h < 0 {
            return Err(Failure::InvalidParam("size"));
        }
        self.logical = (w, h);
        Ok(())
    }

    pub(super) fn integer_scale(&self) -> bool {
        self.integer_scale
    }

    pub(super) fn set_integer_scale(&mut self, enable: bool) {
        self.integer_scale = enable;
    }

    pub(super) fn viewport(&self) -> Rect {
        self.viewport
            .or_else(|| self.output_size().ok().map(|(w, h)| Rect::with_size(w, h)))
            .unwrap_or_default()
    }

    pub(super) fn set_viewport(&mut self, rect: Option<&Rect>) {
        self.viewport = rect.copied();
    }

    /// Clip rectangle relative to the viewport, empty when disabled
    pub(super) fn clip(&self) -> Rect {
        self.clip.unwrap_or_default()
    }

    pub(super) fn clip_enabled(&self) -> bool {
        self.clip.is_some()
    }

    pub(super) fn set_clip(&mut self, rect: Option<&Rect>) {
        self.clip = rect.copied();
    }

    pub(super) fn scale(&self) -> (f32, f32) {
        self.scale
    }

    pub(super) fn set_scale(&mut self, x: f32, y: f32) -> Outcome<()> {
        if !(x > 0.0 && y > 0.0) {
            return Err(Failure::InvalidParam("scale"));
        }
        self.scale = (x, y);
        Ok(())
    }

    pub(super) fn color(&self) -> Color {
        self.color
    }

    pub(super) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(super) fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub(super) fn set_blend_mode(&mut self, mode: BlendMode) -> Outcome<()> {
        if mode == BlendMode::Invalid {
            return Err(Failure::InvalidParam("blendMode"));
        }
        self.blend = mode;
        Ok(())
    }

    /// Output pixels a logical rectangle covers after scaling
    fn device_rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        let (sx, sy) = self.scale;
        let view = self.viewport();
        let (x0, y0) = ((x * sx).floor() as i32, (y * sy).floor() as i32);
        let (x1, y1) = (((x + w) * sx).floor() as i32, ((y + h) * sy).floor() as i32);
        Rect::new(view.x + x0, view.y + y0, x1 - x0, y1 - y0)
    }

    /// Output area drawing is limited to: the viewport, narrowed by the clip
    fn drawable(&self) -> Option<Rect> {
        let view = self.viewport();
        match self.clip {
            None => Some(view),
            Some(c) => Rect::new(view.x + c.x, view.y + c.y, c.w, c.h).intersection(&view),
        }
    }

    /// Fill output rectangles with the draw color
    fn paint(&mut self, rects: &[Rect]) -> Outcome<()> {
        let (color, mode) = (self.color, self.blend);
        let drawable = self.drawable();
        let mut canvas = self.canvas()?;
        if let Some(drawable) = drawable {
            for area in rects.iter().filter_map(|r| r.intersection(&drawable)) {
                canvas.fill(&area, color, mode);
            }
        }
        Ok(())
    }

    pub(super) fn points(&mut self, points: impl IntoIterator<Item = (f32, f32)>) -> Outcome<()> {
        let rects: Vec<Rect> = points.into_iter().map(|(x, y)| self.device_rect(x, y, 1.0, 1.0)).collect();
        self.paint(&rects)
    }

    /// Connected line segments through `points`
    pub(super) fn polyline(&mut self, points: &[(i32, i32)]) -> Outcome<()> {
        let mut pixels = Vec::new();
        for pair in points.windows(2) {
            let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
            pixels::line(x1, y1, x2, y2, |x, y| {
                if pixels.last() != Some(&(x, y)) {
                    pixels.push((x, y));
                }
            });
        }
        if let [single] = points {
            pixels.push(*single);
        }
        self.points(pixels.into_iter().map(|(x, y)| (x as f32, y as f32)))
    }

    pub(super) fn outline(&mut self, rect: &Rect) -> Outcome<()> {
        if rect.is_empty() {
            return self.canvas().map(drop);
        }
        let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
        let mut sides = vec![Rect::new(x, y, w, 1)];
        if h > 1 {
            sides.push(Rect::new(x, y + h - 1, w, 1));
        }
        if h > 2 {
            sides.push(Rect::new(x, y + 1, 1, h - 2));
            if w > 1 {
                sides.push(Rect::new(x + w - 1, y + 1, 1, h - 2));
            }
        }
        let rects: Vec<Rect> = sides
            .iter()
            .map(|r| self.device_rect(r.x as f32, r.y as f32, r.w as f32, r.h as f32))
            .collect();
        self.paint(&rects)
    }

    /// Fill logical rectangles; `None` fills the whole drawable area
    pub(super) fn fill(&mut self, rects: Option<&[(f32, f32, f32, f32)]>) -> Outcome<()> {
        let rects: Vec<Rect> = match rects {
            None => vec![self.viewport()],
            Some(rects) => rects.iter().map(|&(x, y, w, h)| self.device_rect(x, y, w, h)).collect(),
        };
        self.paint(&rects)
    }

    /// Overwrite the whole target, ignoring viewport, clip and blend mode
    pub(super) fn clear(&mut self) -> Outcome<()> {
        let color = self.color;
        let mut canvas = self.canvas()?;
        let bounds = canvas.bounds();
        canvas.fill(&bounds, color, BlendMode::None);
        Ok(())
    }

    /// Validate and count a texture copy
    pub(super) fn copy(&mut self, texture: NonNull<HeadlessTexture>, src: Option<&Rect>) -> Outcome<()> {
        let texture = object(texture);
        if texture.renderer() != self.id {
            return Err(Failure::Unsupported("Texture was not created with this renderer".to_string()));
        }
        if let Some(src) = src {
            let (_, _, w, h) = texture.query();
            if src.intersection(&Rect::with_size(w, h)).is_none() {
                return Ok(());
            }
        }
        self.draw_calls += 1;
        Ok(())
    }

    /// Read a rectangle of the target, relative to the viewport, as `format`
    pub(super) fn read_pixels(&mut self, rect: Option<&Rect>, format: PixelFormat, out: &mut [u8], pitch: i32) -> Outcome<()> {
        if !pixels::is_packed_rgb(format) {
            return Err(Failure::Unsupported(format!("Unsupported pixel format {:#x}", format.bits())));
        }
        let view = self.viewport();
        let area = rect.map_or(view, |r| Rect::new(view.x + r.x, view.y + r.y, r.w, r.h));
        if area.is_empty() {
            return Ok(());
        }
        let bpp = format.bytes_per_pixel() as usize;
        let row = area.w as usize * bpp;
        if pitch < 0 || (pitch as usize) < row {
            return Err(Failure::InvalidParam("pitch"));
        }
        let pitch = pitch as usize;
        if out.len() < pitch * (area.h as usize - 1) + row {
            return Err(Failure::Unsupported("Pixel buffer is too small".to_string()));
        }
        let canvas = self.canvas()?;
        for y in 0..area.h {
            for x in 0..area.w {
                let value = pixels::encode(format, canvas.color(area.x + x, area.y + y));
                let at = y as usize * pitch + x as usize * bpp;
                out[at..at + bpp].copy_from_slice(&value.to_le_bytes()[..bpp]);
            }
        }
        Ok(())
    }

    pub(super) fn present(&mut self) {
        self.presents += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(renderer: &mut HeadlessRenderer, x: i32, y: i32) -> u32 {
        let mut bytes = [0u8; 4];
        renderer
            .read_pixels(Some(&Rect::new(x, y, 1, 1)), PixelFormat::ARGB8888, &mut bytes, 4)
            .unwrap();
        u32::from_le_bytes(bytes)
    }

    #[test]
    fn test_outline_skips_interior() {
        let mut r = HeadlessRenderer::for_window(1, 6, 6, 0);
        r.set_color(Color::WHITE);
        r.outline(&Rect::new(1, 1, 4, 4)).unwrap();
        assert_eq!(pixel(&mut r, 1, 1), 0xFFFF_FFFF);
        assert_eq!(pixel(&mut r, 4, 4), 0xFFFF_FFFF);
        assert_eq!(pixel(&mut r, 4, 2), 0xFFFF_FFFF);
        assert_eq!(pixel(&mut r, 2, 2), 0);
    }

    #[test]
    fn test_texture_storage_sizes() {
        let yuv = HeadlessTexture::new(1, PixelFormat::YV12, TextureAccess::Streaming as i32, 5, 3).unwrap();
        assert_eq!(yuv.pixels.len(), 15 + 2 * 3 * 2);
        let packed = HeadlessTexture::new(1, PixelFormat::YUY2, TextureAccess::Static as i32, 3, 2).unwrap();
        assert_eq!(packed.pitch, 8);
        assert!(HeadlessTexture::new(1, PixelFormat::YV12, TextureAccess::Target as i32, 4, 4).is_err());
        assert!(HeadlessTexture::new(1, PixelFormat::ARGB8888, 7, 4, 4).is_err());
    }

    #[test]
    fn test_copy_rejects_foreign_texture() {
        let mut r = HeadlessRenderer::for_window(1, 4, 4, 0);
        let mut texture = HeadlessTexture::new(2, PixelFormat::ARGB8888, 0, 2, 2).unwrap();
        assert!(r.copy(NonNull::from(&mut texture), None).is_err());
        assert_eq!(r.draw_calls(), 0);
    }
}
