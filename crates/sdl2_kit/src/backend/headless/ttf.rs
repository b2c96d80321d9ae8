//! A synthetic monospace face
//!
//! Every font file opens as the same face: Latin-1 glyphs drawn as solid
//! blocks, half the point size wide, with a few classic kerning pairs.

use std::ptr::NonNull;

use super::surface::HeadlessSurface;
use super::{create, destroy, object, pointer, record, set_error, take_fault, with_state};
use super::{Call, Failure, Fault, Headless, Outcome, Resource};
use crate::backend::{TextRender, Ttf};
use crate::foundation::geometry::{Color, Rect};
use crate::foundation::handle::NativeResource;
use crate::render::{BlendMode, PixelFormat};
use crate::text::FontStyle;

const FAMILY: &str = "Headless Mono";
const STYLE: &str = "Regular";
const KERNING_PAIRS: [(u16, u16); 7] = [
    (b'A' as u16, b'V' as u16),
    (b'V' as u16, b'A' as u16),
    (b'A' as u16, b'W' as u16),
    (b'W' as u16, b'A' as u16),
    (b'T' as u16, b'o' as u16),
    (b'T' as u16, b'e' as u16),
    (b'L' as u16, b'T' as u16),
];

/// Face state and render settings
#[derive(Debug)]
pub struct HeadlessFont {
    pt: i32,
    style: i32,
    outline: i32,
    hinting: i32,
    kerning: bool,
}

impl NativeResource for HeadlessFont {
    const KIND: &'static str = "font";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Font, raw) }
    }
}

/// Face glyph index, 0 when the face has no glyph for `ch`
fn glyph_index(ch: u16) -> u16 {
    match ch {
        0x20..=0x7E => ch - 0x1F,
        0xA0..=0xFF => ch - 0xA0 + 96,
        _ => 0,
    }
}

impl HeadlessFont {
    fn new(pt: i32) -> Self {
        Self {
            pt,
            style: 0,
            outline: 0,
            hinting: 0,
            kerning: true,
        }
    }

    fn ascent(&self) -> i32 {
        (self.pt * 4 + 4) / 5
    }

    fn descent(&self) -> i32 {
        -(self.pt / 5)
    }

    fn height(&self) -> i32 {
        self.ascent() - self.descent() + 2 * self.outline
    }

    fn line_skip(&self) -> i32 {
        self.height() + (self.pt / 10).max(1)
    }

    fn advance(&self) -> i32 {
        (self.pt / 2).max(1) + 2 * self.outline
    }

    fn kerning(&self, previous: u16, ch: u16) -> i32 {
        if self.kerning && KERNING_PAIRS.contains(&(previous, ch)) {
            -(self.pt / 10).max(1)
        } else {
            0
        }
    }

    /// Pen positions of every glyph of `text` and the total width
    fn layout(&self, text: &str) -> (Vec<(char, i32)>, i32) {
        let mut pen = 0;
        let mut previous = None;
        let mut glyphs = Vec::new();
        for ch in text.chars() {
            let code = u16::try_from(u32::from(ch)).unwrap_or(0);
            if let Some(p) = previous {
                pen += self.kerning(p, code);
            }
            glyphs.push((ch, pen));
            pen += self.advance();
            previous = Some(code);
        }
        (glyphs, pen.max(0))
    }

    fn width(&self, text: &str) -> i32 {
        self.layout(text).1
    }

    /// Draw one line of text with its top at `y`
    fn draw_line(&self, surface: &mut HeadlessSurface, text: &str, y: i32, fg: Color) {
        let (glyphs, width) = self.layout(text);
        let top = y + self.outline;
        let mut plane = surface.plane_mut();
        for (_, x) in glyphs.into_iter().filter(|(ch, _)| !ch.is_whitespace()) {
            plane.fill(&Rect::new(x, top, self.advance() - 1, self.ascent()), fg, BlendMode::None);
        }
        let style = FontStyle::from_bits_truncate(self.style);
        if style.contains(FontStyle::UNDERLINE) {
            plane.fill(&Rect::new(0, top + self.ascent() + 1, width, 1), fg, BlendMode::None);
        }
        if style.contains(FontStyle::STRIKETHROUGH) {
            plane.fill(&Rect::new(0, top + self.ascent() / 2, width, 1), fg, BlendMode::None);
        }
    }

    /// Blank ARGB surface for `mode`, plus the color glyphs are drawn with
    fn canvas(w: i32, h: i32, mode: TextRender) -> Outcome<(HeadlessSurface, Color)> {
        let mut surface = HeadlessSurface::new(PixelFormat::ARGB8888, w, h)?;
        let opaque = |c: Color| Color { a: 255, ..c };
        let fg = match mode {
            TextRender::Solid(fg) => opaque(fg),
            TextRender::Shaded(fg, bg) => {
                let bounds = surface.plane().bounds();
                surface.plane_mut().fill(&bounds, opaque(bg), BlendMode::None);
                opaque(fg)
            }
            TextRender::Blended(fg) => fg,
        };
        Ok((surface, fg))
    }

    fn render(&self, text: &str, mode: TextRender) -> Outcome<HeadlessSurface> {
        if text.is_empty() {
            return Err(Failure::Unsupported("Text has zero width".to_string()));
        }
        let (mut surface, fg) = Self::canvas(self.width(text).max(1), self.height(), mode)?;
        self.draw_line(&mut surface, text, 0, fg);
        Ok(surface)
    }

    /// Greedy word wrap; `wrap_length` 0 only breaks at newlines
    fn wrap(&self, text: &str, wrap_length: u32) -> Vec<String> {
        let limit = i32::try_from(wrap_length).unwrap_or(i32::MAX);
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split(' ') {
                let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
                if limit > 0 && !line.is_empty() && self.width(&candidate) > limit {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }

    fn render_wrapped(&self, text: &str, fg: Color, wrap_length: u32) -> Outcome<HeadlessSurface> {
        if text.is_empty() {
            return Err(Failure::Unsupported("Text has zero width".to_string()));
        }
        let lines = self.wrap(text, wrap_length);
        let width = lines.iter().map(|l| self.width(l)).max().unwrap_or(0).max(1);
        let height = lines.len() as i32 * self.line_skip();
        let (mut surface, fg) = Self::canvas(width, height, TextRender::Blended(fg))?;
        for (i, line) in lines.iter().enumerate() {
            self.draw_line(&mut surface, line, i as i32 * self.line_skip(), fg);
        }
        Ok(surface)
    }

    fn render_glyph(&self, ch: u16, mode: TextRender) -> Outcome<HeadlessSurface> {
        let Some(glyph) = char::from_u32(u32::from(ch)).filter(|_| glyph_index(ch) != 0) else {
            return Err(Failure::Unsupported(format!("Couldn't find glyph {ch:#06x}")));
        };
        let (mut surface, fg) = Self::canvas(self.advance(), self.height(), mode)?;
        self.draw_line(&mut surface, &glyph.to_string(), 0, fg);
        Ok(surface)
    }
}

fn text_surface(rendered: Outcome<HeadlessSurface>) -> *mut HeadlessSurface {
    pointer(rendered.and_then(|s| create(Resource::Surface, s)))
}

fn open(path: &str, pt: i32, index: i64) -> Outcome<*mut HeadlessFont> {
    if with_state(|s| s.ttf_init) == 0 {
        return Err(Failure::Unsupported("Library not initialized".to_string()));
    }
    if pt <= 0 {
        return Err(Failure::InvalidParam("ptsize"));
    }
    std::fs::metadata(path).map_err(|source| Failure::Io {
        path: path.to_string(),
        source,
    })?;
    if index != 0 {
        return Err(Failure::Unsupported(format!("Couldn't get font face {index}")));
    }
    create(Resource::Font, HeadlessFont::new(pt))
}

impl Ttf for Headless {
    type Font = HeadlessFont;

    fn ttf_init() -> i32 {
        record(Call::TtfInit);
        if take_fault(Fault::TtfInit) {
            set_error(&Failure::Injected(Fault::TtfInit));
            return -1;
        }
        with_state(|s| s.ttf_init += 1);
        0
    }

    fn ttf_was_init() -> i32 {
        with_state(|s| s.ttf_init)
    }

    fn ttf_quit() {
        record(Call::TtfQuit);
        with_state(|s| s.ttf_init = (s.ttf_init - 1).max(0));
    }

    fn open_font(path: &str, ptsize: i32) -> *mut HeadlessFont {
        pointer(open(path, ptsize, 0))
    }

    fn open_font_index(path: &str, ptsize: i32, index: i64) -> *mut HeadlessFont {
        pointer(open(path, ptsize, index))
    }

    fn font_style(font: NonNull<HeadlessFont>) -> i32 {
        object(font).style
    }

    fn set_font_style(font: NonNull<HeadlessFont>, style: i32) {
        object(font).style = style;
    }

    fn font_outline(font: NonNull<HeadlessFont>) -> i32 {
        object(font).outline
    }

    fn set_font_outline(font: NonNull<HeadlessFont>, outline: i32) {
        object(font).outline = outline.max(0);
    }

    fn font_hinting(font: NonNull<HeadlessFont>) -> i32 {
        object(font).hinting
    }

    fn set_font_hinting(font: NonNull<HeadlessFont>, hinting: i32) {
        object(font).hinting = hinting;
    }

    fn font_kerning(font: NonNull<HeadlessFont>) -> i32 {
        i32::from(object(font).kerning)
    }

    fn set_font_kerning(font: NonNull<HeadlessFont>, allowed: i32) {
        object(font).kerning = allowed != 0;
    }

    fn font_height(font: NonNull<HeadlessFont>) -> i32 {
        object(font).height()
    }

    fn font_ascent(font: NonNull<HeadlessFont>) -> i32 {
        object(font).ascent()
    }

    fn font_descent(font: NonNull<HeadlessFont>) -> i32 {
        object(font).descent()
    }

    fn font_line_skip(font: NonNull<HeadlessFont>) -> i32 {
        object(font).line_skip()
    }

    fn font_faces(_font: NonNull<HeadlessFont>) -> i64 {
        1
    }

    fn font_face_is_fixed_width(_font: NonNull<HeadlessFont>) -> i32 {
        1
    }

    fn font_face_family_name(_font: NonNull<HeadlessFont>) -> Option<String> {
        Some(FAMILY.to_string())
    }

    fn font_face_style_name(_font: NonNull<HeadlessFont>) -> Option<String> {
        Some(STYLE.to_string())
    }

    fn glyph_is_provided(_font: NonNull<HeadlessFont>, ch: u16) -> i32 {
        i32::from(glyph_index(ch))
    }

    fn glyph_metrics(font: NonNull<HeadlessFont>, ch: u16, metrics: &mut [i32; 5]) -> i32 {
        if glyph_index(ch) == 0 {
            set_error(&Failure::Unsupported(format!("Couldn't find glyph {ch:#06x}")));
            return -1;
        }
        let font = object(font);
        let advance = font.advance();
        *metrics = [0, advance - 1, font.descent(), font.ascent(), advance];
        0
    }

    fn kerning_size_glyphs(font: NonNull<HeadlessFont>, previous: u16, ch: u16) -> i32 {
        object(font).kerning(previous, ch)
    }

    fn size_utf8(font: NonNull<HeadlessFont>, text: &str, w: &mut i32, h: &mut i32) -> i32 {
        let font = object(font);
        *w = font.width(text);
        *h = font.height();
        0
    }

    fn render_utf8(font: NonNull<HeadlessFont>, text: &str, mode: TextRender) -> *mut HeadlessSurface {
        text_surface(object(font).render(text, mode))
    }

    fn render_utf8_blended_wrapped(font: NonNull<HeadlessFont>, text: &str, fg: Color, wrap_length: u32) -> *mut HeadlessSurface {
        text_surface(object(font).render_wrapped(text, fg, wrap_length))
    }

    fn render_glyph(font: NonNull<HeadlessFont>, ch: u16, mode: TextRender) -> *mut HeadlessSurface {
        text_surface(object(font).render_glyph(ch, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_indices() {
        assert_eq!(glyph_index(u16::from(b' ')), 1);
        assert_eq!(glyph_index(0x7E), 95);
        assert_eq!(glyph_index(0xA0), 96);
        assert_eq!(glyph_index(0x7F), 0);
        assert_eq!(glyph_index(0x2603), 0);
    }

    #[test]
    fn test_wrap_breaks_words_and_newlines() {
        let font = HeadlessFont::new(20);
        assert_eq!(font.wrap("ab cd ef", 50), vec!["ab cd", "ef"]);
        assert_eq!(font.wrap("ab\ncd ef", 0), vec!["ab", "cd ef"]);
        assert_eq!(font.wrap("abcdefgh", 10), vec!["abcdefgh"]);
    }

    #[test]
    fn test_underline_below_glyphs() {
        let mut font = HeadlessFont::new(10);
        font.style = FontStyle::UNDERLINE.bits();
        let surface = font.render("a", TextRender::Solid(Color::WHITE)).unwrap();
        let plane = surface.plane();
        assert_eq!(plane.get(0, font.ascent() + 1), 0xFFFF_FFFF);
        assert_eq!(plane.get(0, font.ascent()), 0);
    }
}
