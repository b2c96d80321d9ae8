//! Font faces
//!
//! Glyph arguments are `char`s; characters outside the Basic Multilingual
//! Plane have no 16-bit glyph code, so glyph calls on them fail.

use std::path::Path;
use std::ptr::NonNull;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::backend::{TextRender, Ttf};
use crate::foundation::geometry::{Color, Size};
use crate::foundation::handle::{Borrowed, Owned, View};
use crate::render::Surface;

/// Non-owning alias of a native font
pub type FontView<'a, B> = View<'a, <B as Ttf>::Font>;

bitflags! {
    /// Font rendering style
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct FontStyle: i32 {
        /// Plain
        const NORMAL = 0x00;
        /// Bold
        const BOLD = 0x01;
        /// Italic
        const ITALIC = 0x02;
        /// Underline
        const UNDERLINE = 0x04;
        /// Strikethrough
        const STRIKETHROUGH = 0x08;
    }
}

/// Glyph hinting
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontHinting {
    /// Full hinting
    #[default]
    Normal = 0,
    /// Light hinting
    Light = 1,
    /// Monochrome hinting
    Mono = 2,
    /// No hinting
    None = 3,
}

impl FontHinting {
    /// Map a native value, unknown values become [`FontHinting::Normal`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Light,
            2 => Self::Mono,
            3 => Self::None,
            _ => Self::Normal,
        }
    }
}

/// Placement of one glyph relative to the pen position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphMetrics {
    /// Left edge of the glyph box
    pub min_x: i32,
    /// Right edge of the glyph box
    pub max_x: i32,
    /// Bottom edge, relative to the baseline
    pub min_y: i32,
    /// Top edge, relative to the baseline
    pub max_y: i32,
    /// Pen advance
    pub advance: i32,
}

fn glyph_code(ch: char) -> Option<u16> {
    u16::try_from(u32::from(ch)).ok()
}

/// Owning font handle
///
/// Needs a live [`crate::text::TtfRoot`] to open.
pub struct Font<B: Ttf> {
    handle: Owned<B::Font>,
}

impl<B: Ttf> Font<B> {
    /// Open the first face of a font file at `point_size`
    pub fn open(path: impl AsRef<Path>, point_size: i32) -> Self {
        // SAFETY: fresh font from the loader
        unsafe { Self::from_raw(B::open_font(&path.as_ref().to_string_lossy(), point_size)) }
    }

    /// Open face `index` of a font collection
    pub fn open_index(path: impl AsRef<Path>, point_size: i32, index: i64) -> Self {
        // SAFETY: fresh font from the loader
        unsafe { Self::from_raw(B::open_font_index(&path.as_ref().to_string_lossy(), point_size, index)) }
    }

    /// Take ownership of a raw font
    ///
    /// # Safety
    /// `raw` must be null or a live font of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Font) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a font owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: FontView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// True iff a native font is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Font {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> FontView<'_, B> {
        self.handle.view()
    }

    pub(crate) fn raw(&self) -> Option<NonNull<B::Font>> {
        self.handle.get()
    }

    /// Rendering style
    pub fn style(&self) -> FontStyle {
        self.raw()
            .map_or(FontStyle::NORMAL, |f| FontStyle::from_bits_retain(B::font_style(f)))
    }

    /// Set the rendering style
    pub fn set_style(&mut self, style: FontStyle) {
        if let Some(f) = self.raw() {
            B::set_font_style(f, style.bits());
        }
    }

    /// Outline width in pixels, 0 draws filled glyphs
    pub fn outline(&self) -> i32 {
        self.raw().map_or(0, B::font_outline)
    }

    /// Set the outline width
    pub fn set_outline(&mut self, outline: i32) {
        if let Some(f) = self.raw() {
            B::set_font_outline(f, outline.max(0));
        }
    }

    /// Hinting mode
    pub fn hinting(&self) -> FontHinting {
        self.raw()
            .map_or(FontHinting::Normal, |f| FontHinting::from_raw(B::font_hinting(f)))
    }

    /// Set the hinting mode
    pub fn set_hinting(&mut self, hinting: FontHinting) {
        if let Some(f) = self.raw() {
            B::set_font_hinting(f, hinting as i32);
        }
    }

    /// Whether kerning is applied
    pub fn kerning(&self) -> bool {
        self.raw().is_some_and(|f| B::font_kerning(f) != 0)
    }

    /// Enable or disable kerning
    pub fn set_kerning(&mut self, allowed: bool) {
        if let Some(f) = self.raw() {
            B::set_font_kerning(f, i32::from(allowed));
        }
    }

    /// Maximum glyph height
    pub fn height(&self) -> i32 {
        self.raw().map_or(0, B::font_height)
    }

    /// Distance from the baseline to the top of the tallest glyph
    pub fn ascent(&self) -> i32 {
        self.raw().map_or(0, B::font_ascent)
    }

    /// Distance from the baseline to the bottom of the lowest glyph, negative
    pub fn descent(&self) -> i32 {
        self.raw().map_or(0, B::font_descent)
    }

    /// Recommended distance between baselines
    pub fn line_skip(&self) -> i32 {
        self.raw().map_or(0, B::font_line_skip)
    }

    /// Number of faces in the file
    pub fn faces(&self) -> i64 {
        self.raw().map_or(0, B::font_faces)
    }

    /// Whether every glyph has the same advance
    pub fn is_fixed_width(&self) -> bool {
        self.raw().is_some_and(|f| B::font_face_is_fixed_width(f) != 0)
    }

    /// Family name, e.g. "Courier"
    pub fn family_name(&self) -> Option<String> {
        B::font_face_family_name(self.raw()?)
    }

    /// Style name, e.g. "Bold"
    pub fn style_name(&self) -> Option<String> {
        B::font_face_style_name(self.raw()?)
    }

    /// Whether the face has a glyph for `ch`
    pub fn is_glyph_provided(&self, ch: char) -> bool {
        self.glyph_index(ch).is_some()
    }

    /// Face glyph index of `ch`
    pub fn glyph_index(&self, ch: char) -> Option<u16> {
        let font = self.raw()?;
        let index = B::glyph_is_provided(font, glyph_code(ch)?);
        u16::try_from(index).ok().filter(|&i| i != 0)
    }

    /// Box and advance of the glyph for `ch`
    pub fn glyph_metrics(&self, ch: char) -> Option<GlyphMetrics> {
        let font = self.raw()?;
        let mut m = [0; 5];
        if B::glyph_metrics(font, glyph_code(ch)?, &mut m) != 0 {
            return None;
        }
        Some(GlyphMetrics {
            min_x: m[0],
            max_x: m[1],
            min_y: m[2],
            max_y: m[3],
            advance: m[4],
        })
    }

    /// Kerning adjustment between two glyphs, 0 when none applies
    pub fn kerning_size_glyphs(&self, previous: char, ch: char) -> i32 {
        match (self.raw(), glyph_code(previous), glyph_code(ch)) {
            (Some(f), Some(p), Some(c)) => B::kerning_size_glyphs(f, p, c),
            _ => 0,
        }
    }

    /// Size `text` would render at
    pub fn size_utf8(&self, text: &str) -> Option<Size> {
        let font = self.raw()?;
        let (mut w, mut h) = (0, 0);
        (B::size_utf8(font, text, &mut w, &mut h) == 0).then_some(Size::new(w, h))
    }

    fn render(&self, text: &str, mode: TextRender) -> Surface<B> {
        self.raw().map_or_else(Surface::default, |f| {
            // SAFETY: the render call returns a fresh surface
            unsafe { Surface::from_raw(B::render_utf8(f, text, mode)) }
        })
    }

    fn render_glyph(&self, ch: char, mode: TextRender) -> Surface<B> {
        match (self.raw(), glyph_code(ch)) {
            // SAFETY: the render call returns a fresh surface
            (Some(f), Some(c)) => unsafe { Surface::from_raw(B::render_glyph(f, c, mode)) },
            _ => Surface::default(),
        }
    }

    /// Fast render with a transparent background
    pub fn render_utf8_solid(&self, text: &str, fg: Color) -> Surface<B> {
        self.render(text, TextRender::Solid(fg))
    }

    /// Antialiased render onto an opaque `bg`
    pub fn render_utf8_shaded(&self, text: &str, fg: Color, bg: Color) -> Surface<B> {
        self.render(text, TextRender::Shaded(fg, bg))
    }

    /// Antialiased render with alpha
    pub fn render_utf8_blended(&self, text: &str, fg: Color) -> Surface<B> {
        self.render(text, TextRender::Blended(fg))
    }

    /// Blended render broken into lines at word boundaries
    ///
    /// Lines are at most `wrap_length` pixels wide; newlines always break.
    pub fn render_utf8_blended_wrapped(&self, text: &str, fg: Color, wrap_length: u32) -> Surface<B> {
        self.raw().map_or_else(Surface::default, |f| {
            // SAFETY: the render call returns a fresh surface
            unsafe { Surface::from_raw(B::render_utf8_blended_wrapped(f, text, fg, wrap_length)) }
        })
    }

    /// Render one glyph with a transparent background
    pub fn render_glyph_solid(&self, ch: char, fg: Color) -> Surface<B> {
        self.render_glyph(ch, TextRender::Solid(fg))
    }

    /// Render one glyph onto an opaque `bg`
    pub fn render_glyph_shaded(&self, ch: char, fg: Color, bg: Color) -> Surface<B> {
        self.render_glyph(ch, TextRender::Shaded(fg, bg))
    }

    /// Render one glyph with alpha
    pub fn render_glyph_blended(&self, ch: char, fg: Color) -> Surface<B> {
        self.render_glyph(ch, TextRender::Blended(fg))
    }
}

impl<B: Ttf> Default for Font<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Ttf> std::fmt::Debug for Font<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Headless, Resource};
    use crate::render::PixelFormat;
    use crate::text::TtfRoot;

    fn open(pt: i32) -> (Font<Headless>, TtfRoot<Headless>) {
        headless::reset();
        let ttf = TtfRoot::new();
        let font = Font::open(headless::fixture("font_test.ttf", b"\0\x01\0\0"), pt);
        assert!(font.is_valid());
        (font, ttf)
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
    fn test_open_requires_library() {
        headless::reset();
        let path = headless::fixture("font_closed.ttf", b"\0\x01\0\0");
        assert!(!Font::<Headless>::open(&path, 12).is_valid());

        let _ttf = TtfRoot::<Headless>::new();
        assert!(Font::<Headless>::open(&path, 12).is_valid());
        assert!(!Font::<Headless>::open("/missing/font.ttf", 12).is_valid());
        assert!(!Font::<Headless>::open(&path, 0).is_valid());
        assert!(!Font::<Headless>::open_index(&path, 12, 1).is_valid());
        assert!(Font::<Headless>::open_index(&path, 12, 0).is_valid());
    }

    #[test]
    fn test_release_journaled() {
        let (font, ttf) = open(12);
        drop(font);
        drop(ttf);
        assert_eq!(
            headless::journal(),
            vec![Call::TtfInit, Call::Create(Resource::Font), Call::Release(Resource::Font), Call::TtfQuit]
        );
    }

    #[test]
    fn test_style_settings() {
        let (mut font, _ttf) = open(12);
        assert_eq!(font.style(), FontStyle::NORMAL);
        font.set_style(FontStyle::BOLD | FontStyle::UNDERLINE);
        assert_eq!(font.style(), FontStyle::BOLD | FontStyle::UNDERLINE);

        font.set_outline(2);
        assert_eq!(font.outline(), 2);
        font.set_hinting(FontHinting::Mono);
        assert_eq!(font.hinting(), FontHinting::Mono);
        assert!(font.kerning());
        font.set_kerning(false);
        assert!(!font.kerning());
    }

    #[test]
    fn test_metrics() {
        let (mut font, _ttf) = open(20);
        assert_eq!(font.ascent(), 16);
        assert_eq!(font.descent(), -4);
        assert_eq!(font.height(), 20);
        assert!(font.line_skip() > font.height());
        assert_eq!(font.faces(), 1);
        assert!(font.is_fixed_width());
        assert!(font.family_name().is_some());
        assert_eq!(font.style_name().as_deref(), Some("Regular"));

        font.set_outline(1);
        assert_eq!(font.height(), 22);
    }

    #[test]
    fn test_glyphs() {
        let (font, _ttf) = open(20);
        assert!(font.is_glyph_provided('A'));
        assert!(!font.is_glyph_provided('\u{2603}'));
        assert!(!font.is_glyph_provided('\u{1F600}'));
        assert!(font.glyph_index('A').is_some());
        assert_ne!(font.glyph_index('A'), font.glyph_index('B'));

        let m = font.glyph_metrics('A').unwrap();
        assert_eq!(m.advance, 10);
        assert_eq!(m.max_y, font.ascent());
        assert_eq!(font.glyph_metrics('\u{2603}'), None);
    }

    #[test]
    fn test_kerning_pairs() {
        let (mut font, _ttf) = open(20);
        assert!(font.kerning_size_glyphs('A', 'V') < 0);
        assert_eq!(font.kerning_size_glyphs('A', 'B'), 0);
        let kerned = font.size_utf8("AV").unwrap();
        font.set_kerning(false);
        assert_eq!(font.kerning_size_glyphs('A', 'V'), 0);
        let plain = font.size_utf8("AV").unwrap();
        assert!(kerned.w < plain.w);
    }

    #[test]
    fn test_size_utf8() {
        let (mut font, _ttf) = open(20);
        font.set_kerning(false);
        assert_eq!(font.size_utf8("abc"), Some(Size::new(30, 20)));
        assert_eq!(font.size_utf8(""), Some(Size::new(0, 20)));
        assert_eq!(Font::<Headless>::default().size_utf8("abc"), None);
    }

    #[test]
    fn test_render_modes() {
        let (mut font, _ttf) = open(20);
        font.set_kerning(false);
        let red = Color::rgb(255, 0, 0);

        let solid = font.render_utf8_solid("Hi", red);
        assert_eq!((solid.width(), solid.height()), (20, 20));
        assert_eq!(solid.format(), PixelFormat::ARGB8888);
        assert_eq!(pixel(&solid, 1, 10), 0xFFFF_0000);
        assert_eq!(pixel(&solid, 1, 19) >> 24, 0);

        let shaded = font.render_utf8_shaded("Hi", red, Color::rgb(0, 0, 255));
        assert_eq!(pixel(&shaded, 1, 19), 0xFF00_00FF);

        let blended = font.render_utf8_blended("Hi", Color::rgba(0, 255, 0, 128));
        assert_eq!(pixel(&blended, 1, 10), 0x8000_FF00);

        assert!(!font.render_utf8_solid("", red).is_valid());
        assert!(!Font::<Headless>::default().render_utf8_solid("x", red).is_valid());
    }

    #[test]
    fn test_render_wrapped() {
        let (mut font, _ttf) = open(20);
        font.set_kerning(false);
        let white = Color::WHITE;
        let one_line = font.render_utf8_blended_wrapped("ab cd", white, 0);
        assert_eq!(one_line.height(), font.line_skip());

        let wrapped = font.render_utf8_blended_wrapped("ab cd ef", white, 40);
        assert_eq!(wrapped.height(), 3 * font.line_skip());
        assert!(wrapped.width() <= 40);

        let newline = font.render_utf8_blended_wrapped("ab\ncd", white, 0);
        assert_eq!(newline.height(), 2 * font.line_skip());
    }

    #[test]
    fn test_render_glyph() {
        let (font, _ttf) = open(20);
        let g = font.render_glyph_blended('W', Color::WHITE);
        assert_eq!((g.width(), g.height()), (10, 20));
        assert!(font.render_glyph_solid('x', Color::WHITE).is_valid());
        assert!(font.render_glyph_shaded('x', Color::WHITE, Color::BLACK).is_valid());
        assert!(!font.render_glyph_solid('\u{1F600}', Color::WHITE).is_valid());
    }
}
