//! SDL2_ttf calls

use std::ffi::{c_char, c_long};
use std::ptr::NonNull;

use sdl2_sys as sys;
use sys::ttf;

use super::{c_string, from_c, Sdl};
use crate::backend::{TextRender, Ttf};
use crate::foundation::geometry::Color;
use crate::foundation::handle::NativeResource;

impl NativeResource for ttf::TTF_Font {
    const KIND: &'static str = "font";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { ttf::TTF_CloseFont(raw.as_ptr()) }
    }
}

fn sdl_color(c: Color) -> sys::SDL_Color {
    sys::SDL_Color { r: c.r, g: c.g, b: c.b, a: c.a }
}

impl Ttf for Sdl {
    type Font = ttf::TTF_Font;

    fn ttf_init() -> i32 {
        // SAFETY: plain library call
        unsafe { ttf::TTF_Init() }
    }

    fn ttf_was_init() -> i32 {
        // SAFETY: plain library call
        unsafe { ttf::TTF_WasInit() }
    }

    fn ttf_quit() {
        // SAFETY: plain library call
        unsafe { ttf::TTF_Quit() }
    }

    fn open_font(path: &str, ptsize: i32) -> *mut Self::Font {
        let path = c_string(path);
        // SAFETY: C strings outlive the call
        unsafe { ttf::TTF_OpenFont(path.as_ptr(), ptsize) }
    }

    fn open_font_index(path: &str, ptsize: i32, index: i64) -> *mut Self::Font {
        let path = c_string(path);
        let index = c_long::try_from(index).unwrap_or(-1);
        // SAFETY: C strings outlive the call
        unsafe { ttf::TTF_OpenFontIndex(path.as_ptr(), ptsize, index) }
    }

    fn font_style(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GetFontStyle(font.as_ptr()) }
    }

    fn set_font_style(font: NonNull<Self::Font>, style: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_SetFontStyle(font.as_ptr(), style) }
    }

    fn font_outline(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GetFontOutline(font.as_ptr()) }
    }

    fn set_font_outline(font: NonNull<Self::Font>, outline: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_SetFontOutline(font.as_ptr(), outline) }
    }

    fn font_hinting(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GetFontHinting(font.as_ptr()) }
    }

    fn set_font_hinting(font: NonNull<Self::Font>, hinting: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_SetFontHinting(font.as_ptr(), hinting) }
    }

    fn font_kerning(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GetFontKerning(font.as_ptr()) }
    }

    fn set_font_kerning(font: NonNull<Self::Font>, allowed: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_SetFontKerning(font.as_ptr(), allowed) }
    }

    fn font_height(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_FontHeight(font.as_ptr()) }
    }

    fn font_ascent(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_FontAscent(font.as_ptr()) }
    }

    fn font_descent(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_FontDescent(font.as_ptr()) }
    }

    fn font_line_skip(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_FontLineSkip(font.as_ptr()) }
    }

    fn font_faces(font: NonNull<Self::Font>) -> i64 {
        // SAFETY: live handles owned by wrappers
        i64::from(unsafe { ttf::TTF_FontFaces(font.as_ptr()) })
    }

    fn font_face_is_fixed_width(font: NonNull<Self::Font>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_FontFaceIsFixedWidth(font.as_ptr()) }
    }

    fn font_face_family_name(font: NonNull<Self::Font>) -> Option<String> {
        // SAFETY: live handles owned by wrappers
        unsafe { from_c(ttf::TTF_FontFaceFamilyName(font.as_ptr()) as *const c_char) }
    }

    fn font_face_style_name(font: NonNull<Self::Font>) -> Option<String> {
        // SAFETY: live handles owned by wrappers
        unsafe { from_c(ttf::TTF_FontFaceStyleName(font.as_ptr()) as *const c_char) }
    }

    fn glyph_is_provided(font: NonNull<Self::Font>, ch: u16) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GlyphIsProvided(font.as_ptr(), ch) }
    }

    fn glyph_metrics(font: NonNull<Self::Font>, ch: u16, metrics: &mut [i32; 5]) -> i32 {
        let [min_x, max_x, min_y, max_y, advance] = metrics;
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { ttf::TTF_GlyphMetrics(font.as_ptr(), ch, min_x, max_x, min_y, max_y, advance) }
    }

    fn kerning_size_glyphs(font: NonNull<Self::Font>, previous: u16, ch: u16) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { ttf::TTF_GetFontKerningSizeGlyphs(font.as_ptr(), previous, ch) }
    }

    fn size_utf8(font: NonNull<Self::Font>, text: &str, w: &mut i32, h: &mut i32) -> i32 {
        let text = c_string(text);
        // SAFETY: live handles owned by wrappers, C strings outlive the call and out-parameters are valid for writes
        unsafe { ttf::TTF_SizeUTF8(font.as_ptr(), text.as_ptr(), w, h) }
    }

    fn render_utf8(font: NonNull<Self::Font>, text: &str, mode: TextRender) -> *mut Self::Surface {
        let text = c_string(text);
        let (font, text) = (font.as_ptr(), text.as_ptr());
        // SAFETY: live font owned by a wrapper and the C string outlives the call
        let surface = unsafe {
            match mode {
                TextRender::Solid(fg) => ttf::TTF_RenderUTF8_Solid(font, text, sdl_color(fg)),
                TextRender::Shaded(fg, bg) => ttf::TTF_RenderUTF8_Shaded(font, text, sdl_color(fg), sdl_color(bg)),
                TextRender::Blended(fg) => ttf::TTF_RenderUTF8_Blended(font, text, sdl_color(fg)),
            }
        };
        surface.cast()
    }

    fn render_utf8_blended_wrapped(font: NonNull<Self::Font>, text: &str, fg: Color, wrap_length: u32) -> *mut Self::Surface {
        let text = c_string(text);
        let surface =
            // SAFETY: live handles owned by wrappers and C strings outlive the call
            unsafe { ttf::TTF_RenderUTF8_Blended_Wrapped(font.as_ptr(), text.as_ptr(), sdl_color(fg), wrap_length) };
        surface.cast()
    }

    fn render_glyph(font: NonNull<Self::Font>, ch: u16, mode: TextRender) -> *mut Self::Surface {
        let font = font.as_ptr();
        // SAFETY: live font owned by a wrapper
        let surface = unsafe {
            match mode {
                TextRender::Solid(fg) => ttf::TTF_RenderGlyph_Solid(font, ch, sdl_color(fg)),
                TextRender::Shaded(fg, bg) => ttf::TTF_RenderGlyph_Shaded(font, ch, sdl_color(fg), sdl_color(bg)),
                TextRender::Blended(fg) => ttf::TTF_RenderGlyph_Blended(font, ch, sdl_color(fg)),
            }
        };
        surface.cast()
    }
}
