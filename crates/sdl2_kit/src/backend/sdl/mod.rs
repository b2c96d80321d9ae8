//! The real native libraries through `sdl2-sys`
//!
//! Every call is a thin forward: arguments are converted to their C shapes,
//! results are returned untouched. Geometry types share the native layout, so
//! slices and references are passed by pointer cast.

use std::ffi::{c_char, CStr, CString};
use std::ptr::{self, NonNull};

use sdl2_sys as sys;

use crate::backend::Core;
use crate::foundation::geometry::{FPoint, FRect, Point, Rect};
use crate::foundation::handle::NativeResource;

#[cfg(feature = "sdl-image")]
mod image;
#[cfg(feature = "sdl-mixer")]
mod mixer;
#[cfg(feature = "sdl-ttf")]
mod ttf;
mod video;

/// The native backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sdl;

impl NativeResource for sys::SDL_Window {
    const KIND: &'static str = "window";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { sys::SDL_DestroyWindow(raw.as_ptr()) }
    }
}

impl NativeResource for sys::SDL_Renderer {
    const KIND: &'static str = "renderer";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { sys::SDL_DestroyRenderer(raw.as_ptr()) }
    }
}

impl NativeResource for sys::SDL_Texture {
    const KIND: &'static str = "texture";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { sys::SDL_DestroyTexture(raw.as_ptr()) }
    }
}

impl NativeResource for sys::SDL_Surface {
    const KIND: &'static str = "surface";

    unsafe fn release(raw: NonNull<Self>) {
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { sys::SDL_FreeSurface(raw.as_ptr()) }
    }
}

/// C copy of `s`, cut at the first interior NUL
fn c_string(s: &str) -> CString {
    let end = s.find('\0').unwrap_or(s.len());
    CString::new(&s[..end]).unwrap_or_default()
}

fn c_string_opt(s: Option<&str>) -> Option<CString> {
    s.map(c_string)
}

fn c_ptr(s: Option<&CString>) -> *const c_char {
    s.map_or(ptr::null(), |s| s.as_ptr())
}

/// Owned copy of a native string, `None` for null
///
/// # Safety
/// `raw` is null or a NUL terminated string valid for the call.
unsafe fn from_c(raw: *const c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    // SAFETY: per the function contract
    Some(unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned())
}

/// Copy and free a string allocated by the library
///
/// # Safety
/// `raw` is null or a string the caller owns and must free with `SDL_free`.
unsafe fn take_c(raw: *mut c_char) -> Option<String> {
    // SAFETY: per the function contract
    let copy = unsafe { from_c(raw) };
    if !raw.is_null() {
        // SAFETY: the string was handed over to us
        unsafe { sys::SDL_free(raw.cast()) };
    }
    copy
}

fn sdl_bool(value: bool) -> sys::SDL_bool {
    if value {
        sys::SDL_bool::SDL_TRUE
    } else {
        sys::SDL_bool::SDL_FALSE
    }
}

fn is_true(value: sys::SDL_bool) -> bool {
    value == sys::SDL_bool::SDL_TRUE
}

fn rect_ptr(rect: Option<&Rect>) -> *const sys::SDL_Rect {
    rect.map_or(ptr::null(), |r| ptr::from_ref(r).cast())
}

fn rect_mut(rect: Option<&mut Rect>) -> *mut sys::SDL_Rect {
    rect.map_or(ptr::null_mut(), |r| ptr::from_mut(r).cast())
}

fn frect_ptr(rect: Option<&FRect>) -> *const sys::SDL_FRect {
    rect.map_or(ptr::null(), |r| ptr::from_ref(r).cast())
}

fn point_ptr(point: Option<&Point>) -> *const sys::SDL_Point {
    point.map_or(ptr::null(), |p| ptr::from_ref(p).cast())
}

fn fpoint_ptr(point: Option<&FPoint>) -> *const sys::SDL_FPoint {
    point.map_or(ptr::null(), |p| ptr::from_ref(p).cast())
}

/// A rect slice as a native `SDL_Rect` array of four `int`s each
fn rects_ptr(rects: &[Rect]) -> *const sys::SDL_Rect {
    bytemuck::cast_slice::<Rect, i32>(rects).as_ptr().cast()
}

/// A point slice as a native `SDL_Point` array of two `int`s each
fn points_ptr(points: &[Point]) -> *const sys::SDL_Point {
    bytemuck::cast_slice::<Point, i32>(points).as_ptr().cast()
}

/// Element count of a slice as the native `int`
fn count<T>(items: &[T]) -> i32 {
    i32::try_from(items.len()).unwrap_or(i32::MAX)
}

impl Core for Sdl {
    fn init(flags: u32) -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_Init(flags) }
    }

    fn init_subsystem(flags: u32) -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_InitSubSystem(flags) }
    }

    fn was_init(flags: u32) -> u32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_WasInit(flags) }
    }

    fn quit_subsystem(flags: u32) {
        // SAFETY: plain library call
        unsafe { sys::SDL_QuitSubSystem(flags) }
    }

    fn quit() {
        // SAFETY: plain library call
        unsafe { sys::SDL_Quit() }
    }

    fn last_error() -> String {
        // SAFETY: the error string is never null and stays valid until the next call
        unsafe { from_c(sys::SDL_GetError()) }.unwrap_or_default()
    }

    fn clear_error() {
        // SAFETY: plain library call
        unsafe { sys::SDL_ClearError() }
    }

    fn platform() -> String {
        // SAFETY: static string
        unsafe { from_c(sys::SDL_GetPlatform()) }.unwrap_or_default()
    }

    fn power_info(seconds: &mut i32, percent: &mut i32) -> i32 {
        // SAFETY: out-parameters are valid for writes
        unsafe { sys::SDL_GetPowerInfo(seconds, percent) as i32 }
    }

    fn pref_path(org: &str, app: &str) -> Option<String> {
        let (org, app) = (c_string(org), c_string(app));
        // SAFETY: the returned buffer is ours to free
        unsafe { take_c(sys::SDL_GetPrefPath(org.as_ptr(), app.as_ptr())) }
    }

    fn base_path() -> Option<String> {
        // SAFETY: the returned buffer is ours to free
        unsafe { take_c(sys::SDL_GetBasePath()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_string_cuts_at_nul() {
        assert_eq!(c_string("abc\0def").as_bytes(), b"abc");
        assert_eq!(c_string("").as_bytes(), b"");
    }

    #[test]
    fn test_geometry_layouts_match() {
        assert_eq!(std::mem::size_of::<Rect>(), std::mem::size_of::<sys::SDL_Rect>());
        assert_eq!(std::mem::size_of::<FRect>(), std::mem::size_of::<sys::SDL_FRect>());
        assert_eq!(std::mem::size_of::<Point>(), std::mem::size_of::<sys::SDL_Point>());
        assert_eq!(std::mem::size_of::<FPoint>(), std::mem::size_of::<sys::SDL_FPoint>());
    }

    #[test]
    fn test_slice_pointers_keep_layout() {
        let rects = [Rect::new(1, 2, 3, 4), Rect::new(5, 6, 7, 8)];
        // SAFETY: the slice outlives the reads and both entries are in bounds
        let (first, second) = unsafe { (*rects_ptr(&rects), *rects_ptr(&rects).add(1)) };
        assert_eq!((first.x, first.y, first.w, first.h), (1, 2, 3, 4));
        assert_eq!((second.x, second.h), (5, 8));
        let points = [Point::new(9, 10)];
        // SAFETY: the slice outlives the read
        let point = unsafe { *points_ptr(&points) };
        assert_eq!((point.x, point.y), (9, 10));
    }

    #[test]
    fn test_unsafe_blocks_are_documented() {
        let sources = [
            ("mod.rs", include_str!("mod.rs")),
            ("video.rs", include_str!("video.rs")),
            ("mixer.rs", include_str!("mixer.rs")),
            ("ttf.rs", include_str!("ttf.rs")),
            ("image.rs", include_str!("image.rs")),
        ];
        let opener = concat!("unsafe", " {");
        for (name, source) in sources {
            let lines: Vec<&str> = source.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                let opens_block = line.contains(opener) && !line.trim_start().starts_with("//");
                if opens_block && !line.contains("SAFETY") {
                    let documented = i > 0 && lines[i - 1].contains("SAFETY");
                    assert!(documented, "{name}:{} has no SAFETY comment", i + 1);
                }
            }
        }
    }

    #[test]
    fn test_from_c_null() {
        // SAFETY: null is accepted
        assert_eq!(unsafe { from_c(ptr::null()) }, None);
    }
}
