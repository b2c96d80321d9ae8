//! Video, window, renderer, texture and surface calls
//!
//! Handles reaching these functions are live objects owned by a wrapper, and
//! out-parameters are Rust references, so every native call below is sound.

use std::ffi::c_void;
use std::mem;
use std::ptr::{self, NonNull};

use sdl2_sys as sys;

use super::{
    c_ptr, c_string, c_string_opt, count, fpoint_ptr, frect_ptr, from_c, is_true, point_ptr, points_ptr, rect_mut,
    rect_ptr, rects_ptr, sdl_bool, Sdl,
};
use crate::backend::{SurfaceInfo, Video};
use crate::foundation::geometry::{Color, FPoint, FRect, Point, Rect};
use crate::render::{BlendMode, DisplayMode, Flip, PixelFormat, RendererFlags, RendererInfo, ScaleMode};
use crate::system::messagebox::MessageBoxData;

fn blend_to_sdl(mode: BlendMode) -> sys::SDL_BlendMode {
    use sys::SDL_BlendMode as B;
    match mode {
        BlendMode::None => B::SDL_BLENDMODE_NONE,
        BlendMode::Blend => B::SDL_BLENDMODE_BLEND,
        BlendMode::Add => B::SDL_BLENDMODE_ADD,
        BlendMode::Mod => B::SDL_BLENDMODE_MOD,
        BlendMode::Mul => B::SDL_BLENDMODE_MUL,
        BlendMode::Invalid => B::SDL_BLENDMODE_INVALID,
    }
}

fn scale_to_sdl(mode: ScaleMode) -> sys::SDL_ScaleMode {
    use sys::SDL_ScaleMode as S;
    match mode {
        ScaleMode::Nearest => S::SDL_ScaleModeNearest,
        ScaleMode::Linear => S::SDL_ScaleModeLinear,
        ScaleMode::Best => S::SDL_ScaleModeBest,
    }
}

/// Copy-ex entry points taking the flip as its C bit set
///
/// `SDL_RendererFlip` is a bit set on the C side, but the generated Rust enum
/// only has the single-bit variants, so a value with both bits set cannot be
/// expressed through it. These declarations bind the same symbols with the
/// flip as a plain `unsigned int`, which has the C enum's size and ABI.
mod copy_ex {
    use std::ffi::{c_double, c_int, c_uint};

    use sdl2_sys as sys;

    extern "C" {
        pub fn SDL_RenderCopyEx(
            renderer: *mut sys::SDL_Renderer,
            texture: *mut sys::SDL_Texture,
            srcrect: *const sys::SDL_Rect,
            dstrect: *const sys::SDL_Rect,
            angle: c_double,
            center: *const sys::SDL_Point,
            flip: c_uint,
        ) -> c_int;

        pub fn SDL_RenderCopyExF(
            renderer: *mut sys::SDL_Renderer,
            texture: *mut sys::SDL_Texture,
            srcrect: *const sys::SDL_Rect,
            dstrect: *const sys::SDL_FRect,
            angle: c_double,
            center: *const sys::SDL_FPoint,
            flip: c_uint,
        ) -> c_int;
    }
}

/// Flip as the native bit set; only the horizontal and vertical bits are sent
fn flip_bits(flip: Flip) -> u32 {
    (flip & (Flip::HORIZONTAL | Flip::VERTICAL)).bits()
}

fn yuv_to_sdl(mode: i32) -> sys::SDL_YUV_CONVERSION_MODE {
    use sys::SDL_YUV_CONVERSION_MODE as Y;
    match mode {
        0 => Y::SDL_YUV_CONVERSION_JPEG,
        2 => Y::SDL_YUV_CONVERSION_BT709,
        3 => Y::SDL_YUV_CONVERSION_AUTOMATIC,
        _ => Y::SDL_YUV_CONVERSION_BT601,
    }
}

fn mode_to_sdl(mode: &DisplayMode) -> sys::SDL_DisplayMode {
    sys::SDL_DisplayMode {
        format: mode.format.bits(),
        w: mode.w,
        h: mode.h,
        refresh_rate: mode.refresh_rate,
        driverdata: ptr::null_mut(),
    }
}

fn info_from_sdl(raw: &sys::SDL_RendererInfo) -> RendererInfo {
    let formats = (raw.num_texture_formats as usize).min(raw.texture_formats.len());
    RendererInfo {
        // SAFETY: the native string is NUL-terminated or null
        name: unsafe { from_c(raw.name) }.unwrap_or_default(),
        flags: RendererFlags::from_bits_retain(raw.flags),
        texture_formats: raw.texture_formats[..formats].iter().map(|&f| PixelFormat::from(f)).collect(),
        max_texture_width: raw.max_texture_width,
        max_texture_height: raw.max_texture_height,
    }
}

fn read_info(info: &mut RendererInfo, call: impl FnOnce(*mut sys::SDL_RendererInfo) -> i32) -> i32 {
    // SAFETY: out-parameters are valid for writes
    let mut raw: sys::SDL_RendererInfo = unsafe { mem::zeroed() };
    let result = call(&mut raw);
    if result == 0 {
        *info = info_from_sdl(&raw);
    }
    result
}

fn read_blend(mode: &mut BlendMode, call: impl FnOnce(*mut sys::SDL_BlendMode) -> i32) -> i32 {
    let mut raw = sys::SDL_BlendMode::SDL_BLENDMODE_NONE;
    let result = call(&mut raw);
    *mode = BlendMode::from_raw(raw as i32);
    result
}

fn window_ptr(window: Option<NonNull<sys::SDL_Window>>) -> *mut sys::SDL_Window {
    window.map_or(ptr::null_mut(), NonNull::as_ptr)
}

impl Video for Sdl {
    type Window = sys::SDL_Window;
    type Renderer = sys::SDL_Renderer;
    type Texture = sys::SDL_Texture;
    type Surface = sys::SDL_Surface;

    fn video_init(driver: Option<&str>) -> i32 {
        let driver = c_string_opt(driver);
        // SAFETY: C strings outlive the call
        unsafe { sys::SDL_VideoInit(c_ptr(driver.as_ref())) }
    }

    fn video_quit() {
        // SAFETY: plain library call
        unsafe { sys::SDL_VideoQuit() }
    }

    fn current_video_driver() -> Option<String> {
        // SAFETY: the native string is NUL-terminated or null
        unsafe { from_c(sys::SDL_GetCurrentVideoDriver()) }
    }

    fn num_video_drivers() -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetNumVideoDrivers() }
    }

    fn video_driver(index: i32) -> Option<String> {
        // SAFETY: the native string is NUL-terminated or null
        unsafe { from_c(sys::SDL_GetVideoDriver(index)) }
    }

    fn display_bounds(index: i32, rect: &mut Rect) -> i32 {
        // SAFETY: out-parameters are valid for writes
        unsafe { sys::SDL_GetDisplayBounds(index, rect_mut(Some(rect))) }
    }

    fn display_usable_bounds(index: i32, rect: &mut Rect) -> i32 {
        // SAFETY: out-parameters are valid for writes
        unsafe { sys::SDL_GetDisplayUsableBounds(index, rect_mut(Some(rect))) }
    }

    fn display_orientation(index: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetDisplayOrientation(index) as i32 }
    }

    fn show_simple_message_box(flags: u32, title: &str, message: &str, parent: Option<NonNull<Self::Window>>) -> i32 {
        let (title, message) = (c_string(title), c_string(message));
        // SAFETY: C strings outlive the call
        unsafe { sys::SDL_ShowSimpleMessageBox(flags, title.as_ptr(), message.as_ptr(), window_ptr(parent)) }
    }

    fn show_message_box(data: &MessageBoxData, parent: Option<NonNull<Self::Window>>, button_id: &mut i32) -> i32 {
        let (title, message) = (c_string(&data.title), c_string(&data.message));
        let labels: Vec<_> = data.buttons.iter().map(|b| c_string(&b.text)).collect();
        let buttons: Vec<_> = data
            .buttons
            .iter()
            .zip(&labels)
            .map(|(button, label)| sys::SDL_MessageBoxButtonData {
                flags: button.flags.bits(),
                buttonid: button.id,
                text: label.as_ptr(),
            })
            .collect();
        let raw = sys::SDL_MessageBoxData {
            flags: data.flags.bits(),
            window: window_ptr(parent),
            title: title.as_ptr(),
            message: message.as_ptr(),
            numbuttons: count(&buttons),
            buttons: buttons.as_ptr(),
            colorScheme: ptr::null(),
        };
        // SAFETY: out-parameters are valid for writes
        unsafe { sys::SDL_ShowMessageBox(&raw, button_id) }
    }

    fn create_window(title: &str, x: i32, y: i32, w: i32, h: i32, flags: u32) -> *mut Self::Window {
        let title = c_string(title);
        // SAFETY: C strings outlive the call
        unsafe { sys::SDL_CreateWindow(title.as_ptr(), x, y, w, h, flags) }
    }

    fn create_window_and_renderer(
        w: i32,
        h: i32,
        flags: u32,
        window: &mut *mut Self::Window,
        renderer: &mut *mut Self::Renderer,
    ) -> i32 {
        // SAFETY: out-parameters are valid for writes
        unsafe { sys::SDL_CreateWindowAndRenderer(w, h, flags, window, renderer) }
    }

    fn window_display_index(window: NonNull<Self::Window>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetWindowDisplayIndex(window.as_ptr()) }
    }

    fn window_display_mode(window: NonNull<Self::Window>, mode: &mut DisplayMode) -> i32 {
        let mut raw = mode_to_sdl(mode);
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        let result = unsafe { sys::SDL_GetWindowDisplayMode(window.as_ptr(), &mut raw) };
        if result == 0 {
            *mode = DisplayMode {
                format: PixelFormat::from(raw.format),
                w: raw.w,
                h: raw.h,
                refresh_rate: raw.refresh_rate,
            };
        }
        result
    }

    fn set_window_display_mode(window: NonNull<Self::Window>, mode: Option<&DisplayMode>) -> i32 {
        let raw = mode.map(mode_to_sdl);
        let raw = raw.as_ref().map_or(ptr::null(), ptr::from_ref);
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowDisplayMode(window.as_ptr(), raw) }
    }

    fn window_flags(window: NonNull<Self::Window>) -> u32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetWindowFlags(window.as_ptr()) }
    }

    fn grabbed_window() -> *mut Self::Window {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetGrabbedWindow() }
    }

    fn window_grab(window: NonNull<Self::Window>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_GetWindowGrab(window.as_ptr()) })
    }

    fn set_window_grab(window: NonNull<Self::Window>, grabbed: bool) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowGrab(window.as_ptr(), sdl_bool(grabbed)) }
    }

    fn window_position(window: NonNull<Self::Window>, x: &mut i32, y: &mut i32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetWindowPosition(window.as_ptr(), x, y) }
    }

    fn set_window_position(window: NonNull<Self::Window>, x: i32, y: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowPosition(window.as_ptr(), x, y) }
    }

    fn window_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetWindowSize(window.as_ptr(), w, h) }
    }

    fn set_window_size(window: NonNull<Self::Window>, w: i32, h: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowSize(window.as_ptr(), w, h) }
    }

    fn window_minimum_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetWindowMinimumSize(window.as_ptr(), w, h) }
    }

    fn set_window_minimum_size(window: NonNull<Self::Window>, w: i32, h: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowMinimumSize(window.as_ptr(), w, h) }
    }

    fn window_maximum_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetWindowMaximumSize(window.as_ptr(), w, h) }
    }

    fn set_window_maximum_size(window: NonNull<Self::Window>, w: i32, h: i32) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowMaximumSize(window.as_ptr(), w, h) }
    }

    fn set_window_bordered(window: NonNull<Self::Window>, bordered: bool) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowBordered(window.as_ptr(), sdl_bool(bordered)) }
    }

    fn set_window_resizable(window: NonNull<Self::Window>, resizable: bool) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowResizable(window.as_ptr(), sdl_bool(resizable)) }
    }

    fn window_title(window: NonNull<Self::Window>) -> String {
        // SAFETY: live handles owned by wrappers
        unsafe { from_c(sys::SDL_GetWindowTitle(window.as_ptr())) }.unwrap_or_default()
    }

    fn set_window_title(window: NonNull<Self::Window>, title: &str) {
        let title = c_string(title);
        // SAFETY: live handles owned by wrappers and C strings outlive the call
        unsafe { sys::SDL_SetWindowTitle(window.as_ptr(), title.as_ptr()) }
    }

    fn set_window_icon(window: NonNull<Self::Window>, icon: NonNull<Self::Surface>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowIcon(window.as_ptr(), icon.as_ptr()) }
    }

    fn show_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_ShowWindow(window.as_ptr()) }
    }

    fn hide_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_HideWindow(window.as_ptr()) }
    }

    fn maximize_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_MaximizeWindow(window.as_ptr()) }
    }

    fn minimize_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_MinimizeWindow(window.as_ptr()) }
    }

    fn raise_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RaiseWindow(window.as_ptr()) }
    }

    fn restore_window(window: NonNull<Self::Window>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RestoreWindow(window.as_ptr()) }
    }

    fn set_window_fullscreen(window: NonNull<Self::Window>, flags: u32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowFullscreen(window.as_ptr(), flags) }
    }

    fn window_brightness(window: NonNull<Self::Window>) -> f32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetWindowBrightness(window.as_ptr()) }
    }

    fn set_window_brightness(window: NonNull<Self::Window>, brightness: f32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowBrightness(window.as_ptr(), brightness) }
    }

    fn window_opacity(window: NonNull<Self::Window>, opacity: &mut f32) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetWindowOpacity(window.as_ptr(), opacity) }
    }

    fn set_window_opacity(window: NonNull<Self::Window>, opacity: f32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowOpacity(window.as_ptr(), opacity) }
    }

    fn set_window_modal_for(modal: NonNull<Self::Window>, parent: NonNull<Self::Window>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowModalFor(modal.as_ptr(), parent.as_ptr()) }
    }

    fn set_window_input_focus(window: NonNull<Self::Window>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetWindowInputFocus(window.as_ptr()) }
    }

    fn window_from_id(id: u32) -> *mut Self::Window {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetWindowFromID(id) }
    }

    fn window_id(window: NonNull<Self::Window>) -> u32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetWindowID(window.as_ptr()) }
    }

    fn window_surface(window: NonNull<Self::Window>) -> *mut Self::Surface {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetWindowSurface(window.as_ptr()) }
    }

    fn update_window_surface(window: NonNull<Self::Window>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_UpdateWindowSurface(window.as_ptr()) }
    }

    fn update_window_surface_rects(window: NonNull<Self::Window>, rects: &[Rect]) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_UpdateWindowSurfaceRects(window.as_ptr(), rects_ptr(rects), count(rects)) }
    }

    fn num_render_drivers() -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetNumRenderDrivers() }
    }

    fn render_driver_info(index: i32, info: &mut RendererInfo) -> i32 {
        // SAFETY: out-parameters are valid for writes
        read_info(info, |raw| unsafe { sys::SDL_GetRenderDriverInfo(index, raw) })
    }

    fn create_renderer(window: NonNull<Self::Window>, index: i32, flags: u32) -> *mut Self::Renderer {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_CreateRenderer(window.as_ptr(), index, flags) }
    }

    fn create_software_renderer(surface: NonNull<Self::Surface>) -> *mut Self::Renderer {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_CreateSoftwareRenderer(surface.as_ptr()) }
    }

    fn renderer_info(renderer: NonNull<Self::Renderer>, info: &mut RendererInfo) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        read_info(info, |raw| unsafe { sys::SDL_GetRendererInfo(renderer.as_ptr(), raw) })
    }

    fn renderer_output_size(renderer: NonNull<Self::Renderer>, w: &mut i32, h: &mut i32) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetRendererOutputSize(renderer.as_ptr(), w, h) }
    }

    fn render_target_supported(renderer: NonNull<Self::Renderer>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_RenderTargetSupported(renderer.as_ptr()) })
    }

    fn render_target(renderer: NonNull<Self::Renderer>) -> *mut Self::Texture {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_GetRenderTarget(renderer.as_ptr()) }
    }

    fn set_render_target(renderer: NonNull<Self::Renderer>, texture: Option<NonNull<Self::Texture>>) -> i32 {
        let texture = texture.map_or(ptr::null_mut(), NonNull::as_ptr);
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetRenderTarget(renderer.as_ptr(), texture) }
    }

    fn render_logical_size(renderer: NonNull<Self::Renderer>, w: &mut i32, h: &mut i32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_RenderGetLogicalSize(renderer.as_ptr(), w, h) }
    }

    fn set_render_logical_size(renderer: NonNull<Self::Renderer>, w: i32, h: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderSetLogicalSize(renderer.as_ptr(), w, h) }
    }

    fn render_integer_scale(renderer: NonNull<Self::Renderer>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_RenderGetIntegerScale(renderer.as_ptr()) })
    }

    fn set_render_integer_scale(renderer: NonNull<Self::Renderer>, enable: bool) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderSetIntegerScale(renderer.as_ptr(), sdl_bool(enable)) }
    }

    fn render_viewport(renderer: NonNull<Self::Renderer>, rect: &mut Rect) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_RenderGetViewport(renderer.as_ptr(), rect_mut(Some(rect))) }
    }

    fn set_render_viewport(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderSetViewport(renderer.as_ptr(), rect_ptr(rect)) }
    }

    fn render_clip_rect(renderer: NonNull<Self::Renderer>, rect: &mut Rect) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_RenderGetClipRect(renderer.as_ptr(), rect_mut(Some(rect))) }
    }

    fn set_render_clip_rect(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderSetClipRect(renderer.as_ptr(), rect_ptr(rect)) }
    }

    fn render_clip_enabled(renderer: NonNull<Self::Renderer>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_RenderIsClipEnabled(renderer.as_ptr()) })
    }

    fn render_scale(renderer: NonNull<Self::Renderer>, x: &mut f32, y: &mut f32) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_RenderGetScale(renderer.as_ptr(), x, y) }
    }

    fn set_render_scale(renderer: NonNull<Self::Renderer>, x: f32, y: f32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderSetScale(renderer.as_ptr(), x, y) }
    }

    fn render_draw_color(renderer: NonNull<Self::Renderer>, color: &mut Color) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetRenderDrawColor(renderer.as_ptr(), &mut color.r, &mut color.g, &mut color.b, &mut color.a) }
    }

    fn set_render_draw_color(renderer: NonNull<Self::Renderer>, color: Color) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetRenderDrawColor(renderer.as_ptr(), color.r, color.g, color.b, color.a) }
    }

    fn render_draw_blend_mode(renderer: NonNull<Self::Renderer>, mode: &mut BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        read_blend(mode, |raw| unsafe { sys::SDL_GetRenderDrawBlendMode(renderer.as_ptr(), raw) })
    }

    fn set_render_draw_blend_mode(renderer: NonNull<Self::Renderer>, mode: BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetRenderDrawBlendMode(renderer.as_ptr(), blend_to_sdl(mode)) }
    }

    fn render_draw_point(renderer: NonNull<Self::Renderer>, x: i32, y: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawPoint(renderer.as_ptr(), x, y) }
    }

    fn render_draw_point_f(renderer: NonNull<Self::Renderer>, x: f32, y: f32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawPointF(renderer.as_ptr(), x, y) }
    }

    fn render_draw_points(renderer: NonNull<Self::Renderer>, points: &[Point]) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_RenderDrawPoints(renderer.as_ptr(), points_ptr(points), count(points)) }
    }

    fn render_draw_line(renderer: NonNull<Self::Renderer>, x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawLine(renderer.as_ptr(), x1, y1, x2, y2) }
    }

    fn render_draw_line_f(renderer: NonNull<Self::Renderer>, x1: f32, y1: f32, x2: f32, y2: f32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawLineF(renderer.as_ptr(), x1, y1, x2, y2) }
    }

    fn render_draw_lines(renderer: NonNull<Self::Renderer>, points: &[Point]) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_RenderDrawLines(renderer.as_ptr(), points_ptr(points), count(points)) }
    }

    fn render_draw_rect(renderer: NonNull<Self::Renderer>, rect: &Rect) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawRect(renderer.as_ptr(), rect_ptr(Some(rect))) }
    }

    fn render_draw_rect_f(renderer: NonNull<Self::Renderer>, rect: &FRect) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderDrawRectF(renderer.as_ptr(), frect_ptr(Some(rect))) }
    }

    fn render_draw_rects(renderer: NonNull<Self::Renderer>, rects: &[Rect]) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_RenderDrawRects(renderer.as_ptr(), rects_ptr(rects), count(rects)) }
    }

    fn render_fill_rect(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderFillRect(renderer.as_ptr(), rect_ptr(rect)) }
    }

    fn render_fill_rect_f(renderer: NonNull<Self::Renderer>, rect: Option<&FRect>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderFillRectF(renderer.as_ptr(), frect_ptr(rect)) }
    }

    fn render_fill_rects(renderer: NonNull<Self::Renderer>, rects: &[Rect]) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_RenderFillRects(renderer.as_ptr(), rects_ptr(rects), count(rects)) }
    }

    fn render_copy(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderCopy(renderer.as_ptr(), texture.as_ptr(), rect_ptr(src), rect_ptr(dst)) }
    }

    fn render_copy_f(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&FRect>,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderCopyF(renderer.as_ptr(), texture.as_ptr(), rect_ptr(src), frect_ptr(dst)) }
    }

    fn render_copy_ex(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
        angle: f64,
        center: Option<&Point>,
        flip: Flip,
    ) -> i32 {
        // SAFETY: live handles, geometry pointers from references or null, and a
        // flip made of the two bits the native enum defines
        // SAFETY: live handles owned by wrappers
        unsafe {
            copy_ex::SDL_RenderCopyEx(
                renderer.as_ptr(),
                texture.as_ptr(),
                rect_ptr(src),
                rect_ptr(dst),
                angle,
                point_ptr(center),
                flip_bits(flip),
            )
        }
    }

    fn render_copy_ex_f(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&FRect>,
        angle: f64,
        center: Option<&FPoint>,
        flip: Flip,
    ) -> i32 {
        // SAFETY: same as `render_copy_ex`
        unsafe {
            copy_ex::SDL_RenderCopyExF(
                renderer.as_ptr(),
                texture.as_ptr(),
                rect_ptr(src),
                frect_ptr(dst),
                angle,
                fpoint_ptr(center),
                flip_bits(flip),
            )
        }
    }

    fn render_read_pixels(
        renderer: NonNull<Self::Renderer>,
        rect: Option<&Rect>,
        format: u32,
        pixels: &mut [u8],
        pitch: i32,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers, slices outlive the call and out-parameters are valid for writes
        unsafe {
            sys::SDL_RenderReadPixels(renderer.as_ptr(), rect_ptr(rect), format, pixels.as_mut_ptr().cast(), pitch)
        }
    }

    fn render_clear(renderer: NonNull<Self::Renderer>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderClear(renderer.as_ptr()) }
    }

    fn render_present(renderer: NonNull<Self::Renderer>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderPresent(renderer.as_ptr()) }
    }

    fn render_flush(renderer: NonNull<Self::Renderer>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_RenderFlush(renderer.as_ptr()) }
    }

    fn create_texture(renderer: NonNull<Self::Renderer>, format: u32, access: i32, w: i32, h: i32) -> *mut Self::Texture {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_CreateTexture(renderer.as_ptr(), format, access, w, h) }
    }

    fn create_texture_from_surface(renderer: NonNull<Self::Renderer>, surface: NonNull<Self::Surface>) -> *mut Self::Texture {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_CreateTextureFromSurface(renderer.as_ptr(), surface.as_ptr()) }
    }

    fn query_texture(texture: NonNull<Self::Texture>, format: &mut u32, access: &mut i32, w: &mut i32, h: &mut i32) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_QueryTexture(texture.as_ptr(), format, access, w, h) }
    }

    fn update_texture(texture: NonNull<Self::Texture>, rect: Option<&Rect>, pixels: &[u8], pitch: i32) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_UpdateTexture(texture.as_ptr(), rect_ptr(rect), pixels.as_ptr().cast(), pitch) }
    }

    fn update_yuv_texture(
        texture: NonNull<Self::Texture>,
        rect: Option<&Rect>,
        y_plane: &[u8],
        y_pitch: i32,
        u_plane: &[u8],
        u_pitch: i32,
        v_plane: &[u8],
        v_pitch: i32,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe {
            sys::SDL_UpdateYUVTexture(
                texture.as_ptr(),
                rect_ptr(rect),
                y_plane.as_ptr(),
                y_pitch,
                u_plane.as_ptr(),
                u_pitch,
                v_plane.as_ptr(),
                v_pitch,
            )
        }
    }

    fn lock_texture(texture: NonNull<Self::Texture>, rect: Option<&Rect>, pixels: &mut *mut u8, pitch: &mut i32) -> i32 {
        let mut raw: *mut c_void = ptr::null_mut();
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        let result = unsafe { sys::SDL_LockTexture(texture.as_ptr(), rect_ptr(rect), &mut raw, pitch) };
        *pixels = raw.cast();
        result
    }

    fn unlock_texture(texture: NonNull<Self::Texture>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_UnlockTexture(texture.as_ptr()) }
    }

    fn texture_blend_mode(texture: NonNull<Self::Texture>, mode: &mut BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        read_blend(mode, |raw| unsafe { sys::SDL_GetTextureBlendMode(texture.as_ptr(), raw) })
    }

    fn set_texture_blend_mode(texture: NonNull<Self::Texture>, mode: BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetTextureBlendMode(texture.as_ptr(), blend_to_sdl(mode)) }
    }

    fn texture_scale_mode(texture: NonNull<Self::Texture>, mode: &mut ScaleMode) -> i32 {
        let mut raw = sys::SDL_ScaleMode::SDL_ScaleModeNearest;
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        let result = unsafe { sys::SDL_GetTextureScaleMode(texture.as_ptr(), &mut raw) };
        *mode = ScaleMode::from_raw(raw as i32).unwrap_or_default();
        result
    }

    fn set_texture_scale_mode(texture: NonNull<Self::Texture>, mode: ScaleMode) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetTextureScaleMode(texture.as_ptr(), scale_to_sdl(mode)) }
    }

    fn texture_color_mod(texture: NonNull<Self::Texture>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetTextureColorMod(texture.as_ptr(), r, g, b) }
    }

    fn set_texture_color_mod(texture: NonNull<Self::Texture>, r: u8, g: u8, b: u8) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetTextureColorMod(texture.as_ptr(), r, g, b) }
    }

    fn texture_alpha_mod(texture: NonNull<Self::Texture>, alpha: &mut u8) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetTextureAlphaMod(texture.as_ptr(), alpha) }
    }

    fn set_texture_alpha_mod(texture: NonNull<Self::Texture>, alpha: u8) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetTextureAlphaMod(texture.as_ptr(), alpha) }
    }

    fn create_rgb_surface(flags: u32, w: i32, h: i32, depth: i32, masks: [u32; 4]) -> *mut Self::Surface {
        let [r, g, b, a] = masks;
        // SAFETY: plain library call
        unsafe { sys::SDL_CreateRGBSurface(flags, w, h, depth, r, g, b, a) }
    }

    fn create_rgb_surface_with_format(flags: u32, w: i32, h: i32, depth: i32, format: u32) -> *mut Self::Surface {
        // SAFETY: plain library call
        unsafe { sys::SDL_CreateRGBSurfaceWithFormat(flags, w, h, depth, format) }
    }

    fn load_bmp(path: &str) -> *mut Self::Surface {
        let path = c_string(path);
        // SAFETY: C strings outlive the call
        unsafe { sys::SDL_LoadBMP_RW(sys::SDL_RWFromFile(path.as_ptr(), c"rb".as_ptr()), 1) }
    }

    fn save_bmp(surface: NonNull<Self::Surface>, path: &str) -> i32 {
        let path = c_string(path);
        // SAFETY: live handles owned by wrappers and C strings outlive the call
        unsafe { sys::SDL_SaveBMP_RW(surface.as_ptr(), sys::SDL_RWFromFile(path.as_ptr(), c"wb".as_ptr()), 1) }
    }

    fn surface_info(surface: NonNull<Self::Surface>) -> SurfaceInfo {
        // SAFETY: live surface owned by a wrapper
        let raw = unsafe { surface.as_ref() };
        // SAFETY: live surface owned by a wrapper
        let format = if raw.format.is_null() { 0 } else { unsafe { (*raw.format).format } };
        SurfaceInfo {
            flags: raw.flags,
            format,
            w: raw.w,
            h: raw.h,
            pitch: raw.pitch,
        }
    }

    fn surface_pixels(surface: NonNull<Self::Surface>) -> *mut u8 {
        // SAFETY: slices outlive the call
        unsafe { surface.as_ref() }.pixels.cast()
    }

    fn lock_surface(surface: NonNull<Self::Surface>) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_LockSurface(surface.as_ptr()) }
    }

    fn unlock_surface(surface: NonNull<Self::Surface>) {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_UnlockSurface(surface.as_ptr()) }
    }

    fn set_surface_rle(surface: NonNull<Self::Surface>, enable: bool) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetSurfaceRLE(surface.as_ptr(), i32::from(enable)) }
    }

    fn set_color_key(surface: NonNull<Self::Surface>, enable: bool, key: u32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetColorKey(surface.as_ptr(), i32::from(enable), key) }
    }

    fn has_color_key(surface: NonNull<Self::Surface>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_HasColorKey(surface.as_ptr()) })
    }

    fn color_key(surface: NonNull<Self::Surface>, key: &mut u32) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetColorKey(surface.as_ptr(), key) }
    }

    fn set_surface_color_mod(surface: NonNull<Self::Surface>, r: u8, g: u8, b: u8) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetSurfaceColorMod(surface.as_ptr(), r, g, b) }
    }

    fn surface_color_mod(surface: NonNull<Self::Surface>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetSurfaceColorMod(surface.as_ptr(), r, g, b) }
    }

    fn set_surface_alpha_mod(surface: NonNull<Self::Surface>, alpha: u8) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetSurfaceAlphaMod(surface.as_ptr(), alpha) }
    }

    fn surface_alpha_mod(surface: NonNull<Self::Surface>, alpha: &mut u8) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetSurfaceAlphaMod(surface.as_ptr(), alpha) }
    }

    fn set_surface_blend_mode(surface: NonNull<Self::Surface>, mode: BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SetSurfaceBlendMode(surface.as_ptr(), blend_to_sdl(mode)) }
    }

    fn surface_blend_mode(surface: NonNull<Self::Surface>, mode: &mut BlendMode) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        read_blend(mode, |raw| unsafe { sys::SDL_GetSurfaceBlendMode(surface.as_ptr(), raw) })
    }

    fn set_clip_rect(surface: NonNull<Self::Surface>, rect: Option<&Rect>) -> bool {
        // SAFETY: live handles owned by wrappers
        is_true(unsafe { sys::SDL_SetClipRect(surface.as_ptr(), rect_ptr(rect)) })
    }

    fn clip_rect(surface: NonNull<Self::Surface>, rect: &mut Rect) {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_GetClipRect(surface.as_ptr(), rect_mut(Some(rect))) }
    }

    fn duplicate_surface(surface: NonNull<Self::Surface>) -> *mut Self::Surface {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_DuplicateSurface(surface.as_ptr()) }
    }

    fn convert_surface_format(surface: NonNull<Self::Surface>, format: u32) -> *mut Self::Surface {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_ConvertSurfaceFormat(surface.as_ptr(), format, 0) }
    }

    fn fill_rect(surface: NonNull<Self::Surface>, rect: Option<&Rect>, color: u32) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_FillRect(surface.as_ptr(), rect_ptr(rect), color) }
    }

    fn fill_rects(surface: NonNull<Self::Surface>, rects: &[Rect], color: u32) -> i32 {
        // SAFETY: live handles owned by wrappers and slices outlive the call
        unsafe { sys::SDL_FillRects(surface.as_ptr(), rects_ptr(rects), count(rects), color) }
    }

    fn blit_surface(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_UpperBlit(src.as_ptr(), rect_ptr(src_rect), dst.as_ptr(), rect_mut(dst_rect)) }
    }

    fn blit_scaled(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers and out-parameters are valid for writes
        unsafe { sys::SDL_UpperBlitScaled(src.as_ptr(), rect_ptr(src_rect), dst.as_ptr(), rect_mut(dst_rect)) }
    }

    fn soft_stretch(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&Rect>,
    ) -> i32 {
        // SAFETY: live handles owned by wrappers
        unsafe { sys::SDL_SoftStretch(src.as_ptr(), rect_ptr(src_rect), dst.as_ptr(), rect_ptr(dst_rect)) }
    }

    fn set_yuv_conversion_mode(mode: i32) {
        // SAFETY: plain library call
        unsafe { sys::SDL_SetYUVConversionMode(yuv_to_sdl(mode)) }
    }

    fn yuv_conversion_mode() -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetYUVConversionMode() as i32 }
    }

    fn yuv_conversion_mode_for_resolution(w: i32, h: i32) -> i32 {
        // SAFETY: plain library call
        unsafe { sys::SDL_GetYUVConversionModeForResolution(w, h) as i32 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_modes_keep_values() {
        for mode in [BlendMode::None, BlendMode::Blend, BlendMode::Add, BlendMode::Mod, BlendMode::Mul] {
            assert_eq!(blend_to_sdl(mode) as i32, mode as i32);
        }
    }

    #[test]
    fn test_flip_bits() {
        use sys::SDL_RendererFlip as F;
        assert_eq!(flip_bits(Flip::NONE), F::SDL_FLIP_NONE as u32);
        assert_eq!(flip_bits(Flip::HORIZONTAL), F::SDL_FLIP_HORIZONTAL as u32);
        assert_eq!(flip_bits(Flip::VERTICAL), F::SDL_FLIP_VERTICAL as u32);
        assert_eq!(flip_bits(Flip::HORIZONTAL | Flip::VERTICAL), 3);
        assert_eq!(flip_bits(Flip::from_bits_retain(0x7)), 3);
    }
}
