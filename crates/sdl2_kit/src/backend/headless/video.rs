//! Video subsystem: driver, display, windows, renderers, textures and surfaces

use std::ptr::{self, NonNull};

use ::image::ImageFormat;

use super::image::{decode_file, encode_file};
use super::renderer::{self as render_impl, HeadlessRenderer, HeadlessTexture};
use super::surface::HeadlessSurface;
use super::window::{HeadlessWindow, DISPLAY, USABLE};
use super::{create, object, pointer, status, subsystems, with_state, Failure, Headless, Outcome, Resource};
use super::{EVENTS, VIDEO};
use crate::backend::{SurfaceInfo, Video};
use crate::foundation::geometry::{Color, FPoint, FRect, Point, Rect};
use crate::foundation::handle::NativeResource;
use crate::render::{position, BlendMode, DisplayMode, Flip, PixelFormat, RendererInfo, ScaleMode, WindowFlags};
use crate::system::messagebox::{ButtonFlags, MessageBoxData};

const DRIVER: &str = "headless";

/// Live windows and renderers of the current thread
pub(super) struct VideoState {
    next_window: u32,
    next_renderer: u32,
    pub(super) windows: Vec<NonNull<HeadlessWindow>>,
    pub(super) renderers: Vec<NonNull<HeadlessRenderer>>,
    grabbed: Option<u32>,
    yuv_mode: i32,
}

impl Default for VideoState {
    fn default() -> Self {
        Self {
            next_window: 1,
            next_renderer: 1,
            windows: Vec::new(),
            renderers: Vec::new(),
            grabbed: None,
            yuv_mode: 1,
        }
    }
}

impl VideoState {
    fn window(&self, id: u32) -> Option<NonNull<HeadlessWindow>> {
        self.windows.iter().copied().find(|&w| object(w).id() == id)
    }

    /// Forget a window that is being destroyed
    pub(super) fn unregister(&mut self, id: u32) {
        self.windows.retain(|&w| object(w).id() != id);
        if self.grabbed == Some(id) {
            self.grabbed = None;
        }
    }

    /// Detach software renderers drawing into a surface that is being freed
    pub(super) fn forget_surface(&mut self, surface: NonNull<HeadlessSurface>) {
        for &renderer in &self.renderers {
            object(renderer).forget_surface(surface);
        }
    }
}

fn require_video() -> Outcome<()> {
    if subsystems() & VIDEO == 0 {
        return Err(Failure::NotInitialized("Video"));
    }
    Ok(())
}

fn new_window(title: &str, x: i32, y: i32, w: i32, h: i32, flags: u32) -> Outcome<*mut HeadlessWindow> {
    require_video()?;
    let id = with_state(|s| s.video.next_window);
    let raw = create(Resource::Window, HeadlessWindow::new(id, title, x, y, w, h, flags)?)?;
    with_state(|s| {
        s.video.next_window += 1;
        // `create` never returns null
        s.video.windows.extend(NonNull::new(raw));
    });
    Ok(raw)
}

fn register_renderer(build: impl FnOnce(u32) -> HeadlessRenderer) -> Outcome<*mut HeadlessRenderer> {
    let id = with_state(|s| s.video.next_renderer);
    let raw = create(Resource::Renderer, build(id))?;
    with_state(|s| {
        s.video.next_renderer += 1;
        s.video.renderers.extend(NonNull::new(raw));
    });
    Ok(raw)
}

fn new_renderer(window: NonNull<HeadlessWindow>, index: i32, flags: u32) -> Outcome<*mut HeadlessRenderer> {
    if !(-1..=0).contains(&index) {
        return Err(Failure::Unsupported(format!("index must be -1 or in the range of 0 - 0, was {index}")));
    }
    let (w, h) = object(window).size();
    register_renderer(|id| HeadlessRenderer::for_window(id, w, h, flags))
}

fn display_rect(index: i32, bounds: Rect, rect: &mut Rect) -> i32 {
    if index != 0 {
        return status(Err(Failure::Unsupported(format!("displayIndex must be in the range 0 - 0, was {index}"))));
    }
    *rect = bounds;
    0
}

fn get_out<T>(result: Outcome<T>, out: &mut T) -> i32 {
    status(result.map(|value| *out = value))
}

fn new_surface(format: PixelFormat, w: i32, h: i32) -> *mut HeadlessSurface {
    pointer(HeadlessSurface::new(format, w, h).and_then(|s| create(Resource::Surface, s)))
}

/// Two surface handles as a shared and an exclusive reference
fn surface_pair<'a>(
    src: NonNull<HeadlessSurface>,
    dst: NonNull<HeadlessSurface>,
) -> Outcome<(&'a HeadlessSurface, &'a mut HeadlessSurface)> {
    if src == dst {
        return Err(Failure::Unsupported("Source and destination surfaces must differ".to_string()));
    }
    Ok((object(src), object(dst)))
}

fn texture(renderer: NonNull<HeadlessRenderer>, format: PixelFormat, access: i32, w: i32, h: i32) -> Outcome<*mut HeadlessTexture> {
    let texture = HeadlessTexture::new(object(renderer).id(), format, access, w, h)?;
    create(Resource::Texture, texture)
}

impl Video for Headless {
    type Window = HeadlessWindow;
    type Renderer = HeadlessRenderer;
    type Texture = HeadlessTexture;
    type Surface = HeadlessSurface;

    fn video_init(driver: Option<&str>) -> i32 {
        if driver.is_some_and(|d| d != DRIVER) {
            return status(Err(Failure::Unsupported(format!("{} not available", driver.unwrap_or_default()))));
        }
        with_state(|s| s.subsystems |= VIDEO | EVENTS);
        0
    }

    fn video_quit() {
        with_state(|s| s.subsystems &= !VIDEO);
    }

    fn current_video_driver() -> Option<String> {
        (subsystems() & VIDEO != 0).then(|| DRIVER.to_string())
    }

    fn num_video_drivers() -> i32 {
        1
    }

    fn video_driver(index: i32) -> Option<String> {
        (index == 0).then(|| DRIVER.to_string())
    }

    fn display_bounds(index: i32, rect: &mut Rect) -> i32 {
        display_rect(index, DISPLAY, rect)
    }

    fn display_usable_bounds(index: i32, rect: &mut Rect) -> i32 {
        display_rect(index, USABLE, rect)
    }

    fn display_orientation(index: i32) -> i32 {
        i32::from(index == 0)
    }

    fn show_simple_message_box(flags: u32, title: &str, message: &str, _parent: Option<NonNull<HeadlessWindow>>) -> i32 {
        log::info!("message box {flags:#x} '{title}': {message}");
        0
    }

    fn show_message_box(data: &MessageBoxData, _parent: Option<NonNull<HeadlessWindow>>, button_id: &mut i32) -> i32 {
        log::info!("message box '{}': {}", data.title, data.message);
        let chosen = data
            .buttons
            .iter()
            .find(|b| b.flags.contains(ButtonFlags::RETURNKEY_DEFAULT))
            .or_else(|| data.buttons.first());
        *button_id = chosen.map_or(-1, |b| b.id);
        0
    }

    fn create_window(title: &str, x: i32, y: i32, w: i32, h: i32, flags: u32) -> *mut HeadlessWindow {
        pointer(new_window(title, x, y, w, h, flags))
    }

    fn create_window_and_renderer(
        w: i32,
        h: i32,
        flags: u32,
        window: &mut *mut HeadlessWindow,
        renderer: &mut *mut HeadlessRenderer,
    ) -> i32 {
        *window = ptr::null_mut();
        *renderer = ptr::null_mut();
        let raw = match new_window("", position::UNDEFINED, position::UNDEFINED, w, h, flags) {
            Ok(raw) => raw,
            Err(e) => return status(Err(e)),
        };
        let Some(handle) = NonNull::new(raw) else {
            return -1;
        };
        match new_renderer(handle, -1, 0) {
            Ok(r) => {
                *window = raw;
                *renderer = r;
                0
            }
            Err(e) => {
                // SAFETY: `handle` was just created and nothing else refers to it
                unsafe { HeadlessWindow::release(handle) };
                status(Err(e))
            }
        }
    }

    fn window_display_index(_window: NonNull<HeadlessWindow>) -> i32 {
        0
    }

    fn window_display_mode(window: NonNull<HeadlessWindow>, mode: &mut DisplayMode) -> i32 {
        *mode = object(window).display_mode();
        0
    }

    fn set_window_display_mode(window: NonNull<HeadlessWindow>, mode: Option<&DisplayMode>) -> i32 {
        object(window).set_display_mode(mode);
        0
    }

    fn window_flags(window: NonNull<HeadlessWindow>) -> u32 {
        let window = object(window);
        let mut flags = window.flags();
        let grabbed = with_state(|s| s.video.grabbed);
        flags.set(WindowFlags::MOUSE_GRABBED, grabbed == Some(window.id()));
        flags.bits()
    }

    fn grabbed_window() -> *mut HeadlessWindow {
        with_state(|s| s.video.grabbed.and_then(|id| s.video.window(id)))
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn window_grab(window: NonNull<HeadlessWindow>) -> bool {
        let id = object(window).id();
        with_state(|s| s.video.grabbed == Some(id))
    }

    fn set_window_grab(window: NonNull<HeadlessWindow>, grabbed: bool) {
        let id = object(window).id();
        with_state(|s| {
            if grabbed {
                s.video.grabbed = Some(id);
            } else if s.video.grabbed == Some(id) {
                s.video.grabbed = None;
            }
        });
    }

    fn window_position(window: NonNull<HeadlessWindow>, x: &mut i32, y: &mut i32) {
        (*x, *y) = object(window).position();
    }

    fn set_window_position(window: NonNull<HeadlessWindow>, x: i32, y: i32) {
        object(window).set_position(x, y);
    }

    fn window_size(window: NonNull<HeadlessWindow>, w: &mut i32, h: &mut i32) {
        (*w, *h) = object(window).size();
    }

    fn set_window_size(window: NonNull<HeadlessWindow>, w: i32, h: i32) {
        object(window).set_size(w, h);
    }

    fn window_minimum_size(window: NonNull<HeadlessWindow>, w: &mut i32, h: &mut i32) {
        (*w, *h) = object(window).minimum_size();
    }

    fn set_window_minimum_size(window: NonNull<HeadlessWindow>, w: i32, h: i32) {
        object(window).set_minimum_size(w, h);
    }

    fn window_maximum_size(window: NonNull<HeadlessWindow>, w: &mut i32, h: &mut i32) {
        (*w, *h) = object(window).maximum_size();
    }

    fn set_window_maximum_size(window: NonNull<HeadlessWindow>, w: i32, h: i32) {
        object(window).set_maximum_size(w, h);
    }

    fn set_window_bordered(window: NonNull<HeadlessWindow>, bordered: bool) {
        object(window).set_flag(WindowFlags::BORDERLESS, !bordered);
    }

    fn set_window_resizable(window: NonNull<HeadlessWindow>, resizable: bool) {
        object(window).set_flag(WindowFlags::RESIZABLE, resizable);
    }

    fn window_title(window: NonNull<HeadlessWindow>) -> String {
        object(window).title().to_string()
    }

    fn set_window_title(window: NonNull<HeadlessWindow>, title: &str) {
        object(window).set_title(title);
    }

    fn set_window_icon(window: NonNull<HeadlessWindow>, _icon: NonNull<HeadlessSurface>) {
        object(window).set_icon();
    }

    fn show_window(window: NonNull<HeadlessWindow>) {
        object(window).show(true);
    }

    fn hide_window(window: NonNull<HeadlessWindow>) {
        object(window).show(false);
    }

    fn maximize_window(window: NonNull<HeadlessWindow>) {
        object(window).maximize();
    }

    fn minimize_window(window: NonNull<HeadlessWindow>) {
        object(window).minimize();
    }

    fn raise_window(window: NonNull<HeadlessWindow>) {
        object(window).set_flag(WindowFlags::INPUT_FOCUS, true);
    }

    fn restore_window(window: NonNull<HeadlessWindow>) {
        object(window).restore();
    }

    fn set_window_fullscreen(window: NonNull<HeadlessWindow>, flags: u32) -> i32 {
        status(object(window).set_fullscreen(flags))
    }

    fn window_brightness(window: NonNull<HeadlessWindow>) -> f32 {
        object(window).brightness()
    }

    fn set_window_brightness(window: NonNull<HeadlessWindow>, brightness: f32) -> i32 {
        status(object(window).set_brightness(brightness))
    }

    fn window_opacity(window: NonNull<HeadlessWindow>, opacity: &mut f32) -> i32 {
        *opacity = object(window).opacity();
        0
    }

    fn set_window_opacity(window: NonNull<HeadlessWindow>, opacity: f32) -> i32 {
        object(window).set_opacity(opacity);
        0
    }

    fn set_window_modal_for(modal: NonNull<HeadlessWindow>, parent: NonNull<HeadlessWindow>) -> i32 {
        if modal == parent {
            return status(Err(Failure::InvalidParam("parent_window")));
        }
        let parent = object(parent).id();
        object(modal).set_modal_for(parent);
        0
    }

    fn set_window_input_focus(window: NonNull<HeadlessWindow>) -> i32 {
        let window = object(window);
        if !window.flags().contains(WindowFlags::SHOWN) {
            return status(Err(Failure::Unsupported("Window is not visible".to_string())));
        }
        window.set_flag(WindowFlags::INPUT_FOCUS, true);
        0
    }

    fn window_from_id(id: u32) -> *mut HeadlessWindow {
        with_state(|s| s.video.window(id)).map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn window_id(window: NonNull<HeadlessWindow>) -> u32 {
        object(window).id()
    }

    fn window_surface(window: NonNull<HeadlessWindow>) -> *mut HeadlessSurface {
        pointer(object(window).surface().map(ptr::from_mut))
    }

    fn update_window_surface(window: NonNull<HeadlessWindow>) -> i32 {
        Self::update_window_surface_rects(window, &[])
    }

    fn update_window_surface_rects(window: NonNull<HeadlessWindow>, _rects: &[Rect]) -> i32 {
        if object(window).has_surface() {
            0
        } else {
            status(Err(Failure::Unsupported("Window surface is invalid, please call SDL_GetWindowSurface() to get a new surface".to_string())))
        }
    }

    fn num_render_drivers() -> i32 {
        1
    }

    fn render_driver_info(index: i32, info: &mut RendererInfo) -> i32 {
        if index != 0 {
            return status(Err(Failure::Unsupported(format!("index must be in the range of 0 - 0, was {index}"))));
        }
        *info = render_impl::driver_info();
        0
    }

    fn create_renderer(window: NonNull<HeadlessWindow>, index: i32, flags: u32) -> *mut HeadlessRenderer {
        pointer(new_renderer(window, index, flags))
    }

    fn create_software_renderer(surface: NonNull<HeadlessSurface>) -> *mut HeadlessRenderer {
        pointer(register_renderer(|id| HeadlessRenderer::for_surface(id, surface)))
    }

    fn renderer_info(renderer: NonNull<HeadlessRenderer>, info: &mut RendererInfo) -> i32 {
        *info = object(renderer).info();
        0
    }

    fn renderer_output_size(renderer: NonNull<HeadlessRenderer>, w: &mut i32, h: &mut i32) -> i32 {
        let mut size = (0, 0);
        let code = get_out(object(renderer).output_size(), &mut size);
        (*w, *h) = size;
        code
    }

    fn render_target_supported(_renderer: NonNull<HeadlessRenderer>) -> bool {
        true
    }

    fn render_target(renderer: NonNull<HeadlessRenderer>) -> *mut HeadlessTexture {
        object(renderer).target().map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    fn set_render_target(renderer: NonNull<HeadlessRenderer>, texture: Option<NonNull<HeadlessTexture>>) -> i32 {
        status(object(renderer).set_target(texture))
    }

    fn render_logical_size(renderer: NonNull<HeadlessRenderer>, w: &mut i32, h: &mut i32) {
        (*w, *h) = object(renderer).logical_size();
    }

    fn set_render_logical_size(renderer: NonNull<HeadlessRenderer>, w: i32, h: i32) -> i32 {
        status(object(renderer).set_logical_size(w, h))
    }

    fn render_integer_scale(renderer: NonNull<HeadlessRenderer>) -> bool {
        object(renderer).integer_scale()
    }

    fn set_render_integer_scale(renderer: NonNull<HeadlessRenderer>, enable: bool) -> i32 {
        object(renderer).set_integer_scale(enable);
        0
    }

    fn render_viewport(renderer: NonNull<HeadlessRenderer>, rect: &mut Rect) {
        *rect = object(renderer).viewport();
    }

    fn set_render_viewport(renderer: NonNull<HeadlessRenderer>, rect: Option<&Rect>) -> i32 {
        object(renderer).set_viewport(rect);
        0
    }

    fn render_clip_rect(renderer: NonNull<HeadlessRenderer>, rect: &mut Rect) {
        *rect = object(renderer).clip();
    }

    fn set_render_clip_rect(renderer: NonNull<HeadlessRenderer>, rect: Option<&Rect>) -> i32 {
        object(renderer).set_clip(rect);
        0
    }

    fn render_clip_enabled(renderer: NonNull<HeadlessRenderer>) -> bool {
        object(renderer).clip_enabled()
    }

    fn render_scale(renderer: NonNull<HeadlessRenderer>, x: &mut f32, y: &mut f32) {
        (*x, *y) = object(renderer).scale();
    }

    fn set_render_scale(renderer: NonNull<HeadlessRenderer>, x: f32, y: f32) -> i32 {
        status(object(renderer).set_scale(x, y))
    }

    fn render_draw_color(renderer: NonNull<HeadlessRenderer>, color: &mut Color) -> i32 {
        *color = object(renderer).color();
        0
    }

    fn set_render_draw_color(renderer: NonNull<HeadlessRenderer>, color: Color) -> i32 {
        object(renderer).set_color(color);
        0
    }

    fn render_draw_blend_mode(renderer: NonNull<HeadlessRenderer>, mode: &mut BlendMode) -> i32 {
        *mode = object(renderer).blend_mode();
        0
    }

    fn set_render_draw_blend_mode(renderer: NonNull<HeadlessRenderer>, mode: BlendMode) -> i32 {
        status(object(renderer).set_blend_mode(mode))
    }

    fn render_draw_point(renderer: NonNull<HeadlessRenderer>, x: i32, y: i32) -> i32 {
        status(object(renderer).points([(x as f32, y as f32)]))
    }

    fn render_draw_point_f(renderer: NonNull<HeadlessRenderer>, x: f32, y: f32) -> i32 {
        status(object(renderer).points([(x.trunc(), y.trunc())]))
    }

    fn render_draw_points(renderer: NonNull<HeadlessRenderer>, points: &[Point]) -> i32 {
        status(object(renderer).points(points.iter().map(|p| (p.x as f32, p.y as f32))))
    }

    fn render_draw_line(renderer: NonNull<HeadlessRenderer>, x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
        status(object(renderer).polyline(&[(x1, y1), (x2, y2)]))
    }

    fn render_draw_line_f(renderer: NonNull<HeadlessRenderer>, x1: f32, y1: f32, x2: f32, y2: f32) -> i32 {
        let points = [(x1 as i32, y1 as i32), (x2 as i32, y2 as i32)];
        status(object(renderer).polyline(&points))
    }

    fn render_draw_lines(renderer: NonNull<HeadlessRenderer>, points: &[Point]) -> i32 {
        let points: Vec<(i32, i32)> = points.iter().map(|p| (p.x, p.y)).collect();
        status(object(renderer).polyline(&points))
    }

    fn render_draw_rect(renderer: NonNull<HeadlessRenderer>, rect: &Rect) -> i32 {
        status(object(renderer).outline(rect))
    }

    fn render_draw_rect_f(renderer: NonNull<HeadlessRenderer>, rect: &FRect) -> i32 {
        let rect = Rect::new(rect.x as i32, rect.y as i32, rect.w as i32, rect.h as i32);
        status(object(renderer).outline(&rect))
    }

    fn render_draw_rects(renderer: NonNull<HeadlessRenderer>, rects: &[Rect]) -> i32 {
        let renderer = object(renderer);
        status(rects.iter().try_for_each(|r| renderer.outline(r)))
    }

    fn render_fill_rect(renderer: NonNull<HeadlessRenderer>, rect: Option<&Rect>) -> i32 {
        let area = rect.map(|r| [(r.x as f32, r.y as f32, r.w as f32, r.h as f32)]);
        status(object(renderer).fill(area.as_ref().map(|a| &a[..])))
    }

    fn render_fill_rect_f(renderer: NonNull<HeadlessRenderer>, rect: Option<&FRect>) -> i32 {
        let area = rect.map(|r| [(r.x, r.y, r.w, r.h)]);
        status(object(renderer).fill(area.as_ref().map(|a| &a[..])))
    }

    fn render_fill_rects(renderer: NonNull<HeadlessRenderer>, rects: &[Rect]) -> i32 {
        let areas: Vec<_> = rects.iter().map(|r| (r.x as f32, r.y as f32, r.w as f32, r.h as f32)).collect();
        status(object(renderer).fill(Some(&areas[..])))
    }

    fn render_copy(
        renderer: NonNull<HeadlessRenderer>,
        texture: NonNull<HeadlessTexture>,
        src: Option<&Rect>,
        _dst: Option<&Rect>,
    ) -> i32 {
        status(object(renderer).copy(texture, src))
    }

    fn render_copy_f(
        renderer: NonNull<HeadlessRenderer>,
        texture: NonNull<HeadlessTexture>,
        src: Option<&Rect>,
        _dst: Option<&FRect>,
    ) -> i32 {
        status(object(renderer).copy(texture, src))
    }

    fn render_copy_ex(
        renderer: NonNull<HeadlessRenderer>,
        texture: NonNull<HeadlessTexture>,
        src: Option<&Rect>,
        _dst: Option<&Rect>,
        _angle: f64,
        _center: Option<&Point>,
        _flip: Flip,
    ) -> i32 {
        status(object(renderer).copy(texture, src))
    }

    fn render_copy_ex_f(
        renderer: NonNull<HeadlessRenderer>,
        texture: NonNull<HeadlessTexture>,
        src: Option<&Rect>,
        _dst: Option<&FRect>,
        _angle: f64,
        _center: Option<&FPoint>,
        _flip: Flip,
    ) -> i32 {
        status(object(renderer).copy(texture, src))
    }

    fn render_read_pixels(
        renderer: NonNull<HeadlessRenderer>,
        rect: Option<&Rect>,
        format: u32,
        pixels: &mut [u8],
        pitch: i32,
    ) -> i32 {
        status(object(renderer).read_pixels(rect, PixelFormat::from(format), pixels, pitch))
    }

    fn render_clear(renderer: NonNull<HeadlessRenderer>) -> i32 {
        status(object(renderer).clear())
    }

    fn render_present(renderer: NonNull<HeadlessRenderer>) {
        object(renderer).present();
    }

    fn render_flush(_renderer: NonNull<HeadlessRenderer>) -> i32 {
        0
    }

    fn create_texture(renderer: NonNull<HeadlessRenderer>, format: u32, access: i32, w: i32, h: i32) -> *mut HeadlessTexture {
        pointer(texture(renderer, PixelFormat::from(format), access, w, h))
    }

    fn create_texture_from_surface(renderer: NonNull<HeadlessRenderer>, surface: NonNull<HeadlessSurface>) -> *mut HeadlessTexture {
        let id = object(renderer).id();
        pointer(HeadlessTexture::from_surface(id, object(surface)).and_then(|t| create(Resource::Texture, t)))
    }

    fn query_texture(texture: NonNull<HeadlessTexture>, format: &mut u32, access: &mut i32, w: &mut i32, h: &mut i32) -> i32 {
        let (f, a, width, height) = object(texture).query();
        *format = f.bits();
        *access = a as i32;
        (*w, *h) = (width, height);
        0
    }

    fn update_texture(texture: NonNull<HeadlessTexture>, rect: Option<&Rect>, pixels: &[u8], pitch: i32) -> i32 {
        status(object(texture).update(rect, pixels, pitch))
    }

    fn update_yuv_texture(
        texture: NonNull<HeadlessTexture>,
        rect: Option<&Rect>,
        y_plane: &[u8],
        y_pitch: i32,
        u_plane: &[u8],
        u_pitch: i32,
        v_plane: &[u8],
        v_pitch: i32,
    ) -> i32 {
        status(object(texture).update_yuv(rect, (y_plane, y_pitch), (u_plane, u_pitch), (v_plane, v_pitch)))
    }

    fn lock_texture(texture: NonNull<HeadlessTexture>, rect: Option<&Rect>, pixels: &mut *mut u8, pitch: &mut i32) -> i32 {
        match object(texture).lock(rect) {
            Ok((first, row)) => {
                *pixels = first;
                *pitch = row;
                0
            }
            Err(e) => status(Err(e)),
        }
    }

    fn unlock_texture(texture: NonNull<HeadlessTexture>) {
        object(texture).unlock();
    }

    fn texture_blend_mode(texture: NonNull<HeadlessTexture>, mode: &mut BlendMode) -> i32 {
        *mode = object(texture).blend_mode();
        0
    }

    fn set_texture_blend_mode(texture: NonNull<HeadlessTexture>, mode: BlendMode) -> i32 {
        status(object(texture).set_blend_mode(mode))
    }

    fn texture_scale_mode(texture: NonNull<HeadlessTexture>, mode: &mut ScaleMode) -> i32 {
        *mode = object(texture).scale_mode();
        0
    }

    fn set_texture_scale_mode(texture: NonNull<HeadlessTexture>, mode: ScaleMode) -> i32 {
        object(texture).set_scale_mode(mode);
        0
    }

    fn texture_color_mod(texture: NonNull<HeadlessTexture>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32 {
        (*r, *g, *b) = object(texture).color_mod();
        0
    }

    fn set_texture_color_mod(texture: NonNull<HeadlessTexture>, r: u8, g: u8, b: u8) -> i32 {
        object(texture).set_color_mod(r, g, b);
        0
    }

    fn texture_alpha_mod(texture: NonNull<HeadlessTexture>, alpha: &mut u8) -> i32 {
        *alpha = object(texture).alpha_mod();
        0
    }

    fn set_texture_alpha_mod(texture: NonNull<HeadlessTexture>, alpha: u8) -> i32 {
        object(texture).set_alpha_mod(alpha);
        0
    }

    fn create_rgb_surface(_flags: u32, w: i32, h: i32, depth: i32, [r, g, b, a]: [u32; 4]) -> *mut HeadlessSurface {
        let format = PixelFormat::from_masks(depth, r, g, b, a);
        if format == PixelFormat::UNKNOWN {
            return pointer(Err(Failure::Unsupported("Unknown pixel format".to_string())));
        }
        new_surface(format, w, h)
    }

    fn create_rgb_surface_with_format(_flags: u32, w: i32, h: i32, _depth: i32, format: u32) -> *mut HeadlessSurface {
        new_surface(PixelFormat::from(format), w, h)
    }

    fn load_bmp(path: &str) -> *mut HeadlessSurface {
        pointer(decode_file(path, Some(ImageFormat::Bmp)).and_then(|s| create(Resource::Surface, s)))
    }

    fn save_bmp(surface: NonNull<HeadlessSurface>, path: &str) -> i32 {
        status(encode_file(object(surface), path, ImageFormat::Bmp))
    }

    fn surface_info(surface: NonNull<HeadlessSurface>) -> SurfaceInfo {
        let surface = object(surface);
        let (w, h) = surface.size();
        SurfaceInfo {
            flags: surface.flags(),
            format: surface.format().bits(),
            w,
            h,
            pitch: surface.pitch() as i32,
        }
    }

    fn surface_pixels(surface: NonNull<HeadlessSurface>) -> *mut u8 {
        object(surface).pixels_ptr()
    }

    fn lock_surface(surface: NonNull<HeadlessSurface>) -> i32 {
        object(surface).lock();
        0
    }

    fn unlock_surface(surface: NonNull<HeadlessSurface>) {
        object(surface).unlock();
    }

    fn set_surface_rle(surface: NonNull<HeadlessSurface>, enable: bool) -> i32 {
        object(surface).set_rle(enable);
        0
    }

    fn set_color_key(surface: NonNull<HeadlessSurface>, enable: bool, key: u32) -> i32 {
        object(surface).set_color_key(enable.then_some(key));
        0
    }

    fn has_color_key(surface: NonNull<HeadlessSurface>) -> bool {
        object(surface).color_key().is_some()
    }

    fn color_key(surface: NonNull<HeadlessSurface>, key: &mut u32) -> i32 {
        match object(surface).color_key() {
            Some(k) => {
                *key = k;
                0
            }
            None => status(Err(Failure::Unsupported("Surface doesn't have a colorkey".to_string()))),
        }
    }

    fn set_surface_color_mod(surface: NonNull<HeadlessSurface>, r: u8, g: u8, b: u8) -> i32 {
        object(surface).set_color_mod(r, g, b);
        0
    }

    fn surface_color_mod(surface: NonNull<HeadlessSurface>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32 {
        (*r, *g, *b) = object(surface).color_mod();
        0
    }

    fn set_surface_alpha_mod(surface: NonNull<HeadlessSurface>, alpha: u8) -> i32 {
        object(surface).set_alpha_mod(alpha);
        0
    }

    fn surface_alpha_mod(surface: NonNull<HeadlessSurface>, alpha: &mut u8) -> i32 {
        *alpha = object(surface).alpha_mod();
        0
    }

    fn set_surface_blend_mode(surface: NonNull<HeadlessSurface>, mode: BlendMode) -> i32 {
        status(object(surface).set_blend_mode(mode))
    }

    fn surface_blend_mode(surface: NonNull<HeadlessSurface>, mode: &mut BlendMode) -> i32 {
        *mode = object(surface).blend_mode();
        0
    }

    fn set_clip_rect(surface: NonNull<HeadlessSurface>, rect: Option<&Rect>) -> bool {
        object(surface).set_clip(rect)
    }

    fn clip_rect(surface: NonNull<HeadlessSurface>, rect: &mut Rect) {
        *rect = object(surface).clip();
    }

    fn duplicate_surface(surface: NonNull<HeadlessSurface>) -> *mut HeadlessSurface {
        pointer(create(Resource::Surface, object(surface).duplicate()))
    }

    fn convert_surface_format(surface: NonNull<HeadlessSurface>, format: u32) -> *mut HeadlessSurface {
        pointer(object(surface).convert(PixelFormat::from(format)).and_then(|s| create(Resource::Surface, s)))
    }

    fn fill_rect(surface: NonNull<HeadlessSurface>, rect: Option<&Rect>, color: u32) -> i32 {
        object(surface).fill(rect, color);
        0
    }

    fn fill_rects(surface: NonNull<HeadlessSurface>, rects: &[Rect], color: u32) -> i32 {
        let surface = object(surface);
        for rect in rects {
            surface.fill(Some(rect), color);
        }
        0
    }

    fn blit_surface(
        src: NonNull<HeadlessSurface>,
        src_rect: Option<&Rect>,
        dst: NonNull<HeadlessSurface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32 {
        let at = dst_rect.as_ref().map_or((0, 0), |r| (r.x, r.y));
        let written = surface_pair(src, dst).and_then(|(src, dst)| src.blit(src_rect, dst, at));
        match written {
            Ok(area) => {
                if let Some(out) = dst_rect {
                    *out = area;
                }
                0
            }
            Err(e) => status(Err(e)),
        }
    }

    fn blit_scaled(
        src: NonNull<HeadlessSurface>,
        src_rect: Option<&Rect>,
        dst: NonNull<HeadlessSurface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32 {
        let target = dst_rect.as_ref().map(|r| **r);
        let written = surface_pair(src, dst).and_then(|(src, dst)| src.blit_scaled(src_rect, dst, target.as_ref()));
        match written {
            Ok(area) => {
                if let Some(out) = dst_rect {
                    *out = area;
                }
                0
            }
            Err(e) => status(Err(e)),
        }
    }

    fn soft_stretch(
        src: NonNull<HeadlessSurface>,
        src_rect: Option<&Rect>,
        dst: NonNull<HeadlessSurface>,
        dst_rect: Option<&Rect>,
    ) -> i32 {
        status(surface_pair(src, dst).and_then(|(src, dst)| src.stretch(src_rect, dst, dst_rect)))
    }

    fn set_yuv_conversion_mode(mode: i32) {
        with_state(|s| s.video.yuv_mode = mode);
    }

    fn yuv_conversion_mode() -> i32 {
        with_state(|s| s.video.yuv_mode)
    }

    fn yuv_conversion_mode_for_resolution(_w: i32, h: i32) -> i32 {
        match Self::yuv_conversion_mode() {
            3 if h <= 576 => 1,
            3 => 2,
            mode => mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Core;
    use crate::backend::headless::{count, journal, reset, Call};

    #[test]
    fn test_windows_need_video() {
        reset();
        assert!(Headless::create_window("w", 0, 0, 4, 4, 0).is_null());
        assert!(Headless::last_error().contains("Video"));
        assert_eq!(count(&Call::Create(Resource::Window)), 0);
    }

    #[test]
    fn test_window_ids_and_lookup() {
        reset();
        assert_eq!(Headless::init(VIDEO), 0);
        let first = NonNull::new(Headless::create_window("a", 0, 0, 4, 4, 0)).unwrap();
        let second = NonNull::new(Headless::create_window("b", 0, 0, 4, 4, 0)).unwrap();
        assert_eq!(Headless::window_id(first), 1);
        assert_eq!(Headless::window_from_id(2), second.as_ptr());

        Headless::set_window_grab(second, true);
        assert_eq!(Headless::grabbed_window(), second.as_ptr());
        assert_ne!(Headless::window_flags(second) & WindowFlags::MOUSE_GRABBED.bits(), 0);
        // SAFETY: both windows were created above and are released once
        unsafe {
            HeadlessWindow::release(second);
            HeadlessWindow::release(first);
        }
        assert!(Headless::grabbed_window().is_null());
        assert!(Headless::window_from_id(1).is_null());
    }

    #[test]
    fn test_software_renderer_outlives_surface() {
        reset();
        let surface = NonNull::new(new_surface(PixelFormat::ARGB8888, 2, 2)).unwrap();
        let renderer = NonNull::new(Headless::create_software_renderer(surface)).unwrap();
        // SAFETY: created above, released once
        unsafe { HeadlessSurface::release(surface) };
        assert_ne!(Headless::render_clear(renderer), 0);
        // SAFETY: created above, released once
        unsafe { HeadlessRenderer::release(renderer) };
        assert_eq!(journal().len(), 4);
    }

    #[test]
    fn test_video_init_checks_driver() {
        reset();
        assert_ne!(Headless::video_init(Some("x11")), 0);
        assert_eq!(Headless::video_init(None), 0);
        assert_eq!(Headless::current_video_driver().as_deref(), Some("headless"));
        Headless::video_quit();
        assert_eq!(Headless::current_video_driver(), None);
    }
}
