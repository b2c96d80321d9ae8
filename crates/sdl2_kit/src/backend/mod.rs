//! Native library seam
//!
//! Each trait family groups the native calls one wrapper module needs. All
//! functions are associated functions because the native library is a single
//! process-wide instance. Arguments and results follow the native conventions
//! (status integers, null pointers, out-parameters) so that the wrappers own
//! the translation into `bool`/`Option`.
//!
//! Two implementations exist: [`sdl::Sdl`] calls the real library through
//! `sdl2-sys`, [`headless::Headless`] is an in-process stand-in used by tests
//! and by hosts without a display or audio device.

use std::ptr::NonNull;

use crate::foundation::geometry::{Color, FPoint, FRect, Point, Rect};
use crate::foundation::handle::NativeResource;
use crate::render::{BlendMode, DisplayMode, Flip, RendererInfo, ScaleMode};
use crate::system::messagebox::MessageBoxData;

pub mod headless;
#[cfg(feature = "sdl")]
pub mod sdl;

/// Snapshot of the public fields of a native surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceInfo {
    /// Surface flags
    pub flags: u32,
    /// Pixel format enum value
    pub format: u32,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
    /// Bytes per row
    pub pitch: i32,
}

/// Glyph rendering quality, mirroring the three native render entry points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRender {
    /// Fast, 8-bit, transparent background
    Solid(Color),
    /// Antialiased onto an opaque background color
    Shaded(Color, Color),
    /// Antialiased with alpha
    Blended(Color),
}

/// Library wide calls: subsystem init and process level queries
pub trait Core: 'static {
    /// `SDL_Init`
    fn init(flags: u32) -> i32;
    /// `SDL_InitSubSystem`
    fn init_subsystem(flags: u32) -> i32;
    /// `SDL_WasInit`
    fn was_init(flags: u32) -> u32;
    /// `SDL_QuitSubSystem`
    fn quit_subsystem(flags: u32);
    /// `SDL_Quit`
    fn quit();
    /// `SDL_GetError`
    fn last_error() -> String;
    /// `SDL_ClearError`
    fn clear_error();
    /// `SDL_GetPlatform`
    fn platform() -> String;
    /// `SDL_GetPowerInfo`
    fn power_info(seconds: &mut i32, percent: &mut i32) -> i32;
    /// `SDL_GetPrefPath`
    fn pref_path(org: &str, app: &str) -> Option<String>;
    /// `SDL_GetBasePath`
    fn base_path() -> Option<String>;
}

/// Video, window, renderer, texture and surface calls
pub trait Video: Core {
    /// Native window
    type Window: NativeResource;
    /// Native renderer
    type Renderer: NativeResource;
    /// Native texture
    type Texture: NativeResource;
    /// Native surface
    type Surface: NativeResource;

    // Video driver and displays

    /// `SDL_VideoInit`
    fn video_init(driver: Option<&str>) -> i32;
    /// `SDL_VideoQuit`
    fn video_quit();
    /// `SDL_GetCurrentVideoDriver`
    fn current_video_driver() -> Option<String>;
    /// `SDL_GetNumVideoDrivers`
    fn num_video_drivers() -> i32;
    /// `SDL_GetVideoDriver`
    fn video_driver(index: i32) -> Option<String>;
    /// `SDL_GetDisplayBounds`
    fn display_bounds(index: i32, rect: &mut Rect) -> i32;
    /// `SDL_GetDisplayUsableBounds`
    fn display_usable_bounds(index: i32, rect: &mut Rect) -> i32;
    /// `SDL_GetDisplayOrientation`
    fn display_orientation(index: i32) -> i32;

    // Message boxes

    /// `SDL_ShowSimpleMessageBox`
    fn show_simple_message_box(flags: u32, title: &str, message: &str, parent: Option<NonNull<Self::Window>>) -> i32;
    /// `SDL_ShowMessageBox`
    fn show_message_box(data: &MessageBoxData, parent: Option<NonNull<Self::Window>>, button_id: &mut i32) -> i32;

    // Windows

    /// `SDL_CreateWindow`
    fn create_window(title: &str, x: i32, y: i32, w: i32, h: i32, flags: u32) -> *mut Self::Window;
    /// `SDL_CreateWindowAndRenderer`
    fn create_window_and_renderer(
        w: i32,
        h: i32,
        flags: u32,
        window: &mut *mut Self::Window,
        renderer: &mut *mut Self::Renderer,
    ) -> i32;
    /// `SDL_GetWindowDisplayIndex`
    fn window_display_index(window: NonNull<Self::Window>) -> i32;
    /// `SDL_GetWindowDisplayMode`
    fn window_display_mode(window: NonNull<Self::Window>, mode: &mut DisplayMode) -> i32;
    /// `SDL_SetWindowDisplayMode`
    fn set_window_display_mode(window: NonNull<Self::Window>, mode: Option<&DisplayMode>) -> i32;
    /// `SDL_GetWindowFlags`
    fn window_flags(window: NonNull<Self::Window>) -> u32;
    /// `SDL_GetGrabbedWindow`
    fn grabbed_window() -> *mut Self::Window;
    /// `SDL_GetWindowGrab`
    fn window_grab(window: NonNull<Self::Window>) -> bool;
    /// `SDL_SetWindowGrab`
    fn set_window_grab(window: NonNull<Self::Window>, grabbed: bool);
    /// `SDL_GetWindowPosition`
    fn window_position(window: NonNull<Self::Window>, x: &mut i32, y: &mut i32);
    /// `SDL_SetWindowPosition`
    fn set_window_position(window: NonNull<Self::Window>, x: i32, y: i32);
    /// `SDL_GetWindowSize`
    fn window_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32);
    /// `SDL_SetWindowSize`
    fn set_window_size(window: NonNull<Self::Window>, w: i32, h: i32);
    /// `SDL_GetWindowMinimumSize`
    fn window_minimum_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32);
    /// `SDL_SetWindowMinimumSize`
    fn set_window_minimum_size(window: NonNull<Self::Window>, w: i32, h: i32);
    /// `SDL_GetWindowMaximumSize`
    fn window_maximum_size(window: NonNull<Self::Window>, w: &mut i32, h: &mut i32);
    /// `SDL_SetWindowMaximumSize`
    fn set_window_maximum_size(window: NonNull<Self::Window>, w: i32, h: i32);
    /// `SDL_SetWindowBordered`
    fn set_window_bordered(window: NonNull<Self::Window>, bordered: bool);
    /// `SDL_SetWindowResizable`
    fn set_window_resizable(window: NonNull<Self::Window>, resizable: bool);
    /// `SDL_GetWindowTitle`
    fn window_title(window: NonNull<Self::Window>) -> String;
    /// `SDL_SetWindowTitle`
    fn set_window_title(window: NonNull<Self::Window>, title: &str);
    /// `SDL_SetWindowIcon`
    fn set_window_icon(window: NonNull<Self::Window>, icon: NonNull<Self::Surface>);
    /// `SDL_ShowWindow`
    fn show_window(window: NonNull<Self::Window>);
    /// `SDL_HideWindow`
    fn hide_window(window: NonNull<Self::Window>);
    /// `SDL_MaximizeWindow`
    fn maximize_window(window: NonNull<Self::Window>);
    /// `SDL_MinimizeWindow`
    fn minimize_window(window: NonNull<Self::Window>);
    /// `SDL_RaiseWindow`
    fn raise_window(window: NonNull<Self::Window>);
    /// `SDL_RestoreWindow`
    fn restore_window(window: NonNull<Self::Window>);
    /// `SDL_SetWindowFullscreen`
    fn set_window_fullscreen(window: NonNull<Self::Window>, flags: u32) -> i32;
    /// `SDL_GetWindowBrightness`
    fn window_brightness(window: NonNull<Self::Window>) -> f32;
    /// `SDL_SetWindowBrightness`
    fn set_window_brightness(window: NonNull<Self::Window>, brightness: f32) -> i32;
    /// `SDL_GetWindowOpacity`
    fn window_opacity(window: NonNull<Self::Window>, opacity: &mut f32) -> i32;
    /// `SDL_SetWindowOpacity`
    fn set_window_opacity(window: NonNull<Self::Window>, opacity: f32) -> i32;
    /// `SDL_SetWindowModalFor`
    fn set_window_modal_for(modal: NonNull<Self::Window>, parent: NonNull<Self::Window>) -> i32;
    /// `SDL_SetWindowInputFocus`
    fn set_window_input_focus(window: NonNull<Self::Window>) -> i32;
    /// `SDL_GetWindowFromID`
    fn window_from_id(id: u32) -> *mut Self::Window;
    /// `SDL_GetWindowID`
    fn window_id(window: NonNull<Self::Window>) -> u32;
    /// `SDL_GetWindowSurface`
    fn window_surface(window: NonNull<Self::Window>) -> *mut Self::Surface;
    /// `SDL_UpdateWindowSurface`
    fn update_window_surface(window: NonNull<Self::Window>) -> i32;
    /// `SDL_UpdateWindowSurfaceRects`
    fn update_window_surface_rects(window: NonNull<Self::Window>, rects: &[Rect]) -> i32;

    // Renderers

    /// `SDL_GetNumRenderDrivers`
    fn num_render_drivers() -> i32;
    /// `SDL_GetRenderDriverInfo`
    fn render_driver_info(index: i32, info: &mut RendererInfo) -> i32;
    /// `SDL_CreateRenderer`
    fn create_renderer(window: NonNull<Self::Window>, index: i32, flags: u32) -> *mut Self::Renderer;
    /// `SDL_CreateSoftwareRenderer`
    fn create_software_renderer(surface: NonNull<Self::Surface>) -> *mut Self::Renderer;
    /// `SDL_GetRendererInfo`
    fn renderer_info(renderer: NonNull<Self::Renderer>, info: &mut RendererInfo) -> i32;
    /// `SDL_GetRendererOutputSize`
    fn renderer_output_size(renderer: NonNull<Self::Renderer>, w: &mut i32, h: &mut i32) -> i32;
    /// `SDL_RenderTargetSupported`
    fn render_target_supported(renderer: NonNull<Self::Renderer>) -> bool;
    /// `SDL_GetRenderTarget`
    fn render_target(renderer: NonNull<Self::Renderer>) -> *mut Self::Texture;
    /// `SDL_SetRenderTarget`
    fn set_render_target(renderer: NonNull<Self::Renderer>, texture: Option<NonNull<Self::Texture>>) -> i32;
    /// `SDL_RenderGetLogicalSize`
    fn render_logical_size(renderer: NonNull<Self::Renderer>, w: &mut i32, h: &mut i32);
    /// `SDL_RenderSetLogicalSize`
    fn set_render_logical_size(renderer: NonNull<Self::Renderer>, w: i32, h: i32) -> i32;
    /// `SDL_RenderGetIntegerScale`
    fn render_integer_scale(renderer: NonNull<Self::Renderer>) -> bool;
    /// `SDL_RenderSetIntegerScale`
    fn set_render_integer_scale(renderer: NonNull<Self::Renderer>, enable: bool) -> i32;
    /// `SDL_RenderGetViewport`
    fn render_viewport(renderer: NonNull<Self::Renderer>, rect: &mut Rect);
    /// `SDL_RenderSetViewport`
    fn set_render_viewport(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32;
    /// `SDL_RenderGetClipRect`
    fn render_clip_rect(renderer: NonNull<Self::Renderer>, rect: &mut Rect);
    /// `SDL_RenderSetClipRect`
    fn set_render_clip_rect(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32;
    /// `SDL_RenderIsClipEnabled`
    fn render_clip_enabled(renderer: NonNull<Self::Renderer>) -> bool;
    /// `SDL_RenderGetScale`
    fn render_scale(renderer: NonNull<Self::Renderer>, x: &mut f32, y: &mut f32);
    /// `SDL_RenderSetScale`
    fn set_render_scale(renderer: NonNull<Self::Renderer>, x: f32, y: f32) -> i32;
    /// `SDL_GetRenderDrawColor`
    fn render_draw_color(renderer: NonNull<Self::Renderer>, color: &mut Color) -> i32;
    /// `SDL_SetRenderDrawColor`
    fn set_render_draw_color(renderer: NonNull<Self::Renderer>, color: Color) -> i32;
    /// `SDL_GetRenderDrawBlendMode`
    fn render_draw_blend_mode(renderer: NonNull<Self::Renderer>, mode: &mut BlendMode) -> i32;
    /// `SDL_SetRenderDrawBlendMode`
    fn set_render_draw_blend_mode(renderer: NonNull<Self::Renderer>, mode: BlendMode) -> i32;
    /// `SDL_RenderDrawPoint`
    fn render_draw_point(renderer: NonNull<Self::Renderer>, x: i32, y: i32) -> i32;
    /// `SDL_RenderDrawPointF`
    fn render_draw_point_f(renderer: NonNull<Self::Renderer>, x: f32, y: f32) -> i32;
    /// `SDL_RenderDrawPoints`
    fn render_draw_points(renderer: NonNull<Self::Renderer>, points: &[Point]) -> i32;
    /// `SDL_RenderDrawLine`
    fn render_draw_line(renderer: NonNull<Self::Renderer>, x1: i32, y1: i32, x2: i32, y2: i32) -> i32;
    /// `SDL_RenderDrawLineF`
    fn render_draw_line_f(renderer: NonNull<Self::Renderer>, x1: f32, y1: f32, x2: f32, y2: f32) -> i32;
    /// `SDL_RenderDrawLines`
    fn render_draw_lines(renderer: NonNull<Self::Renderer>, points: &[Point]) -> i32;
    /// `SDL_RenderDrawRect`
    fn render_draw_rect(renderer: NonNull<Self::Renderer>, rect: &Rect) -> i32;
    /// `SDL_RenderDrawRectF`
    fn render_draw_rect_f(renderer: NonNull<Self::Renderer>, rect: &FRect) -> i32;
    /// `SDL_RenderDrawRects`
    fn render_draw_rects(renderer: NonNull<Self::Renderer>, rects: &[Rect]) -> i32;
    /// `SDL_RenderFillRect`
    fn render_fill_rect(renderer: NonNull<Self::Renderer>, rect: Option<&Rect>) -> i32;
    /// `SDL_RenderFillRectF`
    fn render_fill_rect_f(renderer: NonNull<Self::Renderer>, rect: Option<&FRect>) -> i32;
    /// `SDL_RenderFillRects`
    fn render_fill_rects(renderer: NonNull<Self::Renderer>, rects: &[Rect]) -> i32;
    /// `SDL_RenderCopy`
    fn render_copy(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
    ) -> i32;
    /// `SDL_RenderCopyF`
    fn render_copy_f(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&FRect>,
    ) -> i32;
    /// `SDL_RenderCopyEx`
    fn render_copy_ex(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&Rect>,
        angle: f64,
        center: Option<&Point>,
        flip: Flip,
    ) -> i32;
    /// `SDL_RenderCopyExF`
    fn render_copy_ex_f(
        renderer: NonNull<Self::Renderer>,
        texture: NonNull<Self::Texture>,
        src: Option<&Rect>,
        dst: Option<&FRect>,
        angle: f64,
        center: Option<&FPoint>,
        flip: Flip,
    ) -> i32;
    /// `SDL_RenderReadPixels`
    fn render_read_pixels(
        renderer: NonNull<Self::Renderer>,
        rect: Option<&Rect>,
        format: u32,
        pixels: &mut [u8],
        pitch: i32,
    ) -> i32;
    /// `SDL_RenderClear`
    fn render_clear(renderer: NonNull<Self::Renderer>) -> i32;
    /// `SDL_RenderPresent`
    fn render_present(renderer: NonNull<Self::Renderer>);
    /// `SDL_RenderFlush`
    fn render_flush(renderer: NonNull<Self::Renderer>) -> i32;

    // Textures

    /// `SDL_CreateTexture`
    fn create_texture(renderer: NonNull<Self::Renderer>, format: u32, access: i32, w: i32, h: i32) -> *mut Self::Texture;
    /// `SDL_CreateTextureFromSurface`
    fn create_texture_from_surface(renderer: NonNull<Self::Renderer>, surface: NonNull<Self::Surface>) -> *mut Self::Texture;
    /// `SDL_QueryTexture`
    fn query_texture(texture: NonNull<Self::Texture>, format: &mut u32, access: &mut i32, w: &mut i32, h: &mut i32) -> i32;
    /// `SDL_UpdateTexture`
    fn update_texture(texture: NonNull<Self::Texture>, rect: Option<&Rect>, pixels: &[u8], pitch: i32) -> i32;
    /// `SDL_UpdateYUVTexture`
    fn update_yuv_texture(
        texture: NonNull<Self::Texture>,
        rect: Option<&Rect>,
        y_plane: &[u8],
        y_pitch: i32,
        u_plane: &[u8],
        u_pitch: i32,
        v_plane: &[u8],
        v_pitch: i32,
    ) -> i32;
    /// `SDL_LockTexture`
    fn lock_texture(texture: NonNull<Self::Texture>, rect: Option<&Rect>, pixels: &mut *mut u8, pitch: &mut i32) -> i32;
    /// `SDL_UnlockTexture`
    fn unlock_texture(texture: NonNull<Self::Texture>);
    /// `SDL_GetTextureBlendMode`
    fn texture_blend_mode(texture: NonNull<Self::Texture>, mode: &mut BlendMode) -> i32;
    /// `SDL_SetTextureBlendMode`
    fn set_texture_blend_mode(texture: NonNull<Self::Texture>, mode: BlendMode) -> i32;
    /// `SDL_GetTextureScaleMode`
    fn texture_scale_mode(texture: NonNull<Self::Texture>, mode: &mut ScaleMode) -> i32;
    /// `SDL_SetTextureScaleMode`
    fn set_texture_scale_mode(texture: NonNull<Self::Texture>, mode: ScaleMode) -> i32;
    /// `SDL_GetTextureColorMod`
    fn texture_color_mod(texture: NonNull<Self::Texture>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32;
    /// `SDL_SetTextureColorMod`
    fn set_texture_color_mod(texture: NonNull<Self::Texture>, r: u8, g: u8, b: u8) -> i32;
    /// `SDL_GetTextureAlphaMod`
    fn texture_alpha_mod(texture: NonNull<Self::Texture>, alpha: &mut u8) -> i32;
    /// `SDL_SetTextureAlphaMod`
    fn set_texture_alpha_mod(texture: NonNull<Self::Texture>, alpha: u8) -> i32;

    // Surfaces

    /// `SDL_CreateRGBSurface`
    fn create_rgb_surface(flags: u32, w: i32, h: i32, depth: i32, masks: [u32; 4]) -> *mut Self::Surface;
    /// `SDL_CreateRGBSurfaceWithFormat`
    fn create_rgb_surface_with_format(flags: u32, w: i32, h: i32, depth: i32, format: u32) -> *mut Self::Surface;
    /// `SDL_LoadBMP`
    fn load_bmp(path: &str) -> *mut Self::Surface;
    /// `SDL_SaveBMP`
    fn save_bmp(surface: NonNull<Self::Surface>, path: &str) -> i32;
    /// Read the public surface fields
    fn surface_info(surface: NonNull<Self::Surface>) -> SurfaceInfo;
    /// The `pixels` field of the surface
    fn surface_pixels(surface: NonNull<Self::Surface>) -> *mut u8;
    /// `SDL_LockSurface`
    fn lock_surface(surface: NonNull<Self::Surface>) -> i32;
    /// `SDL_UnlockSurface`
    fn unlock_surface(surface: NonNull<Self::Surface>);
    /// `SDL_SetSurfaceRLE`
    fn set_surface_rle(surface: NonNull<Self::Surface>, enable: bool) -> i32;
    /// `SDL_SetColorKey`
    fn set_color_key(surface: NonNull<Self::Surface>, enable: bool, key: u32) -> i32;
    /// `SDL_HasColorKey`
    fn has_color_key(surface: NonNull<Self::Surface>) -> bool;
    /// `SDL_GetColorKey`
    fn color_key(surface: NonNull<Self::Surface>, key: &mut u32) -> i32;
    /// `SDL_SetSurfaceColorMod`
    fn set_surface_color_mod(surface: NonNull<Self::Surface>, r: u8, g: u8, b: u8) -> i32;
    /// `SDL_GetSurfaceColorMod`
    fn surface_color_mod(surface: NonNull<Self::Surface>, r: &mut u8, g: &mut u8, b: &mut u8) -> i32;
    /// `SDL_SetSurfaceAlphaMod`
    fn set_surface_alpha_mod(surface: NonNull<Self::Surface>, alpha: u8) -> i32;
    /// `SDL_GetSurfaceAlphaMod`
    fn surface_alpha_mod(surface: NonNull<Self::Surface>, alpha: &mut u8) -> i32;
    /// `SDL_SetSurfaceBlendMode`
    fn set_surface_blend_mode(surface: NonNull<Self::Surface>, mode: BlendMode) -> i32;
    /// `SDL_GetSurfaceBlendMode`
    fn surface_blend_mode(surface: NonNull<Self::Surface>, mode: &mut BlendMode) -> i32;
    /// `SDL_SetClipRect`
    fn set_clip_rect(surface: NonNull<Self::Surface>, rect: Option<&Rect>) -> bool;
    /// `SDL_GetClipRect`
    fn clip_rect(surface: NonNull<Self::Surface>, rect: &mut Rect);
    /// `SDL_DuplicateSurface`
    fn duplicate_surface(surface: NonNull<Self::Surface>) -> *mut Self::Surface;
    /// `SDL_ConvertSurfaceFormat`
    fn convert_surface_format(surface: NonNull<Self::Surface>, format: u32) -> *mut Self::Surface;
    /// `SDL_FillRect`
    fn fill_rect(surface: NonNull<Self::Surface>, rect: Option<&Rect>, color: u32) -> i32;
    /// `SDL_FillRects`
    fn fill_rects(surface: NonNull<Self::Surface>, rects: &[Rect], color: u32) -> i32;
    /// `SDL_BlitSurface`
    fn blit_surface(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32;
    /// `SDL_BlitScaled`
    fn blit_scaled(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&mut Rect>,
    ) -> i32;
    /// `SDL_SoftStretch`
    fn soft_stretch(
        src: NonNull<Self::Surface>,
        src_rect: Option<&Rect>,
        dst: NonNull<Self::Surface>,
        dst_rect: Option<&Rect>,
    ) -> i32;
    /// `SDL_SetYUVConversionMode`
    fn set_yuv_conversion_mode(mode: i32);
    /// `SDL_GetYUVConversionMode`
    fn yuv_conversion_mode() -> i32;
    /// `SDL_GetYUVConversionModeForResolution`
    fn yuv_conversion_mode_for_resolution(w: i32, h: i32) -> i32;
}

/// Mixer calls: decoders, audio device, channels, groups, chunks and music
pub trait Mixer: Core {
    /// Native sample chunk
    type Chunk: NativeResource;
    /// Native music stream
    type Music: NativeResource;

    /// `Mix_Init`
    fn mix_init(flags: i32) -> i32;
    /// `Mix_Quit`
    fn mix_quit();
    /// `Mix_OpenAudio`
    fn open_audio(frequency: i32, format: u16, channels: i32, chunk_size: i32) -> i32;
    /// `Mix_OpenAudioDevice`
    fn open_audio_device(
        frequency: i32,
        format: u16,
        channels: i32,
        chunk_size: i32,
        device: Option<&str>,
        allowed_changes: i32,
    ) -> i32;
    /// `Mix_AllocateChannels`
    fn allocate_channels(count: i32) -> i32;
    /// `Mix_QuerySpec`
    fn query_spec(frequency: &mut i32, format: &mut u16, channels: &mut i32) -> i32;
    /// `Mix_CloseAudio`
    fn close_audio();
    /// `Mix_SetSynchroValue`
    fn set_synchro_value(value: i32) -> i32;
    /// `Mix_GetSynchroValue`
    fn synchro_value() -> i32;
    /// `Mix_SetSoundFonts`
    fn set_sound_fonts(paths: &str) -> i32;
    /// `Mix_GetSoundFonts`
    fn sound_fonts() -> Option<String>;

    // Chunks

    /// `Mix_LoadWAV`
    fn load_wav(path: &str) -> *mut Self::Chunk;
    /// `Mix_GetNumChunkDecoders`
    fn num_chunk_decoders() -> i32;
    /// `Mix_GetChunkDecoder`
    fn chunk_decoder(index: i32) -> Option<String>;
    /// `Mix_HasChunkDecoder`
    fn has_chunk_decoder(name: &str) -> bool;
    /// `Mix_VolumeChunk`
    fn volume_chunk(chunk: NonNull<Self::Chunk>, volume: i32) -> i32;
    /// `Mix_PlayChannelTimed`
    fn play_channel_timed(channel: i32, chunk: NonNull<Self::Chunk>, loops: i32, ticks: i32) -> i32;
    /// `Mix_FadeInChannelTimed`
    fn fade_in_channel_timed(channel: i32, chunk: NonNull<Self::Chunk>, loops: i32, ms: i32, ticks: i32) -> i32;

    // Channels

    /// `Mix_Volume`
    fn volume(channel: i32, volume: i32) -> i32;
    /// `Mix_HaltChannel`
    fn halt_channel(channel: i32) -> i32;
    /// `Mix_ExpireChannel`
    fn expire_channel(channel: i32, ticks: i32) -> i32;
    /// `Mix_FadeOutChannel`
    fn fade_out_channel(channel: i32, ms: i32) -> i32;
    /// `Mix_Playing`
    fn playing(channel: i32) -> i32;
    /// `Mix_Paused`
    fn paused(channel: i32) -> i32;
    /// `Mix_FadingChannel`
    fn fading_channel(channel: i32) -> i32;
    /// `Mix_Pause`
    fn pause(channel: i32);
    /// `Mix_Resume`
    fn resume(channel: i32);
    /// `Mix_UnregisterAllEffects`
    fn unregister_all_effects(channel: i32) -> i32;
    /// `Mix_SetPanning`
    fn set_panning(channel: i32, left: u8, right: u8) -> i32;
    /// `Mix_SetPosition`
    fn set_position(channel: i32, angle: i16, distance: u8) -> i32;
    /// `Mix_SetDistance`
    fn set_distance(channel: i32, distance: u8) -> i32;
    /// `Mix_SetReverseStereo`
    fn set_reverse_stereo(channel: i32, flip: i32) -> i32;
    /// `Mix_ReserveChannels`
    fn reserve_channels(count: i32) -> i32;

    // Groups

    /// `Mix_GroupChannel`
    fn group_channel(channel: i32, tag: i32) -> i32;
    /// `Mix_GroupChannels`
    fn group_channels(from: i32, to: i32, tag: i32) -> i32;
    /// `Mix_GroupAvailable`
    fn group_available(tag: i32) -> i32;
    /// `Mix_GroupCount`
    fn group_count(tag: i32) -> i32;
    /// `Mix_GroupOldest`
    fn group_oldest(tag: i32) -> i32;
    /// `Mix_GroupNewer`
    fn group_newer(tag: i32) -> i32;
    /// `Mix_HaltGroup`
    fn halt_group(tag: i32) -> i32;
    /// `Mix_FadeOutGroup`
    fn fade_out_group(tag: i32, ms: i32) -> i32;

    // Music

    /// `Mix_LoadMUS`
    fn load_mus(path: &str) -> *mut Self::Music;
    /// `Mix_GetNumMusicDecoders`
    fn num_music_decoders() -> i32;
    /// `Mix_GetMusicDecoder`
    fn music_decoder(index: i32) -> Option<String>;
    /// `Mix_HasMusicDecoder`
    fn has_music_decoder(name: &str) -> bool;
    /// `Mix_PlayMusic`
    fn play_music(music: NonNull<Self::Music>, loops: i32) -> i32;
    /// `Mix_FadeInMusic`
    fn fade_in_music(music: NonNull<Self::Music>, loops: i32, ms: i32) -> i32;
    /// `Mix_FadeInMusicPos`
    fn fade_in_music_pos(music: NonNull<Self::Music>, loops: i32, ms: i32, position: f64) -> i32;
    /// `Mix_GetMusicType`, `None` asks about the playing music
    fn music_type(music: Option<NonNull<Self::Music>>) -> i32;
    /// `Mix_VolumeMusic`
    fn volume_music(volume: i32) -> i32;
    /// `Mix_HaltMusic`
    fn halt_music() -> i32;
    /// `Mix_FadeOutMusic`
    fn fade_out_music(ms: i32) -> i32;
    /// `Mix_FadingMusic`
    fn fading_music() -> i32;
    /// `Mix_PauseMusic`
    fn pause_music();
    /// `Mix_ResumeMusic`
    fn resume_music();
    /// `Mix_RewindMusic`
    fn rewind_music();
    /// `Mix_PausedMusic`
    fn paused_music() -> i32;
    /// `Mix_PlayingMusic`
    fn playing_music() -> i32;
    /// `Mix_SetMusicPosition`
    fn set_music_position(position: f64) -> i32;
    /// `Mix_SetMusicCMD`
    fn set_music_cmd(command: Option<&str>) -> i32;
}

/// Font loading, metrics and text rendering
pub trait Ttf: Video {
    /// Native font
    type Font: NativeResource;

    /// `TTF_Init`
    fn ttf_init() -> i32;
    /// `TTF_WasInit`
    fn ttf_was_init() -> i32;
    /// `TTF_Quit`
    fn ttf_quit();
    /// `TTF_OpenFont`
    fn open_font(path: &str, ptsize: i32) -> *mut Self::Font;
    /// `TTF_OpenFontIndex`
    fn open_font_index(path: &str, ptsize: i32, index: i64) -> *mut Self::Font;
    /// `TTF_GetFontStyle`
    fn font_style(font: NonNull<Self::Font>) -> i32;
    /// `TTF_SetFontStyle`
    fn set_font_style(font: NonNull<Self::Font>, style: i32);
    /// `TTF_GetFontOutline`
    fn font_outline(font: NonNull<Self::Font>) -> i32;
    /// `TTF_SetFontOutline`
    fn set_font_outline(font: NonNull<Self::Font>, outline: i32);
    /// `TTF_GetFontHinting`
    fn font_hinting(font: NonNull<Self::Font>) -> i32;
    /// `TTF_SetFontHinting`
    fn set_font_hinting(font: NonNull<Self::Font>, hinting: i32);
    /// `TTF_GetFontKerning`
    fn font_kerning(font: NonNull<Self::Font>) -> i32;
    /// `TTF_SetFontKerning`
    fn set_font_kerning(font: NonNull<Self::Font>, allowed: i32);
    /// `TTF_FontHeight`
    fn font_height(font: NonNull<Self::Font>) -> i32;
    /// `TTF_FontAscent`
    fn font_ascent(font: NonNull<Self::Font>) -> i32;
    /// `TTF_FontDescent`
    fn font_descent(font: NonNull<Self::Font>) -> i32;
    /// `TTF_FontLineSkip`
    fn font_line_skip(font: NonNull<Self::Font>) -> i32;
    /// `TTF_FontFaces`
    fn font_faces(font: NonNull<Self::Font>) -> i64;
    /// `TTF_FontFaceIsFixedWidth`
    fn font_face_is_fixed_width(font: NonNull<Self::Font>) -> i32;
    /// `TTF_FontFaceFamilyName`
    fn font_face_family_name(font: NonNull<Self::Font>) -> Option<String>;
    /// `TTF_FontFaceStyleName`
    fn font_face_style_name(font: NonNull<Self::Font>) -> Option<String>;
    /// `TTF_GlyphIsProvided`
    fn glyph_is_provided(font: NonNull<Self::Font>, ch: u16) -> i32;
    /// `TTF_GlyphMetrics`
    fn glyph_metrics(font: NonNull<Self::Font>, ch: u16, metrics: &mut [i32; 5]) -> i32;
    /// `TTF_GetFontKerningSizeGlyphs`
    fn kerning_size_glyphs(font: NonNull<Self::Font>, previous: u16, ch: u16) -> i32;
    /// `TTF_SizeUTF8`
    fn size_utf8(font: NonNull<Self::Font>, text: &str, w: &mut i32, h: &mut i32) -> i32;
    /// `TTF_RenderUTF8_Solid`, `_Shaded` or `_Blended`
    fn render_utf8(font: NonNull<Self::Font>, text: &str, mode: TextRender) -> *mut Self::Surface;
    /// `TTF_RenderUTF8_Blended_Wrapped`
    fn render_utf8_blended_wrapped(font: NonNull<Self::Font>, text: &str, fg: Color, wrap_length: u32) -> *mut Self::Surface;
    /// `TTF_RenderGlyph_Solid`, `_Shaded` or `_Blended`
    fn render_glyph(font: NonNull<Self::Font>, ch: u16, mode: TextRender) -> *mut Self::Surface;
}

/// Image file loading and saving
pub trait Image: Video {
    /// `IMG_Init`
    fn img_init(flags: i32) -> i32;
    /// `IMG_Quit`
    fn img_quit();
    /// `IMG_Load`
    fn img_load(path: &str) -> *mut Self::Surface;
    /// `IMG_LoadTexture`
    fn img_load_texture(renderer: NonNull<Self::Renderer>, path: &str) -> *mut Self::Texture;
    /// `IMG_SavePNG`
    fn img_save_png(surface: NonNull<Self::Surface>, path: &str) -> i32;
    /// `IMG_SaveJPG`
    fn img_save_jpg(surface: NonNull<Self::Surface>, path: &str, quality: i32) -> i32;
}
