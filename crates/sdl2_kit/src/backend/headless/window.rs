//! Windows on a single virtual display

use std::ptr::NonNull;

use super::surface::HeadlessSurface;
use super::{destroy, with_state, Failure, Outcome, Resource};
use crate::foundation::geometry::Rect;
use crate::foundation::handle::NativeResource;
use crate::render::{position, DisplayMode, PixelFormat, WindowFlags};

/// Bounds of the only display
pub(super) const DISPLAY: Rect = Rect::new(0, 0, 1920, 1080);
/// Display bounds minus a task bar
pub(super) const USABLE: Rect = Rect::new(0, 0, 1920, 1040);
const REFRESH_RATE: i32 = 60;
const MAX_SIZE: i32 = 16_384;

/// Window geometry and state flags
#[derive(Debug)]
pub struct HeadlessWindow {
    id: u32,
    title: String,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    min: (i32, i32),
    max: (i32, i32),
    flags: WindowFlags,
    brightness: f32,
    opacity: f32,
    icon: bool,
    modal_for: Option<u32>,
    display_mode: Option<DisplayMode>,
    surface: Option<Box<HeadlessSurface>>,
}

impl NativeResource for HeadlessWindow {
    const KIND: &'static str = "window";

    unsafe fn release(raw: NonNull<Self>) {
        let window = super::object(raw);
        let id = window.id;
        let surface = window.surface.as_deref_mut().map(NonNull::from);
        with_state(|s| {
            s.video.unregister(id);
            if let Some(surface) = surface {
                s.video.forget_surface(surface);
            }
        });
        // SAFETY: forwarded contract of `NativeResource::release`
        unsafe { destroy(Resource::Window, raw) }
    }
}

fn resolve(coordinate: i32, extent: i32, origin: i32, span: i32) -> i32 {
    if position::is_centered(coordinate) {
        origin + (span - extent) / 2
    } else if position::is_undefined(coordinate) {
        origin
    } else {
        coordinate
    }
}

impl HeadlessWindow {
    pub(super) fn new(id: u32, title: &str, x: i32, y: i32, w: i32, h: i32, flags: u32) -> Outcome<Self> {
        if !(0..=MAX_SIZE).contains(&w) || !(0..=MAX_SIZE).contains(&h) {
            return Err(Failure::Unsupported(format!("Window of {w}x{h} is too large")));
        }
        let mut flags = WindowFlags::from_bits_retain(flags);
        if !flags.contains(WindowFlags::HIDDEN) {
            flags |= WindowFlags::SHOWN;
        }
        Ok(Self {
            id,
            title: title.to_string(),
            x: resolve(x, w, DISPLAY.x, DISPLAY.w),
            y: resolve(y, h, DISPLAY.y, DISPLAY.h),
            w,
            h,
            min: (0, 0),
            max: (0, 0),
            flags,
            brightness: 1.0,
            opacity: 1.0,
            icon: false,
            modal_for: None,
            display_mode: None,
            surface: None,
        })
    }

    pub(super) fn id(&self) -> u32 {
        self.id
    }

    pub(super) fn has_icon(&self) -> bool {
        self.icon
    }

    pub(super) fn set_icon(&mut self) {
        self.icon = true;
    }

    pub(super) fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub(super) fn set_flag(&mut self, flag: WindowFlags, on: bool) {
        self.flags.set(flag, on);
    }

    pub(super) fn show(&mut self, shown: bool) {
        self.flags.set(WindowFlags::SHOWN, shown);
        self.flags.set(WindowFlags::HIDDEN, !shown);
    }

    pub(super) fn maximize(&mut self) {
        self.flags.remove(WindowFlags::MINIMIZED);
        self.flags.insert(WindowFlags::MAXIMIZED);
    }

    pub(super) fn minimize(&mut self) {
        self.flags.remove(WindowFlags::MAXIMIZED | WindowFlags::INPUT_FOCUS);
        self.flags.insert(WindowFlags::MINIMIZED);
    }

    pub(super) fn restore(&mut self) {
        self.flags.remove(WindowFlags::MINIMIZED | WindowFlags::MAXIMIZED);
    }

    pub(super) fn set_fullscreen(&mut self, flags: u32) -> Outcome<()> {
        let mode = WindowFlags::from_bits(flags).filter(|f| WindowFlags::FULLSCREEN_DESKTOP.contains(*f));
        let Some(mode) = mode else {
            return Err(Failure::InvalidParam("flags"));
        };
        self.flags.remove(WindowFlags::FULLSCREEN_DESKTOP);
        self.flags.insert(mode);
        Ok(())
    }

    pub(super) fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub(super) fn set_position(&mut self, x: i32, y: i32) {
        self.x = resolve(x, self.w, DISPLAY.x, DISPLAY.w);
        self.y = resolve(y, self.h, DISPLAY.y, DISPLAY.h);
    }

    pub(super) fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }

    fn clamp_size(&self, w: i32, h: i32) -> (i32, i32) {
        let limit = |value: i32, min: i32, max: i32| {
            let value = value.max(min);
            if max > 0 {
                value.min(max)
            } else {
                value
            }
        };
        (limit(w, self.min.0, self.max.0), limit(h, self.min.1, self.max.1))
    }

    pub(super) fn set_size(&mut self, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        (self.w, self.h) = self.clamp_size(w, h);
    }

    pub(super) fn minimum_size(&self) -> (i32, i32) {
        self.min
    }

    pub(super) fn set_minimum_size(&mut self, w: i32, h: i32) {
        if w > 0 && h > 0 {
            self.min = (w, h);
            (self.w, self.h) = self.clamp_size(self.w, self.h);
        }
    }

    pub(super) fn maximum_size(&self) -> (i32, i32) {
        self.max
    }

    pub(super) fn set_maximum_size(&mut self, w: i32, h: i32) {
        if w > 0 && h > 0 {
            self.max = (w, h);
            (self.w, self.h) = self.clamp_size(self.w, self.h);
        }
    }

    pub(super) fn title(&self) -> &str {
        &self.title
    }

    pub(super) fn set_title(&mut self, title: &str) {
        title.clone_into(&mut self.title);
    }

    pub(super) fn brightness(&self) -> f32 {
        self.brightness
    }

    pub(super) fn set_brightness(&mut self, brightness: f32) -> Outcome<()> {
        if !(brightness >= 0.0) {
            return Err(Failure::InvalidParam("brightness"));
        }
        self.brightness = brightness;
        Ok(())
    }

    pub(super) fn opacity(&self) -> f32 {
        self.opacity
    }

    pub(super) fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    pub(super) fn set_modal_for(&mut self, parent: u32) {
        self.modal_for = Some(parent);
    }

    pub(super) fn display_mode(&self) -> DisplayMode {
        self.display_mode.unwrap_or(DisplayMode {
            format: PixelFormat::RGB888,
            w: self.w,
            h: self.h,
            refresh_rate: REFRESH_RATE,
        })
    }

    pub(super) fn set_display_mode(&mut self, mode: Option<&DisplayMode>) {
        self.display_mode = mode.copied();
    }

    /// The window framebuffer, recreated when the window was resized
    pub(super) fn surface(&mut self) -> Outcome<&mut HeadlessSurface> {
        let stale = self.surface.as_ref().is_some_and(|s| s.size() != (self.w, self.h));
        if stale || self.surface.is_none() {
            self.surface = Some(Box::new(HeadlessSurface::new(PixelFormat::RGB888, self.w, self.h)?));
        }
        self.surface
            .as_deref_mut()
            .ok_or(Failure::Unsupported("Window surface is invalid".to_string()))
    }

    pub(super) fn has_surface(&self) -> bool {
        self.surface.as_ref().is_some_and(|s| s.size() == (self.w, self.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_position_is_display_origin() {
        let w = HeadlessWindow::new(1, "w", position::UNDEFINED, 7, 10, 10, 0).unwrap();
        assert_eq!(w.position(), (0, 7));
        assert!(w.flags().contains(WindowFlags::SHOWN));
    }

    #[test]
    fn test_fullscreen_rejects_other_flags() {
        let mut w = HeadlessWindow::new(1, "w", 0, 0, 10, 10, 0).unwrap();
        assert!(w.set_fullscreen(WindowFlags::RESIZABLE.bits()).is_err());
        assert!(w.set_fullscreen(WindowFlags::FULLSCREEN_DESKTOP.bits()).is_ok());
        assert!(w.flags().contains(WindowFlags::FULLSCREEN_DESKTOP));
        assert!(w.set_fullscreen(0).is_ok());
        assert!(!w.flags().intersects(WindowFlags::FULLSCREEN_DESKTOP));
    }

    #[test]
    fn test_surface_follows_resize() {
        let mut w = HeadlessWindow::new(1, "w", 0, 0, 10, 10, 0).unwrap();
        assert!(!w.has_surface());
        assert_eq!(w.surface().unwrap().size(), (10, 10));
        w.set_size(20, 5);
        assert!(!w.has_surface());
        assert_eq!(w.surface().unwrap().size(), (20, 5));
    }
}
