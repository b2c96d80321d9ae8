//! Window handle
//!
//! A [`Window`] owns one native window. Geometry queries return `None` when the
//! handle is invalid; status-returning calls translate to `bool`.

use std::ptr::NonNull;

use crate::backend::Video;
use crate::config::WindowConfig;
use crate::foundation::geometry::{Point, Rect, Size};
use crate::foundation::handle::{Borrowed, BorrowedMut, Owned, View};
use crate::render::surface::Surface;
use crate::render::types::{DisplayMode, WindowFlags};

/// Non-owning alias of a native window
pub type WindowView<'a, B> = View<'a, <B as Video>::Window>;

/// Owning window handle
pub struct Window<B: Video> {
    handle: Owned<B::Window>,
}

impl<B: Video> Window<B> {
    /// Create a window; check [`Window::is_valid`] for failure
    ///
    /// `x`/`y` accept the values in [`crate::render::position`].
    pub fn new(title: &str, x: i32, y: i32, w: i32, h: i32, flags: WindowFlags) -> Self {
        // SAFETY: a fresh window from the creation call, owned by nobody else
        unsafe { Self::from_raw(B::create_window(title, x, y, w, h, flags.bits())) }
    }

    /// Create a window from its configuration section
    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(&config.title, config.x, config.y, config.width, config.height, config.flags)
    }

    /// Take ownership of a raw window
    ///
    /// # Safety
    /// `raw` must be null or a live window of backend `B` owned by nobody else.
    pub unsafe fn from_raw(raw: *mut B::Window) -> Self {
        Self {
            // SAFETY: forwarded contract
            handle: unsafe { Owned::from_raw(raw) },
        }
    }

    /// Alias a window owned elsewhere; only `&self` operations are reachable
    pub fn borrow_view(view: WindowView<'_, B>) -> Borrowed<'_, Self> {
        // SAFETY: the view's lifetime bounds the alias and Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(view.as_raw()) })
    }

    /// The window currently grabbing input, invalid when there is none
    ///
    /// # Safety
    /// Nothing ties the result to the owning [`Window`]. The caller must not
    /// use it after that window is dropped.
    pub unsafe fn grabbed() -> Borrowed<'static, Self> {
        // SAFETY: forwarded contract; Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(B::grabbed_window()) })
    }

    /// Look up a window by id, invalid when there is none
    ///
    /// # Safety
    /// Same as [`Window::grabbed`].
    pub unsafe fn find_by_id(id: u32) -> Borrowed<'static, Self> {
        // SAFETY: forwarded contract; Borrowed never releases
        Borrowed::new(unsafe { Self::from_raw(B::window_from_id(id)) })
    }

    /// True iff a native window is held
    pub fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    /// Raw handle for interop, ownership stays here
    pub fn as_raw(&self) -> *mut B::Window {
        self.handle.as_raw()
    }

    /// Non-owning alias
    pub fn view(&self) -> WindowView<'_, B> {
        self.handle.view()
    }

    pub(crate) fn raw(&self) -> Option<NonNull<B::Window>> {
        self.handle.get()
    }

    /// Index of the display holding the window center
    pub fn display_index(&self) -> Option<i32> {
        self.raw().map(B::window_display_index).filter(|&i| i >= 0)
    }

    /// Mode used when the window is fullscreen
    pub fn display_mode(&self) -> Option<DisplayMode> {
        let window = self.raw()?;
        let mut mode = DisplayMode::default();
        (B::window_display_mode(window, &mut mode) == 0).then_some(mode)
    }

    /// Set the fullscreen mode, `None` picks the window size and desktop format
    pub fn set_display_mode(&mut self, mode: Option<&DisplayMode>) -> bool {
        self.raw().is_some_and(|w| B::set_window_display_mode(w, mode) == 0)
    }

    /// Current window flags, empty when invalid
    pub fn flags(&self) -> WindowFlags {
        self.raw()
            .map_or(WindowFlags::empty(), |w| WindowFlags::from_bits_retain(B::window_flags(w)))
    }

    /// Whether input is grabbed by this window
    pub fn is_grabbed(&self) -> bool {
        self.raw().is_some_and(B::window_grab)
    }

    /// Grab or release input
    pub fn set_grabbed(&mut self, grabbed: bool) {
        if let Some(w) = self.raw() {
            B::set_window_grab(w, grabbed);
        }
    }

    /// Window position
    pub fn position(&self) -> Option<Point> {
        let window = self.raw()?;
        let mut p = Point::default();
        B::window_position(window, &mut p.x, &mut p.y);
        Some(p)
    }

    /// Move the window
    pub fn set_position(&mut self, x: i32, y: i32) {
        if let Some(w) = self.raw() {
            B::set_window_position(w, x, y);
        }
    }

    /// Client area size
    pub fn size(&self) -> Option<Size> {
        let window = self.raw()?;
        let mut s = Size::default();
        B::window_size(window, &mut s.w, &mut s.h);
        Some(s)
    }

    /// Resize the client area
    pub fn set_size(&mut self, w: i32, h: i32) {
        if let Some(window) = self.raw() {
            B::set_window_size(window, w, h);
        }
    }

    /// Minimum client area size
    pub fn minimum_size(&self) -> Option<Size> {
        let window = self.raw()?;
        let mut s = Size::default();
        B::window_minimum_size(window, &mut s.w, &mut s.h);
        Some(s)
    }

    /// Set the minimum client area size
    pub fn set_minimum_size(&mut self, w: i32, h: i32) {
        if let Some(window) = self.raw() {
            B::set_window_minimum_size(window, w, h);
        }
    }

    /// Maximum client area size
    pub fn maximum_size(&self) -> Option<Size> {
        let window = self.raw()?;
        let mut s = Size::default();
        B::window_maximum_size(window, &mut s.w, &mut s.h);
        Some(s)
    }

    /// Set the maximum client area size
    pub fn set_maximum_size(&mut self, w: i32, h: i32) {
        if let Some(window) = self.raw() {
            B::set_window_maximum_size(window, w, h);
        }
    }

    /// Add or remove the border
    pub fn set_bordered(&mut self, bordered: bool) {
        if let Some(w) = self.raw() {
            B::set_window_bordered(w, bordered);
        }
    }

    /// Allow or forbid user resizing
    pub fn set_resizable(&mut self, resizable: bool) {
        if let Some(w) = self.raw() {
            B::set_window_resizable(w, resizable);
        }
    }

    /// Window title
    pub fn title(&self) -> Option<String> {
        self.raw().map(B::window_title)
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        if let Some(w) = self.raw() {
            B::set_window_title(w, title);
        }
    }

    /// Set the window icon; the surface may be dropped afterwards
    pub fn set_icon(&mut self, icon: &Surface<B>) {
        if let (Some(w), Some(s)) = (self.raw(), icon.raw()) {
            B::set_window_icon(w, s);
        }
    }

    /// Show the window
    pub fn show(&mut self) {
        if let Some(w) = self.raw() {
            B::show_window(w);
        }
    }

    /// Hide the window
    pub fn hide(&mut self) {
        if let Some(w) = self.raw() {
            B::hide_window(w);
        }
    }

    /// Make the window as large as possible
    pub fn maximize(&mut self) {
        if let Some(w) = self.raw() {
            B::maximize_window(w);
        }
    }

    /// Minimize to an iconic representation
    pub fn minimize(&mut self) {
        if let Some(w) = self.raw() {
            B::minimize_window(w);
        }
    }

    /// Raise above other windows and request focus
    pub fn raise(&mut self) {
        if let Some(w) = self.raw() {
            B::raise_window(w);
        }
    }

    /// Restore size and position of a minimized or maximized window
    pub fn restore(&mut self) {
        if let Some(w) = self.raw() {
            B::restore_window(w);
        }
    }

    /// Whether the window is in real fullscreen mode
    pub fn is_fullscreen(&self) -> bool {
        self.flags().contains(WindowFlags::FULLSCREEN)
    }

    /// Enter or leave real fullscreen mode
    pub fn set_fullscreen(&mut self, fullscreen: bool) -> bool {
        let flags = if fullscreen { WindowFlags::FULLSCREEN } else { WindowFlags::empty() };
        self.set_fullscreen_mode(flags)
    }

    /// Switch fullscreen mode: `FULLSCREEN`, `FULLSCREEN_DESKTOP` or empty
    pub fn set_fullscreen_mode(&mut self, flags: WindowFlags) -> bool {
        self.raw().is_some_and(|w| B::set_window_fullscreen(w, flags.bits()) == 0)
    }

    /// Gamma brightness of the window's display
    pub fn brightness(&self) -> Option<f32> {
        self.raw().map(B::window_brightness)
    }

    /// Set the gamma brightness, 1.0 is normal
    pub fn set_brightness(&mut self, brightness: f32) -> bool {
        self.raw().is_some_and(|w| B::set_window_brightness(w, brightness) == 0)
    }

    /// Window opacity in `0.0..=1.0`
    pub fn opacity(&self) -> Option<f32> {
        let window = self.raw()?;
        let mut opacity = 1.0;
        (B::window_opacity(window, &mut opacity) == 0).then_some(opacity)
    }

    /// Set the window opacity, clamped to `0.0..=1.0`
    pub fn set_opacity(&mut self, opacity: f32) -> bool {
        self.raw().is_some_and(|w| B::set_window_opacity(w, opacity) == 0)
    }

    /// Make this window modal for `parent`
    pub fn set_modal_for(&mut self, parent: &Window<B>) -> bool {
        match (self.raw(), parent.raw()) {
            (Some(w), Some(p)) => B::set_window_modal_for(w, p) == 0,
            _ => false,
        }
    }

    /// Give the window input focus
    pub fn set_input_focus(&mut self) -> bool {
        self.raw().is_some_and(|w| B::set_window_input_focus(w) == 0)
    }

    /// Numeric id, usable with [`Window::find_by_id`]
    pub fn id(&self) -> Option<u32> {
        self.raw().map(B::window_id).filter(|&id| id != 0)
    }

    /// Software framebuffer of the window, invalid on failure
    ///
    /// The surface belongs to the window and is freed with it. The exclusive
    /// borrow of the window keeps a single alias alive at a time.
    pub fn surface(&mut self) -> BorrowedMut<'_, Surface<B>> {
        let raw = self.raw().map_or(std::ptr::null_mut(), B::window_surface);
        // SAFETY: the window owns the surface; the borrow of self bounds the alias
        BorrowedMut::new(unsafe { Surface::from_raw(raw) })
    }

    /// Copy the window surface to the screen
    pub fn update_surface(&self) -> bool {
        self.raw().is_some_and(|w| B::update_window_surface(w) == 0)
    }

    /// Copy areas of the window surface to the screen
    pub fn update_surface_rects(&self, rects: &[Rect]) -> bool {
        self.raw().is_some_and(|w| B::update_window_surface_rects(w, rects) == 0)
    }
}

impl<B: Video> Default for Window<B> {
    fn default() -> Self {
        Self { handle: Owned::null() }
    }
}

impl<B: Video> std::fmt::Debug for Window<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window").field("handle", &self.handle).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::{self, Call, Fault, Headless, Resource};
    use crate::render::position;
    use crate::system::{Root, SystemFlags};
    use approx::assert_relative_eq;

    fn window(root: &Root<Headless>) -> Window<Headless> {
        assert!(root.flags().contains(SystemFlags::VIDEO));
        Window::new("test", 10, 20, 320, 240, WindowFlags::SHOWN)
    }

    #[test]
    fn test_default_window_is_invalid() {
        headless::reset();
        let w = Window::<Headless>::default();
        assert!(!w.is_valid());
        assert_eq!(w.size(), None);
        assert!(w.flags().is_empty());
        drop(w);
        assert!(headless::journal().is_empty());
    }

    #[test]
    fn test_failed_creation_is_invalid_and_never_destroyed() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        headless::inject(Fault::Create(Resource::Window));
        let w = window(&root);
        assert!(!w.is_valid());
        drop(w);
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 0);
    }

    #[test]
    fn test_window_requires_video() {
        headless::reset();
        let w = Window::<Headless>::new("t", 0, 0, 10, 10, WindowFlags::empty());
        assert!(!w.is_valid());
        assert!(crate::system::last_error::<Headless>().contains("Video"));
    }

    #[test]
    fn test_take_moves_ownership() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut a = window(&root);
        let raw = a.as_raw();
        let b = std::mem::take(&mut a);
        assert!(!a.is_valid());
        assert_eq!(b.as_raw(), raw);
        drop(a);
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 0);
        drop(b);
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 1);
    }

    #[test]
    fn test_geometry_round_trip() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        assert_eq!(w.position(), Some(Point::new(10, 20)));
        assert_eq!(w.size(), Some(Size::new(320, 240)));

        w.set_position(5, 6);
        w.set_size(640, 480);
        w.set_minimum_size(100, 100);
        w.set_maximum_size(1000, 800);
        assert_eq!(w.position(), Some(Point::new(5, 6)));
        assert_eq!(w.size(), Some(Size::new(640, 480)));
        assert_eq!(w.minimum_size(), Some(Size::new(100, 100)));
        assert_eq!(w.maximum_size(), Some(Size::new(1000, 800)));

        w.set_size(50, 2000);
        assert_eq!(w.size(), Some(Size::new(100, 800)));
    }

    #[test]
    fn test_centered_position_resolves_on_display() {
        headless::reset();
        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
        let w = Window::<Headless>::new("c", position::CENTERED, position::CENTERED, 920, 80, WindowFlags::empty());
        assert_eq!(w.position(), Some(Point::new(500, 500)));
        assert_eq!(w.display_index(), Some(0));
    }

    #[test]
    fn test_state_changes_update_flags() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        assert!(w.flags().contains(WindowFlags::SHOWN));
        w.hide();
        assert!(w.flags().contains(WindowFlags::HIDDEN));
        w.show();
        w.maximize();
        assert!(w.flags().contains(WindowFlags::MAXIMIZED));
        w.minimize();
        assert!(w.flags().contains(WindowFlags::MINIMIZED));
        w.restore();
        assert!(!w.flags().intersects(WindowFlags::MINIMIZED | WindowFlags::MAXIMIZED));
        w.set_resizable(true);
        w.set_bordered(false);
        assert!(w.flags().contains(WindowFlags::RESIZABLE | WindowFlags::BORDERLESS));
        assert!(w.set_fullscreen(true));
        assert!(w.is_fullscreen());
        assert!(w.set_fullscreen(false));
        assert!(!w.is_fullscreen());
    }

    #[test]
    fn test_title_and_appearance() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        assert_eq!(w.title().as_deref(), Some("test"));
        w.set_title("renamed");
        assert_eq!(w.title().as_deref(), Some("renamed"));

        assert!(w.set_opacity(0.25));
        assert_relative_eq!(w.opacity().unwrap(), 0.25);
        assert!(w.set_opacity(3.0));
        assert_relative_eq!(w.opacity().unwrap(), 1.0);

        assert_relative_eq!(w.brightness().unwrap(), 1.0);
        assert!(w.set_brightness(0.5));
        assert_relative_eq!(w.brightness().unwrap(), 0.5);
        assert!(!w.set_brightness(-1.0));
    }

    #[test]
    fn test_grab_and_lookup() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        assert!(!w.is_grabbed());
        // SAFETY: the alias is dropped before the window
        assert!(!unsafe { Window::<Headless>::grabbed() }.is_valid());

        w.set_grabbed(true);
        assert!(w.is_grabbed());
        // SAFETY: the alias is dropped before the window
        let grabbed = unsafe { Window::<Headless>::grabbed() };
        assert_eq!(grabbed.as_raw(), w.as_raw());

        let id = w.id().unwrap();
        // SAFETY: the alias is dropped before the window
        let found = unsafe { Window::<Headless>::find_by_id(id) };
        assert_eq!(found.title().as_deref(), Some("test"));
        drop(found);
        // SAFETY: a null alias is never dereferenced
        assert!(unsafe { Window::<Headless>::find_by_id(id + 100) }.as_raw().is_null());
        // The alias never released the window
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 0);
    }

    #[test]
    fn test_modal_and_focus() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let parent = window(&root);
        let mut child = window(&root);
        assert!(child.set_modal_for(&parent));
        assert!(child.set_input_focus());
        assert!(child.flags().contains(WindowFlags::INPUT_FOCUS));
        assert!(!child.set_modal_for(&Window::default()));
    }

    #[test]
    fn test_display_mode() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        let mode = w.display_mode().unwrap();
        assert_eq!((mode.w, mode.h, mode.refresh_rate), (320, 240, 60));
        let custom = DisplayMode { w: 800, h: 600, ..mode };
        assert!(w.set_display_mode(Some(&custom)));
        assert_eq!(w.display_mode(), Some(custom));
        assert!(w.set_display_mode(None));
        assert_eq!(w.display_mode().map(|m| (m.w, m.h)), Some((320, 240)));
    }

    #[test]
    fn test_window_surface_is_borrowed() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        {
            let mut surface = w.surface();
            assert!(surface.is_valid());
            assert_eq!((surface.width(), surface.height()), (320, 240));
            assert!(surface.fill_rect(None, 0xFF00_00FF));
            let mut sprite = Surface::<Headless>::with_format(4, 4, crate::render::PixelFormat::ARGB8888);
            assert!(sprite.fill_rect(None, 0xFF00_FF00));
            assert!(sprite.set_blend_mode(crate::render::BlendMode::None));
            assert!(sprite.blit(None, &mut surface, None));
            let first = surface.with_pixels_mut(|px, _| u32::from_ne_bytes([px[0], px[1], px[2], px[3]]));
            assert_eq!(first.map(|p| p & 0x00FF_FFFF), Some(0x0000_FF00));
        }
        assert!(w.is_valid());
        assert!(w.update_surface());
        assert!(w.update_surface_rects(&[Rect::new(0, 0, 10, 10)]));
        assert_eq!(headless::count(&Call::Release(Resource::Surface)), 0);
    }

    #[test]
    fn test_icon() {
        headless::reset();
        let root = Root::<Headless>::new(SystemFlags::VIDEO);
        let mut w = window(&root);
        let icon = Surface::<Headless>::with_format(16, 16, crate::render::PixelFormat::ARGB8888);
        w.set_icon(&icon);
        assert!(headless::window_has_icon(&w));
    }

    #[test]
    fn test_from_config() {
        headless::reset();
        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
        let config = WindowConfig::default().with_title("configured").with_size(200, 100);
        let w = Window::<Headless>::from_config(&config);
        assert_eq!(w.title().as_deref(), Some("configured"));
        assert_eq!(w.size(), Some(Size::new(200, 100)));
    }
}
