//! In-process stand-in for the native libraries
//!
//! `Headless` keeps all library state in thread-local storage, so every test
//! thread sees a private instance. Windows rasterize into memory, the mixer
//! tracks channel state without producing sound, fonts are synthetic monospace
//! faces and image files go through the `image` crate.
//!
//! Creation and teardown calls are recorded in a journal that tests inspect with
//! [`journal`] and [`count`]; [`inject`] makes the next matching call fail.

use std::cell::RefCell;
use std::path::PathBuf;
use std::ptr::{self, NonNull};

use crate::backend::Core;
use crate::render::{Renderer, Surface, Texture, Window};

mod image;
mod mixer;
mod pixels;
mod renderer;
mod surface;
mod ttf;
mod video;
mod window;

pub use mixer::{HeadlessChunk, HeadlessMusic};
pub use renderer::{HeadlessRenderer, HeadlessTexture};
pub use surface::HeadlessSurface;
pub use ttf::HeadlessFont;
pub use window::HeadlessWindow;

/// The in-process backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Headless;

/// Native object kinds tracked by the journal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Window
    Window,
    /// Renderer
    Renderer,
    /// Texture
    Texture,
    /// Software surface
    Surface,
    /// Loaded sound
    Chunk,
    /// Loaded music
    Music,
    /// Opened font
    Font,
}

/// A recorded library call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `SDL_Init` with its flags
    Init(u32),
    /// `SDL_InitSubSystem` with its flags
    InitSubSystem(u32),
    /// `SDL_QuitSubSystem` with its flags
    QuitSubSystem(u32),
    /// `SDL_Quit`
    Quit,
    /// A native object was created
    Create(Resource),
    /// A native object was freed
    Release(Resource),
    /// `Mix_Init` with its flags
    MixInit(i32),
    /// `Mix_Quit`
    MixQuit,
    /// A successful `Mix_OpenAudio`
    OpenAudio,
    /// `Mix_CloseAudio`
    CloseAudio,
    /// `TTF_Init`
    TtfInit,
    /// `TTF_Quit`
    TtfQuit,
    /// `IMG_Init` with its flags
    ImgInit(i32),
    /// `IMG_Quit`
    ImgQuit,
}

/// A failure to inject into the next matching call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// `SDL_Init` and `SDL_InitSubSystem`
    Init,
    /// `Mix_Init`
    MixInit,
    /// `TTF_Init`
    TtfInit,
    /// `IMG_Init`
    ImgInit,
    /// `Mix_OpenAudio`
    OpenAudio,
    /// Any call creating the given object kind
    Create(Resource),
}

/// Reasons a headless call fails; the message becomes the library error string
#[derive(Debug, thiserror::Error)]
pub(crate) enum Failure {
    #[error("{0} subsystem has not been initialized")]
    NotInitialized(&'static str),

    #[error("Audio device hasn't been opened")]
    AudioClosed,

    #[error("Parameter '{0}' is invalid")]
    InvalidParam(&'static str),

    #[error("{0}")]
    Unsupported(String),

    #[error("Couldn't open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Image(#[from] ::image::ImageError),

    #[error("Injected failure: {0:?}")]
    Injected(Fault),
}

pub(crate) type Outcome<T> = Result<T, Failure>;

const SUPPORTED_SUBSYSTEMS: u32 = 0xF231;
const AUDIO: u32 = 0x10;
const VIDEO: u32 = 0x20;
const JOYSTICK: u32 = 0x200;
const GAMECONTROLLER: u32 = 0x2000;
const EVENTS: u32 = 0x4000;

#[derive(Default)]
struct State {
    journal: Vec<Call>,
    faults: Vec<Fault>,
    error: String,
    subsystems: u32,
    video: video::VideoState,
    mixer: mixer::MixerState,
    ttf_init: i32,
    img_loaded: i32,
}

impl State {
    fn take_fault(&mut self, fault: Fault) -> bool {
        let found = self.faults.iter().position(|&f| f == fault);
        found.map(|i| self.faults.remove(i)).is_some()
    }
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::default());
}

fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

fn record(call: Call) {
    with_state(|s| s.journal.push(call));
}

fn take_fault(fault: Fault) -> bool {
    with_state(|s| s.take_fault(fault))
}

fn set_error(failure: &Failure) {
    let message = failure.to_string();
    with_state(|s| s.error = message);
}

/// Native status code: 0 on success, -1 with the error string set otherwise
fn status(result: Outcome<()>) -> i32 {
    result.map_or_else(
        |e| {
            set_error(&e);
            -1
        },
        |()| 0,
    )
}

/// Native pointer result: null with the error string set on failure
fn pointer<T>(result: Outcome<*mut T>) -> *mut T {
    result.unwrap_or_else(|e| {
        set_error(&e);
        ptr::null_mut()
    })
}

/// Box a new native object, honoring an injected creation fault
fn create<T>(resource: Resource, value: T) -> Outcome<*mut T> {
    if take_fault(Fault::Create(resource)) {
        return Err(Failure::Injected(Fault::Create(resource)));
    }
    record(Call::Create(resource));
    Ok(Box::into_raw(Box::new(value)))
}

/// Free a native object created by [`create`]
///
/// # Safety
/// `raw` came from [`create`] and is released once.
unsafe fn destroy<T>(resource: Resource, raw: NonNull<T>) {
    record(Call::Release(resource));
    // SAFETY: per the contract, `raw` is a live box from `create`
    drop(unsafe { Box::from_raw(raw.as_ptr()) });
}

/// Dereference a handle passed into the backend
///
/// Every pointer reaching the backend traits is a live object of this backend
/// owned by a wrapper, and no other reference to it is active during the call.
fn object<'a, T>(raw: NonNull<T>) -> &'a mut T {
    // SAFETY: see the function contract
    unsafe { &mut *raw.as_ptr() }
}

/// Forget all state of the current thread: journal, faults, subsystems, devices
pub fn reset() {
    let old = STATE.with(|state| state.replace(State::default()));
    drop(old);
}

/// Calls recorded since the last [`reset`]
pub fn journal() -> Vec<Call> {
    with_state(|s| s.journal.clone())
}

/// How often `call` was recorded
pub fn count(call: &Call) -> usize {
    with_state(|s| s.journal.iter().filter(|c| *c == call).count())
}

/// Make the next call matching `fault` fail
pub fn inject(fault: Fault) {
    with_state(|s| s.faults.push(fault));
}

/// Write a file into a directory private to this process and thread
pub fn fixture(name: &str, contents: &[u8]) -> PathBuf {
    let thread: String = format!("{:?}", std::thread::current().id())
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let dir = std::env::temp_dir()
        .join("sdl2_kit_headless")
        .join(format!("{}_{thread}", std::process::id()));
    let path = dir.join(name);
    if let Err(e) = std::fs::create_dir_all(&dir).and_then(|()| std::fs::write(&path, contents)) {
        log::warn!("failed to write fixture {}: {e}", path.display());
    }
    path
}

/// Whether an icon was set on `window`
pub fn window_has_icon(window: &Window<Headless>) -> bool {
    window.raw().is_some_and(|w| object(w).has_icon())
}

/// Whether `surface` holds at least one lock
pub fn surface_is_locked(surface: &Surface<Headless>) -> bool {
    surface.raw().is_some_and(|s| object(s).is_locked())
}

/// Whether `texture` is locked
pub fn texture_is_locked(texture: &Texture<Headless>) -> bool {
    texture.raw().is_some_and(|t| object(t).is_locked())
}

/// Texture copies submitted to `renderer`
pub fn draw_calls(renderer: &Renderer<Headless>) -> u32 {
    renderer.raw().map_or(0, |r| object(r).draw_calls())
}

/// Frames presented by `renderer`
pub fn presents(renderer: &Renderer<Headless>) -> u32 {
    renderer.raw().map_or(0, |r| object(r).presents())
}

/// Subsystems pulled in by `flags`
fn with_dependencies(flags: u32) -> u32 {
    let mut flags = flags & SUPPORTED_SUBSYSTEMS;
    if flags & GAMECONTROLLER != 0 {
        flags |= JOYSTICK;
    }
    if flags & (VIDEO | JOYSTICK) != 0 {
        flags |= EVENTS;
    }
    flags
}

fn subsystems() -> u32 {
    with_state(|s| s.subsystems)
}

fn start_subsystems(call: Call, flags: u32) -> i32 {
    record(call);
    if take_fault(Fault::Init) {
        return status(Err(Failure::Injected(Fault::Init)));
    }
    with_state(|s| s.subsystems |= with_dependencies(flags));
    0
}

impl Core for Headless {
    fn init(flags: u32) -> i32 {
        start_subsystems(Call::Init(flags), flags)
    }

    fn init_subsystem(flags: u32) -> i32 {
        start_subsystems(Call::InitSubSystem(flags), flags)
    }

    fn was_init(flags: u32) -> u32 {
        let active = subsystems();
        if flags == 0 {
            active
        } else {
            active & flags
        }
    }

    fn quit_subsystem(flags: u32) {
        record(Call::QuitSubSystem(flags));
        with_state(|s| s.subsystems &= !flags);
    }

    fn quit() {
        record(Call::Quit);
        with_state(|s| s.subsystems = 0);
    }

    fn last_error() -> String {
        with_state(|s| s.error.clone())
    }

    fn clear_error() {
        with_state(|s| s.error.clear());
    }

    fn platform() -> String {
        "Headless".to_string()
    }

    fn power_info(seconds: &mut i32, percent: &mut i32) -> i32 {
        *seconds = -1;
        *percent = -1;
        2
    }

    fn pref_path(org: &str, app: &str) -> Option<String> {
        if app.is_empty() {
            set_error(&Failure::InvalidParam("app"));
            return None;
        }
        let path = std::env::temp_dir().join(org).join(app);
        match std::fs::create_dir_all(&path) {
            Ok(()) => Some(path.to_string_lossy().into_owned()),
            Err(source) => {
                set_error(&Failure::Io {
                    path: path.display().to_string(),
                    source,
                });
                None
            }
        }
    }

    fn base_path() -> Option<String> {
        let exe = std::env::current_exe().ok()?;
        exe.parent().map(|dir| dir.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_faults_are_one_shot() {
        reset();
        inject(Fault::Init);
        assert_eq!(Headless::init(0x20), -1);
        assert!(Headless::last_error().contains("Init"));
        assert_eq!(Headless::init(0x20), 0);
        assert_eq!(count(&Call::Init(0x20)), 2);
    }

    #[test]
    fn test_dependencies() {
        assert_eq!(with_dependencies(VIDEO), VIDEO | EVENTS);
        assert_eq!(with_dependencies(GAMECONTROLLER), GAMECONTROLLER | JOYSTICK | EVENTS);
        assert_eq!(with_dependencies(0x0010_0000), 0);
    }

    #[test]
    fn test_fixture_is_readable() {
        let path = fixture("headless_fixture.bin", b"abc");
        assert_eq!(std::fs::read(path).unwrap(), b"abc");
    }

    #[test]
    fn test_reset_clears_journal() {
        Headless::quit();
        assert!(!journal().is_empty());
        reset();
        assert!(journal().is_empty());
    }
}
