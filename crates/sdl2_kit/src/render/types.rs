//! Flag sets and value enums of the video subsystem

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Window creation and state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WindowFlags: u32 {
        /// Fullscreen window
        const FULLSCREEN = 0x0000_0001;
        /// Usable with an OpenGL context
        const OPENGL = 0x0000_0002;
        /// Visible
        const SHOWN = 0x0000_0004;
        /// Not visible
        const HIDDEN = 0x0000_0008;
        /// No decoration
        const BORDERLESS = 0x0000_0010;
        /// Can be resized
        const RESIZABLE = 0x0000_0020;
        /// Minimized
        const MINIMIZED = 0x0000_0040;
        /// Maximized
        const MAXIMIZED = 0x0000_0080;
        /// Has grabbed mouse input
        const MOUSE_GRABBED = 0x0000_0100;
        /// Has input focus
        const INPUT_FOCUS = 0x0000_0200;
        /// Has mouse focus
        const MOUSE_FOCUS = 0x0000_0400;
        /// Not created by the library
        const FOREIGN = 0x0000_0800;
        /// Fullscreen at the desktop resolution
        const FULLSCREEN_DESKTOP = 0x0000_1001;
        /// High-DPI backbuffer when supported
        const ALLOW_HIGHDPI = 0x0000_2000;
        /// Mouse captured
        const MOUSE_CAPTURE = 0x0000_4000;
        /// Always above other windows
        const ALWAYS_ON_TOP = 0x0000_8000;
        /// Not shown in the taskbar
        const SKIP_TASKBAR = 0x0001_0000;
        /// Utility window
        const UTILITY = 0x0002_0000;
        /// Tooltip window
        const TOOLTIP = 0x0004_0000;
        /// Popup menu window
        const POPUP_MENU = 0x0008_0000;
        /// Usable with a Vulkan instance
        const VULKAN = 0x1000_0000;
    }
}

bitflags! {
    /// Renderer creation flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RendererFlags: u32 {
        /// Software fallback
        const SOFTWARE = 0x0000_0001;
        /// Hardware acceleration
        const ACCELERATED = 0x0000_0002;
        /// Present synchronized with the refresh rate
        const PRESENTVSYNC = 0x0000_0004;
        /// Supports rendering to texture
        const TARGETTEXTURE = 0x0000_0008;
    }
}

bitflags! {
    /// Surface flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceFlags: u32 {
        /// Plain software surface
        const SWSURFACE = 0;
        /// Pixels were allocated by the caller
        const PREALLOC = 0x0000_0001;
        /// Run-length encoded, must be locked to access pixels
        const RLEACCEL = 0x0000_0002;
        /// Pixels are not freed with the surface
        const DONTFREE = 0x0000_0004;
        /// Pixels are SIMD aligned
        const SIMD_ALIGNED = 0x0000_0008;
    }
}

bitflags! {
    /// Mirroring applied by `copy_ex`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Flip: u32 {
        /// No mirroring
        const NONE = 0;
        /// Mirror left to right
        const HORIZONTAL = 0x1;
        /// Mirror top to bottom
        const VERTICAL = 0x2;
    }
}

/// Pixel blending of draws, copies and blits
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// dst = src
    #[default]
    None = 0,
    /// Alpha blending
    Blend = 1,
    /// Additive blending
    Add = 2,
    /// Color modulate
    Mod = 4,
    /// Color multiply
    Mul = 8,
    /// Value the native side returns for unknown modes
    Invalid = 0x7FFF_FFFF,
}

impl BlendMode {
    /// Map a native value, unknown values become [`BlendMode::Invalid`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::Blend,
            2 => Self::Add,
            4 => Self::Mod,
            8 => Self::Mul,
            _ => Self::Invalid,
        }
    }
}

/// Texture filtering
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMode {
    /// Nearest pixel sampling
    #[default]
    Nearest = 0,
    /// Linear filtering
    Linear = 1,
    /// Anisotropic filtering
    Best = 2,
}

impl ScaleMode {
    /// Map a native value
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            2 => Some(Self::Best),
            _ => None,
        }
    }
}

/// How a texture may be accessed
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureAccess {
    /// Changes rarely, not lockable
    #[default]
    Static = 0,
    /// Changes frequently, lockable
    Streaming = 1,
    /// Can be used as a render target
    Target = 2,
}

impl TextureAccess {
    /// Map a native value
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Static),
            1 => Some(Self::Streaming),
            2 => Some(Self::Target),
            _ => None,
        }
    }
}

/// Physical orientation of a display
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayOrientation {
    /// Cannot be determined
    #[default]
    Unknown = 0,
    /// Landscape, right side up
    Landscape = 1,
    /// Landscape, upside down
    LandscapeFlipped = 2,
    /// Portrait, right side up
    Portrait = 3,
    /// Portrait, upside down
    PortraitFlipped = 4,
}

impl DisplayOrientation {
    /// Map a native value, unknown values become [`DisplayOrientation::Unknown`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Landscape,
            2 => Self::LandscapeFlipped,
            3 => Self::Portrait,
            4 => Self::PortraitFlipped,
            _ => Self::Unknown,
        }
    }
}

/// YUV to RGB conversion standard
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum YuvConversion {
    /// Full range JPEG
    Jpeg = 0,
    /// BT.601
    #[default]
    Bt601 = 1,
    /// BT.709
    Bt709 = 2,
    /// BT.601 for SD content, BT.709 for HD content
    Automatic = 3,
}

impl YuvConversion {
    /// Map a native value, unknown values become [`YuvConversion::Bt601`]
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Jpeg,
            2 => Self::Bt709,
            3 => Self::Automatic,
            _ => Self::Bt601,
        }
    }
}

/// Native pixel format enum value
///
/// Packed as `[flag:4][type:4][order:4][layout:4][bits:8][bytes:8]` for regular
/// formats, or a FourCC code for YUV formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
    /// Unknown format
    pub const UNKNOWN: Self = Self(0);
    /// 8-bit palette index
    pub const INDEX8: Self = Self(0x1300_0801);
    /// 3-3-2 packed
    pub const RGB332: Self = Self(0x1411_0801);
    /// 5-6-5 packed
    pub const RGB565: Self = Self(0x1515_1002);
    /// Bytes R, G, B
    pub const RGB24: Self = Self(0x1710_1803);
    /// Bytes B, G, R
    pub const BGR24: Self = Self(0x1740_1803);
    /// 32-bit XRGB
    pub const RGB888: Self = Self(0x1616_1804);
    /// 32-bit XBGR
    pub const BGR888: Self = Self(0x1656_1804);
    /// 32-bit ARGB
    pub const ARGB8888: Self = Self(0x1636_2004);
    /// 32-bit RGBA
    pub const RGBA8888: Self = Self(0x1646_2004);
    /// 32-bit ABGR, byte order R, G, B, A on little endian
    pub const ABGR8888: Self = Self(0x1676_2004);
    /// 32-bit BGRA
    pub const BGRA8888: Self = Self(0x1686_2004);
    /// Planar Y, V, U
    pub const YV12: Self = Self(0x3231_5659);
    /// Planar Y, U, V
    pub const IYUV: Self = Self(0x5655_5949);
    /// Packed Y0, U0, Y1, V0
    pub const YUY2: Self = Self(0x3259_5559);
    /// Packed U0, Y0, V0, Y1
    pub const UYVY: Self = Self(0x5956_5955);
    /// Packed Y0, V0, Y1, U0
    pub const YVYU: Self = Self(0x5559_5659);
    /// Planar Y, interleaved U/V
    pub const NV12: Self = Self(0x3231_564E);
    /// Planar Y, interleaved V/U
    pub const NV21: Self = Self(0x3132_564E);

    /// Raw native value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True for FourCC (YUV) formats
    pub const fn is_fourcc(self) -> bool {
        self.0 != 0 && (self.0 >> 28) & 0x0F != 1
    }

    /// Bytes per pixel; for planar YUV this is the Y plane
    pub const fn bytes_per_pixel(self) -> u32 {
        if self.is_fourcc() {
            match self {
                Self::YUY2 | Self::UYVY | Self::YVYU => 2,
                _ => 1,
            }
        } else {
            self.0 & 0xFF
        }
    }

    /// Significant bits per pixel
    pub const fn bits_per_pixel(self) -> u32 {
        if self.is_fourcc() {
            match self {
                Self::YUY2 | Self::UYVY | Self::YVYU => 16,
                _ => 12,
            }
        } else {
            (self.0 >> 8) & 0xFF
        }
    }

    /// Whether the format carries an alpha channel
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::ARGB8888 | Self::RGBA8888 | Self::ABGR8888 | Self::BGRA8888)
    }

    /// Find the format matching a depth and channel masks (little endian)
    pub const fn from_masks(depth: i32, r: u32, g: u32, b: u32, a: u32) -> Self {
        match (depth, r, g, b, a) {
            (8, 0, 0, 0, 0) => Self::INDEX8,
            (24, 0 | 0x00FF_0000, _, _, 0) => Self::BGR24,
            (24, 0x0000_00FF, _, _, 0) => Self::RGB24,
            (32, 0, 0, 0, 0) | (32, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0) => Self::RGB888,
            (32, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0) => Self::BGR888,
            (32, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000) => Self::ARGB8888,
            (32, 0xFF00_0000, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF) => Self::RGBA8888,
            (32, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000) => Self::ABGR8888,
            (32, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000, 0x0000_00FF) => Self::BGRA8888,
            _ => Self::UNKNOWN,
        }
    }
}

impl From<u32> for PixelFormat {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

/// Display mode of a window or display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayMode {
    /// Pixel format
    pub format: PixelFormat,
    /// Width in pixels
    pub w: i32,
    /// Height in pixels
    pub h: i32,
    /// Refresh rate in Hz, 0 when unspecified
    pub refresh_rate: i32,
}

/// Description of a render driver or renderer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RendererInfo {
    /// Driver name
    pub name: String,
    /// Supported renderer flags
    pub flags: RendererFlags,
    /// Texture formats the driver supports
    pub texture_formats: Vec<PixelFormat>,
    /// Largest texture width, 0 when unlimited
    pub max_texture_width: i32,
    /// Largest texture height, 0 when unlimited
    pub max_texture_height: i32,
}

/// Special window position values
pub mod position {
    /// Let the window manager choose
    pub const UNDEFINED: i32 = 0x1FFF_0000;
    /// Center on the primary display
    pub const CENTERED: i32 = 0x2FFF_0000;

    /// Undefined position on a specific display
    pub const fn undefined_on(display: i32) -> i32 {
        UNDEFINED | display
    }

    /// Centered on a specific display
    pub const fn centered_on(display: i32) -> i32 {
        CENTERED | display
    }

    /// Whether the coordinate is one of the centered values
    pub const fn is_centered(value: i32) -> bool {
        value & 0xFFFF_0000u32 as i32 == CENTERED
    }

    /// Whether the coordinate is one of the undefined values
    pub const fn is_undefined(value: i32) -> bool {
        value & 0xFFFF_0000u32 as i32 == UNDEFINED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_or_matches_bits() {
        let flags = WindowFlags::SHOWN | WindowFlags::RESIZABLE;
        assert_eq!(flags.bits(), 0x4 | 0x20);
        let flip = Flip::HORIZONTAL | Flip::VERTICAL;
        assert_eq!(flip.bits(), 3);
        let r = RendererFlags::ACCELERATED | RendererFlags::PRESENTVSYNC;
        assert_eq!(r.bits(), 6);
    }

    #[test]
    fn test_pixel_format_sizes() {
        assert_eq!(PixelFormat::ARGB8888.bytes_per_pixel(), 4);
        assert_eq!(PixelFormat::ARGB8888.bits_per_pixel(), 32);
        assert_eq!(PixelFormat::RGB888.bits_per_pixel(), 24);
        assert_eq!(PixelFormat::RGB24.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::INDEX8.bytes_per_pixel(), 1);
        assert!(PixelFormat::YV12.is_fourcc());
        assert!(!PixelFormat::RGB565.is_fourcc());
        assert_eq!(PixelFormat::YUY2.bytes_per_pixel(), 2);
    }

    #[test]
    fn test_from_masks() {
        assert_eq!(
            PixelFormat::from_masks(32, 0x00FF_0000, 0xFF00, 0xFF, 0xFF00_0000),
            PixelFormat::ARGB8888
        );
        assert_eq!(PixelFormat::from_masks(32, 0, 0, 0, 0), PixelFormat::RGB888);
        assert_eq!(PixelFormat::from_masks(24, 0xFF, 0xFF00, 0x00FF_0000, 0), PixelFormat::RGB24);
        assert_eq!(PixelFormat::from_masks(16, 0xF800, 0x07E0, 0x1F, 0), PixelFormat::UNKNOWN);
    }

    #[test]
    fn test_enum_round_trip_from_raw() {
        assert_eq!(BlendMode::from_raw(BlendMode::Mul as i32), BlendMode::Mul);
        assert_eq!(BlendMode::from_raw(3), BlendMode::Invalid);
        assert_eq!(ScaleMode::from_raw(9), None);
        assert_eq!(DisplayOrientation::from_raw(4), DisplayOrientation::PortraitFlipped);
    }

    #[test]
    fn test_window_position_values() {
        assert!(position::is_centered(position::CENTERED));
        assert!(position::is_centered(position::centered_on(1)));
        assert!(position::is_undefined(position::UNDEFINED));
        assert!(!position::is_centered(100));
    }

    #[test]
    fn test_flags_serialize_by_name() {
        let text = ron::to_string(&(WindowFlags::SHOWN | WindowFlags::RESIZABLE)).unwrap();
        assert!(text.contains("SHOWN"));
        let back: WindowFlags = ron::from_str(&text).unwrap();
        assert_eq!(back, WindowFlags::SHOWN | WindowFlags::RESIZABLE);
    }
}
