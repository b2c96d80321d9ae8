//! Configuration system
//!
//! Start-up settings for a session: which subsystems to initialize and how to
//! create the window, the renderer and the audio device. Any [`Config`] loads
//! from and saves to `.toml` or `.ron` files.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::audio::{AudioFormat, DEFAULT_CHANNELS, DEFAULT_CHUNK_SIZE, DEFAULT_FREQUENCY};
use crate::render::{position, RendererFlags, WindowFlags};
use crate::system::SystemFlags;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Left edge, or a [`position`] sentinel
    pub x: i32,
    /// Top edge, or a [`position`] sentinel
    pub y: i32,
    /// Client width
    pub width: i32,
    /// Client height
    pub height: i32,
    /// Creation flags
    pub flags: WindowFlags,
}

impl WindowConfig {
    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the client size
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the creation flags
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sdl2_kit".to_string(),
            x: position::UNDEFINED,
            y: position::UNDEFINED,
            width: 800,
            height: 600,
            flags: WindowFlags::SHOWN,
        }
    }
}

/// Renderer creation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Requested capabilities
    pub flags: RendererFlags,
    /// Render driver index, `-1` picks the first one supporting `flags`
    pub driver_index: i32,
}

impl RendererConfig {
    /// Set the requested capabilities
    pub fn with_flags(mut self, flags: RendererFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Pin a render driver
    pub fn with_driver_index(mut self, index: i32) -> Self {
        self.driver_index = index;
        self
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            flags: RendererFlags::ACCELERATED | RendererFlags::PRESENTVSYNC,
            driver_index: -1,
        }
    }
}

/// Audio device settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Output frequency in Hz
    pub frequency: i32,
    /// Sample format
    pub format: AudioFormat,
    /// Output channels, 1 mono, 2 stereo
    pub channels: i32,
    /// Bytes per output sample chunk
    pub chunk_size: i32,
    /// Mixing channels to allocate after opening, `None` keeps the default
    pub mixing_channels: Option<i32>,
    /// Output device name, `None` for the system default
    pub device: Option<String>,
}

impl AudioConfig {
    /// Set the number of mixing channels
    pub fn with_mixing_channels(mut self, count: i32) -> Self {
        self.mixing_channels = Some(count);
        self
    }

    /// Set the output frequency
    pub fn with_frequency(mut self, frequency: i32) -> Self {
        self.frequency = frequency;
        self
    }

    /// Open a named device
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency <= 0 {
            return Err(ConfigError::Invalid(format!("audio frequency must be positive, got {}", self.frequency)));
        }
        if self.channels < 1 {
            return Err(ConfigError::Invalid(format!("audio needs at least one channel, got {}", self.channels)));
        }
        if self.chunk_size <= 0 {
            return Err(ConfigError::Invalid(format!("chunk size must be positive, got {}", self.chunk_size)));
        }
        if self.mixing_channels.is_some_and(|n| n < 0) {
            return Err(ConfigError::Invalid("mixing channel count cannot be negative".to_string()));
        }
        Ok(())
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            format: AudioFormat::DEFAULT,
            channels: DEFAULT_CHANNELS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            mixing_channels: None,
            device: None,
        }
    }
}

/// Everything a session needs at start-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Subsystems for the root guard
    pub subsystems: SystemFlags,
    /// Main window
    pub window: WindowConfig,
    /// Main renderer
    pub renderer: RendererConfig,
    /// Audio device, `None` runs without sound
    pub audio: Option<AudioConfig>,
}

impl AppConfig {
    /// Replace the window settings
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.window = window;
        self
    }

    /// Replace the renderer settings
    pub fn with_renderer(mut self, renderer: RendererConfig) -> Self {
        self.renderer = renderer;
        self
    }

    /// Enable audio; adds the AUDIO subsystem
    pub fn with_audio(mut self, audio: AudioConfig) -> Self {
        self.subsystems |= SystemFlags::AUDIO;
        self.audio = Some(audio);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.subsystems.contains(SystemFlags::VIDEO) {
            return Err(ConfigError::Invalid("the VIDEO subsystem is required for a window".to_string()));
        }
        if self.audio.is_some() && !self.subsystems.contains(SystemFlags::AUDIO) {
            return Err(ConfigError::Invalid("audio settings given without the AUDIO subsystem".to_string()));
        }
        self.window.validate()?;
        if let Some(audio) = &self.audio {
            audio.validate()?;
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subsystems: SystemFlags::VIDEO,
            window: WindowConfig::default(),
            renderer: RendererConfig::default(),
            audio: None,
        }
    }
}

impl Config for AppConfig {}
impl Config for WindowConfig {}
impl Config for AudioConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sdl2_kit_config_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.window.width, 800);
        assert_eq!(config.renderer.driver_index, -1);
        assert!(config.audio.is_none());
    }

    #[test]
    fn test_with_audio_adds_subsystem() {
        let config = AppConfig::default().with_audio(AudioConfig::default());
        assert!(config.subsystems.contains(SystemFlags::AUDIO | SystemFlags::VIDEO));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let bad_window = AppConfig::default().with_window(WindowConfig::default().with_size(0, 10));
        assert!(matches!(bad_window.validate(), Err(ConfigError::Invalid(_))));

        let mut no_audio = AppConfig::default();
        no_audio.audio = Some(AudioConfig::default());
        assert!(no_audio.validate().is_err());

        let mut no_video = AppConfig::default();
        no_video.subsystems = SystemFlags::AUDIO;
        assert!(no_video.validate().is_err());

        assert!(AudioConfig::default().with_frequency(0).validate().is_err());
        assert!(AudioConfig::default().with_mixing_channels(-2).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("app.toml");
        let config = AppConfig::default()
            .with_window(WindowConfig::default().with_title("demo").with_flags(WindowFlags::RESIZABLE))
            .with_audio(AudioConfig::default().with_mixing_channels(16));
        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_ron_partial_file_uses_defaults() {
        let path = temp_path("window.ron");
        std::fs::write(&path, "(title: \"partial\", width: 320)").unwrap();
        let loaded = WindowConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.title, "partial");
        assert_eq!(loaded.width, 320);
        assert_eq!(loaded.height, WindowConfig::default().height);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_unsupported_extension() {
        let err = AppConfig::default().save_to_file("settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
        assert!(matches!(
            AppConfig::load_from_file(temp_path("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_bad_contents_are_parse_errors() {
        let path = temp_path("broken.toml");
        std::fs::write(&path, "window = 3").unwrap();
        assert!(matches!(AppConfig::load_from_file(&path), Err(ConfigError::Parse(_))));
        std::fs::remove_file(path).ok();
    }
}
