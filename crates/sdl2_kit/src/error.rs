//! Error types for the fallible guard constructors
//!
//! Wrapper operations report failure with `bool`/`Option`. Only the subsystem
//! guards have a `try_new` that explains what went wrong.

use crate::audio::MixerFlags;
use crate::image::ImageFlags;
use crate::system::SystemFlags;

/// Subsystem initialization failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    /// Core library init failed
    #[error("failed to initialize subsystems {flags:?}: {message}")]
    Core {
        /// Requested subsystems
        flags: SystemFlags,
        /// Native error string
        message: String,
    },

    /// Mixer decoders could not be loaded
    #[error("failed to initialize mixer decoders {requested:?}: {message}")]
    Mixer {
        /// Requested decoders
        requested: MixerFlags,
        /// Native error string
        message: String,
    },

    /// Audio device could not be opened
    #[error("failed to open audio device: {0}")]
    AudioDevice(String),

    /// Font library init failed
    #[error("failed to initialize font rendering: {0}")]
    Ttf(String),

    /// Image loaders could not be loaded
    #[error("failed to initialize image loaders {requested:?}: {message}")]
    Image {
        /// Requested loaders
        requested: ImageFlags,
        /// Native error string
        message: String,
    },
}

/// Result alias for guard construction
pub type InitResult<T> = Result<T, InitError>;
