//! # sdl2_kit
//!
//! Ownership-safe handles over SDL2 and its mixer, font and image companion
//! libraries.
//!
//! ## Features
//!
//! - **RAII handles**: every window, renderer, texture, surface, sound, music
//!   stream and font releases its native object exactly once
//! - **Scope guards**: [`system::Root`], [`audio::MixerRoot`],
//!   [`audio::AudioDevice`], [`text::TtfRoot`] and [`image::ImageRoot`] pair
//!   library init with shutdown
//! - **Typed flags**: bitflag sets combined with `|`
//! - **Plain results**: native status codes become `bool` or `Option`
//! - **Swappable backend**: the real library behind the `sdl` feature, or the
//!   in-process [`backend::headless::Headless`] backend for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sdl2_kit::prelude::*;
//! use sdl2_kit::Headless;
//!
//! let _root = Root::<Headless>::new(SystemFlags::VIDEO);
//! let window = Window::<Headless>::new("demo", position::CENTERED, position::CENTERED, 640, 480, WindowFlags::SHOWN);
//! let mut renderer = Renderer::new(&window, RendererFlags::ACCELERATED, -1);
//! renderer.set_draw_color(Color::rgb(30, 30, 60));
//! renderer.clear();
//! renderer.present();
//! ```

#![warn(missing_docs)]

pub mod audio;
pub mod backend;
pub mod config;
pub mod error;
pub mod foundation;
pub mod image;
pub mod render;
pub mod system;
pub mod text;

pub use backend::headless::Headless;
#[cfg(feature = "sdl")]
pub use backend::sdl::Sdl;
pub use error::{InitError, InitResult};

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        audio::{AudioDevice, AudioFormat, Channel, ChannelGroup, Fading, MixerFlags, MixerRoot, Music, Sound},
        config::{AppConfig, AudioConfig, Config, ConfigError, RendererConfig, WindowConfig},
        error::{InitError, InitResult},
        foundation::geometry::{Color, FPoint, FRect, Point, Rect, Size},
        image::{ImageFlags, ImageRoot},
        render::{
            position, BlendMode, Flip, PixelFormat, Renderer, RendererFlags, ScaleMode, Surface, Texture,
            TextureAccess, Window, WindowFlags,
        },
        system::{Root, SystemFlags},
        text::{Font, FontStyle, TtfRoot},
    };
}
