//! Bouncing sprite demo
//!
//! Opens a window from an optional config file, bounces a handful of sprites
//! around it, draws a text label when a font is given and plays a sound when
//! the config opens an audio device.
//!
//! Usage: `sprite_demo [config.toml|config.ron] [font.ttf] [sound.wav]`
//!
//! Without the `sdl` feature everything runs against the headless backend, so
//! the demo doubles as a smoke test on machines without a display.

use std::path::{Path, PathBuf};

use sdl2_kit::backend::{Mixer, Ttf};
use sdl2_kit::prelude::*;
use sdl2_kit::system;

#[cfg(feature = "sdl")]
type Backend = sdl2_kit::Sdl;
#[cfg(not(feature = "sdl"))]
type Backend = sdl2_kit::Headless;

const FRAMES: u32 = 600;
const SPRITE_SIZE: i32 = 24;
const SPRITE_COUNT: usize = 8;
const BACKGROUND: Color = Color::rgb(18, 22, 40);

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Init(#[from] InitError),

    #[error("failed to create {0}: {1}")]
    Create(&'static str, String),
}

struct Sprite {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
    angle: f64,
}

impl Sprite {
    fn spawn(index: usize, bounds: Size) -> Self {
        let i = index as f32;
        Self {
            x: (i * 37.0) % (bounds.w - SPRITE_SIZE).max(1) as f32,
            y: (i * 53.0) % (bounds.h - SPRITE_SIZE).max(1) as f32,
            dx: 1.5 + i * 0.25,
            dy: 2.0 - i * 0.2,
            angle: 0.0,
        }
    }

    fn step(&mut self, bounds: Size) {
        let max_x = (bounds.w - SPRITE_SIZE) as f32;
        let max_y = (bounds.h - SPRITE_SIZE) as f32;
        self.x += self.dx;
        self.y += self.dy;
        if self.x < 0.0 || self.x > max_x {
            self.dx = -self.dx;
            self.x = self.x.clamp(0.0, max_x.max(0.0));
        }
        if self.y < 0.0 || self.y > max_y {
            self.dy = -self.dy;
            self.y = self.y.clamp(0.0, max_y.max(0.0));
        }
        self.angle = (self.angle + 3.0) % 360.0;
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x as i32, self.y as i32, SPRITE_SIZE, SPRITE_SIZE)
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig, DemoError> {
    let config = match path {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            AppConfig::load_from_file(path)?
        }
        None => AppConfig::default().with_window(
            WindowConfig::default()
                .with_title("sdl2_kit - Sprites")
                .with_position(position::CENTERED, position::CENTERED)
                .with_size(640, 480),
        ),
    };
    config.validate()?;
    Ok(config)
}

fn run<B: Ttf + Mixer>(
    config: &AppConfig,
    font_path: Option<&Path>,
    sound_path: Option<&Path>,
) -> Result<(), DemoError> {
    let _root = Root::<B>::try_new(config.subsystems)?;
    let audio = config.audio.as_ref().map(AudioDevice::<B>::open).transpose()?;
    let _ttf = TtfRoot::<B>::try_new()?;

    let window = Window::<B>::from_config(&config.window);
    if !window.is_valid() {
        return Err(DemoError::Create("window", system::last_error::<B>()));
    }
    let mut renderer = Renderer::from_config(&window, &config.renderer);
    if !renderer.is_valid() {
        return Err(DemoError::Create("renderer", system::last_error::<B>()));
    }
    if let Some(info) = renderer.info() {
        log::info!("Using render driver '{}' ({:?})", info.name, info.flags);
    }

    let mut pattern = Surface::<B>::with_format(SPRITE_SIZE, SPRITE_SIZE, PixelFormat::ARGB8888);
    pattern.fill_rect(None, 0xFFE0_8030);
    pattern.fill_rect(Some(&Rect::new(4, 4, SPRITE_SIZE - 8, SPRITE_SIZE - 8)), 0xFF30_2010);
    let sprite = Texture::from_surface(&renderer, &pattern);
    if !sprite.is_valid() {
        return Err(DemoError::Create("sprite texture", system::last_error::<B>()));
    }

    let label = font_path
        .map(|path| Font::<B>::open(path, 16))
        .filter(|font| font.is_valid())
        .map(|font| Texture::from_surface(&renderer, &font.render_utf8_blended("sdl2_kit", Color::WHITE)));
    let label_size = label.as_ref().and_then(Texture::size);

    let sound = sound_path
        .filter(|_| audio.is_some())
        .map(Sound::<B>::load)
        .filter(Sound::is_valid);
    if let Some(channel) = sound.as_ref().and_then(|s| s.play(0, Channel::any())) {
        log::info!("Playing sound on channel {}", channel.id());
    }

    let bounds = renderer
        .output_size()
        .unwrap_or(Size::new(config.window.width, config.window.height));
    let mut sprites: Vec<_> = (0..SPRITE_COUNT).map(|i| Sprite::spawn(i, bounds)).collect();

    for frame in 0..FRAMES {
        sprites.iter_mut().for_each(|s| s.step(bounds));

        renderer.set_draw_color(BACKGROUND);
        renderer.clear();
        for sprite_state in &sprites {
            let flip = if sprite_state.dx < 0.0 { Flip::HORIZONTAL } else { Flip::NONE };
            renderer.copy_ex(&sprite, None, Some(&sprite_state.rect()), sprite_state.angle, None, flip);
        }
        if let (Some(label), Some(size)) = (&label, label_size) {
            renderer.copy(label, None, Some(&Rect::new(8, 8, size.w, size.h)));
        }
        renderer.present();

        if frame % 120 == 0 {
            log::debug!("frame {frame}");
        }
    }

    log::info!("Rendered {FRAMES} frames");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    sdl2_kit::foundation::logging::init();

    log::info!("Starting sprite demo");

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let config_path = args.next();
    let font_path = args.next();
    let sound_path = args.next();

    let config = load_config(config_path.as_deref())?;
    match run::<Backend>(&config, font_path.as_deref(), sound_path.as_deref()) {
        Ok(()) => {
            log::info!("Sprite demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Sprite demo failed: {e}");
            Err(e.into())
        }
    }
}
