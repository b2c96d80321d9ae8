//! End-to-end sessions against the headless backend

use sdl2_kit::backend::headless::{self, Call, Fault, Resource};
use sdl2_kit::foundation::logging;
use sdl2_kit::prelude::*;
use sdl2_kit::{system, Headless};

const RESOURCES: [Resource; 7] = [
    Resource::Window,
    Resource::Renderer,
    Resource::Texture,
    Resource::Surface,
    Resource::Chunk,
    Resource::Music,
    Resource::Font,
];

fn assert_balanced() {
    for resource in RESOURCES {
        assert_eq!(
            headless::count(&Call::Create(resource)),
            headless::count(&Call::Release(resource)),
            "{resource:?} created and released a different number of times"
        );
    }
}

fn hidden_window() -> WindowConfig {
    WindowConfig::default()
        .with_title("session")
        .with_size(64, 48)
        .with_flags(WindowFlags::HIDDEN)
}

#[test]
fn full_session_releases_everything_in_order() {
    logging::init_for_tests();
    headless::reset();
    let config = AppConfig::default()
        .with_window(hidden_window())
        .with_audio(AudioConfig::default().with_mixing_channels(4));
    assert!(config.validate().is_ok());

    {
        let root = Root::<Headless>::try_new(config.subsystems).unwrap();
        assert_eq!(root.flags(), SystemFlags::VIDEO | SystemFlags::AUDIO);
        let _mixer = MixerRoot::<Headless>::new(MixerFlags::OGG);
        let device = AudioDevice::<Headless>::open(config.audio.as_ref().unwrap()).unwrap();
        assert_eq!(device.spec().channels, 2);
        let _ttf = TtfRoot::<Headless>::new();
        let _image = ImageRoot::<Headless>::new(ImageFlags::PNG);

        let window = Window::<Headless>::from_config(&config.window);
        assert!(window.is_valid());
        let mut renderer = Renderer::from_config(&window, &config.renderer);
        assert!(renderer.is_valid());

        let font = Font::<Headless>::open(headless::fixture("session.ttf", b"font"), 20);
        let label = font.render_utf8_blended("Hi", Color::WHITE);
        assert_eq!((label.width(), label.height()), (20, 20));
        let texture = Texture::from_surface(&renderer, &label);
        assert_eq!(texture.size(), Some(Size::new(20, 20)));

        assert!(renderer.set_draw_color(Color::rgb(10, 20, 30)));
        assert!(renderer.clear());
        assert!(renderer.copy(&texture, None, Some(&Rect::new(4, 4, 20, 20))));
        renderer.present();
        assert_eq!(headless::draw_calls(&renderer), 1);
        assert_eq!(headless::presents(&renderer), 1);

        let sound = Sound::<Headless>::load(headless::fixture("session.wav", b"RIFF"));
        let channel = sound.play(0, Channel::any()).unwrap();
        assert!(channel.is_playing());
        drop(sound);
        assert!(!channel.is_playing());
    }

    let journal = headless::journal();
    assert_eq!(journal.first(), Some(&Call::Init(0x30)));
    assert_eq!(journal.last(), Some(&Call::Quit));
    let position = |call: &Call| journal.iter().position(|c| c == call).unwrap();
    assert!(position(&Call::Release(Resource::Font)) < position(&Call::TtfQuit));
    assert!(position(&Call::CloseAudio) < position(&Call::MixQuit));
    assert!(position(&Call::Release(Resource::Window)) < position(&Call::ImgQuit));
    assert_balanced();
}

#[test]
fn failed_creations_leave_invalid_handles() {
    logging::init_for_tests();
    headless::reset();
    let early = Window::<Headless>::new("early", 0, 0, 10, 10, WindowFlags::HIDDEN);
    assert!(!early.is_valid());
    assert!(!system::last_error::<Headless>().is_empty());

    let _root = Root::<Headless>::new(SystemFlags::VIDEO);
    let window = Window::<Headless>::from_config(&hidden_window());
    let renderer = Renderer::new(&window, RendererFlags::empty(), -1);

    headless::inject(Fault::Create(Resource::Texture));
    let failed = Texture::new(&renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 8, 8);
    assert!(!failed.is_valid());
    assert_eq!(failed.size(), None);

    let texture = Texture::new(&renderer, PixelFormat::ARGB8888, TextureAccess::Streaming, 8, 8);
    assert!(texture.is_valid());
    assert_eq!(headless::count(&Call::Create(Resource::Texture)), 1);
}

#[test]
fn moved_handles_release_once() {
    logging::init_for_tests();
    headless::reset();
    {
        let _root = Root::<Headless>::new(SystemFlags::VIDEO);
        let first = Window::<Headless>::from_config(&hidden_window());
        let moved = first;
        let mut windows = vec![moved];
        windows.push(Window::from_config(&hidden_window()));
        drop(windows.remove(0));
        assert_eq!(headless::count(&Call::Release(Resource::Window)), 1);
    }
    assert_eq!(headless::count(&Call::Create(Resource::Window)), 2);
    assert_balanced();
}

#[test]
fn channel_groups_follow_assignment() {
    logging::init_for_tests();
    headless::reset();
    let _root = Root::<Headless>::new(SystemFlags::AUDIO);
    let _device = AudioDevice::<Headless>::open(&AudioConfig::default()).unwrap();
    let group = ChannelGroup::<Headless>::new(7);
    assert_eq!(group.count(), 0);
    assert!(group.assign(Channel::new(2), Channel::new(4)));
    assert_eq!(group.count(), 3);

    let sound = Sound::<Headless>::load(headless::fixture("group.wav", b"RIFF"));
    let playing = sound.play(-1, Channel::new(3)).unwrap();
    assert_eq!(group.oldest(), Some(playing));
    assert!(group.halt());
    assert!(!playing.is_playing());
}
