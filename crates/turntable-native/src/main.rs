use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use turntable::constants::WINDOW_SIZE;
use turntable::{
    clamp_pitch, Console, ConsoleConfig, Control, CrossfadeMode, Deck, MemoryMixer,
    MemoryTransport, PointerEvent, PointerSample, Transport,
};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

// Stand-in clip lengths for the two in-memory decks (seconds)
const CLIP_SECONDS: [f32; 2] = [212.0, 187.0];
const CROSSFADE_STEP: f32 = 0.05;
const PITCH_STEP: f32 = 0.05;
const STATUS_INTERVAL_SEC: f32 = 2.0;

type NativeConsole = Console<MemoryMixer, MemoryTransport>;

struct Driver {
    console: NativeConsole,
    hovered: Option<Control>,
    scale_factor: f64,
    window_height: f32,
    start: Instant,
    last_frame: Instant,
    status_accum: f32,
}

impl Driver {
    fn new(console: NativeConsole, scale_factor: f64, size: PhysicalSize<u32>) -> Self {
        let now = Instant::now();
        Self {
            console,
            hovered: None,
            scale_factor,
            window_height: size.to_logical::<f32>(scale_factor).height,
            start: now,
            last_frame: now,
            status_accum: 0.0,
        }
    }

    fn now(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_height = size.to_logical::<f32>(self.scale_factor).height;
    }

    // winit is y-down; the console expects y-up
    fn to_console(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let logical = position.to_logical::<f32>(self.scale_factor);
        Vec2::new(logical.x, self.window_height - logical.y)
    }

    fn set_hover(&mut self, target: Option<Control>) {
        if target == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered {
            self.console.handle_pointer(PointerEvent::Exit(prev));
        }
        if let Some(next) = target {
            self.console.handle_pointer(PointerEvent::Enter(next));
        }
        self.hovered = target;
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let p = self.to_console(position);
        let target = self.console.config().hit_test(p);
        self.set_hover(target);
        let sample = PointerSample::new(p, self.now());
        self.console.handle_pointer(PointerEvent::Move(sample));
    }

    fn mouse_button(&mut self, state: ElementState) {
        let sample = PointerSample::new(self.console.input().mouse.position, self.now());
        let event = match state {
            ElementState::Pressed => PointerEvent::Down(sample),
            ElementState::Released => PointerEvent::Up(sample),
        };
        self.console.handle_pointer(event);
    }

    /// Returns `false` when the key asks to quit.
    fn key(&mut self, key: &Key) -> bool {
        match key {
            Key::Named(NamedKey::Escape) => return false,
            Key::Named(NamedKey::Space) => self.console.toggle_play(Deck::A),
            Key::Named(NamedKey::Enter) => self.console.toggle_play(Deck::B),
            Key::Named(NamedKey::ArrowLeft) => {
                let p = self.console.crossfade().position;
                self.console.set_crossfade(p - CROSSFADE_STEP);
            }
            Key::Named(NamedKey::ArrowRight) => {
                let p = self.console.crossfade().position;
                self.console.set_crossfade(p + CROSSFADE_STEP);
            }
            Key::Named(NamedKey::ArrowUp) => {
                let p = self.console.pitch(Deck::A);
                self.console.set_pitch(Deck::A, p + PITCH_STEP);
            }
            Key::Named(NamedKey::ArrowDown) => {
                let p = self.console.pitch(Deck::A);
                self.console.set_pitch(Deck::A, p - PITCH_STEP);
            }
            Key::Character(c) => {
                let mode = match c.as_str() {
                    "1" => Some(CrossfadeMode::Linear),
                    "2" => Some(CrossfadeMode::EqualPower),
                    "3" => Some(CrossfadeMode::Logarithmic),
                    _ => None,
                };
                if let Some(mode) = mode {
                    self.console.set_crossfade_mode(mode);
                }
            }
            _ => {}
        }
        true
    }

    fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        for deck in Deck::ALL {
            let rate = clamp_pitch(self.console.pitch(deck));
            if let Some(t) = self.console.transport_mut(deck) {
                t.advance(dt, rate);
            }
        }
        self.console.tick(dt);

        for deck in Deck::ALL {
            if self.console.take_ui_refresh(deck) {
                let playing = self
                    .console
                    .transport(deck)
                    .is_some_and(|t| t.is_playing());
                log::info!("[ui] deck {:?} playing={}", deck, playing);
            }
        }

        self.status_accum += dt;
        if self.status_accum >= STATUS_INTERVAL_SEC {
            self.status_accum = 0.0;
            self.log_status();
        }
    }

    fn log_status(&self) {
        let v = self.console.visual();
        for deck in Deck::ALL {
            let time = self
                .console
                .transport(deck)
                .map_or(0.0, |t| t.time());
            log::debug!(
                "[status] deck {:?} t={:.2}s disc={:.1}° pitch={:.2}",
                deck,
                time,
                v.discs[deck.index()].rotation,
                self.console.pitch(deck)
            );
        }
        if let Some(xf) = v.crossfade {
            log::debug!(
                "[status] crossfade {:.2} -> A {:.1} dB, B {:.1} dB",
                v.crossfade_position,
                xf.db_a,
                xf.db_b
            );
        }
    }
}

fn build_console() -> anyhow::Result<NativeConsole> {
    let config = ConsoleConfig::default();
    let names: Vec<String> = config
        .parameter_names()
        .into_iter()
        .map(|(_, name)| name.to_owned())
        .collect();
    let mixer = MemoryMixer::with_parameters(names);
    let decks = CLIP_SECONDS.map(|len| MemoryTransport::with_clip(len).looping(true));
    let [a, b] = decks;
    Console::with_transports(config, mixer, a, b).context("invalid console configuration")
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let console = build_console()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let window = WindowBuilder::new()
        .with_title("Turntable (native)")
        .with_inner_size(LogicalSize::new(WINDOW_SIZE.x as f64, WINDOW_SIZE.y as f64))
        .build(&event_loop)?;

    let mut driver = Driver::new(console, window.scale_factor(), window.inner_size());
    log::info!("space/enter: play A/B, arrows: crossfade & pitch, 1-3: curve, esc: quit");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => driver.resize(size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                driver.scale_factor = scale_factor;
                driver.resize(window.inner_size());
            }
            WindowEvent::CursorMoved { position, .. } => driver.cursor_moved(position),
            WindowEvent::CursorLeft { .. } => driver.set_hover(None),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => driver.mouse_button(state),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if !driver.key(&logical_key) {
                    elwt.exit();
                }
            }
            _ => {}
        },
        Event::AboutToWait => driver.frame(),
        _ => {}
    })?;
    Ok(())
}
