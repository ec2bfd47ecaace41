// Host-side tests for the console: pointer routing, ticks and mixer writes,
// driven through the in-memory mixer and transports.

use glam::Vec2;
use turntable::constants::DISC_CENTERS;
use turntable::{
    linear_to_db, Band, ConfigError, Console, ConsoleConfig, Control, CrossfadeMode, Deck,
    MemoryMixer, MemoryTransport, PointerEvent, PointerSample, Transport,
    SILENCE_DB,
};

type TestConsole = Console<MemoryMixer, MemoryTransport>;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn mixer_for(config: &ConsoleConfig) -> MemoryMixer {
    MemoryMixer::with_parameters(
        config
            .parameter_names()
            .into_iter()
            .map(|(_, name)| name.to_owned()),
    )
}

fn console_with(config: ConsoleConfig, a: MemoryTransport, b: MemoryTransport) -> TestConsole {
    let mixer = mixer_for(&config);
    Console::with_transports(config, mixer, a, b).unwrap()
}

fn console() -> TestConsole {
    console_with(
        ConsoleConfig::default(),
        MemoryTransport::with_clip(10.0),
        MemoryTransport::with_clip(10.0),
    )
}

fn at(position: Vec2, time: f32) -> PointerSample {
    PointerSample::new(position, time)
}

fn knob_center(c: &TestConsole, deck: Deck, band: Band) -> Vec2 {
    c.config().deck(deck).eq[band.index()].area.center
}

#[test]
fn initial_values_reach_the_mixer() {
    let c = console();
    let m = c.mixer();
    assert!(approx(m.value("Disco_01_Volume").unwrap(), -3.0103));
    assert!(approx(m.value("Disco_02_Volume").unwrap(), -3.0103));
    assert_eq!(m.value("Disco_01_Pitch"), Some(1.0));
    assert_eq!(m.value("Disco_02_Pitch"), Some(1.0));
    assert_eq!(m.value("Disco_01_Fader"), Some(0.0));
    for name in ["Disco_01_Low", "Disco_01_Mid", "Disco_02_High"] {
        assert!(approx(m.value(name).unwrap(), 0.0), "{name}");
    }
    assert!(c.params().unresolved().next().is_none());
}

#[test]
fn transports_start_paused_at_zero() {
    let mut a = MemoryTransport::with_clip(10.0);
    a.set_playing(true);
    a.set_time(4.0);
    let c = console_with(ConsoleConfig::default(), a, MemoryTransport::with_clip(10.0));
    let t = c.transport(Deck::A).unwrap();
    assert!(!t.is_playing());
    assert_eq!(t.time(), 0.0);
    assert_eq!(t.seeks(), &[0.0]);
}

#[test]
fn start_paused_can_be_turned_off() {
    let config = ConsoleConfig {
        start_paused: false,
        ..ConsoleConfig::default()
    };
    let mut a = MemoryTransport::with_clip(10.0);
    a.set_playing(true);
    let c = console_with(config, a, MemoryTransport::with_clip(10.0));
    assert!(c.transport(Deck::A).unwrap().is_playing());
    assert_eq!(c.transport(Deck::A).unwrap().pause_calls(), 0);
}

#[test]
fn initial_visuals_are_populated() {
    let c = console();
    let v = c.visual();
    assert_eq!(v.knobs[0][Band::Low.index()].text, "LOW\n0 dB");
    assert_eq!(v.knobs[1][Band::High.index()].text, "HIGH\n0 dB");
    assert!(approx(v.knobs[0][0].fill, 0.375));
    assert_eq!(v.crossfade_position, 0.5);
    assert!(v.crossfade.is_some());
}

#[test]
fn scratch_follows_pointer_until_release() {
    let mut c = console();
    c.transport_mut(Deck::A).unwrap().set_time(5.0);
    let center = DISC_CENTERS[0];

    c.handle_pointer(PointerEvent::Enter(Control::Disc(Deck::A)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(100.0, 0.0), 0.0)));
    assert!(c.scratch(Deck::A).is_dragging());
    assert!(c.take_ui_refresh(Deck::A));
    assert!(!c.take_ui_refresh(Deck::A));

    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(0.0, -100.0), 0.1)));
    c.tick(0.016);
    assert!(approx(c.disc_rotation(Deck::A), 270.0));
    assert!(approx(c.visual().discs[0].last_step, -90.0));
    assert!(approx(c.transport(Deck::A).unwrap().time(), 5.9));

    // leaving the platter does not end the drag
    c.handle_pointer(PointerEvent::Exit(Control::Disc(Deck::A)));
    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(-100.0, 0.0), 0.2)));
    c.tick(0.016);
    assert!(approx(c.disc_rotation(Deck::A), 180.0));
    assert!(approx(c.transport(Deck::A).unwrap().time(), 6.8));

    c.handle_pointer(PointerEvent::Up(at(center + Vec2::new(-100.0, 0.0), 0.3)));
    assert!(!c.scratch(Deck::A).is_dragging());
    assert!(c.input().capture.is_none());
    assert!(c.take_ui_refresh(Deck::A));
    assert_eq!(c.transport(Deck::B).unwrap().seeks().len(), 1);
}

#[test]
fn scratch_resumes_playback_on_release() {
    let mut c = console_with(
        ConsoleConfig::default(),
        MemoryTransport::with_clip(10.0).stop_on_seek(true),
        MemoryTransport::with_clip(10.0),
    );
    c.play(Deck::A);
    let center = DISC_CENTERS[0];
    c.handle_pointer(PointerEvent::Enter(Control::Disc(Deck::A)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(100.0, 0.0), 1.0)));
    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(0.0, 100.0), 1.1)));
    c.tick(0.016);
    assert!(!c.transport(Deck::A).unwrap().is_playing());

    c.handle_pointer(PointerEvent::Up(at(center + Vec2::new(0.0, 100.0), 1.2)));
    let t = c.transport(Deck::A).unwrap();
    assert!(t.is_playing());
    assert_eq!(t.play_calls(), 2);
}

#[test]
fn platter_spins_while_playing_and_not_hovered() {
    let mut c = console();
    c.play(Deck::A);
    c.tick(0.5);
    assert!(approx(c.disc_rotation(Deck::A), 270.0));
    assert!(approx(c.visual().discs[0].last_step, -90.0));
    assert_eq!(c.disc_rotation(Deck::B), 0.0);

    c.handle_pointer(PointerEvent::Enter(Control::Disc(Deck::A)));
    c.tick(0.5);
    assert!(approx(c.disc_rotation(Deck::A), 270.0));

    c.handle_pointer(PointerEvent::Exit(Control::Disc(Deck::A)));
    c.tick(0.25);
    assert!(approx(c.disc_rotation(Deck::A), 225.0));
}

#[test]
fn pitch_clamps_for_mixer_but_spins_raw() {
    let mut c = console();
    assert_eq!(c.set_pitch(Deck::A, 3.0), Some(2.0));
    assert_eq!(c.mixer().value("Disco_01_Pitch"), Some(2.0));
    assert_eq!(c.mixer().value("Disco_02_Pitch"), Some(1.0));
    assert_eq!(c.speed_multiplier(Deck::A), 3.0);
    assert_eq!(c.pitch(Deck::A), 3.0);

    c.play(Deck::A);
    c.tick(0.1);
    assert!(approx(c.disc_rotation(Deck::A), 306.0));
}

#[test]
fn toggle_play_flips_transport_and_requests_refresh() {
    let mut c = console();
    c.toggle_play(Deck::B);
    assert!(c.transport(Deck::B).unwrap().is_playing());
    assert!(c.take_ui_refresh(Deck::B));
    c.toggle_play(Deck::B);
    assert!(!c.transport(Deck::B).unwrap().is_playing());
    c.pause(Deck::B);
    assert!(!c.transport(Deck::B).unwrap().is_playing());
    assert!(!c.take_ui_refresh(Deck::A));
}

#[test]
fn missing_transport_makes_deck_inert() {
    let config = ConsoleConfig::default();
    let mixer = mixer_for(&config);
    let mut c: TestConsole =
        Console::new(config, mixer, [Some(MemoryTransport::with_clip(10.0)), None]).unwrap();

    c.toggle_play(Deck::B);
    assert!(!c.take_ui_refresh(Deck::B));
    assert!(c.transport(Deck::B).is_none());

    let center = DISC_CENTERS[1];
    c.handle_pointer(PointerEvent::Enter(Control::Disc(Deck::B)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(50.0, 0.0), 0.0)));
    assert!(!c.scratch(Deck::B).is_dragging());
    c.tick(0.1);
    assert_eq!(c.disc_rotation(Deck::B), 0.0);
}

#[test]
fn knob_click_applies_then_resets() {
    let mut c = console();
    let center = knob_center(&c, Deck::A, Band::Low);
    let press = center + Vec2::new(20.0, 0.0);

    c.handle_pointer(PointerEvent::Enter(Control::Knob(Deck::A, Band::Low)));
    c.handle_pointer(PointerEvent::Down(at(press, 0.0)));
    assert!(approx(c.mixer().value("Disco_01_Low").unwrap(), 20.0));
    assert_eq!(c.input().capture, Some(Control::Knob(Deck::A, Band::Low)));

    c.handle_pointer(PointerEvent::Up(at(press, 0.05)));
    assert!(approx(c.knob(Deck::A, Band::Low).value(), 0.0));
    assert!(approx(c.mixer().value("Disco_01_Low").unwrap(), 0.0));
    assert!(!c.knob(Deck::A, Band::Low).is_pressed());
}

#[test]
fn knob_drag_keeps_value() {
    let mut c = console();
    let center = knob_center(&c, Deck::B, Band::Mid);

    c.handle_pointer(PointerEvent::Enter(Control::Knob(Deck::B, Band::Mid)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(20.0, 0.0), 0.0)));
    c.handle_pointer(PointerEvent::Exit(Control::Knob(Deck::B, Band::Mid)));
    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(-20.0, 0.0), 0.05)));
    c.tick(0.016);
    assert!(approx(c.mixer().value("Disco_02_Mid").unwrap(), -20.0));

    c.handle_pointer(PointerEvent::Up(at(center + Vec2::new(-20.0, 0.0), 0.1)));
    assert!(approx(c.knob(Deck::B, Band::Mid).value(), -20.0));
    assert_eq!(c.visual().knobs[1][Band::Mid.index()].text, "MID\n-20 dB");
}

#[test]
fn knob_drag_into_dead_zone_holds_last_value() {
    let mut c = console();
    let center = knob_center(&c, Deck::A, Band::High);
    c.handle_pointer(PointerEvent::Enter(Control::Knob(Deck::A, Band::High)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(20.0, 0.0), 0.0)));
    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(0.0, -20.0), 0.05)));
    c.tick(0.016);
    assert!(approx(c.knob(Deck::A, Band::High).value(), 20.0));
    c.handle_pointer(PointerEvent::Up(at(center + Vec2::new(0.0, -20.0), 0.1)));
    assert!(approx(c.knob(Deck::A, Band::High).value(), 20.0));
}

#[test]
fn knob_wins_over_platter_when_both_hovered() {
    let mut c = console();
    let center = knob_center(&c, Deck::A, Band::Mid);
    c.handle_pointer(PointerEvent::Enter(Control::Disc(Deck::A)));
    c.handle_pointer(PointerEvent::Enter(Control::Knob(Deck::A, Band::Mid)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(0.0, 20.0), 0.0)));
    assert_eq!(c.input().capture, Some(Control::Knob(Deck::A, Band::Mid)));
    assert!(!c.scratch(Deck::A).is_dragging());
}

#[test]
fn reset_knob_restores_initial_value() {
    let mut c = console();
    let center = knob_center(&c, Deck::A, Band::Mid);
    c.handle_pointer(PointerEvent::Enter(Control::Knob(Deck::A, Band::Mid)));
    c.handle_pointer(PointerEvent::Down(at(center + Vec2::new(20.0, 0.0), 0.0)));
    c.handle_pointer(PointerEvent::Move(at(center + Vec2::new(20.0, 20.0), 0.05)));
    c.handle_pointer(PointerEvent::Up(at(center + Vec2::new(20.0, 20.0), 0.1)));
    assert!(approx(c.knob(Deck::A, Band::Mid).value(), 20.0));
    assert_eq!(c.reset_knob(Deck::A, Band::Mid), 0.0);
    assert!(approx(c.mixer().value("Disco_01_Mid").unwrap(), 0.0));
    assert_eq!(
        c.knob(Deck::A, Band::Mid).config().initial_fill,
        c.visual().knobs[0][Band::Mid.index()].fill
    );
}

#[test]
fn crossfade_writes_both_gains() {
    let mut c = console();
    c.set_crossfade(1.0);
    assert!(approx(c.mixer().value("Disco_01_Volume").unwrap(), 0.0));
    assert_eq!(c.mixer().value("Disco_02_Volume"), Some(SILENCE_DB));

    c.set_crossfade_mode(CrossfadeMode::Linear);
    c.set_crossfade(0.5);
    assert!(approx(c.mixer().value("Disco_01_Volume").unwrap(), -6.0206));
    assert_eq!(c.crossfade().mode, CrossfadeMode::Linear);

    c.set_crossfade(f32::NAN);
    assert_eq!(c.crossfade().position, 0.5);
    assert_eq!(c.visual().crossfade_position, 0.5);
}

#[test]
fn unknown_gain_parameter_is_skipped() {
    let config = ConsoleConfig::default();
    let names: Vec<String> = config
        .parameter_names()
        .into_iter()
        .map(|(_, n)| n.to_owned())
        .filter(|n| n != "Disco_01_Volume")
        .collect();
    let mixer = MemoryMixer::with_parameters(names);
    let mut c: TestConsole = Console::with_transports(
        config,
        mixer,
        MemoryTransport::with_clip(10.0),
        MemoryTransport::with_clip(10.0),
    )
    .unwrap();
    assert_eq!(c.params().unresolved().count(), 1);

    c.set_crossfade(0.25);
    let expected = linear_to_db((0.25 * std::f32::consts::FRAC_PI_2).cos());
    assert!(approx(c.mixer().value("Disco_02_Volume").unwrap(), expected));
    assert!(c.mixer().value("Disco_01_Volume").is_none());
}

#[test]
fn rejected_gain_write_does_not_block_the_other() {
    let mut c = console();
    c.mixer_mut().reject("Disco_01_Volume");
    c.mixer_mut().clear_writes();
    c.set_crossfade(0.8);
    assert_eq!(c.mixer().writes_to("Disco_01_Volume"), 0);
    assert_eq!(c.mixer().writes_to("Disco_02_Volume"), 1);
}

#[test]
fn channel_volume_is_written_in_decibels() {
    let mut c = console();
    let db = c.set_volume(Deck::B, 0.5).unwrap();
    assert!(approx(db, -6.0206));
    assert!(approx(c.mixer().value("Disco_02_Fader").unwrap(), -6.0206));
    assert_eq!(c.set_volume(Deck::B, 0.0), Some(SILENCE_DB));
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = ConsoleConfig::default();
    config.decks[0].scratch.sensitivity = 1.0;
    let mixer = mixer_for(&config);
    let result: Result<TestConsole, ConfigError> = Console::with_transports(
        config,
        mixer,
        MemoryTransport::with_clip(10.0),
        MemoryTransport::with_clip(10.0),
    );
    assert!(matches!(
        result,
        Err(ConfigError::OutOfRange {
            what: "scratch sensitivity",
            ..
        })
    ));

    let mut config = ConsoleConfig::default();
    config.decks[1].base_rotation_speed = 1000.0;
    let mixer = mixer_for(&config);
    let result: Result<TestConsole, ConfigError> = Console::new(config, mixer, [None, None]);
    assert!(result.is_err());
}
