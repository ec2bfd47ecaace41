//! Virtual DJ console.
//!
//! [`Console`] owns both decks, their EQ knobs and the crossfader, and is the
//! only thing that talks to the mixer and the transports. Front ends feed it
//! [`PointerEvent`]s as they arrive and call [`Console::tick`] once per frame.

pub mod config;
pub mod constants;
pub mod events;
mod frame;

pub use config::{ConsoleConfig, CrossfaderConfig, DeckConfig, EqKnobConfig, HitCircle};
pub use events::{Control, MouseState, PointerEvent, PointerInput};
pub use turntable_core::*;

pub(crate) struct DeckControls {
    pub scratch: ScratchEngine,
    pub rotation: DiscRotation,
    pub bridge: PitchVolumeBridge,
    pub eq: [RadialKnob; 3],
    pub ui_refresh: bool,
}

impl DeckControls {
    fn new(deck: Deck, config: &DeckConfig) -> Self {
        Self {
            scratch: ScratchEngine::new(config.scratch),
            rotation: DiscRotation::new(config.base_rotation_speed, config.initial_pitch),
            bridge: PitchVolumeBridge::new(deck, config.initial_pitch, config.initial_volume),
            eq: Band::ALL.map(|band| {
                RadialKnob::new(
                    ParamId::Eq(deck, band),
                    config.eq[band.index()].knob.clone(),
                )
            }),
            ui_refresh: false,
        }
    }
}

/// Log a failed parameter write and carry on.
pub(crate) fn warn_on_err<T>(result: Result<T, SinkError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("[console] {}", e);
            None
        }
    }
}

pub struct Console<M: Mixer, T: Transport> {
    config: ConsoleConfig,
    mixer: M,
    transports: [Option<T>; 2],
    params: ParamTable,
    decks: [DeckControls; 2],
    crossfade: CrossfadeEngine,
    input: PointerInput,
    visual: VisualState,
}

impl<M: Mixer, T: Transport> Console<M, T> {
    /// Build the console and push every control's initial value to the mixer.
    ///
    /// A missing transport is not an error: that deck's transport actions and
    /// scratching become no-ops.
    pub fn new(
        config: ConsoleConfig,
        mixer: M,
        transports: [Option<T>; 2],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = ParamTable::resolve(&mixer, config.parameter_names());
        let decks = Deck::ALL.map(|deck| DeckControls::new(deck, config.deck(deck)));
        let crossfade =
            CrossfadeEngine::new(config.crossfade.mode, config.crossfade.initial_position);
        let mut console = Self {
            config,
            mixer,
            transports,
            params,
            decks,
            crossfade,
            input: PointerInput::default(),
            visual: VisualState::default(),
        };
        console.initialize();
        Ok(console)
    }

    pub fn with_transports(
        config: ConsoleConfig,
        mixer: M,
        a: T,
        b: T,
    ) -> Result<Self, ConfigError> {
        Self::new(config, mixer, [Some(a), Some(b)])
    }

    fn initialize(&mut self) {
        for deck in Deck::ALL {
            match &mut self.transports[deck.index()] {
                Some(t) if self.config.start_paused => {
                    t.pause();
                    t.seek(0.0);
                }
                Some(_) => {}
                None => log::warn!("[console] deck {:?} has no transport", deck),
            }
            let d = &mut self.decks[deck.index()];
            for knob in &d.eq {
                warn_on_err(knob.write(&self.params, &mut self.mixer));
            }
            let pitch = d.bridge.pitch();
            let volume = d.bridge.volume();
            warn_on_err(
                d.bridge
                    .set_pitch(pitch, &self.params, &mut self.mixer, &mut d.rotation),
            );
            warn_on_err(d.bridge.set_volume(volume, &self.params, &mut self.mixer));
        }
        self.apply_crossfade();
        log::info!(
            "[console] ready ({} unresolved parameters)",
            self.params.unresolved().count()
        );
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn params(&self) -> &ParamTable {
        &self.params
    }

    pub fn mixer(&self) -> &M {
        &self.mixer
    }

    pub fn mixer_mut(&mut self) -> &mut M {
        &mut self.mixer
    }

    pub fn transport(&self, deck: Deck) -> Option<&T> {
        self.transports[deck.index()].as_ref()
    }

    pub fn transport_mut(&mut self, deck: Deck) -> Option<&mut T> {
        self.transports[deck.index()].as_mut()
    }

    pub fn input(&self) -> &PointerInput {
        &self.input
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    pub fn scratch(&self, deck: Deck) -> &ScratchEngine {
        &self.decks[deck.index()].scratch
    }

    pub fn knob(&self, deck: Deck, band: Band) -> &RadialKnob {
        &self.decks[deck.index()].eq[band.index()]
    }

    pub fn disc_rotation(&self, deck: Deck) -> f32 {
        self.decks[deck.index()].rotation.angle()
    }

    pub fn speed_multiplier(&self, deck: Deck) -> f32 {
        self.decks[deck.index()].rotation.speed_multiplier()
    }

    /// Raw pitch fader value for a deck.
    pub fn pitch(&self, deck: Deck) -> f32 {
        self.decks[deck.index()].bridge.pitch()
    }

    pub fn crossfade(&self) -> CrossfadeState {
        self.crossfade.state()
    }

    /// Drain the "refresh transport UI" request for a deck.
    pub fn take_ui_refresh(&mut self, deck: Deck) -> bool {
        std::mem::take(&mut self.decks[deck.index()].ui_refresh)
    }

    // ---------------- Pointer routing ----------------

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter(c) => self.input.enter(c),
            PointerEvent::Exit(c) => self.input.exit(c),
            PointerEvent::Move(s) => {
                self.input.record(s);
                if let Some(Control::Knob(deck, band)) = self.input.capture {
                    self.decks[deck.index()].eq[band.index()].track(s.position);
                }
            }
            PointerEvent::Down(s) => {
                self.input.record(s);
                self.input.mouse.down = true;
                if self.input.capture.is_none() {
                    self.press(s);
                }
            }
            PointerEvent::Up(s) => {
                self.input.record(s);
                self.input.mouse.down = false;
                self.release(s);
            }
        }
    }

    fn press(&mut self, sample: PointerSample) {
        let Some(target) = self.input.press_target() else {
            return;
        };
        match target {
            Control::Disc(deck) => {
                let origin = self.config.deck(deck).disc.center;
                let Some(transport) = self.transports[deck.index()].as_ref() else {
                    log::warn!("[console] deck {:?} has no transport; scratch skipped", deck);
                    return;
                };
                let d = &mut self.decks[deck.index()];
                if d.scratch.begin(sample, origin, d.rotation.angle(), transport) {
                    d.ui_refresh = true;
                    self.input.capture = Some(target);
                }
            }
            Control::Knob(deck, band) => {
                let center = self.config.deck(deck).eq[band.index()].area.center;
                let knob = &mut self.decks[deck.index()].eq[band.index()];
                knob.press(sample.position);
                if knob.drag_to(sample.position, center).is_some() {
                    warn_on_err(knob.write(&self.params, &mut self.mixer));
                }
                self.input.capture = Some(target);
                self.refresh_visuals();
            }
        }
    }

    fn release(&mut self, sample: PointerSample) {
        match self.input.capture.take() {
            Some(Control::Disc(deck)) => {
                let d = &mut self.decks[deck.index()];
                if let Some(transport) = self.transports[deck.index()].as_mut() {
                    d.scratch.end(transport);
                }
                d.ui_refresh = true;
            }
            Some(Control::Knob(deck, band)) => {
                let knob = &mut self.decks[deck.index()].eq[band.index()];
                knob.track(sample.position);
                if let KnobRelease::Reset(value) = knob.release() {
                    log::debug!("[knob] {:?}/{:?} reset to {:.2}", deck, band, value);
                    warn_on_err(knob.write(&self.params, &mut self.mixer));
                }
                self.refresh_visuals();
            }
            None => {}
        }
    }

    // ---------------- Direct control ----------------

    /// Return a knob to its configured initial value.
    pub fn reset_knob(&mut self, deck: Deck, band: Band) -> f32 {
        let knob = &mut self.decks[deck.index()].eq[band.index()];
        let value = knob.reset();
        warn_on_err(knob.write(&self.params, &mut self.mixer));
        self.refresh_visuals();
        value
    }

    /// Returns the pitch sent to the mixer (clamped). The platter picks up
    /// the raw value immediately, so the next tick already spins at it.
    pub fn set_pitch(&mut self, deck: Deck, value: f32) -> Option<f32> {
        let d = &mut self.decks[deck.index()];
        warn_on_err(
            d.bridge
                .set_pitch(value, &self.params, &mut self.mixer, &mut d.rotation),
        )
    }

    /// Channel fader in linear `[0, 1]`; returns the dB written.
    pub fn set_volume(&mut self, deck: Deck, linear: f32) -> Option<f32> {
        let d = &mut self.decks[deck.index()];
        warn_on_err(d.bridge.set_volume(linear, &self.params, &mut self.mixer))
    }

    pub fn set_crossfade(&mut self, position: f32) {
        self.crossfade.set_position(position);
        self.apply_crossfade();
    }

    pub fn set_crossfade_mode(&mut self, mode: CrossfadeMode) {
        self.crossfade.set_mode(mode);
        self.apply_crossfade();
    }

    // apply() already logs each failed channel
    fn apply_crossfade(&mut self) {
        let _ = self.crossfade.apply(&self.params, &mut self.mixer);
        self.refresh_visuals();
    }

    // ---------------- Transport ----------------

    pub fn play(&mut self, deck: Deck) {
        self.transport_action(deck, |t| t.play());
    }

    pub fn pause(&mut self, deck: Deck) {
        self.transport_action(deck, |t| t.pause());
    }

    pub fn toggle_play(&mut self, deck: Deck) {
        self.transport_action(deck, |t| {
            if t.is_playing() {
                t.pause();
            } else {
                t.play();
            }
        });
    }

    fn transport_action(&mut self, deck: Deck, action: impl FnOnce(&mut T)) {
        let Some(transport) = self.transports[deck.index()].as_mut() else {
            log::warn!("[console] deck {:?} has no transport", deck);
            return;
        };
        action(transport);
        let d = &mut self.decks[deck.index()];
        d.bridge.resync(&mut d.rotation);
        d.ui_refresh = true;
    }

    pub(crate) fn refresh_visuals(&mut self) {
        for deck in Deck::ALL {
            let d = &self.decks[deck.index()];
            self.visual.discs[deck.index()].rotation = d.rotation.angle();
            for band in Band::ALL {
                self.visual.knobs[deck.index()][band.index()] = d.eq[band.index()].visual();
            }
        }
        let state = self.crossfade.state();
        self.visual.crossfade_position = state.position;
        self.visual.crossfade = Some(self.crossfade.output());
    }
}
