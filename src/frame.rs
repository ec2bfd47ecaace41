use crate::{warn_on_err, Console, Control};
use turntable_core::{Deck, Mixer, Transport};

impl<M: Mixer, T: Transport> Console<M, T> {
    /// Advance the console by one frame of `dt` seconds.
    ///
    /// Order within a frame: the grabbed control consumes the latest pointer
    /// position first, then each platter auto-rotates using the current pitch
    /// multiplier, then the visual snapshot is rebuilt. Pitch changes made
    /// before the tick are therefore visible in the same frame's rotation.
    pub fn tick(&mut self, dt: f32) {
        let sample = self.input.mouse.sample();

        match self.input.capture {
            Some(Control::Disc(deck)) => {
                let d = &mut self.decks[deck.index()];
                if let Some(transport) = self.transports[deck.index()].as_mut() {
                    if let Some(step) = d.scratch.drag(sample, transport) {
                        d.rotation.set_angle(step.rotation);
                        self.visual.discs[deck.index()].last_step = step.rotation_delta;
                    }
                }
            }
            Some(Control::Knob(deck, band)) => {
                let center = self.config.deck(deck).eq[band.index()].area.center;
                let knob = &mut self.decks[deck.index()].eq[band.index()];
                if knob.drag_to(sample.position, center).is_some() {
                    warn_on_err(knob.write(&self.params, &mut self.mixer));
                }
            }
            None => {}
        }

        for deck in Deck::ALL {
            let playing = self.transports[deck.index()]
                .as_ref()
                .is_some_and(|t| t.is_playing());
            let d = &mut self.decks[deck.index()];
            let held = d.scratch.is_dragging() || self.input.is_hovered(Control::Disc(deck));
            let step = d.rotation.advance(dt, playing, held);
            if !d.scratch.is_dragging() {
                self.visual.discs[deck.index()].last_step = step;
            }
        }

        self.refresh_visuals();
    }
}
