use glam::Vec2;
use smallvec::SmallVec;
use turntable_core::{Band, Deck, PointerSample};

/// Something on the console the pointer can hover and grab.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Disc(Deck),
    Knob(Deck, Band),
}

/// Raw input from the pointer source.
///
/// Enter/exit arrive per control; down, up and move carry the position and
/// the source's monotonic clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter(Control),
    Exit(Control),
    Down(PointerSample),
    Up(PointerSample),
    Move(PointerSample),
}

#[derive(Default, Clone, Copy, Debug)]
pub struct MouseState {
    pub position: Vec2,
    pub time: f32,
    pub down: bool,
}

impl MouseState {
    pub fn sample(&self) -> PointerSample {
        PointerSample::new(self.position, self.time)
    }
}

/// Pointer bookkeeping between events and ticks.
///
/// `capture` holds the control a press landed on; it keeps receiving the
/// pointer until release even after the pointer leaves its hit area.
#[derive(Default, Clone, Debug)]
pub struct PointerInput {
    pub mouse: MouseState,
    hovered: SmallVec<[Control; 4]>,
    pub capture: Option<Control>,
}

impl PointerInput {
    pub fn record(&mut self, sample: PointerSample) {
        self.mouse.position = sample.position;
        self.mouse.time = sample.time;
    }

    pub fn enter(&mut self, control: Control) {
        if !self.hovered.contains(&control) {
            self.hovered.push(control);
        }
    }

    pub fn exit(&mut self, control: Control) {
        self.hovered.retain(|c| *c != control);
    }

    pub fn is_hovered(&self, control: Control) -> bool {
        self.hovered.contains(&control)
    }

    /// The control a press should grab: knobs win over platters, since they
    /// are drawn on top.
    pub fn press_target(&self) -> Option<Control> {
        self.hovered
            .iter()
            .copied()
            .find(|c| matches!(c, Control::Knob(..)))
            .or_else(|| self.hovered.first().copied())
    }

    pub fn captured_disc(&self) -> Option<Deck> {
        match self.capture {
            Some(Control::Disc(deck)) => Some(deck),
            _ => None,
        }
    }
}
