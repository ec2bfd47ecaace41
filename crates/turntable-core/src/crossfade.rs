//! Crossfader curves and the shared linear-to-decibel conversion.

use crate::constants::{DEFAULT_CROSSFADE_POSITION, SILENCE_DB, SILENCE_LINEAR_THRESHOLD};
use crate::param::{Deck, ParamId, ParamTable};
use crate::sink::{Mixer, SinkError};
use std::f32::consts::FRAC_PI_2;

/// Convert a linear gain to decibels, flooring near-silence at −80 dB.
pub fn linear_to_db(gain: f32) -> f32 {
    // also catches NaN
    if !(gain > SILENCE_LINEAR_THRESHOLD) {
        return SILENCE_DB;
    }
    gain.log10() * 20.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CrossfadeMode {
    Linear,
    /// sin/cos pair: `a² + b² = 1` keeps perceived loudness constant.
    #[default]
    EqualPower,
    Logarithmic,
}

impl CrossfadeMode {
    pub const ALL: [CrossfadeMode; 3] = [
        CrossfadeMode::Linear,
        CrossfadeMode::EqualPower,
        CrossfadeMode::Logarithmic,
    ];

    /// Gains `(a, b)` for a fader position; the position is clamped to [0, 1].
    pub fn gains(self, position: f32) -> (f32, f32) {
        let p = position.clamp(0.0, 1.0);
        match self {
            CrossfadeMode::Linear => (p, 1.0 - p),
            CrossfadeMode::EqualPower => {
                let angle = p * FRAC_PI_2;
                // cos(π/2) is not exactly zero in f32
                (angle.sin(), angle.cos().max(0.0))
            }
            CrossfadeMode::Logarithmic => (p * p, (1.0 - p) * (1.0 - p)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossfadeState {
    pub position: f32,
    pub mode: CrossfadeMode,
}

impl Default for CrossfadeState {
    fn default() -> Self {
        Self {
            position: DEFAULT_CROSSFADE_POSITION,
            mode: CrossfadeMode::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossfadeOutput {
    pub gain_a: f32,
    pub gain_b: f32,
    pub db_a: f32,
    pub db_b: f32,
}

#[derive(Clone, Debug, Default)]
pub struct CrossfadeEngine {
    state: CrossfadeState,
}

impl CrossfadeEngine {
    pub fn new(mode: CrossfadeMode, position: f32) -> Self {
        let mut engine = Self {
            state: CrossfadeState {
                position: DEFAULT_CROSSFADE_POSITION,
                mode,
            },
        };
        engine.set_position(position);
        engine
    }

    pub fn state(&self) -> CrossfadeState {
        self.state
    }

    /// Move the fader. Non-finite positions are ignored.
    pub fn set_position(&mut self, position: f32) -> CrossfadeOutput {
        if position.is_finite() {
            self.state.position = position.clamp(0.0, 1.0);
        }
        self.output()
    }

    pub fn set_mode(&mut self, mode: CrossfadeMode) -> CrossfadeOutput {
        if mode != self.state.mode {
            log::info!("[crossfade] mode {:?} -> {:?}", self.state.mode, mode);
        }
        self.state.mode = mode;
        self.output()
    }

    pub fn output(&self) -> CrossfadeOutput {
        let (gain_a, gain_b) = self.state.mode.gains(self.state.position);
        CrossfadeOutput {
            gain_a,
            gain_b,
            db_a: linear_to_db(gain_a),
            db_b: linear_to_db(gain_b),
        }
    }

    /// Write both channel gains. Each write is independent: a failure on one
    /// is logged and the other still goes out.
    pub fn apply(
        &self,
        params: &ParamTable,
        mixer: &mut dyn Mixer,
    ) -> [Result<(), SinkError>; 2] {
        let out = self.output();
        let results = [
            params.write(mixer, ParamId::Gain(Deck::A), out.db_a),
            params.write(mixer, ParamId::Gain(Deck::B), out.db_b),
        ];
        for r in &results {
            if let Err(e) = r {
                log::warn!("[crossfade] {}", e);
            }
        }
        results
    }
}
