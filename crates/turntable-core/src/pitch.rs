use crate::angle::wrap_to_360;
use crate::constants::{
    BASE_ROTATION_SPEED_RANGE, DEFAULT_BASE_ROTATION_SPEED, DEFAULT_PITCH, PITCH_MAX, PITCH_MIN,
};
use crate::crossfade::linear_to_db;
use crate::error::ConfigError;
use crate::param::{Deck, ParamId, ParamTable};
use crate::sink::{Mixer, SinkError};

pub fn clamp_pitch(value: f32) -> f32 {
    value.clamp(PITCH_MIN, PITCH_MAX)
}

/// Idle spin of the platter. Rotation runs clockwise, i.e. toward negative
/// angles, at `base_speed * speed_multiplier` degrees per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscRotation {
    angle: f32,
    base_speed: f32,
    speed_multiplier: f32,
}

impl Default for DiscRotation {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_ROTATION_SPEED, DEFAULT_PITCH)
    }
}

impl DiscRotation {
    pub fn new(base_speed: f32, speed_multiplier: f32) -> Self {
        Self {
            angle: 0.0,
            base_speed,
            speed_multiplier,
        }
    }

    pub fn validate_base_speed(base_speed: f32) -> Result<(), ConfigError> {
        let (min, max) = BASE_ROTATION_SPEED_RANGE;
        if base_speed >= min && base_speed <= max {
            Ok(())
        } else {
            Err(ConfigError::OutOfRange {
                what: "disc base rotation speed",
                value: base_speed,
                min,
                max,
            })
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Absolute rotation, as set directly by a scratch.
    pub fn set_angle(&mut self, angle: f32) {
        if angle.is_finite() {
            self.angle = wrap_to_360(angle);
        }
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
    }

    /// Advance one frame. Only spins while playing and not held by the
    /// pointer. Returns the rotation applied this frame.
    pub fn advance(&mut self, dt: f32, playing: bool, held: bool) -> f32 {
        if !playing || held || !(dt > 0.0) {
            return 0.0;
        }
        let step = -(self.base_speed * self.speed_multiplier * dt);
        if !step.is_finite() {
            return 0.0;
        }
        self.angle = wrap_to_360(self.angle + step);
        step
    }
}

/// Couples a deck's pitch fader to both the mixer and the platter speed.
///
/// The mixer sees the pitch clamped to `[0.5, 2.0]`; the platter receives the
/// raw fader value, so a fader wider than that range spins the disc faster or
/// slower than the audio actually plays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PitchVolumeBridge {
    deck: Deck,
    pitch: f32,
    volume: f32,
}

impl PitchVolumeBridge {
    pub fn new(deck: Deck, pitch: f32, volume: f32) -> Self {
        Self {
            deck,
            pitch,
            volume,
        }
    }

    pub fn deck(&self) -> Deck {
        self.deck
    }

    /// Raw fader value, unclamped.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Returns the clamped pitch that was sent to the mixer. Non-finite input
    /// leaves everything as it was.
    pub fn set_pitch(
        &mut self,
        value: f32,
        params: &ParamTable,
        mixer: &mut dyn Mixer,
        rotation: &mut DiscRotation,
    ) -> Result<f32, SinkError> {
        if !value.is_finite() {
            return Ok(clamp_pitch(self.pitch));
        }
        self.pitch = value;
        rotation.set_speed_multiplier(value);
        let clamped = clamp_pitch(value);
        params.write(mixer, ParamId::Pitch(self.deck), clamped)?;
        Ok(clamped)
    }

    /// Channel fader: linear `[0, 1]` in, decibels out. Returns the dB written.
    pub fn set_volume(
        &mut self,
        linear: f32,
        params: &ParamTable,
        mixer: &mut dyn Mixer,
    ) -> Result<f32, SinkError> {
        if linear.is_finite() {
            self.volume = linear.clamp(0.0, 1.0);
        }
        let db = linear_to_db(self.volume);
        params.write(mixer, ParamId::Volume(self.deck), db)?;
        Ok(db)
    }

    /// Push the fader value back into the platter speed, as transport
    /// actions do.
    pub fn resync(&self, rotation: &mut DiscRotation) {
        rotation.set_speed_multiplier(self.pitch);
    }
}
