//! Radial knob: a bounded drag arc mapped onto a parameter range.
//!
//! The knob accepts pointer angles on a 270° arc and rejects the 90° band at
//! the bottom, `(225°, 315°)`, like the gap in travel of a rotary pot. An
//! accepted angle sets the ring fill (`0..=0.75`), the fill sets the
//! normalized value, and the value is interpolated into `min..=max`.

use crate::angle::{in_open_band, pointer_angle, wrap_to_360};
use crate::constants::{
    KNOB_ARC_OFFSET_DEG, KNOB_DEAD_ZONE_END_DEG, KNOB_DEAD_ZONE_START_DEG, KNOB_DEFAULT_FILL,
    KNOB_DRAG_THRESHOLD_PX, KNOB_FILL_SPAN, KNOB_HANDLE_OFFSET_DEG, KNOB_NEGATIVE_RGB,
    KNOB_NEUTRAL_EPSILON, KNOB_NEUTRAL_RGB, KNOB_POSITIVE_RGB,
};
use crate::error::ConfigError;
use crate::param::{ParamId, ParamTable};
use crate::sink::{Mixer, SinkError};
use crate::state::KnobVisual;
use glam::{Vec2, Vec3};

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobColors {
    pub negative: Vec3,
    pub neutral: Vec3,
    pub positive: Vec3,
}

impl Default for KnobColors {
    fn default() -> Self {
        Self {
            negative: Vec3::from(KNOB_NEGATIVE_RGB),
            neutral: Vec3::from(KNOB_NEUTRAL_RGB),
            positive: Vec3::from(KNOB_POSITIVE_RGB),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KnobConfig {
    pub min: f32,
    pub max: f32,
    /// Ring fill at rest, in `0..=0.75`; 0.375 is the center.
    pub initial_fill: f32,
    /// Handle rotation at rest, degrees.
    pub initial_rotation: f32,
    /// Format the readout as a frequency instead of a signed gain.
    pub frequency: bool,
    pub label: String,
    pub unit: String,
    pub colors: KnobColors,
    pub color_feedback: bool,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            min: -30.0,
            max: 30.0,
            initial_fill: KNOB_DEFAULT_FILL,
            initial_rotation: 0.0,
            frequency: false,
            label: String::new(),
            unit: "dB".to_owned(),
            colors: KnobColors::default(),
            color_feedback: true,
        }
    }
}

impl KnobConfig {
    pub fn gain(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            ..Self::default()
        }
    }

    pub fn frequency(label: &str, min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            frequency: true,
            label: label.to_owned(),
            unit: "Hz".to_owned(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteRange {
                what: "knob range",
                min: self.min,
                max: self.max,
            });
        }
        if !(self.initial_fill >= 0.0 && self.initial_fill <= KNOB_FILL_SPAN) {
            return Err(ConfigError::OutOfRange {
                what: "knob initial fill",
                value: self.initial_fill,
                min: 0.0,
                max: KNOB_FILL_SPAN,
            });
        }
        Ok(())
    }

    pub fn initial_normalized(&self) -> f32 {
        (self.initial_fill / KNOB_FILL_SPAN).clamp(0.0, 1.0)
    }
}

/// Numeric state of a knob. `initial` is fixed when the knob is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobState {
    pub current: f32,
    pub min: f32,
    pub max: f32,
    pub initial: f32,
}

impl KnobState {
    pub fn value(&self) -> f32 {
        lerp(self.min, self.max, self.current)
    }
}

/// Ring fill for a pointer angle, or `None` inside the dead zone.
pub fn fill_for_angle(pointer_angle: f32) -> Option<f32> {
    if !pointer_angle.is_finite()
        || in_open_band(pointer_angle, KNOB_DEAD_ZONE_START_DEG, KNOB_DEAD_ZONE_END_DEG)
    {
        return None;
    }
    let wrapped = wrap_to_360(pointer_angle);
    // shift the lower-right quadrant below zero so the arc runs 0..=270
    let shifted = if wrapped >= KNOB_DEAD_ZONE_END_DEG {
        wrapped - 360.0
    } else {
        wrapped
    };
    let adjusted = shifted + KNOB_ARC_OFFSET_DEG;
    Some((KNOB_FILL_SPAN - adjusted / 360.0).clamp(0.0, KNOB_FILL_SPAN))
}

/// Readout for a parameter value, without the label.
pub fn format_value(value: f32, frequency: bool, unit: &str) -> String {
    if frequency {
        if value >= 1000.0 {
            format!("{:.1} kHz", value / 1000.0)
        } else if value < 10.0 {
            format!("{:.2}{}", value, unit)
        } else {
            format!("{:.0} {}", value, unit)
        }
    } else if value.abs() <= KNOB_NEUTRAL_EPSILON {
        format!("0 {}", unit)
    } else if value > 0.0 {
        format!("+{:.0} {}", value, unit)
    } else {
        format!("{:.0} {}", value, unit)
    }
}

/// Fill color: negative→neutral over `[0, 0.5)`, neutral→positive over `(0.5, 1]`.
pub fn feedback_color(normalized: f32, colors: &KnobColors) -> Vec3 {
    if normalized > 0.5 {
        let t = ((normalized - 0.5) * 2.0).min(1.0);
        colors.neutral.lerp(colors.positive, t)
    } else if normalized < 0.5 {
        let t = (normalized * 2.0).max(0.0);
        colors.negative.lerp(colors.neutral, t)
    } else {
        colors.neutral
    }
}

/// What a release did to the knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KnobRelease {
    /// The press moved far enough to count as a drag; the value stays.
    Kept,
    /// A click without travel: the knob went back to its initial value.
    Reset(f32),
    /// No press was active.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    origin: Vec2,
    dragged: bool,
}

#[derive(Clone, Debug)]
pub struct RadialKnob {
    param: ParamId,
    config: KnobConfig,
    state: KnobState,
    rotation: f32,
    fill: f32,
    press: Option<Press>,
}

impl RadialKnob {
    pub fn new(param: ParamId, config: KnobConfig) -> Self {
        let initial = config.initial_normalized();
        Self {
            param,
            state: KnobState {
                current: initial,
                min: config.min,
                max: config.max,
                initial,
            },
            rotation: config.initial_rotation,
            fill: config.initial_fill,
            config,
            press: None,
        }
    }

    pub fn param(&self) -> ParamId {
        self.param
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn state(&self) -> &KnobState {
        &self.state
    }

    pub fn normalized(&self) -> f32 {
        self.state.current
    }

    pub fn value(&self) -> f32 {
        self.state.value()
    }

    /// Apply a pointer angle. Returns the new parameter value, or `None` when
    /// the angle falls in the dead zone and the previous state is kept.
    pub fn on_drag(&mut self, pointer_angle: f32) -> Option<f32> {
        let fill = fill_for_angle(pointer_angle)?;
        self.rotation = wrap_to_360(pointer_angle + KNOB_HANDLE_OFFSET_DEG);
        self.fill = fill;
        self.state.current = (fill / KNOB_FILL_SPAN).clamp(0.0, 1.0);
        Some(self.value())
    }

    /// Drag from a pointer position around the knob center.
    pub fn drag_to(&mut self, pointer: Vec2, center: Vec2) -> Option<f32> {
        pointer_angle(pointer, center).and_then(|a| self.on_drag(a))
    }

    /// Restore the initial value, fill and handle rotation.
    pub fn reset(&mut self) -> f32 {
        self.state.current = self.state.initial;
        self.fill = self.config.initial_fill;
        self.rotation = self.config.initial_rotation;
        self.value()
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn press(&mut self, position: Vec2) {
        self.press = Some(Press {
            origin: position,
            dragged: false,
        });
    }

    /// Record pointer travel during a press.
    pub fn track(&mut self, position: Vec2) {
        if let Some(p) = &mut self.press {
            if position.distance(p.origin) > KNOB_DRAG_THRESHOLD_PX {
                p.dragged = true;
            }
        }
    }

    pub fn release(&mut self) -> KnobRelease {
        match self.press.take() {
            None => KnobRelease::Ignored,
            Some(p) if p.dragged => KnobRelease::Kept,
            Some(_) => KnobRelease::Reset(self.reset()),
        }
    }

    /// Send the current value to the knob's mixer parameter.
    pub fn write(&self, params: &ParamTable, mixer: &mut dyn Mixer) -> Result<(), SinkError> {
        params.write(mixer, self.param, self.value())
    }

    pub fn display_text(&self) -> String {
        let value = format_value(self.value(), self.config.frequency, &self.config.unit);
        format!("{}\n{}", self.config.label, value)
    }

    pub fn color(&self) -> Vec3 {
        if self.config.color_feedback {
            feedback_color(self.state.current, &self.config.colors)
        } else {
            self.config.colors.neutral
        }
    }

    pub fn visual(&self) -> KnobVisual {
        KnobVisual {
            rotation: self.rotation,
            fill: self.fill,
            color: self.color(),
            text: self.display_text(),
        }
    }
}
