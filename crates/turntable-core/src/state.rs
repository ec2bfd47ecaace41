//! Visual-side state handed to whatever draws the console.
//!
//! These types carry no platform handles. The core writes them and the front
//! end reads them; nothing flows back. Rotations are degrees around Z with
//! the counter-clockwise-positive convention of the angle helpers.

use crate::crossfade::CrossfadeOutput;
use glam::Vec3;

/// Platter orientation for one deck.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiscVisual {
    /// Absolute rotation in [0, 360).
    pub rotation: f32,
    /// Rotation applied by the most recent tick or drag sample.
    pub last_step: f32,
}

/// What a knob should look like right now.
///
/// `fill` is the ring fill amount in `0..=0.75`, `color` an RGB triple in
/// `0..=1`, and `text` the two-line readout (label, then value).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KnobVisual {
    pub rotation: f32,
    pub fill: f32,
    pub color: Vec3,
    pub text: String,
}

/// Snapshot of every visual the console drives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualState {
    pub discs: [DiscVisual; 2],
    /// `knobs[deck][band]`
    pub knobs: [[KnobVisual; 3]; 2],
    pub crossfade_position: f32,
    pub crossfade: Option<CrossfadeOutput>,
}
