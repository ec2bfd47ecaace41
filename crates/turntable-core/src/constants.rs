// Shared tuning constants for the deck controls. Angles are degrees, times are
// seconds, gains are decibels unless the name says otherwise.

// Scratch
pub const DEFAULT_SCRATCH_SENSITIVITY: f32 = 100.0; // degrees of disc travel per second of audio
pub const SCRATCH_SENSITIVITY_RANGE: (f32, f32) = (10.0, 500.0);
pub const SCRATCH_DEBOUNCE_SEC: f32 = 0.001; // samples closer than this do not seek

// Disc auto-rotation
pub const DEFAULT_BASE_ROTATION_SPEED: f32 = 180.0; // degrees per second at pitch 1.0
pub const BASE_ROTATION_SPEED_RANGE: (f32, f32) = (50.0, 300.0);

// Radial knob: pointer angles strictly inside this band are rejected
pub const KNOB_DEAD_ZONE_START_DEG: f32 = 225.0;
pub const KNOB_DEAD_ZONE_END_DEG: f32 = 315.0;
pub const KNOB_FILL_SPAN: f32 = 0.75; // a full sweep fills three quarters of the ring
pub const KNOB_HANDLE_OFFSET_DEG: f32 = 135.0;
pub const KNOB_ARC_OFFSET_DEG: f32 = 45.0;
pub const KNOB_DEFAULT_FILL: f32 = 0.375; // midpoint of the fill span
pub const KNOB_NEUTRAL_EPSILON: f32 = 1e-5;
pub const KNOB_DRAG_THRESHOLD_PX: f32 = 5.0; // press travel below this counts as a click

// Gain conversion
pub const SILENCE_DB: f32 = -80.0;
pub const SILENCE_LINEAR_THRESHOLD: f32 = 1e-4;

// Pitch
pub const PITCH_MIN: f32 = 0.5;
pub const PITCH_MAX: f32 = 2.0;
pub const DEFAULT_PITCH: f32 = 1.0;

// Crossfader
pub const DEFAULT_CROSSFADE_POSITION: f32 = 0.5;

// Knob colors (RGB)
pub const KNOB_POSITIVE_RGB: [f32; 3] = [0.0, 1.0, 0.5];
pub const KNOB_NEUTRAL_RGB: [f32; 3] = [1.0, 0.921_568_6, 0.015_686_275];
pub const KNOB_NEGATIVE_RGB: [f32; 3] = [1.0, 0.0, 0.0];
