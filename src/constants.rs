//! Default console layout.
//!
//! Screen coordinates are pixels with the origin at the bottom-left and +Y
//! up, matching the angle helpers. The layout fits a 960x540 window: two
//! platters left and right, three EQ knobs stacked beside each one.
use glam::Vec2;

pub const WINDOW_SIZE: Vec2 = Vec2::new(960.0, 540.0);

// Platters
pub const DISC_RADIUS: f32 = 170.0;
pub const DISC_CENTERS: [Vec2; 2] = [Vec2::new(230.0, 290.0), Vec2::new(730.0, 290.0)];

// EQ knobs, top to bottom: high, mid, low
pub const KNOB_RADIUS: f32 = 28.0;
pub const KNOB_COLUMN_X: [f32; 2] = [440.0, 520.0];
pub const KNOB_ROW_Y: [f32; 3] = [130.0, 230.0, 330.0]; // low, mid, high

// Default mixer parameter names, per deck
pub const GAIN_PARAMS: [&str; 2] = ["Disco_01_Volume", "Disco_02_Volume"];
pub const PITCH_PARAMS: [&str; 2] = ["Disco_01_Pitch", "Disco_02_Pitch"];
pub const FADER_PARAMS: [&str; 2] = ["Disco_01_Fader", "Disco_02_Fader"];
pub const EQ_PARAMS: [[&str; 3]; 2] = [
    ["Disco_01_Low", "Disco_01_Mid", "Disco_01_High"],
    ["Disco_02_Low", "Disco_02_Mid", "Disco_02_High"],
];

pub const DEFAULT_CHANNEL_VOLUME: f32 = 1.0;
