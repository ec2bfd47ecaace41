pub mod angle;
pub mod constants;
pub mod crossfade;
pub mod error;
pub mod knob;
pub mod memory;
pub mod param;
pub mod pitch;
pub mod scratch;
pub mod sink;
pub mod state;

pub use angle::{angle_delta, pointer_angle, wrap_to_360};
pub use constants::*;
pub use crossfade::{
    linear_to_db, CrossfadeEngine, CrossfadeMode, CrossfadeOutput, CrossfadeState,
};
pub use error::{ConfigError, SinkError};
pub use knob::{KnobColors, KnobConfig, KnobRelease, KnobState, RadialKnob};
pub use memory::{MemoryMixer, MemoryTransport};
pub use param::{Band, Deck, ParamId, ParamTable};
pub use pitch::{clamp_pitch, DiscRotation, PitchVolumeBridge};
pub use scratch::{
    PointerSample, ScratchConfig, ScratchEngine, ScratchSession, ScratchState, ScratchStep,
};
pub use sink::{Mixer, ParamSlot, Transport};
pub use state::*;
