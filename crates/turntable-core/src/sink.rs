//! Contracts for the audio output stage the controls write into.
//!
//! The mixer and the per-deck transports are external collaborators. The
//! controls only ever set named float parameters and drive play/pause/seek,
//! so these traits carry exactly that surface.

pub use crate::error::SinkError;

/// Opaque handle for a mixer parameter resolved at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamSlot(pub usize);

/// Named float parameters exposed by the mixer.
pub trait Mixer {
    /// Resolve an exposed parameter name. `None` when the mixer has no such
    /// parameter.
    fn lookup(&self, name: &str) -> Option<ParamSlot>;

    /// Write a resolved parameter. Returns `false` when the mixer refuses the
    /// write.
    fn set_float(&mut self, slot: ParamSlot, value: f32) -> bool;
}

/// Playback transport for one deck.
pub trait Transport {
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, time: f32);
    fn time(&self) -> f32;
    /// Length of the loaded clip in seconds, `None` when nothing is loaded.
    fn duration(&self) -> Option<f32>;
}
