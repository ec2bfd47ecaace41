//! Disc scratching: pointer drags over the platter become audio seeks.
//!
//! A drag captures the angular offset between the pointer and the disc once,
//! then every sample sets the disc's absolute rotation to follow the pointer
//! and converts the rotation since the previous sample into a time offset.
//! One full revolution covers `360 / sensitivity` seconds of audio, and the
//! sign is inverted so dragging clockwise moves forward like a real platter.

use crate::angle::{angle_delta, pointer_angle, wrap_to_360};
use crate::constants::{
    DEFAULT_SCRATCH_SENSITIVITY, SCRATCH_DEBOUNCE_SEC, SCRATCH_SENSITIVITY_RANGE,
};
use crate::error::ConfigError;
use crate::sink::Transport;
use glam::Vec2;

/// One pointer poll: screen position (y up) and the input clock in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub time: f32,
}

impl PointerSample {
    pub fn new(position: Vec2, time: f32) -> Self {
        Self { position, time }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScratchConfig {
    /// Degrees of disc travel per second of audio.
    pub sensitivity: f32,
    /// Samples arriving closer together than this move the disc but do not seek.
    pub debounce_sec: f32,
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            sensitivity: DEFAULT_SCRATCH_SENSITIVITY,
            debounce_sec: SCRATCH_DEBOUNCE_SEC,
        }
    }
}

impl ScratchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = SCRATCH_SENSITIVITY_RANGE;
        if !(self.sensitivity >= min && self.sensitivity <= max) {
            return Err(ConfigError::OutOfRange {
                what: "scratch sensitivity",
                value: self.sensitivity,
                min,
                max,
            });
        }
        if !(self.debounce_sec >= 0.0) {
            return Err(ConfigError::OutOfRange {
                what: "scratch debounce",
                value: self.debounce_sec,
                min: 0.0,
                max: f32::INFINITY,
            });
        }
        Ok(())
    }

    /// Audio-time offset produced by rotating the disc `rotation_delta` degrees.
    pub fn time_offset(&self, rotation_delta: f32) -> f32 {
        let revolutions_per_second = self.sensitivity / 360.0;
        (-rotation_delta / 360.0) / revolutions_per_second
    }
}

/// State of a drag in progress. `angle_offset` is fixed at drag start and
/// `previous_angle` always holds the last rotation applied to the disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScratchSession {
    pub origin: Vec2,
    pub angle_offset: f32,
    pub previous_angle: f32,
    pub was_playing_before_drag: bool,
    pub last_sample_time: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum ScratchState {
    #[default]
    Idle,
    Dragging(ScratchSession),
}

/// Result of one drag sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScratchStep {
    /// New absolute disc rotation in [0, 360).
    pub rotation: f32,
    pub rotation_delta: f32,
    /// Where the transport was moved, if a seek happened.
    pub seek_to: Option<f32>,
}

#[derive(Clone, Debug, Default)]
pub struct ScratchEngine {
    config: ScratchConfig,
    state: ScratchState,
}

impl ScratchEngine {
    pub fn new(config: ScratchConfig) -> Self {
        Self {
            config,
            state: ScratchState::Idle,
        }
    }

    pub fn config(&self) -> &ScratchConfig {
        &self.config
    }

    pub fn state(&self) -> &ScratchState {
        &self.state
    }

    pub fn session(&self) -> Option<&ScratchSession> {
        match &self.state {
            ScratchState::Dragging(s) => Some(s),
            ScratchState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ScratchState::Dragging(_))
    }

    /// Start a drag around `origin` with the disc currently at `disc_rotation`.
    ///
    /// Returns `false` without changing state when a drag is already running
    /// or the pointer sits exactly on the disc center.
    pub fn begin(
        &mut self,
        sample: PointerSample,
        origin: Vec2,
        disc_rotation: f32,
        transport: &dyn Transport,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(pointer) = pointer_angle(sample.position, origin) else {
            log::debug!("[scratch] press on disc center ignored");
            return false;
        };
        let current = wrap_to_360(disc_rotation);
        let session = ScratchSession {
            origin,
            angle_offset: current - pointer,
            previous_angle: current,
            was_playing_before_drag: transport.is_playing(),
            last_sample_time: sample.time,
        };
        log::info!(
            "[scratch] begin at {:.1}° (playing={})",
            current,
            session.was_playing_before_drag
        );
        self.state = ScratchState::Dragging(session);
        true
    }

    /// Follow the pointer with the disc and scrub the transport.
    ///
    /// `None` when idle or when the sample is degenerate (pointer on center).
    pub fn drag(
        &mut self,
        sample: PointerSample,
        transport: &mut dyn Transport,
    ) -> Option<ScratchStep> {
        let ScratchState::Dragging(session) = &mut self.state else {
            return None;
        };
        let pointer = pointer_angle(sample.position, session.origin)?;
        let rotation = wrap_to_360(pointer + session.angle_offset);
        let rotation_delta = angle_delta(session.previous_angle, rotation);

        let mut seek_to = None;
        if sample.time - session.last_sample_time > self.config.debounce_sec {
            seek_to = scrub(transport, self.config.time_offset(rotation_delta));
            session.last_sample_time = sample.time;
        }
        session.previous_angle = rotation;

        Some(ScratchStep {
            rotation,
            rotation_delta,
            seek_to,
        })
    }

    /// Finish the drag, resuming playback if it was running when the drag
    /// started and a seek stopped it. Returns `false` when no drag was active.
    pub fn end(&mut self, transport: &mut dyn Transport) -> bool {
        let ScratchState::Dragging(session) = std::mem::take(&mut self.state) else {
            return false;
        };
        if session.was_playing_before_drag && !transport.is_playing() {
            transport.play();
            log::debug!("[scratch] resumed playback after drag");
        }
        log::info!("[scratch] end at {:.1}°", session.previous_angle);
        true
    }
}

// Clip absence is an ordinary idle condition: nothing to seek, no error.
fn scrub(transport: &mut dyn Transport, time_delta: f32) -> Option<f32> {
    let duration = transport.duration()?.max(0.0);
    let target = (transport.time() + time_delta).clamp(0.0, duration);
    if !target.is_finite() {
        return None;
    }
    log::trace!("[scratch] seek {:+.4}s -> {:.3}s", time_delta, target);
    transport.seek(target);
    Some(target)
}
