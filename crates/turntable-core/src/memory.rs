//! In-memory mixer and transport.
//!
//! Used by the native driver in place of a real audio stage and by the tests
//! as recording doubles.

use crate::sink::{Mixer, ParamSlot, Transport};
use fnv::{FnvHashMap, FnvHashSet};

#[derive(Clone, Debug, Default)]
pub struct MemoryMixer {
    names: Vec<String>,
    values: Vec<Option<f32>>,
    index: FnvHashMap<String, usize>,
    rejecting: FnvHashSet<usize>,
    writes: Vec<(String, f32)>,
}

impl MemoryMixer {
    pub fn with_parameters<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut mixer = Self::default();
        for name in names {
            mixer.expose(name);
        }
        mixer
    }

    pub fn expose(&mut self, name: impl Into<String>) -> ParamSlot {
        let name = name.into();
        if let Some(&i) = self.index.get(&name) {
            return ParamSlot(i);
        }
        let i = self.names.len();
        self.index.insert(name.clone(), i);
        self.names.push(name);
        self.values.push(None);
        ParamSlot(i)
    }

    /// Make writes to `name` fail from now on.
    pub fn reject(&mut self, name: &str) {
        if let Some(&i) = self.index.get(name) {
            self.rejecting.insert(i);
        }
    }

    /// Last value written to `name`.
    pub fn value(&self, name: &str) -> Option<f32> {
        self.index.get(name).and_then(|&i| self.values[i])
    }

    /// Every accepted write, oldest first.
    pub fn writes(&self) -> &[(String, f32)] {
        &self.writes
    }

    pub fn writes_to(&self, name: &str) -> usize {
        self.writes.iter().filter(|(n, _)| n == name).count()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl Mixer for MemoryMixer {
    fn lookup(&self, name: &str) -> Option<ParamSlot> {
        self.index.get(name).map(|&i| ParamSlot(i))
    }

    fn set_float(&mut self, slot: ParamSlot, value: f32) -> bool {
        let i = slot.0;
        if i >= self.values.len() || self.rejecting.contains(&i) {
            return false;
        }
        self.values[i] = Some(value);
        self.writes.push((self.names[i].clone(), value));
        true
    }
}

/// A clock standing in for a playing clip.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    duration: Option<f32>,
    time: f32,
    playing: bool,
    looping: bool,
    stop_on_seek: bool,
    play_calls: u32,
    pause_calls: u32,
    seeks: Vec<f32>,
}

impl MemoryTransport {
    pub fn with_clip(duration: f32) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Simulate backends whose seek halts playback.
    pub fn stop_on_seek(mut self, stop: bool) -> Self {
        self.stop_on_seek = stop;
        self
    }

    pub fn set_time(&mut self, time: f32) {
        self.time = time;
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn play_calls(&self) -> u32 {
        self.play_calls
    }

    pub fn pause_calls(&self) -> u32 {
        self.pause_calls
    }

    pub fn seeks(&self) -> &[f32] {
        &self.seeks
    }

    /// Move the clock forward while playing; `rate` is the clamped pitch.
    pub fn advance(&mut self, dt: f32, rate: f32) {
        let Some(duration) = self.duration else {
            return;
        };
        if !self.playing || !(dt > 0.0) {
            return;
        }
        self.time += dt * rate;
        if self.time >= duration {
            if self.looping && duration > 0.0 {
                self.time = self.time.rem_euclid(duration);
            } else {
                self.time = duration;
                self.playing = false;
            }
        }
    }
}

impl Transport for MemoryTransport {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.play_calls += 1;
        if self.duration.is_some() {
            self.playing = true;
        }
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
        self.playing = false;
    }

    fn seek(&mut self, time: f32) {
        self.seeks.push(time);
        self.time = time;
        if self.stop_on_seek {
            self.playing = false;
        }
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn duration(&self) -> Option<f32> {
        self.duration
    }
}
