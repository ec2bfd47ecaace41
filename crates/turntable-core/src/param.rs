use crate::sink::{Mixer, ParamSlot, SinkError};
use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Deck {
    A,
    B,
}

impl Deck {
    pub const ALL: [Deck; 2] = [Deck::A, Deck::B];

    pub fn index(self) -> usize {
        match self {
            Deck::A => 0,
            Deck::B => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    pub fn index(self) -> usize {
        match self {
            Band::Low => 0,
            Band::Mid => 1,
            Band::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Low => "LOW",
            Band::Mid => "MID",
            Band::High => "HIGH",
        }
    }
}

/// Every mixer parameter a control can write. Each id belongs to exactly one
/// control, so no two controls ever write the same parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    /// Crossfader output gain for a deck.
    Gain(Deck),
    Pitch(Deck),
    /// Channel fader.
    Volume(Deck),
    Eq(Deck, Band),
}

#[derive(Clone, Debug)]
struct Binding {
    name: String,
    slot: Option<ParamSlot>,
}

/// Parameter names resolved against a mixer once, up front.
///
/// Names the mixer does not expose are reported when the table is built and
/// every later write to them fails with [`SinkError::UnknownParameter`]
/// instead of silently probing the mixer again.
#[derive(Clone, Debug, Default)]
pub struct ParamTable {
    bindings: FnvHashMap<ParamId, Binding>,
}

impl ParamTable {
    pub fn resolve<'a, I>(mixer: &dyn Mixer, names: I) -> Self
    where
        I: IntoIterator<Item = (ParamId, &'a str)>,
    {
        let mut bindings = FnvHashMap::default();
        for (id, name) in names {
            let slot = mixer.lookup(name);
            if slot.is_none() {
                log::warn!(
                    "[params] mixer does not expose '{}' ({:?}); writes to it will be skipped",
                    name,
                    id
                );
            }
            bindings.insert(
                id,
                Binding {
                    name: name.to_owned(),
                    slot,
                },
            );
        }
        Self { bindings }
    }

    pub fn slot(&self, id: ParamId) -> Option<ParamSlot> {
        self.bindings.get(&id).and_then(|b| b.slot)
    }

    pub fn name(&self, id: ParamId) -> Option<&str> {
        self.bindings.get(&id).map(|b| b.name.as_str())
    }

    pub fn unresolved(&self) -> impl Iterator<Item = ParamId> + '_ {
        self.bindings
            .iter()
            .filter(|(_, b)| b.slot.is_none())
            .map(|(id, _)| *id)
    }

    pub fn write(&self, mixer: &mut dyn Mixer, id: ParamId, value: f32) -> Result<(), SinkError> {
        let binding = self.bindings.get(&id);
        let name = binding.map_or("<unconfigured>", |b| b.name.as_str());
        let Some(slot) = binding.and_then(|b| b.slot) else {
            return Err(SinkError::UnknownParameter {
                id,
                name: name.to_owned(),
            });
        };
        if mixer.set_float(slot, value) {
            Ok(())
        } else {
            Err(SinkError::Rejected {
                name: name.to_owned(),
                value,
            })
        }
    }
}
