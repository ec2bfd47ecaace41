use crate::constants::{
    DEFAULT_CHANNEL_VOLUME, DISC_CENTERS, DISC_RADIUS, EQ_PARAMS, FADER_PARAMS, GAIN_PARAMS,
    KNOB_COLUMN_X, KNOB_RADIUS, KNOB_ROW_Y, PITCH_PARAMS,
};
use crate::events::Control;
use glam::Vec2;
use turntable_core::{
    Band, ConfigError, CrossfadeMode, Deck, DiscRotation, KnobConfig, ParamId, ScratchConfig,
    DEFAULT_BASE_ROTATION_SPEED, DEFAULT_CROSSFADE_POSITION, DEFAULT_PITCH,
};

/// Circular hit area in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitCircle {
    pub center: Vec2,
    pub radius: f32,
}

impl HitCircle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EqKnobConfig {
    pub area: HitCircle,
    pub param: String,
    pub knob: KnobConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeckConfig {
    pub disc: HitCircle,
    pub scratch: ScratchConfig,
    /// Platter degrees per second at pitch 1.0.
    pub base_rotation_speed: f32,
    pub initial_pitch: f32,
    pub initial_volume: f32,
    pub pitch_param: String,
    pub volume_param: String,
    /// Indexed by [`Band::index`].
    pub eq: [EqKnobConfig; 3],
}

impl DeckConfig {
    pub fn for_deck(deck: Deck) -> Self {
        let d = deck.index();
        let eq = Band::ALL.map(|band| EqKnobConfig {
            area: HitCircle::new(
                Vec2::new(KNOB_COLUMN_X[d], KNOB_ROW_Y[band.index()]),
                KNOB_RADIUS,
            ),
            param: EQ_PARAMS[d][band.index()].to_owned(),
            knob: KnobConfig::gain(band.label()),
        });
        Self {
            disc: HitCircle::new(DISC_CENTERS[d], DISC_RADIUS),
            scratch: ScratchConfig::default(),
            base_rotation_speed: DEFAULT_BASE_ROTATION_SPEED,
            initial_pitch: DEFAULT_PITCH,
            initial_volume: DEFAULT_CHANNEL_VOLUME,
            pitch_param: PITCH_PARAMS[d].to_owned(),
            volume_param: FADER_PARAMS[d].to_owned(),
            eq,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CrossfaderConfig {
    pub mode: CrossfadeMode,
    pub initial_position: f32,
    /// Gain parameter for deck A and deck B.
    pub gain_params: [String; 2],
}

impl Default for CrossfaderConfig {
    fn default() -> Self {
        Self {
            mode: CrossfadeMode::EqualPower,
            initial_position: DEFAULT_CROSSFADE_POSITION,
            gain_params: GAIN_PARAMS.map(str::to_owned),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConsoleConfig {
    pub decks: [DeckConfig; 2],
    pub crossfade: CrossfaderConfig,
    /// Pause and rewind both transports when the console is built.
    pub start_paused: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            decks: Deck::ALL.map(DeckConfig::for_deck),
            crossfade: CrossfaderConfig::default(),
            start_paused: true,
        }
    }
}

impl ConsoleConfig {
    pub fn deck(&self, deck: Deck) -> &DeckConfig {
        &self.decks[deck.index()]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for deck in &self.decks {
            deck.scratch.validate()?;
            DiscRotation::validate_base_speed(deck.base_rotation_speed)?;
            if !(deck.disc.radius > 0.0) {
                return Err(ConfigError::NotPositive {
                    what: "disc radius",
                    value: deck.disc.radius,
                });
            }
            if !deck.initial_pitch.is_finite() {
                return Err(ConfigError::NonFiniteRange {
                    what: "initial pitch",
                    min: deck.initial_pitch,
                    max: deck.initial_pitch,
                });
            }
            if !(0.0..=1.0).contains(&deck.initial_volume) {
                return Err(ConfigError::OutOfRange {
                    what: "initial channel volume",
                    value: deck.initial_volume,
                    min: 0.0,
                    max: 1.0,
                });
            }
            for eq in &deck.eq {
                eq.knob.validate()?;
            }
        }
        let p = self.crossfade.initial_position;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::OutOfRange {
                what: "crossfade position",
                value: p,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }

    /// Every parameter id paired with the mixer name it is exposed under.
    pub fn parameter_names(&self) -> Vec<(ParamId, &str)> {
        let mut names = Vec::with_capacity(12);
        for deck in Deck::ALL {
            let d = self.deck(deck);
            names.push((
                ParamId::Gain(deck),
                self.crossfade.gain_params[deck.index()].as_str(),
            ));
            names.push((ParamId::Pitch(deck), d.pitch_param.as_str()));
            names.push((ParamId::Volume(deck), d.volume_param.as_str()));
            for band in Band::ALL {
                names.push((ParamId::Eq(deck, band), d.eq[band.index()].param.as_str()));
            }
        }
        names
    }

    /// Topmost control under `point`. Knobs sit above the platters.
    pub fn hit_test(&self, point: Vec2) -> Option<Control> {
        for deck in Deck::ALL {
            for band in Band::ALL {
                if self.deck(deck).eq[band.index()].area.contains(point) {
                    return Some(Control::Knob(deck, band));
                }
            }
        }
        Deck::ALL
            .into_iter()
            .find(|&deck| self.deck(deck).disc.contains(point))
            .map(Control::Disc)
    }
}
