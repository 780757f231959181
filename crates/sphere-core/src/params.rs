//! Fixed-schema store of smoothed control parameters.
//!
//! The schema is the ordered list [`ParamId::ALL`]; entries live in a fixed
//! array indexed by id, so iteration order and shape never change at runtime.

use crate::constants::{
    INITIAL_PARTICLE_COUNT, INITIAL_ROTATION_X, INITIAL_ROTATION_Y, NOISE_STRENGTH,
};
use crate::smoothing::SmoothedValue;
use std::ops::{Index, IndexMut};

pub const PARAM_COUNT: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamId {
    ParticleCount,
    Hue,
    Saturation,
    Lightness,
    RotationX,
    RotationY,
    NoiseStrength,
    ColorCycleSpeed,
    BloomStrength,
    TrailStrength,
    WarpStrength,
    GlitchStrength,
    AberrationStrength,
}

impl ParamId {
    /// Declaration order; also the iteration order of the store and snapshots.
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::ParticleCount,
        ParamId::Hue,
        ParamId::Saturation,
        ParamId::Lightness,
        ParamId::RotationX,
        ParamId::RotationY,
        ParamId::NoiseStrength,
        ParamId::ColorCycleSpeed,
        ParamId::BloomStrength,
        ParamId::TrailStrength,
        ParamId::WarpStrength,
        ParamId::GlitchStrength,
        ParamId::AberrationStrength,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ParamId::ParticleCount => "particleCount",
            ParamId::Hue => "hue",
            ParamId::Saturation => "saturation",
            ParamId::Lightness => "lightness",
            ParamId::RotationX => "rotationX",
            ParamId::RotationY => "rotationY",
            ParamId::NoiseStrength => "noiseStrength",
            ParamId::ColorCycleSpeed => "colorCycleSpeed",
            ParamId::BloomStrength => "bloomStrength",
            ParamId::TrailStrength => "trailStrength",
            ParamId::WarpStrength => "warpStrength",
            ParamId::GlitchStrength => "glitchStrength",
            ParamId::AberrationStrength => "aberrationStrength",
        }
    }

    /// Startup value and per-frame smoothing for this entry.
    pub const fn defaults(self) -> (f32, f32) {
        match self {
            ParamId::ParticleCount => (INITIAL_PARTICLE_COUNT as f32, 0.1), // count moves slowly
            ParamId::Hue => (0.0, 0.15),
            ParamId::Saturation => (0.0, 0.15), // 0 renders white
            ParamId::Lightness => (0.9, 0.15),
            ParamId::RotationX => (INITIAL_ROTATION_X, 0.2), // rad/frame
            ParamId::RotationY => (INITIAL_ROTATION_Y, 0.2),
            ParamId::NoiseStrength => (NOISE_STRENGTH, 0.1),
            ParamId::ColorCycleSpeed => (1.0, 0.1),
            ParamId::BloomStrength => (0.8, 0.2),
            ParamId::TrailStrength => (0.0, 0.15),
            ParamId::WarpStrength => (0.0, 0.15),
            ParamId::GlitchStrength => (0.0, 0.15),
            ParamId::AberrationStrength => (0.0, 0.15),
        }
    }

    #[inline]
    pub const fn initial(self) -> f32 {
        self.defaults().0
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.name() == name)
    }
}

#[derive(Clone, Debug)]
pub struct ParamStore {
    entries: [SmoothedValue; PARAM_COUNT],
    initial: [f32; PARAM_COUNT],
}

impl Default for ParamStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParamStore {
    pub fn new() -> Self {
        Self::from_initial(ParamId::ALL.map(ParamId::initial))
    }

    /// Store whose startup values come from the built-in table except for the
    /// listed entries. [`ParamStore::reset_to_initial`] returns to these values.
    pub fn with_initial(overrides: impl IntoIterator<Item = (ParamId, f32)>) -> Self {
        let mut initial = ParamId::ALL.map(ParamId::initial);
        for (id, value) in overrides {
            initial[id as usize] = value;
        }
        Self::from_initial(initial)
    }

    fn from_initial(initial: [f32; PARAM_COUNT]) -> Self {
        Self {
            entries: ParamId::ALL
                .map(|id| SmoothedValue::new(initial[id as usize], id.defaults().1)),
            initial,
        }
    }

    /// Startup value of `id` in this store.
    #[inline]
    pub fn initial(&self, id: ParamId) -> f32 {
        self.initial[id as usize]
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> &SmoothedValue {
        &self.entries[id as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: ParamId) -> &mut SmoothedValue {
        &mut self.entries[id as usize]
    }

    pub fn lookup(&self, name: &str) -> Option<&SmoothedValue> {
        ParamId::from_name(name).map(|id| self.get(id))
    }

    #[inline]
    pub fn set_target(&mut self, id: ParamId, value: f32) {
        self.get_mut(id).set_target(value);
    }

    #[inline]
    pub fn set_value(&mut self, id: ParamId, value: f32) {
        self.get_mut(id).set_value(value);
    }

    /// Smooth every entry in declaration order.
    pub fn update_all(&mut self, dt_sec: f32) {
        for entry in &mut self.entries {
            entry.update(dt_sec);
        }
    }

    /// Snapshot of every current value.
    pub fn values(&self) -> ParamValues {
        ParamValues(self.entries.map(|e| e.current()))
    }

    /// Hard-set every entry back to its startup value.
    pub fn reset_to_initial(&mut self) {
        for id in ParamId::ALL {
            self.set_value(id, self.initial(id));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamId, &SmoothedValue)> {
        ParamId::ALL.iter().copied().zip(self.entries.iter())
    }
}

impl Index<ParamId> for ParamStore {
    type Output = SmoothedValue;

    fn index(&self, id: ParamId) -> &SmoothedValue {
        self.get(id)
    }
}

impl IndexMut<ParamId> for ParamStore {
    fn index_mut(&mut self, id: ParamId) -> &mut SmoothedValue {
        self.get_mut(id)
    }
}

/// Current values captured from a [`ParamStore`] at one point in a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamValues([f32; PARAM_COUNT]);

impl ParamValues {
    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.0[id as usize]
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        ParamId::ALL.iter().map(move |id| (id.name(), self.get(*id)))
    }
}

impl Index<ParamId> for ParamValues {
    type Output = f32;

    fn index(&self, id: ParamId) -> &f32 {
        &self.0[id as usize]
    }
}
