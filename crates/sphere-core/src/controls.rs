//! Keyboard bindings that write parameter targets.
//!
//! Held keys ramp a [`ParamStore`] target at a fixed rate per second; the store
//! then smooths toward it. Digit and letter toggles map to [`ControlAction`]s
//! that the owner applies to effects, layers and the debug readout.

use crate::params::{ParamId, ParamStore};
use fnv::FnvHashSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlAction {
    ToggleEffectSetA,
    ToggleEffectSetB,
    AllEffectsOff,
    /// Zero-based layer index.
    ToggleLayer(usize),
    ResetToInitial,
    ToggleDebugReadout,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Bound {
    Max(f32),
    Min(f32),
    /// Wrap into `[0, 1]`.
    Wrap,
}

#[derive(Clone, Copy, Debug)]
struct Ramp {
    key: char,
    param: ParamId,
    /// Signed units per second.
    rate: f32,
    /// Rate while shift is held, if different.
    shift_rate: Option<f32>,
    bound: Bound,
}

const fn ramp(key: char, param: ParamId, rate: f32, bound: Bound) -> Ramp {
    Ramp {
        key,
        param,
        rate,
        shift_rate: None,
        bound,
    }
}

// Evaluated in this order every frame.
const RAMPS: [Ramp; 26] = [
    Ramp {
        key: 'q',
        param: ParamId::ParticleCount,
        rate: 5_000.0,
        shift_rate: Some(50_000.0),
        bound: Bound::Max(500_000.0),
    },
    Ramp {
        key: 'a',
        param: ParamId::ParticleCount,
        rate: -5_000.0,
        shift_rate: Some(-50_000.0),
        bound: Bound::Min(10_000.0),
    },
    ramp('w', ParamId::Saturation, 0.02, Bound::Max(1.0)),
    ramp('s', ParamId::Saturation, -0.02, Bound::Min(0.0)),
    ramp('e', ParamId::Lightness, 0.02, Bound::Max(1.0)),
    ramp('d', ParamId::Lightness, -0.02, Bound::Min(0.2)),
    ramp('r', ParamId::Hue, 0.02, Bound::Wrap),
    ramp('f', ParamId::Hue, -0.02, Bound::Wrap),
    ramp('t', ParamId::RotationX, 0.0005, Bound::Max(0.01)),
    ramp('g', ParamId::RotationX, -0.0005, Bound::Min(-0.01)),
    ramp('y', ParamId::RotationY, 0.0005, Bound::Max(0.01)),
    ramp('h', ParamId::RotationY, -0.0005, Bound::Min(-0.01)),
    ramp('u', ParamId::ColorCycleSpeed, 0.05, Bound::Max(2.0)),
    ramp('j', ParamId::ColorCycleSpeed, -0.05, Bound::Min(0.5)),
    ramp('i', ParamId::NoiseStrength, 0.02, Bound::Max(1.0)),
    ramp('k', ParamId::NoiseStrength, -0.02, Bound::Min(0.0)),
    ramp('z', ParamId::BloomStrength, 0.05, Bound::Max(2.0)),
    ramp('x', ParamId::BloomStrength, -0.05, Bound::Min(0.0)),
    ramp('c', ParamId::TrailStrength, 0.02, Bound::Max(1.0)),
    ramp('v', ParamId::TrailStrength, -0.02, Bound::Min(0.0)),
    ramp('b', ParamId::WarpStrength, 0.01, Bound::Max(0.3)),
    ramp('n', ParamId::WarpStrength, -0.01, Bound::Min(0.0)),
    ramp('m', ParamId::GlitchStrength, 0.02, Bound::Max(1.0)),
    ramp(',', ParamId::GlitchStrength, -0.02, Bound::Min(0.0)),
    ramp('.', ParamId::AberrationStrength, 0.1, Bound::Max(5.0)),
    ramp('/', ParamId::AberrationStrength, -0.1, Bound::Min(0.0)),
];

#[derive(Clone, Debug, Default)]
pub struct KeyboardControls {
    held: FnvHashSet<char>,
    shift: bool,
}

impl KeyboardControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns the toggle it triggers, if any.
    pub fn key_down(&mut self, key: char, mods: Modifiers) -> Option<ControlAction> {
        let key = key.to_ascii_lowercase();
        self.shift = mods.shift;
        self.held.insert(key);
        toggle_for_key(key, mods)
    }

    pub fn key_up(&mut self, key: char, mods: Modifiers) {
        self.shift = mods.shift;
        self.held.remove(&key.to_ascii_lowercase());
    }

    pub fn set_shift(&mut self, shift: bool) {
        self.shift = shift;
    }

    /// Forget every held key (focus loss).
    pub fn release_all(&mut self) {
        self.held.clear();
        self.shift = false;
    }

    pub fn is_held(&self, key: char) -> bool {
        self.held.contains(&key.to_ascii_lowercase())
    }

    /// Ramp the targets of every held binding by `dt_sec`.
    pub fn apply(&self, params: &mut ParamStore, dt_sec: f32) {
        if self.held.is_empty() {
            return;
        }
        for binding in RAMPS.iter().filter(|b| self.held.contains(&b.key)) {
            let rate = match binding.shift_rate {
                Some(fast) if self.shift => fast,
                _ => binding.rate,
            };
            let entry = params.get_mut(binding.param);
            let raw = entry.target() + rate * dt_sec;
            let next = match binding.bound {
                Bound::Max(hi) => raw.min(hi),
                Bound::Min(lo) => raw.max(lo),
                Bound::Wrap if raw > 1.0 => raw - 1.0,
                Bound::Wrap if raw < 0.0 => raw + 1.0,
                Bound::Wrap => raw,
            };
            entry.set_target(next);
        }
    }
}

/// Toggle bound to `key`. Digits and `p` need no modifiers; ctrl/cmd + r resets.
pub fn toggle_for_key(key: char, mods: Modifiers) -> Option<ControlAction> {
    if (mods.ctrl || mods.meta) && key.eq_ignore_ascii_case(&'r') {
        return Some(ControlAction::ResetToInitial);
    }
    if !mods.none() {
        return None;
    }
    match key {
        '1' => Some(ControlAction::ToggleEffectSetA),
        '2' => Some(ControlAction::ToggleEffectSetB),
        '3' => Some(ControlAction::AllEffectsOff),
        '4' => Some(ControlAction::ToggleLayer(0)),
        '5' => Some(ControlAction::ToggleLayer(1)),
        '6' => Some(ControlAction::ToggleLayer(2)),
        '0' => Some(ControlAction::ResetToInitial),
        'p' => Some(ControlAction::ToggleDebugReadout),
        _ => None,
    }
}
