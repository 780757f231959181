//! Optional post-processing effect gating.
//!
//! Effects come in two user-toggled sets: set A (bloom, trail, warp) and set B
//! (glitch, chromatic aberration). The quality controller can additionally
//! suppress trail and warp without touching the user's set A choice.

use crate::params::{ParamId, ParamValues};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectState {
    pub set_a: bool,
    pub set_b: bool,
    /// Trail and warp forced off by the quality controller.
    pub quality_disable_trail_warp: bool,
}

impl EffectState {
    pub fn toggle_set_a(&mut self) -> bool {
        self.set_a = !self.set_a;
        log::info!("[effects] set A {}", on_off(self.set_a));
        self.set_a
    }

    pub fn toggle_set_b(&mut self) -> bool {
        self.set_b = !self.set_b;
        log::info!("[effects] set B {}", on_off(self.set_b));
        self.set_b
    }

    /// User "all effects off"; leaves the quality override alone.
    pub fn all_off(&mut self) {
        self.set_a = false;
        self.set_b = false;
        log::info!("[effects] all off");
    }

    /// Which passes run this frame and how strongly.
    pub fn resolve(&self, params: &ParamValues, time_sec: f32) -> EffectPasses {
        let trail_warp = self.set_a && !self.quality_disable_trail_warp;
        EffectPasses {
            bloom: PassState::new(self.set_a, params[ParamId::BloomStrength]),
            trail: PassState::new(trail_warp, params[ParamId::TrailStrength]),
            warp: PassState::new(trail_warp, params[ParamId::WarpStrength]),
            glitch: PassState::new(self.set_b, params[ParamId::GlitchStrength]),
            aberration: PassState::new(self.set_b, params[ParamId::AberrationStrength]),
            time_sec,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PassState {
    pub enabled: bool,
    pub strength: f32,
}

impl PassState {
    fn new(enabled: bool, strength: f32) -> Self {
        Self { enabled, strength }
    }
}

/// Per-frame input for an external post-processing chain.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EffectPasses {
    pub bloom: PassState,
    pub trail: PassState,
    pub warp: PassState,
    pub glitch: PassState,
    pub aberration: PassState,
    /// Drives the glitch pattern.
    pub time_sec: f32,
}

impl EffectPasses {
    pub fn any_enabled(&self) -> bool {
        [self.bloom, self.trail, self.warp, self.glitch, self.aberration]
            .iter()
            .any(|p| p.enabled)
    }
}

pub(crate) fn on_off(v: bool) -> &'static str {
    if v {
        "ON"
    } else {
        "OFF"
    }
}
