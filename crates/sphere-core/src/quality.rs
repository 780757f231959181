//! Frame-rate feedback loop that trades particle density and effects for speed.
//!
//! Degradation jumps straight to the tier matching the measured fps;
//! recovery climbs one tier at a time. Frame rates between the medium and
//! recover thresholds (50..=55 fps by default) never cause a change, and a
//! cooldown separates consecutive transitions.

use crate::config::QualityConfig;
use crate::effects::EffectState;
use instant::Instant;

pub const MAX_QUALITY_LEVEL: u8 = 3;

/// Receives the particle multiplier chosen by the controller.
pub trait QualityScaleTarget {
    fn set_quality_scale(&mut self, scale: f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QualityTransition {
    Degraded { from: u8, to: u8, scale: f32 },
    Recovered { from: u8, to: u8, scale: f32 },
}

impl QualityTransition {
    pub fn level(&self) -> u8 {
        match *self {
            QualityTransition::Degraded { to, .. } | QualityTransition::Recovered { to, .. } => to,
        }
    }

    pub fn scale(&self) -> f32 {
        match *self {
            QualityTransition::Degraded { scale, .. }
            | QualityTransition::Recovered { scale, .. } => scale,
        }
    }
}

#[derive(Debug)]
pub struct QualityController {
    config: QualityConfig,
    level: u8,
    last_adjust: Instant,
}

impl QualityController {
    /// Start at full quality. The cooldown clock starts at `now`, so the first
    /// transition can happen one cooldown after construction at the earliest.
    pub fn new(config: QualityConfig, now: Instant) -> Self {
        Self {
            config,
            level: MAX_QUALITY_LEVEL,
            last_adjust: now,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn scale(&self) -> f32 {
        self.config.scales[self.level as usize]
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Evaluate one frame-rate sample. At most one rule fires per call, and
    /// none fire while the cooldown is running. `effects` may be absent, in
    /// which case only the particle scale is adjusted.
    pub fn update(
        &mut self,
        avg_fps: u32,
        now: Instant,
        target: &mut dyn QualityScaleTarget,
        effects: Option<&mut EffectState>,
    ) -> Option<QualityTransition> {
        if now.saturating_duration_since(self.last_adjust) < self.config.cooldown {
            return None;
        }
        let from = self.level;
        let cfg = &self.config;

        let transition = if avg_fps < cfg.fps_critical && from > 0 {
            self.level = 0;
            if let Some(fx) = effects {
                fx.set_a = false;
                fx.set_b = false;
                fx.quality_disable_trail_warp = false;
            }
            log::warn!(
                "[quality] MINIMUM: {:.0}% particles, all effects off ({avg_fps} fps)",
                self.scale() * 100.0
            );
            QualityTransition::Degraded {
                from,
                to: 0,
                scale: self.scale(),
            }
        } else if avg_fps < cfg.fps_low && from > 1 {
            self.level = 1;
            if let Some(fx) = effects {
                fx.quality_disable_trail_warp = true;
            }
            log::warn!(
                "[quality] LOW: {:.0}% particles, trail/warp off ({avg_fps} fps)",
                self.scale() * 100.0
            );
            QualityTransition::Degraded {
                from,
                to: 1,
                scale: self.scale(),
            }
        } else if avg_fps < cfg.fps_medium && from > 2 {
            self.level = 2;
            log::warn!(
                "[quality] MEDIUM: {:.0}% particles ({avg_fps} fps)",
                self.scale() * 100.0
            );
            QualityTransition::Degraded {
                from,
                to: 2,
                scale: self.scale(),
            }
        } else if avg_fps > cfg.fps_recover && from < MAX_QUALITY_LEVEL {
            self.level = from + 1;
            if self.level == MAX_QUALITY_LEVEL {
                if let Some(fx) = effects {
                    fx.quality_disable_trail_warp = false;
                }
            }
            log::info!("[quality] recovered to level {} ({avg_fps} fps)", self.level);
            QualityTransition::Recovered {
                from,
                to: self.level,
                scale: self.scale(),
            }
        } else {
            return None;
        };

        target.set_quality_scale(transition.scale());
        self.last_adjust = now;
        Some(transition)
    }
}
