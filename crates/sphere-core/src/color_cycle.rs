//! Keyframed colour animation that loops every `duration_sec`.
//!
//! Hue is interpolated as a plain number between keyframes, not along the
//! shortest arc: a 220° -> 0° segment sweeps back through cyan and green.

use crate::color::{hsl_degrees_to_rgb, wrap01};
use crate::config::{ColorCycleConfig, Keyframe};
use crate::constants::COLOR_CYCLE_MIN_SPAN;

#[derive(Clone, Debug, Default)]
pub struct ColorCycle {
    config: ColorCycleConfig,
}

impl ColorCycle {
    pub fn new(config: ColorCycleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ColorCycleConfig {
        &self.config
    }

    /// RGB (0..1) at `elapsed_sec`. Pure: the same input always yields the same colour.
    pub fn update(&self, elapsed_sec: f32) -> [f32; 3] {
        let [h, s, l] = self.hsl_at(elapsed_sec);
        hsl_degrees_to_rgb(h, s, l)
    }

    /// Interpolated HSL (degrees, percent, percent) at `elapsed_sec`.
    pub fn hsl_at(&self, elapsed_sec: f32) -> [f32; 3] {
        let keyframes = &self.config.keyframes;
        let (Some(first), Some(last)) = (keyframes.first(), keyframes.last()) else {
            return [0.0, 0.0, 100.0];
        };
        let duration = self.config.duration_sec;
        let t = if duration > 0.0 {
            wrap01((elapsed_sec % duration) / duration)
        } else {
            0.0
        };

        let (k0, k1) = bracket(keyframes, t).unwrap_or((first, last));
        let span = (k1.phase - k0.phase).max(COLOR_CYCLE_MIN_SPAN);
        let local = (t - k0.phase) / span;
        [
            lerp(k0.hsl[0], k1.hsl[0], local),
            lerp(k0.hsl[1], k1.hsl[1], local),
            lerp(k0.hsl[2], k1.hsl[2], local),
        ]
    }
}

/// First adjacent pair whose phases enclose `t`.
fn bracket(keyframes: &[Keyframe], t: f32) -> Option<(&Keyframe, &Keyframe)> {
    keyframes
        .windows(2)
        .find(|pair| t >= pair[0].phase && t <= pair[1].phase)
        .map(|pair| (&pair[0], &pair[1]))
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
