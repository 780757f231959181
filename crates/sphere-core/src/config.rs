//! Static configuration, fixed once the owning component is constructed.
//!
//! Every struct defaults to the tuning values in [`crate::constants`]; front-ends
//! override individual fields with struct update syntax.

use crate::constants::*;
use smallvec::{smallvec, SmallVec};
use std::time::Duration;

/// Layout and budget of the point sphere.
#[derive(Clone, Debug)]
pub struct SphereConfig {
    pub initial_count: u32,
    pub min_count: u32,
    pub max_count: u32,
    pub radius: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub base_size: f32,
    /// Radians per nominal 60 Hz frame around X and Y.
    pub initial_rotation: [f32; 2],
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            initial_count: INITIAL_PARTICLE_COUNT,
            min_count: MIN_PARTICLE_COUNT,
            max_count: MAX_PARTICLE_COUNT,
            radius: SPHERE_RADIUS,
            min_size: POINT_MIN_SIZE,
            max_size: POINT_MAX_SIZE,
            base_size: POINT_BASE_SIZE,
            initial_rotation: [INITIAL_ROTATION_X, INITIAL_ROTATION_Y],
        }
    }
}

#[derive(Clone, Debug)]
pub struct NoiseConfig {
    pub strength: f32,
    pub frequency: f32,
    pub time_scale: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            strength: NOISE_STRENGTH,
            frequency: NOISE_FREQUENCY,
            time_scale: NOISE_TIME_SCALE,
        }
    }
}

/// Power-curve brightness distribution: `min + (max - min) * r^power`.
#[derive(Clone, Copy, Debug)]
pub struct BrightnessCurve {
    pub min: f32,
    pub max: f32,
    pub power: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct TwinkleConfig {
    pub speed: f32,
    pub intensity: f32,
    pub random_phase: bool,
}

/// Per-point star attributes and how the star palette blends with the cycle colour.
#[derive(Clone, Debug)]
pub struct ConstellationConfig {
    pub palette: [[f32; 3]; 5],
    /// Probability of each palette class; expected to sum to 1.
    pub distribution: [f32; 5],
    pub brightness: BrightnessCurve,
    pub twinkle: TwinkleConfig,
    pub star_influence: f32,
    pub cycle_influence: f32,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            palette: STAR_COLORS,
            distribution: STAR_COLOR_DISTRIBUTION,
            brightness: BrightnessCurve {
                min: BRIGHTNESS_MIN,
                max: BRIGHTNESS_MAX,
                power: BRIGHTNESS_POWER,
            },
            twinkle: TwinkleConfig {
                speed: TWINKLE_SPEED,
                intensity: TWINKLE_INTENSITY,
                random_phase: true,
            },
            star_influence: STAR_INFLUENCE,
            cycle_influence: CYCLE_INFLUENCE,
        }
    }
}

/// One colour-cycle keyframe: phase in `[0, 1]`, HSL as degrees / percent / percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub phase: f32,
    pub hsl: [f32; 3],
}

impl Keyframe {
    pub const fn new(phase: f32, h_deg: f32, s_pct: f32, l_pct: f32) -> Self {
        Self {
            phase,
            hsl: [h_deg, s_pct, l_pct],
        }
    }
}

#[derive(Clone, Debug)]
pub struct ColorCycleConfig {
    pub duration_sec: f32,
    pub keyframes: SmallVec<[Keyframe; 8]>,
}

impl Default for ColorCycleConfig {
    fn default() -> Self {
        Self {
            duration_sec: COLOR_CYCLE_DURATION_SEC,
            keyframes: smallvec![
                Keyframe::new(0.0, 0.0, 0.0, 100.0),
                Keyframe::new(0.33, 200.0, 50.0, 80.0),
                Keyframe::new(0.66, 220.0, 80.0, 40.0),
                Keyframe::new(1.0, 0.0, 0.0, 100.0),
            ],
        }
    }
}

/// Thresholds and tier table for the frame-rate feedback loop.
#[derive(Clone, Debug)]
pub struct QualityConfig {
    pub scales: [f32; 4],
    pub fps_critical: u32,
    pub fps_low: u32,
    pub fps_medium: u32,
    pub fps_recover: u32,
    pub cooldown: Duration,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            scales: QUALITY_SCALES,
            fps_critical: FPS_CRITICAL,
            fps_low: FPS_LOW,
            fps_medium: FPS_MEDIUM,
            fps_recover: FPS_RECOVER,
            cooldown: Duration::from_millis(QUALITY_COOLDOWN_MS),
        }
    }
}

/// Everything the [`crate::Visualizer`] needs to build its components.
#[derive(Clone, Debug)]
pub struct VisualizerConfig {
    pub sphere: SphereConfig,
    pub noise: NoiseConfig,
    pub constellation: ConstellationConfig,
    pub color_cycle: ColorCycleConfig,
    pub quality: QualityConfig,
    /// Seed for per-point star attributes.
    pub seed: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            sphere: SphereConfig::default(),
            noise: NoiseConfig::default(),
            constellation: ConstellationConfig::default(),
            color_cycle: ColorCycleConfig::default(),
            quality: QualityConfig::default(),
            seed: 42,
        }
    }
}
