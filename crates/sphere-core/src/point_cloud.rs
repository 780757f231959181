//! Fixed-capacity point sphere with buffer-stable level of detail.
//!
//! All per-point arrays are sized to `max_count` once, at construction. Changing
//! the particle count never reallocates: a persistent index array is rewritten
//! so that its first `count` entries pick an evenly spaced subset of the full
//! point set, and only that prefix is drawn. Because points are laid out along
//! a Fibonacci spiral, any evenly spaced subset still covers the whole sphere.
//!
//! GPU hand-off is two-phase. Construction is synchronous and CPU-only; the
//! owner calls [`SpherePointCloud::attach`] once its render backend has
//! buffers, which uploads everything recorded so far. After that,
//! [`SpherePointCloud::sync`] pushes only what changed.

use crate::color::{clamp01, hsl_to_rgb, wrap01};
use crate::config::{ConstellationConfig, NoiseConfig, SphereConfig};
use crate::constants::{
    COLOR_CYCLE_SPEED_MAX, HUE_CYCLE_PERIOD_SEC, NOMINAL_FRAME_RATE, QUALITY_SCALE_MAX,
    QUALITY_SCALE_MIN,
};
use crate::error::{CoreError, Result};
use crate::quality::QualityScaleTarget;
use glam::{Mat4, Vec2, Vec3};
use rand::prelude::*;
use std::ops::Range;

/// Per-point data uploaded once and never regenerated by resizes.
#[derive(Clone, Debug, Default)]
pub struct PointAttributes {
    pub positions: Vec<Vec3>,
    /// Index into the star palette.
    pub color_classes: Vec<u8>,
    pub brightness: Vec<f32>,
    /// Twinkle phase offset in `[0, 1)`.
    pub twinkle_phases: Vec<f32>,
}

impl PointAttributes {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Uniform block consumed by the point shader. Layout matches `PointUniforms`
/// in `shaders/points.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub cycle_color: [f32; 4],
    pub star_colors: [[f32; 4]; 5],
    pub rotation: [f32; 2],
    pub _pad: [f32; 2],
    pub time: f32,
    pub noise_strength: f32,
    pub noise_frequency: f32,
    pub time_scale: f32,
    pub star_influence: f32,
    pub cycle_influence: f32,
    pub twinkle_speed: f32,
    pub twinkle_intensity: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub base_size: f32,
    pub opacity: f32,
}

/// GPU-side mirror of the point cloud, implemented by a render backend.
///
/// Writes are fire-and-forget: the backend consumes them on its own schedule.
pub trait PointBuffers {
    /// Full per-point arrays. Called once per attach.
    fn write_attributes(&mut self, attributes: &PointAttributes);
    /// Active prefix of the index array.
    fn write_indices(&mut self, indices: &[u32]);
    fn set_draw_range(&mut self, range: Range<u32>);
    fn write_uniforms(&mut self, uniforms: &PointUniforms);
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built on the CPU; no backend attached yet.
    Pending,
    Ready,
    Disposed,
}

pub struct SpherePointCloud {
    config: SphereConfig,
    noise: NoiseConfig,
    constellation: ConstellationConfig,
    min_count: u32,
    max_count: u32,
    desired_count: u32,
    count: u32,
    quality_scale: f32,

    attributes: PointAttributes,
    indices: Vec<u32>,
    lifecycle: Lifecycle,
    indices_dirty: bool,

    // rates are radians per nominal 60 Hz frame
    rotation_rate: Vec2,
    rotation: Vec2,
    noise_strength: f32,
    hue: f32,
    saturation: f32,
    lightness: f32,
    color_cycle_speed: f32,
    color: [f32; 3],
    cycle_color: [f32; 3],
    opacity: f32,
    time: f32,
}

impl SpherePointCloud {
    /// Lay out `max_count` points and assign their star attributes from `seed`.
    ///
    /// Fails only when the capacity is zero or the count range is empty.
    pub fn new(
        config: SphereConfig,
        noise: NoiseConfig,
        constellation: ConstellationConfig,
        seed: u64,
    ) -> Result<Self> {
        let max_count = config.max_count;
        if max_count < 1 {
            return Err(CoreError::InvalidCapacity { max_count });
        }
        let min_count = config.min_count.max(1);
        if min_count > max_count {
            return Err(CoreError::InvalidCountRange {
                min: min_count,
                max: max_count,
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let attributes = PointAttributes {
            positions: fibonacci_sphere(max_count, config.radius),
            ..star_attributes(max_count, &constellation, &mut rng)
        };

        let desired_count = config.initial_count.clamp(min_count, max_count);
        let mut indices = vec![0u32; max_count as usize];
        resample_indices(&mut indices, desired_count);

        log::info!(
            "[sphere] {} points allocated, drawing {} (range {}..={})",
            max_count,
            desired_count,
            min_count,
            max_count
        );

        Ok(Self {
            rotation_rate: Vec2::from(config.initial_rotation),
            noise_strength: clamp01(noise.strength),
            config,
            noise,
            constellation,
            min_count,
            max_count,
            desired_count,
            count: desired_count,
            quality_scale: 1.0,
            attributes,
            indices,
            lifecycle: Lifecycle::Pending,
            indices_dirty: true,
            rotation: Vec2::ZERO,
            hue: 0.0,
            saturation: 0.0,
            lightness: 0.9,
            color_cycle_speed: 1.0,
            color: [1.0, 1.0, 1.0],
            cycle_color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            time: 0.0,
        })
    }

    // ---- LOD ----

    /// Request a particle count. Rounded and clamped into `[min_count, max_count]`.
    pub fn set_particle_count(&mut self, count: f32) {
        self.desired_count = (count.round() as u32).clamp(self.min_count, self.max_count);
        self.apply_count();
    }

    /// Controller multiplier, clamped into `[0.1, 1.0]`.
    pub fn set_quality_scale(&mut self, scale: f32) {
        if scale.is_nan() {
            log::debug!("[sphere] ignoring NaN quality scale");
            return;
        }
        let s = scale.clamp(QUALITY_SCALE_MIN, QUALITY_SCALE_MAX);
        if s == self.quality_scale {
            return;
        }
        self.quality_scale = s;
        self.apply_count();
    }

    /// `clamp(round(desired * scale), min, max)`.
    pub fn effective_count(&self) -> u32 {
        let scaled = (self.desired_count as f64 * self.quality_scale as f64).round();
        (scaled as u32).clamp(self.min_count, self.max_count)
    }

    fn apply_count(&mut self) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        let effective = self.effective_count();
        if effective == self.count {
            return;
        }
        self.count = effective;
        resample_indices(&mut self.indices, effective);
        self.indices_dirty = true;
    }

    // ---- appearance setters, applied on the next `update` ----

    /// Rotation rates in radians per nominal 60 Hz frame.
    pub fn set_rotation(&mut self, rate_x: f32, rate_y: f32) {
        self.rotation_rate = Vec2::new(rate_x, rate_y);
    }

    pub fn set_noise_strength(&mut self, strength: f32) {
        self.noise_strength = clamp01(strength);
    }

    /// Base colour; hue wraps into `[0, 1)`, saturation and lightness clamp.
    pub fn set_hsl(&mut self, hue: f32, saturation: f32, lightness: f32) {
        self.hue = wrap01(hue);
        self.saturation = clamp01(saturation);
        self.lightness = clamp01(lightness);
    }

    pub fn set_color_cycle_speed(&mut self, speed: f32) {
        self.color_cycle_speed = speed.clamp(0.0, COLOR_CYCLE_SPEED_MAX);
    }

    /// Output of the keyframed colour cycle, blended with the star palette in the shader.
    pub fn set_cycle_color(&mut self, rgb: [f32; 3]) {
        self.cycle_color = rgb;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp01(opacity);
    }

    /// Advance time-dependent state: automatic hue drift and rotation.
    pub fn update(&mut self, elapsed_sec: f32, dt_sec: f32) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        self.time = elapsed_sec;
        let hue_auto = elapsed_sec / HUE_CYCLE_PERIOD_SEC * self.color_cycle_speed;
        self.color = hsl_to_rgb(wrap01(self.hue + hue_auto), self.saturation, self.lightness);
        self.rotation += self.rotation_rate * (dt_sec * NOMINAL_FRAME_RATE);
    }

    // ---- GPU hand-off ----

    /// Readiness signal: upload the full point set and current state to `gpu`.
    pub fn attach(&mut self, gpu: &mut dyn PointBuffers) -> Result<()> {
        if self.lifecycle == Lifecycle::Disposed {
            return Err(CoreError::Disposed);
        }
        gpu.write_attributes(&self.attributes);
        gpu.write_indices(self.indices());
        gpu.set_draw_range(self.draw_range());
        gpu.write_uniforms(&self.uniforms());
        self.indices_dirty = false;
        self.lifecycle = Lifecycle::Ready;
        Ok(())
    }

    /// Push the index prefix (if it changed) and this frame's uniforms.
    pub fn sync(&mut self, gpu: &mut dyn PointBuffers) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Pending => {
                log::debug!("[sphere] sync before attach rejected");
                return Err(CoreError::NotReady);
            }
            Lifecycle::Disposed => return Err(CoreError::Disposed),
            Lifecycle::Ready => {}
        }
        if self.indices_dirty {
            gpu.write_indices(self.indices());
            gpu.set_draw_range(self.draw_range());
            self.indices_dirty = false;
        }
        gpu.write_uniforms(&self.uniforms());
        Ok(())
    }

    /// Release GPU buffers and drop the CPU arrays. Safe to call repeatedly.
    pub fn dispose(&mut self, gpu: Option<&mut dyn PointBuffers>) {
        if self.lifecycle == Lifecycle::Disposed {
            return;
        }
        if self.lifecycle == Lifecycle::Ready {
            if let Some(gpu) = gpu {
                gpu.release();
            }
        }
        self.attributes = PointAttributes::default();
        self.indices = Vec::new();
        self.indices_dirty = false;
        self.lifecycle = Lifecycle::Disposed;
        log::info!("[sphere] disposed");
    }

    // ---- accessors ----

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn desired_count(&self) -> u32 {
        self.desired_count
    }

    pub fn quality_scale(&self) -> f32 {
        self.quality_scale
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn max_count(&self) -> u32 {
        self.max_count
    }

    pub fn draw_range(&self) -> Range<u32> {
        0..self.count
    }

    /// Active index prefix (what gets drawn). Empty once disposed.
    pub fn indices(&self) -> &[u32] {
        let n = (self.count as usize).min(self.indices.len());
        &self.indices[..n]
    }

    /// The whole persistent index array, including inactive entries.
    pub fn index_buffer(&self) -> &[u32] {
        &self.indices
    }

    pub fn attributes(&self) -> &PointAttributes {
        &self.attributes
    }

    /// Accumulated rotation angles (radians) around X and Y.
    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn rotation_rate(&self) -> Vec2 {
        self.rotation_rate
    }

    /// Base RGB computed by the last `update`.
    pub fn color(&self) -> [f32; 3] {
        self.color
    }

    pub fn noise_strength(&self) -> f32 {
        self.noise_strength
    }

    pub fn color_cycle_speed(&self) -> f32 {
        self.color_cycle_speed
    }

    pub fn hsl(&self) -> [f32; 3] {
        [self.hue, self.saturation, self.lightness]
    }

    pub fn uniforms(&self) -> PointUniforms {
        let model = Mat4::from_rotation_x(self.rotation.x) * Mat4::from_rotation_y(self.rotation.y);
        let c = &self.constellation;
        PointUniforms {
            model: model.to_cols_array_2d(),
            color: rgb_a(self.color, 1.0),
            cycle_color: rgb_a(self.cycle_color, 1.0),
            star_colors: c.palette.map(|rgb| rgb_a(rgb, 1.0)),
            rotation: self.rotation.to_array(),
            _pad: [0.0; 2],
            time: self.time,
            noise_strength: self.noise_strength,
            noise_frequency: self.noise.frequency,
            time_scale: self.noise.time_scale,
            star_influence: c.star_influence,
            cycle_influence: c.cycle_influence,
            twinkle_speed: c.twinkle.speed,
            twinkle_intensity: c.twinkle.intensity,
            min_size: self.config.min_size,
            max_size: self.config.max_size,
            base_size: self.config.base_size,
            opacity: self.opacity,
        }
    }
}

impl QualityScaleTarget for SpherePointCloud {
    fn set_quality_scale(&mut self, scale: f32) {
        SpherePointCloud::set_quality_scale(self, scale);
    }
}

/// Point `i` of `n` on a Fibonacci (golden-angle) spiral of radius `radius`,
/// from the north pole (`i = 0`) to the south pole (`i = n - 1`).
pub fn fibonacci_point(i: u32, n: u32, radius: f32) -> Vec3 {
    let golden_angle = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    let y = if n > 1 {
        1.0 - (i as f64 / (n - 1) as f64) * 2.0
    } else {
        1.0
    };
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = golden_angle * i as f64;
    Vec3::new(
        (theta.cos() * r) as f32 * radius,
        y as f32 * radius,
        (theta.sin() * r) as f32 * radius,
    )
}

pub fn fibonacci_sphere(n: u32, radius: f32) -> Vec<Vec3> {
    (0..n).map(|i| fibonacci_point(i, n, radius)).collect()
}

/// Write `index[i] = floor(i * max / n)` for `i < n`, where `max = indices.len()`.
///
/// Only the first `n` entries are touched; `n` is clamped into `[1, max]`.
pub fn resample_indices(indices: &mut [u32], n: u32) {
    let max = indices.len() as u64;
    if max == 0 {
        return;
    }
    let n = (n as u64).clamp(1, max);
    for (i, slot) in indices.iter_mut().take(n as usize).enumerate() {
        *slot = (i as u64 * max / n) as u32;
    }
}

/// Colour class, brightness and twinkle phase for `n` points, drawn in that
/// order per point.
fn star_attributes(n: u32, config: &ConstellationConfig, rng: &mut StdRng) -> PointAttributes {
    let n = n as usize;
    let last_class = config.distribution.len().saturating_sub(1) as u8;
    let curve = config.brightness;
    let mut color_classes = Vec::with_capacity(n);
    let mut brightness = Vec::with_capacity(n);
    let mut twinkle_phases = Vec::with_capacity(n);

    for _ in 0..n {
        let r: f32 = rng.gen();
        let mut cumulative = 0.0;
        let mut class = last_class;
        for (j, p) in config.distribution.iter().enumerate() {
            cumulative += p;
            if r < cumulative {
                class = j as u8;
                break;
            }
        }
        color_classes.push(class);

        let b: f32 = rng.gen();
        brightness.push(curve.min + (curve.max - curve.min) * b.powf(curve.power));

        twinkle_phases.push(if config.twinkle.random_phase {
            rng.gen()
        } else {
            0.0
        });
    }

    PointAttributes {
        positions: Vec::new(),
        color_classes,
        brightness,
        twinkle_phases,
    }
}

#[inline]
fn rgb_a(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}
