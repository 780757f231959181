//! Application context that owns every core component and runs the frame tick.
//!
//! Front-ends hold one `Visualizer`, forward input to it, call
//! [`Visualizer::tick`] once per displayed frame and then sync the sphere
//! into their GPU buffers.

use crate::color_cycle::ColorCycle;
use crate::config::VisualizerConfig;
use crate::controls::{ControlAction, KeyboardControls, Modifiers};
use crate::effects::{on_off, EffectPasses, EffectState};
use crate::error::Result;
use crate::frame_rate::FrameRateSampler;
use crate::layers::LayerStack;
use crate::params::{ParamId, ParamStore, ParamValues};
use crate::point_cloud::{PointBuffers, SpherePointCloud};
use crate::quality::{QualityController, QualityTransition};
use instant::Instant;

/// What one tick produced, for the render backend and diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct FrameReport {
    pub fps: u32,
    pub transition: Option<QualityTransition>,
    pub params: ParamValues,
    pub passes: EffectPasses,
    pub draw_count: u32,
}

pub struct Visualizer {
    params: ParamStore,
    sampler: FrameRateSampler,
    quality: QualityController,
    color_cycle: ColorCycle,
    sphere: SpherePointCloud,
    effects: EffectState,
    layers: LayerStack,
    controls: KeyboardControls,
    debug_readout: bool,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig, now: Instant) -> Result<Self> {
        let VisualizerConfig {
            sphere,
            noise,
            constellation,
            color_cycle,
            quality,
            seed,
        } = config;
        let sphere = SpherePointCloud::new(sphere, noise, constellation, seed)?;
        let rate = sphere.rotation_rate();
        let params = ParamStore::with_initial([
            (ParamId::ParticleCount, sphere.desired_count() as f32),
            (ParamId::RotationX, rate.x),
            (ParamId::RotationY, rate.y),
            (ParamId::NoiseStrength, sphere.noise_strength()),
        ]);
        Ok(Self {
            params,
            sampler: FrameRateSampler::new(),
            quality: QualityController::new(quality, now),
            color_cycle: ColorCycle::new(color_cycle),
            sphere,
            effects: EffectState::default(),
            layers: LayerStack::new(),
            controls: KeyboardControls::new(),
            debug_readout: true,
        })
    }

    /// One display frame: sample fps, run the quality loop, ramp and smooth
    /// parameters, reconcile the particle count, then apply time-dependent state.
    pub fn tick(&mut self, now: Instant, elapsed_sec: f32, dt_sec: f32) -> FrameReport {
        let fps = self.sampler.sample(now);
        let transition = self
            .quality
            .update(fps, now, &mut self.sphere, Some(&mut self.effects));

        self.controls.apply(&mut self.params, dt_sec);
        self.params.update_all(dt_sec);
        let v = self.params.values();

        self.sphere.set_particle_count(v[ParamId::ParticleCount]);

        self.sphere.set_hsl(v[ParamId::Hue], v[ParamId::Saturation], v[ParamId::Lightness]);
        self.sphere.set_rotation(v[ParamId::RotationX], v[ParamId::RotationY]);
        self.sphere.set_noise_strength(v[ParamId::NoiseStrength]);
        self.sphere.set_color_cycle_speed(v[ParamId::ColorCycleSpeed]);
        self.sphere.set_cycle_color(self.color_cycle.update(elapsed_sec));
        self.layers.update(dt_sec);
        self.sphere.set_opacity(self.layers.sphere_opacity());
        self.sphere.update(elapsed_sec, dt_sec);

        FrameReport {
            fps,
            transition,
            params: v,
            passes: self.effects.resolve(&v, elapsed_sec),
            draw_count: self.sphere.count(),
        }
    }

    pub fn key_down(&mut self, key: char, mods: Modifiers) {
        if let Some(action) = self.controls.key_down(key, mods) {
            self.apply_action(action);
        }
    }

    pub fn key_up(&mut self, key: char, mods: Modifiers) {
        self.controls.key_up(key, mods);
    }

    pub fn set_shift(&mut self, shift: bool) {
        self.controls.set_shift(shift);
    }

    pub fn release_keys(&mut self) {
        self.controls.release_all();
    }

    pub fn apply_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::ToggleEffectSetA => {
                self.effects.toggle_set_a();
            }
            ControlAction::ToggleEffectSetB => {
                self.effects.toggle_set_b();
            }
            ControlAction::AllEffectsOff => self.effects.all_off(),
            ControlAction::ToggleLayer(i) => self.layers.toggle(i),
            ControlAction::ResetToInitial => self.reset_to_initial(),
            ControlAction::ToggleDebugReadout => {
                self.debug_readout = !self.debug_readout;
                log::info!("[debug] readout {}", on_off(self.debug_readout));
            }
        }
    }

    /// Hard-set every parameter to its configured startup value and switch
    /// effects off.
    pub fn reset_to_initial(&mut self) {
        self.params.reset_to_initial();
        self.effects.set_a = false;
        self.effects.set_b = false;
        log::info!("[params] reset to initial state");
    }

    /// Readiness signal from the render backend.
    pub fn attach(&mut self, gpu: &mut dyn PointBuffers) -> Result<()> {
        self.sphere.attach(gpu)
    }

    pub fn sync(&mut self, gpu: &mut dyn PointBuffers) -> Result<()> {
        self.sphere.sync(gpu)
    }

    pub fn dispose(&mut self, gpu: Option<&mut dyn PointBuffers>) {
        self.sphere.dispose(gpu);
    }

    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ParamStore {
        &mut self.params
    }

    pub fn sphere(&self) -> &SpherePointCloud {
        &self.sphere
    }

    pub fn effects(&self) -> &EffectState {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectState {
        &mut self.effects
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn quality(&self) -> &QualityController {
        &self.quality
    }

    pub fn color_cycle(&self) -> &ColorCycle {
        &self.color_cycle
    }

    pub fn controls(&self) -> &KeyboardControls {
        &self.controls
    }

    pub fn debug_readout(&self) -> bool {
        self.debug_readout
    }
}
