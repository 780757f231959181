//! Visibility layers with eased opacity fades.
//!
//! Layer 1 carries the point sphere; layers 2 and 3 start disabled and are
//! reserved for additional scenes. Fades advance with the frame tick rather
//! than on their own timer.

use crate::color::clamp01;
use crate::constants::{LAYER_COUNT, LAYER_FADE_SEC, LAYER_VISIBLE_EPSILON};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    from: f32,
    to: f32,
    duration_sec: f32,
    elapsed_sec: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub id: usize,
    pub enabled: bool,
    opacity: f32,
    fade: Option<Fade>,
}

impl Layer {
    fn new(id: usize, enabled: bool) -> Self {
        Self {
            id,
            enabled,
            opacity: if enabled { 1.0 } else { 0.0 },
            fade: None,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, value: f32) {
        self.opacity = clamp01(value);
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > LAYER_VISIBLE_EPSILON
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn fade_in(&mut self, duration_sec: f32) {
        self.start_fade(0.0, 1.0, duration_sec);
    }

    pub fn fade_out(&mut self, duration_sec: f32) {
        self.start_fade(1.0, 0.0, duration_sec);
    }

    fn start_fade(&mut self, from: f32, to: f32, duration_sec: f32) {
        self.set_opacity(from);
        self.fade = Some(Fade {
            from,
            to,
            duration_sec,
            elapsed_sec: 0.0,
        });
    }

    fn advance(&mut self, dt_sec: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.elapsed_sec += dt_sec.max(0.0);
        let progress = if fade.duration_sec > 0.0 {
            (fade.elapsed_sec / fade.duration_sec).min(1.0)
        } else {
            1.0
        };
        let (from, to) = (fade.from, fade.to);
        self.set_opacity(from + (to - from) * ease_in_out_cubic(progress));
        if progress >= 1.0 {
            self.enabled = to > 0.0;
            self.fade = None;
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayerStack {
    layers: [Layer; LAYER_COUNT],
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: [Layer::new(1, true), Layer::new(2, false), Layer::new(3, false)],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Fade a layer in if it is off, out if it is on. Unknown indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        let Some(layer) = self.layers.get_mut(index) else {
            return;
        };
        if layer.enabled {
            layer.fade_out(LAYER_FADE_SEC);
        } else {
            layer.fade_in(LAYER_FADE_SEC);
        }
        log::info!(
            "[layers] layer {} fading {}",
            layer.id,
            if layer.enabled { "out" } else { "in" }
        );
    }

    pub fn update(&mut self, dt_sec: f32) {
        for layer in &mut self.layers {
            layer.advance(dt_sec);
        }
    }

    /// Opacity of the layer that carries the point sphere.
    pub fn sphere_opacity(&self) -> f32 {
        self.layers[0].opacity
    }
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
