use crate::constants::NOMINAL_FRAME_RATE;

/// Scalar that eases toward a target with frame-rate independent exponential decay.
///
/// `smoothing` is the fraction of the remaining distance covered per nominal
/// 60 Hz frame (0.1 is slow, 0.3 is fast). [`update`](Self::update) rescales
/// it to the real frame duration, so one call with `dt = 1/60` moves exactly
/// `smoothing` of the gap and two calls with `dt = 1/120` land on the same value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    smoothing: f32,
}

impl SmoothedValue {
    pub fn new(initial: f32, smoothing: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Set the value to ease toward. Takes effect on the next `update`.
    #[inline]
    pub fn set_target(&mut self, value: f32) {
        self.target = value;
    }

    /// Jump straight to `value` with no easing (resets and preset loads).
    #[inline]
    pub fn set_value(&mut self, value: f32) {
        self.current = value;
        self.target = value;
    }

    /// Advance by `dt_sec` seconds and return the new current value.
    pub fn update(&mut self, dt_sec: f32) -> f32 {
        let factor = 1.0 - (1.0 - self.smoothing).powf(dt_sec.max(0.0) * NOMINAL_FRAME_RATE);
        self.current += (self.target - self.current) * factor;
        self.current
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn smoothing(&self) -> f32 {
        self.smoothing
    }
}
