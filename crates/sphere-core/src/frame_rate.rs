use crate::constants::FPS_WINDOW_SEC;
use instant::Instant;
use std::collections::VecDeque;
use std::time::Duration;

/// Sliding-window frame counter: average fps over the last few seconds.
#[derive(Debug)]
pub struct FrameRateSampler {
    frames: VecDeque<Instant>,
    window: Duration,
}

impl Default for FrameRateSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRateSampler {
    pub fn new() -> Self {
        Self {
            // ~3 s of 144 Hz frames before the deque has to grow
            frames: VecDeque::with_capacity(512),
            window: Duration::from_secs(FPS_WINDOW_SEC),
        }
    }

    /// Record a frame at `now` and return the windowed integer fps.
    pub fn sample(&mut self, now: Instant) -> u32 {
        self.frames.push_back(now);
        while let Some(&oldest) = self.frames.front() {
            if now.saturating_duration_since(oldest) > self.window {
                self.frames.pop_front();
            } else {
                break;
            }
        }
        self.frames.len() as u32 / self.window.as_secs().max(1) as u32
    }

    /// Frames currently inside the window.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
