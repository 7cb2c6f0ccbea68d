//! Rate-capped `u_time` updates.

use crate::uniforms::{UniformTable, TIME};

/// Default update cap in frames per second.
pub const DEFAULT_MAX_FPS: f64 = 60.0;

/// Drops frame ticks that arrive sooner than `1 / max_fps` after the last
/// accepted one.
///
/// Spacing is measured on the clock, not by counting frames, so a 144 Hz
/// display and a 60 Hz display advance `u_time` at the same cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameThrottle {
    max_fps: f64,
    last_accepted: Option<f64>,
}

impl FrameThrottle {
    /// Non-positive or non-finite rates fall back to [`DEFAULT_MAX_FPS`].
    pub fn new(max_fps: f64) -> Self {
        let max_fps = if max_fps.is_finite() && max_fps > 0.0 {
            max_fps
        } else {
            log::warn!("Invalid max fps {max_fps}, using {DEFAULT_MAX_FPS}");
            DEFAULT_MAX_FPS
        };
        Self {
            max_fps,
            last_accepted: None,
        }
    }

    pub fn max_fps(&self) -> f64 {
        self.max_fps
    }

    pub fn min_interval(&self) -> f64 {
        1.0 / self.max_fps
    }

    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted
    }

    /// Returns true and records `elapsed` as the new baseline if the tick is due.
    pub fn accept(&mut self, elapsed: f64) -> bool {
        if let Some(last) = self.last_accepted {
            if elapsed - last < self.min_interval() {
                return false;
            }
        }
        self.last_accepted = Some(elapsed);
        true
    }

    /// Accept the tick and write it into `u_time`. Other uniforms are untouched.
    pub fn apply(&mut self, elapsed: f64, uniforms: &mut UniformTable) -> bool {
        if !self.accept(elapsed) {
            return false;
        }
        uniforms.set_scalar(TIME, elapsed as f32);
        true
    }

    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

impl Default for FrameThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FPS)
    }
}
