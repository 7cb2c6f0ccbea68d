//! Elapsed-time clocks.

use std::time::Instant;

/// A monotonic source of elapsed seconds.
pub trait Clock {
    fn elapsed_secs(&self) -> f64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock driven by hand, for offline rendering and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, secs: f64) {
        if secs > 0.0 {
            self.now += secs;
        }
    }

    /// Jump to `secs`. Earlier values are ignored so time never runs backwards.
    pub fn set(&mut self, secs: f64) {
        self.now = self.now.max(secs);
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f64 {
        self.now
    }
}
