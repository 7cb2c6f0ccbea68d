//! Per-frame timing.
//!
//! A [`FrameTicker`] reads a [`Clock`] once per rendered frame and fans the
//! elapsed time out to subscribers. Subscribers that drive shader time run
//! it through a [`FrameThrottle`].

mod clock;
mod throttle;

pub use clock::{Clock, ManualClock, SystemClock};
pub use throttle::{FrameThrottle, DEFAULT_MAX_FPS};

use crate::events::{EventSource, Subscription};

/// Emits elapsed seconds to subscribers once per frame.
#[derive(Debug)]
pub struct FrameTicker<C: Clock = SystemClock> {
    clock: C,
    events: EventSource<f64>,
}

impl<C: Clock> FrameTicker<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            events: EventSource::new(),
        }
    }

    /// Add a listener for elapsed seconds.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&f64) + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    /// Read the clock and notify subscribers. Call once per rendered frame.
    pub fn tick(&mut self) -> f64 {
        let elapsed = self.clock.elapsed_secs();
        self.events.emit(&elapsed);
        elapsed
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable clock access, used to advance a [`ManualClock`].
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.listener_count()
    }
}

impl Default for FrameTicker<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}
