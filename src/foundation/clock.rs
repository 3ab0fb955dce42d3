//! Millisecond clocks used to measure overlay render cost.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond source.
pub trait Clock {
    /// Current time in (fractional) milliseconds.
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose zero is "now".
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Shared, manually driven clock.
///
/// Clones observe the same time. With a non-zero `step`, every read advances
/// the clock afterwards, so a measured span of two reads costs exactly `step`.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
    step: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock at `0.0` that only moves when told to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that advances by `step_ms` after every read.
    pub fn with_step(step_ms: f64) -> Self {
        let clock = Self::new();
        clock.set_step(step_ms);
        clock
    }

    /// Move the clock forward.
    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    /// Change the per-read step.
    pub fn set_step(&self, step_ms: f64) {
        self.step.set(step_ms.max(0.0));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        let t = self.now.get();
        self.now.set(t + self.step.get());
        t
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/clock.rs"]
mod tests;
