use crate::settings::model::Density;

/// Frames averaged per budget check.
pub const WINDOW_FRAMES: u32 = 60;
/// Average render cost above which quality steps down.
pub const BUDGET_MS: f64 = 25.0;

/// One quality step taken by the governor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Downgrade {
    /// Entities must be regenerated at this tier.
    Density(Density),
    /// The canvas must be resized at this pixel ratio.
    PixelRatio(f64),
}

/// Watches render cost and lowers overlay quality when frames run long.
///
/// Quality only ever goes down: high to medium to low density, then pixel
/// ratio to 1. After that the governor is terminal for the session.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameGovernor {
    window: u32,
    budget_ms: f64,
    sum_ms: f64,
    count: u32,
    density: Density,
    pixel_ratio: f64,
}

impl FrameGovernor {
    pub fn new(density: Density, pixel_ratio: f64) -> Self {
        Self::with_budget(density, pixel_ratio, WINDOW_FRAMES, BUDGET_MS)
    }

    /// Governor with a custom window (at least one frame) and budget.
    pub fn with_budget(density: Density, pixel_ratio: f64, window: u32, budget_ms: f64) -> Self {
        Self {
            window: window.max(1),
            budget_ms,
            sum_ms: 0.0,
            count: 0,
            density,
            pixel_ratio,
        }
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Frames measured in the current window.
    pub fn sample_count(&self) -> u32 {
        self.count
    }

    /// Average cost of the current window, `None` before the first sample.
    pub fn running_average_ms(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum_ms / f64::from(self.count))
    }

    /// Low density at pixel ratio 1: nothing left to give up.
    pub fn is_terminal(&self) -> bool {
        self.density == Density::Low && self.pixel_ratio <= 1.0
    }

    /// Record one frame's render cost. Every full window the average is
    /// checked against the budget and the window restarts.
    pub fn record(&mut self, cost_ms: f64) -> Option<Downgrade> {
        self.sum_ms += cost_ms.max(0.0);
        self.count += 1;
        if self.count < self.window {
            return None;
        }
        let avg = self.sum_ms / f64::from(self.count);
        self.sum_ms = 0.0;
        self.count = 0;
        if avg > self.budget_ms {
            tracing::debug!(avg_ms = avg, budget_ms = self.budget_ms, "frame budget exceeded");
            self.downgrade()
        } else {
            None
        }
    }

    /// Take one step down; `None` once terminal.
    pub fn downgrade(&mut self) -> Option<Downgrade> {
        if let Some(lower) = self.density.lower() {
            self.density = lower;
            tracing::debug!(density = ?lower, "overlay density lowered");
            return Some(Downgrade::Density(lower));
        }
        if self.pixel_ratio > 1.0 {
            self.pixel_ratio = 1.0;
            tracing::debug!("overlay pixel ratio lowered to 1");
            return Some(Downgrade::PixelRatio(1.0));
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/governor.rs"]
mod tests;
