use crate::animation::ease::Ease;
use crate::foundation::error::{HeroError, HeroResult};
use crate::settings::model::{EffectsSettings, HeroSettings};

/// Zoom transition length while reduced motion is preferred.
pub const REDUCED_MOTION_MS: u64 = 300;
/// Delay between placing a clone and starting its zoom-in.
pub const SETTLE_MS: u64 = 50;
/// Pause between one tile's zoom-out and the next tile.
pub const GAP_MS: u64 = 100;

/// Per-tile timing, in milliseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    /// Hold at full size.
    pub display_ms: u64,
    /// Configured zoom-in length.
    pub zoom_in_ms: u64,
    /// Configured zoom-out length.
    pub zoom_out_ms: u64,
    /// Transition easing.
    pub ease: Ease,
    /// CSS keyword the easing came from.
    pub css_easing: String,
}

impl TimingConfig {
    /// Validated timing; every duration must be positive.
    pub fn new(display_ms: u64, zoom_in_ms: u64, zoom_out_ms: u64) -> HeroResult<Self> {
        if display_ms == 0 || zoom_in_ms == 0 || zoom_out_ms == 0 {
            return Err(HeroError::validation("zoom durations must be > 0"));
        }
        Ok(Self {
            display_ms,
            zoom_in_ms,
            zoom_out_ms,
            ease: Ease::InOutCubic,
            css_easing: "ease-in-out".to_owned(),
        })
    }

    /// Timing taken from (sanitized) settings.
    pub fn from_settings(settings: &HeroSettings) -> Self {
        let t = &settings.timing;
        Self {
            display_ms: t.display_duration.max(1),
            zoom_in_ms: t.zoom_in_duration.max(1),
            zoom_out_ms: t.zoom_out_duration.max(1),
            ease: t.ease(),
            css_easing: t.easing.clone(),
        }
    }

    /// Effective zoom-in length.
    pub fn zoom_in(&self, reduced_motion: bool) -> u64 {
        if reduced_motion {
            REDUCED_MOTION_MS
        } else {
            self.zoom_in_ms
        }
    }

    /// Effective zoom-out length.
    pub fn zoom_out(&self, reduced_motion: bool) -> u64 {
        if reduced_motion {
            REDUCED_MOTION_MS
        } else {
            self.zoom_out_ms
        }
    }

    /// Length of one full tile cycle, gap included.
    pub fn cycle_ms(&self, reduced_motion: bool) -> u64 {
        SETTLE_MS
            + self.zoom_in(reduced_motion)
            + self.display_ms
            + self.zoom_out(reduced_motion)
            + GAP_MS
    }
}

/// Look of the zoomed media.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomEffects {
    /// Opacity at rest.
    pub opacity: f64,
    /// Blur while entering and leaving.
    pub blur_px: f64,
}

impl ZoomEffects {
    /// Effects from settings.
    pub fn from_settings(effects: &EffectsSettings) -> Self {
        Self {
            opacity: effects.opacity.clamp(0.0, 1.0),
            blur_px: f64::from(effects.blur_px),
        }
    }

    /// Blur to use; reduced motion drops it.
    pub fn blur(&self, reduced_motion: bool) -> f64 {
        if reduced_motion { 0.0 } else { self.blur_px }
    }
}

impl Default for ZoomEffects {
    fn default() -> Self {
        Self::from_settings(&EffectsSettings::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequencer/timing.rs"]
mod tests;
