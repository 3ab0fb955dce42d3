//! Procedural canvas overlays drawn above the tile grid.
//!
//! Each overlay kind is an [`OverlayField`] (a set of entities that can be
//! regenerated, advanced and drawn) driven by the shared frame loop in
//! [`runner::Overlay`]. [`init`] maps an [`OverlayKind`] to its renderer.

use rand::rngs::SmallRng;

use crate::foundation::clock::{Clock, SystemClock};
use crate::foundation::core::{Millis, Size};
use crate::host::contract::OverlayHostConfig;
use crate::render::display_list::DisplayList;
use crate::settings::model::{BlendMode, Density, OverlayDef, OverlayType};

pub(crate) mod canvas;
pub(crate) mod constellation;
pub(crate) mod governor;
pub(crate) mod polygons;
pub(crate) mod runner;
pub(crate) mod waves;

use canvas::OverlayCanvas;
use constellation::Constellation;
use governor::FrameGovernor;
use polygons::MorphPolygons;
use runner::{FrameRequest, Overlay};
use waves::SoftWaves;

/// Canvas overlay variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    /// Drifting particles linked when close.
    Constellation,
    /// Wobbling, rotating polygons.
    MorphPolygons,
    /// Horizontally scrolling sine bands.
    SoftWaves,
}

impl OverlayKind {
    pub const ALL: [Self; 3] = [Self::Constellation, Self::MorphPolygons, Self::SoftWaves];

    /// Parse the `data-overlay-type` name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constellation" => Some(Self::Constellation),
            "morph-polygons" => Some(Self::MorphPolygons),
            "soft-waves" => Some(Self::SoftWaves),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Constellation => "constellation",
            Self::MorphPolygons => "morph-polygons",
            Self::SoftWaves => "soft-waves",
        }
    }

    /// Canvas overlay selected by a settings value, if any.
    pub fn from_setting(t: OverlayType) -> Option<Self> {
        match t {
            OverlayType::None => None,
            OverlayType::Constellation => Some(Self::Constellation),
            OverlayType::MorphPolygons => Some(Self::MorphPolygons),
            OverlayType::SoftWaves => Some(Self::SoftWaves),
        }
    }

    /// Entity count for a density tier.
    pub fn tier_count(self, density: Density) -> usize {
        match (self, density) {
            (Self::Constellation, Density::Low) => 40,
            (Self::Constellation, Density::Medium) => 80,
            (Self::Constellation, Density::High) => 140,
            (Self::MorphPolygons, Density::Low) => 3,
            (Self::MorphPolygons, Density::Medium) => 5,
            (Self::MorphPolygons, Density::High) => 8,
            (Self::SoftWaves, Density::Low) => 2,
            (Self::SoftWaves, Density::Medium) => 3,
            (Self::SoftWaves, Density::High) => 4,
        }
    }
}

/// Look of an overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlaySettings {
    /// Global alpha multiplier.
    pub opacity: f64,
    /// Animation speed multiplier.
    pub speed: f64,
    /// Initial density tier.
    pub density: Density,
    /// How the canvas composites over the grid.
    pub blend: BlendMode,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self::from(&OverlayDef::default())
    }
}

impl From<&OverlayHostConfig> for OverlaySettings {
    fn from(c: &OverlayHostConfig) -> Self {
        Self {
            opacity: c.opacity,
            speed: c.speed,
            density: c.density,
            blend: c.blend,
        }
    }
}

impl From<&OverlayDef> for OverlaySettings {
    fn from(d: &OverlayDef) -> Self {
        Self {
            opacity: d.opacity,
            speed: d.speed,
            density: d.density,
            blend: d.blend_mode,
        }
    }
}

/// Environment an overlay is created in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayEnv {
    /// Reduced motion at creation; such an overlay never starts.
    pub reduced_motion: bool,
    /// Device pixel ratio, at most 2.
    pub pixel_ratio: f64,
    /// Limit to roughly 30 fps.
    pub cap_fps: bool,
    /// Initial element width in CSS pixels.
    pub width: f64,
    /// Initial element height in CSS pixels.
    pub height: f64,
    /// Seed for entity generation.
    pub seed: u64,
}

impl OverlayEnv {
    /// Capped-fps environment with the pixel ratio capped at 2.
    pub fn new(reduced_motion: bool, device_pixel_ratio: f64, element: Size) -> Self {
        Self {
            reduced_motion,
            pixel_ratio: clamp_pixel_ratio(device_pixel_ratio),
            cap_fps: true,
            width: element.width,
            height: element.height,
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn element_size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Cap a device pixel ratio at 2; zero, negative and non-finite values become 1.
pub fn clamp_pixel_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio.min(2.0)
    } else {
        1.0
    }
}

/// What an entity set sees while it is generated, advanced and drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldContext {
    /// Backing store size in device pixels.
    pub extent: Size,
    pub pixel_ratio: f64,
    pub opacity: f64,
    pub speed: f64,
}

/// A regenerable set of overlay entities.
pub trait OverlayField {
    const KIND: OverlayKind;

    /// Generate `count` fresh entities.
    fn populate(count: usize, cx: &FieldContext, rng: &mut SmallRng) -> Self;

    /// Fit existing entities to new bounds without changing their number.
    fn relayout(&mut self, cx: &FieldContext, rng: &mut SmallRng);

    /// Move every entity forward by `dt_ms`.
    fn advance(&mut self, dt_ms: f64, cx: &FieldContext);

    fn draw(&self, cx: &FieldContext, out: &mut DisplayList);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Running overlay, as the lifecycle coordinator drives it.
pub trait OverlayRenderer {
    fn kind(&self) -> OverlayKind;

    /// Begin the frame loop. No-op under reduced motion, while running, or after destroy.
    fn start(&mut self, now: Millis) -> FrameRequest;

    /// End the frame loop and clear the canvas; entities are kept.
    fn stop(&mut self);

    /// Rebuild the backing store from the element box and refit the entities.
    fn resize(&mut self);

    /// Stop and release the entities.
    fn destroy(&mut self);

    /// Render one frame at `now`.
    fn frame(&mut self, now: Millis) -> FrameRequest;

    fn is_running(&self) -> bool;

    /// When the next frame is wanted.
    fn next_frame_at(&self) -> Option<Millis>;

    fn canvas(&self) -> &OverlayCanvas;

    /// The host laid the canvas element out at a new size.
    fn set_element_size(&mut self, element: Size);

    fn governor(&self) -> &FrameGovernor;

    fn entity_count(&self) -> usize;
}

/// Create the renderer for `kind`, measuring render cost on the system clock.
pub fn init(
    kind: OverlayKind,
    settings: OverlaySettings,
    env: OverlayEnv,
) -> Box<dyn OverlayRenderer> {
    init_with_clock(kind, settings, env, Box::new(SystemClock::new()))
}

/// Create the renderer for `kind` with an explicit cost clock.
pub fn init_with_clock(
    kind: OverlayKind,
    settings: OverlaySettings,
    env: OverlayEnv,
    clock: Box<dyn Clock>,
) -> Box<dyn OverlayRenderer> {
    tracing::debug!(kind = kind.name(), density = ?settings.density, "overlay init");
    match kind {
        OverlayKind::Constellation => Box::new(Overlay::<Constellation>::new(settings, env, clock)),
        OverlayKind::MorphPolygons => Box::new(Overlay::<MorphPolygons>::new(settings, env, clock)),
        OverlayKind::SoftWaves => Box::new(Overlay::<SoftWaves>::new(settings, env, clock)),
    }
}

/// Value in `[lo, hi)` from `rng`.
pub(crate) fn uniform(rng: &mut SmallRng, lo: f64, hi: f64) -> f64 {
    use rand::Rng;
    lo + rng.random::<f64>() * (hi - lo)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/mod.rs"]
mod tests;
