//! Herozoom drives an animated hero banner: a grid of media tiles, one of which at a
//! time zooms up to fill the banner, under a procedural canvas overlay.
//!
//! The engine is headless. Time is passed in explicitly and the host answers the
//! engine through small trait seams:
//!
//! - Mount a [`Hero`] from a [`HostSnapshot`] and a [`ZoomDisplay`]
//! - Call [`Hero::tick`] whenever [`Hero::next_wakeup`] comes due, and after every
//!   [`SignalSource::set`]; a paused hero has no wakeup of its own
//! - Rasterize the overlay's [`DisplayList`] with [`CpuRasterizer`]
#![forbid(unsafe_code)]

pub(crate) mod animation;
pub(crate) mod foundation;
pub(crate) mod host;
pub(crate) mod lifecycle;
pub(crate) mod overlay;
pub(crate) mod render;
pub(crate) mod sequencer;
pub(crate) mod settings;

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::{Lerp, Tween};
pub use crate::foundation::clock::{Clock, ManualClock, SystemClock};
pub use crate::foundation::core::{
    Affine, BezPath, GridDims, Millis, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{HeroError, HeroResult};
pub use crate::host::contract::{
    HostSnapshot, MediaSource, OverlayHostAttrs, OverlayHostConfig, OverlayRequest, TileNode,
};
pub use crate::host::signals::{HeroSignals, PageSignals, Signal, SignalSource};
pub use crate::lifecycle::coordinator::{Hero, MountOptions};
pub use crate::lifecycle::layers::LayerFlags;
pub use crate::overlay::canvas::OverlayCanvas;
pub use crate::overlay::constellation::{Constellation, LINK_DISTANCE, Particle};
pub use crate::overlay::governor::{BUDGET_MS, Downgrade, FrameGovernor, WINDOW_FRAMES};
pub use crate::overlay::polygons::{MorphPolygons, Polygon};
pub use crate::overlay::runner::{CAPPED_FRAME_MS, FRAME_MS, FrameRequest, Overlay};
pub use crate::overlay::waves::{SAMPLE_STEP, SoftWaves, Wave};
pub use crate::overlay::{
    FieldContext, OverlayEnv, OverlayField, OverlayKind, OverlayRenderer, OverlaySettings,
    clamp_pixel_ratio, init as init_overlay, init_with_clock as init_overlay_with_clock,
};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::display_list::{DisplayList, DrawOp, GradientStop, Paint};
pub use crate::sequencer::display::{
    MediaClone, StyleTransition, ZoomDisplay, ZoomStage, ZoomStyle,
};
pub use crate::sequencer::machine::{Phase, SequencerEvent, SequencerState, TileSequencer};
pub use crate::sequencer::tiles::{Tile, TileLayout, visit_order};
pub use crate::sequencer::timing::{
    GAP_MS, REDUCED_MOTION_MS, SETTLE_MS, TimingConfig, ZoomEffects,
};
pub use crate::settings::model::{
    ALLOWED_GRIDS, BlendMode, Breakpoint, Density, EffectsSettings, Grids, HeroSettings, Layers,
    MediaItem, MediaType, MidLayer, MiddlePattern, OverlayDef, OverlayType, TileOrder,
    TimingSettings, TopLayer, parse_grid,
};
