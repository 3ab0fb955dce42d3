//! The structure a hero host element exposes, captured as plain data.

use crate::foundation::core::{GridDims, Rect};
use crate::foundation::error::{HeroError, HeroResult};
use crate::overlay::OverlayKind;
use crate::settings::model::{BlendMode, Density, MediaType, MiddlePattern};

/// Playable content of a tile.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaSource {
    /// Image or video.
    pub kind: MediaType,
    /// Source URL.
    pub src: String,
    /// Poster frame for videos.
    pub poster: Option<String>,
}

impl MediaSource {
    /// Still image.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            kind: MediaType::Image,
            src: src.into(),
            poster: None,
        }
    }

    /// Video with an optional poster.
    pub fn video(src: impl Into<String>, poster: Option<String>) -> Self {
        Self {
            kind: MediaType::Video,
            src: src.into(),
            poster,
        }
    }
}

/// One `.nsmhs-tile` element.
#[derive(Clone, Debug, PartialEq)]
pub struct TileNode {
    /// Bounding box in host (client) coordinates.
    pub rect: Rect,
    /// The tile's media element, if any.
    pub media: Option<MediaSource>,
    /// Poster fallback image, if any.
    pub poster: Option<String>,
}

impl TileNode {
    /// What a zoom of this tile shows; `None` for tiles with neither media nor poster.
    pub fn display_media(&self) -> Option<MediaSource> {
        match (&self.media, &self.poster) {
            (Some(m), _) => Some(m.clone()),
            (None, Some(p)) => Some(MediaSource::image(p.clone())),
            (None, None) => None,
        }
    }
}

/// Raw data attributes of the `.ns-hero__mid` overlay host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayHostAttrs {
    /// `data-overlay-type`.
    pub overlay_type: Option<String>,
    /// `data-overlay-opacity`.
    pub opacity: Option<String>,
    /// `data-overlay-speed`.
    pub speed: Option<String>,
    /// `data-overlay-density`.
    pub density: Option<String>,
    /// `data-overlay-blend`.
    pub blend: Option<String>,
    /// `data-shadow-strength`.
    pub shadow_strength: Option<String>,
    /// Element box of the canvas the overlay draws into.
    pub canvas_box: Rect,
}

/// What the overlay host asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayRequest {
    /// Nothing to draw.
    None,
    /// A CSS-only pattern class.
    Css(MiddlePattern),
    /// A procedural canvas overlay.
    Canvas(OverlayKind),
}

/// Overlay host attributes after fallbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayHostConfig {
    /// Requested overlay.
    pub request: OverlayRequest,
    /// Global alpha.
    pub opacity: f64,
    /// Speed multiplier.
    pub speed: f64,
    /// Initial density tier.
    pub density: Density,
    /// Compositing mode.
    pub blend: BlendMode,
    /// Shadow alpha exported as `--nsmhs-overlay-alpha`.
    pub shadow_strength: f64,
}

// Empty, unparsable and zero values all fall back.
fn attr_f64(v: Option<&str>, fallback: f64) -> f64 {
    v.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|x| x.is_finite() && *x != 0.0)
        .unwrap_or(fallback)
}

impl OverlayHostAttrs {
    /// Apply the attribute fallbacks.
    pub fn resolve(&self) -> OverlayHostConfig {
        let kind = self
            .overlay_type
            .as_deref()
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or_default();
        let request = match kind.as_str() {
            "" | "none" => OverlayRequest::None,
            "animated-gradient" => OverlayRequest::Css(MiddlePattern::AnimatedGradient),
            "dots" => OverlayRequest::Css(MiddlePattern::Dots),
            "tiles" => OverlayRequest::Css(MiddlePattern::Tiles),
            other => match OverlayKind::parse(other) {
                Some(k) => OverlayRequest::Canvas(k),
                None => {
                    tracing::warn!(overlay = %other, "unknown overlay type, overlay disabled");
                    OverlayRequest::None
                }
            },
        };

        OverlayHostConfig {
            request,
            opacity: attr_f64(self.opacity.as_deref(), 0.25),
            speed: attr_f64(self.speed.as_deref(), 1.0),
            density: self
                .density
                .as_deref()
                .and_then(Density::parse)
                .unwrap_or_default(),
            blend: self
                .blend
                .as_deref()
                .and_then(BlendMode::parse)
                .unwrap_or_default(),
            shadow_strength: attr_f64(self.shadow_strength.as_deref(), 0.6).clamp(0.0, 1.0),
        }
    }
}

/// Snapshot of a hero host element and its subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct HostSnapshot {
    /// Host element box; `None` when the host is not laid out.
    pub container: Option<Rect>,
    /// Whether `.nsmhs-zoom-container` / `.nsmhs-zoom-content` exist.
    pub zoom_target: bool,
    /// Tile elements in DOM order.
    pub tiles: Vec<TileNode>,
    /// Current grid from the `--nsmhs-*-cols/rows` custom properties.
    pub grid: Option<GridDims>,
    /// Overlay host, if present.
    pub overlay_host: Option<OverlayHostAttrs>,
    /// Text of the embedded `.nsmhs-settings` script.
    pub settings_payload: Option<String>,
    /// `window.devicePixelRatio`.
    pub device_pixel_ratio: f64,
}

impl HostSnapshot {
    /// Check the structural contract and return the container box.
    pub fn validate(&self) -> HeroResult<Rect> {
        if !self.zoom_target {
            return Err(HeroError::missing_contract("zoom display target"));
        }
        let container = self
            .container
            .ok_or_else(|| HeroError::missing_contract("host container box"))?;
        if !(container.width() > 0.0 && container.height() > 0.0) {
            return Err(HeroError::missing_contract("host container has no area"));
        }
        Ok(container)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/contract.rs"]
mod tests;
