//! Boundary settings model (JSON payload embedded in the hero host).
//!
//! Every struct is `#[serde(default)]`: partial payloads fill in from the
//! built-in defaults, and unknown enum strings fall back to the default variant.

use serde::{Deserialize, Deserializer, Serialize};

use crate::foundation::core::GridDims;

fn lenient<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned + Default,
{
    let v = serde_json::Value::deserialize(d)?;
    Ok(T::deserialize(v).unwrap_or_default())
}

/// Kind of media a tile shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Still image.
    #[default]
    Image,
    /// Muted, looping video.
    Video,
}

/// One configured media item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaItem {
    /// Image or video.
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: MediaType,
    /// Source URL.
    pub src: String,
    /// Optional MIME type; a known one overrides `kind`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    /// Optional poster URL (videos only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

/// Raster direction used to visit tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileOrder {
    /// DOM order.
    #[default]
    Ltr,
    /// Row-major with columns reversed inside every row.
    Rtl,
}

/// Zoom cycle timing, in milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimingSettings {
    /// Hold time at full size.
    pub display_duration: u64,
    /// Tile-to-container transition length.
    pub zoom_in_duration: u64,
    /// Fade-out transition length.
    pub zoom_out_duration: u64,
    /// CSS timing function keyword.
    pub easing: String,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            display_duration: 3000,
            zoom_in_duration: 900,
            zoom_out_duration: 700,
            easing: "ease-in-out".to_owned(),
        }
    }
}

/// Visual effects applied to the zoom display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsSettings {
    /// Opacity of the zoomed media at rest.
    pub opacity: f64,
    /// Blur radius during zoom-in/zoom-out.
    pub blur_px: u32,
}

impl Default for EffectsSettings {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            blur_px: 6,
        }
    }
}

/// CSS-only pattern painted in the middle layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiddlePattern {
    /// Nothing.
    #[default]
    None,
    /// Slowly shifting gradient.
    AnimatedGradient,
    /// Dot grid.
    Dots,
    /// Tile grid.
    Tiles,
}

impl MiddlePattern {
    /// CSS class suffix, `None` for [`MiddlePattern::None`].
    pub fn css_name(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::AnimatedGradient => Some("animated-gradient"),
            Self::Dots => Some("dots"),
            Self::Tiles => Some("tiles"),
        }
    }
}

/// Overlay selection as it appears in settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayType {
    /// No canvas overlay.
    None,
    /// Particle-link graph.
    #[default]
    Constellation,
    /// Morphing polygon field.
    MorphPolygons,
    /// Scrolling wave field.
    SoftWaves,
}

/// Coarse overlay quality tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Fewest entities.
    Low,
    /// Default.
    #[default]
    Medium,
    /// Most entities.
    High,
}

impl Density {
    /// Every tier, low to high.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// The next tier down, `None` at [`Density::Low`].
    pub fn lower(self) -> Option<Self> {
        match self {
            Self::High => Some(Self::Medium),
            Self::Medium => Some(Self::Low),
            Self::Low => None,
        }
    }

    /// Parse a data-attribute value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canvas compositing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Source-over.
    #[default]
    Normal,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Multiply.
    Multiply,
}

impl BlendMode {
    /// Parse a data-attribute value.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "screen" => Some(Self::Screen),
            "overlay" => Some(Self::Overlay),
            "multiply" => Some(Self::Multiply),
            _ => None,
        }
    }
}

/// Canvas overlay configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayDef {
    /// Which overlay to draw.
    #[serde(rename = "type", deserialize_with = "lenient")]
    pub kind: OverlayType,
    /// Global alpha multiplier.
    pub opacity: f64,
    /// Animation speed multiplier.
    pub speed: f64,
    /// Initial density tier.
    #[serde(deserialize_with = "lenient")]
    pub density: Density,
    /// Compositing mode.
    #[serde(deserialize_with = "lenient")]
    pub blend_mode: BlendMode,
}

impl Default for OverlayDef {
    fn default() -> Self {
        Self {
            kind: OverlayType::Constellation,
            opacity: 0.25,
            speed: 1.0,
            density: Density::Medium,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Middle (decorative) layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MidLayer {
    /// Whether the layer is rendered at all.
    pub enabled: bool,
    /// CSS-only pattern.
    #[serde(deserialize_with = "lenient")]
    pub middle_pattern: MiddlePattern,
    /// Shadow alpha exported to CSS.
    pub shadow_strength: f64,
    /// Canvas overlay.
    pub overlay: OverlayDef,
}

impl Default for MidLayer {
    fn default() -> Self {
        Self {
            enabled: true,
            middle_pattern: MiddlePattern::None,
            shadow_strength: 0.25,
            overlay: OverlayDef::default(),
        }
    }
}

/// Text/CTA layer; carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopLayer {
    pub title: String,
    pub subtitle: String,
    pub cta_text: String,
    pub cta_url: String,
    pub logo_id: u64,
    pub logo_src: String,
    pub logo_alt: String,
}

/// Layer stack configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layers {
    /// Decorative middle layer.
    pub mid: MidLayer,
    /// Text layer.
    pub top: TopLayer,
}

/// Per-breakpoint grid strings (`"<cols>x<rows>"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Grids {
    /// Desktop grid.
    pub pc: String,
    /// Tablet grid.
    pub tablet: String,
    /// Phone grid.
    pub phone: String,
}

impl Default for Grids {
    fn default() -> Self {
        Self {
            pc: "5x3".to_owned(),
            tablet: "4x2".to_owned(),
            phone: "3x2".to_owned(),
        }
    }
}

/// Viewport class a grid string applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Breakpoint {
    /// Desktop.
    Pc,
    /// Tablet.
    Tablet,
    /// Phone.
    Phone,
}

impl Breakpoint {
    fn default_grid(self) -> GridDims {
        match self {
            Self::Pc => GridDims { cols: 5, rows: 3 },
            Self::Tablet => GridDims { cols: 4, rows: 2 },
            Self::Phone => GridDims { cols: 3, rows: 2 },
        }
    }
}

/// Grids the layout supports.
pub const ALLOWED_GRIDS: [&str; 5] = ["3x2", "3x4", "4x2", "5x3", "5x4"];

/// Parse a `"<cols>x<rows>"` grid string.
///
/// Returns `None` for malformed strings or zero dimensions.
pub fn parse_grid(s: &str) -> Option<GridDims> {
    let (c, r) = s.trim().split_once(['x', 'X'])?;
    let cols = c.trim().parse::<u32>().ok()?;
    let rows = r.trim().parse::<u32>().ok()?;
    GridDims::new(cols, rows).ok()
}

impl Grids {
    /// Resolved grid for a breakpoint; unsupported strings use that breakpoint's default.
    pub fn grid(&self, bp: Breakpoint) -> GridDims {
        let s = match bp {
            Breakpoint::Pc => &self.pc,
            Breakpoint::Tablet => &self.tablet,
            Breakpoint::Phone => &self.phone,
        };
        if !ALLOWED_GRIDS.contains(&s.trim()) {
            return bp.default_grid();
        }
        parse_grid(s).unwrap_or_else(|| bp.default_grid())
    }
}

/// Complete hero configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroSettings {
    /// Media list in tile order.
    pub media: Vec<MediaItem>,
    /// Visit order.
    #[serde(deserialize_with = "lenient")]
    pub order: TileOrder,
    /// Zoom timing.
    pub timing: TimingSettings,
    /// Zoom effects.
    pub effects: EffectsSettings,
    /// Layer stack.
    pub layers: Layers,
    /// Responsive grids.
    pub grids: Grids,
}

#[cfg(test)]
#[path = "../../tests/unit/settings/model.rs"]
mod tests;
