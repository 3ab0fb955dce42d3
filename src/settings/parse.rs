use crate::animation::ease::Ease;
use crate::foundation::error::{HeroError, HeroResult};
use crate::settings::model::{HeroSettings, MediaItem, MediaType, TimingSettings};

const ALLOWED_MIMES: [&str; 7] = [
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "video/mp4",
    "video/webm",
    "video/ogg",
];

impl HeroSettings {
    /// Strictly parse a settings payload.
    pub fn from_json(text: &str) -> HeroResult<Self> {
        serde_json::from_str(text).map_err(|e| HeroError::serde(format!("settings payload: {e}")))
    }

    /// Parse an embedded settings payload, falling back to the built-in defaults.
    ///
    /// A missing or unparsable payload is never an error; the result is always sanitized.
    pub fn from_payload(text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(text) {
            Ok(s) => s.sanitize(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse hero settings, using defaults");
                Self::default()
            }
        }
    }

    /// Clamp every numeric field into its supported range and clean the media list.
    pub fn sanitize(mut self) -> Self {
        let t = &mut self.timing;
        t.display_duration = t.display_duration.clamp(1000, 10_000);
        t.zoom_in_duration = t.zoom_in_duration.clamp(300, 3000);
        t.zoom_out_duration = t.zoom_out_duration.clamp(300, 3000);
        if t.easing.trim().is_empty() {
            t.easing = TimingSettings::default().easing;
        }

        self.effects.opacity = clamp_unit(self.effects.opacity, 1.0);
        self.effects.blur_px = self.effects.blur_px.min(20);

        let mid = &mut self.layers.mid;
        mid.shadow_strength = clamp_unit(mid.shadow_strength, 0.25);
        mid.overlay.opacity = clamp_unit(mid.overlay.opacity, 0.25);
        mid.overlay.speed = if mid.overlay.speed.is_finite() {
            mid.overlay.speed.clamp(0.25, 2.0)
        } else {
            1.0
        };

        self.media = self
            .media
            .into_iter()
            .filter_map(sanitize_media)
            .collect();
        self
    }
}

fn clamp_unit(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn sanitize_media(mut item: MediaItem) -> Option<MediaItem> {
    item.src = item.src.trim().to_owned();
    if item.src.is_empty() {
        return None;
    }
    item.mime = item
        .mime
        .map(|m| m.trim().to_ascii_lowercase())
        .filter(|m| ALLOWED_MIMES.contains(&m.as_str()));
    if let Some(mime) = &item.mime {
        if mime.starts_with("image/") {
            item.kind = MediaType::Image;
        } else if mime.starts_with("video/") {
            item.kind = MediaType::Video;
        }
    }
    if item.kind != MediaType::Video {
        item.poster = None;
    }
    Some(item)
}

impl TimingSettings {
    /// Easing curve for the configured CSS keyword.
    pub fn ease(&self) -> Ease {
        Ease::from_css(&self.easing).unwrap_or_else(|| {
            tracing::warn!(easing = %self.easing, "unsupported easing, using ease-in-out");
            Ease::InOutCubic
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/parse.rs"]
mod tests;
