//! Debug visibility switches for the five visual layers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::error::{HeroError, HeroResult};

// Flags travel as `0 | 1` so they round-trip through storage as written.
mod bit {
    use super::*;

    pub fn serialize<S: Serializer>(on: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*on))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        match u8::deserialize(d)? {
            0 => Ok(false),
            1 => Ok(true),
            n => Err(serde::de::Error::custom(format!(
                "layer flag must be 0 or 1, got {n}"
            ))),
        }
    }
}

/// Which layers are shown. Hiding a layer never tears down its state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerFlags {
    /// Tile grid.
    #[serde(with = "bit")]
    pub tiles: bool,
    /// Zoom display; off pauses the sequencer and clears the display.
    #[serde(with = "bit")]
    pub zoom: bool,
    /// CSS middle pattern.
    #[serde(with = "bit")]
    pub pattern: bool,
    /// Canvas overlay; off stops the renderer.
    #[serde(with = "bit")]
    pub overlay: bool,
    /// Text and call-to-action layer.
    #[serde(with = "bit")]
    pub ui: bool,
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self::ALL_ON
    }
}

impl LayerFlags {
    /// Every layer visible.
    pub const ALL_ON: Self = Self {
        tiles: true,
        zoom: true,
        pattern: true,
        overlay: true,
        ui: true,
    };

    /// Parse `{"tiles":1,"zoom":0,...}`; absent keys stay on.
    pub fn from_json(text: &str) -> HeroResult<Self> {
        serde_json::from_str(text).map_err(|e| HeroError::serde(format!("layer flags: {e}")))
    }

    pub fn to_json(&self) -> HeroResult<String> {
        serde_json::to_string(self).map_err(|e| HeroError::serde(format!("layer flags: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/layers.rs"]
mod tests;
