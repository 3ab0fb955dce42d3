use crate::foundation::error::{HeroError, HeroResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Point on the host's monotonic clock, in whole milliseconds.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Time zero.
    pub const ZERO: Self = Self(0);

    /// Return `self + ms` using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier` (zero when `earlier` is in the future).
    pub fn since(self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Convert to floating-point milliseconds.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

/// Grid geometry of the tile container (`<cols>x<rows>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridDims {
    /// Number of columns, must be non-zero.
    pub cols: u32,
    /// Number of rows, must be non-zero.
    pub rows: u32,
}

impl GridDims {
    /// Create validated grid dimensions.
    pub fn new(cols: u32, rows: u32) -> HeroResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(HeroError::validation("grid cols and rows must be > 0"));
        }
        Ok(Self { cols, rows })
    }

    /// Number of cells in the grid.
    pub fn cells(self) -> u32 {
        self.cols.saturating_mul(self.rows)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// White at a fractional alpha (clamped to `[0, 1]`), the overlay ink.
    pub fn white(alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_straight_rgba(255, 255, 255, a)
    }

    /// Alpha as a fraction in `[0, 1]`.
    pub fn alpha_f64(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
