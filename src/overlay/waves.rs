use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::foundation::core::{BezPath, Point, Rgba8Premul};
use crate::overlay::{FieldContext, OverlayField, OverlayKind, uniform};
use crate::render::display_list::{DisplayList, GradientStop, Paint};

/// Horizontal distance between crest samples, in canvas pixels.
pub const SAMPLE_STEP: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub amplitude: f64,
    /// Radians per pixel.
    pub frequency: f64,
    pub phase: f64,
    /// Radians per second.
    pub speed: f64,
    /// Vertical centre line.
    pub baseline: f64,
    pub alpha: f64,
    /// `1.0` or `-1.0`.
    pub direction: f64,
}

fn baseline(index: usize, height: f64) -> f64 {
    height * (0.2 + index as f64 * 0.25)
}

impl Wave {
    fn random(index: usize, cx: &FieldContext, rng: &mut SmallRng) -> Self {
        Self {
            amplitude: uniform(rng, 20.0, 50.0) * cx.pixel_ratio,
            frequency: uniform(rng, 0.005, 0.015),
            phase: uniform(rng, 0.0, TAU),
            speed: cx.speed * uniform(rng, 0.5, 1.0),
            baseline: baseline(index, cx.extent.height),
            alpha: uniform(rng, 0.15, 0.45),
            direction: if rng.random::<f64>() > 0.5 { 1.0 } else { -1.0 },
        }
    }

    /// Crest height at `x`.
    pub fn y_at(&self, x: f64) -> f64 {
        self.baseline + (x * self.frequency + self.phase).sin() * self.amplitude
    }

    /// Crest line from the left edge to `width`.
    pub fn crest(&self, width: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, self.baseline));
        let mut x = 0.0;
        while x <= width {
            path.line_to((x, self.y_at(x)));
            x += SAMPLE_STEP;
        }
        path
    }

    /// Crest closed down to `baseline + 2 * amplitude`.
    pub fn band(&self, width: f64) -> BezPath {
        let floor = self.baseline + self.amplitude * 2.0;
        let mut path = self.crest(width);
        path.line_to((width, floor));
        path.line_to((0.0, floor));
        path.close_path();
        path
    }
}

/// Translucent sine bands scrolling sideways.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftWaves {
    waves: Vec<Wave>,
}

impl SoftWaves {
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

impl OverlayField for SoftWaves {
    const KIND: OverlayKind = OverlayKind::SoftWaves;

    fn populate(count: usize, cx: &FieldContext, rng: &mut SmallRng) -> Self {
        Self {
            waves: (0..count).map(|i| Wave::random(i, cx, rng)).collect(),
        }
    }

    fn relayout(&mut self, cx: &FieldContext, rng: &mut SmallRng) {
        for (i, w) in self.waves.iter_mut().enumerate() {
            w.baseline = baseline(i, cx.extent.height);
            w.amplitude = uniform(rng, 20.0, 50.0) * cx.pixel_ratio;
        }
    }

    fn advance(&mut self, dt_ms: f64, _cx: &FieldContext) {
        for w in &mut self.waves {
            w.phase += w.speed * w.direction * dt_ms * 0.001;
        }
    }

    fn draw(&self, cx: &FieldContext, out: &mut DisplayList) {
        let width = cx.extent.width;
        for w in &self.waves {
            let a = w.alpha * cx.opacity;
            let clear = Rgba8Premul::transparent();
            out.fill(
                w.band(width),
                Paint::Linear {
                    start: Point::new(0.0, w.baseline - w.amplitude),
                    end: Point::new(0.0, w.baseline + w.amplitude),
                    stops: vec![
                        GradientStop {
                            offset: 0.0,
                            color: clear,
                        },
                        GradientStop {
                            offset: 0.5,
                            color: Rgba8Premul::white(a),
                        },
                        GradientStop {
                            offset: 1.0,
                            color: clear,
                        },
                    ],
                },
            );
            out.stroke(w.crest(width), cx.pixel_ratio, Rgba8Premul::white(a * 0.7));
        }
    }

    fn len(&self) -> usize {
        self.waves.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/waves.rs"]
mod tests;
