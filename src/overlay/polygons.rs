use std::f64::consts::TAU;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::foundation::core::{Affine, BezPath, Point, Rgba8Premul};
use crate::overlay::{FieldContext, OverlayField, OverlayKind, uniform};
use crate::render::display_list::{DisplayList, GradientStop, Paint};

/// Cheap deterministic noise in `[0, 1)`.
pub fn noise(x: f64) -> f64 {
    let v = x.sin() * 10_000.0;
    v - v.floor()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub center: Point,
    pub base_radius: f64,
    /// Current rotation in radians.
    pub rotation: f64,
    /// Radians per second.
    pub rotation_speed: f64,
    pub noise_offset: f64,
    /// Noise advance per millisecond.
    pub noise_speed: f64,
    pub alpha: f64,
    /// One noise phase per vertex; its length is the side count.
    pub vertex_noise: Vec<f64>,
}

impl Polygon {
    fn random(cx: &FieldContext, rng: &mut SmallRng) -> Self {
        let sides = rng.random_range(3..=5);
        let center = Point::new(
            uniform(rng, 0.0, cx.extent.width),
            uniform(rng, 0.0, cx.extent.height),
        );
        let base_radius = uniform(rng, 40.0, 120.0) * cx.pixel_ratio;
        let rotation = uniform(rng, 0.0, TAU);
        let rotation_speed = uniform(rng, -0.5, 0.5) * 0.5 * cx.speed;
        let noise_offset = uniform(rng, 0.0, 1000.0);
        let alpha = uniform(rng, 0.1, 0.4);
        let vertex_noise = (0..sides).map(|_| uniform(rng, 0.0, 1000.0)).collect();
        Self {
            center,
            base_radius,
            rotation,
            rotation_speed,
            noise_offset,
            noise_speed: cx.speed * 0.001,
            alpha,
            vertex_noise,
        }
    }

    pub fn sides(&self) -> usize {
        self.vertex_noise.len()
    }

    /// Outline in canvas pixels.
    pub fn outline(&self, pixel_ratio: f64) -> BezPath {
        let place = Affine::translate(self.center.to_vec2()) * Affine::rotate(self.rotation);
        let n = self.sides();
        let mut path = BezPath::new();
        for (i, phase) in self.vertex_noise.iter().enumerate() {
            let angle = i as f64 / n as f64 * TAU;
            let wobble = (noise(self.noise_offset + phase) - 0.5) * 20.0 * pixel_ratio;
            let r = self.base_radius + wobble;
            let p = place * Point::new(angle.cos() * r, angle.sin() * r);
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        path.close_path();
        path
    }
}

/// A few slowly rotating polygons whose vertices wobble.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphPolygons {
    polygons: Vec<Polygon>,
}

impl MorphPolygons {
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl OverlayField for MorphPolygons {
    const KIND: OverlayKind = OverlayKind::MorphPolygons;

    fn populate(count: usize, cx: &FieldContext, rng: &mut SmallRng) -> Self {
        Self {
            polygons: (0..count).map(|_| Polygon::random(cx, rng)).collect(),
        }
    }

    fn relayout(&mut self, cx: &FieldContext, rng: &mut SmallRng) {
        for p in &mut self.polygons {
            p.center = Point::new(
                uniform(rng, 0.0, cx.extent.width),
                uniform(rng, 0.0, cx.extent.height),
            );
            p.base_radius = uniform(rng, 40.0, 120.0) * cx.pixel_ratio;
        }
    }

    fn advance(&mut self, dt_ms: f64, _cx: &FieldContext) {
        for p in &mut self.polygons {
            p.rotation += p.rotation_speed * dt_ms * 0.001;
            p.noise_offset += p.noise_speed * dt_ms;
        }
    }

    fn draw(&self, cx: &FieldContext, out: &mut DisplayList) {
        for p in &self.polygons {
            let a = p.alpha * cx.opacity;
            let outline = p.outline(cx.pixel_ratio);
            out.fill(
                outline.clone(),
                Paint::Radial {
                    center: p.center,
                    radius: p.base_radius,
                    stops: vec![
                        GradientStop {
                            offset: 0.0,
                            color: Rgba8Premul::white(a),
                        },
                        GradientStop {
                            offset: 1.0,
                            color: Rgba8Premul::transparent(),
                        },
                    ],
                },
            );
            out.stroke(outline, cx.pixel_ratio, Rgba8Premul::white(a * 0.5));
        }
    }

    fn len(&self) -> usize {
        self.polygons.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/polygons.rs"]
mod tests;
