use rand::rngs::SmallRng;

use crate::foundation::core::{BezPath, Point, Rgba8Premul, Vec2};
use crate::overlay::{FieldContext, OverlayField, OverlayKind, uniform};
use crate::render::display_list::{DisplayList, Paint};

/// Link distance per unit of pixel ratio.
pub const LINK_DISTANCE: f64 = 120.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Point,
    /// Velocity in pixels per 100 ms.
    pub vel: Vec2,
}

/// Drifting particles joined by fading lines when close.
#[derive(Clone, Debug, PartialEq)]
pub struct Constellation {
    particles: Vec<Particle>,
}

impl Constellation {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Alpha of the line between two points, `None` past the link distance.
    pub fn link_alpha(a: Point, b: Point, cx: &FieldContext) -> Option<f64> {
        let max = LINK_DISTANCE * cx.pixel_ratio;
        let d2 = (a - b).hypot2();
        if d2 >= max * max {
            return None;
        }
        Some((1.0 - d2.sqrt() / max) * cx.opacity * 0.3)
    }
}

fn random_pos(cx: &FieldContext, rng: &mut SmallRng) -> Point {
    Point::new(
        uniform(rng, 0.0, cx.extent.width),
        uniform(rng, 0.0, cx.extent.height),
    )
}

// Leaving one edge re-enters at the opposite one.
fn wrap(v: f64, max: f64) -> f64 {
    if v < 0.0 {
        max
    } else if v > max {
        0.0
    } else {
        v
    }
}

impl OverlayField for Constellation {
    const KIND: OverlayKind = OverlayKind::Constellation;

    fn populate(count: usize, cx: &FieldContext, rng: &mut SmallRng) -> Self {
        let particles = (0..count)
            .map(|_| {
                let pos = random_pos(cx, rng);
                let vel = Vec2::new(
                    uniform(rng, -0.5, 0.5) * 0.5 * cx.speed,
                    uniform(rng, -0.5, 0.5) * 0.5 * cx.speed,
                );
                Particle { pos, vel }
            })
            .collect();
        Self { particles }
    }

    fn relayout(&mut self, cx: &FieldContext, rng: &mut SmallRng) {
        for p in &mut self.particles {
            p.pos = random_pos(cx, rng);
        }
    }

    fn advance(&mut self, dt_ms: f64, cx: &FieldContext) {
        let step = dt_ms * 0.01;
        for p in &mut self.particles {
            p.pos += p.vel * step;
            p.pos.x = wrap(p.pos.x, cx.extent.width);
            p.pos.y = wrap(p.pos.y, cx.extent.height);
        }
    }

    fn draw(&self, cx: &FieldContext, out: &mut DisplayList) {
        let dot = Paint::Solid(Rgba8Premul::white(cx.opacity * 0.8));
        let r = cx.pixel_ratio;
        for p in &self.particles {
            let circle = kurbo::Circle::new(p.pos, r);
            out.fill(kurbo::Shape::to_path(&circle, 0.1), dot.clone());
        }

        let width = 0.5 * cx.pixel_ratio;
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if let Some(alpha) = Self::link_alpha(a.pos, b.pos, cx) {
                    let mut line = BezPath::new();
                    line.move_to(a.pos);
                    line.line_to(b.pos);
                    out.stroke(line, width, Rgba8Premul::white(alpha));
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/constellation.rs"]
mod tests;
