use crate::foundation::core::{BezPath, Point, Rgba8Premul};

/// A color at a position along a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position in `[0, 1]`.
    pub offset: f64,
    pub color: Rgba8Premul,
}

/// How a filled path is colored.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba8Premul),
    /// Gradient along the segment `start -> end`, padded beyond it.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    /// Gradient from `center` out to `radius`, padded beyond it.
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// Color at gradient position `t`, interpolated between the surrounding stops.
    pub fn stop_color(stops: &[GradientStop], t: f64) -> Rgba8Premul {
        let Some(first) = stops.first() else {
            return Rgba8Premul::transparent();
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let u = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return mix(a.color, b.color, u);
            }
        }
        stops[stops.len() - 1].color
    }

    /// Color at `p` in canvas pixels.
    pub fn color_at(&self, p: Point) -> Rgba8Premul {
        match self {
            Self::Solid(c) => *c,
            Self::Linear { start, end, stops } => {
                let d = *end - *start;
                let len2 = d.hypot2();
                let t = if len2 > 0.0 {
                    (p - *start).dot(d) / len2
                } else {
                    0.0
                };
                Self::stop_color(stops, t)
            }
            Self::Radial {
                center,
                radius,
                stops,
            } => {
                let t = if *radius > 0.0 {
                    (p - *center).hypot() / radius
                } else {
                    1.0
                };
                Self::stop_color(stops, t)
            }
        }
    }
}

fn mix(a: Rgba8Premul, b: Rgba8Premul, t: f64) -> Rgba8Premul {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| -> u8 {
        (f64::from(x) + (f64::from(y) - f64::from(x)) * t)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba8Premul {
        r: ch(a.r, b.r),
        g: ch(a.g, b.g),
        b: ch(a.b, b.b),
        a: ch(a.a, b.a),
    }
}

/// One recorded drawing command, in canvas pixel coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill { path: BezPath, paint: Paint },
    Stroke {
        path: BezPath,
        width: f64,
        color: Rgba8Premul,
    },
}

/// Drawing commands for one frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(&mut self, path: BezPath, paint: Paint) {
        self.ops.push(DrawOp::Fill { path, paint });
    }

    pub fn stroke(&mut self, path: BezPath, width: f64, color: Rgba8Premul) {
        self.ops.push(DrawOp::Stroke { path, width, color });
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of stroke commands.
    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { .. }))
            .count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/display_list.rs"]
mod tests;
