use crate::foundation::core::{BezPath, Point, Rect, Rgba8Premul};
use crate::foundation::error::{HeroError, HeroResult};
use crate::overlay::canvas::OverlayCanvas;
use crate::render::FrameRGBA;
use crate::render::display_list::{DisplayList, DrawOp, Paint};

/// Rasterizes overlay display lists with `vello_cpu`.
///
/// Gradients are baked into image paints covering the filled path's bounds,
/// so the rasterizer only ever sees solid colors and images.
#[derive(Debug, Default)]
pub struct CpuRasterizer {
    pixmap: Option<vello_cpu::Pixmap>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the canvas' current display list into a premultiplied RGBA8 frame.
    pub fn render(&mut self, canvas: &OverlayCanvas) -> HeroResult<FrameRGBA> {
        let (width, height) = canvas.backing_size();
        self.render_list(canvas.display_list(), width, height)
    }

    /// Draw `list` onto a transparent `width` x `height` surface.
    pub fn render_list(
        &mut self,
        list: &DisplayList,
        width: u32,
        height: u32,
    ) -> HeroResult<FrameRGBA> {
        if width == 0 || height == 0 {
            return Ok(FrameRGBA {
                width,
                height,
                data: Vec::new(),
                premultiplied: true,
            });
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| HeroError::overlay("canvas width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| HeroError::overlay("canvas height exceeds u16"))?;

        let mut pixmap = match self.pixmap.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        clear_pixmap(&mut pixmap);

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        for op in list.ops() {
            draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        let frame = FrameRGBA {
            width,
            height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.pixmap = Some(pixmap);
        Ok(frame)
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn draw_op(ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> HeroResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::Fill { path, paint } => {
            match paint {
                Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
                gradient => {
                    let bounds = kurbo::Shape::bounding_box(path).expand();
                    let Some((image, origin)) = gradient_paint(gradient, bounds)? else {
                        return Ok(());
                    };
                    ctx.set_paint_transform(vello_cpu::kurbo::Affine::translate((
                        origin.x, origin.y,
                    )));
                    ctx.set_paint(image);
                }
            }
            ctx.fill_path(&bezpath_to_cpu(path));
            Ok(())
        }
        DrawOp::Stroke { path, width, color } => {
            if *width <= 0.0 {
                return Ok(());
            }
            ctx.set_paint(color_to_cpu(*color));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(*width));
            ctx.stroke_path(&bezpath_to_cpu(path));
            Ok(())
        }
    }
}

// Samples the gradient at pixel centres over `bounds`.
fn gradient_paint(
    paint: &Paint,
    bounds: Rect,
) -> HeroResult<Option<(vello_cpu::Image, Point)>> {
    let w = bounds.width().max(0.0) as u32;
    let h = bounds.height().max(0.0) as u32;
    if w == 0 || h == 0 {
        return Ok(None);
    }
    let w16: u16 = w
        .try_into()
        .map_err(|_| HeroError::overlay("gradient width exceeds u16"))?;
    let h16: u16 = h
        .try_into()
        .map_err(|_| HeroError::overlay("gradient height exceeds u16"))?;

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        for x in 0..w {
            let p = Point::new(
                bounds.x0 + f64::from(x) + 0.5,
                bounds.y0 + f64::from(y) + 0.5,
            );
            let c = paint.color_at(p);
            may_have_opacities |= c.a != 255;
            pixels.push(vello_cpu::peniko::color::PremulRgba8 {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            });
        }
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w16, h16, may_have_opacities);
    let image = vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    };
    Ok(Some((image, bounds.origin())))
}

// vello_cpu takes straight alpha.
fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    if c.a == 0 {
        return vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 0);
    }
    let un = |v: u8| -> u8 {
        ((u16::from(v) * 255 + u16::from(c.a) / 2) / u16::from(c.a)).min(255) as u8
    };
    vello_cpu::peniko::Color::from_rgba8(un(c.r), un(c.g), un(c.b), c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
