//! Software compositing of an overlay frame onto a backdrop.

use crate::foundation::error::{HeroError, HeroResult};
use crate::settings::model::BlendMode;

pub type PremulRgba8 = [u8; 4];

/// Source-over with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Composite one pixel with a separable blend mode.
///
/// `Normal` is plain source-over; the others mix the unpremultiplied colors
/// where both layers are present and fall back to source-over elsewhere.
pub fn blend(dst: PremulRgba8, src: PremulRgba8, mode: BlendMode, opacity: f32) -> PremulRgba8 {
    if mode == BlendMode::Normal {
        return over(dst, src, opacity);
    }
    let opacity = opacity.clamp(0.0, 1.0);
    let sa = f32::from(src[3]) / 255.0 * opacity;
    if sa <= 0.0 {
        return dst;
    }
    let da = f32::from(dst[3]) / 255.0;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let sc = f32::from(src[i]) / 255.0 * opacity;
        let dc = f32::from(dst[i]) / 255.0;
        let cs = sc / sa;
        let cd = if da > 0.0 { dc / da } else { 0.0 };
        let mixed = mix_channel(mode, cs, cd);
        let v = (1.0 - sa) * dc + (1.0 - da) * sc + sa * da * mixed;
        out[i] = to_u8(v);
    }
    out[3] = to_u8(sa + da - sa * da);
    out
}

fn mix_channel(mode: BlendMode, cs: f32, cd: f32) -> f32 {
    match mode {
        BlendMode::Normal => cs,
        BlendMode::Multiply => cs * cd,
        BlendMode::Screen => cs + cd - cs * cd,
        BlendMode::Overlay => {
            if cd <= 0.5 {
                2.0 * cs * cd
            } else {
                let d = 2.0 * cd - 1.0;
                cs + d - cs * d
            }
        }
    }
}

/// Blend `src` over `dst` pixel by pixel.
pub fn blend_in_place(
    dst: &mut [u8],
    src: &[u8],
    mode: BlendMode,
    opacity: f32,
) -> HeroResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HeroError::overlay("blend_in_place expects equal-length rgba8 buffers"));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = blend(
            [d[0], d[1], d[2], d[3]],
            [s[0], s[1], s[2], s[3]],
            mode,
            opacity,
        );
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
