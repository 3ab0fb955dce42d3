use crate::foundation::error::{HeroError, HeroResult};
use crate::settings::model::BlendMode;

pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod display_list;

/// A rasterized frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Fully transparent premultiplied frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Premultiplied frame where every pixel is `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            data: rgba.repeat(n),
            premultiplied: true,
        }
    }

    /// Composite `layer` onto this frame with `mode`.
    pub fn blend_from(&mut self, layer: &FrameRGBA, mode: BlendMode) -> HeroResult<()> {
        if (self.width, self.height) != (layer.width, layer.height) {
            return Err(HeroError::overlay(format!(
                "layer is {}x{}, backdrop is {}x{}",
                layer.width, layer.height, self.width, self.height
            )));
        }
        if !self.premultiplied || !layer.premultiplied {
            return Err(HeroError::overlay("blending needs premultiplied frames"));
        }
        composite::blend_in_place(&mut self.data, &layer.data, mode, 1.0)
    }

    /// Pixels with straight alpha, as image encoders expect.
    pub fn to_straight(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
