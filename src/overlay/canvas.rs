use crate::foundation::core::Size;
use crate::render::display_list::DisplayList;
use crate::settings::model::BlendMode;

/// The overlay's drawing surface.
///
/// The element box is in CSS pixels; the backing store is the element box
/// times the pixel ratio, truncated. Entities and draw commands live in
/// backing-store pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayCanvas {
    element: Size,
    pixel_ratio: f64,
    backing: (u32, u32),
    blend: BlendMode,
    list: DisplayList,
}

impl OverlayCanvas {
    /// Canvas sized to `element` at `pixel_ratio`.
    pub fn new(element: Size, pixel_ratio: f64, blend: BlendMode) -> Self {
        let mut canvas = Self {
            element,
            pixel_ratio,
            backing: (0, 0),
            blend,
            list: DisplayList::new(),
        };
        canvas.resize(pixel_ratio);
        canvas
    }

    pub fn element_size(&self) -> Size {
        self.element
    }

    /// The host laid the element out at a new size; the backing store follows on the next resize.
    pub fn set_element_size(&mut self, element: Size) {
        self.element = element;
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Backing store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    /// Backing store size as a float size, for geometry.
    pub fn extent(&self) -> Size {
        Size::new(f64::from(self.backing.0), f64::from(self.backing.1))
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    fn target_backing(&self) -> (u32, u32) {
        let px = |css: f64| (css * self.pixel_ratio).max(0.0).floor() as u32;
        (px(self.element.width), px(self.element.height))
    }

    /// Whether the backing store no longer matches element box times pixel ratio.
    pub fn needs_resize(&self) -> bool {
        self.backing != self.target_backing()
    }

    /// Reallocate the backing store; the canvas is cleared.
    pub fn resize(&mut self, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio;
        self.backing = self.target_backing();
        self.list.clear();
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Commands drawn since the last clear.
    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    pub fn display_list_mut(&mut self) -> &mut DisplayList {
        &mut self.list
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/canvas.rs"]
mod tests;
