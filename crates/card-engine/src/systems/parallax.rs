use crate::api::surface::Surface;
use crate::api::types::Element;

/// Scroll-linked drift of the decorative layers.
/// Layer `i` moves by `scroll_y * factor * (i + 1)`, so deeper layers drift faster.
#[derive(Debug, Clone)]
pub struct Parallax {
    layers: u8,
    factor: f32,
}

impl Parallax {
    pub fn new(layers: u8, factor: f32) -> Self {
        Self { layers, factor }
    }

    pub fn offset(&self, layer: u8, scroll_y: f32) -> f32 {
        scroll_y * self.factor * (layer as f32 + 1.0)
    }

    pub fn on_scroll(&self, scroll_y: f32, surface: &mut dyn Surface) {
        for i in 0..self.layers {
            surface.set_offset_y(Element::Decoration(i), self.offset(i, scroll_y));
        }
    }

    /// Put every layer back at rest (reduced motion switched on).
    pub fn reset(&self, surface: &mut dyn Surface) {
        for i in 0..self.layers {
            surface.set_offset_y(Element::Decoration(i), 0.0);
        }
    }
}
