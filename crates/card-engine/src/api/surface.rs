//! Presentation surface the engine drives.
//!
//! The engine never touches the page directly. Every visible effect goes
//! through this trait, so the sequencer and behaviours run headless in tests
//! and against the DOM in `card-web`.

use glam::Vec2;
use super::types::Element;

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }
}

/// Capabilities the page must offer the engine.
pub trait Surface {
    /// Make an element visible.
    fn show(&mut self, el: Element);

    /// Hide an element.
    fn hide(&mut self, el: Element);

    /// Start the element's entrance animation.
    fn animate(&mut self, el: Element);

    /// Put the element straight into its final presentation, without animating.
    fn settle(&mut self, el: Element);

    /// Detach an element from the document flow so it can be positioned freely.
    fn set_floating(&mut self, el: Element);

    /// Move a floating element's top-left corner to `pos` (viewport px).
    fn set_position(&mut self, el: Element, pos: Vec2);

    /// Vertical translation, used by parallax layers.
    fn set_offset_y(&mut self, el: Element, y: f32);

    /// Add or remove the element from sequential keyboard focus.
    fn set_focusable(&mut self, el: Element, focusable: bool);

    fn focus(&mut self, el: Element);

    fn lock_scroll(&mut self);

    fn unlock_scroll(&mut self);

    /// Smooth-scroll the page by `dy` px.
    fn scroll_by(&mut self, dy: f32);

    /// Stop reporting visibility of the surprise section.
    fn stop_observing(&mut self);

    /// Current viewport size in px. Read live; never cached by the engine.
    fn viewport(&self) -> Vec2;

    /// Current bounding box of an element, if it exists on the page.
    fn rect(&self, el: Element) -> Option<Rect>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_center() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(r.center(), Vec2::new(60.0, 45.0));
    }
}
