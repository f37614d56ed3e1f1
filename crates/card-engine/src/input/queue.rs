use crate::api::types::Element;

/// Keys the card reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    /// Enter and Space activate the focused control like a click.
    pub fn activates(self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// Input event types the card understands.
/// Coordinates are viewport px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The surprise section's visible fraction changed.
    Intersect { ratio: f32 },
    /// The presentation layer finished an element's animation.
    AnimationEnd { target: Element },
    PointerEnter { target: Element },
    PointerLeave { target: Element },
    PointerMove { x: f32, y: f32 },
    /// A touch began at (x, y), optionally on a known element.
    TouchStart { x: f32, y: f32, target: Option<Element> },
    Click { target: Element },
    /// A key was pressed while `target` had focus.
    KeyDown { key: Key, target: Option<Element> },
    Scroll { y: f32 },
    /// The reduced-motion preference changed.
    MotionPreference { reduced: bool },
}

/// A queue of input events.
/// The host writes events as they arrive; the card drains them each tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerMove { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key: Key::Escape, target: None });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerMove { x: 10.0, y: 20.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_key_name("Enter"), Key::Enter);
        assert_eq!(Key::from_key_name(" "), Key::Space);
        assert_eq!(Key::from_key_name("Escape"), Key::Escape);
        assert_eq!(Key::from_key_name("a"), Key::Other);
        assert!(Key::Space.activates());
        assert!(!Key::Escape.activates());
    }
}
