use card_engine::{Card, CardConfig, Element, InputEvent, Key, SessionStore, Stage, Surface};

/// Wires the card to the browser's string-typed events.
///
/// The page's JS glue reports targets by DOM id and keys by `KeyboardEvent.key`;
/// the runner maps both onto engine types and queues them for the next tick.
/// Events on elements the engine doesn't know are dropped here.
pub struct CardRunner {
    card: Card,
    /// Visible fraction the observer was armed with.
    threshold: f32,
}

/// Browsers may report a ratio a hair under the threshold at the exact crossing.
const RATIO_SLACK: f32 = 1e-3;

impl CardRunner {
    pub fn new(config: CardConfig, surface: impl Surface + 'static, session: impl SessionStore + 'static) -> Self {
        let threshold = config.intro_threshold;
        Self {
            card: Card::new(config, surface, session),
            threshold,
        }
    }

    /// Initialize the card. Call once after construction.
    pub fn init(&mut self, reduced_motion: bool) {
        self.card.init(reduced_motion);
    }

    pub fn tick(&mut self, dt: f32) {
        self.card.tick(dt);
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.card.push_input(event);
    }

    pub fn stage(&self) -> Stage {
        self.card.stage()
    }

    /// Observer entry for the surprise section. Entries that aren't intersecting
    /// are dropped; one within float noise of the threshold counts as crossing it.
    pub fn intersect(&mut self, intersecting: bool, ratio: f64) {
        if !intersecting {
            return;
        }
        let mut ratio = ratio as f32;
        if ratio < self.threshold && ratio + RATIO_SLACK >= self.threshold {
            ratio = self.threshold;
        }
        self.push_input(InputEvent::Intersect { ratio });
    }

    pub fn pointer_enter(&mut self, id: &str) {
        if let Some(target) = target(id) {
            self.push_input(InputEvent::PointerEnter { target });
        }
    }

    pub fn pointer_leave(&mut self, id: &str) {
        if let Some(target) = target(id) {
            self.push_input(InputEvent::PointerLeave { target });
        }
    }

    pub fn touch_start(&mut self, x: f32, y: f32, id: Option<&str>) {
        let target = id.and_then(Element::from_dom_id);
        self.push_input(InputEvent::TouchStart { x, y, target });
    }

    pub fn click(&mut self, id: &str) {
        if let Some(target) = target(id) {
            self.push_input(InputEvent::Click { target });
        }
    }

    pub fn key_down(&mut self, key: &str, id: Option<&str>) {
        let key = Key::from_key_name(key);
        if key == Key::Other {
            return;
        }
        let target = id.and_then(Element::from_dom_id);
        self.push_input(InputEvent::KeyDown { key, target });
    }

    pub fn animation_end(&mut self, id: &str) {
        if let Some(target) = target(id) {
            self.push_input(InputEvent::AnimationEnd { target });
        }
    }
}

fn target(id: &str) -> Option<Element> {
    let target = Element::from_dom_id(id);
    if target.is_none() {
        log::debug!("ignoring event on unknown element #{id}");
    }
    target
}
