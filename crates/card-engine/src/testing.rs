//! Test doubles shared by the unit tests.

use std::cell::{Ref, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use glam::Vec2;

use crate::api::config::CardConfig;
use crate::api::context::CardContext;
use crate::api::store::{MemoryStore, SessionStore, StoreError};
use crate::api::surface::{Rect, Surface};
use crate::api::types::Element;

/// One call made on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Show(Element),
    Hide(Element),
    Animate(Element),
    Settle(Element),
    Floating(Element),
    Position(Element, Vec2),
    OffsetY(Element, f32),
    Focusable(Element, bool),
    Focus(Element),
    LockScroll,
    UnlockScroll,
    ScrollBy(f32),
    StopObserving,
}

/// Everything the recording surface saw, plus the fake page geometry.
#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub ops: Vec<Op>,
    pub viewport: Vec2,
    pub rects: HashMap<Element, Rect>,
    pub visible: HashSet<Element>,
    pub scroll_locked: bool,
    pub focused: Option<Element>,
}

impl SurfaceLog {
    pub fn has(&self, op: Op) -> bool {
        self.ops.contains(&op)
    }

    pub fn count(&self, op: Op) -> usize {
        self.ops.iter().filter(|o| **o == op).count()
    }

    pub fn is_visible(&self, el: Element) -> bool {
        self.visible.contains(&el)
    }

    pub fn any_animated(&self) -> bool {
        self.ops.iter().any(|o| matches!(o, Op::Animate(_)))
    }
}

/// Surface that records every call into a shared log.
pub struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
}

/// Test-side handle onto a recording surface's log.
#[derive(Clone)]
pub struct SurfaceHandle(Rc<RefCell<SurfaceLog>>);

impl SurfaceHandle {
    pub fn log(&self) -> Ref<'_, SurfaceLog> {
        self.0.borrow()
    }

    pub fn set_rect(&self, el: Element, rect: Rect) {
        self.0.borrow_mut().rects.insert(el, rect);
    }

    pub fn set_viewport(&self, viewport: Vec2) {
        self.0.borrow_mut().viewport = viewport;
    }
}

impl RecordingSurface {
    pub fn new(viewport: Vec2) -> (Self, SurfaceHandle) {
        let log = Rc::new(RefCell::new(SurfaceLog {
            viewport,
            ..SurfaceLog::default()
        }));
        (Self { log: log.clone() }, SurfaceHandle(log))
    }

    fn record(&mut self, op: Op) {
        self.log.borrow_mut().ops.push(op);
    }
}

impl Surface for RecordingSurface {
    fn show(&mut self, el: Element) {
        self.record(Op::Show(el));
        self.log.borrow_mut().visible.insert(el);
    }

    fn hide(&mut self, el: Element) {
        self.record(Op::Hide(el));
        self.log.borrow_mut().visible.remove(&el);
    }

    fn animate(&mut self, el: Element) {
        self.record(Op::Animate(el));
    }

    fn settle(&mut self, el: Element) {
        self.record(Op::Settle(el));
    }

    fn set_floating(&mut self, el: Element) {
        self.record(Op::Floating(el));
    }

    fn set_position(&mut self, el: Element, pos: Vec2) {
        self.record(Op::Position(el, pos));
        let mut log = self.log.borrow_mut();
        let rect = log.rects.entry(el).or_default();
        rect.min = pos;
    }

    fn set_offset_y(&mut self, el: Element, y: f32) {
        self.record(Op::OffsetY(el, y));
    }

    fn set_focusable(&mut self, el: Element, focusable: bool) {
        self.record(Op::Focusable(el, focusable));
    }

    fn focus(&mut self, el: Element) {
        self.record(Op::Focus(el));
        self.log.borrow_mut().focused = Some(el);
    }

    fn lock_scroll(&mut self) {
        self.record(Op::LockScroll);
        self.log.borrow_mut().scroll_locked = true;
    }

    fn unlock_scroll(&mut self) {
        self.record(Op::UnlockScroll);
        self.log.borrow_mut().scroll_locked = false;
    }

    fn scroll_by(&mut self, dy: f32) {
        self.record(Op::ScrollBy(dy));
    }

    fn stop_observing(&mut self) {
        self.record(Op::StopObserving);
    }

    fn viewport(&self) -> Vec2 {
        self.log.borrow().viewport
    }

    fn rect(&self, el: Element) -> Option<Rect> {
        self.log.borrow().rects.get(&el).copied()
    }
}

/// Store that behaves like disabled session storage.
pub struct BrokenStore;

impl SessionStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("disabled by policy".to_string()))
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::WriteRejected {
            key: key.to_string(),
            reason: "disabled by policy".to_string(),
        })
    }
}

/// Memory store the test can inspect after handing a clone to the card.
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn flag(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).ok().flatten()
    }
}

impl SessionStore for SharedStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.0.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.borrow_mut().set(key, value)
    }
}

pub const VIEWPORT: Vec2 = Vec2::new(1280.0, 800.0);

/// Context over a recording surface and an empty memory store.
pub fn context() -> (CardContext, SurfaceHandle) {
    context_with(CardConfig::default(), MemoryStore::new())
}

pub fn context_with(config: CardConfig, store: impl SessionStore + 'static) -> (CardContext, SurfaceHandle) {
    let (surface, handle) = RecordingSurface::new(VIEWPORT);
    (CardContext::new(config, Box::new(surface), Box::new(store)), handle)
}
