use card_engine::{Element, Rect, Surface};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, IntersectionObserver, ScrollBehavior, ScrollToOptions, Window};

const VISIBLE: &str = "visible";
const HIDDEN: &str = "hidden";
const ANIMATE: &str = "animate";
const FLOATING: &str = "running";

/// `Surface` over the live DOM. Elements are looked up by id on every call;
/// a missing element is logged and skipped.
pub struct DomSurface {
    window: Window,
    document: Document,
    observer: Option<IntersectionObserver>,
}

impl DomSurface {
    pub fn new(window: Window, document: Document) -> Self {
        Self {
            window,
            document,
            observer: None,
        }
    }

    /// Hand over the observer watching the surprise section so
    /// `stop_observing` can disconnect it.
    pub fn set_observer(&mut self, observer: IntersectionObserver) {
        self.observer = Some(observer);
    }

    fn element(&self, el: Element) -> Option<HtmlElement> {
        let id = el.dom_id();
        let found = self
            .document
            .get_element_by_id(&id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if found.is_none() {
            log::debug!("#{id} not on the page");
        }
        found
    }

    fn with_element(&self, el: Element, op: &str, f: impl FnOnce(&HtmlElement) -> Result<(), JsValue>) {
        if let Some(node) = self.element(el) {
            if let Err(err) = f(&node) {
                log::warn!("{op} on #{el} failed: {err:?}");
            }
        }
    }

    fn body_overflow(&self, value: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        if let Err(err) = body.style().set_property("overflow", value) {
            log::warn!("scroll lock failed: {err:?}");
        }
    }
}

impl Surface for DomSurface {
    fn show(&mut self, el: Element) {
        self.with_element(el, "show", |node| {
            let classes = node.class_list();
            classes.remove_1(HIDDEN)?;
            classes.add_1(VISIBLE)
        });
    }

    fn hide(&mut self, el: Element) {
        self.with_element(el, "hide", |node| {
            let classes = node.class_list();
            classes.remove_1(VISIBLE)?;
            classes.add_1(HIDDEN)
        });
    }

    fn animate(&mut self, el: Element) {
        self.with_element(el, "animate", |node| node.class_list().add_1(ANIMATE));
    }

    fn settle(&mut self, el: Element) {
        self.with_element(el, "settle", |node| {
            let style = node.style();
            style.set_property("opacity", "1")?;
            style.set_property("transform", "translateY(0)")
        });
    }

    fn set_floating(&mut self, el: Element) {
        self.with_element(el, "float", |node| {
            node.style().set_property("position", "fixed")?;
            node.class_list().add_1(FLOATING)
        });
    }

    fn set_position(&mut self, el: Element, pos: Vec2) {
        self.with_element(el, "position", |node| {
            let style = node.style();
            style.set_property("left", &format!("{}px", pos.x))?;
            style.set_property("top", &format!("{}px", pos.y))
        });
    }

    fn set_offset_y(&mut self, el: Element, y: f32) {
        self.with_element(el, "offset", |node| {
            node.style().set_property("transform", &format!("translateY({y}px)"))
        });
    }

    fn set_focusable(&mut self, el: Element, focusable: bool) {
        self.with_element(el, "tabindex", |node| {
            node.set_tab_index(if focusable { 0 } else { -1 });
            Ok(())
        });
    }

    fn focus(&mut self, el: Element) {
        self.with_element(el, "focus", |node| node.focus());
    }

    fn lock_scroll(&mut self) {
        self.body_overflow("hidden");
    }

    fn unlock_scroll(&mut self) {
        self.body_overflow("");
    }

    fn scroll_by(&mut self, dy: f32) {
        let opts = ScrollToOptions::new();
        opts.set_top(dy as f64);
        opts.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_by_with_scroll_to_options(&opts);
    }

    fn stop_observing(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }

    fn viewport(&self) -> Vec2 {
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Vec2::new(read(self.window.inner_width()), read(self.window.inner_height()))
    }

    fn rect(&self, el: Element) -> Option<Rect> {
        let r = self.element(el)?.get_bounding_client_rect();
        Some(Rect::new(
            Vec2::new(r.left() as f32, r.top() as f32),
            Vec2::new(r.width() as f32, r.height() as f32),
        ))
    }
}
