//! Modal overlays and the page scroll lock.
//!
//! Scroll is locked exactly while at least one overlay is open. Closing an
//! overlay hands focus back to the control that opened it. Escape closes by a
//! fixed priority, not by opening order: the final message always wins.

use crate::api::surface::Surface;
use crate::api::types::{Element, ModalKind};

/// Most overlays that can be open together (gift modal + yarn confirm).
pub const MAX_OPEN: usize = 2;

#[derive(Debug, Default)]
pub struct ModalManager {
    /// Open overlays with the element that opened each.
    open: Vec<(ModalKind, Option<Element>)>,
}

impl ModalManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an overlay. Returns false if it was already open.
    pub fn open(&mut self, kind: ModalKind, opener: Option<Element>, surface: &mut dyn Surface) -> bool {
        if let Some(entry) = self.open.iter_mut().find(|(k, _)| *k == kind) {
            if opener.is_some() {
                entry.1 = opener;
            }
            return false;
        }

        // The final message preempts everything underneath it.
        if kind == ModalKind::FinalMessage {
            self.close_all(surface);
        }

        if self.open.is_empty() {
            surface.lock_scroll();
        }
        self.open.push((kind, opener));
        surface.show(Element::Modal(kind));
        surface.focus(Element::ModalClose(kind));
        debug_assert!(self.open.len() <= MAX_OPEN);
        log::debug!("modal {kind:?} opened ({} open)", self.open.len());
        true
    }

    /// Close an overlay. Returns false if it was not open.
    pub fn close(&mut self, kind: ModalKind, surface: &mut dyn Surface) -> bool {
        let Some(idx) = self.open.iter().position(|(k, _)| *k == kind) else {
            return false;
        };
        let (_, opener) = self.open.remove(idx);
        surface.hide(Element::Modal(kind));
        if self.open.is_empty() {
            surface.unlock_scroll();
        }
        if let Some(opener) = opener {
            surface.focus(opener);
        }
        log::debug!("modal {kind:?} closed ({} open)", self.open.len());
        true
    }

    /// Close the highest-priority open overlay (Escape).
    pub fn close_top(&mut self, surface: &mut dyn Surface) -> Option<ModalKind> {
        let top = ModalKind::PRIORITY.into_iter().find(|k| self.is_open(*k))?;
        self.close(top, surface);
        Some(top)
    }

    pub fn close_all(&mut self, surface: &mut dyn Surface) {
        while self.close_top(surface).is_some() {}
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        self.open.iter().any(|(k, _)| *k == kind)
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
