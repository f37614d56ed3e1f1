use crate::api::context::{CardContext, Task};
use crate::api::types::{Element, GiftKind};
use crate::core::timer::TimerId;

/// Reveals a gift's hidden detail while hovered.
/// Touch devices have no leave event, so a touch shows it for a fixed time instead.
#[derive(Debug)]
pub struct HoverToggle {
    gift: GiftKind,
    shown: bool,
    revert: Option<TimerId>,
}

impl HoverToggle {
    pub fn new(gift: GiftKind) -> Self {
        Self {
            gift,
            shown: false,
            revert: None,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn on_enter(&mut self, ctx: &mut CardContext) {
        self.cancel_revert(ctx);
        self.set(true, ctx);
    }

    pub fn on_leave(&mut self, ctx: &mut CardContext) {
        self.cancel_revert(ctx);
        self.set(false, ctx);
    }

    /// Show, then auto-revert. A newer touch restarts the countdown.
    pub fn on_touch(&mut self, ctx: &mut CardContext) {
        self.cancel_revert(ctx);
        self.set(true, ctx);
        let delay = ctx.config.hover_revert;
        self.revert = Some(ctx.schedule(delay, Task::RevertHover(self.gift)));
    }

    /// Keyboard activation flips the detail.
    pub fn toggle(&mut self, ctx: &mut CardContext) {
        self.cancel_revert(ctx);
        let shown = !self.shown;
        self.set(shown, ctx);
    }

    /// The touch countdown ran out.
    pub fn on_revert(&mut self, ctx: &mut CardContext) {
        self.revert = None;
        self.set(false, ctx);
    }

    fn cancel_revert(&mut self, ctx: &mut CardContext) {
        if let Some(id) = self.revert.take() {
            ctx.timers.cancel(id);
        }
    }

    fn set(&mut self, shown: bool, ctx: &mut CardContext) {
        if self.shown == shown {
            return;
        }
        self.shown = shown;
        let detail = Element::GiftDetail(self.gift);
        if shown {
            ctx.surface.show(detail);
        } else {
            ctx.surface.hide(detail);
        }
    }
}
