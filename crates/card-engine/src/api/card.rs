use glam::Vec2;

use crate::api::config::CardConfig;
use crate::api::context::{CardContext, Task};
use crate::api::store::SessionStore;
use crate::api::surface::Surface;
use crate::api::types::{Element, GiftBehavior, GiftKind, GiftState, ModalKind, Stage};
use crate::input::queue::{InputEvent, InputQueue, Key};
use crate::systems::avoidance::Avoidance;
use crate::systems::hover::HoverToggle;
use crate::systems::modal::ModalManager;
use crate::systems::parallax::Parallax;
use crate::systems::sequencer::Sequencer;

/// The whole card: context, systems and pending input.
///
/// The host pushes input as it arrives and calls [`Card::tick`] once per frame.
/// A tick drains input in arrival order, then fires every due timer.
pub struct Card {
    ctx: CardContext,
    sequencer: Sequencer,
    modals: ModalManager,
    running_gift: Avoidance,
    phone: HoverToggle,
    parallax: Parallax,
    input: InputQueue,
    initialized: bool,
}

impl Card {
    pub fn new(config: CardConfig, surface: impl Surface + 'static, session: impl SessionStore + 'static) -> Self {
        let running_gift = Avoidance::new(Element::Gift(GiftKind::Tickets), config.seed);
        let parallax = Parallax::new(config.decoration_count, config.parallax_factor);
        Self {
            ctx: CardContext::new(config, Box::new(surface), Box::new(session)),
            sequencer: Sequencer::new(),
            modals: ModalManager::new(),
            running_gift,
            phone: HoverToggle::new(GiftKind::Phone),
            parallax,
            input: InputQueue::new(),
            initialized: false,
        }
    }

    /// Read the starting motion preference and apply the session shortcut. Call once.
    pub fn init(&mut self, reduced_motion: bool) {
        if self.initialized {
            return;
        }
        self.ctx.reduced_motion = reduced_motion;
        self.sequencer.init(&mut self.ctx);
        self.initialized = true;
        log::info!(
            "card initialized in {:?} (reduced motion: {reduced_motion})",
            self.sequencer.stage()
        );
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Advance the clock by `dt` seconds, handle queued input, fire due timers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        let now = self.ctx.clock.advance(dt);

        for event in self.input.drain() {
            self.handle(event);
        }

        while let Some(task) = self.ctx.timers.pop_due(now) {
            self.fire(task);
        }
    }

    pub fn stage(&self) -> Stage {
        self.sequencer.stage()
    }

    pub fn now(&self) -> f32 {
        self.ctx.now()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn modals(&self) -> &ModalManager {
        &self.modals
    }

    pub fn running_gift(&self) -> &Avoidance {
        &self.running_gift
    }

    pub fn reduced_motion(&self) -> bool {
        self.ctx.reduced_motion
    }

    fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::Intersect { ratio } => self.sequencer.on_intersect(ratio, &mut self.ctx),
            InputEvent::AnimationEnd { target: Element::Cake } => self.sequencer.on_intro_complete(&mut self.ctx),
            InputEvent::AnimationEnd { .. } => {}
            InputEvent::PointerEnter { target: Element::Gift(GiftKind::Phone) } => {
                if self.gift_revealed(GiftKind::Phone) {
                    self.sequencer.mark_interacted(GiftKind::Phone);
                    self.phone.on_enter(&mut self.ctx);
                }
            }
            InputEvent::PointerLeave { target: Element::Gift(GiftKind::Phone) } => {
                if self.gift_revealed(GiftKind::Phone) {
                    self.phone.on_leave(&mut self.ctx);
                }
            }
            InputEvent::PointerEnter { .. } | InputEvent::PointerLeave { .. } => {}
            InputEvent::PointerMove { x, y } => {
                if self.running_gift_live() {
                    let cfg = &self.ctx.config.avoidance;
                    if self.running_gift.on_pointer_move(Vec2::new(x, y), &mut *self.ctx.surface, cfg) {
                        self.sequencer.mark_interacted(GiftKind::Tickets);
                    }
                }
            }
            InputEvent::TouchStart { x, y, target } => self.on_touch(Vec2::new(x, y), target),
            InputEvent::Click { target } => self.activate(target, false),
            InputEvent::KeyDown { key: Key::Escape, .. } => {
                self.modals.close_top(&mut *self.ctx.surface);
            }
            InputEvent::KeyDown { key, target: Some(target) } if key.activates() => self.activate(target, true),
            InputEvent::KeyDown { .. } => {}
            InputEvent::Scroll { y } => {
                if !self.ctx.reduced_motion {
                    self.parallax.on_scroll(y, &mut *self.ctx.surface);
                }
            }
            InputEvent::MotionPreference { reduced } => self.set_reduced_motion(reduced),
        }
    }

    fn on_touch(&mut self, point: Vec2, target: Option<Element>) {
        if target == Some(Element::Gift(GiftKind::Phone)) && self.gift_revealed(GiftKind::Phone) {
            self.sequencer.mark_interacted(GiftKind::Phone);
            self.phone.on_touch(&mut self.ctx);
        }
        if self.running_gift_live() {
            let on_item = target == Some(self.running_gift.target());
            let cfg = &self.ctx.config.avoidance;
            if self.running_gift.on_touch(point, on_item, &mut *self.ctx.surface, cfg) {
                self.sequencer.mark_interacted(GiftKind::Tickets);
            }
        }
    }

    /// Click, or Enter/Space on the focused element.
    fn activate(&mut self, target: Element, keyboard: bool) {
        match target {
            Element::GiftButton => {
                let stage = self.stage();
                if stage < Stage::GiftButtonVisible || stage >= Stage::FinalTriggered {
                    log::debug!("gift button not available in {stage:?}");
                    return;
                }
                self.modals.open(ModalKind::Gifts, Some(Element::GiftButton), &mut *self.ctx.surface);
                self.sequencer.on_gifts_modal_open(&mut self.ctx);
            }
            Element::Gift(kind) => self.activate_gift(kind, keyboard),
            Element::ModalClose(kind) => {
                self.modals.close(kind, &mut *self.ctx.surface);
            }
            Element::FinalButton => {
                if self.stage() != Stage::FinalShown {
                    return;
                }
                self.modals.open(ModalKind::FinalMessage, Some(Element::FinalButton), &mut *self.ctx.surface);
                self.sequencer.on_final_modal_open(&mut self.ctx);
            }
            Element::ScrollHint => {
                let height = self.ctx.surface.viewport().y;
                self.ctx.surface.scroll_by(height);
            }
            other => log::debug!("no action bound to {other}"),
        }
    }

    fn activate_gift(&mut self, kind: GiftKind, keyboard: bool) {
        if !self.sequencer.mark_interacted(kind) {
            log::debug!("{} is still hidden", Element::Gift(kind));
            return;
        }
        match kind.behavior() {
            GiftBehavior::HoverToggle if keyboard => self.phone.toggle(&mut self.ctx),
            GiftBehavior::HoverToggle => self.phone.on_enter(&mut self.ctx),
            GiftBehavior::Avoid => {
                let cfg = &self.ctx.config.avoidance;
                self.running_gift.on_direct(&mut *self.ctx.surface, cfg);
            }
            GiftBehavior::SecondaryModal => {
                self.modals.open(ModalKind::YarnConfirm, Some(Element::Gift(kind)), &mut *self.ctx.surface);
            }
            GiftBehavior::FinalSequence => {
                self.sequencer.on_other_gift_chosen(&mut self.ctx, &mut self.modals);
            }
        }
    }

    fn set_reduced_motion(&mut self, reduced: bool) {
        if self.ctx.reduced_motion == reduced {
            return;
        }
        self.ctx.reduced_motion = reduced;
        log::info!("reduced motion {}", if reduced { "on" } else { "off" });
        if reduced {
            self.parallax.reset(&mut *self.ctx.surface);
            self.sequencer.fast_forward(&mut self.ctx);
        }
    }

    fn gift_revealed(&self, kind: GiftKind) -> bool {
        self.sequencer.gift_state(kind) != GiftState::Hidden
    }

    /// The running gift only reacts while it is on screen: revealed, inside the
    /// open gift modal, before the final sequence takes over the page.
    fn running_gift_live(&self) -> bool {
        self.gift_revealed(GiftKind::Tickets)
            && self.modals.is_open(ModalKind::Gifts)
            && self.stage() < Stage::FinalTriggered
    }

    fn fire(&mut self, task: Task) {
        match task {
            Task::RevertHover(GiftKind::Phone) => self.phone.on_revert(&mut self.ctx),
            Task::RevertHover(_) => {}
            other => self.sequencer.run(other, &mut self.ctx),
        }
    }
}
