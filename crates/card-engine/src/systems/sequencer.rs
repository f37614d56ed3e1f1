//! Interaction sequencer: the one-way chain of reveal stages.
//!
//! ```text
//! scroll ─► intro ─► cake landed ─► gift button ─► gift modal ─► gifts revealed
//!                                                      │
//!                               "other" gift chosen ◄──┘
//!                                        │
//!                 page transition ─► final view ─► final modal ─► word-by-word reveal
//! ```
//!
//! Every transition is a guarded, idempotent step that only moves forward.
//! Deferred steps go through the cancellable timer queue, but the guards stay:
//! a timer that fires after its stage was already reached is a no-op.

use crate::api::context::{CardContext, Task};
use crate::api::store::{intro_played, mark_intro_played};
use crate::api::types::{Element, GiftKind, GiftState, Stage, FINAL_WORDS};
use crate::core::timer::TimerId;
use super::modal::ModalManager;

#[derive(Debug, Default)]
pub struct Sequencer {
    stage: Stage,
    /// Set once the intro was scheduled or skipped; further intersections are ignored.
    intro_scheduled: bool,
    intro_timer: Option<TimerId>,
    fallback: Option<TimerId>,
    gifts: [GiftState; 4],
    gifts_reveal_started: bool,
    /// Timers reduced motion may fast-forward.
    pending: Vec<(TimerId, Task)>,
    history: Vec<(Stage, f32)>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Every stage reached so far, with the session time it was reached at.
    pub fn history(&self) -> &[(Stage, f32)] {
        &self.history
    }

    pub fn reached_at(&self, stage: Stage) -> Option<f32> {
        self.history.iter().find(|(s, _)| *s == stage).map(|(_, t)| *t)
    }

    pub fn gift_state(&self, kind: GiftKind) -> GiftState {
        self.gifts[kind.index()]
    }

    /// Record an interaction with a revealed gift. Hidden gifts can't be interacted with.
    pub fn mark_interacted(&mut self, kind: GiftKind) -> bool {
        let state = &mut self.gifts[kind.index()];
        if *state == GiftState::Hidden {
            return false;
        }
        *state = GiftState::Interacted;
        true
    }

    fn advance(&mut self, to: Stage, now: f32) -> bool {
        if to <= self.stage {
            return false;
        }
        log::debug!("stage {:?} -> {:?} at {:.3}s", self.stage, to, now);
        self.stage = to;
        self.history.push((to, now));
        true
    }

    /// Apply the session shortcut or the reduced-motion start, if either applies.
    pub fn init(&mut self, ctx: &mut CardContext) {
        if intro_played(&*ctx.session, &ctx.config.session_key) {
            log::info!("intro already played this session, showing final state");
            ctx.surface.stop_observing();
            self.land(ctx, true, false);
            self.on_gift_button_shown(ctx);
        } else if ctx.reduced_motion {
            self.skip_intro(ctx);
        }
    }

    /// The surprise section's visible fraction changed.
    pub fn on_intersect(&mut self, ratio: f32, ctx: &mut CardContext) {
        if ratio < ctx.config.intro_threshold || self.intro_scheduled || self.stage != Stage::Idle {
            return;
        }
        self.intro_scheduled = true;
        let delay = ctx.delay(ctx.config.intro_delay);
        self.intro_timer = Some(ctx.schedule(delay, Task::StartIntro));
        ctx.surface.stop_observing();
        log::debug!("surprise section {:.0}% visible, intro in {delay:.2}s", ratio * 100.0);
    }

    fn start_intro(&mut self, ctx: &mut CardContext) {
        self.intro_timer = None;
        if self.stage != Stage::Idle {
            return;
        }
        if ctx.reduced_motion {
            self.skip_intro(ctx);
            return;
        }
        self.advance(Stage::Revealing, ctx.now());
        ctx.surface.animate(Element::Cake);
        ctx.surface.animate(Element::GiftText);
        let celebration = ctx.config.celebration_delay;
        ctx.schedule(celebration, Task::Celebrate);
        let fallback = ctx.config.intro_fallback;
        self.fallback = Some(ctx.schedule(fallback, Task::IntroFallback));
    }

    fn celebrate(&mut self, ctx: &mut CardContext) {
        if ctx.reduced_motion {
            return;
        }
        ctx.surface.animate(Element::Confetti);
        ctx.surface.animate(Element::Hearts);
    }

    /// The cake finished its entrance animation.
    pub fn on_intro_complete(&mut self, ctx: &mut CardContext) {
        self.complete_intro(ctx, false);
    }

    fn complete_intro(&mut self, ctx: &mut CardContext, settle: bool) {
        if self.stage != Stage::Revealing {
            log::debug!("intro completion ignored in {:?}", self.stage);
            return;
        }
        if self.land(ctx, settle, true) {
            self.schedule_gift_button(ctx);
        }
    }

    /// Jump straight to a landed cake without animating.
    fn skip_intro(&mut self, ctx: &mut CardContext) {
        if self.stage >= Stage::CakeLanded {
            return;
        }
        ctx.surface.stop_observing();
        if self.land(ctx, true, true) {
            self.schedule_gift_button(ctx);
        }
    }

    fn land(&mut self, ctx: &mut CardContext, settle: bool, persist: bool) -> bool {
        if self.stage >= Stage::CakeLanded {
            return false;
        }
        self.intro_scheduled = true;
        for id in [self.intro_timer.take(), self.fallback.take()].into_iter().flatten() {
            ctx.timers.cancel(id);
        }
        if settle {
            ctx.surface.settle(Element::Cake);
            ctx.surface.settle(Element::GiftText);
        }
        self.advance(Stage::CakeLanded, ctx.now());
        if persist {
            mark_intro_played(&mut *ctx.session, &ctx.config.session_key);
        }
        log::info!("cake landed");
        true
    }

    fn schedule_gift_button(&mut self, ctx: &mut CardContext) {
        let delay = ctx.delay(ctx.config.gift_button_delay);
        let id = ctx.schedule(delay, Task::ShowGiftButton);
        self.pending.push((id, Task::ShowGiftButton));
    }

    /// Expose the gift-selection entry point. Only valid once the cake has landed.
    pub fn on_gift_button_shown(&mut self, ctx: &mut CardContext) {
        if self.stage != Stage::CakeLanded {
            if self.stage < Stage::CakeLanded {
                log::debug!("gift button held back, cake not landed");
            }
            return;
        }
        ctx.surface.show(Element::GiftButton);
        ctx.surface.set_focusable(Element::GiftButton, true);
        self.advance(Stage::GiftButtonVisible, ctx.now());
    }

    /// The gift modal opened. The first call starts the staggered reveal;
    /// returns whether it did.
    pub fn on_gifts_modal_open(&mut self, ctx: &mut CardContext) -> bool {
        if self.stage < Stage::GiftButtonVisible || self.gifts_reveal_started {
            return false;
        }
        self.gifts_reveal_started = true;
        let stagger = ctx.delay(ctx.config.gift_stagger);
        for (i, kind) in GiftKind::ALL.into_iter().enumerate() {
            let task = Task::RevealGift(kind);
            let id = ctx.schedule(stagger * (i + 1) as f32, task);
            self.pending.push((id, task));
        }
        self.advance(Stage::GiftsRevealed, ctx.now());
        true
    }

    fn reveal_gift(&mut self, kind: GiftKind, ctx: &mut CardContext) {
        let state = &mut self.gifts[kind.index()];
        if *state != GiftState::Hidden {
            return;
        }
        *state = GiftState::Revealed;
        ctx.surface.show(Element::Gift(kind));
        ctx.surface.set_focusable(Element::Gift(kind), true);
    }

    /// Start the final sequence. One-shot; returns whether this call started it.
    pub fn on_other_gift_chosen(&mut self, ctx: &mut CardContext, modals: &mut ModalManager) -> bool {
        if self.stage < Stage::GiftsRevealed || self.stage >= Stage::FinalTriggered {
            return false;
        }
        modals.close_all(&mut *ctx.surface);
        ctx.surface.animate(Element::PageTransition);
        self.advance(Stage::FinalTriggered, ctx.now());
        let delay = ctx.delay(ctx.config.final_transition);
        let id = ctx.schedule(delay, Task::ShowFinalView);
        self.pending.push((id, Task::ShowFinalView));
        log::info!("final sequence started");
        true
    }

    fn show_final_view(&mut self, ctx: &mut CardContext) {
        if self.stage != Stage::FinalTriggered {
            return;
        }
        ctx.surface.hide(Element::MainContent);
        ctx.surface.show(Element::FinalView);
        ctx.surface.set_focusable(Element::FinalButton, true);
        self.advance(Stage::FinalShown, ctx.now());
    }

    /// The final-message modal opened: restart the word-by-word reveal from scratch.
    pub fn on_final_modal_open(&mut self, ctx: &mut CardContext) -> bool {
        if self.stage < Stage::FinalShown {
            return false;
        }
        self.pending.retain(|&(id, task)| {
            if is_word_step(task) {
                ctx.timers.cancel(id);
                false
            } else {
                true
            }
        });

        for i in 0..FINAL_WORDS {
            ctx.surface.hide(Element::Word(i));
        }
        ctx.surface.hide(Element::GiftName);
        ctx.surface.hide(Element::OptionCards);

        let cadence = ctx.delay(ctx.config.word_cadence);
        let steps = (0..FINAL_WORDS)
            .map(Task::RevealWord)
            .chain([Task::RevealGiftName, Task::RevealOptions]);
        for (i, task) in steps.enumerate() {
            let id = ctx.schedule(cadence * (i + 1) as f32, task);
            self.pending.push((id, task));
        }
        true
    }

    /// Reduced motion switched on: land the intro and finish whatever is still animating.
    pub fn fast_forward(&mut self, ctx: &mut CardContext) {
        let pending = std::mem::take(&mut self.pending);
        if self.stage < Stage::CakeLanded {
            self.skip_intro(ctx);
        }
        for (id, task) in pending {
            if !ctx.timers.cancel(id) {
                continue;
            }
            match task {
                // Keep the button behind the landing by at least the reduced delay.
                Task::ShowGiftButton => {
                    let landed = self.reached_at(Stage::CakeLanded).unwrap_or(ctx.now());
                    let due = landed + ctx.delay(ctx.config.gift_button_delay);
                    let id = ctx.schedule(due - ctx.now(), task);
                    self.pending.push((id, task));
                }
                _ => self.run(task, ctx),
            }
        }
    }

    /// Execute a fired timer.
    pub fn run(&mut self, task: Task, ctx: &mut CardContext) {
        self.pending.retain(|(id, _)| ctx.timers.is_pending(*id));
        match task {
            Task::StartIntro => self.start_intro(ctx),
            Task::Celebrate => self.celebrate(ctx),
            Task::IntroFallback => {
                self.fallback = None;
                if self.stage == Stage::Revealing {
                    log::info!("no animation-end signal from the cake, landing by timeout");
                }
                self.complete_intro(ctx, true);
            }
            Task::ShowGiftButton => self.on_gift_button_shown(ctx),
            Task::RevealGift(kind) => self.reveal_gift(kind, ctx),
            Task::ShowFinalView => self.show_final_view(ctx),
            Task::RevealWord(i) => ctx.surface.show(Element::Word(i)),
            Task::RevealGiftName => ctx.surface.show(Element::GiftName),
            Task::RevealOptions => ctx.surface.show(Element::OptionCards),
            Task::RevertHover(_) => {}
        }
    }
}

fn is_word_step(task: Task) -> bool {
    matches!(task, Task::RevealWord(_) | Task::RevealGiftName | Task::RevealOptions)
}
