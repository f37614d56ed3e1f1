use crate::api::config::{CardConfig, Delay};
use crate::api::store::SessionStore;
use crate::api::surface::Surface;
use crate::api::types::GiftKind;
use crate::core::time::Clock;
use crate::core::timer::{TimerId, TimerQueue};

/// Deferred work scheduled by the systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    StartIntro,
    Celebrate,
    /// Lands the cake if the animation-end signal never came.
    IntroFallback,
    ShowGiftButton,
    RevealGift(GiftKind),
    ShowFinalView,
    RevealWord(u8),
    RevealGiftName,
    RevealOptions,
    /// Touch auto-revert of a hover toggle.
    RevertHover(GiftKind),
}

/// Mutable access to everything outside the systems' own state,
/// passed to every system operation.
pub struct CardContext {
    pub surface: Box<dyn Surface>,
    pub session: Box<dyn SessionStore>,
    pub timers: TimerQueue<Task>,
    pub clock: Clock,
    pub config: CardConfig,
    pub reduced_motion: bool,
}

impl CardContext {
    pub fn new(config: CardConfig, surface: Box<dyn Surface>, session: Box<dyn SessionStore>) -> Self {
        Self {
            surface,
            session,
            timers: TimerQueue::new(),
            clock: Clock::new(),
            config,
            reduced_motion: false,
        }
    }

    pub fn now(&self) -> f32 {
        self.clock.now()
    }

    /// Schedule a task `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, task: Task) -> TimerId {
        self.timers.schedule(self.clock.now(), delay, task)
    }

    /// Resolve a delay against the current motion preference.
    pub fn delay(&self, delay: Delay) -> f32 {
        delay.get(self.reduced_motion)
    }
}
