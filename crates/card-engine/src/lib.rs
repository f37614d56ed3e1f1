pub mod api;
pub mod core;
pub mod systems;
pub mod input;

#[cfg(test)]
mod testing;

// Re-export key types at crate root for convenience
pub use api::card::Card;
pub use api::config::{AvoidanceConfig, CardConfig, ConfigError, Delay, EdgeMode};
pub use api::context::{CardContext, Task};
pub use api::store::{MemoryStore, SessionStore, StoreError};
pub use api::surface::{Rect, Surface};
pub use api::types::{Element, GiftBehavior, GiftKind, GiftState, ModalKind, Stage, FINAL_WORDS};
pub use core::time::Clock;
pub use core::timer::{TimerId, TimerQueue};
pub use input::queue::{InputEvent, InputQueue, Key};
pub use systems::avoidance::Avoidance;
pub use systems::hover::HoverToggle;
pub use systems::modal::ModalManager;
pub use systems::parallax::Parallax;
pub use systems::sequencer::Sequencer;
