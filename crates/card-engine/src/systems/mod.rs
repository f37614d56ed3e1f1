pub mod avoidance;
pub mod hover;
pub mod modal;
pub mod parallax;
pub mod rng;
pub mod sequencer;
