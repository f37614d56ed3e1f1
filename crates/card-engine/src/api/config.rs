use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A delay in seconds with a separate value for reduced-motion users.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    pub normal: f32,
    pub reduced: f32,
}

impl Delay {
    pub const fn new(normal: f32, reduced: f32) -> Self {
        Self { normal, reduced }
    }

    /// Pick the value matching the current motion preference.
    #[inline]
    pub fn get(&self, reduced_motion: bool) -> f32 {
        if reduced_motion {
            self.reduced
        } else {
            self.normal
        }
    }
}

/// What the running gift does when a displacement overshoots the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeMode {
    /// Hard clamp to the padded bounds.
    #[default]
    Clamp,
    /// Legacy behaviour: mirror the overshoot back off the edge, then clamp.
    Reflect,
}

/// Tuning for the running gift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvoidanceConfig {
    /// Pointer distance (px) from the item centre that triggers a flee.
    pub trigger_radius: f32,
    /// Displacement (px) at zero distance; scales linearly to 0 at the radius.
    pub speed: f32,
    /// Gap (px) kept between the item and every viewport edge.
    pub edge_padding: f32,
    /// Fixed square footprint (px) of the item.
    pub item_size: f32,
    pub edge_mode: EdgeMode,
}

impl Default for AvoidanceConfig {
    fn default() -> Self {
        Self {
            trigger_radius: 150.0,
            speed: 120.0,
            edge_padding: 20.0,
            item_size: 100.0,
            edge_mode: EdgeMode::Clamp,
        }
    }
}

/// Every timing and tuning constant of the card. All durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Visible fraction of the surprise section that starts the intro.
    pub intro_threshold: f32,
    pub intro_delay: Delay,
    /// Confetti and hearts start this long after the intro.
    pub celebration_delay: f32,
    /// Lands the cake if its animation-end signal never arrives.
    pub intro_fallback: f32,
    pub gift_button_delay: Delay,
    /// Inter-item delay of the gift reveal.
    pub gift_stagger: Delay,
    /// Length of the page transition before the final view.
    pub final_transition: Delay,
    /// Cadence of the word-by-word final message.
    pub word_cadence: Delay,
    /// Touch auto-revert of the hover toggle.
    pub hover_revert: f32,
    pub avoidance: AvoidanceConfig,
    /// Number of parallax decoration layers on the page.
    pub decoration_count: u8,
    pub parallax_factor: f32,
    pub session_key: String,
    /// Seed for the running gift's random jumps.
    pub seed: u64,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            intro_threshold: 0.4,
            intro_delay: Delay::new(0.1, 0.0),
            celebration_delay: 0.3,
            intro_fallback: 2.5,
            gift_button_delay: Delay::new(0.8, 0.0),
            gift_stagger: Delay::new(0.15, 0.04),
            final_transition: Delay::new(1.5, 0.3),
            word_cadence: Delay::new(0.6, 0.1),
            hover_revert: 2.0,
            avoidance: AvoidanceConfig::default(),
            decoration_count: 2,
            parallax_factor: 0.1,
            session_key: "birthdayAnimationPlayed".to_string(),
            seed: 42,
        }
    }
}

/// Errors raised while loading a card configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid card config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid card config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl CardConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the systems cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.intro_threshold > 0.0 && self.intro_threshold <= 1.0) {
            return invalid("intro_threshold", "must be in (0, 1]");
        }
        if !(self.avoidance.trigger_radius > 0.0) {
            return invalid("avoidance.trigger_radius", "must be positive");
        }
        if self.avoidance.speed < 0.0 || self.avoidance.edge_padding < 0.0 || self.avoidance.item_size < 0.0 {
            return invalid("avoidance", "speed, padding and size must be non-negative");
        }
        let delays = [
            self.intro_delay,
            self.gift_button_delay,
            self.gift_stagger,
            self.final_transition,
            self.word_cadence,
        ];
        let scalars = [self.celebration_delay, self.intro_fallback, self.hover_revert];
        let negative = delays.iter().any(|d| d.normal < 0.0 || d.reduced < 0.0) || scalars.iter().any(|&s| s < 0.0);
        if negative {
            return invalid("delays", "must be non-negative");
        }
        if self.session_key.is_empty() {
            return invalid("session_key", "must not be empty");
        }
        Ok(())
    }
}
