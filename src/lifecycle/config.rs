//! Runtime configuration.
//!
//! Defaults cover a normal game. Every field can be overridden from the environment:
//!
//! | Field | Variable | Default |
//! |---|---|---|
//! | `mailbox_capacity` | `SUSHI_MAILBOX_CAPACITY` | 32 |
//! | `starting_stars` | `SUSHI_STARTING_STARS` | 5 |
//! | `points_per_pass` | `SUSHI_POINTS_PER_PASS` | 10 |
//! | `ticket_seed` | `SUSHI_TICKET_SEED` | unset |

use crate::room_actor::RoomRules;
use crate::session::DEFAULT_STARS;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;
pub const DEFAULT_POINTS_PER_PASS: i64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid value: {value:?}")]
    Unparsable { var: &'static str, value: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Capacity of each actor's mailbox.
    pub mailbox_capacity: usize,
    /// Stars shown before the first score update, and the loopback coordinator's lives.
    pub starting_stars: u32,
    pub points_per_pass: i64,
    /// Makes the loopback coordinator's tickets reproducible.
    pub ticket_seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            starting_stars: DEFAULT_STARS,
            points_per_pass: DEFAULT_POINTS_PER_PASS,
            ticket_seed: None,
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by the `SUSHI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            mailbox_capacity: parse_var(&lookup, "SUSHI_MAILBOX_CAPACITY")?
                .unwrap_or(defaults.mailbox_capacity),
            starting_stars: parse_var(&lookup, "SUSHI_STARTING_STARS")?
                .unwrap_or(defaults.starting_stars),
            points_per_pass: parse_var(&lookup, "SUSHI_POINTS_PER_PASS")?
                .unwrap_or(defaults.points_per_pass),
            ticket_seed: parse_var(&lookup, "SUSHI_TICKET_SEED")?.or(defaults.ticket_seed),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    pub fn with_starting_stars(mut self, stars: u32) -> Self {
        self.starting_stars = stars;
        self
    }

    pub fn with_points_per_pass(mut self, points: i64) -> Self {
        self.points_per_pass = points;
        self
    }

    pub fn with_ticket_seed(mut self, seed: u64) -> Self {
        self.ticket_seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// - `mailbox_capacity >= 1`
    /// - `starting_stars >= 1` (a match with no stars is over before it starts)
    /// - `points_per_pass >= 0`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::InvalidConfig {
                reason: "mailbox_capacity must be >= 1".to_string(),
            });
        }
        if self.starting_stars == 0 {
            return Err(ConfigError::InvalidConfig {
                reason: "starting_stars must be >= 1".to_string(),
            });
        }
        if self.points_per_pass < 0 {
            return Err(ConfigError::InvalidConfig {
                reason: format!("points_per_pass must be >= 0, got {}", self.points_per_pass),
            });
        }
        Ok(())
    }

    /// Scoring rules handed to every loopback room.
    pub fn room_rules(&self) -> RoomRules {
        RoomRules {
            starting_stars: self.starting_stars,
            points_per_pass: self.points_per_pass,
            seed: self.ticket_seed,
        }
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Unparsable { var, value }),
    }
}
