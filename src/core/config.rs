//! Game configuration.
//!
//! Defaults reproduce the standard ruleset. Everything can be overridden
//! with the `with_*` builders or loaded from TOML:
//!
//! ```
//! use monopoly_bench::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("player_count = 3\nmax_rounds = 50").unwrap();
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.starting_cash, 1500);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Rules and limits for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of seats (2-8).
    pub player_count: usize,

    /// Cash each player starts with.
    pub starting_cash: i64,

    /// Credit for passing or landing on Go.
    pub pass_go_amount: i64,

    /// Cost of leaving jail by paying.
    pub jail_fine: i64,

    /// Rounds played before the game is scored on net worth.
    pub max_rounds: u32,

    /// Houses in the bank at game start.
    pub house_supply: u32,

    /// Hotels in the bank at game start.
    pub hotel_supply: u32,

    /// Decision requests per choice before the engine picks a default.
    pub max_decision_attempts: u32,

    /// Seed for dice and deck shuffles.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_cash: 1500,
            pass_go_amount: 200,
            jail_fine: 50,
            max_rounds: 100,
            house_supply: 32,
            hotel_supply: 12,
            max_decision_attempts: 5,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create a config with the standard ruleset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check the limits the engine relies on.
    pub fn validate(&self) -> Result<()> {
        if !(2..=8).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player_count must be 2-8, got {}",
                self.player_count
            )));
        }
        if self.max_decision_attempts == 0 {
            return Err(EngineError::InvalidConfig(
                "max_decision_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Set the number of players.
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set starting cash.
    pub fn with_starting_cash(mut self, cash: i64) -> Self {
        self.starting_cash = cash;
        self
    }

    /// Set the round limit.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of decision attempts before defaulting.
    pub fn with_max_decision_attempts(mut self, attempts: u32) -> Self {
        self.max_decision_attempts = attempts;
        self
    }

    /// Set the bank's house and hotel supply.
    pub fn with_supply(mut self, houses: u32, hotels: u32) -> Self {
        self.house_supply = houses;
        self.hotel_supply = hotels;
        self
    }
}
