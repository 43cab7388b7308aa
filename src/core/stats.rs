//! Per-player counters collected over a game.

use serde::{Deserialize, Serialize};

/// What one player did during a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub properties_bought: u32,
    pub mortgages: u32,
    pub unmortgages: u32,
    pub houses_built: u32,
    pub houses_sold: u32,
    pub rent_paid: i64,
    pub rent_received: i64,
    /// Decisions applied, jail choices included.
    pub actions_taken: u32,
    /// Replies that were not a JSON object with an integer `selection`.
    pub invalid_json: u32,
    /// Well-formed replies whose index was out of range.
    pub invalid_move: u32,
    /// Choices the engine made after the provider ran out of attempts.
    pub defaulted_move: u32,
}

impl PlayerStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rent received minus rent paid.
    #[must_use]
    pub fn net_rent(&self) -> i64 {
        self.rent_received - self.rent_paid
    }

    /// Share of applied decisions that were engine defaults.
    #[must_use]
    pub fn default_rate(&self) -> f64 {
        if self.actions_taken == 0 {
            0.0
        } else {
            self.defaulted_move as f64 / self.actions_taken as f64
        }
    }
}
