//! Serializable game outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerStats};
use crate::rules::{net_worth, Engine, GameEnd};

/// One seat's end-of-game numbers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub seat: PlayerId,
    /// Provider name, e.g. "baseline" or a model name.
    pub provider: String,
    /// Which series entrant sat here.
    pub entrant: usize,
    pub net_worth: i64,
    pub cash: i64,
    pub bankrupt: bool,
    pub stats: PlayerStats,
}

/// A finished game, as written to the result log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position in the series.
    pub game: u32,
    pub seed: u64,
    pub rounds: u32,
    pub winner: PlayerId,
    pub winning_net_worth: i64,
    pub bankrupt: Option<PlayerId>,
    pub players: Vec<PlayerRecord>,
    pub duration_ms: u64,
}

impl GameRecord {
    /// Snapshot a finished engine. `entrants[seat]` names who sat where.
    #[must_use]
    pub fn capture(engine: &Engine, game: u32, entrants: &[usize], duration_ms: u64) -> Self {
        let result = engine.result();
        let state = engine.game();

        let players = state
            .players
            .iter()
            .map(|(seat, player)| PlayerRecord {
                seat,
                provider: engine.provider_name(seat).to_string(),
                entrant: entrants.get(seat.index()).copied().unwrap_or(seat.index()),
                net_worth: net_worth(state, seat),
                cash: player.cash,
                bankrupt: player.bankrupt,
                stats: state.stats[seat].clone(),
            })
            .collect();

        Self {
            game,
            seed: state.config().seed,
            rounds: result.rounds,
            winner: result.winner,
            winning_net_worth: result.winning_net_worth,
            bankrupt: match result.end {
                GameEnd::Bankruptcy(player) => Some(player),
                GameEnd::RoundLimit => None,
            },
            players,
            duration_ms,
        }
    }

    /// The winning seat's record.
    #[must_use]
    pub fn winner_record(&self) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.seat == self.winner)
    }

    /// Entrant index of the winner.
    #[must_use]
    pub fn winning_entrant(&self) -> Option<usize> {
        self.winner_record().map(|p| p.entrant)
    }
}
