//! Running games and series of games.
//!
//! A series seats its entrants in rotation: in game `g`, seat `s` goes to
//! entrant `(s + g) % n`, so over `n` games everyone plays every seat once.
//! Each game gets its own seed, `base_seed + g`, and fresh providers.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::agents::DecisionProvider;
use crate::core::{GameConfig, Result};
use crate::rules::Engine;

use super::log::ResultLog;
use super::record::GameRecord;

/// Builds a fresh provider for one game, given that game's seed.
pub type EntrantFactory = Box<dyn FnMut(u64) -> Box<dyn DecisionProvider>>;

/// Play one game to completion and record it.
pub fn run_game(
    config: GameConfig,
    providers: Vec<Box<dyn DecisionProvider>>,
    game: u32,
    entrants: &[usize],
) -> Result<GameRecord> {
    let started = Instant::now();
    let mut engine = Engine::new(config, providers)?;
    engine.run()?;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    Ok(GameRecord::capture(&engine, game, entrants, duration_ms))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub games: u32,
    /// Per-game settings; `player_count` must match the entrant count.
    pub game: GameConfig,
    /// Rotate seats between games.
    pub rotate_seats: bool,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            game: GameConfig::default(),
            rotate_seats: true,
        }
    }
}

impl SeriesConfig {
    pub fn with_games(mut self, games: u32) -> Self {
        self.games = games;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    pub fn with_rotate_seats(mut self, rotate: bool) -> Self {
        self.rotate_seats = rotate;
        self
    }
}

/// Wins and mean net worth per entrant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub games: u32,
    pub wins: Vec<u32>,
    pub mean_net_worth: Vec<f64>,
    pub defaulted_moves: Vec<u32>,
}

impl SeriesSummary {
    #[must_use]
    pub fn from_records(entrants: usize, records: &[GameRecord]) -> Self {
        let mut wins = vec![0; entrants];
        let mut worth = vec![0i64; entrants];
        let mut defaulted = vec![0; entrants];

        for record in records {
            if let Some(entrant) = record.winning_entrant().filter(|&e| e < entrants) {
                wins[entrant] += 1;
            }
            for player in record.players.iter().filter(|p| p.entrant < entrants) {
                worth[player.entrant] += player.net_worth;
                defaulted[player.entrant] += player.stats.defaulted_move;
            }
        }

        let games = records.len().max(1) as f64;
        Self {
            games: records.len() as u32,
            wins,
            mean_net_worth: worth.into_iter().map(|w| w as f64 / games).collect(),
            defaulted_moves: defaulted,
        }
    }
}

pub struct Series {
    config: SeriesConfig,
    entrants: Vec<EntrantFactory>,
    log: Option<ResultLog>,
}

impl Series {
    pub fn new(config: SeriesConfig) -> Self {
        Self {
            config,
            entrants: Vec::new(),
            log: None,
        }
    }

    /// Add an entrant. Entrants are indexed in the order added.
    #[must_use]
    pub fn entrant(mut self, factory: impl FnMut(u64) -> Box<dyn DecisionProvider> + 'static) -> Self {
        self.entrants.push(Box::new(factory));
        self
    }

    /// Append every finished game to `log`.
    #[must_use]
    pub fn with_log(mut self, log: ResultLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Entrant index for each seat in game `game`.
    #[must_use]
    pub fn seating(&self, game: u32) -> Vec<usize> {
        let n = self.entrants.len();
        let shift = if self.config.rotate_seats { game as usize } else { 0 };
        (0..n).map(|seat| (seat + shift) % n).collect()
    }

    /// Play every game in order.
    pub fn run(&mut self) -> Result<Vec<GameRecord>> {
        let base = self.config.game.clone().with_player_count(self.entrants.len());
        base.validate()?;

        let mut records = Vec::with_capacity(self.config.games as usize);
        for game in 0..self.config.games {
            let seed = base.seed.wrapping_add(u64::from(game));
            let seating = self.seating(game);
            let providers = seating.iter().map(|&e| (self.entrants[e])(seed)).collect();

            let record = run_game(base.clone().with_seed(seed), providers, game, &seating)?;
            tracing::info!(
                game,
                seed,
                winner = %record.winner,
                rounds = record.rounds,
                duration_ms = record.duration_ms,
                "series game finished"
            );
            if let Some(log) = &self.log {
                log.append(&record)?;
            }
            records.push(record);
        }
        Ok(records)
    }

    #[must_use]
    pub fn summarize(&self, records: &[GameRecord]) -> SeriesSummary {
        SeriesSummary::from_records(self.entrants.len(), records)
    }
}
