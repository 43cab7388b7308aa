//! Game-level harness: run games, rotate seats, log results.
//!
//! ## Key Types
//!
//! - `GameRecord`: one finished game with per-seat numbers
//! - `Series`: N games between the same entrants, seats rotated
//! - `ResultLog`: append-only JSON-lines file of `GameRecord`s

pub mod log;
pub mod record;
pub mod series;

pub use log::ResultLog;
pub use record::{GameRecord, PlayerRecord};
pub use series::{run_game, EntrantFactory, Series, SeriesConfig, SeriesSummary};
