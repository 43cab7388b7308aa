//! Core engine types: players, game state, actions, RNG, configuration.
//!
//! Everything here is plain data plus bookkeeping. Which actions are legal
//! and what they do lives in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;
pub mod stats;

pub use action::{Action, ActionRecord, JailAction};
pub use config::GameConfig;
pub use error::{EngineError, Result};
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::{DiceRoll, GameRng};
pub use state::{Game, GameStatus, RECENT_ACTIONS};
pub use stats::PlayerStats;
