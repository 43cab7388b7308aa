//! # monopoly-bench
//!
//! A rules engine for the classic property-trading board game, built to
//! benchmark decision-making agents against rule-based opponents.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: dice and both card decks draw from seeded ChaCha
//!    streams, so a seed plus deterministic providers replays a game exactly.
//!
//! 2. **N-Player First**: every per-player structure is a `PlayerMap`
//!    sized by `player_count` (2-8). Nothing assumes two seats.
//!
//! 3. **Engine Owns the Rules**: providers only pick an index from an
//!    ordered list of legal choices. Retries, invalid-reply accounting and
//!    fallbacks are handled by the turn machine.
//!
//! ## Modules
//!
//! - `core`: player ids, configuration, actions, RNG, errors, the `Game` state
//! - `board`: the 40-space catalog, deeds and color groups
//! - `cards`: Chance and Community Chest decks
//! - `rules`: legality, resolution, rent, economy, the turn machine, `Engine`
//! - `agents`: `DecisionProvider` and its implementations
//! - `runner`: game records, seat-rotating series, JSON-lines result log

pub mod agents;
pub mod board;
pub mod cards;
pub mod core;
pub mod rules;
pub mod runner;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, DiceRoll, EngineError, Game, GameConfig, GameRng, GameStatus, JailAction,
    Player, PlayerId, PlayerMap, PlayerStats, Result,
};

pub use crate::board::{Board, ColorGroup, Space, SpaceId};

pub use crate::cards::{CardDeck, CardEffect, DeckKind};

pub use crate::rules::{
    apply_action, jail_actions, legal_actions, net_worth, play_turn, Engine, GameEnd, GameResult,
};

pub use crate::agents::{
    BaselineAgent, Choice, Decision, DecisionContext, DecisionProvider, DecisionRequest, Ensemble,
    EnsembleConfig, LlmAgent, OllamaClient, RandomAgent, ReplySource, ScriptedAgent,
};

pub use crate::runner::{GameRecord, ResultLog, Series, SeriesConfig};
