//! Engine error type.
//!
//! Only contract violations and corrupted shared state are errors.
//! Bankruptcy is a game outcome and invalid agent replies are recovered
//! by the decision loop, so neither appears here.

use thiserror::Error;

use super::player::PlayerId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{player} cannot apply {action}: not among the legal actions")]
    IllegalAction { player: PlayerId, action: String },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
