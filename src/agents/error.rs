//! Provider-side errors.
//!
//! None of these reach the engine: a provider that fails to get a reply
//! answers `Decision::Exhausted` and the turn machine falls back.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Response(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    #[error("No replies left")]
    Drained,
}
