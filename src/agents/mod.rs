//! Decision providers.
//!
//! ## Key Types
//!
//! - `DecisionProvider`: picks an index from a `DecisionRequest`
//! - `Decision`: `Valid(index)`, `Invalid(reason)` or `Exhausted`
//! - `DecisionContext`: serializable snapshot rendered into prompts
//! - `ReplySource`: prompt in, text out (HTTP models, canned replies)
//!
//! ## Providers
//!
//! - `BaselineAgent`: fixed rule-based strategy
//! - `RandomAgent`: uniform over the legal choices
//! - `ScriptedAgent`: replays a queue, for tests
//! - `LlmAgent`: prompts one `ReplySource` and parses its JSON reply
//! - `Ensemble`: parallel majority vote over several `ReplySource`s

pub mod baseline;
pub mod context;
pub mod ensemble;
pub mod error;
pub mod llm;
pub mod ollama;
pub mod provider;
pub mod random;
pub mod reply;
pub mod scripted;

pub use baseline::BaselineAgent;
pub use context::{DecisionContext, MemoryEntry, PlayerSnapshot, DEFAULT_PREAMBLE, MEMORY_LEN};
pub use ensemble::{majority, Ballot, Ensemble, EnsembleConfig};
pub use error::AgentError;
pub use llm::{LlmAgent, ReplySource};
pub use ollama::OllamaClient;
pub use provider::{Choice, Decision, DecisionProvider, DecisionRequest};
pub use random::RandomAgent;
pub use reply::{extract_json, parse_selection, ReplyError};
pub use scripted::{ScriptedAgent, ScriptedSource};
