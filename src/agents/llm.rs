//! Language-model provider.
//!
//! `LlmAgent` renders the decision context into a prompt, sends it to a
//! `ReplySource`, and parses the `selection` out of the reply. Each request
//! is one query; retries are driven by the engine's attempt budget.

use super::context::DEFAULT_PREAMBLE;
use super::error::AgentError;
use super::provider::{Decision, DecisionProvider, DecisionRequest};
use super::reply::parse_selection;

/// Anything that turns a prompt into reply text.
///
/// Implementations must be shareable across threads so an ensemble can
/// query several at once.
pub trait ReplySource: Send + Sync {
    fn name(&self) -> &str;

    fn query(&self, prompt: &str) -> Result<String, AgentError>;
}

impl<S: ReplySource + ?Sized> ReplySource for std::sync::Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn query(&self, prompt: &str) -> Result<String, AgentError> {
        (**self).query(prompt)
    }
}

pub struct LlmAgent<S: ReplySource> {
    source: S,
    preamble: String,
}

impl<S: ReplySource> LlmAgent<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            preamble: DEFAULT_PREAMBLE.to_string(),
        }
    }

    /// Replace the instructions placed ahead of the game state.
    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ReplySource> DecisionProvider for LlmAgent<S> {
    fn name(&self) -> &str {
        self.source.name()
    }

    fn request_action(&mut self, request: &DecisionRequest) -> Decision {
        let prompt = request.context.render_prompt(&self.preamble);
        let reply = match self.source.query(&prompt) {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(source = self.source.name(), %error, "query failed");
                return Decision::Exhausted;
            }
        };

        match parse_selection(&reply, request.len()) {
            Ok(index) => Decision::Valid(index),
            Err(error) => {
                tracing::debug!(source = self.source.name(), %error, reply = %reply, "unusable reply");
                Decision::Invalid(error)
            }
        }
    }
}
