//! Canned providers for tests and replays.
//!
//! `ScriptedAgent` answers from a fixed queue of decisions. `ScriptedSource`
//! is the text-level equivalent: a `ReplySource` that hands out canned
//! replies, optionally after a delay.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::error::AgentError;
use super::llm::ReplySource;
use super::provider::{Decision, DecisionProvider, DecisionRequest};

/// Replays queued decisions, then answers `Exhausted`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    queue: VecDeque<Decision>,
}

impl ScriptedAgent {
    /// Queue plain indices.
    #[must_use]
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            queue: indices.into_iter().map(Decision::Valid).collect(),
        }
    }

    /// Queue arbitrary decisions, including invalid ones.
    #[must_use]
    pub fn from_decisions(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
        }
    }

    /// Decisions not yet handed out.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl DecisionProvider for ScriptedAgent {
    fn name(&self) -> &str {
        "scripted"
    }

    fn request_action(&mut self, _request: &DecisionRequest) -> Decision {
        self.queue.pop_front().unwrap_or(Decision::Exhausted)
    }
}

/// Hands out canned text replies in order.
#[derive(Debug)]
pub struct ScriptedSource {
    name: String,
    replies: Mutex<VecDeque<String>>,
    delay: Duration,
    repeat_last: bool,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(name: impl Into<String>, replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            delay: Duration::ZERO,
            repeat_last: false,
        }
    }

    /// Always answer `reply`.
    #[must_use]
    pub fn constant(name: impl Into<String>, reply: impl Into<String>) -> Self {
        let reply: String = reply.into();
        let mut source = Self::new(name, [reply]);
        source.repeat_last = true;
        source
    }

    /// Sleep before every reply.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl ReplySource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn query(&self, _prompt: &str) -> Result<String, AgentError> {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let mut replies = self
            .replies
            .lock()
            .map_err(|_| AgentError::Response("reply queue poisoned".into()))?;
        if self.repeat_last && replies.len() == 1 {
            return replies.front().cloned().ok_or(AgentError::Drained);
        }
        replies.pop_front().ok_or(AgentError::Drained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{DecisionContext, ReplyError};
    use crate::core::{Game, GameConfig, PlayerId};

    fn request() -> DecisionRequest {
        let game = Game::new(GameConfig::default());
        DecisionRequest {
            player: PlayerId::new(0),
            context: DecisionContext::capture(&game, PlayerId::new(0), &[]),
            choices: Vec::new(),
        }
    }

    #[test]
    fn test_scripted_agent_replays_then_exhausts() {
        let req = request();
        let mut agent = ScriptedAgent::from_decisions([
            Decision::Valid(2),
            Decision::Invalid(ReplyError::NoJson),
        ]);

        assert_eq!(agent.request_action(&req), Decision::Valid(2));
        assert_eq!(agent.request_action(&req), Decision::Invalid(ReplyError::NoJson));
        assert_eq!(agent.remaining(), 0);
        assert_eq!(agent.request_action(&req), Decision::Exhausted);
    }

    #[test]
    fn test_scripted_source_drains() {
        let source = ScriptedSource::new("a", ["one", "two"]);
        assert_eq!(source.query("").unwrap(), "one");
        assert_eq!(source.query("").unwrap(), "two");
        assert!(matches!(source.query(""), Err(AgentError::Drained)));
    }

    #[test]
    fn test_constant_source_repeats() {
        let source = ScriptedSource::constant("c", "{\"selection\": 0}");
        for _ in 0..3 {
            assert_eq!(source.query("").unwrap(), "{\"selection\": 0}");
        }
    }
}
