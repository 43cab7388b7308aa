//! Majority-vote ensemble over several reply sources.
//!
//! ## Protocol
//!
//! Every member gets the same prompt on its own blocking task and may try
//! up to `attempts_per_member` times to produce a usable selection. Ballots
//! are gathered in completion order until all members finish or the
//! deadline passes; members still running at the deadline are ignored.
//! A member whose query from an earlier decision is still running sits the
//! next decisions out, so at most one query per member is ever in flight.
//! The selection with the most votes wins, ties going to whichever was
//! seen first. With no ballots at all the ensemble answers `Exhausted`.
//!
//! The ensemble owns its runtime and blocks on it, so `request_action` must
//! not be called from inside another tokio runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use tokio::task::JoinSet;
use tokio::time::Instant;

use super::context::DEFAULT_PREAMBLE;
use super::error::AgentError;
use super::llm::ReplySource;
use super::provider::{Decision, DecisionProvider, DecisionRequest};
use super::reply::parse_selection;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Deadline for the whole fan-out.
    pub timeout_ms: u64,
    /// Queries each member may spend on one decision.
    pub attempts_per_member: u32,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 20_000,
            attempts_per_member: 3,
        }
    }
}

impl EnsembleConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_attempts_per_member(mut self, attempts: u32) -> Self {
        self.attempts_per_member = attempts;
        self
    }
}

/// One member's usable selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ballot {
    pub member: usize,
    pub selection: usize,
}

/// Most common selection; ties go to the earliest ballot.
#[must_use]
pub fn majority(ballots: &[Ballot]) -> Option<usize> {
    let mut counts: FxHashMap<usize, u32> = FxHashMap::default();
    let mut order: Vec<usize> = Vec::new();
    for ballot in ballots {
        let count = counts.entry(ballot.selection).or_insert(0);
        if *count == 0 {
            order.push(ballot.selection);
        }
        *count += 1;
    }

    let mut best: Option<(usize, u32)> = None;
    for selection in order {
        let count = counts[&selection];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((selection, count));
        }
    }
    best.map(|(selection, _)| selection)
}

pub struct Ensemble {
    members: Vec<Arc<dyn ReplySource>>,
    config: EnsembleConfig,
    preamble: String,
    /// Per member: decisions where its ballot matched the winner.
    agreement: Vec<u32>,
    /// Per member: a query is still running, possibly from an earlier decision.
    busy: Vec<Arc<AtomicBool>>,
    runtime: Option<Runtime>,
}

/// Clears a member's busy flag when its task ends, panic included.
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Ensemble {
    pub fn new(members: Vec<Arc<dyn ReplySource>>, config: EnsembleConfig) -> Result<Self, AgentError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(members.len().max(1) * 2)
            .enable_time()
            .thread_name("ensemble")
            .build()?;

        Ok(Self {
            agreement: vec![0; members.len()],
            busy: (0..members.len()).map(|_| Arc::new(AtomicBool::new(false))).collect(),
            members,
            config,
            preamble: DEFAULT_PREAMBLE.to_string(),
            runtime: Some(runtime),
        })
    }

    #[must_use]
    pub fn with_preamble(mut self, preamble: impl Into<String>) -> Self {
        self.preamble = preamble.into();
        self
    }

    /// (member name, agreement count) in member order.
    #[must_use]
    pub fn agreement(&self) -> Vec<(String, u32)> {
        self.members
            .iter()
            .zip(&self.agreement)
            .map(|(m, &n)| (m.name().to_string(), n))
            .collect()
    }

    /// Ask every member and collect whatever arrives before the deadline.
    pub fn gather(&self, prompt: &str, len: usize) -> Vec<Ballot> {
        let Some(runtime) = self.runtime.as_ref() else {
            return Vec::new();
        };
        let prompt: Arc<str> = Arc::from(prompt);
        let attempts = self.config.attempts_per_member;
        let timeout = Duration::from_millis(self.config.timeout_ms);

        runtime.block_on(async {
            let deadline = Instant::now() + timeout;
            let mut tasks = JoinSet::new();
            for (member, source) in self.members.iter().enumerate() {
                if self.busy[member].swap(true, Ordering::AcqRel) {
                    tracing::debug!(member = source.name(), "still answering an earlier decision");
                    continue;
                }
                let in_flight = InFlight(Arc::clone(&self.busy[member]));
                let source = Arc::clone(source);
                let prompt = Arc::clone(&prompt);
                tasks.spawn_blocking(move || {
                    let _in_flight = in_flight;
                    ask(source.as_ref(), &prompt, len, attempts)
                        .map(|selection| Ballot { member, selection })
                });
            }

            let mut ballots = Vec::new();
            loop {
                let next = tokio::time::timeout_at(deadline, tasks.join_next()).await;
                match next {
                    Ok(Some(Ok(Some(ballot)))) => ballots.push(ballot),
                    Ok(Some(Ok(None))) => {}
                    Ok(Some(Err(error))) => tracing::warn!(%error, "ensemble member panicked"),
                    Ok(None) => break,
                    Err(_) => {
                        tracing::warn!(pending = tasks.len(), "ensemble deadline passed");
                        tasks.detach_all();
                        break;
                    }
                }
            }
            ballots
        })
    }
}

fn ask(source: &dyn ReplySource, prompt: &str, len: usize, attempts: u32) -> Option<usize> {
    for attempt in 1..=attempts {
        match source.query(prompt) {
            Ok(reply) => match parse_selection(&reply, len) {
                Ok(selection) => return Some(selection),
                Err(error) => tracing::debug!(member = source.name(), attempt, %error, "unusable reply"),
            },
            Err(error) => tracing::warn!(member = source.name(), attempt, %error, "query failed"),
        }
    }
    None
}

impl DecisionProvider for Ensemble {
    fn name(&self) -> &str {
        "ensemble"
    }

    fn request_action(&mut self, request: &DecisionRequest) -> Decision {
        let prompt = request.context.render_prompt(&self.preamble);
        let ballots = self.gather(&prompt, request.len());

        let Some(winner) = majority(&ballots) else {
            tracing::warn!(members = self.members.len(), "no ensemble member replied");
            return Decision::Exhausted;
        };

        for ballot in ballots.iter().filter(|b| b.selection == winner) {
            self.agreement[ballot.member] += 1;
        }
        tracing::debug!(selection = winner, votes = ballots.len(), "ensemble vote");
        Decision::Valid(winner)
    }
}

impl Drop for Ensemble {
    fn drop(&mut self) {
        // Blocking tasks past the deadline may still be running.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
