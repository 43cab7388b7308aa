//! Uniformly random provider, a floor for benchmarks.

use crate::core::GameRng;

use super::provider::{Decision, DecisionProvider, DecisionRequest};

#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("random_agent"),
        }
    }
}

impl DecisionProvider for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn request_action(&mut self, request: &DecisionRequest) -> Decision {
        if request.is_empty() {
            return Decision::Exhausted;
        }
        Decision::Valid(self.rng.gen_range_usize(0..request.len()))
    }
}
