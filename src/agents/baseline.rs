//! Rule-based opponent.
//!
//! Buys whatever it can afford, lifts mortgages, builds as far as cash
//! allows, then ends the turn. When raising money it sells buildings before
//! mortgaging. In jail it prefers a card, then paying, then rolling.

use crate::core::{Action, JailAction};

use super::provider::{Choice, Decision, DecisionProvider, DecisionRequest};

#[derive(Clone, Debug, Default)]
pub struct BaselineAgent;

impl BaselineAgent {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// The index this strategy picks, if the request has any choices.
    #[must_use]
    pub fn choose(request: &DecisionRequest) -> Option<usize> {
        let turn = |pred: fn(Action) -> bool| {
            request.position(|c| c.as_action().is_some_and(pred))
        };
        let jail = |pred: fn(JailAction) -> bool| {
            request.position(|c| c.as_jail().is_some_and(pred))
        };

        jail(|a| a == JailAction::UseCard)
            .or_else(|| jail(|a| matches!(a, JailAction::PayFine(_))))
            .or_else(|| jail(|a| a == JailAction::RollForDouble))
            .or_else(|| turn(|a| matches!(a, Action::Purchase { .. })))
            .or_else(|| turn(|a| matches!(a, Action::Unmortgage { .. })))
            .or_else(|| turn(Action::is_build))
            .or_else(|| turn(|a| a == Action::EndTurn))
            .or_else(|| turn(Action::is_sell))
            .or_else(|| turn(|a| matches!(a, Action::Mortgage { .. })))
            .or_else(|| (!request.is_empty()).then_some(0))
    }
}

impl DecisionProvider for BaselineAgent {
    fn name(&self) -> &str {
        "baseline"
    }

    fn request_action(&mut self, request: &DecisionRequest) -> Decision {
        Self::choose(request).map_or(Decision::Exhausted, Decision::Valid)
    }
}
