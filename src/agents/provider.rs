//! The decision-provider boundary.
//!
//! The turn machine hands a provider the numbered choices plus a snapshot of
//! the game and gets back one of three outcomes. Retrying, counting invalid
//! replies and falling back to a default all happen on the engine side.

use crate::board::Board;
use crate::core::{Action, JailAction, PlayerId};

use super::context::DecisionContext;
use super::reply::ReplyError;

/// One selectable option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    Turn(Action),
    Jail(JailAction),
}

impl Choice {
    /// Text shown to providers that read labels.
    #[must_use]
    pub fn label(self, board: &Board) -> String {
        match self {
            Choice::Turn(action) => action.describe(board),
            Choice::Jail(action) => action.to_string(),
        }
    }

    #[must_use]
    pub fn as_action(self) -> Option<Action> {
        match self {
            Choice::Turn(action) => Some(action),
            Choice::Jail(_) => None,
        }
    }

    #[must_use]
    pub fn as_jail(self) -> Option<JailAction> {
        match self {
            Choice::Jail(action) => Some(action),
            Choice::Turn(_) => None,
        }
    }
}

/// What a provider is asked to choose from.
#[derive(Clone, Debug)]
pub struct DecisionRequest {
    pub player: PlayerId,
    pub choices: Vec<Choice>,
    /// Snapshot for providers that reason over the whole board.
    pub context: DecisionContext,
}

impl DecisionRequest {
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Index of the first choice matching `pred`.
    pub fn position(&self, pred: impl Fn(Choice) -> bool) -> Option<usize> {
        self.choices.iter().position(|&c| pred(c))
    }
}

/// A provider's answer to one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// An index into the request's choices.
    Valid(usize),
    /// A reply arrived but could not be used.
    Invalid(ReplyError),
    /// No reply could be obtained at all.
    Exhausted,
}

/// Something that picks actions.
pub trait DecisionProvider: Send {
    /// Short identifier used in logs and result records.
    fn name(&self) -> &str;

    /// Pick one of `request.choices`.
    fn request_action(&mut self, request: &DecisionRequest) -> Decision;
}

impl<P: DecisionProvider + ?Sized> DecisionProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn request_action(&mut self, request: &DecisionRequest) -> Decision {
        (**self).request_action(request)
    }
}
