//! Action representation.
//!
//! Actions are structured values produced by the enumerator and consumed by
//! the resolver directly. Text is only generated for agents that read it,
//! via `Action::describe`, and is never parsed back.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::{Board, SpaceId};

/// Something a player may do during the action-selection loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Finish the turn. Only legal with non-negative cash.
    EndTurn,
    Purchase { space: SpaceId, price: i64 },
    Mortgage { space: SpaceId, value: i64 },
    Unmortgage { space: SpaceId, cost: i64 },
    BuildHouse { space: SpaceId, cost: i64 },
    BuildHotel { space: SpaceId, cost: i64 },
    SellHouse { space: SpaceId, refund: i64 },
    SellHotel { space: SpaceId, refund: i64 },
}

impl Action {
    /// The space the action targets, if any.
    #[must_use]
    pub fn space(self) -> Option<SpaceId> {
        match self {
            Action::EndTurn => None,
            Action::Purchase { space, .. }
            | Action::Mortgage { space, .. }
            | Action::Unmortgage { space, .. }
            | Action::BuildHouse { space, .. }
            | Action::BuildHotel { space, .. }
            | Action::SellHouse { space, .. }
            | Action::SellHotel { space, .. } => Some(space),
        }
    }

    /// Actions that bring cash in without buying anything.
    #[must_use]
    pub fn raises_money(self) -> bool {
        matches!(
            self,
            Action::Mortgage { .. } | Action::SellHouse { .. } | Action::SellHotel { .. }
        )
    }

    #[must_use]
    pub fn is_build(self) -> bool {
        matches!(self, Action::BuildHouse { .. } | Action::BuildHotel { .. })
    }

    #[must_use]
    pub fn is_sell(self) -> bool {
        matches!(self, Action::SellHouse { .. } | Action::SellHotel { .. })
    }

    /// Human-readable label, e.g. "Purchase Baltic Avenue for $60".
    #[must_use]
    pub fn describe(self, board: &Board) -> String {
        let name = |space: SpaceId| board.get(space).name().to_string();
        match self {
            Action::EndTurn => "End turn".to_string(),
            Action::Purchase { space, price } => format!("Purchase {} for ${price}", name(space)),
            Action::Mortgage { space, value } => format!("Mortgage {} for ${value}", name(space)),
            Action::Unmortgage { space, cost } => format!("Unmortgage {} for ${cost}", name(space)),
            Action::BuildHouse { space, cost } => format!("Build house on {} for ${cost}", name(space)),
            Action::BuildHotel { space, cost } => format!("Build hotel on {} for ${cost}", name(space)),
            Action::SellHouse { space, refund } => format!("Sell house on {} for ${refund}", name(space)),
            Action::SellHotel { space, refund } => format!("Sell hotel on {} for ${refund}", name(space)),
        }
    }
}

/// A way out of jail, offered before the jailed player rolls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JailAction {
    UseCard,
    PayFine(i64),
    RollForDouble,
}

impl std::fmt::Display for JailAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JailAction::UseCard => f.write_str("Use a Get Out of Jail Free card"),
            JailAction::PayFine(fine) => write!(f, "Pay ${fine}"),
            JailAction::RollForDouble => f.write_str("Roll for a double"),
        }
    }
}

/// An applied action with its effect on the actor's net worth.
///
/// Used for:
/// - Action memory in decision contexts
/// - Replay/debugging
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round in which the action was taken.
    pub round: u32,

    /// Sequence number across the whole game.
    pub sequence: u32,

    pub net_worth_before: i64,
    pub net_worth_after: i64,
}

impl ActionRecord {
    /// Change in the actor's net worth.
    #[must_use]
    pub fn net_worth_delta(&self) -> i64 {
        self.net_worth_after - self.net_worth_before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_matches_agent_labels() {
        let board = Board::standard();

        assert_eq!(Action::EndTurn.describe(&board), "End turn");
        assert_eq!(
            Action::Purchase { space: SpaceId::new(1), price: 60 }.describe(&board),
            "Purchase Mediterranean Avenue for $60"
        );
        assert_eq!(
            Action::BuildHotel { space: SpaceId::new(39), cost: 200 }.describe(&board),
            "Build hotel on Boardwalk for $200"
        );
        assert_eq!(
            Action::SellHouse { space: SpaceId::new(3), refund: 25 }.describe(&board),
            "Sell house on Baltic Avenue for $25"
        );
    }

    #[test]
    fn test_action_classification() {
        let mortgage = Action::Mortgage { space: SpaceId::new(5), value: 100 };
        assert!(mortgage.raises_money());
        assert_eq!(mortgage.space(), Some(SpaceId::new(5)));

        assert!(!Action::EndTurn.raises_money());
        assert_eq!(Action::EndTurn.space(), None);

        assert!(Action::BuildHouse { space: SpaceId::new(1), cost: 50 }.is_build());
        assert!(Action::SellHotel { space: SpaceId::new(1), refund: 25 }.is_sell());
    }

    #[test]
    fn test_jail_action_labels() {
        assert_eq!(JailAction::UseCard.to_string(), "Use a Get Out of Jail Free card");
        assert_eq!(JailAction::PayFine(50).to_string(), "Pay $50");
        assert_eq!(JailAction::RollForDouble.to_string(), "Roll for a double");
    }

    #[test]
    fn test_action_record_delta() {
        let record = ActionRecord {
            player: PlayerId::new(0),
            action: Action::Mortgage { space: SpaceId::new(1), value: 30 },
            round: 2,
            sequence: 7,
            net_worth_before: 1500,
            net_worth_after: 1467,
        };

        assert_eq!(record.net_worth_delta(), -33);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::Unmortgage { space: SpaceId::new(6), cost: 55 };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
