//! Action resolution.
//!
//! `apply_action` only accepts an action that `legal_actions` currently
//! offers; anything else is a contract violation and fails without touching
//! state. Every applied action is appended to the history with the actor's
//! net worth before and after.

use crate::board::SpaceId;
use crate::core::{Action, ActionRecord, EngineError, Game, PlayerId, Result};

use super::economy::net_worth;
use super::legality::legal_actions;

/// Apply `action` for `player` standing on `landed`.
pub fn apply_action(game: &mut Game, player: PlayerId, action: Action, landed: SpaceId) -> Result<()> {
    if !legal_actions(game, player, landed).contains(&action) {
        return Err(EngineError::IllegalAction {
            player,
            action: action.describe(&game.board),
        });
    }

    let before = net_worth(game, player);
    match action {
        Action::EndTurn => {}
        Action::Purchase { space, price } => purchase(game, player, space, price),
        Action::Mortgage { space, value } => {
            set_mortgaged(game, space, true)?;
            game.credit(player, value);
            game.stats[player].mortgages += 1;
        }
        Action::Unmortgage { space, cost } => {
            set_mortgaged(game, space, false)?;
            game.debit(player, cost);
            game.stats[player].unmortgages += 1;
        }
        Action::BuildHouse { space, cost } => {
            game.take_houses(1)?;
            street_mut(game, space)?.houses += 1;
            game.debit(player, cost);
            game.stats[player].houses_built += 1;
        }
        Action::BuildHotel { space, cost } => {
            game.take_hotel()?;
            game.return_houses(4)?;
            let street = street_mut(game, space)?;
            street.houses = 0;
            street.hotel = true;
            game.debit(player, cost);
            game.stats[player].houses_built += 1;
        }
        Action::SellHouse { space, refund } => {
            game.return_houses(1)?;
            street_mut(game, space)?.houses -= 1;
            game.credit(player, refund);
            game.stats[player].houses_sold += 1;
        }
        Action::SellHotel { space, refund } => {
            game.take_houses(4)?;
            game.return_hotel()?;
            let street = street_mut(game, space)?;
            street.hotel = false;
            street.houses = 4;
            game.credit(player, refund);
            game.stats[player].houses_sold += 1;
        }
    }
    let after = net_worth(game, player);

    tracing::debug!(%player, action = %action.describe(&game.board), cash = game.player(player).cash, "applied");

    game.stats[player].actions_taken += 1;
    let record = ActionRecord {
        player,
        action,
        round: game.round,
        sequence: game.next_sequence(),
        net_worth_before: before,
        net_worth_after: after,
    };
    game.record_action(record);
    Ok(())
}

fn purchase(game: &mut Game, player: PlayerId, space: SpaceId, price: i64) {
    if let Some(deed) = game.board.get_mut(space).deed_mut() {
        deed.owner = Some(player);
    }
    game.player_mut(player).holdings.push(space);
    game.debit(player, price);
    game.stats[player].properties_bought += 1;
    tracing::info!(%player, space = game.space(space).name(), price, "purchase");
}

fn set_mortgaged(game: &mut Game, space: SpaceId, mortgaged: bool) -> Result<()> {
    let deed = game
        .board
        .get_mut(space)
        .deed_mut()
        .ok_or_else(|| EngineError::InvariantViolation(format!("{space} has no deed")))?;
    deed.mortgaged = mortgaged;
    Ok(())
}

fn street_mut(game: &mut Game, space: SpaceId) -> Result<&mut crate::board::Property> {
    game.board
        .get_mut(space)
        .as_property_mut()
        .ok_or_else(|| EngineError::InvariantViolation(format!("{space} is not a street")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn give(game: &mut Game, player: PlayerId, space: u8) {
        let space = SpaceId::new(space);
        game.board.get_mut(space).deed_mut().unwrap().owner = Some(player);
        game.player_mut(player).holdings.push(space);
    }

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_purchase() {
        let mut game = Game::new(GameConfig::default());
        let space = SpaceId::new(1);

        apply_action(&mut game, p0(), Action::Purchase { space, price: 60 }, space).unwrap();

        assert_eq!(game.player(p0()).cash, 1440);
        assert_eq!(game.player(p0()).holdings, vec![space]);
        assert!(game.space(space).deed().unwrap().is_owned_by(p0()));
        assert_eq!(game.stats[p0()].properties_bought, 1);
        assert_eq!(game.stats[p0()].actions_taken, 1);

        let record = game.history.back().unwrap();
        assert_eq!(record.net_worth_before, 1500);
        assert_eq!(record.net_worth_after, 1500);
    }

    #[test]
    fn test_illegal_action_is_rejected_without_mutation() {
        let mut game = Game::new(GameConfig::default());
        let action = Action::Mortgage { space: SpaceId::new(1), value: 30 };

        let result = apply_action(&mut game, p0(), action, SpaceId::GO);
        assert!(matches!(result, Err(EngineError::IllegalAction { .. })));
        assert_eq!(game.player(p0()).cash, 1500);
        assert!(game.history.is_empty());
    }

    #[test]
    fn test_stale_amount_is_illegal() {
        let mut game = Game::new(GameConfig::default());
        let space = SpaceId::new(1);
        let result = apply_action(&mut game, p0(), Action::Purchase { space, price: 1 }, space);
        assert!(result.is_err());
    }

    #[test]
    fn test_mortgage_round_trip_costs_the_fee() {
        let mut game = Game::new(GameConfig::default());
        give(&mut game, p0(), 39);
        let space = SpaceId::BOARDWALK;

        apply_action(&mut game, p0(), Action::Mortgage { space, value: 200 }, SpaceId::GO).unwrap();
        assert!(game.space(space).deed().unwrap().mortgaged);
        assert_eq!(game.player(p0()).cash, 1700);

        apply_action(&mut game, p0(), Action::Unmortgage { space, cost: 220 }, SpaceId::GO).unwrap();
        assert!(!game.space(space).deed().unwrap().mortgaged);
        assert_eq!(game.player(p0()).cash, 1480);
        assert_eq!(game.stats[p0()].mortgages, 1);
        assert_eq!(game.stats[p0()].unmortgages, 1);
    }

    #[test]
    fn test_build_to_hotel_and_back() {
        let mut game = Game::new(GameConfig::default());
        give(&mut game, p0(), 1);
        give(&mut game, p0(), 3);
        let (a, b) = (SpaceId::new(1), SpaceId::new(3));

        for _ in 0..4 {
            for space in [a, b] {
                apply_action(&mut game, p0(), Action::BuildHouse { space, cost: 50 }, SpaceId::GO).unwrap();
            }
        }
        assert_eq!(game.remaining_houses, 24);

        apply_action(&mut game, p0(), Action::BuildHotel { space: a, cost: 50 }, SpaceId::GO).unwrap();
        let street = game.space(a).as_property().unwrap();
        assert!(street.hotel);
        assert_eq!(street.houses, 0);
        assert_eq!(game.remaining_houses, 28);
        assert_eq!(game.remaining_hotels, 11);

        apply_action(&mut game, p0(), Action::SellHotel { space: a, refund: 25 }, SpaceId::GO).unwrap();
        let street = game.space(a).as_property().unwrap();
        assert!(!street.hotel);
        assert_eq!(street.houses, 4);
        assert_eq!(game.remaining_houses, 24);
        assert_eq!(game.remaining_hotels, 12);

        assert_eq!(game.player(p0()).cash, 1500 - 9 * 50 + 25);
        assert_eq!(game.stats[p0()].houses_built, 9);
        assert_eq!(game.stats[p0()].houses_sold, 1);
    }

    #[test]
    fn test_end_turn_is_recorded() {
        let mut game = Game::new(GameConfig::default());
        apply_action(&mut game, p0(), Action::EndTurn, SpaceId::GO).unwrap();

        assert_eq!(game.history.len(), 1);
        assert_eq!(game.recent_actions(p0(), 3)[0].action, Action::EndTurn);
    }
}
