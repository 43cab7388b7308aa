//! Net worth and liquidation value.
//!
//! Both are pure functions of the game state, recomputed on every call.
//! A hotel counts as one building in both sums.

use crate::board::Space;
use crate::core::{Game, PlayerId};

/// Cash plus the book value of everything the player holds.
///
/// Unmortgaged holdings count at price plus buildings at full house cost;
/// mortgaged holdings count at price minus the unmortgage cost.
#[must_use]
pub fn net_worth(game: &Game, player: PlayerId) -> i64 {
    let holdings: i64 = game
        .holdings(player)
        .filter_map(|(_, space)| {
            let deed = space.deed()?;
            Some(if deed.mortgaged {
                deed.price - deed.unmortgage_cost
            } else {
                deed.price + building_value(space)
            })
        })
        .sum();
    game.player(player).cash + holdings
}

/// Cash that selling every building and mortgaging every holding would raise.
///
/// Mortgaged holdings contribute nothing.
#[must_use]
pub fn liquidation_value(game: &Game, player: PlayerId) -> i64 {
    game.holdings(player)
        .filter_map(|(_, space)| {
            let deed = space.deed()?;
            if deed.mortgaged {
                return Some(0);
            }
            let resale = space.as_property().map_or(0, |p| {
                i64::from(p.improvement_count()) * (p.house_cost / 2)
            });
            Some(deed.mortgage_value + resale)
        })
        .sum()
}

/// The player cannot cover their debt even by liquidating everything.
#[must_use]
pub fn is_bankrupt(game: &Game, player: PlayerId) -> bool {
    liquidation_value(game, player) + game.player(player).cash < 0
}

fn building_value(space: &Space) -> i64 {
    space
        .as_property()
        .map_or(0, |p| i64::from(p.improvement_count()) * p.house_cost)
}
