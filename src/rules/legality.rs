//! Legal action enumeration.
//!
//! The returned order is the index space providers select from, so it is
//! fixed:
//!
//! 1. `EndTurn`, when cash is non-negative
//! 2. `Purchase` of the landed space, when unowned and price < cash
//! 3. One pass over holdings in acquisition order: `Unmortgage` for a
//!    mortgaged holding the player can afford, `Mortgage` for an
//!    unmortgaged holding with no buildings on it
//! 4. For each color group held complete and unmortgaged, in the order it
//!    became complete during the pass: builds on the members at the lowest
//!    level, then sales on the members at the highest level, member by
//!    member in holdings order
//!
//! Builds need cash for the house cost and stock in the bank. Selling a
//! hotel needs 4 houses in the bank to break it back down.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::board::{ColorGroup, SpaceId};
use crate::core::{Action, Game, JailAction, PlayerId};

/// Every action `player` may take while standing on `landed`.
#[must_use]
pub fn legal_actions(game: &Game, player: PlayerId, landed: SpaceId) -> Vec<Action> {
    let cash = game.player(player).cash;
    let mut actions = Vec::new();

    if cash >= 0 {
        actions.push(Action::EndTurn);
    }

    if let Some(deed) = game.space(landed).deed() {
        if deed.owner.is_none() && deed.price < cash {
            actions.push(Action::Purchase {
                space: landed,
                price: deed.price,
            });
        }
    }

    let mut groups: FxHashMap<ColorGroup, SmallVec<[SpaceId; 3]>> = FxHashMap::default();
    let mut complete: SmallVec<[ColorGroup; 8]> = SmallVec::new();

    for (id, space) in game.holdings(player) {
        let Some(deed) = space.deed() else { continue };

        if deed.mortgaged {
            if cash >= deed.unmortgage_cost {
                actions.push(Action::Unmortgage {
                    space: id,
                    cost: deed.unmortgage_cost,
                });
            }
            continue;
        }

        if let Some(property) = space.as_property() {
            let members = groups.entry(property.group).or_default();
            members.push(id);
            if members.len() == property.group_size as usize {
                complete.push(property.group);
            }
            if property.is_improved() {
                continue;
            }
        }

        actions.push(Action::Mortgage {
            space: id,
            value: deed.mortgage_value,
        });
    }

    for group in complete {
        if let Some(members) = groups.get(&group) {
            push_improvements(game, cash, members, &mut actions);
        }
    }

    actions
}

/// Even-building: build on the lowest members, sell from the highest.
fn push_improvements(game: &Game, cash: i64, members: &[SpaceId], actions: &mut Vec<Action>) {
    let levels: SmallVec<[(SpaceId, u8, i64); 3]> = members
        .iter()
        .filter_map(|&id| {
            let p = game.space(id).as_property()?;
            Some((id, p.improvement_level(), p.house_cost))
        })
        .collect();

    let Some(min) = levels.iter().map(|&(_, level, _)| level).min() else {
        return;
    };
    let max = levels.iter().map(|&(_, level, _)| level).max().unwrap_or(min);

    for &(space, level, cost) in &levels {
        if level == min && cash >= cost {
            if level < 4 && game.remaining_houses > 0 {
                actions.push(Action::BuildHouse { space, cost });
            } else if level == 4 && game.remaining_hotels > 0 {
                actions.push(Action::BuildHotel { space, cost });
            }
        }
        if level == max {
            let refund = cost / 2;
            if level == 5 {
                if game.remaining_houses >= 4 {
                    actions.push(Action::SellHotel { space, refund });
                }
            } else if level > 0 {
                actions.push(Action::SellHouse { space, refund });
            }
        }
    }
}

/// Ways out of jail, in offer order.
#[must_use]
pub fn jail_actions(game: &Game, player: PlayerId) -> SmallVec<[JailAction; 3]> {
    let state = game.player(player);
    let fine = game.config().jail_fine;
    let mut actions = SmallVec::new();

    if state.jail_cards > 0 {
        actions.push(JailAction::UseCard);
    }
    if state.cash >= fine {
        actions.push(JailAction::PayFine(fine));
    }
    actions.push(JailAction::RollForDouble);
    actions
}
