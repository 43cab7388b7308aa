//! Rent computation and settlement.
//!
//! ## Schedule
//!
//! - Street: `rent[improvement_level]`, doubled when unimproved and the
//!   owner holds every member of the color group
//! - Railroad: `rent[railroads_owned - 1]`, doubled under a card multiplier
//! - Utility: 10x the dice when the owner holds both utilities or a card
//!   multiplier is set, otherwise 4x
//!
//! Ownership counts include the owner's mortgaged holdings.

use crate::board::{Space, SpaceId};
use crate::core::{Game, PlayerId};

/// Rent `owner` is due for `space`.
///
/// Returns 0 for spaces that carry no rent.
#[must_use]
pub fn compute_rent(game: &Game, space: SpaceId, owner: PlayerId, dice_sum: u8, multiplier: bool) -> i64 {
    let dice = i64::from(dice_sum);
    match game.space(space) {
        Space::Property(property) => {
            let level = property.improvement_level();
            let base = property.rent[level as usize];
            let owned_in_group = game
                .holdings(owner)
                .filter(|(_, s)| s.as_property().is_some_and(|p| p.group == property.group))
                .count();
            if level == 0 && owned_in_group == property.group_size as usize {
                base * 2
            } else {
                base
            }
        }
        Space::Railroad(railroad) => {
            let owned = game
                .holdings(owner)
                .filter(|(_, s)| matches!(s, Space::Railroad(_)))
                .count();
            let rent = railroad.rent[owned.clamp(1, railroad.rent.len()) - 1];
            if multiplier {
                rent * 2
            } else {
                rent
            }
        }
        Space::Utility(_) => {
            let owned = game
                .holdings(owner)
                .filter(|(_, s)| matches!(s, Space::Utility(_)))
                .count();
            if owned == 2 || multiplier {
                10 * dice
            } else {
                4 * dice
            }
        }
        Space::Tax(_) | Space::Special(_) => 0,
    }
}

/// Charge `payer` for standing on `space` if another player collects there.
///
/// Unowned, self-owned and mortgaged spaces charge nothing. The full amount
/// moves in one step even if it drives the payer negative; solvency is the
/// caller's concern. Returns the amount paid, if any.
pub fn settle_rent(
    game: &mut Game,
    payer: PlayerId,
    space: SpaceId,
    dice_sum: u8,
    multiplier: bool,
) -> Option<i64> {
    let deed = game.space(space).deed()?;
    let owner = deed.owner.filter(|&o| o != payer)?;
    if deed.mortgaged {
        return None;
    }

    let rent = compute_rent(game, space, owner, dice_sum, multiplier);
    game.transfer(payer, owner, rent);
    game.stats[payer].rent_paid += rent;
    game.stats[owner].rent_received += rent;
    tracing::debug!(%payer, %owner, space = game.space(space).name(), rent, "rent");
    Some(rent)
}
