//! The turn state machine.
//!
//! ## One turn
//!
//! ```text
//! settle old debt -> [jail decision] -> roll -> move -> land
//!     -> [deficit: bankrupt or raise money, turn ends]
//!     -> [rent -> deficit: bankrupt or raise money, turn ends]
//!     -> action loop until "End turn"
//!     -> doubles? roll again : advance cursor
//! ```
//!
//! A third consecutive double jails the player without moving. Leaving jail
//! by card or fine is followed by an ordinary roll; leaving on a rolled
//! double, or by the forced fine after the third failed attempt, moves by
//! that roll and ends the doubles chain.
//!
//! ## Decisions
//!
//! Each decision gets `max_decision_attempts` requests. Invalid replies are
//! counted against the player; when the budget runs out the engine applies
//! a default (`End turn` if offered, else the first money-raising action,
//! else the first choice) and counts it as defaulted.

use crate::agents::{Choice, Decision, DecisionContext, DecisionProvider, DecisionRequest};
use crate::board::{Space, SpaceId, Special};
use crate::cards::DeckKind;
use crate::core::{Action, DiceRoll, EngineError, Game, JailAction, PlayerId, Result};

use super::economy::is_bankrupt;
use super::effects::{advance, draw_card, release, send_to_jail};
use super::legality::{jail_actions, legal_actions};
use super::rent::settle_rent;
use super::resolver::apply_action;

/// Doubles in a row that send a player to jail.
pub const DOUBLES_TO_JAIL: u8 = 3;

/// Jail attempts after which the fine is forced.
pub const MAX_JAIL_TURNS: u8 = 3;

/// A roll that moves the player.
#[derive(Clone, Copy, Debug)]
struct Throw {
    roll: DiceRoll,
    /// The player rolls again after this one resolves.
    again: bool,
}

enum Landing {
    GoToJail,
    Draw(DeckKind),
    Tax(i64),
    Plain,
}

/// Play the current player's turn and move the cursor on.
///
/// Returns early, without advancing, if the player goes bankrupt.
pub fn play_turn(game: &mut Game, provider: &mut dyn DecisionProvider) -> Result<()> {
    let player = game.current;
    let _span = tracing::debug_span!("turn", %player, round = game.round).entered();

    // Debt picked up on someone else's turn.
    if game.player(player).in_deficit() {
        let here = game.standing_on(player);
        tracing::debug!(%player, cash = game.player(player).cash, "settling debt");
        if !resolve_deficit(game, provider, player, here)? {
            return Ok(());
        }
    }

    let mut doubles = 0u8;
    loop {
        let throw = if game.player(player).in_jail {
            jail_phase(game, provider, player)?.map(|roll| Throw { roll, again: false })
        } else {
            None
        };
        let throw = match throw {
            Some(throw) => throw,
            None if game.player(player).in_jail => break,
            None => match free_roll(game, player, &mut doubles) {
                Some(throw) => throw,
                None => break,
            },
        };

        if !resolve_roll(game, provider, player, throw.roll)? {
            break;
        }
        if !throw.again || game.player(player).in_jail {
            break;
        }
    }

    if !game.is_over() {
        game.advance_turn();
    }
    Ok(())
}

/// Move, land and trade after one roll.
///
/// Returns false when the turn must end here.
fn resolve_roll(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    player: PlayerId,
    roll: DiceRoll,
) -> Result<bool> {
    let landed = advance(game, player, roll.sum());

    let mut multiplier = false;
    match landing(game.space(landed)) {
        Landing::GoToJail => {
            send_to_jail(game, player);
            return Ok(false);
        }
        Landing::Draw(deck) => multiplier = draw_card(game, player, deck).multiplier,
        Landing::Tax(amount) => {
            game.debit(player, amount);
            tracing::debug!(%player, amount, "tax");
        }
        Landing::Plain => {}
    }
    if game.player(player).in_jail || game.is_over() {
        return Ok(false);
    }

    let here = game.standing_on(player);
    if game.player(player).in_deficit() {
        resolve_deficit(game, provider, player, here)?;
        return Ok(false);
    }

    settle_rent(game, player, here, roll.sum(), multiplier);
    if game.player(player).in_deficit() {
        resolve_deficit(game, provider, player, here)?;
        return Ok(false);
    }

    action_loop(game, provider, player, here)?;
    Ok(!game.is_over())
}

fn landing(space: &Space) -> Landing {
    match space {
        Space::Special(Special::GoToJail) => Landing::GoToJail,
        Space::Special(Special::Chance) => Landing::Draw(DeckKind::Chance),
        Space::Special(Special::CommunityChest) => Landing::Draw(DeckKind::CommunityChest),
        Space::Tax(tax) => Landing::Tax(tax.amount),
        _ => Landing::Plain,
    }
}

/// Roll for a player who is not in jail, counting doubles.
fn free_roll(game: &mut Game, player: PlayerId, doubles: &mut u8) -> Option<Throw> {
    let roll = game.rng.roll_dice();
    game.last_roll = Some(roll);
    tracing::debug!(%player, %roll, "rolled");

    if !roll.is_double() {
        return Some(Throw { roll, again: false });
    }
    *doubles += 1;
    if *doubles >= DOUBLES_TO_JAIL {
        tracing::debug!(%player, "third double");
        send_to_jail(game, player);
        return None;
    }
    Some(Throw { roll, again: true })
}

/// Let a jailed player choose a way out.
///
/// Returns the roll to move by when the player left on a rolled double or
/// the forced fine. Returns `None` with the player released when they used
/// a card or paid, and `None` with the player still jailed otherwise.
fn jail_phase(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    player: PlayerId,
) -> Result<Option<DiceRoll>> {
    let choices = jail_actions(game, player).into_iter().map(Choice::Jail).collect();
    let action = decide(game, provider, player, choices, 0)
        .as_jail()
        .ok_or_else(|| EngineError::InvariantViolation("jail decision returned a turn action".into()))?;
    game.stats[player].actions_taken += 1;

    match action {
        JailAction::UseCard => {
            if game.player(player).jail_cards == 0 {
                return Err(EngineError::IllegalAction {
                    player,
                    action: action.to_string(),
                });
            }
            game.player_mut(player).jail_cards -= 1;
            release(game, player);
            tracing::debug!(%player, "used jail card");
            Ok(None)
        }
        JailAction::PayFine(fine) => {
            game.debit(player, fine);
            release(game, player);
            tracing::debug!(%player, fine, "paid jail fine");
            Ok(None)
        }
        JailAction::RollForDouble => {
            let roll = game.rng.roll_dice();
            game.last_roll = Some(roll);
            if roll.is_double() {
                release(game, player);
                tracing::debug!(%player, %roll, "rolled out of jail");
                return Ok(Some(roll));
            }
            if game.player(player).turns_in_jail >= MAX_JAIL_TURNS {
                let fine = game.config().jail_fine;
                game.debit(player, fine);
                release(game, player);
                tracing::debug!(%player, %roll, fine, "forced jail fine");
                return Ok(Some(roll));
            }
            game.player_mut(player).turns_in_jail += 1;
            tracing::debug!(%player, %roll, "stayed in jail");
            Ok(None)
        }
    }
}

/// Eliminate `player` if they cannot cover their debt, otherwise make them
/// raise money. Returns whether the player is still in the game.
fn resolve_deficit(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    player: PlayerId,
    here: SpaceId,
) -> Result<bool> {
    if is_bankrupt(game, player) {
        game.eliminate(player);
        return Ok(false);
    }
    action_loop(game, provider, player, here)?;
    Ok(!game.is_over())
}

/// Offer actions until the player ends the turn.
///
/// A player in deficit with nothing left to offer is eliminated.
pub fn action_loop(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    player: PlayerId,
    here: SpaceId,
) -> Result<()> {
    loop {
        let actions = legal_actions(game, player, here);
        if actions.is_empty() {
            tracing::warn!(%player, cash = game.player(player).cash, "no way to cover the debt");
            game.eliminate(player);
            return Ok(());
        }

        let fallback = default_action(&actions);
        let choices = actions.into_iter().map(Choice::Turn).collect();
        let action = decide(game, provider, player, choices, fallback)
            .as_action()
            .ok_or_else(|| EngineError::InvariantViolation("turn decision returned a jail action".into()))?;

        apply_action(game, player, action, here)?;
        if action == Action::EndTurn {
            return Ok(());
        }
    }
}

/// `End turn` if offered, else the first money-raising action, else 0.
#[must_use]
pub fn default_action(actions: &[Action]) -> usize {
    actions
        .iter()
        .position(|&a| a == Action::EndTurn)
        .or_else(|| actions.iter().position(|a| a.raises_money()))
        .unwrap_or(0)
}

/// Ask `provider` within the attempt budget, falling back to `fallback`.
fn decide(
    game: &mut Game,
    provider: &mut dyn DecisionProvider,
    player: PlayerId,
    choices: Vec<Choice>,
    fallback: usize,
) -> Choice {
    let context = DecisionContext::capture(game, player, &choices);
    let request = DecisionRequest {
        player,
        choices,
        context,
    };
    let attempts = game.config().max_decision_attempts;

    for attempt in 1..=attempts {
        match provider.request_action(&request) {
            Decision::Valid(index) if index < request.len() => return request.choices[index],
            Decision::Valid(index) => {
                game.stats[player].invalid_move += 1;
                tracing::warn!(%player, provider = provider.name(), attempt, index, "selection out of range");
            }
            Decision::Invalid(error) => {
                if error.is_out_of_range() {
                    game.stats[player].invalid_move += 1;
                } else {
                    game.stats[player].invalid_json += 1;
                }
                tracing::warn!(%player, provider = provider.name(), attempt, %error, "invalid reply");
            }
            Decision::Exhausted => {
                tracing::warn!(%player, provider = provider.name(), attempt, "no decision");
            }
        }
    }

    let choice = request.choices[fallback.min(request.len().saturating_sub(1))];
    game.stats[player].defaulted_move += 1;
    tracing::warn!(
        %player,
        provider = provider.name(),
        choice = %choice.label(&game.board),
        "defaulted decision"
    );
    choice
}
