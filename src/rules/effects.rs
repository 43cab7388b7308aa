//! Movement, jail and card effects.
//!
//! Pass-Go is credited whenever a forward move ends at a lower position than
//! it started from, whether the move came from the dice or a card. Moving
//! backwards never credits it, even across Go.

use crate::board::SpaceId;
use crate::cards::{nearest_railroad, nearest_utility, CardEffect, DeckKind};
use crate::core::{Game, PlayerId};

use super::economy::is_bankrupt;

/// What a drawn card did to the drawer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardOutcome {
    pub card: u8,
    pub effect: CardEffect,
    /// The card relocated the player.
    pub moved: bool,
    /// The next rent settlement uses the card multiplier.
    pub multiplier: bool,
}

/// Move `player` forward `steps` spaces.
pub fn advance(game: &mut Game, player: PlayerId, steps: u8) -> SpaceId {
    let to = game.player(player).position.advanced_by(steps);
    move_to(game, player, to)
}

/// Move `player` forward to `to`, crediting Pass-Go on a wrap.
pub fn move_to(game: &mut Game, player: PlayerId, to: SpaceId) -> SpaceId {
    let from = game.player(player).position;
    game.player_mut(player).position = to;
    if to < from {
        let amount = game.config().pass_go_amount;
        game.credit(player, amount);
        tracing::debug!(%player, amount, "passed Go");
    }
    tracing::debug!(%player, space = game.space(to).name(), "moved");
    to
}

/// Move `player` back `steps` spaces. Never credits Pass-Go.
pub fn move_back(game: &mut Game, player: PlayerId, steps: u8) -> SpaceId {
    let to = game.player(player).position.moved_back(steps);
    game.player_mut(player).position = to;
    tracing::debug!(%player, space = game.space(to).name(), "moved back");
    to
}

/// Jail `player` directly, without passing Go.
pub fn send_to_jail(game: &mut Game, player: PlayerId) {
    let state = game.player_mut(player);
    state.position = SpaceId::JAIL;
    state.in_jail = true;
    state.turns_in_jail = 1;
    tracing::debug!(%player, "sent to jail");
}

/// Release `player` from jail.
pub fn release(game: &mut Game, player: PlayerId) {
    let state = game.player_mut(player);
    state.in_jail = false;
    state.turns_in_jail = 0;
}

/// Draw from `deck` and apply the card to `player`.
///
/// Cash effects may leave the drawer (or, for the birthday card, the
/// other players) negative.
pub fn draw_card(game: &mut Game, player: PlayerId, deck: DeckKind) -> CardOutcome {
    let card = game.deck_mut(deck).draw();
    let printed = deck.card(card);
    let effect = printed.effect;
    tracing::debug!(%player, %deck, card = printed.text, "drew");

    let position = game.player(player).position;
    let mut moved = true;
    match effect {
        CardEffect::AdvanceTo(to) => {
            move_to(game, player, to);
        }
        CardEffect::AdvanceToNearestRailroad => {
            move_to(game, player, nearest_railroad(position));
        }
        CardEffect::AdvanceToNearestUtility => {
            move_to(game, player, nearest_utility(position));
        }
        CardEffect::GoBack(steps) => {
            move_back(game, player, steps);
        }
        CardEffect::GoToJail => send_to_jail(game, player),
        CardEffect::Collect(amount) => {
            moved = false;
            game.credit(player, amount);
        }
        CardEffect::Pay(amount) => {
            moved = false;
            game.debit(player, amount);
        }
        CardEffect::GetOutOfJailFree => {
            moved = false;
            game.player_mut(player).jail_cards += 1;
        }
        CardEffect::Repairs { per_house, per_hotel } => {
            moved = false;
            let (houses, hotels) = game
                .holdings(player)
                .filter_map(|(_, s)| s.as_property())
                .fold((0i64, 0i64), |(h, t), p| {
                    (h + i64::from(p.houses), t + i64::from(p.hotel))
                });
            game.debit(player, houses * per_house + hotels * per_hotel);
        }
        CardEffect::PayEachPlayer(amount) => {
            moved = false;
            for other in PlayerId::all(game.player_count()).filter(|&p| p != player) {
                game.transfer(player, other, amount);
            }
        }
        CardEffect::CollectFromEachPlayer(amount) => {
            moved = false;
            for other in PlayerId::all(game.player_count()).filter(|&p| p != player) {
                game.transfer(other, player, amount);
            }
            // Solvent debtors settle on their own turn; the first insolvent one is out now.
            let insolvent = PlayerId::all(game.player_count())
                .filter(|&p| p != player)
                .find(|&p| is_bankrupt(game, p));
            if let Some(debtor) = insolvent {
                game.eliminate(debtor);
            }
        }
    }

    CardOutcome {
        card,
        effect,
        moved,
        multiplier: effect.sets_multiplier(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDeck;
    use crate::core::GameConfig;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn stack(game: &mut Game, deck: DeckKind, order: &[u8]) {
        let stacked = CardDeck::stacked(deck, order.iter().copied(), &game.rng);
        *game.deck_mut(deck) = stacked;
    }

    #[test]
    fn test_advance_wraps_and_credits_go() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(38);

        assert_eq!(advance(&mut game, p0(), 5), SpaceId::new(3));
        assert_eq!(game.player(p0()).cash, 1700);
    }

    #[test]
    fn test_landing_exactly_on_go_credits() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(36);

        assert_eq!(advance(&mut game, p0(), 4), SpaceId::GO);
        assert_eq!(game.player(p0()).cash, 1700);
    }

    #[test]
    fn test_go_back_never_credits() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(2);
        stack(&mut game, DeckKind::Chance, &[9]);

        let outcome = draw_card(&mut game, p0(), DeckKind::Chance);
        assert!(outcome.moved);
        assert_eq!(game.player(p0()).position, SpaceId::new(39));
        assert_eq!(game.player(p0()).cash, 1500);
    }

    #[test]
    fn test_advance_card_past_go() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(36);
        stack(&mut game, DeckKind::Chance, &[3]);

        draw_card(&mut game, p0(), DeckKind::Chance);
        assert_eq!(game.player(p0()).position, SpaceId::ST_CHARLES_PLACE);
        assert_eq!(game.player(p0()).cash, 1700);
    }

    #[test]
    fn test_nearest_railroad_sets_multiplier() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(22);
        stack(&mut game, DeckKind::Chance, &[4]);

        let outcome = draw_card(&mut game, p0(), DeckKind::Chance);
        assert!(outcome.multiplier);
        assert_eq!(game.player(p0()).position, SpaceId::BO_RAILROAD);
        assert_eq!(game.player(p0()).cash, 1500);
    }

    #[test]
    fn test_go_to_jail_card() {
        let mut game = Game::new(GameConfig::default());
        game.player_mut(p0()).position = SpaceId::new(33);
        stack(&mut game, DeckKind::CommunityChest, &[5]);

        draw_card(&mut game, p0(), DeckKind::CommunityChest);
        let state = game.player(p0());
        assert!(state.in_jail);
        assert_eq!(state.turns_in_jail, 1);
        assert_eq!(state.position, SpaceId::JAIL);
        assert_eq!(state.cash, 1500);
    }

    #[test]
    fn test_repairs() {
        let mut game = Game::new(GameConfig::default());
        for (space, houses, hotel) in [(1u8, 3u8, false), (3, 0, true)] {
            let id = SpaceId::new(space);
            let p = game.board.get_mut(id).as_property_mut().unwrap();
            p.houses = houses;
            p.hotel = hotel;
            p.deed.owner = Some(p0());
            game.player_mut(p0()).holdings.push(id);
        }
        stack(&mut game, DeckKind::CommunityChest, &[13]);

        draw_card(&mut game, p0(), DeckKind::CommunityChest);
        assert_eq!(game.player(p0()).cash, 1500 - 3 * 40 - 115);
    }

    #[test]
    fn test_pay_and_collect_each_player() {
        let mut game = Game::new(GameConfig::default().with_player_count(4));
        stack(&mut game, DeckKind::Chance, &[14]);
        draw_card(&mut game, p0(), DeckKind::Chance);

        assert_eq!(game.player(p0()).cash, 1500 - 150);
        assert_eq!(game.player(PlayerId::new(3)).cash, 1550);

        stack(&mut game, DeckKind::CommunityChest, &[8]);
        draw_card(&mut game, PlayerId::new(1), DeckKind::CommunityChest);
        assert_eq!(game.player(PlayerId::new(1)).cash, 1550 + 30);
        assert_eq!(game.player(p0()).cash, 1340);
    }

    #[test]
    fn test_insolvent_birthday_debtor_is_out_at_once() {
        let mut game = Game::new(GameConfig::default().with_player_count(3));
        let (p1, p2) = (PlayerId::new(1), PlayerId::new(2));
        game.player_mut(p1).cash = 5;
        game.player_mut(p2).cash = 5;
        game.board.get_mut(SpaceId::READING_RAILROAD).deed_mut().unwrap().owner = Some(p2);
        game.player_mut(p2).holdings.push(SpaceId::READING_RAILROAD);
        stack(&mut game, DeckKind::CommunityChest, &[8]);

        draw_card(&mut game, p0(), DeckKind::CommunityChest);

        assert_eq!(game.player(p0()).cash, 1520);
        assert!(game.player(p1).bankrupt);
        assert_eq!(game.status, crate::core::GameStatus::Bankrupt(p1));
        // Player 2 can mortgage the railroad, so the debt waits for their turn.
        assert!(!game.player(p2).bankrupt);
        assert_eq!(game.player(p2).cash, -5);
    }

    #[test]
    fn test_jail_card_is_kept() {
        let mut game = Game::new(GameConfig::default());
        stack(&mut game, DeckKind::Chance, &[8]);

        let outcome = draw_card(&mut game, p0(), DeckKind::Chance);
        assert!(!outcome.moved);
        assert_eq!(game.player(p0()).jail_cards, 1);
    }
}
