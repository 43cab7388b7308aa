//! Chance and Community Chest effect tables.
//!
//! Each deck holds 16 card ids. An id maps to a fixed effect; resolving the
//! effect against the game lives in `rules::effects`.

use serde::{Deserialize, Serialize};

use crate::board::SpaceId;

/// Number of distinct cards per deck.
pub const DECK_SIZE: u8 = 16;

/// Which pile a card comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckKind {
    Chance,
    CommunityChest,
}

impl DeckKind {
    /// Effect and printed text for `card`.
    ///
    /// Panics if `card >= DECK_SIZE`; decks only ever hold valid ids.
    #[must_use]
    pub fn card(self, card: u8) -> &'static Card {
        match self {
            DeckKind::Chance => &CHANCE[card as usize],
            DeckKind::CommunityChest => &COMMUNITY_CHEST[card as usize],
        }
    }

    /// Context name for the deck's shuffle stream.
    #[must_use]
    pub fn stream_name(self) -> &'static str {
        match self {
            DeckKind::Chance => "chance",
            DeckKind::CommunityChest => "community_chest",
        }
    }
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckKind::Chance => f.write_str("Chance"),
            DeckKind::CommunityChest => f.write_str("Community Chest"),
        }
    }
}

/// What a card does to the player who drew it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Move forward to a fixed space, collecting Pass-Go on a wrap.
    AdvanceTo(SpaceId),
    /// Move to the next railroad; rent there is doubled.
    AdvanceToNearestRailroad,
    /// Move to the next utility; rent there is 10x the dice.
    AdvanceToNearestUtility,
    /// Move backwards without ever collecting Pass-Go.
    GoBack(u8),
    Collect(i64),
    Pay(i64),
    GoToJail,
    GetOutOfJailFree,
    /// Pay per house and per hotel owned.
    Repairs { per_house: i64, per_hotel: i64 },
    /// Pay every other player.
    PayEachPlayer(i64),
    /// Collect from every other player.
    CollectFromEachPlayer(i64),
}

impl CardEffect {
    /// Whether the card flags the next rent settlement with the multiplier.
    #[must_use]
    pub fn sets_multiplier(self) -> bool {
        matches!(
            self,
            CardEffect::AdvanceToNearestRailroad | CardEffect::AdvanceToNearestUtility
        )
    }
}

/// A printed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Card {
    pub effect: CardEffect,
    pub text: &'static str,
}

const fn card(effect: CardEffect, text: &'static str) -> Card {
    Card { effect, text }
}

pub static CHANCE: [Card; DECK_SIZE as usize] = [
    card(CardEffect::AdvanceTo(SpaceId::BOARDWALK), "Advance to Boardwalk."),
    card(CardEffect::AdvanceTo(SpaceId::GO), "Advance to Go (Collect $200)."),
    card(
        CardEffect::AdvanceTo(SpaceId::ILLINOIS_AVENUE),
        "Advance to Illinois Avenue. If you pass Go, collect $200.",
    ),
    card(
        CardEffect::AdvanceTo(SpaceId::ST_CHARLES_PLACE),
        "Advance to St. Charles Place. If you pass Go, collect $200.",
    ),
    card(
        CardEffect::AdvanceToNearestRailroad,
        "Advance to the nearest Railroad. If owned, pay owner twice the rental.",
    ),
    card(
        CardEffect::AdvanceToNearestRailroad,
        "Advance to the nearest Railroad. If owned, pay owner twice the rental.",
    ),
    card(
        CardEffect::AdvanceToNearestUtility,
        "Advance token to nearest Utility. If owned, pay owner ten times the amount thrown.",
    ),
    card(CardEffect::Collect(50), "Bank pays you dividend of $50."),
    card(CardEffect::GetOutOfJailFree, "Get Out of Jail Free."),
    card(CardEffect::GoBack(3), "Go Back 3 Spaces."),
    card(
        CardEffect::GoToJail,
        "Go to Jail. Go directly to Jail, do not pass Go, do not collect $200.",
    ),
    card(
        CardEffect::Repairs { per_house: 25, per_hotel: 100 },
        "Make general repairs on all your property. For each house pay $25. For each hotel pay $100.",
    ),
    card(CardEffect::Pay(15), "Speeding fine $15."),
    card(
        CardEffect::AdvanceTo(SpaceId::READING_RAILROAD),
        "Take a trip to Reading Railroad. If you pass Go, collect $200.",
    ),
    card(
        CardEffect::PayEachPlayer(50),
        "You have been elected Chairman of the Board. Pay each player $50.",
    ),
    card(CardEffect::Collect(150), "Your building loan matures. Collect $150."),
];

pub static COMMUNITY_CHEST: [Card; DECK_SIZE as usize] = [
    card(CardEffect::AdvanceTo(SpaceId::GO), "Advance to Go (Collect $200)."),
    card(CardEffect::Collect(200), "Bank error in your favor. Collect $200."),
    card(CardEffect::Pay(50), "Doctor's fee. Pay $50."),
    card(CardEffect::Collect(50), "From sale of stock you get $50."),
    card(CardEffect::GetOutOfJailFree, "Get Out of Jail Free."),
    card(
        CardEffect::GoToJail,
        "Go to Jail. Go directly to Jail, do not pass Go, do not collect $200.",
    ),
    card(CardEffect::Collect(100), "Holiday fund matures. Receive $100."),
    card(CardEffect::Collect(20), "Income tax refund. Collect $20."),
    card(
        CardEffect::CollectFromEachPlayer(10),
        "It is your birthday. Collect $10 from every player.",
    ),
    card(CardEffect::Collect(100), "Life insurance matures. Collect $100."),
    card(CardEffect::Pay(100), "Pay hospital fees of $100."),
    card(CardEffect::Pay(50), "Pay school fees of $50."),
    card(CardEffect::Collect(25), "Receive $25 consultancy fee."),
    card(
        CardEffect::Repairs { per_house: 40, per_hotel: 115 },
        "You are assessed for street repair. $40 per house. $115 per hotel.",
    ),
    card(
        CardEffect::Collect(10),
        "You have won second prize in a beauty contest. Collect $10.",
    ),
    card(CardEffect::Collect(100), "You inherit $100."),
];

/// The railroad a "nearest railroad" card sends a player at `from` to.
#[must_use]
pub fn nearest_railroad(from: SpaceId) -> SpaceId {
    match from.0 {
        36.. | 0..=5 => SpaceId::READING_RAILROAD,
        6..=15 => SpaceId::PENNSYLVANIA_RAILROAD,
        16..=25 => SpaceId::BO_RAILROAD,
        _ => SpaceId::SHORT_LINE,
    }
}

/// The utility a "nearest utility" card sends a player at `from` to.
#[must_use]
pub fn nearest_utility(from: SpaceId) -> SpaceId {
    if (13..=28).contains(&from.0) {
        SpaceId::WATER_WORKS
    } else {
        SpaceId::ELECTRIC_COMPANY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_full() {
        assert_eq!(CHANCE.len(), 16);
        assert_eq!(COMMUNITY_CHEST.len(), 16);
        assert!(CHANCE.iter().all(|c| !c.text.is_empty()));
    }

    #[test]
    fn test_card_lookup() {
        assert_eq!(
            DeckKind::Chance.card(0).effect,
            CardEffect::AdvanceTo(SpaceId::BOARDWALK)
        );
        assert_eq!(DeckKind::Chance.card(9).effect, CardEffect::GoBack(3));
        assert_eq!(
            DeckKind::CommunityChest.card(8).effect,
            CardEffect::CollectFromEachPlayer(10)
        );
    }

    #[test]
    fn test_multiplier_cards() {
        let flagged = CHANCE.iter().filter(|c| c.effect.sets_multiplier()).count();
        assert_eq!(flagged, 3);
        assert!(!COMMUNITY_CHEST.iter().any(|c| c.effect.sets_multiplier()));
    }

    #[test]
    fn test_nearest_railroad_from_chance_spaces() {
        assert_eq!(nearest_railroad(SpaceId::new(7)), SpaceId::PENNSYLVANIA_RAILROAD);
        assert_eq!(nearest_railroad(SpaceId::new(22)), SpaceId::BO_RAILROAD);
        assert_eq!(nearest_railroad(SpaceId::new(36)), SpaceId::READING_RAILROAD);
    }

    #[test]
    fn test_nearest_utility_from_chance_spaces() {
        assert_eq!(nearest_utility(SpaceId::new(7)), SpaceId::ELECTRIC_COMPANY);
        assert_eq!(nearest_utility(SpaceId::new(22)), SpaceId::WATER_WORKS);
        assert_eq!(nearest_utility(SpaceId::new(36)), SpaceId::ELECTRIC_COMPANY);
    }
}
