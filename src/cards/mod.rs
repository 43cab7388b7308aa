//! Chance and Community Chest decks.
//!
//! ## Key Types
//!
//! - `CardDeck`: shuffled-without-replacement pile with reshuffle-on-exhaustion
//! - `DeckKind`: which of the two independent piles
//! - `CardEffect`: what a drawn card does

pub mod deck;
pub mod effect;

pub use deck::CardDeck;
pub use effect::{nearest_railroad, nearest_utility, Card, CardEffect, DeckKind, DECK_SIZE};
