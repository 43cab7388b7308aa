//! Draw piles.
//!
//! A deck is a queue of card ids consumed front to back. When it runs out it
//! is replaced by a fresh random permutation of all 16 ids; drawn cards are
//! never returned individually.

use std::collections::VecDeque;

use crate::core::GameRng;

use super::effect::{DeckKind, DECK_SIZE};

#[derive(Clone, Debug)]
pub struct CardDeck {
    kind: DeckKind,
    pile: VecDeque<u8>,
    rng: GameRng,
    reshuffles: u32,
}

impl CardDeck {
    /// Create a shuffled deck drawing on its own stream of `rng`.
    #[must_use]
    pub fn new(kind: DeckKind, rng: &GameRng) -> Self {
        let mut rng = rng.for_context(kind.stream_name());
        let pile = rng.permutation(DECK_SIZE).into();
        Self {
            kind,
            pile,
            rng,
            reshuffles: 0,
        }
    }

    /// Create a deck with a fixed draw order, for replays and tests.
    ///
    /// Once `order` is used up the deck reshuffles as usual.
    #[must_use]
    pub fn stacked(kind: DeckKind, order: impl IntoIterator<Item = u8>, rng: &GameRng) -> Self {
        let mut deck = Self::new(kind, rng);
        deck.pile = order.into_iter().filter(|&id| id < DECK_SIZE).collect();
        deck
    }

    /// Pop the front card, reshuffling first if the pile is empty.
    pub fn draw(&mut self) -> u8 {
        if self.pile.is_empty() {
            self.pile = self.rng.permutation(DECK_SIZE).into();
            self.reshuffles += 1;
        }
        // The pile was just refilled if it was empty.
        self.pile.pop_front().unwrap_or_default()
    }

    #[must_use]
    pub fn kind(&self) -> DeckKind {
        self.kind
    }

    /// Cards left before the next reshuffle.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pile.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pile.is_empty()
    }

    /// Number of times the pile has been refilled.
    #[must_use]
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }
}
