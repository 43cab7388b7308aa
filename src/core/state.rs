//! The `Game` aggregate.
//!
//! One owned value holds everything a turn mutates: the board, the players,
//! both decks, the dice stream, the turn cursor, the bank's house and hotel
//! supply, statistics and the action history. The turn machine takes it by
//! exclusive reference; there is no other shared state.
//!
//! Bank supply changes go through `take_houses`/`return_houses` and friends,
//! which refuse to drive a pool negative or above its starting size.

use std::collections::VecDeque;

use im::Vector;

use super::action::ActionRecord;
use super::config::GameConfig;
use super::error::{EngineError, Result};
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::{DiceRoll, GameRng};
use super::stats::PlayerStats;
use crate::board::{Board, Space, SpaceId};
use crate::cards::{CardDeck, DeckKind};

/// Actions remembered per player for decision context.
pub const RECENT_ACTIONS: usize = 3;

/// Whether play continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// A player went bankrupt; the game is over.
    Bankrupt(PlayerId),
}

/// Full game state.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,

    pub board: Board,
    pub players: PlayerMap<Player>,

    pub chance: CardDeck,
    pub community_chest: CardDeck,

    /// Dice stream.
    pub rng: GameRng,

    /// Whose turn it is.
    pub current: PlayerId,

    /// Completed rounds (incremented when the cursor wraps to seat 0).
    pub round: u32,

    pub remaining_houses: u32,
    pub remaining_hotels: u32,

    pub stats: PlayerMap<PlayerStats>,

    /// Applied actions, oldest first.
    pub history: Vector<ActionRecord>,

    /// Each player's last `RECENT_ACTIONS` records, oldest first.
    recent: PlayerMap<VecDeque<ActionRecord>>,

    pub last_roll: Option<DiceRoll>,

    pub status: GameStatus,
}

impl Game {
    /// Create a game at the start position.
    ///
    /// Panics if `config` fails validation; see [`Game::try_new`].
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        match Self::try_new(config) {
            Ok(game) => game,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a game at the start position, rejecting an invalid config.
    pub fn try_new(config: GameConfig) -> Result<Self> {
        config.validate()?;

        let rng = GameRng::new(config.seed);
        let chance = CardDeck::new(DeckKind::Chance, &rng);
        let community_chest = CardDeck::new(DeckKind::CommunityChest, &rng);
        let cash = config.starting_cash;

        Ok(Self {
            board: Board::standard(),
            players: PlayerMap::new(config.player_count, |id| Player::new(id, cash)),
            chance,
            community_chest,
            rng: rng.for_context("dice"),
            current: PlayerId::new(0),
            round: 0,
            remaining_houses: config.house_supply,
            remaining_hotels: config.hotel_supply,
            stats: PlayerMap::with_default(config.player_count),
            history: Vector::new(),
            recent: PlayerMap::with_default(config.player_count),
            last_roll: None,
            status: GameStatus::InProgress,
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    #[must_use]
    pub fn space(&self, id: SpaceId) -> &Space {
        self.board.get(id)
    }

    /// The space `player` is standing on.
    #[must_use]
    pub fn standing_on(&self, player: PlayerId) -> SpaceId {
        self.players[player].position
    }

    pub fn deck_mut(&mut self, kind: DeckKind) -> &mut CardDeck {
        match kind {
            DeckKind::Chance => &mut self.chance,
            DeckKind::CommunityChest => &mut self.community_chest,
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// Players still in the game.
    pub fn solvent_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .filter(|(_, p)| !p.bankrupt)
            .map(|(id, _)| id)
    }

    /// Holdings of `player` with their spaces, in acquisition order.
    pub fn holdings(&self, player: PlayerId) -> impl Iterator<Item = (SpaceId, &Space)> + '_ {
        self.players[player]
            .holdings
            .iter()
            .map(move |&id| (id, self.board.get(id)))
    }

    // === Turn cursor ===

    /// Move the cursor to the next seat. Wrapping to seat 0 completes a round.
    pub fn advance_turn(&mut self) {
        self.current = self.current.next(self.player_count());
        if self.current.index() == 0 {
            self.round += 1;
            tracing::debug!(round = self.round, "round complete");
        }
    }

    /// Mark `player` bankrupt and end the game.
    pub fn eliminate(&mut self, player: PlayerId) {
        self.players[player].bankrupt = true;
        self.status = GameStatus::Bankrupt(player);
        tracing::info!(%player, cash = self.players[player].cash, "bankrupt");
    }

    // === Cash ===

    pub fn credit(&mut self, player: PlayerId, amount: i64) {
        self.players[player].cash += amount;
    }

    pub fn debit(&mut self, player: PlayerId, amount: i64) {
        self.players[player].cash -= amount;
    }

    /// Move `amount` from `payer` to `payee` as one step.
    pub fn transfer(&mut self, payer: PlayerId, payee: PlayerId, amount: i64) {
        self.debit(payer, amount);
        self.credit(payee, amount);
    }

    // === Bank supply ===

    pub fn take_houses(&mut self, count: u32) -> Result<()> {
        self.remaining_houses = self.remaining_houses.checked_sub(count).ok_or_else(|| {
            EngineError::InvariantViolation(format!(
                "took {count} houses with {} in the bank",
                self.remaining_houses
            ))
        })?;
        Ok(())
    }

    pub fn return_houses(&mut self, count: u32) -> Result<()> {
        let total = self.remaining_houses + count;
        if total > self.config.house_supply {
            return Err(EngineError::InvariantViolation(format!(
                "house bank would hold {total} of {}",
                self.config.house_supply
            )));
        }
        self.remaining_houses = total;
        Ok(())
    }

    pub fn take_hotel(&mut self) -> Result<()> {
        self.remaining_hotels = self.remaining_hotels.checked_sub(1).ok_or_else(|| {
            EngineError::InvariantViolation("took a hotel from an empty bank".into())
        })?;
        Ok(())
    }

    pub fn return_hotel(&mut self) -> Result<()> {
        if self.remaining_hotels >= self.config.hotel_supply {
            return Err(EngineError::InvariantViolation(format!(
                "hotel bank already holds all {}",
                self.config.hotel_supply
            )));
        }
        self.remaining_hotels += 1;
        Ok(())
    }

    /// Houses and hotels standing on the board.
    #[must_use]
    pub fn buildings_in_play(&self) -> (u32, u32) {
        self.board
            .iter()
            .filter_map(|(_, s)| s.as_property())
            .fold((0, 0), |(houses, hotels), p| {
                (houses + u32::from(p.houses), hotels + u32::from(p.hotel))
            })
    }

    // === Action history ===

    /// Record an applied action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        let recent = &mut self.recent[record.player];
        if recent.len() == RECENT_ACTIONS {
            recent.pop_front();
        }
        recent.push_back(record.clone());
        self.history.push_back(record);
    }

    /// Sequence number for the next record.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }

    /// The last `count` actions of `player`, oldest first.
    ///
    /// At most `RECENT_ACTIONS` are kept.
    #[must_use]
    pub fn recent_actions(&self, player: PlayerId, count: usize) -> Vec<ActionRecord> {
        let recent = &self.recent[player];
        let skip = recent.len().saturating_sub(count);
        recent.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;

    #[test]
    fn test_new_game() {
        let game = Game::new(GameConfig::default());

        assert_eq!(game.player_count(), 2);
        assert_eq!(game.current, PlayerId::new(0));
        assert_eq!(game.round, 0);
        assert_eq!(game.remaining_houses, 32);
        assert_eq!(game.remaining_hotels, 12);
        assert_eq!(game.chance.remaining(), 16);
        assert_eq!(game.community_chest.remaining(), 16);
        for (_, p) in game.players.iter() {
            assert_eq!(p.cash, 1500);
            assert_eq!(p.position, SpaceId::GO);
        }
        assert!(!game.is_over());
    }

    #[test]
    #[should_panic(expected = "player_count")]
    fn test_new_game_rejects_bad_config() {
        let _ = Game::new(GameConfig::default().with_player_count(9));
    }

    #[test]
    fn test_try_new_reports_bad_config() {
        let err = Game::try_new(GameConfig::default().with_player_count(1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_advance_turn_counts_rounds() {
        let mut game = Game::new(GameConfig::default().with_player_count(3));

        game.advance_turn();
        assert_eq!(game.current, PlayerId::new(1));
        assert_eq!(game.round, 0);

        game.advance_turn();
        game.advance_turn();
        assert_eq!(game.current, PlayerId::new(0));
        assert_eq!(game.round, 1);
    }

    #[test]
    fn test_transfer() {
        let mut game = Game::new(GameConfig::default());
        game.transfer(PlayerId::new(0), PlayerId::new(1), 1600);

        assert_eq!(game.player(PlayerId::new(0)).cash, -100);
        assert_eq!(game.player(PlayerId::new(1)).cash, 3100);
    }

    #[test]
    fn test_house_bank_bounds() {
        let mut game = Game::new(GameConfig::default().with_supply(4, 1));

        assert!(game.take_houses(4).is_ok());
        assert_eq!(game.remaining_houses, 0);
        assert!(matches!(game.take_houses(1), Err(EngineError::InvariantViolation(_))));

        assert!(game.return_houses(4).is_ok());
        assert!(matches!(game.return_houses(1), Err(EngineError::InvariantViolation(_))));
    }

    #[test]
    fn test_hotel_bank_bounds() {
        let mut game = Game::new(GameConfig::default().with_supply(32, 1));

        assert!(game.return_hotel().is_err());
        assert!(game.take_hotel().is_ok());
        assert!(game.take_hotel().is_err());
        assert!(game.return_hotel().is_ok());
    }

    #[test]
    fn test_eliminate_ends_game() {
        let mut game = Game::new(GameConfig::default());
        game.eliminate(PlayerId::new(1));

        assert!(game.is_over());
        assert_eq!(game.status, GameStatus::Bankrupt(PlayerId::new(1)));
        assert_eq!(game.solvent_players().collect::<Vec<_>>(), vec![PlayerId::new(0)]);
    }

    #[test]
    fn test_recent_actions_filters_by_player() {
        let mut game = Game::new(GameConfig::default());
        for i in 0..5u8 {
            let player = PlayerId::new(i % 2);
            let sequence = game.next_sequence();
            game.record_action(ActionRecord {
                player,
                action: Action::EndTurn,
                round: 0,
                sequence,
                net_worth_before: 0,
                net_worth_after: 0,
            });
        }

        let recent = game.recent_actions(PlayerId::new(0), 3);
        assert_eq!(recent.len(), 3);
        assert_eq!(
            recent.iter().map(|r| r.sequence).collect::<Vec<_>>(),
            vec![0, 2, 4]
        );

        assert_eq!(game.recent_actions(PlayerId::new(1), 3).len(), 2);
        assert_eq!(game.recent_actions(PlayerId::new(0), 1)[0].sequence, 4);
    }

    #[test]
    fn test_recent_actions_keep_only_the_latest() {
        let mut game = Game::new(GameConfig::default());
        for sequence in 0..10 {
            game.record_action(ActionRecord {
                player: PlayerId::new(1),
                action: Action::EndTurn,
                round: 0,
                sequence,
                net_worth_before: 0,
                net_worth_after: 0,
            });
        }

        let recent = game.recent_actions(PlayerId::new(1), 10);
        assert_eq!(
            recent.iter().map(|r| r.sequence).collect::<Vec<_>>(),
            vec![7, 8, 9]
        );
        assert_eq!(game.history.len(), 10);
    }
}
