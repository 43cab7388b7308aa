//! Game driver: seats providers and runs turns until the game ends.
//!
//! A game ends at the first bankruptcy or once `max_rounds` rounds have
//! been played. Either way the winner is the solvent player with the
//! highest net worth; ties go to the lower seat.

use serde::{Deserialize, Serialize};

use crate::agents::DecisionProvider;
use crate::core::{EngineError, Game, GameConfig, GameStatus, PlayerId, PlayerMap, Result};

use super::economy::net_worth;
use super::turn::play_turn;

/// Why a game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEnd {
    /// A player could not cover a debt.
    Bankruptcy(PlayerId),
    /// The round limit was reached.
    RoundLimit,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub winning_net_worth: i64,
    /// Rounds completed when the game stopped.
    pub rounds: u32,
    pub end: GameEnd,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

pub struct Engine {
    game: Game,
    providers: PlayerMap<Box<dyn DecisionProvider>>,
}

impl Engine {
    /// Start a fresh game with one provider per seat, in seat order.
    pub fn new(config: GameConfig, providers: Vec<Box<dyn DecisionProvider>>) -> Result<Self> {
        Self::from_game(Game::try_new(config)?, providers)
    }

    /// Resume from an existing state.
    pub fn from_game(game: Game, providers: Vec<Box<dyn DecisionProvider>>) -> Result<Self> {
        if providers.len() != game.player_count() {
            return Err(EngineError::InvalidConfig(format!(
                "{} providers for {} players",
                providers.len(),
                game.player_count()
            )));
        }
        Ok(Self {
            game,
            providers: PlayerMap::from_vec(providers),
        })
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    /// Name of the provider in `player`'s seat.
    #[must_use]
    pub fn provider_name(&self, player: PlayerId) -> &str {
        self.providers[player].name()
    }

    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    /// Whether another turn should be played.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.game.is_over() && self.game.round < self.game.config().max_rounds
    }

    /// Play the current player's turn.
    pub fn play_turn(&mut self) -> Result<()> {
        let current = self.game.current;
        play_turn(&mut self.game, &mut *self.providers[current])
    }

    /// Play until bankruptcy or the round limit.
    pub fn run(&mut self) -> Result<GameResult> {
        while self.is_running() {
            self.play_turn()?;
        }

        let result = self.result();
        tracing::info!(
            winner = %result.winner,
            net_worth = result.winning_net_worth,
            rounds = result.rounds,
            end = ?result.end,
            "game over"
        );
        Ok(result)
    }

    /// Outcome as of now.
    #[must_use]
    pub fn result(&self) -> GameResult {
        let end = match self.game.status {
            GameStatus::Bankrupt(player) => GameEnd::Bankruptcy(player),
            GameStatus::InProgress => GameEnd::RoundLimit,
        };

        let mut best: Option<(PlayerId, i64)> = None;
        for player in self.game.solvent_players() {
            let worth = net_worth(&self.game, player);
            if best.map_or(true, |(_, top)| worth > top) {
                best = Some((player, worth));
            }
        }
        // At least one player stays solvent: the game stops at the first bankruptcy.
        let (winner, winning_net_worth) = best.unwrap_or((PlayerId::new(0), 0));

        GameResult {
            winner,
            winning_net_worth,
            rounds: self.game.round,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{BaselineAgent, RandomAgent, ScriptedAgent};
    use crate::board::SpaceId;

    fn baselines(n: usize) -> Vec<Box<dyn DecisionProvider>> {
        (0..n).map(|_| Box::new(BaselineAgent::new()) as Box<dyn DecisionProvider>).collect()
    }

    #[test]
    fn test_provider_count_must_match() {
        let result = Engine::new(GameConfig::default(), baselines(3));
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig::default().with_player_count(1);
        assert!(Engine::new(config, baselines(1)).is_err());
    }

    #[test]
    fn test_round_limit_ends_game() {
        let config = GameConfig::default().with_max_rounds(5).with_seed(7);
        let mut engine = Engine::new(config, baselines(2)).unwrap();

        let result = engine.run().unwrap();
        if result.end == GameEnd::RoundLimit {
            assert_eq!(result.rounds, 5);
        }
        assert!(!engine.is_running());
        assert_eq!(engine.provider_name(PlayerId::new(0)), "baseline");
    }

    #[test]
    fn test_winner_is_richest_solvent_player() {
        let mut engine = Engine::new(GameConfig::default(), baselines(2)).unwrap();
        let game = engine.game_mut();
        game.player_mut(PlayerId::new(1)).cash = 1600;
        let result = engine.result();
        assert_eq!(result.winner, PlayerId::new(1));
        assert_eq!(result.winning_net_worth, 1600);
        assert_eq!(result.end, GameEnd::RoundLimit);

        // Property counts toward net worth.
        let game = engine.game_mut();
        let boardwalk = SpaceId::BOARDWALK;
        game.board.get_mut(boardwalk).deed_mut().unwrap().owner = Some(PlayerId::new(0));
        game.player_mut(PlayerId::new(0)).holdings.push(boardwalk);
        assert!(engine.result().is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_ties_go_to_lower_seat() {
        let config = GameConfig::default().with_player_count(3);
        let engine = Engine::new(config, baselines(3)).unwrap();
        assert_eq!(engine.result().winner, PlayerId::new(0));
    }

    #[test]
    fn test_bankrupt_player_cannot_win() {
        let mut engine = Engine::new(GameConfig::default(), baselines(2)).unwrap();
        let game = engine.game_mut();
        game.player_mut(PlayerId::new(0)).cash = 5000;
        game.eliminate(PlayerId::new(0));

        let result = engine.result();
        assert_eq!(result.winner, PlayerId::new(1));
        assert_eq!(result.end, GameEnd::Bankruptcy(PlayerId::new(0)));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = || {
            let config = GameConfig::default().with_max_rounds(30).with_seed(99);
            let providers: Vec<Box<dyn DecisionProvider>> =
                vec![Box::new(RandomAgent::new(1)), Box::new(BaselineAgent::new())];
            let mut engine = Engine::new(config, providers).unwrap();
            let result = engine.run().unwrap();
            (result, engine.game().history.len())
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_scripted_seat_defaults_when_drained() {
        let providers: Vec<Box<dyn DecisionProvider>> =
            vec![Box::new(ScriptedAgent::new([])), Box::new(BaselineAgent::new())];
        let config = GameConfig::default().with_max_rounds(1);
        let mut engine = Engine::new(config, providers).unwrap();

        engine.run().unwrap();
        assert!(engine.game().stats[PlayerId::new(0)].defaulted_move >= 1);
    }
}
