//! Decision context: what a reasoning provider sees.
//!
//! ## Contents
//!
//! - Every player's position, jail state, balance and net worth
//! - Holdings grouped into sets with "owned/total" counts, buildings and
//!   mortgage flags
//! - The deciding player's last three actions with their net-worth effect
//! - The numbered action list
//!
//! The snapshot is plain serde data. `render_prompt` turns it into the text
//! sent to language models; `to_bytes` packs it with bincode for compact
//! checkpoints.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::board::{Space, SpaceId};
use crate::core::{Game, PlayerId, RECENT_ACTIONS};
use crate::rules::economy::net_worth;

use super::error::AgentError;
use super::provider::Choice;

/// Number of past actions carried in the context.
pub const MEMORY_LEN: usize = RECENT_ACTIONS;

/// Instructions placed ahead of the game state.
pub const DEFAULT_PREAMBLE: &str = "You are playing Monopoly. Your goal is to finish with the highest \
net worth without going bankrupt. Study the board below and choose exactly one of the available \
actions. Respond with a single JSON object of the form {\"selection\": <number>, \"reasons\": \"<short explanation>\"}.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub round: u32,
    /// The player deciding.
    pub player: PlayerId,
    pub players: Vec<PlayerSnapshot>,
    /// The deciding player's most recent actions, oldest first.
    pub memory: Vec<MemoryEntry>,
    /// Action labels in index order.
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub position: SpaceId,
    pub position_name: String,
    pub in_jail: bool,
    pub cash: i64,
    pub net_worth: i64,
    pub jail_cards: u8,
    pub sets: Vec<SetSnapshot>,
}

/// Holdings of one color group, or of all railroads or utilities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetSnapshot {
    pub label: String,
    pub owned: u8,
    pub total: u8,
    pub holdings: Vec<HoldingSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSnapshot {
    pub name: String,
    pub mortgaged: bool,
    /// `None` for railroads and utilities.
    pub buildings: Option<(u8, bool)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub action: String,
    pub net_worth_delta: i64,
    pub net_worth_after: i64,
}

impl DecisionContext {
    /// Snapshot `game` for a decision by `player` among `choices`.
    #[must_use]
    pub fn capture(game: &Game, player: PlayerId, choices: &[Choice]) -> Self {
        let players = game
            .players
            .iter()
            .map(|(id, _)| snapshot_player(game, id))
            .collect();

        let memory = game
            .recent_actions(player, MEMORY_LEN)
            .into_iter()
            .map(|record| MemoryEntry {
                action: record.action.describe(&game.board),
                net_worth_delta: record.net_worth_delta(),
                net_worth_after: record.net_worth_after,
            })
            .collect();

        Self {
            round: game.round,
            player,
            players,
            memory,
            actions: choices.iter().map(|c| c.label(&game.board)).collect(),
        }
    }

    /// Render the full prompt with `preamble` ahead of the game state.
    #[must_use]
    pub fn render_prompt(&self, preamble: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{preamble}\n");

        let _ = writeln!(out, "Past {MEMORY_LEN} Actions:");
        for entry in &self.memory {
            let _ = writeln!(
                out,
                "Action: {} | Effect on net worth: {:+} (${})",
                entry.action, entry.net_worth_delta, entry.net_worth_after
            );
        }

        let _ = writeln!(out, "\nRound {}\n", self.round);
        for snapshot in &self.players {
            self.render_player(&mut out, snapshot);
        }

        let _ = writeln!(out, "Your selection MUST be a number from the list below.");
        let _ = writeln!(out, "Available Actions:");
        for (index, action) in self.actions.iter().enumerate() {
            let _ = writeln!(out, "{index}: {action}");
        }
        out
    }

    fn render_player(&self, out: &mut String, p: &PlayerSnapshot) {
        let you = if p.id == self.player { " (you)" } else { "" };
        let jail = match (p.position == SpaceId::JAIL, p.in_jail) {
            (true, true) => " (In Jail)",
            (true, false) => " (Not in Jail)",
            _ => "",
        };
        let _ = writeln!(out, "{}{you}:", p.id);
        let _ = writeln!(out, "Position: {}{jail}", p.position_name);
        let _ = writeln!(out, "Balance: {}", p.cash);
        let _ = writeln!(out, "Net worth: {}", p.net_worth);
        if p.jail_cards > 0 {
            let _ = writeln!(out, "Get Out of Jail Free cards: {}", p.jail_cards);
        }
        let _ = writeln!(out, "Properties Owned:");
        for set in &p.sets {
            let names: Vec<String> = set.holdings.iter().map(HoldingSnapshot::describe).collect();
            let _ = writeln!(
                out,
                "{} ({}/{} owned): ({})",
                set.label,
                set.owned,
                set.total,
                names.join(", ")
            );
        }
        out.push('\n');
    }

    /// Pack with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AgentError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AgentError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl HoldingSnapshot {
    fn describe(&self) -> String {
        match (self.mortgaged, self.buildings) {
            (true, _) => format!("{} (mortgaged)", self.name),
            (false, Some((houses, hotel))) => {
                format!("{}: ({houses} houses, {} hotels)", self.name, u8::from(hotel))
            }
            (false, None) => self.name.clone(),
        }
    }
}

fn snapshot_player(game: &Game, id: PlayerId) -> PlayerSnapshot {
    let state = game.player(id);
    let mut sets: Vec<SetSnapshot> = Vec::new();

    for (_, space) in game.holdings(id) {
        let Some(deed) = space.deed() else { continue };
        let (label, total, buildings) = match space {
            Space::Property(p) => (p.group.label(), p.group_size, Some((p.houses, p.hotel))),
            Space::Railroad(_) => ("railroad", 4, None),
            Space::Utility(_) => ("utilities", 2, None),
            Space::Tax(_) | Space::Special(_) => continue,
        };

        let holding = HoldingSnapshot {
            name: space.name().to_string(),
            mortgaged: deed.mortgaged,
            buildings,
        };
        match sets.iter_mut().find(|s| s.label == label) {
            Some(set) => {
                set.owned += 1;
                set.holdings.push(holding);
            }
            None => sets.push(SetSnapshot {
                label: label.to_string(),
                owned: 1,
                total,
                holdings: vec![holding],
            }),
        }
    }

    PlayerSnapshot {
        id,
        position: state.position,
        position_name: game.space(state.position).name().to_string(),
        in_jail: state.in_jail,
        cash: state.cash,
        net_worth: net_worth(game, id),
        jail_cards: state.jail_cards,
        sets,
    }
}
