//! Game rules.
//!
//! Everything here operates on a `Game` and is deterministic given its
//! seeded streams.
//!
//! ## Layers
//!
//! - `economy`: net worth, liquidation value, bankruptcy test
//! - `rent`: rent amounts and settlement
//! - `legality`: the ordered legal-action and jail-action lists
//! - `resolver`: applying a chosen action
//! - `effects`: movement, jail and card effects
//! - `turn`: the per-turn state machine driving a `DecisionProvider`
//! - `engine`: seats providers and runs a game to its `GameResult`

pub mod economy;
pub mod effects;
pub mod engine;
pub mod legality;
pub mod rent;
pub mod resolver;
pub mod turn;

pub use economy::{is_bankrupt, liquidation_value, net_worth};
pub use effects::{advance, draw_card, move_back, move_to, release, send_to_jail, CardOutcome};
pub use engine::{Engine, GameEnd, GameResult};
pub use legality::{jail_actions, legal_actions};
pub use rent::{compute_rent, settle_rent};
pub use resolver::apply_action;
pub use turn::{action_loop, default_action, play_turn};
