//! Board model: the fixed catalog of 40 spaces.
//!
//! Positions never change and spaces are never reordered. Ownership,
//! mortgage flags and improvements are the only mutable parts; legality
//! of changing them lives in `rules`, not here.

pub mod catalog;
pub mod space;

pub use space::{ColorGroup, Deed, Property, Railroad, Space, SpaceId, Special, Tax, Utility};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of spaces on the board.
pub const BOARD_SIZE: usize = 40;

/// The board: 40 spaces indexed by `SpaceId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    spaces: Vec<Space>,
}

impl Board {
    /// The standard board with every deed unowned.
    #[must_use]
    pub fn standard() -> Self {
        let spaces = catalog::standard_spaces();
        debug_assert_eq!(spaces.len(), BOARD_SIZE);
        Self { spaces }
    }

    /// Look up a space by position.
    #[must_use]
    pub fn get(&self, id: SpaceId) -> &Space {
        &self.spaces[id.index()]
    }

    pub fn get_mut(&mut self, id: SpaceId) -> &mut Space {
        &mut self.spaces[id.index()]
    }

    /// Iterate over (SpaceId, &Space) in board order.
    pub fn iter(&self) -> impl Iterator<Item = (SpaceId, &Space)> {
        self.spaces
            .iter()
            .enumerate()
            .map(|(i, s)| (SpaceId(i as u8), s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    /// Positions of every street in `group`, in board order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> SmallVec<[SpaceId; 3]> {
        self.iter()
            .filter(|(_, s)| s.as_property().is_some_and(|p| p.group == group))
            .map(|(id, _)| id)
            .collect()
    }

    /// Find a space by its printed name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<SpaceId> {
        self.iter().find(|(_, s)| s.name() == name).map(|(id, _)| id)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
