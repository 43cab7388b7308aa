//! Board spaces.
//!
//! A space is a tagged variant over the five kinds. The three ownable kinds
//! share a `Deed` record (price, mortgage terms, owner, mortgage flag) that
//! callers reach through `Space::deed` instead of matching each kind.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Position of a space on the board, 0 (Go) through 39.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpaceId(pub u8);

impl SpaceId {
    pub const GO: SpaceId = SpaceId(0);
    pub const READING_RAILROAD: SpaceId = SpaceId(5);
    pub const JAIL: SpaceId = SpaceId(10);
    pub const ST_CHARLES_PLACE: SpaceId = SpaceId(11);
    pub const ELECTRIC_COMPANY: SpaceId = SpaceId(12);
    pub const PENNSYLVANIA_RAILROAD: SpaceId = SpaceId(15);
    pub const ILLINOIS_AVENUE: SpaceId = SpaceId(24);
    pub const BO_RAILROAD: SpaceId = SpaceId(25);
    pub const WATER_WORKS: SpaceId = SpaceId(28);
    pub const GO_TO_JAIL: SpaceId = SpaceId(30);
    pub const SHORT_LINE: SpaceId = SpaceId(35);
    pub const BOARDWALK: SpaceId = SpaceId(39);

    /// Create a new space ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Index into the board.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The space `steps` ahead, wrapping past Go.
    #[must_use]
    pub fn advanced_by(self, steps: u8) -> Self {
        Self(((self.0 as u16 + steps as u16) % super::BOARD_SIZE as u16) as u8)
    }

    /// The space `steps` behind, wrapping below Go to the top of the board.
    #[must_use]
    pub fn moved_back(self, steps: u8) -> Self {
        let size = super::BOARD_SIZE as i16;
        Self((self.0 as i16 - steps as i16).rem_euclid(size) as u8)
    }
}

impl std::fmt::Display for SpaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Color sets of the street properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 8] = [
        ColorGroup::Brown,
        ColorGroup::LightBlue,
        ColorGroup::Pink,
        ColorGroup::Orange,
        ColorGroup::Red,
        ColorGroup::Yellow,
        ColorGroup::Green,
        ColorGroup::DarkBlue,
    ];

    /// Lowercase label used in prompts and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ColorGroup::Brown => "brown",
            ColorGroup::LightBlue => "light_blue",
            ColorGroup::Pink => "pink",
            ColorGroup::Orange => "orange",
            ColorGroup::Red => "red",
            ColorGroup::Yellow => "yellow",
            ColorGroup::Green => "green",
            ColorGroup::DarkBlue => "dark_blue",
        }
    }
}

impl std::fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ownership and mortgage terms shared by properties, railroads and utilities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    pub price: i64,
    /// Cash credited when mortgaging.
    pub mortgage_value: i64,
    /// Cash debited when lifting the mortgage.
    pub unmortgage_cost: i64,
    pub mortgaged: bool,
    pub owner: Option<PlayerId>,
}

impl Deed {
    #[must_use]
    pub fn new(price: i64, mortgage_value: i64, unmortgage_cost: i64) -> Self {
        Self {
            price,
            mortgage_value,
            unmortgage_cost,
            mortgaged: false,
            owner: None,
        }
    }

    /// Check if `player` owns this deed.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }
}

/// A street that can carry houses and a hotel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub deed: Deed,
    /// Rent by improvement level: 0 unimproved, 1-4 houses, 5 hotel.
    pub rent: [i64; 6],
    /// Cost of one house or of the hotel upgrade.
    pub house_cost: i64,
    pub group: ColorGroup,
    pub group_size: u8,
    /// 0-4. Always 0 while `hotel` is set.
    pub houses: u8,
    pub hotel: bool,
}

impl Property {
    /// Houses count, or 5 for a hotel.
    #[must_use]
    pub fn improvement_level(&self) -> u8 {
        self.houses + if self.hotel { 5 } else { 0 }
    }

    /// Buildings on the lot; a hotel counts as one.
    #[must_use]
    pub fn improvement_count(&self) -> u8 {
        self.houses + u8::from(self.hotel)
    }

    #[must_use]
    pub fn is_improved(&self) -> bool {
        self.improvement_level() > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Railroad {
    pub name: String,
    pub deed: Deed,
    /// Rent by the owner's railroad count minus one.
    pub rent: [i64; 4],
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utility {
    pub name: String,
    pub deed: Deed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub name: String,
    pub amount: i64,
}

/// Spaces with no deed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Special {
    Go,
    Jail,
    Chance,
    CommunityChest,
    FreeParking,
    GoToJail,
}

impl Special {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Special::Go => "Go",
            Special::Jail => "Jail/Just Visiting",
            Special::Chance => "Chance",
            Special::CommunityChest => "Community Chest",
            Special::FreeParking => "Free Parking",
            Special::GoToJail => "Go To Jail",
        }
    }
}

/// One of the 40 board positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Property(Property),
    Railroad(Railroad),
    Utility(Utility),
    Tax(Tax),
    Special(Special),
}

impl Space {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Space::Property(p) => &p.name,
            Space::Railroad(r) => &r.name,
            Space::Utility(u) => &u.name,
            Space::Tax(t) => &t.name,
            Space::Special(s) => s.name(),
        }
    }

    /// The deed of an ownable space.
    #[must_use]
    pub fn deed(&self) -> Option<&Deed> {
        match self {
            Space::Property(p) => Some(&p.deed),
            Space::Railroad(r) => Some(&r.deed),
            Space::Utility(u) => Some(&u.deed),
            Space::Tax(_) | Space::Special(_) => None,
        }
    }

    pub fn deed_mut(&mut self) -> Option<&mut Deed> {
        match self {
            Space::Property(p) => Some(&mut p.deed),
            Space::Railroad(r) => Some(&mut r.deed),
            Space::Utility(u) => Some(&mut u.deed),
            Space::Tax(_) | Space::Special(_) => None,
        }
    }

    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Space::Property(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut Property> {
        match self {
            Space::Property(p) => Some(p),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.deed().is_some()
    }

    /// Improvement level for streets, 0 for everything else.
    #[must_use]
    pub fn improvement_level(&self) -> u8 {
        self.as_property().map_or(0, Property::improvement_level)
    }

    /// Ownable and not yet bought.
    #[must_use]
    pub fn is_for_sale(&self) -> bool {
        self.deed().is_some_and(|d| d.owner.is_none())
    }
}
