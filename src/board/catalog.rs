//! The standard 40-space board.

use super::space::{ColorGroup, Deed, Property, Railroad, Space, Special, Tax, Utility};

fn street(
    name: &str,
    price: i64,
    rent: [i64; 6],
    house_cost: i64,
    group: ColorGroup,
    group_size: u8,
    mortgage_value: i64,
    unmortgage_cost: i64,
) -> Space {
    Space::Property(Property {
        name: name.to_string(),
        deed: Deed::new(price, mortgage_value, unmortgage_cost),
        rent,
        house_cost,
        group,
        group_size,
        houses: 0,
        hotel: false,
    })
}

fn railroad(name: &str) -> Space {
    Space::Railroad(Railroad {
        name: name.to_string(),
        deed: Deed::new(200, 100, 110),
        rent: [25, 50, 100, 200],
    })
}

fn utility(name: &str) -> Space {
    Space::Utility(Utility {
        name: name.to_string(),
        deed: Deed::new(150, 75, 83),
    })
}

fn tax(name: &str, amount: i64) -> Space {
    Space::Tax(Tax {
        name: name.to_string(),
        amount,
    })
}

/// Build the standard board in position order.
#[rustfmt::skip]
pub fn standard_spaces() -> Vec<Space> {
    use ColorGroup::*;

    vec![
        Space::Special(Special::Go),
        street("Mediterranean Avenue", 60, [2, 10, 30, 90, 160, 250], 50, Brown, 2, 30, 33),
        Space::Special(Special::CommunityChest),
        street("Baltic Avenue", 60, [4, 20, 60, 180, 320, 450], 50, Brown, 2, 30, 33),
        tax("Income Tax", 200),
        railroad("Reading Railroad"),
        street("Oriental Avenue", 100, [6, 30, 90, 270, 400, 550], 50, LightBlue, 3, 50, 55),
        Space::Special(Special::Chance),
        street("Vermont Avenue", 100, [6, 30, 90, 270, 400, 550], 50, LightBlue, 3, 50, 55),
        street("Connecticut Avenue", 120, [8, 40, 100, 300, 450, 600], 50, LightBlue, 3, 60, 66),
        Space::Special(Special::Jail),
        street("St. Charles Place", 140, [10, 50, 150, 450, 625, 750], 100, Pink, 3, 70, 77),
        utility("Electric Company"),
        street("States Avenue", 140, [10, 50, 150, 450, 625, 750], 100, Pink, 3, 70, 77),
        street("Virginia Avenue", 160, [12, 60, 180, 500, 700, 900], 100, Pink, 3, 80, 88),
        railroad("Pennsylvania Railroad"),
        street("St. James Place", 180, [14, 70, 200, 550, 750, 950], 100, Orange, 3, 90, 99),
        Space::Special(Special::CommunityChest),
        street("Tennessee Avenue", 180, [14, 70, 200, 550, 750, 950], 100, Orange, 3, 90, 99),
        street("New York Avenue", 200, [16, 80, 220, 600, 800, 1000], 100, Orange, 3, 100, 110),
        Space::Special(Special::FreeParking),
        street("Kentucky Avenue", 220, [18, 90, 250, 700, 875, 1050], 150, Red, 3, 110, 121),
        Space::Special(Special::Chance),
        street("Indiana Avenue", 220, [18, 90, 250, 700, 875, 1050], 150, Red, 3, 110, 121),
        street("Illinois Avenue", 240, [20, 100, 300, 750, 925, 1100], 150, Red, 3, 120, 132),
        railroad("B. & O. Railroad"),
        street("Atlantic Avenue", 260, [22, 110, 330, 800, 975, 1150], 150, Yellow, 3, 130, 143),
        street("Ventnor Avenue", 260, [22, 110, 330, 800, 975, 1150], 150, Yellow, 3, 130, 143),
        utility("Water Works"),
        street("Marvin Gardens", 280, [24, 120, 360, 850, 1025, 1200], 150, Yellow, 3, 140, 154),
        Space::Special(Special::GoToJail),
        street("Pacific Avenue", 300, [26, 130, 390, 900, 1100, 1275], 200, Green, 3, 150, 165),
        street("North Carolina Avenue", 300, [26, 130, 390, 900, 1100, 1275], 200, Green, 3, 150, 165),
        Space::Special(Special::CommunityChest),
        street("Pennsylvania Avenue", 320, [28, 150, 450, 1000, 1200, 1400], 200, Green, 3, 160, 176),
        railroad("Short Line"),
        Space::Special(Special::Chance),
        street("Park Place", 350, [35, 175, 500, 1100, 1300, 1500], 200, DarkBlue, 2, 175, 193),
        tax("Luxury Tax", 100),
        street("Boardwalk", 400, [50, 200, 600, 1400, 1700, 2000], 200, DarkBlue, 2, 200, 220),
    ]
}
