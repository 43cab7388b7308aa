//! Rules scenarios: purchases, rent, building, mortgages and bankruptcy.

use monopoly_bench::board::{ColorGroup, SpaceId};
use monopoly_bench::core::{Action, Game, GameConfig, PlayerId};
use monopoly_bench::rules::{
    apply_action, compute_rent, is_bankrupt, legal_actions, liquidation_value, net_worth, settle_rent,
};

const MEDITERRANEAN: SpaceId = SpaceId(1);
const BALTIC: SpaceId = SpaceId(3);
const ST_JAMES: SpaceId = SpaceId(16);
const TENNESSEE: SpaceId = SpaceId(18);
const NEW_YORK: SpaceId = SpaceId(19);

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

fn give(game: &mut Game, player: PlayerId, space: SpaceId) {
    game.board.get_mut(space).deed_mut().unwrap().owner = Some(player);
    game.player_mut(player).holdings.push(space);
}

fn houses_on(game: &Game, space: SpaceId) -> u8 {
    game.space(space).as_property().unwrap().houses
}

/// Buying Mediterranean Avenue from the start.
#[test]
fn test_purchase_from_start() {
    let mut game = Game::new(GameConfig::default());
    game.player_mut(p(0)).position = MEDITERRANEAN;

    let actions = legal_actions(&game, p(0), MEDITERRANEAN);
    assert_eq!(actions[0], Action::EndTurn);
    let buy = Action::Purchase { space: MEDITERRANEAN, price: 60 };
    assert_eq!(actions[1], buy);

    apply_action(&mut game, p(0), buy, MEDITERRANEAN).unwrap();

    assert_eq!(game.player(p(0)).cash, 1440);
    assert_eq!(game.player(p(0)).holdings, vec![MEDITERRANEAN]);
    assert_eq!(game.space(MEDITERRANEAN).deed().unwrap().owner, Some(p(0)));
    assert_eq!(game.stats[p(0)].properties_bought, 1);
    assert_eq!(net_worth(&game, p(0)), 1500);

    // Now owned: no purchase, but a mortgage is on offer.
    let actions = legal_actions(&game, p(0), MEDITERRANEAN);
    assert_eq!(
        actions,
        vec![Action::EndTurn, Action::Mortgage { space: MEDITERRANEAN, value: 30 }]
    );

    // Nor can anyone else buy it.
    game.player_mut(p(1)).position = MEDITERRANEAN;
    let actions = legal_actions(&game, p(1), MEDITERRANEAN);
    assert!(!actions.iter().any(|a| matches!(a, Action::Purchase { .. })));
    assert_eq!(actions, vec![Action::EndTurn]);
}

#[test]
fn test_purchase_needs_more_than_the_price() {
    let mut game = Game::new(GameConfig::default());
    game.player_mut(p(0)).cash = 60;

    let actions = legal_actions(&game, p(0), MEDITERRANEAN);
    assert_eq!(actions, vec![Action::EndTurn]);

    let buy = Action::Purchase { space: MEDITERRANEAN, price: 60 };
    assert!(apply_action(&mut game, p(0), buy, MEDITERRANEAN).is_err());
    assert_eq!(game.player(p(0)).cash, 60);
}

/// Landing on an unimproved street of a complete orange set.
#[test]
fn test_orange_monopoly_rent() {
    let mut game = Game::new(GameConfig::default());
    for space in [ST_JAMES, TENNESSEE, NEW_YORK] {
        give(&mut game, p(0), space);
    }

    let paid = settle_rent(&mut game, p(1), NEW_YORK, 7, false);

    assert_eq!(paid, Some(32));
    assert_eq!(game.player(p(1)).cash, 1500 - 32);
    assert_eq!(game.player(p(0)).cash, 1500 + 32);
    assert_eq!(game.stats[p(0)].rent_received, 32);
    assert_eq!(game.stats[p(1)].rent_paid, 32);
}

#[test]
fn test_mortgaged_space_charges_nothing() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), NEW_YORK);
    game.board.get_mut(NEW_YORK).deed_mut().unwrap().mortgaged = true;

    assert_eq!(settle_rent(&mut game, p(1), NEW_YORK, 7, false), None);
    assert_eq!(game.player(p(1)).cash, 1500);
}

#[test]
fn test_owner_pays_no_rent() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), NEW_YORK);

    assert_eq!(settle_rent(&mut game, p(0), NEW_YORK, 7, false), None);
}

#[test]
fn test_utility_rent_uses_dice() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), SpaceId::ELECTRIC_COMPANY);

    assert_eq!(compute_rent(&game, SpaceId::ELECTRIC_COMPANY, p(0), 9, false), 36);
    assert_eq!(compute_rent(&game, SpaceId::ELECTRIC_COMPANY, p(0), 9, true), 90);

    give(&mut game, p(0), SpaceId::WATER_WORKS);
    assert_eq!(compute_rent(&game, SpaceId::ELECTRIC_COMPANY, p(0), 9, false), 90);
}

#[test]
fn test_even_building_on_brown_set() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), MEDITERRANEAN);
    give(&mut game, p(0), BALTIC);

    let build_med = Action::BuildHouse { space: MEDITERRANEAN, cost: 50 };
    let build_baltic = Action::BuildHouse { space: BALTIC, cost: 50 };
    let actions = legal_actions(&game, p(0), SpaceId::GO);
    assert!(actions.contains(&build_med));
    assert!(actions.contains(&build_baltic));

    apply_action(&mut game, p(0), build_med, SpaceId::GO).unwrap();

    // Mediterranean is ahead now: only Baltic can be built on, only
    // Mediterranean can sell, and neither can be mortgaged.
    let actions = legal_actions(&game, p(0), SpaceId::GO);
    assert!(!actions.contains(&build_med));
    assert!(actions.contains(&build_baltic));
    assert!(actions.contains(&Action::SellHouse { space: MEDITERRANEAN, refund: 25 }));
    assert!(!actions.contains(&Action::SellHouse { space: BALTIC, refund: 25 }));
    assert!(!actions.contains(&Action::Mortgage { space: MEDITERRANEAN, value: 30 }));
    assert!(actions.contains(&Action::Mortgage { space: BALTIC, value: 30 }));

    assert_eq!(game.remaining_houses, 31);
    assert_eq!(game.player(p(0)).cash, 1450);
    assert_eq!(houses_on(&game, MEDITERRANEAN), 1);
}

#[test]
fn test_mortgaged_member_blocks_building() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), MEDITERRANEAN);
    give(&mut game, p(0), BALTIC);
    game.board.get_mut(BALTIC).deed_mut().unwrap().mortgaged = true;

    let actions = legal_actions(&game, p(0), SpaceId::GO);
    assert!(!actions.iter().any(|a| a.is_build()));
    assert!(actions.contains(&Action::Unmortgage { space: BALTIC, cost: 33 }));
}

#[test]
fn test_hotel_cycle_conserves_pool() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), MEDITERRANEAN);
    give(&mut game, p(0), BALTIC);

    for _ in 0..4 {
        for space in [MEDITERRANEAN, BALTIC] {
            apply_action(&mut game, p(0), Action::BuildHouse { space, cost: 50 }, SpaceId::GO).unwrap();
        }
    }
    assert_eq!(game.remaining_houses, 24);

    apply_action(&mut game, p(0), Action::BuildHotel { space: MEDITERRANEAN, cost: 50 }, SpaceId::GO)
        .unwrap();
    assert_eq!(game.remaining_houses, 28);
    assert_eq!(game.remaining_hotels, 11);
    assert_eq!(game.buildings_in_play(), (4, 1));

    apply_action(&mut game, p(0), Action::SellHotel { space: MEDITERRANEAN, refund: 25 }, SpaceId::GO)
        .unwrap();
    assert_eq!(game.remaining_houses, 24);
    assert_eq!(game.remaining_hotels, 12);
    assert_eq!(houses_on(&game, MEDITERRANEAN), 4);

    let (houses, hotels) = game.buildings_in_play();
    assert_eq!(houses + game.remaining_houses, 32);
    assert_eq!(hotels + game.remaining_hotels, 12);
}

#[test]
fn test_hotel_sale_needs_four_houses_in_bank() {
    let mut game = Game::new(GameConfig::default().with_supply(8, 12));
    give(&mut game, p(0), MEDITERRANEAN);
    give(&mut game, p(0), BALTIC);
    for _ in 0..4 {
        for space in [MEDITERRANEAN, BALTIC] {
            apply_action(&mut game, p(0), Action::BuildHouse { space, cost: 50 }, SpaceId::GO).unwrap();
        }
    }
    assert_eq!(game.remaining_houses, 0);
    // No houses left to build with, but hotels are available.
    apply_action(&mut game, p(0), Action::BuildHotel { space: MEDITERRANEAN, cost: 50 }, SpaceId::GO)
        .unwrap();
    apply_action(&mut game, p(0), Action::BuildHouse { space: BALTIC, cost: 50 }, SpaceId::GO)
        .unwrap_err();
    apply_action(&mut game, p(0), Action::BuildHotel { space: BALTIC, cost: 50 }, SpaceId::GO).unwrap();
    assert_eq!(game.remaining_houses, 8);

    // Taking four houses back out for one demotion is fine; the pool is full.
    let sell = Action::SellHotel { space: BALTIC, refund: 25 };
    assert!(legal_actions(&game, p(0), SpaceId::GO).contains(&sell));
    apply_action(&mut game, p(0), sell, SpaceId::GO).unwrap();
    apply_action(&mut game, p(0), Action::SellHotel { space: MEDITERRANEAN, refund: 25 }, SpaceId::GO)
        .unwrap();
    assert_eq!(game.remaining_houses, 0);

    // Both back at four houses, pool empty: a further hotel sale is impossible
    // and selling a house is the only way down.
    let actions = legal_actions(&game, p(0), SpaceId::GO);
    assert!(!actions.iter().any(|a| matches!(a, Action::SellHotel { .. })));
    assert!(actions.contains(&Action::SellHouse { space: MEDITERRANEAN, refund: 25 }));
}

#[test]
fn test_mortgage_round_trip_costs_ten_percent() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), NEW_YORK);

    apply_action(&mut game, p(0), Action::Mortgage { space: NEW_YORK, value: 100 }, SpaceId::GO).unwrap();
    assert_eq!(game.player(p(0)).cash, 1600);
    assert_eq!(net_worth(&game, p(0)), 1600 + 200 - 110);

    apply_action(&mut game, p(0), Action::Unmortgage { space: NEW_YORK, cost: 110 }, SpaceId::GO)
        .unwrap();
    assert_eq!(game.player(p(0)).cash, 1490);
    assert_eq!(game.stats[p(0)].mortgages, 1);
    assert_eq!(game.stats[p(0)].unmortgages, 1);
}

#[test]
fn test_bankruptcy_boundary() {
    let mut game = Game::new(GameConfig::default());
    give(&mut game, p(0), MEDITERRANEAN);
    assert_eq!(liquidation_value(&game, p(0)), 30);

    game.player_mut(p(0)).cash = -30;
    assert!(!is_bankrupt(&game, p(0)));

    game.player_mut(p(0)).cash = -31;
    assert!(is_bankrupt(&game, p(0)));

    // Raising money is all that is offered while in deficit.
    assert_eq!(
        legal_actions(&game, p(0), SpaceId::GO),
        vec![Action::Mortgage { space: MEDITERRANEAN, value: 30 }]
    );
}

#[test]
fn test_group_members_are_fixed() {
    let game = Game::new(GameConfig::default());
    let orange = game.board.group_members(ColorGroup::Orange);
    assert_eq!(orange.as_slice(), &[ST_JAMES, TENNESSEE, NEW_YORK]);
}
