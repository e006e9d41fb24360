//! Integration tests using the `TestTown` harness.
//!
//! These spin up a headless Bevy App with `TownPlugin` and drive it through
//! the command queue, the same way the UI does.


use crate::catalog::fixtures::TEST_CATALOG_JSON;
use crate::config::WORLD_SIZE;
use crate::test_harness::TestTown;
use crate::town_actions::{CommandResult, TownCommand};

// ===========================================================================
// Harness bootstrap tests
// ===========================================================================

#[test]
fn empty_town_has_no_buildings_or_roads() {
    let town = TestTown::new();
    assert_eq!(town.building_count(), 0);
    assert!(town.town().grid().roads().is_empty());
    assert!(town.town().pending().is_empty());
}

#[test]
fn builtin_catalog_is_loaded_by_default() {
    let town = TestTown::new();
    let catalogs = town.catalogs();
    assert!(catalogs.building_types.lookup("cottage").is_ok());
    assert!(catalogs.road_types.lookup("dirt").is_ok());
}

#[test]
fn catalog_source_replaces_builtin() {
    let town = TestTown::with_catalog(TEST_CATALOG_JSON);
    assert!(town.catalogs().building_types.lookup("cottage").is_err());
    assert!(town.catalogs().building_types.lookup("hut").is_ok());
}

#[test]
fn tick_counter_advances_per_fixed_tick() {
    let mut town = TestTown::new();
    let before = town.tick_count();
    town.tick(3);
    assert_eq!(town.tick_count(), before + 3);
}

#[test]
fn commands_run_in_queue_order() {
    let mut town = TestTown::with_catalog(TEST_CATALOG_JSON);
    let handle = town.begin("hut");
    town.send(TownCommand::MovePending {
        handle,
        x: 30,
        y: 30,
    })
    .send(TownCommand::Commit { handle })
    .send(TownCommand::MovePending {
        handle,
        x: 31,
        y: 30,
    })
    .send(TownCommand::Commit { handle });
    town.tick(1);

    assert_eq!(town.building_count(), 2);
    assert!(matches!(
        town.last_result(),
        Some(CommandResult::BuiltBuilding(_))
    ));
}

#[test]
fn builtin_catalog_first_building_goes_anywhere() {
    let mut town = TestTown::new();
    let far = WORLD_SIZE as i32 - 2;
    let (_, result) = town.place("cottage", far, far);
    assert!(result.is_success(), "got {result:?}");
}
