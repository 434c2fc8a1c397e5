//! Player store tests: clamped adjustments and the accrual pass.

use hamlet_core::{
    accrual::ProductionTable,
    error::TrackerError,
    event::TrackerEvent,
    player::{BuildingKind, ResourceKind},
    store::PlayerStore,
    types::{DurationMs, Millis},
};

const T: Millis = 1_700_000_000_000;
const BLOCK: DurationMs = 900_000;

fn store() -> PlayerStore {
    PlayerStore::new(["nyo", "nand", "jori"], T)
}

#[test]
fn roster_starts_at_minimums() {
    let store = store();
    assert_eq!(store.len(), 3);
    for record in store.players() {
        assert_eq!(record.state.buildings.town_hall, 1);
        assert_eq!(record.state.buildings.farm, 0);
        assert_eq!(record.state.army_count, 0);
        assert!(record.state.resources.is_empty());
        assert_eq!(record.state.last_update, T);
    }
    assert_eq!(store.get(1).unwrap().name, "nand");
}

#[test]
fn decrementing_below_floor_is_a_silent_noop() {
    let mut store = store();
    let before = store.state(0).unwrap().clone();

    let (state, event) = store.set_building_level(0, BuildingKind::TownHall, -1).unwrap();
    assert_eq!(state.buildings.town_hall, 1);
    assert!(event.is_none());

    for kind in BuildingKind::ALL {
        store.set_building_level(0, kind, -3).unwrap();
    }
    store.set_army_count(0, -1).unwrap();
    for kind in ResourceKind::ALL {
        store.set_resource(0, kind, -1).unwrap();
    }

    assert_eq!(store.state(0).unwrap(), &before);
}

#[test]
fn adjustments_clamp_at_floor_from_above() {
    let mut store = store();
    store.set_building_level(0, BuildingKind::TownHall, 3).unwrap();
    let (state, event) = store.set_building_level(0, BuildingKind::TownHall, -10).unwrap();
    assert_eq!(state.buildings.town_hall, 1);
    assert_eq!(
        event,
        Some(TrackerEvent::BuildingLevelChanged {
            player:   0,
            building: BuildingKind::TownHall,
            from:     4,
            to:       1,
        })
    );

    store.set_resource(0, ResourceKind::Wood, 5).unwrap();
    let (state, _) = store.set_resource(0, ResourceKind::Wood, -8).unwrap();
    assert_eq!(state.resources.wood, 0);

    store.set_army_count(0, 2).unwrap();
    let (state, event) = store.set_army_count(0, -1).unwrap();
    assert_eq!(state.army_count, 1);
    assert_eq!(event, Some(TrackerEvent::ArmyCountChanged { player: 0, from: 2, to: 1 }));
}

#[test]
fn adjustments_only_touch_the_addressed_player() {
    let mut store = store();
    store.set_building_level(2, BuildingKind::Farm, 1).unwrap();

    assert_eq!(store.state(2).unwrap().buildings.farm, 1);
    assert_eq!(store.state(0).unwrap().buildings.farm, 0);
    assert_eq!(store.state(1).unwrap().buildings.farm, 0);
}

#[test]
fn returned_snapshot_is_detached() {
    let mut store = store();
    let (snapshot, _) = store.set_resource(0, ResourceKind::Food, 1).unwrap();
    store.set_resource(0, ResourceKind::Food, 1).unwrap();

    assert_eq!(snapshot.resources.food, 1);
    assert_eq!(store.state(0).unwrap().resources.food, 2);
}

#[test]
fn unknown_player_is_a_precondition_violation() {
    let mut store = store();
    let err = store.set_army_count(9, 1).unwrap_err();
    assert!(matches!(err, TrackerError::UnknownPlayer(9)));
    assert!(err.is_precondition_violation());
}

#[test]
fn accrual_pass_updates_every_player() {
    let mut store = store();
    store.set_building_level(0, BuildingKind::Farm, 1).unwrap();
    store.set_building_level(1, BuildingKind::Farm, 2).unwrap();

    let events = store
        .run_accrual_pass(T + 3 * BLOCK as Millis + 10, BLOCK, &ProductionTable::default())
        .unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(store.state(0).unwrap().resources.food, 3);
    assert_eq!(store.state(1).unwrap().resources.food, 6);
    assert_eq!(store.state(2).unwrap().resources.food, 0);
    for record in store.players() {
        assert_eq!(record.state.last_update, T + 3 * BLOCK as Millis);
    }
}

#[test]
fn accrual_pass_inside_a_block_emits_nothing() {
    let mut store = store();
    store.set_building_level(0, BuildingKind::Farm, 1).unwrap();
    let events = store
        .run_accrual_pass(T + 1_000, BLOCK, &ProductionTable::default())
        .unwrap();

    assert!(events.is_empty());
    assert_eq!(store.state(0).unwrap().last_update, T);
}

#[test]
fn failed_accrual_pass_commits_nothing() {
    let mut store = store();
    let before: Vec<_> = store.players().to_vec();

    let err = store
        .run_accrual_pass(T - 1, BLOCK, &ProductionTable::default())
        .unwrap_err();

    assert!(matches!(err, TrackerError::NegativeElapsed { .. }));
    assert_eq!(store.players(), before.as_slice());
}
