use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::catalog::fixtures::test_catalogs;
use crate::config::{PLACEMENT_MARGIN, WORLD_SIZE};
use crate::grid::CellPos;
use crate::pending::PlacementTarget;
use crate::rotation::RotationError;

struct Fixture {
    town: Town,
    catalogs: Catalogs,
    rng: ChaCha8Rng,
}

impl Fixture {
    fn new() -> Self {
        let catalogs = test_catalogs();
        Self {
            town: Town::new(DEFAULT_TOWN_NAME, &catalogs),
            catalogs,
            rng: ChaCha8Rng::seed_from_u64(7),
        }
    }

    fn begin(&mut self, name: &str) -> PendingHandle {
        let target = match self.catalogs.building_types.lookup(name) {
            Ok(t) => PlacementTarget::Building(t.id()),
            Err(_) => PlacementTarget::Road(self.catalogs.road_types.lookup(name).unwrap().id),
        };
        self.town.begin_placement(&self.catalogs, target, &mut self.rng)
    }

    fn commit(&mut self, handle: PendingHandle) -> Result<Committed, PlacementError> {
        self.town.try_commit(&self.catalogs, handle, &mut self.rng)
    }

    /// Begins, moves and commits in one go; the placement stays pending.
    fn build(&mut self, name: &str, x: i32, y: i32) -> PendingHandle {
        let handle = self.begin(name);
        self.town.move_pending(handle, x, y).unwrap();
        self.commit(handle).unwrap();
        handle
    }

    fn provisional(&self, handle: PendingHandle) -> Vec<CellPos> {
        self.town.grid().provisional_cells(handle)
    }

    fn expected_cells(&self, handle: PendingHandle) -> Vec<CellPos> {
        let mut cells = self.town.pending().get(handle).unwrap().cells();
        cells.sort();
        cells
    }
}

#[test]
fn moving_registers_exactly_the_current_footprint() {
    let mut f = Fixture::new();
    let hut = f.begin("hut");
    assert!(f.provisional(hut).is_empty());

    f.town.move_pending(hut, 10, 10).unwrap();
    assert_eq!(f.provisional(hut), vec![CellPos::new(10, 10, 0)]);
    f.town.move_pending(hut, 11, 10).unwrap();
    assert_eq!(f.provisional(hut), vec![CellPos::new(11, 10, 0)]);
    assert_eq!(f.town.grid().occupant_at(10, 10, 0), CellOccupant::Empty);
}

#[test]
fn overlapping_moves_leave_no_stale_slots() {
    let mut f = Fixture::new();
    let manor = f.begin("manor");
    f.town.move_pending(manor, 20, 20).unwrap();
    f.town.move_pending(manor, 21, 20).unwrap();
    f.town.move_pending(manor, 21, 21).unwrap();
    assert_eq!(f.provisional(manor), f.expected_cells(manor));
    assert!(f.provisional(manor).iter().all(|c| c.x >= 21 && c.y >= 21));
}

#[test]
fn far_off_map_origins_are_pulled_back() {
    let mut f = Fixture::new();
    let far_edge = WORLD_SIZE as i32 - 1 + PLACEMENT_MARGIN;

    let longhouse = f.begin("longhouse");
    f.town.move_pending(longhouse, i32::MAX - 1, 0).unwrap();
    let origin = f.town.pending().get(longhouse).unwrap().origin;
    assert_eq!(origin, Some((far_edge, 0)));
    assert!(f.provisional(longhouse).is_empty());

    f.town.move_pending(longhouse, i32::MIN, i32::MIN).unwrap();
    let origin = f.town.pending().get(longhouse).unwrap().origin;
    assert_eq!(origin, Some((-PLACEMENT_MARGIN, -PLACEMENT_MARGIN)));
    assert!(f.town.validate_pending(&f.catalogs, longhouse).is_ok());
    f.town.cancel_pending(&f.catalogs, longhouse).unwrap();

    let hut = f.begin("hut");
    f.town.move_pending(hut, i32::MAX, i32::MAX).unwrap();
    assert!(matches!(f.commit(hut), Ok(Committed::Building(_))));
    assert!(f.provisional(hut).is_empty());
    assert_eq!(f.town.grid().occupant_at(255, 255, 0), CellOccupant::Empty);
}

#[test]
fn spawning_far_off_map_is_refused() {
    let mut f = Fixture::new();
    let hut = f.catalogs.building_types.lookup("hut").unwrap();
    let (id, appearance) = (hut.id(), hut.preview().clone());
    assert_eq!(
        f.town
            .spawn_building(&f.catalogs, i32::MAX, 4, Rotation::Deg0, id, appearance),
        Err(PlacementError::OutOfReach { x: i32::MAX, y: 4 })
    );
    assert!(f.town.buildings().is_empty());
}

#[test]
fn overlapping_pending_buildings_keep_their_own_slots() {
    let mut f = Fixture::new();
    let first = f.begin("hut");
    f.town.move_pending(first, 10, 10).unwrap();

    let second = f.begin("hut");
    f.town.move_pending(second, 10, 10).unwrap();
    assert_eq!(f.provisional(first), vec![CellPos::new(10, 10, 0)]);
    assert!(f.provisional(second).is_empty());

    f.town.move_pending(second, 50, 50).unwrap();
    assert_eq!(f.provisional(first), f.expected_cells(first));
    assert_eq!(f.provisional(second), vec![CellPos::new(50, 50, 0)]);

    // The slot passes to the overlapping placement once the first lets go.
    f.town.move_pending(second, 10, 10).unwrap();
    f.town.cancel_pending(&f.catalogs, first).unwrap();
    assert_eq!(f.provisional(second), f.expected_cells(second));
    assert_eq!(
        f.town.grid().occupant_at(10, 10, 0),
        CellOccupant::Provisional(second)
    );
}

#[test]
fn turning_reshapes_the_provisional_footprint() {
    let mut f = Fixture::new();
    let longhouse = f.begin("longhouse");
    f.town.move_pending(longhouse, 30, 30).unwrap();
    assert!(f.provisional(longhouse).iter().all(|c| c.y == 30));

    f.town.turn_pending(&f.catalogs, longhouse, 90).unwrap();
    let cells = f.provisional(longhouse);
    assert_eq!(cells, f.expected_cells(longhouse));
    assert!(cells.iter().all(|c| c.x == 30));
    assert_eq!(cells.iter().map(|c| c.y).max(), Some(32));
    assert_eq!(
        f.town.pending().get(longhouse).unwrap().rotation(),
        Rotation::Deg90
    );

    f.town.turn_pending(&f.catalogs, longhouse, -90).unwrap();
    assert!(f.provisional(longhouse).iter().all(|c| c.y == 30));
}

#[test]
fn turning_by_other_amounts_is_refused() {
    let mut f = Fixture::new();
    let hut = f.begin("hut");
    f.town.move_pending(hut, 3, 3).unwrap();
    assert_eq!(
        f.town.turn_pending(&f.catalogs, hut, 45),
        Err(PlacementError::InvalidRotation(RotationError::InvalidDelta(45)))
    );
    assert_eq!(
        f.town.pending().get(hut).unwrap().rotation(),
        Rotation::Deg0
    );
}

#[test]
fn commit_keeps_the_placement_active() {
    let mut f = Fixture::new();
    let hut = f.begin("hut");
    f.town.move_pending(hut, 10, 10).unwrap();
    let Ok(Committed::Building(id)) = f.commit(hut) else {
        panic!("hut should commit on an empty map");
    };

    assert_eq!(f.town.grid().building_at(10, 10, 0), Some(id));
    assert_eq!(f.town.buildings().len(), 1);
    let pending = f.town.pending().get(hut).unwrap();
    assert_eq!(pending.origin, Some((10, 10)));
    assert_eq!(
        pending.target(),
        PlacementTarget::Building(f.catalogs.building_types.lookup("hut").unwrap().id())
    );
    // The committed hut shadows the next one.
    assert!(f.provisional(hut).is_empty());

    f.town.move_pending(hut, 11, 10).unwrap();
    assert_eq!(f.provisional(hut), vec![CellPos::new(11, 10, 0)]);
}

#[test]
fn rejected_commit_changes_nothing() {
    let mut f = Fixture::new();
    f.build("hut", 10, 10);
    let second = f.begin("hut");
    f.town.move_pending(second, 10, 10).unwrap();
    let before = f.town.grid().occupant_at(10, 10, 0);

    let err = f.commit(second).unwrap_err();
    assert_eq!(err, PlacementError::Overlap { x: 10, y: 10, z: 0 });
    assert!(err.is_rejection());
    assert_eq!(f.town.buildings().len(), 1);
    assert_eq!(f.town.grid().occupant_at(10, 10, 0), before);
    assert!(f.town.pending().get(second).is_some());
}

#[test]
fn unpositioned_and_unknown_placements() {
    let mut f = Fixture::new();
    let hut = f.begin("hut");
    assert_eq!(f.commit(hut), Err(PlacementError::NotPositioned));
    f.town.cancel_pending(&f.catalogs, hut).unwrap();
    assert_eq!(f.commit(hut), Err(PlacementError::UnknownHandle(hut)));
    assert_eq!(
        f.town.move_pending(hut, 1, 1),
        Err(PlacementError::UnknownHandle(hut))
    );
}

#[test]
fn cancel_vacates_every_slot() {
    let mut f = Fixture::new();
    let manor = f.begin("manor");
    f.town.move_pending(manor, 20, 20).unwrap();
    f.town.turn_pending(&f.catalogs, manor, 90).unwrap();
    assert!(!f.provisional(manor).is_empty());

    f.town.cancel_pending(&f.catalogs, manor).unwrap();
    assert!(f.provisional(manor).is_empty());
    assert!(f.town.pending().is_empty());
    assert_eq!(f.town.overlay(), None);
    assert_eq!(f.town.grid().legal_count(), 0);
}

#[test]
fn cycling_walks_catalog_order_and_keeps_rotation() {
    let mut f = Fixture::new();
    let handle = f.begin("hut");
    f.town.move_pending(handle, 40, 40).unwrap();
    f.town.turn_pending(&f.catalogs, handle, 90).unwrap();
    let types = f.catalogs.building_types.clone();
    let target = |town: &Town| town.pending().get(handle).unwrap().target();

    f.town
        .cycle_pending_type(&f.catalogs, handle, 1, &mut f.rng)
        .unwrap();
    assert_eq!(
        target(&f.town),
        PlacementTarget::Building(types.lookup("keep").unwrap().id())
    );
    f.town
        .cycle_pending_type(&f.catalogs, handle, -3, &mut f.rng)
        .unwrap();
    assert_eq!(
        target(&f.town),
        PlacementTarget::Building(types.lookup("manor").unwrap().id())
    );
    assert_eq!(
        f.town.pending().get(handle).unwrap().rotation(),
        Rotation::Deg90
    );
    assert_eq!(f.provisional(handle), f.expected_cells(handle));
}

#[test]
fn cycling_roads_updates_the_preview() {
    let mut f = Fixture::new();
    let road = f.begin("dirt");
    f.town.move_pending(road, 5, 5).unwrap();
    f.town
        .cycle_pending_type(&f.catalogs, road, 1, &mut f.rng)
        .unwrap();
    let stone = f.catalogs.road_types.lookup("stone").unwrap().id;
    assert_eq!(
        f.town.grid().road_slot(5, 5),
        RoadSlot::Provisional {
            handle: road,
            road_type: stone
        }
    );
}

#[test]
fn road_lifecycle() {
    let mut f = Fixture::new();
    let road = f.begin("dirt");
    f.town.move_pending(road, 5, 5).unwrap();
    assert_eq!(
        f.town.query_cell(&f.catalogs, 5, 5, 0),
        CellDescriptor::Provisional { handle: road }
    );

    let dirt = f.catalogs.road_types.lookup("dirt").unwrap().id;
    assert_eq!(
        f.commit(road),
        Ok(Committed::Road {
            x: 5,
            y: 5,
            road_type: dirt
        })
    );
    assert_eq!(
        f.town.query_cell(&f.catalogs, 5, 5, 0),
        CellDescriptor::Road {
            road_type: "dirt".to_string(),
            shape: RoadShape::Isolated
        }
    );

    // Moving on leaves the committed road behind.
    f.town.move_pending(road, 6, 5).unwrap();
    assert_eq!(f.town.grid().road_slot(5, 5), RoadSlot::Committed(dirt));
    f.town.cancel_pending(&f.catalogs, road).unwrap();
    assert_eq!(f.town.grid().road_slot(6, 5), RoadSlot::Empty);
    assert_eq!(f.town.grid().roads().len(), 1);
}

#[test]
fn roads_cannot_go_under_buildings() {
    let mut f = Fixture::new();
    f.build("hut", 7, 7);
    let road = f.begin("dirt");
    f.town.move_pending(road, 7, 7).unwrap();
    assert_eq!(
        f.commit(road),
        Err(PlacementError::Overlap { x: 7, y: 7, z: 0 })
    );
    assert!(f.town.grid().roads().is_empty());
}

#[test]
fn destroy_removes_building_then_road() {
    let mut f = Fixture::new();
    f.build("hut", 10, 10);
    let road = f.begin("dirt");
    f.town.move_pending(road, 12, 12).unwrap();
    f.commit(road).unwrap();
    f.town.cancel_pending(&f.catalogs, road).unwrap();

    assert!(matches!(
        f.town.destroy_at(&f.catalogs, 10, 10),
        Some(Destroyed::Building(b)) if b.x == 10 && b.y == 10
    ));
    assert!(f.town.buildings().is_empty());
    assert_eq!(f.town.grid().building_at(10, 10, 0), None);

    assert!(matches!(
        f.town.destroy_at(&f.catalogs, 12, 12),
        Some(Destroyed::Road(r)) if r.x == 12 && r.y == 12
    ));
    assert_eq!(f.town.destroy_at(&f.catalogs, 12, 12), None);
}

#[test]
fn destroying_hands_freed_slots_to_pending_placements() {
    let mut f = Fixture::new();
    let hut = f.build("hut", 10, 10);
    assert!(f.provisional(hut).is_empty());
    f.town.destroy_at(&f.catalogs, 10, 10).unwrap();
    assert_eq!(f.provisional(hut), vec![CellPos::new(10, 10, 0)]);
}

#[test]
fn query_resolves_names() {
    let mut f = Fixture::new();
    f.build("house", 5, 5);
    let CellDescriptor::Building {
        building_type,
        group,
        block,
        variant,
        rotation,
        ..
    } = f.town.query_cell(&f.catalogs, 5, 5, 0)
    else {
        panic!("expected the house at (5, 5)");
    };
    assert_eq!(building_type, "house");
    assert_eq!(group, "default");
    assert_eq!(block, "door");
    assert_eq!(variant, "oak");
    assert_eq!(rotation, Rotation::Deg0);

    assert!(matches!(
        f.town.query_cell(&f.catalogs, 5, 5, 1),
        CellDescriptor::Building { ref block, .. } if block == "roof"
    ));
    assert!(f.town.query_cell(&f.catalogs, 5, 5, 2).is_empty());
    assert!(f.town.query_cell(&f.catalogs, 6, 5, 0).is_empty());
}

#[test]
fn overlay_follows_the_latest_pending_building() {
    let mut f = Fixture::new();
    let keep = f.begin("keep");
    let forts = f.catalogs.building_types.group_by_name("forts").unwrap().id;
    assert_eq!(f.town.overlay().map(|t| t.group), Some(forts));

    let road = f.begin("dirt");
    assert_eq!(f.town.overlay().map(|t| t.group), Some(forts));

    f.town.cancel_pending(&f.catalogs, keep).unwrap();
    assert_eq!(f.town.overlay(), None);
    f.town.cancel_pending(&f.catalogs, road).unwrap();
}

#[test]
fn committing_narrows_the_overlay() {
    let mut f = Fixture::new();
    let total = crate::config::WORLD_SIZE * crate::config::WORLD_SIZE;
    let hut = f.begin("hut");
    assert_eq!(f.town.grid().legal_count(), total);
    f.town.move_pending(hut, 100, 100).unwrap();
    f.commit(hut).unwrap();
    // Diamond of radius 5 minus the hut itself.
    assert_eq!(f.town.grid().legal_count(), 60);
    assert!(f.town.grid().is_legal(105, 100));
    assert!(!f.town.grid().is_legal(106, 100));
}

#[test]
fn spawning_only_checks_overlap() {
    let mut f = Fixture::new();
    let hut = f.catalogs.building_types.lookup("hut").unwrap();
    let (id, appearance) = (hut.id(), hut.preview().clone());
    f.town
        .spawn_building(&f.catalogs, 3, 3, Rotation::Deg0, id, appearance.clone())
        .unwrap();
    // Far from the first hut, which the placement rules would refuse.
    f.town
        .spawn_building(&f.catalogs, 200, 200, Rotation::Deg0, id, appearance.clone())
        .unwrap();
    assert_eq!(
        f.town
            .spawn_building(&f.catalogs, 3, 3, Rotation::Deg0, id, appearance),
        Err(PlacementError::Overlap { x: 3, y: 3, z: 0 })
    );

    let dirt = f.catalogs.road_types.lookup("dirt").unwrap().id;
    assert!(f.town.spawn_road(3, 3, dirt).is_err());
    assert!(f.town.spawn_road(4, 3, dirt).is_ok());
}
