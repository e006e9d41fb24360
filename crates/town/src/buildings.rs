//! Committed buildings and the store that owns them.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::{
    Appearance, BlockCatalog, BuildingType, BuildingTypeId, GroupId, PlacedBlock,
};
use crate::footprint::Footprint;
use crate::grid::{BuildingId, CellPos};
use crate::rotation::Rotation;

/// A placed building. `appearance` is kept unrotated, as persisted; `layout`
/// is the rotated footprint the grid actually holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Building {
    pub id: BuildingId,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
    pub building_type: BuildingTypeId,
    pub group: GroupId,
    pub appearance: Appearance,
    layout: Footprint<Option<PlacedBlock>>,
}

impl Building {
    pub fn new(
        id: BuildingId,
        x: i32,
        y: i32,
        rotation: Rotation,
        building_type: &BuildingType,
        appearance: Appearance,
    ) -> Self {
        let layout = building_type.rotated_layout(&appearance, rotation);
        Self {
            id,
            x,
            y,
            rotation,
            building_type: building_type.id(),
            group: building_type.group(),
            appearance,
            layout,
        }
    }

    pub fn layout(&self) -> &Footprint<Option<PlacedBlock>> {
        &self.layout
    }

    /// Absolute slots covered by the building, with the block in each.
    pub fn cells(&self) -> impl Iterator<Item = (CellPos, PlacedBlock)> + '_ {
        footprint_cells(self.x, self.y, &self.layout)
    }

    /// Reverse mapping from an absolute slot into the rotated footprint.
    pub fn block_at(&self, x: i32, y: i32, z: usize) -> Option<PlacedBlock> {
        let (dx, dy) = (x - self.x, y - self.y);
        if dx < 0 || dy < 0 {
            return None;
        }
        self.layout.get(dx as usize, dy as usize, z).copied().flatten()
    }

    /// Cells this building's ground-level doors open onto.
    pub fn frontage_cells(&self, blocks: &BlockCatalog) -> Vec<(i32, i32)> {
        frontage_cells(self.x, self.y, &self.layout, self.rotation, blocks)
    }
}

/// Absolute slots of a rotated layout anchored at `(ox, oy)`.
pub fn footprint_cells(
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
) -> impl Iterator<Item = (CellPos, PlacedBlock)> + '_ {
    layout.occupied().map(move |((dx, dy, z), placed)| {
        (CellPos::new(ox + dx as i32, oy + dy as i32, z), *placed)
    })
}

/// Frontage cells of every layer-0 block of a rotated layout.
pub fn frontage_cells(
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    rotation: Rotation,
    blocks: &BlockCatalog,
) -> Vec<(i32, i32)> {
    let mut cells = Vec::new();
    for (pos, placed) in footprint_cells(ox, oy, layout) {
        if pos.z != 0 {
            continue;
        }
        cells.extend(
            blocks
                .get(placed.block)
                .frontage_cells(rotation, pos.x, pos.y, placed.variant),
        );
    }
    cells.sort_unstable();
    cells.dedup();
    cells
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BuildingStore {
    buildings: BTreeMap<BuildingId, Building>,
    next_id: u32,
    group_counts: HashMap<GroupId, usize>,
}

impl BuildingStore {
    /// Reserves the id the next inserted building should carry.
    pub fn allocate_id(&mut self) -> BuildingId {
        let id = BuildingId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, building: Building) {
        *self.group_counts.entry(building.group).or_insert(0) += 1;
        if let Some(previous) = self.buildings.insert(building.id, building) {
            self.decrement(previous.group);
        }
    }

    pub fn remove(&mut self, id: BuildingId) -> Option<Building> {
        let building = self.buildings.remove(&id)?;
        self.decrement(building.group);
        Some(building)
    }

    fn decrement(&mut self, group: GroupId) {
        if let Some(count) = self.group_counts.get_mut(&group) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn get(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.get(&id)
    }

    /// Buildings in id (placement) order.
    pub fn iter(&self) -> impl Iterator<Item = &Building> {
        self.buildings.values()
    }

    pub fn in_group(&self, group: GroupId) -> impl Iterator<Item = &Building> {
        self.buildings.values().filter(move |b| b.group == group)
    }

    pub fn count_in_group(&self, group: GroupId) -> usize {
        self.group_counts.get(&group).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::test_catalogs;

    #[test]
    fn rotated_cells_map_back_into_the_layout() {
        let catalogs = test_catalogs();
        let longhouse = catalogs.building_types.lookup("longhouse").unwrap();
        let building = Building::new(
            BuildingId(0),
            20,
            30,
            Rotation::Deg90,
            longhouse,
            longhouse.preview().clone(),
        );
        // 3x1 turned a quarter becomes 1x3.
        assert_eq!(building.layout().size_x(), 1);
        assert_eq!(building.layout().size_y(), 3);
        let cells: Vec<CellPos> = building.cells().map(|(pos, _)| pos).collect();
        assert_eq!(cells.len(), 6);
        for (pos, placed) in building.cells() {
            assert_eq!(building.block_at(pos.x, pos.y, pos.z), Some(placed));
        }
        assert_eq!(building.block_at(21, 30, 0), None);
        assert_eq!(building.block_at(19, 30, 0), None);
    }

    #[test]
    fn frontage_turns_with_the_building() {
        let catalogs = test_catalogs();
        let house = catalogs.building_types.lookup("house").unwrap();
        let at = |rotation| {
            Building::new(BuildingId(0), 5, 5, rotation, house, house.preview().clone())
                .frontage_cells(&catalogs.blocks)
        };
        assert_eq!(at(Rotation::Deg0), vec![(5, 6)]);
        assert_eq!(at(Rotation::Deg180), vec![(5, 4)]);
    }

    #[test]
    fn store_tracks_group_counts() {
        let catalogs = test_catalogs();
        let hut = catalogs.building_types.lookup("hut").unwrap();
        let keep = catalogs.building_types.lookup("keep").unwrap();
        let mut store = BuildingStore::default();

        let a = store.allocate_id();
        let b = store.allocate_id();
        assert_ne!(a, b);
        store.insert(Building::new(a, 0, 0, Rotation::Deg0, hut, hut.preview().clone()));
        store.insert(Building::new(b, 4, 0, Rotation::Deg0, keep, keep.preview().clone()));
        assert_eq!(store.count_in_group(hut.group()), 1);
        assert_eq!(store.count_in_group(keep.group()), 1);
        assert_eq!(store.in_group(keep.group()).count(), 1);

        assert!(store.remove(a).is_some());
        assert!(store.remove(a).is_none());
        assert_eq!(store.count_in_group(hut.group()), 0);
        assert_eq!(store.len(), 1);
    }
}
