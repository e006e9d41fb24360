//! The town: occupancy grid, committed buildings and pending placements
//! behind one owner, so every mutation goes through a single writer.

mod placing;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::buildings::{Building, BuildingStore};
use crate::catalog::{Appearance, BuildingTypeId, Catalogs, RoadTypeId};
use crate::config::BUILDING_LAYERS;
use crate::grid::{BuildingId, CellOccupant, PendingHandle, Road, RoadShape, RoadSlot, TownGrid};
use crate::pending::{PendingKind, PendingStore};
use crate::placement::{
    first_blocked_slot, footprint_reach, origin_in_reach, recompute_mask, validate_road,
    OverlayTarget, PlacementError,
};
use crate::rotation::Rotation;

pub const DEFAULT_TOWN_NAME: &str = "Medieval Rise";

#[derive(Resource, Debug, Clone)]
pub struct Town {
    pub name: String,
    grid: TownGrid,
    buildings: BuildingStore,
    pending: PendingStore,
    overlay: Option<OverlayTarget>,
}

/// What a successful commit produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    Building(BuildingId),
    Road { x: i32, y: i32, road_type: RoadTypeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destroyed {
    Building(Building),
    Road(Road),
}

/// What a cell holds, resolved to catalog names for destroy-mode picking and
/// tooltips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellDescriptor {
    Empty,
    Building {
        id: BuildingId,
        building_type: String,
        group: String,
        block: String,
        variant: String,
        rotation: Rotation,
    },
    Provisional {
        handle: PendingHandle,
    },
    Road {
        road_type: String,
        shape: RoadShape,
    },
}

impl CellDescriptor {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellDescriptor::Empty)
    }
}

impl Town {
    pub fn new(name: impl Into<String>, catalogs: &Catalogs) -> Self {
        Self {
            name: name.into(),
            grid: TownGrid::new(catalogs.grounds.default_ground()),
            buildings: BuildingStore::default(),
            pending: PendingStore::default(),
            overlay: None,
        }
    }

    pub fn grid(&self) -> &TownGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TownGrid {
        &mut self.grid
    }

    pub fn buildings(&self) -> &BuildingStore {
        &self.buildings
    }

    pub fn pending(&self) -> &PendingStore {
        &self.pending
    }

    /// Group and extent the legality mask was last computed for.
    pub fn overlay(&self) -> Option<OverlayTarget> {
        self.overlay
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn query_cell(&self, catalogs: &Catalogs, x: i32, y: i32, z: usize) -> CellDescriptor {
        match self.grid.occupant_at(x, y, z) {
            CellOccupant::Committed(id) => {
                if let Some(descriptor) = self.describe_building(catalogs, id, x, y, z) {
                    return descriptor;
                }
            }
            CellOccupant::Provisional(handle) => return CellDescriptor::Provisional { handle },
            CellOccupant::Empty => {}
        }
        if z != 0 {
            return CellDescriptor::Empty;
        }
        match self.grid.road_slot(x, y) {
            RoadSlot::Empty => CellDescriptor::Empty,
            RoadSlot::Provisional { handle, .. } => CellDescriptor::Provisional { handle },
            RoadSlot::Committed(road_type) => CellDescriptor::Road {
                road_type: catalogs.road_types.get(road_type).name.clone(),
                shape: self.grid.road_connections(x, y).shape(),
            },
        }
    }

    fn describe_building(
        &self,
        catalogs: &Catalogs,
        id: BuildingId,
        x: i32,
        y: i32,
        z: usize,
    ) -> Option<CellDescriptor> {
        let building = self.buildings.get(id)?;
        let placed = building.block_at(x, y, z)?;
        let building_type = catalogs.building_types.get(building.building_type);
        Some(CellDescriptor::Building {
            id,
            building_type: building_type.name().to_string(),
            group: catalogs.building_types.group(building.group).name.clone(),
            block: catalogs.blocks.get(placed.block).name().to_string(),
            variant: catalogs.blocks.variant_name(placed).to_string(),
            rotation: building.rotation,
        })
    }

    /// The committed building with a block anywhere in the column `(x, y)`.
    pub fn building_in_column(&self, x: i32, y: i32) -> Option<&Building> {
        (0..BUILDING_LAYERS)
            .find_map(|z| self.grid.building_at(x, y, z))
            .and_then(|id| self.buildings.get(id))
    }

    // -----------------------------------------------------------------------
    // Committed state
    // -----------------------------------------------------------------------

    /// Removes the building standing on `(x, y)`, or failing that the road
    /// there.
    pub fn destroy_at(&mut self, catalogs: &Catalogs, x: i32, y: i32) -> Option<Destroyed> {
        let destroyed = if let Some(id) = self.building_in_column(x, y).map(|b| b.id) {
            let building = self.remove_building(id)?;
            Destroyed::Building(building)
        } else {
            Destroyed::Road(self.grid.remove_road(x, y)?)
        };
        self.refresh_overlay(catalogs);
        Some(destroyed)
    }

    fn remove_building(&mut self, id: BuildingId) -> Option<Building> {
        let building = self.buildings.remove(id)?;
        for (pos, _) in building.cells() {
            if self.grid.building_at(pos.x, pos.y, pos.z) == Some(id) {
                self.grid.remove_at(pos.x, pos.y, pos.z);
            }
        }
        self.reclaim_pending_slots();
        Some(building)
    }

    /// Hands freed slots back to the pending footprints that cover them.
    /// Earlier handles win where footprints overlap.
    fn reclaim_pending_slots(&mut self) {
        for pending in self.pending.iter() {
            self.grid.occupy_provisional(pending.handle, &pending.cells());
        }
    }

    /// Inserts a building without the placement rules, as when restoring a
    /// saved town. Only overlap with committed buildings and origins out of
    /// reach of the world are refused.
    pub fn spawn_building(
        &mut self,
        catalogs: &Catalogs,
        x: i32,
        y: i32,
        rotation: Rotation,
        building_type: BuildingTypeId,
        appearance: Appearance,
    ) -> Result<BuildingId, PlacementError> {
        if !origin_in_reach(x, y) {
            return Err(PlacementError::OutOfReach { x, y });
        }
        let building_type = catalogs.building_types.get(building_type);
        let layout = building_type.rotated_layout(&appearance, rotation);
        if let Some(pos) = first_blocked_slot(&self.grid, x, y, &layout, false) {
            return Err(PlacementError::Overlap {
                x: pos.x,
                y: pos.y,
                z: pos.z,
            });
        }
        let id = self.buildings.allocate_id();
        let building = Building::new(id, x, y, rotation, building_type, appearance);
        self.commit_building(building);
        Ok(id)
    }

    /// Writes a committed road, replacing any road already there. Refused
    /// only when a building stands on the cell.
    pub fn spawn_road(&mut self, x: i32, y: i32, road_type: RoadTypeId) -> Result<(), PlacementError> {
        validate_road(&self.grid, x, y)?;
        self.grid.place_road(x, y, road_type);
        Ok(())
    }

    fn commit_building(&mut self, building: Building) {
        for (pos, _) in building.cells() {
            self.grid
                .place_at(pos.x, pos.y, pos.z, CellOccupant::Committed(building.id));
        }
        self.buildings.insert(building);
    }

    // -----------------------------------------------------------------------
    // Overlay
    // -----------------------------------------------------------------------

    /// Recomputes the legality mask for the most recent pending building, or
    /// clears it when no building is being placed.
    pub fn refresh_overlay(&mut self, catalogs: &Catalogs) {
        let target = self
            .pending
            .latest_building()
            .and_then(|pending| match &pending.kind {
                PendingKind::Building {
                    building_type,
                    layout,
                    ..
                } => {
                    let types = &catalogs.building_types;
                    let group = types.group(types.get(*building_type).group());
                    Some(OverlayTarget {
                        group: group.id,
                        max_distance: group.max_distance,
                        reach: footprint_reach(layout),
                    })
                }
                PendingKind::Road { .. } => None,
            });
        recompute_mask(&mut self.grid, &self.buildings, &catalogs.blocks, target);
        self.overlay = target;
        if target.is_some() {
            debug!("Overlay recomputed: {} legal cells", self.grid.legal_count());
        }
    }
}
