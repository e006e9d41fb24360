//! Pending-placement lifecycle: begin, move, turn, cycle, commit, cancel.

use rand::Rng;

use super::{Committed, Town};
use crate::buildings::Building;
use crate::catalog::{Appearance, BuildingTypeId, Catalogs, RoadTypeId};
use crate::grid::{PendingHandle, RoadSlot};
use crate::pending::{PendingKind, PendingPlacement, PlacementTarget};
use crate::placement::{clamp_origin, validate_building, validate_road, PlacementError};
use crate::rotation::Rotation;

impl Town {
    /// Starts placing a building or road. The placement has no position until
    /// the first [`Town::move_pending`].
    pub fn begin_placement<R: Rng + ?Sized>(
        &mut self,
        catalogs: &Catalogs,
        target: PlacementTarget,
        rng: &mut R,
    ) -> PendingHandle {
        let kind = match target {
            PlacementTarget::Building(id) => {
                let building_type = catalogs.building_types.get(id);
                let appearance = building_type.generate_variant(rng);
                let layout = building_type.rotated_layout(&appearance, Rotation::Deg0);
                PendingKind::Building {
                    building_type: id,
                    rotation: Rotation::Deg0,
                    appearance,
                    layout,
                }
            }
            PlacementTarget::Road(road_type) => PendingKind::Road { road_type },
        };
        let handle = self.pending.insert(kind);
        if matches!(target, PlacementTarget::Building(_)) {
            self.refresh_overlay(catalogs);
        }
        handle
    }

    fn pending_placement(&self, handle: PendingHandle) -> Result<&PendingPlacement, PlacementError> {
        self.pending
            .get(handle)
            .ok_or(PlacementError::UnknownHandle(handle))
    }

    /// Re-anchors the placement's origin at `(x, y)`, pulled back to within
    /// reach of the world when it lies far off the map.
    pub fn move_pending(&mut self, handle: PendingHandle, x: i32, y: i32) -> Result<(), PlacementError> {
        let (x, y) = clamp_origin(x, y);
        let pending = self.pending_placement(handle)?;
        let old_cells = pending.cells();
        let old_origin = pending.origin;
        let road_type = match pending.kind {
            PendingKind::Road { road_type } => Some(road_type),
            PendingKind::Building { .. } => None,
        };

        let pending = self
            .pending
            .get_mut(handle)
            .ok_or(PlacementError::UnknownHandle(handle))?;
        pending.origin = Some((x, y));
        let new_cells = pending.cells();

        match road_type {
            Some(road_type) => {
                self.vacate_road_preview(handle, old_origin);
                self.occupy_road_preview(handle, x, y, road_type);
            }
            None => {
                self.grid.reoccupy_provisional(handle, &old_cells, &new_cells);
                self.reclaim_pending_slots();
            }
        }
        Ok(())
    }

    /// Turns the placement by `delta` degrees, which must be `90` or `-90`.
    /// Roads have no orientation, so only the delta is checked.
    pub fn turn_pending(
        &mut self,
        catalogs: &Catalogs,
        handle: PendingHandle,
        delta: i32,
    ) -> Result<(), PlacementError> {
        let pending = self.pending_placement(handle)?;
        let rotation = pending.rotation().turned(delta)?;
        if let PendingKind::Building {
            building_type,
            appearance,
            ..
        } = &pending.kind
        {
            let (building_type, appearance) = (*building_type, appearance.clone());
            self.reshape(catalogs, handle, building_type, rotation, appearance)?;
            self.refresh_overlay(catalogs);
        }
        Ok(())
    }

    /// Swaps the placement for the next (`direction > 0`) or previous
    /// building or road type in catalog order, wrapping at either end. A new
    /// building type gets a fresh appearance and keeps the current rotation.
    pub fn cycle_pending_type<R: Rng + ?Sized>(
        &mut self,
        catalogs: &Catalogs,
        handle: PendingHandle,
        direction: i32,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        let pending = self.pending_placement(handle)?;
        let origin = pending.origin;
        match pending.kind {
            PendingKind::Building {
                building_type,
                rotation,
                ..
            } => {
                let types = &catalogs.building_types;
                let index = cycled(building_type.0 as usize, direction, types.len());
                let Some(next) = types.by_index(index) else {
                    return Ok(());
                };
                let appearance = next.generate_variant(rng);
                self.reshape(catalogs, handle, next.id(), rotation, appearance)?;
                self.refresh_overlay(catalogs);
            }
            PendingKind::Road { road_type } => {
                let roads = &catalogs.road_types;
                let index = cycled(road_type.0 as usize, direction, roads.len());
                let Some(next) = roads.by_index(index) else {
                    return Ok(());
                };
                if let Some(pending) = self.pending.get_mut(handle) {
                    pending.kind = PendingKind::Road { road_type: next.id };
                }
                if let Some((x, y)) = origin {
                    self.vacate_road_preview(handle, origin);
                    self.occupy_road_preview(handle, x, y, next.id);
                }
            }
        }
        Ok(())
    }

    /// Runs the placement rules against the current position without
    /// changing anything.
    pub fn validate_pending(&self, catalogs: &Catalogs, handle: PendingHandle) -> Result<(), PlacementError> {
        let pending = self.pending_placement(handle)?;
        let (ox, oy) = pending.origin.ok_or(PlacementError::NotPositioned)?;
        match &pending.kind {
            PendingKind::Building {
                building_type,
                rotation,
                layout,
                ..
            } => {
                let types = &catalogs.building_types;
                let group = types.group(types.get(*building_type).group());
                validate_building(
                    &self.grid,
                    &self.buildings,
                    &catalogs.blocks,
                    group,
                    ox,
                    oy,
                    layout,
                    *rotation,
                )
            }
            PendingKind::Road { .. } => validate_road(&self.grid, ox, oy),
        }
    }

    /// Commits the placement if the rules allow it. On rejection nothing
    /// changes and the placement stays pending. A committed building leaves
    /// the placement active at the same spot with a freshly drawn appearance.
    pub fn try_commit<R: Rng + ?Sized>(
        &mut self,
        catalogs: &Catalogs,
        handle: PendingHandle,
        rng: &mut R,
    ) -> Result<Committed, PlacementError> {
        self.validate_pending(catalogs, handle)?;
        let pending = self.pending_placement(handle)?.clone();
        let (ox, oy) = pending.origin.ok_or(PlacementError::NotPositioned)?;
        let cells = pending.cells();

        let committed = match pending.kind {
            PendingKind::Building {
                building_type,
                rotation,
                appearance,
                ..
            } => {
                self.grid.vacate_provisional(handle, &cells);
                let archetype = catalogs.building_types.get(building_type);
                let id = self.buildings.allocate_id();
                self.commit_building(Building::new(id, ox, oy, rotation, archetype, appearance));

                let next = archetype.generate_variant(rng);
                self.reshape(catalogs, handle, building_type, rotation, next)?;
                Committed::Building(id)
            }
            PendingKind::Road { road_type } => {
                self.grid.place_road(ox, oy, road_type);
                Committed::Road {
                    x: ox,
                    y: oy,
                    road_type,
                }
            }
        };
        self.refresh_overlay(catalogs);
        Ok(committed)
    }

    /// Discards the placement and every slot it provisionally held.
    pub fn cancel_pending(&mut self, catalogs: &Catalogs, handle: PendingHandle) -> Result<(), PlacementError> {
        let pending = self
            .pending
            .remove(handle)
            .ok_or(PlacementError::UnknownHandle(handle))?;
        match pending.kind {
            PendingKind::Building { .. } => {
                self.grid.vacate_provisional(handle, &pending.cells());
                self.reclaim_pending_slots();
                self.refresh_overlay(catalogs);
            }
            PendingKind::Road { .. } => self.vacate_road_preview(handle, pending.origin),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Replaces a pending building's type, rotation and appearance and moves
    /// its provisional slots to the new footprint.
    fn reshape(
        &mut self,
        catalogs: &Catalogs,
        handle: PendingHandle,
        building_type: BuildingTypeId,
        rotation: Rotation,
        appearance: Appearance,
    ) -> Result<(), PlacementError> {
        let old_cells = self.pending_placement(handle)?.cells();
        let layout = catalogs
            .building_types
            .get(building_type)
            .rotated_layout(&appearance, rotation);
        let pending = self
            .pending
            .get_mut(handle)
            .ok_or(PlacementError::UnknownHandle(handle))?;
        pending.kind = PendingKind::Building {
            building_type,
            rotation,
            appearance,
            layout,
        };
        let new_cells = pending.cells();
        self.grid.reoccupy_provisional(handle, &old_cells, &new_cells);
        self.reclaim_pending_slots();
        Ok(())
    }

    fn vacate_road_preview(&mut self, handle: PendingHandle, origin: Option<(i32, i32)>) {
        let Some((x, y)) = origin else {
            return;
        };
        if matches!(self.grid.road_slot(x, y), RoadSlot::Provisional { handle: h, .. } if h == handle) {
            self.grid.set_road_slot(x, y, RoadSlot::Empty);
        }
    }

    fn occupy_road_preview(&mut self, handle: PendingHandle, x: i32, y: i32, road_type: RoadTypeId) {
        if self.grid.road_slot(x, y).is_empty() {
            self.grid
                .set_road_slot(x, y, RoadSlot::Provisional { handle, road_type });
        }
    }
}

/// Index `direction` steps away from `current`, wrapping within `len`.
fn cycled(current: usize, direction: i32, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as i64 + direction as i64).rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::cycled;

    #[test]
    fn cycling_wraps_both_ways() {
        assert_eq!(cycled(0, 1, 3), 1);
        assert_eq!(cycled(2, 1, 3), 0);
        assert_eq!(cycled(0, -1, 3), 2);
        assert_eq!(cycled(1, -7, 3), 0);
        assert_eq!(cycled(0, 1, 0), 0);
    }
}
