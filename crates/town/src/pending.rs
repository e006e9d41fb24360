//! Pending placements: buildings or roads that follow the cursor before the
//! player confirms them.

use std::collections::BTreeMap;

use crate::buildings::footprint_cells;
use crate::catalog::{Appearance, BuildingTypeId, PlacedBlock, RoadTypeId};
use crate::footprint::Footprint;
use crate::grid::{CellPos, PendingHandle};
use crate::rotation::Rotation;

/// What a pending placement will become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementTarget {
    Building(BuildingTypeId),
    Road(RoadTypeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingKind {
    Building {
        building_type: BuildingTypeId,
        rotation: Rotation,
        /// Unrotated, as it will be persisted.
        appearance: Appearance,
        /// `appearance` turned by `rotation`.
        layout: Footprint<Option<PlacedBlock>>,
    },
    Road {
        road_type: RoadTypeId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPlacement {
    pub handle: PendingHandle,
    pub kind: PendingKind,
    /// `None` until the first move.
    pub origin: Option<(i32, i32)>,
}

impl PendingPlacement {
    pub fn target(&self) -> PlacementTarget {
        match &self.kind {
            PendingKind::Building { building_type, .. } => PlacementTarget::Building(*building_type),
            PendingKind::Road { road_type } => PlacementTarget::Road(*road_type),
        }
    }

    pub fn rotation(&self) -> Rotation {
        match &self.kind {
            PendingKind::Building { rotation, .. } => *rotation,
            PendingKind::Road { .. } => Rotation::Deg0,
        }
    }

    pub fn is_building(&self) -> bool {
        matches!(self.kind, PendingKind::Building { .. })
    }

    /// Building slots this placement covers at its current origin. Roads and
    /// unpositioned placements cover none.
    pub fn cells(&self) -> Vec<CellPos> {
        match (&self.kind, self.origin) {
            (PendingKind::Building { layout, .. }, Some((ox, oy))) => {
                footprint_cells(ox, oy, layout).map(|(pos, _)| pos).collect()
            }
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PendingStore {
    entries: BTreeMap<PendingHandle, PendingPlacement>,
    next: u32,
}

impl PendingStore {
    pub fn insert(&mut self, kind: PendingKind) -> PendingHandle {
        let handle = PendingHandle(self.next);
        self.next += 1;
        self.entries.insert(
            handle,
            PendingPlacement {
                handle,
                kind,
                origin: None,
            },
        );
        handle
    }

    pub fn get(&self, handle: PendingHandle) -> Option<&PendingPlacement> {
        self.entries.get(&handle)
    }

    pub fn get_mut(&mut self, handle: PendingHandle) -> Option<&mut PendingPlacement> {
        self.entries.get_mut(&handle)
    }

    pub fn remove(&mut self, handle: PendingHandle) -> Option<PendingPlacement> {
        self.entries.remove(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingPlacement> {
        self.entries.values()
    }

    /// The most recently begun pending building; it drives the overlay.
    pub fn latest_building(&self) -> Option<&PendingPlacement> {
        self.entries.values().rev().find(|p| p.is_building())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
