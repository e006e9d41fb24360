use serde::{Deserialize, Serialize};

use crate::catalog::RoadTypeId;

/// Identifier of a committed building, unique for the lifetime of a town.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildingId(pub u32);

/// Identifier of a pending (not yet committed) placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PendingHandle(pub u32);

/// Contents of one building slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellOccupant {
    #[default]
    Empty,
    Committed(BuildingId),
    Provisional(PendingHandle),
}

impl CellOccupant {
    pub fn is_empty(self) -> bool {
        matches!(self, CellOccupant::Empty)
    }

    pub fn is_committed(self) -> bool {
        matches!(self, CellOccupant::Committed(_))
    }

    pub fn building(self) -> Option<BuildingId> {
        match self {
            CellOccupant::Committed(id) => Some(id),
            _ => None,
        }
    }

    pub fn pending(self) -> Option<PendingHandle> {
        match self {
            CellOccupant::Provisional(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Contents of one road slot. Roads live on their own layer alongside layer 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoadSlot {
    #[default]
    Empty,
    Committed(RoadTypeId),
    Provisional {
        handle: PendingHandle,
        road_type: RoadTypeId,
    },
}

impl RoadSlot {
    pub fn is_empty(self) -> bool {
        matches!(self, RoadSlot::Empty)
    }

    pub fn committed(self) -> Option<RoadTypeId> {
        match self {
            RoadSlot::Committed(road_type) => Some(road_type),
            _ => None,
        }
    }

    /// Road type shown in this slot, committed or not.
    pub fn road_type(self) -> Option<RoadTypeId> {
        match self {
            RoadSlot::Empty => None,
            RoadSlot::Committed(road_type) | RoadSlot::Provisional { road_type, .. } => {
                Some(road_type)
            }
        }
    }
}

/// A committed road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Road {
    pub x: i32,
    pub y: i32,
    pub road_type: RoadTypeId,
}

/// Absolute slot coordinate: planar cell plus building layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: usize,
}

impl CellPos {
    pub fn new(x: i32, y: i32, z: usize) -> Self {
        Self { x, y, z }
    }
}
