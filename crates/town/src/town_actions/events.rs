//! Notifications the executor sends to UI and audio collaborators.

use bevy::prelude::*;

use crate::catalog::BuildingTypeId;
use crate::grid::{BuildingId, PendingHandle};
use crate::placement::PlacementError;
use crate::rotation::Rotation;

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BuildingCommitted {
    pub id: BuildingId,
    pub building_type: BuildingTypeId,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
}

#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BuildingDestroyed {
    pub id: BuildingId,
    pub building_type: BuildingTypeId,
    pub x: i32,
    pub y: i32,
}

/// A commit the placement rules refused. The placement is still pending.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlacementRejected {
    pub handle: PendingHandle,
    pub reason: PlacementError,
}
