use std::fmt;

use crate::catalog::BuildingTypeId;
use crate::grid::{BuildingId, PendingHandle};
use crate::placement::PlacementError;
use crate::rotation::RotationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Success,
    /// The command succeeded but the caller should know something (e.g. a
    /// zoom clamped at its limit).
    SuccessWithWarning(String),
    Began(PendingHandle),
    BuiltBuilding(BuildingId),
    BuiltRoad {
        x: i32,
        y: i32,
    },
    /// A building was removed; `x`/`y` is its origin.
    Demolished {
        id: BuildingId,
        building_type: BuildingTypeId,
        x: i32,
        y: i32,
    },
    RoadRemoved {
        x: i32,
        y: i32,
    },
    /// The placement rules refused a commit; the placement stays pending.
    Rejected(PlacementError),
    Error(CommandError),
}

impl CommandResult {
    /// `false` only for `Rejected` and `Error`.
    pub fn is_success(&self) -> bool {
        !matches!(self, CommandResult::Rejected(_) | CommandResult::Error(_))
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            CommandResult::SuccessWithWarning(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn began(&self) -> Option<PendingHandle> {
        match self {
            CommandResult::Began(handle) => Some(*handle),
            _ => None,
        }
    }
}

impl From<PlacementError> for CommandResult {
    fn from(e: PlacementError) -> Self {
        match e {
            PlacementError::UnknownHandle(handle) => {
                CommandResult::Error(CommandError::UnknownHandle(handle))
            }
            PlacementError::InvalidRotation(RotationError::InvalidDelta(delta)) => {
                CommandResult::Error(CommandError::InvalidTurn(delta))
            }
            rejection => CommandResult::Rejected(rejection),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownBuildingType(String),
    UnknownRoadType(String),
    UnknownHandle(PendingHandle),
    InvalidTurn(i32),
    NothingToDestroy { x: i32, y: i32 },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownBuildingType(name) => write!(f, "unknown building type '{name}'"),
            CommandError::UnknownRoadType(name) => write!(f, "unknown road type '{name}'"),
            CommandError::UnknownHandle(handle) => {
                write!(f, "no pending placement with handle {}", handle.0)
            }
            CommandError::InvalidTurn(delta) => write!(f, "cannot turn by {delta} degrees"),
            CommandError::NothingToDestroy { x, y } => write!(f, "nothing to destroy at ({x}, {y})"),
        }
    }
}

impl std::error::Error for CommandError {}
