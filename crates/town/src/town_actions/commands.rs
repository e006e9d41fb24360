use serde::{Deserialize, Serialize};

use crate::grid::PendingHandle;

/// Everything the UI (or a script) can ask of the town. Names are resolved
/// against the catalogs when the command executes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TownCommand {
    BeginBuilding {
        building_type: String,
    },
    BeginRoad {
        road_type: String,
    },
    MovePending {
        handle: PendingHandle,
        x: i32,
        y: i32,
    },
    /// Anchors the placement under a cursor position in screen pixels.
    MovePendingToCursor {
        handle: PendingHandle,
        screen: (f32, f32),
    },
    TurnPending {
        handle: PendingHandle,
        delta: i32,
    },
    CyclePendingType {
        handle: PendingHandle,
        direction: i32,
    },
    Commit {
        handle: PendingHandle,
    },
    Cancel {
        handle: PendingHandle,
    },
    Destroy {
        x: i32,
        y: i32,
    },
    Pan {
        dx: f32,
        dy: f32,
    },
    Zoom {
        wheel_delta: f32,
    },
}

impl TownCommand {
    /// The pending placement the command acts on, if any.
    pub fn handle(&self) -> Option<PendingHandle> {
        match self {
            TownCommand::MovePending { handle, .. }
            | TownCommand::MovePendingToCursor { handle, .. }
            | TownCommand::TurnPending { handle, .. }
            | TownCommand::CyclePendingType { handle, .. }
            | TownCommand::Commit { handle }
            | TownCommand::Cancel { handle } => Some(*handle),
            _ => None,
        }
    }
}
