//! Plugin that wires up the command subsystem: queue, executor, log and
//! events.

use bevy::prelude::*;

use super::executor::execute_queued_commands;
use super::result_log::CommandResultLog;
use super::{BuildingCommitted, BuildingDestroyed, CommandQueue, PlacementRejected};
use crate::TownSet;

pub struct TownActionsPlugin;

impl Plugin for TownActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CommandQueue>();
        app.init_resource::<CommandResultLog>();
        app.add_event::<BuildingCommitted>()
            .add_event::<BuildingDestroyed>()
            .add_event::<PlacementRejected>();

        app.add_systems(
            FixedUpdate,
            execute_queued_commands.in_set(TownSet::Commands),
        );
    }
}
