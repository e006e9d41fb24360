//! Command executor system: drains the [`CommandQueue`] each fixed-update tick,
//! applies every queued [`TownCommand`] to the town, records results in the
//! [`CommandResultLog`] and notifies collaborators through events.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::camera::Viewport;
use crate::catalog::Catalogs;
use crate::grid::PendingHandle;
use crate::pending::PlacementTarget;
use crate::placement::PlacementError;
use crate::town::{Committed, Destroyed, Town};
use crate::town_rng::TownRng;

use super::result_log::CommandResultLog;
use super::{
    BuildingCommitted, BuildingDestroyed, CommandError, CommandQueue, CommandResult,
    PlacementRejected, TownCommand,
};

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Drains all queued commands and executes them in order.
#[allow(clippy::too_many_arguments)]
pub fn execute_queued_commands(
    mut queue: ResMut<CommandQueue>,
    mut log: ResMut<CommandResultLog>,
    mut town: ResMut<Town>,
    mut viewport: ResMut<Viewport>,
    mut rng: ResMut<TownRng>,
    catalogs: Res<Catalogs>,
    mut committed: EventWriter<BuildingCommitted>,
    mut destroyed: EventWriter<BuildingDestroyed>,
    mut rejected: EventWriter<PlacementRejected>,
) {
    for queued in queue.drain() {
        let result = execute_single(
            &queued.command,
            &mut town,
            &mut viewport,
            &mut rng.0,
            &catalogs,
        );

        match &result {
            CommandResult::BuiltBuilding(id) => {
                if let Some(building) = town.buildings().get(*id) {
                    info!(
                        "Built {} #{} at ({}, {})",
                        catalogs.building_types.get(building.building_type).name(),
                        id.0,
                        building.x,
                        building.y
                    );
                    committed.send(BuildingCommitted {
                        id: *id,
                        building_type: building.building_type,
                        x: building.x,
                        y: building.y,
                        rotation: building.rotation,
                    });
                }
            }
            CommandResult::BuiltRoad { x, y } => info!("Built road at ({x}, {y})"),
            CommandResult::Demolished {
                id,
                building_type,
                x,
                y,
            } => {
                info!("Destroyed building #{} at ({x}, {y})", id.0);
                destroyed.send(BuildingDestroyed {
                    id: *id,
                    building_type: *building_type,
                    x: *x,
                    y: *y,
                });
            }
            CommandResult::RoadRemoved { x, y } => info!("Removed road at ({x}, {y})"),
            CommandResult::Rejected(reason) => {
                warn!("Cannot build here: {reason}");
                if let Some(handle) = queued.command.handle() {
                    rejected.send(PlacementRejected {
                        handle,
                        reason: reason.clone(),
                    });
                }
            }
            CommandResult::Error(e) => warn!("{:?} failed: {e}", queued.command),
            _ => debug!("{:?} -> {:?}", queued.command, result),
        }

        log.record(queued.command, result);
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

fn execute_single(
    command: &TownCommand,
    town: &mut Town,
    viewport: &mut Viewport,
    rng: &mut ChaCha8Rng,
    catalogs: &Catalogs,
) -> CommandResult {
    match command {
        TownCommand::BeginBuilding { building_type } => {
            match catalogs.building_types.lookup(building_type) {
                Ok(archetype) => CommandResult::Began(town.begin_placement(
                    catalogs,
                    PlacementTarget::Building(archetype.id()),
                    rng,
                )),
                Err(_) => CommandResult::Error(CommandError::UnknownBuildingType(
                    building_type.clone(),
                )),
            }
        }
        TownCommand::BeginRoad { road_type } => match catalogs.road_types.lookup(road_type) {
            Ok(road) => CommandResult::Began(town.begin_placement(
                catalogs,
                PlacementTarget::Road(road.id),
                rng,
            )),
            Err(_) => CommandResult::Error(CommandError::UnknownRoadType(road_type.clone())),
        },
        TownCommand::MovePending { handle, x, y } => {
            unit_result(town.move_pending(*handle, *x, *y))
        }
        TownCommand::MovePendingToCursor { handle, screen } => {
            execute_move_to_cursor(*handle, *screen, town, viewport)
        }
        TownCommand::TurnPending { handle, delta } => {
            unit_result(town.turn_pending(catalogs, *handle, *delta))
        }
        TownCommand::CyclePendingType { handle, direction } => {
            unit_result(town.cycle_pending_type(catalogs, *handle, *direction, rng))
        }
        TownCommand::Commit { handle } => match town.try_commit(catalogs, *handle, rng) {
            Ok(Committed::Building(id)) => CommandResult::BuiltBuilding(id),
            Ok(Committed::Road { x, y, .. }) => CommandResult::BuiltRoad { x, y },
            Err(e) => e.into(),
        },
        TownCommand::Cancel { handle } => unit_result(town.cancel_pending(catalogs, *handle)),
        TownCommand::Destroy { x, y } => execute_destroy(*x, *y, town, catalogs),
        TownCommand::Pan { dx, dy } => {
            viewport.translate(Vec2::new(*dx, *dy));
            CommandResult::Success
        }
        TownCommand::Zoom { wheel_delta } => {
            if viewport.zoom_by_wheel(*wheel_delta) {
                CommandResult::Success
            } else {
                CommandResult::SuccessWithWarning(format!(
                    "zoom stays at {:.2}, the limit",
                    viewport.zoom
                ))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Execution functions
// ---------------------------------------------------------------------------

fn unit_result(result: Result<(), PlacementError>) -> CommandResult {
    match result {
        Ok(()) => CommandResult::Success,
        Err(e) => e.into(),
    }
}

fn execute_move_to_cursor(
    handle: PendingHandle,
    screen: (f32, f32),
    town: &mut Town,
    viewport: &Viewport,
) -> CommandResult {
    let (x, y) = viewport.screen_to_cell(Vec2::new(screen.0, screen.1));
    unit_result(town.move_pending(handle, x, y))
}

fn execute_destroy(x: i32, y: i32, town: &mut Town, catalogs: &Catalogs) -> CommandResult {
    match town.destroy_at(catalogs, x, y) {
        Some(Destroyed::Building(building)) => CommandResult::Demolished {
            id: building.id,
            building_type: building.building_type,
            x: building.x,
            y: building.y,
        },
        Some(Destroyed::Road(road)) => CommandResult::RoadRemoved {
            x: road.x,
            y: road.y,
        },
        None => CommandResult::Error(CommandError::NothingToDestroy { x, y }),
    }
}
