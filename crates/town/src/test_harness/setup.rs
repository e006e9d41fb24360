//! Builder methods and command helpers for `TestTown`.

use crate::catalog::Catalogs;
use crate::grid::PendingHandle;
use crate::rotation::Rotation;
use crate::town::Town;
use crate::town_actions::{CommandQueue, CommandResult, CommandResultLog, CommandSource, TownCommand};
use crate::town_rng::TownRng;
use crate::TickCounter;

use super::TestTown;

impl TestTown {
    // -----------------------------------------------------------------------
    // Direct setup (bypasses the placement rules)
    // -----------------------------------------------------------------------

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.app.world_mut().insert_resource(TownRng::from_seed(seed));
        self
    }

    /// Spawns a building of type `name` with its preview appearance.
    pub fn with_building(mut self, name: &str, x: i32, y: i32, rotation: Rotation) -> Self {
        let catalogs = self.app.world().resource::<Catalogs>().clone();
        let archetype = catalogs
            .building_types
            .lookup(name)
            .unwrap_or_else(|e| panic!("with_building: {e}"));
        let mut town = self.app.world_mut().resource_mut::<Town>();
        town.spawn_building(
            &catalogs,
            x,
            y,
            rotation,
            archetype.id(),
            archetype.preview().clone(),
        )
        .unwrap_or_else(|e| panic!("with_building({name}, {x}, {y}): {e}"));
        self
    }

    pub fn with_road(mut self, name: &str, x: i32, y: i32) -> Self {
        let catalogs = self.app.world().resource::<Catalogs>().clone();
        let road = catalogs
            .road_types
            .lookup(name)
            .unwrap_or_else(|e| panic!("with_road: {e}"));
        let mut town = self.app.world_mut().resource_mut::<Town>();
        town.spawn_road(x, y, road.id)
            .unwrap_or_else(|e| panic!("with_road({name}, {x}, {y}): {e}"));
        self
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Queues a command for the next tick.
    pub fn send(&mut self, command: TownCommand) -> &mut Self {
        let tick = self.app.world().resource::<TickCounter>().0;
        self.app
            .world_mut()
            .resource_mut::<CommandQueue>()
            .push(tick, CommandSource::Script, command);
        self
    }

    /// Queues `command`, runs one tick and returns its result.
    pub fn run(&mut self, command: TownCommand) -> CommandResult {
        self.send(command);
        self.tick(1);
        self.app
            .world()
            .resource::<CommandResultLog>()
            .latest()
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| panic!("executor recorded no result"))
    }

    /// Begins placing a building type, or a road type if no building type has
    /// that name.
    pub fn begin(&mut self, name: &str) -> PendingHandle {
        let is_building = self.catalogs().building_types.lookup(name).is_ok();
        let command = if is_building {
            TownCommand::BeginBuilding {
                building_type: name.to_string(),
            }
        } else {
            TownCommand::BeginRoad {
                road_type: name.to_string(),
            }
        };
        match self.run(command) {
            CommandResult::Began(handle) => handle,
            other => panic!("begin({name}) failed: {other:?}"),
        }
    }

    /// Begins, moves and commits; returns the commit's result. The placement
    /// stays pending and is returned alongside.
    pub fn place(&mut self, name: &str, x: i32, y: i32) -> (PendingHandle, CommandResult) {
        let handle = self.begin(name);
        self.send(TownCommand::MovePending { handle, x, y });
        let result = self.run(TownCommand::Commit { handle });
        (handle, result)
    }
}
