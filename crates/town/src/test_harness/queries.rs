//! Tick control and read access for `TestTown`.

use bevy::ecs::event::Events;
use bevy::prelude::*;

use crate::camera::Viewport;
use crate::catalog::Catalogs;
use crate::town::Town;
use crate::town_actions::{
    BuildingCommitted, BuildingDestroyed, CommandResult, CommandResultLog, PlacementRejected,
};
use crate::TickCounter;

use super::TestTown;

impl TestTown {
    // -----------------------------------------------------------------------
    // Ticking
    // -----------------------------------------------------------------------

    /// Runs `n` fixed-update ticks.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    // -----------------------------------------------------------------------
    // Resources
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn town(&self) -> &Town {
        self.resource::<Town>()
    }

    pub fn catalogs(&self) -> &Catalogs {
        self.resource::<Catalogs>()
    }

    pub fn viewport(&self) -> &Viewport {
        self.resource::<Viewport>()
    }

    pub fn tick_count(&self) -> u64 {
        self.resource::<TickCounter>().0
    }

    pub fn last_result(&self) -> Option<&CommandResult> {
        self.resource::<CommandResultLog>().latest().map(|(_, r)| r)
    }

    pub fn building_count(&self) -> usize {
        self.town().buildings().len()
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    fn events<E: Event + Clone>(&self) -> Vec<E> {
        self.resource::<Events<E>>()
            .iter_current_update_events()
            .cloned()
            .collect()
    }

    pub fn committed_events(&self) -> Vec<BuildingCommitted> {
        self.events()
    }

    pub fn destroyed_events(&self) -> Vec<BuildingDestroyed> {
        self.events()
    }

    pub fn rejected_events(&self) -> Vec<PlacementRejected> {
        self.events()
    }
}
