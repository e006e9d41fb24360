//! Placement and occupancy engine for an isometric medieval town builder.
//!
//! Building types are assembled from reusable blocks on a chunked 3D grid;
//! pending placements follow the cursor, turn, cycle through the catalog and
//! commit only when the overlap, doorway and proximity rules allow it.

pub mod buildings;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod footprint;
pub mod grid;
pub mod pending;
pub mod placement;
pub mod rotation;
pub mod town;
pub mod town_actions;
pub mod town_rng;
pub mod town_sets;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

use bevy::prelude::*;

use camera::Viewport;
use catalog::{CatalogSource, Catalogs, DEFAULT_CATALOG_JSON};
use town::{Town, DEFAULT_TOWN_NAME};
use town_actions::TownActionsPlugin;
use town_rng::TownRng;

pub use town_sets::TownSet;

/// Fixed-update ticks elapsed since startup.
#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub fn advance_tick_counter(mut tick: ResMut<TickCounter>) {
    tick.0 = tick.0.wrapping_add(1);
}

/// Registers the catalogs, the town and the command pipeline.
///
/// Catalogs come from a [`CatalogSource`] resource when one is inserted
/// before the plugin, otherwise from the built-in document. A catalog that
/// fails to load is a broken data file and stops startup.
pub struct TownPlugin;

impl Plugin for TownPlugin {
    fn build(&self, app: &mut App) {
        let source = app
            .world()
            .get_resource::<CatalogSource>()
            .map(|s| s.0.clone());
        let text = source.as_deref().unwrap_or(DEFAULT_CATALOG_JSON);
        let catalogs = match Catalogs::from_json(text) {
            Ok(catalogs) => catalogs,
            Err(e) => {
                error!("Failed to load catalogs: {e}");
                panic!("invalid catalog document: {e}");
            }
        };
        info!(
            "Loaded {} blocks, {} building types, {} road types",
            catalogs.blocks.len(),
            catalogs.building_types.len(),
            catalogs.road_types.len()
        );

        app.insert_resource(Town::new(DEFAULT_TOWN_NAME, &catalogs))
            .insert_resource(catalogs)
            .init_resource::<Viewport>()
            .init_resource::<TownRng>()
            .init_resource::<TickCounter>();

        app.configure_sets(
            FixedUpdate,
            (TownSet::Input, TownSet::Commands, TownSet::PostCommands).chain(),
        );
        app.add_plugins(TownActionsPlugin);
        app.add_systems(
            FixedUpdate,
            advance_tick_counter.in_set(TownSet::PostCommands),
        );
    }
}
