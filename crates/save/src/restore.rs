//! Rebuilds a [`Town`] from decoded save data.

use bevy::prelude::*;

use town::catalog::Catalogs;
use town::town::Town;

use crate::save_error::SaveError;
use crate::serialization::SaveData;

const ROAD_LINE: usize = 3;

/// Builds a fresh town holding exactly the saved roads and buildings.
///
/// Saved buildings skip the placement rules: they were legal when committed
/// and the rules may have changed since. Only collisions are refused.
pub fn restore_town(save: &SaveData, catalogs: &Catalogs) -> Result<Town, SaveError> {
    let mut town = Town::new(save.world_name.clone(), catalogs);

    for road in &save.roads {
        let road_type = catalogs
            .road_types
            .lookup(&road.road_type)
            .map_err(|source| SaveError::Catalog {
                line: ROAD_LINE,
                source,
            })?;
        town.spawn_road(road.x, road.y, road_type.id)
            .map_err(|source| SaveError::Overlap {
                line: ROAD_LINE,
                source,
            })?;
    }

    for record in &save.buildings {
        let line = record.line;
        let archetype = catalogs
            .building_types
            .lookup(&record.building_type)
            .map_err(|source| SaveError::Catalog { line, source })?;
        let tokens: Vec<&str> = record.tokens.iter().map(String::as_str).collect();
        let appearance = archetype
            .appearance_from_tokens(&catalogs.blocks, &record.shape, &tokens)
            .map_err(|source| SaveError::Catalog { line, source })?;
        town.spawn_building(
            catalogs,
            record.x,
            record.y,
            record.rotation,
            archetype.id(),
            appearance,
        )
        .map_err(|source| SaveError::Overlap { line, source })?;
    }

    town.refresh_overlay(catalogs);
    info!(
        "Restored town '{}': {} buildings, {} roads",
        town.name,
        save.buildings.len(),
        save.roads.len()
    );
    Ok(town)
}
