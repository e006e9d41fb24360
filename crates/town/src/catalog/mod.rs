//! Immutable registries of blocks, building types, road types and grounds.
//!
//! Catalogs are built once from a JSON document (see [`CatalogConfig`]) and
//! shared behind `Arc`s, so cloning the [`Catalogs`] resource is cheap and every
//! consumer sees the same tables. Ids are dense indices in lexicographic name
//! order, identical every time the same document is loaded.

pub mod blocks;
pub mod building_types;
pub mod config;
pub mod error;
pub mod road_types;

#[cfg(test)]
pub(crate) mod fixtures;

use std::sync::Arc;

use bevy::prelude::*;

pub use blocks::{BlockArchetype, BlockCatalog, BlockId, BlockVariant, Faces, PlacedBlock, VariantId};
pub use building_types::{
    Appearance, BuildingType, BuildingTypeCatalog, BuildingTypeId, FootprintCell, GroupId,
    ProximityGroup, ShapeId, ShapeVariant, VariantRule,
};
pub use config::{BlockVariantConfig, BuildingTypeConfig, CatalogConfig, RoadTypeConfig};
pub use error::CatalogError;
pub use road_types::{GroundCatalog, GroundId, RoadSprites, RoadType, RoadTypeCatalog, RoadTypeId};

/// Catalog document used when no [`CatalogSource`] is provided.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../../assets/default_catalog.json");

/// Catalog document supplied by the composition root. Insert it before adding
/// [`crate::TownPlugin`] to replace the built-in catalog.
#[derive(Resource, Debug, Clone)]
pub struct CatalogSource(pub String);

#[derive(Resource, Debug, Clone)]
pub struct Catalogs {
    pub blocks: Arc<BlockCatalog>,
    pub building_types: Arc<BuildingTypeCatalog>,
    pub road_types: Arc<RoadTypeCatalog>,
    pub grounds: Arc<GroundCatalog>,
}

impl Catalogs {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        Self::from_config(&CatalogConfig::from_json(text)?)
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let blocks = BlockCatalog::build(&config.blocks)?;
        let building_types =
            BuildingTypeCatalog::build(&config.groups, &config.building_types, &blocks)?;
        let road_types = RoadTypeCatalog::build(&config.roads)?;
        let grounds = GroundCatalog::build(&config.grounds)?;
        Ok(Self {
            blocks: Arc::new(blocks),
            building_types: Arc::new(building_types),
            road_types: Arc::new(road_types),
            grounds: Arc::new(grounds),
        })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_CATALOG_JSON)
    }
}

/// Rejects names that cannot survive as a single whitespace-separated token or
/// that would be misread by the footprint token grammar.
pub(crate) fn validate_name(kind: &'static str, name: &str) -> Result<(), CatalogError> {
    let bad = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ':' | '!' | ';'));
    if bad {
        return Err(CatalogError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
