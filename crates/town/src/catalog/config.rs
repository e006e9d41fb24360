//! Serde model of the catalog document.
//!
//! Maps are `BTreeMap`s so every catalog built from the same document assigns
//! the same ids in lexicographic name order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rotation::Side;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Proximity group name -> maximum Manhattan distance.
    pub groups: BTreeMap<String, u32>,
    /// Ground types; the first one fills a fresh world.
    pub grounds: Vec<String>,
    pub roads: BTreeMap<String, RoadTypeConfig>,
    /// Block name -> variant name -> variant data.
    pub blocks: BTreeMap<String, BTreeMap<String, BlockVariantConfig>>,
    pub building_types: BTreeMap<String, BuildingTypeConfig>,
}

/// Sprite names per road shape. Missing entries default to `<road>_<shape>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadTypeConfig {
    pub isolated: Option<String>,
    pub end: Option<String>,
    pub straight: Option<String>,
    pub corner: Option<String>,
    pub tee: Option<String>,
    pub cross: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockVariantConfig {
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
    /// Sides that must stay unobstructed, given at rotation 0.
    pub frontage: Vec<Side>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingTypeConfig {
    #[serde(default)]
    pub group: Option<String>,
    /// Shape name -> `[x][y][z]` footprint tokens. `null` and `""` are empty
    /// cells.
    pub shapes: BTreeMap<String, Vec<Vec<Vec<Option<String>>>>>,
}

impl CatalogConfig {
    pub fn from_json(text: &str) -> Result<Self, super::CatalogError> {
        serde_json::from_str(text).map_err(|e| super::CatalogError::Parse(e.to_string()))
    }
}
