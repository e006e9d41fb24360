use std::collections::{BTreeMap, HashMap};

use super::config::RoadTypeConfig;
use super::{validate_name, CatalogError};
use crate::config::DEFAULT_GROUND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadTypeId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GroundId(pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadSprites {
    pub isolated: String,
    pub end: String,
    pub straight: String,
    pub corner: String,
    pub tee: String,
    pub cross: String,
}

/// Road archetype. Purely visual: connectivity is derived from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadType {
    pub id: RoadTypeId,
    pub name: String,
    pub sprites: RoadSprites,
}

#[derive(Debug, Clone, Default)]
pub struct RoadTypeCatalog {
    types: Vec<RoadType>,
    by_name: HashMap<String, RoadTypeId>,
}

impl RoadTypeCatalog {
    pub(crate) fn build(config: &BTreeMap<String, RoadTypeConfig>) -> Result<Self, CatalogError> {
        let mut catalog = RoadTypeCatalog::default();
        for (name, sprites) in config {
            validate_name("road type", name)?;
            let sprite = |given: &Option<String>, shape: &str| {
                given.clone().unwrap_or_else(|| format!("{name}_{shape}"))
            };
            let id = RoadTypeId(catalog.types.len() as u16);
            catalog.types.push(RoadType {
                id,
                name: name.clone(),
                sprites: RoadSprites {
                    isolated: sprite(&sprites.isolated, "isolated"),
                    end: sprite(&sprites.end, "end"),
                    straight: sprite(&sprites.straight, "straight"),
                    corner: sprite(&sprites.corner, "corner"),
                    tee: sprite(&sprites.tee, "tee"),
                    cross: sprite(&sprites.cross, "cross"),
                },
            });
            catalog.by_name.insert(name.clone(), id);
        }
        Ok(catalog)
    }

    pub fn lookup(&self, name: &str) -> Result<&RoadType, CatalogError> {
        self.by_name
            .get(name)
            .map(|id| &self.types[id.0 as usize])
            .ok_or_else(|| CatalogError::NotFound {
                kind: "road type",
                name: name.to_string(),
            })
    }

    pub fn by_index(&self, n: usize) -> Option<&RoadType> {
        if self.types.is_empty() {
            return None;
        }
        self.types.get(n % self.types.len())
    }

    pub fn get(&self, id: RoadTypeId) -> &RoadType {
        &self.types[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoadType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Grounds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct GroundCatalog {
    names: Vec<String>,
}

impl GroundCatalog {
    pub(crate) fn build(config: &[String]) -> Result<Self, CatalogError> {
        let mut names = Vec::with_capacity(config.len().max(1));
        for name in config {
            validate_name("ground", name)?;
            names.push(name.clone());
        }
        if names.is_empty() {
            names.push(DEFAULT_GROUND.to_string());
        }
        Ok(Self { names })
    }

    pub fn lookup(&self, name: &str) -> Result<GroundId, CatalogError> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| GroundId(i as u8))
            .ok_or_else(|| CatalogError::NotFound {
                kind: "ground",
                name: name.to_string(),
            })
    }

    pub fn name(&self, id: GroundId) -> &str {
        self.names.get(id.0 as usize).map_or("", String::as_str)
    }

    /// Ground filling a freshly created world.
    pub fn default_ground(&self) -> GroundId {
        GroundId(0)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
