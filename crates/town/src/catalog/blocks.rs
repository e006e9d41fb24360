use std::collections::{BTreeMap, HashMap};

use super::config::BlockVariantConfig;
use super::{validate_name, CatalogError};
use crate::rotation::{Rotation, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u16);

/// Index of a variant within its block's (name-sorted) variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(pub u16);

/// One block of a building footprint with its chosen appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedBlock {
    pub block: BlockId,
    pub variant: VariantId,
}

/// Variant given to blocks declared without any.
pub const DEFAULT_VARIANT: &str = "default";

/// Sides in the order the left/right face lookup walks them.
const FACE_ORDER: [Side; 4] = [Side::North, Side::West, Side::South, Side::East];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Faces {
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
}

impl Faces {
    pub fn side(&self, side: Side) -> &str {
        match side {
            Side::North => &self.north,
            Side::East => &self.east,
            Side::South => &self.south,
            Side::West => &self.west,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockVariant {
    pub name: String,
    pub faces: Faces,
    pub frontage: Vec<Side>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockArchetype {
    id: BlockId,
    name: String,
    variants: Vec<BlockVariant>,
}

impl BlockArchetype {
    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[BlockVariant] {
        &self.variants
    }

    pub fn variant(&self, id: VariantId) -> Option<&BlockVariant> {
        self.variants.get(id.0 as usize)
    }

    pub fn variant_id(&self, name: &str) -> Option<VariantId> {
        self.variants
            .iter()
            .position(|v| v.name == name)
            .map(|i| VariantId(i as u16))
    }

    pub fn variant_ids(&self) -> impl Iterator<Item = VariantId> {
        (0..self.variants.len() as u16).map(VariantId)
    }

    /// Left and right face sprites of `variant` when drawn at `rotation`.
    pub fn faces(&self, rotation: Rotation, variant: VariantId) -> Option<(&str, &str)> {
        let v = self.variant(variant)?;
        let j = rotation.index() as usize;
        let left = FACE_ORDER[(4 - j) % 4];
        let right = FACE_ORDER[(5 - j) % 4];
        Some((v.faces.side(left), v.faces.side(right)))
    }

    /// Whether `variant` declares any frontage at all.
    pub fn has_frontage(&self, variant: VariantId) -> bool {
        self.variant(variant).is_some_and(|v| !v.frontage.is_empty())
    }

    /// Cells adjacent to a block at `(x, y)` that must stay free of buildings
    /// once the block is turned by `rotation`.
    pub fn frontage_cells(
        &self,
        rotation: Rotation,
        x: i32,
        y: i32,
        variant: VariantId,
    ) -> Vec<(i32, i32)> {
        let Some(v) = self.variant(variant) else {
            return Vec::new();
        };
        let mut cells: Vec<(i32, i32)> = v
            .frontage
            .iter()
            .map(|side| {
                let (dx, dy) = side.rotated(rotation).offset();
                (x + dx, y + dy)
            })
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BlockCatalog {
    blocks: Vec<BlockArchetype>,
    by_name: HashMap<String, BlockId>,
}

impl BlockCatalog {
    pub(crate) fn build(
        config: &BTreeMap<String, BTreeMap<String, BlockVariantConfig>>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = BlockCatalog::default();
        for (name, variants) in config {
            validate_name("block", name)?;
            let id = BlockId(catalog.blocks.len() as u16);
            let mut archetype = BlockArchetype {
                id,
                name: name.clone(),
                variants: Vec::with_capacity(variants.len()),
            };
            for (variant_name, v) in variants {
                validate_name("block variant", variant_name)?;
                archetype.variants.push(BlockVariant {
                    name: variant_name.clone(),
                    faces: Faces {
                        north: v.north.clone(),
                        east: v.east.clone(),
                        south: v.south.clone(),
                        west: v.west.clone(),
                    },
                    frontage: v.frontage.clone(),
                });
            }
            if archetype.variants.is_empty() {
                archetype.variants.push(BlockVariant {
                    name: DEFAULT_VARIANT.to_string(),
                    faces: Faces {
                        north: String::new(),
                        east: String::new(),
                        south: String::new(),
                        west: String::new(),
                    },
                    frontage: Vec::new(),
                });
            }
            catalog.by_name.insert(name.clone(), id);
            catalog.blocks.push(archetype);
        }
        Ok(catalog)
    }

    pub fn lookup(&self, name: &str) -> Result<&BlockArchetype, CatalogError> {
        self.by_name
            .get(name)
            .map(|id| &self.blocks[id.0 as usize])
            .ok_or_else(|| CatalogError::NotFound {
                kind: "block",
                name: name.to_string(),
            })
    }

    /// Ids are only handed out by this catalog, so lookups by id cannot miss.
    pub fn get(&self, id: BlockId) -> &BlockArchetype {
        &self.blocks[id.0 as usize]
    }

    pub fn variant_name(&self, placed: PlacedBlock) -> &str {
        self.get(placed.block)
            .variant(placed.variant)
            .map_or("", |v| v.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockArchetype> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
