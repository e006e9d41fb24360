//! Building archetypes: shape variants, proximity groups and appearance
//! generation.

use std::collections::{BTreeMap, HashMap};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::blocks::{BlockCatalog, BlockId, PlacedBlock, VariantId};
use super::config::BuildingTypeConfig;
use super::{validate_name, CatalogError};
use crate::config::{BUILDING_LAYERS, DEFAULT_GROUP, DEFAULT_GROUP_DISTANCE};
use crate::footprint::Footprint;
use crate::rotation::Rotation;

/// Seed for catalog preview appearances, so previews are stable per document.
const PREVIEW_SEED: u64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BuildingTypeId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u16);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityGroup {
    pub id: GroupId,
    pub name: String,
    pub max_distance: u32,
}

// ---------------------------------------------------------------------------
// Footprint tokens
// ---------------------------------------------------------------------------

/// Which variants of a block a footprint cell may show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantRule {
    Any,
    Only(Vec<String>),
    AnyExcept(Vec<String>),
}

impl VariantRule {
    /// Splits a footprint token into its block name and variant rule.
    pub fn parse(token: &str) -> Option<(&str, VariantRule)> {
        let (block, rule) = match token.find(|c: char| c == ':' || c == '!') {
            None => (token, VariantRule::Any),
            Some(at) => {
                let list: Vec<String> = token[at + 1..]
                    .split(';')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if list.is_empty() {
                    return None;
                }
                if token.as_bytes()[at] == b':' {
                    (&token[..at], VariantRule::Only(list))
                } else {
                    (&token[..at], VariantRule::AnyExcept(list))
                }
            }
        };
        if block.is_empty() {
            return None;
        }
        Some((block, rule))
    }
}

/// A filled footprint cell and the variants it may be drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootprintCell {
    pub block: BlockId,
    pub allowed: Vec<VariantId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeVariant {
    pub id: ShapeId,
    pub name: String,
    pub cells: Footprint<Option<FootprintCell>>,
}

/// The random choices fixed when a building is placed: one shape variant and
/// one block variant per filled cell, at rotation 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    shape: ShapeId,
    variants: Footprint<Option<VariantId>>,
}

impl Appearance {
    pub fn shape(&self) -> ShapeId {
        self.shape
    }

    pub fn variants(&self) -> &Footprint<Option<VariantId>> {
        &self.variants
    }
}

// ---------------------------------------------------------------------------
// BuildingType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildingType {
    id: BuildingTypeId,
    name: String,
    group: GroupId,
    shapes: Vec<ShapeVariant>,
    preview: Appearance,
}

impl BuildingType {
    pub fn id(&self) -> BuildingTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn shapes(&self) -> &[ShapeVariant] {
        &self.shapes
    }

    pub fn shape_by_name(&self, name: &str) -> Option<&ShapeVariant> {
        self.shapes.iter().find(|s| s.name == name)
    }

    /// Appearance pre-generated when the catalog was built, for previews.
    pub fn preview(&self) -> &Appearance {
        &self.preview
    }

    /// Padded `(size_x, size_y, layers)` shared by all shapes at rotation 0.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        let cells = &self.shapes[0].cells;
        (cells.size_x(), cells.size_y(), cells.layers())
    }

    /// Draws a fresh appearance: a uniformly chosen shape, then an independent
    /// uniform choice among each filled cell's permissible variants.
    pub fn generate_variant<R: Rng + ?Sized>(&self, rng: &mut R) -> Appearance {
        let shape = &self.shapes[rng.gen_range(0..self.shapes.len())];
        let variants = shape.cells.map(|cell| {
            cell.as_ref()
                .and_then(|c| c.allowed.choose(&mut *rng).copied())
        });
        Appearance {
            shape: shape.id,
            variants,
        }
    }

    /// Blocks and chosen variants of `appearance`, unrotated.
    pub fn layout(&self, appearance: &Appearance) -> Footprint<Option<PlacedBlock>> {
        let shape = &self.shapes[appearance.shape.0 as usize];
        let mut layout = shape.cells.map(|_| None);
        for ((x, y, z), cell) in shape.cells.occupied() {
            if let Some(Some(variant)) = appearance.variants.get(x, y, z) {
                layout.set(
                    x,
                    y,
                    z,
                    Some(PlacedBlock {
                        block: cell.block,
                        variant: *variant,
                    }),
                );
            }
        }
        layout
    }

    pub fn rotated_layout(
        &self,
        appearance: &Appearance,
        rotation: Rotation,
    ) -> Footprint<Option<PlacedBlock>> {
        self.layout(appearance).rotated(rotation)
    }

    pub fn shape_name(&self, appearance: &Appearance) -> &str {
        &self.shapes[appearance.shape.0 as usize].name
    }

    /// Variant names of the filled cells in row-major `(x, y, z)` order.
    pub fn appearance_tokens(&self, blocks: &BlockCatalog, appearance: &Appearance) -> Vec<String> {
        self.layout(appearance)
            .occupied()
            .map(|(_, placed)| blocks.variant_name(*placed).to_string())
            .collect()
    }

    /// Rebuilds an appearance from a shape name and per-cell variant names, as
    /// written by [`BuildingType::appearance_tokens`].
    pub fn appearance_from_tokens(
        &self,
        blocks: &BlockCatalog,
        shape_name: &str,
        tokens: &[&str],
    ) -> Result<Appearance, CatalogError> {
        let shape = self
            .shape_by_name(shape_name)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "shape",
                name: format!("{}/{shape_name}", self.name),
            })?;
        let expected = shape.cells.occupied_count();
        if tokens.len() != expected {
            return Err(CatalogError::AppearanceMismatch {
                expected,
                found: tokens.len(),
            });
        }
        let mut variants = shape.cells.map(|_| None);
        for (((x, y, z), cell), token) in shape.cells.occupied().zip(tokens) {
            let block = blocks.get(cell.block);
            let variant = block
                .variant_id(token)
                .ok_or_else(|| CatalogError::UnknownVariant {
                    block: block.name().to_string(),
                    variant: token.to_string(),
                })?;
            variants.set(x, y, z, Some(variant));
        }
        Ok(Appearance {
            shape: shape.id,
            variants,
        })
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct BuildingTypeCatalog {
    types: Vec<BuildingType>,
    by_name: HashMap<String, BuildingTypeId>,
    groups: Vec<ProximityGroup>,
}

impl BuildingTypeCatalog {
    pub(crate) fn build(
        groups: &BTreeMap<String, u32>,
        config: &BTreeMap<String, BuildingTypeConfig>,
        blocks: &BlockCatalog,
    ) -> Result<Self, CatalogError> {
        let mut catalog = BuildingTypeCatalog::default();

        let mut group_table = groups.clone();
        group_table
            .entry(DEFAULT_GROUP.to_string())
            .or_insert(DEFAULT_GROUP_DISTANCE);
        for (name, max_distance) in group_table {
            validate_name("group", &name)?;
            catalog.groups.push(ProximityGroup {
                id: GroupId(catalog.groups.len() as u16),
                name,
                max_distance,
            });
        }

        let mut rng = ChaCha8Rng::seed_from_u64(PREVIEW_SEED);
        for (name, type_config) in config {
            validate_name("building type", name)?;
            let id = BuildingTypeId(catalog.types.len() as u16);
            let group_name = type_config.group.as_deref().unwrap_or(DEFAULT_GROUP);
            let group = catalog
                .groups
                .iter()
                .find(|g| g.name == group_name)
                .map(|g| g.id)
                .ok_or_else(|| CatalogError::UnknownGroup {
                    building_type: name.clone(),
                    group: group_name.to_string(),
                })?;
            let shapes = build_shapes(name, type_config, blocks)?;
            let mut building_type = BuildingType {
                id,
                name: name.clone(),
                group,
                preview: Appearance {
                    shape: ShapeId(0),
                    variants: shapes[0].cells.map(|_| None),
                },
                shapes,
            };
            building_type.preview = building_type.generate_variant(&mut rng);
            catalog.by_name.insert(name.clone(), id);
            catalog.types.push(building_type);
        }
        Ok(catalog)
    }

    pub fn lookup(&self, name: &str) -> Result<&BuildingType, CatalogError> {
        self.by_name
            .get(name)
            .map(|id| &self.types[id.0 as usize])
            .ok_or_else(|| CatalogError::NotFound {
                kind: "building type",
                name: name.to_string(),
            })
    }

    /// The `n`-th type in lexicographic name order, wrapping around.
    pub fn by_index(&self, n: usize) -> Option<&BuildingType> {
        if self.types.is_empty() {
            return None;
        }
        self.types.get(n % self.types.len())
    }

    pub fn get(&self, id: BuildingTypeId) -> &BuildingType {
        &self.types[id.0 as usize]
    }

    pub fn group(&self, id: GroupId) -> &ProximityGroup {
        &self.groups[id.0 as usize]
    }

    pub fn group_by_name(&self, name: &str) -> Result<&ProximityGroup, CatalogError> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .ok_or_else(|| CatalogError::NotFound {
                kind: "group",
                name: name.to_string(),
            })
    }

    pub fn groups(&self) -> &[ProximityGroup] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuildingType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Parses every shape of one building type and pads them to a common box.
fn build_shapes(
    type_name: &str,
    config: &BuildingTypeConfig,
    blocks: &BlockCatalog,
) -> Result<Vec<ShapeVariant>, CatalogError> {
    if config.shapes.is_empty() {
        return Err(CatalogError::NoShapes {
            building_type: type_name.to_string(),
        });
    }

    let size_x = config.shapes.values().map(Vec::len).max().unwrap_or(0);
    let size_y = config
        .shapes
        .values()
        .flat_map(|columns| columns.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    let layers = config
        .shapes
        .values()
        .flat_map(|columns| columns.iter().flat_map(|c| c.iter().map(Vec::len)))
        .max()
        .unwrap_or(0);
    if layers > BUILDING_LAYERS {
        return Err(CatalogError::TooManyLayers {
            building_type: type_name.to_string(),
            layers,
        });
    }

    let mut shapes = Vec::with_capacity(config.shapes.len());
    for (shape_name, columns) in &config.shapes {
        validate_name("shape", shape_name)?;
        let mut nested = Vec::with_capacity(columns.len());
        for column in columns {
            let mut parsed_column = Vec::with_capacity(column.len());
            for stack in column {
                let mut parsed_stack = Vec::with_capacity(stack.len());
                for token in stack {
                    parsed_stack.push(parse_cell(type_name, token.as_deref(), blocks)?);
                }
                parsed_column.push(parsed_stack);
            }
            nested.push(parsed_column);
        }
        let cells = Footprint::from_nested(nested, size_x, size_y, layers, None);
        if cells.occupied_count() == 0 {
            return Err(CatalogError::EmptyShape {
                building_type: type_name.to_string(),
                shape: shape_name.clone(),
            });
        }
        shapes.push(ShapeVariant {
            id: ShapeId(shapes.len() as u16),
            name: shape_name.clone(),
            cells,
        });
    }
    Ok(shapes)
}

fn parse_cell(
    type_name: &str,
    token: Option<&str>,
    blocks: &BlockCatalog,
) -> Result<Option<FootprintCell>, CatalogError> {
    let token = match token {
        None | Some("") => return Ok(None),
        Some(t) => t,
    };
    let (block_name, rule) =
        VariantRule::parse(token).ok_or_else(|| CatalogError::InvalidToken {
            building_type: type_name.to_string(),
            token: token.to_string(),
        })?;
    let block = blocks.lookup(block_name)?;

    let resolve = |names: &[String]| -> Result<Vec<VariantId>, CatalogError> {
        names
            .iter()
            .map(|n| {
                block
                    .variant_id(n)
                    .ok_or_else(|| CatalogError::UnknownVariant {
                        block: block_name.to_string(),
                        variant: n.clone(),
                    })
            })
            .collect()
    };
    let mut allowed: Vec<VariantId> = match &rule {
        VariantRule::Any => block.variant_ids().collect(),
        VariantRule::Only(names) => resolve(names)?,
        VariantRule::AnyExcept(names) => {
            let excluded = resolve(names)?;
            block
                .variant_ids()
                .filter(|v| !excluded.contains(v))
                .collect()
        }
    };
    allowed.sort_unstable();
    allowed.dedup();
    if allowed.is_empty() {
        return Err(CatalogError::EmptyVariantSet {
            building_type: type_name.to_string(),
            token: token.to_string(),
        });
    }
    Ok(Some(FootprintCell {
        block: block.id(),
        allowed,
    }))
}
