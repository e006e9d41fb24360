//! Placement rules: overlap, door clearance and group proximity, plus the
//! legality overlay shown while a building is being positioned.

pub mod manhattan;
pub mod overlay;


use std::collections::BTreeSet;
use std::fmt;

pub use manhattan::{manhattan_disk, manhattan_distance};
pub use overlay::{recompute_mask, OverlayTarget};

use crate::buildings::{footprint_cells, frontage_cells, BuildingStore};
use crate::catalog::{BlockCatalog, PlacedBlock, ProximityGroup};
use crate::config::{BUILDING_LAYERS, PLACEMENT_MARGIN, WORLD_SIZE};
use crate::footprint::Footprint;
use crate::grid::{CellPos, PendingHandle, TownGrid};
use crate::rotation::{Rotation, RotationError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// A footprint slot already holds a committed building (or a road at
    /// ground level).
    Overlap { x: i32, y: i32, z: usize },
    /// The placement would cover a door, or its own door would face a wall.
    FrontageBlocked { x: i32, y: i32 },
    TooFarFromGroup { group: String, max_distance: u32 },
    /// The pending placement has not been moved onto the map yet.
    NotPositioned,
    UnknownHandle(PendingHandle),
    InvalidRotation(RotationError),
    /// The origin lies beyond [`PLACEMENT_MARGIN`] cells of the world.
    OutOfReach { x: i32, y: i32 },
}

impl PlacementError {
    /// True for the validator's "cannot build here" answers, false for
    /// misuse of the pending-placement interface.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            PlacementError::Overlap { .. }
                | PlacementError::FrontageBlocked { .. }
                | PlacementError::TooFarFromGroup { .. }
                | PlacementError::NotPositioned
                | PlacementError::OutOfReach { .. }
        )
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::Overlap { x, y, z } => {
                write!(f, "cell ({x}, {y}) layer {z} is already occupied")
            }
            PlacementError::FrontageBlocked { x, y } => {
                write!(f, "the doorway at ({x}, {y}) would be blocked")
            }
            PlacementError::TooFarFromGroup {
                group,
                max_distance,
            } => write!(
                f,
                "must be within {max_distance} cells of an existing '{group}' building"
            ),
            PlacementError::NotPositioned => write!(f, "placement has no position yet"),
            PlacementError::UnknownHandle(handle) => {
                write!(f, "no pending placement with handle {}", handle.0)
            }
            PlacementError::InvalidRotation(e) => write!(f, "{e}"),
            PlacementError::OutOfReach { x, y } => {
                write!(f, "origin ({x}, {y}) is too far outside the world")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

impl From<RotationError> for PlacementError {
    fn from(e: RotationError) -> Self {
        PlacementError::InvalidRotation(e)
    }
}

// ---------------------------------------------------------------------------
// Footprint geometry
// ---------------------------------------------------------------------------

const MIN_ORIGIN: i32 = -PLACEMENT_MARGIN;
const MAX_ORIGIN: i32 = WORLD_SIZE as i32 - 1 + PLACEMENT_MARGIN;

/// Pulls an origin back to within [`PLACEMENT_MARGIN`] cells of the world.
/// Footprints anchored there are entirely off-map but their cell arithmetic
/// cannot overflow.
pub fn clamp_origin(x: i32, y: i32) -> (i32, i32) {
    (x.clamp(MIN_ORIGIN, MAX_ORIGIN), y.clamp(MIN_ORIGIN, MAX_ORIGIN))
}

pub fn origin_in_reach(x: i32, y: i32) -> bool {
    clamp_origin(x, y) == (x, y)
}

/// Reference point for proximity: the middle cell of the footprint box,
/// rounded towards the origin.
pub fn footprint_center<T>(ox: i32, oy: i32, layout: &Footprint<T>) -> (i32, i32) {
    let half_x = layout.size_x().saturating_sub(1) / 2;
    let half_y = layout.size_y().saturating_sub(1) / 2;
    (ox + half_x as i32, oy + half_y as i32)
}

/// Manhattan distance from [`footprint_center`] to the farthest corner of the
/// footprint box.
pub fn footprint_reach<T>(layout: &Footprint<T>) -> u32 {
    let sx = layout.size_x().saturating_sub(1) as u32;
    let sy = layout.size_y().saturating_sub(1) as u32;
    sx.div_ceil(2) + sy.div_ceil(2)
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// First footprint slot that is not free, scanning in row-major order.
pub fn first_blocked_slot(
    grid: &TownGrid,
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    road_blocks: bool,
) -> Option<CellPos> {
    footprint_cells(ox, oy, layout)
        .map(|(pos, _)| pos)
        .find(|pos| !grid.is_empty(pos.x, pos.y, pos.z, road_blocks))
}

pub fn footprint_is_clear(
    grid: &TownGrid,
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    road_blocks: bool,
) -> bool {
    first_blocked_slot(grid, ox, oy, layout, road_blocks).is_none()
}

/// The door check. Fails on the first frontage cell that would end up
/// obstructed at ground level, either a neighbour's door the placement covers
/// or the placement's own door facing a committed building.
pub fn frontage_conflict(
    grid: &TownGrid,
    buildings: &BuildingStore,
    blocks: &BlockCatalog,
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    rotation: Rotation,
) -> Option<(i32, i32)> {
    let ground: BTreeSet<(i32, i32)> = footprint_cells(ox, oy, layout)
        .filter(|(pos, _)| pos.z == 0)
        .map(|(pos, _)| (pos.x, pos.y))
        .collect();

    // Committed buildings touching the footprint box grown by one cell.
    let mut neighbours = BTreeSet::new();
    let (sx, sy) = (layout.size_x() as i32, layout.size_y() as i32);
    for x in ox - 1..=ox + sx {
        for y in oy - 1..=oy + sy {
            for z in 0..BUILDING_LAYERS {
                if let Some(id) = grid.building_at(x, y, z) {
                    neighbours.insert(id);
                }
            }
        }
    }
    for id in neighbours {
        let Some(neighbour) = buildings.get(id) else {
            continue;
        };
        for (fx, fy) in neighbour.frontage_cells(blocks) {
            let walled = grid.building_at(fx, fy, 0).is_some_and(|other| other != id);
            if walled || ground.contains(&(fx, fy)) {
                return Some((fx, fy));
            }
        }
    }

    frontage_cells(ox, oy, layout, rotation, blocks)
        .into_iter()
        .find(|&(fx, fy)| grid.building_at(fx, fy, 0).is_some())
}

pub fn frontage_is_satisfied(
    grid: &TownGrid,
    buildings: &BuildingStore,
    blocks: &BlockCatalog,
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    rotation: Rotation,
) -> bool {
    frontage_conflict(grid, buildings, blocks, ox, oy, layout, rotation).is_none()
}

/// The group rule: the first building of a group may go anywhere, later ones
/// need a same-group building within `max_distance` of `center`.
pub fn proximity_allows(
    grid: &TownGrid,
    buildings: &BuildingStore,
    group: &ProximityGroup,
    center: (i32, i32),
) -> bool {
    if buildings.count_in_group(group.id) == 0 {
        return true;
    }
    manhattan_disk(center.0, center.1, group.max_distance).any(|(x, y)| {
        (0..BUILDING_LAYERS).any(|z| {
            grid.building_at(x, y, z)
                .and_then(|id| buildings.get(id))
                .is_some_and(|b| b.group == group.id)
        })
    })
}

/// Full check for committing a building at `(ox, oy)`. Roads block
/// buildings.
#[allow(clippy::too_many_arguments)]
pub fn validate_building(
    grid: &TownGrid,
    buildings: &BuildingStore,
    blocks: &BlockCatalog,
    group: &ProximityGroup,
    ox: i32,
    oy: i32,
    layout: &Footprint<Option<PlacedBlock>>,
    rotation: Rotation,
) -> Result<(), PlacementError> {
    if let Some(pos) = first_blocked_slot(grid, ox, oy, layout, true) {
        return Err(PlacementError::Overlap {
            x: pos.x,
            y: pos.y,
            z: pos.z,
        });
    }
    if let Some((x, y)) = frontage_conflict(grid, buildings, blocks, ox, oy, layout, rotation) {
        return Err(PlacementError::FrontageBlocked { x, y });
    }
    if !proximity_allows(grid, buildings, group, footprint_center(ox, oy, layout)) {
        return Err(PlacementError::TooFarFromGroup {
            group: group.name.clone(),
            max_distance: group.max_distance,
        });
    }
    Ok(())
}

/// Roads only need the cell free of buildings; they may replace other roads.
pub fn validate_road(grid: &TownGrid, x: i32, y: i32) -> Result<(), PlacementError> {
    if grid.is_empty(x, y, 0, false) {
        Ok(())
    } else {
        Err(PlacementError::Overlap { x, y, z: 0 })
    }
}
