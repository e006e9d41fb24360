//! The legality overlay: which cells the UI highlights as places the pending
//! building could go.
//!
//! Same-group distances come from a two-pass L1 distance transform over the
//! whole world, so a recompute costs `O(W²)` regardless of how many buildings
//! the group has.

use crate::buildings::BuildingStore;
use crate::catalog::{BlockCatalog, GroupId};
use crate::config::WORLD_SIZE;
use crate::grid::TownGrid;

const FAR: u32 = u32::MAX / 2;

/// The group and footprint extent the overlay is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTarget {
    pub group: GroupId,
    pub max_distance: u32,
    /// Distance from the footprint centre to its farthest cell.
    pub reach: u32,
}

#[inline]
fn index(x: usize, y: usize) -> usize {
    y * WORLD_SIZE + x
}

/// Exact taxicab distance from every cell to the nearest source cell.
/// Off-map sources are ignored; with no sources every cell is [`FAR`].
pub fn l1_distance_field(sources: impl IntoIterator<Item = (i32, i32)>) -> Vec<u32> {
    let mut dist = vec![FAR; WORLD_SIZE * WORLD_SIZE];
    for (x, y) in sources {
        if TownGrid::in_bounds(x, y) {
            dist[index(x as usize, y as usize)] = 0;
        }
    }
    for y in 0..WORLD_SIZE {
        for x in 0..WORLD_SIZE {
            let mut d = dist[index(x, y)];
            if x > 0 {
                d = d.min(dist[index(x - 1, y)] + 1);
            }
            if y > 0 {
                d = d.min(dist[index(x, y - 1)] + 1);
            }
            dist[index(x, y)] = d;
        }
    }
    for y in (0..WORLD_SIZE).rev() {
        for x in (0..WORLD_SIZE).rev() {
            let mut d = dist[index(x, y)];
            if x + 1 < WORLD_SIZE {
                d = d.min(dist[index(x + 1, y)] + 1);
            }
            if y + 1 < WORLD_SIZE {
                d = d.min(dist[index(x, y + 1)] + 1);
            }
            dist[index(x, y)] = d;
        }
    }
    dist
}

/// Cells that some committed building's door opens onto.
pub fn frontage_exclusion(buildings: &BuildingStore, blocks: &BlockCatalog) -> Vec<bool> {
    let mut excluded = vec![false; WORLD_SIZE * WORLD_SIZE];
    for building in buildings.iter() {
        for (x, y) in building.frontage_cells(blocks) {
            if TownGrid::in_bounds(x, y) {
                excluded[index(x as usize, y as usize)] = true;
            }
        }
    }
    excluded
}

/// Rewrites the grid's legality mask for `target`, or clears it when nothing
/// is being placed.
///
/// A cell is legal when it is free at ground level (no building, no road) and
/// not a doorway. If the group already has buildings, it must also lie within
/// `max_distance + reach` of one of their cells.
pub fn recompute_mask(
    grid: &mut TownGrid,
    buildings: &BuildingStore,
    blocks: &BlockCatalog,
    target: Option<OverlayTarget>,
) {
    let Some(target) = target else {
        grid.clear_legal();
        return;
    };

    let excluded = frontage_exclusion(buildings, blocks);
    let distances = if buildings.count_in_group(target.group) == 0 {
        None
    } else {
        let sources: Vec<(i32, i32)> = buildings
            .in_group(target.group)
            .flat_map(|b| b.cells().map(|(pos, _)| (pos.x, pos.y)))
            .collect();
        Some(l1_distance_field(sources))
    };
    let radius = target.max_distance + target.reach;

    for y in 0..WORLD_SIZE {
        for x in 0..WORLD_SIZE {
            let (cx, cy) = (x as i32, y as i32);
            let near_group = distances
                .as_ref()
                .map_or(true, |d| d[index(x, y)] <= radius);
            let legal = near_group && !excluded[index(x, y)] && grid.is_empty(cx, cy, 0, true);
            grid.set_legal(cx, cy, legal);
        }
    }
}
