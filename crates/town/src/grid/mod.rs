//! The chunked occupancy grid: single source of truth for what occupies every
//! building slot `(x, y, z)` and every road slot `(x, y)`.
//!
//! Out-of-range coordinates are never an error. Writes outside `[0, W)²` are
//! dropped and reads return empty, so footprints hanging over the world edge
//! place partially instead of failing.

pub mod chunk;
pub mod occupant;
pub mod roads;


pub use chunk::Chunk;
pub use occupant::{BuildingId, CellOccupant, CellPos, PendingHandle, Road, RoadSlot};
pub use roads::{Axis, RoadConnections, RoadShape};

use crate::camera::Viewport;
use crate::catalog::{GroundId, RoadTypeId};
use crate::config::{BUILDING_LAYERS, CHUNKS_PER_SIDE, CHUNK_SIZE, WORLD_SIZE};

#[derive(Debug, Clone)]
pub struct TownGrid {
    /// Row-major by chunk y, then chunk x.
    chunks: Vec<Chunk>,
}

impl TownGrid {
    /// Creates every chunk up front, each cell covered by `ground`.
    pub fn new(ground: GroundId) -> Self {
        let mut chunks = Vec::with_capacity(CHUNKS_PER_SIDE * CHUNKS_PER_SIDE);
        for cy in 0..CHUNKS_PER_SIDE {
            for cx in 0..CHUNKS_PER_SIDE {
                chunks.push(Chunk::new(cx, cy, ground));
            }
        }
        Self { chunks }
    }

    #[inline]
    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < WORLD_SIZE && (y as usize) < WORLD_SIZE
    }

    /// Chunk index and local coordinates of an in-range cell.
    #[inline]
    fn locate(x: i32, y: i32) -> Option<(usize, usize, usize)> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        let idx = (y / CHUNK_SIZE) * CHUNKS_PER_SIDE + x / CHUNK_SIZE;
        Some((idx, x % CHUNK_SIZE, y % CHUNK_SIZE))
    }

    // -----------------------------------------------------------------------
    // Building slots
    // -----------------------------------------------------------------------

    pub fn place_at(&mut self, x: i32, y: i32, z: usize, occupant: CellOccupant) {
        if z >= BUILDING_LAYERS {
            return;
        }
        if let Some((idx, lx, ly)) = Self::locate(x, y) {
            self.chunks[idx].set_occupant(lx, ly, z, occupant);
        }
    }

    pub fn occupant_at(&self, x: i32, y: i32, z: usize) -> CellOccupant {
        if z >= BUILDING_LAYERS {
            return CellOccupant::Empty;
        }
        match Self::locate(x, y) {
            Some((idx, lx, ly)) => self.chunks[idx].occupant(lx, ly, z),
            None => CellOccupant::Empty,
        }
    }

    pub fn building_at(&self, x: i32, y: i32, z: usize) -> Option<BuildingId> {
        self.occupant_at(x, y, z).building()
    }

    /// Whether a building could use slot `(x, y, z)`: it must not hold a
    /// committed building, nor a committed road at layer 0 when
    /// `road_blocks` is set. Off-map slots are reported empty.
    pub fn is_empty(&self, x: i32, y: i32, z: usize, road_blocks: bool) -> bool {
        if self.occupant_at(x, y, z).is_committed() {
            return false;
        }
        !(road_blocks && z == 0 && self.road_at(x, y).is_some())
    }

    pub fn remove_at(&mut self, x: i32, y: i32, z: usize) {
        self.place_at(x, y, z, CellOccupant::Empty);
    }

    // -----------------------------------------------------------------------
    // Road slots
    // -----------------------------------------------------------------------

    pub fn road_slot(&self, x: i32, y: i32) -> RoadSlot {
        match Self::locate(x, y) {
            Some((idx, lx, ly)) => self.chunks[idx].road(lx, ly),
            None => RoadSlot::Empty,
        }
    }

    pub fn set_road_slot(&mut self, x: i32, y: i32, slot: RoadSlot) {
        if let Some((idx, lx, ly)) = Self::locate(x, y) {
            self.chunks[idx].set_road(lx, ly, slot);
        }
    }

    /// The committed road at `(x, y)`, if any.
    pub fn road_at(&self, x: i32, y: i32) -> Option<Road> {
        self.road_slot(x, y).committed().map(|road_type| Road { x, y, road_type })
    }

    /// Commits a road, replacing any road already in the slot.
    pub fn place_road(&mut self, x: i32, y: i32, road_type: RoadTypeId) {
        self.set_road_slot(x, y, RoadSlot::Committed(road_type));
    }

    pub fn remove_road(&mut self, x: i32, y: i32) -> Option<Road> {
        let road = self.road_at(x, y)?;
        self.set_road_slot(x, y, RoadSlot::Empty);
        Some(road)
    }

    /// Every committed road, ordered by `(x, y)`.
    pub fn roads(&self) -> Vec<Road> {
        let mut roads = Vec::new();
        for chunk in self.chunks.iter().filter(|c| !c.is_empty()) {
            let (ox, oy) = chunk.origin();
            for lx in 0..CHUNK_SIZE {
                for ly in 0..CHUNK_SIZE {
                    if let Some(road_type) = chunk.road(lx, ly).committed() {
                        roads.push(Road {
                            x: ox + lx as i32,
                            y: oy + ly as i32,
                            road_type,
                        });
                    }
                }
            }
        }
        roads.sort_by_key(|r| (r.x, r.y));
        roads
    }

    // -----------------------------------------------------------------------
    // Provisional occupancy
    // -----------------------------------------------------------------------

    /// Marks the empty slots of `cells` as provisionally held by `handle`.
    /// Committed slots and slots held by another pending placement are left
    /// untouched.
    pub fn occupy_provisional(&mut self, handle: PendingHandle, cells: &[CellPos]) {
        for c in cells {
            let occupant = self.occupant_at(c.x, c.y, c.z);
            if occupant.is_empty() || occupant == CellOccupant::Provisional(handle) {
                self.place_at(c.x, c.y, c.z, CellOccupant::Provisional(handle));
            }
        }
    }

    /// Clears `cells` where they are still held by `handle`.
    pub fn vacate_provisional(&mut self, handle: PendingHandle, cells: &[CellPos]) {
        for c in cells {
            if self.occupant_at(c.x, c.y, c.z) == CellOccupant::Provisional(handle) {
                self.remove_at(c.x, c.y, c.z);
            }
        }
    }

    /// Moves `handle` from `old` to `new`. The footprints may overlap; the
    /// result is every free slot of `new` held by `handle`.
    pub fn reoccupy_provisional(&mut self, handle: PendingHandle, old: &[CellPos], new: &[CellPos]) {
        self.vacate_provisional(handle, old);
        self.occupy_provisional(handle, new);
    }

    /// Every slot currently held by `handle`, ordered by position.
    pub fn provisional_cells(&self, handle: PendingHandle) -> Vec<CellPos> {
        let mut cells = Vec::new();
        for chunk in self.chunks.iter().filter(|c| !c.is_empty()) {
            let (ox, oy) = chunk.origin();
            for lx in 0..CHUNK_SIZE {
                for ly in 0..CHUNK_SIZE {
                    for z in 0..BUILDING_LAYERS {
                        if chunk.occupant(lx, ly, z) == CellOccupant::Provisional(handle) {
                            cells.push(CellPos::new(ox + lx as i32, oy + ly as i32, z));
                        }
                    }
                }
            }
        }
        cells.sort();
        cells
    }

    // -----------------------------------------------------------------------
    // Ground and legality mask
    // -----------------------------------------------------------------------

    pub fn ground_at(&self, x: i32, y: i32) -> Option<GroundId> {
        Self::locate(x, y).map(|(idx, lx, ly)| self.chunks[idx].ground(lx, ly))
    }

    pub fn set_ground(&mut self, x: i32, y: i32, ground: GroundId) {
        if let Some((idx, lx, ly)) = Self::locate(x, y) {
            self.chunks[idx].set_ground(lx, ly, ground);
        }
    }

    /// Whether the overlay currently marks `(x, y)` as a cell some legal
    /// footprint of the pending building could cover: free at ground level,
    /// clear of doorways and within group distance plus footprint reach.
    pub fn is_legal(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(idx, lx, ly)| self.chunks[idx].is_legal(lx, ly))
    }

    pub fn set_legal(&mut self, x: i32, y: i32, legal: bool) {
        if let Some((idx, lx, ly)) = Self::locate(x, y) {
            self.chunks[idx].set_legal(lx, ly, legal);
        }
    }

    pub fn clear_legal(&mut self) {
        for chunk in &mut self.chunks {
            chunk.clear_legal();
        }
    }

    pub fn legal_count(&self) -> usize {
        self.chunks.iter().map(Chunk::legal_count).sum()
    }

    // -----------------------------------------------------------------------
    // Chunks
    // -----------------------------------------------------------------------

    pub fn chunk(&self, cx: usize, cy: usize) -> Option<&Chunk> {
        if cx >= CHUNKS_PER_SIDE || cy >= CHUNKS_PER_SIDE {
            return None;
        }
        self.chunks.get(cy * CHUNKS_PER_SIDE + cx)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Chunks a renderer or cosmetic tick needs to visit for `viewport`.
    /// Occupancy and validation never depend on this.
    pub fn visible_chunks<'a>(&'a self, viewport: &'a Viewport) -> impl Iterator<Item = &'a Chunk> {
        self.chunks.iter().filter(move |c| {
            let (cx, cy) = c.coords();
            viewport.is_chunk_visible(cx, cy)
        })
    }
}
