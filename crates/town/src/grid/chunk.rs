use super::occupant::{CellOccupant, RoadSlot};
use crate::catalog::GroundId;
use crate::config::{BUILDING_LAYERS, CHUNK_SIZE};

/// A fixed `CHUNK_SIZE x CHUNK_SIZE` tile of the world with dense slot arrays.
///
/// Local coordinates are always in range; [`super::TownGrid`] does the
/// bounds checks.
#[derive(Debug, Clone)]
pub struct Chunk {
    cx: usize,
    cy: usize,
    slots: Vec<CellOccupant>,
    grounds: Vec<GroundId>,
    roads: Vec<RoadSlot>,
    legal: Vec<bool>,
    /// Non-empty building slots plus non-empty road slots.
    occupied: usize,
}

impl Chunk {
    pub fn new(cx: usize, cy: usize, ground: GroundId) -> Self {
        let cells = CHUNK_SIZE * CHUNK_SIZE;
        Self {
            cx,
            cy,
            slots: vec![CellOccupant::Empty; cells * BUILDING_LAYERS],
            grounds: vec![ground; cells],
            roads: vec![RoadSlot::Empty; cells],
            legal: vec![false; cells],
            occupied: 0,
        }
    }

    pub fn coords(&self) -> (usize, usize) {
        (self.cx, self.cy)
    }

    /// World coordinates of the chunk's `(0, 0)` cell.
    pub fn origin(&self) -> (i32, i32) {
        ((self.cx * CHUNK_SIZE) as i32, (self.cy * CHUNK_SIZE) as i32)
    }

    #[inline]
    fn cell(lx: usize, ly: usize) -> usize {
        lx * CHUNK_SIZE + ly
    }

    #[inline]
    fn slot(lx: usize, ly: usize, z: usize) -> usize {
        Self::cell(lx, ly) * BUILDING_LAYERS + z
    }

    pub fn occupant(&self, lx: usize, ly: usize, z: usize) -> CellOccupant {
        self.slots[Self::slot(lx, ly, z)]
    }

    /// Stores `occupant` and returns what the slot held before.
    pub fn set_occupant(
        &mut self,
        lx: usize,
        ly: usize,
        z: usize,
        occupant: CellOccupant,
    ) -> CellOccupant {
        let idx = Self::slot(lx, ly, z);
        let previous = std::mem::replace(&mut self.slots[idx], occupant);
        self.track(previous.is_empty(), occupant.is_empty());
        previous
    }

    pub fn road(&self, lx: usize, ly: usize) -> RoadSlot {
        self.roads[Self::cell(lx, ly)]
    }

    pub fn set_road(&mut self, lx: usize, ly: usize, slot: RoadSlot) -> RoadSlot {
        let idx = Self::cell(lx, ly);
        let previous = std::mem::replace(&mut self.roads[idx], slot);
        self.track(previous.is_empty(), slot.is_empty());
        previous
    }

    fn track(&mut self, was_empty: bool, now_empty: bool) {
        match (was_empty, now_empty) {
            (true, false) => self.occupied += 1,
            (false, true) => self.occupied -= 1,
            _ => {}
        }
    }

    pub fn ground(&self, lx: usize, ly: usize) -> GroundId {
        self.grounds[Self::cell(lx, ly)]
    }

    pub fn set_ground(&mut self, lx: usize, ly: usize, ground: GroundId) {
        self.grounds[Self::cell(lx, ly)] = ground;
    }

    pub fn is_legal(&self, lx: usize, ly: usize) -> bool {
        self.legal[Self::cell(lx, ly)]
    }

    pub fn set_legal(&mut self, lx: usize, ly: usize, legal: bool) {
        self.legal[Self::cell(lx, ly)] = legal;
    }

    pub fn legal_count(&self) -> usize {
        self.legal.iter().filter(|l| **l).count()
    }

    pub fn clear_legal(&mut self) {
        self.legal.fill(false);
    }

    /// True when no building, provisional or road slot is in use.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn occupied_slots(&self) -> usize {
        self.occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoadTypeId;
    use crate::grid::{BuildingId, PendingHandle};

    #[test]
    fn emptiness_tracks_place_and_remove() {
        let mut chunk = Chunk::new(0, 0, GroundId(0));
        assert!(chunk.is_empty());

        chunk.set_occupant(1, 2, 0, CellOccupant::Committed(BuildingId(1)));
        chunk.set_occupant(1, 2, 1, CellOccupant::Provisional(PendingHandle(1)));
        assert_eq!(chunk.occupied_slots(), 2);

        // Overwriting a filled slot does not double count.
        chunk.set_occupant(1, 2, 0, CellOccupant::Committed(BuildingId(2)));
        assert_eq!(chunk.occupied_slots(), 2);

        chunk.set_road(3, 3, RoadSlot::Committed(RoadTypeId(0)));
        assert_eq!(chunk.occupied_slots(), 3);

        chunk.set_occupant(1, 2, 0, CellOccupant::Empty);
        chunk.set_occupant(1, 2, 1, CellOccupant::Empty);
        chunk.set_road(3, 3, RoadSlot::Empty);
        assert!(chunk.is_empty());

        // Clearing an already empty slot keeps the counter at zero.
        chunk.set_occupant(0, 0, 0, CellOccupant::Empty);
        assert!(chunk.is_empty());
    }

    #[test]
    fn origin_is_in_world_cells() {
        let chunk = Chunk::new(2, 3, GroundId(0));
        assert_eq!(chunk.coords(), (2, 3));
        assert_eq!(chunk.origin(), (32, 48));
    }
}
