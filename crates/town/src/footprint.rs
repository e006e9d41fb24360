//! Dense rectangular 3D arrays indexed `[x][y][z]`, and their planar rotation.
//!
//! A [`Footprint`] is always rectangular: shapes with ragged columns are
//! padded with an explicit empty value when built. Rotation only turns the
//! two planar axes; layers are carried along unchanged.

use crate::rotation::Rotation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footprint<T> {
    size_x: usize,
    size_y: usize,
    layers: usize,
    cells: Vec<T>,
}

impl<T: Clone> Footprint<T> {
    pub fn filled(size_x: usize, size_y: usize, layers: usize, value: T) -> Self {
        Self {
            size_x,
            size_y,
            layers,
            cells: vec![value; size_x * size_y * layers],
        }
    }

    /// Builds a footprint from nested `[x][y][z]` vectors, padding every axis
    /// with `empty` up to the given dimensions. Entries beyond the dimensions
    /// are dropped.
    pub fn from_nested(
        nested: Vec<Vec<Vec<T>>>,
        size_x: usize,
        size_y: usize,
        layers: usize,
        empty: T,
    ) -> Self {
        let mut footprint = Self::filled(size_x, size_y, layers, empty);
        for (x, column) in nested.into_iter().enumerate().take(size_x) {
            for (y, stack) in column.into_iter().enumerate().take(size_y) {
                for (z, value) in stack.into_iter().enumerate().take(layers) {
                    footprint.set(x, y, z, value);
                }
            }
        }
        footprint
    }

    /// Turns the planar axes by `rotation`. The 90° and 270° turns swap the
    /// planar dimensions.
    pub fn rotated(&self, rotation: Rotation) -> Footprint<T> {
        let (sx, sy) = (self.size_x, self.size_y);
        let (nx, ny) = match rotation {
            Rotation::Deg0 | Rotation::Deg180 => (sx, sy),
            Rotation::Deg90 | Rotation::Deg270 => (sy, sx),
        };
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..nx {
            for j in 0..ny {
                let (src_x, src_y) = match rotation {
                    Rotation::Deg0 => (i, j),
                    Rotation::Deg90 => (sx - 1 - j, i),
                    Rotation::Deg180 => (sx - 1 - i, sy - 1 - j),
                    Rotation::Deg270 => (j, sy - 1 - i),
                };
                for z in 0..self.layers {
                    cells.push(self.cells[self.index(src_x, src_y, z)].clone());
                }
            }
        }
        Footprint {
            size_x: nx,
            size_y: ny,
            layers: self.layers,
            cells,
        }
    }
}

impl<T> Footprint<T> {
    pub fn size_x(&self) -> usize {
        self.size_x
    }

    pub fn size_y(&self) -> usize {
        self.size_y
    }

    pub fn layers(&self) -> usize {
        self.layers
    }

    #[inline]
    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.size_y + y) * self.layers + z
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<&T> {
        if x < self.size_x && y < self.size_y && z < self.layers {
            Some(&self.cells[self.index(x, y, z)])
        } else {
            None
        }
    }

    /// Writes `value` at `(x, y, z)`; out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        if x < self.size_x && y < self.size_y && z < self.layers {
            let idx = self.index(x, y, z);
            self.cells[idx] = value;
        }
    }

    /// All cells in row-major `(x, y, z)` order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), &T)> + '_ {
        let (sy, layers) = (self.size_y, self.layers);
        self.cells.iter().enumerate().map(move |(i, value)| {
            let z = i % layers;
            let y = (i / layers) % sy;
            let x = i / (layers * sy);
            ((x, y, z), value)
        })
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Footprint<U> {
        Footprint {
            size_x: self.size_x,
            size_y: self.size_y,
            layers: self.layers,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl<T> Footprint<Option<T>> {
    /// Non-empty cells in row-major `(x, y, z)` order.
    pub fn occupied(&self) -> impl Iterator<Item = ((usize, usize, usize), &T)> + '_ {
        self.iter()
            .filter_map(|(pos, value)| value.as_ref().map(|v| (pos, v)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether any layer of planar cell `(x, y)` is filled.
    pub fn column_is_occupied(&self, x: usize, y: usize) -> bool {
        (0..self.layers).any(|z| matches!(self.get(x, y, z), Some(Some(_))))
    }
}
