//! Quarter-turn rotations and compass sides.
//!
//! Angles are measured clockwise in 90° steps. Sides map to neighbouring
//! cells as North `(0,+1)`, East `(+1,0)`, South `(0,-1)`, West `(-1,0)`.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Quarter-turn index in `0..4`, as written to save files.
    pub fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Rotation> {
        Rotation::ALL.get(index as usize).copied()
    }

    pub fn degrees(self) -> u16 {
        self.index() as u16 * 90
    }

    /// Applies `other` after `self`.
    pub fn then(self, other: Rotation) -> Rotation {
        Rotation::ALL[((self.index() + other.index()) % 4) as usize]
    }

    /// Turns by `delta` degrees. Only a single quarter turn either way is a
    /// legal request.
    pub fn turned(self, delta: i32) -> Result<Rotation, RotationError> {
        let step = match delta {
            90 => Rotation::Deg90,
            -90 => Rotation::Deg270,
            other => return Err(RotationError::InvalidDelta(other)),
        };
        Ok(self.then(step))
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    fn quarter(self) -> u8 {
        match self {
            Side::North => 0,
            Side::East => 1,
            Side::South => 2,
            Side::West => 3,
        }
    }

    pub fn degrees(self) -> u16 {
        self.quarter() as u16 * 90
    }

    /// The side this one faces after the block is turned by `rotation`.
    pub fn rotated(self, rotation: Rotation) -> Side {
        Side::ALL[((self.quarter() + rotation.index()) % 4) as usize]
    }

    pub fn offset(self) -> (i32, i32) {
        match self {
            Side::North => (0, 1),
            Side::East => (1, 0),
            Side::South => (0, -1),
            Side::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Side {
        self.rotated(Rotation::Deg180)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationError {
    /// A turn other than +90 or -90 degrees was requested.
    InvalidDelta(i32),
}

impl std::fmt::Display for RotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationError::InvalidDelta(delta) => {
                write!(f, "invalid rotation delta {delta}, expected +90 or -90")
            }
        }
    }
}

impl std::error::Error for RotationError {}
