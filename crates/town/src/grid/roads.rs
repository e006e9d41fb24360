//! Road sprite selection from neighbouring road slots.
//!
//! Nothing here is stored: the shape of a road is recomputed from its four
//! neighbours whenever a renderer asks for it.

use super::TownGrid;
use crate::catalog::RoadType;
use crate::rotation::{Rotation, Side};

/// Which of the four neighbours also hold a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoadConnections {
    pub north: bool,
    pub east: bool,
    pub south: bool,
    pub west: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    NorthSouth,
    EastWest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadShape {
    Isolated,
    /// Dead end; the side is where the only neighbour lies.
    End(Side),
    Straight(Axis),
    Corner { vertical: Side, horizontal: Side },
    /// Three-way junction; the side is the one without a neighbour.
    Tee(Side),
    Cross,
}

impl RoadConnections {
    pub fn has(&self, side: Side) -> bool {
        match side {
            Side::North => self.north,
            Side::East => self.east,
            Side::South => self.south,
            Side::West => self.west,
        }
    }

    pub fn count(&self) -> usize {
        Side::ALL.iter().filter(|s| self.has(**s)).count()
    }

    pub fn shape(&self) -> RoadShape {
        let connected: Vec<Side> = Side::ALL.into_iter().filter(|s| self.has(*s)).collect();
        match connected.as_slice() {
            [] => RoadShape::Isolated,
            [side] => RoadShape::End(*side),
            [Side::North, Side::South] => RoadShape::Straight(Axis::NorthSouth),
            [Side::East, Side::West] => RoadShape::Straight(Axis::EastWest),
            [a, b] => {
                let vertical = if *a == Side::North || *b == Side::North {
                    Side::North
                } else {
                    Side::South
                };
                let horizontal = if *a == Side::East || *b == Side::East {
                    Side::East
                } else {
                    Side::West
                };
                RoadShape::Corner {
                    vertical,
                    horizontal,
                }
            }
            [_, _, _] => {
                let missing = Side::ALL
                    .into_iter()
                    .find(|s| !self.has(*s))
                    .unwrap_or(Side::South);
                RoadShape::Tee(missing)
            }
            _ => RoadShape::Cross,
        }
    }
}

impl RoadShape {
    /// Turn to apply to the shape's base sprite. Base sprites are drawn as:
    /// end opening north, straight north-south, corner north-east, tee
    /// missing south.
    pub fn rotation(self) -> Rotation {
        let quarter = |side: Side| match side {
            Side::North => Rotation::Deg0,
            Side::East => Rotation::Deg90,
            Side::South => Rotation::Deg180,
            Side::West => Rotation::Deg270,
        };
        match self {
            RoadShape::Isolated | RoadShape::Cross => Rotation::Deg0,
            RoadShape::End(side) => quarter(side),
            RoadShape::Straight(Axis::NorthSouth) => Rotation::Deg0,
            RoadShape::Straight(Axis::EastWest) => Rotation::Deg90,
            RoadShape::Corner {
                vertical,
                horizontal,
            } => match (vertical, horizontal) {
                (Side::North, Side::East) => Rotation::Deg0,
                (Side::South, Side::East) => Rotation::Deg90,
                (Side::South, _) => Rotation::Deg180,
                _ => Rotation::Deg270,
            },
            RoadShape::Tee(missing) => quarter(missing).then(Rotation::Deg180),
        }
    }

    pub fn sprite(self, road_type: &RoadType) -> &str {
        let sprites = &road_type.sprites;
        match self {
            RoadShape::Isolated => &sprites.isolated,
            RoadShape::End(_) => &sprites.end,
            RoadShape::Straight(_) => &sprites.straight,
            RoadShape::Corner { .. } => &sprites.corner,
            RoadShape::Tee(_) => &sprites.tee,
            RoadShape::Cross => &sprites.cross,
        }
    }
}

impl TownGrid {
    /// Neighbouring road slots of `(x, y)`, counting pending roads so previews
    /// connect to the network they would join.
    pub fn road_connections(&self, x: i32, y: i32) -> RoadConnections {
        let has_road = |side: Side| {
            let (dx, dy) = side.offset();
            !self.road_slot(x.saturating_add(dx), y.saturating_add(dy)).is_empty()
        };
        RoadConnections {
            north: has_road(Side::North),
            east: has_road(Side::East),
            south: has_road(Side::South),
            west: has_road(Side::West),
        }
    }

    /// Shape of the road at `(x, y)`, or `None` if the slot holds no road.
    pub fn road_shape(&self, x: i32, y: i32) -> Option<RoadShape> {
        if self.road_slot(x, y).is_empty() {
            return None;
        }
        Some(self.road_connections(x, y).shape())
    }
}
