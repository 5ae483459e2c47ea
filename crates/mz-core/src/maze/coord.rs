//! Grid coordinates

use core::fmt;

use serde::{Deserialize, Serialize};

use super::Direction;

/// Integer grid position on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Neighboring coordinate one step towards `direction`
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dz) = direction.offset();
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Coordinate `n` steps towards `direction`
    pub const fn step_n(self, direction: Direction, n: i32) -> Self {
        let (dx, dz) = direction.offset();
        Self {
            x: self.x + dx * n,
            z: self.z + dz * n,
        }
    }

    /// Direction of an adjacent coordinate, if `other` is one step away
    pub fn direction_to(self, other: Coord) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&dir| self.step(dir) == other)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}
