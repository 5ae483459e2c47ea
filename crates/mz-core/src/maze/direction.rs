//! Cardinal directions and their algebra

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// One of the four sides of a cell
///
/// North is +z, East is +x. The discriminant is the edge slot index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Direction {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    /// All directions in slot order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Direction for a slot index, wrapping modulo 4
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Slot index of this direction
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    pub const fn next_clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub const fn next_counterclockwise(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Unit step `(dx, dz)`
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Yaw in degrees for anything placed facing this way
    pub const fn rotation_degrees(self) -> f32 {
        match self {
            Direction::North => 0.0,
            Direction::East => 90.0,
            Direction::South => 180.0,
            Direction::West => 270.0,
        }
    }

    /// Display arrow
    pub const fn arrow(self) -> char {
        match self {
            Direction::North => '^',
            Direction::East => '>',
            Direction::South => 'v',
            Direction::West => '<',
        }
    }
}
