//! Objects attached to a cell

use serde::{Deserialize, Serialize};

use super::Direction;

/// Something occupying part of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Accessory {
    /// Foot of a flight of stairs climbing towards `facing`
    Stairway { facing: Direction },
}

impl Accessory {
    pub const fn is_passable(&self) -> bool {
        true
    }

    pub const fn is_obstacle(&self) -> bool {
        true
    }

    // Stairways have nothing to animate.
    pub fn on_entered(&mut self) {}

    pub fn on_exited(&mut self) {}

    pub const fn symbol(&self) -> char {
        match self {
            Accessory::Stairway { facing } => facing.arrow(),
        }
    }
}
