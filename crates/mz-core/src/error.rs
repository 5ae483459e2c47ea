//! Maze generation errors
//!
//! Configuration errors are reported before any cell exists. Every other
//! variant is a broken grid invariant and aborts generation.

use thiserror::Error;

use crate::maze::{Coord, Direction};

/// Errors raised while configuring or building a maze
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MazeError {
    #[error("Maze dimensions must be positive, got {width}x{depth}")]
    InvalidDimensions { width: i32, depth: i32 },

    #[error("Door probability must lie in [0, 1], got {0}")]
    InvalidDoorProbability(f64),

    #[error("Cell {0} has no undecided side left")]
    CellFullyInitialized(Coord),

    #[error("Edge at {0} has itself for a neighbor")]
    SelfLoop(Coord),

    #[error("Edge slot {direction} of cell {coord} is already set")]
    EdgeAlreadySet { coord: Coord, direction: Direction },

    #[error("No cell at {0}")]
    NoCell(Coord),

    #[error("Cell {0} already exists")]
    CellOccupied(Coord),

    #[error("Coordinate {0} lies outside the maze")]
    OutOfBounds(Coord),
}

/// Convenience alias used throughout the crate
pub type MazeResult<T> = Result<T, MazeError>;
