//! Maze structure and generation
//!
//! Cells, the edges between them, the grid that owns both, and the
//! growing-tree generator that fills the grid.

mod accessory;
mod cell;
mod coord;
mod direction;
mod door;
mod edge;
mod generator;
mod grid;
mod render;
mod stats;
mod walker;

pub use accessory::Accessory;
pub use cell::{Cell, CellKind, Sides};
pub use coord::Coord;
pub use direction::Direction;
pub use door::{Door, DoorState};
pub use edge::{Edge, EdgeId, EdgeKind};
pub use generator::{GenerationStep, Generator, Link, Maze, generate};
pub use grid::Grid;
pub use render::{render_all, render_layer};
pub use stats::MazeStats;
pub use walker::{WalkCommand, Walker};
