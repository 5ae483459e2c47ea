//! mz-core: Multi-level maze generation
//!
//! Builds rectangular mazes with a seeded growing-tree algorithm. Passages
//! may be fitted with swinging doors that start a new room, and a stairway
//! can lift a branch of the maze onto a second floor. Nothing here performs
//! I/O beyond reading an options file.

pub mod maze;
pub mod options;

mod consts;
mod error;
mod rng;

pub use consts::*;
pub use error::{MazeError, MazeResult};
pub use maze::{Generator, Maze, generate};
pub use options::{MazeOptions, OptionsError};
pub use rng::MazeRng;
