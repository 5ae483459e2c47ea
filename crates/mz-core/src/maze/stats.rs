//! Maze summary counts

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Accessory, CellKind, EdgeKind, Grid};

/// Counts over a grid's cells and edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeStats {
    pub cells: usize,
    pub trees: usize,
    pub boundary_walls: usize,
    pub interior_walls: usize,
    pub railings: usize,
    pub passages: usize,
    pub doors: usize,
    pub stairways: usize,
    /// Distinct room numbers in use
    pub rooms: usize,
    pub max_altitude: i32,
    /// Cells with at least one side still undecided
    pub open_cells: usize,
}

impl MazeStats {
    pub fn collect(grid: &Grid) -> Self {
        let mut stats = Self::default();
        let mut rooms = HashSet::new();

        for cell in grid.cells() {
            stats.cells += 1;
            if cell.kind == CellKind::Tree {
                stats.trees += 1;
            }
            if matches!(cell.accessory, Some(Accessory::Stairway { .. })) {
                stats.stairways += 1;
            }
            if !cell.is_fully_initialized() {
                stats.open_cells += 1;
            }
            stats.max_altitude = stats.max_altitude.max(cell.altitude);
            rooms.insert(cell.room);
        }
        stats.rooms = rooms.len();

        for edge in grid.edges() {
            match edge.kind {
                EdgeKind::Wall if edge.is_boundary() => stats.boundary_walls += 1,
                EdgeKind::Wall => stats.interior_walls += 1,
                EdgeKind::Passage => stats.passages += 1,
                EdgeKind::Door(_) => stats.doors += 1,
            }
            if edge.railing {
                stats.railings += 1;
            }
        }
        stats
    }

    /// Every edge, each counted once
    pub fn edges(&self) -> usize {
        self.boundary_walls + self.interior_walls + self.passages + self.doors
    }
}
