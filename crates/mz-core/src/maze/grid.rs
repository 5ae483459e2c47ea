//! Cell and edge arena
//!
//! Cells live in a flat array indexed by coordinate, edges in a separate
//! array indexed by `EdgeId`. A cell refers to its edges by id and an edge
//! refers to its cells by coordinate, so there are no reference cycles.

use std::collections::VecDeque;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::{Cell, CellKind, Coord, Direction, Edge, EdgeId, EdgeKind};
use crate::error::{MazeError, MazeResult};

/// Fixed-size maze grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    depth: i32,
    cells: Vec<Option<Cell>>,
    edges: Vec<Edge>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: i32, depth: i32) -> MazeResult<Self> {
        if width <= 0 || depth <= 0 {
            return Err(MazeError::InvalidDimensions { width, depth });
        }
        let area = width as usize * depth as usize;
        Ok(Self {
            width,
            depth,
            cells: vec![None; area],
            edges: Vec::with_capacity(area * 2 + width as usize + depth as usize),
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.z >= 0 && coord.z < self.depth
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.z as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub(crate) fn cell_at_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index(coord).and_then(|i| self.cells[i].as_mut())
    }

    fn require_cell_mut(&mut self, coord: Coord) -> MazeResult<&mut Cell> {
        self.cell_at_mut(coord).ok_or(MazeError::NoCell(coord))
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cell_at(coord).is_some()
    }

    /// Place a new cell. Each coordinate can hold one cell for the life of the grid.
    pub fn create_cell(
        &mut self,
        coord: Coord,
        kind: CellKind,
        altitude: i32,
    ) -> MazeResult<&mut Cell> {
        let index = self.index(coord).ok_or(MazeError::OutOfBounds(coord))?;
        let slot = &mut self.cells[index];
        if slot.is_some() {
            return Err(MazeError::CellOccupied(coord));
        }
        Ok(slot.insert(Cell::new(coord, kind, altitude)))
    }

    /// All placed cells, row by row from z = 0
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().flatten()
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
        self.edges.get_mut(id.0)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge on the given side of the cell at `coord`
    pub fn edge_at(&self, coord: Coord, direction: Direction) -> Option<&Edge> {
        let id = self.cell_at(coord)?.edge(direction)?;
        self.edge(id)
    }

    /// Create an edge and attach it to both cells.
    ///
    /// `cell` gets the edge on `direction`, `other` (when present) on the
    /// opposite side. Nothing is written unless both slots are free.
    pub fn create_edge(
        &mut self,
        cell: Coord,
        other: Option<Coord>,
        direction: Direction,
        kind: EdgeKind,
    ) -> MazeResult<EdgeId> {
        if other == Some(cell) {
            return Err(MazeError::SelfLoop(cell));
        }

        let origin = self.cell_at(cell).ok_or(MazeError::NoCell(cell))?;
        if origin.edge(direction).is_some() {
            return Err(MazeError::EdgeAlreadySet {
                coord: cell,
                direction,
            });
        }
        let railing = kind == EdgeKind::Wall && origin.altitude > 0;

        if let Some(other) = other {
            let neighbor = self.cell_at(other).ok_or(MazeError::NoCell(other))?;
            if neighbor.edge(direction.opposite()).is_some() {
                return Err(MazeError::EdgeAlreadySet {
                    coord: other,
                    direction: direction.opposite(),
                });
            }
        }

        let id = EdgeId(self.edges.len());
        let mut edge = Edge::new(cell, other, direction, kind);
        edge.railing = railing;
        self.edges.push(edge);

        self.require_cell_mut(cell)?.set_edge(direction, id)?;
        if let Some(other) = other {
            self.require_cell_mut(other)?
                .set_edge(direction.opposite(), id)?;
        }
        Ok(id)
    }

    /// Number of sides (plus accessory) that block sight from a cell
    pub fn obstacle_edge_count(&self, coord: Coord) -> Option<usize> {
        let cell = self.cell_at(coord)?;
        let edges = cell
            .edges()
            .filter_map(|id| self.edge(id))
            .filter(|edge| edge.is_obstacle())
            .count();
        let accessory = cell
            .accessory
            .map_or(0, |accessory| usize::from(accessory.is_obstacle()));
        Some(edges + accessory)
    }

    /// Someone stepped onto `coord`: every edge and the accessory hear about it
    pub fn notify_entered(&mut self, coord: Coord) -> MazeResult<()> {
        let cell = self.require_cell_mut(coord)?;
        if let Some(accessory) = cell.accessory.as_mut() {
            accessory.on_entered();
        }
        let ids: Vec<EdgeId> = cell.edges().collect();
        for id in ids {
            if let Some(edge) = self.edge_mut(id) {
                edge.on_entered();
            }
        }
        Ok(())
    }

    /// Someone left `coord`
    pub fn notify_exited(&mut self, coord: Coord) -> MazeResult<()> {
        let cell = self.require_cell_mut(coord)?;
        if let Some(accessory) = cell.accessory.as_mut() {
            accessory.on_exited();
        }
        let ids: Vec<EdgeId> = cell.edges().collect();
        for id in ids {
            if let Some(edge) = self.edge_mut(id) {
                edge.on_exited();
            }
        }
        Ok(())
    }

    /// Advance every swinging door by one step, returning how many still move
    pub fn tick_doors(&mut self) -> usize {
        self.edges
            .iter_mut()
            .filter(|edge| edge.is_door())
            .map(|edge| edge.tick())
            .filter(|&moving| moving)
            .count()
    }

    /// Cells reachable from `start` through passages and doors
    ///
    /// Door state is ignored; a closed door still connects two rooms.
    pub fn reachable_from(&self, start: Coord) -> HashSet<Coord> {
        let mut seen = HashSet::new();
        if !self.is_occupied(start) {
            return seen;
        }
        let mut queue = VecDeque::from([start]);
        seen.insert(start);

        while let Some(coord) = queue.pop_front() {
            let Some(cell) = self.cell_at(coord) else {
                continue;
            };
            for edge in cell.edges().filter_map(|id| self.edge(id)) {
                if !edge.kind.is_passage_like() {
                    continue;
                }
                if let Some(next) = edge.other_side(coord) {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }

    /// Scene position of a cell's floor centre, with the grid centred on the origin
    pub fn world_position(&self, coord: Coord) -> Option<[f32; 3]> {
        let cell = self.cell_at(coord)?;
        Some([
            coord.x as f32 - self.width as f32 * 0.5 + 0.5,
            cell.elevation(),
            coord.z as f32 - self.depth as f32 * 0.5 + 0.5,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Accessory, Door};

    fn two_cells() -> Grid {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.create_cell(Coord::new(1, 1), CellKind::Floor, 0).unwrap();
        grid.create_cell(Coord::new(2, 1), CellKind::Floor, 0).unwrap();
        grid
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            Grid::new(0, 5).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, depth: 5 }
        );
        assert!(Grid::new(3, -1).is_err());
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(4, 2).unwrap();
        assert!(grid.contains(Coord::new(0, 0)));
        assert!(grid.contains(Coord::new(3, 1)));
        assert!(!grid.contains(Coord::new(4, 1)));
        assert!(!grid.contains(Coord::new(0, 2)));
        assert!(!grid.contains(Coord::new(-1, 0)));
    }

    #[test]
    fn test_one_cell_per_coordinate() {
        let mut grid = two_cells();
        assert_eq!(
            grid.create_cell(Coord::new(1, 1), CellKind::Tree, 0).unwrap_err(),
            MazeError::CellOccupied(Coord::new(1, 1))
        );
        assert_eq!(
            grid.create_cell(Coord::new(5, 1), CellKind::Floor, 0).unwrap_err(),
            MazeError::OutOfBounds(Coord::new(5, 1))
        );
        assert_eq!(grid.cell_count(), 2);
    }

    #[test]
    fn test_edge_attached_symmetrically() {
        let mut grid = two_cells();
        let a = Coord::new(1, 1);
        let b = Coord::new(2, 1);
        let id = grid
            .create_edge(a, Some(b), Direction::East, EdgeKind::Passage)
            .unwrap();

        assert_eq!(grid.cell_at(a).unwrap().edge(Direction::East), Some(id));
        assert_eq!(grid.cell_at(b).unwrap().edge(Direction::West), Some(id));
        assert_eq!(grid.edge_at(a, Direction::East).unwrap().other, Some(b));
        assert_eq!(grid.edge_at(b, Direction::West).unwrap().cell, a);
    }

    #[test]
    fn test_self_loop_rejected() {
        let mut grid = two_cells();
        let a = Coord::new(1, 1);
        assert_eq!(
            grid.create_edge(a, Some(a), Direction::North, EdgeKind::Wall),
            Err(MazeError::SelfLoop(a))
        );
        assert!(grid.edges().is_empty());
    }

    #[test]
    fn test_double_assignment_leaves_grid_untouched() {
        let mut grid = two_cells();
        let a = Coord::new(1, 1);
        let b = Coord::new(2, 1);
        grid.create_edge(b, None, Direction::West, EdgeKind::Wall).unwrap();
        let err = grid
            .create_edge(a, Some(b), Direction::East, EdgeKind::Passage)
            .unwrap_err();
        assert_eq!(
            err,
            MazeError::EdgeAlreadySet {
                coord: b,
                direction: Direction::West
            }
        );
        assert!(grid.cell_at(a).unwrap().edge(Direction::East).is_none());
        assert_eq!(grid.edges().len(), 1);
    }

    #[test]
    fn test_railing_on_upper_walls() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.create_cell(Coord::new(0, 0), CellKind::Floor, 1).unwrap();
        let id = grid
            .create_edge(Coord::new(0, 0), None, Direction::South, EdgeKind::Wall)
            .unwrap();
        assert!(grid.edge(id).unwrap().railing);
    }

    #[test]
    fn test_obstacle_count_and_door_events() {
        let mut grid = two_cells();
        let a = Coord::new(1, 1);
        let b = Coord::new(2, 1);
        grid.create_edge(a, Some(b), Direction::East, EdgeKind::Door(Door::new())).unwrap();
        grid.create_edge(a, None, Direction::North, EdgeKind::Wall).unwrap();
        grid.cell_at_mut(a).unwrap().accessory = Some(Accessory::Stairway {
            facing: Direction::East,
        });
        // door + wall + stairway
        assert_eq!(grid.obstacle_edge_count(a), Some(3));
        assert_eq!(grid.obstacle_edge_count(Coord::new(0, 0)), None);

        grid.notify_entered(b).unwrap();
        let mut ticks = 0;
        while grid.tick_doors() > 0 {
            ticks += 1;
        }
        assert!(ticks > 0);
        assert!(grid.edge_at(a, Direction::East).unwrap().is_passable());

        grid.notify_exited(b).unwrap();
        while grid.tick_doors() > 0 {}
        assert!(!grid.edge_at(a, Direction::East).unwrap().is_passable());
        assert_eq!(
            grid.notify_entered(Coord::new(0, 2)),
            Err(MazeError::NoCell(Coord::new(0, 2)))
        );
    }

    #[test]
    fn test_reachable_follows_passages_and_doors() {
        let mut grid = Grid::new(3, 1).unwrap();
        for x in 0..3 {
            grid.create_cell(Coord::new(x, 0), CellKind::Floor, 0).unwrap();
        }
        grid.create_edge(
            Coord::new(0, 0),
            Some(Coord::new(1, 0)),
            Direction::East,
            EdgeKind::Door(Door::new()),
        )
        .unwrap();
        grid.create_edge(
            Coord::new(1, 0),
            Some(Coord::new(2, 0)),
            Direction::East,
            EdgeKind::Wall,
        )
        .unwrap();

        let reach = grid.reachable_from(Coord::new(0, 0));
        assert_eq!(reach.len(), 2);
        assert!(reach.contains(&Coord::new(1, 0)));
        assert!(!reach.contains(&Coord::new(2, 0)));
    }

    #[test]
    fn test_world_position_centres_grid() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.create_cell(Coord::new(0, 0), CellKind::Floor, 0).unwrap();
        grid.create_cell(Coord::new(3, 1), CellKind::Floor, 1).unwrap();
        assert_eq!(grid.world_position(Coord::new(0, 0)), Some([-1.5, 0.0, -0.5]));
        let [x, y, z] = grid.world_position(Coord::new(3, 1)).unwrap();
        assert_eq!((x, z), (1.5, 0.5));
        assert!((y - 1.078).abs() < 1e-6);
    }
}
