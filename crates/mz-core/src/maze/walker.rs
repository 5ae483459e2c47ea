//! Route following through a finished maze
//!
//! A walker holds a route of cells. The first entry is where it stands, the
//! last is where it will end up. Moving in a direction appends the cell
//! behind a passage or door to the route; `advance` then steps onto the next
//! cell and tells the grid, which swings doors open around the walker and
//! closed behind it.

use std::collections::VecDeque;

use strum::{Display, EnumIter};

use super::{Coord, Direction, Grid};
use crate::error::{MazeError, MazeResult};

/// Relative movement and turning commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum WalkCommand {
    Forward,
    Right,
    Back,
    Left,
    TurnLeft,
    TurnRight,
}

impl WalkCommand {
    /// Map the usual movement keys (`wasd`, `q`/`e`, or `f`/`r`/`b`/`l`)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' | 'f' => Some(Self::Forward),
            'd' | 'r' => Some(Self::Right),
            's' | 'b' => Some(Self::Back),
            'a' | 'l' => Some(Self::Left),
            'q' | '<' => Some(Self::TurnLeft),
            'e' | '>' => Some(Self::TurnRight),
            _ => None,
        }
    }
}

/// Someone moving cell to cell
#[derive(Debug, Clone, Default)]
pub struct Walker {
    route: VecDeque<Coord>,
    look: Direction,
}

impl Walker {
    pub fn new(look: Direction) -> Self {
        Self {
            route: VecDeque::new(),
            look,
        }
    }

    /// Cell the walker stands on, once placed
    pub fn current(&self) -> Option<Coord> {
        self.route.front().copied()
    }

    /// Last cell of the planned route
    pub fn destination(&self) -> Option<Coord> {
        self.route.back().copied()
    }

    pub fn route(&self) -> impl Iterator<Item = Coord> + '_ {
        self.route.iter().copied()
    }

    /// True while there are cells left to walk to
    pub fn is_moving(&self) -> bool {
        self.route.len() > 1
    }

    /// Direction the walker looks in when standing still
    pub fn look_direction(&self) -> Direction {
        self.look
    }

    /// Direction the walker faces: towards the next cell when moving
    pub fn facing(&self) -> Direction {
        match (self.route.front(), self.route.get(1)) {
            (Some(&here), Some(&next)) => here.direction_to(next).unwrap_or(self.look),
            _ => self.look,
        }
    }

    pub fn look(&mut self, direction: Direction) {
        self.look = direction;
    }

    /// Put the walker on `cell`, dropping any planned route
    pub fn teleport(&mut self, grid: &mut Grid, cell: Coord) -> MazeResult<()> {
        if !grid.is_occupied(cell) {
            return Err(MazeError::NoCell(cell));
        }
        if let Some(current) = self.current() {
            grid.notify_exited(current)?;
        }
        self.route.clear();
        self.route.push_back(cell);
        grid.notify_entered(cell)
    }

    /// Append a cell to the route
    pub fn move_to(&mut self, cell: Coord) {
        self.route.push_back(cell);
    }

    /// Extend the route one cell towards `direction` from its end.
    ///
    /// Only passages and doors can be walked through; door state does not
    /// matter since arriving next to a door opens it. Returns the cell added.
    pub fn move_direction(&mut self, grid: &Grid, direction: Direction) -> Option<Coord> {
        let from = self.destination()?;
        let edge = grid.edge_at(from, direction)?;
        if !edge.kind.is_passage_like() {
            return None;
        }
        let next = edge.other_side(from)?;
        self.move_to(next);
        Some(next)
    }

    /// Apply a movement command relative to the look direction
    pub fn apply(&mut self, grid: &Grid, command: WalkCommand) -> Option<Coord> {
        let direction = match command {
            WalkCommand::Forward => self.look,
            WalkCommand::Right => self.look.next_clockwise(),
            WalkCommand::Back => self.look.opposite(),
            WalkCommand::Left => self.look.next_counterclockwise(),
            WalkCommand::TurnLeft => {
                self.look = self.look.next_counterclockwise();
                return None;
            }
            WalkCommand::TurnRight => {
                self.look = self.look.next_clockwise();
                return None;
            }
        };
        let moved = self.move_direction(grid, direction);
        self.look = direction;
        moved
    }

    /// Step onto the next cell of the route, returning it
    pub fn advance(&mut self, grid: &mut Grid) -> MazeResult<Option<Coord>> {
        if !self.is_moving() {
            return Ok(None);
        }
        if let Some(left) = self.route.pop_front() {
            grid.notify_exited(left)?;
        }
        let Some(arrived) = self.current() else {
            return Ok(None);
        };
        grid.notify_entered(arrived)?;
        log::trace!("walker entered {}", arrived);
        Ok(Some(arrived))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{CellKind, Door, EdgeKind};
    use strum::IntoEnumIterator;

    /// Three cells in a row: a -door- b -wall- c
    fn corridor() -> Grid {
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
        grid
    }

    #[test]
    fn test_key_mapping() {
        for command in WalkCommand::iter() {
            let key = match command {
                WalkCommand::Forward => 'w',
                WalkCommand::Right => 'd',
                WalkCommand::Back => 's',
                WalkCommand::Left => 'a',
                WalkCommand::TurnLeft => 'q',
                WalkCommand::TurnRight => 'e',
            };
            assert_eq!(WalkCommand::from_char(key), Some(command));
        }
        assert_eq!(WalkCommand::from_char('x'), None);
    }

    #[test]
    fn test_teleport_requires_cell() {
        let mut grid = Grid::new(2, 2).unwrap();
        let mut walker = Walker::default();
        assert_eq!(
            walker.teleport(&mut grid, Coord::new(1, 1)),
            Err(MazeError::NoCell(Coord::new(1, 1)))
        );
        assert_eq!(walker.current(), None);
    }

    #[test]
    fn test_walls_block_route() {
        let mut grid = corridor();
        let mut walker = Walker::new(Direction::East);
        walker.teleport(&mut grid, Coord::new(0, 0)).unwrap();

        // Door is closed but still routable
        assert_eq!(
            walker.apply(&grid, WalkCommand::Forward),
            Some(Coord::new(1, 0))
        );
        assert_eq!(walker.apply(&grid, WalkCommand::Forward), None);
        assert_eq!(walker.destination(), Some(Coord::new(1, 0)));
        assert!(walker.is_moving());
        assert_eq!(walker.facing(), Direction::East);
    }

    #[test]
    fn test_entering_opens_door_and_leaving_closes_it() {
        let mut grid = corridor();
        let mut walker = Walker::new(Direction::East);
        walker.teleport(&mut grid, Coord::new(0, 0)).unwrap();
        while grid.tick_doors() > 0 {}
        let door = |grid: &Grid| {
            grid.edge_at(Coord::new(0, 0), Direction::East)
                .unwrap()
                .is_passable()
        };
        assert!(door(&grid));

        walker.move_direction(&grid, Direction::East);
        assert_eq!(walker.advance(&mut grid).unwrap(), Some(Coord::new(1, 0)));
        // Left (0,0), entered (1,0): the shared door hears exit then enter
        while grid.tick_doors() > 0 {}
        assert!(door(&grid));

        walker.teleport(&mut grid, Coord::new(2, 0)).unwrap();
        while grid.tick_doors() > 0 {}
        assert!(!door(&grid));
        assert_eq!(walker.advance(&mut grid).unwrap(), None);
    }

    #[test]
    fn test_turning_only_changes_look() {
        let grid = corridor();
        let mut walker = Walker::new(Direction::North);
        walker.apply(&grid, WalkCommand::TurnRight);
        assert_eq!(walker.look_direction(), Direction::East);
        walker.apply(&grid, WalkCommand::TurnLeft);
        walker.apply(&grid, WalkCommand::TurnLeft);
        assert_eq!(walker.look_direction(), Direction::West);
        assert_eq!(walker.route().count(), 0);
    }

    #[test]
    fn test_relative_moves_update_look() {
        let mut grid = corridor();
        let mut walker = Walker::new(Direction::North);
        walker.teleport(&mut grid, Coord::new(1, 0)).unwrap();
        // Facing north, "left" is west through the door
        assert_eq!(
            walker.apply(&grid, WalkCommand::Left),
            Some(Coord::new(0, 0))
        );
        assert_eq!(walker.look_direction(), Direction::West);
        // Facing west, "back" from (0,0) is east towards (1,0)
        assert_eq!(
            walker.apply(&grid, WalkCommand::Back),
            Some(Coord::new(1, 0))
        );
        assert_eq!(walker.route().collect::<Vec<_>>().len(), 3);
    }
}
