//! Maze cells

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{Accessory, Coord, Direction, EdgeId};
use crate::consts::{ALTITUDE_HEIGHT, SIDES};
use crate::error::{MazeError, MazeResult};
use crate::rng::MazeRng;

/// Cell variant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellKind {
    #[default]
    Floor = 0,
    /// Rare obstacle cell, always created in room 0 on the ground
    Tree = 1,
}

impl CellKind {
    pub const fn symbol(&self) -> char {
        match self {
            CellKind::Floor => '.',
            CellKind::Tree => 'T',
        }
    }
}

bitflags! {
    /// Sides whose edge has been decided
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Sides: u8 {
        const NORTH = 0x01;
        const EAST = 0x02;
        const SOUTH = 0x04;
        const WEST = 0x08;
    }
}

// Manual serde impl for Sides
impl Serialize for Sides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Sides::from_bits_truncate(bits))
    }
}

impl Sides {
    pub const fn of(direction: Direction) -> Self {
        Self::from_bits_truncate(1 << direction.index())
    }
}

/// A single maze cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    pub kind: CellKind,
    /// Floor level; 0 is the ground
    pub altitude: i32,
    /// Room this cell belongs to.
    ///
    /// A door numbers the new room one above the room it came from, so
    /// unrelated branches can end up sharing a number.
    pub room: i32,
    pub accessory: Option<Accessory>,
    edges: [Option<EdgeId>; SIDES],
    decided: Sides,
}

impl Cell {
    pub fn new(coord: Coord, kind: CellKind, altitude: i32) -> Self {
        Self {
            coord,
            kind,
            altitude,
            room: 0,
            accessory: None,
            edges: [None; SIDES],
            decided: Sides::empty(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Edge on the given side, once decided
    pub fn edge(&self, direction: Direction) -> Option<EdgeId> {
        self.edges[direction.index()]
    }

    /// All decided edges in slot order
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().flatten().copied()
    }

    pub fn decided_sides(&self) -> Sides {
        self.decided
    }

    pub fn initialized_count(&self) -> usize {
        self.decided.bits().count_ones() as usize
    }

    pub fn is_fully_initialized(&self) -> bool {
        self.decided.is_all()
    }

    /// Fill an undecided slot. A slot is written exactly once.
    pub fn set_edge(&mut self, direction: Direction, edge: EdgeId) -> MazeResult<()> {
        if self.decided.contains(Sides::of(direction)) {
            return Err(MazeError::EdgeAlreadySet {
                coord: self.coord,
                direction,
            });
        }
        self.edges[direction.index()] = Some(edge);
        self.decided.insert(Sides::of(direction));
        Ok(())
    }

    /// Pick uniformly among the undecided sides
    pub fn random_uninitialized_direction(&self, rng: &mut MazeRng) -> MazeResult<Direction> {
        let open = SIDES - self.initialized_count();
        if open == 0 {
            return Err(MazeError::CellFullyInitialized(self.coord));
        }
        let mut skips = rng.rn2(open as u32);
        for dir in Direction::ALL {
            if !self.decided.contains(Sides::of(dir)) {
                if skips == 0 {
                    return Ok(dir);
                }
                skips -= 1;
            }
        }
        Err(MazeError::CellFullyInitialized(self.coord))
    }

    /// Height of this cell's floor above the ground plane
    pub fn elevation(&self) -> f32 {
        self.altitude as f32 * ALTITUDE_HEIGHT
    }

    pub fn symbol(&self) -> char {
        match self.accessory {
            Some(accessory) => accessory.symbol(),
            None => self.kind.symbol(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_has_no_sides() {
        let cell = Cell::new(Coord::new(3, 4), CellKind::Floor, 0);
        assert_eq!(cell.initialized_count(), 0);
        assert!(!cell.is_fully_initialized());
        for dir in Direction::ALL {
            assert!(cell.edge(dir).is_none());
        }
    }

    #[test]
    fn test_set_edge_counts_once() {
        let mut cell = Cell::new(Coord::new(0, 0), CellKind::Floor, 0);
        cell.set_edge(Direction::East, EdgeId(7)).unwrap();
        assert_eq!(cell.initialized_count(), 1);
        assert_eq!(cell.edge(Direction::East), Some(EdgeId(7)));

        let err = cell.set_edge(Direction::East, EdgeId(8)).unwrap_err();
        assert_eq!(
            err,
            MazeError::EdgeAlreadySet {
                coord: Coord::new(0, 0),
                direction: Direction::East
            }
        );
        assert_eq!(cell.initialized_count(), 1);
        assert_eq!(cell.edge(Direction::East), Some(EdgeId(7)));
    }

    #[test]
    fn test_random_direction_only_picks_open_sides() {
        let mut rng = MazeRng::new(5);
        let mut cell = Cell::new(Coord::new(0, 0), CellKind::Floor, 0);
        cell.set_edge(Direction::North, EdgeId(0)).unwrap();
        cell.set_edge(Direction::South, EdgeId(1)).unwrap();

        let mut seen = Sides::empty();
        for _ in 0..200 {
            let dir = cell.random_uninitialized_direction(&mut rng).unwrap();
            assert!(dir == Direction::East || dir == Direction::West);
            seen.insert(Sides::of(dir));
        }
        assert_eq!(seen, Sides::EAST | Sides::WEST);
    }

    #[test]
    fn test_random_direction_on_full_cell_fails() {
        let mut rng = MazeRng::new(5);
        let mut cell = Cell::new(Coord::new(1, 1), CellKind::Floor, 0);
        for (i, dir) in Direction::ALL.into_iter().enumerate() {
            cell.set_edge(dir, EdgeId(i)).unwrap();
        }
        assert!(cell.is_fully_initialized());
        assert_eq!(
            cell.random_uninitialized_direction(&mut rng),
            Err(MazeError::CellFullyInitialized(Coord::new(1, 1)))
        );
    }

    #[test]
    fn test_symbol_prefers_accessory() {
        let mut cell = Cell::new(Coord::new(0, 0), CellKind::Tree, 0);
        assert_eq!(cell.symbol(), 'T');
        cell.accessory = Some(Accessory::Stairway {
            facing: Direction::East,
        });
        assert_eq!(cell.symbol(), '>');
    }
}
