//! Cell edges: walls, passages and doors

use serde::{Deserialize, Serialize};

use super::{Coord, Direction, Door};

/// Index of an edge in the grid's edge arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

/// What separates two cells
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EdgeKind {
    Wall,
    Passage,
    Door(Door),
}

impl EdgeKind {
    /// Passages and doors let a walker route through; walls never do.
    pub const fn is_passage_like(&self) -> bool {
        matches!(self, EdgeKind::Passage | EdgeKind::Door(_))
    }

    pub fn is_passable(&self) -> bool {
        match self {
            EdgeKind::Wall => false,
            EdgeKind::Passage => true,
            EdgeKind::Door(door) => door.is_passable(),
        }
    }

    pub fn is_obstacle(&self) -> bool {
        match self {
            EdgeKind::Wall => true,
            EdgeKind::Passage => false,
            EdgeKind::Door(door) => door.is_obstacle(),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            EdgeKind::Wall => '#',
            EdgeKind::Passage => ' ',
            EdgeKind::Door(_) => '+',
        }
    }
}

/// Boundary between a cell and its neighbor (or the outside)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Cell the edge was created from
    pub cell: Coord,
    /// Neighbor across the edge; `None` for the outer boundary
    pub other: Option<Coord>,
    /// Direction from `cell` to `other`
    pub direction: Direction,
    pub kind: EdgeKind,
    /// Wall raised on an upper floor, guarded by a railing
    pub railing: bool,
}

impl Edge {
    pub fn new(cell: Coord, other: Option<Coord>, direction: Direction, kind: EdgeKind) -> Self {
        Self {
            cell,
            other,
            direction,
            kind,
            railing: false,
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.other.is_none()
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, EdgeKind::Door(_))
    }

    pub fn is_passable(&self) -> bool {
        self.kind.is_passable()
    }

    pub fn is_obstacle(&self) -> bool {
        self.kind.is_obstacle()
    }

    /// Cell on the far side when standing on `from`
    pub fn other_side(&self, from: Coord) -> Option<Coord> {
        if from == self.cell {
            self.other
        } else if Some(from) == self.other {
            Some(self.cell)
        } else {
            None
        }
    }

    /// Direction of this edge as seen from `from`
    pub fn direction_from(&self, from: Coord) -> Option<Direction> {
        if from == self.cell {
            Some(self.direction)
        } else if Some(from) == self.other {
            Some(self.direction.opposite())
        } else {
            None
        }
    }

    pub fn on_entered(&mut self) {
        if let EdgeKind::Door(door) = &mut self.kind {
            door.on_entered();
        }
    }

    pub fn on_exited(&mut self) {
        if let EdgeKind::Door(door) = &mut self.kind {
            door.on_exited();
        }
    }

    /// Advance door animation; true while still moving
    pub fn tick(&mut self) -> bool {
        match &mut self.kind {
            EdgeKind::Door(door) => door.tick(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_semantics() {
        assert!(!EdgeKind::Wall.is_passable());
        assert!(EdgeKind::Wall.is_obstacle());
        assert!(EdgeKind::Passage.is_passable());
        assert!(!EdgeKind::Passage.is_obstacle());
        let door = EdgeKind::Door(Door::new());
        assert!(!door.is_passable());
        assert!(door.is_obstacle());
        assert!(door.is_passage_like());
        assert!(!EdgeKind::Wall.is_passage_like());
    }

    #[test]
    fn test_other_side() {
        let a = Coord::new(1, 1);
        let b = Coord::new(2, 1);
        let edge = Edge::new(a, Some(b), Direction::East, EdgeKind::Passage);
        assert_eq!(edge.other_side(a), Some(b));
        assert_eq!(edge.other_side(b), Some(a));
        assert_eq!(edge.other_side(Coord::new(9, 9)), None);
        assert_eq!(edge.direction_from(b), Some(Direction::West));
    }

    #[test]
    fn test_boundary_wall() {
        let edge = Edge::new(Coord::new(0, 0), None, Direction::South, EdgeKind::Wall);
        assert!(edge.is_boundary());
        assert_eq!(edge.other_side(Coord::new(0, 0)), None);
    }

    #[test]
    fn test_door_events_reach_door() {
        let mut edge = Edge::new(
            Coord::new(0, 0),
            Some(Coord::new(0, 1)),
            Direction::North,
            EdgeKind::Door(Door::new()),
        );
        edge.on_entered();
        while edge.tick() {}
        assert!(edge.is_passable());
        edge.on_exited();
        while edge.tick() {}
        assert!(!edge.is_passable());

        let mut wall = Edge::new(Coord::new(0, 0), None, Direction::West, EdgeKind::Wall);
        wall.on_entered();
        assert!(!wall.tick());
    }
}
