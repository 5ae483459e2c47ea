//! Growing-tree maze generation
//!
//! The generator keeps a stack of active cells and always works on the most
//! recently added one, which carves long winding corridors. Each step decides
//! one side of that cell:
//!
//! 1. Outside the grid the side becomes a boundary wall.
//! 2. An empty neighbor becomes a new cell joined by a passage, a door or a
//!    flight of stairs (or, rarely, a tree cell with the side left open).
//! 3. An existing neighbor in the same room on the same floor is joined by a
//!    loop-closing passage when doors are enabled; anything else gets a wall.
//!
//! A cell with all four sides decided leaves the stack, and generation ends
//! when the stack is empty. The same seed always gives the same maze.

use serde::{Deserialize, Serialize};

use super::{
    Accessory, Cell, CellKind, Coord, Direction, Door, EdgeId, EdgeKind, Grid, MazeStats,
};
use crate::consts::{GROUND_ALTITUDE, TREE_ONE_IN};
use crate::error::{MazeError, MazeResult};
use crate::options::MazeOptions;
use crate::rng::MazeRng;

/// How a freshly created cell was joined to the cell that discovered it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    /// Same room, same floor
    Passage,
    /// New room behind a door
    Door,
    /// Stairway at the origin, the new cell is its landing and a second new
    /// cell one floor up is reached by `ramp`
    Stairs { high_landing: Coord, ramp: EdgeId },
}

/// One decision taken by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationStep {
    /// First cell placed
    Seeded { at: Coord },
    /// Cell fully decided and dropped from the active stack
    Retired { at: Coord },
    /// Side facing out of the grid walled off
    BoundaryWall {
        at: Coord,
        direction: Direction,
        edge: EdgeId,
    },
    /// New cell created next to `from`
    Extended {
        from: Coord,
        to: Coord,
        direction: Direction,
        edge: EdgeId,
        link: Link,
    },
    /// Tree cell created next to `from`; that side stays undecided
    TreePlanted {
        from: Coord,
        at: Coord,
        direction: Direction,
    },
    /// Two existing cells of one room joined, closing a loop
    LoopClosed {
        from: Coord,
        to: Coord,
        direction: Direction,
        edge: EdgeId,
    },
    /// Two existing cells separated
    Wall {
        from: Coord,
        to: Coord,
        direction: Direction,
        edge: EdgeId,
    },
}

/// A finished maze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Maze {
    grid: Grid,
    start: Coord,
    seed: u64,
    steps: usize,
}

impl Maze {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for door events; the layout itself is fixed
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Coordinate of the first cell
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Seed that reproduces this maze
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generation steps taken, seeding included
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn stats(&self) -> MazeStats {
        MazeStats::collect(&self.grid)
    }
}

/// Build a maze in one go
pub fn generate(options: MazeOptions) -> MazeResult<Maze> {
    Generator::new(options)?.finish()
}

/// Step-by-step maze builder
///
/// Call [`Generator::step`] (or iterate) to watch the maze grow one decision
/// at a time; [`Generator::finish`] runs the rest. Stepping has no effect on
/// the result.
#[derive(Debug, Clone)]
pub struct Generator {
    options: MazeOptions,
    grid: Grid,
    active: Vec<Coord>,
    rng: MazeRng,
    start: Option<Coord>,
    steps: usize,
    fault: Option<MazeError>,
}

impl Generator {
    /// Validate `options` and prepare an empty grid
    pub fn new(options: MazeOptions) -> MazeResult<Self> {
        let rng = match options.seed {
            Some(seed) => MazeRng::new(seed),
            None => MazeRng::from_entropy(),
        };
        Self::with_rng(options, rng)
    }

    /// Like [`Generator::new`] but drawing from an existing RNG
    pub fn with_rng(options: MazeOptions, rng: MazeRng) -> MazeResult<Self> {
        options.validate()?;
        let grid = Grid::new(options.width, options.depth)?;
        log::debug!(
            "generating {}x{} maze, seed {}, door probability {}",
            options.width,
            options.depth,
            rng.seed(),
            options.door_probability
        );
        Ok(Self {
            options,
            grid,
            active: Vec::new(),
            rng,
            start: None,
            steps: 0,
            fault: None,
        })
    }

    pub fn options(&self) -> &MazeOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cells still being expanded, oldest first
    pub fn active(&self) -> &[Coord] {
        &self.active
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// True once seeded and the active stack has drained
    pub fn is_finished(&self) -> bool {
        self.start.is_some() && self.active.is_empty()
    }

    /// Take one decision. Returns `Ok(None)` once the maze is complete.
    ///
    /// After an error the grid can no longer be trusted and every later call
    /// returns the same error.
    pub fn step(&mut self) -> MazeResult<Option<GenerationStep>> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        match self.try_step() {
            Ok(step) => {
                if let Some(step) = &step {
                    self.steps += 1;
                    log::trace!("step {}: {:?}", self.steps, step);
                }
                Ok(step)
            }
            Err(err) => {
                log::debug!("generation aborted after {} steps: {}", self.steps, err);
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Run to completion
    pub fn finish(mut self) -> MazeResult<Maze> {
        while self.step()?.is_some() {}

        let start = self.start.ok_or(MazeError::NoCell(Coord::default()))?;
        let maze = Maze {
            grid: self.grid,
            start,
            seed: self.rng.seed(),
            steps: self.steps,
        };
        log::debug!("maze complete after {} steps: {:?}", maze.steps, maze.stats());
        Ok(maze)
    }

    fn try_step(&mut self) -> MazeResult<Option<GenerationStep>> {
        if self.start.is_none() {
            return self.seed_first_cell().map(Some);
        }

        let Some(&current) = self.active.last() else {
            return Ok(None);
        };
        let cell = self.grid.cell_at(current).ok_or(MazeError::NoCell(current))?;
        if cell.is_fully_initialized() {
            self.active.pop();
            return Ok(Some(GenerationStep::Retired { at: current }));
        }

        let direction = cell.random_uninitialized_direction(&mut self.rng)?;
        let (room, altitude) = (cell.room, cell.altitude);
        let next = current.step(direction);

        if !self.grid.contains(next) {
            let edge = self
                .grid
                .create_edge(current, None, direction, EdgeKind::Wall)?;
            return Ok(Some(GenerationStep::BoundaryWall {
                at: current,
                direction,
                edge,
            }));
        }

        let step = match self.grid.cell_at(next) {
            None => {
                if self.options.obstacles && self.rng.one_in(TREE_ONE_IN) {
                    self.grid.create_cell(next, CellKind::Tree, GROUND_ALTITUDE)?;
                    self.active.push(next);
                    GenerationStep::TreePlanted {
                        from: current,
                        at: next,
                        direction,
                    }
                } else {
                    self.grid.create_cell(next, CellKind::Floor, GROUND_ALTITUDE)?;
                    self.active.push(next);
                    let (edge, link) = self.create_passage(current, next, direction)?;
                    GenerationStep::Extended {
                        from: current,
                        to: next,
                        direction,
                        edge,
                        link,
                    }
                }
            }
            Some(neighbor) => {
                let same_room = room == neighbor.room
                    && self.options.door_probability > 0.0
                    && altitude == neighbor.altitude;
                if same_room {
                    let edge = self
                        .grid
                        .create_edge(current, Some(next), direction, EdgeKind::Passage)?;
                    GenerationStep::LoopClosed {
                        from: current,
                        to: next,
                        direction,
                        edge,
                    }
                } else {
                    let edge = self
                        .grid
                        .create_edge(current, Some(next), direction, EdgeKind::Wall)?;
                    GenerationStep::Wall {
                        from: current,
                        to: next,
                        direction,
                        edge,
                    }
                }
            }
        };
        Ok(Some(step))
    }

    fn seed_first_cell(&mut self) -> MazeResult<GenerationStep> {
        let (x, z) = self
            .rng
            .random_coord(self.options.width as u32, self.options.depth as u32);
        let at = Coord::new(x as i32, z as i32);
        let cell = self.grid.create_cell(at, CellKind::Floor, GROUND_ALTITUDE)?;
        cell.room = 0;
        self.active.push(at);
        self.start = Some(at);
        Ok(GenerationStep::Seeded { at })
    }

    /// Join `cell` to the freshly created `other` and give `other` its room.
    ///
    /// On the ground floor a door is tried with the door probability; a
    /// second draw may upgrade it to stairs when there is room for them.
    fn create_passage(
        &mut self,
        cell: Coord,
        other: Coord,
        direction: Direction,
    ) -> MazeResult<(EdgeId, Link)> {
        let origin = self.grid.cell_at(cell).ok_or(MazeError::NoCell(cell))?;
        let (room, altitude) = (origin.room, origin.altitude);
        let p = self.options.door_probability;

        if altitude == GROUND_ALTITUDE && self.rng.chance(p) {
            if self.rng.chance(p) && self.can_create_stairs(cell, other, direction) {
                return self.create_stairs(cell, other, direction);
            }
            // Doors always change room numbers
            self.require_cell(other)?.room = room + 1;
            let edge = self.grid.create_edge(
                cell,
                Some(other),
                direction,
                EdgeKind::Door(Door::new()),
            )?;
            return Ok((edge, Link::Door));
        }

        let landing = self.require_cell(other)?;
        landing.room = room;
        landing.altitude = altitude;
        let edge = self
            .grid
            .create_edge(cell, Some(other), direction, EdgeKind::Passage)?;
        Ok((edge, Link::Passage))
    }

    /// Stairs need a ground-floor origin without a stairway of its own, whose
    /// cell behind it (the low landing) is in the same room, and a free cell
    /// two steps ahead for the high landing.
    fn can_create_stairs(&self, cell: Coord, other: Coord, direction: Direction) -> bool {
        if !self.options.stairs {
            return false;
        }
        let Some(origin) = self.grid.cell_at(cell) else {
            return false;
        };
        if origin.altitude != GROUND_ALTITUDE || origin.accessory.is_some() {
            return false;
        }

        let low_landing = cell.step(direction.opposite());
        let high_landing = other.step(direction);
        if !self.grid.contains(low_landing) || !self.grid.contains(high_landing) {
            return false;
        }

        let feasible = self
            .grid
            .cell_at(low_landing)
            .is_some_and(|low| low.room == origin.room)
            && !self.grid.is_occupied(high_landing);
        if !feasible {
            log::trace!("no room for stairs from {} towards {}", cell, direction);
        }
        feasible
    }

    fn create_stairs(
        &mut self,
        cell: Coord,
        other: Coord,
        direction: Direction,
    ) -> MazeResult<(EdgeId, Link)> {
        let origin = self.require_cell(cell)?;
        origin.accessory = Some(Accessory::Stairway { facing: direction });
        let room = origin.room;
        let altitude = origin.altitude;

        self.require_cell(other)?.room = room;

        let high_landing = other.step(direction);
        let high = self
            .grid
            .create_cell(high_landing, CellKind::Floor, altitude + 1)?;
        high.room = room + 1;
        self.active.push(high_landing);

        let ramp = self
            .grid
            .create_edge(other, Some(high_landing), direction, EdgeKind::Passage)?;
        let edge = self
            .grid
            .create_edge(cell, Some(other), direction, EdgeKind::Passage)?;
        Ok((edge, Link::Stairs { high_landing, ramp }))
    }

    fn require_cell(&mut self, coord: Coord) -> MazeResult<&mut Cell> {
        self.grid.cell_at_mut(coord).ok_or(MazeError::NoCell(coord))
    }
}

impl Iterator for Generator {
    type Item = MazeResult<GenerationStep>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fault.is_some() {
            return None;
        }
        self.step().transpose()
    }
}
