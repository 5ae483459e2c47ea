//! ASCII floor plans
//!
//! Each cell takes the odd positions of a `(2w + 1) x (2d + 1)` character
//! canvas; the characters between cells show the edges. North is up.
//!
//! ```text
//! #####
//! #. .#     .  floor       T  tree        ^ > v <  stairway
//! # ###     #  wall        +  door        =  passage to another floor
//! #.+.#     ?  undecided   (blank) passage
//! #####
//! ```

use super::{Coord, Direction, EdgeKind, Grid};

const UNDECIDED: char = '?';
const PILLAR: char = '#';
const FLOOR_CHANGE: char = '=';

/// Draw the cells standing at `altitude`
pub fn render_layer(grid: &Grid, altitude: i32) -> String {
    let cols = grid.width() as usize * 2 + 1;
    let rows = grid.depth() as usize * 2 + 1;
    let mut canvas = vec![vec![' '; cols]; rows];

    for cell in grid.cells().filter(|cell| cell.altitude == altitude) {
        let coord = cell.coord();
        let (col, row) = canvas_pos(grid, coord);
        canvas[row][col] = cell.symbol();

        for (dc, dr) in [(-1i32, -1i32), (1, -1), (-1, 1), (1, 1)] {
            canvas[(row as i32 + dr) as usize][(col as i32 + dc) as usize] = PILLAR;
        }

        for dir in Direction::ALL {
            let (dx, dz) = dir.offset();
            // Canvas rows grow southwards
            let c = (col as i32 + dx) as usize;
            let r = (row as i32 - dz) as usize;
            canvas[r][c] = edge_symbol(grid, coord, dir, altitude);
        }
    }

    let mut out = String::with_capacity(rows * (cols + 1));
    for line in canvas {
        let text: String = line.into_iter().collect();
        out.push_str(text.trim_end());
        out.push('\n');
    }
    out
}

/// Draw every floor from the ground up, each headed by its altitude
pub fn render_all(grid: &Grid) -> String {
    let top = grid.cells().map(|cell| cell.altitude).max().unwrap_or(0);
    let mut out = String::new();
    for altitude in 0..=top {
        out.push_str(&format!("altitude {}\n", altitude));
        out.push_str(&render_layer(grid, altitude));
    }
    out
}

fn canvas_pos(grid: &Grid, coord: Coord) -> (usize, usize) {
    let col = coord.x as usize * 2 + 1;
    let row = (grid.depth() - 1 - coord.z) as usize * 2 + 1;
    (col, row)
}

fn edge_symbol(grid: &Grid, coord: Coord, direction: Direction, altitude: i32) -> char {
    let Some(edge) = grid.edge_at(coord, direction) else {
        return UNDECIDED;
    };
    if edge.kind == EdgeKind::Passage {
        let elsewhere = edge
            .other_side(coord)
            .and_then(|other| grid.cell_at(other))
            .is_some_and(|other| other.altitude != altitude);
        if elsewhere {
            return FLOOR_CHANGE;
        }
    }
    edge.kind.symbol()
}
