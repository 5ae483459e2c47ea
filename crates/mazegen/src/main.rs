//! Maze generator
//!
//! Builds one maze and prints a floor plan per altitude.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use thiserror::Error;

use mz_core::maze::{
    Coord, Direction, GenerationStep, Generator, Link, Maze, MazeStats, WalkCommand, Walker,
    render_all,
};
use mz_core::{MazeError, MazeOptions, OptionsError};

/// Growing-tree maze generator with doors and stairs
#[derive(Parser, Debug)]
#[command(name = "mazegen")]
#[command(author, version, about = "Generate a multi-level maze", long_about = None)]
struct Args {
    /// Cells along x
    #[arg(short = 'w', long = "width")]
    width: Option<i32>,

    /// Cells along z
    #[arg(short = 'd', long = "depth")]
    depth: Option<i32>,

    /// Chance of a door on each new passage, 0 gives a perfect maze
    #[arg(short = 'p', long = "doors")]
    door_probability: Option<f64>,

    /// Seed for a reproducible maze
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Plant the occasional tree
    #[arg(short = 't', long = "obstacles")]
    obstacles: bool,

    /// Keep the maze on one floor
    #[arg(long = "no-stairs")]
    no_stairs: bool,

    /// Options file with OPTIONS= lines
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print every generation decision
    #[arg(long = "trace-steps")]
    trace_steps: bool,

    /// Walk the finished maze, e.g. "wwdwa" (w/a/s/d move, q/e turn)
    #[arg(long = "walk")]
    walk: Option<String>,

    /// Print a JSON summary instead of the map
    #[arg(long = "json")]
    json: bool,

    /// Debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Everything that can stop a run
#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Options(#[from] OptionsError),

    #[error("{0}")]
    Maze(#[from] MazeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown walk key '{0}', use w/a/s/d to move and q/e to turn")]
    UnknownWalkKey(char),
}

#[derive(Serialize)]
struct Summary {
    seed: u64,
    start: Coord,
    steps: usize,
    stats: MazeStats,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mazegen: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let options = resolve_options(args)?;
    options.validate()?;
    log::debug!("options: {:?}", options);

    let mut maze = if args.trace_steps {
        build_traced(options)?
    } else {
        mz_core::generate(options)?
    };

    if args.json {
        let summary = Summary {
            seed: maze.seed(),
            start: maze.start(),
            steps: maze.steps(),
            stats: maze.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", render_all(maze.grid()));
        print_stats(&maze);
    }

    if let Some(script) = &args.walk {
        walk(&mut maze, script)?;
    }
    Ok(())
}

/// Defaults, then the options file, then flags
fn resolve_options(args: &Args) -> Result<MazeOptions, CliError> {
    let mut options = match &args.config {
        Some(path) => MazeOptions::load_from_file(path)?,
        None => MazeOptions::default(),
    };

    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(depth) = args.depth {
        options.depth = depth;
    }
    if let Some(p) = args.door_probability {
        options.door_probability = p;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }
    if args.obstacles {
        options.obstacles = true;
    }
    if args.no_stairs {
        options.stairs = false;
    }
    Ok(options)
}

fn build_traced(options: MazeOptions) -> Result<Maze, CliError> {
    let mut generator = Generator::new(options)?;
    println!("seed {}", generator.seed());
    let mut count = 0;
    for step in generator.by_ref() {
        count += 1;
        println!("{:5} {}", count, describe(&step?));
    }
    Ok(generator.finish()?)
}

fn describe(step: &GenerationStep) -> String {
    match *step {
        GenerationStep::Seeded { at } => format!("seed {}", at),
        GenerationStep::Retired { at } => format!("done {}", at),
        GenerationStep::BoundaryWall { at, direction, .. } => {
            format!("wall {} {} (edge of maze)", at, direction)
        }
        GenerationStep::Extended {
            from,
            to,
            direction,
            link,
            ..
        } => match link {
            Link::Passage => format!("carve {} {} -> {}", from, direction, to),
            Link::Door => format!("door {} {} -> {}", from, direction, to),
            Link::Stairs { high_landing, .. } => {
                format!("stairs {} {} -> {} up to {}", from, direction, to, high_landing)
            }
        },
        GenerationStep::TreePlanted { from, at, .. } => format!("tree {} next to {}", at, from),
        GenerationStep::LoopClosed { from, to, .. } => format!("loop {} -> {}", from, to),
        GenerationStep::Wall { from, to, .. } => format!("wall {} | {}", from, to),
    }
}

fn print_stats(maze: &Maze) {
    let stats = maze.stats();
    println!("seed {}  start {}  steps {}", maze.seed(), maze.start(), maze.steps());
    println!(
        "cells {}  trees {}  rooms {}  floors {}",
        stats.cells,
        stats.trees,
        stats.rooms,
        stats.max_altitude + 1
    );
    println!(
        "passages {}  doors {}  stairways {}  walls {} (+{} boundary, {} railed)",
        stats.passages,
        stats.doors,
        stats.stairways,
        stats.interior_walls,
        stats.boundary_walls,
        stats.railings
    );
}

/// Follow a key script from the start cell, letting doors swing after each move
fn walk(maze: &mut Maze, script: &str) -> Result<(), CliError> {
    let start = maze.start();
    let grid = maze.grid_mut();
    let mut walker = Walker::new(Direction::North);
    walker.teleport(grid, start)?;

    for key in script.chars().filter(|c| !c.is_whitespace()) {
        let command = WalkCommand::from_char(key).ok_or(CliError::UnknownWalkKey(key))?;

        let moved = walker.apply(grid, command);
        while walker.advance(grid)?.is_some() {}
        let mut ticks = 0;
        while grid.tick_doors() > 0 {
            ticks += 1;
        }

        let Some(here) = walker.current() else {
            continue;
        };
        let facing = walker.facing();
        let position = grid.world_position(here).unwrap_or_default();
        let turning = matches!(command, WalkCommand::TurnLeft | WalkCommand::TurnRight);
        let mut line = format!(
            "{} {:<9} {} facing {} ({:.0} deg) at [{:.2}, {:.2}, {:.2}]",
            key,
            command.to_string(),
            here,
            facing.arrow(),
            facing.rotation_degrees(),
            position[0],
            position[1],
            position[2]
        );
        if moved.is_none() && !turning {
            line.push_str("  blocked");
        }
        if ticks > 0 {
            line.push_str(&format!("  doors swung for {} ticks", ticks));
        }
        println!("{}", line);
    }
    Ok(())
}
