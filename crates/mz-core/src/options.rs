//! Maze options and configuration
//!
//! Options come from defaults, then an rc-style file, then whatever the
//! caller overrides. The file format is line based:
//!
//! ```text
//! # comments start with '#'
//! OPTIONS=width:12,depth:8,door_probability:0.15
//! OPTIONS=!stairs,obstacles,seed:42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_DEPTH, DEFAULT_DOOR_PROBABILITY, DEFAULT_WIDTH};
use crate::error::{MazeError, MazeResult};
use crate::maze::Coord;

/// Settings for one maze build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeOptions {
    /// Cells along x
    pub width: i32,
    /// Cells along z
    pub depth: i32,
    /// Chance of a door (and, squared, of stairs) on each new passage
    pub door_probability: f64,
    /// Allow the rare tree cell
    pub obstacles: bool,
    /// Allow stairs up to a second floor
    pub stairs: bool,
    /// Fixed seed; `None` draws one from entropy
    pub seed: Option<u64>,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            door_probability: DEFAULT_DOOR_PROBABILITY,
            obstacles: false,
            stairs: true,
            seed: None,
        }
    }
}

impl MazeOptions {
    /// Options for a `width` x `depth` maze, everything else default
    pub fn with_size(width: i32, depth: i32) -> Self {
        Self {
            width,
            depth,
            ..Self::default()
        }
    }

    /// Reject options no maze can be built from
    pub fn validate(&self) -> MazeResult<()> {
        if self.width <= 0 || self.depth <= 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                depth: self.depth,
            });
        }
        if !(0.0..=1.0).contains(&self.door_probability) {
            return Err(MazeError::InvalidDoorProbability(self.door_probability));
        }
        Ok(())
    }

    /// Middle of the grid
    pub fn center(&self) -> Coord {
        Coord::new(self.width / 2, self.depth / 2)
    }

    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse options from a config string, starting from the defaults
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        options.apply_config(contents)?;
        Ok(options)
    }

    /// Apply every `OPTIONS=` line of `contents` on top of these options
    pub fn apply_config(&mut self, contents: &str) -> Result<(), OptionsError> {
        for line in contents.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    self.parse_option(opt.trim())?;
                }
            } else {
                return Err(OptionsError::ParseError(line.to_string()));
            }
        }
        Ok(())
    }

    /// Parse a single option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }

        if let Some((key, value)) = opt.split_once(':') {
            return self.set_option(key.trim(), Some(value.trim()));
        }
        if let Some((key, value)) = opt.split_once('=') {
            return self.set_option(key.trim(), Some(value.trim()));
        }

        let (negated, opt_name) = if let Some(name) = opt.strip_prefix('!') {
            (true, name)
        } else if let Some(name) = opt.strip_prefix("no") {
            (true, name)
        } else {
            (false, opt)
        };

        self.set_bool_option(opt_name, !negated)
    }

    /// Set a boolean option
    fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), OptionsError> {
        match name {
            "obstacles" | "trees" => self.obstacles = value,
            "stairs" => self.stairs = value,
            "width" | "depth" | "door_probability" | "doors" | "seed" => {
                return Err(OptionsError::MissingValue(name.to_string()));
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Set an option with a value
    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionsError> {
        let value = value.ok_or_else(|| OptionsError::MissingValue(name.to_string()))?;
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "width" => self.width = value.parse().map_err(|_| invalid())?,
            "depth" => self.depth = value.parse().map_err(|_| invalid())?,
            "door_probability" | "doors" => {
                self.door_probability = value.parse().map_err(|_| invalid())?
            }
            "seed" => {
                self.seed = match value {
                    "random" | "none" => None,
                    _ => Some(value.parse().map_err(|_| invalid())?),
                }
            }
            "obstacles" | "trees" | "stairs" => {
                let flag = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => return Err(invalid()),
                };
                self.set_bool_option(name, flag)?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}

/// Errors reading an options file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Missing value for option: {0}")]
    MissingValue(String),
}
