//! Core maze constants

/// Number of sides per cell
pub const SIDES: usize = 4;

/// A tree cell replaces a fresh neighbor with probability 1 in this
pub const TREE_ONE_IN: u32 = 77;

/// Altitude of the ground floor
pub const GROUND_ALTITUDE: i32 = 0;

/// Vertical distance between two altitudes, in cell widths
pub const ALTITUDE_HEIGHT: f32 = 1.078;

/// Door hinge angles (degrees)
pub const DOOR_CLOSED_ANGLE: f32 = 0.0;
pub const DOOR_OPEN_ANGLE: f32 = 90.0;

/// A door can be walked through once swung past this angle
pub const DOOR_PASSABLE_ANGLE: f32 = 70.0;

/// Fraction of the remaining swing covered per tick
pub const DOOR_EASING: f32 = 0.35;

/// A swing closer than this to its target is finished
pub const DOOR_SETTLE_EPSILON: f32 = 0.1;

/// Default maze options
pub const DEFAULT_WIDTH: i32 = 20;
pub const DEFAULT_DEPTH: i32 = 20;
pub const DEFAULT_DOOR_PROBABILITY: f64 = 0.1;
