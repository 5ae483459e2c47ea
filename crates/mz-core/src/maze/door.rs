//! Door swing state machine
//!
//! A door eases its hinge angle towards a target. Entering an adjacent cell
//! targets fully open, leaving targets closed. Passability follows the
//! current angle, so a door that has just been asked to open still blocks
//! until it has swung far enough.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::consts::{
    DOOR_CLOSED_ANGLE, DOOR_EASING, DOOR_OPEN_ANGLE, DOOR_PASSABLE_ANGLE, DOOR_SETTLE_EPSILON,
};

/// Discrete door state derived from its angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Hinge state of a single door
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Door {
    current_angle: f32,
    target_angle: f32,
}

impl Door {
    /// A closed door at rest
    pub const fn new() -> Self {
        Self {
            current_angle: DOOR_CLOSED_ANGLE,
            target_angle: DOOR_CLOSED_ANGLE,
        }
    }

    pub fn angle(&self) -> f32 {
        self.current_angle
    }

    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    /// True when the swing has reached its target
    pub fn is_settled(&self) -> bool {
        (self.target_angle - self.current_angle).abs() <= DOOR_SETTLE_EPSILON
    }

    pub fn state(&self) -> DoorState {
        let opening = self.target_angle > DOOR_CLOSED_ANGLE;
        match (opening, self.is_settled()) {
            (true, true) => DoorState::Open,
            (true, false) => DoorState::Opening,
            (false, true) => DoorState::Closed,
            (false, false) => DoorState::Closing,
        }
    }

    pub fn is_passable(&self) -> bool {
        self.current_angle > DOOR_PASSABLE_ANGLE
    }

    /// Doors block sight even when open
    pub fn is_obstacle(&self) -> bool {
        true
    }

    /// Someone entered a cell next to this door
    pub fn on_entered(&mut self) {
        self.target_angle = DOOR_OPEN_ANGLE;
    }

    /// Someone left a cell next to this door
    pub fn on_exited(&mut self) {
        self.target_angle = DOOR_CLOSED_ANGLE;
    }

    /// Advance the swing by one step.
    ///
    /// Returns true while the door is still moving. The final call snaps the
    /// angle onto the target and returns false.
    pub fn tick(&mut self) -> bool {
        if self.is_settled() {
            self.current_angle = self.target_angle;
            return false;
        }
        self.current_angle += (self.target_angle - self.current_angle) * DOOR_EASING;
        true
    }

    /// Run the swing to completion, returning the number of moving steps
    pub fn settle(&mut self) -> usize {
        let mut steps = 0;
        while self.tick() {
            steps += 1;
        }
        steps
    }
}
