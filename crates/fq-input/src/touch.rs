//! Touch input
//!
//! Raw multi-touch events as delivered by the host runtime.

use serde::{Deserialize, Serialize};

use crate::Point;

/// A single touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Host-assigned identifier, stable for the lifetime of the touch
    pub identifier: u64,
    pub position: Point,
    #[serde(default = "default_force")]
    pub force: f64,
}

fn default_force() -> f64 {
    1.0
}

impl Touch {
    pub fn new(identifier: u64, x: f64, y: f64) -> Self {
        Self {
            identifier,
            position: Point::new(x, y),
            force: default_force(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Touch event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchInput {
    pub phase: TouchPhase,
    /// Touches that triggered this event. For `End` these carry the lift-off
    /// position, which is the only place the final position is reported.
    pub changed_touches: Vec<Touch>,
}

impl TouchInput {
    pub fn new(phase: TouchPhase, changed_touches: Vec<Touch>) -> Self {
        Self {
            phase,
            changed_touches,
        }
    }

    /// Single-finger convenience constructor
    pub fn single(phase: TouchPhase, identifier: u64, x: f64, y: f64) -> Self {
        Self::new(phase, vec![Touch::new(identifier, x, y)])
    }
}
