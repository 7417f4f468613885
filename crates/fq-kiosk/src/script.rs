//! Gesture scripts
//!
//! A script names one question, lays out its drop targets on a static
//! screen and lists raw input steps, as a kiosk browser would deliver them.

use serde::Deserialize;

use fq_drag::{DropTarget, ItemId};
use fq_input::{Point, Rect};

/// Input device a script drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Device {
    #[default]
    Mouse,
    Touch,
}

/// Screen rectangle of one drop target
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Placement {
    pub target: DropTarget,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ScreenLayout {
    #[serde(default)]
    pub viewport: Option<Rect>,
    #[serde(default)]
    pub targets: Vec<Placement>,
}

/// One raw input step
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Press on `item`, drawn at `bounds`
    Press {
        item: ItemId,
        x: f64,
        y: f64,
        bounds: Rect,
        #[serde(default)]
        finger: u64,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        finger: u64,
    },
    Release {
        x: f64,
        y: f64,
        #[serde(default)]
        finger: u64,
    },
    /// Window lost focus: every pointer is cancelled
    Blur,
    /// Escape key
    Escape,
    /// A target moved, or left the screen when `rect` is absent
    Reflow {
        target: DropTarget,
        #[serde(default)]
        rect: Option<Rect>,
    },
}

impl Step {
    pub fn point(&self) -> Option<Point> {
        match self {
            Step::Press { x, y, .. } | Step::Move { x, y, .. } | Step::Release { x, y, .. } => {
                Some(Point::new(*x, *y))
            }
            _ => None,
        }
    }
}

/// A full replay script
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub question: String,
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub layout: ScreenLayout,
    pub steps: Vec<Step>,
}
