//! fq-input - Kiosk pointer input
//!
//! Screen-space geometry plus a tracker that folds mouse and touch input
//! into a single pointer event stream.

mod geometry;
mod pointer;
mod touch;

pub use geometry::{Point, Rect};
pub use pointer::{PointerEvent, PointerEventKind, PointerTracker, PointerType};
pub use touch::{Touch, TouchInput, TouchPhase};
