//! fq-drag - Drag and drop for quiz questions
//!
//! A single [`PointerDragController`] drives press/move/release gestures
//! over live-measured drop targets and hands each drop to a
//! [`PlacementModel`]. Two models exist:
//!
//! - [`FreeZoneModel`]: items dropped onto named zones, one correct zone per
//!   item, correctly placed items lock.
//! - [`OrderedSlotModel`]: items arranged into a fixed row of slots, with a
//!   pool for unplaced items and eviction on displacement.
//!
//! # Example
//! ```rust,ignore
//! use fq_drag::{DragConfig, FreeZoneModel, HeadlessHost, PointerDragController};
//!
//! let model = FreeZoneModel::new(items, zones, config.zone_capacity)?;
//! let mut drag = PointerDragController::new(model, HeadlessHost::new(), config);
//! drag.set_targets(zone_targets);
//! drag.begin_drag(&item, press, item_bounds)?;
//! drag.update_drag(pointer);
//! let response = drag.end_drag(pointer);
//! ```

mod config;
mod controller;
mod error;
mod host;
mod ids;
mod target;
mod visual;
pub mod placement;

pub use config::{DragConfig, TieBreak, ZoneCapacity};
pub use controller::{DragOverlay, DragView, EventResponse, PointerDragController};
pub use error::{GestureRefusal, PlacementError};
pub use hit_test::hit_test;
pub use host::{DragHost, FeedbackCue, HeadlessHost, Layout, ListenerRegistry, Subscription};
pub use ids::{ItemId, ZoneId};
pub use placement::{
    Disposition, FreeZoneModel, OrderedSlotModel, PlacementEvent, PlacementModel,
    PlacementOutcome, PlacementSnapshot, SequenceItem, ZoneItem,
};
pub use target::{DropTarget, Origin, TargetRegistry};
pub use visual::{FlashTimer, SlotVisual, ZoneVisual};

pub use fq_input::{Point, Rect};
