//! Placement models
//!
//! A placement model owns the items of one question and decides what a drop
//! does to them. The controller only talks to the [`PlacementModel`] trait,
//! so both question styles share the same gesture handling.

mod free_zone;
mod ordered_slot;

use serde::Serialize;

use crate::{DropTarget, ItemId, Origin, ZoneId};

pub use free_zone::{FreeZoneModel, ZoneItem};
pub use ordered_slot::{OrderedSlotModel, SequenceItem};

/// What a drop did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// The item moved to the target
    Accepted,
    /// The item bounced back to the pool
    Rejected,
    /// Nothing changed
    Unchanged,
}

/// Game-level notifications, fired once per qualifying transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum PlacementEvent {
    /// An item landed in its correct zone
    ItemPlaced { item: ItemId, zone: ZoneId },
    /// Every slot is filled; `order` lists slot contents from slot 0
    SequenceCompleted { order: Vec<ItemId>, correct: bool },
}

/// Result of resolving one drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementOutcome {
    pub item: ItemId,
    pub target: Option<DropTarget>,
    pub disposition: Disposition,
    pub event: Option<PlacementEvent>,
}

impl PlacementOutcome {
    pub(crate) fn new(item: &ItemId, target: Option<&DropTarget>, disposition: Disposition) -> Self {
        Self {
            item: item.clone(),
            target: target.cloned(),
            disposition,
            event: None,
        }
    }

    pub(crate) fn with_event(mut self, event: Option<PlacementEvent>) -> Self {
        self.event = event;
        self
    }

    pub fn accepted(&self) -> bool {
        self.disposition == Disposition::Accepted
    }
}

/// Render-ready placement state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PlacementSnapshot {
    FreeZone {
        pool: Vec<ItemId>,
        placed: Vec<(ItemId, ZoneId)>,
        last_rejected: Option<ZoneId>,
    },
    OrderedSlot {
        pool: Vec<ItemId>,
        slots: Vec<Option<ItemId>>,
    },
}

impl PlacementSnapshot {
    /// Items waiting in the pool, in display order
    pub fn pool(&self) -> &[ItemId] {
        match self {
            PlacementSnapshot::FreeZone { pool, .. } => pool,
            PlacementSnapshot::OrderedSlot { pool, .. } => pool,
        }
    }

    /// Items sitting in a zone or slot
    pub fn placed_count(&self) -> usize {
        match self {
            PlacementSnapshot::FreeZone { placed, .. } => placed.len(),
            PlacementSnapshot::OrderedSlot { slots, .. } => slots.iter().flatten().count(),
        }
    }

    /// Remove `item` from wherever it is drawn. Used while the item is
    /// shown in the drag overlay instead.
    pub fn hide(&mut self, item: &ItemId) {
        match self {
            PlacementSnapshot::FreeZone { pool, placed, .. } => {
                pool.retain(|id| id != item);
                placed.retain(|(id, _)| id != item);
            }
            PlacementSnapshot::OrderedSlot { pool, slots } => {
                pool.retain(|id| id != item);
                for slot in slots.iter_mut() {
                    if slot.as_ref() == Some(item) {
                        *slot = None;
                    }
                }
            }
        }
    }
}

/// Drop resolution contract shared by every question style
pub trait PlacementModel {
    /// Display label of an item
    fn label(&self, item: &ItemId) -> Option<&str>;

    /// Where an item currently is, `None` for unknown items
    fn location_of(&self, item: &ItemId) -> Option<Origin>;

    /// Locked items refuse new drag gestures
    fn is_locked(&self, item: &ItemId) -> bool;

    /// Whether a zone or slot currently holds anything
    fn is_occupied(&self, target: &DropTarget) -> bool;

    /// Apply a drop. `origin` must match the item's current location,
    /// otherwise the drop is stale and nothing changes.
    fn resolve_drop(
        &mut self,
        item: &ItemId,
        origin: &Origin,
        target: Option<&DropTarget>,
    ) -> PlacementOutcome;

    fn snapshot(&self) -> PlacementSnapshot;
}

impl<M: PlacementModel + ?Sized> PlacementModel for Box<M> {
    fn label(&self, item: &ItemId) -> Option<&str> {
        (**self).label(item)
    }

    fn location_of(&self, item: &ItemId) -> Option<Origin> {
        (**self).location_of(item)
    }

    fn is_locked(&self, item: &ItemId) -> bool {
        (**self).is_locked(item)
    }

    fn is_occupied(&self, target: &DropTarget) -> bool {
        (**self).is_occupied(target)
    }

    fn resolve_drop(
        &mut self,
        item: &ItemId,
        origin: &Origin,
        target: Option<&DropTarget>,
    ) -> PlacementOutcome {
        (**self).resolve_drop(item, origin, target)
    }

    fn snapshot(&self) -> PlacementSnapshot {
        (**self).snapshot()
    }
}
