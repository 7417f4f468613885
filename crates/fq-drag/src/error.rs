//! Error types

use crate::{ItemId, ZoneId};

/// Invalid placement model construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    #[error("Duplicate sequence position {order} (item {item})")]
    DuplicateOrder { item: ItemId, order: usize },

    #[error("Item {item} targets undeclared zone {zone}")]
    UnknownZone { item: ItemId, zone: ZoneId },

    #[error("Pool order is not a permutation of the items")]
    PoolMismatch,

    #[error("Sequence has no items")]
    Empty,
}

/// Why a drag gesture was not started.
///
/// Hosts are free to ignore this; a refused press simply does nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureRefusal {
    #[error("Item is locked in place: {0}")]
    Locked(ItemId),

    #[error("A drag gesture is already active")]
    AlreadyDragging,

    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    #[error("Pointer {0} is not a primary press")]
    NotPrimaryPress(u64),
}
