//! Ordered-slot placement
//!
//! Items start shuffled in a pool and are dragged into a fixed row of
//! slots. Dropping onto an occupied slot evicts the occupant to the end of
//! the pool. Nothing ever locks.
//!
//! Completion is reported whenever every slot is filled with an arrangement
//! that has not been reported yet. Emptying any slot clears the record, so
//! filling the row again reports again even if the order is the same.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{Disposition, PlacementEvent, PlacementModel, PlacementOutcome, PlacementSnapshot};
use crate::{DropTarget, ItemId, Origin, PlacementError};

/// Draggable step of a sequence question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceItem {
    pub id: ItemId,
    pub label: String,
    /// Position in the canonical order, starting at 0
    pub natural_order: usize,
}

impl SequenceItem {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>, natural_order: usize) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            natural_order,
        }
    }
}

/// Placement state of a sequence question
#[derive(Debug, Clone)]
pub struct OrderedSlotModel {
    items: Vec<SequenceItem>,
    canonical: Vec<ItemId>,
    pool: Vec<ItemId>,
    slots: Vec<Option<ItemId>>,
    /// Arrangement reported by the last completion while the row stays full
    reported: Option<Vec<ItemId>>,
}

impl OrderedSlotModel {
    /// Build with a freshly shuffled pool. For two or more items the pool
    /// never starts in canonical order.
    pub fn new<R: Rng + ?Sized>(items: Vec<SequenceItem>, rng: &mut R) -> Result<Self, PlacementError> {
        let canonical = canonical_order(&items)?;
        let pool = shuffled_pool(&canonical, rng);
        Ok(Self::assemble(items, canonical, pool))
    }

    /// Build with an explicit pool order, e.g. to restore a saved board
    pub fn with_pool_order(items: Vec<SequenceItem>, pool: Vec<ItemId>) -> Result<Self, PlacementError> {
        let canonical = canonical_order(&items)?;

        let mut expected = canonical.clone();
        let mut given = pool.clone();
        expected.sort();
        given.sort();
        if expected != given {
            return Err(PlacementError::PoolMismatch);
        }

        Ok(Self::assemble(items, canonical, pool))
    }

    fn assemble(items: Vec<SequenceItem>, canonical: Vec<ItemId>, pool: Vec<ItemId>) -> Self {
        let slots = vec![None; items.len()];
        Self {
            items,
            canonical,
            pool,
            slots,
            reported: None,
        }
    }

    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    /// Item ids in correct order
    pub fn canonical_order(&self) -> &[ItemId] {
        &self.canonical
    }

    pub fn pool(&self) -> &[ItemId] {
        &self.pool
    }

    pub fn slots(&self) -> &[Option<ItemId>] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    fn move_into_slot(&mut self, item: &ItemId, from: &Origin, index: usize) -> Disposition {
        if index >= self.slots.len() || *from == Origin::Slot(index) {
            return Disposition::Unchanged;
        }

        match from {
            Origin::Pool => self.pool.retain(|id| id != item),
            Origin::Slot(prev) => self.slots[*prev] = None,
            Origin::Zone(_) => return Disposition::Unchanged,
        }

        if let Some(displaced) = self.slots[index].replace(item.clone()) {
            tracing::debug!("{} displaced {} from slot {}", item, displaced, index);
            self.pool.push(displaced);
        }

        Disposition::Accepted
    }

    fn move_into_pool(&mut self, item: &ItemId, from: &Origin) -> Disposition {
        let Origin::Slot(prev) = from else {
            return Disposition::Unchanged;
        };
        self.slots[*prev] = None;
        self.pool.push(item.clone());
        Disposition::Accepted
    }

    fn check_completion(&mut self) -> Option<PlacementEvent> {
        let Some(order) = self.slots.iter().cloned().collect::<Option<Vec<_>>>() else {
            self.reported = None;
            return None;
        };

        if self.reported.as_ref() == Some(&order) {
            return None;
        }

        let correct = order == self.canonical;
        tracing::info!("Sequence completed (correct: {})", correct);
        self.reported = Some(order.clone());
        Some(PlacementEvent::SequenceCompleted { order, correct })
    }
}

impl PlacementModel for OrderedSlotModel {
    fn label(&self, item: &ItemId) -> Option<&str> {
        self.items
            .iter()
            .find(|i| &i.id == item)
            .map(|i| i.label.as_str())
    }

    fn location_of(&self, item: &ItemId) -> Option<Origin> {
        if self.pool.contains(item) {
            return Some(Origin::Pool);
        }
        self.slots
            .iter()
            .position(|slot| slot.as_ref() == Some(item))
            .map(Origin::Slot)
    }

    fn is_locked(&self, _item: &ItemId) -> bool {
        false
    }

    fn is_occupied(&self, target: &DropTarget) -> bool {
        match target {
            DropTarget::Slot(index) => self.slots.get(*index).is_some_and(Option::is_some),
            _ => false,
        }
    }

    fn resolve_drop(
        &mut self,
        item: &ItemId,
        origin: &Origin,
        target: Option<&DropTarget>,
    ) -> PlacementOutcome {
        if self.location_of(item).as_ref() != Some(origin) {
            return PlacementOutcome::new(item, target, Disposition::Unchanged);
        }

        let disposition = match target {
            Some(DropTarget::Slot(index)) => self.move_into_slot(item, origin, *index),
            Some(DropTarget::Pool) => self.move_into_pool(item, origin),
            Some(DropTarget::Zone(_)) | None => Disposition::Unchanged,
        };

        let event = match disposition {
            Disposition::Accepted => self.check_completion(),
            _ => None,
        };

        PlacementOutcome::new(item, target, disposition).with_event(event)
    }

    fn snapshot(&self) -> PlacementSnapshot {
        PlacementSnapshot::OrderedSlot {
            pool: self.pool.clone(),
            slots: self.slots.clone(),
        }
    }
}

fn canonical_order(items: &[SequenceItem]) -> Result<Vec<ItemId>, PlacementError> {
    if items.is_empty() {
        return Err(PlacementError::Empty);
    }

    for (idx, item) in items.iter().enumerate() {
        for other in &items[..idx] {
            if other.id == item.id {
                return Err(PlacementError::DuplicateItem(item.id.clone()));
            }
            if other.natural_order == item.natural_order {
                return Err(PlacementError::DuplicateOrder {
                    item: item.id.clone(),
                    order: item.natural_order,
                });
            }
        }
    }

    let mut sorted: Vec<&SequenceItem> = items.iter().collect();
    sorted.sort_by_key(|item| item.natural_order);
    Ok(sorted.into_iter().map(|item| item.id.clone()).collect())
}

fn shuffled_pool<R: Rng + ?Sized>(canonical: &[ItemId], rng: &mut R) -> Vec<ItemId> {
    let mut pool = canonical.to_vec();
    pool.shuffle(rng);
    // Ids are unique, so a rotation of the canonical order is never canonical
    if pool.len() > 1 && pool == canonical {
        pool.rotate_left(1);
    }
    pool
}
