//! Free-zone placement
//!
//! Items are dropped onto named zones. An item is accepted only by its
//! correct zone, and once accepted it is locked there for the rest of the
//! question. Everything else bounces back to the pool.

use serde::{Deserialize, Serialize};

use super::{Disposition, PlacementEvent, PlacementModel, PlacementOutcome, PlacementSnapshot};
use crate::{DropTarget, ItemId, Origin, PlacementError, ZoneCapacity, ZoneId};

/// Draggable item of a free-zone question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneItem {
    pub id: ItemId,
    pub label: String,
    /// The only zone that accepts this item. `None` for distractors.
    pub correct_zone: Option<ZoneId>,
    /// Zone the item is associated with for display only. Never consulted
    /// when resolving a drop.
    #[serde(default)]
    pub hint_zone: Option<ZoneId>,
}

impl ZoneItem {
    pub fn new(id: impl Into<ItemId>, label: impl Into<String>, correct_zone: Option<ZoneId>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            correct_zone,
            hint_zone: None,
        }
    }

    pub fn with_hint(mut self, zone: impl Into<ZoneId>) -> Self {
        self.hint_zone = Some(zone.into());
        self
    }
}

/// Placement state of a free-zone question
#[derive(Debug, Clone)]
pub struct FreeZoneModel {
    items: Vec<ZoneItem>,
    zones: Vec<ZoneId>,
    capacity: ZoneCapacity,
    /// Accepted placements in the order they happened
    placed: Vec<(ItemId, ZoneId)>,
    last_rejected: Option<ZoneId>,
}

impl FreeZoneModel {
    pub fn new(
        items: Vec<ZoneItem>,
        zones: Vec<ZoneId>,
        capacity: ZoneCapacity,
    ) -> Result<Self, PlacementError> {
        for (idx, item) in items.iter().enumerate() {
            if items[..idx].iter().any(|other| other.id == item.id) {
                return Err(PlacementError::DuplicateItem(item.id.clone()));
            }
            if let Some(zone) = &item.correct_zone {
                if !zones.contains(zone) {
                    return Err(PlacementError::UnknownZone {
                        item: item.id.clone(),
                        zone: zone.clone(),
                    });
                }
            }
        }

        Ok(Self {
            items,
            zones,
            capacity,
            placed: Vec::new(),
            last_rejected: None,
        })
    }

    pub fn items(&self) -> &[ZoneItem] {
        &self.items
    }

    pub fn zones(&self) -> &[ZoneId] {
        &self.zones
    }

    /// Items not placed yet, in question order
    pub fn pool(&self) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|item| !self.is_placed(&item.id))
            .map(|item| item.id.clone())
            .collect()
    }

    /// Items placed in `zone`
    pub fn occupants(&self, zone: &ZoneId) -> Vec<&ItemId> {
        self.placed
            .iter()
            .filter(|(_, z)| z == zone)
            .map(|(item, _)| item)
            .collect()
    }

    /// Zone that most recently turned an item away. Cleared by the next
    /// accepted placement.
    pub fn last_rejected_zone(&self) -> Option<&ZoneId> {
        self.last_rejected.as_ref()
    }

    fn is_placed(&self, item: &ItemId) -> bool {
        self.placed.iter().any(|(id, _)| id == item)
    }

    fn item(&self, id: &ItemId) -> Option<&ZoneItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    fn reject(&mut self, item: &ItemId, target: Option<&DropTarget>) -> PlacementOutcome {
        if let Some(DropTarget::Zone(zone)) = target {
            self.last_rejected = Some(zone.clone());
        }
        PlacementOutcome::new(item, target, Disposition::Rejected)
    }
}

impl PlacementModel for FreeZoneModel {
    fn label(&self, item: &ItemId) -> Option<&str> {
        self.item(item).map(|item| item.label.as_str())
    }

    fn location_of(&self, item: &ItemId) -> Option<Origin> {
        self.item(item)?;
        let location = self
            .placed
            .iter()
            .find(|(id, _)| id == item)
            .map_or(Origin::Pool, |(_, zone)| Origin::Zone(zone.clone()));
        Some(location)
    }

    fn is_locked(&self, item: &ItemId) -> bool {
        self.is_placed(item)
    }

    fn is_occupied(&self, target: &DropTarget) -> bool {
        match target {
            DropTarget::Zone(zone) => self.placed.iter().any(|(_, z)| z == zone),
            _ => false,
        }
    }

    fn resolve_drop(
        &mut self,
        item: &ItemId,
        origin: &Origin,
        target: Option<&DropTarget>,
    ) -> PlacementOutcome {
        // Placed items are locked, so every live drag starts from the pool
        if *origin != Origin::Pool || self.location_of(item).as_ref() != Some(origin) {
            return PlacementOutcome::new(item, target, Disposition::Unchanged);
        }

        let Some(DropTarget::Zone(zone)) = target else {
            // Off every zone: the item never left the pool
            return PlacementOutcome::new(item, target, Disposition::Rejected);
        };

        let correct = self
            .item(item)
            .and_then(|i| i.correct_zone.as_ref())
            .is_some_and(|correct| correct == zone);
        let has_room = match self.capacity {
            ZoneCapacity::Single => !self.is_occupied(&DropTarget::Zone(zone.clone())),
            ZoneCapacity::Multiple => true,
        };

        if !correct || !has_room {
            return self.reject(item, target);
        }

        self.placed.push((item.clone(), zone.clone()));
        self.last_rejected = None;
        tracing::info!("Placed {} in zone {}", item, zone);

        PlacementOutcome::new(item, target, Disposition::Accepted).with_event(Some(
            PlacementEvent::ItemPlaced {
                item: item.clone(),
                zone: zone.clone(),
            },
        ))
    }

    fn snapshot(&self) -> PlacementSnapshot {
        PlacementSnapshot::FreeZone {
            pool: self.pool(),
            placed: self.placed.clone(),
            last_rejected: self.last_rejected.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anatomy(capacity: ZoneCapacity) -> FreeZoneModel {
        let items = vec![
            ZoneItem::new("ng", "Nasogastric (NG)", None).with_hint("gastric"),
            ZoneItem::new("nj", "Nasojejunal (NJ)", None).with_hint("post-pyloric"),
            ZoneItem::new("peg-j", "PEG-J", Some(ZoneId::from("post-pyloric"))),
            ZoneItem::new("tpn", "Parenteral Nutrition", None).with_hint("parenteral"),
        ];
        let zones = ["gastric", "post-pyloric", "parenteral"]
            .into_iter()
            .map(ZoneId::from)
            .collect();
        FreeZoneModel::new(items, zones, capacity).unwrap()
    }

    fn zone(id: &str) -> DropTarget {
        DropTarget::Zone(ZoneId::from(id))
    }

    #[test]
    fn test_correct_zone_accepts_and_locks() {
        let mut model = anatomy(ZoneCapacity::Single);
        let peg = ItemId::from("peg-j");

        let outcome = model.resolve_drop(&peg, &Origin::Pool, Some(&zone("post-pyloric")));
        assert!(outcome.accepted());
        assert_eq!(
            outcome.event,
            Some(PlacementEvent::ItemPlaced {
                item: peg.clone(),
                zone: ZoneId::from("post-pyloric"),
            })
        );
        assert!(model.is_locked(&peg));
        assert!(!model.pool().contains(&peg));
        assert_eq!(model.location_of(&peg), Some(Origin::Zone(ZoneId::from("post-pyloric"))));
        assert!(model.is_occupied(&zone("post-pyloric")));
    }

    #[test]
    fn test_wrong_zone_rejects_and_records_flash_zone() {
        let mut model = anatomy(ZoneCapacity::Single);
        let peg = ItemId::from("peg-j");

        let outcome = model.resolve_drop(&peg, &Origin::Pool, Some(&zone("gastric")));
        assert_eq!(outcome.disposition, Disposition::Rejected);
        assert_eq!(outcome.event, None);
        assert_eq!(model.last_rejected_zone(), Some(&ZoneId::from("gastric")));
        assert_eq!(model.pool().len(), 4);
        assert!(!model.is_locked(&peg));

        // A later accept clears the flash zone
        model.resolve_drop(&peg, &Origin::Pool, Some(&zone("post-pyloric")));
        assert_eq!(model.last_rejected_zone(), None);
    }

    #[test]
    fn test_no_target_rejects_without_flash() {
        let mut model = anatomy(ZoneCapacity::Single);
        let ng = ItemId::from("ng");

        let outcome = model.resolve_drop(&ng, &Origin::Pool, None);
        assert_eq!(outcome.disposition, Disposition::Rejected);
        assert_eq!(model.last_rejected_zone(), None);

        let onto_pool = model.resolve_drop(&ng, &Origin::Pool, Some(&DropTarget::Pool));
        assert_eq!(onto_pool.disposition, Disposition::Rejected);
        assert_eq!(model.snapshot().placed_count(), 0);
    }

    #[test]
    fn test_hint_zone_is_decorative() {
        let mut model = anatomy(ZoneCapacity::Multiple);
        let nj = ItemId::from("nj");

        let outcome = model.resolve_drop(&nj, &Origin::Pool, Some(&zone("post-pyloric")));
        assert_eq!(outcome.disposition, Disposition::Rejected);
    }

    #[test]
    fn test_single_capacity_rejects_second_occupant() {
        let items = vec![
            ZoneItem::new("a", "A", Some(ZoneId::from("z"))),
            ZoneItem::new("b", "B", Some(ZoneId::from("z"))),
        ];
        let zones = vec![ZoneId::from("z")];

        let mut single = FreeZoneModel::new(items.clone(), zones.clone(), ZoneCapacity::Single).unwrap();
        assert!(single.resolve_drop(&"a".into(), &Origin::Pool, Some(&zone("z"))).accepted());
        let second = single.resolve_drop(&"b".into(), &Origin::Pool, Some(&zone("z")));
        assert_eq!(second.disposition, Disposition::Rejected);

        let mut multiple = FreeZoneModel::new(items, zones, ZoneCapacity::Multiple).unwrap();
        assert!(multiple.resolve_drop(&"a".into(), &Origin::Pool, Some(&zone("z"))).accepted());
        assert!(multiple.resolve_drop(&"b".into(), &Origin::Pool, Some(&zone("z"))).accepted());
        assert_eq!(multiple.occupants(&ZoneId::from("z")).len(), 2);
    }

    #[test]
    fn test_stale_and_unknown_drops_change_nothing() {
        let mut model = anatomy(ZoneCapacity::Single);
        let peg = ItemId::from("peg-j");
        model.resolve_drop(&peg, &Origin::Pool, Some(&zone("post-pyloric")));

        let again = model.resolve_drop(&peg, &Origin::Pool, Some(&zone("gastric")));
        assert_eq!(again.disposition, Disposition::Unchanged);

        let ghost = model.resolve_drop(&"ghost".into(), &Origin::Pool, Some(&zone("gastric")));
        assert_eq!(ghost.disposition, Disposition::Unchanged);
        assert_eq!(model.last_rejected_zone(), None);
    }

    #[test]
    fn test_construction_errors() {
        let dup = FreeZoneModel::new(
            vec![ZoneItem::new("a", "A", None), ZoneItem::new("a", "A again", None)],
            vec![],
            ZoneCapacity::Single,
        );
        assert_eq!(dup.unwrap_err(), PlacementError::DuplicateItem("a".into()));

        let unknown = FreeZoneModel::new(
            vec![ZoneItem::new("a", "A", Some(ZoneId::from("nowhere")))],
            vec![ZoneId::from("gastric")],
            ZoneCapacity::Single,
        );
        assert!(matches!(unknown, Err(PlacementError::UnknownZone { .. })));
    }
}
