//! Integration tests - gestures driven end to end through the controller
//!
//! Layout mirrors the kiosk screen: a tray/pool on the left, drop zones or
//! slots on the right, all measured through a headless host.

use fq_drag::{
    DragConfig, DropTarget, FeedbackCue, FreeZoneModel, HeadlessHost, ItemId, OrderedSlotModel,
    Origin, PlacementEvent, PlacementModel, PlacementSnapshot, Point, PointerDragController, Rect,
    SequenceItem, ZoneCapacity, ZoneId, ZoneItem,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const ITEM_SIZE: (f64, f64) = (200.0, 80.0);

// ============================================================================
// FIXTURES
// ============================================================================

fn zone(id: &str) -> DropTarget {
    DropTarget::Zone(ZoneId::from(id))
}

fn anatomy() -> PointerDragController<FreeZoneModel, HeadlessHost> {
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
    let model = FreeZoneModel::new(items, zones, ZoneCapacity::Single).unwrap();

    let mut host = HeadlessHost::new();
    host.set_rect(zone("gastric"), Rect::from_xywh(460.0, 190.0, 130.0, 105.0));
    host.set_rect(zone("post-pyloric"), Rect::from_xywh(520.0, 305.0, 110.0, 75.0));
    host.set_rect(zone("parenteral"), Rect::from_xywh(368.0, 120.0, 70.0, 60.0));

    let mut controller = PointerDragController::new(model, host, DragConfig::default());
    controller.set_targets([zone("gastric"), zone("post-pyloric"), zone("parenteral")]);
    controller
}

fn weaning_steps() -> Vec<SequenceItem> {
    vec![
        SequenceItem::new("swallow", "Formal swallow assessment by speech pathology", 0),
        SequenceItem::new("texture", "Begin texture-modified oral diet with EN at full rate", 1),
        SequenceItem::new("reduce", "Reduce EN rate as oral intake increases", 2),
        SequenceItem::new("remove", "Cease EN and remove NG tube", 3),
    ]
}

fn slot_rect(index: usize) -> Rect {
    Rect::from_xywh(600.0, 60.0 + index as f64 * 90.0, 500.0, 80.0)
}

const POOL_RECT: Rect = Rect { x: 40.0, y: 60.0, width: 500.0, height: 400.0 };

fn sequence(seed: u64) -> PointerDragController<OrderedSlotModel, HeadlessHost> {
    let mut rng = StdRng::seed_from_u64(seed);
    let model = OrderedSlotModel::new(weaning_steps(), &mut rng).unwrap();

    let mut host = HeadlessHost::new();
    let mut targets = Vec::new();
    for index in 0..model.slot_count() {
        host.set_rect(DropTarget::Slot(index), slot_rect(index));
        targets.push(DropTarget::Slot(index));
    }
    host.set_rect(DropTarget::Pool, POOL_RECT);
    targets.push(DropTarget::Pool);

    let mut controller = PointerDragController::new(model, host, DragConfig::default());
    controller.set_targets(targets);
    controller
}

/// Press on the item wherever it is drawn, then release at `to`
fn move_step<M: PlacementModel>(
    controller: &mut PointerDragController<M, HeadlessHost>,
    item: &str,
    to: Point,
) -> Option<fq_drag::PlacementOutcome> {
    let item = ItemId::from(item);
    let press = match controller.model().location_of(&item)? {
        Origin::Slot(index) => slot_rect(index).center(),
        _ => POOL_RECT.origin() + Point::new(20.0, 20.0),
    };
    let bounds = Rect::from_xywh(press.x - 20.0, press.y - 20.0, ITEM_SIZE.0, ITEM_SIZE.1);

    controller.begin_drag(&item, press, bounds).ok()?;
    controller.update_drag(Point::new((press.x + to.x) / 2.0, (press.y + to.y) / 2.0));
    controller.update_drag(to);
    controller.end_drag(to).outcome
}

fn all_ids(snapshot: &PlacementSnapshot) -> Vec<ItemId> {
    let mut ids: Vec<ItemId> = snapshot.pool().to_vec();
    match snapshot {
        PlacementSnapshot::OrderedSlot { slots, .. } => ids.extend(slots.iter().flatten().cloned()),
        PlacementSnapshot::FreeZone { placed, .. } => {
            ids.extend(placed.iter().map(|(id, _)| id.clone()))
        }
    }
    ids.sort();
    ids
}

// ============================================================================
// FREE-ZONE SCENARIOS
// ============================================================================

#[test]
fn test_peg_j_rejected_then_accepted_then_locked() {
    let mut drag = anatomy();
    let gastric = Rect::from_xywh(460.0, 190.0, 130.0, 105.0).center();
    let pyloric = Rect::from_xywh(520.0, 305.0, 110.0, 75.0).center();

    let rejected = drag_item(&mut drag, "peg-j", gastric).unwrap();
    assert!(!rejected.accepted());
    assert!(drag.model().pool().contains(&ItemId::from("peg-j")));
    assert_eq!(drag.model().last_rejected_zone(), Some(&ZoneId::from("gastric")));

    let accepted = drag_item(&mut drag, "peg-j", pyloric).unwrap();
    assert!(accepted.accepted());
    assert!(!drag.model().pool().contains(&ItemId::from("peg-j")));
    assert_eq!(
        drag.host().events(),
        &[PlacementEvent::ItemPlaced {
            item: ItemId::from("peg-j"),
            zone: ZoneId::from("post-pyloric"),
        }]
    );

    assert!(drag
        .begin_drag(&ItemId::from("peg-j"), pyloric, Rect::from_xywh(520.0, 305.0, 110.0, 75.0))
        .is_err());
    assert!(!drag.is_dragging());
}

fn drag_item(
    controller: &mut PointerDragController<FreeZoneModel, HeadlessHost>,
    item: &str,
    to: Point,
) -> Option<fq_drag::PlacementOutcome> {
    let press = Point::new(60.0, 140.0);
    let bounds = Rect::from_xywh(40.0, 100.0, ITEM_SIZE.0, ITEM_SIZE.1);
    controller.begin_drag(&ItemId::from(item), press, bounds).ok()?;
    controller.update_drag(to);
    controller.end_drag(to).outcome
}

#[test]
fn test_every_wrong_drop_conserves_items() {
    let mut drag = anatomy();
    let drop_points = [
        Point::new(525.0, 240.0),  // gastric
        Point::new(575.0, 340.0),  // post-pyloric
        Point::new(400.0, 150.0),  // parenteral
        Point::new(1000.0, 700.0), // nowhere
    ];

    for item in ["ng", "nj", "tpn"] {
        for point in drop_points {
            let before = drag.model().snapshot();
            let total_before = before.pool().len() + before.placed_count();

            let outcome = drag_item(&mut drag, item, point).unwrap();
            assert!(!outcome.accepted(), "{} accepted at {:?}", item, point);

            let after = drag.model().snapshot();
            assert_eq!(after.pool().len() + after.placed_count(), total_before);
            assert!(after.pool().contains(&ItemId::from(item)));
        }
    }

    assert!(drag.host().events().is_empty());
    assert_eq!(drag.host().live_subscriptions(), 0);
}

#[test]
fn test_release_with_no_targets_registered() {
    let mut drag = anatomy();
    drag.set_targets([]);

    let outcome = drag_item(&mut drag, "peg-j", Point::new(575.0, 340.0)).unwrap();
    assert!(!outcome.accepted());
    assert_eq!(outcome.target, None);
    assert_eq!(drag.model().pool().len(), 4);
    assert_eq!(drag.host().cues(), &[FeedbackCue::Pickup, FeedbackCue::Rejected]);
}

#[test]
fn test_zone_removed_mid_drag_is_not_hit() {
    let mut drag = anatomy();
    let pyloric = Point::new(575.0, 340.0);

    drag.begin_drag(&ItemId::from("peg-j"), Point::new(60.0, 140.0), Rect::from_xywh(40.0, 100.0, 200.0, 80.0))
        .unwrap();
    drag.update_drag(pyloric);
    assert_eq!(drag.hover_target(), Some(&zone("post-pyloric")));

    drag.host_mut().remove_rect(&zone("post-pyloric"));
    let outcome = drag.end_drag(pyloric).outcome.unwrap();
    assert!(!outcome.accepted());
    assert!(drag.model().pool().contains(&ItemId::from("peg-j")));
}

// ============================================================================
// ORDERED-SLOT SCENARIOS
// ============================================================================

#[test]
fn test_weaning_sequence_completes_once() {
    let mut drag = sequence(42);

    for (index, step) in ["swallow", "texture", "reduce", "remove"].iter().enumerate() {
        let outcome = move_step(&mut drag, step, slot_rect(index).center()).unwrap();
        assert!(outcome.accepted());
    }

    assert_eq!(
        drag.host().events(),
        &[PlacementEvent::SequenceCompleted {
            order: ["swallow", "texture", "reduce", "remove"].map(ItemId::from).to_vec(),
            correct: true,
        }]
    );
    assert!(drag.model().pool().is_empty());
}

#[test]
fn test_slot_to_occupied_slot_displaces_to_pool() {
    let mut drag = sequence(3);
    move_step(&mut drag, "swallow", slot_rect(0).center());
    move_step(&mut drag, "texture", slot_rect(2).center());

    let outcome = move_step(&mut drag, "swallow", slot_rect(2).center()).unwrap();
    assert!(outcome.accepted());

    let slots = drag.model().slots();
    assert_eq!(slots[0], None);
    assert_eq!(slots[2], Some(ItemId::from("swallow")));
    assert!(drag.model().pool().contains(&ItemId::from("texture")));
    assert!(!slots.contains(&Some(ItemId::from("texture"))));
}

#[test]
fn test_drop_outside_everything_is_a_no_op() {
    let mut drag = sequence(5);
    move_step(&mut drag, "reduce", slot_rect(1).center());
    let before = drag.model().snapshot();

    let outcome = move_step(&mut drag, "reduce", Point::new(1500.0, 900.0)).unwrap();
    assert!(!outcome.accepted());
    assert_eq!(drag.model().snapshot(), before);
    assert_eq!(
        drag.host().cues().iter().filter(|c| **c == FeedbackCue::Rejected).count(),
        0
    );
}

#[test]
fn test_slot_item_dragged_back_to_pool() {
    let mut drag = sequence(11);
    move_step(&mut drag, "remove", slot_rect(3).center());

    let outcome = move_step(&mut drag, "remove", POOL_RECT.center()).unwrap();
    assert!(outcome.accepted());
    assert_eq!(drag.model().slots()[3], None);
    assert_eq!(drag.model().pool().last(), Some(&ItemId::from("remove")));
}

#[test]
fn test_random_gestures_never_lose_or_duplicate_items() {
    let expected: Vec<ItemId> = {
        let mut ids: Vec<ItemId> = weaning_steps().into_iter().map(|s| s.id).collect();
        ids.sort();
        ids
    };

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut drag = sequence(seed);
        let mut completions = 0;

        for _ in 0..60 {
            let item = ["swallow", "texture", "reduce", "remove"]
                .choose(&mut rng)
                .copied()
                .unwrap_or("swallow");
            let to = match rng.gen_range(0..6) {
                0..=3 => slot_rect(rng.gen_range(0..4)).center(),
                4 => POOL_RECT.center(),
                _ => Point::new(1500.0, 900.0),
            };

            let was_full = drag.model().is_full();
            if let Some(outcome) = move_step(&mut drag, item, to) {
                if outcome.event.is_some() {
                    completions += 1;
                    assert!(!was_full, "completion fired on an already full row");
                    assert!(drag.model().is_full());
                }
            }

            let snapshot = drag.model().snapshot();
            assert_eq!(all_ids(&snapshot), expected, "seed {}", seed);
            assert_eq!(drag.host().live_subscriptions(), 0);
        }

        assert_eq!(drag.host().events().len(), completions);
    }
}
