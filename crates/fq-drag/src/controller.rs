//! Pointer drag controller
//!
//! Tracks one press-move-release gesture at a time:
//!
//! - `begin_drag` picks an item up, subscribes to global pointer listeners
//!   and remembers where inside the item the pointer grabbed it.
//! - `update_drag` moves the overlay and re-runs the hit-test against
//!   freshly measured target rectangles.
//! - `end_drag` hit-tests once more and hands the drop to the model.
//!
//! Listener subscriptions are released on every path out of a gesture:
//! drop, off-target drop, cancel, release outside the viewport, loading a
//! new question, and dropping the controller itself. Events that arrive with
//! no gesture active are ignored.

use std::time::Instant;

use fq_input::{PointerEvent, PointerEventKind};

use crate::{
    hit_test, DragConfig, DragHost, DropTarget, FeedbackCue, FlashTimer, GestureRefusal, ItemId,
    Origin, PlacementModel, PlacementOutcome, PlacementSnapshot, Point, Rect, SlotVisual,
    Subscription, TargetRegistry, ZoneId, ZoneVisual,
};
use crate::placement::Disposition;

/// What the host should do with the input event it just delivered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the platform's default scroll/zoom handling
    pub prevent_default: bool,
    /// Set when the event ended a gesture with a drop
    pub outcome: Option<PlacementOutcome>,
}

impl EventResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn handled() -> Self {
        Self {
            prevent_default: true,
            outcome: None,
        }
    }
}

/// Floating copy of the dragged item
#[derive(Debug, Clone, PartialEq)]
pub struct DragOverlay {
    pub item: ItemId,
    pub label: String,
    /// Where to draw the item's top-left corner
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct DragView {
    /// Placement state with the dragged item hidden from its origin
    pub snapshot: PlacementSnapshot,
    pub overlay: Option<DragOverlay>,
    pub hover: Option<DropTarget>,
}

#[derive(Debug)]
struct DragGesture {
    item: ItemId,
    label: String,
    origin: Origin,
    /// Pointer that owns the gesture, when started from a pointer event
    pointer_id: Option<u64>,
    /// Pointer position relative to the item's top-left corner at press
    grab_offset: Point,
    item_bounds: Rect,
    pointer: Point,
    hover: Option<DropTarget>,
}

/// Drives drag gestures for one question's placement model
pub struct PointerDragController<M: PlacementModel, H: DragHost> {
    model: M,
    host: H,
    config: DragConfig,
    targets: TargetRegistry,
    gesture: Option<DragGesture>,
    listeners: Option<Subscription>,
    flash: FlashTimer,
}

impl<M: PlacementModel, H: DragHost> PointerDragController<M, H> {
    pub fn new(model: M, host: H, config: DragConfig) -> Self {
        let flash = FlashTimer::new(config.flash_duration());
        Self {
            model,
            host,
            config,
            targets: TargetRegistry::new(),
            gesture: None,
            listeners: None,
            flash,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// Make a target eligible for hit-testing. Registration order is the
    /// default tie-break for overlapping targets.
    pub fn register_target(&mut self, target: DropTarget) -> bool {
        self.targets.register(target)
    }

    pub fn unregister_target(&mut self, target: &DropTarget) -> bool {
        self.targets.unregister(target)
    }

    /// Replace all registered targets
    pub fn set_targets(&mut self, targets: impl IntoIterator<Item = DropTarget>) {
        self.targets = targets.into_iter().collect();
    }

    /// Switch to the next question. Any gesture in flight is cancelled and
    /// the previous model is handed back.
    pub fn load(&mut self, model: M, targets: impl IntoIterator<Item = DropTarget>) -> M {
        self.cancel_drag();
        self.flash.clear();
        self.set_targets(targets);
        std::mem::replace(&mut self.model, model)
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn dragged_item(&self) -> Option<&ItemId> {
        self.gesture.as_ref().map(|g| &g.item)
    }

    pub fn hover_target(&self) -> Option<&DropTarget> {
        self.gesture.as_ref().and_then(|g| g.hover.as_ref())
    }

    pub fn flash(&self) -> &FlashTimer {
        &self.flash
    }

    pub fn overlay(&self) -> Option<DragOverlay> {
        self.gesture.as_ref().map(|g| DragOverlay {
            item: g.item.clone(),
            label: g.label.clone(),
            position: g.pointer - g.grab_offset,
            width: g.item_bounds.width,
            height: g.item_bounds.height,
        })
    }

    pub fn view(&self) -> DragView {
        let mut snapshot = self.model.snapshot();
        if let Some(item) = self.dragged_item() {
            snapshot.hide(item);
        }
        DragView {
            snapshot,
            overlay: self.overlay(),
            hover: self.hover_target().cloned(),
        }
    }

    pub fn zone_visual(&self, zone: &ZoneId, now: Instant) -> ZoneVisual {
        let target = DropTarget::Zone(zone.clone());
        ZoneVisual::resolve(
            self.flash.is_flashing(zone, now),
            self.model.is_occupied(&target),
            self.hover_target() == Some(&target),
        )
    }

    pub fn slot_visual(&self, index: usize) -> SlotVisual {
        let target = DropTarget::Slot(index);
        let lifted = self
            .gesture
            .as_ref()
            .is_some_and(|g| g.origin == Origin::Slot(index));
        SlotVisual::resolve(
            self.model.is_occupied(&target) && !lifted,
            self.hover_target() == Some(&target),
        )
    }

    /// Pick up `item` with the pointer at `pointer`. `item_bounds` is the
    /// item's rendered rectangle at press time.
    pub fn begin_drag(
        &mut self,
        item: &ItemId,
        pointer: Point,
        item_bounds: Rect,
    ) -> Result<(), GestureRefusal> {
        self.start(item, pointer, item_bounds, None)
    }

    /// Like [`begin_drag`](Self::begin_drag), but binds the gesture to the
    /// pressing pointer so other pointers cannot move or drop it.
    pub fn begin_pointer_drag(
        &mut self,
        item: &ItemId,
        press: &PointerEvent,
        item_bounds: Rect,
    ) -> Result<(), GestureRefusal> {
        if press.kind != PointerEventKind::Down || !press.is_primary {
            return Err(GestureRefusal::NotPrimaryPress(press.pointer_id));
        }
        self.start(item, press.position, item_bounds, Some(press.pointer_id))
    }

    fn start(
        &mut self,
        item: &ItemId,
        pointer: Point,
        item_bounds: Rect,
        pointer_id: Option<u64>,
    ) -> Result<(), GestureRefusal> {
        if self.gesture.is_some() {
            return Err(GestureRefusal::AlreadyDragging);
        }
        let origin = self
            .model
            .location_of(item)
            .ok_or_else(|| GestureRefusal::UnknownItem(item.clone()))?;
        if self.model.is_locked(item) {
            return Err(GestureRefusal::Locked(item.clone()));
        }

        let label = self.model.label(item).unwrap_or_default().to_string();
        let hover = hit_test(&self.host, &self.targets, pointer, self.config.tie_break);

        self.listeners = Some(self.host.subscribe());
        tracing::debug!("Drag started: {} from {:?}", item, origin);

        self.gesture = Some(DragGesture {
            item: item.clone(),
            label,
            origin,
            pointer_id,
            grab_offset: pointer - item_bounds.origin(),
            item_bounds,
            pointer,
            hover,
        });
        self.host.play_feedback(FeedbackCue::Pickup);

        Ok(())
    }

    /// Follow the pointer and refresh the hover target
    pub fn update_drag(&mut self, pointer: Point) -> EventResponse {
        let Some(gesture) = self.gesture.as_mut() else {
            return EventResponse::ignored();
        };

        let hover = hit_test(&self.host, &self.targets, pointer, self.config.tie_break);
        gesture.pointer = pointer;
        if gesture.hover != hover {
            tracing::trace!("Hover {:?} -> {:?}", gesture.hover, hover);
            gesture.hover = hover;
        }

        EventResponse::handled()
    }

    /// Release the item at `pointer` and resolve the drop
    pub fn end_drag(&mut self, pointer: Point) -> EventResponse {
        let Some(gesture) = self.gesture.take() else {
            return EventResponse::ignored();
        };
        self.release_listeners();

        if self.config.cancel_outside_viewport {
            if let Some(viewport) = self.host.viewport() {
                if !viewport.contains_point(pointer) {
                    tracing::debug!("Drag of {} released outside viewport", gesture.item);
                    return EventResponse::handled();
                }
            }
        }

        let target = hit_test(&self.host, &self.targets, pointer, self.config.tie_break);
        let outcome = self
            .model
            .resolve_drop(&gesture.item, &gesture.origin, target.as_ref());
        tracing::debug!(
            "Dropped {} on {:?}: {:?}",
            outcome.item,
            outcome.target,
            outcome.disposition
        );

        match outcome.disposition {
            Disposition::Accepted => {
                self.flash.clear();
                self.host.play_feedback(FeedbackCue::Accepted);
            }
            Disposition::Rejected => {
                if let Some(DropTarget::Zone(zone)) = &outcome.target {
                    self.flash.start(zone.clone(), Instant::now());
                }
                self.host.play_feedback(FeedbackCue::Rejected);
            }
            Disposition::Unchanged => {}
        }

        if let Some(event) = &outcome.event {
            self.host.placement_event(event.clone());
        }

        EventResponse {
            prevent_default: true,
            outcome: Some(outcome),
        }
    }

    /// Abort the active gesture; the item stays where it was picked up.
    /// Returns `false` when nothing was being dragged.
    pub fn cancel_drag(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        self.release_listeners();
        tracing::debug!("Drag of {} cancelled", gesture.item);
        true
    }

    /// Route a move/release/cancel delivered by the global listeners.
    ///
    /// Presses are not handled here: they need the pressed item, see
    /// [`begin_pointer_drag`](Self::begin_pointer_drag).
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> EventResponse {
        let Some(gesture) = &self.gesture else {
            return EventResponse::ignored();
        };
        if gesture.pointer_id.is_some_and(|id| id != event.pointer_id) {
            return EventResponse::ignored();
        }

        match event.kind {
            PointerEventKind::Down => EventResponse::ignored(),
            PointerEventKind::Move => self.update_drag(event.position),
            PointerEventKind::Up => self.end_drag(event.position),
            PointerEventKind::Cancel => {
                self.cancel_drag();
                EventResponse::handled()
            }
        }
    }

    fn release_listeners(&mut self) {
        if let Some(subscription) = self.listeners.take() {
            self.host.unsubscribe(subscription);
        }
    }
}

impl<M: PlacementModel, H: DragHost> Drop for PointerDragController<M, H> {
    fn drop(&mut self) {
        self.release_listeners();
    }
}
