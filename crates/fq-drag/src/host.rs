//! Host runtime seams
//!
//! The controller never touches the UI directly. Geometry, global pointer
//! listeners, feedback sounds and game-level events all go through the
//! traits here.

use std::collections::HashMap;

use serde::Serialize;

use crate::{DropTarget, PlacementEvent, Rect};

/// Live geometry queries against the rendering layer
pub trait Layout {
    /// Current screen rectangle of a target, `None` if it is not rendered
    fn measure(&self, target: &DropTarget) -> Option<Rect>;

    /// Visible viewport, if the host knows it
    fn viewport(&self) -> Option<Rect> {
        None
    }
}

/// Handle for the global move/release listeners of one gesture.
///
/// Neither `Clone` nor `Copy`: giving it back to
/// [`ListenerRegistry::unsubscribe`] consumes it, so a subscription can be
/// released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription(u64);

impl Subscription {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Document-level pointer listener registration
pub trait ListenerRegistry {
    /// Attach global move/release listeners
    fn subscribe(&mut self) -> Subscription;

    /// Detach the listeners behind `subscription`
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Sound cue requests. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCue {
    Pickup,
    Accepted,
    Rejected,
}

/// Everything the controller needs from the surrounding application
pub trait DragHost: Layout + ListenerRegistry {
    /// Play a feedback sound. Must not block.
    fn play_feedback(&mut self, cue: FeedbackCue);

    /// Game-level notification: correct placement or completed sequence
    fn placement_event(&mut self, event: PlacementEvent);
}

/// In-memory host for headless runs and tests
#[derive(Debug, Default)]
pub struct HeadlessHost {
    rects: HashMap<DropTarget, Rect>,
    viewport: Option<Rect>,
    next_subscription: u64,
    live: Vec<u64>,
    subscribed: usize,
    cues: Vec<FeedbackCue>,
    events: Vec<PlacementEvent>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place (or move) a target on screen
    pub fn set_rect(&mut self, target: DropTarget, rect: Rect) {
        self.rects.insert(target, rect);
    }

    /// Take a target off screen
    pub fn remove_rect(&mut self, target: &DropTarget) -> Option<Rect> {
        self.rects.remove(target)
    }

    pub fn clear_rects(&mut self) {
        self.rects.clear();
    }

    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// Subscriptions handed out and not yet released
    pub fn live_subscriptions(&self) -> usize {
        self.live.len()
    }

    /// Subscriptions handed out in total
    pub fn total_subscriptions(&self) -> usize {
        self.subscribed
    }

    pub fn cues(&self) -> &[FeedbackCue] {
        &self.cues
    }

    pub fn events(&self) -> &[PlacementEvent] {
        &self.events
    }

    pub fn drain_cues(&mut self) -> Vec<FeedbackCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn drain_events(&mut self) -> Vec<PlacementEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Layout for HeadlessHost {
    fn measure(&self, target: &DropTarget) -> Option<Rect> {
        self.rects.get(target).copied()
    }

    fn viewport(&self) -> Option<Rect> {
        self.viewport
    }
}

impl ListenerRegistry for HeadlessHost {
    fn subscribe(&mut self) -> Subscription {
        self.next_subscription += 1;
        self.subscribed += 1;
        self.live.push(self.next_subscription);
        Subscription::new(self.next_subscription)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.live.retain(|&id| id != subscription.id());
    }
}

impl DragHost for HeadlessHost {
    fn play_feedback(&mut self, cue: FeedbackCue) {
        self.cues.push(cue);
    }

    fn placement_event(&mut self, event: PlacementEvent) {
        self.events.push(event);
    }
}
