//! Per-render visual state for zones and slots

use std::time::{Duration, Instant};

use crate::ZoneId;

/// How a free-form zone should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneVisual {
    Idle,
    Hovered,
    Occupied,
    RejectedFlash,
}

impl ZoneVisual {
    /// Flash beats occupancy, occupancy beats hover
    pub fn resolve(flashing: bool, occupied: bool, hovered: bool) -> Self {
        if flashing {
            ZoneVisual::RejectedFlash
        } else if occupied {
            ZoneVisual::Occupied
        } else if hovered {
            ZoneVisual::Hovered
        } else {
            ZoneVisual::Idle
        }
    }
}

/// How an ordered slot should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotVisual {
    Empty,
    /// Empty slot under the pointer
    Hovered,
    Filled,
}

impl SlotVisual {
    pub fn resolve(filled: bool, hovered: bool) -> Self {
        match (filled, hovered) {
            (true, _) => SlotVisual::Filled,
            (false, true) => SlotVisual::Hovered,
            (false, false) => SlotVisual::Empty,
        }
    }
}

/// Short-lived "rejected" highlight on a zone.
///
/// Nothing is scheduled: the flash simply stops being reported once its
/// duration has passed, so it can never hold up a gesture.
#[derive(Debug, Clone)]
pub struct FlashTimer {
    duration: Duration,
    active: Option<(ZoneId, Instant)>,
}

impl FlashTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    /// Start flashing `zone`, replacing any running flash
    pub fn start(&mut self, zone: ZoneId, now: Instant) {
        self.active = Some((zone, now));
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Zone currently flashing, if the flash has not expired
    pub fn active_zone(&self, now: Instant) -> Option<&ZoneId> {
        let (zone, started) = self.active.as_ref()?;
        (now.saturating_duration_since(*started) < self.duration).then_some(zone)
    }

    pub fn is_flashing(&self, zone: &ZoneId, now: Instant) -> bool {
        self.active_zone(now) == Some(zone)
    }
}
