//! Drop targets and drag origins

use serde::{Deserialize, Serialize};

use crate::ZoneId;

/// Something an item can be dropped onto
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// A named free-form zone
    Zone(ZoneId),
    /// A position in an ordered row
    Slot(usize),
    /// The holding area for unplaced items
    Pool,
}

/// Where a dragged item was picked up from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Pool,
    Zone(ZoneId),
    Slot(usize),
}

impl Origin {
    /// The target that would put the item back where it came from
    pub fn as_target(&self) -> DropTarget {
        match self {
            Origin::Pool => DropTarget::Pool,
            Origin::Zone(zone) => DropTarget::Zone(zone.clone()),
            Origin::Slot(index) => DropTarget::Slot(*index),
        }
    }
}

/// Targets eligible for hit-testing, in registration order.
///
/// Only identities are stored; rectangles are measured by the host on every
/// hit-test.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    targets: Vec<DropTarget>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target. Registering twice keeps the original position.
    pub fn register(&mut self, target: DropTarget) -> bool {
        if self.targets.contains(&target) {
            return false;
        }
        self.targets.push(target);
        true
    }

    pub fn unregister(&mut self, target: &DropTarget) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t != target);
        self.targets.len() != before
    }

    pub fn clear(&mut self) {
        self.targets.clear();
    }

    pub fn contains(&self, target: &DropTarget) -> bool {
        self.targets.contains(target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl FromIterator<DropTarget> for TargetRegistry {
    fn from_iter<I: IntoIterator<Item = DropTarget>>(iter: I) -> Self {
        let mut registry = TargetRegistry::new();
        for target in iter {
            registry.register(target);
        }
        registry
    }
}
