//! Question data types

use serde::{Deserialize, Serialize};

use fq_drag::{ItemId, SequenceItem, ZoneId, ZoneItem};

use crate::QuestionError;

/// Clinical theme a question belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Timing,
    Access,
    Tolerance,
    Safety,
    Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Fields shared by every question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMeta {
    pub id: String,
    pub theme: Theme,
    pub title: String,
    pub difficulty: Difficulty,
    /// One-line patient summary shown above the board
    pub patient: String,
    #[serde(default)]
    pub details: Vec<String>,
    /// Shown on the reveal screen once the question is answered
    pub learning_point: String,
}

/// Draggable item of an anatomy question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnatomyItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub correct: bool,
    /// Where the item belongs. Only binding for the correct item.
    pub zone: ZoneId,
}

/// Drop items onto body zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnatomyQuestion {
    #[serde(flatten)]
    pub meta: QuestionMeta,
    /// Drop zones in registration order. Derived from the items when omitted.
    #[serde(default)]
    pub zones: Vec<ZoneId>,
    pub items: Vec<AnatomyItem>,
}

impl AnatomyQuestion {
    /// Declared zones, or the items' zones in first-seen order
    pub fn zone_ids(&self) -> Vec<ZoneId> {
        if !self.zones.is_empty() {
            return self.zones.clone();
        }

        let mut zones: Vec<ZoneId> = Vec::new();
        for item in &self.items {
            if !zones.contains(&item.zone) {
                zones.push(item.zone.clone());
            }
        }
        zones
    }

    /// Items as the free-zone model sees them. Only the correct item keeps a
    /// binding zone; the rest carry theirs as a hint.
    pub fn zone_items(&self) -> Vec<ZoneItem> {
        self.items
            .iter()
            .map(|item| {
                let correct_zone = item.correct.then(|| item.zone.clone());
                ZoneItem::new(item.id.clone(), item.name.clone(), correct_zone)
                    .with_hint(item.zone.clone())
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        let question = &self.meta.id;

        let found = self.items.iter().filter(|item| item.correct).count();
        if found != 1 {
            return Err(QuestionError::CorrectItemCount {
                question: question.clone(),
                found,
            });
        }

        let zones = self.zone_ids();
        if zones.is_empty() {
            return Err(QuestionError::NoZones {
                question: question.clone(),
            });
        }

        for item in &self.items {
            if !zones.contains(&item.zone) {
                return Err(QuestionError::UnknownZone {
                    question: question.clone(),
                    item: item.id.clone(),
                    zone: item.zone.clone(),
                });
            }
        }

        Ok(())
    }
}

/// One step of a sequence question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceStep {
    pub id: ItemId,
    pub text: String,
    /// Zero-based position in the correct order
    pub order: usize,
}

/// Arrange steps into the correct order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceQuestion {
    #[serde(flatten)]
    pub meta: QuestionMeta,
    pub items: Vec<SequenceStep>,
    pub correct_order: Vec<ItemId>,
}

impl SequenceQuestion {
    pub fn sequence_items(&self) -> Vec<SequenceItem> {
        self.items
            .iter()
            .map(|step| SequenceItem::new(step.id.clone(), step.text.clone(), step.order))
            .collect()
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        let question = &self.meta.id;

        let mut listed = self.correct_order.clone();
        let mut steps: Vec<ItemId> = self.items.iter().map(|step| step.id.clone()).collect();
        listed.sort();
        steps.sort();
        if listed != steps || listed.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(QuestionError::OrderMismatch {
                question: question.clone(),
            });
        }

        for (position, id) in self.correct_order.iter().enumerate() {
            let Some(step) = self.items.iter().find(|step| &step.id == id) else {
                continue;
            };
            if step.order != position {
                return Err(QuestionError::OrderConflict {
                    question: question.clone(),
                    item: step.id.clone(),
                    order: step.order,
                    position,
                });
            }
        }

        Ok(())
    }
}

/// A drag-driven quiz question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    DragAnatomy(AnatomyQuestion),
    Sequence(SequenceQuestion),
}

impl Question {
    pub fn meta(&self) -> &QuestionMeta {
        match self {
            Question::DragAnatomy(q) => &q.meta,
            Question::Sequence(q) => &q.meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.meta().id
    }

    pub fn validate(&self) -> Result<(), QuestionError> {
        match self {
            Question::DragAnatomy(q) => q.validate(),
            Question::Sequence(q) => q.validate(),
        }
    }
}
