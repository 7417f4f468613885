//! Per-question drag board
//!
//! The placement model is chosen once, when the question is loaded, and
//! the controller then works against [`QuestionBoard`] for the whole
//! question.

use rand::Rng;

use fq_drag::{
    DragConfig, DropTarget, FreeZoneModel, ItemId, OrderedSlotModel, Origin, PlacementModel,
    PlacementOutcome, PlacementSnapshot,
};

use crate::{Question, QuestionError};

/// Placement state for one loaded question
#[derive(Debug, Clone)]
pub enum QuestionBoard {
    FreeZone(FreeZoneModel),
    OrderedSlot(OrderedSlotModel),
}

impl QuestionBoard {
    /// Validate `question` and build its placement model
    pub fn for_question<R: Rng + ?Sized>(
        question: &Question,
        config: &DragConfig,
        rng: &mut R,
    ) -> Result<Self, QuestionError> {
        question.validate()?;

        let board = match question {
            Question::DragAnatomy(anatomy) => QuestionBoard::FreeZone(FreeZoneModel::new(
                anatomy.zone_items(),
                anatomy.zone_ids(),
                config.zone_capacity,
            )?),
            Question::Sequence(sequence) => {
                QuestionBoard::OrderedSlot(OrderedSlotModel::new(sequence.sequence_items(), rng)?)
            }
        };

        tracing::debug!("Loaded board for question {}", question.id());
        Ok(board)
    }

    /// Targets the host should register, in hit-test order: every zone, or
    /// every slot followed by the pool
    pub fn drop_targets(&self) -> Vec<DropTarget> {
        match self {
            QuestionBoard::FreeZone(model) => {
                model.zones().iter().cloned().map(DropTarget::Zone).collect()
            }
            QuestionBoard::OrderedSlot(model) => (0..model.slot_count())
                .map(DropTarget::Slot)
                .chain(std::iter::once(DropTarget::Pool))
                .collect(),
        }
    }

    fn model(&self) -> &dyn PlacementModel {
        match self {
            QuestionBoard::FreeZone(model) => model,
            QuestionBoard::OrderedSlot(model) => model,
        }
    }

    fn model_mut(&mut self) -> &mut dyn PlacementModel {
        match self {
            QuestionBoard::FreeZone(model) => model,
            QuestionBoard::OrderedSlot(model) => model,
        }
    }
}

impl PlacementModel for QuestionBoard {
    fn label(&self, item: &ItemId) -> Option<&str> {
        self.model().label(item)
    }

    fn location_of(&self, item: &ItemId) -> Option<Origin> {
        self.model().location_of(item)
    }

    fn is_locked(&self, item: &ItemId) -> bool {
        self.model().is_locked(item)
    }

    fn is_occupied(&self, target: &DropTarget) -> bool {
        self.model().is_occupied(target)
    }

    fn resolve_drop(
        &mut self,
        item: &ItemId,
        origin: &Origin,
        target: Option<&DropTarget>,
    ) -> PlacementOutcome {
        self.model_mut().resolve_drop(item, origin, target)
    }

    fn snapshot(&self) -> PlacementSnapshot {
        self.model().snapshot()
    }
}
