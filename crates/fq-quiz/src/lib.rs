//! fq-quiz - Question data for the feeding-quiz kiosk
//!
//! Questions are static JSON. Only the two drag-driven question styles live
//! here: anatomy questions (items dropped onto body zones) and sequence
//! questions (steps arranged into order). [`QuestionBoard`] turns a question
//! into the placement model and drop targets the drag controller needs.

mod bank;
mod board;
mod question;

pub use bank::{builtin_bank, load_bank, select_questions};
pub use board::QuestionBoard;
pub use question::{
    AnatomyItem, AnatomyQuestion, Difficulty, Question, QuestionMeta, SequenceQuestion,
    SequenceStep, Theme,
};

use fq_drag::{ItemId, PlacementError, ZoneId};

/// Question data errors
#[derive(Debug, thiserror::Error)]
pub enum QuestionError {
    #[error("Malformed question data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Question {question} needs exactly one correct item, found {found}")]
    CorrectItemCount { question: String, found: usize },

    #[error("Question {question} has no drop zones")]
    NoZones { question: String },

    #[error("Question {question}: correct order does not list every step exactly once")]
    OrderMismatch { question: String },

    #[error("Question {question}: step {item} has order {order} but sits at position {position}")]
    OrderConflict {
        question: String,
        item: ItemId,
        order: usize,
        position: usize,
    },

    #[error("Question {question}: item {item} names undeclared zone {zone}")]
    UnknownZone {
        question: String,
        item: ItemId,
        zone: ZoneId,
    },

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
