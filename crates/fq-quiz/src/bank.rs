//! Question bank loading and selection

use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Question, QuestionError};

const BUILTIN_BANK: &str = include_str!("../data/bank.json");

/// Parse and validate a JSON array of questions
pub fn load_bank(json: &str) -> Result<Vec<Question>, QuestionError> {
    let questions: Vec<Question> = serde_json::from_str(json)?;

    for (idx, question) in questions.iter().enumerate() {
        if questions[..idx].iter().any(|other| other.id() == question.id()) {
            return Err(QuestionError::DuplicateQuestion(question.id().to_string()));
        }
        question.validate()?;
    }

    tracing::debug!("Loaded {} questions", questions.len());
    Ok(questions)
}

/// The question bank compiled into the kiosk
pub fn builtin_bank() -> Result<Vec<Question>, QuestionError> {
    load_bank(BUILTIN_BANK)
}

/// Pick up to `count` distinct questions in random order
pub fn select_questions<R: Rng + ?Sized>(
    bank: &[Question],
    count: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut picked = bank.to_vec();
    picked.shuffle(rng);
    picked.truncate(count);
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_builtin_bank_is_valid() {
        let bank = builtin_bank().unwrap();
        let ids: Vec<&str> = bank.iter().map(|q| q.id()).collect();
        assert_eq!(ids, vec!["access_001", "transition_001"]);
    }

    #[test]
    fn test_duplicate_question_ids_rejected() {
        let bank = builtin_bank().unwrap();
        let doubled = serde_json::to_string(&[bank[0].clone(), bank[0].clone()]).unwrap();

        let err = load_bank(&doubled).unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateQuestion(id) if id == "access_001"));
    }

    #[test]
    fn test_invalid_question_fails_whole_bank() {
        let json = r#"[{
            "type": "sequence",
            "id": "broken",
            "theme": "transition",
            "title": "Broken",
            "difficulty": "easy",
            "patient": "-",
            "learning_point": "-",
            "items": [{ "id": "a", "text": "A", "order": 0 }],
            "correct_order": ["a", "b"]
        }]"#;
        assert!(matches!(load_bank(json), Err(QuestionError::OrderMismatch { .. })));
        assert!(matches!(load_bank("{"), Err(QuestionError::Json(_))));
    }

    #[test]
    fn test_select_questions() {
        let bank = builtin_bank().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let one = select_questions(&bank, 1, &mut rng);
        assert_eq!(one.len(), 1);

        let all = select_questions(&bank, 10, &mut rng);
        assert_eq!(all.len(), 2);
        assert_ne!(all[0].id(), all[1].id());
    }
}
