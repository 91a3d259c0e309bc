//! Bulk question import from pasted JSON.

use serde::Deserialize;
use tracing::info;

use quiz_model::{
    Answer, AuditMetadata, Question, Quiz, QuizOption, mint_temporary_id, null_as_default,
};

use crate::error::ImportError;

/// Text used when an imported question has none.
pub const UNTITLED_QUESTION: &str = "Untitled question";

#[derive(Debug, Deserialize)]
struct ImportedQuestion {
    #[serde(default, deserialize_with = "null_as_default")]
    question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    options: Vec<ImportedOption>,
}

#[derive(Debug, Deserialize)]
struct ImportedOption {
    #[serde(default, deserialize_with = "null_as_default")]
    option: String,
    #[serde(default, deserialize_with = "null_as_default")]
    answer: ImportedAnswer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedAnswer {
    #[serde(default, deserialize_with = "null_as_default")]
    is_correct: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    justification: String,
    #[serde(default, deserialize_with = "null_as_default")]
    extras: Vec<String>,
}

/// Append the questions described by `text` to `quiz`.
///
/// `text` must be a JSON array. Every imported question and option gets a fresh
/// temporary id. On error the quiz is not touched.
pub fn import_questions(quiz: &Quiz, text: &str) -> Result<Quiz, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(ImportError::NotAnArray);
    }
    let imported: Vec<ImportedQuestion> = serde_json::from_value(value)?;

    let mut next = quiz.clone();
    let count = imported.len();
    next.questions
        .extend(imported.into_iter().map(|item| build_question(&quiz.id, item)));
    info!(quiz = %quiz.id, count, "imported questions");
    Ok(next)
}

fn build_question(quiz_id: &quiz_model::EntityId, item: ImportedQuestion) -> Question {
    let id = mint_temporary_id();
    let text = if item.question.trim().is_empty() {
        UNTITLED_QUESTION.to_string()
    } else {
        item.question
    };
    let options = item
        .options
        .into_iter()
        .map(|option| QuizOption {
            id: mint_temporary_id(),
            question_id: Some(id.clone()),
            option: option.option,
            answer: Answer {
                is_correct: option.answer.is_correct,
                justification: option.answer.justification,
                extras: option.answer.extras,
            },
            audit: Some(AuditMetadata::system()),
        })
        .collect();
    Question {
        id,
        question: text,
        question_version: Some(1),
        quiz_id: Some(quiz_id.clone()),
        options,
        justification: None,
        audit: Some(AuditMetadata::system()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let quiz = Quiz::draft("n", "d");
        let next = import_questions(&quiz, r#"[{}, {"question": "Q", "options": [{}]}]"#).unwrap();
        assert_eq!(next.questions[0].question, UNTITLED_QUESTION);
        assert!(next.questions[0].options.is_empty());
        let option = &next.questions[1].options[0];
        assert_eq!(option.option, "");
        assert!(!option.is_correct());
        assert_eq!(option.question_id.as_ref(), Some(&next.questions[1].id));
    }

    #[test]
    fn object_is_not_an_array() {
        let quiz = Quiz::draft("n", "d");
        assert!(matches!(
            import_questions(&quiz, r#"{"question": "Q"}"#),
            Err(ImportError::NotAnArray)
        ));
    }

    #[test]
    fn syntax_error_reports_position() {
        let quiz = Quiz::draft("n", "d");
        let err = import_questions(&quiz, "[\n  {\"question\": \"Q\",}\n]").unwrap_err();
        assert!(matches!(err, ImportError::Syntax { line: 2, .. }));
    }

    #[test]
    fn wrong_types_are_shape_errors() {
        let quiz = Quiz::draft("n", "d");
        let err = import_questions(&quiz, r#"[{"question": 3}]"#).unwrap_err();
        assert!(matches!(err, ImportError::Shape { .. }));
    }
}
