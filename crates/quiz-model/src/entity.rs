//! Quiz entity graph.
//!
//! Ownership is a strict tree: a [`Quiz`] owns its [`Question`]s, which own their
//! [`QuizOption`]s. The `quiz_id` / `question_id` fields are correlation
//! identifiers only.
//!
//! Field names follow the persistence collaborator's camelCase JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::{EntityId, deserialize_id_or_mint, deserialize_optional_id, mint_temporary_id};

/// Author used for entities created inside the editor.
pub const SYSTEM_AUTHOR: &str = "system";

/// Default text of a freshly added question.
pub const NEW_QUESTION_TEXT: &str = "New question";

/// Default text of a freshly added option.
pub const NEW_OPTION_TEXT: &str = "New option";

/// Created/updated bookkeeping attached to each entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    pub created_by: String,
    #[serde(default)]
    pub updated_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuditMetadata {
    /// Audit stamp for an entity created in the editor right now.
    pub fn system() -> Self {
        Self {
            created_by: SYSTEM_AUTHOR.to_string(),
            updated_by: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

/// Correctness and feedback attached to an option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub is_correct: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub justification: String,
    /// Free-form reference links.
    #[serde(default, deserialize_with = "null_as_default")]
    pub extras: Vec<String>,
}

impl Answer {
    /// Extras with blank entries removed.
    pub fn non_blank_extras(&self) -> Vec<String> {
        self.extras
            .iter()
            .filter(|extra| !extra.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// One selectable choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    #[serde(default = "mint_temporary_id", deserialize_with = "deserialize_id_or_mint")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub question_id: Option<EntityId>,
    pub option: String,
    pub answer: Answer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditMetadata>,
}

impl QuizOption {
    /// A blank, incorrect option with a fresh temporary id.
    pub fn new_in(question_id: &EntityId) -> Self {
        Self {
            id: mint_temporary_id(),
            question_id: Some(question_id.clone()),
            option: NEW_OPTION_TEXT.to_string(),
            answer: Answer::default(),
            audit: Some(AuditMetadata::system()),
        }
    }

    #[inline]
    pub fn is_correct(&self) -> bool {
        self.answer.is_correct
    }

    #[inline]
    pub fn has_text(&self) -> bool {
        !self.option.trim().is_empty()
    }
}

/// A prompt with an ordered list of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default = "mint_temporary_id", deserialize_with = "deserialize_id_or_mint")]
    pub id: EntityId,
    pub question: String,
    #[serde(default)]
    pub question_version: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub quiz_id: Option<EntityId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<QuizOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditMetadata>,
}

impl Question {
    /// An empty question with a fresh temporary id.
    pub fn new_in(quiz_id: &EntityId) -> Self {
        Self {
            id: mint_temporary_id(),
            question: NEW_QUESTION_TEXT.to_string(),
            question_version: Some(1),
            quiz_id: Some(quiz_id.clone()),
            options: Vec::new(),
            justification: None,
            audit: Some(AuditMetadata::system()),
        }
    }

    pub fn option(&self, option_id: &EntityId) -> Option<&QuizOption> {
        self.options.iter().find(|option| &option.id == option_id)
    }

    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|option| option.is_correct()).count()
    }

    /// The single correct option, if exactly one is marked.
    pub fn correct_option(&self) -> Option<&QuizOption> {
        let mut correct = self.options.iter().filter(|option| option.is_correct());
        match (correct.next(), correct.next()) {
            (Some(option), None) => Some(option),
            _ => None,
        }
    }
}

/// The top-level gradable document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(default = "mint_temporary_id", deserialize_with = "deserialize_id_or_mint")]
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Server-owned version counter.
    #[serde(default)]
    pub version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub audit: Option<AuditMetadata>,
}

impl Quiz {
    /// A new, unsaved quiz with a temporary id and no questions.
    pub fn draft(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: mint_temporary_id(),
            name: name.into(),
            description: description.into(),
            version: 0,
            topic_ids: Vec::new(),
            questions: Vec::new(),
            audit: Some(AuditMetadata::system()),
        }
    }

    pub fn question(&self, question_id: &EntityId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == question_id)
    }

    /// Zero-based position of a question.
    pub fn question_index(&self, question_id: &EntityId) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| &question.id == question_id)
    }

    pub fn option(&self, question_id: &EntityId, option_id: &EntityId) -> Option<&QuizOption> {
        self.question(question_id)
            .and_then(|question| question.option(option_id))
    }

    /// True if the quiz is not yet known to the backing store.
    pub fn is_new(&self) -> bool {
        self.id.is_temporary()
    }

    /// Total number of options across all questions.
    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|question| question.options.len()).sum()
    }
}

/// Decode `null` as the type's default value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_wire_quiz_with_nulls() {
        let json = r#"{
            "id": "quiz-1",
            "name": "Capitals",
            "description": "European capitals",
            "version": 3,
            "topicIds": ["geo"],
            "questions": [{
                "id": null,
                "question": "Capital of France?",
                "quizId": "quiz-1",
                "options": [{
                    "id": "opt-1",
                    "questionId": null,
                    "option": "Paris",
                    "answer": {"isCorrect": true, "justification": "It is.", "extras": null}
                }]
            }],
            "audit": null
        }"#;
        let quiz: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(quiz.id, EntityId::Persisted("quiz-1".to_string()));
        assert_eq!(quiz.version, 3);
        let question = &quiz.questions[0];
        assert!(question.id.is_temporary());
        assert!(question.options[0].answer.extras.is_empty());
        assert_eq!(question.correct_option().map(|o| o.option.as_str()), Some("Paris"));
    }

    #[test]
    fn non_blank_extras_drops_whitespace_entries() {
        let answer = Answer {
            is_correct: false,
            justification: String::new(),
            extras: vec!["https://a".into(), "   ".into(), String::new()],
        };
        assert_eq!(answer.non_blank_extras(), vec!["https://a".to_string()]);
    }
}
