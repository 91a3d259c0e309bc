//! Learner attempts.
//!
//! An [`AttemptSheet`] records the learner's choice per question and renders the
//! evaluation payload sent to the grading collaborator.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Quiz;
use crate::ids::EntityId;

/// Selections of one learner attempt, at most one option per question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptSheet {
    attempt_id: String,
    selections: BTreeMap<EntityId, EntityId>,
}

impl AttemptSheet {
    pub fn new(attempt_id: impl Into<String>) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            selections: BTreeMap::new(),
        }
    }

    pub fn attempt_id(&self) -> &str {
        &self.attempt_id
    }

    /// Select an option, replacing any earlier choice for that question.
    ///
    /// Returns false when the option does not belong to the question.
    pub fn select(&mut self, quiz: &Quiz, question_id: &EntityId, option_id: &EntityId) -> bool {
        if quiz.option(question_id, option_id).is_none() {
            return false;
        }
        self.selections
            .insert(question_id.clone(), option_id.clone());
        true
    }

    pub fn clear(&mut self, question_id: &EntityId) {
        self.selections.remove(question_id);
    }

    pub fn selected(&self, question_id: &EntityId) -> Option<&EntityId> {
        self.selections.get(question_id)
    }

    /// One-based positions of questions without a selection.
    pub fn unanswered(&self, quiz: &Quiz) -> Vec<usize> {
        quiz.questions
            .iter()
            .enumerate()
            .filter(|(_, question)| !self.selections.contains_key(&question.id))
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Build the answer payload for every question of `quiz`.
    pub fn to_payload(&self, quiz: &Quiz, execution_date: DateTime<Utc>) -> EvaluationAnswerPayload {
        let questions = quiz
            .questions
            .iter()
            .map(|question| {
                let selected = self.selections.get(&question.id);
                AnsweredQuestion {
                    id: question.id.to_wire(),
                    options: question
                        .options
                        .iter()
                        .map(|option| AnsweredOption {
                            id: option.id.to_wire(),
                            is_selected: selected == Some(&option.id),
                        })
                        .collect(),
                }
            })
            .collect();
        EvaluationAnswerPayload {
            execution_date,
            questions,
        }
    }
}

/// Answers submitted for grading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationAnswerPayload {
    pub execution_date: DateTime<Utc>,
    pub questions: Vec<AnsweredQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub id: String,
    pub options: Vec<AnsweredOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnsweredOption {
    pub id: String,
    pub is_selected: bool,
}

/// Grading result returned for an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGradeResponse {
    pub attempt_id: String,
    pub quiz_id: String,
    pub grade: Grade,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub qualification: String,
    pub max_qualification: String,
    pub review_date: String,
}

impl Grade {
    /// Qualification and maximum as numbers, when both parse.
    pub fn score(&self) -> Option<(f64, f64)> {
        let value = self.qualification.trim().parse().ok()?;
        let max = self.max_qualification.trim().parse().ok()?;
        Some((value, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Question;

    fn quiz_with_two_options() -> (Quiz, EntityId, EntityId, EntityId) {
        let quiz = Quiz::draft("Q", "D").add_question();
        let question_id = quiz.questions[0].id.clone();
        let quiz = quiz.add_option(&question_id).add_option(&question_id);
        let question: &Question = &quiz.questions[0];
        let first = question.options[0].id.clone();
        let second = question.options[1].id.clone();
        (quiz, question_id, first, second)
    }

    #[test]
    fn selection_is_exclusive_per_question() {
        let (quiz, question_id, first, second) = quiz_with_two_options();
        let mut sheet = AttemptSheet::new("attempt-1");
        assert!(sheet.select(&quiz, &question_id, &first));
        assert!(sheet.select(&quiz, &question_id, &second));
        assert_eq!(sheet.selected(&question_id), Some(&second));

        let payload = sheet.to_payload(&quiz, Utc::now());
        let flags: Vec<bool> = payload.questions[0]
            .options
            .iter()
            .map(|option| option.is_selected)
            .collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn foreign_option_is_refused() {
        let (quiz, question_id, _, _) = quiz_with_two_options();
        let mut sheet = AttemptSheet::new("attempt-1");
        assert!(!sheet.select(&quiz, &question_id, &EntityId::Persisted("x".into())));
        assert_eq!(sheet.unanswered(&quiz), vec![1]);
    }

    #[test]
    fn grade_score_parses_numbers() {
        let response: QuizGradeResponse = serde_json::from_str(
            r#"{"attemptId":"a","quizId":"q","grade":{"qualification":"7.5","maxQualification":"10","reviewDate":"2024-05-01"}}"#,
        )
        .unwrap();
        assert_eq!(response.grade.score(), Some((7.5, 10.0)));
    }
}
