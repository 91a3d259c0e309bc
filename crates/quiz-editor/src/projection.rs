//! Canonical JSON projections of quizzes and questions.
//!
//! A projection carries only author-editable content. Ids, versions, audit
//! data and back-references stay out of the text and are re-attached when the
//! text is committed. Decoding is strict: unknown keys are rejected.

use serde::{Deserialize, Serialize};

use quiz_model::{Question, Quiz, QuizOption, null_as_default};

use crate::error::SyncError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizProjection {
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionProjection {
    pub question: String,
    pub options: Vec<OptionProjection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionProjection {
    pub option: String,
    pub answer: AnswerProjection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnswerProjection {
    pub is_correct: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub justification: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extras: Vec<String>,
}

impl From<&QuizOption> for OptionProjection {
    fn from(option: &QuizOption) -> Self {
        Self {
            option: option.option.clone(),
            answer: AnswerProjection {
                is_correct: option.answer.is_correct,
                justification: option.answer.justification.clone(),
                extras: option.answer.extras.clone(),
            },
        }
    }
}

impl From<&Question> for QuestionProjection {
    fn from(question: &Question) -> Self {
        Self {
            question: question.question.clone(),
            options: question.options.iter().map(OptionProjection::from).collect(),
        }
    }
}

impl From<&Quiz> for QuizProjection {
    fn from(quiz: &Quiz) -> Self {
        Self {
            name: quiz.name.clone(),
            description: quiz.description.clone(),
            questions: quiz.questions.iter().map(QuestionProjection::from).collect(),
        }
    }
}

fn render<T: Serialize>(value: &T) -> String {
    // Plain structs of strings, bools and vectors always serialize.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Pretty JSON (two-space indent) of a question.
pub fn render_question(question: &Question) -> String {
    render(&QuestionProjection::from(question))
}

/// Pretty JSON (two-space indent) of a whole quiz.
pub fn render_quiz(quiz: &Quiz) -> String {
    render(&QuizProjection::from(quiz))
}

pub fn parse_question(text: &str) -> Result<QuestionProjection, SyncError> {
    Ok(serde_json::from_str(text)?)
}

pub fn parse_quiz(text: &str) -> Result<QuizProjection, SyncError> {
    Ok(serde_json::from_str(text)?)
}
