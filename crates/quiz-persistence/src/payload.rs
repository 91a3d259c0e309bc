//! Outgoing payloads.
//!
//! A save payload keeps only the fields the backing store accepts. Entities
//! with temporary ids are sent without an `id` so the store assigns one.

use serde::{Deserialize, Serialize};

use quiz_model::{Answer, EntityId, Question, Quiz, QuizOption, mint_temporary_id};

/// Body of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionPayload>,
}

/// Body of a create. Carries no identifiers at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayload {
    pub name: String,
    pub description: String,
    pub questions: Vec<QuestionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    #[serde(default)]
    pub options: Vec<OptionPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub option: String,
    pub answer: Answer,
}

fn wire_id(id: &EntityId) -> Option<String> {
    id.as_persisted().map(str::to_string)
}

fn option_payload(option: &QuizOption) -> OptionPayload {
    OptionPayload {
        id: wire_id(&option.id),
        option: option.option.clone(),
        answer: Answer {
            is_correct: option.answer.is_correct,
            justification: option.answer.justification.clone(),
            extras: option.answer.non_blank_extras(),
        },
    }
}

fn question_payload(question: &Question) -> QuestionPayload {
    QuestionPayload {
        id: wire_id(&question.id),
        question: question.question.clone(),
        options: question.options.iter().map(option_payload).collect(),
    }
}

/// Strip a quiz down to its update payload.
pub fn to_save_payload(quiz: &Quiz) -> SavePayload {
    SavePayload {
        id: wire_id(&quiz.id),
        name: quiz.name.clone(),
        description: quiz.description.clone(),
        questions: quiz.questions.iter().map(question_payload).collect(),
    }
}

/// Strip a quiz down to its create payload.
pub fn to_create_payload(quiz: &Quiz) -> CreatePayload {
    let strip = |mut question: QuestionPayload| {
        question.id = None;
        for option in &mut question.options {
            option.id = None;
        }
        question
    };
    CreatePayload {
        name: quiz.name.clone(),
        description: quiz.description.clone(),
        questions: quiz
            .questions
            .iter()
            .map(question_payload)
            .map(strip)
            .collect(),
    }
}

impl SavePayload {
    /// Rebuild a quiz, minting temporary ids for entities sent without one.
    pub fn into_quiz(self) -> quiz_model::Result<Quiz> {
        self.into_quiz_with(mint_temporary_id)
    }

    /// Rebuild a quiz, calling `mint` for every missing id.
    pub fn into_quiz_with<F>(self, mut mint: F) -> quiz_model::Result<Quiz>
    where
        F: FnMut() -> EntityId,
    {
        let mut resolve = |id: Option<String>| match id {
            Some(raw) => EntityId::parse(&raw),
            None => Ok(mint()),
        };

        let quiz_id = resolve(self.id)?;
        let mut questions = Vec::with_capacity(self.questions.len());
        for question in self.questions {
            let question_id = resolve(question.id)?;
            let mut options = Vec::with_capacity(question.options.len());
            for option in question.options {
                options.push(QuizOption {
                    id: resolve(option.id)?,
                    question_id: Some(question_id.clone()),
                    option: option.option,
                    answer: option.answer,
                    audit: None,
                });
            }
            questions.push(Question {
                id: question_id,
                question: question.question,
                question_version: None,
                quiz_id: Some(quiz_id.clone()),
                options,
                justification: None,
                audit: None,
            });
        }

        Ok(Quiz {
            id: quiz_id,
            name: self.name,
            description: self.description,
            version: 0,
            topic_ids: Vec::new(),
            questions,
            audit: None,
        })
    }
}

impl CreatePayload {
    /// Same content as an update payload without any ids.
    pub fn into_save_payload(self) -> SavePayload {
        SavePayload {
            id: None,
            name: self.name,
            description: self.description,
            questions: self.questions,
        }
    }
}
