//! Immutable edit operations.
//!
//! Every operation borrows the current quiz and returns the next value; the
//! caller adopts the result as the new authoritative state. Targeting an id
//! that does not exist returns an unchanged copy.

use tracing::debug;

use crate::entity::{Question, Quiz, QuizOption};
use crate::ids::EntityId;

/// Editable scalar fields of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionField {
    Text(String),
    Justification(Option<String>),
}

/// Editable fields of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionField {
    Text(String),
    /// Sets the flag on this option only; siblings are untouched.
    IsCorrect(bool),
    Justification(String),
    Extras(Vec<String>),
    AddExtra(String),
    /// Remove the extra link at this index (out of range is ignored).
    RemoveExtra(usize),
}

impl QuestionField {
    pub fn apply(self, question: &mut Question) {
        match self {
            Self::Text(text) => question.question = text,
            Self::Justification(justification) => question.justification = justification,
        }
    }
}

impl OptionField {
    pub fn apply(self, option: &mut QuizOption) {
        match self {
            Self::Text(text) => option.option = text,
            Self::IsCorrect(is_correct) => option.answer.is_correct = is_correct,
            Self::Justification(text) => option.answer.justification = text,
            Self::Extras(extras) => option.answer.extras = extras,
            Self::AddExtra(link) => option.answer.extras.push(link),
            Self::RemoveExtra(index) => {
                if index < option.answer.extras.len() {
                    option.answer.extras.remove(index);
                }
            }
        }
    }
}

impl Quiz {
    /// Append a new question with a temporary id.
    #[must_use]
    pub fn add_question(&self) -> Quiz {
        let mut next = self.clone();
        next.questions.push(Question::new_in(&self.id));
        next
    }

    /// Remove a question and, with it, all of its options.
    #[must_use]
    pub fn remove_question(&self, question_id: &EntityId) -> Quiz {
        if self.question(question_id).is_none() {
            debug!(question = %question_id, "remove_question: no such question");
            return self.clone();
        }
        let mut next = self.clone();
        next.questions.retain(|question| &question.id != question_id);
        next
    }

    /// Append a new option to a question.
    #[must_use]
    pub fn add_option(&self, question_id: &EntityId) -> Quiz {
        self.map_question(question_id, "add_option", |question| {
            let option = QuizOption::new_in(&question.id);
            question.options.push(option);
        })
    }

    #[must_use]
    pub fn remove_option(&self, question_id: &EntityId, option_id: &EntityId) -> Quiz {
        self.map_option(question_id, option_id, "remove_option", |question, index| {
            question.options.remove(index);
        })
    }

    #[must_use]
    pub fn set_question_field(&self, question_id: &EntityId, field: QuestionField) -> Quiz {
        self.map_question(question_id, "set_question_field", |question| {
            field.apply(question);
        })
    }

    #[must_use]
    pub fn set_option_field(
        &self,
        question_id: &EntityId,
        option_id: &EntityId,
        field: OptionField,
    ) -> Quiz {
        self.map_option(question_id, option_id, "set_option_field", |question, index| {
            field.apply(&mut question.options[index]);
        })
    }

    /// Replace the question carrying the same id.
    #[must_use]
    pub fn replace_question(&self, replacement: Question) -> Quiz {
        let id = replacement.id.clone();
        self.map_question(&id, "replace_question", |question| {
            *question = replacement;
        })
    }

    /// Replace the option carrying the same id inside `question_id`.
    #[must_use]
    pub fn replace_option(&self, question_id: &EntityId, replacement: QuizOption) -> Quiz {
        let option_id = replacement.id.clone();
        self.map_option(question_id, &option_id, "replace_option", |question, index| {
            question.options[index] = replacement;
        })
    }

    /// Mark one option correct and every sibling incorrect.
    #[must_use]
    pub fn set_correct_option(&self, question_id: &EntityId, option_id: &EntityId) -> Quiz {
        self.map_option(question_id, option_id, "set_correct_option", |question, index| {
            for (position, option) in question.options.iter_mut().enumerate() {
                option.answer.is_correct = position == index;
            }
        })
    }

    #[must_use]
    pub fn set_name(&self, name: impl Into<String>) -> Quiz {
        Quiz {
            name: name.into(),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn set_description(&self, description: impl Into<String>) -> Quiz {
        Quiz {
            description: description.into(),
            ..self.clone()
        }
    }

    fn map_question<F>(&self, question_id: &EntityId, operation: &str, update: F) -> Quiz
    where
        F: FnOnce(&mut Question),
    {
        let mut next = self.clone();
        match next
            .questions
            .iter_mut()
            .find(|question| &question.id == question_id)
        {
            Some(question) => update(question),
            None => debug!(question = %question_id, "{operation}: no such question"),
        }
        next
    }

    fn map_option<F>(
        &self,
        question_id: &EntityId,
        option_id: &EntityId,
        operation: &str,
        update: F,
    ) -> Quiz
    where
        F: FnOnce(&mut Question, usize),
    {
        let mut next = self.clone();
        let Some(question) = next
            .questions
            .iter_mut()
            .find(|question| &question.id == question_id)
        else {
            debug!(question = %question_id, "{operation}: no such question");
            return next;
        };
        match question.options.iter().position(|option| &option.id == option_id) {
            Some(index) => update(question, index),
            None => debug!(
                question = %question_id,
                option = %option_id,
                "{operation}: no such option"
            ),
        }
        next
    }
}
