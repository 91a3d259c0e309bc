//! Which entity is open for editing.
//!
//! At most one entity is open at a time. Each variant holds the state that only
//! matters while that entity is open, so closing it drops the state with it.

use std::fmt;

use quiz_model::{Answer, EntityId, QuizOption};

use crate::sync::DualView;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorFocus {
    #[default]
    None,
    EditingQuiz(QuizEdit),
    EditingQuestion(QuestionEdit),
    EditingOption(OptionEdit),
}

/// Whole-quiz editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizEdit {
    pub view: DualView,
}

/// Editing one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionEdit {
    pub question_id: EntityId,
    pub view: DualView,
}

/// Editing one option through a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEdit {
    pub question_id: EntityId,
    pub option_id: EntityId,
    pub draft: OptionDraft,
}

/// Working copy of an option, applied as a whole or dropped on close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDraft {
    pub option: String,
    pub is_correct: bool,
    pub justification: String,
    pub extras: Vec<String>,
}

impl OptionDraft {
    pub fn from_option(option: &QuizOption) -> Self {
        Self {
            option: option.option.clone(),
            is_correct: option.answer.is_correct,
            justification: option.answer.justification.clone(),
            extras: option.answer.extras.clone(),
        }
    }

    /// The option with this draft's content, keeping its identity.
    pub fn apply_to(&self, option: &QuizOption) -> QuizOption {
        QuizOption {
            option: self.option.clone(),
            answer: Answer {
                is_correct: self.is_correct,
                justification: self.justification.clone(),
                extras: self.extras.clone(),
            },
            ..option.clone()
        }
    }
}

/// The open entity, for error reporting and comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget {
    Quiz,
    Question(EntityId),
    Option {
        question_id: EntityId,
        option_id: EntityId,
    },
}

impl fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiz => f.write_str("quiz"),
            Self::Question(id) => write!(f, "question {id}"),
            Self::Option { option_id, .. } => write!(f, "option {option_id}"),
        }
    }
}

impl EditorFocus {
    pub fn target(&self) -> Option<FocusTarget> {
        match self {
            Self::None => None,
            Self::EditingQuiz(_) => Some(FocusTarget::Quiz),
            Self::EditingQuestion(edit) => Some(FocusTarget::Question(edit.question_id.clone())),
            Self::EditingOption(edit) => Some(FocusTarget::Option {
                question_id: edit.question_id.clone(),
                option_id: edit.option_id.clone(),
            }),
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The dual view of the open quiz or question.
    pub fn view(&self) -> Option<&DualView> {
        match self {
            Self::EditingQuiz(edit) => Some(&edit.view),
            Self::EditingQuestion(edit) => Some(&edit.view),
            Self::None | Self::EditingOption(_) => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut DualView> {
        match self {
            Self::EditingQuiz(edit) => Some(&mut edit.view),
            Self::EditingQuestion(edit) => Some(&mut edit.view),
            Self::None | Self::EditingOption(_) => None,
        }
    }

    /// True if the open entity is being edited as text.
    pub fn is_textual(&self) -> bool {
        self.view().is_some_and(DualView::is_textual)
    }

    /// True if this focus involves the given question, including its options.
    pub fn involves_question(&self, question_id: &EntityId) -> bool {
        match self {
            Self::EditingQuestion(edit) => &edit.question_id == question_id,
            Self::EditingOption(edit) => &edit.question_id == question_id,
            Self::None | Self::EditingQuiz(_) => false,
        }
    }
}
