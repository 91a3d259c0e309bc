//! Quiz content model.
//!
//! - [`ids`]: temporary and persisted entity identifiers
//! - [`entity`]: the quiz → question → option → answer tree
//! - [`edit`]: immutable edit operations
//! - [`limits`]: save-time limits
//! - [`attempt`]: learner selections and the evaluation payload

#![deny(unsafe_code)]

pub mod attempt;
pub mod edit;
pub mod entity;
pub mod error;
pub mod ids;
pub mod limits;

pub use attempt::{AttemptSheet, EvaluationAnswerPayload, Grade, QuizGradeResponse};
pub use edit::{OptionField, QuestionField};
pub use entity::{
    Answer, AuditMetadata, NEW_OPTION_TEXT, NEW_QUESTION_TEXT, Question, Quiz, QuizOption,
    null_as_default,
};
pub use error::{ModelError, Result};
pub use ids::{
    EntityId, TEMPORARY_ID_PREFIX, is_temporary, is_temporary_str, mint_temporary_id,
};
pub use limits::{MAX_NAME_LENGTH, MIN_OPTIONS, MIN_QUESTIONS, QuizLimits};
