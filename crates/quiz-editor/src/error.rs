//! Editor error types.

use thiserror::Error;

use quiz_model::EntityId;
use quiz_persistence::{ImportError, StoreError};
use quiz_validate::ValidationReport;

use crate::focus::FocusTarget;

/// A textual edit that could not be committed. The text is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// Well-formed JSON that does not have the projection's shape.
    #[error("Unexpected JSON structure: {message}")]
    Shape { message: String },
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Syntax | Category::Eof | Category::Io => Self::Syntax {
                line: err.line(),
                column: err.column(),
                message: err.to_string(),
            },
            Category::Data => Self::Shape {
                message: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No quiz is loaded")]
    NoQuiz,

    #[error("Another entity is already open: {open}")]
    FocusBusy { open: FocusTarget },

    #[error("Nothing is open for editing")]
    NotOpen,

    #[error("The entity is being edited as JSON; commit or discard the text first")]
    TextualModeActive,

    #[error("The open entity is not in JSON mode")]
    NotTextual,

    #[error("No such entity: {id}")]
    UnknownEntity { id: EntityId },

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("The quiz has {} validation issue(s)", .0.len())]
    Validation(ValidationReport),

    #[error("A save is already in progress")]
    SaveInFlight,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, EditorError>;
