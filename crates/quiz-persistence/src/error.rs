//! Persistence error types.
//!
//! Store operations return structured errors that provide user-friendly
//! messages and optional remediation hints.

use std::path::PathBuf;

use thiserror::Error;

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Quiz {id} was not found")]
    NotFound { id: String },

    /// An update was requested for a quiz the store has never seen.
    #[error("Quiz id {id} is temporary and cannot be updated")]
    TemporaryId { id: String },

    #[error("Failed to serialize quiz data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Stored file is not a valid quiz document.
    #[error("Failed to read quiz data from {path}")]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored version cannot be incremented.
    #[error("Quiz {id} has reached its maximum version")]
    VersionOverflow { id: String },

    /// Stored data carried an unusable identifier.
    #[error("Invalid identifier in stored quiz")]
    InvalidId {
        #[source]
        source: quiz_model::ModelError,
    },

    /// Temp file could not be renamed over the target.
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blocking worker panicked or was cancelled.
    #[error("Background store task failed")]
    Task {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => format!("Could not {} the file at {}", operation, path.display()),
            Self::NotFound { id } => format!("No quiz with id '{id}' exists."),
            Self::TemporaryId { .. } => {
                "This quiz has not been created yet, so it cannot be updated.".to_string()
            }
            Self::Serialization { .. } => {
                "An error occurred while saving the quiz data.".to_string()
            }
            Self::Deserialization { path, .. } => format!(
                "The quiz stored at {} could not be read. The file may be corrupted.",
                path.display()
            ),
            Self::InvalidId { .. } => "The stored quiz contains an invalid identifier.".to_string(),
            Self::VersionOverflow { id } => {
                format!("Quiz '{id}' cannot be updated any further.")
            }
            Self::AtomicWriteFailed { target_path, .. } => format!(
                "Could not save the file to {}. Please check disk space and permissions.",
                target_path.display()
            ),
            Self::Task { .. } => "The save was interrupted.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::NotFound { .. } => Some("Check the quiz id, or create the quiz first.".into()),
            Self::TemporaryId { .. } => Some("Save the quiz as a new quiz under a topic.".into()),
            Self::Deserialization { .. } => Some("Try restoring a backup if you have one.".into()),
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
            Self::Task { .. } => Some("Try saving again.".into()),
            Self::VersionOverflow { .. } => Some("Save the quiz as a new quiz.".into()),
            Self::Serialization { .. } | Self::InvalidId { .. } => None,
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Bulk question import error. The quiz is left unchanged.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid JSON at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("The JSON must be an array of questions")]
    NotAnArray,

    #[error("Invalid question data: {message}")]
    Shape { message: String },
}

impl From<serde_json::Error> for ImportError {
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
