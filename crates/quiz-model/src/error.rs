//! Model error types.

use thiserror::Error;

/// Errors raised when constructing model values from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A persisted identifier was blank.
    #[error("persisted id must not be blank")]
    BlankId,

    /// A persisted identifier carried the reserved temporary prefix.
    #[error("persisted id '{0}' uses the reserved temporary prefix")]
    ReservedPrefix(String),

    /// Limits configuration is inconsistent.
    #[error("invalid limits: {0}")]
    InvalidLimits(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
