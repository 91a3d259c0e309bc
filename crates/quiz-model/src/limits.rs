//! Save-time limits for quiz content.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Minimum number of questions a quiz needs before it can be saved.
pub const MIN_QUESTIONS: usize = 5;

/// Minimum number of options each question needs before it can be saved.
pub const MIN_OPTIONS: usize = 2;

/// Maximum length of a quiz name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Configurable limits checked by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizLimits {
    pub min_questions: usize,
    pub min_options: usize,
    pub max_name_length: usize,
}

impl Default for QuizLimits {
    fn default() -> Self {
        Self {
            min_questions: MIN_QUESTIONS,
            min_options: MIN_OPTIONS,
            max_name_length: MAX_NAME_LENGTH,
        }
    }
}

impl QuizLimits {
    /// Reject limits that no quiz could ever satisfy.
    pub fn checked(self) -> Result<Self> {
        if self.max_name_length == 0 {
            return Err(ModelError::InvalidLimits(
                "max_name_length must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let limits = QuizLimits::default();
        assert_eq!(limits.min_questions, 5);
        assert_eq!(limits.min_options, 2);
        assert_eq!(limits.max_name_length, 100);
    }

    #[test]
    fn zero_name_length_is_rejected() {
        let limits = QuizLimits {
            max_name_length: 0,
            ..QuizLimits::default()
        };
        assert!(limits.checked().is_err());
    }
}
