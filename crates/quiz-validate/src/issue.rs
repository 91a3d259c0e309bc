//! Validation issue types.
//!
//! Each variant carries only the data its message needs. Question positions are
//! one-based, matching how authors count them.

use serde::{Deserialize, Serialize};

/// Which part of the quiz an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Nothing loaded or no topic chosen.
    Context,
    /// Quiz name and description.
    Header,
    /// Number of questions or options.
    Structure,
    /// Correct-answer marking.
    Correctness,
    /// Option and question text.
    Content,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Context => "Context",
            Self::Header => "Header",
            Self::Structure => "Structure",
            Self::Correctness => "Correctness",
            Self::Content => "Content",
        }
    }
}

/// A single save-blocking violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Issue {
    NoQuizLoaded,
    TopicNotSelected,
    NameMissing,
    NameTooLong { length: usize, max: usize },
    DescriptionMissing,
    TooFewQuestions { found: usize, min: usize },
    TooFewOptions { question: usize, found: usize, min: usize },
    /// Zero or several options are marked correct.
    CorrectOptionCount { question: usize, found: usize },
    BlankOption { question: usize },
}

impl Issue {
    pub fn category(&self) -> Category {
        match self {
            Issue::NoQuizLoaded | Issue::TopicNotSelected => Category::Context,
            Issue::NameMissing | Issue::NameTooLong { .. } | Issue::DescriptionMissing => {
                Category::Header
            }
            Issue::TooFewQuestions { .. } | Issue::TooFewOptions { .. } => Category::Structure,
            Issue::CorrectOptionCount { .. } => Category::Correctness,
            Issue::BlankOption { .. } => Category::Content,
        }
    }

    /// One-based question position, for per-question issues.
    pub fn question(&self) -> Option<usize> {
        match self {
            Issue::TooFewOptions { question, .. }
            | Issue::CorrectOptionCount { question, .. }
            | Issue::BlankOption { question } => Some(*question),
            _ => None,
        }
    }

    /// Message shown to the author.
    pub fn message(&self) -> String {
        match self {
            Issue::NoQuizLoaded => "No quiz is loaded.".to_string(),
            Issue::TopicNotSelected => "A topic must be selected.".to_string(),
            Issue::NameMissing => "The quiz must have a name.".to_string(),
            Issue::NameTooLong { length, max } => format!(
                "The quiz name must be at most {max} characters (found {length})."
            ),
            Issue::DescriptionMissing => "The quiz must have a description.".to_string(),
            Issue::TooFewQuestions { min, .. } => {
                format!("The quiz must have at least {min} questions.")
            }
            Issue::TooFewOptions { question, min, .. } => {
                format!("Question {question} must have at least {min} options.")
            }
            Issue::CorrectOptionCount { question, .. } => {
                format!("Question {question} must have exactly one correct option.")
            }
            Issue::BlankOption { question } => {
                format!("All options of question {question} must have text.")
            }
        }
    }
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}
