//! Per-question checks.

use quiz_model::{Question, QuizLimits};

use crate::issue::Issue;

/// Option count, then correct-answer count, then blank option text.
pub fn check(position: usize, question: &Question, limits: &QuizLimits) -> Vec<Issue> {
    let mut issues = Vec::new();

    let found = question.options.len();
    if found < limits.min_options {
        issues.push(Issue::TooFewOptions {
            question: position,
            found,
            min: limits.min_options,
        });
    }

    let correct = question.correct_count();
    if correct != 1 {
        issues.push(Issue::CorrectOptionCount {
            question: position,
            found: correct,
        });
    }

    if question.options.iter().any(|option| !option.has_text()) {
        issues.push(Issue::BlankOption { question: position });
    }

    issues
}
