//! Save-time validation for quizzes.
//!
//! Rules run in a fixed order and never stop early, so an author sees every
//! problem at once:
//!
//! - **Topic**: a topic has been chosen for the quiz
//! - **Header**: non-blank name within the length limit, non-blank description
//! - **Question count**: at least `min_questions`
//! - **Per question**: at least `min_options`, exactly one correct option, no blank option text
//!
//! # Example
//!
//! ```ignore
//! use quiz_validate::{ValidationContext, validate_quiz};
//!
//! let ctx = ValidationContext::new(Some(topic_id));
//! let report = validate_quiz(Some(&quiz), &ctx);
//! for issue in &report.issues {
//!     println!("[{}] {}", issue.category().label(), issue.message());
//! }
//! ```

mod checks;
mod issue;
mod report;
mod reporter;

use quiz_model::{Quiz, QuizLimits};

pub use issue::{Category, Issue};
pub use report::ValidationReport;
pub use reporter::{CollectingReporter, TracingReporter, ViolationReporter};

/// Inputs that live outside the quiz itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Topic chosen by the author, required before saving.
    pub selected_topic: Option<String>,
    pub limits: QuizLimits,
}

impl ValidationContext {
    pub fn new(selected_topic: Option<String>) -> Self {
        Self {
            selected_topic,
            limits: QuizLimits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: QuizLimits) -> Self {
        self.limits = limits;
        self
    }
}

/// Validate a quiz and return a typed report.
///
/// A missing quiz yields a single [`Issue::NoQuizLoaded`].
pub fn validate_quiz(quiz: Option<&Quiz>, ctx: &ValidationContext) -> ValidationReport {
    match quiz {
        Some(quiz) => checks::run_all(quiz, ctx),
        None => {
            let mut report = ValidationReport::new();
            report.add(Issue::NoQuizLoaded);
            report
        }
    }
}

/// Validate a quiz and return violation messages in rule order.
pub fn validate(quiz: Option<&Quiz>, ctx: &ValidationContext) -> Vec<String> {
    validate_quiz(quiz, ctx).messages()
}

/// Validate and hand all violations to `reporter`.
///
/// Returns true if the quiz may be saved.
pub fn validate_and_report<R>(quiz: Option<&Quiz>, ctx: &ValidationContext, reporter: &mut R) -> bool
where
    R: ViolationReporter + ?Sized,
{
    let report = validate_quiz(quiz, ctx);
    if report.is_empty() {
        return true;
    }
    tracing::debug!(count = report.len(), "validation failed");
    reporter.report(&report.issues);
    false
}
