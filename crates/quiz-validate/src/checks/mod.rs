//! Individual validation checks, run in a fixed order.

pub mod question;
pub mod quiz;

use quiz_model::Quiz;

use crate::ValidationContext;
use crate::report::ValidationReport;

/// Run every check against a loaded quiz.
pub fn run_all(quiz: &Quiz, ctx: &ValidationContext) -> ValidationReport {
    let mut report = ValidationReport::new();
    report.extend(quiz::check_topic(ctx));
    report.extend(quiz::check_header(quiz, &ctx.limits));
    report.extend(quiz::check_question_count(quiz, &ctx.limits));
    for (index, question) in quiz.questions.iter().enumerate() {
        report.extend(question::check(index + 1, question, &ctx.limits));
    }
    report
}
