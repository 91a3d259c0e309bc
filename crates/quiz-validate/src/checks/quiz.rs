//! Quiz-level checks: topic, header fields and question count.

use quiz_model::{Quiz, QuizLimits};

use crate::ValidationContext;
use crate::issue::Issue;

pub fn check_topic(ctx: &ValidationContext) -> Option<Issue> {
    let selected = ctx
        .selected_topic
        .as_deref()
        .is_some_and(|topic| !topic.trim().is_empty());
    (!selected).then_some(Issue::TopicNotSelected)
}

/// Name presence and length, then description presence.
pub fn check_header(quiz: &Quiz, limits: &QuizLimits) -> Vec<Issue> {
    let mut issues = Vec::new();

    let name = quiz.name.trim();
    if name.is_empty() {
        issues.push(Issue::NameMissing);
    } else {
        let length = name.chars().count();
        if length > limits.max_name_length {
            issues.push(Issue::NameTooLong {
                length,
                max: limits.max_name_length,
            });
        }
    }

    if quiz.description.trim().is_empty() {
        issues.push(Issue::DescriptionMissing);
    }

    issues
}

pub fn check_question_count(quiz: &Quiz, limits: &QuizLimits) -> Option<Issue> {
    let found = quiz.questions.len();
    (found < limits.min_questions).then_some(Issue::TooFewQuestions {
        found,
        min: limits.min_questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_topic_counts_as_missing() {
        let ctx = ValidationContext::new(Some("  ".to_string()));
        assert_eq!(check_topic(&ctx), Some(Issue::TopicNotSelected));
        let ctx = ValidationContext::new(Some("geo".to_string()));
        assert_eq!(check_topic(&ctx), None);
    }

    #[test]
    fn name_length_counts_characters() {
        let limits = QuizLimits {
            max_name_length: 3,
            ..QuizLimits::default()
        };
        let quiz = Quiz::draft("ÄÖÜ", "d");
        assert!(check_header(&quiz, &limits).is_empty());
        let quiz = Quiz::draft("ÄÖÜß", "d");
        assert_eq!(
            check_header(&quiz, &limits),
            vec![Issue::NameTooLong { length: 4, max: 3 }]
        );
    }

    #[test]
    fn blank_name_skips_length_check() {
        let limits = QuizLimits {
            max_name_length: 1,
            ..QuizLimits::default()
        };
        let quiz = Quiz::draft("     ", "");
        assert_eq!(
            check_header(&quiz, &limits),
            vec![Issue::NameMissing, Issue::DescriptionMissing]
        );
    }
}
