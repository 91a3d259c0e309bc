//! Re-attaching identity to entities rebuilt from JSON text.
//!
//! The projection text carries no ids, so after a commit each rebuilt entity is
//! matched against the entities it replaces. A matched entity keeps its id and
//! audit data; an unmatched one is new and gets a temporary id.
//!
//! Each predecessor can be claimed once, so two rebuilt entities never share an
//! id. Two entries with identical text that swap places may swap identities.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quiz_model::{Answer, AuditMetadata, Question, Quiz, QuizOption, mint_temporary_id};

use crate::projection::{OptionProjection, QuestionProjection, QuizProjection};

/// How rebuilt entities are matched to their predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CorrelationStrategy {
    /// Identical text only.
    ByText,
    /// Identical text, then the unclaimed predecessor at the same position.
    #[default]
    ByTextThenPosition,
}

impl CorrelationStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ByText => "by-text",
            Self::ByTextThenPosition => "by-text-then-position",
        }
    }
}

/// For each rebuilt text, the index of the predecessor it inherits from.
pub fn correlate(
    previous: &[&str],
    rebuilt: &[&str],
    strategy: CorrelationStrategy,
) -> Vec<Option<usize>> {
    let mut claimed = vec![false; previous.len()];
    let mut matches = vec![None; rebuilt.len()];

    for (index, text) in rebuilt.iter().enumerate() {
        let found = previous
            .iter()
            .enumerate()
            .find(|(candidate, prev)| !claimed[*candidate] && *prev == text)
            .map(|(candidate, _)| candidate);
        if let Some(candidate) = found {
            claimed[candidate] = true;
            matches[index] = Some(candidate);
        }
    }

    if strategy == CorrelationStrategy::ByTextThenPosition {
        for (index, slot) in matches.iter_mut().enumerate() {
            if slot.is_none() && index < previous.len() && !claimed[index] {
                claimed[index] = true;
                *slot = Some(index);
            }
        }
    }

    matches
}

fn rebuild_options(
    previous: &Question,
    options: Vec<OptionProjection>,
    strategy: CorrelationStrategy,
) -> Vec<QuizOption> {
    let matches = {
        let before: Vec<&str> = previous.options.iter().map(|o| o.option.as_str()).collect();
        let after: Vec<&str> = options.iter().map(|o| o.option.as_str()).collect();
        correlate(&before, &after, strategy)
    };

    options
        .into_iter()
        .zip(matches)
        .map(|(projection, matched)| {
            let predecessor = matched.map(|index| &previous.options[index]);
            let (id, audit) = match predecessor {
                Some(option) => (option.id.clone(), option.audit.clone()),
                None => {
                    debug!(question = %previous.id, text = %projection.option, "new option from text");
                    (mint_temporary_id(), Some(AuditMetadata::system()))
                }
            };
            QuizOption {
                id,
                question_id: Some(previous.id.clone()),
                option: projection.option,
                answer: Answer {
                    is_correct: projection.answer.is_correct,
                    justification: projection.answer.justification,
                    extras: projection.answer.extras,
                },
                audit,
            }
        })
        .collect()
}

/// Rebuild a question from its projection, keeping its own identity.
pub fn rebuild_question(
    previous: &Question,
    projection: QuestionProjection,
    strategy: CorrelationStrategy,
) -> Question {
    Question {
        id: previous.id.clone(),
        question: projection.question,
        question_version: previous.question_version,
        quiz_id: previous.quiz_id.clone(),
        options: rebuild_options(previous, projection.options, strategy),
        justification: previous.justification.clone(),
        audit: previous.audit.clone(),
    }
}

/// Rebuild a quiz from its projection.
///
/// Questions are correlated first, then options within each matched question.
pub fn rebuild_quiz(
    previous: &Quiz,
    projection: QuizProjection,
    strategy: CorrelationStrategy,
) -> Quiz {
    let matches = {
        let before: Vec<&str> = previous.questions.iter().map(|q| q.question.as_str()).collect();
        let after: Vec<&str> = projection.questions.iter().map(|q| q.question.as_str()).collect();
        correlate(&before, &after, strategy)
    };

    let questions = projection
        .questions
        .into_iter()
        .zip(matches)
        .map(|(question, matched)| match matched {
            Some(index) => rebuild_question(&previous.questions[index], question, strategy),
            None => {
                debug!(quiz = %previous.id, text = %question.question, "new question from text");
                rebuild_question(&Question::new_in(&previous.id), question, strategy)
            }
        })
        .collect();

    Quiz {
        id: previous.id.clone(),
        name: projection.name,
        description: projection.description,
        version: previous.version,
        topic_ids: previous.topic_ids.clone(),
        questions,
        audit: previous.audit.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_texts_claim_distinct_predecessors() {
        let matches = correlate(&["a", "a", "b"], &["a", "a", "a"], CorrelationStrategy::ByText);
        assert_eq!(matches, vec![Some(0), Some(1), None]);
    }

    #[test]
    fn position_fallback_skips_claimed_slots() {
        // "a" moved to position 1 and claimed slot 0 by text.
        let matches = correlate(
            &["a", "b"],
            &["c", "a"],
            CorrelationStrategy::ByTextThenPosition,
        );
        assert_eq!(matches, vec![None, Some(0)]);
    }

    #[test]
    fn by_text_leaves_edited_entries_new() {
        let matches = correlate(&["a", "b"], &["a", "c"], CorrelationStrategy::ByText);
        assert_eq!(matches, vec![Some(0), None]);
        let matches = correlate(&["a", "b"], &["a", "c"], CorrelationStrategy::ByTextThenPosition);
        assert_eq!(matches, vec![Some(0), Some(1)]);
    }

    #[test]
    fn appended_entries_are_new() {
        let matches = correlate(&["a"], &["a", "x", "y"], CorrelationStrategy::ByTextThenPosition);
        assert_eq!(matches, vec![Some(0), None, None]);
    }
}
