//! Surfacing violations to the author.

use tracing::warn;

use crate::issue::Issue;

/// Receives every violation of a failed validation at once.
pub trait ViolationReporter {
    fn report(&mut self, issues: &[Issue]);
}

/// Logs each violation at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ViolationReporter for TracingReporter {
    fn report(&mut self, issues: &[Issue]) {
        for issue in issues {
            warn!(
                category = issue.category().label(),
                question = issue.question(),
                "{}",
                issue.message()
            );
        }
    }
}

/// Collects messages, for front ends that render them later.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub messages: Vec<String>,
}

impl ViolationReporter for CollectingReporter {
    fn report(&mut self, issues: &[Issue]) {
        self.messages.extend(issues.iter().map(Issue::message));
    }
}
