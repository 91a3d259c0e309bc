//! The persistence collaborator seen from the editor.

use std::future::Future;

use quiz_model::Quiz;

use crate::error::Result;
use crate::payload::{CreatePayload, SavePayload};

/// Backing store for quizzes.
///
/// Every method resolves to the quiz as the store now holds it, with
/// store-assigned ids for entities that were sent without one.
pub trait QuizStore {
    /// Load a quiz by its persisted id.
    fn fetch(&self, quiz_id: &str) -> impl Future<Output = Result<Quiz>> + Send;

    /// Replace an existing quiz.
    fn update(&self, quiz_id: &str, payload: SavePayload)
    -> impl Future<Output = Result<Quiz>> + Send;

    /// Create a quiz under a topic.
    fn create(
        &self,
        topic_id: &str,
        payload: CreatePayload,
    ) -> impl Future<Output = Result<Quiz>> + Send;
}
