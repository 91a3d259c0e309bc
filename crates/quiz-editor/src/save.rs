//! Save requests handed to the backing store.

use quiz_model::Quiz;
use quiz_persistence::{CreatePayload, QuizStore, SavePayload, StoreError};
use tracing::info;

/// What a save sends, decided by whether the quiz is known to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create {
        topic_id: String,
        payload: CreatePayload,
    },
    Update {
        quiz_id: String,
        payload: SavePayload,
    },
}

impl SaveRequest {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create { .. })
    }

    /// Send the request and return the quiz as stored.
    pub async fn send<S>(self, store: &S) -> Result<Quiz, StoreError>
    where
        S: QuizStore + ?Sized,
    {
        match self {
            Self::Create { topic_id, payload } => {
                info!(topic = %topic_id, "creating quiz");
                store.create(&topic_id, payload).await
            }
            Self::Update { quiz_id, payload } => {
                info!(quiz = %quiz_id, "updating quiz");
                store.update(&quiz_id, payload).await
            }
        }
    }
}
