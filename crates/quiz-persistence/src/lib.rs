//! Reconciliation and storage for quizzes.
//!
//! This crate sits between the editor and the backing store:
//!
//! - **Save payloads** that drop temporary ids so the store can assign real ones
//! - **Adoption** of server-returned quizzes with consistent back-references
//! - **Bulk import** of questions from pasted JSON
//! - **Save tracking** that allows a single in-flight save
//! - **Storage** behind the [`QuizStore`] trait, with a local [`FileStore`]
//!
//! # Example
//!
//! ```ignore
//! use quiz_persistence::{FileStore, QuizStore, to_save_payload};
//!
//! let store = FileStore::new("quizzes");
//! let quiz = store.fetch("capitals").await?;
//! let saved = store.update("capitals", to_save_payload(&quiz)).await?;
//! ```

mod error;
mod file_store;
mod import;
mod merge;
mod payload;
mod store;
mod tracker;

pub use error::{ImportError, Result, StoreError};
pub use file_store::FileStore;
pub use import::{UNTITLED_QUESTION, import_questions};
pub use merge::merge_loaded;
pub use payload::{
    CreatePayload, OptionPayload, QuestionPayload, SavePayload, to_create_payload,
    to_save_payload,
};
pub use store::QuizStore;
pub use tracker::SaveTracker;
