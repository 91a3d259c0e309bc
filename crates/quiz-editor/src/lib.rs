//! Quiz editing session.
//!
//! # Architecture
//!
//! - `session` - [`EditorSession`], the single owner of the quiz being edited
//! - `focus` - [`EditorFocus`], which entity is open (at most one)
//! - `sync` - [`DualView`], structured vs. JSON text editing of one entity
//! - `projection` - the JSON shape authors edit
//! - `correlate` - re-attaching ids after a JSON commit
//! - `save` - [`SaveRequest`], create or update
//!
//! # Example
//!
//! ```ignore
//! use quiz_editor::{CorrelationStrategy, EditorSession};
//!
//! let mut session = EditorSession::new(CorrelationStrategy::default());
//! session.load(store.fetch("capitals").await?);
//! session.open_question(&question_id)?;
//! session.enter_textual()?;
//! session.edit_text(new_json)?;
//! session.commit_text()?;
//! session.close();
//! session.save(&store, &ctx).await?;
//! ```

mod correlate;
mod error;
mod focus;
mod projection;
mod save;
mod session;
mod sync;

pub use correlate::{CorrelationStrategy, correlate, rebuild_question, rebuild_quiz};
pub use error::{EditorError, Result, SyncError};
pub use focus::{EditorFocus, FocusTarget, OptionDraft, OptionEdit, QuestionEdit, QuizEdit};
pub use projection::{
    AnswerProjection, OptionProjection, QuestionProjection, QuizProjection, parse_question,
    parse_quiz, render_question, render_quiz,
};
pub use save::SaveRequest;
pub use session::EditorSession;
pub use sync::{DualView, TextBuffer, ViewMode};
