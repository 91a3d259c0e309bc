//! Structured/textual view state for one edited entity.
//!
//! An entity is edited either through structured operations or as JSON text,
//! never both at once. Committing text that does not decode keeps the view in
//! textual mode with the text exactly as typed.

use tracing::warn;

use crate::error::SyncError;

/// JSON text being edited, plus the error from the last failed commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    pub text: String,
    pub error: Option<SyncError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Structured,
    Textual(TextBuffer),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DualView {
    mode: ViewMode,
    /// Text of the last successful commit, or the text rendered on entry.
    last_committed: Option<String>,
}

impl DualView {
    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    #[inline]
    pub fn is_textual(&self) -> bool {
        matches!(self.mode, ViewMode::Textual(_))
    }

    pub fn buffer(&self) -> Option<&TextBuffer> {
        match &self.mode {
            ViewMode::Textual(buffer) => Some(buffer),
            ViewMode::Structured => None,
        }
    }

    pub fn last_committed(&self) -> Option<&str> {
        self.last_committed.as_deref()
    }

    /// Switch to textual mode showing `rendered`. No-op if already textual.
    pub fn enter_textual(&mut self, rendered: String) {
        if self.is_textual() {
            return;
        }
        self.last_committed = Some(rendered.clone());
        self.mode = ViewMode::Textual(TextBuffer {
            text: rendered,
            error: None,
        });
    }

    /// Replace the text being edited. Returns false outside textual mode.
    pub fn edit_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.mode {
            ViewMode::Textual(buffer) => {
                buffer.text = text.into();
                true
            }
            ViewMode::Structured => false,
        }
    }

    /// Decode the buffer with `parse` and, on success, return to structured mode.
    ///
    /// On failure the error is kept on the buffer and the view stays textual.
    /// Returns `None` outside textual mode.
    pub fn commit_with<T, F>(&mut self, parse: F) -> Option<Result<T, SyncError>>
    where
        F: FnOnce(&str) -> Result<T, SyncError>,
    {
        let ViewMode::Textual(buffer) = &mut self.mode else {
            return None;
        };
        match parse(&buffer.text) {
            Ok(value) => {
                self.last_committed = Some(std::mem::take(&mut buffer.text));
                self.mode = ViewMode::Structured;
                Some(Ok(value))
            }
            Err(err) => {
                warn!(error = %err, "refused textual commit");
                buffer.error = Some(err.clone());
                Some(Err(err))
            }
        }
    }

    /// Leave textual mode, restoring the last committed text.
    ///
    /// Returns the restored text, if any.
    pub fn discard(&mut self) -> Option<&str> {
        self.mode = ViewMode::Structured;
        self.last_committed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::parse_question;

    #[test]
    fn failed_commit_keeps_text_and_mode() {
        let mut view = DualView::default();
        view.enter_textual("{}".to_string());
        assert!(view.edit_text("{\"question\": \"Q\",}"));

        let result = view.commit_with(parse_question).unwrap();
        assert!(matches!(result, Err(SyncError::Syntax { .. })));
        let buffer = view.buffer().unwrap();
        assert_eq!(buffer.text, "{\"question\": \"Q\",}");
        assert!(buffer.error.is_some());
        assert_eq!(view.last_committed(), Some("{}"));
    }

    #[test]
    fn successful_commit_becomes_snapshot() {
        let mut view = DualView::default();
        view.enter_textual("old".to_string());
        let text = r#"{"question": "Q", "options": []}"#;
        view.edit_text(text);
        assert!(view.commit_with(parse_question).unwrap().is_ok());
        assert!(!view.is_textual());
        assert_eq!(view.last_committed(), Some(text));
    }

    #[test]
    fn discard_restores_snapshot() {
        let mut view = DualView::default();
        view.enter_textual("snapshot".to_string());
        view.edit_text("garbage");
        assert_eq!(view.discard(), Some("snapshot"));
        assert!(!view.is_textual());
        assert!(!view.edit_text("x"));
        assert!(view.commit_with(parse_question).is_none());
    }
}
