//! The editing session around one quiz.
//!
//! The session owns the authoritative quiz value. Every change goes through a
//! `quiz_model` edit operation and replaces that value as a whole. The loaded
//! original is kept for a single revert.

use tracing::{debug, info};

use quiz_model::{EntityId, OptionField, Question, QuestionField, Quiz, QuizOption};
use quiz_persistence::{
    QuizStore, SaveTracker, StoreError, merge_loaded, to_create_payload, to_save_payload,
};
use quiz_validate::{ValidationContext, validate_quiz};

use crate::correlate::{CorrelationStrategy, rebuild_question, rebuild_quiz};
use crate::error::{EditorError, Result};
use crate::focus::{EditorFocus, FocusTarget, OptionDraft, OptionEdit, QuestionEdit, QuizEdit};
use crate::projection::{parse_question, parse_quiz, render_question, render_quiz};
use crate::save::SaveRequest;

/// What an edit operation touches, for the textual-mode guard.
enum Touch<'a> {
    Quiz,
    Question(&'a EntityId),
}

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    quiz: Option<Quiz>,
    original: Option<Quiz>,
    focus: EditorFocus,
    strategy: CorrelationStrategy,
    tracker: SaveTracker,
}

impl EditorSession {
    pub fn new(strategy: CorrelationStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn original(&self) -> Option<&Quiz> {
        self.original.as_ref()
    }

    pub fn focus(&self) -> &EditorFocus {
        &self.focus
    }

    pub fn strategy(&self) -> CorrelationStrategy {
        self.strategy
    }

    pub fn tracker(&self) -> &SaveTracker {
        &self.tracker
    }

    /// Adopt a quiz as the authoritative value and the revert target.
    pub fn load(&mut self, quiz: Quiz) {
        let quiz = merge_loaded(quiz);
        info!(quiz = %quiz.id, questions = quiz.questions.len(), "loaded quiz into editor");
        self.original = Some(quiz.clone());
        self.quiz = Some(quiz);
        self.focus = EditorFocus::None;
        self.tracker.mark_clean();
    }

    fn current(&self) -> Result<&Quiz> {
        self.quiz.as_ref().ok_or(EditorError::NoQuiz)
    }

    /// The quiz is frozen while a save is in flight.
    fn ensure_not_saving(&self) -> Result<()> {
        if self.tracker.is_saving() {
            return Err(EditorError::SaveInFlight);
        }
        Ok(())
    }

    fn guard(&self, touch: &Touch<'_>) -> Result<()> {
        self.ensure_not_saving()?;
        let blocked = match (&self.focus, touch) {
            (EditorFocus::EditingQuiz(edit), _) => edit.view.is_textual(),
            (EditorFocus::EditingQuestion(edit), Touch::Question(id)) => {
                edit.view.is_textual() && &edit.question_id == *id
            }
            _ => false,
        };
        if blocked {
            return Err(EditorError::TextualModeActive);
        }
        Ok(())
    }

    fn apply<F>(&mut self, touch: Touch<'_>, edit: F) -> Result<()>
    where
        F: FnOnce(&Quiz) -> Quiz,
    {
        self.guard(&touch)?;
        let next = edit(self.current()?);
        if Some(&next) != self.quiz.as_ref() {
            self.tracker.mark_dirty();
        }
        self.quiz = Some(next);
        self.drop_stale_focus();
        Ok(())
    }

    /// Close the focus if the entity it points at no longer exists.
    fn drop_stale_focus(&mut self) {
        let Some(quiz) = &self.quiz else {
            return;
        };
        let stale = match &self.focus {
            EditorFocus::EditingQuestion(edit) => quiz.question(&edit.question_id).is_none(),
            EditorFocus::EditingOption(edit) => {
                quiz.option(&edit.question_id, &edit.option_id).is_none()
            }
            EditorFocus::None | EditorFocus::EditingQuiz(_) => false,
        };
        if stale {
            debug!("closing focus on removed entity");
            self.focus = EditorFocus::None;
        }
    }

    // Structured edits

    pub fn add_question(&mut self) -> Result<()> {
        self.apply(Touch::Quiz, Quiz::add_question)
    }

    pub fn remove_question(&mut self, question_id: &EntityId) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.remove_question(question_id)
        })
    }

    pub fn add_option(&mut self, question_id: &EntityId) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| quiz.add_option(question_id))
    }

    pub fn remove_option(&mut self, question_id: &EntityId, option_id: &EntityId) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.remove_option(question_id, option_id)
        })
    }

    pub fn set_question_field(&mut self, question_id: &EntityId, field: QuestionField) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.set_question_field(question_id, field)
        })
    }

    pub fn set_option_field(
        &mut self,
        question_id: &EntityId,
        option_id: &EntityId,
        field: OptionField,
    ) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.set_option_field(question_id, option_id, field)
        })
    }

    pub fn replace_question(&mut self, question: Question) -> Result<()> {
        let id = question.id.clone();
        self.apply(Touch::Question(&id), |quiz| quiz.replace_question(question))
    }

    pub fn replace_option(&mut self, question_id: &EntityId, option: QuizOption) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.replace_option(question_id, option)
        })
    }

    pub fn set_correct_option(&mut self, question_id: &EntityId, option_id: &EntityId) -> Result<()> {
        self.apply(Touch::Question(question_id), |quiz| {
            quiz.set_correct_option(question_id, option_id)
        })
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.apply(Touch::Quiz, |quiz| quiz.set_name(name))
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        let description = description.into();
        self.apply(Touch::Quiz, |quiz| quiz.set_description(description))
    }

    /// Append questions from pasted JSON. On error nothing changes.
    pub fn import_questions(&mut self, text: &str) -> Result<()> {
        self.guard(&Touch::Quiz)?;
        let next = quiz_persistence::import_questions(self.current()?, text)?;
        self.quiz = Some(next);
        self.tracker.mark_dirty();
        Ok(())
    }

    // Focus

    fn open(&mut self, target: FocusTarget, focus: EditorFocus) -> Result<()> {
        match self.focus.target() {
            Some(open) if open == target => Ok(()),
            Some(open) => Err(EditorError::FocusBusy { open }),
            None => {
                debug!(%target, "opened for editing");
                self.focus = focus;
                Ok(())
            }
        }
    }

    pub fn open_quiz(&mut self) -> Result<()> {
        self.current()?;
        self.open(FocusTarget::Quiz, EditorFocus::EditingQuiz(QuizEdit::default()))
    }

    pub fn open_question(&mut self, question_id: &EntityId) -> Result<()> {
        if self.current()?.question(question_id).is_none() {
            return Err(EditorError::UnknownEntity {
                id: question_id.clone(),
            });
        }
        self.open(
            FocusTarget::Question(question_id.clone()),
            EditorFocus::EditingQuestion(QuestionEdit {
                question_id: question_id.clone(),
                view: Default::default(),
            }),
        )
    }

    pub fn open_option(&mut self, question_id: &EntityId, option_id: &EntityId) -> Result<()> {
        let option = self
            .current()?
            .option(question_id, option_id)
            .ok_or_else(|| EditorError::UnknownEntity {
                id: option_id.clone(),
            })?;
        let draft = OptionDraft::from_option(option);
        self.open(
            FocusTarget::Option {
                question_id: question_id.clone(),
                option_id: option_id.clone(),
            },
            EditorFocus::EditingOption(OptionEdit {
                question_id: question_id.clone(),
                option_id: option_id.clone(),
                draft,
            }),
        )
    }

    /// Close the open entity, dropping any uncommitted text or draft.
    pub fn close(&mut self) {
        self.focus = EditorFocus::None;
    }

    // Textual editing

    /// Show the open quiz or question as JSON.
    pub fn enter_textual(&mut self) -> Result<()> {
        let rendered = match &self.focus {
            EditorFocus::EditingQuiz(_) => render_quiz(self.current()?),
            EditorFocus::EditingQuestion(edit) => {
                let question = self.current()?.question(&edit.question_id).ok_or_else(|| {
                    EditorError::UnknownEntity {
                        id: edit.question_id.clone(),
                    }
                })?;
                render_question(question)
            }
            EditorFocus::None | EditorFocus::EditingOption(_) => return Err(EditorError::NotOpen),
        };
        if let Some(view) = self.focus.view_mut() {
            view.enter_textual(rendered);
        }
        Ok(())
    }

    /// The JSON text currently being edited.
    pub fn text(&self) -> Option<&str> {
        self.focus
            .view()
            .and_then(|view| view.buffer())
            .map(|buffer| buffer.text.as_str())
    }

    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<()> {
        let view = self.focus.view_mut().ok_or(EditorError::NotOpen)?;
        if view.edit_text(text) {
            Ok(())
        } else {
            Err(EditorError::NotTextual)
        }
    }

    /// Decode the JSON text and adopt it as the structured value.
    ///
    /// On failure the session is unchanged and the text stays as typed.
    pub fn commit_text(&mut self) -> Result<()> {
        self.ensure_not_saving()?;
        let strategy = self.strategy;
        let quiz = self.quiz.as_ref().ok_or(EditorError::NoQuiz)?;
        let next = match &mut self.focus {
            EditorFocus::EditingQuiz(edit) => {
                let projection = edit
                    .view
                    .commit_with(parse_quiz)
                    .ok_or(EditorError::NotTextual)??;
                rebuild_quiz(quiz, projection, strategy)
            }
            EditorFocus::EditingQuestion(edit) => {
                let previous = quiz.question(&edit.question_id).ok_or_else(|| {
                    EditorError::UnknownEntity {
                        id: edit.question_id.clone(),
                    }
                })?;
                let projection = edit
                    .view
                    .commit_with(parse_question)
                    .ok_or(EditorError::NotTextual)??;
                let rebuilt = rebuild_question(previous, projection, strategy);
                quiz.replace_question(rebuilt)
            }
            EditorFocus::None | EditorFocus::EditingOption(_) => return Err(EditorError::NotOpen),
        };
        info!(quiz = %next.id, "committed JSON edit");
        self.quiz = Some(next);
        self.tracker.mark_dirty();
        Ok(())
    }

    /// Leave textual mode without touching the structured value.
    pub fn discard_text(&mut self) -> Result<()> {
        let view = self.focus.view_mut().ok_or(EditorError::NotOpen)?;
        view.discard();
        Ok(())
    }

    // Option drafts

    pub fn option_draft(&self) -> Option<&OptionDraft> {
        match &self.focus {
            EditorFocus::EditingOption(edit) => Some(&edit.draft),
            _ => None,
        }
    }

    pub fn update_option_draft<F>(&mut self, update: F) -> Result<()>
    where
        F: FnOnce(&mut OptionDraft),
    {
        match &mut self.focus {
            EditorFocus::EditingOption(edit) => {
                update(&mut edit.draft);
                Ok(())
            }
            _ => Err(EditorError::NotOpen),
        }
    }

    /// Write the draft into the quiz and close the option.
    pub fn apply_option_draft(&mut self) -> Result<()> {
        self.ensure_not_saving()?;
        let EditorFocus::EditingOption(edit) = &self.focus else {
            return Err(EditorError::NotOpen);
        };
        let option = self
            .current()?
            .option(&edit.question_id, &edit.option_id)
            .ok_or_else(|| EditorError::UnknownEntity {
                id: edit.option_id.clone(),
            })?;
        let replacement = edit.draft.apply_to(option);
        let question_id = edit.question_id.clone();
        self.focus = EditorFocus::None;
        self.replace_option(&question_id, replacement)
    }

    // Revert

    /// Restore one question to its loaded state.
    ///
    /// A question that did not exist when the quiz was loaded is left as is.
    pub fn revert_question(&mut self, question_id: &EntityId) -> Result<()> {
        let Some(original) = self
            .original
            .as_ref()
            .and_then(|quiz| quiz.question(question_id))
            .cloned()
        else {
            debug!(question = %question_id, "revert_question: not in loaded quiz");
            return Ok(());
        };
        self.replace_question(original)
    }

    /// Restore the whole quiz to its loaded state and close any open entity.
    pub fn revert_quiz(&mut self) -> Result<()> {
        self.ensure_not_saving()?;
        let original = self.original.clone().ok_or(EditorError::NoQuiz)?;
        self.quiz = Some(original);
        self.focus = EditorFocus::None;
        self.tracker.mark_clean();
        Ok(())
    }

    // Saving

    /// Validate, reconcile, and claim the save slot.
    pub fn begin_save(&mut self, ctx: &ValidationContext) -> Result<SaveRequest> {
        if self.tracker.is_saving() {
            return Err(EditorError::SaveInFlight);
        }
        let report = validate_quiz(self.quiz.as_ref(), ctx);
        if !report.is_empty() {
            return Err(EditorError::Validation(report));
        }
        let quiz = self.current()?;
        let request = match quiz.id.as_persisted() {
            Some(quiz_id) => SaveRequest::Update {
                quiz_id: quiz_id.to_string(),
                payload: to_save_payload(quiz),
            },
            None => SaveRequest::Create {
                topic_id: ctx
                    .selected_topic
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string(),
                payload: to_create_payload(quiz),
            },
        };
        if !self.tracker.start_save() {
            return Err(EditorError::SaveInFlight);
        }
        Ok(request)
    }

    /// Adopt the stored quiz, or release the save slot on failure.
    pub fn finish_save(&mut self, result: std::result::Result<Quiz, StoreError>) -> Result<()> {
        match result {
            Ok(stored) => {
                let stored = merge_loaded(stored);
                info!(quiz = %stored.id, version = stored.version, "save complete");
                self.original = Some(stored.clone());
                self.quiz = Some(stored);
                self.focus = EditorFocus::None;
                self.tracker.save_complete();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                self.tracker.save_failed();
                Err(err.into())
            }
        }
    }

    /// Validate, reconcile and send the quiz to `store`.
    pub async fn save<S>(&mut self, store: &S, ctx: &ValidationContext) -> Result<&Quiz>
    where
        S: QuizStore + ?Sized,
    {
        let request = self.begin_save(ctx)?;
        let result = request.send(store).await;
        self.finish_save(result)?;
        self.current()
    }
}
