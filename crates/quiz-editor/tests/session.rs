use quiz_editor::{
    CorrelationStrategy, EditorError, EditorFocus, EditorSession, SaveRequest, SyncError,
};
use quiz_model::{EntityId, OptionField, QuestionField, Quiz};
use quiz_persistence::{CreatePayload, FileStore, QuizStore, SavePayload, StoreError};
use quiz_validate::ValidationContext;
use tempfile::tempdir;

fn valid_quiz() -> Quiz {
    let mut quiz = Quiz::draft("Capitals", "European capitals");
    for n in 0..5 {
        quiz = quiz.add_question();
        let question_id = quiz.questions[n].id.clone();
        quiz = quiz
            .set_question_field(&question_id, QuestionField::Text(format!("Question {n}")))
            .add_option(&question_id)
            .add_option(&question_id);
        let options: Vec<EntityId> = quiz.questions[n].options.iter().map(|o| o.id.clone()).collect();
        quiz = quiz
            .set_option_field(&question_id, &options[0], OptionField::Text("Right".into()))
            .set_option_field(&question_id, &options[1], OptionField::Text("Wrong".into()))
            .set_correct_option(&question_id, &options[0]);
    }
    quiz
}

fn session_with(quiz: Quiz) -> EditorSession {
    let mut session = EditorSession::new(CorrelationStrategy::default());
    session.load(quiz);
    session
}

fn ctx() -> ValidationContext {
    ValidationContext::new(Some("geography".to_string()))
}

fn first_question(session: &EditorSession) -> EntityId {
    session.quiz().unwrap().questions[0].id.clone()
}

#[test]
fn invalid_json_leaves_model_unchanged_and_stays_textual() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let before = session.quiz().unwrap().clone();

    session.open_question(&question_id).unwrap();
    session.enter_textual().unwrap();
    let bad = "{\n  \"question\": \"Q\",\n  \"options\": [],\n}";
    session.edit_text(bad).unwrap();

    let err = session.commit_text().unwrap_err();
    assert!(matches!(err, EditorError::Sync(SyncError::Syntax { .. })));
    assert_eq!(session.quiz().unwrap(), &before);
    assert!(session.focus().is_textual());
    assert_eq!(session.text(), Some(bad));
}

#[test]
fn question_commit_keeps_ids_of_unchanged_options() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let original = session.quiz().unwrap().questions[0].clone();

    session.open_question(&question_id).unwrap();
    session.enter_textual().unwrap();
    let text = r#"{
      "question": "Edited",
      "options": [
        {"option": "Right", "answer": {"isCorrect": true}},
        {"option": "Changed", "answer": {"isCorrect": false}},
        {"option": "Added", "answer": {"isCorrect": false, "extras": null}}
      ]
    }"#;
    session.edit_text(text).unwrap();
    session.commit_text().unwrap();

    let question = &session.quiz().unwrap().questions[0];
    assert_eq!(question.id, original.id);
    assert_eq!(question.question, "Edited");
    assert_eq!(question.options[0].id, original.options[0].id);
    // Text changed in place, so position keeps the identity.
    assert_eq!(question.options[1].id, original.options[1].id);
    assert!(question.options[2].id.is_temporary());
    assert_eq!(question.options[2].question_id.as_ref(), Some(&question.id));
    assert!(!session.focus().is_textual());
    assert!(session.tracker().is_dirty());
}

#[test]
fn quiz_commit_keeps_header_identity() {
    let quiz = valid_quiz();
    let mut session = session_with(quiz.clone());
    session.open_quiz().unwrap();
    session.enter_textual().unwrap();
    let text = session.text().unwrap().replace("Capitals", "Capitals 2");
    session.edit_text(text).unwrap();
    session.commit_text().unwrap();

    let committed = session.quiz().unwrap();
    assert_eq!(committed.name, "Capitals 2");
    assert_eq!(committed.id, quiz.id);
    let ids = |q: &Quiz| -> Vec<EntityId> {
        q.questions
            .iter()
            .flat_map(|question| question.options.iter().map(|o| o.id.clone()))
            .collect()
    };
    assert_eq!(ids(committed), ids(&quiz));
}

#[test]
fn discard_restores_structured_mode() {
    let mut session = session_with(valid_quiz());
    let before = session.quiz().unwrap().clone();
    session.open_quiz().unwrap();
    session.enter_textual().unwrap();
    session.edit_text("nonsense").unwrap();
    session.discard_text().unwrap();
    assert!(!session.focus().is_textual());
    assert_eq!(session.quiz().unwrap(), &before);
}

#[test]
fn only_one_entity_can_be_open() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let option_id = session.quiz().unwrap().questions[0].options[0].id.clone();

    session.open_question(&question_id).unwrap();
    session.open_question(&question_id).unwrap();
    assert!(matches!(
        session.open_option(&question_id, &option_id),
        Err(EditorError::FocusBusy { .. })
    ));
    assert!(matches!(session.open_quiz(), Err(EditorError::FocusBusy { .. })));

    session.close();
    session.open_option(&question_id, &option_id).unwrap();
    assert!(matches!(session.focus(), EditorFocus::EditingOption(_)));
}

#[test]
fn structured_edits_are_refused_while_textual() {
    let mut session = session_with(valid_quiz());
    let first = first_question(&session);
    let second = session.quiz().unwrap().questions[1].id.clone();

    session.open_question(&first).unwrap();
    session.enter_textual().unwrap();
    assert!(matches!(
        session.add_option(&first),
        Err(EditorError::TextualModeActive)
    ));
    session.add_option(&second).unwrap();
    assert_eq!(session.quiz().unwrap().questions[1].options.len(), 3);

    session.close();
    session.open_quiz().unwrap();
    session.enter_textual().unwrap();
    assert!(matches!(
        session.set_name("x"),
        Err(EditorError::TextualModeActive)
    ));
    assert!(matches!(
        session.import_questions("[]"),
        Err(EditorError::TextualModeActive)
    ));
}

#[test]
fn option_draft_is_applied_on_request_only() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let option_id = session.quiz().unwrap().questions[0].options[1].id.clone();

    session.open_option(&question_id, &option_id).unwrap();
    session
        .update_option_draft(|draft| draft.option = "Draft text".to_string())
        .unwrap();
    assert_eq!(session.quiz().unwrap().questions[0].options[1].option, "Wrong");

    session.apply_option_draft().unwrap();
    assert_eq!(session.quiz().unwrap().questions[0].options[1].option, "Draft text");
    assert!(!session.focus().is_open());
}

#[test]
fn revert_restores_loaded_state() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    session
        .set_question_field(&question_id, QuestionField::Text("Changed".into()))
        .unwrap();
    session.add_question().unwrap();

    session.revert_question(&question_id).unwrap();
    assert_eq!(session.quiz().unwrap().questions[0].question, "Question 0");
    assert_eq!(session.quiz().unwrap().questions.len(), 6);

    session.revert_quiz().unwrap();
    assert_eq!(session.quiz(), session.original());
}

#[test]
fn removing_open_question_closes_focus() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let option_id = session.quiz().unwrap().questions[0].options[0].id.clone();
    session.open_option(&question_id, &option_id).unwrap();
    session.remove_question(&question_id).unwrap();
    assert!(!session.focus().is_open());
}

#[test]
fn begin_save_chooses_create_or_update() {
    let mut session = session_with(valid_quiz());
    let request = session.begin_save(&ctx()).unwrap();
    assert!(matches!(&request, SaveRequest::Create { topic_id, .. } if topic_id == "geography"));
    assert!(matches!(session.begin_save(&ctx()), Err(EditorError::SaveInFlight)));

    let mut persisted = valid_quiz();
    persisted.id = EntityId::Persisted("quiz-7".into());
    let mut session = session_with(persisted);
    assert!(matches!(
        session.begin_save(&ctx()).unwrap(),
        SaveRequest::Update { quiz_id, .. } if quiz_id == "quiz-7"
    ));
}

#[test]
fn create_uses_trimmed_topic() {
    let mut session = session_with(valid_quiz());
    let ctx = ValidationContext::new(Some("  geography \n".to_string()));
    assert!(matches!(
        session.begin_save(&ctx).unwrap(),
        SaveRequest::Create { topic_id, .. } if topic_id == "geography"
    ));
}

#[test]
fn edits_are_refused_while_saving() {
    let mut session = session_with(valid_quiz());
    let question_id = first_question(&session);
    let SaveRequest::Create { payload, .. } = session.begin_save(&ctx()).unwrap() else {
        panic!("expected a create request");
    };

    assert!(matches!(
        session.set_name("Edited while saving"),
        Err(EditorError::SaveInFlight)
    ));
    assert!(matches!(
        session.import_questions("[]"),
        Err(EditorError::SaveInFlight)
    ));
    assert!(matches!(session.revert_quiz(), Err(EditorError::SaveInFlight)));

    session.open_question(&question_id).unwrap();
    session.enter_textual().unwrap();
    let text = session.text().unwrap().replace("Question 0", "Edited");
    session.edit_text(text).unwrap();
    assert!(matches!(session.commit_text(), Err(EditorError::SaveInFlight)));
    assert!(session.focus().is_textual());

    let mut stored = payload.into_save_payload().into_quiz().unwrap();
    stored.id = EntityId::Persisted("quiz-1".into());
    session.finish_save(Ok(stored)).unwrap();
    assert_eq!(session.quiz().unwrap().name, "Capitals");
    assert!(!session.tracker().is_dirty());

    session.set_name("Edited after saving").unwrap();
    assert!(session.tracker().is_dirty());
}

#[test]
fn invalid_quiz_is_not_saved() {
    let mut session = session_with(Quiz::draft("", "d"));
    let Err(EditorError::Validation(report)) = session.begin_save(&ctx()) else {
        panic!("expected validation failure");
    };
    assert_eq!(report.len(), 2);
    assert!(!session.tracker().is_saving());
}

#[tokio::test]
async fn save_round_trip_through_file_store() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let mut session = session_with(valid_quiz());

    let saved = session.save(&store, &ctx()).await.unwrap().clone();
    assert!(!saved.is_new());
    assert!(saved.questions.iter().all(|q| !q.id.is_temporary()));
    assert!(!session.tracker().is_dirty());

    let question_id = saved.questions[0].id.clone();
    session
        .set_question_field(&question_id, QuestionField::Text("Renamed".into()))
        .unwrap();
    let updated = session.save(&store, &ctx()).await.unwrap();
    assert_eq!(updated.version, 2);
    assert_eq!(updated.questions[0].id, question_id);
    assert_eq!(updated.questions[0].question, "Renamed");
}

struct BrokenStore;

impl QuizStore for BrokenStore {
    async fn fetch(&self, quiz_id: &str) -> Result<Quiz, StoreError> {
        Err(StoreError::NotFound {
            id: quiz_id.to_string(),
        })
    }

    async fn update(&self, quiz_id: &str, _payload: SavePayload) -> Result<Quiz, StoreError> {
        Err(StoreError::NotFound {
            id: quiz_id.to_string(),
        })
    }

    async fn create(&self, topic_id: &str, _payload: CreatePayload) -> Result<Quiz, StoreError> {
        Err(StoreError::NotFound {
            id: topic_id.to_string(),
        })
    }
}

#[tokio::test]
async fn failed_save_leaves_state_unchanged() {
    let mut session = session_with(valid_quiz());
    session.set_name("Edited").unwrap();
    let before = session.quiz().unwrap().clone();

    let err = session.save(&BrokenStore, &ctx()).await.unwrap_err();
    assert!(matches!(err, EditorError::Store(_)));
    assert_eq!(session.quiz().unwrap(), &before);
    assert!(session.tracker().is_dirty());
    assert!(!session.tracker().is_saving());
}
