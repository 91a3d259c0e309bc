use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use quiz_editor::{CorrelationStrategy, EditorError, EditorSession, render_question, render_quiz};
use quiz_model::{EntityId, Quiz};
use quiz_persistence::{FileStore, merge_loaded, to_create_payload, to_save_payload};
use quiz_validate::{ValidationContext, ValidationReport, validate_quiz};

use crate::config::Config;

/// One row of `quizctl list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredQuiz {
    pub id: String,
    pub name: String,
    pub version: i64,
    pub questions: usize,
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved(Quiz),
    Invalid(ValidationReport),
}

pub fn read_quiz(path: &Path) -> Result<Quiz> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let quiz: Quiz =
        serde_json::from_str(&content).with_context(|| format!("parse quiz {}", path.display()))?;
    Ok(merge_loaded(quiz))
}

/// Pretty JSON to `output`, or stdout when `None`.
pub fn write_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write stdout")?;
        }
    }
    Ok(())
}

/// The explicit topic, else the first topic the quiz already belongs to.
fn topic_for(quiz: &Quiz, topic: Option<&str>) -> Option<String> {
    topic
        .map(str::to_string)
        .or_else(|| quiz.topic_ids.first().cloned())
}

pub fn run_validate(path: &Path, topic: Option<&str>, config: &Config) -> Result<ValidationReport> {
    let quiz = read_quiz(path)?;
    let span = info_span!("validate", quiz = %quiz.id);
    let _guard = span.enter();
    let ctx = ValidationContext::new(topic_for(&quiz, topic)).with_limits(config.limits);
    let report = validate_quiz(Some(&quiz), &ctx);
    for issue in &report {
        warn!(category = issue.category().label(), "{issue}");
    }
    Ok(report)
}

fn question_id(quiz: &Quiz, position: usize) -> Result<EntityId> {
    match position.checked_sub(1).and_then(|index| quiz.questions.get(index)) {
        Some(question) => Ok(question.id.clone()),
        None => bail!(
            "question {position} does not exist (quiz has {} questions)",
            quiz.questions.len()
        ),
    }
}

/// Textual projection of the quiz, or of the question at a one-based position.
pub fn run_project(path: &Path, question: Option<usize>) -> Result<String> {
    let quiz = read_quiz(path)?;
    match question {
        Some(position) => {
            let id = question_id(&quiz, position)?;
            let question = quiz
                .question(&id)
                .with_context(|| format!("question {position}"))?;
            Ok(render_question(question))
        }
        None => Ok(render_quiz(&quiz)),
    }
}

/// Commit edited projection text onto the quiz and return the reconciled result.
pub fn run_apply(
    path: &Path,
    text_path: &Path,
    question: Option<usize>,
    strategy: CorrelationStrategy,
) -> Result<Quiz> {
    let quiz = read_quiz(path)?;
    let text = std::fs::read_to_string(text_path)
        .with_context(|| format!("read {}", text_path.display()))?;

    let mut session = EditorSession::new(strategy);
    session.load(quiz);
    match question {
        Some(position) => {
            let id = question_id(session.quiz().context("no quiz loaded")?, position)?;
            session.open_question(&id)?;
        }
        None => session.open_quiz()?,
    }
    session.enter_textual()?;
    session.edit_text(text)?;
    session
        .commit_text()
        .with_context(|| format!("apply {}", text_path.display()))?;
    session.close();
    info!(strategy = strategy.label(), "applied projection");
    session.quiz().cloned().context("no quiz loaded")
}

pub fn run_import(path: &Path, questions_path: &Path) -> Result<Quiz> {
    let quiz = read_quiz(path)?;
    let text = std::fs::read_to_string(questions_path)
        .with_context(|| format!("read {}", questions_path.display()))?;
    let before = quiz.questions.len();
    let mut session = EditorSession::default();
    session.load(quiz);
    session
        .import_questions(&text)
        .with_context(|| format!("import {}", questions_path.display()))?;
    let quiz = session.quiz().cloned().context("no quiz loaded")?;
    info!(imported = quiz.questions.len() - before, "imported questions");
    Ok(quiz)
}

/// The body that would be sent to the server.
pub fn run_payload(path: &Path, create: bool) -> Result<serde_json::Value> {
    let quiz = read_quiz(path)?;
    let value = if create {
        serde_json::to_value(to_create_payload(&quiz))
    } else {
        serde_json::to_value(to_save_payload(&quiz))
    };
    value.context("serialize payload")
}

/// Save through the local file store.
pub fn run_save(path: &Path, topic: Option<&str>, config: &Config) -> Result<SaveOutcome> {
    let quiz = read_quiz(path)?;
    let ctx = ValidationContext::new(topic_for(&quiz, topic)).with_limits(config.limits);
    let store_dir = config.store_dir();
    std::fs::create_dir_all(&store_dir)
        .with_context(|| format!("create store {}", store_dir.display()))?;
    let store = FileStore::new(store_dir);

    let mut session = EditorSession::new(config.correlation);
    session.load(quiz);
    let runtime = tokio::runtime::Runtime::new().context("start runtime")?;
    match runtime.block_on(session.save(&store, &ctx)) {
        Ok(saved) => Ok(SaveOutcome::Saved(saved.clone())),
        Err(EditorError::Validation(report)) => Ok(SaveOutcome::Invalid(report)),
        Err(err) => Err(err).context("save quiz"),
    }
}

pub fn run_list(config: &Config) -> Result<Vec<StoredQuiz>> {
    let store = FileStore::new(config.store_dir());
    let mut entries = Vec::new();
    for id in store.list_ids().context("list store")? {
        let quiz = store.load(&id).with_context(|| format!("load {id}"))?;
        entries.push(StoredQuiz {
            id,
            name: quiz.name,
            version: quiz.version,
            questions: quiz.questions.len(),
        });
    }
    Ok(entries)
}
