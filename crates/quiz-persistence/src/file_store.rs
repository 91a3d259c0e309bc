//! A [`QuizStore`] backed by one JSON file per quiz.
//!
//! Writes go to a temp file that is renamed over the target, so a crash never
//! leaves a half-written quiz behind. The store assigns ids and bumps the
//! version on every update, like a remote backend would.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use quiz_model::entity::SYSTEM_AUTHOR;
use quiz_model::{AuditMetadata, EntityId, Quiz, is_temporary_str};

use crate::error::{Result, StoreError};
use crate::merge::merge_loaded;
use crate::payload::{CreatePayload, SavePayload};
use crate::store::QuizStore;

const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, quiz_id: &str) -> Result<PathBuf> {
        let safe = !quiz_id.is_empty()
            && quiz_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(StoreError::NotFound {
                id: quiz_id.to_string(),
            });
        }
        Ok(self.root.join(format!("{quiz_id}.{EXTENSION}")))
    }

    /// Ids of every stored quiz, sorted.
    pub fn list_ids(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    operation: "list",
                    path: self.root.clone(),
                    source: e,
                });
            }
        };
        let mut ids: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Blocking fetch.
    pub fn load(&self, quiz_id: &str) -> Result<Quiz> {
        let path = self.path_for(quiz_id)?;
        let bytes = fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                StoreError::NotFound {
                    id: quiz_id.to_string(),
                }
            } else {
                StoreError::Io {
                    operation: "read",
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        let quiz: Quiz = serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Deserialization { path, source: e })?;
        Ok(merge_loaded(quiz))
    }

    /// Blocking update.
    pub fn store_update(&self, quiz_id: &str, mut payload: SavePayload) -> Result<Quiz> {
        if is_temporary_str(quiz_id) {
            return Err(StoreError::TemporaryId {
                id: quiz_id.to_string(),
            });
        }
        let existing = self.load(quiz_id)?;
        payload.id = Some(quiz_id.to_string());

        let mut quiz = payload
            .into_quiz_with(assign_id)
            .map_err(|e| StoreError::InvalidId { source: e })?;
        carry_over(&existing, &mut quiz);
        quiz.version = existing
            .version
            .checked_add(1)
            .ok_or_else(|| StoreError::VersionOverflow {
                id: quiz_id.to_string(),
            })?;
        quiz.topic_ids = existing.topic_ids.clone();
        quiz.audit = existing.audit.clone().map(|mut audit| {
            audit.updated_by = Some(SYSTEM_AUTHOR.to_string());
            audit.updated_at = Some(Utc::now());
            audit
        });

        self.write(&quiz)?;
        info!(quiz = %quiz.id, version = quiz.version, "updated quiz");
        Ok(merge_loaded(quiz))
    }

    /// Blocking create.
    pub fn store_create(&self, topic_id: &str, payload: CreatePayload) -> Result<Quiz> {
        let mut quiz = payload
            .into_save_payload()
            .into_quiz_with(assign_id)
            .map_err(|e| StoreError::InvalidId { source: e })?;
        quiz.version = 1;
        quiz.topic_ids = vec![topic_id.to_string()];
        quiz.audit = Some(AuditMetadata::system());
        for question in &mut quiz.questions {
            question.question_version = Some(1);
            question.audit = Some(AuditMetadata::system());
            for option in &mut question.options {
                option.audit = Some(AuditMetadata::system());
            }
        }

        self.write(&quiz)?;
        info!(quiz = %quiz.id, topic = topic_id, "created quiz");
        Ok(merge_loaded(quiz))
    }

    fn write(&self, quiz: &Quiz) -> Result<()> {
        let id = quiz.id.to_wire();
        let path = self.path_for(&id)?;
        let bytes =
            serde_json::to_vec_pretty(quiz).map_err(|e| StoreError::Serialization { source: e })?;

        fs::create_dir_all(&self.root).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::Io {
            operation: "write",
            path: temp_path.clone(),
            source: e,
        })?;
        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), "wrote quiz file");
        Ok(())
    }
}

impl QuizStore for FileStore {
    async fn fetch(&self, quiz_id: &str) -> Result<Quiz> {
        let store = self.clone();
        let quiz_id = quiz_id.to_string();
        tokio::task::spawn_blocking(move || store.load(&quiz_id))
            .await
            .map_err(|e| StoreError::Task { source: e })?
    }

    async fn update(&self, quiz_id: &str, payload: SavePayload) -> Result<Quiz> {
        let store = self.clone();
        let quiz_id = quiz_id.to_string();
        tokio::task::spawn_blocking(move || store.store_update(&quiz_id, payload))
            .await
            .map_err(|e| StoreError::Task { source: e })?
    }

    async fn create(&self, topic_id: &str, payload: CreatePayload) -> Result<Quiz> {
        let store = self.clone();
        let topic_id = topic_id.to_string();
        tokio::task::spawn_blocking(move || store.store_create(&topic_id, payload))
            .await
            .map_err(|e| StoreError::Task { source: e })?
    }
}

/// Store-side id for an entity sent without one.
fn assign_id() -> EntityId {
    EntityId::Persisted(Uuid::new_v4().simple().to_string())
}

/// Keep audit stamps and question versions of entities that already existed.
fn carry_over(existing: &Quiz, quiz: &mut Quiz) {
    for question in &mut quiz.questions {
        let previous = existing.question(&question.id);
        question.question_version = previous
            .and_then(|p| p.question_version)
            .or(Some(1));
        question.justification = previous.and_then(|p| p.justification.clone());
        question.audit = previous
            .and_then(|p| p.audit.clone())
            .or_else(|| Some(AuditMetadata::system()));
        for option in &mut question.options {
            option.audit = previous
                .and_then(|p| p.option(&option.id))
                .and_then(|p| p.audit.clone())
                .or_else(|| Some(AuditMetadata::system()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound { .. })));
        assert!(matches!(store.load("../etc"), Err(StoreError::NotFound { .. })));
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), b"{not json").unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.load("bad"),
            Err(StoreError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_update_temporary_id_is_refused() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let payload = crate::payload::to_save_payload(&Quiz::draft("n", "d"));
        assert!(matches!(
            store.store_update("front-uuid-123", payload),
            Err(StoreError::TemporaryId { .. })
        ));
    }

    #[test]
    fn test_list_ids_skips_other_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.json"), b"{}").unwrap();
        fs::write(dir.path().join("a.json"), b"{}").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.list_ids().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_update_at_max_version_is_refused() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let mut quiz = Quiz::draft("n", "d");
        quiz.id = EntityId::Persisted("maxed".into());
        quiz.version = i64::MAX;
        store.write(&quiz).unwrap();

        let payload = crate::payload::to_save_payload(&quiz);
        assert!(matches!(
            store.store_update("maxed", payload),
            Err(StoreError::VersionOverflow { .. })
        ));
        assert_eq!(store.load("maxed").unwrap().version, i64::MAX);
    }

    #[test]
    fn test_list_ids_on_missing_root() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("absent"));
        assert!(store.list_ids().unwrap().is_empty());
    }
}
