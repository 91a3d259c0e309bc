//! `quizctl` settings, stored as TOML in the user's config directory.
//!
//! ```toml
//! correlation = "by-text-then-position"
//! store_dir = "/home/me/quizzes"
//!
//! [limits]
//! min_questions = 5
//! min_options = 2
//! max_name_length = 100
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quiz_editor::CorrelationStrategy;
use quiz_model::QuizLimits;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: QuizLimits,
    pub correlation: CorrelationStrategy,
    /// Directory of the local quiz store.
    pub store_dir: Option<PathBuf>,
}

impl Config {
    /// Load from `explicit`, or from the default path when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        config.limits.checked().context("invalid [limits]")?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serialize config")?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "quizctl")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("quizctl.toml"))
    }

    /// Store directory from the config, else the platform data directory.
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "quizctl")
                .map(|dirs| dirs.data_dir().join("quizzes"))
                .unwrap_or_else(|| PathBuf::from("quizzes"))
        })
    }
}
