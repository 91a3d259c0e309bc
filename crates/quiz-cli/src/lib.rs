//! Library side of `quizctl`: commands, settings, logging and table output.

pub mod commands;
pub mod config;
pub mod logging;
pub mod summary;
