//! CLI argument definitions for `quizctl`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use quiz_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "quizctl",
    version,
    about = "Validate, edit and save quizzes",
    long_about = "Validate, edit and save quizzes stored as JSON.\n\n\
                  Quizzes can be edited through their JSON projection; ids of unchanged\n\
                  questions and options are kept when the edited text is applied."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` wins over `-v`/`-q`; `RUST_LOG` applies only when neither is given.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.log_file.is_none() && io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            with_ansi: ansi,
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            ..LogConfig::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Check a quiz against the authoring rules.
    Validate(ValidateArgs),

    /// Print the JSON projection of a quiz or one of its questions.
    Project(ProjectArgs),

    /// Apply an edited JSON projection to a quiz.
    Apply(ApplyArgs),

    /// Append questions from a JSON array.
    Import(ImportArgs),

    /// Print the body a save would send.
    Payload(PayloadArgs),

    /// Validate and save a quiz to the local store.
    Save(SaveArgs),

    /// List quizzes in the local store.
    List,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Quiz JSON file.
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    /// Selected topic (default: the quiz's first topic).
    #[arg(long = "topic")]
    pub topic: Option<String>,
}

#[derive(Parser)]
pub struct ProjectArgs {
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    /// One-based question position; the whole quiz when omitted.
    #[arg(long = "question", value_name = "N")]
    pub question: Option<usize>,
}

#[derive(Parser)]
pub struct ApplyArgs {
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    /// Edited projection text.
    #[arg(value_name = "TEXT")]
    pub text: PathBuf,

    /// One-based question position the text belongs to.
    #[arg(long = "question", value_name = "N")]
    pub question: Option<usize>,

    /// How edited options find their previous ids (overrides the config).
    #[arg(long = "correlation", value_enum)]
    pub correlation: Option<CorrelationArg>,

    /// Write the result here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    /// JSON array of questions.
    #[arg(value_name = "QUESTIONS")]
    pub questions: PathBuf,

    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct PayloadArgs {
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    /// Print the create body (no ids) instead of the update body.
    #[arg(long = "create")]
    pub create: bool,
}

#[derive(Parser)]
pub struct SaveArgs {
    #[arg(value_name = "QUIZ")]
    pub quiz: PathBuf,

    #[arg(long = "topic")]
    pub topic: Option<String>,

    /// Write the stored quiz here.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CorrelationArg {
    ByText,
    ByTextThenPosition,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => Self::ERROR,
            LogLevelArg::Warn => Self::WARN,
            LogLevelArg::Info => Self::INFO,
            LogLevelArg::Debug => Self::DEBUG,
            LogLevelArg::Trace => Self::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Compact => Self::Compact,
            LogFormatArg::Json => Self::Json,
        }
    }
}
