//! `quizctl`: quiz authoring from the command line.

use anyhow::Result;
use clap::Parser;
use quiz_cli::commands::{
    SaveOutcome, run_apply, run_import, run_list, run_payload, run_project, run_save,
    run_validate, write_json,
};
use quiz_cli::config::Config;
use quiz_cli::logging::init_logging;
use quiz_cli::summary::{issues_table, quiz_table, store_table};
use quiz_editor::CorrelationStrategy;

mod cli;

use crate::cli::{Cli, Command, CorrelationArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config();
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Validate(args) => {
            let report = run_validate(&args.quiz, args.topic.as_deref(), &config)?;
            if report.is_empty() {
                println!("{}: ready to save", args.quiz.display());
                Ok(0)
            } else {
                println!("{}", issues_table(&report));
                Ok(1)
            }
        }
        Command::Project(args) => {
            println!("{}", run_project(&args.quiz, args.question)?);
            Ok(0)
        }
        Command::Apply(args) => {
            let strategy = match args.correlation {
                Some(CorrelationArg::ByText) => CorrelationStrategy::ByText,
                Some(CorrelationArg::ByTextThenPosition) => CorrelationStrategy::ByTextThenPosition,
                None => config.correlation,
            };
            let quiz = run_apply(&args.quiz, &args.text, args.question, strategy)?;
            write_json(&quiz, args.output.as_deref())?;
            Ok(0)
        }
        Command::Import(args) => {
            let quiz = run_import(&args.quiz, &args.questions)?;
            write_json(&quiz, args.output.as_deref())?;
            Ok(0)
        }
        Command::Payload(args) => {
            write_json(&run_payload(&args.quiz, args.create)?, None)?;
            Ok(0)
        }
        Command::Save(args) => match run_save(&args.quiz, args.topic.as_deref(), &config)? {
            SaveOutcome::Saved(quiz) => {
                println!("Saved {} (version {})", quiz.id, quiz.version);
                println!("{}", quiz_table(&quiz));
                if let Some(path) = &args.output {
                    write_json(&quiz, Some(path))?;
                }
                Ok(0)
            }
            SaveOutcome::Invalid(report) => {
                println!("{}", issues_table(&report));
                Ok(1)
            }
        },
        Command::List => {
            println!("Store: {}", config.store_dir().display());
            println!("{}", store_table(&run_list(&config)?));
            Ok(0)
        }
    }
}
