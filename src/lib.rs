//! quizdeck - Multiple-choice quizzes in the terminal
//!
//! A library and CLI for taking multiple-choice quizzes. Questions are
//! loaded from JSON or TOML, answered one at a time in an interactive TUI,
//! scored, and reviewed at the end.
//!
//! The core is [`quiz::Session`], a self-contained state machine that owns
//! progress, selections, scoring and the attempt log. The [`tui`] module is
//! one front end for it; anything that can forward [`quiz::Intent`]s can
//! drive a session.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod output;
pub mod quiz;
pub mod signal;
pub mod tui;

use std::io::{self, Write};

use anyhow::Context;

use crate::cli::{CheckArgs, Cli, Commands, OutputFormat, RunArgs};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::ExitCode;
use crate::output::{format_overview, format_quiz_summary, CheckReport, QuizReport};
use crate::quiz::Session;
use crate::tui::{run_tui, App, EventHandler, KeyBindings, Theme, TuiExit};

/// Run the application for parsed CLI arguments.
///
/// # Errors
///
/// Returns an error if the question set cannot be loaded, the configuration
/// holds invalid keybindings, the terminal fails, or the report cannot be
/// written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref());
    if cli.no_color {
        yansi::disable();
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    config.merge_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Commands::Run(args) => {
            if cli.verbose > 0 && cli.log_file.is_none() {
                log::warn!(
                    "Log lines on stderr will be drawn over by the TUI; \
                     use --log-file or redirect stderr"
                );
            }
            run_quiz(args, &config, cli.quiet)
        }
        Commands::Check(args) => check_dataset(args, cli.quiet),
    }
}

fn load_dataset(path: &std::path::Path) -> anyhow::Result<Dataset> {
    Dataset::from_path(path)
        .with_context(|| format!("Failed to load question set {}", path.display()))
}

fn run_quiz(args: &RunArgs, config: &Config, quiet: bool) -> anyhow::Result<ExitCode> {
    let dataset = load_dataset(&args.dataset)?;
    let title = dataset.title.clone();
    let session = Session::load(dataset.questions).context("Cannot start the quiz")?;

    let bindings =
        KeyBindings::from_profile_with_custom(config.keybinding_profile, &config.custom_keybindings)
            .context("Invalid custom_keybindings in configuration")?;

    let shutdown_flag = match signal::install_handler() {
        Ok(handler) => Some(handler.get_flag()),
        Err(e) => {
            log::warn!("{}; Ctrl+C will only work through the quit key", e);
            None
        }
    };

    let mut app = App::new(session)
        .with_title(title.clone())
        .with_theme(Theme::from_arg(config.theme))
        .with_accessible(config.accessible)
        .with_bindings(bindings.clone());
    let events = EventHandler::with_bindings(bindings);

    let exit = run_tui(&mut app, &events, shutdown_flag).context("Terminal UI failed")?;
    let session = app.into_session();

    let report = QuizReport::from_session(&session, title);
    if let Some(path) = &args.report {
        report
            .write_to_file(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
    }

    if !quiet {
        print!("{}", format_quiz_summary(&report));
        io::stdout().flush().context("Failed to write summary")?;
    }

    Ok(exit_code(exit, session.is_complete()))
}

fn exit_code(exit: TuiExit, complete: bool) -> ExitCode {
    match exit {
        TuiExit::Interrupted => ExitCode::Interrupted,
        TuiExit::Quit if complete => ExitCode::Success,
        TuiExit::Quit => ExitCode::Incomplete,
    }
}

fn check_dataset(args: &CheckArgs, quiet: bool) -> anyhow::Result<ExitCode> {
    let dataset = load_dataset(&args.dataset)?;
    let overview = dataset.overview();

    match args.output {
        OutputFormat::Json => {
            let mut stdout = io::stdout().lock();
            CheckReport::new(&args.dataset, overview)
                .write_to(&mut stdout, true)
                .context("Failed to write check report")?;
        }
        OutputFormat::Text if !quiet => {
            print!("{}", format_overview(&args.dataset, &overview));
        }
        OutputFormat::Text => {}
    }

    Ok(ExitCode::Success)
}
