//! Command-line interface definitions for quizdeck.
//!
//! # Example
//!
//! ```bash
//! # Take a quiz interactively
//! quizdeck run questions.json
//!
//! # Take a quiz and save a JSON report of the answers
//! quizdeck run questions.toml --report results.json
//!
//! # Validate a question set
//! quizdeck check questions.json --output json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::tui::keybindings::KeybindingProfile;

/// Multiple-choice quiz runner with an interactive TUI.
///
/// Loads a question set (JSON or TOML), walks through it one question at a
/// time, scores the answers and offers a review of every answer at the end.
#[derive(Debug, Parser)]
#[command(name = "quizdeck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write log lines to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// TUI color theme
    #[arg(long, value_enum, global = true)]
    pub theme: Option<ThemeArg>,

    /// Keybinding profile
    #[arg(long, value_enum, global = true)]
    pub keybinding_profile: Option<KeybindingProfile>,

    /// Use ASCII borders for screen readers and limited terminals
    #[arg(long, global = true)]
    pub accessible: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Take a quiz in the interactive TUI
    Run(RunArgs),
    /// Validate a question set and print an overview
    Check(CheckArgs),
}

/// Arguments for the run subcommand.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Question set file (.json or .toml)
    #[arg(value_name = "QUESTIONS")]
    pub dataset: PathBuf,

    /// Write a JSON report of the answers when the TUI exits
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Arguments for the check subcommand.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Question set file (.json or .toml)
    #[arg(value_name = "QUESTIONS")]
    pub dataset: PathBuf,

    /// Output format for the overview
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Output format for non-interactive results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// TUI theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeArg {
    /// Detect from the terminal environment
    #[default]
    Auto,
    /// Light background
    Light,
    /// Dark background
    Dark,
}
