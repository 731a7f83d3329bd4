//! Logging setup for quizdeck.
//!
//! Uses the `log` facade with an `env_logger` backend writing to stderr, or
//! to the file given with `--log-file`. The TUI draws over stderr, so
//! `-v` while taking a quiz is only readable with a log file or with stderr
//! redirected (`2>quizdeck.log`).
//! The level comes from, in priority order:
//!
//! 1. the `RUST_LOG` environment variable;
//! 2. `--quiet` (errors only) or `-v`/`-vv` (debug/trace);
//! 3. the default, which is `warn` because the TUI owns the terminal while a
//!    quiz is running.
//!
//! # Example
//!
//! ```rust,no_run
//! use quizdeck::logging::init_logging;
//!
//! init_logging(1, false, None);
//! log::debug!("visible with -v");
//! ```

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Initialize the logger from CLI verbosity flags.
///
/// A `log_file` that cannot be created falls back to stderr with a warning.
/// Safe to call more than once; later calls are ignored by `env_logger`.
pub fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) {
    let mut builder = Builder::new();

    let mut file_error = None;
    if let Some(path) = log_file {
        match File::create(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => file_error = Some((path, e)),
        }
    }

    let from_env = env::var("RUST_LOG").is_ok();
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose >= 1 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    if builder.try_init().is_err() {
        return;
    }

    if let Some((path, e)) = file_error {
        log::warn!("Cannot write log file {}: {}; logging to stderr", path.display(), e);
    }

    if from_env {
        log::debug!("Logging configured from RUST_LOG");
    } else {
        log::debug!(
            "Logging initialized at level {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Map CLI flags to a level filter. `quiet` wins over `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
