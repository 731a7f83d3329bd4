//! TUI main loop.
//!
//! The TUI takes over the terminal by:
//! - Enabling raw mode (unbuffered input, no echo)
//! - Entering the alternate screen buffer
//! - Hiding the cursor
//!
//! All these changes are reverted on exit, including on panic.
//!
//! Each frame checks the shutdown flag and the quit request, renders the
//! current state, then polls for one key with a frame-length timeout.
//!
//! # Example
//!
//! ```no_run
//! use quizdeck::quiz::{Answer, Question, Session};
//! use quizdeck::tui::{run_tui, App, EventHandler};
//!
//! let question =
//!     Question::new("2 + 2?", vec!["3".into(), "4".into()], Answer::single("4"), "").unwrap();
//! let mut app = App::new(Session::load(vec![question]).unwrap());
//!
//! run_tui(&mut app, &EventHandler::new(), None).unwrap();
//! ```

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::App;
use super::events::EventHandler;
use super::ui::render;

/// ~60 FPS.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Event poll timeout, one frame.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// Event handling error.
    #[error("event error: {0}")]
    Event(#[from] super::events::EventError),
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// How the TUI loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiExit {
    /// The user quit.
    Quit,
    /// The shutdown flag was raised.
    Interrupted,
}

/// Run the interactive TUI until the user quits or a shutdown is requested.
///
/// The terminal is always restored, even on error or panic.
///
/// # Errors
///
/// Returns `TuiError::Io` for terminal I/O errors and `TuiError::Event` for
/// event reading errors.
pub fn run_tui(
    app: &mut App,
    events: &EventHandler,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<TuiExit> {
    let original_hook = Arc::new(panic::take_hook());
    let hook = Arc::clone(&original_hook);
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        hook(panic_info);
    }));

    let result = setup_terminal().and_then(|mut terminal| {
        let result = event_loop(&mut terminal, app, events, shutdown_flag.as_deref());
        restore_terminal();
        result
    });

    let _ = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| original_hook(panic_info)));

    result
}

fn event_loop(
    terminal: &mut Terminal,
    app: &mut App,
    events: &EventHandler,
    shutdown_flag: Option<&AtomicBool>,
) -> TuiResult<TuiExit> {
    let mut last_render = Instant::now();

    loop {
        if shutdown_flag.is_some_and(|flag| flag.load(Ordering::SeqCst)) {
            log::info!("Shutdown signal received, exiting TUI");
            return Ok(TuiExit::Interrupted);
        }

        if let Some(exit) = requested_exit(app) {
            log::debug!("App requested exit: {:?}", exit);
            return Ok(exit);
        }

        terminal.draw(|frame| render(frame, app))?;

        if let Some(action) = events.poll(POLL_TIMEOUT)? {
            if !app.handle_action(action) {
                log::trace!("Action not handled: {:?}", action);
            }
        }

        let elapsed = last_render.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
        last_render = Instant::now();
    }
}

fn requested_exit(app: &App) -> Option<TuiExit> {
    if !app.should_quit() {
        None
    } else if app.was_interrupted() {
        Some(TuiExit::Interrupted)
    } else {
        Some(TuiExit::Quit)
    }
}

fn setup_terminal() -> TuiResult<Terminal> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
        restore_terminal();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    match Terminal::new(backend) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            restore_terminal();
            Err(e.into())
        }
    }
}

/// Best effort: errors are ignored so the original error surfaces.
fn restore_terminal() {
    log::debug!("Restoring terminal");
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}
