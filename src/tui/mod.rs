//! Terminal User Interface module.
//!
//! The interactive front end for taking a quiz, built on ratatui with the
//! crossterm backend.
//!
//! # Overview
//!
//! - [`app`]: Application state (screen, cursor, overlays) around a quiz session
//! - [`events`]: Keyboard event handling
//! - [`keybindings`]: Keybinding profiles and custom overrides
//! - [`theme`]: Light and dark color palettes
//! - [`ui`]: Ratatui rendering
//! - [`run`]: Terminal setup and the main loop
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Events are captured from the terminal (crossterm)
//! 2. Events are translated to Actions through the keybindings
//! 3. Actions update the App, which forwards quiz intents to the Session
//! 4. The UI renders from the current App state
//!
//! # Example
//!
//! ```
//! use quizdeck::quiz::{Answer, Question, Session};
//! use quizdeck::tui::{Action, App};
//!
//! let questions = vec![
//!     Question::new("Capital of France?", vec!["Paris".into(), "Rome".into()], Answer::single("Paris"), "")
//!         .unwrap(),
//! ];
//! let mut app = App::new(Session::load(questions).unwrap());
//!
//! app.handle_action(Action::Pick(0));
//! app.handle_action(Action::Confirm);
//! assert_eq!(app.session().score(), 1);
//! ```

pub mod app;
pub mod events;
pub mod keybindings;
pub mod run;
pub mod theme;
pub mod ui;

pub use app::{Action, App, AppMode};
pub use events::{EventError, EventHandler};
pub use keybindings::{KeyBindings, KeybindingError, KeybindingProfile};
pub use run::{run_tui, TuiError, TuiExit, TuiResult};
pub use theme::Theme;
pub use ui::{format_percent, render};
