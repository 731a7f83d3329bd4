//! TUI application state management.
//!
//! # Overview
//!
//! [`App`] wraps the quiz [`Session`] with the state that only matters to the
//! terminal front end:
//! - the choice cursor on the current question
//! - the scroll offset of the review listing
//! - the help overlay and quit flags
//! - theme, accessibility and keybindings for rendering hints
//!
//! Keyboard input arrives as [`Action`]s. [`App::handle_action`] translates
//! them into session intents; the session remains the only owner of quiz
//! progress and scoring.
//!
//! # Example
//!
//! ```
//! use quizdeck::quiz::{Answer, Question, Session};
//! use quizdeck::tui::app::{Action, App, AppMode};
//!
//! let question =
//!     Question::new("1 + 1?", vec!["1".into(), "2".into()], Answer::single("2"), "").unwrap();
//! let mut app = App::new(Session::load(vec![question]).unwrap());
//!
//! app.handle_action(Action::NavigateDown);
//! app.handle_action(Action::ToggleChoice);
//! app.handle_action(Action::Confirm);
//! assert_eq!(app.mode(), AppMode::Revealed);
//!
//! app.handle_action(Action::Confirm);
//! assert_eq!(app.mode(), AppMode::Summary);
//! ```

use std::str::FromStr;

use super::keybindings::KeyBindings;
use super::theme::Theme;
use crate::quiz::{Intent, Session};

/// What the TUI is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Choosing an answer for the current question
    Answering,
    /// Answer checked, explanation visible
    Revealed,
    /// Quiz complete, final score shown
    Summary,
    /// Quiz complete, every attempt listed
    Review,
    /// Help overlay on top of any screen
    Help,
    /// Application is quitting
    Quitting,
}

/// User action triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the choice cursor (or scroll the review) up
    NavigateUp,
    /// Move the choice cursor (or scroll the review) down
    NavigateDown,
    /// Select or deselect the choice under the cursor
    ToggleChoice,
    /// Select the choice with this zero-based position
    Pick(usize),
    /// Check the answer, go on after a reveal, or open the review when done
    Confirm,
    /// Go to the next question (after the answer is checked)
    NextQuestion,
    /// Go back to the previous question
    PreviousQuestion,
    /// Switch between the summary and the review
    ToggleReview,
    /// Start the quiz over (summary and review screens only)
    Restart,
    /// Switch between light and dark theme
    ToggleTheme,
    /// Show the help overlay
    ShowHelp,
    /// Close the help overlay
    Cancel,
    /// Quit the application
    Quit,
    /// Abort the run, reported like a Ctrl+C signal
    Interrupt,
}

impl Action {
    /// Actions that can be rebound by name, with their config names.
    const NAMED: &'static [(&'static str, Action)] = &[
        ("navigate_up", Action::NavigateUp),
        ("navigate_down", Action::NavigateDown),
        ("toggle_choice", Action::ToggleChoice),
        ("confirm", Action::Confirm),
        ("next_question", Action::NextQuestion),
        ("previous_question", Action::PreviousQuestion),
        ("toggle_review", Action::ToggleReview),
        ("restart", Action::Restart),
        ("toggle_theme", Action::ToggleTheme),
        ("help", Action::ShowHelp),
        ("cancel", Action::Cancel),
        ("quit", Action::Quit),
        ("interrupt", Action::Interrupt),
    ];

    /// Names accepted in `custom_keybindings`.
    #[must_use]
    pub fn all_names() -> Vec<&'static str> {
        Self::NAMED.iter().map(|(name, _)| *name).collect()
    }

    /// Config name of this action, if it can be rebound.
    #[must_use]
    pub fn name(&self) -> Option<&'static str> {
        Self::NAMED
            .iter()
            .find(|(_, action)| action == self)
            .map(|(name, _)| *name)
    }

    /// Short description used by the help overlay.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp => "Move up",
            Self::NavigateDown => "Move down",
            Self::ToggleChoice => "Select choice",
            Self::Pick(_) => "Select choice by number",
            Self::Confirm => "Check answer / continue",
            Self::NextQuestion => "Next question",
            Self::PreviousQuestion => "Previous question",
            Self::ToggleReview => "Review answers / back to summary",
            Self::Restart => "Restart quiz",
            Self::ToggleTheme => "Toggle theme",
            Self::ShowHelp => "Show help",
            Self::Cancel => "Close help",
            Self::Quit => "Quit",
            Self::Interrupt => "Abort (exit 130)",
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::NAMED
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, action)| *action)
            .ok_or_else(|| s.to_string())
    }
}

/// TUI application state.
///
/// Only accessed from the main thread; terminal operations are not
/// thread-safe.
#[derive(Debug, Clone)]
pub struct App {
    /// The quiz being taken
    session: Session,
    /// Optional question set title for the header
    title: Option<String>,
    /// Cursor over the current question's choices
    cursor: usize,
    /// Scroll offset (lines) of the review listing
    review_scroll: u16,
    /// Help overlay visible
    show_help: bool,
    /// Quit requested
    quitting: bool,
    /// Quit came from an interrupt rather than a normal quit
    interrupted: bool,
    /// Active color theme
    theme: Theme,
    /// ASCII borders
    accessible: bool,
    /// Active keybindings, for footer and help hints
    bindings: KeyBindings,
}

impl App {
    /// Create an app over a loaded session with default settings.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            session,
            title: None,
            cursor: 0,
            review_scroll: 0,
            show_help: false,
            quitting: false,
            interrupted: false,
            theme: Theme::default(),
            accessible: false,
            bindings: KeyBindings::default(),
        }
    }

    /// Set the header title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Set the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Enable or disable ASCII borders.
    #[must_use]
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Set the keybindings shown in hints.
    #[must_use]
    pub fn with_bindings(mut self, bindings: KeyBindings) -> Self {
        self.bindings = bindings;
        self
    }

    // ==================== Accessors ====================

    /// The quiz session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the app and hand back the session.
    #[must_use]
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Header title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Current choice cursor position.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Review listing scroll offset.
    #[must_use]
    pub fn review_scroll(&self) -> u16 {
        self.review_scroll
    }

    /// Active theme.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Whether ASCII borders are used.
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    /// Active keybindings.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Whether the help overlay is visible.
    #[must_use]
    pub fn is_showing_help(&self) -> bool {
        self.show_help
    }

    /// Whether the application should exit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quitting
    }

    /// Largest useful review scroll offset: the last line of the listing.
    ///
    /// Each attempt takes a header, the prompt, one line per choice, the
    /// explanation when present and a blank separator.
    #[must_use]
    pub fn max_review_scroll(&self) -> u16 {
        let lines: usize = self
            .session
            .review_entries()
            .map(|entry| {
                let question = entry.attempt.question();
                3 + question.choices().len() + usize::from(!question.explanation().is_empty())
            })
            .sum();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Whether the quit was an interrupt (Ctrl+C).
    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Screen derived from the session plus overlay flags.
    #[must_use]
    pub fn mode(&self) -> AppMode {
        if self.quitting {
            AppMode::Quitting
        } else if self.show_help {
            AppMode::Help
        } else {
            self.screen()
        }
    }

    /// Screen under any overlay.
    #[must_use]
    pub fn screen(&self) -> AppMode {
        if self.session.is_complete() {
            if self.session.is_reviewing() {
                AppMode::Review
            } else {
                AppMode::Summary
            }
        } else if self.session.answer_revealed() {
            AppMode::Revealed
        } else {
            AppMode::Answering
        }
    }

    // ==================== Action Handling ====================

    /// Handle a user action and update state accordingly.
    ///
    /// Returns true if the action changed anything.
    pub fn handle_action(&mut self, action: Action) -> bool {
        log::trace!("Handling action: {:?} in mode {:?}", action, self.mode());

        match action {
            Action::Quit => {
                self.quitting = true;
                return true;
            }
            Action::Interrupt => {
                self.quitting = true;
                self.interrupted = true;
                return true;
            }
            Action::ShowHelp => {
                self.show_help = !self.show_help;
                return true;
            }
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                return true;
            }
            _ => {}
        }

        if self.show_help {
            // Any other key closes the overlay without acting on the screen below.
            self.show_help = false;
            return true;
        }

        match self.screen() {
            AppMode::Answering | AppMode::Revealed => self.handle_question_action(action),
            AppMode::Summary | AppMode::Review => self.handle_complete_action(action),
            AppMode::Help | AppMode::Quitting => false,
        }
    }

    fn handle_question_action(&mut self, action: Action) -> bool {
        let choice_count = self.session.current_question().choices().len();
        match action {
            Action::NavigateUp => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    true
                } else {
                    false
                }
            }
            Action::NavigateDown => {
                if self.cursor + 1 < choice_count {
                    self.cursor += 1;
                    true
                } else {
                    false
                }
            }
            Action::ToggleChoice => self.select_at(self.cursor),
            Action::Pick(index) => {
                if index < choice_count {
                    self.cursor = index;
                }
                self.select_at(index)
            }
            Action::Confirm => {
                if self.session.answer_revealed() {
                    self.advance()
                } else {
                    self.apply(Intent::Submit)
                }
            }
            Action::NextQuestion => self.advance(),
            Action::PreviousQuestion => {
                let changed = self.apply(Intent::Previous);
                if changed {
                    self.cursor = 0;
                }
                changed
            }
            _ => false,
        }
    }

    fn handle_complete_action(&mut self, action: Action) -> bool {
        match action {
            Action::Confirm | Action::ToggleReview => {
                self.review_scroll = 0;
                self.apply(Intent::ToggleReview)
            }
            Action::Cancel if self.session.is_reviewing() => {
                self.review_scroll = 0;
                self.apply(Intent::ToggleReview)
            }
            Action::NavigateDown if self.session.is_reviewing() => {
                if self.review_scroll < self.max_review_scroll() {
                    self.review_scroll += 1;
                    true
                } else {
                    false
                }
            }
            Action::NavigateUp if self.session.is_reviewing() => {
                let before = self.review_scroll;
                self.review_scroll = self.review_scroll.saturating_sub(1);
                before != self.review_scroll
            }
            Action::Restart => {
                self.cursor = 0;
                self.review_scroll = 0;
                self.apply(Intent::Restart)
            }
            _ => false,
        }
    }

    fn select_at(&mut self, index: usize) -> bool {
        let Some(choice) = self.session.current_question().choices().get(index).cloned() else {
            return false;
        };
        self.apply(Intent::Select(choice))
    }

    fn advance(&mut self) -> bool {
        let changed = self.apply(Intent::Next);
        if changed && !self.session.is_complete() {
            self.cursor = 0;
        }
        changed
    }

    fn apply(&mut self, intent: Intent) -> bool {
        log::trace!("Applying {:?}", intent);
        self.session.apply(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Answer, Question};

    fn app() -> App {
        let questions = vec![
            Question::new(
                "Largest planet?",
                vec!["Mars".into(), "Jupiter".into(), "Venus".into()],
                Answer::single("Jupiter"),
                "Jupiter is the largest.",
            )
            .unwrap(),
            Question::new(
                "Pick 2 primes",
                vec!["2".into(), "3".into(), "4".into()],
                Answer::dual("2", "3"),
                "4 = 2 x 2.",
            )
            .unwrap(),
        ];
        App::new(Session::load(questions).unwrap())
    }

    #[test]
    fn test_initial_mode() {
        let app = app();
        assert_eq!(app.mode(), AppMode::Answering);
        assert_eq!(app.cursor(), 0);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_cursor_bounds() {
        let mut app = app();
        assert!(!app.handle_action(Action::NavigateUp));
        assert!(app.handle_action(Action::NavigateDown));
        assert!(app.handle_action(Action::NavigateDown));
        assert!(!app.handle_action(Action::NavigateDown));
        assert_eq!(app.cursor(), 2);
    }

    #[test]
    fn test_confirm_without_selection_is_ignored() {
        let mut app = app();
        assert!(!app.handle_action(Action::Confirm));
        assert_eq!(app.mode(), AppMode::Answering);
    }

    #[test]
    fn test_full_run_through_actions() {
        let mut app = app();
        app.handle_action(Action::Pick(1));
        app.handle_action(Action::Confirm);
        assert_eq!(app.mode(), AppMode::Revealed);
        assert_eq!(app.session().score(), 1);

        app.handle_action(Action::Confirm);
        assert_eq!(app.session().current_index(), 1);
        assert_eq!(app.cursor(), 0);

        app.handle_action(Action::Pick(0));
        app.handle_action(Action::Pick(1));
        app.handle_action(Action::Confirm);
        app.handle_action(Action::NextQuestion);
        assert_eq!(app.mode(), AppMode::Summary);
        assert_eq!(app.session().final_score_percent(), 100.0);

        app.handle_action(Action::Confirm);
        assert_eq!(app.mode(), AppMode::Review);
        app.handle_action(Action::NavigateDown);
        assert_eq!(app.review_scroll(), 1);
        app.handle_action(Action::Cancel);
        assert_eq!(app.mode(), AppMode::Summary);
    }

    #[test]
    fn test_review_scroll_stops_at_last_line() {
        let mut app = app();
        for action in [
            Action::Pick(1),
            Action::Confirm,
            Action::Confirm,
            Action::Pick(0),
            Action::Confirm,
            Action::Confirm,
            Action::ToggleReview,
        ] {
            app.handle_action(action);
        }
        assert_eq!(app.mode(), AppMode::Review);

        // Two attempts of 7 lines each: header, prompt, 3 choices, explanation, blank.
        assert_eq!(app.max_review_scroll(), 13);
        for _ in 0..50 {
            app.handle_action(Action::NavigateDown);
        }
        assert_eq!(app.review_scroll(), 13);
        assert!(!app.handle_action(Action::NavigateDown));

        assert!(app.handle_action(Action::NavigateUp));
        assert_eq!(app.review_scroll(), 12);
    }

    #[test]
    fn test_restart_only_when_complete() {
        let mut app = app();
        app.handle_action(Action::Pick(1));
        assert!(!app.handle_action(Action::Restart));
        assert_eq!(app.session().selected().len(), 1);

        app.handle_action(Action::Confirm);
        app.handle_action(Action::Confirm);
        app.handle_action(Action::Pick(2));
        app.handle_action(Action::Confirm);
        app.handle_action(Action::Confirm);
        assert_eq!(app.mode(), AppMode::Summary);

        assert!(app.handle_action(Action::Restart));
        assert_eq!(app.mode(), AppMode::Answering);
        assert_eq!(app.session().score(), 0);
        assert!(app.session().attempts().is_empty());
    }

    #[test]
    fn test_previous_question_resets_cursor() {
        let mut app = app();
        app.handle_action(Action::Pick(1));
        app.handle_action(Action::Confirm);
        app.handle_action(Action::Confirm);
        app.handle_action(Action::NavigateDown);
        assert!(app.handle_action(Action::PreviousQuestion));
        assert_eq!(app.cursor(), 0);
        assert_eq!(app.session().current_index(), 0);
        assert_eq!(app.session().score(), 0);
    }

    #[test]
    fn test_help_overlay_swallows_next_key() {
        let mut app = app();
        app.handle_action(Action::ShowHelp);
        assert_eq!(app.mode(), AppMode::Help);
        assert!(app.handle_action(Action::Pick(1)));
        assert_eq!(app.mode(), AppMode::Answering);
        assert!(app.session().selected().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit());
        assert!(!app.was_interrupted());
        assert_eq!(app.mode(), AppMode::Quitting);
    }

    #[test]
    fn test_interrupt_quits_from_help_overlay() {
        let mut app = app();
        app.handle_action(Action::ShowHelp);
        assert!(app.handle_action(Action::Interrupt));
        assert!(app.should_quit());
        assert!(app.was_interrupted());
    }

    #[test]
    fn test_action_names_round_trip() {
        for name in Action::all_names() {
            let action: Action = name.parse().unwrap();
            assert_eq!(action.name(), Some(name));
        }
        assert_eq!("Next-Question".parse::<Action>(), Ok(Action::NextQuestion));
        assert!("teleport".parse::<Action>().is_err());
        assert_eq!(Action::Pick(3).name(), None);
    }
}
