//! Quiz session controller.
//!
//! # Overview
//!
//! [`Session`] is the single mutable root of a quiz run. It owns the question
//! set, the navigation position, the current selection, the score and the
//! attempt log. It is mutated only through the operations below:
//!
//! - [`Session::select_choice`]
//! - [`Session::submit_answer`]
//! - [`Session::go_next`] / [`Session::go_previous`]
//! - [`Session::toggle_review`]
//! - [`Session::restart`]
//!
//! Each operation returns `true` when it changed the state. Calls made outside
//! their precondition are silent no-ops that return `false`; the render layer
//! is expected to disable the matching controls instead.
//!
//! # Back navigation
//!
//! Going back truncates the attempt log to the question being re-entered and
//! recomputes the score from the remaining attempts. The log therefore never
//! holds two attempts for one question, and `score` always equals the number
//! of correct attempts.
//!
//! # Example
//!
//! ```
//! use quizdeck::quiz::{Answer, Question, Session};
//!
//! let questions = vec![
//!     Question::new("1 + 1?", vec!["1".into(), "2".into()], Answer::single("2"), "").unwrap(),
//! ];
//! let mut session = Session::load(questions).unwrap();
//!
//! session.select_choice("2");
//! session.submit_answer();
//! session.go_next();
//!
//! assert!(session.is_complete());
//! assert_eq!(session.final_score_percent(), 100.0);
//! ```

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use super::question::Question;

/// Errors raised when a session cannot be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The question set is empty.
    #[error("the question set is empty")]
    EmptyDataset,
}

/// A submitted answer to one question.
///
/// Created exactly once per question at submit time and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    question: Question,
    user_answer: BTreeSet<String>,
    was_correct: bool,
}

impl Attempt {
    /// The question that was answered.
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// The choices the user submitted.
    #[must_use]
    pub fn user_answer(&self) -> &BTreeSet<String> {
        &self.user_answer
    }

    /// Whether the submission matched the answer.
    #[must_use]
    pub fn was_correct(&self) -> bool {
        self.was_correct
    }
}

/// A user intent forwarded by the render layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Select (or toggle) a choice of the current question.
    Select(String),
    /// Check the current selection.
    Submit,
    /// Move to the next question, or finish after the last one.
    Next,
    /// Move back to the previous question.
    Previous,
    /// Switch between the summary and the review listing.
    ToggleReview,
    /// Start over with the same questions.
    Restart,
}

/// The quiz session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    questions: Vec<Question>,
    current_index: usize,
    selected: BTreeSet<String>,
    answer_revealed: bool,
    score: usize,
    complete: bool,
    reviewing: bool,
    attempts: Vec<Attempt>,
}

impl Session {
    /// Start a session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::EmptyDataset`] if `questions` is empty.
    pub fn load(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyDataset);
        }

        log::debug!("Session loaded with {} questions", questions.len());
        Ok(Self {
            attempts: Vec::with_capacity(questions.len()),
            questions,
            current_index: 0,
            selected: BTreeSet::new(),
            answer_revealed: false,
            score: 0,
            complete: false,
            reviewing: false,
        })
    }

    // ==================== Accessors ====================

    /// All questions, in order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Number of questions in the session.
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question currently displayed.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// Choices selected for the current question.
    #[must_use]
    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Whether `choice` is currently selected.
    #[must_use]
    pub fn is_selected(&self, choice: &str) -> bool {
        self.selected.contains(choice)
    }

    /// Whether the current answer has been checked.
    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    /// Number of correct attempts.
    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    /// Whether the last question has been passed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the review listing is shown (only meaningful once complete).
    #[must_use]
    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    /// Submitted attempts, indexed by question order.
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// The attempt for the current question, once it has been submitted.
    #[must_use]
    pub fn current_attempt(&self) -> Option<&Attempt> {
        if self.answer_revealed {
            self.attempts.get(self.current_index)
        } else {
            None
        }
    }

    /// Whether the user is still choosing an answer for the current question.
    #[must_use]
    pub fn is_answering(&self) -> bool {
        !self.complete && !self.answer_revealed
    }

    /// Whether [`Session::submit_answer`] would do anything right now.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.is_answering() && !self.selected.is_empty()
    }

    /// Whether the current question is the last one.
    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// Maximum number of choices selectable on the current question.
    #[must_use]
    pub fn max_selections(&self) -> usize {
        self.current_question().max_selections()
    }

    /// Position of the current question as a percentage of the quiz.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    /// Score as a percentage of all questions.
    #[must_use]
    pub fn final_score_percent(&self) -> f64 {
        self.score as f64 / self.questions.len() as f64 * 100.0
    }

    // ==================== Operations ====================

    /// Select or toggle a choice of the current question.
    ///
    /// Single-answer questions replace the selection. Dual-answer questions
    /// toggle membership; adding a third choice is silently ignored.
    /// No-op once the answer is revealed, after completion, or for a string
    /// that is not one of the current choices.
    pub fn select_choice(&mut self, choice: &str) -> bool {
        if !self.is_answering() || !self.current_question().has_choice(choice) {
            log::trace!("Ignoring selection of {:?}", choice);
            return false;
        }

        if !self.current_question().is_multiple_answer() {
            if self.selected.len() == 1 && self.selected.contains(choice) {
                return false;
            }
            self.selected.clear();
            self.selected.insert(choice.to_string());
        } else if self.selected.contains(choice) {
            self.selected.remove(choice);
        } else if self.selected.len() < self.max_selections() {
            self.selected.insert(choice.to_string());
        } else {
            log::trace!("Selection capacity reached, ignoring {:?}", choice);
            return false;
        }

        log::trace!("Selection is now {:?}", self.selected);
        true
    }

    /// Check the current selection and record an [`Attempt`].
    ///
    /// Requires at least one selected choice and an unrevealed answer.
    pub fn submit_answer(&mut self) -> bool {
        if !self.can_submit() {
            return false;
        }

        let question = self.current_question().clone();
        let was_correct = question.is_correct(&self.selected);
        if was_correct {
            self.score += 1;
        }

        // Back navigation truncates the log, so it always ends at the current index.
        self.attempts.truncate(self.current_index);
        self.attempts.push(Attempt {
            question,
            user_answer: self.selected.clone(),
            was_correct,
        });
        self.answer_revealed = true;

        log::debug!(
            "Question {} submitted: {} (score {})",
            self.current_index + 1,
            if was_correct { "correct" } else { "incorrect" },
            self.score
        );
        true
    }

    /// Advance to the next question, or complete the session after the last.
    ///
    /// Only allowed once the current answer is revealed.
    pub fn go_next(&mut self) -> bool {
        if self.complete || !self.answer_revealed {
            return false;
        }

        if self.is_last_question() {
            self.complete = true;
            log::info!(
                "Quiz complete: {}/{} correct",
                self.score,
                self.questions.len()
            );
        } else {
            self.current_index += 1;
            self.selected.clear();
            self.answer_revealed = false;
            log::trace!("Advanced to question {}", self.current_index + 1);
        }
        true
    }

    /// Return to the previous question so it can be answered again.
    ///
    /// The attempts of the previous and current question are discarded and
    /// their score contribution reversed. No-op on the first question and
    /// once the session is complete.
    pub fn go_previous(&mut self) -> bool {
        if self.complete || self.current_index == 0 {
            return false;
        }

        self.current_index -= 1;
        self.attempts.truncate(self.current_index);
        self.score = self.attempts.iter().filter(|a| a.was_correct).count();
        self.selected.clear();
        self.answer_revealed = false;

        log::trace!(
            "Went back to question {} (score {})",
            self.current_index + 1,
            self.score
        );
        true
    }

    /// Switch between the summary and the review listing.
    ///
    /// Only valid once the session is complete.
    pub fn toggle_review(&mut self) -> bool {
        if !self.complete {
            return false;
        }
        self.reviewing = !self.reviewing;
        true
    }

    /// Reset to the initial state over the same questions.
    pub fn restart(&mut self) {
        let questions = std::mem::take(&mut self.questions);
        log::debug!("Restarting session");
        *self = Self {
            attempts: Vec::with_capacity(questions.len()),
            questions,
            current_index: 0,
            selected: BTreeSet::new(),
            answer_revealed: false,
            score: 0,
            complete: false,
            reviewing: false,
        };
    }

    /// Apply an [`Intent`]. Returns whether the state changed.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Select(choice) => self.select_choice(&choice),
            Intent::Submit => self.submit_answer(),
            Intent::Next => self.go_next(),
            Intent::Previous => self.go_previous(),
            Intent::ToggleReview => self.toggle_review(),
            Intent::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Consume the session and return it with `intent` applied.
    #[must_use]
    pub fn step(mut self, intent: Intent) -> Self {
        self.apply(intent);
        self
    }
}
