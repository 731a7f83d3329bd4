//! Review-mode view data.
//!
//! After completion the user can list every attempt with the correct answer
//! and their own wrong picks highlighted.

use super::session::{Attempt, Session};

/// How a choice is highlighted in review mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMark {
    /// Part of the correct answer.
    Correct,
    /// Picked by the user but not part of the answer.
    WrongPick,
    /// Neither correct nor picked.
    Neutral,
}

impl Attempt {
    /// Classify one choice of the attempted question.
    #[must_use]
    pub fn mark(&self, choice: &str) -> ChoiceMark {
        if self.question().answer().contains(choice) {
            ChoiceMark::Correct
        } else if self.user_answer().contains(choice) {
            ChoiceMark::WrongPick
        } else {
            ChoiceMark::Neutral
        }
    }

    /// All choices of the attempted question with their marks, in display order.
    pub fn marked_choices(&self) -> impl Iterator<Item = (&str, ChoiceMark)> {
        self.question()
            .choices()
            .iter()
            .map(move |choice| (choice.as_str(), self.mark(choice)))
    }
}

/// One row of the review listing.
#[derive(Debug, Clone, Copy)]
pub struct ReviewEntry<'a> {
    /// One-based question number.
    pub position: usize,
    /// Number of questions in the session.
    pub total: usize,
    /// The attempt being reviewed.
    pub attempt: &'a Attempt,
}

impl Session {
    /// Iterate the review listing in question order.
    pub fn review_entries(&self) -> impl Iterator<Item = ReviewEntry<'_>> {
        let total = self.question_count();
        self.attempts()
            .iter()
            .enumerate()
            .map(move |(index, attempt)| ReviewEntry {
                position: index + 1,
                total,
                attempt,
            })
    }
}
