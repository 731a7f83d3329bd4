//! Question records and their validated answer shape.
//!
//! A question is either single-answer or dual-answer. The arity is carried by
//! the [`Answer`] variant instead of being inferred at runtime, so every
//! consumer matches on it explicitly.
//!
//! # Example
//!
//! ```
//! use quizdeck::quiz::{Answer, Question};
//! use std::collections::BTreeSet;
//!
//! let question = Question::new(
//!     "Pick 2 primes",
//!     vec!["2".into(), "3".into(), "4".into()],
//!     Answer::dual("2", "3"),
//!     "2 and 3 are prime, 4 is not.",
//! )
//! .unwrap();
//!
//! assert!(question.is_multiple_answer());
//! let picked: BTreeSet<String> = ["3".to_string(), "2".to_string()].into();
//! assert!(question.is_correct(&picked));
//! ```

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema violations detected while building a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    /// The prompt is empty or whitespace only.
    #[error("question prompt is empty")]
    EmptyPrompt,

    /// The question has no choices to pick from.
    #[error("question has no choices")]
    NoChoices,

    /// The same choice text appears more than once.
    #[error("duplicate choice: '{0}'")]
    DuplicateChoice(String),

    /// A multi-value answer does not hold exactly two distinct values.
    #[error("a multiple-answer question needs exactly 2 distinct answers, found {0}")]
    DualAnswerSize(usize),

    /// An answer value is not one of the choices.
    #[error("answer '{0}' is not one of the choices")]
    AnswerNotInChoices(String),
}

/// The correct answer of a question.
///
/// Serialized untagged: a plain string for single answers and an array of
/// two strings for dual answers, which matches the dataset layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    /// Exactly one choice is correct.
    Single(String),
    /// Exactly two choices are correct; order does not matter.
    Dual(BTreeSet<String>),
}

impl Answer {
    /// Build a single answer.
    pub fn single(value: impl Into<String>) -> Self {
        Self::Single(value.into())
    }

    /// Build a dual answer from two values.
    ///
    /// Equal values collapse into a one-element set, which
    /// [`Question::new`] rejects with [`QuestionError::DualAnswerSize`].
    pub fn dual(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self::Dual([first.into(), second.into()].into_iter().collect())
    }

    /// Number of choices the user may select for this answer.
    #[must_use]
    pub fn max_selections(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Dual(_) => 2,
        }
    }

    /// Check whether `value` is part of the correct answer.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(answer) => answer == value,
            Self::Dual(answers) => answers.contains(value),
        }
    }

    /// Iterate over the correct values.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let values: Vec<&str> = match self {
            Self::Single(answer) => vec![answer.as_str()],
            Self::Dual(answers) => answers.iter().map(String::as_str).collect(),
        };
        values.into_iter()
    }

    /// Decide whether a selection matches this answer.
    ///
    /// Dual answers require set equality (same cardinality, same members).
    /// Single answers require exactly one selected value equal to the answer.
    #[must_use]
    pub fn is_satisfied_by(&self, selected: &BTreeSet<String>) -> bool {
        match self {
            Self::Single(answer) => selected.len() == 1 && selected.contains(answer),
            Self::Dual(answers) => selected == answers,
        }
    }
}

/// Answer field as it appears in a dataset: a string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawAnswer {
    One(String),
    Many(Vec<String>),
}

/// Unvalidated question record, accepting both field naming schemes.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    #[serde(alias = "question")]
    prompt: String,
    choices: Vec<String>,
    answer: RawAnswer,
    #[serde(alias = "reason", default)]
    explanation: String,
}

impl RawAnswer {
    fn into_answer(self) -> Result<Answer, QuestionError> {
        match self {
            RawAnswer::One(value) => Ok(Answer::Single(value)),
            RawAnswer::Many(values) => match <[String; 2]>::try_from(values) {
                Ok([first, second]) => Ok(Answer::dual(first, second)),
                Err(mut values) if values.len() == 1 => Ok(Answer::Single(values.remove(0))),
                Err(values) => Err(QuestionError::DualAnswerSize(values.len())),
            },
        }
    }
}

/// A validated multiple-choice question.
///
/// Every value of `answer` is guaranteed to appear in `choices`, and the
/// choices are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion")]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    answer: Answer,
    explanation: String,
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        let answer = raw.answer.into_answer()?;
        Question::new(raw.prompt, raw.choices, answer, raw.explanation)
    }
}

impl Question {
    /// Build a question, validating it against the dataset schema.
    ///
    /// # Errors
    ///
    /// Returns a [`QuestionError`] describing the first violation found.
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        answer: Answer,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if choices.is_empty() {
            return Err(QuestionError::NoChoices);
        }

        let mut seen = HashSet::with_capacity(choices.len());
        for choice in &choices {
            if !seen.insert(choice.as_str()) {
                return Err(QuestionError::DuplicateChoice(choice.clone()));
            }
        }

        if let Answer::Dual(values) = &answer {
            if values.len() != 2 {
                return Err(QuestionError::DualAnswerSize(values.len()));
            }
        }
        if let Some(missing) = answer.values().find(|value| !seen.contains(value)) {
            return Err(QuestionError::AnswerNotInChoices(missing.to_string()));
        }

        Ok(Self {
            prompt,
            choices,
            answer,
            explanation: explanation.into(),
        })
    }

    /// The question text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The choices, in display order.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// The correct answer.
    #[must_use]
    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// Explanation shown once the answer is revealed.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Whether this is a dual-answer question.
    #[must_use]
    pub fn is_multiple_answer(&self) -> bool {
        matches!(self.answer, Answer::Dual(_))
    }

    /// 2 for dual-answer questions, 1 otherwise.
    #[must_use]
    pub fn max_selections(&self) -> usize {
        self.answer.max_selections()
    }

    /// Check whether `choice` is one of this question's choices.
    #[must_use]
    pub fn has_choice(&self, choice: &str) -> bool {
        self.choices.iter().any(|c| c == choice)
    }

    /// Score a selection against the answer.
    #[must_use]
    pub fn is_correct(&self, selected: &BTreeSet<String>) -> bool {
        self.answer.is_satisfied_by(selected)
    }
}
