//! Question set loading.
//!
//! Question sets are static files supplied whole at startup. Two encodings
//! are supported, chosen by file extension:
//!
//! - **TOML** (`.toml`): an optional `title` and a `[[questions]]` table array.
//! - **JSON** (anything else), in one of three layouts:
//!   - an array of question objects;
//!   - an array of strings, each holding one JSON-encoded question object;
//!   - an object with an optional `title` and a `questions` array (of either
//!     of the above element kinds).
//!
//! Field names follow [`RawQuestion`]: `prompt`/`question`, `choices`,
//! `answer` (string or array of two strings), `explanation`/`reason`.
//!
//! # Example
//!
//! ```
//! use quizdeck::dataset::Dataset;
//!
//! let json = r#"[{"prompt": "2 + 2?", "choices": ["3", "4"], "answer": "4"}]"#;
//! let dataset = Dataset::from_json_str(json).unwrap();
//! assert_eq!(dataset.questions.len(), 1);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quiz::{Question, QuestionError, RawQuestion};

/// Errors produced while loading a question set.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be read.
    #[error("failed to read question set {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON is malformed or does not follow a supported layout.
    #[error("invalid JSON question set: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML is malformed or does not follow the expected layout.
    #[error("invalid TOML question set: {0}")]
    Toml(#[from] toml::de::Error),

    /// A question violates the schema.
    #[error("question {} is invalid: {source}", .index + 1)]
    InvalidQuestion {
        /// Zero-based position in the file.
        index: usize,
        #[source]
        source: QuestionError,
    },

    /// An entry is not a question object, or a string holding one.
    #[error("question {} is not a valid JSON question object: {source}", .index + 1)]
    MalformedQuestion {
        /// Zero-based position in the file.
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The file holds no questions.
    #[error("the question set is empty")]
    Empty,
}

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonLayout {
    List(Vec<serde_json::Value>),
    Document {
        #[serde(default)]
        title: Option<String>,
        questions: Vec<serde_json::Value>,
    },
}

#[derive(Debug, Deserialize)]
struct TomlLayout {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

/// A loaded, validated question set.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Optional display title.
    pub title: Option<String>,
    /// Questions in file order.
    pub questions: Vec<Question>,
}

impl Dataset {
    /// Load a question set from disk, picking the format by extension.
    ///
    /// # Errors
    ///
    /// Returns a [`DatasetError`] if the file cannot be read or parsed, a
    /// question is invalid, or the set is empty.
    pub fn from_path(path: &Path) -> DatasetResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let dataset = if is_toml {
            Self::from_toml_str(&content)?
        } else {
            Self::from_json_str(&content)?
        };

        log::info!(
            "Loaded {} questions from {}",
            dataset.questions.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse a JSON question set.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_path`].
    pub fn from_json_str(content: &str) -> DatasetResult<Self> {
        let (title, entries) = match serde_json::from_str::<JsonLayout>(content)? {
            JsonLayout::List(entries) => (None, entries),
            JsonLayout::Document { title, questions } => (title, questions),
        };

        let raw = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                // Entries are decoded one by one so errors can name the question.
                match entry {
                    serde_json::Value::String(text) => serde_json::from_str::<RawQuestion>(&text),
                    other => serde_json::from_value::<RawQuestion>(other),
                }
                .map_err(|source| DatasetError::MalformedQuestion { index, source })
            })
            .collect::<DatasetResult<Vec<_>>>()?;

        Self::validate(title, raw)
    }

    /// Parse a TOML question set.
    ///
    /// # Errors
    ///
    /// See [`Dataset::from_path`].
    pub fn from_toml_str(content: &str) -> DatasetResult<Self> {
        let layout: TomlLayout = toml::from_str(content)?;
        Self::validate(layout.title, layout.questions)
    }

    fn validate(title: Option<String>, raw: Vec<RawQuestion>) -> DatasetResult<Self> {
        if raw.is_empty() {
            return Err(DatasetError::Empty);
        }

        let questions = raw
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                Question::try_from(raw)
                    .map_err(|source| DatasetError::InvalidQuestion { index, source })
            })
            .collect::<DatasetResult<Vec<_>>>()?;

        Ok(Self {
            title: title.filter(|t| !t.trim().is_empty()),
            questions,
        })
    }

    /// Summary statistics about the question set.
    #[must_use]
    pub fn overview(&self) -> DatasetOverview {
        let dual = self
            .questions
            .iter()
            .filter(|q| q.is_multiple_answer())
            .count();
        DatasetOverview {
            title: self.title.clone(),
            total: self.questions.len(),
            single_answer: self.questions.len() - dual,
            dual_answer: dual,
        }
    }
}

/// Load just the questions of a question set file.
///
/// # Errors
///
/// See [`Dataset::from_path`].
pub fn load_questions(path: &Path) -> DatasetResult<Vec<Question>> {
    Dataset::from_path(path).map(|dataset| dataset.questions)
}

/// Counts describing a question set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    /// Optional display title.
    pub title: Option<String>,
    /// Number of questions.
    pub total: usize,
    /// Number of single-answer questions.
    pub single_answer: usize,
    /// Number of dual-answer questions.
    pub dual_answer: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_question_and_field() {
        let json = r#"[
            {"prompt": "A?", "choices": ["1", "2"], "answer": "1"},
            {"prompt": "B?", "answer": "1"}
        ]"#;
        let err = Dataset::from_json_str(json).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedQuestion { index: 1, .. }));
        let message = err.to_string();
        assert!(message.contains("question 2"), "{message}");
        assert!(message.contains("choices"), "{message}");
    }

    #[test]
    fn test_json_list() {
        let json = r#"[
            {"prompt": "A?", "choices": ["1", "2"], "answer": "1", "explanation": "e"},
            {"prompt": "B?", "choices": ["1", "2", "3"], "answer": ["1", "3"]}
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.title, None);
        assert_eq!(dataset.questions.len(), 2);
        assert!(dataset.questions[1].is_multiple_answer());
    }

    #[test]
    fn test_json_encoded_strings() {
        let json = r#"[
            "{\"question\": \"A?\", \"choices\": [\"x\", \"y\"], \"answer\": \"y\", \"reason\": \"r\"}"
        ]"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.questions[0].prompt(), "A?");
        assert_eq!(dataset.questions[0].explanation(), "r");
    }

    #[test]
    fn test_json_document_with_title() {
        let json = r#"{"title": "Primes", "questions": [
            {"prompt": "A?", "choices": ["2", "4"], "answer": "2"}
        ]}"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.title.as_deref(), Some("Primes"));
    }

    #[test]
    fn test_json_empty() {
        assert!(matches!(
            Dataset::from_json_str("[]"),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_invalid_question_index() {
        let json = r#"[
            {"prompt": "A?", "choices": ["1", "2"], "answer": "1"},
            {"prompt": "B?", "choices": ["1", "2"], "answer": "9"}
        ]"#;
        match Dataset::from_json_str(json) {
            Err(DatasetError::InvalidQuestion { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, QuestionError::AnswerNotInChoices("9".into()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_toml_layout() {
        let toml = r#"
title = "Arithmetic"

[[questions]]
prompt = "1 + 1?"
choices = ["1", "2"]
answer = "2"
explanation = "Basic addition."

[[questions]]
prompt = "Even numbers?"
choices = ["1", "2", "4"]
answer = ["2", "4"]
"#;
        let dataset = Dataset::from_toml_str(toml).unwrap();
        assert_eq!(dataset.title.as_deref(), Some("Arithmetic"));
        let overview = dataset.overview();
        assert_eq!(overview.total, 2);
        assert_eq!(overview.single_answer, 1);
        assert_eq!(overview.dual_answer, 1);
    }

    #[test]
    fn test_toml_without_questions_is_empty() {
        assert!(matches!(
            Dataset::from_toml_str("title = \"x\""),
            Err(DatasetError::Empty)
        ));
    }
}
