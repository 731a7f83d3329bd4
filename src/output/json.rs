//! JSON output for quiz results and question set checks.
//!
//! # Report Schema
//!
//! ```json
//! {
//!   "title": "Planets",
//!   "total": 2,
//!   "answered": 2,
//!   "score": 1,
//!   "percent": 50.0,
//!   "completed": true,
//!   "finished_at": "2024-05-01T12:00:00Z",
//!   "attempts": [
//!     {
//!       "position": 1,
//!       "prompt": "Largest planet?",
//!       "user_answer": ["Saturn"],
//!       "correct_answer": ["Jupiter"],
//!       "correct": false
//!     }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dataset::DatasetOverview;
use crate::quiz::{Attempt, Session};

/// One answered question in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportAttempt {
    /// One-based question number
    pub position: usize,
    /// Question text
    pub prompt: String,
    /// Choices the user submitted, sorted
    pub user_answer: Vec<String>,
    /// Correct choices, sorted
    pub correct_answer: Vec<String>,
    /// Whether the submission was correct
    pub correct: bool,
}

impl ReportAttempt {
    fn from_attempt(position: usize, attempt: &Attempt) -> Self {
        let mut correct_answer: Vec<String> = attempt
            .question()
            .answer()
            .values()
            .map(str::to_string)
            .collect();
        correct_answer.sort();

        Self {
            position,
            prompt: attempt.question().prompt().to_string(),
            user_answer: attempt.user_answer().iter().cloned().collect(),
            correct_answer,
            correct: attempt.was_correct(),
        }
    }
}

/// Result of a quiz run.
#[derive(Debug, Clone, Serialize)]
pub struct QuizReport {
    /// Question set title, if it has one
    pub title: Option<String>,
    /// Number of questions in the set
    pub total: usize,
    /// Number of submitted answers
    pub answered: usize,
    /// Number of correct answers
    pub score: usize,
    /// Score as a percentage of all questions
    pub percent: f64,
    /// Whether the quiz was finished
    pub completed: bool,
    /// When the report was created
    pub finished_at: DateTime<Utc>,
    /// Every submitted answer in question order
    pub attempts: Vec<ReportAttempt>,
}

impl QuizReport {
    /// Build a report from the final state of a session.
    #[must_use]
    pub fn from_session(session: &Session, title: Option<String>) -> Self {
        Self {
            title,
            total: session.question_count(),
            answered: session.attempts().len(),
            score: session.score(),
            percent: session.final_score_percent(),
            completed: session.is_complete(),
            finished_at: Utc::now(),
            attempts: session
                .attempts()
                .iter()
                .enumerate()
                .map(|(index, attempt)| ReportAttempt::from_attempt(index + 1, attempt))
                .collect(),
        }
    }

    /// Serialize to compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(self, writer, pretty)
    }

    /// Write the pretty-printed report to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), JsonOutputError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, true)?;
        writer.flush()?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

/// Result of checking a question set.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// The checked file
    pub path: String,
    /// Always true; invalid sets are reported as errors
    pub valid: bool,
    /// Question counts
    #[serde(flatten)]
    pub overview: DatasetOverview,
}

impl CheckReport {
    /// Create a check report for a successfully loaded question set.
    #[must_use]
    pub fn new(path: &Path, overview: DatasetOverview) -> Self {
        Self {
            path: path.display().to_string(),
            valid: true,
            overview,
        }
    }

    /// Write JSON to a writer, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W, pretty: bool) -> Result<(), JsonOutputError> {
        write_json(self, writer, pretty)
    }
}

fn write_json<T: Serialize, W: Write>(
    value: &T,
    writer: &mut W,
    pretty: bool,
) -> Result<(), JsonOutputError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error while writing JSON: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Answer, Intent, Question};

    fn finished_session() -> Session {
        let questions = vec![
            Question::new(
                "Largest planet?",
                vec!["Saturn".into(), "Jupiter".into()],
                Answer::single("Jupiter"),
                "",
            )
            .unwrap(),
            Question::new(
                "Gas giants?",
                vec!["Mars".into(), "Saturn".into(), "Jupiter".into()],
                Answer::dual("Saturn", "Jupiter"),
                "",
            )
            .unwrap(),
        ];
        Session::load(questions)
            .unwrap()
            .step(Intent::Select("Saturn".into()))
            .step(Intent::Submit)
            .step(Intent::Next)
            .step(Intent::Select("Saturn".into()))
            .step(Intent::Select("Jupiter".into()))
            .step(Intent::Submit)
            .step(Intent::Next)
    }

    #[test]
    fn test_report_from_session() {
        let report = QuizReport::from_session(&finished_session(), Some("Planets".into()));
        assert_eq!(report.total, 2);
        assert_eq!(report.answered, 2);
        assert_eq!(report.score, 1);
        assert_eq!(report.percent, 50.0);
        assert!(report.completed);
        assert!(!report.attempts[0].correct);
        assert_eq!(report.attempts[0].user_answer, vec!["Saturn".to_string()]);
        assert_eq!(
            report.attempts[1].correct_answer,
            vec!["Jupiter".to_string(), "Saturn".to_string()]
        );
    }

    #[test]
    fn test_report_json_fields() {
        let report = QuizReport::from_session(&finished_session(), None);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["score"], 1);
        assert_eq!(value["completed"], true);
        assert!(value["title"].is_null());
        assert!(value["finished_at"].is_string());
        assert_eq!(value["attempts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_write_to() {
        let report = QuizReport::from_session(&finished_session(), None);
        let mut buffer = Vec::new();
        report.write_to(&mut buffer, false).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_check_report_flattens_overview() {
        let overview = DatasetOverview {
            title: None,
            total: 3,
            single_answer: 2,
            dual_answer: 1,
        };
        let report = CheckReport::new(Path::new("q.json"), overview);
        let mut buffer = Vec::new();
        report.write_to(&mut buffer, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["total"], 3);
        assert_eq!(value["dual_answer"], 1);
    }
}
