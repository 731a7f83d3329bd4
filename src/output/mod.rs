//! Output formatters for quiz results.
//!
//! - JSON reports for `run --report` and `check --output json`
//! - Colored plain text for the terminal
//!
//! # Example
//!
//! ```
//! use quizdeck::output::QuizReport;
//! use quizdeck::quiz::{Answer, Question, Session};
//!
//! let question =
//!     Question::new("2 + 2?", vec!["3".into(), "4".into()], Answer::single("4"), "").unwrap();
//! let session = Session::load(vec![question]).unwrap();
//!
//! let report = QuizReport::from_session(&session, None);
//! assert!(!report.completed);
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

pub use json::{CheckReport, JsonOutputError, QuizReport, ReportAttempt};
pub use text::{format_overview, format_quiz_summary};
