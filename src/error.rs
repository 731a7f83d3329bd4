//! Structured error handling and exit codes.

use serde::Serialize;

use crate::dataset::DatasetError;
use crate::quiz::QuizError;

/// Exit codes for the quizdeck application.
///
/// - 0: Success (quiz completed, or the question set is valid)
/// - 1: General error (unexpected failure)
/// - 2: Invalid question set (unreadable, malformed or empty)
/// - 3: Incomplete (the user quit before finishing the quiz)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the quiz was completed or the check passed.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// The question set could not be loaded.
    InvalidDataset = 2,
    /// The quiz was left before the last question.
    Incomplete = 3,
    /// Interrupted: the run was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "QD000",
            Self::GeneralError => "QD001",
            Self::InvalidDataset => "QD002",
            Self::Incomplete => "QD003",
            Self::Interrupted => "QD130",
        }
    }

    /// Pick the exit code for an error returned by `run_app`.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        let is_dataset = err.chain().any(|cause| {
            cause.downcast_ref::<DatasetError>().is_some()
                || cause.downcast_ref::<QuizError>().is_some()
        });
        if is_dataset {
            Self::InvalidDataset
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "QD002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidDataset.as_i32(), 2);
        assert_eq!(ExitCode::Incomplete.as_i32(), 3);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
        assert_eq!(ExitCode::Incomplete.code_prefix(), "QD003");
    }

    #[test]
    fn test_for_error_detects_dataset_errors() {
        let err = Err::<(), _>(DatasetError::Empty)
            .context("Failed to load question set")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::InvalidDataset);

        let err = anyhow::anyhow!("terminal went away");
        assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    }

    #[test]
    fn test_structured_error_includes_causes() {
        let err = Err::<(), _>(DatasetError::Empty)
            .context("Failed to load question set")
            .unwrap_err();
        let structured = StructuredError::new(&err, ExitCode::InvalidDataset);
        assert_eq!(structured.code, "QD002");
        assert!(structured.message.contains("empty"));
        assert!(!structured.interrupted);
    }
}
