//! Process exit codes and the JSON error shape printed by `--json-errors`.

use serde::Serialize;

/// How the process ends.
///
/// A run that finds nothing to review is not a failure, but scripts can
/// still tell it apart from one that left duplicate groups behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Duplicate groups were found (or remain after review).
    Success = 0,
    /// The command failed.
    GeneralError = 1,
    /// The scan finished with no duplicate groups.
    NoDuplicates = 2,
}

impl ExitCode {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Stable code printed in front of error messages.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DR000",
            Self::GeneralError => "DR001",
            Self::NoDuplicates => "DR002",
        }
    }

    /// Exit code for a finished scan.
    #[must_use]
    pub fn for_group_count(groups: usize) -> Self {
        if groups == 0 {
            Self::NoDuplicates
        } else {
            Self::Success
        }
    }
}

/// Error report written to stderr as JSON.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DR001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Build a report from an error chain; causes are joined with `: `.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
