//! Structured error handling and exit codes.

use serde::Serialize;

use crate::scanner::ScanError;
use crate::session::SessionError;

/// Exit codes shared by both binaries.
///
/// - 0: Success
/// - 1: General error (unexpected failure)
/// - 2: A session file already exists
/// - 3: A required file or directory is missing
/// - 4: Data file and log file carry different identifiers
/// - 5: The data file cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    AlreadyExists = 2,
    NotFound = 3,
    IdentityMismatch = 4,
    Corrupt = 5,
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
            Self::Success => "OS000",
            Self::GeneralError => "OS001",
            Self::AlreadyExists => "OS002",
            Self::NotFound => "OS003",
            Self::IdentityMismatch => "OS004",
            Self::Corrupt => "OS005",
        }
    }

    /// Pick the exit code for an error by looking for a known cause in its chain.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<SessionError>() {
                return Self::for_session_error(e);
            }
            if let Some(e) = cause.downcast_ref::<ScanError>() {
                return match e {
                    ScanError::NameFileNotFound(_)
                    | ScanError::NotFound(_)
                    | ScanError::NotADirectory(_) => Self::NotFound,
                    _ => Self::GeneralError,
                };
            }
        }
        Self::GeneralError
    }

    #[must_use]
    pub fn for_session_error(err: &SessionError) -> Self {
        match err {
            SessionError::AlreadyExists { .. } => Self::AlreadyExists,
            SessionError::NotFound { .. } => Self::NotFound,
            SessionError::IdentityMismatch { .. } | SessionError::MissingSentinel(_) => {
                Self::IdentityMismatch
            }
            SessionError::Corrupt { .. } => Self::Corrupt,
            SessionError::Io { .. } => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "OS004")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
