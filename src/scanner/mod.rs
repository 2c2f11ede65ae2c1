//! PII line scanner.
//!
//! Walks a directory tree, reads every file line by line and compares each
//! line with the text of a name file. Matching lines are printed and
//! appended to a report.
//!
//! # Architecture
//!
//! - [`walker`]: Directory traversal
//! - [`matcher`]: [`NamePattern`], the line comparison
//! - [`report`]: Append-only report file
//! - [`pii`]: [`PiiScanner`], which ties the three together
//!
//! # Match semantics
//!
//! The comparison is deliberately naive and two readings of it exist, see
//! [`MatchMode`]. The default compares every line with the *entire* name
//! file, which can only match when that file holds a single line.
//!
//! # Example
//!
//! ```no_run
//! use osba::scanner::{MatchMode, NamePattern, PiiScanner, Report};
//! use std::path::Path;
//!
//! let pattern = NamePattern::load(Path::new(".NAME"), MatchMode::WholeFile)?;
//! let scanner = PiiScanner::new(pattern, Path::new("/srv/data"));
//! let outcome = scanner.scan(&Report::new("report.txt"), None)?;
//! println!("{} matches", outcome.summary.matches);
//! # Ok::<(), osba::scanner::ScanError>(())
//! ```

pub mod matcher;
pub mod pii;
pub mod report;
pub mod walker;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use matcher::NamePattern;
pub use pii::{PiiScanner, ScanOutcome};
pub use report::Report;
pub use walker::Walker;

/// How a scanned line is compared with the name file text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// The line, terminator included, must equal the whole name file.
    #[default]
    WholeFile,
    /// The line, terminator included, must occur anywhere in the name file.
    Containment,
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WholeFile => write!(f, "whole-file"),
            Self::Containment => write!(f, "containment"),
        }
    }
}

/// A line that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiiMatch {
    /// File the line was read from.
    pub path: PathBuf,
    /// 1-based line number.
    pub line_number: usize,
    /// Line text without its terminator, lossily decoded.
    pub line: String,
}

impl fmt::Display for PiiMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*** PII Match: {}    {}", self.line, self.path.display())
    }
}

/// Counters for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files_scanned: usize,
    pub lines_scanned: usize,
    pub matches: usize,
    /// Files or directories that could not be read.
    pub skipped: usize,
}

/// Errors that can occur during a scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The name file is missing.
    #[error("Name file not found: {0}")]
    NameFileNotFound(PathBuf),

    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub(crate) fn from_io(path: PathBuf, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            _ => Self::Io {
                path,
                source: error,
            },
        }
    }
}
