//! Session module for the stateful business application.
//!
//! A session is one JSON document in the working directory paired with one
//! plain-text log file. Both carry the same [`InstanceId`]; the document
//! stores it as a field, the log file as a sentinel line.
//!
//! # Architecture
//!
//! * [`data`]: Serializable models for the document and its entries.
//! * [`io`]: [`SessionStore`], full-document load and rewrite.
//! * [`sentinel`]: Rendering and parsing of the log sentinel line.
//! * [`validate`]: Pre-flight checks for `start` and `resume`.
//! * [`token`]: Random token generation.
//!
//! The document is rewritten in full on every mutation. There is no locking;
//! two processes writing the same file interleave and the last write wins.

pub mod data;
pub mod io;
pub mod sentinel;
pub mod token;
pub mod validate;

use std::fmt;
use std::path::PathBuf;

pub use data::{Entry, InstanceId, SessionRecord};
pub use io::SessionStore;
pub use sentinel::{Sentinel, SENTINEL_MARKER, SENTINEL_SEPARATOR};
pub use validate::{validate, Mode};

/// Which of the session's files an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// The JSON session document.
    DataFile,
    /// The session log file.
    LogFile,
    /// The directory that holds the log file.
    LogDirectory,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataFile => write!(f, "data file"),
            Self::LogFile => write!(f, "log file"),
            Self::LogDirectory => write!(f, "log directory"),
        }
    }
}

/// Errors produced by session operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A file that `start` would create is already present.
    #[error("An existing {role} has been detected at: {}", .path.display())]
    AlreadyExists { role: FileRole, path: PathBuf },

    /// A file or directory the operation needs is missing.
    #[error("Cannot detect the {role} at this path: {}", .path.display())]
    NotFound { role: FileRole, path: PathBuf },

    /// The document and the log file belong to different sessions.
    #[error("Instance UUID mismatch: data file has '{data_id}', log file has '{log_id}'")]
    IdentityMismatch { data_id: String, log_id: String },

    /// The log file has no line carrying the sentinel marker.
    #[error("No instance identifier found in log file: {}", .0.display())]
    MissingSentinel(PathBuf),

    /// The document exists but cannot be parsed.
    #[error("Data file is corrupt: {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other I/O failure.
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SessionError {
    /// Map an I/O error on `path` to `NotFound`, `AlreadyExists` or `Io`.
    pub(crate) fn from_io(role: FileRole, path: PathBuf, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { role, path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { role, path },
            _ => Self::Io { path, source },
        }
    }
}
