//! Consistency checks run before a session is started or resumed.

use std::path::Path;

use super::data::InstanceId;
use super::io::SessionStore;
use super::sentinel::Sentinel;
use super::{FileRole, SessionError};

/// How the application was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create a new session. Neither file may exist.
    Start,
    /// Continue an existing session. Both files must exist and agree.
    Resume,
}

/// Check that `data_path` and `log_path` are usable for `mode`.
///
/// Returns the shared instance identifier in [`Mode::Resume`], `None` in
/// [`Mode::Start`]. Any error is meant to be fatal for the caller; nothing is
/// created or modified here.
///
/// # Errors
///
/// * [`SessionError::NotFound`] if the log directory is missing, or in resume
///   mode if either file is missing.
/// * [`SessionError::AlreadyExists`] in start mode if either file exists.
/// * [`SessionError::Corrupt`] if the data file cannot be parsed.
/// * [`SessionError::MissingSentinel`] if the log has no sentinel line.
/// * [`SessionError::IdentityMismatch`] if the identifiers differ.
pub fn validate(
    mode: Mode,
    data_path: &Path,
    log_path: &Path,
) -> Result<Option<InstanceId>, SessionError> {
    let log_dir = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if !log_dir.is_dir() {
        return Err(SessionError::NotFound {
            role: FileRole::LogDirectory,
            path: log_dir.to_path_buf(),
        });
    }

    match mode {
        Mode::Start => {
            if data_path.exists() {
                return Err(SessionError::AlreadyExists {
                    role: FileRole::DataFile,
                    path: data_path.to_path_buf(),
                });
            }
            if log_path.exists() {
                return Err(SessionError::AlreadyExists {
                    role: FileRole::LogFile,
                    path: log_path.to_path_buf(),
                });
            }
            Ok(None)
        }
        Mode::Resume => {
            if !data_path.is_file() {
                return Err(SessionError::NotFound {
                    role: FileRole::DataFile,
                    path: data_path.to_path_buf(),
                });
            }
            if !log_path.is_file() {
                return Err(SessionError::NotFound {
                    role: FileRole::LogFile,
                    path: log_path.to_path_buf(),
                });
            }

            let data_id = SessionStore::new(data_path).load()?.instance_id;
            let log_id = Sentinel::read_from(log_path)?.instance_id().clone();
            log::debug!("Data file UUID: {data_id}, log file UUID: {log_id}");

            if data_id != log_id {
                return Err(SessionError::IdentityMismatch {
                    data_id: data_id.to_string(),
                    log_id: log_id.to_string(),
                });
            }
            Ok(Some(data_id))
        }
    }
}
