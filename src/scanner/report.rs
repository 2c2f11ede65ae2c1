//! Append-only match report.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{PiiMatch, ScanError};

/// Report file that match lines are appended to.
///
/// The file is opened for each match and never truncated, so repeated scans
/// accumulate in the same report.
#[derive(Debug, Clone)]
pub struct Report {
    path: PathBuf,
}

impl Report {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one match line.
    pub fn append(&self, found: &PiiMatch) -> Result<(), ScanError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| ScanError::from_io(self.path.clone(), e))?;
        writeln!(file, "{found}").map_err(|e| ScanError::from_io(self.path.clone(), e))
    }
}
