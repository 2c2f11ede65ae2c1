//! Line matching against the name file.

use std::path::Path;

use super::{MatchMode, ScanError};

/// The name text and the rule used to compare lines against it.
#[derive(Debug, Clone)]
pub struct NamePattern {
    text: Vec<u8>,
    mode: MatchMode,
}

impl NamePattern {
    pub fn new(text: impl Into<Vec<u8>>, mode: MatchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// Read the whole name file.
    ///
    /// # Errors
    ///
    /// [`ScanError::NameFileNotFound`] if the file is missing.
    pub fn load(path: &Path, mode: MatchMode) -> Result<Self, ScanError> {
        let text = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::NameFileNotFound(path.to_path_buf()),
            _ => ScanError::from_io(path.to_path_buf(), e),
        })?;
        log::debug!(
            "Loaded name file {} ({} bytes, {} mode)",
            path.display(),
            text.len(),
            mode
        );
        Ok(Self::new(text, mode))
    }

    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Compare one line, terminator included, against the name text.
    #[must_use]
    pub fn is_match(&self, line: &[u8]) -> bool {
        match self.mode {
            MatchMode::WholeFile => line == self.text.as_slice(),
            MatchMode::Containment => {
                !line.is_empty()
                    && line.len() <= self.text.len()
                    && self.text.windows(line.len()).any(|w| w == line)
            }
        }
    }
}
