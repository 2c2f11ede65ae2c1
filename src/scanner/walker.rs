//! Directory walker for the PII scan.
//!
//! Single-threaded traversal with walkdir. Entries are sorted by file name
//! so reports come out in a stable order. Only regular files are yielded;
//! symbolic links are not followed.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::ScanError;

/// Recursive file lister rooted at one directory.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Walk the tree, yielding file paths.
    ///
    /// Errors for individual entries are yielded rather than stopping the
    /// walk, so one unreadable directory does not end the scan.
    pub fn walk(&self) -> impl Iterator<Item = Result<PathBuf, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    if file_type.is_file() {
                        Some(Ok(entry.into_path()))
                    } else {
                        if file_type.is_symlink() {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                        }
                        None
                    }
                }
                Err(e) => Some(Err(self.handle_walk_error(e))),
            })
    }

    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);
        log::warn!("Walker error for {}: {}", path.display(), error);
        ScanError::from_io(path, std::io::Error::from(error))
    }
}
