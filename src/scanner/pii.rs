//! The scan driver.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{NamePattern, PiiMatch, Report, ScanError, ScanSummary, Walker};
use crate::progress::ProgressCallback;

/// Result of a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub summary: ScanSummary,
    /// Matches in the order they were found.
    pub matches: Vec<PiiMatch>,
}

/// Scans every file under a root directory for lines matching a [`NamePattern`].
#[derive(Debug, Clone)]
pub struct PiiScanner {
    pattern: NamePattern,
    root: PathBuf,
}

impl PiiScanner {
    /// Create a scanner.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The loaded name text and match rule
    /// * `root` - Directory tree to scan; checked when [`PiiScanner::scan`] runs
    pub fn new(pattern: NamePattern, root: &Path) -> Self {
        Self {
            pattern,
            root: root.to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run the scan, appending each file's matches to `report` once the file
    /// has been read.
    ///
    /// Unreadable files are counted as skipped and the scan continues.
    ///
    /// # Errors
    ///
    /// [`ScanError::NotFound`] / [`ScanError::NotADirectory`] for a bad root,
    /// or any error writing the report.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use osba::scanner::{MatchMode, NamePattern, PiiScanner, Report};
    /// use std::path::Path;
    ///
    /// let pattern = NamePattern::load(Path::new(".NAME"), MatchMode::WholeFile)?;
    /// let scanner = PiiScanner::new(pattern, Path::new("/mnt/nfs/rockyheights"));
    /// let outcome = scanner.scan(&Report::new("BREACH---PII_matched_data.txt"), None)?;
    /// println!("{} matches", outcome.summary.matches);
    /// # Ok::<(), osba::scanner::ScanError>(())
    /// ```
    pub fn scan(
        &self,
        report: &Report,
        progress: Option<&dyn ProgressCallback>,
    ) -> Result<ScanOutcome, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        log::info!(
            "Scanning {} ({} mode)",
            self.root.display(),
            self.pattern.mode()
        );

        let mut outcome = ScanOutcome::default();
        for entry in Walker::new(&self.root).walk() {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    log::debug!("Skipping entry: {e}");
                    outcome.summary.skipped += 1;
                    continue;
                }
            };

            if let Some(p) = progress {
                p.on_file(outcome.summary.files_scanned + 1, &path.to_string_lossy());
            }

            let (lines, matches) = match self.scan_file(&path) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("Skipping unreadable file: {e}");
                    outcome.summary.skipped += 1;
                    continue;
                }
            };
            outcome.summary.files_scanned += 1;
            outcome.summary.lines_scanned += lines;

            for found in matches {
                report.append(&found)?;
                if let Some(p) = progress {
                    p.on_match(&found);
                }
                outcome.summary.matches += 1;
                outcome.matches.push(found);
            }
        }

        if let Some(p) = progress {
            p.on_finish(&outcome.summary);
        }
        log::info!(
            "Scan complete: {} files, {} lines, {} matches, {} skipped",
            outcome.summary.files_scanned,
            outcome.summary.lines_scanned,
            outcome.summary.matches,
            outcome.summary.skipped
        );
        Ok(outcome)
    }

    /// Read one file, returning its line count and matching lines.
    fn scan_file(&self, path: &Path) -> Result<(usize, Vec<PiiMatch>), ScanError> {
        let file = File::open(path).map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut line_number = 0;
        let mut matches = Vec::new();

        loop {
            line.clear();
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|e| ScanError::from_io(path.to_path_buf(), e))?;
            if read == 0 {
                return Ok((line_number, matches));
            }
            line_number += 1;

            if self.pattern.is_match(&line) {
                log::debug!("Match at {}:{}", path.display(), line_number);
                matches.push(PiiMatch {
                    path: path.to_path_buf(),
                    line_number,
                    line: String::from_utf8_lossy(&line)
                        .trim_end_matches(['\n', '\r'])
                        .to_string(),
                });
            }
        }
    }
}
