//! Progress reporting for the PII scan using indicatif.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::scanner::{PiiMatch, ScanSummary};

/// Receives scan events as they happen.
pub trait ProgressCallback: Send + Sync {
    /// Called before a file is read.
    ///
    /// * `current` - Number of files started so far (1-based)
    /// * `path` - File being read
    fn on_file(&self, current: usize, path: &str);

    /// Called for every matching line, in scan order.
    fn on_match(&self, found: &PiiMatch);

    /// Called once after the walk finishes.
    fn on_finish(&self, _summary: &ScanSummary) {}
}

/// Spinner that shows the file being scanned and prints matches above it.
pub struct Progress {
    spinner: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a reporter. With `quiet`, no spinner is drawn but matches are
    /// still printed.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let spinner = if quiet {
            None
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed_precise}] {pos} files")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
            );
            pb.set_message("Scanning");
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        };
        Self {
            spinner: Mutex::new(spinner),
            quiet,
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl ProgressCallback for Progress {
    fn on_file(&self, current: usize, path: &str) {
        if let Ok(guard) = self.spinner.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.set_position(current as u64);
                pb.set_message(truncate_path(path, 40));
            }
        }
    }

    fn on_match(&self, found: &PiiMatch) {
        match self.spinner.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(pb) => pb.println(found.to_string()),
                None => println!("{found}"),
            },
            Err(_) => println!("{found}"),
        }
    }

    fn on_finish(&self, summary: &ScanSummary) {
        if let Ok(mut guard) = self.spinner.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_with_message(format!("Scanned {} files", summary.files_scanned));
            }
        }
    }
}

/// Shorten a path for display, keeping the file name.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name
            .chars()
            .skip(name_len.saturating_sub(max_len.saturating_sub(3)))
            .collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
