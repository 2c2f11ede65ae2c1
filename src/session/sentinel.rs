//! The sentinel line that ties a log file to its session document.
//!
//! When a session starts, the log receives a line whose message is
//!
//! ```text
//! Instance UUID     : ABC12345
//! ```
//!
//! On resume the log is searched for the first line containing
//! [`SENTINEL_MARKER`]; the identifier is the text after the first `": "` on
//! that line, with surrounding whitespace, double quotes and commas removed.
//! The line may carry any prefix (timestamp, logger name, level).

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::data::InstanceId;
use super::{FileRole, SessionError};

/// Token that marks the sentinel line.
pub const SENTINEL_MARKER: &str = "UUID";

const LABEL: &str = "Instance UUID     ";
/// Separates the label from the identifier on the sentinel line.
pub const SENTINEL_SEPARATOR: &str = ": ";

/// Structured view of the sentinel line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentinel {
    instance_id: InstanceId,
}

impl Sentinel {
    pub fn new(instance_id: InstanceId) -> Self {
        Self { instance_id }
    }

    #[must_use]
    pub fn instance_id(&self) -> &InstanceId {
        &self.instance_id
    }

    /// The log message that carries this sentinel.
    ///
    /// ```
    /// use osba::session::{InstanceId, Sentinel};
    ///
    /// let sentinel = Sentinel::new(InstanceId::new("ABC12345"));
    /// assert_eq!(sentinel.message(), "Instance UUID     : ABC12345");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        format!("{LABEL}{SENTINEL_SEPARATOR}{}", self.instance_id)
    }

    /// Parse a single line. Returns `None` when the line has no marker.
    ///
    /// A marker line without a `": "` separator yields an empty identifier.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        if !line.contains(SENTINEL_MARKER) {
            return None;
        }
        let value = line
            .split_once(SENTINEL_SEPARATOR)
            .map_or("", |(_, rest)| rest)
            .replace(['"', ','], "");
        Some(Self::new(InstanceId::new(value.trim())))
    }

    /// Scan `reader` and return the first sentinel found.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so binary noise in a
    /// log does not hide a later sentinel.
    pub fn find<R: BufRead>(mut reader: R) -> std::io::Result<Option<Self>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            if let Some(sentinel) = Self::parse_line(&String::from_utf8_lossy(&buf)) {
                return Ok(Some(sentinel));
            }
        }
    }

    /// Read the sentinel from the log file at `path`.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if the file is missing,
    /// [`SessionError::MissingSentinel`] if no line carries the marker.
    pub fn read_from(path: &Path) -> Result<Self, SessionError> {
        let file = File::open(path)
            .map_err(|e| SessionError::from_io(FileRole::LogFile, path.to_path_buf(), e))?;
        Self::find(BufReader::new(file))
            .map_err(|source| SessionError::Io {
                path: path.to_path_buf(),
                source,
            })?
            .ok_or_else(|| SessionError::MissingSentinel(path.to_path_buf()))
    }
}
