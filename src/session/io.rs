//! I/O operations for the session document.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

use super::data::{Entry, SessionRecord};
use super::{FileRole, SessionError};

/// Handle to the session document at a fixed path.
///
/// Every mutating call loads the whole document, changes it in memory and
/// rewrites the file. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store for the document at `path`. Does not touch the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a document is present.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create a new document with a freshly generated instance identifier.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyExists`] if a file is already present at the path.
    pub fn create(&self) -> Result<SessionRecord, SessionError> {
        self.create_from(SessionRecord::generate(&mut rand::thread_rng()))
    }

    /// Persist `record` as a new document.
    ///
    /// The file is opened with `create_new`, so an existing document is never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyExists`] if a file is present,
    /// [`SessionError::NotFound`] if the parent directory is missing, or
    /// [`SessionError::Io`] if the write fails.
    pub fn create_from(&self, record: SessionRecord) -> Result<SessionRecord, SessionError> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| SessionError::from_io(FileRole::DataFile, self.path.clone(), e))?;
        self.write_record(&mut file, &record)?;
        log::debug!(
            "Created session {} at {}",
            record.instance_id,
            self.path.display()
        );
        Ok(record)
    }

    /// Load the document.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if absent, [`SessionError::Corrupt`] if the
    /// content is not a valid session document.
    pub fn load(&self) -> Result<SessionRecord, SessionError> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::from_io(FileRole::DataFile, self.path.clone(), e))?;
        serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Append a resume timestamp and rewrite the document.
    ///
    /// # Errors
    ///
    /// Same as [`SessionStore::load`], plus [`SessionError::Io`] if the
    /// rewrite fails.
    pub fn resume(&self) -> Result<SessionRecord, SessionError> {
        let mut record = self.load()?;
        record.resumed_at.push(Utc::now());
        self.save(&record)?;
        Ok(record)
    }

    /// Append one entry and rewrite the document.
    ///
    /// Existing entries are never reordered or changed.
    ///
    /// # Arguments
    ///
    /// * `entry` - The record to append
    ///
    /// # Errors
    ///
    /// Same as [`SessionStore::resume`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use osba::session::{Entry, SessionStore};
    ///
    /// let store = SessionStore::new("osba_data_file.dat");
    /// let record = store.add_entry(Entry::new("Jane", "Doe", "abc123"))?;
    /// assert_eq!(record.entries.last().unwrap().identifier, "abc123");
    /// # Ok::<(), osba::session::SessionError>(())
    /// ```
    pub fn add_entry(&self, entry: Entry) -> Result<SessionRecord, SessionError> {
        self.add_entries(std::iter::once(entry))
    }

    /// Append entries in order with a single rewrite.
    ///
    /// # Errors
    ///
    /// Same as [`SessionStore::resume`].
    pub fn add_entries<I>(&self, entries: I) -> Result<SessionRecord, SessionError>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut record = self.load()?;
        record.entries.extend(entries);
        self.save(&record)?;
        Ok(record)
    }

    /// Append `count` randomly generated entries with a single rewrite.
    pub fn seed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
    ) -> Result<SessionRecord, SessionError> {
        let entries: Vec<Entry> = (0..count).map(|_| Entry::random(rng)).collect();
        self.add_entries(entries)
    }

    /// Overwrite the document with `record`.
    ///
    /// The file is truncated and written in full; there is no locking.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotFound`] if the directory is gone, otherwise
    /// [`SessionError::Io`].
    pub fn save(&self, record: &SessionRecord) -> Result<(), SessionError> {
        let mut file = File::create(&self.path)
            .map_err(|e| SessionError::from_io(FileRole::DataFile, self.path.clone(), e))?;
        self.write_record(&mut file, record)
    }

    /// The document as pretty-printed JSON, for display.
    pub fn to_pretty_json(&self) -> Result<String, SessionError> {
        let record = self.load()?;
        serde_json::to_string_pretty(&record).map_err(|source| SessionError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_record(&self, file: &mut File, record: &SessionRecord) -> Result<(), SessionError> {
        let json = serde_json::to_string_pretty(record).map_err(|source| {
            SessionError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .map_err(|source| SessionError::Io {
                path: self.path.clone(),
                source,
            })
    }
}
