//! Data structures for the persisted session document.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::token::{random_token, Alphabet};

/// Length of a generated instance identifier.
pub const INSTANCE_ID_LEN: usize = 8;

/// Length of a generated record identifier.
pub const ENTRY_ID_LEN: usize = 35;

const FIRST_NAME_LEN: RangeInclusive<usize> = 3..=11;
const LAST_NAME_LEN: RangeInclusive<usize> = 2..=15;

/// Identifier shared by a session document and its log file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Wrap an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh 8-character `[0-9A-Z]` identifier.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(random_token(rng, INSTANCE_ID_LEN, Alphabet::UpperDigits))
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted session document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Generated once at creation, never changed afterwards.
    pub instance_id: InstanceId,
    /// When the session was started.
    pub started_at: DateTime<Utc>,
    /// One timestamp per resume, oldest first.
    #[serde(default)]
    pub resumed_at: Vec<DateTime<Utc>>,
    /// Records in insertion order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl SessionRecord {
    /// Create an empty document for `instance_id`, stamped with the current time.
    #[must_use]
    pub fn new(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            started_at: Utc::now(),
            resumed_at: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Create an empty document with a freshly generated identifier.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(InstanceId::generate(rng))
    }
}

/// A single business record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub first_name: String,
    pub last_name: String,
    /// 35-character token. Expected to be unique, never checked.
    pub identifier: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry stamped with the current time.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            identifier: identifier.into(),
            created_at: Utc::now(),
        }
    }

    /// Generate an entry with random lowercase names and a random identifier.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let first_len = rng.gen_range(FIRST_NAME_LEN);
        let last_len = rng.gen_range(LAST_NAME_LEN);
        Self::new(
            random_token(rng, first_len, Alphabet::Lower),
            random_token(rng, last_len, Alphabet::Lower),
            random_token(rng, ENTRY_ID_LEN, Alphabet::LowerDigits),
        )
    }
}
