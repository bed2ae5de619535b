//! Ingestion entries and date partitions.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::fingerprint::url_fingerprint;

/// Lifecycle status of an ingestion entry.
///
/// `Pending` is the only non-terminal state. Statuses written by later stages
/// are carried through untouched as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntryStatus {
    /// Collected, waiting to be fetched.
    Pending,
    /// Fetched and normalized successfully.
    Fetched,
    /// Fetch failed; the entry's `error` holds the reason.
    Failed,
    /// Any other status string (set outside this pipeline).
    Other(String),
}

impl EntryStatus {
    /// Returns the persisted string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Fetched => "fetched",
            Self::Failed => "failed",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for EntryStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "fetched" => Self::Fetched,
            "failed" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for EntryStatus {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<EntryStatus> for String {
    fn from(status: EntryStatus) -> Self {
        match status {
            EntryStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// One URL's ingestion record within a date partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// The URL as collected (trimmed).
    pub url: String,
    /// Fingerprint of `url`; also names the normalized document.
    #[serde(rename = "hash")]
    pub fingerprint: String,
    /// Free-text label describing where the URL came from.
    pub source: String,
    /// When the entry was collected (local time, second precision).
    #[serde(with = "seconds")]
    pub added_at: NaiveDateTime,
    /// Current lifecycle status.
    pub status: EntryStatus,
    /// Labels attached by later stages; empty at collection time.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Failure message when `status` is `failed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Fields written by other stages, preserved across rewrites.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entry {
    /// Creates a `pending` entry for `url` with no tags.
    #[must_use]
    pub fn new(url: &str, source: &str, added_at: NaiveDateTime) -> Self {
        let url = url.trim();
        Self {
            url: url.to_string(),
            fingerprint: url_fingerprint(url),
            source: source.to_string(),
            added_at: truncate_to_seconds(added_at),
            status: EntryStatus::Pending,
            tags: Vec::new(),
            error: None,
            extra: Map::new(),
        }
    }

    /// Whether the entry still awaits fetching.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == EntryStatus::Pending
    }

    /// Records a successful fetch.
    pub fn mark_fetched(&mut self) {
        self.status = EntryStatus::Fetched;
        self.error = None;
    }

    /// Records a failed fetch with its reason.
    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = EntryStatus::Failed;
        self.error = Some(error.into());
    }
}

/// The ordered entries collected on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// The partition's day.
    pub date: NaiveDate,
    /// Entries in insertion order; never deleted.
    pub entries: Vec<Entry>,
}

impl Partition {
    /// Creates an empty partition for `date`.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            entries: Vec::new(),
        }
    }

    /// The partition's file name (`YYYY-MM-DD.json`).
    #[must_use]
    pub fn file_name(&self) -> String {
        partition_file_name(self.date)
    }
}

/// File name of the partition for `date`.
#[must_use]
pub fn partition_file_name(date: NaiveDate) -> String {
    format!("{}.json", date.format(PARTITION_DATE_FORMAT))
}

/// `strftime` format of a partition's date.
pub const PARTITION_DATE_FORMAT: &str = "%Y-%m-%d";

fn truncate_to_seconds(at: NaiveDateTime) -> NaiveDateTime {
    use chrono::Timelike;
    at.with_nanosecond(0).unwrap_or(at)
}

/// `YYYY-MM-DDTHH:MM:SS` serialization for timestamps.
mod seconds {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(at: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&at.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        // Accept fractional seconds written by other tools.
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| raw.parse::<NaiveDateTime>())
            .map_err(serde::de::Error::custom)
    }
}
