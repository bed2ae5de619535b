//! Global fingerprint index: "have we ever seen this URL".

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// First-seen metadata recorded for a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    /// The URL that produced the fingerprint.
    pub url: String,
    /// Day the URL was first collected.
    #[serde(rename = "added_at")]
    pub first_seen: NaiveDate,
}

/// In-memory view of the hash index.
///
/// Loaded once per invocation through an [`IndexStore`](super::IndexStore),
/// mutated in memory, and flushed once at the end. Records are never removed
/// or reassigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashIndex {
    records: BTreeMap<String, IndexRecord>,
}

impl HashIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `fingerprint` has ever been recorded.
    #[must_use]
    pub fn contains(&self, fingerprint: &str) -> bool {
        self.records.contains_key(fingerprint)
    }

    /// Records `fingerprint` if absent. Returns `true` when inserted;
    /// re-recording an existing fingerprint is a silent no-op.
    pub fn record(&mut self, fingerprint: &str, url: &str, first_seen: NaiveDate) -> bool {
        if self.contains(fingerprint) {
            return false;
        }
        self.records.insert(
            fingerprint.to_string(),
            IndexRecord {
                url: url.to_string(),
                first_seen,
            },
        );
        true
    }

    /// Looks up the record for `fingerprint`.
    #[must_use]
    pub fn get(&self, fingerprint: &str) -> Option<&IndexRecord> {
        self.records.get(fingerprint)
    }

    /// Number of recorded fingerprints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
