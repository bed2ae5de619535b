//! Read-only status scan across date partitions.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::store::{DocumentStore, Entry, EntryStatus, PartitionStore, StoreError};

/// One matching entry with where it lives and whether its document exists.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHit {
    pub entry: Entry,
    /// File name of the partition holding the entry, e.g. `2024-03-01.json`.
    pub date_file: String,
    /// Whether the normalized document for the entry is on disk.
    pub raw_doc_exists: bool,
}

/// Machine-readable projection of a [`QueryHit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRecord {
    pub hash: String,
    pub url: String,
    pub date_file: String,
    pub raw_doc_exists: bool,
}

impl From<&QueryHit> for QueryRecord {
    fn from(hit: &QueryHit) -> Self {
        Self {
            hash: hit.entry.fingerprint.clone(),
            url: hit.entry.url.clone(),
            date_file: hit.date_file.clone(),
            raw_doc_exists: hit.raw_doc_exists,
        }
    }
}

/// Returns every entry with `status`, from one partition or all of them.
///
/// With `date = None`, partitions are scanned in date order. A missing
/// partition for an explicit date yields no hits.
///
/// # Errors
///
/// Returns [`StoreError`] if a partition file cannot be read or parsed.
#[instrument(skip(store, docs), fields(status = %status))]
pub fn find_entries<S: PartitionStore>(
    store: &S,
    docs: &DocumentStore,
    date: Option<NaiveDate>,
    status: &EntryStatus,
) -> Result<Vec<QueryHit>, StoreError> {
    let dates = match date {
        Some(date) => vec![date],
        None => store.list_partitions()?,
    };

    let mut hits = Vec::new();
    for date in dates {
        let Some(partition) = store.load_partition(date)? else {
            debug!(%date, "partition not found");
            continue;
        };
        let date_file = partition.file_name();
        hits.extend(
            partition
                .entries
                .into_iter()
                .filter(|entry| &entry.status == status)
                .map(|entry| QueryHit {
                    raw_doc_exists: docs.exists(&entry.fingerprint),
                    date_file: date_file.clone(),
                    entry,
                }),
        );
    }

    debug!(hits = hits.len(), "status query complete");
    Ok(hits)
}
