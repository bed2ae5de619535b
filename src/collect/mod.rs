//! URL collection: extract, deduplicate against history, append to today's
//! partition.
//!
//! Nothing is written until every URL of the batch has been processed in
//! memory; the partition and the hash index are then saved once each.
//!
//! # Example
//!
//! ```no_run
//! use linkstash::{JsonFileStore, StorageLayout, collect_urls};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = JsonFileStore::new(StorageLayout::from_env());
//! let now = chrono::Local::now().naive_local();
//! let outcome = collect_urls(&store, &["https://example.com/post".to_string()], "user_input", now)?;
//! println!("{} new, {} skipped", outcome.new, outcome.skipped);
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::CollectError;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, instrument};

use crate::fingerprint::url_fingerprint;
use crate::parser::UrlScanner;
use crate::store::{Entry, IndexStore, Partition, PartitionStore};

/// Source label used for URLs given directly on the command line.
pub const DEFAULT_SOURCE: &str = "user_input";

/// Counts reported by a collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOutcome {
    /// URLs appended as new `pending` entries.
    pub new: usize,
    /// URLs whose fingerprint was already in the hash index.
    pub skipped: usize,
}

/// Appends every never-seen URL in `urls` to the partition for `now`'s date.
///
/// URLs are trimmed and empty strings ignored. A URL already present in the
/// hash index (including one added earlier in this same batch) is skipped,
/// whatever the status of its existing entry.
///
/// # Errors
///
/// Returns [`CollectError::Store`] if the index or partition cannot be
/// loaded or saved; in that case nothing from this batch has been persisted unless the
/// partition write succeeded and the index write failed.
#[instrument(skip(store, urls), fields(urls = urls.len(), source = %source))]
pub fn collect_urls<S>(
    store: &S,
    urls: &[String],
    source: &str,
    now: NaiveDateTime,
) -> Result<CollectOutcome, CollectError>
where
    S: PartitionStore + IndexStore,
{
    let today = now.date();
    let mut index = store.load_index()?;
    let mut partition = store
        .load_partition(today)?
        .unwrap_or_else(|| Partition::new(today));

    let mut outcome = CollectOutcome::default();
    for raw in urls {
        let url = raw.trim();
        if url.is_empty() {
            continue;
        }

        let fingerprint = url_fingerprint(url);
        if index.contains(&fingerprint) {
            debug!(url, fingerprint = %fingerprint, "already indexed");
            outcome.skipped += 1;
            continue;
        }

        partition.entries.push(Entry::new(url, source, now));
        index.record(&fingerprint, url, today);
        debug!(url, fingerprint = %fingerprint, "new entry");
        outcome.new += 1;
    }

    store.save_partition(&partition)?;
    store.save_index(&index)?;

    info!(
        new = outcome.new,
        skipped = outcome.skipped,
        partition = %partition.file_name(),
        "collection complete"
    );
    Ok(outcome)
}

/// Reads the document at `path` and scans it for URLs.
///
/// # Errors
///
/// Returns [`CollectError::SourceMissing`] if the file does not exist and
/// [`CollectError::SourceRead`] if it cannot be read as UTF-8.
pub fn read_document_urls(path: &Path, scanner: &UrlScanner) -> Result<Vec<String>, CollectError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            CollectError::source_missing(path)
        } else {
            CollectError::source_read(path, e)
        }
    })?;
    let urls = scanner.scan(&content);
    debug!(path = %path.display(), urls = urls.len(), "scanned source document");
    Ok(urls)
}
