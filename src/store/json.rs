//! Structured-file backend: one JSON file per partition plus one for the index.
//!
//! Every write rewrites the whole file in place. There is no locking, no
//! version check and no atomic rename, so two concurrent invocations writing
//! the same file can lose updates.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::entry::{Entry, PARTITION_DATE_FORMAT, Partition, partition_file_name};
use super::error::StoreError;
use super::index::HashIndex;
use super::{IndexStore, PartitionStore};
use crate::config::StorageLayout;

/// JSON-file implementation of [`PartitionStore`] and [`IndexStore`].
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    layout: StorageLayout,
}

impl JsonFileStore {
    /// Creates a store over `layout`. Directories are created lazily on write.
    #[must_use]
    pub fn new(layout: StorageLayout) -> Self {
        Self { layout }
    }

    /// The layout this store reads and writes.
    #[must_use]
    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }
}

impl PartitionStore for JsonFileStore {
    #[instrument(level = "debug", skip(self))]
    fn load_partition(&self, date: NaiveDate) -> Result<Option<Partition>, StoreError> {
        let path = self.layout.urls_dir().join(partition_file_name(date));
        let Some(entries) = read_json::<Vec<Entry>>(&path)? else {
            debug!(path = %path.display(), "partition file absent");
            return Ok(None);
        };
        Ok(Some(Partition { date, entries }))
    }

    #[instrument(level = "debug", skip(self, partition), fields(date = %partition.date, entries = partition.entries.len()))]
    fn save_partition(&self, partition: &Partition) -> Result<(), StoreError> {
        let path = self.layout.urls_dir().join(partition.file_name());
        write_json(&path, &partition.entries)
    }

    fn list_partitions(&self) -> Result<Vec<NaiveDate>, StoreError> {
        let dir = self.layout.urls_dir();
        let read_dir = match fs::read_dir(&dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(dir, e)),
        };

        let mut dates = Vec::new();
        for dir_entry in read_dir {
            let path = dir_entry.map_err(|e| StoreError::io(&dir, e))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match NaiveDate::parse_from_str(stem, PARTITION_DATE_FORMAT) {
                Ok(date) => dates.push(date),
                Err(_) => debug!(path = %path.display(), "ignoring non-partition file"),
            }
        }
        dates.sort_unstable();
        Ok(dates)
    }
}

impl IndexStore for JsonFileStore {
    fn load_index(&self) -> Result<HashIndex, StoreError> {
        let path = self.layout.hash_index_file();
        Ok(read_json::<HashIndex>(&path)?.unwrap_or_default())
    }

    #[instrument(level = "debug", skip(self, index), fields(records = index.len()))]
    fn save_index(&self, index: &HashIndex) -> Result<(), StoreError> {
        write_json(&self.layout.hash_index_file(), index)
    }
}

/// Reads and parses `path`, returning `None` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io(path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::json(path, e))
}

/// Serializes `value` as pretty JSON and overwrites `path`, creating parents.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    let mut body = serde_json::to_vec_pretty(value).map_err(|e| StoreError::json(path, e))?;
    body.push(b'\n');
    fs::write(path, body).map_err(|e| StoreError::io(path, e))
}
