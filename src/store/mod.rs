//! Persistent state: the hash index, date partitions, and normalized documents.
//!
//! # Overview
//!
//! - [`HashIndex`] - global fingerprint → first-seen record map
//! - [`Partition`] / [`Entry`] - per-day ingestion entries with [`EntryStatus`]
//! - [`PartitionStore`] / [`IndexStore`] - storage interface
//! - [`JsonFileStore`] - structured-file backend (no concurrent-writer safety)
//! - [`DocumentStore`] - normalized documents and image directories
//!
//! Both stores follow load-whole, mutate-in-memory, write-whole. A different
//! backend (transactional key-value, append-only log) can implement the same
//! traits without touching the collector or fetcher.

mod documents;
mod entry;
mod error;
mod index;
mod json;

pub use documents::{DOCUMENT_EXTENSION, DocumentStore};
pub use entry::{Entry, EntryStatus, PARTITION_DATE_FORMAT, Partition, partition_file_name};
pub use error::StoreError;
pub use index::{HashIndex, IndexRecord};
pub use json::JsonFileStore;

use chrono::NaiveDate;

/// Read/write access to date partitions.
pub trait PartitionStore {
    /// Loads the partition for `date`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the partition exists but cannot be read or parsed.
    fn load_partition(&self, date: NaiveDate) -> Result<Option<Partition>, StoreError>;

    /// Replaces the stored partition with `partition` as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the partition cannot be written.
    fn save_partition(&self, partition: &Partition) -> Result<(), StoreError>;

    /// Dates of all stored partitions, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the partition listing cannot be read.
    fn list_partitions(&self) -> Result<Vec<NaiveDate>, StoreError>;
}

/// Read/write access to the hash index.
pub trait IndexStore {
    /// Loads the full index; a never-written index is empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the index exists but cannot be read or parsed.
    fn load_index(&self) -> Result<HashIndex, StoreError>;

    /// Replaces the stored index with `index` as a whole.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the index cannot be written.
    fn save_index(&self, index: &HashIndex) -> Result<(), StoreError>;
}
