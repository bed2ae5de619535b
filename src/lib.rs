//! Linkstash Core Library
//!
//! A small personal knowledge-ingestion pipeline: collect URLs from free text,
//! deduplicate them against a persistent global index, fetch their content,
//! convert it to Markdown with locally mirrored images, and track per-URL
//! lifecycle status so downstream analysis can find unprocessed items.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`fingerprint`] - Short deterministic URL digests used as identifiers
//! - [`config`] - Storage root resolution and on-disk layout
//! - [`store`] - Hash index, date partitions, and normalized documents
//! - [`parser`] - URL scanning in free text
//! - [`collect`] - Batch ingestion of new URLs into today's partition
//! - [`fetch`] - Fetch-and-normalize of `pending` entries
//! - [`query`] - Read-only status scan across partitions

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod collect;
pub mod config;
pub mod fetch;
pub mod fingerprint;
pub mod parser;
pub mod query;
pub mod store;

// Re-export commonly used types
pub use collect::{CollectError, CollectOutcome, collect_urls, read_document_urls};
pub use config::StorageLayout;
pub use fetch::{FetchError, FetchStats, Fetcher, HttpClient};
pub use fingerprint::{image_fingerprint, url_fingerprint};
pub use parser::{TrailingStripper, UrlScanner};
pub use query::{QueryHit, QueryRecord, find_entries};
pub use store::{
    DocumentStore, Entry, EntryStatus, HashIndex, IndexRecord, IndexStore, JsonFileStore,
    Partition, PartitionStore, StoreError,
};
