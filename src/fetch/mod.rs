//! Fetch-and-normalize of `pending` entries.
//!
//! For each `pending` entry of one partition the fetcher retrieves the page,
//! decodes it, strips noise, selects the main region, mirrors images,
//! converts the region to Markdown, and writes the normalized document.
//! Entries are processed one at a time; a failure marks only that entry.
//! The partition is saved once, after every entry has been handled.
//!
//! # Example
//!
//! ```no_run
//! use chrono::Local;
//! use linkstash::{DocumentStore, Fetcher, HttpClient, JsonFileStore, StorageLayout};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let layout = StorageLayout::from_env();
//! let fetcher = Fetcher::new(HttpClient::new(), DocumentStore::new(&layout));
//! let store = JsonFileStore::new(layout);
//! if let Some(stats) = fetcher.fetch_partition(&store, Local::now().date_naive()).await? {
//!     println!("{} fetched, {} failed, {} skipped", stats.fetched, stats.failed, stats.skipped);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
pub mod content;
mod document;
mod encoding;
mod error;
pub mod images;
mod markdown;

pub use client::{FetchedPage, HttpClient};
pub use constants::{BROWSER_USER_AGENT, META_SNIFF_LIMIT, REQUEST_TIMEOUT_SECS};
pub use content::{ContentLocator, RegionStrategy};
pub use document::{DocumentHeader, FETCH_TIME_FORMAT};
pub use encoding::{CharsetSource, decode_body, resolve_encoding};
pub use error::FetchError;
pub use markdown::{collapse_blank_lines, to_markdown};

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{error, info, instrument};

use crate::store::{DocumentStore, PartitionStore, StoreError};

/// Per-partition fetch counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Entries now `fetched`.
    pub fetched: usize,
    /// Entries now `failed`.
    pub failed: usize,
    /// Entries not `pending`, left untouched.
    pub skipped: usize,
}

/// A normalized document written for one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub path: PathBuf,
    pub title: String,
    pub images: usize,
}

/// Fetches and normalizes pages into a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: HttpClient,
    docs: DocumentStore,
    locator: ContentLocator,
}

impl Fetcher {
    /// Creates a fetcher with the default content-region strategies.
    #[must_use]
    pub fn new(client: HttpClient, docs: DocumentStore) -> Self {
        Self {
            client,
            docs,
            locator: ContentLocator::default(),
        }
    }

    /// Replaces the content-region strategies.
    #[must_use]
    pub fn with_locator(mut self, locator: ContentLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Processes every `pending` entry in the partition for `date`.
    ///
    /// Returns `Ok(None)` if no such partition exists. Non-pending entries
    /// are counted as skipped and left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the partition cannot be loaded or
    /// saved. Per-entry failures are recorded on the entry instead.
    #[instrument(skip(self, store), fields(date = %date))]
    pub async fn fetch_partition<S: PartitionStore>(
        &self,
        store: &S,
        date: NaiveDate,
    ) -> Result<Option<FetchStats>, StoreError> {
        let Some(mut partition) = store.load_partition(date)? else {
            info!("no partition for date");
            return Ok(None);
        };

        let mut stats = FetchStats::default();
        for entry in &mut partition.entries {
            if !entry.is_pending() {
                stats.skipped += 1;
                continue;
            }

            info!(url = %entry.url, "fetching");
            match self.fetch_entry(&entry.url, &entry.fingerprint).await {
                Ok(saved) => {
                    info!(
                        url = %entry.url,
                        path = %saved.path.display(),
                        images = saved.images,
                        "saved document"
                    );
                    entry.mark_fetched();
                    stats.fetched += 1;
                }
                Err(e) => {
                    error!(url = %entry.url, error = %e, "fetch failed");
                    entry.mark_failed(e.to_string());
                    stats.failed += 1;
                }
            }
        }

        store.save_partition(&partition)?;
        info!(
            fetched = stats.fetched,
            failed = stats.failed,
            skipped = stats.skipped,
            "fetch complete"
        );
        Ok(Some(stats))
    }

    /// Fetches one URL and writes its normalized document under `fingerprint`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if retrieval, HTML processing, conversion, or
    /// the document write fails. Image download failures are not errors.
    pub async fn fetch_entry(&self, url: &str, fingerprint: &str) -> Result<SavedDocument, FetchError> {
        let page = self.client.get_page(url).await?;
        let html = decode_body(page.content_type.as_deref(), &page.body);
        let extracted = content::extract(&html, &self.locator)?;

        let mirrored = images::mirror_images(
            &self.client,
            &self.docs,
            &page.final_url,
            fingerprint,
            &extracted.image_sources,
        )
        .await;

        let region = content::rewrite_image_sources(&extracted.region_html, &mirrored.replacements)?;
        let body = to_markdown(&region)?;

        let header = DocumentHeader {
            source_url: url,
            fetch_time: Local::now().naive_local(),
            fingerprint,
            title: &extracted.title,
            images: mirrored.mirrored,
        };
        let path = self.docs.write(fingerprint, &header.render(&body))?;

        Ok(SavedDocument {
            path,
            title: extracted.title,
            images: mirrored.mirrored,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorageLayout;
    use crate::store::{Entry, EntryStatus, JsonFileStore, Partition};
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn setup() -> (Fetcher, JsonFileStore, TempDir) {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let layout = StorageLayout::new(temp_dir.path());
        let fetcher = Fetcher::new(HttpClient::new(), DocumentStore::new(&layout));
        (fetcher, JsonFileStore::new(layout), temp_dir)
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn partition_with(urls: &[&str]) -> Partition {
        let added = day().and_hms_opt(8, 0, 0).unwrap();
        let mut partition = Partition::new(day());
        partition.entries = urls.iter().map(|u| Entry::new(u, "test", added)).collect();
        partition
    }

    #[tokio::test]
    async fn test_missing_partition_returns_none() {
        let (fetcher, store, _temp_dir) = setup();
        assert!(fetcher.fetch_partition(&store, day()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_pending_entries_are_skipped() {
        let (fetcher, store, _temp_dir) = setup();
        let mut partition = partition_with(&["http://127.0.0.1:9/a", "http://127.0.0.1:9/b"]);
        partition.entries[0].mark_fetched();
        partition.entries[1].mark_failed("HTTP 500");
        store.save_partition(&partition).unwrap();

        let stats = fetcher.fetch_partition(&store, day()).await.unwrap().unwrap();
        assert_eq!(stats, FetchStats { fetched: 0, failed: 0, skipped: 2 });

        let reloaded = store.load_partition(day()).unwrap().unwrap();
        assert_eq!(reloaded.entries[1].error.as_deref(), Some("HTTP 500"));
    }

    #[tokio::test]
    async fn test_fetch_entry_writes_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/post"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                "<html><head><title>Hello</title></head><body><nav>menu</nav>\
                 <article><h1>Hello</h1><p>World</p></article></body></html>",
                "text/html",
            ))
            .mount(&server)
            .await;

        let (fetcher, _store, _temp_dir) = setup();
        let url = format!("{}/post", server.uri());
        let saved = fetcher.fetch_entry(&url, "0123456789abcdef").await.unwrap();

        assert_eq!(saved.title, "Hello");
        assert_eq!(saved.images, 0);
        let doc = std::fs::read_to_string(&saved.path).unwrap();
        assert!(doc.starts_with(&format!("---\nsource_url: {url}\n")), "{doc}");
        assert!(doc.contains("\nhash: 0123456789abcdef\n"));
        assert!(doc.contains("\ntitle: Hello\n"));
        assert!(doc.contains("World"));
        assert!(!doc.contains("menu"));
    }

    #[tokio::test]
    async fn test_failed_entry_records_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (fetcher, store, _temp_dir) = setup();
        let url = format!("{}/gone", server.uri());
        store.save_partition(&partition_with(&[url.as_str()])).unwrap();

        let stats = fetcher.fetch_partition(&store, day()).await.unwrap().unwrap();
        assert_eq!(stats, FetchStats { fetched: 0, failed: 1, skipped: 0 });

        let entry = &store.load_partition(day()).unwrap().unwrap().entries[0];
        assert_eq!(entry.status, EntryStatus::Failed);
        assert!(entry.error.as_deref().unwrap().contains("404"));
        assert!(!fetcher.docs.exists(&entry.fingerprint));
    }
}
