//! Normalized document rendering: metadata header followed by the body.

use chrono::NaiveDateTime;

/// Timestamp format for `fetch_time`, second precision.
pub const FETCH_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Metadata written at the top of every normalized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader<'a> {
    pub source_url: &'a str,
    pub fetch_time: NaiveDateTime,
    pub fingerprint: &'a str,
    pub title: &'a str,
    /// Image references rewritten to local paths.
    pub images: usize,
}

impl DocumentHeader<'_> {
    /// Renders the header block, a blank line, then `body`.
    #[must_use]
    pub fn render(&self, body: &str) -> String {
        format!(
            "---\nsource_url: {}\nfetch_time: {}\nhash: {}\ntitle: {}\nimages: {}\n---\n\n{body}",
            self.source_url,
            self.fetch_time.format(FETCH_TIME_FORMAT),
            self.fingerprint,
            self.title,
            self.images,
        )
    }
}
