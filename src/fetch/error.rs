//! Error types for the fetch module.
//!
//! Every variant is caught at entry granularity by the fetcher and recorded
//! as the entry's `error` message, so messages carry their own context.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while fetching and normalizing one page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Non-success HTTP response.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The URL is malformed or cannot be resolved.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// File system error writing a mirrored image.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// HTML could not be parsed or rewritten.
    #[error("HTML processing failed: {reason}")]
    Html {
        /// What went wrong.
        reason: String,
    },

    /// HTML to Markdown conversion failed.
    #[error("markdown conversion failed: {source}")]
    Markdown {
        /// The converter's error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the normalized document failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FetchError {
    /// Creates a network error, promoting timeouts to [`FetchError::Timeout`].
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an HTML processing error.
    pub fn html(reason: impl std::fmt::Display) -> Self {
        Self::Html {
            reason: reason.to_string(),
        }
    }
}

// We intentionally do NOT implement `From<reqwest::Error>` or `From<std::io::Error>`:
// the variants need a URL or path that the source errors don't carry.
