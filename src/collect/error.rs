//! Error types for URL collection.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while collecting URLs.
#[derive(Debug, Error)]
pub enum CollectError {
    /// The document to scan does not exist.
    #[error("source document not found: {path}\n  Suggestion: Check the path and try again")]
    SourceMissing {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The document exists but could not be read as UTF-8 text.
    #[error("failed to read source document {path}: {source}")]
    SourceRead {
        /// The document path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Persisting the partition or hash index failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CollectError {
    /// Creates a missing-document error.
    pub fn source_missing(path: impl Into<PathBuf>) -> Self {
        Self::SourceMissing { path: path.into() }
    }

    /// Creates an unreadable-document error.
    pub fn source_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceRead {
            path: path.into(),
            source,
        }
    }
}
