//! Normalized documents and their mirrored images.

use std::fs;
use std::path::PathBuf;

use super::error::StoreError;
use crate::config::StorageLayout;

/// File extension of normalized documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Locates and writes normalized documents keyed by fingerprint.
///
/// An image directory belongs to its document; nothing tracks or collects
/// it separately.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    docs_dir: PathBuf,
    images_dir: PathBuf,
}

impl DocumentStore {
    /// Creates a document store over `layout`.
    #[must_use]
    pub fn new(layout: &StorageLayout) -> Self {
        Self {
            docs_dir: layout.docs_dir(),
            images_dir: layout.images_dir(),
        }
    }

    /// Path of the document for `fingerprint`.
    #[must_use]
    pub fn document_path(&self, fingerprint: &str) -> PathBuf {
        self.docs_dir
            .join(format!("{fingerprint}.{DOCUMENT_EXTENSION}"))
    }

    /// Directory holding the images mirrored for `fingerprint`'s document.
    #[must_use]
    pub fn image_dir(&self, fingerprint: &str) -> PathBuf {
        self.images_dir.join(fingerprint)
    }

    /// Reference to a mirrored image as written inside the document, relative
    /// to the documents directory.
    #[must_use]
    pub fn image_reference(fingerprint: &str, file_name: &str) -> String {
        format!("images/{fingerprint}/{file_name}")
    }

    /// Whether a document exists for `fingerprint`.
    #[must_use]
    pub fn exists(&self, fingerprint: &str) -> bool {
        self.document_path(fingerprint).is_file()
    }

    /// Writes (or overwrites) the document for `fingerprint`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created or the
    /// file cannot be written.
    pub fn write(&self, fingerprint: &str, contents: &str) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.docs_dir).map_err(|e| StoreError::io(&self.docs_dir, e))?;
        let path = self.document_path(fingerprint);
        fs::write(&path, contents).map_err(|e| StoreError::io(&path, e))?;
        Ok(path)
    }
}
