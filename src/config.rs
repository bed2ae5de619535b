//! Storage root resolution and on-disk layout.
//!
//! Everything the pipeline persists lives under one storage root:
//!
//! ```text
//! <root>/
//!   url-hashes.json          global hash index
//!   urls/YYYY-MM-DD.json     date partitions
//!   raw-docs/<hash>.md       normalized documents
//!   raw-docs/images/<hash>/  mirrored images per document
//! ```

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable selecting the storage root.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Storage root used when [`DATA_DIR_ENV`] is unset, relative to `$HOME`.
pub const DEFAULT_DATA_DIR: &str = ".linkstash/data";

const URLS_DIR: &str = "urls";
const HASH_INDEX_FILE: &str = "url-hashes.json";
const DOCS_DIR: &str = "raw-docs";
const IMAGES_DIR: &str = "images";

/// Resolved file locations under a storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    /// Creates a layout rooted at `root` (no directories are created).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves the storage root from [`DATA_DIR_ENV`], falling back to
    /// `$HOME/.linkstash/data`, then to `./.linkstash/data` when `HOME` is unset.
    #[must_use]
    pub fn from_env() -> Self {
        let home = env_var_non_empty_os("HOME").map(PathBuf::from);
        let configured = env_var_non_empty_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::new(resolve_root(configured.as_deref(), home.as_deref()))
    }

    /// The storage root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one JSON file per date partition.
    #[must_use]
    pub fn urls_dir(&self) -> PathBuf {
        self.root.join(URLS_DIR)
    }

    /// The global hash index file.
    #[must_use]
    pub fn hash_index_file(&self) -> PathBuf {
        self.root.join(HASH_INDEX_FILE)
    }

    /// Directory holding normalized documents.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(DOCS_DIR)
    }

    /// Parent directory of all per-document image directories.
    #[must_use]
    pub fn images_dir(&self) -> PathBuf {
        self.docs_dir().join(IMAGES_DIR)
    }
}

/// Picks the storage root: an explicit setting (with `~` expanded) or the
/// default under `home`.
fn resolve_root(configured: Option<&Path>, home: Option<&Path>) -> PathBuf {
    match configured {
        Some(path) => expand_home(path, home),
        None => home.map_or_else(
            || PathBuf::from(DEFAULT_DATA_DIR),
            |home| home.join(DEFAULT_DATA_DIR),
        ),
    }
}

fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}
