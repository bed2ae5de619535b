//! URL fingerprints.
//!
//! A fingerprint is the lowercase hex SHA-256 of the whitespace-trimmed URL,
//! truncated to a short prefix. Fingerprinting is syntactic: a trailing slash
//! or a reordered query string yields a different fingerprint.

use sha2::{Digest, Sha256};

/// Hex characters kept for entry/document fingerprints.
pub const URL_FINGERPRINT_LEN: usize = 16;

/// Hex characters kept for mirrored image file names.
pub const IMAGE_FINGERPRINT_LEN: usize = 12;

/// Fingerprint identifying an ingested URL and its normalized document.
#[must_use]
pub fn url_fingerprint(url: &str) -> String {
    truncated_digest(url.trim(), URL_FINGERPRINT_LEN)
}

/// Fingerprint naming a mirrored image file (without extension).
#[must_use]
pub fn image_fingerprint(url: &str) -> String {
    truncated_digest(url.trim(), IMAGE_FINGERPRINT_LEN)
}

fn truncated_digest(input: &str, len: usize) -> String {
    let mut hex = format!("{:x}", Sha256::digest(input.as_bytes()));
    hex.truncate(len);
    hex
}
