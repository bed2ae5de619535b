//! Character encoding resolution for retrieved pages.
//!
//! Precedence: a recognized charset in the `Content-Type` header, then a
//! recognized charset declared in a `<meta>` tag within the first
//! [`META_SNIFF_LIMIT`] bytes, then UTF-8.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use regex::bytes::Regex as BytesRegex;
use tracing::debug;

use super::constants::META_SNIFF_LIMIT;

#[allow(clippy::expect_used)]
static HEADER_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)charset\s*=\s*([^\s;]+)").expect("header charset regex is valid")
});

// Byte-level patterns with Unicode off so undecoded bytes still match `[^>]`.
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r#"(?i-u)<meta[^>]+charset=["']?([^"'\s;>]+)"#)
        .expect("meta charset regex is valid")
});

#[allow(clippy::expect_used)]
static META_CONTENT_CHARSET: LazyLock<BytesRegex> = LazyLock::new(|| {
    BytesRegex::new(r#"(?i-u)content=["'][^"']*charset=([^"'\s;]+)"#)
        .expect("meta content charset regex is valid")
});

/// Where the chosen encoding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharsetSource {
    /// `Content-Type` response header.
    Header,
    /// `<meta>` declaration near the start of the body.
    Meta,
    /// Nothing usable was declared.
    Default,
}

/// Picks the encoding to decode `body` with.
#[must_use]
pub fn resolve_encoding(
    content_type: Option<&str>,
    body: &[u8],
) -> (&'static Encoding, CharsetSource) {
    if let Some(encoding) = content_type.and_then(header_charset).and_then(lookup) {
        return (encoding, CharsetSource::Header);
    }
    if let Some(encoding) = meta_charset(body).and_then(|label| lookup(&label)) {
        return (encoding, CharsetSource::Meta);
    }
    (UTF_8, CharsetSource::Default)
}

/// Decodes `body` to text, replacing malformed sequences.
#[must_use]
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> String {
    let (encoding, source) = resolve_encoding(content_type, body);
    let (text, used, had_errors) = encoding.decode(body);
    debug!(
        encoding = used.name(),
        source = ?source,
        had_errors,
        "decoded page body"
    );
    text.into_owned()
}

fn header_charset(content_type: &str) -> Option<&str> {
    HEADER_CHARSET
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_matches(|c| c == '"' || c == '\''))
}

fn meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    [&*META_CHARSET, &*META_CONTENT_CHARSET]
        .into_iter()
        .find_map(|pattern| pattern.captures(head).and_then(|c| c.get(1)))
        .map(|m| String::from_utf8_lossy(m.as_bytes()))
        .map(Cow::into_owned)
}

fn lookup(label: &str) -> Option<&'static Encoding> {
    let encoding = Encoding::for_label(label.as_bytes());
    if encoding.is_none() {
        debug!(label, "unrecognized charset label");
    }
    encoding
}
