//! URL scanning in free text.
//!
//! Grammar of a candidate:
//!
//! ```text
//! url       = scheme "://" authority rest
//! scheme    = one of the accepted schemes (ASCII case-insensitive)
//! authority = 1*( any char except terminator / "/" / "?" / "#" )
//! rest      = *( any char except terminator )        ; path, query, fragment
//! terminator = whitespace / "<" / ">" / ")" / "]" / "}" / DQUOTE / "'" / "`" / "," / ";"
//! ```
//!
//! After matching, trailing sentence punctuation is removed by a
//! [`TrailingStripper`].

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::strip::TrailingStripper;

/// Schemes accepted by [`UrlScanner::default`].
pub const DEFAULT_SCHEMES: &[&str] = &["http", "https"];

/// Characters that end a candidate, as a regex character-class body.
const TERMINATORS: &str = r#"\s<>)\]}"'`,;"#;

#[allow(clippy::expect_used)]
static DEFAULT_SCANNER: LazyLock<UrlScanner> = LazyLock::new(|| {
    UrlScanner::with_schemes(DEFAULT_SCHEMES).expect("default URL grammar is valid") // Static pattern, safe to panic
});

/// One grammar match, before trailing punctuation is stripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlCandidate<'t> {
    /// The full matched text.
    pub raw: &'t str,
    /// Scheme as written (e.g. `https`).
    pub scheme: &'t str,
    /// Host, optional userinfo and port.
    pub authority: &'t str,
    /// Path, query and fragment (may be empty).
    pub rest: &'t str,
}

/// Finds URI-shaped substrings in prose.
#[derive(Debug, Clone)]
pub struct UrlScanner {
    pattern: Regex,
    stripper: TrailingStripper,
}

impl Default for UrlScanner {
    fn default() -> Self {
        DEFAULT_SCANNER.clone()
    }
}

impl UrlScanner {
    /// Builds a scanner accepting only `schemes`, with the default stripper.
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the resulting pattern cannot be compiled
    /// (for example when `schemes` is empty).
    pub fn with_schemes<I, S>(schemes: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let alternatives: Vec<String> = schemes
            .into_iter()
            .map(|s| regex::escape(s.as_ref()))
            .collect();
        if alternatives.is_empty() {
            return Err(regex::Error::Syntax("no URL schemes configured".to_string()));
        }
        let pattern = format!(
            r"(?i:(?P<scheme>{schemes}))://(?P<authority>[^{TERMINATORS}/?#]+)(?P<rest>[^{TERMINATORS}]*)",
            schemes = alternatives.join("|"),
        );
        Ok(Self {
            pattern: Regex::new(&pattern)?,
            stripper: TrailingStripper::default(),
        })
    }

    /// Replaces the trailing-punctuation stripper.
    #[must_use]
    pub fn with_stripper(mut self, stripper: TrailingStripper) -> Self {
        self.stripper = stripper;
        self
    }

    /// Raw grammar matches in document order, duplicates included.
    pub fn candidates<'t>(&self, text: &'t str) -> impl Iterator<Item = UrlCandidate<'t>> {
        self.pattern.captures_iter(text).filter_map(|caps| {
            Some(UrlCandidate {
                raw: caps.get(0)?.as_str(),
                scheme: caps.name("scheme")?.as_str(),
                authority: caps.name("authority")?.as_str(),
                rest: caps.name("rest").map_or("", |m| m.as_str()),
            })
        })
    }

    /// Extracts URLs from `text`: trailing punctuation stripped, duplicates
    /// removed, first-seen order kept.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut urls = Vec::new();

        for candidate in self.candidates(text) {
            let cleaned = self.stripper.strip(candidate.raw);
            // Stripping must not eat into the authority.
            if cleaned.len() <= candidate.scheme.len() + "://".len() {
                trace!(raw = candidate.raw, "candidate lost its authority");
                continue;
            }
            if seen.insert(cleaned) {
                trace!(url = cleaned, "found URL");
                urls.push(cleaned.to_string());
            }
        }

        debug!(count = urls.len(), "scanned text for URLs");
        urls
    }
}
