//! HTML to Markdown conversion and whitespace cleanup.

use super::error::FetchError;

/// Longest run of blank lines kept in a converted document.
pub const MAX_BLANK_RUN: usize = 2;

/// Converts an HTML fragment to Markdown and tidies blank lines.
///
/// # Errors
///
/// Returns [`FetchError::Markdown`] if the converter fails.
pub fn to_markdown(html: &str) -> Result<String, FetchError> {
    let converted = htmd::convert(html).map_err(|source| FetchError::Markdown { source })?;
    Ok(collapse_blank_lines(&converted))
}

/// Shortens every run of blank lines to at most [`MAX_BLANK_RUN`] and trims
/// the result.
///
/// Whitespace-only lines count as blank and are emitted empty.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in text.lines() {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= MAX_BLANK_RUN {
                out.push("");
            }
        } else {
            blank_run = 0;
            out.push(line);
        }
    }
    out.join("\n").trim().to_string()
}
