//! Input parsing: recognizing URLs embedded in free text.
//!
//! # Example
//!
//! ```
//! use linkstash::parser::UrlScanner;
//!
//! let urls = UrlScanner::default().scan("see https://a.example/x., and (https://b.example/y)");
//! assert_eq!(urls, vec!["https://a.example/x", "https://b.example/y"]);
//! ```

mod strip;
mod url;

pub use strip::{DEFAULT_TRAILING_CHARS, TrailingStripper};
pub use url::{DEFAULT_SCHEMES, UrlCandidate, UrlScanner};
