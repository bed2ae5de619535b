//! Integration tests for the URL scanner.
//!
//! These tests verify scanning with realistic free-text inputs.

use linkstash::{TrailingStripper, UrlScanner};

/// Test scanning a reading list with URLs mixed into prose.
#[test]
fn test_scan_realistic_reading_list() {
    let input = r#"
Reading list:
1. https://arxiv.org/abs/2301.00001, skimmed
2. Smith, J. (2024). Paper Title. Journal.
3. Great thread: https://example.com/thread/42!
4. Some other text that should be ignored.
"#;

    let urls = UrlScanner::default().scan(input);

    assert_eq!(
        urls,
        vec![
            "https://arxiv.org/abs/2301.00001",
            "https://example.com/thread/42",
        ],
        "Should extract exactly 2 URLs with trailing punctuation removed"
    );
}

/// Test scanning URLs embedded in markdown links and prose.
#[test]
fn test_scan_urls_in_markdown() {
    let input = r#"
# Research Links

- [Paper 1](https://example.com/paper1.pdf) - Good paper
- [Paper 2](https://example.com/paper2.pdf) - Another one
- See also: <https://arxiv.org/abs/2301.00001>

## Notes

Check https://github.com/user/repo for code.
"#;

    let urls = UrlScanner::default().scan(input);

    assert_eq!(
        urls,
        vec![
            "https://example.com/paper1.pdf",
            "https://example.com/paper2.pdf",
            "https://arxiv.org/abs/2301.00001",
            "https://github.com/user/repo",
        ]
    );
}

/// Test that repeats keep only the first occurrence, in order.
#[test]
fn test_scan_dedups_preserving_first_seen_order() {
    let input = "b https://b.example a https://a.example again https://b.example.";

    let urls = UrlScanner::default().scan(input);

    assert_eq!(urls, vec!["https://b.example", "https://a.example"]);
}

/// Test that query strings and fragments survive scanning.
#[test]
fn test_scan_keeps_query_and_fragment() {
    let input = "docs at https://docs.example/guide?lang=en&v=2#install; thanks";

    let urls = UrlScanner::default().scan(input);

    assert_eq!(urls, vec!["https://docs.example/guide?lang=en&v=2#install"]);
}

/// Test that only the configured schemes are recognized.
#[test]
fn test_scan_with_custom_schemes() {
    let input = "mirror ftp://files.example/pub and https://web.example/x";

    let default_urls = UrlScanner::default().scan(input);
    assert_eq!(default_urls, vec!["https://web.example/x"]);

    let ftp_only = UrlScanner::with_schemes(["ftp"]).unwrap().scan(input);
    assert_eq!(ftp_only, vec!["ftp://files.example/pub"]);
}

/// Test a stripper limited to exclamation marks keeps trailing dots.
#[test]
fn test_scan_with_custom_stripper() {
    let input = "new release https://example.com/v1.2.!";

    let default_urls = UrlScanner::default().scan(input);
    assert_eq!(default_urls, vec!["https://example.com/v1.2"]);

    let scanner = UrlScanner::default().with_stripper(TrailingStripper::new(['!']));
    assert_eq!(scanner.scan(input), vec!["https://example.com/v1.2."]);
}

/// Test that text without URLs yields nothing.
#[test]
fn test_scan_plain_text_yields_nothing() {
    let input = "No links here, just www.example.com and mailto:someone@example.com";

    assert!(UrlScanner::default().scan(input).is_empty());
}
