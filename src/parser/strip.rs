//! Trailing punctuation removal for URLs embedded in prose.

/// Characters stripped from the end of a URL by default.
pub const DEFAULT_TRAILING_CHARS: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// Removes a configurable set of characters from the end of a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailingStripper {
    chars: Vec<char>,
}

impl Default for TrailingStripper {
    fn default() -> Self {
        Self::new(DEFAULT_TRAILING_CHARS.iter().copied())
    }
}

impl TrailingStripper {
    /// Creates a stripper for `chars`.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// Strips every trailing occurrence of the configured characters.
    #[must_use]
    pub fn strip<'a>(&self, url: &'a str) -> &'a str {
        url.trim_end_matches(|c: char| self.chars.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_sentence_punctuation() {
        let stripper = TrailingStripper::default();
        assert_eq!(stripper.strip("https://example.com,"), "https://example.com");
        assert_eq!(stripper.strip("https://example.com;"), "https://example.com");
        assert_eq!(stripper.strip("https://example.com!"), "https://example.com");
        assert_eq!(stripper.strip("https://example.com?"), "https://example.com");
        assert_eq!(stripper.strip("https://example.com/x)."), "https://example.com/x");
    }

    #[test]
    fn test_strips_runs() {
        let stripper = TrailingStripper::default();
        assert_eq!(stripper.strip("https://example.com/a?!..."), "https://example.com/a");
    }

    #[test]
    fn test_leaves_inner_punctuation() {
        let stripper = TrailingStripper::default();
        assert_eq!(
            stripper.strip("https://example.com/a.b?c=d"),
            "https://example.com/a.b?c=d"
        );
    }

    #[test]
    fn test_empty_set_is_identity() {
        let stripper = TrailingStripper::new([]);
        assert_eq!(stripper.strip("https://example.com."), "https://example.com.");
    }
}
