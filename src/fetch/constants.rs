//! Constants for the fetch module (timeouts, identification).

/// Fixed timeout for every page and image request, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Browser-like User-Agent sent with every request.
///
/// Many content sites serve bot-detection pages to tool user agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// How many leading body bytes are scanned for a `<meta>` charset.
pub const META_SNIFF_LIMIT: usize = 4096;
