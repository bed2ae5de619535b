//! CLI output formatting for collect, fetch, and status reports.

use std::path::Path;

use chrono::NaiveDate;
use linkstash::{CollectOutcome, FetchStats, QueryHit, QueryRecord};

/// Message when `collect` received no URLs from any input.
pub const NO_URLS_GUIDANCE: &str = "No URLs supplied. Pass at least one with --urls or --markdown.";

/// Example for passing URLs as arguments.
pub const COLLECT_EXAMPLE: &str = "Example: linkstash collect --urls https://example.com/post";

const DOC_PRESENT: &str = "✓";
const DOC_MISSING: &str = "✗";

pub fn collect_summary(outcome: &CollectOutcome) -> String {
    format!(
        "Done: {} new URL(s), {} duplicate(s) skipped",
        outcome.new, outcome.skipped
    )
}

pub fn fetch_summary(stats: &FetchStats) -> String {
    format!(
        "Done: {} fetched, {} failed, {} skipped",
        stats.fetched, stats.failed, stats.skipped
    )
}

pub fn missing_partition(date: NaiveDate, path: &Path) -> String {
    format!("No URL partition for {date}: {}", path.display())
}

/// Human-readable status listing; a distinct message when nothing matched.
pub fn status_listing(hits: &[QueryHit], status: &str) -> String {
    if hits.is_empty() {
        return format!("No entries with status={status} found.");
    }

    let mut lines = vec![format!(
        "Found {} entr{} with status={status}:",
        hits.len(),
        if hits.len() == 1 { "y" } else { "ies" }
    )];
    lines.push(String::new());
    for hit in hits {
        let marker = if hit.raw_doc_exists { DOC_PRESENT } else { DOC_MISSING };
        lines.push(format!("  [{marker}] {}  <-  {}", hit.entry.fingerprint, hit.entry.url));
        lines.push(format!("      partition: {}", hit.date_file));
    }
    lines.push(String::new());
    lines.push(format!("Total: {}", hits.len()));
    lines.join("\n")
}

/// JSON array of public fields; `[]` when nothing matched.
pub fn status_json(hits: &[QueryHit]) -> serde_json::Result<String> {
    let records: Vec<QueryRecord> = hits.iter().map(QueryRecord::from).collect();
    serde_json::to_string_pretty(&records)
}
