//! Collect command handler: add never-seen URLs to today's partition.

use anyhow::Result;
use chrono::Local;
use linkstash::collect::DEFAULT_SOURCE;
use linkstash::{JsonFileStore, StorageLayout, UrlScanner, collect_urls, read_document_urls};
use tracing::debug;

use crate::ProcessExit;
use crate::cli::CollectArgs;
use crate::output;

pub fn run_collect_command(args: &CollectArgs, layout: StorageLayout) -> Result<ProcessExit> {
    let mut urls: Vec<String> = args
        .urls
        .iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if let Some(path) = &args.markdown {
        match read_document_urls(path, &UrlScanner::default()) {
            Ok(found) => {
                debug!(path = %path.display(), found = found.len(), "scanned document");
                urls.extend(found);
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }

    if urls.is_empty() {
        eprintln!("{}", output::NO_URLS_GUIDANCE);
        eprintln!("{}", output::COLLECT_EXAMPLE);
        return Ok(ProcessExit::Failure);
    }

    let source = source_label(args);
    let store = JsonFileStore::new(layout);
    let outcome = collect_urls(&store, &urls, &source, Local::now().naive_local())?;
    println!("{}", output::collect_summary(&outcome));
    Ok(ProcessExit::Success)
}

/// `--source`, else the scanned document's path, else the default label.
fn source_label(args: &CollectArgs) -> String {
    args.source
        .clone()
        .or_else(|| args.markdown.as_ref().map(|p| p.display().to_string()))
        .unwrap_or_else(|| DEFAULT_SOURCE.to_string())
}
