//! Fetch command handler: normalize one day's pending entries.

use anyhow::Result;
use chrono::Local;
use linkstash::store::partition_file_name;
use linkstash::{DocumentStore, Fetcher, HttpClient, JsonFileStore, StorageLayout};

use crate::ProcessExit;
use crate::cli::FetchArgs;
use crate::output;

/// Individual entry failures never change the exit outcome.
pub async fn run_fetch_command(args: &FetchArgs, layout: StorageLayout) -> Result<ProcessExit> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let partition_path = layout.urls_dir().join(partition_file_name(date));

    let fetcher = Fetcher::new(HttpClient::new(), DocumentStore::new(&layout));
    let store = JsonFileStore::new(layout);

    match fetcher.fetch_partition(&store, date).await? {
        Some(stats) => println!("{}", output::fetch_summary(&stats)),
        None => println!("{}", output::missing_partition(date, &partition_path)),
    }
    Ok(ProcessExit::Success)
}
