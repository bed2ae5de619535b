//! Status command handler: list entries by status.

use anyhow::Result;
use linkstash::{DocumentStore, EntryStatus, JsonFileStore, StorageLayout, find_entries};

use crate::ProcessExit;
use crate::cli::StatusArgs;
use crate::output;

pub fn run_status_command(args: &StatusArgs, layout: StorageLayout) -> Result<ProcessExit> {
    let docs = DocumentStore::new(&layout);
    let store = JsonFileStore::new(layout);
    let status = EntryStatus::from(args.status.trim());

    let hits = find_entries(&store, &docs, args.date, &status)?;
    if args.json {
        println!("{}", output::status_json(&hits)?);
    } else {
        println!("{}", output::status_listing(&hits, status.as_str()));
    }
    Ok(ProcessExit::Success)
}
