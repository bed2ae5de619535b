//! CLI entry point for linkstash.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use linkstash::StorageLayout;
use tracing::debug;

mod cli;
mod commands;
mod output;

use cli::{Args, Command};

/// Process-level outcome of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Failure,
}

impl From<ProcessExit> for ExitCode {
    fn from(exit: ProcessExit) -> Self {
        match exit {
            ProcessExit::Success => ExitCode::SUCCESS,
            ProcessExit::Failure => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    init_tracing(default_log_level(args.verbose, args.quiet));
    debug!(?args, "CLI arguments parsed");

    let layout = args
        .data_dir
        .clone()
        .map_or_else(StorageLayout::from_env, StorageLayout::new);
    debug!(root = %layout.root().display(), "storage root");

    let exit = match &args.command {
        Command::Collect(collect_args) => commands::run_collect_command(collect_args, layout)?,
        Command::Fetch(fetch_args) => commands::run_fetch_command(fetch_args, layout).await?,
        Command::Status(status_args) => commands::run_status_command(status_args, layout)?,
    };
    Ok(exit.into())
}

/// Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Logs go to stderr; stdout carries only reports.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
