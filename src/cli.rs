//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Collect URLs, fetch them as Markdown, and track what has been processed.
///
/// Storage lives under `DATA_DIR` (default `~/.linkstash/data`).
#[derive(Parser, Debug)]
#[command(name = "linkstash")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Storage root (overrides DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add never-seen URLs to today's partition as pending
    Collect(CollectArgs),

    /// Fetch pending entries of one day and write Markdown documents
    Fetch(FetchArgs),

    /// List entries by status
    Status(StatusArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CollectArgs {
    /// URLs to collect
    #[arg(long, num_args = 1..)]
    pub urls: Vec<String>,

    /// Markdown (or any text) file to scan for URLs
    #[arg(long, value_name = "PATH")]
    pub markdown: Option<PathBuf>,

    /// Source label stored on each new entry
    #[arg(long)]
    pub source: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct FetchArgs {
    /// Partition date (YYYY-MM-DD), default today
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,
}

#[derive(ClapArgs, Debug)]
pub struct StatusArgs {
    /// Only scan this partition (YYYY-MM-DD), default all
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Status to match
    #[arg(long, default_value = "pending")]
    pub status: String,

    /// Print matches as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_subcommand_is_required() {
        let result = Args::try_parse_from(["linkstash"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["linkstash", "-v", "fetch"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["linkstash", "fetch", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["linkstash", "--quiet", "status"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["linkstash", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["linkstash", "status", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_data_dir_is_global() {
        let args = Args::try_parse_from(["linkstash", "status", "--data-dir", "/tmp/x"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn test_cli_collect_multiple_urls() {
        let args = Args::try_parse_from([
            "linkstash",
            "collect",
            "--urls",
            "https://a.example",
            "https://b.example",
            "--source",
            "chat",
        ])
        .unwrap();
        let Command::Collect(collect) = args.command else {
            panic!("expected collect");
        };
        assert_eq!(collect.urls, vec!["https://a.example", "https://b.example"]);
        assert_eq!(collect.source.as_deref(), Some("chat"));
        assert!(collect.markdown.is_none());
    }

    #[test]
    fn test_cli_collect_without_inputs_parses() {
        // Missing inputs are reported by the command, with exit code 1.
        let args = Args::try_parse_from(["linkstash", "collect"]).unwrap();
        assert!(matches!(args.command, Command::Collect(_)));
    }

    #[test]
    fn test_cli_fetch_date_parses() {
        let args = Args::try_parse_from(["linkstash", "fetch", "--date", "2024-03-01"]).unwrap();
        let Command::Fetch(fetch) = args.command else {
            panic!("expected fetch");
        };
        assert_eq!(fetch.date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn test_cli_fetch_bad_date_rejected() {
        let err = Args::try_parse_from(["linkstash", "fetch", "--date", "03/01/2024"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_status_defaults() {
        let args = Args::try_parse_from(["linkstash", "status"]).unwrap();
        let Command::Status(status) = args.command else {
            panic!("expected status");
        };
        assert_eq!(status.status, "pending");
        assert!(status.date.is_none());
        assert!(!status.json);
    }
}
