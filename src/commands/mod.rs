//! CLI command handlers.

mod collect;
mod fetch;
mod status;

pub use collect::run_collect_command;
pub use fetch::run_fetch_command;
pub use status::run_status_command;
