//! Command-line interface.
//!
//! - Argument parsing into [`CliCommand`]
//! - `--version` / `--help`
//! - One-shot `status` and `action` commands
//!
//! ```ignore
//! use wendash::cli::{parse_args, CliCommand};
//!
//! let parsed = parse_args(std::env::args())?;
//! match parsed.command {
//!     CliCommand::RunTui => { /* start the dashboard */ }
//!     _ => { /* one-shot command */ }
//! }
//! ```

pub mod args;
pub mod commands;
pub mod version;

pub use args::{parse_args, CliCommand, ParsedArgs};
pub use commands::{format_event, run_action, run_status, ActionRun};
pub use version::{version_line, VERSION};

use crate::config::{ENV_LOG_DIR, ENV_POLL_MS, ENV_TOKEN, ENV_URL};
use crate::models::ActionCommand;

/// Text printed by `--help`.
pub fn usage() -> String {
    let mut text = String::new();
    text.push_str("wendash - terminal dashboard for the WENBNB bot\n\n");
    text.push_str("USAGE:\n");
    text.push_str("    wendash [OPTIONS]                 run the dashboard\n");
    text.push_str("    wendash [OPTIONS] status          print bot status once\n");
    text.push_str("    wendash [OPTIONS] action <CMD>    send one admin command\n\n");
    text.push_str("OPTIONS:\n");
    text.push_str("    --url <URL>       backend base URL\n");
    text.push_str("    --token <TOKEN>   bearer token for admin commands\n");
    text.push_str("    -y, --yes         skip confirmation prompts\n");
    text.push_str("    -V, --version     print version\n");
    text.push_str("    -h, --help        print this help\n\n");
    text.push_str("COMMANDS:\n");
    for cmd in ActionCommand::ALL {
        text.push_str(&format!("    {:<16}{}\n", cmd.as_str(), cmd.label()));
    }
    text.push_str("\nENVIRONMENT:\n");
    for var in [ENV_URL, ENV_TOKEN, ENV_POLL_MS, ENV_LOG_DIR] {
        text.push_str(&format!("    {}\n", var));
    }
    text
}
