// src/commands/mod.rs
//! Command handlers for the pkggraph CLI

mod built;
mod completions;
mod graph;
mod records;
mod show;

pub use built::cmd_built;
pub use completions::cmd_completions;
pub use graph::cmd_graph;
pub use records::cmd_records;
pub use show::cmd_show;

use anyhow::{Context, Result};
use pkggraph::config::InventoryConfig;
use pkggraph::progress::ProgressMode;
use std::io::IsTerminal;
use std::path::Path;

/// Load the configuration file, or defaults when there is none
pub fn load_config(path: Option<&Path>) -> Result<InventoryConfig> {
    InventoryConfig::discover(path).context("Failed to load configuration")
}

/// Progress bars on a terminal, log lines otherwise, nothing when quiet
pub fn progress_mode(quiet: bool) -> ProgressMode {
    if quiet {
        ProgressMode::Silent
    } else if std::io::stderr().is_terminal() {
        ProgressMode::Bar
    } else {
        ProgressMode::Log
    }
}
