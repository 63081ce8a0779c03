// src/commands/completions.rs

//! Shell completion generation

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Write completions for `shell` to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "pkggraph", &mut io::stdout());
    Ok(())
}
