// src/commands/records.rs

//! Recipe record dump

use anyhow::{Context, Result};
use pkggraph::config::InventoryConfig;
use pkggraph::inventory::Inventory;
use pkggraph::progress::ProgressMode;
use std::io::{self, Write};

/// Print the records of every readable recipe as a JSON array
pub fn cmd_records(config: InventoryConfig, progress: ProgressMode) -> Result<()> {
    let scan = Inventory::new(config)
        .with_progress(progress)
        .read_records()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &scan.records)
        .context("Failed to serialize records")?;
    writeln!(out)?;

    for failed in &scan.failed {
        eprintln!("  failed {}: {}", failed.dir.display(), failed.reason);
    }

    Ok(())
}
