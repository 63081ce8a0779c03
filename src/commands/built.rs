// src/commands/built.rs

//! Built set listing

use anyhow::{Context, Result};
use pkggraph::config::InventoryConfig;
use pkggraph::inventory::Inventory;
use pkggraph::progress::ProgressMode;

/// Print every built identity, one per line, sorted
pub fn cmd_built(config: InventoryConfig, progress: ProgressMode) -> Result<()> {
    let inventory = Inventory::new(config).with_progress(progress);
    let scan = inventory
        .scan_built()?
        .context("No built package directory given (use --built or [built] root)")?;

    for identity in scan.built.sorted() {
        println!("{}", identity);
    }

    eprintln!(
        "{} identities from {} packages",
        scan.built.len(),
        scan.scanned
    );
    for skipped in &scan.skipped {
        eprintln!("  skipped {}: {}", skipped.path.display(), skipped.reason);
    }

    Ok(())
}
