// src/commands/graph.rs

//! Full pipeline: records, built set, graph, rendered output

use anyhow::{Context, Result};
use pkggraph::config::InventoryConfig;
use pkggraph::inventory::{Inventory, InventoryReport};
use pkggraph::progress::ProgressMode;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

/// Build the graph and write it in the configured format
pub fn cmd_graph(config: InventoryConfig, progress: ProgressMode) -> Result<()> {
    let output = config.output.clone();
    let report = Inventory::new(config)
        .with_progress(progress)
        .run()
        .context("Inventory failed")?;

    let renderer = output.format.renderer(output.render_options());

    match &output.path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            renderer.render(&report.graph, &mut writer)?;
            writer.flush()?;
            info!("Wrote {} graph to {}", output.format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            renderer.render(&report.graph, &mut writer)?;
            writer.flush()?;
        }
    }

    print_summary(&report);
    Ok(())
}

/// Summary of the run on stderr, so stdout stays a clean graph
fn print_summary(report: &InventoryReport) {
    let stats = report.graph.stats();
    eprintln!(
        "{} nodes ({} built), {} edges from {} recipes and {} built packages",
        stats.nodes, stats.built, stats.edges, report.recipes_read, report.archives_scanned
    );

    if report.is_clean() {
        return;
    }

    if !report.failed_recipes.is_empty() {
        eprintln!("Failed recipes:");
        for failed in &report.failed_recipes {
            eprintln!("  {}: {}", failed.dir.display(), failed.reason);
        }
    }

    if !report.skipped_archives.is_empty() {
        eprintln!("Skipped archives:");
        for skipped in &report.skipped_archives {
            eprintln!("  {}: {}", skipped.path.display(), skipped.reason);
        }
    }

    if !report.rejected.is_empty() {
        eprintln!("Rejected records:");
        for rejected in &report.rejected {
            eprintln!("  {}: {}", rejected.base_name, rejected.reason);
        }
    }
}
