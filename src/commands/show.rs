// src/commands/show.rs

//! Single node query

use anyhow::{Context, Result};
use pkggraph::config::InventoryConfig;
use pkggraph::graph::EdgeKind;
use pkggraph::inventory::Inventory;
use pkggraph::progress::ProgressMode;
use strum::IntoEnumIterator;

/// Print what `identity` is and what it is connected to
///
/// Version-qualified queries (`glibc>=2.31`) resolve to the bare name.
pub fn cmd_show(identity: &str, config: InventoryConfig, progress: ProgressMode) -> Result<()> {
    let report = Inventory::new(config)
        .with_progress(progress)
        .run()
        .context("Inventory failed")?;

    let graph = &report.graph;
    let node = graph
        .lookup(identity)
        .with_context(|| format!("'{}' does not appear in the graph", identity))?;
    let identity = node.identity.as_str();

    println!("{}", node.identity);
    println!("  classification: {}", node.classification);
    println!("  built: {}", if node.built { "yes" } else { "no" });
    if let Some(group) = &node.group {
        println!("  recipe: {}", group);
    }

    for kind in EdgeKind::iter() {
        print_list(&format!("{} ->", kind), sorted(graph.targets_of(identity, kind)));
        print_list(&format!("<- {}", kind), sorted(graph.sources_of(identity, kind)));
    }

    Ok(())
}

fn sorted(mut identities: Vec<&str>) -> Vec<&str> {
    identities.sort_unstable();
    identities.dedup();
    identities
}

fn print_list(label: &str, identities: Vec<&str>) {
    if identities.is_empty() {
        return;
    }
    println!("  {}: {}", label, identities.join(", "));
}
