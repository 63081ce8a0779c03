// src/inventory.rs

//! End-to-end inventory pipeline
//!
//! Discovers recipe directories, reads their metadata, scans the compiled
//! archives for the built set, and assembles the package graph. Every stage is
//! best effort: bad inputs are collected in the [`InventoryReport`] instead of
//! aborting the run.

use crate::builtset::{BuiltScan, BuiltSet, BuiltSetScanner, SkippedArchive};
use crate::config::InventoryConfig;
use crate::error::{Error, Result};
use crate::graph::{GraphAssembler, PackageGraph, RejectedRecord};
use crate::packages::{ArchArchiveReader, discover_archives};
use crate::progress::ProgressMode;
use crate::recipe::{FailedRecipe, RecipeScan, discover_recipes, read_recipes};
use rayon::ThreadPool;
use std::path::Path;
use tracing::{info, warn};

/// Everything a pipeline run produced
#[derive(Debug)]
pub struct InventoryReport {
    pub graph: PackageGraph,
    /// Records read successfully
    pub recipes_read: usize,
    pub failed_recipes: Vec<FailedRecipe>,
    /// Archives that contributed to the built set
    pub archives_scanned: usize,
    pub skipped_archives: Vec<SkippedArchive>,
    pub rejected: Vec<RejectedRecord>,
}

impl InventoryReport {
    /// Number of inputs left out of the graph
    pub fn problem_count(&self) -> usize {
        self.failed_recipes.len() + self.skipped_archives.len() + self.rejected.len()
    }

    /// Whether every input made it into the graph
    pub fn is_clean(&self) -> bool {
        self.problem_count() == 0
    }
}

/// Runs the pipeline described by an [`InventoryConfig`]
pub struct Inventory {
    config: InventoryConfig,
    progress: ProgressMode,
}

impl Inventory {
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            progress: ProgressMode::default(),
        }
    }

    /// Choose how long-running stages report progress
    pub fn with_progress(mut self, progress: ProgressMode) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    /// Worker pool sized by `scan.jobs` (0 = one per core)
    fn pool(&self) -> Result<ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.scan.jobs)
            .thread_name(|i| format!("pkggraph-scan-{}", i))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create worker pool: {}", e)))
    }

    /// Discover and read every recipe of the configured repositories
    pub fn read_records(&self) -> Result<RecipeScan> {
        let recipes = &self.config.recipes;
        require_dir(&recipes.root, "Recipe root")?;

        let dirs = discover_recipes(&recipes.root, &recipes.repositories)?;
        let reader = recipes.reader.build(recipes.arch.clone())?;
        let progress = self.progress.tracker("recipes read", dirs.len() as u64);

        let pool = self.pool()?;
        let scan = pool.install(|| read_recipes(&dirs, reader.as_ref(), progress.as_ref()));

        info!(
            "Read {} recipes ({} failed)",
            scan.records.len(),
            scan.failed.len()
        );
        Ok(scan)
    }

    /// Scan the built root, if one is configured
    pub fn scan_built(&self) -> Result<Option<BuiltScan>> {
        let Some(root) = self.config.built.root.as_deref() else {
            info!("No built root configured; no node will be marked built");
            return Ok(None);
        };

        self.scan_built_root(root).map(Some)
    }

    /// Scan `<root>/*/*.pkg.tar.*` for built identities
    pub fn scan_built_root(&self, root: &Path) -> Result<BuiltScan> {
        require_dir(root, "Built root")?;

        let archives = discover_archives(root)?;
        let progress = self.progress.tracker("built packages scanned", archives.len() as u64);
        let scanner = BuiltSetScanner::new(ArchArchiveReader::new());

        let pool = self.pool()?;
        Ok(pool.install(|| scanner.scan(&archives, progress.as_ref())))
    }

    /// Run every stage and assemble the graph
    pub fn run(&self) -> Result<InventoryReport> {
        let recipes = self.read_records()?;

        let (built, archives_scanned, skipped_archives) = match self.scan_built()? {
            Some(scan) => (scan.built, scan.scanned, scan.skipped),
            None => (BuiltSet::default(), 0, Vec::new()),
        };

        let outcome = GraphAssembler::assemble(&recipes.records, &built);

        let report = InventoryReport {
            graph: outcome.graph,
            recipes_read: recipes.records.len(),
            failed_recipes: recipes.failed,
            archives_scanned,
            skipped_archives,
            rejected: outcome.rejected,
        };

        if !report.is_clean() {
            warn!(
                "{} inputs left out: {} failed recipes, {} skipped archives, {} rejected records",
                report.problem_count(),
                report.failed_recipes.len(),
                report.skipped_archives.len(),
                report.rejected.len()
            );
        }

        Ok(report)
    }
}

fn require_dir(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::IoError(format!(
            "{} {} is not a directory",
            what,
            path.display()
        )))
    }
}
