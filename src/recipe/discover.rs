// src/recipe/discover.rs

//! Recipe directory discovery and parallel reading

use super::{PackageRecord, RecipeMetadataReader};
use crate::error::{Error, Result};
use crate::progress::ProgressTracker;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A recipe directory that could not be read
#[derive(Debug, Clone)]
pub struct FailedRecipe {
    pub dir: PathBuf,
    pub reason: String,
}

/// Records read from a set of recipe directories
#[derive(Debug, Default)]
pub struct RecipeScan {
    /// Successfully read records, in discovery order
    pub records: Vec<PackageRecord>,
    pub failed: Vec<FailedRecipe>,
}

/// Find recipe directories under `<root>/<repository>/*/PKGBUILD`
///
/// Repositories are visited in the given order; directories inside each
/// repository are sorted by path so that assembly is reproducible.
pub fn discover_recipes(root: &Path, repositories: &[String]) -> Result<Vec<PathBuf>> {
    let root_pattern = glob::Pattern::escape(&root.to_string_lossy());
    let mut dirs = Vec::new();

    for repo in repositories {
        let pattern = format!("{}/{}/*/PKGBUILD", root_pattern, glob::Pattern::escape(repo));
        let entries = glob::glob(&pattern)
            .map_err(|e| Error::ParseError(format!("Invalid recipe pattern '{}': {}", pattern, e)))?;

        let mut found: Vec<PathBuf> = Vec::new();
        for entry in entries {
            match entry {
                Ok(pkgbuild) => {
                    if let Some(dir) = pkgbuild.parent() {
                        found.push(dir.to_path_buf());
                    }
                }
                Err(e) => warn!("Skipping unreadable path in {}: {}", repo, e),
            }
        }
        found.sort();

        debug!("Found {} recipes in repository {}", found.len(), repo);
        dirs.extend(found);
    }

    info!("Discovered {} recipe directories", dirs.len());
    Ok(dirs)
}

/// Read every recipe directory with `reader`
///
/// Directories are read in parallel on the current rayon pool. A directory
/// that fails is recorded in [`RecipeScan::failed`] and does not stop the
/// scan. Record order follows the order of `dirs`.
pub fn read_recipes(
    dirs: &[PathBuf],
    reader: &dyn RecipeMetadataReader,
    progress: &dyn ProgressTracker,
) -> RecipeScan {
    progress.set_length(dirs.len() as u64);

    let results: Vec<(PathBuf, Result<PackageRecord>)> = dirs
        .par_iter()
        .map(|dir| {
            let result = reader.read_recipe(dir);
            progress.increment(1);
            (dir.clone(), result)
        })
        .collect();

    let mut scan = RecipeScan::default();
    for (dir, result) in results {
        match result {
            Ok(record) => scan.records.push(record),
            Err(e) => {
                warn!("Failed to read recipe {}: {}", dir.display(), e);
                scan.failed.push(FailedRecipe {
                    dir,
                    reason: e.to_string(),
                });
            }
        }
    }

    progress.finish_with_message(&format!(
        "{} recipes read, {} failed",
        scan.records.len(),
        scan.failed.len()
    ));
    scan
}
