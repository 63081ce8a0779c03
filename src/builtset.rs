// src/builtset.rs

//! Built-set accumulation
//!
//! The built set is every identity confirmed by an already-compiled package
//! archive: each archive's `pkgname` plus the capability part of each of its
//! `provides` entries. The graph uses it to flag nodes that are already built.
//!
//! Scanning is best effort. An archive that cannot be opened or has no usable
//! `.PKGINFO` is skipped and reported; the scan carries on with the rest.

use crate::error::Result;
use crate::packages::{ArchiveMetadataReader, PkgInfo};
use crate::progress::ProgressTracker;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::collections::hash_set;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Identities present among the compiled archives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuiltSet {
    identities: HashSet<String>,
}

impl BuiltSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity; duplicates are ignored
    pub fn insert(&mut self, identity: impl Into<String>) -> bool {
        self.identities.insert(identity.into())
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.identities.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Merge another set into this one
    pub fn merge(&mut self, other: BuiltSet) {
        if self.identities.len() < other.identities.len() {
            let smaller = std::mem::replace(&mut self.identities, other.identities);
            self.identities.extend(smaller);
        } else {
            self.identities.extend(other.identities);
        }
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.identities.iter()
    }

    /// Identities in lexical order
    pub fn sorted(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.identities.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// Identities confirmed by one `.PKGINFO` text
    pub fn from_pkginfo(content: &str) -> Result<Self> {
        Ok(PkgInfo::parse(content).built_identities()?.into_iter().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for BuiltSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            identities: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for BuiltSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.identities.extend(iter.into_iter().map(Into::into));
    }
}

impl<'a> IntoIterator for &'a BuiltSet {
    type Item = &'a String;
    type IntoIter = hash_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.identities.iter()
    }
}

/// An archive left out of the built set
#[derive(Debug, Clone)]
pub struct SkippedArchive {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a collection of archives
#[derive(Debug, Default)]
pub struct BuiltScan {
    pub built: BuiltSet,
    pub skipped: Vec<SkippedArchive>,
    /// Number of archives that contributed to `built`
    pub scanned: usize,
}

/// Partial result of one worker
#[derive(Default)]
struct Partial {
    built: BuiltSet,
    skipped: Vec<SkippedArchive>,
    scanned: usize,
}

impl Partial {
    fn combine(mut self, other: Partial) -> Partial {
        self.built.merge(other.built);
        self.skipped.extend(other.skipped);
        self.scanned += other.scanned;
        self
    }
}

/// Accumulates the built set from package archives
pub struct BuiltSetScanner<R: ArchiveMetadataReader> {
    reader: R,
}

impl<R: ArchiveMetadataReader> BuiltSetScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Identities confirmed by a single archive
    pub fn scan_one(&self, path: &Path) -> Result<BuiltSet> {
        let content = self.reader.read_metadata(path)?;
        BuiltSet::from_pkginfo(&content)
            .map_err(|e| crate::Error::malformed_archive(path, e.to_string()))
    }

    /// Scan every archive in `paths` on the current rayon pool
    ///
    /// Each archive produces a small local set; sets are merged in a reduce
    /// step, so no ordering between archives is implied.
    pub fn scan(&self, paths: &[PathBuf], progress: &dyn ProgressTracker) -> BuiltScan {
        progress.set_length(paths.len() as u64);
        info!("Scanning {} built packages", paths.len());

        let partial = paths
            .par_iter()
            .map(|path| {
                let mut partial = Partial::default();
                match self.scan_one(path) {
                    Ok(built) => {
                        debug!("{}: {} identities", path.display(), built.len());
                        partial.built = built;
                        partial.scanned = 1;
                    }
                    Err(e) => {
                        warn!("Skipping archive {}: {}", path.display(), e);
                        partial.skipped.push(SkippedArchive {
                            path: path.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
                progress.increment(1);
                partial
            })
            .reduce(Partial::default, Partial::combine);

        let mut skipped = partial.skipped;
        skipped.sort_by(|a, b| a.path.cmp(&b.path));

        progress.finish_with_message(&format!(
            "{} built packages scanned, {} skipped",
            partial.scanned,
            skipped.len()
        ));
        info!(
            "Built set has {} identities from {} archives ({} skipped)",
            partial.built.len(),
            partial.scanned,
            skipped.len()
        );

        BuiltScan {
            built: partial.built,
            skipped,
            scanned: partial.scanned,
        }
    }
}
