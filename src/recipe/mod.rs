// src/recipe/mod.rs

//! Recipe metadata
//!
//! A recipe is a PKGBUILD directory describing one or more binary packages
//! built from a common source. The graph only needs a small slice of its
//! metadata, captured in [`PackageRecord`]:
//!
//! - `names`: every package the recipe emits (`pkgname`, split packages
//!   included)
//! - `base_name`: the source identifier (`pkgbase`)
//! - `provides`, `runtime_deps`, `build_deps`, `check_deps`
//!
//! Every field is an always-present sequence. Whether the underlying
//! metadata held a scalar or an array is settled by the reader, never by the
//! graph code.
//!
//! # Readers
//!
//! Records come from a [`RecipeMetadataReader`]:
//! - [`SrcinfoFileReader`]: reads a checked-in `.SRCINFO`
//! - [`MakepkgReader`]: runs `makepkg --printsrcinfo` in the recipe directory
//! - [`AutoReader`]: `.SRCINFO` when present, `makepkg` otherwise

mod discover;
mod readers;
pub mod srcinfo;

pub use discover::{FailedRecipe, RecipeScan, discover_recipes, read_recipes};
pub use readers::{AutoReader, MakepkgReader, ReaderKind, SrcinfoFileReader};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dependency metadata of one recipe directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Binary package names emitted by this recipe
    pub names: Vec<String>,
    /// Source identifier of the recipe
    pub base_name: String,
    /// Virtual capabilities, possibly version-qualified
    #[serde(default)]
    pub provides: Vec<String>,
    /// Runtime dependency specifiers
    #[serde(default)]
    pub runtime_deps: Vec<String>,
    /// Build-time dependency specifiers
    #[serde(default)]
    pub build_deps: Vec<String>,
    /// Check-time dependency specifiers
    #[serde(default)]
    pub check_deps: Vec<String>,
}

impl PackageRecord {
    /// Create a record with the given package names and no relationships
    pub fn new<I, S>(names: I, base_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            base_name: base_name.into(),
            ..Default::default()
        }
    }

    pub fn with_provides<I, S>(mut self, provides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provides = provides.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_runtime_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runtime_deps = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_build_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_deps = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_check_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.check_deps = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this recipe emits more than one package
    pub fn is_split(&self) -> bool {
        self.names.len() > 1
    }

    /// Check the record contract: at least one package name
    pub fn validate(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(Error::MalformedRecord(format!(
                "recipe '{}' declares no package names",
                self.base_name
            )));
        }
        Ok(())
    }
}

/// Produces a [`PackageRecord`] from a recipe directory
///
/// Implementations must be shareable across the worker pool that reads
/// recipes in parallel.
pub trait RecipeMetadataReader: Send + Sync {
    /// Read the metadata of the recipe in `dir`
    fn read_recipe(&self, dir: &Path) -> Result<PackageRecord>;
}
