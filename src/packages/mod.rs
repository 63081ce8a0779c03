// src/packages/mod.rs

//! Built package archives
//!
//! Compiled Arch packages (`.pkg.tar.zst`, `.pkg.tar.xz`, `.pkg.tar.gz`) carry
//! their metadata in an embedded `.PKGINFO` file. The built-set scan only
//! needs that text, obtained through the [`ArchiveMetadataReader`] trait.

pub mod arch;
pub mod pkginfo;

pub use arch::{ArchArchiveReader, CompressionFormat, discover_archives};
pub use pkginfo::PkgInfo;

use crate::error::Result;
use std::path::Path;

/// Extracts the raw `.PKGINFO` text from a package archive
pub trait ArchiveMetadataReader: Send + Sync {
    /// Read the embedded metadata of the archive at `path`
    fn read_metadata(&self, path: &Path) -> Result<String>;
}
