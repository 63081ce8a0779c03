// src/packages/arch.rs

//! Arch Linux package archives
//!
//! Opens .pkg.tar.zst, .pkg.tar.xz and .pkg.tar.gz packages and extracts the
//! embedded .PKGINFO

use super::ArchiveMetadataReader;
use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, info, warn};
use xz2::read::XzDecoder;

/// Name of the metadata entry inside a package archive
pub const PKGINFO_ENTRY: &str = ".PKGINFO";

/// Package compression format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    Zstd,
    Xz,
    Gzip,
}

impl CompressionFormat {
    /// Detect compression format from file extension
    pub fn detect(path: &Path) -> Result<Self> {
        let name = path.to_string_lossy();
        if name.ends_with(".pkg.tar.zst") {
            Ok(Self::Zstd)
        } else if name.ends_with(".pkg.tar.xz") {
            Ok(Self::Xz)
        } else if name.ends_with(".pkg.tar.gz") {
            Ok(Self::Gzip)
        } else {
            Err(Error::UnsupportedFormat(format!(
                "Unsupported Arch package format: {}. Expected .pkg.tar.zst, .pkg.tar.xz, or .pkg.tar.gz",
                name
            )))
        }
    }
}

/// Reads `.PKGINFO` out of Arch package archives
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchArchiveReader;

impl ArchArchiveReader {
    pub fn new() -> Self {
        Self
    }

    /// Open and decompress the package archive
    fn open_archive(path: &Path) -> Result<Archive<Box<dyn Read>>> {
        let compression = CompressionFormat::detect(path)
            .map_err(|e| Error::malformed_archive(path, e.to_string()))?;

        let file = File::open(path).map_err(|e| {
            Error::malformed_archive(path, format!("Failed to open package file: {}", e))
        })?;

        let reader: Box<dyn Read> = match compression {
            CompressionFormat::Zstd => {
                let decoder = zstd::Decoder::new(file).map_err(|e| {
                    Error::malformed_archive(path, format!("Failed to create zstd decoder: {}", e))
                })?;
                Box::new(decoder)
            }
            CompressionFormat::Xz => Box::new(XzDecoder::new(file)),
            CompressionFormat::Gzip => Box::new(GzDecoder::new(file)),
        };

        Ok(Archive::new(reader))
    }
}

impl ArchiveMetadataReader for ArchArchiveReader {
    fn read_metadata(&self, path: &Path) -> Result<String> {
        debug!("Reading {} from {}", PKGINFO_ENTRY, path.display());

        let mut archive = Self::open_archive(path)?;
        let entries = archive.entries().map_err(|e| {
            Error::malformed_archive(path, format!("Failed to read archive: {}", e))
        })?;

        for entry in entries {
            let mut entry = entry.map_err(|e| {
                Error::malformed_archive(path, format!("Failed to read entry: {}", e))
            })?;

            let entry_path = entry
                .path()
                .map_err(|e| {
                    Error::malformed_archive(path, format!("Failed to get entry path: {}", e))
                })?
                .to_string_lossy()
                .to_string();

            if entry_path == PKGINFO_ENTRY {
                let mut content = String::new();
                entry.read_to_string(&mut content).map_err(|e| {
                    Error::malformed_archive(path, format!("Failed to read .PKGINFO: {}", e))
                })?;
                return Ok(content);
            }
        }

        Err(Error::malformed_archive(path, "No .PKGINFO file found in package"))
    }
}

/// Find package archives under `<root>/*/*.pkg.tar.{zst,xz,gz}`
///
/// Signature files and other formats are skipped. Paths are sorted.
pub fn discover_archives(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/*/*.pkg.tar.*",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let entries = glob::glob(&pattern)
        .map_err(|e| Error::ParseError(format!("Invalid archive pattern '{}': {}", pattern, e)))?;

    let mut archives = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if CompressionFormat::detect(&path).is_ok() => archives.push(path),
            Ok(path) => debug!("Ignoring non-package file {}", path.display()),
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }
    archives.sort();

    info!("Discovered {} package archives under {}", archives.len(), root.display());
    Ok(archives)
}
