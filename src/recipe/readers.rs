// src/recipe/readers.rs

//! Recipe metadata readers

use super::srcinfo::parse_srcinfo;
use super::{PackageRecord, RecipeMetadataReader};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Name of the flattened metadata file inside a recipe directory
pub const SRCINFO_FILE: &str = ".SRCINFO";

/// Which reader to use for recipe directories
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReaderKind {
    /// `.SRCINFO` if present, `makepkg` otherwise
    #[default]
    Auto,
    /// Only read checked-in `.SRCINFO` files
    Srcinfo,
    /// Always run `makepkg --printsrcinfo`
    Makepkg,
}

impl ReaderKind {
    /// Construct the reader for this kind
    pub fn build(self, arch: Option<String>) -> Result<Box<dyn RecipeMetadataReader>> {
        let reader: Box<dyn RecipeMetadataReader> = match self {
            Self::Auto => Box::new(AutoReader::new(arch)),
            Self::Srcinfo => Box::new(SrcinfoFileReader::new(arch)),
            Self::Makepkg => Box::new(MakepkgReader::new(arch)?),
        };
        Ok(reader)
    }
}

/// Reads `<dir>/.SRCINFO`
#[derive(Debug, Clone, Default)]
pub struct SrcinfoFileReader {
    arch: Option<String>,
}

impl SrcinfoFileReader {
    pub fn new(arch: Option<String>) -> Self {
        Self { arch }
    }
}

impl RecipeMetadataReader for SrcinfoFileReader {
    fn read_recipe(&self, dir: &Path) -> Result<PackageRecord> {
        let path = dir.join(SRCINFO_FILE);
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        parse_srcinfo(&content, self.arch.as_deref())
    }
}

/// Runs `makepkg --printsrcinfo` inside the recipe directory
#[derive(Debug, Clone)]
pub struct MakepkgReader {
    makepkg: PathBuf,
    arch: Option<String>,
}

impl MakepkgReader {
    /// Locate `makepkg` on `PATH`
    pub fn new(arch: Option<String>) -> Result<Self> {
        let makepkg = which::which("makepkg")
            .map_err(|e| Error::ToolNotFound(format!("makepkg: {}", e)))?;
        Ok(Self::with_binary(makepkg, arch))
    }

    /// Use an explicit `makepkg` binary
    pub fn with_binary(makepkg: impl Into<PathBuf>, arch: Option<String>) -> Self {
        Self {
            makepkg: makepkg.into(),
            arch,
        }
    }

    fn print_srcinfo(&self, dir: &Path) -> Result<String> {
        debug!("Running {} --printsrcinfo in {}", self.makepkg.display(), dir.display());

        let output = Command::new(&self.makepkg)
            .arg("--printsrcinfo")
            .current_dir(dir)
            .output()
            .map_err(|e| {
                Error::CommandFailed(format!("Failed to run {}: {}", self.makepkg.display(), e))
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed(format!(
                "makepkg --printsrcinfo failed in {} ({}): {}",
                dir.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|e| {
            Error::ParseError(format!("makepkg output for {} is not UTF-8: {}", dir.display(), e))
        })
    }
}

impl RecipeMetadataReader for MakepkgReader {
    fn read_recipe(&self, dir: &Path) -> Result<PackageRecord> {
        let content = self.print_srcinfo(dir)?;
        parse_srcinfo(&content, self.arch.as_deref())
    }
}

/// Prefers `.SRCINFO`, falls back to `makepkg` when available
#[derive(Debug, Clone)]
pub struct AutoReader {
    srcinfo: SrcinfoFileReader,
    makepkg: Option<MakepkgReader>,
}

impl AutoReader {
    pub fn new(arch: Option<String>) -> Self {
        let makepkg = match MakepkgReader::new(arch.clone()) {
            Ok(reader) => Some(reader),
            Err(e) => {
                debug!("makepkg fallback unavailable: {}", e);
                None
            }
        };

        Self {
            srcinfo: SrcinfoFileReader::new(arch),
            makepkg,
        }
    }
}

impl RecipeMetadataReader for AutoReader {
    fn read_recipe(&self, dir: &Path) -> Result<PackageRecord> {
        if dir.join(SRCINFO_FILE).is_file() {
            return self.srcinfo.read_recipe(dir);
        }

        match &self.makepkg {
            Some(makepkg) => makepkg.read_recipe(dir),
            None => Err(Error::ToolNotFound(format!(
                "no {} in {} and makepkg is not installed",
                SRCINFO_FILE,
                dir.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn recipe_dir(srcinfo: Option<&str>) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("PKGBUILD"), "pkgname=foo\n").unwrap();
        if let Some(content) = srcinfo {
            fs::write(dir.path().join(SRCINFO_FILE), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_srcinfo_file_reader() {
        let dir = recipe_dir(Some("pkgbase = foo\n\tdepends = bar\n\npkgname = foo\n"));
        let record = SrcinfoFileReader::default().read_recipe(dir.path()).unwrap();

        assert_eq!(record.names, vec!["foo"]);
        assert_eq!(record.runtime_deps, vec!["bar"]);
    }

    #[test]
    fn test_srcinfo_file_missing() {
        let dir = recipe_dir(None);
        let err = SrcinfoFileReader::default().read_recipe(dir.path()).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_auto_reader_prefers_srcinfo() {
        let dir = recipe_dir(Some("pkgname = foo\n"));
        let reader = AutoReader {
            srcinfo: SrcinfoFileReader::default(),
            makepkg: Some(MakepkgReader::with_binary("/nonexistent/makepkg", None)),
        };

        let record = reader.read_recipe(dir.path()).unwrap();
        assert_eq!(record.names, vec!["foo"]);
    }

    #[test]
    fn test_auto_reader_without_makepkg() {
        let dir = recipe_dir(None);
        let reader = AutoReader {
            srcinfo: SrcinfoFileReader::default(),
            makepkg: None,
        };

        let err = reader.read_recipe(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(_)));
    }

    #[test]
    fn test_makepkg_reader_missing_binary() {
        let dir = recipe_dir(None);
        let reader = MakepkgReader::with_binary("/nonexistent/makepkg", None);

        let err = reader.read_recipe(dir.path()).unwrap_err();
        assert!(matches!(err, Error::CommandFailed(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_makepkg_reader_runs_in_recipe_dir() {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = tempfile::tempdir().unwrap();
        let script = bin_dir.path().join("makepkg");
        // Stand-in that prints the .SRCINFO-like file it finds in its cwd
        fs::write(&script, "#!/bin/sh\ncat ./srcinfo.txt\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let dir = recipe_dir(None);
        fs::write(
            dir.path().join("srcinfo.txt"),
            "pkgbase = foo\n\tmakedepends = cmake\npkgname = foo\n",
        )
        .unwrap();

        let reader = MakepkgReader::with_binary(&script, None);
        let record = reader.read_recipe(dir.path()).unwrap();
        assert_eq!(record.build_deps, vec!["cmake"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_makepkg_reader_failure_status() {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = tempfile::tempdir().unwrap();
        let script = bin_dir.path().join("makepkg");
        fs::write(&script, "#!/bin/sh\necho 'ERROR: PKGBUILD broken' >&2\nexit 4\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let dir = recipe_dir(None);
        let err = MakepkgReader::with_binary(&script, None)
            .read_recipe(dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("PKGBUILD broken"));
    }
}
