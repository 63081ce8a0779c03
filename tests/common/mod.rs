// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::GzEncoder;
use pkggraph::config::InventoryConfig;
use pkggraph::recipe::ReaderKind;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A recipe collection and a built-package tree inside one temp dir.
///
/// Keep the value alive for as long as the paths are used.
pub struct Collection {
    pub dir: TempDir,
}

impl Collection {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn recipes_root(&self) -> PathBuf {
        self.dir.path().join("packages")
    }

    pub fn built_root(&self) -> PathBuf {
        self.dir.path().join("built")
    }

    /// Write `<recipes>/<repo>/<name>/{PKGBUILD,.SRCINFO}`
    pub fn add_recipe(&self, repo: &str, name: &str, srcinfo: &str) -> PathBuf {
        let dir = self.recipes_root().join(repo).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("PKGBUILD"), format!("pkgname={}\n", name)).unwrap();
        fs::write(dir.join(".SRCINFO"), srcinfo).unwrap();
        dir
    }

    /// Write a recipe directory with a PKGBUILD only
    pub fn add_bare_recipe(&self, repo: &str, name: &str) -> PathBuf {
        let dir = self.recipes_root().join(repo).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("PKGBUILD"), format!("pkgname={}\n", name)).unwrap();
        dir
    }

    /// Write a compiled package whose `.PKGINFO` is `pkginfo`
    pub fn add_archive(&self, repo: &str, file_name: &str, pkginfo: &str) -> PathBuf {
        let dir = self.built_root().join(repo);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        write_package(&path, &[(".PKGINFO", pkginfo), ("usr/share/doc/README", "docs\n")]);
        path
    }

    /// Write an arbitrary file under the built tree
    pub fn add_built_file(&self, repo: &str, file_name: &str, content: &[u8]) -> PathBuf {
        let dir = self.built_root().join(repo);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Configuration pointing at this collection, reading `.SRCINFO` only
    pub fn config(&self) -> InventoryConfig {
        let mut config = InventoryConfig::default();
        config.recipes.root = self.recipes_root();
        config.recipes.reader = ReaderKind::Srcinfo;
        config.built.root = Some(self.built_root());
        config.scan.jobs = 2;
        config
    }
}

/// Build a package archive, compressed according to the file extension
pub fn write_package(path: &Path, entries: &[(&str, &str)]) {
    let tarball = tar_bytes(entries);
    let name = path.to_string_lossy();

    let bytes = if name.ends_with(".zst") {
        zstd::encode_all(tarball.as_slice(), 3).unwrap()
    } else if name.ends_with(".xz") {
        let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
        encoder.write_all(&tarball).unwrap();
        encoder.finish().unwrap()
    } else {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tarball).unwrap();
        encoder.finish().unwrap()
    };

    File::create(path).unwrap().write_all(&bytes).unwrap();
}

fn tar_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, content.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap()
}
