// src/packages/pkginfo.rs

//! `.PKGINFO` parsing
//!
//! `.PKGINFO` is a list of `key = value` lines written by makepkg into every
//! package archive. Multi-valued keys (`provides`, `depend`, `license`) are
//! repeated once per value. Only `pkgname` and `provides` matter for the
//! built set; every other key is ignored.

use crate::error::{Error, Result};

/// Parsed `.PKGINFO` metadata relevant to the inventory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgInfo {
    pub name: Option<String>,
    pub provides: Vec<String>,
}

impl PkgInfo {
    /// Parse `.PKGINFO` content
    ///
    /// Comments, blank lines and lines without `=` are skipped; unknown keys
    /// are ignored.
    pub fn parse(content: &str) -> Self {
        let mut info = Self::default();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let value = value.trim().to_string();

                match key.trim() {
                    "pkgname" => info.name = Some(value),
                    "provides" => info.provides.push(value),
                    _ => {}
                }
            }
        }

        info
    }

    /// Identities this archive confirms as built
    ///
    /// The package name is taken verbatim; each provided capability is cut at
    /// its first `=` (`libfoo=1.2` confirms `libfoo`).
    pub fn built_identities(&self) -> Result<Vec<String>> {
        let name = self
            .name
            .as_ref()
            .ok_or_else(|| Error::ParseError("Package name not found in .PKGINFO".to_string()))?;

        let mut identities = Vec::with_capacity(1 + self.provides.len());
        identities.push(name.clone());
        for provide in &self.provides {
            let capability = provide.split('=').next().unwrap_or(provide);
            identities.push(capability.to_string());
        }

        Ok(identities)
    }
}
