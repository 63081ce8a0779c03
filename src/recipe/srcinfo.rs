// src/recipe/srcinfo.rs

//! `.SRCINFO` parser
//!
//! `.SRCINFO` is the flattened form of a PKGBUILD that `makepkg --printsrcinfo`
//! emits. It is a list of `key = value` lines; repeated keys form arrays.
//!
//! ```text
//! pkgbase = foo
//! 	pkgver = 1.0
//! 	depends = glibc>=2.31
//! 	depends_x86_64 = lib32-glibc
//! 	makedepends = cmake
//! 	provides = libfoo=1.0
//!
//! pkgname = foo
//!
//! pkgname = foo-doc
//! 	depends = foo
//! ```
//!
//! The `pkgbase` section holds the values shared by every package, each
//! `pkgname` line opens a section for one split package. Per-package values
//! are merged into the record rather than replacing the base values, since
//! the record describes the recipe as a whole.

use super::PackageRecord;
use crate::error::{Error, Result};

/// Record fields fed by `.SRCINFO` keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Provides,
    Depends,
    MakeDepends,
    CheckDepends,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "provides" => Some(Self::Provides),
            "depends" => Some(Self::Depends),
            "makedepends" => Some(Self::MakeDepends),
            "checkdepends" => Some(Self::CheckDepends),
            _ => None,
        }
    }

    /// Resolve a key, accepting `<field>_<arch>` for the selected architecture
    fn resolve(key: &str, arch: Option<&str>) -> Option<Self> {
        if let Some(field) = Self::from_key(key) {
            return Some(field);
        }

        // arch names may contain '_' themselves (x86_64)
        let base = key.strip_suffix(arch?)?.strip_suffix('_')?;
        Self::from_key(base)
    }

    fn values<'a>(&self, record: &'a mut PackageRecord) -> &'a mut Vec<String> {
        match self {
            Self::Provides => &mut record.provides,
            Self::Depends => &mut record.runtime_deps,
            Self::MakeDepends => &mut record.build_deps,
            Self::CheckDepends => &mut record.check_deps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Base,
    Package,
}

/// Parse `.SRCINFO` content into a [`PackageRecord`]
///
/// `arch` selects which architecture-suffixed keys (`depends_x86_64`) are
/// included; with `None` only unsuffixed keys are read.
pub fn parse_srcinfo(content: &str, arch: Option<&str>) -> Result<PackageRecord> {
    let mut record = PackageRecord::default();
    let mut base_name: Option<String> = None;
    let mut section = Section::Base;

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::ParseError(format!(
                "line {}: expected 'key = value', found '{}'",
                lineno + 1,
                line
            )));
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "pkgbase" => {
                base_name = Some(value.to_string());
                section = Section::Base;
            }
            "pkgname" => {
                if !record.names.iter().any(|n| n == value) {
                    record.names.push(value.to_string());
                }
                section = Section::Package;
            }
            _ => {
                let Some(field) = Field::resolve(key, arch) else {
                    continue;
                };
                let values = field.values(&mut record);
                match section {
                    Section::Base => values.push(value.to_string()),
                    Section::Package => {
                        if !values.iter().any(|v| v == value) {
                            values.push(value.to_string());
                        }
                    }
                }
            }
        }
    }

    if record.names.is_empty() {
        return Err(Error::MalformedRecord(format!(
            "no pkgname in .SRCINFO{}",
            base_name
                .as_deref()
                .map(|b| format!(" for '{}'", b))
                .unwrap_or_default()
        )));
    }

    record.base_name = base_name.unwrap_or_else(|| record.names[0].clone());
    Ok(record)
}
