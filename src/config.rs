// src/config.rs
//! Configuration file parsing
//!
//! Supports an optional TOML file with the following sections:
//! - [recipes] - Recipe root, repositories, reader and architecture
//! - [built] - Root of the compiled package archives
//! - [output] - Output format, destination and edge selection
//! - [scan] - Worker thread count
//!
//! Every field has a default, so an empty file (or no file) is valid.

use crate::error::{Error, Result};
use crate::graph::EdgeKind;
use crate::recipe::ReaderKind;
use crate::render::{OutputFormat, RenderOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::debug;

/// Directory under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "pkggraph";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryConfig {
    #[serde(default)]
    pub recipes: RecipesSection,

    #[serde(default)]
    pub built: BuiltSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub scan: ScanSection,
}

/// Recipe collection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecipesSection {
    /// Directory holding one subdirectory per repository
    #[serde(default = "default_recipes_root")]
    pub root: PathBuf,

    /// Repositories to read, in order
    #[serde(default = "default_repositories")]
    pub repositories: Vec<String>,

    /// How recipe metadata is obtained
    #[serde(default)]
    pub reader: ReaderKind,

    /// Architecture for `_<arch>` suffixed keys
    #[serde(default)]
    pub arch: Option<String>,
}

impl Default for RecipesSection {
    fn default() -> Self {
        Self {
            root: default_recipes_root(),
            repositories: default_repositories(),
            reader: ReaderKind::default(),
            arch: None,
        }
    }
}

/// Compiled archive settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuiltSection {
    /// Directory holding `<repo>/*.pkg.tar.*`; no built set when unset
    #[serde(default)]
    pub root: Option<PathBuf>,
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,

    /// Destination file; stdout when unset
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Collapse repeated edges
    #[serde(default)]
    pub simple: bool,

    /// Edge kinds to draw
    #[serde(default = "default_edge_kinds")]
    pub edge_kinds: Vec<EdgeKind>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            path: None,
            simple: false,
            edge_kinds: default_edge_kinds(),
        }
    }
}

impl OutputSection {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            simple: self.simple,
            edge_kinds: self.edge_kinds.clone(),
        }
    }
}

/// Parallel scan settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanSection {
    /// Worker threads (0 = one per core)
    #[serde(default)]
    pub jobs: usize,
}

fn default_recipes_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_repositories() -> Vec<String> {
    ["core", "extra", "community"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_edge_kinds() -> Vec<EdgeKind> {
    EdgeKind::iter().collect()
}

impl InventoryConfig {
    /// Create a default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `$XDG_CONFIG_HOME/pkggraph/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: InventoryConfig = toml::from_str(&content).map_err(|e| {
            Error::ConfigError(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: InventoryConfig =
            toml::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.recipes.repositories.iter().any(|r| r.trim().is_empty()) {
            return Err(Error::ConfigError(
                "recipes.repositories must not contain empty names".to_string(),
            ));
        }

        if self.recipes.repositories.iter().any(|r| r.contains('/')) {
            return Err(Error::ConfigError(
                "recipes.repositories entries are directory names, not paths".to_string(),
            ));
        }

        if self.output.edge_kinds.is_empty() {
            return Err(Error::ConfigError(
                "output.edge_kinds must name at least one edge kind".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert_eq!(config.recipes.root, PathBuf::from("."));
        assert_eq!(config.recipes.repositories, vec!["core", "extra", "community"]);
        assert_eq!(config.recipes.reader, ReaderKind::Auto);
        assert!(config.built.root.is_none());
        assert_eq!(config.output.format, OutputFormat::Dot);
        assert_eq!(config.output.edge_kinds.len(), 4);
        assert_eq!(config.scan.jobs, 0);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(InventoryConfig::parse("").unwrap(), InventoryConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
[recipes]
root = "/srv/packages"
repositories = ["core", "extra"]
reader = "srcinfo"
arch = "powerpc"

[built]
root = "/srv/built"

[output]
format = "json"
path = "graph.json"
simple = true
edge_kinds = ["runtime-dependency", "provides-alias"]

[scan]
jobs = 4
"#;

        let config = InventoryConfig::parse(toml).unwrap();
        assert_eq!(config.recipes.root, PathBuf::from("/srv/packages"));
        assert_eq!(config.recipes.repositories, vec!["core", "extra"]);
        assert_eq!(config.recipes.reader, ReaderKind::Srcinfo);
        assert_eq!(config.recipes.arch.as_deref(), Some("powerpc"));
        assert_eq!(config.built.root, Some(PathBuf::from("/srv/built")));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.simple);
        assert_eq!(
            config.output.edge_kinds,
            vec![EdgeKind::RuntimeDependency, EdgeKind::ProvidesAlias]
        );
        assert_eq!(config.scan.jobs, 4);

        let options = config.output.render_options();
        assert!(options.includes(EdgeKind::ProvidesAlias));
        assert!(!options.includes(EdgeKind::BuildTimeDependency));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = InventoryConfig::parse("[recipes]\nrepos = [\"core\"]\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_validation() {
        assert!(InventoryConfig::parse("[recipes]\nrepositories = [\"\"]\n").is_err());
        assert!(InventoryConfig::parse("[recipes]\nrepositories = [\"a/b\"]\n").is_err());
        assert!(InventoryConfig::parse("[output]\nedge_kinds = []\n").is_err());
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InventoryConfig::discover(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[scan]\njobs = 2\n").unwrap();

        let config = InventoryConfig::load(&path).unwrap();
        assert_eq!(config.scan.jobs, 2);
        assert_eq!(config.recipes.repositories.len(), 3);
    }
}
