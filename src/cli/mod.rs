// src/cli/mod.rs
//! CLI definitions for pkggraph
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! Every option here overrides the matching value of the configuration file:
//! - `graph` - Run the full pipeline and write the rendered graph
//! - `built` - Print the built set of a directory of compiled archives
//! - `records` - Print the parsed recipe records as JSON
//! - `show` - Print the relationships of one node
//! - `completions` - Generate shell completions

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use pkggraph::config::InventoryConfig;
use pkggraph::graph::EdgeKind;
use pkggraph::recipe::ReaderKind;
use pkggraph::render::OutputFormat;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "pkggraph")]
#[command(author = "pkggraph contributors")]
#[command(version)]
#[command(about = "Dependency graph of an Arch-style recipe collection", long_about = None)]
pub struct Cli {
    /// Configuration file (default: $XDG_CONFIG_HOME/pkggraph/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// No progress bars, warnings only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read recipes, scan built packages and write the dependency graph
    Graph {
        #[command(flatten)]
        recipes: RecipeArgs,

        /// Directory of compiled packages (<repo>/*.pkg.tar.*)
        #[arg(long)]
        built: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Draw each repeated edge once, weighted by its count
        #[arg(long)]
        simple: bool,

        /// Edge kinds to draw, comma separated (default: all)
        #[arg(long = "edge-kind", value_delimiter = ',', value_parser = parse_edge_kind)]
        edge_kinds: Vec<EdgeKind>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the identities confirmed by compiled packages
    Built {
        /// Directory of compiled packages (<repo>/*.pkg.tar.*)
        #[arg(long)]
        built: Option<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the parsed recipe records as JSON
    Records {
        #[command(flatten)]
        recipes: RecipeArgs,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show the relationships of one package, dependency or capability
    Show {
        /// Package name or capability
        identity: String,

        #[command(flatten)]
        recipes: RecipeArgs,

        /// Directory of compiled packages (<repo>/*.pkg.tar.*)
        #[arg(long)]
        built: Option<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Where recipes come from and how they are read
#[derive(Args, Debug, Default)]
pub struct RecipeArgs {
    /// Root directory holding one subdirectory per repository
    #[arg(long)]
    pub recipes: Option<PathBuf>,

    /// Repository to read, repeatable (default: core, extra, community)
    #[arg(long = "repo")]
    pub repos: Vec<String>,

    /// Recipe metadata reader
    #[arg(long, value_enum)]
    pub reader: Option<ReaderKind>,

    /// Architecture used for arch-specific keys such as depends_x86_64
    #[arg(long)]
    pub arch: Option<String>,
}

impl RecipeArgs {
    pub fn apply(&self, config: &mut InventoryConfig) {
        if let Some(root) = &self.recipes {
            config.recipes.root = root.clone();
        }
        if !self.repos.is_empty() {
            config.recipes.repositories = self.repos.clone();
        }
        if let Some(reader) = self.reader {
            config.recipes.reader = reader;
        }
        if let Some(arch) = &self.arch {
            config.recipes.arch = Some(arch.clone());
        }
    }
}

/// Worker pool settings
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Worker threads (default: one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

impl ScanArgs {
    pub fn apply(&self, config: &mut InventoryConfig) {
        if let Some(jobs) = self.jobs {
            config.scan.jobs = jobs;
        }
    }
}

fn parse_edge_kind(value: &str) -> Result<EdgeKind, String> {
    EdgeKind::from_str(value).map_err(|_| {
        format!(
            "unknown edge kind '{}' (expected runtime-dependency, build-time-dependency, \
             check-time-dependency or provides-alias)",
            value
        )
    })
}
