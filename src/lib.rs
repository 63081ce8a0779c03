// src/lib.rs

//! pkggraph: package relationship inventory for Arch-style recipe collections
//!
//! Reads the dependency metadata of every recipe in a collection, checks which
//! packages already exist as compiled archives, and assembles one directed
//! graph of packages, dependencies and virtual capabilities.
//!
//! # Architecture
//!
//! - Specifiers: version constraints are stripped, `foo>=1.2` names `foo`
//! - Records: one [`recipe::PackageRecord`] per recipe directory
//! - Built set: identities confirmed by `.PKGINFO` inside compiled archives
//! - Graph: node registry plus typed edges, assembled in fixed passes
//! - Renderers: Graphviz and JSON sinks over the finished graph

pub mod builtset;
pub mod config;
mod error;
pub mod graph;
pub mod inventory;
pub mod packages;
pub mod progress;
pub mod recipe;
pub mod render;
pub mod specifier;

pub use builtset::{BuiltScan, BuiltSet, BuiltSetScanner, SkippedArchive};
pub use config::InventoryConfig;
pub use error::{Error, Result};
pub use graph::{
    Classification, EdgeKind, GraphAssembler, GraphEdge, GraphNode, NodeId, PackageGraph,
};
pub use inventory::{Inventory, InventoryReport};
pub use progress::{BarProgress, LogProgress, ProgressMode, ProgressTracker, SilentProgress};
pub use recipe::{PackageRecord, RecipeMetadataReader};
pub use render::{GraphRenderer, OutputFormat, RenderOptions};
pub use specifier::{canonical_identity, normalize};
