// src/graph/mod.rs

//! Package relationship graph
//!
//! The graph is a plain in-memory structure: a node vector indexed by
//! [`NodeId`], an identity index, and an edge list. It is built once by the
//! [`GraphAssembler`] and then handed to a renderer.
//!
//! # Edge Direction
//!
//! - `runtime-dependency`, `build-time-dependency`, `check-time-dependency`:
//!   package → the thing it depends on
//! - `provides-alias`: capability → each package that satisfies it, so the
//!   satisfiers of `X` are the targets of `X`'s outgoing alias edges
//!
//! # Example
//!
//! ```ignore
//! use pkggraph::graph::{GraphAssembler, EdgeKind};
//! use pkggraph::recipe::PackageRecord;
//!
//! let record = PackageRecord::new(["foo"], "foo").with_runtime_deps(["bar>=1.0"]);
//! let outcome = GraphAssembler::assemble(&[record], &Default::default());
//! let graph = outcome.graph;
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edges()[0].kind, EdgeKind::RuntimeDependency);
//! ```

mod assemble;
mod registry;
pub mod style;

pub use assemble::{AssemblyOutcome, GraphAssembler, RejectedRecord};
pub use registry::NodeRegistry;

use crate::specifier::normalize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// Handle to a node inside a [`NodeRegistry`] / [`PackageGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in creation order
    pub fn index(self) -> usize {
        self.0
    }
}

/// Role a node plays in the graph
///
/// `Package` wins over every other role: once a name is declared as an
/// emitted package it stays a package.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Classification {
    /// Declared in a recipe's `pkgname`
    Package,
    /// Target of a runtime `depends` entry
    Dependency,
    /// Target of a `makedepends` entry
    MakeDependency,
    /// Target of a `checkdepends` entry
    CheckDependency,
    /// Virtual capability from a `provides` entry
    ProvidedAlias,
}

/// Kind of relationship an edge records
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EdgeKind {
    RuntimeDependency,
    BuildTimeDependency,
    CheckTimeDependency,
    ProvidesAlias,
}

/// A node in the package graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Canonical identity, unique within the graph
    pub identity: String,
    pub classification: Classification,
    /// Present among the compiled archives
    pub built: bool,
    /// Recipe base name, set for packages of a split recipe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl GraphNode {
    pub(crate) fn new(identity: String, classification: Classification) -> Self {
        Self {
            identity,
            classification,
            built: false,
            group: None,
        }
    }
}

/// A directed, typed edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub kind: EdgeKind,
}

/// An edge of the deduplicated view with the number of times it was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge {
    pub edge: GraphEdge,
    pub multiplicity: usize,
}

/// Node and edge counts broken down by classification and kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub built: usize,
    pub by_classification: HashMap<Classification, usize>,
    pub by_edge_kind: HashMap<EdgeKind, usize>,
}

/// The assembled package graph
#[derive(Debug, Default)]
pub struct PackageGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<String, NodeId>,
    edges: Vec<GraphEdge>,
    /// Outgoing edge positions per node
    outgoing: Vec<Vec<usize>>,
    /// Incoming edge positions per node
    incoming: Vec<Vec<usize>>,
}

impl PackageGraph {
    pub(crate) fn from_parts(registry: NodeRegistry, edges: Vec<GraphEdge>) -> Self {
        let (nodes, index) = registry.into_parts();
        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];

        for (pos, edge) in edges.iter().enumerate() {
            outgoing[edge.source.0].push(pos);
            incoming[edge.target.0].push(pos);
        }

        Self {
            nodes,
            index,
            edges,
            outgoing,
            incoming,
        }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges, repeated declarations included
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// All edges in declaration order
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Get a node by handle
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    /// Look up a node handle by canonical identity
    pub fn find(&self, identity: &str) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    /// Look up a node by canonical identity
    pub fn get(&self, identity: &str) -> Option<&GraphNode> {
        self.find(identity).map(|id| self.node(id))
    }

    /// Look up the node a specifier refers to (`glibc>=2.31` finds `glibc`)
    pub fn lookup(&self, spec: &str) -> Option<&GraphNode> {
        self.get(normalize(spec))
    }

    /// Edges leaving `id`
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.outgoing[id.0].iter().map(|&pos| &self.edges[pos])
    }

    /// Edges arriving at `id`
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.incoming[id.0].iter().map(|&pos| &self.edges[pos])
    }

    /// Identities `identity` points to through edges of `kind`
    pub fn targets_of(&self, identity: &str, kind: EdgeKind) -> Vec<&str> {
        let Some(id) = self.find(identity) else {
            return Vec::new();
        };

        self.outgoing(id)
            .filter(|edge| edge.kind == kind)
            .map(|edge| self.node(edge.target).identity.as_str())
            .collect()
    }

    /// Identities that point to `identity` through edges of `kind`
    pub fn sources_of(&self, identity: &str, kind: EdgeKind) -> Vec<&str> {
        let Some(id) = self.find(identity) else {
            return Vec::new();
        };

        self.incoming(id)
            .filter(|edge| edge.kind == kind)
            .map(|edge| self.node(edge.source).identity.as_str())
            .collect()
    }

    /// Packages that satisfy a virtual capability
    pub fn satisfiers(&self, capability: &str) -> Vec<&str> {
        self.targets_of(capability, EdgeKind::ProvidesAlias)
    }

    /// Edges with repeated `(source, target, kind)` triples collapsed
    ///
    /// First-occurrence order is kept; `multiplicity` counts the repeats.
    pub fn simple_edges(&self) -> Vec<WeightedEdge> {
        let mut positions: HashMap<GraphEdge, usize> = HashMap::new();
        let mut weighted: Vec<WeightedEdge> = Vec::new();

        for edge in &self.edges {
            match positions.get(edge) {
                Some(&pos) => weighted[pos].multiplicity += 1,
                None => {
                    positions.insert(*edge, weighted.len());
                    weighted.push(WeightedEdge {
                        edge: *edge,
                        multiplicity: 1,
                    });
                }
            }
        }

        weighted
    }

    /// Count nodes and edges per classification and kind
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
            ..Default::default()
        };

        for node in &self.nodes {
            *stats.by_classification.entry(node.classification).or_default() += 1;
            if node.built {
                stats.built += 1;
            }
        }

        for edge in &self.edges {
            *stats.by_edge_kind.entry(edge.kind).or_default() += 1;
        }

        stats
    }
}
