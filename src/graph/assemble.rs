// src/graph/assemble.rs

//! Multi-pass graph assembly
//!
//! Assembly runs a fixed sequence of passes over the recipe records:
//!
//! 1. declare every emitted package name
//! 2. link provides aliases to the packages that satisfy them
//! 3. link runtime dependencies
//! 4. link build-time dependencies
//! 5. link check-time dependencies
//! 6. mark nodes found in the built set
//!
//! Packages are declared first so that dependency passes find them already
//! classified, and aliases exist before any dependency edge targets them.

use super::{Classification, EdgeKind, GraphEdge, NodeRegistry, PackageGraph};
use crate::builtset::BuiltSet;
use crate::recipe::PackageRecord;
use crate::specifier::{canonical_identity, normalize};
use tracing::{debug, info, warn};

/// A record dropped before assembly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Base name of the offending record
    pub base_name: String,
    pub reason: String,
}

/// Result of a full assembly run
#[derive(Debug)]
pub struct AssemblyOutcome {
    pub graph: PackageGraph,
    /// Records rejected for violating the record contract
    pub rejected: Vec<RejectedRecord>,
}

/// Builds a [`PackageGraph`] from recipe records
///
/// The individual passes are public so callers (and tests) can drive them
/// separately; [`GraphAssembler::assemble`] runs them in the required order.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    registry: NodeRegistry,
    edges: Vec<GraphEdge>,
}

impl GraphAssembler {
    /// Create an assembler with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every pass over `records` and mark nodes present in `built`
    ///
    /// Records with an empty `names` list are rejected and reported in the
    /// outcome; the rest are assembled.
    pub fn assemble(records: &[PackageRecord], built: &BuiltSet) -> AssemblyOutcome {
        let mut valid = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for record in records {
            match record.validate() {
                Ok(()) => valid.push(record),
                Err(e) => {
                    warn!("Rejecting recipe record: {}", e);
                    rejected.push(RejectedRecord {
                        base_name: record.base_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let mut assembler = Self::new();
        assembler.declare_packages(valid.iter().copied());
        assembler.link_provides(valid.iter().copied());
        assembler.link_runtime_deps(valid.iter().copied());
        assembler.link_build_deps(valid.iter().copied());
        assembler.link_check_deps(valid.iter().copied());
        assembler.mark_built(built);

        let graph = assembler.finish();
        info!(
            "Assembled graph: {} nodes, {} edges from {} records ({} rejected)",
            graph.node_count(),
            graph.edge_count(),
            valid.len(),
            rejected.len()
        );

        AssemblyOutcome { graph, rejected }
    }

    /// Pass 1: register every emitted package name as a `package` node
    pub fn declare_packages<'a>(&mut self, records: impl IntoIterator<Item = &'a PackageRecord>) {
        let before = self.registry.len();

        for record in records {
            let split = record.is_split();
            for name in &record.names {
                let id = self.registry.get_or_create(name, Classification::Package);
                if split {
                    let node = self.registry.node_mut(id);
                    if node.group.is_none() {
                        node.group = Some(record.base_name.clone());
                    }
                }
            }
        }

        debug!("Declared {} package nodes", self.registry.len() - before);
    }

    /// Pass 2: link each provided capability to the packages providing it
    pub fn link_provides<'a>(&mut self, records: impl IntoIterator<Item = &'a PackageRecord>) {
        let before = self.edges.len();

        for record in records {
            for provide in &record.provides {
                let capability = normalize(provide);
                let alias = self
                    .registry
                    .get_or_create(capability, Classification::ProvidedAlias);

                for name in &record.names {
                    let package = self.registry.get_or_create(name, Classification::Package);
                    self.edges.push(GraphEdge {
                        source: alias,
                        target: package,
                        kind: EdgeKind::ProvidesAlias,
                    });
                }
            }
        }

        debug!("Linked {} provides edges", self.edges.len() - before);
    }

    /// Pass 3: runtime `depends` edges
    pub fn link_runtime_deps<'a>(&mut self, records: impl IntoIterator<Item = &'a PackageRecord>) {
        self.link_dependencies(
            records,
            |record| record.runtime_deps.as_slice(),
            Classification::Dependency,
            EdgeKind::RuntimeDependency,
        );
    }

    /// Pass 4: build-time `makedepends` edges
    pub fn link_build_deps<'a>(&mut self, records: impl IntoIterator<Item = &'a PackageRecord>) {
        self.link_dependencies(
            records,
            |record| record.build_deps.as_slice(),
            Classification::MakeDependency,
            EdgeKind::BuildTimeDependency,
        );
    }

    /// Pass 5: check-time `checkdepends` edges
    pub fn link_check_deps<'a>(&mut self, records: impl IntoIterator<Item = &'a PackageRecord>) {
        self.link_dependencies(
            records,
            |record| record.check_deps.as_slice(),
            Classification::CheckDependency,
            EdgeKind::CheckTimeDependency,
        );
    }

    fn link_dependencies<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a PackageRecord>,
        select: fn(&PackageRecord) -> &[String],
        role: Classification,
        kind: EdgeKind,
    ) {
        let before = self.edges.len();

        for record in records {
            for spec in select(record) {
                let Some(identity) = canonical_identity(spec) else {
                    continue;
                };

                let dependency = self.registry.get_or_create(identity, role);
                for name in &record.names {
                    let package = self.registry.get_or_create(name, Classification::Package);
                    self.edges.push(GraphEdge {
                        source: package,
                        target: dependency,
                        kind,
                    });
                }
            }
        }

        debug!("Linked {} {} edges", self.edges.len() - before, kind);
    }

    /// Final pass: flag every node whose identity is in `built`
    pub fn mark_built(&mut self, built: &BuiltSet) {
        let mut marked = 0;
        for node in self.registry.iter_mut() {
            node.built = built.contains(&node.identity);
            if node.built {
                marked += 1;
            }
        }
        debug!("Marked {} nodes as built", marked);
    }

    /// Registry built so far
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// Edges drawn so far
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Freeze the assembled nodes and edges into a [`PackageGraph`]
    pub fn finish(self) -> PackageGraph {
        PackageGraph::from_parts(self.registry, self.edges)
    }
}
