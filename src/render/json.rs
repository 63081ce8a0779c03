// src/render/json.rs

//! JSON output

use super::{GraphRenderer, RenderOptions};
use crate::error::{Error, Result};
use crate::graph::{EdgeKind, GraphNode, GraphStats, NodeId, PackageGraph};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    kind: EdgeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    multiplicity: Option<usize>,
}

#[derive(Serialize)]
struct JsonGraph<'a> {
    nodes: &'a [GraphNode],
    edges: Vec<JsonEdge<'a>>,
    stats: GraphStats,
}

/// Renders the graph as a `{ "nodes": [...], "edges": [...] }` document
///
/// Edges refer to nodes by identity.
#[derive(Debug, Clone)]
pub struct JsonRenderer {
    pretty: bool,
    options: RenderOptions,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self {
            pretty: true,
            options: RenderOptions::default(),
        }
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Collapse repeated edges and report their multiplicity
    pub fn simple(mut self, simple: bool) -> Self {
        self.options.simple = simple;
        self
    }
}

impl GraphRenderer for JsonRenderer {
    fn render(&self, graph: &PackageGraph, out: &mut dyn Write) -> Result<()> {
        let identity = |id: NodeId| graph.node(id).identity.as_str();

        let edges = if self.options.simple {
            graph
                .simple_edges()
                .into_iter()
                .filter(|weighted| self.options.includes(weighted.edge.kind))
                .map(|weighted| JsonEdge {
                    source: identity(weighted.edge.source),
                    target: identity(weighted.edge.target),
                    kind: weighted.edge.kind,
                    multiplicity: Some(weighted.multiplicity),
                })
                .collect()
        } else {
            graph
                .edges()
                .iter()
                .filter(|edge| self.options.includes(edge.kind))
                .map(|edge| JsonEdge {
                    source: identity(edge.source),
                    target: identity(edge.target),
                    kind: edge.kind,
                    multiplicity: None,
                })
                .collect()
        };

        let document = JsonGraph {
            nodes: graph.nodes(),
            edges,
            stats: graph.stats(),
        };

        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &document)
        } else {
            serde_json::to_writer(&mut *out, &document)
        };
        result.map_err(|e| Error::RenderError(format!("Failed to write JSON graph: {}", e)))?;
        writeln!(out)?;
        Ok(())
    }
}
