// src/render/dot.rs

//! Graphviz output

use super::{GraphRenderer, RenderOptions};
use crate::error::Result;
use crate::graph::style::{self, CLUSTER_COLOR};
use crate::graph::{GraphEdge, NodeId, PackageGraph};
use std::collections::HashMap;
use std::io::Write;

/// Renders the graph as a Graphviz `digraph`
///
/// Packages of a split recipe are grouped into a `cluster_<base>` subgraph.
#[derive(Debug, Clone)]
pub struct DotRenderer {
    name: String,
    options: RenderOptions,
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self {
            name: "packages".to_string(),
            options: RenderOptions::default(),
        }
    }
}

impl DotRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph name written after `digraph`
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Collapse repeated edges, using the repeat count as pen width
    pub fn simple(mut self, simple: bool) -> Self {
        self.options.simple = simple;
        self
    }

    fn write_node(
        &self,
        graph: &PackageGraph,
        id: NodeId,
        indent: &str,
        out: &mut dyn Write,
    ) -> Result<()> {
        let node = graph.node(id);
        writeln!(
            out,
            "{}{} [style=filled, fillcolor=\"{}\", tooltip=\"{}\"];",
            indent,
            quote(&node.identity),
            style::node_color(node),
            node.classification
        )?;
        Ok(())
    }

    fn write_edge(
        &self,
        graph: &PackageGraph,
        edge: &GraphEdge,
        penwidth: Option<usize>,
        out: &mut dyn Write,
    ) -> Result<()> {
        let source = &graph.node(edge.source).identity;
        let target = &graph.node(edge.target).identity;
        write!(
            out,
            "  {} -> {} [color=\"{}\", style={}",
            quote(source),
            quote(target),
            style::edge_color(edge.kind),
            style::edge_style(edge.kind)
        )?;
        if let Some(width) = penwidth {
            write!(out, ", penwidth={}", width)?;
        }
        writeln!(out, "];")?;
        Ok(())
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &PackageGraph, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "digraph {} {{", quote(&self.name))?;
        writeln!(out, "  node [shape=box];")?;

        // Clusters in order of first appearance
        let mut clusters: Vec<(&str, Vec<NodeId>)> = Vec::new();
        let mut cluster_pos: HashMap<&str, usize> = HashMap::new();

        for (index, node) in graph.nodes().iter().enumerate() {
            let id = NodeId(index);
            match node.group.as_deref() {
                Some(group) => {
                    let pos = *cluster_pos.entry(group).or_insert_with(|| {
                        clusters.push((group, Vec::new()));
                        clusters.len() - 1
                    });
                    clusters[pos].1.push(id);
                }
                None => self.write_node(graph, id, "  ", out)?,
            }
        }

        for (group, members) in &clusters {
            writeln!(out, "  subgraph {} {{", quote(&format!("cluster_{}", group)))?;
            writeln!(out, "    label={};", quote(group))?;
            writeln!(out, "    style=filled;")?;
            writeln!(out, "    color=\"{}\";", CLUSTER_COLOR)?;
            for &id in members {
                self.write_node(graph, id, "    ", out)?;
            }
            writeln!(out, "  }}")?;
        }

        if self.options.simple {
            for weighted in graph.simple_edges() {
                if self.options.includes(weighted.edge.kind) {
                    self.write_edge(graph, &weighted.edge, Some(weighted.multiplicity), out)?;
                }
            }
        } else {
            for edge in graph.edges() {
                if self.options.includes(edge.kind) {
                    self.write_edge(graph, edge, None, out)?;
                }
            }
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Quote a string as a DOT identifier
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtset::BuiltSet;
    use crate::graph::{EdgeKind, GraphAssembler};
    use crate::recipe::PackageRecord;
    use crate::render::render_to_string;

    fn render(records: &[PackageRecord], built: &BuiltSet, renderer: DotRenderer) -> String {
        let graph = GraphAssembler::assemble(records, built).graph;
        render_to_string(&renderer, &graph).unwrap()
    }

    #[test]
    fn test_nodes_and_edges() {
        let records = vec![
            PackageRecord::new(["foo"], "foo")
                .with_runtime_deps(["bar>=1.0"])
                .with_build_deps(["cmake"])
                .with_provides(["libfoo=1"]),
        ];
        let built: BuiltSet = ["foo"].into_iter().collect();
        let dot = render(&records, &built, DotRenderer::new());

        assert!(dot.starts_with("digraph \"packages\" {"));
        assert!(dot.contains("\"foo\" [style=filled, fillcolor=\"#003ea3\""));
        assert!(dot.contains("\"bar\" [style=filled, fillcolor=\"red\""));
        assert!(dot.contains("\"libfoo\" [style=filled, fillcolor=\"green\""));
        assert!(dot.contains("\"foo\" -> \"bar\" [color=\"black\", style=solid];"));
        assert!(dot.contains("\"foo\" -> \"cmake\" [color=\"red\", style=solid];"));
        assert!(dot.contains("\"libfoo\" -> \"foo\" [color=\"black\", style=dashed];"));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn test_split_packages_clustered() {
        let records = vec![
            PackageRecord::new(["gcc", "gcc-libs"], "gcc-base"),
            PackageRecord::new(["zlib"], "zlib"),
        ];
        let dot = render(&records, &BuiltSet::default(), DotRenderer::new());

        assert!(dot.contains("subgraph \"cluster_gcc-base\" {"));
        assert!(dot.contains("    label=\"gcc-base\";"));
        assert!(dot.contains("    \"gcc-libs\" [style=filled"));
        assert!(dot.contains("\n  \"zlib\" [style=filled"));
        assert!(!dot.contains("cluster_zlib"));
    }

    #[test]
    fn test_simple_collapses_repeats() {
        let records = vec![PackageRecord::new(["a"], "a").with_runtime_deps(["b", "b>=2", "b"])];

        let full = render(&records, &BuiltSet::default(), DotRenderer::new());
        assert_eq!(full.matches("\"a\" -> \"b\"").count(), 3);

        let simple = render(&records, &BuiltSet::default(), DotRenderer::new().simple(true));
        assert_eq!(simple.matches("\"a\" -> \"b\"").count(), 1);
        assert!(simple.contains("penwidth=3"));
    }

    #[test]
    fn test_edge_kind_filter() {
        let records = vec![
            PackageRecord::new(["a"], "a")
                .with_runtime_deps(["b"])
                .with_build_deps(["make"]),
        ];
        let options = RenderOptions {
            simple: false,
            edge_kinds: vec![EdgeKind::BuildTimeDependency],
        };
        let dot = render(&records, &BuiltSet::default(), DotRenderer::new().options(options));

        assert!(dot.contains("\"a\" -> \"make\""));
        assert!(!dot.contains("\"a\" -> \"b\""));
        // Nodes stay even when their edges are filtered out
        assert!(dot.contains("\"b\" [style=filled"));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }
}
