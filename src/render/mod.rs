// src/render/mod.rs

//! Graph renderers
//!
//! Renderers are sinks: they read a finished [`PackageGraph`] and write it to
//! any [`Write`] in a target format.

mod dot;
mod json;

pub use dot::DotRenderer;
pub use json::JsonRenderer;

use crate::error::Result;
use crate::graph::{EdgeKind, PackageGraph};
use serde::{Deserialize, Serialize};
use std::io::Write;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumString};

/// Writes a package graph in some output format
pub trait GraphRenderer {
    fn render(&self, graph: &PackageGraph, out: &mut dyn Write) -> Result<()>;
}

/// Options shared by all renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Collapse repeated edges and report how often each was declared
    pub simple: bool,
    /// Edge kinds to draw; nodes are always drawn
    pub edge_kinds: Vec<EdgeKind>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            simple: false,
            edge_kinds: EdgeKind::iter().collect(),
        }
    }
}

impl RenderOptions {
    pub fn includes(&self, kind: EdgeKind) -> bool {
        self.edge_kinds.contains(&kind)
    }
}

/// Output formats understood by [`OutputFormat::renderer`]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// Graphviz digraph
    #[default]
    Dot,
    /// JSON document with `nodes` and `edges`
    Json,
}

impl OutputFormat {
    /// Renderer for this format
    pub fn renderer(self, options: RenderOptions) -> Box<dyn GraphRenderer> {
        match self {
            Self::Dot => Box::new(DotRenderer::new().options(options)),
            Self::Json => Box::new(JsonRenderer::new().options(options)),
        }
    }

    /// Conventional file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }
}

/// Render `graph` into a string
pub fn render_to_string(renderer: &dyn GraphRenderer, graph: &PackageGraph) -> Result<String> {
    let mut buffer = Vec::new();
    renderer.render(graph, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| crate::Error::RenderError(format!("Rendered output is not UTF-8: {}", e)))
}
