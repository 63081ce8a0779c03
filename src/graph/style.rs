// src/graph/style.rs

//! Color mapping shared by the renderers

use super::{Classification, EdgeKind, GraphNode};

/// Fill color of nodes already present among the compiled archives
pub const BUILT_COLOR: &str = "#003ea3";

/// Background of split-package clusters
pub const CLUSTER_COLOR: &str = "lightgrey";

/// Fill color for a classification
pub fn classification_color(classification: Classification) -> &'static str {
    match classification {
        Classification::Package => "lightblue",
        Classification::Dependency
        | Classification::MakeDependency
        | Classification::CheckDependency => "red",
        Classification::ProvidedAlias => "green",
    }
}

/// Fill color for a node; built nodes override their classification color
pub fn node_color(node: &GraphNode) -> &'static str {
    if node.built {
        BUILT_COLOR
    } else {
        classification_color(node.classification)
    }
}

/// Line color for an edge kind
pub fn edge_color(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::RuntimeDependency | EdgeKind::ProvidesAlias => "black",
        EdgeKind::BuildTimeDependency => "red",
        EdgeKind::CheckTimeDependency => "orange",
    }
}

/// Line style for an edge kind
pub fn edge_style(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::ProvidesAlias => "dashed",
        _ => "solid",
    }
}
