// src/graph/registry.rs

//! Identity-keyed node registry
//!
//! Every pass of the assembler asks the registry for nodes by canonical
//! identity. The registry hands back the same [`NodeId`] for the same string
//! no matter which pass asks or in which role, so a name first seen as an
//! unmet dependency and later declared as a package stays a single node.

use super::{Classification, GraphNode, NodeId};
use std::collections::HashMap;

/// Maps canonical identities to graph nodes
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<GraphNode>,
    index: HashMap<String, NodeId>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the node for `identity`, creating it with `role` if unseen
    ///
    /// An existing node is promoted to [`Classification::Package`] when `role`
    /// is `Package`; any other role leaves its classification untouched.
    pub fn get_or_create(&mut self, identity: &str, role: Classification) -> NodeId {
        if let Some(&id) = self.index.get(identity) {
            if role == Classification::Package {
                self.nodes[id.0].classification = Classification::Package;
            }
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode::new(identity.to_string(), role));
        self.index.insert(identity.to_string(), id);
        id
    }

    /// Look up an identity without creating it
    pub fn get(&self, identity: &str) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    /// Get a node by handle
    pub fn node(&self, id: NodeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut GraphNode {
        &mut self.nodes[id.0]
    }

    /// Iterate nodes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (NodeId(pos), node))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut GraphNode> + '_ {
        self.nodes.iter_mut()
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node has been registered yet
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_parts(self) -> (Vec<GraphNode>, HashMap<String, NodeId>) {
        (self.nodes, self.index)
    }
}
