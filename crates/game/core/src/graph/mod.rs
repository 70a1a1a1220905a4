//! Node graph: the spatial and topological substrate of the encounter.
//!
//! Topology is static for a session. Edges are symmetric by authoring
//! convention, but nothing here relies on that: an asymmetric edge is simply
//! a directed one. Queries on unknown nodes degrade to empty answers instead
//! of failing.

mod builder;
mod node;

pub use builder::{GraphBuilder, GraphError};
pub use node::{Node, NodeId};

use glam::Vec3;

/// Static set of nodes with adjacency and per-node active flags.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub(crate) fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name() == name).map(Node::id)
    }

    /// Neighbors of `id` in authoring order; empty for unknown nodes.
    pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::neighbors).unwrap_or(&[])
    }

    /// Whether `id` exists and is active.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(Node::is_active)
    }

    /// Toggles the active flag. Returns `false` if the node does not exist.
    pub fn set_active(&mut self, id: NodeId, active: bool) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(node) => {
                if node.is_active() != active {
                    tracing::debug!(
                        target: "game_core::graph",
                        node = %id,
                        active,
                        "Node activity changed"
                    );
                }
                node.set_active(active);
                true
            }
            None => false,
        }
    }

    pub fn position(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(Node::position)
    }

    /// Whether `from` holds a neighbor reference to `to`.
    pub fn is_neighbor(&self, from: NodeId, to: NodeId) -> bool {
        self.node(from).is_some_and(|n| n.is_neighbor(to))
    }

    /// Euclidean distance between two nodes, if both exist.
    pub fn distance(&self, a: NodeId, b: NodeId) -> Option<f32> {
        Some(self.position(a)?.distance(self.position(b)?))
    }

    /// Node closest to `position` by straight-line distance.
    ///
    /// Linear scan over every node regardless of its active flag; the first
    /// minimum wins. Returns `None` only for an empty graph.
    pub fn nearest_node(&self, position: Vec3) -> Option<NodeId> {
        let mut best = None;
        let mut best_distance = f32::MAX;
        for node in &self.nodes {
            let d = node.position().distance(position);
            if d < best_distance {
                best_distance = d;
                best = Some(node.id());
            }
        }
        best
    }
}
