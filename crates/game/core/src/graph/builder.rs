//! Construction of static node graphs.
//!
//! Graphs are authored once (by a scene file or a test) and handed to the
//! simulation fully built. Only the active flag changes afterwards.

use std::collections::HashMap;

use glam::Vec3;

use super::{Node, NodeGraph, NodeId};
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling a [`NodeGraph`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An edge references a node id that was never added.
    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),

    /// A name lookup failed.
    #[error("no node named '{0}'")]
    UnknownName(String),

    /// Two nodes were given the same name.
    #[error("node name '{0}' is used more than once")]
    DuplicateName(String),
}

impl GameError for GraphError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            GraphError::UnknownNode(_) => "GRAPH_UNKNOWN_NODE",
            GraphError::UnknownName(_) => "GRAPH_UNKNOWN_NAME",
            GraphError::DuplicateName(_) => "GRAPH_DUPLICATE_NAME",
        }
    }
}

/// Incremental builder for [`NodeGraph`].
///
/// Edge errors are collected and reported by [`GraphBuilder::build`] so that
/// authoring code can chain calls without checking each one.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
    error: Option<GraphError>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its handle.
    pub fn add_node(&mut self, name: impl Into<String>, position: Vec3, active: bool) -> NodeId {
        let name = name.into();
        let id = NodeId(self.nodes.len() as u32);
        if self.names.insert(name.clone(), id).is_some() {
            self.record(GraphError::DuplicateName(name.clone()));
        }
        self.nodes.push(Node::new(id, name, position, active));
        id
    }

    /// Looks up a previously added node by name.
    pub fn id_of(&self, name: &str) -> Result<NodeId, GraphError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownName(name.to_owned()))
    }

    /// Adds `a -> b` and `b -> a`.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> &mut Self {
        self.link(a, b);
        self.link(b, a)
    }

    /// Adds the directed edge `from -> to`. Duplicate edges are ignored.
    pub fn link(&mut self, from: NodeId, to: NodeId) -> &mut Self {
        if to.index() >= self.nodes.len() {
            self.record(GraphError::UnknownNode(to));
            return self;
        }
        match self.nodes.get_mut(from.index()) {
            Some(node) => {
                node.push_neighbor(to);
            }
            None => self.record(GraphError::UnknownNode(from)),
        }
        self
    }

    /// Finishes construction.
    ///
    /// # Errors
    ///
    /// Returns the first authoring error encountered while building.
    pub fn build(self) -> Result<NodeGraph, GraphError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(NodeGraph::from_nodes(self.nodes))
    }

    fn record(&mut self, error: GraphError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }
}
