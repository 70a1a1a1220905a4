use std::fmt;

use glam::Vec3;

/// Stable handle of a node inside a [`NodeGraph`](super::NodeGraph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A discrete, named position in the traversable graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    name: String,
    position: Vec3,
    active: bool,
    neighbors: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: String, position: Vec3, active: bool) -> Self {
        Self {
            id,
            name,
            position,
            active,
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ordered neighbor references, unique, in authoring order.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    pub fn is_neighbor(&self, other: NodeId) -> bool {
        self.neighbors.contains(&other)
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Appends `neighbor` unless already present. Returns whether it was added.
    pub(crate) fn push_neighbor(&mut self, neighbor: NodeId) -> bool {
        if self.neighbors.contains(&neighbor) {
            return false;
        }
        self.neighbors.push(neighbor);
        true
    }
}
