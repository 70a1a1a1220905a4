//! Authored patrol beats and the cursor an agent uses to follow them.
//!
//! A [`PatrolPath`] is static session data. The [`PatrolCursor`] is the only
//! mutable part and belongs to the agent walking the path.

use glam::Vec3;

use crate::error::{ErrorSeverity, GameError};
use crate::graph::{NodeGraph, NodeId};

/// Errors raised when validating a patrol path against a graph.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatrolError {
    /// A waypoint is not part of the graph.
    #[error("patrol waypoint {index} references unknown node {node}")]
    UnknownNode { index: usize, node: NodeId },
}

impl GameError for PatrolError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            PatrolError::UnknownNode { .. } => "PATROL_UNKNOWN_NODE",
        }
    }
}

/// Ordered, optionally looping sequence of graph nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatrolPath {
    nodes: Vec<NodeId>,
    looped: bool,
}

impl PatrolPath {
    pub fn new(nodes: Vec<NodeId>, looped: bool) -> Self {
        Self { nodes, looped }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    /// A path is usable when it has at least two waypoints.
    pub fn is_valid(&self) -> bool {
        self.nodes.len() >= 2
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.nodes.get(index).copied()
    }

    /// Checks that every waypoint exists in `graph`.
    ///
    /// Length is not an error: a path with fewer than two waypoints is kept
    /// but never followed.
    pub fn validate(&self, graph: &NodeGraph) -> Result<(), PatrolError> {
        for (index, &node) in self.nodes.iter().enumerate() {
            if !graph.contains(node) {
                return Err(PatrolError::UnknownNode { index, node });
            }
        }
        Ok(())
    }

    /// Index of the waypoint nearest to `position`. Unknown nodes are skipped.
    pub fn nearest_index(&self, graph: &NodeGraph, position: Vec3) -> Option<usize> {
        let mut best = None;
        let mut best_distance = f32::MAX;
        for (index, &node) in self.nodes.iter().enumerate() {
            let Some(p) = graph.position(node) else {
                continue;
            };
            let d = p.distance(position);
            if d < best_distance {
                best_distance = d;
                best = Some(index);
            }
        }
        best
    }
}

/// Direction in which a cursor walks the path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PatrolDirection {
    #[default]
    Forward,
    Backward,
}

impl PatrolDirection {
    fn sign(self) -> i64 {
        match self {
            PatrolDirection::Forward => 1,
            PatrolDirection::Backward => -1,
        }
    }
}

/// Position of an agent along a patrol path: the waypoint last reached and
/// the direction of travel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatrolCursor {
    index: usize,
    direction: PatrolDirection,
}

impl PatrolCursor {
    pub fn new(index: usize, direction: PatrolDirection) -> Self {
        Self { index, direction }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn direction(&self) -> PatrolDirection {
        self.direction
    }

    /// Cursor parked on the waypoint nearest to `node`, heading forward.
    pub fn aligned_to(path: &PatrolPath, graph: &NodeGraph, node: NodeId) -> Option<Self> {
        let position = graph.position(node)?;
        let index = path.nearest_index(graph, position)?;
        Some(Self::new(index, PatrolDirection::Forward))
    }

    /// The cursor one step further along `path`, without moving this one.
    ///
    /// Looping paths wrap to the opposite end. Open paths bounce: stepping past
    /// an end reverses direction and re-enters one step inside the bound.
    /// Returns `None` for paths with fewer than two waypoints.
    pub fn peek(&self, path: &PatrolPath) -> Option<Self> {
        if !path.is_valid() {
            return None;
        }
        let len = path.len() as i64;
        let index = (self.index as i64).min(len - 1);
        let raw = index + self.direction.sign();

        let next = if path.is_looped() {
            Self::new(raw.rem_euclid(len) as usize, self.direction)
        } else if raw >= len {
            Self::new((len - 2) as usize, PatrolDirection::Backward)
        } else if raw < 0 {
            Self::new(1, PatrolDirection::Forward)
        } else {
            Self::new(raw as usize, self.direction)
        };
        Some(next)
    }

    /// Advances one step. Returns the new index, or `None` for invalid paths.
    pub fn step(&mut self, path: &PatrolPath) -> Option<usize> {
        let next = self.peek(path)?;
        *self = next;
        Some(next.index)
    }

    /// Waypoint the next [`step`](Self::step) would land on.
    pub fn next_node(&self, path: &PatrolPath) -> Option<NodeId> {
        path.get(self.peek(path)?.index)
    }

    /// Up to `count` upcoming indices in travel order.
    ///
    /// Wraps on looping paths and stops at the end of open paths (no bounce).
    pub fn look_ahead(&self, path: &PatrolPath, count: usize) -> Vec<usize> {
        let mut indices = Vec::with_capacity(count);
        if path.is_empty() {
            return indices;
        }
        let len = path.len() as i64;
        let sign = self.direction.sign();
        for k in 1..=count as i64 {
            let raw = self.index as i64 + sign * k;
            if path.is_looped() {
                indices.push(raw.rem_euclid(len) as usize);
            } else if (0..len).contains(&raw) {
                indices.push(raw as usize);
            } else {
                break;
            }
        }
        indices
    }

    /// Commits progress after the agent arrived on `node`.
    ///
    /// If `node` is the next waypoint, the cursor steps onto it. Otherwise the
    /// first matching waypoint within `window` upcoming entries becomes the
    /// new position. Returns whether the cursor moved.
    pub fn advance_on_arrival(&mut self, path: &PatrolPath, node: NodeId, window: usize) -> bool {
        if self.next_node(path) == Some(node) {
            self.step(path);
            return true;
        }
        let hit = self
            .look_ahead(path, window)
            .into_iter()
            .find(|&index| path.get(index) == Some(node));
        match hit {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<NodeId> {
        (0..n).map(NodeId).collect()
    }

    fn line_graph(n: u32) -> NodeGraph {
        let mut builder = NodeGraph::builder();
        let nodes: Vec<_> = (0..n)
            .map(|i| builder.add_node(format!("p{i}"), Vec3::new(i as f32 * 2.0, 0.0, 0.0), true))
            .collect();
        for pair in nodes.windows(2) {
            builder.connect(pair[0], pair[1]);
        }
        builder.build().unwrap()
    }

    #[test]
    fn looped_cursor_returns_home_after_len_steps() {
        let path = PatrolPath::new(ids(5), true);
        let mut cursor = PatrolCursor::default();

        for _ in 0..path.len() {
            cursor.step(&path);
        }

        assert_eq!(cursor.index(), 0);
        assert_eq!(cursor.direction(), PatrolDirection::Forward);
    }

    #[test]
    fn open_cursor_bounces_at_both_ends() {
        let path = PatrolPath::new(ids(3), false);
        let mut cursor = PatrolCursor::default();

        let visited: Vec<_> = (0..6).filter_map(|_| cursor.step(&path)).collect();

        assert_eq!(visited, vec![1, 2, 1, 0, 1, 2]);
    }

    #[test]
    fn open_cursor_never_leaves_bounds() {
        let path = PatrolPath::new(ids(2), false);
        let mut cursor = PatrolCursor::new(1, PatrolDirection::Forward);

        assert_eq!(cursor.step(&path), Some(0));
        assert_eq!(cursor.direction(), PatrolDirection::Backward);
        assert_eq!(cursor.step(&path), Some(1));
        assert_eq!(cursor.direction(), PatrolDirection::Forward);
    }

    #[test]
    fn invalid_path_has_no_next() {
        let path = PatrolPath::new(ids(1), true);
        let mut cursor = PatrolCursor::default();

        assert_eq!(cursor.peek(&path), None);
        assert_eq!(cursor.step(&path), None);
        assert_eq!(cursor.next_node(&path), None);
    }

    #[test]
    fn look_ahead_wraps_or_truncates() {
        let looped = PatrolPath::new(ids(4), true);
        let open = PatrolPath::new(ids(4), false);
        let cursor = PatrolCursor::new(2, PatrolDirection::Forward);

        assert_eq!(cursor.look_ahead(&looped, 3), vec![3, 0, 1]);
        assert_eq!(cursor.look_ahead(&open, 3), vec![3]);

        let backward = PatrolCursor::new(1, PatrolDirection::Backward);
        assert_eq!(backward.look_ahead(&open, 3), vec![0]);
        assert_eq!(backward.look_ahead(&looped, 2), vec![0, 3]);
    }

    #[test]
    fn arrival_commits_next_or_window_hit() {
        let path = PatrolPath::new(ids(5), true);
        let mut cursor = PatrolCursor::default();

        assert!(cursor.advance_on_arrival(&path, NodeId(1), 3));
        assert_eq!(cursor.index(), 1);

        assert!(cursor.advance_on_arrival(&path, NodeId(4), 3));
        assert_eq!(cursor.index(), 4);

        assert!(!cursor.advance_on_arrival(&path, NodeId(3), 3));
        assert_eq!(cursor.index(), 4);
    }

    #[test]
    fn arrival_on_bounced_waypoint_reverses() {
        let path = PatrolPath::new(ids(3), false);
        let mut cursor = PatrolCursor::new(2, PatrolDirection::Forward);

        assert!(cursor.advance_on_arrival(&path, NodeId(1), 3));
        assert_eq!(cursor.index(), 1);
        assert_eq!(cursor.direction(), PatrolDirection::Backward);
    }

    #[test]
    fn aligned_cursor_picks_nearest_waypoint() {
        let graph = line_graph(6);
        let path = PatrolPath::new(vec![NodeId(0), NodeId(2), NodeId(5)], true);

        let cursor = PatrolCursor::aligned_to(&path, &graph, NodeId(3)).unwrap();
        assert_eq!(cursor.index(), 1);

        let cursor = PatrolCursor::aligned_to(&path, &graph, NodeId(4)).unwrap();
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn validate_reports_problems() {
        let graph = line_graph(3);

        let short = PatrolPath::new(vec![NodeId(0)], false);
        assert_eq!(short.validate(&graph), Ok(()));
        assert!(!short.is_valid());
        assert_eq!(
            PatrolPath::new(vec![NodeId(0), NodeId(9)], false).validate(&graph),
            Err(PatrolError::UnknownNode {
                index: 1,
                node: NodeId(9)
            })
        );
        assert!(PatrolPath::new(ids(3), true).validate(&graph).is_ok());
    }
}
