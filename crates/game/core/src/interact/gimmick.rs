//! Gimmick nodes: objectives the player charges up through skill checks.

use crate::config::GimmickConfig;
use crate::graph::{NodeGraph, NodeId};

/// Progress state of one gimmick.
///
/// Progress is clamped to `[0, max_progress]` on every change. Reaching the
/// maximum completes the gimmick once and activates its unlock list.
#[derive(Clone, Debug, PartialEq)]
pub struct GimmickNode {
    node: NodeId,
    progress: f32,
    running: bool,
    unlocks: Vec<NodeId>,
    config: GimmickConfig,
}

impl GimmickNode {
    pub fn new(node: NodeId, config: GimmickConfig) -> Self {
        Self {
            node,
            progress: 0.0,
            running: false,
            unlocks: Vec::new(),
            config,
        }
    }

    pub fn with_unlocks(mut self, unlocks: Vec<NodeId>) -> Self {
        self.unlocks = unlocks;
        self
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress as a fraction of the maximum.
    pub fn progress01(&self) -> f32 {
        (self.progress / self.config.max_progress).clamp(0.0, 1.0)
    }

    pub fn is_completed(&self) -> bool {
        self.progress >= self.config.max_progress
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn unlocks(&self) -> &[NodeId] {
        &self.unlocks
    }

    pub fn config(&self) -> &GimmickConfig {
        &self.config
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Passive decay while nobody works on the gimmick.
    pub fn decay(&mut self, dt: f32) {
        if !self.config.decay_when_idle || self.running || self.is_completed() {
            return;
        }
        self.progress = (self.progress - self.config.passive_decay_per_second * dt).max(0.0);
    }

    /// Adds progress. Returns true if this call completed the gimmick.
    pub fn add_progress(&mut self, graph: &mut NodeGraph, amount: f32) -> bool {
        if self.is_completed() {
            return false;
        }
        self.progress = (self.progress + amount).clamp(0.0, self.config.max_progress);
        if !self.is_completed() {
            return false;
        }
        for &node in &self.unlocks {
            graph.set_active(node, true);
        }
        tracing::info!(
            target: "game_core::interact",
            node = %self.node,
            unlocked = self.unlocks.len(),
            "Gimmick completed"
        );
        true
    }

    pub fn apply_fail_penalty(&mut self) {
        self.penalize(self.config.fail_progress_loss);
    }

    pub fn apply_cancel_penalty(&mut self) {
        self.penalize(self.config.cancel_progress_loss);
    }

    fn penalize(&mut self, loss: f32) {
        self.progress = (self.progress - loss).clamp(0.0, self.config.max_progress);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn graph_with_locked_door() -> NodeGraph {
        let mut builder = NodeGraph::builder();
        let lever = builder.add_node("lever", Vec3::ZERO, true);
        let door = builder.add_node("door", Vec3::X, false);
        builder.connect(lever, door);
        builder.build().unwrap()
    }

    #[test]
    fn completion_unlocks_once() {
        let mut graph = graph_with_locked_door();
        let mut gimmick =
            GimmickNode::new(NodeId(0), GimmickConfig::default()).with_unlocks(vec![NodeId(1)]);

        assert!(!gimmick.add_progress(&mut graph, 60.0));
        assert!(!graph.is_active(NodeId(1)));
        assert!(gimmick.add_progress(&mut graph, 60.0));
        assert_eq!(gimmick.progress(), 100.0);
        assert!(graph.is_active(NodeId(1)));
        assert!(!gimmick.add_progress(&mut graph, 5.0));
    }

    #[test]
    fn decay_only_when_idle_and_incomplete() {
        let mut graph = graph_with_locked_door();
        let mut gimmick = GimmickNode::new(NodeId(0), GimmickConfig::default());
        gimmick.add_progress(&mut graph, 10.0);

        gimmick.decay(1.0);
        assert_eq!(gimmick.progress(), 7.0);

        gimmick.set_running(true);
        gimmick.decay(1.0);
        assert_eq!(gimmick.progress(), 7.0);

        gimmick.set_running(false);
        gimmick.decay(10.0);
        assert_eq!(gimmick.progress(), 0.0);
    }

    #[test]
    fn penalties_clamp_at_zero() {
        let mut graph = graph_with_locked_door();
        let mut gimmick = GimmickNode::new(NodeId(0), GimmickConfig::default());
        gimmick.add_progress(&mut graph, 20.0);

        gimmick.apply_fail_penalty();
        assert_eq!(gimmick.progress(), 8.0);
        gimmick.apply_cancel_penalty();
        assert_eq!(gimmick.progress(), 2.0);
        gimmick.apply_fail_penalty();
        assert_eq!(gimmick.progress(), 0.0);
    }
}
