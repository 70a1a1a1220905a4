//! Node-to-node traversal of the player.
//!
//! A move goes through a cancellable wind-up (`Delay`) before the body starts
//! travelling (`Moving`). Only one move can be in flight.

use glam::Vec3;

use crate::config::PlayerConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::graph::{NodeGraph, NodeId};
use crate::math::move_towards;

/// Why a move request was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejection {
    #[error("movement input is disabled")]
    InputDisabled,

    #[error("a move is already in progress")]
    Busy,

    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0} is inactive")]
    Inactive(NodeId),

    #[error("node {to} is not connected to {from}")]
    NotAdjacent { from: NodeId, to: NodeId },
}

impl GameError for MoveRejection {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            MoveRejection::InputDisabled => "MOVE_INPUT_DISABLED",
            MoveRejection::Busy => "MOVE_BUSY",
            MoveRejection::UnknownNode(_) => "MOVE_UNKNOWN_NODE",
            MoveRejection::Inactive(_) => "MOVE_INACTIVE_NODE",
            MoveRejection::NotAdjacent { .. } => "MOVE_NOT_ADJACENT",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoverPhase {
    #[default]
    Idle,
    /// Wind-up before travel; the only cancellable phase.
    Delay,
    Moving,
}

/// Notifications produced by [`PlayerMover::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoverEvent {
    MoveStarted { from: Option<NodeId>, to: NodeId },
    MoveFinished { node: NodeId },
}

#[derive(Clone, Debug)]
pub struct PlayerMover {
    config: PlayerConfig,
    phase: MoverPhase,
    target: Option<NodeId>,
    delay_elapsed: f32,
    current_node: Option<NodeId>,
    position: Vec3,
    input_enabled: bool,
}

impl PlayerMover {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            phase: MoverPhase::Idle,
            target: None,
            delay_elapsed: 0.0,
            current_node: None,
            position: Vec3::ZERO,
            input_enabled: true,
        }
    }

    pub fn phase(&self) -> MoverPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != MoverPhase::Idle
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current_node
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    /// Binds to `node` and snaps onto it.
    pub fn set_current_node(&mut self, graph: &NodeGraph, node: NodeId) {
        self.current_node = Some(node);
        if let Some(position) = graph.position(node) {
            self.position = position;
        }
    }

    /// Binds to the node nearest to `position`. Returns the bound node.
    pub fn bind_nearest(&mut self, graph: &NodeGraph, position: Vec3) -> Option<NodeId> {
        self.position = position;
        let node = graph.nearest_node(position)?;
        self.set_current_node(graph, node);
        Some(node)
    }

    /// Starts a move toward `target`.
    ///
    /// # Errors
    ///
    /// Refused while input is disabled or a move is in progress, and for
    /// unknown, inactive or non-adjacent targets. Adjacency is only checked
    /// when the mover is bound to a node.
    pub fn request_move(&mut self, graph: &NodeGraph, target: NodeId) -> Result<(), MoveRejection> {
        if !self.input_enabled {
            return Err(MoveRejection::InputDisabled);
        }
        if self.is_busy() {
            return Err(MoveRejection::Busy);
        }
        if !graph.contains(target) {
            return Err(MoveRejection::UnknownNode(target));
        }
        if !graph.is_active(target) {
            return Err(MoveRejection::Inactive(target));
        }
        if let Some(from) = self.current_node
            && !graph.is_neighbor(from, target)
        {
            return Err(MoveRejection::NotAdjacent { from, to: target });
        }

        self.phase = MoverPhase::Delay;
        self.target = Some(target);
        self.delay_elapsed = 0.0;
        tracing::debug!(
            target: "game_core::player",
            node = %target,
            "Move requested"
        );
        Ok(())
    }

    /// Aborts a move that is still winding up. Returns whether one was cancelled.
    pub fn cancel(&mut self) -> bool {
        if self.phase != MoverPhase::Delay {
            return false;
        }
        self.phase = MoverPhase::Idle;
        self.target = None;
        self.delay_elapsed = 0.0;
        tracing::debug!(target: "game_core::player", "Move cancelled");
        true
    }

    /// Advances the wind-up or the travel by `dt` seconds.
    pub fn update(&mut self, graph: &NodeGraph, dt: f32) -> Option<MoverEvent> {
        let target = self.target?;
        match self.phase {
            MoverPhase::Idle => None,
            MoverPhase::Delay => {
                self.delay_elapsed += dt;
                if self.delay_elapsed < self.config.move_delay {
                    return None;
                }
                self.phase = MoverPhase::Moving;
                Some(MoverEvent::MoveStarted {
                    from: self.current_node,
                    to: target,
                })
            }
            MoverPhase::Moving => {
                let Some(destination) = graph.position(target) else {
                    self.phase = MoverPhase::Idle;
                    self.target = None;
                    return None;
                };
                self.position =
                    move_towards(self.position, destination, self.config.move_speed * dt);
                if self.position.distance(destination) > self.config.arrive_distance {
                    return None;
                }
                self.position = destination;
                self.current_node = Some(target);
                self.target = None;
                self.phase = MoverPhase::Idle;
                tracing::debug!(
                    target: "game_core::player",
                    node = %target,
                    "Move finished"
                );
                Some(MoverEvent::MoveFinished { node: target })
            }
        }
    }
}

impl Default for PlayerMover {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> NodeGraph {
        let mut builder = NodeGraph::builder();
        let a = builder.add_node("a", Vec3::ZERO, true);
        let b = builder.add_node("b", Vec3::new(1.0, 0.0, 0.0), true);
        let c = builder.add_node("c", Vec3::new(2.0, 0.0, 0.0), false);
        builder.connect(a, b).connect(b, c);
        builder.build().unwrap()
    }

    fn bound(graph: &NodeGraph) -> PlayerMover {
        let mut mover = PlayerMover::default();
        mover.set_current_node(graph, NodeId(0));
        mover
    }

    #[test]
    fn move_runs_delay_then_travel() {
        let graph = corridor();
        let mut mover = bound(&graph);

        mover.request_move(&graph, NodeId(1)).unwrap();
        assert_eq!(mover.phase(), MoverPhase::Delay);

        assert_eq!(mover.update(&graph, 0.25), None);
        assert_eq!(mover.update(&graph, 0.25), None);
        assert_eq!(
            mover.update(&graph, 0.25),
            Some(MoverEvent::MoveStarted {
                from: Some(NodeId(0)),
                to: NodeId(1)
            })
        );
        assert_eq!(mover.current_node(), Some(NodeId(0)));

        let mut finished = None;
        for _ in 0..10 {
            if let Some(event) = mover.update(&graph, 0.125) {
                finished = Some(event);
                break;
            }
        }

        assert_eq!(finished, Some(MoverEvent::MoveFinished { node: NodeId(1) }));
        assert_eq!(mover.current_node(), Some(NodeId(1)));
        assert_eq!(mover.position(), Vec3::new(1.0, 0.0, 0.0));
        assert!(!mover.is_busy());
    }

    #[test]
    fn rejects_invalid_targets() {
        let graph = corridor();
        let mut mover = bound(&graph);

        assert_eq!(
            mover.request_move(&graph, NodeId(9)),
            Err(MoveRejection::UnknownNode(NodeId(9)))
        );
        assert_eq!(
            mover.request_move(&graph, NodeId(2)),
            Err(MoveRejection::Inactive(NodeId(2)))
        );

        let mut open = graph.clone();
        open.set_active(NodeId(2), true);
        assert_eq!(
            mover.request_move(&open, NodeId(2)),
            Err(MoveRejection::NotAdjacent {
                from: NodeId(0),
                to: NodeId(2)
            })
        );
    }

    #[test]
    fn rejects_when_busy_or_disabled() {
        let graph = corridor();
        let mut mover = bound(&graph);

        mover.request_move(&graph, NodeId(1)).unwrap();
        assert_eq!(
            mover.request_move(&graph, NodeId(1)),
            Err(MoveRejection::Busy)
        );

        let mut mover = bound(&graph);
        mover.set_input_enabled(false);
        let err = mover.request_move(&graph, NodeId(1)).unwrap_err();
        assert_eq!(err, MoveRejection::InputDisabled);
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn cancel_only_during_delay() {
        let graph = corridor();
        let mut mover = bound(&graph);

        assert!(!mover.cancel());
        mover.request_move(&graph, NodeId(1)).unwrap();
        assert!(mover.cancel());
        assert!(!mover.is_busy());
        assert_eq!(mover.target(), None);

        mover.request_move(&graph, NodeId(1)).unwrap();
        for _ in 0..3 {
            mover.update(&graph, 0.25);
        }
        assert_eq!(mover.phase(), MoverPhase::Moving);
        assert!(!mover.cancel());
    }

    #[test]
    fn unbound_mover_accepts_any_active_node() {
        let graph = corridor();
        let mut mover = PlayerMover::default();

        assert!(mover.request_move(&graph, NodeId(1)).is_ok());
    }

    #[test]
    fn bind_nearest_snaps_position() {
        let graph = corridor();
        let mut mover = PlayerMover::default();

        assert_eq!(
            mover.bind_nearest(&graph, Vec3::new(0.9, 0.0, 0.2)),
            Some(NodeId(1))
        );
        assert_eq!(mover.position(), Vec3::new(1.0, 0.0, 0.0));
    }
}
