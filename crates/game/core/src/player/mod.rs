//! The player as seen by the encounter: a node mover plus a behavior machine.

mod mode;
mod mover;

pub use mode::PlayerMode;
pub use mover::{MoveRejection, MoverEvent, MoverPhase, PlayerMover};

use glam::Vec3;
use state_machine::StateMachine;

use crate::adversary::PlayerView;
use crate::config::PlayerConfig;
use crate::graph::{NodeGraph, NodeId};

#[derive(Clone, Debug)]
pub struct Player {
    mover: PlayerMover,
    fsm: StateMachine<PlayerMode>,
}

impl Player {
    /// Creates an idle, unbound player.
    pub fn new(config: PlayerConfig) -> Self {
        let mut mover = PlayerMover::new(config);
        let mut fsm = StateMachine::new();
        fsm.set(PlayerMode::Idle, &mut mover);
        Self { mover, fsm }
    }

    pub fn mode(&self) -> PlayerMode {
        self.fsm.current().unwrap_or_default()
    }

    pub fn mover(&self) -> &PlayerMover {
        &self.mover
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.mover.current_node()
    }

    pub fn position(&self) -> Vec3 {
        self.mover.position()
    }

    pub fn is_busy(&self) -> bool {
        self.mover.is_busy()
    }

    /// Snapshot handed to the adversary.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            node: self.mover.current_node(),
            position: self.mover.position(),
        }
    }

    pub fn place_at(&mut self, graph: &NodeGraph, node: NodeId) {
        self.mover.set_current_node(graph, node);
    }

    pub fn bind_nearest(&mut self, graph: &NodeGraph, position: Vec3) -> Option<NodeId> {
        self.mover.bind_nearest(graph, position)
    }

    pub fn request_move(&mut self, graph: &NodeGraph, target: NodeId) -> Result<(), MoveRejection> {
        self.mover.request_move(graph, target)
    }

    pub fn cancel_move(&mut self) -> bool {
        self.mover.cancel()
    }

    /// Advances the mover, then lets the behavior machine react.
    pub fn update(&mut self, graph: &NodeGraph, dt: f32) -> Option<MoverEvent> {
        let event = self.mover.update(graph, dt);
        self.fsm.tick(&mut self.mover);
        event
    }

    pub fn to_idle(&mut self) -> bool {
        self.fsm.set(PlayerMode::Idle, &mut self.mover)
    }

    pub fn to_hiding(&mut self) -> bool {
        self.fsm.set(PlayerMode::Hiding, &mut self.mover)
    }

    pub fn to_gimmick(&mut self) -> bool {
        self.fsm.set(PlayerMode::Gimmick, &mut self.mover)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> NodeGraph {
        let mut builder = NodeGraph::builder();
        let a = builder.add_node("a", Vec3::ZERO, true);
        let b = builder.add_node("b", Vec3::X, true);
        builder.connect(a, b);
        builder.build().unwrap()
    }

    #[test]
    fn idle_follows_mover_into_moving_and_back() {
        let graph = pair();
        let mut player = Player::default();
        player.place_at(&graph, NodeId(0));

        player.request_move(&graph, NodeId(1)).unwrap();
        player.update(&graph, 0.25);
        assert_eq!(player.mode(), PlayerMode::Moving);

        for _ in 0..20 {
            player.update(&graph, 0.25);
        }
        assert_eq!(player.mode(), PlayerMode::Idle);
        assert_eq!(player.current_node(), Some(NodeId(1)));
    }

    #[test]
    fn hiding_locks_and_unlocks_input() {
        let graph = pair();
        let mut player = Player::default();
        player.place_at(&graph, NodeId(0));

        assert!(player.to_hiding());
        assert!(!player.to_hiding());
        assert_eq!(
            player.request_move(&graph, NodeId(1)),
            Err(MoveRejection::InputDisabled)
        );

        player.to_idle();
        assert!(player.mover().input_enabled());
        assert!(player.request_move(&graph, NodeId(1)).is_ok());
    }

    #[test]
    fn gimmick_mode_holds_until_released() {
        let graph = pair();
        let mut player = Player::default();
        player.place_at(&graph, NodeId(0));

        player.to_gimmick();
        player.update(&graph, 0.25);

        assert_eq!(player.mode(), PlayerMode::Gimmick);
        assert!(!player.mover().input_enabled());
    }

    #[test]
    fn view_reports_node_and_position() {
        let graph = pair();
        let mut player = Player::default();
        player.place_at(&graph, NodeId(1));

        assert_eq!(
            player.view(),
            PlayerView {
                node: Some(NodeId(1)),
                position: Vec3::X
            }
        );
    }
}
