//! Hide spots and the toggle that enters or leaves them.

use crate::events::{EventChannel, GameEvent};
use crate::graph::NodeId;
use crate::player::Player;

/// A node the player can hide on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HideSpot {
    pub node: NodeId,
    pub enabled: bool,
}

impl HideSpot {
    pub fn new(node: NodeId) -> Self {
        Self {
            node,
            enabled: true,
        }
    }
}

/// What a toggle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideChange {
    Entered(NodeId),
    Exited,
}

#[derive(Clone, Debug, Default)]
pub struct HideController {
    spots: Vec<HideSpot>,
    current: Option<HideSpot>,
}

impl HideController {
    pub fn new(spots: Vec<HideSpot>) -> Self {
        Self {
            spots,
            current: None,
        }
    }

    pub fn spots(&self) -> &[HideSpot] {
        &self.spots
    }

    pub fn is_hiding(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_spot(&self) -> Option<HideSpot> {
        self.current
    }

    pub fn spot_at(&self, node: NodeId) -> Option<HideSpot> {
        self.spots.iter().copied().find(|s| s.node == node)
    }

    /// Enters the spot under the player, or leaves the current one.
    ///
    /// Ignored while the player is mid-move. Entering needs an enabled spot on
    /// the player's current node.
    pub fn toggle(&mut self, player: &mut Player, events: &mut EventChannel) -> Option<HideChange> {
        if player.is_busy() {
            return None;
        }

        if self.current.take().is_some() {
            player.to_idle();
            events.publish(GameEvent::HideExited);
            tracing::debug!(target: "game_core::interact", "Left hide spot");
            return Some(HideChange::Exited);
        }

        let node = player.current_node()?;
        let spot = self.spot_at(node).filter(|s| s.enabled)?;
        self.current = Some(spot);
        player.to_hiding();
        events.publish(GameEvent::HideEntered);
        tracing::debug!(target: "game_core::interact", node = %node, "Entered hide spot");
        Some(HideChange::Entered(node))
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::events::Topics;
    use crate::graph::NodeGraph;
    use crate::player::PlayerMode;

    fn setup() -> (NodeGraph, Player, EventChannel) {
        let mut builder = NodeGraph::builder();
        let a = builder.add_node("closet", Vec3::ZERO, true);
        let b = builder.add_node("hall", Vec3::X, true);
        builder.connect(a, b);
        let graph = builder.build().unwrap();
        let mut player = Player::default();
        player.place_at(&graph, a);
        (graph, player, EventChannel::new())
    }

    #[test]
    fn toggle_enters_and_exits() {
        let (_, mut player, mut events) = setup();
        let observer = events.subscribe("observer", Topics::HIDING);
        let mut hide = HideController::new(vec![HideSpot::new(NodeId(0))]);

        assert_eq!(
            hide.toggle(&mut player, &mut events),
            Some(HideChange::Entered(NodeId(0)))
        );
        assert_eq!(player.mode(), PlayerMode::Hiding);
        assert!(hide.is_hiding());

        assert_eq!(
            hide.toggle(&mut player, &mut events),
            Some(HideChange::Exited)
        );
        assert_eq!(player.mode(), PlayerMode::Idle);
        assert_eq!(
            events.drain(observer),
            vec![GameEvent::HideEntered, GameEvent::HideExited]
        );
    }

    #[test]
    fn no_spot_or_disabled_spot_does_nothing() {
        let (graph, mut player, mut events) = setup();
        let mut hide = HideController::new(vec![HideSpot {
            node: NodeId(0),
            enabled: false,
        }]);

        assert_eq!(hide.toggle(&mut player, &mut events), None);

        player.place_at(&graph, NodeId(1));
        assert_eq!(hide.toggle(&mut player, &mut events), None);
        assert_eq!(player.mode(), PlayerMode::Idle);
        assert_eq!(events.published(), 0);
    }

    #[test]
    fn ignored_while_moving() {
        let (graph, mut player, mut events) = setup();
        let mut hide = HideController::new(vec![HideSpot::new(NodeId(0))]);

        player.request_move(&graph, NodeId(1)).unwrap();

        assert_eq!(hide.toggle(&mut player, &mut events), None);
    }
}
