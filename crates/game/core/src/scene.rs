//! A fully built encounter layout, ready to be handed to a session.

use glam::Vec3;

use crate::error::{ErrorSeverity, GameError};
use crate::graph::{NodeGraph, NodeId};
use crate::interact::HideSpot;
use crate::patrol::{PatrolError, PatrolPath};

/// A gimmick placed on a node, with the nodes it opens on completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GimmickPlacement {
    pub node: NodeId,
    pub unlocks: Vec<NodeId>,
}

/// Static layout of one encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub graph: NodeGraph,
    pub patrol: Option<PatrolPath>,
    pub hide_spots: Vec<HideSpot>,
    pub gimmicks: Vec<GimmickPlacement>,
    pub player_start: NodeId,
    pub adversary_spawn: Vec3,
    /// Where the adversary reappears; its last position when absent.
    pub respawn_anchor: Option<Vec3>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("scene has no nodes")]
    EmptyGraph,

    #[error("{role} references unknown node {node}")]
    UnknownNode { role: &'static str, node: NodeId },

    #[error(transparent)]
    Patrol(#[from] PatrolError),
}

impl GameError for SceneError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            SceneError::EmptyGraph => "SCENE_EMPTY_GRAPH",
            SceneError::UnknownNode { .. } => "SCENE_UNKNOWN_NODE",
            SceneError::Patrol(e) => e.error_code(),
        }
    }
}

impl Scene {
    /// Checks every node reference against the graph.
    ///
    /// A graph without nodes is rejected since the player start must name one.
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.graph.is_empty() {
            return Err(SceneError::EmptyGraph);
        }
        let known = |role: &'static str, node: NodeId| {
            if self.graph.contains(node) {
                Ok(())
            } else {
                Err(SceneError::UnknownNode { role, node })
            }
        };

        known("player start", self.player_start)?;
        for spot in &self.hide_spots {
            known("hide spot", spot.node)?;
        }
        for gimmick in &self.gimmicks {
            known("gimmick", gimmick.node)?;
            for &node in &gimmick.unlocks {
                known("gimmick unlock", node)?;
            }
        }
        if let Some(patrol) = &self.patrol {
            patrol.validate(&self.graph)?;
        }
        Ok(())
    }
}
