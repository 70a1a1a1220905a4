//! Decision core of a stealth-horror encounter.
//!
//! `game-core` holds the node graph, patrol paths, the threat meter, the
//! event channel and the adversary decision engine, plus the player-side
//! collaborators (node mover, hiding, gimmick sessions) that feed it events.
//! Everything here is synchronous and free of I/O; time advances only through
//! the `dt` handed to each `update`.
pub mod adversary;
pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod interact;
pub mod math;
pub mod patrol;
pub mod player;
pub mod rng;
pub mod scene;
pub mod threat;

pub use adversary::{Adversary, AdversaryMode, Branch, Decision, Frame, PlayerView};
pub use config::{
    AdversaryConfig, ConfigError, Curve, GameConfig, GimmickConfig, PlayerConfig,
    SkillCheckConfig, ThreatConfig,
};
pub use error::{ErrorSeverity, GameError};
pub use events::{EventChannel, GameEvent, SubscriberId, Topics};
pub use graph::{GraphBuilder, GraphError, Node, NodeGraph, NodeId};
pub use interact::{
    ChanceJudge, GimmickController, GimmickEvent, GimmickNode, HideChange, HideController,
    HideSpot, ScriptedJudge, SkillCheckJudge, SkillCheckRequest, SkillVerdict,
};
pub use patrol::{PatrolCursor, PatrolDirection, PatrolError, PatrolPath};
pub use player::{MoveRejection, MoverEvent, MoverPhase, Player, PlayerMode, PlayerMover};
pub use rng::{RandomSource, ScriptedRandom, SeededRandom};
pub use scene::{GimmickPlacement, Scene, SceneError};
pub use state_machine::{State, StateMachine, StateMachineError};
pub use threat::ThreatMeter;
