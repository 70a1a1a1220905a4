use glam::Vec3;

use crate::graph::NodeId;

bitflags::bitflags! {
    /// Topic mask a subscriber listens on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Topics: u16 {
        const SKILL_CHECK_FAILED = 1 << 0;
        const NOISE = 1 << 1;
        const DISABLE_REQUESTED = 1 << 2;
        const RESPAWNED = 1 << 3;
        const HIDE_ENTERED = 1 << 4;
        const HIDE_EXITED = 1 << 5;
        const GIMMICK_COMPLETED = 1 << 6;
        const ATTACK_RESOLVED = 1 << 7;

        /// Both hide transitions.
        const HIDING = Self::HIDE_ENTERED.bits() | Self::HIDE_EXITED.bits();
    }
}

/// Domain signals exchanged between the encounter's components.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A skill check on a gimmick node was failed.
    SkillCheckFailed { node: NodeId },
    /// Something audible happened; `intensity` is expected in [0, 1].
    Noise { position: Vec3, intensity: f32 },
    /// Asks the adversary to go dormant. A non-positive duration selects the default.
    DisableRequested { duration: f32 },
    /// The adversary came back after being disabled.
    Respawned,
    HideEntered,
    HideExited,
    GimmickCompleted { node: NodeId },
    /// The adversary landed an attack at `position`.
    AttackResolved { position: Vec3 },
}

impl GameEvent {
    pub fn topic(&self) -> Topics {
        match self {
            GameEvent::SkillCheckFailed { .. } => Topics::SKILL_CHECK_FAILED,
            GameEvent::Noise { .. } => Topics::NOISE,
            GameEvent::DisableRequested { .. } => Topics::DISABLE_REQUESTED,
            GameEvent::Respawned => Topics::RESPAWNED,
            GameEvent::HideEntered => Topics::HIDE_ENTERED,
            GameEvent::HideExited => Topics::HIDE_EXITED,
            GameEvent::GimmickCompleted { .. } => Topics::GIMMICK_COMPLETED,
            GameEvent::AttackResolved { .. } => Topics::ATTACK_RESOLVED,
        }
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::SkillCheckFailed { .. } => "skill_check_failed",
            GameEvent::Noise { .. } => "noise",
            GameEvent::DisableRequested { .. } => "disable_requested",
            GameEvent::Respawned => "respawned",
            GameEvent::HideEntered => "hide_entered",
            GameEvent::HideExited => "hide_exited",
            GameEvent::GimmickCompleted { .. } => "gimmick_completed",
            GameEvent::AttackResolved { .. } => "attack_resolved",
        }
    }
}
