//! What a session tick produced, and the end-of-run summary.

use glam::Vec3;
use serde::Serialize;

use game_core::{
    AdversaryMode, GameEvent, GimmickEvent, HideChange, MoveRejection, MoverEvent, NodeId,
};

/// How the encounter ended for the player, as far as the core can tell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The adversary resolved an attack on the player.
    Caught { tick: u64, time: f32, position: Vec3 },
}

/// Observable effects of a single [`Session::tick`](crate::Session::tick).
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    /// Session time after this tick, in seconds.
    pub time: f32,
    pub mover: Option<MoverEvent>,
    pub move_rejected: Option<MoveRejection>,
    pub hide: Option<HideChange>,
    pub gimmick: Vec<GimmickEvent>,
    /// Every event published on the channel during this tick, in order.
    pub events: Vec<GameEvent>,
    pub adversary_mode: AdversaryMode,
    pub adversary_node: Option<NodeId>,
    pub threat: f32,
    /// Set on the tick where the outcome was first recorded.
    pub outcome: Option<Outcome>,
}

impl TickReport {
    pub(crate) fn new(tick: u64, time: f32) -> Self {
        Self {
            tick,
            time,
            mover: None,
            move_rejected: None,
            hide: None,
            gimmick: Vec::new(),
            events: Vec::new(),
            adversary_mode: AdversaryMode::default(),
            adversary_node: None,
            threat: 0.0,
            outcome: None,
        }
    }

    pub fn saw(&self, kind: &str) -> bool {
        self.events.iter().any(|e| e.kind() == kind)
    }
}

/// Running totals kept by a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub attacks: u32,
    pub respawns: u32,
    pub disables: u32,
    pub noises: u32,
    pub skill_checks_failed: u32,
    pub gimmicks_completed: u32,
    pub hide_entries: u32,
}

impl Tally {
    pub(crate) fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::AttackResolved { .. } => self.attacks += 1,
            GameEvent::Respawned => self.respawns += 1,
            GameEvent::DisableRequested { .. } => self.disables += 1,
            GameEvent::Noise { .. } => self.noises += 1,
            GameEvent::SkillCheckFailed { .. } => self.skill_checks_failed += 1,
            GameEvent::GimmickCompleted { .. } => self.gimmicks_completed += 1,
            GameEvent::HideEntered => self.hide_entries += 1,
            GameEvent::HideExited => {}
        }
    }
}

/// Snapshot of a session, suitable for printing or JSON export.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub ticks: u64,
    pub elapsed: f32,
    pub outcome: Option<Outcome>,
    pub tally: Tally,
    pub gimmicks_total: usize,
    pub adversary_mode: AdversaryMode,
    pub adversary_node: Option<NodeId>,
    pub adversary_position: Vec3,
    pub threat: f32,
    pub player_node: Option<NodeId>,
    pub events_published: u64,
}
