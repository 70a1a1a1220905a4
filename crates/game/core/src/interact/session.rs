//! Gimmick sessions: charging a gimmick while answering skill checks.
//!
//! The check itself (needle, timing window, input) belongs to an external
//! collaborator behind [`SkillCheckJudge`]. The controller only schedules
//! checks, hands over the zone width, and applies the verdict.

use std::collections::VecDeque;

use crate::adversary::Adversary;
use crate::config::SkillCheckConfig;
use crate::events::{EventChannel, GameEvent};
use crate::graph::{NodeGraph, NodeId};
use crate::player::{Player, PlayerMode};
use crate::rng::RandomSource;

use super::gimmick::GimmickNode;

/// Parameters of one skill check.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillCheckRequest {
    pub node: NodeId,
    /// Width of the success zone, shrinking as progress grows.
    pub zone_width: f32,
    pub progress01: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillVerdict {
    Pending,
    Success,
    Failure,
}

/// Runs skill checks on behalf of the controller.
pub trait SkillCheckJudge {
    /// A new check opens.
    fn begin(&mut self, request: &SkillCheckRequest);

    /// Polled once per frame while the check is open.
    fn poll(&mut self, dt: f32) -> SkillVerdict;

    /// The session ended while the check was still open.
    fn cancel(&mut self) {}
}

/// Answers checks from a fixed list after a fixed reaction time.
///
/// Once the list runs out every check succeeds.
#[derive(Clone, Debug, Default)]
pub struct ScriptedJudge {
    verdicts: VecDeque<bool>,
    latency: f32,
    waited: f32,
    requests: Vec<SkillCheckRequest>,
}

impl ScriptedJudge {
    pub fn new(verdicts: impl IntoIterator<Item = bool>, latency: f32) -> Self {
        Self {
            verdicts: verdicts.into_iter().collect(),
            latency,
            waited: 0.0,
            requests: Vec::new(),
        }
    }

    /// Every check opened so far.
    pub fn requests(&self) -> &[SkillCheckRequest] {
        &self.requests
    }
}

impl SkillCheckJudge for ScriptedJudge {
    fn begin(&mut self, request: &SkillCheckRequest) {
        self.waited = 0.0;
        self.requests.push(*request);
    }

    fn poll(&mut self, dt: f32) -> SkillVerdict {
        self.waited += dt;
        if self.waited < self.latency {
            return SkillVerdict::Pending;
        }
        match self.verdicts.pop_front() {
            Some(false) => SkillVerdict::Failure,
            _ => SkillVerdict::Success,
        }
    }
}

/// Succeeds with a fixed probability after a fixed reaction time.
#[derive(Clone, Debug)]
pub struct ChanceJudge<R> {
    success_chance: f32,
    latency: f32,
    waited: f32,
    rng: R,
}

impl<R: RandomSource> ChanceJudge<R> {
    pub fn new(success_chance: f32, latency: f32, rng: R) -> Self {
        Self {
            success_chance,
            latency,
            waited: 0.0,
            rng,
        }
    }
}

impl<R: RandomSource> SkillCheckJudge for ChanceJudge<R> {
    fn begin(&mut self, _request: &SkillCheckRequest) {
        self.waited = 0.0;
    }

    fn poll(&mut self, dt: f32) -> SkillVerdict {
        self.waited += dt;
        if self.waited < self.latency {
            SkillVerdict::Pending
        } else if self.rng.next_f32() < self.success_chance {
            SkillVerdict::Success
        } else {
            SkillVerdict::Failure
        }
    }
}

/// What the controller did this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GimmickEvent {
    Started { node: NodeId },
    Cancelled { node: NodeId },
    CheckStarted(SkillCheckRequest),
    CheckPassed { node: NodeId },
    CheckFailed { node: NodeId },
    Completed { node: NodeId },
}

#[derive(Clone, Copy, Debug)]
struct ActiveSession {
    index: usize,
    rate: f32,
    next_check_in: f32,
    /// Interval to schedule once the open check resolves.
    open_check: Option<f32>,
}

/// Starts, runs and ends gimmick sessions for the player.
#[derive(Clone, Debug, Default)]
pub struct GimmickController {
    config: SkillCheckConfig,
    gimmicks: Vec<GimmickNode>,
    session: Option<ActiveSession>,
    cooldown: f32,
}

impl GimmickController {
    pub fn new(config: SkillCheckConfig, gimmicks: Vec<GimmickNode>) -> Self {
        Self {
            config,
            gimmicks,
            session: None,
            cooldown: 0.0,
        }
    }

    pub fn gimmicks(&self) -> &[GimmickNode] {
        &self.gimmicks
    }

    pub fn gimmick_at(&self, node: NodeId) -> Option<&GimmickNode> {
        self.gimmicks.iter().find(|g| g.node() == node)
    }

    pub fn in_session(&self) -> bool {
        self.session.is_some()
    }

    /// Node of the gimmick being worked on.
    pub fn session_node(&self) -> Option<NodeId> {
        let session = self.session?;
        self.gimmicks.get(session.index).map(GimmickNode::node)
    }

    /// Progress per second of the running session.
    pub fn session_rate(&self) -> Option<f32> {
        self.session.map(|s| s.rate)
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown
    }

    pub fn completed(&self) -> usize {
        self.gimmicks.iter().filter(|g| g.is_completed()).count()
    }

    /// The interact input: starts a session, or cancels the running one.
    ///
    /// Ignored while the player is moving or hiding. A start is refused while
    /// on cooldown, off an active incomplete gimmick, or when `adversary`
    /// could strike the player right now.
    pub fn interact(
        &mut self,
        graph: &NodeGraph,
        player: &mut Player,
        adversary: &Adversary,
        events: &mut EventChannel,
        rng: &mut dyn RandomSource,
        judge: &mut dyn SkillCheckJudge,
    ) -> Option<GimmickEvent> {
        if player.is_busy() || player.mode() == PlayerMode::Hiding {
            return None;
        }
        if self.session.is_some() {
            return self.cancel(player, events, judge);
        }

        if self.cooldown > 0.0 {
            return None;
        }
        let node = player.current_node()?;
        let index = self.gimmicks.iter().position(|g| g.node() == node)?;
        if self.gimmicks[index].is_completed() || !graph.is_active(node) {
            return None;
        }
        if adversary.can_attack_now(player.position()) {
            tracing::debug!(
                target: "game_core::interact",
                node = %node,
                "Gimmick start vetoed by adversary"
            );
            return None;
        }

        let gimmick = &mut self.gimmicks[index];
        gimmick.set_running(true);
        let jitter = self.config.jitter;
        self.session = Some(ActiveSession {
            index,
            rate: gimmick.config().base_rate,
            next_check_in: self.config.interval.calm + rng.range(-jitter, jitter),
            open_check: None,
        });
        player.to_gimmick();
        tracing::debug!(target: "game_core::interact", node = %node, "Gimmick session started");
        Some(GimmickEvent::Started { node })
    }

    /// Advances cooldowns, passive decay and the running session.
    pub fn update(
        &mut self,
        dt: f32,
        graph: &mut NodeGraph,
        player: &mut Player,
        events: &mut EventChannel,
        rng: &mut dyn RandomSource,
        judge: &mut dyn SkillCheckJudge,
    ) -> Option<GimmickEvent> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        for gimmick in &mut self.gimmicks {
            gimmick.decay(dt);
        }

        let mut session = self.session?;
        let Some(gimmick) = self.gimmicks.get_mut(session.index) else {
            self.session = None;
            return None;
        };
        let node = gimmick.node();

        let event = match session.open_check {
            Some(interval) => match judge.poll(dt) {
                SkillVerdict::Pending => None,
                SkillVerdict::Success => {
                    session.rate = gimmick.config().boosted_rate;
                    session.open_check = None;
                    let jitter = self.config.jitter;
                    session.next_check_in = interval + rng.range(-jitter, jitter);
                    tracing::debug!(target: "game_core::interact", node = %node, "Skill check passed");
                    Some(GimmickEvent::CheckPassed { node })
                }
                SkillVerdict::Failure => {
                    gimmick.apply_fail_penalty();
                    self.cooldown = gimmick.config().retry_cooldown_on_fail;
                    events.publish(GameEvent::SkillCheckFailed { node });
                    events.publish(GameEvent::Noise {
                        position: player.position(),
                        intensity: self.config.fail_noise,
                    });
                    tracing::debug!(target: "game_core::interact", node = %node, "Skill check failed");
                    session.open_check = None;
                    self.session = Some(session);
                    self.end_session(player, judge);
                    return Some(GimmickEvent::CheckFailed { node });
                }
            },
            None => {
                if gimmick.add_progress(graph, session.rate * dt) {
                    events.publish(GameEvent::GimmickCompleted { node });
                    self.session = Some(session);
                    self.end_session(player, judge);
                    return Some(GimmickEvent::Completed { node });
                }
                session.next_check_in -= dt;
                if session.next_check_in <= 0.0 {
                    let progress01 = gimmick.progress01();
                    let request = SkillCheckRequest {
                        node,
                        zone_width: self.config.zone_width.at(progress01),
                        progress01,
                    };
                    session.open_check = Some(self.config.interval.at(progress01));
                    judge.begin(&request);
                    Some(GimmickEvent::CheckStarted(request))
                } else {
                    None
                }
            }
        };

        self.session = Some(session);
        event
    }

    fn cancel(
        &mut self,
        player: &mut Player,
        events: &mut EventChannel,
        judge: &mut dyn SkillCheckJudge,
    ) -> Option<GimmickEvent> {
        let session = self.session?;
        let gimmick = self.gimmicks.get_mut(session.index)?;
        let node = gimmick.node();
        gimmick.apply_cancel_penalty();
        self.cooldown = gimmick.config().retry_cooldown_on_cancel;
        events.publish(GameEvent::Noise {
            position: player.position(),
            intensity: self.config.cancel_noise,
        });
        tracing::debug!(target: "game_core::interact", node = %node, "Gimmick session cancelled");
        self.end_session(player, judge);
        Some(GimmickEvent::Cancelled { node })
    }

    fn end_session(&mut self, player: &mut Player, judge: &mut dyn SkillCheckJudge) {
        let Some(session) = self.session.take() else {
            return;
        };
        if session.open_check.is_some() {
            judge.cancel();
        }
        if let Some(gimmick) = self.gimmicks.get_mut(session.index) {
            gimmick.set_running(false);
        }
        player.to_idle();
    }
}
