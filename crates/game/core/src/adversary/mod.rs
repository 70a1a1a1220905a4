//! The adversary decision engine.
//!
//! One [`Adversary`] per session. Each frame [`Adversary::update`] pumps the
//! threat meter, handles disable requests and ticks the behavior machine:
//!
//! - **Approaching**: think-ticks at a threat-scaled interval pick the next
//!   graph node; movement toward the active target runs every frame.
//! - **Attacking**: entered from a think-tick when the player is within reach
//!   and threat is maxed. Publishes [`GameEvent::AttackResolved`], resets
//!   threat and returns to Approaching in the same update.
//! - **Disabled**: hidden for a duration, then respawned onto the graph.
//!
//! The discrete graph position (`current_node`) only changes on arrival, so it
//! lags the continuous world position while a move is in flight.

mod mode;
mod pursuit;

pub use mode::AdversaryMode;
pub use pursuit::{
    Branch, Decision, RANDOM_PICK_ATTEMPTS, best_waypoint_ahead, choose_next_node, pursuit_step,
};

use glam::Vec3;
use state_machine::StateMachine;

use crate::config::{AdversaryConfig, GameConfig, ThreatConfig};
use crate::events::{EventChannel, GameEvent, SubscriberId, Topics};
use crate::graph::{NodeGraph, NodeId};
use crate::math::move_towards;
use crate::patrol::{PatrolCursor, PatrolPath};
use crate::rng::RandomSource;
use crate::threat::ThreatMeter;

/// Read-only view of the player handed to the engine each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerView {
    /// Graph node the player is bound to, if any.
    pub node: Option<NodeId>,
    pub position: Vec3,
}

/// Everything the adversary reads or writes outside itself during one update.
pub struct Frame<'a> {
    pub dt: f32,
    pub graph: &'a NodeGraph,
    pub patrol: Option<&'a PatrolPath>,
    pub player: Option<PlayerView>,
    pub events: &'a mut EventChannel,
    pub rng: &'a mut dyn RandomSource,
}

#[derive(Clone, Debug)]
struct AdversaryBody {
    config: AdversaryConfig,
    threat: ThreatMeter,
    cursor: PatrolCursor,
    current_node: Option<NodeId>,
    position: Vec3,
    visible: bool,
    move_target: Option<NodeId>,
    think_elapsed: f32,
    disable_remaining: f32,
    respawn_anchor: Option<Vec3>,
    last_decision: Option<Decision>,
    attacks: u32,
    respawns: u32,
}

/// Context the behavior modes operate on.
pub struct AdversaryCtx<'f, 'a> {
    body: &'f mut AdversaryBody,
    frame: &'f mut Frame<'a>,
}

/// The single antagonist of a session.
#[derive(Clone, Debug)]
pub struct Adversary {
    fsm: StateMachine<AdversaryMode>,
    body: AdversaryBody,
    subscription: Option<SubscriberId>,
}

impl Adversary {
    pub fn new(config: AdversaryConfig, threat: ThreatConfig) -> Self {
        let mut body = AdversaryBody {
            config,
            threat: ThreatMeter::new(threat),
            cursor: PatrolCursor::default(),
            current_node: None,
            position: Vec3::ZERO,
            visible: true,
            move_target: None,
            think_elapsed: 0.0,
            disable_remaining: 0.0,
            respawn_anchor: None,
            last_decision: None,
            attacks: 0,
            respawns: 0,
        };
        body.prime_think();
        Self {
            fsm: StateMachine::new(),
            body,
            subscription: None,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.adversary.clone(), config.threat.clone())
    }

    /// Sets where the adversary reappears after being disabled.
    pub fn with_respawn_anchor(mut self, anchor: Vec3) -> Self {
        self.body.respawn_anchor = Some(anchor);
        self
    }

    /// Subscribes the threat meter and the disable handler to `events`.
    pub fn attach(&mut self, events: &mut EventChannel) {
        self.body.threat.attach(events);
        if self.subscription.is_none() {
            self.subscription = Some(events.subscribe("adversary", Topics::DISABLE_REQUESTED));
        }
    }

    /// Places the adversary at `position` and binds it to the nearest node.
    ///
    /// The world position snaps onto the bound node and the patrol cursor is
    /// re-aligned. On an empty graph the adversary keeps `position` unbound.
    pub fn spawn(&mut self, graph: &NodeGraph, patrol: Option<&PatrolPath>, position: Vec3) {
        self.body.position = position;
        self.body.move_target = None;
        self.body.bind_nearest(graph, patrol);
    }

    /// Advances the adversary by one frame.
    pub fn update(&mut self, frame: &mut Frame<'_>) {
        self.body.threat.pump(frame.events);
        self.body.threat.tick(frame.dt);

        let requests = match self.subscription {
            Some(id) => frame.events.drain(id),
            None => Vec::new(),
        };

        let mut ctx = AdversaryCtx {
            body: &mut self.body,
            frame,
        };
        if self.fsm.current().is_none() {
            self.fsm.set(AdversaryMode::Approaching, &mut ctx);
        }

        for event in requests {
            if let GameEvent::DisableRequested { duration } = event {
                if self.fsm.is_in(AdversaryMode::Disabled) {
                    tracing::debug!(
                        target: "game_core::adversary",
                        duration,
                        "Disable request ignored while disabled"
                    );
                    continue;
                }
                ctx.body.disable_remaining = if duration > 0.0 {
                    duration
                } else {
                    ctx.body.config.default_disable_duration
                };
                self.fsm.set(AdversaryMode::Disabled, &mut ctx);
            }
        }

        if self.fsm.tick(&mut ctx) == Some(AdversaryMode::Attacking) {
            self.fsm.tick(&mut ctx);
        }
    }

    /// Whether an attack on `target` would land right now.
    ///
    /// True when the adversary is on the field, `target` is within attack
    /// distance of its world position and threat is maxed.
    pub fn can_attack_now(&self, target: Vec3) -> bool {
        self.body.can_attack(target)
    }

    pub fn mode(&self) -> AdversaryMode {
        self.fsm.current().unwrap_or_default()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.body.current_node
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn is_visible(&self) -> bool {
        self.body.visible
    }

    /// Node the adversary is currently moving toward.
    pub fn move_target(&self) -> Option<NodeId> {
        self.body.move_target
    }

    pub fn patrol_cursor(&self) -> PatrolCursor {
        self.body.cursor
    }

    pub fn threat(&self) -> &ThreatMeter {
        &self.body.threat
    }

    /// Adds aggro to the threat meter, clamped to its range.
    pub fn add_aggro(&mut self, amount: f32) {
        self.body.threat.add_aggro(amount);
    }

    /// Drops threat back to zero.
    pub fn reset_threat(&mut self) {
        self.body.threat.reset();
    }

    pub fn config(&self) -> &AdversaryConfig {
        &self.body.config
    }

    /// Seconds left before respawn; zero unless disabled.
    pub fn disable_remaining(&self) -> f32 {
        if self.fsm.is_in(AdversaryMode::Disabled) {
            self.body.disable_remaining.max(0.0)
        } else {
            0.0
        }
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.body.last_decision
    }

    pub fn attacks(&self) -> u32 {
        self.body.attacks
    }

    pub fn respawns(&self) -> u32 {
        self.body.respawns
    }

    /// Number of mode transitions so far.
    pub fn transitions(&self) -> u64 {
        self.fsm.transitions()
    }
}

impl AdversaryBody {
    /// Lets the first think-tick after a (re)spawn happen on the next update.
    fn prime_think(&mut self) {
        let interval = self.config.think_interval;
        self.think_elapsed = interval.calm.max(interval.frantic);
    }

    fn can_attack(&self, target: Vec3) -> bool {
        self.visible
            && self.position.distance(target) <= self.config.attack_distance
            && self.threat.is_maxed()
    }

    fn bind_nearest(&mut self, graph: &NodeGraph, patrol: Option<&PatrolPath>) {
        let Some(node) = graph.nearest_node(self.position) else {
            tracing::debug!(
                target: "game_core::adversary",
                "No node to bind to"
            );
            return;
        };
        self.current_node = Some(node);
        if let Some(position) = graph.position(node) {
            self.position = position;
        }
        if let Some(path) = patrol.filter(|p| p.is_valid())
            && let Some(cursor) = PatrolCursor::aligned_to(path, graph, node)
        {
            self.cursor = cursor;
        }
        tracing::debug!(
            target: "game_core::adversary",
            node = %node,
            patrol_index = self.cursor.index(),
            "Bound to nearest node"
        );
    }
}

impl AdversaryCtx<'_, '_> {
    /// Approaching tick: think when due, then move.
    fn approach(&mut self) -> Option<AdversaryMode> {
        let threat01 = self.body.threat.normalized();
        let interval = self.body.config.think_interval.at(threat01);

        self.body.think_elapsed += self.frame.dt;
        if self.body.think_elapsed >= interval {
            self.body.think_elapsed = (self.body.think_elapsed - interval).min(interval);
            if self.think(threat01) {
                return Some(AdversaryMode::Attacking);
            }
        }

        self.advance_move(threat01);
        None
    }

    /// One think-tick. Returns true when an attack should be resolved.
    fn think(&mut self, threat01: f32) -> bool {
        let body = &mut *self.body;
        let frame = &mut *self.frame;

        let (Some(player), Some(from)) = (frame.player, body.current_node) else {
            tracing::trace!(target: "game_core::adversary", "No player or node; idle think");
            return false;
        };
        if body.can_attack(player.position) {
            return true;
        }
        let Some(player_node) = player.node else {
            tracing::trace!(target: "game_core::adversary", "Player unbound; idle think");
            return false;
        };

        let patrol = frame.patrol.map(|path| (path, &body.cursor));
        let decision = choose_next_node(
            frame.graph,
            from,
            player_node,
            patrol,
            threat01,
            &body.config,
            &mut *frame.rng,
        );
        let branch: &'static str = decision.branch.into();
        tracing::debug!(
            target: "game_core::adversary",
            from = %decision.from,
            next = %decision.next,
            branch,
            threat = body.threat.value(),
            "Think"
        );
        body.last_decision = Some(decision);

        if decision.moves() && body.move_target != Some(decision.next) {
            body.move_target = Some(decision.next);
        }
        false
    }

    /// Straight-line movement toward the active target.
    fn advance_move(&mut self, threat01: f32) {
        let body = &mut *self.body;
        let frame = &*self.frame;

        let Some(target) = body.move_target else {
            return;
        };
        let Some(destination) = frame.graph.position(target) else {
            body.move_target = None;
            return;
        };

        let speed = body.config.move_speed.at(threat01);
        body.position = move_towards(body.position, destination, speed * frame.dt);
        tracing::trace!(
            target: "game_core::adversary",
            node = %target,
            x = body.position.x,
            y = body.position.y,
            z = body.position.z,
            "Moving"
        );

        if body.position.distance(destination) <= body.config.arrive_distance {
            body.position = destination;
            body.current_node = Some(target);
            body.move_target = None;
            if let Some(path) = frame.patrol {
                body.cursor
                    .advance_on_arrival(path, target, body.config.look_ahead);
            }
            tracing::debug!(
                target: "game_core::adversary",
                node = %target,
                "Arrived"
            );
        }
    }

    /// Puts the adversary back on the field after a disable.
    fn respawn(&mut self) {
        let body = &mut *self.body;
        let frame = &mut *self.frame;

        if let Some(anchor) = body.respawn_anchor {
            body.position = anchor;
        }
        body.move_target = None;
        body.bind_nearest(frame.graph, frame.patrol);
        body.threat.reset();
        body.visible = true;
        body.disable_remaining = 0.0;
        body.prime_think();
        body.respawns += 1;

        tracing::info!(
            target: "game_core::adversary",
            node = ?body.current_node,
            "Respawned"
        );
        frame.events.publish(GameEvent::Respawned);
    }
}
