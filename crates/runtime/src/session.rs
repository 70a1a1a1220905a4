//! Session orchestrator: owns one encounter and advances it tick by tick.

use game_core::{
    Adversary, EventChannel, Frame, GameConfig, GameEvent, GimmickController, GimmickNode,
    HideController, NodeGraph, PatrolPath, Player, Scene, SeededRandom, SkillCheckJudge,
    SubscriberId, Topics,
};

use crate::api::{FrameInput, Outcome, Result, SessionSummary, Tally, TickReport};
use crate::clock::FixedStep;

/// A running encounter.
///
/// Every component shares the session's [`EventChannel`]; events published
/// during a tick are consumed within that same tick.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    graph: NodeGraph,
    patrol: Option<PatrolPath>,
    events: EventChannel,
    adversary: Adversary,
    player: Player,
    hide: HideController,
    gimmicks: GimmickController,
    rng: SeededRandom,
    clock: FixedStep,
    flow: SubscriberId,
    outcome: Option<Outcome>,
    tally: Tally,
    ticks: u64,
    elapsed: f32,
}

impl Session {
    pub fn builder(scene: Scene) -> SessionBuilder {
        SessionBuilder::new(scene)
    }

    /// Runs one simulation tick of `dt` seconds.
    ///
    /// Order: player commands, player mover and behavior, hide and gimmick
    /// controllers, injected events, adversary, outcome.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &FrameInput,
        judge: &mut dyn SkillCheckJudge,
    ) -> TickReport {
        let dt = dt.max(0.0);
        self.ticks += 1;
        self.elapsed += dt;
        let mut report = TickReport::new(self.ticks, self.elapsed);

        if input.cancel_move && self.player.cancel_move() {
            tracing::debug!(target: "runtime::session", "Move cancelled");
        }
        if let Some(target) = input.move_to
            && let Err(rejection) = self.player.request_move(&self.graph, target)
        {
            tracing::debug!(
                target: "runtime::session",
                node = %target,
                reason = %rejection,
                "Move rejected"
            );
            report.move_rejected = Some(rejection);
        }
        report.mover = self.player.update(&self.graph, dt);

        if input.toggle_hide && !self.gimmicks.in_session() {
            report.hide = self.hide.toggle(&mut self.player, &mut self.events);
        }
        if input.interact {
            report.gimmick.extend(self.gimmicks.interact(
                &self.graph,
                &mut self.player,
                &self.adversary,
                &mut self.events,
                &mut self.rng,
                judge,
            ));
        }
        report.gimmick.extend(self.gimmicks.update(
            dt,
            &mut self.graph,
            &mut self.player,
            &mut self.events,
            &mut self.rng,
            judge,
        ));

        if let Some(duration) = input.disable {
            self.events.publish(GameEvent::DisableRequested { duration });
        }
        for noise in &input.noises {
            self.events.publish(GameEvent::Noise {
                position: noise.position,
                intensity: noise.intensity,
            });
        }

        let mut frame = Frame {
            dt,
            graph: &self.graph,
            patrol: self.patrol.as_ref(),
            player: Some(self.player.view()),
            events: &mut self.events,
            rng: &mut self.rng,
        };
        self.adversary.update(&mut frame);

        report.events = self.events.drain(self.flow);
        for event in &report.events {
            self.tally.record(event);
            if let GameEvent::AttackResolved { position } = *event
                && self.outcome.is_none()
            {
                let outcome = Outcome::Caught {
                    tick: self.ticks,
                    time: self.elapsed,
                    position,
                };
                tracing::info!(
                    target: "runtime::session",
                    tick = self.ticks,
                    time = self.elapsed,
                    "Player caught"
                );
                self.outcome = Some(outcome);
                report.outcome = Some(outcome);
            }
        }

        report.adversary_mode = self.adversary.mode();
        report.adversary_node = self.adversary.current_node();
        report.threat = self.adversary.threat().value();
        report
    }

    /// Feeds a variable frame time through the fixed-step clock.
    ///
    /// `input` is applied on the first tick of the frame only; the remaining
    /// ticks run idle. Returns one report per tick.
    pub fn advance(
        &mut self,
        frame_dt: f32,
        input: &FrameInput,
        judge: &mut dyn SkillCheckJudge,
    ) -> Vec<TickReport> {
        let ticks = self.clock.advance(frame_dt);
        let step = self.clock.step();
        let idle = FrameInput::idle();
        let mut reports = Vec::with_capacity(ticks as usize);
        for i in 0..ticks {
            let input = if i == 0 { input } else { &idle };
            reports.push(self.tick(step, input, judge));
        }
        reports
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.rng.seed(),
            ticks: self.ticks,
            elapsed: self.elapsed,
            outcome: self.outcome,
            tally: self.tally,
            gimmicks_total: self.gimmicks.gimmicks().len(),
            adversary_mode: self.adversary.mode(),
            adversary_node: self.adversary.current_node(),
            adversary_position: self.adversary.position(),
            threat: self.adversary.threat().value(),
            player_node: self.player.current_node(),
            events_published: self.events.published(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    pub fn patrol(&self) -> Option<&PatrolPath> {
        self.patrol.as_ref()
    }

    pub fn adversary(&self) -> &Adversary {
        &self.adversary
    }

    /// Direct access for tooling and scripted scenarios.
    pub fn adversary_mut(&mut self) -> &mut Adversary {
        &mut self.adversary
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn hide(&self) -> &HideController {
        &self.hide
    }

    pub fn gimmicks(&self) -> &GimmickController {
        &self.gimmicks
    }

    pub fn events(&self) -> &EventChannel {
        &self.events
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn clock(&self) -> &FixedStep {
        &self.clock
    }
}

/// Builder for [`Session`].
#[derive(Debug)]
pub struct SessionBuilder {
    scene: Scene,
    config: GameConfig,
    seed: u64,
    clock: FixedStep,
}

impl SessionBuilder {
    fn new(scene: Scene) -> Self {
        Self {
            scene,
            config: GameConfig::default(),
            seed: 0,
            clock: FixedStep::default(),
        }
    }

    /// Override tuning (defaults to [`GameConfig::default`]).
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for every stochastic branch in the session.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Step used by [`Session::advance`].
    pub fn step(mut self, step: f32) -> Result<Self> {
        self.clock = FixedStep::new(step)?;
        Ok(self)
    }

    /// Validates the scene and tuning, then wires every component onto a
    /// fresh event channel.
    pub fn build(self) -> Result<Session> {
        let Self {
            scene,
            config,
            seed,
            clock,
        } = self;
        config.validate()?;
        scene.validate()?;

        let Scene {
            graph,
            patrol,
            hide_spots,
            gimmicks,
            player_start,
            adversary_spawn,
            respawn_anchor,
        } = scene;

        if let Some(path) = &patrol
            && !path.is_valid()
        {
            tracing::warn!(
                target: "runtime::session",
                waypoints = path.len(),
                "Patrol path too short to follow; adversary will pursue"
            );
        }

        let mut events = EventChannel::new();
        let mut adversary = Adversary::from_config(&config);
        if let Some(anchor) = respawn_anchor {
            adversary = adversary.with_respawn_anchor(anchor);
        }
        adversary.attach(&mut events);
        adversary.spawn(&graph, patrol.as_ref(), adversary_spawn);

        let mut player = Player::new(config.player.clone());
        player.place_at(&graph, player_start);

        let gimmicks = gimmicks
            .into_iter()
            .map(|placement| {
                GimmickNode::new(placement.node, config.gimmick.clone())
                    .with_unlocks(placement.unlocks)
            })
            .collect();
        let gimmicks = GimmickController::new(config.skill_check.clone(), gimmicks);
        let hide = HideController::new(hide_spots);
        let flow = events.subscribe("session", Topics::all());

        tracing::info!(
            target: "runtime::session",
            nodes = graph.len(),
            patrol = patrol.as_ref().map_or(0, PatrolPath::len),
            gimmicks = gimmicks.gimmicks().len(),
            seed,
            "Session started"
        );

        Ok(Session {
            config,
            graph,
            patrol,
            events,
            adversary,
            player,
            hide,
            gimmicks,
            rng: SeededRandom::new(seed),
            clock,
            flow,
            outcome: None,
            tally: Tally::default(),
            ticks: 0,
            elapsed: 0.0,
        })
    }
}
