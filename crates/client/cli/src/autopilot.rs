//! Scripted stand-in for a human player.
//!
//! Wanders the graph toward unsolved gimmicks, works them when standing on
//! one, and ducks into a hide spot when the adversary gets close.

use game_core::{NodeId, PlayerMode, RandomSource, SeededRandom};
use runtime::{FrameInput, Session};

/// Adversary distance that sends the player into hiding.
const DANGER_RADIUS: f32 = 4.0;
/// Adversary distance at which a hidden player comes back out.
const ALL_CLEAR_RADIUS: f32 = 7.0;

pub struct Autopilot {
    rng: SeededRandom,
    /// Seconds to linger on a node before moving on.
    patience: f32,
    lingered: f32,
}

impl Autopilot {
    pub fn new(seed: u64, patience: f32) -> Self {
        Self {
            rng: SeededRandom::new(seed),
            patience,
            lingered: 0.0,
        }
    }

    /// Chooses this frame's input from the session's current state.
    pub fn decide(&mut self, session: &Session, frame_dt: f32) -> FrameInput {
        let player = session.player();
        if player.is_busy() {
            self.lingered = 0.0;
            return FrameInput::idle();
        }
        let Some(here) = player.current_node() else {
            return FrameInput::idle();
        };

        let adversary = session.adversary();
        let danger = adversary.is_visible()
            && adversary.position().distance(player.position()) < DANGER_RADIUS;

        match player.mode() {
            PlayerMode::Hiding => {
                let clear = !adversary.is_visible()
                    || adversary.position().distance(player.position()) > ALL_CLEAR_RADIUS;
                return if clear {
                    FrameInput::idle().with_hide_toggle()
                } else {
                    FrameInput::idle()
                };
            }
            PlayerMode::Gimmick => {
                // Abandon the work when the adversary is about to strike.
                return if danger && adversary.threat().normalized() > 0.8 {
                    FrameInput::idle().with_interact()
                } else {
                    FrameInput::idle()
                };
            }
            PlayerMode::Idle | PlayerMode::Moving => {}
        }

        if danger && session.hide().spot_at(here).is_some_and(|s| s.enabled) {
            return FrameInput::idle().with_hide_toggle();
        }

        let gimmicks = session.gimmicks();
        let workable = gimmicks
            .gimmick_at(here)
            .is_some_and(|g| !g.is_completed())
            && gimmicks.cooldown_remaining() <= 0.0;
        if workable && !danger {
            return FrameInput::idle().with_interact();
        }

        self.lingered += frame_dt;
        if self.lingered < self.patience && !danger {
            return FrameInput::idle();
        }
        self.lingered = 0.0;
        match self.pick_neighbor(session, here) {
            Some(next) => FrameInput::idle().with_move(next),
            None => FrameInput::idle(),
        }
    }

    /// Prefers unsolved gimmicks, then any active neighbor away from danger.
    fn pick_neighbor(&mut self, session: &Session, here: NodeId) -> Option<NodeId> {
        let graph = session.graph();
        let candidates: Vec<NodeId> = graph
            .neighbors(here)
            .iter()
            .copied()
            .filter(|&n| n != here && graph.is_active(n))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let unsolved = candidates.iter().copied().find(|&n| {
            session
                .gimmicks()
                .gimmick_at(n)
                .is_some_and(|g| !g.is_completed())
        });
        if let Some(node) = unsolved {
            return Some(node);
        }

        let adversary = session.adversary().position();
        let safe: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|&n| {
                graph
                    .position(n)
                    .is_some_and(|p| p.distance(adversary) >= DANGER_RADIUS)
            })
            .collect();
        let pool = if safe.is_empty() { &candidates } else { &safe };
        Some(pool[self.rng.index(pool.len())])
    }
}
