//! Per-tick commands handed to a [`Session`](crate::Session).

use glam::Vec3;

use game_core::NodeId;

/// Something audible injected from outside the core (footsteps, a dropped prop).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseInput {
    pub position: Vec3,
    pub intensity: f32,
}

/// Everything the outside world asks of the encounter during one tick.
///
/// The default value is an idle frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Node the player wants to walk to.
    pub move_to: Option<NodeId>,
    /// Abort a move that is still in its start-up delay.
    pub cancel_move: bool,
    pub toggle_hide: bool,
    /// Start or cancel a gimmick session.
    pub interact: bool,
    /// Publishes `DisableRequested` with this duration.
    pub disable: Option<f32>,
    pub noises: Vec<NoiseInput>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_move(mut self, target: NodeId) -> Self {
        self.move_to = Some(target);
        self
    }

    pub fn with_cancel(mut self) -> Self {
        self.cancel_move = true;
        self
    }

    pub fn with_hide_toggle(mut self) -> Self {
        self.toggle_hide = true;
        self
    }

    pub fn with_interact(mut self) -> Self {
        self.interact = true;
        self
    }

    /// A non-positive duration selects the adversary's default.
    pub fn with_disable(mut self, duration: f32) -> Self {
        self.disable = Some(duration);
        self
    }

    pub fn with_noise(mut self, position: Vec3, intensity: f32) -> Self {
        self.noises.push(NoiseInput {
            position,
            intensity,
        });
        self
    }

    pub fn is_idle(&self) -> bool {
        self == &Self::default()
    }
}
