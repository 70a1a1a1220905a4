use state_machine::State;

use super::mover::PlayerMover;

/// High-level behavior of the player.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerMode {
    #[default]
    Idle,
    Moving,
    /// Inside a hide spot; movement input is locked.
    Hiding,
    /// Working on a gimmick; movement input is locked.
    Gimmick,
}

impl State<PlayerMover> for PlayerMode {
    fn enter(self, mover: &mut PlayerMover) {
        match self {
            PlayerMode::Idle => mover.set_input_enabled(true),
            PlayerMode::Hiding | PlayerMode::Gimmick => mover.set_input_enabled(false),
            PlayerMode::Moving => {}
        }
    }

    fn tick(self, mover: &mut PlayerMover) -> Option<Self> {
        match self {
            PlayerMode::Idle if mover.is_busy() => Some(PlayerMode::Moving),
            PlayerMode::Moving if !mover.is_busy() => Some(PlayerMode::Idle),
            _ => None,
        }
    }

    fn exit(self, mover: &mut PlayerMover) {
        if matches!(self, PlayerMode::Hiding | PlayerMode::Gimmick) {
            mover.set_input_enabled(true);
        }
    }
}
