//! Behavior modes of the adversary and their transition hooks.

use state_machine::State;

use super::AdversaryCtx;
use crate::events::GameEvent;

/// Mutually exclusive behavior of the adversary.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdversaryMode {
    /// Thinking, choosing nodes and moving.
    #[default]
    Approaching,
    /// Resolving an attack. Left again within the same update.
    Attacking,
    /// Removed from the field until the disable timer runs out.
    Disabled,
}

impl<'f, 'a> State<AdversaryCtx<'f, 'a>> for AdversaryMode {
    fn enter(self, ctx: &mut AdversaryCtx<'f, 'a>) {
        match self {
            AdversaryMode::Approaching => {}
            AdversaryMode::Attacking => {
                let body = &mut *ctx.body;
                body.attacks += 1;
                tracing::info!(
                    target: "game_core::adversary",
                    node = ?body.current_node,
                    threat = body.threat.value(),
                    "Attack resolved"
                );
                ctx.frame.events.publish(GameEvent::AttackResolved {
                    position: body.position,
                });
                body.threat.reset();
            }
            AdversaryMode::Disabled => {
                let body = &mut *ctx.body;
                body.visible = false;
                body.move_target = None;
                tracing::info!(
                    target: "game_core::adversary",
                    duration = body.disable_remaining,
                    "Disabled"
                );
            }
        }
    }

    fn tick(self, ctx: &mut AdversaryCtx<'f, 'a>) -> Option<Self> {
        match self {
            AdversaryMode::Approaching => ctx.approach(),
            AdversaryMode::Attacking => Some(AdversaryMode::Approaching),
            AdversaryMode::Disabled => {
                let body = &mut *ctx.body;
                body.disable_remaining -= ctx.frame.dt;
                (body.disable_remaining <= 0.0).then_some(AdversaryMode::Approaching)
            }
        }
    }

    fn exit(self, ctx: &mut AdversaryCtx<'f, 'a>) {
        if self == AdversaryMode::Disabled {
            ctx.respawn();
        }
    }
}
