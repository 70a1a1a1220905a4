//! Errors surfaced by the state machine.

/// Programming errors raised by [`StateMachine`](crate::StateMachine).
///
/// These are never expected in a correct program and are not meant to be
/// retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateMachineError {
    /// A transition was requested without a target state.
    #[error("cannot transition to an absent state")]
    MissingState,
}
