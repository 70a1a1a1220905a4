//! The state container.

use crate::{State, StateMachineError};

/// Holds a single current state and applies transitions.
///
/// # Semantics
///
/// - Switching to the state that is already current is a no-op (no hooks run)
/// - Otherwise `exit` runs on the old state (if any), then `enter` on the new one
/// - A transition requested from `tick` is applied once the tick has returned
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    current: Option<S>,
    transitions: u64,
}

impl<S: Copy + Eq> StateMachine<S> {
    /// Creates a machine with no current state.
    pub const fn new() -> Self {
        Self {
            current: None,
            transitions: 0,
        }
    }

    /// Returns the current state, if one has been set.
    #[inline]
    pub fn current(&self) -> Option<S> {
        self.current
    }

    /// Returns true if `state` is the current state.
    #[inline]
    pub fn is_in(&self, state: S) -> bool {
        self.current == Some(state)
    }

    /// Number of transitions applied since construction.
    #[inline]
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Switches to `next`.
    ///
    /// Returns `true` if a transition happened, `false` if `next` was already current.
    pub fn set<C>(&mut self, next: S, ctx: &mut C) -> bool
    where
        S: State<C>,
    {
        if self.current == Some(next) {
            return false;
        }

        if let Some(previous) = self.current {
            previous.exit(ctx);
        }
        self.current = Some(next);
        self.transitions += 1;
        next.enter(ctx);
        true
    }

    /// Switches to `next`, failing if no state was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`StateMachineError::MissingState`] when `next` is `None`.
    /// The current state is left untouched in that case.
    pub fn try_set<C>(&mut self, next: Option<S>, ctx: &mut C) -> Result<bool, StateMachineError>
    where
        S: State<C>,
    {
        let next = next.ok_or(StateMachineError::MissingState)?;
        Ok(self.set(next, ctx))
    }

    /// Ticks the current state and applies any transition it requests.
    ///
    /// Returns the newly entered state when a transition happened.
    pub fn tick<C>(&mut self, ctx: &mut C) -> Option<S>
    where
        S: State<C>,
    {
        let current = self.current?;
        let next = current.tick(ctx)?;
        self.set(next, ctx).then_some(next)
    }
}

impl<S: Copy + Eq> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}
