//! Core state trait.
//!
//! This module defines the [`State`] trait, which every state enum driven by a
//! [`StateMachine`](crate::StateMachine) implements. The trait is generic over
//! a context type `C`, giving hooks mutable access to the agent they control.

use core::fmt::Debug;

/// A behavior mode that can be entered, ticked and exited against a context.
///
/// Implementors are usually fieldless enums; identity is value equality.
/// All hooks have empty defaults so a state only overrides what it needs.
pub trait State<C>: Copy + Eq + Debug {
    /// Called once when the machine switches into this state.
    fn enter(self, _ctx: &mut C) {}

    /// Called every time the machine is ticked while this state is current.
    ///
    /// # Returns
    ///
    /// - `Some(next)` to request a transition, applied after this call returns
    /// - `None` to stay in the current state
    fn tick(self, _ctx: &mut C) -> Option<Self> {
        None
    }

    /// Called once when the machine leaves this state, before the next
    /// state's `enter`.
    fn exit(self, _ctx: &mut C) {}
}
