//! Lightweight finite state machine for tick-driven game agents.
//!
//! This library provides a single-current-state container with an
//! Enter/Tick/Exit transition contract, designed for small, closed sets of
//! behavior modes expressed as plain enums.
//!
//! - **Enum states**: States are `Copy + Eq` values, so "same state" is a
//!   plain equality check and no heap allocation is needed
//! - **Synchronous transitions**: `exit` of the old state always runs before
//!   `enter` of the new one, and exactly one state is current at any time
//! - **No re-entrancy**: Hooks only see the context, never the machine, so a
//!   hook cannot start a nested transition. A `tick` may *request* one, which
//!   the machine applies after the tick returns
//!
//! # Architecture
//!
//! - [`State`]: Trait implemented by the state enum
//! - [`StateMachine`]: Holds the current state and drives transitions
//! - [`StateMachineError`]: Programming errors (transition to an absent state)

pub mod error;
pub mod machine;
pub mod state;

// Re-export core types for ergonomic API
pub use error::StateMachineError;
pub use machine::StateMachine;
pub use state::State;
