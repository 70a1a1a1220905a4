//! Runtime orchestration for a single stealth-horror encounter.
//!
//! This crate wires the `game-core` components onto one session-scoped event
//! channel and drives them with a fixed-step clock. Consumers build a
//! [`Session`] from a [`Scene`](game_core::Scene), feed it a [`FrameInput`] per
//! tick and read back [`TickReport`]s.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`clock`] converts frame time into fixed ticks
pub mod api;
pub mod clock;
pub mod session;

pub use api::{
    FrameInput, NoiseInput, Outcome, Result, RuntimeError, SessionSummary, Tally, TickReport,
};
pub use clock::{DEFAULT_STEP, FixedStep};
pub use session::{Session, SessionBuilder};
