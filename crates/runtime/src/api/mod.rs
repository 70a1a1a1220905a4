//! Types downstream clients interact with.
mod errors;
mod input;
mod report;

pub use errors::{Result, RuntimeError};
pub use input::{FrameInput, NoiseInput};
pub use report::{Outcome, SessionSummary, Tally, TickReport};
