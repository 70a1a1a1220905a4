//! Fixed-step clock: turns variable frame times into whole simulation ticks.

use crate::api::{Result, RuntimeError};

/// Default simulation step, in seconds.
pub const DEFAULT_STEP: f32 = 1.0 / 60.0;

/// Upper bound on ticks produced by a single [`FixedStep::advance`].
const MAX_TICKS_PER_ADVANCE: u32 = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32) -> Result<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RuntimeError::InvalidStep(step));
        }
        Ok(Self {
            step,
            accumulator: 0.0,
        })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Fraction of a step carried over to the next frame, in [0, 1).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    /// Feeds `frame_dt` seconds and returns how many ticks to run.
    ///
    /// Negative frame times count as zero. Backlog beyond the per-frame cap
    /// is dropped so a long stall cannot snowball into ever longer frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut ticks = 0;
        while self.accumulator >= self.step && ticks < MAX_TICKS_PER_ADVANCE {
            self.accumulator -= self.step;
            ticks += 1;
        }
        if self.accumulator >= self.step {
            tracing::debug!(
                target: "runtime::clock",
                dropped = self.accumulator,
                "Frame backlog dropped"
            );
            self.accumulator = 0.0;
        }
        ticks
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            accumulator: 0.0,
        }
    }
}
