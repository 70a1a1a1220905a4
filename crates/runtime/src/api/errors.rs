//! Error type surfaced by the runtime API.
//!
//! Wraps the construction-time validation failures of `game-core` so callers
//! can bubble them up through one type.
use thiserror::Error;

use game_core::{ConfigError, ErrorSeverity, GameError, SceneError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("fixed time step must be positive and finite, got {0}")]
    InvalidStep(f32),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Config(e) => e.severity(),
            RuntimeError::Scene(e) => e.severity(),
            RuntimeError::InvalidStep(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Config(e) => e.error_code(),
            RuntimeError::Scene(e) => e.error_code(),
            RuntimeError::InvalidStep(_) => "RUNTIME_INVALID_STEP",
        }
    }
}
