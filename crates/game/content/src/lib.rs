//! Authored content for encounters.
//!
//! Scenes (node layout, patrol, hide spots, gimmicks, spawn points) are RON
//! files; tuning is a TOML file holding any subset of [`game_core::GameConfig`].
//! Loaders resolve node names to ids and validate every reference before
//! handing fully built `game-core` values to the runtime.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, SceneLoader};
