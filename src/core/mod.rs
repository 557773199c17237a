//! Core types: handles, geometry, state, RNG, configuration, errors.
//!
//! Everything here is plain data shared by the board, the engine and the
//! persistence gateway.

pub mod entity;
pub mod vec3;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::CardHandle;
pub use vec3::Vec3;
pub use rng::GameRng;
pub use config::{BoardConfig, EngineConfig, GameConfig, LayoutConfig};
pub use error::{GameError, Result};
pub use state::{CardSnapshot, GameState, GameStats};
