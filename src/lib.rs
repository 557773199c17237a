//! # quantum-tiles
//!
//! Headless core of a memory (tile-matching) game.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: No threads, no wall clock. The host forwards input and
//!    calls `tick(delta)` once per frame; delays are phases of the engine.
//!
//! 2. **Presentation-Agnostic**: Cards carry an id, a face and a placement.
//!    Rendering, animation and audio react to `GameEvent`s.
//!
//! 3. **Deterministic**: All shuffling goes through a seeded `GameRng`, so a
//!    deal can be replayed from its seed.
//!
//! ## Modules
//!
//! - `core`: Handles, geometry, state, RNG, configuration, errors
//! - `cards`: Card identifiers and live card entities
//! - `deck`: Shuffled paired deck generation
//! - `board`: Grid layout and card entity lifecycle
//! - `engine`: Match-resolution state machine and scoring
//! - `events`: Game events and the listener bus
//! - `persistence`: Save slot, encodings and validation
//! - `game`: `MemoryGame`, the facade a host talks to

pub mod core;
pub mod cards;
pub mod deck;
pub mod board;
pub mod engine;
pub mod events;
pub mod persistence;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    CardHandle, Vec3,
    GameRng,
    BoardConfig, EngineConfig, GameConfig, LayoutConfig,
    GameError, Result,
    CardSnapshot, GameState, GameStats,
};

pub use crate::cards::{CardEntity, CardFace, CardId};

pub use crate::deck::generate_deck;

pub use crate::board::{Board, GridGeometry};

pub use crate::engine::{EnginePhase, MatchEngine, PairOutcome, TickOutcome};

pub use crate::events::{EventBus, GameEvent, ListenerId};

pub use crate::persistence::{
    FileStore, LoadOutcome, MemoryStore, PersistenceGateway, SaveFormat, SaveStore,
};

pub use crate::game::MemoryGame;
