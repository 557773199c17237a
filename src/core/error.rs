//! Error types for the game core.
//!
//! Stray input (revealing an unknown or already face-up card, revealing
//! while a pair resolves) is never an error; those calls just return
//! `false`. Everything here is recoverable by the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Pair count must be positive")]
    InvalidPairCount,

    #[error("Board {rows}x{columns} has an odd number of slots")]
    OddSlotCount { rows: u32, columns: u32 },

    #[error("Board dimension {value} outside {min}..={max}")]
    DimensionOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Deck has {actual} cards, board needs {expected}")]
    DeckSizeMismatch { expected: usize, actual: usize },

    #[error("No board has been arranged")]
    NoBoard,

    #[error("Cannot save while a pair is being resolved")]
    SaveWhileResolving,

    #[error("No save store configured")]
    NoStore,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt save: {0}")]
    CorruptSave(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
