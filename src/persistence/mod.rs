//! Save and load of the complete game state.
//!
//! ## Layers
//!
//! - `SaveStore`: where bytes live (`FileStore`, `MemoryStore`, or your own)
//! - `PersistenceGateway`: encodes a `GameState` into a versioned record
//!   (JSON or bincode) and validates it on the way back
//!
//! An empty slot is `LoadOutcome::NotFound`, not an error. Unreadable or
//! inconsistent records are `GameError::CorruptSave`; I/O failures are
//! `GameError::Io`. Nothing is retried.

mod gateway;
mod store;

pub use gateway::{decode, encode, LoadOutcome, PersistenceGateway, SaveFormat, SAVE_VERSION};
pub use store::{FileStore, MemoryStore, SaveStore};
