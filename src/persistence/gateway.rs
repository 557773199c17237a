//! Persistence gateway: encode, version and validate saved games.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::store::SaveStore;
use crate::core::error::{GameError, Result};
use crate::core::state::GameState;

/// Current save record version.
pub const SAVE_VERSION: u32 = 1;

/// On-disk encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveFormat {
    /// Human-readable JSON.
    #[default]
    Json,
    /// Compact bincode.
    Binary,
}

/// Result of a load.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Loaded(GameState),
    /// The slot is empty. Expected on first run.
    NotFound,
}

#[derive(Serialize)]
struct SaveRecordRef<'a> {
    version: u32,
    state: &'a GameState,
}

#[derive(Deserialize)]
struct SaveRecord {
    version: u32,
    state: GameState,
}

/// Reads and writes the single save slot.
///
/// ```
/// use quantum_tiles::core::GameState;
/// use quantum_tiles::persistence::{LoadOutcome, MemoryStore, PersistenceGateway, SaveFormat};
///
/// let mut gateway = PersistenceGateway::new(MemoryStore::new(), SaveFormat::Json);
/// assert_eq!(gateway.load().unwrap(), LoadOutcome::NotFound);
///
/// let state = GameState { play_time: std::time::Duration::from_secs(5), ..GameState::default() };
/// gateway.save(&state).unwrap();
/// assert_eq!(gateway.load().unwrap(), LoadOutcome::Loaded(state));
/// ```
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    format: SaveFormat,
}

impl<S: SaveStore> PersistenceGateway<S> {
    pub fn new(store: S, format: SaveFormat) -> Self {
        Self { store, format }
    }

    #[must_use]
    pub fn format(&self) -> SaveFormat {
        self.format
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the slot with `state`.
    pub fn save(&mut self, state: &GameState) -> Result<()> {
        let bytes = encode(state, self.format)?;
        self.store.write(&bytes)?;
        info!(
            "saved game: {} cards, {}/{} pairs",
            state.cards.len(),
            state.current_matches,
            state.matches_required
        );
        Ok(())
    }

    /// Read, decode and validate the slot.
    pub fn load(&self) -> Result<LoadOutcome> {
        let Some(bytes) = self.store.read()? else {
            return Ok(LoadOutcome::NotFound);
        };
        let state = decode(&bytes, self.format).map_err(|e| {
            warn!("rejected save: {}", e);
            e
        })?;
        info!("loaded game: {} cards", state.cards.len());
        Ok(LoadOutcome::Loaded(state))
    }

    /// True if the slot holds a record (valid or not).
    pub fn has_save(&self) -> Result<bool> {
        Ok(self.store.read()?.is_some())
    }

    /// Empty the slot.
    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }
}

/// Encode a state inside a versioned record.
pub fn encode(state: &GameState, format: SaveFormat) -> Result<Vec<u8>> {
    let record = SaveRecordRef {
        version: SAVE_VERSION,
        state,
    };
    match format {
        SaveFormat::Json => {
            serde_json::to_vec_pretty(&record).map_err(|e| GameError::Serialization(e.to_string()))
        }
        SaveFormat::Binary => {
            bincode::serialize(&record).map_err(|e| GameError::Serialization(e.to_string()))
        }
    }
}

/// Decode and validate a versioned record.
pub fn decode(bytes: &[u8], format: SaveFormat) -> Result<GameState> {
    let record: SaveRecord = match format {
        SaveFormat::Json => {
            serde_json::from_slice(bytes).map_err(|e| GameError::CorruptSave(e.to_string()))?
        }
        SaveFormat::Binary => {
            bincode::deserialize(bytes).map_err(|e| GameError::CorruptSave(e.to_string()))?
        }
    };
    if record.version != SAVE_VERSION {
        return Err(GameError::CorruptSave(format!(
            "unsupported save version {}",
            record.version
        )));
    }
    record.state.validate()?;
    Ok(record.state)
}
