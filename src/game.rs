//! The host-facing game facade.
//!
//! `MemoryGame` wires the deck generator, board, match engine, event bus and
//! an optional save slot together. A host typically:
//!
//! 1. Builds a game from a `GameConfig` and subscribes to its events
//! 2. Calls `arrange` (or `load`) to put cards on the table
//! 3. Forwards clicks to `reveal*` and calls `tick` once per frame

use std::fmt;
use std::time::Duration;

use log::{debug, info, warn};

use crate::board::Board;
use crate::core::config::{BoardConfig, GameConfig};
use crate::core::entity::CardHandle;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;
use crate::core::state::{GameState, GameStats};
use crate::deck::generate_deck;
use crate::engine::{MatchEngine, TickOutcome};
use crate::events::{EventBus, GameEvent};
use crate::persistence::{LoadOutcome, PersistenceGateway, SaveFormat, SaveStore};

/// One memory game: board, engine, shuffle RNG and save slot.
///
/// ```
/// use std::time::Duration;
/// use quantum_tiles::core::GameConfig;
/// use quantum_tiles::game::MemoryGame;
///
/// let mut game = MemoryGame::new(GameConfig::default().with_seed(3));
/// game.arrange(2, 2).unwrap();
/// assert_eq!(game.stats().matches_required, 2);
///
/// assert!(game.reveal_slot(0));
/// assert!(game.reveal_at(0, 1));
/// game.tick(Duration::from_secs(3)).unwrap();
/// assert_eq!(game.stats().attempts, 1);
/// ```
pub struct MemoryGame {
    config: GameConfig,
    board: Board,
    engine: MatchEngine,
    rng: GameRng,
    persistence: Option<PersistenceGateway<Box<dyn SaveStore>>>,
}

impl MemoryGame {
    /// Create a game with an empty board and no save slot.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!("shuffle seed {}", rng.seed());
        Self {
            board: Board::new(config.layout.clone()),
            engine: MatchEngine::new(config.engine.clone()),
            rng,
            persistence: None,
            config,
        }
    }

    /// Attach a save slot.
    #[must_use]
    pub fn with_persistence(mut self, store: impl SaveStore + 'static, format: SaveFormat) -> Self {
        let store: Box<dyn SaveStore> = Box::new(store);
        self.persistence = Some(PersistenceGateway::new(store, format));
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.engine.stats()
    }

    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.engine.play_time()
    }

    /// Seed of the shuffle RNG, for replaying a deal.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        self.engine.events()
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        self.engine.events_mut()
    }

    /// Snapshot of the running game.
    #[must_use]
    pub fn state(&self) -> GameState {
        self.engine.game_state(&self.board)
    }

    // === Dealing ===

    /// Deal a fresh shuffled deck onto a `rows` x `columns` grid.
    ///
    /// The dimensions are checked against the configured bounds and must
    /// give an even slot count. On error the previous game is untouched.
    pub fn arrange(&mut self, rows: u32, columns: u32) -> Result<()> {
        let board = BoardConfig::new(rows, columns);
        if let Err(e) = self.config.check_board(board) {
            warn!("rejected board {}: {}", board, e);
            return Err(e);
        }
        let deck = generate_deck(board.pair_count(), &mut self.rng)?;
        self.board.arrange(board, &deck)?;

        let pairs = (deck.len() / 2) as u32;
        self.engine.start_new_game(pairs);
        info!("arranged {} board ({} pairs)", board, pairs);
        self.engine
            .events_mut()
            .emit(GameEvent::BoardArranged { board, pairs });
        Ok(())
    }

    /// Re-deal with the current dimensions.
    pub fn restart(&mut self) -> Result<()> {
        let board = self.board.dimensions().ok_or(GameError::NoBoard)?;
        self.arrange(board.rows, board.columns)
    }

    // === Input ===

    /// Reveal a card by handle. See `MatchEngine::reveal`.
    pub fn reveal(&mut self, handle: CardHandle) -> bool {
        self.engine.reveal(&mut self.board, handle)
    }

    /// Reveal the card at a grid coordinate.
    pub fn reveal_at(&mut self, row: u32, column: u32) -> bool {
        match self.board.handle_at(row, column) {
            Some(handle) => self.reveal(handle),
            None => false,
        }
    }

    /// Reveal the card in a row-major slot.
    pub fn reveal_slot(&mut self, index: usize) -> bool {
        match self.board.slot(index) {
            Some(handle) => self.reveal(handle),
            None => false,
        }
    }

    /// Advance timers by `delta`, saving when the engine asks for it.
    ///
    /// Auto-save only runs as a cooldown ends, so an `Err` from a failed
    /// auto-save also means input has reopened this frame: the engine is
    /// `Idle` and `StatsUpdated` has fired. The game is otherwise untouched
    /// and the host may retry with `save`.
    pub fn tick(&mut self, delta: Duration) -> Result<TickOutcome> {
        let outcome = self.engine.tick(&mut self.board, delta);
        if outcome.save_requested {
            if self.persistence.is_some() {
                self.save()?;
            } else {
                debug!("auto-save skipped: no store");
            }
        }
        Ok(outcome)
    }

    // === Persistence ===

    /// Write the running game to the save slot.
    pub fn save(&mut self) -> Result<()> {
        if self.engine.is_resolving() {
            return Err(GameError::SaveWhileResolving);
        }
        let state = self.engine.game_state(&self.board);
        let gateway = self.persistence.as_mut().ok_or(GameError::NoStore)?;
        gateway.save(&state)
    }

    /// Replace the running game with the saved one.
    ///
    /// An empty slot returns `NotFound` and changes nothing, as does any
    /// error.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let gateway = self.persistence.as_ref().ok_or(GameError::NoStore)?;
        let outcome = gateway.load()?;
        if let LoadOutcome::Loaded(state) = &outcome {
            self.apply(state.clone());
        }
        Ok(outcome)
    }

    /// Replace the running game with `state`, obtained elsewhere.
    pub fn restore(&mut self, state: GameState) -> Result<()> {
        state.validate()?;
        self.apply(state);
        Ok(())
    }

    fn apply(&mut self, state: GameState) {
        self.engine.cancel_pending();
        self.board.restore(&state.cards, state.board);
        self.engine.resume(&state, &mut self.board);
        self.engine
            .events_mut()
            .emit(GameEvent::GameLoaded(Box::new(state)));
    }

    /// True if the save slot holds a record.
    pub fn has_save(&self) -> Result<bool> {
        self.persistence.as_ref().ok_or(GameError::NoStore)?.has_save()
    }

    /// Empty the save slot.
    pub fn clear_save(&mut self) -> Result<()> {
        self.persistence.as_mut().ok_or(GameError::NoStore)?.clear()
    }
}

impl fmt::Debug for MemoryGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGame")
            .field("board", &self.board.dimensions())
            .field("cards", &self.board.len())
            .field("phase", &self.engine.phase())
            .field("stats", &self.engine.stats())
            .field("seed", &self.rng.seed())
            .field("persistence", &self.persistence.as_ref().map(|g| g.format()))
            .finish()
    }
}
