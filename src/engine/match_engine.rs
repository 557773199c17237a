//! The match engine.
//!
//! Tracks revealed cards, resolves pairs after the memorize delay, keeps
//! score, and gates input while a pair is resolving.
//!
//! ## Lifecycle of a pair
//!
//! 1. `reveal` flips a face-down card into the buffer (`Idle`).
//! 2. The second reveal fills the buffer and starts `Memorizing`.
//! 3. When the memorize delay has elapsed, `tick` evaluates the pair in one
//!    step and starts `Cooldown`.
//! 4. When the re-enable delay has elapsed, `tick` returns to `Idle` and
//!    emits `StatsUpdated`.
//!
//! The engine does not own the cards; every call that touches them takes
//! the `Board`.

use std::time::Duration;

use log::{debug, info};
use smallvec::SmallVec;

use super::phase::{EnginePhase, PairOutcome, TickOutcome};
use crate::board::Board;
use crate::cards::CardFace;
use crate::core::config::EngineConfig;
use crate::core::entity::CardHandle;
use crate::core::state::{GameState, GameStats};
use crate::events::{EventBus, GameEvent};

/// Match-resolution state machine for one game.
///
/// ```
/// use std::time::Duration;
/// use quantum_tiles::board::Board;
/// use quantum_tiles::cards::{CardFace, CardId};
/// use quantum_tiles::core::{BoardConfig, EngineConfig, LayoutConfig};
/// use quantum_tiles::engine::MatchEngine;
///
/// let mut board = Board::new(LayoutConfig::default());
/// let deck: Vec<_> = [0, 0, 1, 1].into_iter().map(CardId::new).collect();
/// board.arrange(BoardConfig::new(2, 2), &deck).unwrap();
///
/// let mut engine = MatchEngine::new(EngineConfig::default());
/// engine.start_new_game(2);
///
/// let (a, b) = (board.slot(0).unwrap(), board.slot(1).unwrap());
/// assert!(engine.reveal(&mut board, a));
/// assert!(engine.reveal(&mut board, b));
///
/// engine.tick(&mut board, Duration::from_secs(3));
/// assert_eq!(board.get(a).unwrap().face(), CardFace::Matched);
/// assert_eq!(engine.stats().score, 10);
/// ```
#[derive(Debug)]
pub struct MatchEngine {
    config: EngineConfig,
    stats: GameStats,
    play_time: Duration,

    /// Revealed, unresolved cards. Never more than two.
    revealed: SmallVec<[CardHandle; 2]>,

    phase: EnginePhase,

    /// Set once `GameOver` has fired for the current game.
    game_over_emitted: bool,

    events: EventBus,
}

impl MatchEngine {
    /// Create an engine with no game in progress.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_events(config, EventBus::new())
    }

    /// Create an engine that emits on an existing bus.
    #[must_use]
    pub fn with_events(config: EngineConfig, events: EventBus) -> Self {
        Self {
            config,
            stats: GameStats::default(),
            play_time: Duration::ZERO,
            revealed: SmallVec::new(),
            phase: EnginePhase::Idle,
            game_over_emitted: false,
            events,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> GameStats {
        self.stats
    }

    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.phase.is_resolving()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over_emitted
    }

    /// Cards revealed and waiting to be paired.
    #[must_use]
    pub fn revealed(&self) -> &[CardHandle] {
        &self.revealed
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    /// Point-in-time record of the game on `board`.
    #[must_use]
    pub fn game_state(&self, board: &Board) -> GameState {
        GameState::from_parts(self.stats, self.play_time, board.dimensions(), board.snapshot())
    }

    // === Game lifecycle ===

    /// Reset for a fresh deal of `pairs_required` pairs.
    ///
    /// Cancels any pending evaluation or cooldown.
    pub fn start_new_game(&mut self, pairs_required: u32) {
        self.cancel_pending();
        self.stats = GameStats::new(pairs_required);
        self.play_time = Duration::ZERO;
        self.game_over_emitted = false;
        info!("new game: {} pairs", pairs_required);
    }

    /// Drop any pending evaluation and empty the buffer.
    ///
    /// Cards already revealed keep their face; callers follow this with a
    /// new deal or a restore.
    pub fn cancel_pending(&mut self) {
        if self.phase.is_resolving() {
            debug!("cancelling {:?}", self.phase);
        }
        self.phase = EnginePhase::Idle;
        self.revealed.clear();
    }

    /// Continue a restored game.
    ///
    /// Adopts the saved counters. A single face-up, unmatched card is taken
    /// back into the buffer so it can still be paired; if the board holds
    /// more than one, they are all turned face down.
    pub fn resume(&mut self, state: &GameState, board: &mut Board) {
        self.cancel_pending();
        self.stats = state.stats();
        self.play_time = state.play_time;
        self.game_over_emitted = self.stats.is_complete();

        let face_up: SmallVec<[CardHandle; 2]> = board
            .cards()
            .iter()
            .filter(|c| c.face() == CardFace::FaceUp)
            .map(|c| c.handle())
            .collect();
        match face_up.as_slice() {
            [] => {}
            [only] => self.revealed.push(*only),
            many => {
                for &handle in many {
                    if let Some(card) = board.get_mut(handle) {
                        card.unflip();
                    }
                }
            }
        }
        info!(
            "resumed game: {}/{} pairs, score {}",
            self.stats.current_matches, self.stats.matches_required, self.stats.score
        );
    }

    // === Input ===

    /// Reveal a card.
    ///
    /// Returns false, changing nothing, if a pair is resolving, the handle
    /// is not on the board, or the card is not face down.
    pub fn reveal(&mut self, board: &mut Board, handle: CardHandle) -> bool {
        if self.phase.is_resolving() {
            debug!("reveal of {} refused while resolving", handle);
            return false;
        }
        let Some(card) = board.get_mut(handle) else {
            debug!("reveal of unknown {}", handle);
            return false;
        };
        if !card.flip() {
            return false;
        }
        let id = card.id();

        self.revealed.push(handle);
        self.events.emit(GameEvent::Flipped { handle, id });
        debug!("revealed {} ({})", handle, id);

        if self.revealed.len() == 2 {
            self.phase = EnginePhase::Memorizing {
                remaining: self.config.memorize_delay,
            };
        }
        true
    }

    // === Time ===

    /// Advance the engine by `delta`.
    ///
    /// At most one phase transition happens per call; time left over after
    /// a phase ends is not carried into the next one.
    pub fn tick(&mut self, board: &mut Board, delta: Duration) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.stats.matches_required > 0 && !self.stats.is_complete() {
            self.play_time = self.play_time.saturating_add(delta);
        }

        match self.phase {
            EnginePhase::Idle => {}
            EnginePhase::Memorizing { remaining } => {
                if delta < remaining {
                    self.phase = EnginePhase::Memorizing {
                        remaining: remaining - delta,
                    };
                } else {
                    outcome.resolved = self.evaluate(board);
                    self.phase = EnginePhase::Cooldown {
                        remaining: self.config.reenable_delay,
                    };
                }
            }
            EnginePhase::Cooldown { remaining } => {
                if delta < remaining {
                    self.phase = EnginePhase::Cooldown {
                        remaining: remaining - delta,
                    };
                } else {
                    self.phase = EnginePhase::Idle;
                    outcome.reenabled = true;
                    outcome.save_requested = self.config.auto_save;
                    self.events.emit(GameEvent::StatsUpdated(self.stats));
                }
            }
        }
        outcome
    }

    /// Judge the buffered pair. Either every counter and both cards change,
    /// or nothing does.
    fn evaluate(&mut self, board: &mut Board) -> Option<PairOutcome> {
        let pair = match self.revealed.as_slice() {
            &[first, second] => Some((first, second)),
            _ => None,
        };
        self.revealed.clear();
        let (first, second) = pair?;
        let first_id = board.get(first)?.id();
        let second_id = board.get(second)?.id();

        self.stats.attempts = self.stats.attempts.saturating_add(1);

        if first_id == second_id {
            for handle in [first, second] {
                if let Some(card) = board.get_mut(handle) {
                    card.mark_matched();
                }
            }
            self.stats.combo = self.stats.combo.saturating_add(1);
            let points = self.config.points_per_combo.saturating_mul(self.stats.combo);
            self.stats.score = self.stats.score.saturating_add(points);
            self.stats.current_matches = self.stats.current_matches.saturating_add(1);

            info!(
                "match {} (+{}, combo {}, {}/{})",
                first_id, points, self.stats.combo, self.stats.current_matches, self.stats.matches_required
            );
            self.events.emit(GameEvent::Matched {
                first,
                second,
                id: first_id,
            });

            if self.stats.is_complete() && !self.game_over_emitted {
                self.game_over_emitted = true;
                info!("game over: score {} in {} attempts", self.stats.score, self.stats.attempts);
                self.events.emit(GameEvent::GameOver(self.stats));
            }
            Some(PairOutcome::Matched(first_id))
        } else {
            for handle in [first, second] {
                if let Some(card) = board.get_mut(handle) {
                    card.unflip();
                }
            }
            self.stats.combo = 0;

            info!("mismatch {} / {}", first_id, second_id);
            self.events.emit(GameEvent::Mismatched { first, second });
            Some(PairOutcome::Mismatched)
        }
    }
}
