//! Game state: live counters and the persisted snapshot.
//!
//! ## GameStats
//!
//! The counters the match engine mutates:
//! - Score, combo streak, attempts
//! - Pairs required and pairs found
//!
//! ## GameState
//!
//! Complete point-in-time record of a game:
//! - Counters and play time
//! - Grid dimensions (when known)
//! - One `CardSnapshot` per live card, in slot order
//!
//! A `GameState` is what the persistence gateway writes and what
//! `GameEvent::GameLoaded` carries. Card snapshots live in an `im::Vector`
//! so cloning a state for an event or a save is O(1).

use std::time::Duration;

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::BoardConfig;
use super::error::{GameError, Result};
use super::vec3::Vec3;
use crate::cards::CardId;

/// Score and progress counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameStats {
    pub score: u32,

    /// Consecutive matches since the last mismatch.
    pub combo: u32,

    /// Evaluated pairs, not individual flips.
    pub attempts: u32,

    pub matches_required: u32,

    pub current_matches: u32,
}

impl GameStats {
    /// Fresh counters for a game of `matches_required` pairs.
    #[must_use]
    pub fn new(matches_required: u32) -> Self {
        Self {
            matches_required,
            ..Self::default()
        }
    }

    /// True once every pair has been found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matches_required > 0 && self.current_matches >= self.matches_required
    }
}

/// Reconstruction record for one card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardId,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub position: Vec3,
    pub scale: Vec3,
}

/// Full game state as persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    pub combo: u32,
    pub attempts: u32,
    pub matches_required: u32,
    pub current_matches: u32,

    /// Time spent playing the current deal.
    #[serde(default)]
    pub play_time: Duration,

    /// Grid the cards were dealt on, if it was dealt by `arrange`.
    #[serde(default)]
    pub board: Option<BoardConfig>,

    /// One record per live card in slot order.
    pub cards: Vector<CardSnapshot>,
}

impl GameState {
    /// Combine counters with a card snapshot.
    #[must_use]
    pub fn from_parts(
        stats: GameStats,
        play_time: Duration,
        board: Option<BoardConfig>,
        cards: Vector<CardSnapshot>,
    ) -> Self {
        Self {
            score: stats.score,
            combo: stats.combo,
            attempts: stats.attempts,
            matches_required: stats.matches_required,
            current_matches: stats.current_matches,
            play_time,
            board,
            cards,
        }
    }

    /// The counter portion of this state.
    #[must_use]
    pub fn stats(&self) -> GameStats {
        GameStats {
            score: self.score,
            combo: self.combo,
            attempts: self.attempts,
            matches_required: self.matches_required,
            current_matches: self.current_matches,
        }
    }

    /// Number of cards face up but not yet matched.
    #[must_use]
    pub fn pending_reveals(&self) -> usize {
        self.cards
            .iter()
            .filter(|c| c.is_flipped && !c.is_matched)
            .count()
    }

    /// Check the record describes a reachable game.
    ///
    /// Rejects counters that contradict each other or the cards, a pair
    /// target that disagrees with the card count, ids outside
    /// `0..matches_required` or not present exactly twice, half-matched
    /// pairs, and more than one pending reveal (a save is only taken while
    /// no pair is resolving).
    pub fn validate(&self) -> Result<()> {
        if self.current_matches > self.matches_required {
            return Err(corrupt("more matches than pairs"));
        }
        if self.combo > self.current_matches {
            return Err(corrupt("combo exceeds matches"));
        }
        if self.attempts < self.current_matches {
            return Err(corrupt("fewer attempts than matches"));
        }
        if let Some(board) = self.board {
            board.validate()?;
            if !self.cards.is_empty() && board.slot_count() != self.cards.len() {
                return Err(corrupt("card count does not fit the board"));
            }
        }
        if self.cards.is_empty() {
            if self.matches_required != 0 {
                return Err(corrupt("pairs required on an empty board"));
            }
            return Ok(());
        }
        if self.cards.len() != 2 * self.matches_required as usize {
            return Err(corrupt("card count does not match pairs required"));
        }

        // id -> (seen, matched)
        let mut seen: FxHashMap<CardId, (u32, u32)> = FxHashMap::default();
        for card in &self.cards {
            if !card.position.is_finite() || !card.scale.is_finite() {
                return Err(corrupt("non-finite card placement"));
            }
            let entry = seen.entry(card.id).or_default();
            entry.0 += 1;
            if card.is_matched {
                entry.1 += 1;
            }
        }

        let mut matched_pairs = 0;
        for (id, (count, matched)) in &seen {
            if id.raw() >= self.matches_required {
                return Err(corrupt(&format!("{} outside 0..{}", id, self.matches_required)));
            }
            if *count != 2 {
                return Err(corrupt(&format!("{} appears {} times", id, count)));
            }
            match matched {
                0 => {}
                2 => matched_pairs += 1,
                _ => return Err(corrupt(&format!("{} is half matched", id))),
            }
        }
        if matched_pairs != self.current_matches {
            return Err(corrupt("matched cards disagree with match count"));
        }
        if self.pending_reveals() > 1 {
            return Err(corrupt("pair was saved mid-resolution"));
        }
        Ok(())
    }
}

fn corrupt(reason: &str) -> GameError {
    GameError::CorruptSave(reason.to_string())
}
