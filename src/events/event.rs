//! Game events.
//!
//! Events describe what the core just did. Presentation, audio and UI
//! layers consume them; nothing in the core reads them back.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::config::BoardConfig;
use crate::core::entity::CardHandle;
use crate::core::state::{GameState, GameStats};

/// Notification fired by the match engine or the game facade.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A card was revealed.
    Flipped { handle: CardHandle, id: CardId },

    /// Both cards of a pair matched.
    Matched {
        first: CardHandle,
        second: CardHandle,
        id: CardId,
    },

    /// The pair did not match; both cards are face down again.
    Mismatched { first: CardHandle, second: CardHandle },

    /// Every pair has been found. Fires at most once per game.
    GameOver(GameStats),

    /// Counters changed and input is accepted again.
    StatsUpdated(GameStats),

    /// A saved game was restored. Carries the full state so the
    /// presentation layer can rebuild its card visuals.
    GameLoaded(Box<GameState>),

    /// A new deal is on the table.
    BoardArranged { board: BoardConfig, pairs: u32 },
}

impl GameEvent {
    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::Flipped { .. } => "flipped",
            GameEvent::Matched { .. } => "matched",
            GameEvent::Mismatched { .. } => "mismatched",
            GameEvent::GameOver(_) => "game_over",
            GameEvent::StatsUpdated(_) => "stats_updated",
            GameEvent::GameLoaded(_) => "game_loaded",
            GameEvent::BoardArranged { .. } => "board_arranged",
        }
    }

    /// Counters carried by the event, if any.
    #[must_use]
    pub fn stats(&self) -> Option<GameStats> {
        match self {
            GameEvent::GameOver(stats) | GameEvent::StatsUpdated(stats) => Some(*stats),
            GameEvent::GameLoaded(state) => Some(state.stats()),
            _ => None,
        }
    }
}
