//! Engine phases.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;

/// Where the engine is in resolving a pair.
///
/// `Memorizing` and `Cooldown` together make up "resolving": reveals are
/// refused in both. The timers count down only through `MatchEngine::tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// Accepting reveals; zero or one card revealed.
    #[default]
    Idle,

    /// Two cards revealed, waiting before evaluation.
    Memorizing { remaining: Duration },

    /// Pair evaluated, waiting before input reopens.
    Cooldown { remaining: Duration },
}

impl EnginePhase {
    /// True while reveals are refused.
    #[must_use]
    pub fn is_resolving(self) -> bool {
        !matches!(self, EnginePhase::Idle)
    }

    /// Time left in the current timed phase.
    #[must_use]
    pub fn remaining(self) -> Option<Duration> {
        match self {
            EnginePhase::Idle => None,
            EnginePhase::Memorizing { remaining } | EnginePhase::Cooldown { remaining } => Some(remaining),
        }
    }
}

/// Result of evaluating a revealed pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairOutcome {
    Matched(CardId),
    Mismatched,
}

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A pair was evaluated during this tick.
    pub resolved: Option<PairOutcome>,

    /// Input reopened during this tick.
    pub reenabled: bool,

    /// Auto-save is on and input just reopened. `MemoryGame::tick` saves on it.
    pub save_requested: bool,
}
