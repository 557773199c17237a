//! Match resolution.
//!
//! The engine is a two-phase state machine driven by the host's update
//! loop rather than by threads or coroutines:
//!
//! ```text
//! Idle --2nd reveal--> Memorizing --delay--> [evaluate] Cooldown --delay--> Idle
//! ```
//!
//! Input is gated by the phase: reveals are refused unless `Idle`.

mod match_engine;
mod phase;

pub use match_engine::MatchEngine;
pub use phase::{EnginePhase, PairOutcome, TickOutcome};
