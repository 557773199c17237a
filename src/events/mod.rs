//! Event system.
//!
//! The match engine never calls presentation code directly. It emits
//! `GameEvent`s on an `EventBus` owned by the engine instance; flip
//! animations, sounds, the HUD and the game-over panel subscribe there.
//!
//! ## Event kinds
//!
//! - `Flipped`, `Matched`, `Mismatched`: per-card outcomes
//! - `GameOver`: the last pair was found
//! - `StatsUpdated`: counters changed and input is open again
//! - `GameLoaded`: a save was restored
//! - `BoardArranged`: a new deal was laid out

mod bus;
mod event;

pub use bus::{EventBus, ListenerId};
pub use event::GameEvent;
