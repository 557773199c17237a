//! Board layout and card entity lifecycle.
//!
//! - `GridGeometry`: card footprint and slot positions for a grid
//! - `Board`: spawns, clears and restores the live card entities

mod layout;
mod manager;

pub use layout::GridGeometry;
pub use manager::Board;
