//! Deck generation.
//!
//! A deck is an ordered list of `CardId`s, two of each, that the board
//! deals into its slots in row-major order.

mod generator;

pub use generator::generate_deck;
