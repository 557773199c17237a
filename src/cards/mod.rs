//! Card system: identifiers and entities.
//!
//! ## Key Types
//!
//! - `CardId`: The matching value on a card's face
//! - `CardFace`: FaceDown / FaceUp / Matched
//! - `CardEntity`: A card on the board with its placement and face

pub mod definition;
pub mod instance;

pub use definition::CardId;
pub use instance::{CardEntity, CardFace};
