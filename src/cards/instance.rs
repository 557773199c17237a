//! Card entities - runtime card state.
//!
//! `CardEntity` is one tile on the board: its face id, where it sits, and
//! whether it is face down, face up, or matched.
//!
//! ## Face transitions
//!
//! ```text
//! FaceDown --flip--> FaceUp --mark_matched--> Matched
//!     ^                 |
//!     +-----unflip------+
//! ```
//!
//! `Matched` is terminal. Every transition method returns whether it
//! happened; an illegal transition changes nothing.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::CardHandle;
use crate::core::state::CardSnapshot;
use crate::core::vec3::Vec3;

/// Visibility and match state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFace {
    #[default]
    FaceDown,
    FaceUp,
    Matched,
}

impl CardFace {
    /// Face implied by the persisted flags. `is_matched` wins over `is_flipped`.
    #[must_use]
    pub fn from_flags(is_flipped: bool, is_matched: bool) -> Self {
        match (is_flipped, is_matched) {
            (_, true) => CardFace::Matched,
            (true, false) => CardFace::FaceUp,
            (false, false) => CardFace::FaceDown,
        }
    }
}

/// A card on the board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEntity {
    handle: CardHandle,
    id: CardId,

    /// Placement assigned by the board.
    pub position: Vec3,
    pub scale: Vec3,

    face: CardFace,
}

impl CardEntity {
    /// Spawn a face-down card.
    #[must_use]
    pub fn new(handle: CardHandle, id: CardId, position: Vec3, scale: Vec3) -> Self {
        Self {
            handle,
            id,
            position,
            scale,
            face: CardFace::FaceDown,
        }
    }

    #[must_use]
    pub fn handle(&self) -> CardHandle {
        self.handle
    }

    #[must_use]
    pub fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub fn face(&self) -> CardFace {
        self.face
    }

    #[must_use]
    pub fn is_face_down(&self) -> bool {
        self.face == CardFace::FaceDown
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// FaceDown -> FaceUp.
    pub fn flip(&mut self) -> bool {
        self.transition(CardFace::FaceDown, CardFace::FaceUp)
    }

    /// FaceUp -> FaceDown, after a mismatch.
    pub fn unflip(&mut self) -> bool {
        self.transition(CardFace::FaceUp, CardFace::FaceDown)
    }

    /// FaceUp -> Matched.
    pub fn mark_matched(&mut self) -> bool {
        self.transition(CardFace::FaceUp, CardFace::Matched)
    }

    /// Set the face directly when rebuilding from a snapshot.
    ///
    /// Bypasses the transition rules and has no scoring side effects.
    pub fn restore_face(&mut self, face: CardFace) {
        self.face = face;
    }

    fn transition(&mut self, from: CardFace, to: CardFace) -> bool {
        if self.face != from {
            return false;
        }
        self.face = to;
        true
    }

    /// Persisted record for this card.
    #[must_use]
    pub fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            id: self.id,
            is_flipped: self.face != CardFace::FaceDown,
            is_matched: self.face == CardFace::Matched,
            position: self.position,
            scale: self.scale,
        }
    }
}
