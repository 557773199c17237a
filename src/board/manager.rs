//! Board: the set of live card entities.
//!
//! The `Board` owns every card on the table. It supports:
//! - Dealing a deck into a grid (`arrange`)
//! - Rebuilding cards from a saved snapshot (`restore`)
//! - Card lookup by handle, slot index, or grid coordinate
//!
//! Cards are stored in slot order; an index map gives O(1) handle lookup.

use im::Vector;
use log::debug;
use rustc_hash::FxHashMap;

use super::layout::GridGeometry;
use crate::cards::{CardEntity, CardFace, CardId};
use crate::core::config::{BoardConfig, LayoutConfig};
use crate::core::entity::CardHandle;
use crate::core::error::{GameError, Result};
use crate::core::state::CardSnapshot;
use crate::core::vec3::Vec3;

/// Live cards and their placement.
///
/// ## Usage
///
/// ```
/// use quantum_tiles::board::Board;
/// use quantum_tiles::cards::CardId;
/// use quantum_tiles::core::{BoardConfig, LayoutConfig};
///
/// let mut board = Board::new(LayoutConfig::default());
/// let deck = vec![CardId::new(1), CardId::new(0), CardId::new(0), CardId::new(1)];
/// board.arrange(BoardConfig::new(2, 2), &deck).unwrap();
///
/// let handle = board.handle_at(0, 1).unwrap();
/// assert_eq!(board.get(handle).unwrap().id(), CardId::new(0));
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    layout: LayoutConfig,

    /// Grid the current cards were dealt on. `None` after restoring a
    /// snapshot that did not record it.
    dimensions: Option<BoardConfig>,

    /// Cards in slot order.
    cards: Vec<CardEntity>,

    /// handle -> slot index
    index: FxHashMap<CardHandle, usize>,

    /// Never reset, so old handles stay unknown.
    next_handle: CardHandle,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            dimensions: None,
            cards: Vec::new(),
            index: FxHashMap::default(),
            next_handle: CardHandle::new(0),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Replace the layout used by the next `arrange`.
    pub fn set_layout(&mut self, layout: LayoutConfig) {
        self.layout = layout;
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<BoardConfig> {
        self.dimensions
    }

    /// Deal `deck` into a fresh grid, slot `i` receiving `deck[i]`.
    ///
    /// Everything is validated before the current cards are cleared, so a
    /// rejected deal leaves the board untouched.
    pub fn arrange(&mut self, board: BoardConfig, deck: &[CardId]) -> Result<()> {
        board.validate()?;
        if deck.len() != board.slot_count() {
            return Err(GameError::DeckSizeMismatch {
                expected: board.slot_count(),
                actual: deck.len(),
            });
        }
        let geometry = GridGeometry::compute(&self.layout, board)?;

        self.clear();
        self.cards.reserve(deck.len());
        let scale = geometry.scale();
        for (position, &id) in geometry.positions().zip(deck) {
            self.spawn(id, position, scale);
        }
        self.dimensions = Some(board);

        debug!("arranged {} board with {} cards", board, self.cards.len());
        Ok(())
    }

    /// Rebuild cards from a snapshot, one entity per record.
    ///
    /// Faces are applied directly; nothing is flipped or matched through
    /// the normal transitions.
    pub fn restore(&mut self, cards: &Vector<CardSnapshot>, dimensions: Option<BoardConfig>) {
        self.clear();
        self.cards.reserve(cards.len());
        for record in cards {
            let handle = self.spawn(record.id, record.position, record.scale);
            if let Some(card) = self.get_mut(handle) {
                card.restore_face(CardFace::from_flags(record.is_flipped, record.is_matched));
            }
        }
        self.dimensions = dimensions.filter(|d| d.slot_count() == self.cards.len());

        debug!("restored {} cards", self.cards.len());
    }

    /// Destroy every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.index.clear();
        self.dimensions = None;
    }

    fn spawn(&mut self, id: CardId, position: Vec3, scale: Vec3) -> CardHandle {
        let handle = self.next_handle;
        self.next_handle = handle.next();
        self.index.insert(handle, self.cards.len());
        self.cards.push(CardEntity::new(handle, id, position, scale));
        handle
    }

    // === Lookup ===

    #[must_use]
    pub fn get(&self, handle: CardHandle) -> Option<&CardEntity> {
        self.index.get(&handle).and_then(|&i| self.cards.get(i))
    }

    #[must_use]
    pub fn get_mut(&mut self, handle: CardHandle) -> Option<&mut CardEntity> {
        let i = *self.index.get(&handle)?;
        self.cards.get_mut(i)
    }

    #[must_use]
    pub fn contains(&self, handle: CardHandle) -> bool {
        self.index.contains_key(&handle)
    }

    /// Handle of the card in slot `index` (row-major).
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<CardHandle> {
        self.cards.get(index).map(CardEntity::handle)
    }

    /// Handle of the card at `(row, column)`, when the grid is known.
    #[must_use]
    pub fn handle_at(&self, row: u32, column: u32) -> Option<CardHandle> {
        let dims = self.dimensions?;
        if row >= dims.rows || column >= dims.columns {
            return None;
        }
        self.slot(row as usize * dims.columns as usize + column as usize)
    }

    /// Cards in slot order.
    #[must_use]
    pub fn cards(&self) -> &[CardEntity] {
        &self.cards
    }

    pub fn handles(&self) -> impl Iterator<Item = CardHandle> + '_ {
        self.cards.iter().map(CardEntity::handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Pairs not yet matched.
    #[must_use]
    pub fn remaining_pairs(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_matched()).count() / 2
    }

    /// Persisted records for every card, in slot order.
    #[must_use]
    pub fn snapshot(&self) -> Vector<CardSnapshot> {
        self.cards.iter().map(CardEntity::snapshot).collect()
    }
}
