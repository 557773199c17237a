//! Paired deck generation.

use crate::cards::CardId;
use crate::core::error::{GameError, Result};
use crate::core::rng::GameRng;

/// Build a shuffled deck of `pair_count` pairs.
///
/// Returns `2 * pair_count` ids where every id in `0..pair_count` appears
/// exactly twice, in uniformly random order.
pub fn generate_deck(pair_count: usize, rng: &mut GameRng) -> Result<Vec<CardId>> {
    if pair_count == 0 {
        return Err(GameError::InvalidPairCount);
    }
    let pair_count = u32::try_from(pair_count).map_err(|_| GameError::InvalidPairCount)?;

    let mut deck: Vec<CardId> = (0..pair_count)
        .flat_map(|id| [CardId::new(id), CardId::new(id)])
        .collect();
    rng.shuffle(&mut deck);
    Ok(deck)
}
