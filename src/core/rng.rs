//! Seeded randomness for dealing.
//!
//! Every shuffle in a game draws from one `GameRng`. A fixed seed gives
//! the same sequence of deals, which is what tests and replays rely on.
//!
//! ```
//! use quantum_tiles::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shuffle source for one game.
///
/// ChaCha8 is fast and statistically sound; the seed is remembered so a
/// host can log it and reproduce a deal.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread-local OS-seeded generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `range`.
    pub fn index(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Permute `slice` in place, every order equally likely.
    ///
    /// Fisher–Yates: position `i` swaps with a uniform index in `[i, n)`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let n = slice.len();
        for i in 0..n.saturating_sub(1) {
            let j = self.index(i..n);
            slice.swap(i, j);
        }
    }
}
