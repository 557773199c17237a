//! Card entity handles.
//!
//! Every card spawned on a board gets a `CardHandle`. Handles are allocated
//! from a counter that survives `clear`, so a handle from a previous deal
//! never aliases a card on the current one.
//!
//! ```
//! use quantum_tiles::core::CardHandle;
//!
//! let handle = CardHandle::new(3);
//! assert_eq!(handle.raw(), 3);
//! assert_eq!(format!("{}", handle), "Card#3");
//! ```

use serde::{Deserialize, Serialize};

/// Opaque reference to a live card entity on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardHandle(pub u32);

impl CardHandle {
    /// Create a handle from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The handle following this one.
    #[must_use]
    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for CardHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}
