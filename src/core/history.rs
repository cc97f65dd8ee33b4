//! Per-player token history with blink eviction.
//!
//! Each player's placed tokens are tracked oldest to newest, capped at the
//! configured maximum. Pushing beyond capacity evicts and returns the
//! oldest entry so the caller can clear its cell: the blink rule.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::category::Symbol;

/// One placed token: where it sits and what was drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedToken {
    /// Cell index on the board.
    pub cell: usize,
    /// The drawn symbol.
    pub symbol: Symbol,
}

/// Ordered token history (oldest first), capacity-bounded.
///
/// Invariant: `len() <= capacity()` at all times.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHistory {
    entries: SmallVec<[PlacedToken; 3]>,
    capacity: usize,
}

impl TokenHistory {
    /// Create an empty history with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Token capacity must be at least 1");

        Self {
            entries: SmallVec::new(),
            capacity,
        }
    }

    /// Maximum simultaneous tokens.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tokens currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the next push will evict.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Append a token, evicting and returning the oldest when at capacity.
    pub fn push(&mut self, token: PlacedToken) -> Option<PlacedToken> {
        let evicted = if self.is_full() {
            Some(self.entries.remove(0))
        } else {
            None
        };
        self.entries.push(token);
        evicted
    }

    /// Exchange the cell indices of the entries at `a` and `b`.
    ///
    /// Used by the swap power; placement order is untouched. The exchange
    /// is simultaneous so both cells may belong to this history.
    pub fn swap_cells(&mut self, a: usize, b: usize) {
        for entry in &mut self.entries {
            if entry.cell == a {
                entry.cell = b;
            } else if entry.cell == b {
                entry.cell = a;
            }
        }
    }

    /// Whether some entry occupies the given cell.
    #[must_use]
    pub fn occupies(&self, cell: usize) -> bool {
        self.entries.iter().any(|e| e.cell == cell)
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedToken> {
        self.entries.iter()
    }

    /// Remove all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
