//! The cell grid and win detection.
//!
//! ## Board
//!
//! An `N x N` grid of cells indexed `0..N*N`, row-major. Each cell is empty
//! or holds one player's token.
//!
//! ## Win detection
//!
//! Winning lines are precomputed once per board size: all `N` rows (by row
//! index), then all `N` columns (by column index), then the main diagonal,
//! then the anti-diagonal (`2N + 2` lines total). `winning_line` evaluates
//! them in that fixed order and returns the first line fully owned by the
//! player, so detection is deterministic even if several lines complete at
//! once.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::category::Symbol;
use crate::core::player::PlayerId;

/// A token occupying a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedToken {
    /// The player who placed the token.
    pub owner: PlayerId,
    /// The symbol drawn from the owner's category.
    pub symbol: Symbol,
}

/// A completed line: the cell indices of a row, column, or diagonal.
///
/// SmallVec keeps the common 3x3 case (3 indices) off the heap.
pub type WinLine = SmallVec<[usize; 3]>;

/// The cell grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<OwnedToken>>,
    lines: Vec<WinLine>,
}

impl Board {
    /// Create an empty `size x size` board.
    ///
    /// Panics if `size` is zero; the board size is fixed configuration, not
    /// user input.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Board size must be at least 1");

        Self {
            size,
            cells: vec![None; size * size],
            lines: Self::winning_lines(size),
        }
    }

    /// Precompute the winning lines for a board size.
    ///
    /// Order is fixed: rows, columns, main diagonal, anti-diagonal.
    fn winning_lines(size: usize) -> Vec<WinLine> {
        let mut lines = Vec::with_capacity(2 * size + 2);

        for row in 0..size {
            lines.push((0..size).map(|col| row * size + col).collect());
        }
        for col in 0..size {
            lines.push((0..size).map(|row| row * size + col).collect());
        }
        lines.push((0..size).map(|i| i * size + i).collect());
        lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());

        lines
    }

    /// Board side length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check whether an index addresses a cell on this board.
    #[must_use]
    pub fn in_bounds(&self, idx: usize) -> bool {
        idx < self.cells.len()
    }

    /// Get the occupant of a cell, or `None` if empty.
    #[must_use]
    pub fn cell(&self, idx: usize) -> Option<&OwnedToken> {
        self.cells.get(idx).and_then(|c| c.as_ref())
    }

    /// Check whether a cell is empty.
    #[must_use]
    pub fn is_empty(&self, idx: usize) -> bool {
        self.cell(idx).is_none()
    }

    /// Check whether a cell holds a token owned by `player`.
    #[must_use]
    pub fn is_owned_by(&self, idx: usize, player: PlayerId) -> bool {
        self.cell(idx).is_some_and(|t| t.owner == player)
    }

    /// Place a token in a cell, replacing any occupant.
    pub fn set(&mut self, idx: usize, token: OwnedToken) {
        self.cells[idx] = Some(token);
    }

    /// Clear a cell, returning the former occupant.
    pub fn clear(&mut self, idx: usize) -> Option<OwnedToken> {
        self.cells[idx].take()
    }

    /// Exchange the occupants of two cells.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Clear every cell.
    pub fn clear_all(&mut self) {
        self.cells.fill(None);
    }

    /// Iterate over all cells in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&OwnedToken>)> {
        self.cells.iter().enumerate().map(|(i, c)| (i, c.as_ref()))
    }

    /// Count the tokens owned by a player.
    #[must_use]
    pub fn token_count(&self, player: PlayerId) -> usize {
        self.cells
            .iter()
            .filter(|c| c.as_ref().is_some_and(|t| t.owner == player))
            .count()
    }

    /// Find the first winning line fully owned by `player`, if any.
    ///
    /// Pure with respect to the board contents; called after every
    /// placement and after every swap, never after a block.
    #[must_use]
    pub fn winning_line(&self, player: PlayerId) -> Option<WinLine> {
        self.lines
            .iter()
            .find(|line| line.iter().all(|&idx| self.is_owned_by(idx, player)))
            .cloned()
    }
}
