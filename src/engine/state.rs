//! The game state aggregate.
//!
//! One explicit struct owns everything mutable, instantiated per session;
//! there are no module-level singletons. All mutation goes through
//! [`crate::engine::GameEngine`] operations.

use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use crate::core::{Board, PlayerId, PlayerPair, TokenHistory, WinLine};

/// Where the round is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Picking categories; the board is not live.
    Setup,
    /// The round is being played.
    InProgress,
    /// A line was completed; awaiting `reset_round`.
    Won,
}

/// The pending power-interaction mode.
///
/// Block and Swap need follow-up cell selections; modelling them as a
/// finite-state machine makes illegal interleavings unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingPower {
    /// No power interaction in flight; clicks are normal placements.
    Idle,
    /// Block activated; next click picks the cell to block.
    AwaitingBlockTarget,
    /// Swap activated; next click picks the first of the player's tokens.
    AwaitingSwapFirst,
    /// First swap cell chosen; next click picks the other token.
    AwaitingSwapSecond { first: usize },
}

impl PendingPower {
    /// Whether a power interaction is awaiting input.
    #[must_use]
    pub fn is_pending(self) -> bool {
        self != PendingPower::Idle
    }
}

/// The single blocked cell, while one exists.
///
/// Invariants: at most one cell is blocked at a time, and a blocked cell is
/// always empty (only empty cells are blockable and nothing can be placed
/// there while the block lasts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedCell {
    /// The blocked cell index.
    pub cell: usize,
    /// Successful placements left before the block lifts.
    pub turns_remaining: u8,
}

/// The winner of the current round and the line that won it.
///
/// Bundling the two keeps "winner is set iff the winning line is non-empty"
/// true by construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundWinner {
    pub player: PlayerId,
    pub line: WinLine,
}

/// Complete mutable game state.
///
/// Scores and category selections persist across round resets; everything
/// else is per-round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// The cell grid.
    pub board: Board,
    /// Round lifecycle phase.
    pub phase: RoundPhase,
    /// Whose turn it is.
    pub turn: PlayerId,
    /// Category selection per player (by registry name).
    pub categories: PlayerPair<Option<String>>,
    /// Per-player token history, oldest first.
    pub histories: PlayerPair<TokenHistory>,
    /// Whether each player has spent their one power this round.
    pub power_used: PlayerPair<bool>,
    /// Winner and winning line, once a line completes.
    pub winner: Option<RoundWinner>,
    /// Cumulative scores. Only ever incremented.
    pub scores: PlayerPair<u32>,
    /// The currently blocked cell, if any.
    pub blocked: Option<BlockedCell>,
    /// Power-interaction FSM.
    pub pending: PendingPower,
    /// Set between Double Drop activation and the extra placement.
    pub double_drop_pending: bool,
    /// Per-turn countdown.
    pub countdown: Countdown,
}

impl GameState {
    /// Create a fresh session state.
    #[must_use]
    pub fn new(board_size: usize, max_tokens: usize, countdown_seconds: u32) -> Self {
        Self {
            board: Board::new(board_size),
            phase: RoundPhase::Setup,
            turn: PlayerId::One,
            categories: PlayerPair::with_default(),
            histories: PlayerPair::new(|_| TokenHistory::new(max_tokens)),
            power_used: PlayerPair::with_value(false),
            winner: None,
            scores: PlayerPair::with_value(0),
            blocked: None,
            pending: PendingPower::Idle,
            double_drop_pending: false,
            countdown: Countdown::new(countdown_seconds),
        }
    }

    /// Clear all per-round state, preserving scores and category choices.
    pub fn reset_round(&mut self) {
        self.board.clear_all();
        self.phase = RoundPhase::Setup;
        self.turn = PlayerId::One;
        for player in PlayerId::both() {
            self.histories[player].clear();
            self.power_used[player] = false;
        }
        self.winner = None;
        self.blocked = None;
        self.pending = PendingPower::Idle;
        self.double_drop_pending = false;
        self.countdown.cancel();
    }

    /// Whether a cell is currently blocked.
    #[must_use]
    pub fn is_blocked(&self, idx: usize) -> bool {
        self.blocked.is_some_and(|b| b.cell == idx)
    }
}
