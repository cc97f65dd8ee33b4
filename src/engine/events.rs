//! Notification events and rejection reason codes.
//!
//! Every operation returns `Result<Vec<GameEvent>, RejectReason>`: `Ok`
//! carries the notifications the presentation layer should surface (in
//! order), `Err` is a recoverable rule violation that left the state
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::category::{PowerKind, Symbol};
use crate::core::{PlayerId, WinLine};

/// A discrete notification emitted by an engine operation.
///
/// `TokenPlaced` and `RoundWon` double as the audio-cue triggers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Both categories were chosen and the round began.
    RoundStarted,

    /// A token was placed. Audio cue.
    TokenPlaced {
        player: PlayerId,
        cell: usize,
        symbol: Symbol,
    },

    /// A player's oldest token was evicted to make room (the blink rule).
    TokenBlinked { player: PlayerId, cell: usize },

    /// A placement or swap completed a line. Audio cue. Ends the round.
    RoundWon { player: PlayerId, line: WinLine },

    /// The turn passed to `player`.
    TurnAdvanced { player: PlayerId },

    /// A player activated their category's power. For `DoubleDrop` the
    /// effect lands on the player's next placement; for `Swap` and `Block`
    /// the engine now awaits cell selections.
    PowerActivated { player: PlayerId, power: PowerKind },

    /// First swap cell chosen; awaiting the second.
    SwapSourceSelected { player: PlayerId, cell: usize },

    /// Two of the player's tokens exchanged positions.
    SwapCompleted {
        player: PlayerId,
        first: usize,
        second: usize,
    },

    /// A cell became unplaceable for the given number of turns.
    BlockApplied { cell: usize, turns: u8 },

    /// A blocked cell became placeable again.
    BlockExpired { cell: usize },

    /// The turn holder ran out of time and the turn was forced over.
    TurnTimeout { player: PlayerId },

    /// The countdown was rearmed to its initial value.
    CountdownReset { seconds: u32 },
}

/// Why an action was refused. The action had no effect on state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The round has not started yet.
    RoundNotStarted,
    /// The operation is only legal before the round starts.
    RoundInProgress,
    /// The round already has a winner.
    RoundOver,
    /// The cell index is off the board.
    OutOfBounds(usize),
    /// The cell already holds a token.
    CellOccupied(usize),
    /// The cell is blocked by the Block power.
    CellBlocked(usize),
    /// The player has not selected a category.
    CategoryNotSelected(PlayerId),
    /// No category with that name is registered.
    UnknownCategory(String),
    /// The player already used their power this round.
    PowerAlreadyUsed,
    /// Another power interaction is still awaiting input.
    PowerPending,
    /// Swap requires one of the acting player's own tokens.
    NotOwnToken(usize),
    /// Swap requires two distinct cells.
    SwapSameCell(usize),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::RoundNotStarted => write!(f, "the round has not started"),
            RejectReason::RoundInProgress => write!(f, "the round is already in progress"),
            RejectReason::RoundOver => write!(f, "the round is over"),
            RejectReason::OutOfBounds(cell) => write!(f, "cell {cell} is off the board"),
            RejectReason::CellOccupied(cell) => write!(f, "cell {cell} is already occupied"),
            RejectReason::CellBlocked(cell) => write!(f, "cell {cell} is blocked"),
            RejectReason::CategoryNotSelected(player) => {
                write!(f, "{player} has no category selected")
            }
            RejectReason::UnknownCategory(name) => write!(f, "unknown category {name:?}"),
            RejectReason::PowerAlreadyUsed => write!(f, "power already used this round"),
            RejectReason::PowerPending => {
                write!(f, "another power interaction is awaiting input")
            }
            RejectReason::NotOwnToken(cell) => {
                write!(f, "cell {cell} does not hold one of your tokens")
            }
            RejectReason::SwapSameCell(cell) => {
                write!(f, "cell {cell} selected twice; pick a different cell")
            }
        }
    }
}

impl std::error::Error for RejectReason {}
