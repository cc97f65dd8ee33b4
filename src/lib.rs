//! # blink-tac-toe
//!
//! Rules engine for Blink Tac Toe: two players place category-themed emoji
//! tokens on a 3x3 grid, a player's oldest token "blinks" away once they
//! exceed three on the board, and each category grants a one-time power
//! (Double Drop, Swap, or Block). An optional per-turn countdown forces
//! the turn over on expiry.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: rendering, sounds, and dialogs are the caller's
//!    concern. Operations return [`engine::GameEvent`] sequences for the
//!    presentation layer to surface; rule violations come back as
//!    [`engine::RejectReason`] values and never mutate state.
//!
//! 2. **Explicit state**: one [`engine::GameState`] per session, owned by
//!    [`engine::GameEngine`]; no hidden globals, so sessions are cheap to
//!    instantiate in tests.
//!
//! 3. **Deterministic where it matters**: the only randomness is the
//!    symbol draw, behind a seedable [`core::GameRng`]; win detection
//!    evaluates lines in a fixed order.
//!
//! ## Modules
//!
//! - `core`: players, RNG, the board and win detection, token histories
//! - `category`: the category/power registry and built-in category set
//! - `engine`: the state aggregate, events, countdown, and all operations

pub mod category;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{Board, GameRng, OwnedToken, PlacedToken, PlayerId, PlayerPair, TokenHistory, WinLine};

pub use crate::category::{CategoryDef, CategoryRegistry, ConfigError, PowerKind, Symbol};

pub use crate::engine::{
    BlockedCell, Countdown, EngineConfig, GameEngine, GameEvent, GameState, PendingPower,
    RejectReason, RoundPhase, RoundWinner, TimerToken,
};
