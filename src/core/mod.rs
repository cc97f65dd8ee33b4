//! Core engine types: players, RNG, the board, and token histories.
//!
//! These are the building blocks the engine composes; none of them knows
//! about turns, powers, or the countdown.

pub mod board;
pub mod history;
pub mod player;
pub mod rng;

pub use board::{Board, OwnedToken, WinLine};
pub use history::{PlacedToken, TokenHistory};
pub use player::{PlayerId, PlayerPair};
pub use rng::GameRng;
