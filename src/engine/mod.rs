//! The game engine: state aggregate, events, countdown, and operations.

pub mod countdown;
pub mod events;
pub mod game;
pub mod state;

pub use countdown::{Countdown, TimerToken};
pub use events::{GameEvent, RejectReason};
pub use game::{EngineConfig, GameEngine};
pub use state::{BlockedCell, GameState, PendingPower, RoundPhase, RoundWinner};
