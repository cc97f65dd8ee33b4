//! The per-turn countdown state machine.
//!
//! The engine is synchronous; actual scheduling belongs to the caller. The
//! contract is:
//!
//! - When the countdown is armed, `token()` yields a [`TimerToken`] the
//!   caller stores with its scheduled one-shot timer.
//! - Every transition that invalidates an outstanding timer (turn change,
//!   round start or reset, toggling, a win) rearms or cancels the
//!   countdown, which bumps an internal generation counter.
//! - When the caller's timer fires it hands the token back; a token from a
//!   superseded generation is ignored. This is what prevents the stale-timer
//!   double-advance bug.
//! - A repeating one-second tick drives the displayed `seconds_remaining`;
//!   it never advances the turn itself.

use serde::{Deserialize, Serialize};

/// Handle identifying one arming of the countdown.
///
/// Opaque to the caller; compared by the engine when an expiry is reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken {
    generation: u64,
}

/// Countdown state for the current turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    enabled: bool,
    initial_seconds: u32,
    seconds_remaining: u32,
    generation: u64,
}

impl Countdown {
    /// Create a disabled countdown with the given per-turn allowance.
    #[must_use]
    pub fn new(initial_seconds: u32) -> Self {
        Self {
            enabled: false,
            initial_seconds,
            seconds_remaining: initial_seconds,
            generation: 0,
        }
    }

    /// Whether the countdown is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds left for display.
    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// The configured per-turn allowance.
    #[must_use]
    pub fn initial_seconds(&self) -> u32 {
        self.initial_seconds
    }

    /// Turn the countdown on. Call `rearm` afterwards if a turn is live.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Turn the countdown off, invalidating any outstanding timer.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.cancel();
    }

    /// Reset to the initial allowance and invalidate any outstanding timer.
    pub fn rearm(&mut self) {
        self.generation += 1;
        self.seconds_remaining = self.initial_seconds;
    }

    /// Invalidate any outstanding timer without restarting the clock.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.seconds_remaining = self.initial_seconds;
    }

    /// Token for the current arming, if the countdown is enabled.
    #[must_use]
    pub fn token(&self) -> Option<TimerToken> {
        self.enabled.then_some(TimerToken {
            generation: self.generation,
        })
    }

    /// Whether a reported expiry is still current.
    #[must_use]
    pub fn accepts(&self, token: TimerToken) -> bool {
        self.enabled && token.generation == self.generation
    }

    /// One-second display decrement, saturating at zero.
    pub fn tick(&mut self) {
        if self.enabled {
            self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        }
    }
}
