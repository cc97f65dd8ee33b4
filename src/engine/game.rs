//! The game engine: every mutation operation and the read model.
//!
//! The engine owns the [`GameState`], the category registry, and the RNG.
//! The presentation layer calls the operations in response to user input
//! and timer callbacks, surfaces the returned [`GameEvent`]s, and reads
//! state through the accessors to render.
//!
//! Every fallible operation returns `Result<Vec<GameEvent>, RejectReason>`
//! and leaves state untouched on `Err`.

use log::debug;

use super::countdown::TimerToken;
use super::events::{GameEvent, RejectReason};
use super::state::{BlockedCell, GameState, PendingPower, RoundPhase, RoundWinner};
use crate::category::{CategoryRegistry, PowerKind};
use crate::core::{Board, GameRng, OwnedToken, PlacedToken, PlayerId, PlayerPair};

/// Engine configuration with the classic defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board side length (N for an N x N grid).
    pub board_size: usize,
    /// Maximum simultaneous tokens per player before blink eviction.
    pub max_tokens: usize,
    /// Per-turn countdown allowance in seconds.
    pub countdown_seconds: u32,
    /// How many placements a blocked cell stays blocked.
    pub block_duration: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            max_tokens: 3,
            countdown_seconds: 5,
            block_duration: 2,
        }
    }
}

/// The Blink Tac Toe rules engine.
///
/// Instantiate one per session; see [`GameEngine::standard`].
///
/// ```
/// use blink_tac_toe::engine::GameEngine;
/// use blink_tac_toe::core::PlayerId;
///
/// let mut engine = GameEngine::standard();
/// engine.select_category(PlayerId::One, "Animals").unwrap();
/// engine.select_category(PlayerId::Two, "Food").unwrap();
/// engine.start_round().unwrap();
///
/// let events = engine.place_token(4).unwrap();
/// assert!(!events.is_empty());
/// assert_eq!(engine.turn(), PlayerId::Two);
/// ```
pub struct GameEngine {
    config: EngineConfig,
    registry: CategoryRegistry,
    state: GameState,
    rng: GameRng,
}

impl GameEngine {
    /// Create an engine with an explicit registry, configuration, and seed.
    ///
    /// Fixed seeds make games reproducible; tests rely on this.
    #[must_use]
    pub fn with_seed(registry: CategoryRegistry, config: EngineConfig, seed: u64) -> Self {
        Self {
            state: GameState::new(config.board_size, config.max_tokens, config.countdown_seconds),
            rng: GameRng::new(seed),
            config,
            registry,
        }
    }

    /// Create an engine with an explicit registry and configuration,
    /// seeded from OS entropy.
    #[must_use]
    pub fn new(registry: CategoryRegistry, config: EngineConfig) -> Self {
        let seed = GameRng::from_entropy().seed();
        Self::with_seed(registry, config, seed)
    }

    /// Create an engine with the built-in categories and default rules.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CategoryRegistry::standard(), EngineConfig::default())
    }

    // === Round setup ===

    /// Record a player's category choice.
    ///
    /// Legal any time before the round starts; both players may pick the
    /// same category.
    pub fn select_category(
        &mut self,
        player: PlayerId,
        name: &str,
    ) -> Result<Vec<GameEvent>, RejectReason> {
        match self.state.phase {
            RoundPhase::Setup => {}
            RoundPhase::InProgress => return Err(RejectReason::RoundInProgress),
            RoundPhase::Won => return Err(RejectReason::RoundOver),
        }
        if !self.registry.contains(name) {
            return Err(RejectReason::UnknownCategory(name.to_string()));
        }

        debug!("{player} selected category {name:?}");
        self.state.categories[player] = Some(name.to_string());
        Ok(vec![])
    }

    /// Begin the round. Both players must have a category selected.
    pub fn start_round(&mut self) -> Result<Vec<GameEvent>, RejectReason> {
        match self.state.phase {
            RoundPhase::Setup => {}
            RoundPhase::InProgress => return Err(RejectReason::RoundInProgress),
            RoundPhase::Won => return Err(RejectReason::RoundOver),
        }
        for player in PlayerId::both() {
            if self.state.categories[player].is_none() {
                return Err(RejectReason::CategoryNotSelected(player));
            }
        }

        debug!("round started; {} to move", self.state.turn);
        self.state.phase = RoundPhase::InProgress;

        let mut events = vec![GameEvent::RoundStarted];
        self.rearm_countdown(&mut events);
        Ok(events)
    }

    // === Placement and pending-mode resolution ===

    /// Handle a cell click.
    ///
    /// Routed to the pending power interaction when one is awaiting input,
    /// otherwise a normal placement.
    pub fn place_token(&mut self, idx: usize) -> Result<Vec<GameEvent>, RejectReason> {
        match self.state.phase {
            RoundPhase::InProgress => {}
            RoundPhase::Setup => return Err(RejectReason::RoundNotStarted),
            RoundPhase::Won => return Err(RejectReason::RoundOver),
        }
        if !self.state.board.in_bounds(idx) {
            return Err(RejectReason::OutOfBounds(idx));
        }

        match self.state.pending {
            PendingPower::AwaitingBlockTarget => self.resolve_block_target(idx),
            PendingPower::AwaitingSwapFirst => self.resolve_swap_first(idx),
            PendingPower::AwaitingSwapSecond { first } => self.resolve_swap_second(first, idx),
            PendingPower::Idle => self.place_normal(idx),
        }
    }

    /// Normal placement: draw a symbol, blink if at capacity, check for a
    /// win, then hand the turn over (unless a double drop is pending).
    fn place_normal(&mut self, idx: usize) -> Result<Vec<GameEvent>, RejectReason> {
        if !self.state.board.is_empty(idx) {
            return Err(RejectReason::CellOccupied(idx));
        }
        if self.state.is_blocked(idx) {
            return Err(RejectReason::CellBlocked(idx));
        }

        let player = self.state.turn;
        let name = self.state.categories[player]
            .clone()
            .ok_or(RejectReason::CategoryNotSelected(player))?;
        let def = self
            .registry
            .get(&name)
            .ok_or_else(|| RejectReason::UnknownCategory(name.clone()))?;

        // Symbol sets are validated non-empty at registry load.
        let symbol = self
            .rng
            .choose(&def.symbols)
            .expect("validated symbol set")
            .clone();

        let mut events = Vec::new();

        if let Some(evicted) = self.state.histories[player].push(PlacedToken {
            cell: idx,
            symbol: symbol.clone(),
        }) {
            self.state.board.clear(evicted.cell);
            debug!("{player} blinked: oldest token left cell {}", evicted.cell);
            events.push(GameEvent::TokenBlinked {
                player,
                cell: evicted.cell,
            });
        }

        self.state.board.set(
            idx,
            OwnedToken {
                owner: player,
                symbol: symbol.clone(),
            },
        );
        events.push(GameEvent::TokenPlaced {
            player,
            cell: idx,
            symbol,
        });

        if self.try_finish_round(player, &mut events) {
            return Ok(events);
        }

        self.decrement_block(&mut events);

        if self.state.double_drop_pending {
            // The extra drop: same player moves again.
            self.state.double_drop_pending = false;
            self.rearm_countdown(&mut events);
            return Ok(events);
        }

        self.advance_turn(&mut events);
        Ok(events)
    }

    /// Block, phase two: the target cell was clicked.
    ///
    /// The power is marked used here, at selection time, not at activation.
    fn resolve_block_target(&mut self, idx: usize) -> Result<Vec<GameEvent>, RejectReason> {
        if !self.state.board.is_empty(idx) {
            return Err(RejectReason::CellOccupied(idx));
        }
        if self.state.is_blocked(idx) {
            return Err(RejectReason::CellBlocked(idx));
        }

        let player = self.state.turn;
        let turns = self.config.block_duration;
        self.state.blocked = Some(BlockedCell {
            cell: idx,
            turns_remaining: turns,
        });
        self.state.pending = PendingPower::Idle;
        self.state.power_used[player] = true;
        debug!("{player} blocked cell {idx} for {turns} turns");

        let mut events = vec![GameEvent::BlockApplied { cell: idx, turns }];
        self.advance_turn(&mut events);
        Ok(events)
    }

    /// Swap, phase one: the source cell was clicked.
    fn resolve_swap_first(&mut self, idx: usize) -> Result<Vec<GameEvent>, RejectReason> {
        let player = self.state.turn;
        if !self.state.board.is_owned_by(idx, player) {
            return Err(RejectReason::NotOwnToken(idx));
        }

        self.state.pending = PendingPower::AwaitingSwapSecond { first: idx };
        Ok(vec![GameEvent::SwapSourceSelected { player, cell: idx }])
    }

    /// Swap, phase two: the destination cell was clicked.
    fn resolve_swap_second(
        &mut self,
        first: usize,
        idx: usize,
    ) -> Result<Vec<GameEvent>, RejectReason> {
        let player = self.state.turn;
        if idx == first {
            return Err(RejectReason::SwapSameCell(idx));
        }
        if !self.state.board.is_owned_by(idx, player) {
            return Err(RejectReason::NotOwnToken(idx));
        }

        self.state.board.swap(first, idx);
        self.state.histories[player].swap_cells(first, idx);
        self.state.pending = PendingPower::Idle;
        debug!("{player} swapped cells {first} and {idx}");

        let mut events = vec![GameEvent::SwapCompleted {
            player,
            first,
            second: idx,
        }];

        // A swap only rearranges the player's own tokens, but detection
        // still runs so a rearrangement that completes a line ends the
        // round the same way a placement would.
        if self.try_finish_round(player, &mut events) {
            return Ok(events);
        }

        self.advance_turn(&mut events);
        Ok(events)
    }

    // === Power activation ===

    /// Activate the current player's category power.
    ///
    /// Double Drop and Swap consume the power immediately; Block consumes
    /// it when the target cell is chosen.
    pub fn activate_power(&mut self) -> Result<Vec<GameEvent>, RejectReason> {
        match self.state.phase {
            RoundPhase::InProgress => {}
            RoundPhase::Setup => return Err(RejectReason::RoundNotStarted),
            RoundPhase::Won => return Err(RejectReason::RoundOver),
        }

        let player = self.state.turn;
        if self.state.power_used[player] {
            return Err(RejectReason::PowerAlreadyUsed);
        }
        if self.state.pending.is_pending() {
            return Err(RejectReason::PowerPending);
        }

        let name = self.state.categories[player]
            .clone()
            .ok_or(RejectReason::CategoryNotSelected(player))?;
        let def = self
            .registry
            .get(&name)
            .ok_or_else(|| RejectReason::UnknownCategory(name.clone()))?;
        let power = def.power;

        debug!("{player} activated {power}");
        match power {
            PowerKind::DoubleDrop => {
                self.state.double_drop_pending = true;
                self.state.power_used[player] = true;
            }
            PowerKind::Swap => {
                self.state.pending = PendingPower::AwaitingSwapFirst;
                self.state.power_used[player] = true;
            }
            PowerKind::Block => {
                self.state.pending = PendingPower::AwaitingBlockTarget;
            }
        }

        let mut events = vec![GameEvent::PowerActivated { player, power }];
        self.rearm_countdown(&mut events);
        Ok(events)
    }

    // === Round reset ===

    /// Clear the board and all per-round state.
    ///
    /// Scores and category selections persist; any outstanding timer is
    /// invalidated.
    pub fn reset_round(&mut self) {
        debug!("round reset");
        self.state.reset_round();
    }

    // === Countdown ===

    /// Enable or disable the per-turn countdown.
    ///
    /// Enabling mid-round arms it at the initial value for the current
    /// turn; disabling invalidates any outstanding timer.
    pub fn set_countdown_enabled(&mut self, enabled: bool) -> Vec<GameEvent> {
        if enabled == self.state.countdown.is_enabled() {
            return vec![];
        }

        let mut events = Vec::new();
        if enabled {
            self.state.countdown.enable();
            if self.state.phase == RoundPhase::InProgress {
                self.rearm_countdown(&mut events);
            }
        } else {
            self.state.countdown.disable();
        }
        events
    }

    /// One-second display tick. Never advances the turn.
    pub fn tick_countdown(&mut self) {
        self.state.countdown.tick();
    }

    /// Token identifying the current countdown arming, for the caller's
    /// one-shot expiry timer. `None` while the countdown is disabled.
    #[must_use]
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.state.countdown.token()
    }

    /// Report that the caller's expiry timer fired.
    ///
    /// A current token forces the turn over, exactly as if the expiring
    /// player passed; any pending power selection is abandoned (a Block not
    /// yet targeted is not consumed). A stale token is ignored, so a timer
    /// racing a manual move can never advance the turn twice.
    pub fn handle_expiry(&mut self, token: TimerToken) -> Vec<GameEvent> {
        if self.state.phase != RoundPhase::InProgress {
            return vec![];
        }
        if !self.state.countdown.accepts(token) {
            return vec![];
        }

        let player = self.state.turn;
        debug!("{player} ran out of time");
        self.state.pending = PendingPower::Idle;
        self.state.double_drop_pending = false;

        let mut events = vec![GameEvent::TurnTimeout { player }];
        self.advance_turn(&mut events);
        events
    }

    // === Shared transitions ===

    /// If `player` now owns a full line, end the round: set the winner,
    /// bump their score, and stop the clock. The turn does not advance.
    fn try_finish_round(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) -> bool {
        let Some(line) = self.state.board.winning_line(player) else {
            return false;
        };

        debug!("{player} wins with line {line:?}");
        self.state.phase = RoundPhase::Won;
        self.state.winner = Some(RoundWinner {
            player,
            line: line.clone(),
        });
        self.state.scores[player] += 1;
        self.state.countdown.cancel();
        events.push(GameEvent::RoundWon { player, line });
        true
    }

    /// Age the blocked cell by one placement, lifting the block at zero.
    fn decrement_block(&mut self, events: &mut Vec<GameEvent>) {
        if let Some(blocked) = &mut self.state.blocked {
            blocked.turns_remaining -= 1;
            if blocked.turns_remaining == 0 {
                let cell = blocked.cell;
                self.state.blocked = None;
                debug!("cell {cell} unblocked");
                events.push(GameEvent::BlockExpired { cell });
            }
        }
    }

    /// Hand the turn to the other player and restart the clock.
    fn advance_turn(&mut self, events: &mut Vec<GameEvent>) {
        self.state.turn = self.state.turn.other();
        events.push(GameEvent::TurnAdvanced {
            player: self.state.turn,
        });
        self.rearm_countdown(events);
    }

    /// Restart the countdown for the current turn, if enabled.
    fn rearm_countdown(&mut self, events: &mut Vec<GameEvent>) {
        if self.state.countdown.is_enabled() {
            self.state.countdown.rearm();
            events.push(GameEvent::CountdownReset {
                seconds: self.state.countdown.seconds_remaining(),
            });
        }
    }

    // === Read model ===

    /// The full game state, for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The category registry.
    #[must_use]
    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// Whose turn it is.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.state.turn
    }

    /// Round lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    /// Winner and winning line, once a line completes.
    #[must_use]
    pub fn winner(&self) -> Option<&RoundWinner> {
        self.state.winner.as_ref()
    }

    /// Cumulative scores.
    #[must_use]
    pub fn scores(&self) -> &PlayerPair<u32> {
        &self.state.scores
    }

    /// The currently blocked cell, if any.
    #[must_use]
    pub fn blocked_cell(&self) -> Option<BlockedCell> {
        self.state.blocked
    }

    /// Whether a player has used their power this round.
    #[must_use]
    pub fn power_used(&self, player: PlayerId) -> bool {
        self.state.power_used[player]
    }

    /// The pending power-interaction mode.
    #[must_use]
    pub fn pending_power(&self) -> PendingPower {
        self.state.pending
    }

    /// Whether a double drop is awaiting its extra placement.
    #[must_use]
    pub fn double_drop_pending(&self) -> bool {
        self.state.double_drop_pending
    }

    /// Whether the countdown is enabled.
    #[must_use]
    pub fn countdown_enabled(&self) -> bool {
        self.state.countdown.is_enabled()
    }

    /// Countdown seconds remaining, for display.
    #[must_use]
    pub fn countdown_seconds(&self) -> u32 {
        self.state.countdown.seconds_remaining()
    }

    /// A player's selected category name, if any.
    #[must_use]
    pub fn category_of(&self, player: PlayerId) -> Option<&str> {
        self.state.categories[player].as_deref()
    }

    /// The power a player's selected category grants, if a category is
    /// selected and registered.
    #[must_use]
    pub fn power_of(&self, player: PlayerId) -> Option<PowerKind> {
        self.category_of(player)
            .and_then(|name| self.registry.get(name))
            .map(|def| def.power)
    }
}
