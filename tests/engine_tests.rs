//! Engine integration tests: round lifecycle, placement, blink eviction,
//! win detection, reset, and the countdown.

use blink_tac_toe::{
    CategoryRegistry, EngineConfig, GameEngine, GameEvent, PlayerId, RejectReason, RoundPhase,
};

/// Engine with Animals (Double Drop) vs Food (Swap), round started.
fn ready_engine(seed: u64) -> GameEngine {
    let mut engine =
        GameEngine::with_seed(CategoryRegistry::standard(), EngineConfig::default(), seed);
    engine.select_category(PlayerId::One, "Animals").unwrap();
    engine.select_category(PlayerId::Two, "Food").unwrap();
    engine.start_round().unwrap();
    engine
}

/// Alternate placements through a fixed cell sequence, asserting none wins.
fn play_sequence(engine: &mut GameEngine, cells: &[usize]) {
    for &cell in cells {
        engine.place_token(cell).unwrap();
        assert!(engine.winner().is_none(), "unexpected win at cell {cell}");
    }
}

// =============================================================================
// Round lifecycle
// =============================================================================

/// A full setup-place-win-reset cycle works end to end.
#[test]
fn test_round_lifecycle() {
    let mut engine = ready_engine(42);

    // P1 takes row 0 while P2 fills the bottom without completing a line.
    play_sequence(&mut engine, &[0, 8, 1, 7]);
    let events = engine.place_token(2).unwrap();

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::RoundWon {
            player: PlayerId::One,
            ..
        }
    )));
    assert_eq!(engine.phase(), RoundPhase::Won);

    let winner = engine.winner().unwrap();
    assert_eq!(winner.player, PlayerId::One);
    assert_eq!(winner.line.as_slice(), &[0, 1, 2]);
    assert_eq!(engine.scores()[PlayerId::One], 1);

    engine.reset_round();
    assert_eq!(engine.phase(), RoundPhase::Setup);
    assert_eq!(engine.scores()[PlayerId::One], 1);
}

/// Winning does not advance the turn; further placements are rejected.
#[test]
fn test_win_stops_play() {
    let mut engine = ready_engine(42);

    play_sequence(&mut engine, &[0, 8, 1, 7]);
    engine.place_token(2).unwrap();

    assert_eq!(engine.turn(), PlayerId::One);
    assert_eq!(engine.place_token(5).unwrap_err(), RejectReason::RoundOver);
    assert_eq!(
        engine.activate_power().unwrap_err(),
        RejectReason::RoundOver
    );
}

/// Starting an already-started round is rejected without side effects.
#[test]
fn test_double_start_rejected() {
    let mut engine = ready_engine(1);

    assert_eq!(
        engine.start_round().unwrap_err(),
        RejectReason::RoundInProgress
    );
}

/// Scores accumulate across rounds within a session.
#[test]
fn test_scores_accumulate_across_rounds() {
    let mut engine = ready_engine(42);

    play_sequence(&mut engine, &[0, 8, 1, 7]);
    engine.place_token(2).unwrap();
    assert_eq!(engine.scores()[PlayerId::One], 1);

    engine.reset_round();
    engine.start_round().unwrap();

    play_sequence(&mut engine, &[0, 8, 1, 7]);
    engine.place_token(2).unwrap();
    assert_eq!(engine.scores()[PlayerId::One], 2);
    assert_eq!(engine.scores()[PlayerId::Two], 0);
}

// =============================================================================
// Blink rule
// =============================================================================

/// The fourth token a player places evicts their oldest from the board.
#[test]
fn test_blink_evicts_oldest() {
    let mut engine = ready_engine(42);

    // P1 places at 0, 1, 5; P2 at 8, 6, 4. No line completes.
    play_sequence(&mut engine, &[0, 8, 1, 6, 5, 4]);
    assert_eq!(engine.board().token_count(PlayerId::One), 3);

    // P1's fourth placement blinks the token at cell 0 away.
    let events = engine.place_token(3).unwrap();

    assert!(events.contains(&GameEvent::TokenBlinked {
        player: PlayerId::One,
        cell: 0,
    }));
    assert!(engine.board().is_empty(0));
    assert_eq!(engine.board().token_count(PlayerId::One), 3);

    let cells: Vec<_> = engine.state().histories[PlayerId::One]
        .iter()
        .map(|t| t.cell)
        .collect();
    assert_eq!(cells, vec![1, 5, 3]);
}

/// Board occupancy always matches the owning player's history.
#[test]
fn test_board_history_consistency_through_blinks() {
    let mut engine = ready_engine(7);

    play_sequence(&mut engine, &[0, 8, 1, 6, 5, 4, 3]);

    for player in PlayerId::both() {
        let history = &engine.state().histories[player];
        assert_eq!(engine.board().token_count(player), history.len());
        for token in history.iter() {
            assert!(
                engine.board().is_owned_by(token.cell, player),
                "{player} history points at cell {} the board disagrees on",
                token.cell
            );
        }
    }
}

/// A blinked cell is immediately placeable again.
#[test]
fn test_blinked_cell_is_placeable() {
    let mut engine = ready_engine(42);

    play_sequence(&mut engine, &[0, 8, 1, 6, 5, 4, 3]);
    assert!(engine.board().is_empty(0));

    // P2's turn; cell 0 is free again.
    engine.place_token(0).unwrap();
    assert!(engine.board().is_owned_by(0, PlayerId::Two));
}

// =============================================================================
// Countdown
// =============================================================================

/// Expiry forces the turn over exactly as a pass.
#[test]
fn test_expiry_advances_turn() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    assert_eq!(engine.turn(), PlayerId::One);
    let token = engine.timer_token().unwrap();
    let events = engine.handle_expiry(token);

    assert!(events.contains(&GameEvent::TurnTimeout {
        player: PlayerId::One
    }));
    assert_eq!(engine.turn(), PlayerId::Two);
}

/// The same expiry token never fires twice.
#[test]
fn test_expiry_token_single_use() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    let token = engine.timer_token().unwrap();
    assert!(!engine.handle_expiry(token).is_empty());
    assert!(engine.handle_expiry(token).is_empty());
    assert_eq!(engine.turn(), PlayerId::Two);
}

/// A manual move just before expiry invalidates the outstanding timer.
#[test]
fn test_manual_move_cancels_pending_timer() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    let stale = engine.timer_token().unwrap();
    engine.place_token(0).unwrap();
    assert_eq!(engine.turn(), PlayerId::Two);

    // The old timer fires late; nothing happens.
    assert!(engine.handle_expiry(stale).is_empty());
    assert_eq!(engine.turn(), PlayerId::Two);
}

/// Ticks drive the display and placement rearms the clock.
#[test]
fn test_tick_and_rearm() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    engine.tick_countdown();
    engine.tick_countdown();
    assert_eq!(engine.countdown_seconds(), 3);

    let events = engine.place_token(4).unwrap();
    assert!(events.contains(&GameEvent::CountdownReset { seconds: 5 }));
    assert_eq!(engine.countdown_seconds(), 5);
}

/// Ticks never advance the turn, even past zero.
#[test]
fn test_tick_never_advances_turn() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    for _ in 0..10 {
        engine.tick_countdown();
    }

    assert_eq!(engine.countdown_seconds(), 0);
    assert_eq!(engine.turn(), PlayerId::One);
}

/// Disabling the countdown invalidates the outstanding timer.
#[test]
fn test_disable_cancels_timer() {
    let mut engine = ready_engine(1);
    engine.set_countdown_enabled(true);

    let token = engine.timer_token().unwrap();
    engine.set_countdown_enabled(false);

    assert!(engine.timer_token().is_none());
    assert!(engine.handle_expiry(token).is_empty());
    assert_eq!(engine.turn(), PlayerId::One);
}

/// Enabling mid-round arms the clock for the current turn.
#[test]
fn test_enable_mid_round_arms_clock() {
    let mut engine = ready_engine(1);

    engine.place_token(0).unwrap();
    let events = engine.set_countdown_enabled(true);

    assert!(events.contains(&GameEvent::CountdownReset { seconds: 5 }));
    assert!(engine.timer_token().is_some());
}

/// A timer armed before a win cannot fire after it.
#[test]
fn test_win_cancels_timer() {
    let mut engine = ready_engine(42);
    engine.set_countdown_enabled(true);

    play_sequence(&mut engine, &[0, 8, 1, 7]);
    let token = engine.timer_token().unwrap();
    engine.place_token(2).unwrap();

    assert!(engine.handle_expiry(token).is_empty());
    assert_eq!(engine.turn(), PlayerId::One);
}

// =============================================================================
// Reset semantics
// =============================================================================

/// Reset clears the board and round state but keeps scores and categories.
#[test]
fn test_reset_round_full_sweep() {
    let mut engine = ready_engine(42);
    engine.set_countdown_enabled(true);

    play_sequence(&mut engine, &[0, 8, 1, 7]);
    engine.place_token(2).unwrap();
    engine.reset_round();

    assert_eq!(engine.phase(), RoundPhase::Setup);
    assert_eq!(engine.turn(), PlayerId::One);
    assert!(engine.winner().is_none());
    assert!(engine.blocked_cell().is_none());
    assert!(!engine.power_used(PlayerId::One));
    assert!(!engine.power_used(PlayerId::Two));
    assert!(engine.board().iter().all(|(_, cell)| cell.is_none()));
    assert!(engine.state().histories[PlayerId::One].is_empty());
    assert_eq!(engine.scores()[PlayerId::One], 1);
    assert_eq!(engine.category_of(PlayerId::Two), Some("Food"));

    // The same selections carry into the next round.
    engine.start_round().unwrap();
    assert_eq!(engine.phase(), RoundPhase::InProgress);
}

// =============================================================================
// Determinism
// =============================================================================

/// The same seed and operations produce identical boards.
#[test]
fn test_deterministic_replay() {
    let cells = [0, 8, 1, 6, 5, 4, 3];

    let mut a = ready_engine(12345);
    let mut b = ready_engine(12345);
    play_sequence(&mut a, &cells);
    play_sequence(&mut b, &cells);

    for idx in 0..9 {
        assert_eq!(a.board().cell(idx), b.board().cell(idx));
    }
}
