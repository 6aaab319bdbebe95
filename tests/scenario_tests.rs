//! End-to-end game scenarios driven through the controller.
//!
//! These walk complete sequences of requests and check the board, the
//! counters and the notifications a consumer would see.

use std::sync::Arc;

use komi_engine::{
    Color, EventLog, Game, GameConfig, GameController, GameError, GameEvent, Grid, Phase, Pos,
    Snapshot, Stone, UpdateKind,
};

// =============================================================================
// Helpers
// =============================================================================

fn controller_with_log(config: GameConfig) -> (GameController, Arc<EventLog>) {
    let log = Arc::new(EventLog::new());
    let controller = GameController::new(config)
        .unwrap()
        .with_observer(log.clone());
    (controller, log)
}

/// White at the centre of a 5x5 board, boxed in by Black on three sides.
/// Black to move; playing (2, 3) captures it.
fn boxed_white_stone(controller: &GameController) {
    controller.submit_move(2, 2).unwrap();
    for (row, col) in [(1, 2), (0, 0), (3, 2), (0, 1), (2, 1), (0, 3)] {
        controller.submit_move(row, col).unwrap();
    }
}

/// An 11x11 board where Black playing (0, 10) captures ten White stones.
fn ten_stone_capture(threshold: u32) -> Game {
    let mut rows = vec!["WWWWWWWWWW.", "BBBBBBBBBB."];
    rows.extend(std::iter::repeat("...........").take(9));
    let config = GameConfig::new()
        .with_starting_color(Color::Black)
        .with_win_threshold(threshold);
    Game::with_grid(config, Grid::parse(&rows).unwrap()).unwrap()
}

fn game_over_count(events: &[GameEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count()
}

// =============================================================================
// Capture
// =============================================================================

/// A single stone with its last liberty filled is removed and scored.
#[test]
fn test_single_stone_capture() {
    let (controller, log) = controller_with_log(GameConfig::new().with_board_size(5));
    boxed_white_stone(&controller);
    log.drain();

    let result = controller.submit_move(2, 3).unwrap();
    assert_eq!(result.color, Color::Black);
    assert_eq!(result.captured, vec![Pos::new(2, 2)]);
    assert_eq!(result.captures[Color::Black], 1);
    assert_eq!(result.captures[Color::White], 0);
    assert_eq!(result.winner, None);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.stone(Pos::new(2, 2)), Some(Stone::Empty));
    assert_eq!(snapshot.stone(Pos::new(2, 3)), Some(Stone::Black));
    assert_eq!(snapshot.restricted, vec![Pos::new(2, 2)]);
    assert_eq!(snapshot.turn, Color::White);

    let events = log.drain();
    assert_eq!(events.len(), 1);
    let GameEvent::BoardUpdated(update) = &events[0] else {
        panic!("expected a board update");
    };
    assert_eq!(
        update.kind,
        UpdateKind::Move {
            color: Color::Black,
            placed: Pos::new(2, 3)
        }
    );
    assert_eq!(update.captured().collect::<Vec<_>>(), vec![Pos::new(2, 2)]);
    assert_eq!(update.captures[Color::Black], 1);
}

/// A vacated cell rejects both colours until the board is reset.
#[test]
fn test_restricted_cell_rejects_replay() {
    let (controller, log) = controller_with_log(GameConfig::new().with_board_size(5));
    boxed_white_stone(&controller);
    controller.submit_move(2, 3).unwrap();
    log.drain();

    let restricted = Err(GameError::Restricted {
        pos: Pos::new(2, 2),
    });
    assert_eq!(controller.submit_move(2, 2).map(|r| r.placed), restricted);
    assert_eq!(controller.turn(), Color::White);

    // White plays elsewhere, then Black tries the same cell.
    controller.submit_move(4, 4).unwrap();
    assert_eq!(controller.submit_move(2, 2).map(|r| r.placed), restricted);
    assert!(!controller.legal_moves().contains(&Pos::new(2, 2)));

    // Rejections emit nothing.
    assert_eq!(log.drain().len(), 1);

    controller.reset().unwrap();
    assert!(controller.snapshot().restricted.is_empty());
    assert!(controller.submit_move(2, 2).is_ok());
}

/// A move that closes two separate groups scores both.
#[test]
fn test_capture_of_two_groups_in_one_move() {
    // (0, 1) and (1, 0) are separate Black stones whose only liberty is
    // the shared corner.
    let grid = Grid::parse(&[
        ".BW..", //
        "BW...", //
        "W....", //
        ".....", //
        ".....",
    ])
    .unwrap();
    let config = GameConfig::new().with_starting_color(Color::White);
    let controller = GameController::with_game(Game::with_grid(config, grid).unwrap());

    let result = controller.submit_move(0, 0).unwrap();
    let mut captured = result.captured.clone();
    captured.sort();
    assert_eq!(captured, vec![Pos::new(0, 1), Pos::new(1, 0)]);
    assert_eq!(result.captures[Color::White], 2);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.stone(Pos::new(0, 0)), Some(Stone::White));
    assert_eq!(snapshot.restricted, vec![Pos::new(0, 1), Pos::new(1, 0)]);
}

/// The mover's own stone stays even with no liberties.
#[test]
fn test_placed_stone_without_liberties_stays() {
    let grid = Grid::parse(&[".W.", "W.W", ".W."]).unwrap();
    let config = GameConfig::new().with_starting_color(Color::Black);
    let controller = GameController::with_game(Game::with_grid(config, grid).unwrap());

    let result = controller.submit_move(1, 1).unwrap();
    assert!(result.captured.is_empty());
    assert_eq!(controller.snapshot().stone(Pos::new(1, 1)), Some(Stone::Black));
    assert_eq!(controller.turn(), Color::White);
}

// =============================================================================
// Win and reset
// =============================================================================

/// Ten captures in one move wins and fires exactly one GameOver.
#[test]
fn test_ten_captures_win() {
    let log = Arc::new(EventLog::new());
    let controller =
        GameController::with_game(ten_stone_capture(10)).with_observer(log.clone());

    let result = controller.submit_move(0, 10).unwrap();
    assert_eq!(result.captured.len(), 10);
    assert_eq!(result.captures[Color::Black], 10);
    assert_eq!(result.winner, Some(Color::Black));
    assert!(result.threshold_reached());

    assert_eq!(
        controller.phase(),
        Phase::GameOver {
            winner: Color::Black
        }
    );

    let events = log.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GameEvent::BoardUpdated(_)));
    assert_eq!(
        events[1],
        GameEvent::GameOver {
            winner: Color::Black
        }
    );

    // Further moves are refused and announce nothing.
    assert_eq!(
        controller.submit_move(5, 5).map(|r| r.placed),
        Err(GameError::GameFinished)
    );
    assert_eq!(game_over_count(&log.events()), 1);
}

/// Separate captures accumulate towards the threshold; GameOver fires once,
/// on the move that crosses it.
#[test]
fn test_cumulative_captures_win() {
    // Three lone White stones, each with one liberty left.
    let grid = Grid::parse(&[
        ".B...B.", //
        "BW...WB", //
        ".B...B.", //
        ".......", //
        ".B.....", //
        "BW.....", //
        ".B.....",
    ])
    .unwrap();
    let config = GameConfig::new()
        .with_starting_color(Color::Black)
        .with_win_threshold(3);
    let log = Arc::new(EventLog::new());
    let controller = GameController::with_game(Game::with_grid(config, grid).unwrap())
        .with_observer(log.clone());

    let black_moves = [(1, 2), (1, 4), (5, 2)];
    let white_moves = [(3, 3), (3, 4)];

    for (i, &(row, col)) in black_moves.iter().enumerate() {
        let result = controller.submit_move(row, col).unwrap();
        assert_eq!(result.captured.len(), 1);
        assert_eq!(result.captures[Color::Black], i as u32 + 1);

        if i + 1 < black_moves.len() {
            assert_eq!(result.winner, None);
            assert_eq!(game_over_count(&log.events()), 0);
            let (row, col) = white_moves[i];
            controller.submit_move(row, col).unwrap();
        } else {
            assert_eq!(result.winner, Some(Color::Black));
        }
    }

    assert_eq!(game_over_count(&log.events()), 1);
    assert_eq!(
        controller.phase(),
        Phase::GameOver {
            winner: Color::Black
        }
    );
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.captures[Color::Black], 3);
    assert_eq!(snapshot.captures[Color::White], 0);
    assert_eq!(snapshot.restricted.len(), 3);

    assert_eq!(
        controller.submit_move(6, 6).map(|r| r.placed),
        Err(GameError::GameFinished)
    );
    assert_eq!(game_over_count(&log.events()), 1);
}

/// Ten captures fall short of a threshold of eleven.
#[test]
fn test_below_threshold_keeps_playing() {
    let controller = GameController::with_game(ten_stone_capture(11));
    let result = controller.submit_move(0, 10).unwrap();
    assert_eq!(result.captures[Color::Black], 10);
    assert_eq!(result.winner, None);
    assert_eq!(controller.phase(), Phase::AwaitingMove);
    assert!(controller.submit_move(5, 5).is_ok());
}

/// Playing again clears everything and returns to the starting colour.
#[test]
fn test_play_again_resets_everything() {
    let log = Arc::new(EventLog::new());
    let controller =
        GameController::with_game(ten_stone_capture(10)).with_observer(log.clone());
    controller.submit_move(0, 10).unwrap();
    log.drain();

    controller.respond_to_game_over(true).unwrap();

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.stone_count(), 0);
    assert_eq!(snapshot.captures[Color::Black], 0);
    assert_eq!(snapshot.captures[Color::White], 0);
    assert!(snapshot.restricted.is_empty());
    assert_eq!(snapshot.winner, None);
    assert_eq!(snapshot.turn, Color::Black);
    assert_eq!(controller.phase(), Phase::AwaitingMove);

    let events = log.drain();
    assert_eq!(events.len(), 1);
    let GameEvent::BoardUpdated(update) = &events[0] else {
        panic!("expected a board update");
    };
    assert_eq!(update.kind, UpdateKind::Reset);
    // Ten Black in row 1 plus the capturing stone.
    assert_eq!(update.changed.len(), 11);
}

/// Declining ends the session; nothing is accepted afterwards.
#[test]
fn test_decline_terminates_session() {
    let controller = GameController::with_game(ten_stone_capture(10));
    controller.submit_move(0, 10).unwrap();
    controller.respond_to_game_over(false).unwrap();

    assert_eq!(controller.phase(), Phase::Terminated);
    assert!(controller.legal_moves().is_empty());
    assert_eq!(controller.reset(), Err(GameError::GameFinished));
}

/// Resetting a fresh board is a no-op apart from the notification.
#[test]
fn test_reset_on_empty_board() {
    let (controller, log) = controller_with_log(GameConfig::new());
    let before = controller.snapshot();
    controller.reset().unwrap();
    controller.reset().unwrap();
    assert_eq!(controller.snapshot(), before);

    let events = log.events();
    assert_eq!(events.len(), 2);
    for event in &events {
        let GameEvent::BoardUpdated(update) = event else {
            panic!("expected a board update");
        };
        assert!(update.changed.is_empty());
    }
}

// =============================================================================
// Rejections
// =============================================================================

/// Every out-of-bounds shape is rejected with the original coordinates.
#[test]
fn test_out_of_bounds_requests() {
    let controller = GameController::new(GameConfig::new()).unwrap();
    for (row, col) in [(-1, 0), (0, -1), (9, 0), (0, 9), (i32::MIN, i32::MAX)] {
        let err = controller.submit_move(row, col).unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { row, col, size: 9 });
        assert!(err.is_illegal_move());
    }
    assert_eq!(controller.snapshot().stone_count(), 0);
    assert_eq!(controller.turn(), Color::White);
}

/// Moving for the side not on turn is refused.
#[test]
fn test_wrong_turn() {
    let controller = GameController::new(GameConfig::new()).unwrap();
    assert_eq!(
        controller.submit_move_as(4, 4, Color::Black).unwrap_err(),
        GameError::WrongTurn {
            expected: Color::White,
            got: Color::Black
        }
    );
    assert!(controller.submit_move_as(4, 4, Color::White).is_ok());
}

// =============================================================================
// Serialization
// =============================================================================

/// Snapshots survive a JSON round trip intact.
#[test]
fn test_snapshot_json() {
    let (controller, _log) = controller_with_log(GameConfig::new().with_board_size(5));
    boxed_white_stone(&controller);
    controller.submit_move(2, 3).unwrap();

    let snapshot = controller.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

/// Events serialise with a readable tag.
#[test]
fn test_event_json_shape() {
    let event = GameEvent::GameOver {
        winner: Color::White,
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["event"], "game_over");
    assert_eq!(value["winner"], "white");
}
