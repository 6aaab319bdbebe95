//! # komi-engine
//!
//! Rule engine for a capture-scoring Go variant on a square N×N board.
//!
//! Players alternate placing stones. An opposing group left without an
//! empty orthogonal neighbour is captured: its stones are removed, the
//! mover scores one point per stone, and the vacated cells may not be
//! played again until the board is reset. The first side to reach the win
//! threshold (10 captures by default) wins.
//!
//! ## Design Principles
//!
//! 1. **One lock, whole moves**: `GameController` guards grid, counters and
//!    restricted cells with one mutex; a move is applied entirely or not at
//!    all, and notifications go out after the lock is released.
//!
//! 2. **Pure capture logic**: `rules::Game` can be driven directly from a
//!    single thread, without a controller, for tests and playouts.
//!
//! 3. **Index addressing**: cells live in one row-major vector and never
//!    reference each other.
//!
//! ## Modules
//!
//! - `core`: colours, grid, configuration, state, errors, RNG
//! - `rules`: connectivity analysis, move processing, snapshots
//! - `controller`: serialised requests, phases, events, observers
//! - `playout`: random legal-move driver
//!
//! ## Example
//!
//! ```
//! use komi_engine::{Color, GameConfig, GameController};
//!
//! let controller = GameController::new(GameConfig::new().with_board_size(5)).unwrap();
//! controller.submit_move(2, 2).unwrap(); // White moves first by default
//! for (row, col) in [(1, 2), (0, 0), (3, 2), (0, 1), (2, 1), (0, 3)] {
//!     controller.submit_move(row, col).unwrap();
//! }
//! let result = controller.submit_move(2, 3).unwrap(); // Black closes the box
//! assert_eq!(result.captured.len(), 1);
//! assert_eq!(result.captures[Color::Black], 1);
//! ```

pub mod controller;
pub mod core;
pub mod playout;
pub mod rules;

pub use crate::core::{
    Cell, Color, ColorMap, GameConfig, GameError, GameRng, GameState, Grid, Pos, Stone,
};

pub use crate::rules::{captured_by, is_surrounded, Game, MoveResult, Snapshot, Surround};

pub use crate::controller::{
    BoardUpdate, CellChange, EventLog, GameController, GameEvent, GameObserver, Phase,
    UpdateKind,
};

pub use crate::playout::{PlayoutSummary, RandomPlayer};
