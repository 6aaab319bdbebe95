//! Engine error types.
//!
//! Every rejected request maps onto one `GameError` variant. Variants that
//! reject a move without touching state are IllegalMove at the public
//! boundary (see [`GameError::is_illegal_move`]).

use derive_more::{Display, Error};

use super::color::Color;
use super::grid::Pos;

/// Errors produced by the grid, the move processor and the controller.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum GameError {
    /// Coordinates outside `[0, size)`.
    #[display("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    /// Target cell already holds a stone.
    #[display("{pos} is occupied")]
    Occupied { pos: Pos },

    /// Target cell was vacated by a capture and may not be replayed.
    #[display("{pos} is restricted")]
    Restricted { pos: Pos },

    /// Move submitted by the side not on turn.
    #[display("{got} moved but it is {expected}'s turn")]
    WrongTurn { expected: Color, got: Color },

    /// The game is over (waiting for a play-again decision, or terminated).
    #[display("the game is over")]
    GameFinished,

    /// Configuration rejected by validation or parsing.
    #[display("invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl GameError {
    /// Whether this error rejects a move request without mutating anything.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        !matches!(self, GameError::InvalidConfig { .. })
    }
}
