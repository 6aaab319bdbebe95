//! Move processing.
//!
//! `Game` owns the grid, the state and the configuration. Its
//! `apply_move` validates a placement, runs the capture scan and credits
//! the mover; it never flips the turn; `end_turn` does that. Keeping the two
//! apart lets the controller decide what happens between them.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::liberty::captured_by;
use super::snapshot::Snapshot;
use crate::core::{Color, ColorMap, GameConfig, GameError, GameState, Grid, Pos, Stone};

/// Outcome of one processed move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Colour that moved.
    pub color: Color,
    /// Where the stone went.
    pub placed: Pos,
    /// Cells emptied by this move, in scan order.
    pub captured: Vec<Pos>,
    /// Capture counters after the move.
    pub captures: ColorMap<u32>,
    /// Set when a win threshold is reached by this move.
    pub winner: Option<Color>,
}

impl MoveResult {
    #[must_use]
    pub fn threshold_reached(&self) -> bool {
        self.winner.is_some()
    }
}

/// Grid, state and configuration of one game.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    state: GameState,
}

impl Game {
    /// Create a game with an empty board.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.board_size),
            state: GameState::new(&config),
            config,
        })
    }

    /// Start from an existing position, with the configured starting colour
    /// to move. The grid size overrides `config.board_size`.
    pub fn with_grid(config: GameConfig, grid: Grid) -> Result<Self, GameError> {
        let config = config.with_board_size(grid.size());
        config.validate()?;
        Ok(Self {
            state: GameState::new(&config),
            config,
            grid,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.state.turn()
    }

    #[must_use]
    pub fn captures(&self, color: Color) -> u32 {
        self.state.captures(color)
    }

    /// Stone at external coordinates.
    pub fn stone_at(&self, row: i32, col: i32) -> Result<Stone, GameError> {
        Ok(self.grid.cell_at(row, col)?.stone())
    }

    #[must_use]
    pub fn is_restricted(&self, pos: Pos) -> bool {
        self.state.is_restricted(pos)
    }

    /// Winner once a threshold has been reached.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    /// Empty, unrestricted cells in row-major order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.winner().is_some() {
            return Vec::new();
        }
        self.grid
            .cells()
            .filter(|c| c.stone().is_empty() && !self.state.is_restricted(c.pos()))
            .map(|c| c.pos())
            .collect()
    }

    /// Check that `color` may play at `pos` without changing anything.
    pub fn check_move(&self, pos: Pos, color: Color) -> Result<(), GameError> {
        if !self.grid.contains(pos) {
            return Err(GameError::OutOfBounds {
                row: i32::try_from(pos.row).unwrap_or(i32::MAX),
                col: i32::try_from(pos.col).unwrap_or(i32::MAX),
                size: self.grid.size(),
            });
        }
        if self.winner().is_some() {
            return Err(GameError::GameFinished);
        }
        if color != self.state.turn() {
            return Err(GameError::WrongTurn {
                expected: self.state.turn(),
                got: color,
            });
        }
        if !self.grid.stone(pos).is_empty() {
            return Err(GameError::Occupied { pos });
        }
        if self.state.is_restricted(pos) {
            return Err(GameError::Restricted { pos });
        }
        Ok(())
    }

    /// Place a stone at external coordinates and resolve captures.
    pub fn apply_move(&mut self, row: i32, col: i32, color: Color) -> Result<MoveResult, GameError> {
        let pos = self.grid.pos(row, col)?;
        self.apply_move_at(pos, color)
    }

    /// Place a stone and resolve captures.
    ///
    /// Nothing is mutated when validation fails.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move_at(&mut self, pos: Pos, color: Color) -> Result<MoveResult, GameError> {
        self.check_move(pos, color)?;

        self.grid.set(pos, Stone::from(color));
        let captured = captured_by(&self.grid, pos, color);

        for &cell in &captured {
            self.grid.set(cell, Stone::Empty);
            self.state.restrict(cell);
        }
        let count = u32::try_from(captured.len()).unwrap_or(u32::MAX);
        self.state.add_captures(color, count);

        if !captured.is_empty() {
            debug!(count, captures = self.state.captures(color), "captured stones");
        }

        Ok(MoveResult {
            color,
            placed: pos,
            captured,
            captures: self.state.capture_counts(),
            winner: self.state.winner(),
        })
    }

    /// Hand the move to the other colour.
    pub fn end_turn(&mut self) {
        self.state.flip_turn();
    }

    /// Apply a move for the colour on turn and end the turn.
    pub fn play(&mut self, row: i32, col: i32) -> Result<MoveResult, GameError> {
        let color = self.state.turn();
        let result = self.apply_move(row, col, color)?;
        self.end_turn();
        Ok(result)
    }

    /// Empty the board, zero the counters, clear restrictions and restore
    /// the starting colour.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.state.reset(self.config.starting_color);
    }

    /// Consistent copy of the whole position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid, &self.state)
    }
}
