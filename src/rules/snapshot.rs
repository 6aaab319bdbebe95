//! Full-position snapshots for consumers that repaint everything.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, GameState, Grid, Pos, Stone};

/// A consistent copy of the board and counters taken at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Board dimension.
    pub size: usize,
    /// Row-major cell states, `size * size` entries.
    pub stones: Vec<Stone>,
    /// Colour to move.
    pub turn: Color,
    /// Capture counters.
    pub captures: ColorMap<u32>,
    /// Restricted cells, row-major.
    pub restricted: Vec<Pos>,
    /// Winner once a threshold has been reached.
    pub winner: Option<Color>,
}

impl Snapshot {
    pub(crate) fn capture(grid: &Grid, state: &GameState) -> Self {
        Self {
            size: grid.size(),
            stones: grid.cells().map(|c| c.stone()).collect(),
            turn: state.turn(),
            captures: state.capture_counts(),
            restricted: state.restricted(),
            winner: state.winner(),
        }
    }

    /// Stone at a position, `None` off the board.
    #[must_use]
    pub fn stone(&self, pos: Pos) -> Option<Stone> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        self.stones.get(pos.row * self.size + pos.col).copied()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.stones.iter().filter(|s| !s.is_empty()).count()
    }
}
