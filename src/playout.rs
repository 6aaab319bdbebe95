//! Random legal-move playouts.
//!
//! Used by the CLI random mode, stress tests and benchmarks. Moves are
//! drawn uniformly from the legal cells with a seeded `GameRng`, so a seed
//! always replays the same game on a single thread.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::controller::GameController;
use crate::core::{Color, GameError, GameRng, Pos};
use crate::rules::Game;

/// How a playout ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoutSummary {
    /// Moves that were processed.
    pub moves: usize,
    /// Winner, if a threshold was reached.
    pub winner: Option<Color>,
}

/// A player that picks uniformly among legal cells.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// A player with an independent stream derived from this one.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            rng: self.rng.fork(),
        }
    }

    /// Pick a cell, `None` when there is nothing to pick from.
    pub fn choose(&mut self, legal: &[Pos]) -> Option<Pos> {
        self.rng.choose(legal).copied()
    }

    /// Play a single-threaded game until a winner, no legal cell, or
    /// `max_moves`.
    pub fn play_game(&mut self, game: &mut Game, max_moves: usize) -> Result<PlayoutSummary, GameError> {
        let mut moves = 0;
        while moves < max_moves {
            let Some(pos) = self.choose(&game.legal_moves()) else {
                break;
            };
            let color = game.turn();
            game.apply_move_at(pos, color)?;
            game.end_turn();
            moves += 1;
            if game.winner().is_some() {
                break;
            }
        }
        debug!(seed = self.rng.seed(), moves, winner = ?game.winner(), "playout finished");
        Ok(PlayoutSummary {
            moves,
            winner: game.winner(),
        })
    }

    /// Submit one random move through a controller.
    ///
    /// Other threads may take the chosen cell first; that rejection is
    /// returned as is.
    pub fn submit(&mut self, controller: &GameController) -> Option<Result<Pos, GameError>> {
        let pos = self.choose(&controller.legal_moves())?;
        let (row, col) = (to_coord(pos.row), to_coord(pos.col));
        Some(controller.submit_move(row, col).map(|r| r.placed))
    }
}

fn to_coord(v: usize) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}
