//! Serialised access to one game.
//!
//! `GameController` owns the `Game` behind a single mutex. A move request
//! runs validate → place → capture scan → score → turn flip entirely under
//! that lock, so no other move or reset can observe a half-applied move.
//! Callers block until the lock is free; a request whose cell became
//! invalid while it waited is rejected, not silently dropped.
//!
//! Events are collected under the lock and delivered after it is released.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use super::event::{BoardUpdate, GameEvent};
use super::observer::GameObserver;
use crate::core::{Color, GameConfig, GameError, Pos};
use crate::rules::{Game, MoveResult, Snapshot};

/// Controller phase.
///
/// Move processing itself happens inside the lock and is never observable
/// from outside, so it has no variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Accepting move requests.
    AwaitingMove,
    /// A threshold was reached; waiting for the play-again decision.
    GameOver { winner: Color },
    /// The consumer declined to play again.
    Terminated,
}

struct Inner {
    game: Game,
    phase: Phase,
    sequence: u64,
}

impl Inner {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

/// Thread-safe front door for move and reset requests.
pub struct GameController {
    inner: Mutex<Inner>,
    observers: Vec<Arc<dyn GameObserver>>,
}

impl GameController {
    /// Create a controller for a fresh game.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Ok(Self::with_game(Game::new(config)?))
    }

    /// Wrap an existing game.
    #[must_use]
    pub fn with_game(game: Game) -> Self {
        let phase = match game.winner() {
            Some(winner) => Phase::GameOver { winner },
            None => Phase::AwaitingMove,
        };
        Self {
            inner: Mutex::new(Inner {
                game,
                phase,
                sequence: 0,
            }),
            observers: Vec::new(),
        }
    }

    /// Register an observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn GameObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Submit a move for the colour on turn.
    #[instrument(skip(self))]
    pub fn submit_move(&self, row: i32, col: i32) -> Result<MoveResult, GameError> {
        self.process(row, col, None)
    }

    /// Submit a move on behalf of `color`; rejected when it is not that
    /// colour's turn.
    #[instrument(skip(self))]
    pub fn submit_move_as(&self, row: i32, col: i32, color: Color) -> Result<MoveResult, GameError> {
        self.process(row, col, Some(color))
    }

    fn process(&self, row: i32, col: i32, color: Option<Color>) -> Result<MoveResult, GameError> {
        let (result, events) = {
            let mut inner = self.lock();

            if inner.phase != Phase::AwaitingMove {
                warn!(phase = ?inner.phase, "move rejected, game is over");
                return Err(GameError::GameFinished);
            }

            let color = color.unwrap_or_else(|| inner.game.turn());
            let result = inner.game.apply_move(row, col, color).map_err(|err| {
                warn!(%err, "move rejected");
                err
            })?;
            inner.game.end_turn();

            let sequence = inner.next_sequence();
            let mut events = vec![GameEvent::BoardUpdated(BoardUpdate::from_move(
                sequence,
                &result,
                inner.game.turn(),
            ))];
            if let Some(winner) = result.winner {
                inner.phase = Phase::GameOver { winner };
                events.push(GameEvent::GameOver { winner });
            }

            info!(
                %color,
                placed = %result.placed,
                captured = result.captured.len(),
                black = result.captures[Color::Black],
                white = result.captures[Color::White],
                "move processed"
            );
            if let Some(winner) = result.winner {
                info!(%winner, "game over");
            }

            (result, events)
        };

        self.notify(&events);
        Ok(result)
    }

    /// Empty the board, zero the counters, clear restrictions and restore
    /// the starting colour. Not available once terminated.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), GameError> {
        let event = {
            let mut inner = self.lock();
            if inner.phase == Phase::Terminated {
                warn!("reset rejected, controller terminated");
                return Err(GameError::GameFinished);
            }

            let cleared: Vec<Pos> = inner
                .game
                .grid()
                .cells()
                .filter(|c| !c.stone().is_empty())
                .map(|c| c.pos())
                .collect();
            inner.game.reset();
            inner.phase = Phase::AwaitingMove;

            let sequence = inner.next_sequence();
            info!(cleared = cleared.len(), "board reset");
            GameEvent::BoardUpdated(BoardUpdate::from_reset(sequence, cleared, inner.game.turn()))
        };

        self.notify(std::slice::from_ref(&event));
        Ok(())
    }

    /// Answer a `GameOver`: play again resets, anything else terminates.
    pub fn respond_to_game_over(&self, play_again: bool) -> Result<(), GameError> {
        if play_again {
            self.reset()
        } else {
            self.terminate();
            Ok(())
        }
    }

    /// Stop accepting requests for good.
    #[instrument(skip(self))]
    pub fn terminate(&self) {
        let mut inner = self.lock();
        inner.phase = Phase::Terminated;
        info!("controller terminated");
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.lock().game.turn()
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        self.lock().game.config().clone()
    }

    /// Legal cells for the colour on turn; empty unless awaiting a move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Pos> {
        let inner = self.lock();
        if inner.phase != Phase::AwaitingMove {
            return Vec::new();
        }
        inner.game.legal_moves()
    }

    /// Consistent copy of the whole position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().game.snapshot()
    }

    // The guarded game is only mutated after validation succeeds, so a
    // panic elsewhere cannot leave it half-written.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, events: &[GameEvent]) {
        for event in events {
            for observer in &self.observers {
                observer.on_event(event);
            }
        }
    }
}
