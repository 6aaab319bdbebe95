//! Notifications sent to the display collaborator.
//!
//! Every successful move or reset produces one `BoardUpdate`; reaching the
//! win threshold additionally produces one `GameOver`. Updates carry a
//! sequence number assigned under the controller lock, so a consumer that
//! receives them out of order can drop stale ones.

use serde::{Deserialize, Serialize};

use crate::core::{Color, ColorMap, Pos, Stone};
use crate::rules::MoveResult;

/// A cell whose state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub pos: Pos,
    pub stone: Stone,
}

/// What caused a board update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UpdateKind {
    /// A stone was placed (and possibly captured others).
    Move { color: Color, placed: Pos },
    /// The board was reset.
    Reset,
}

/// Board state after one processed request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardUpdate {
    /// Position in the controller's update order, starting at 1.
    pub sequence: u64,
    pub kind: UpdateKind,
    /// Changed cells: the placed stone first, then captured cells (now
    /// empty). For a reset, every cell that held a stone.
    pub changed: Vec<CellChange>,
    /// Capture counters after the update.
    pub captures: ColorMap<u32>,
    /// Colour to move next.
    pub turn: Color,
}

impl BoardUpdate {
    pub(crate) fn from_move(sequence: u64, result: &MoveResult, turn: Color) -> Self {
        let mut changed = Vec::with_capacity(result.captured.len() + 1);
        changed.push(CellChange {
            pos: result.placed,
            stone: Stone::from(result.color),
        });
        changed.extend(result.captured.iter().map(|&pos| CellChange {
            pos,
            stone: Stone::Empty,
        }));

        Self {
            sequence,
            kind: UpdateKind::Move {
                color: result.color,
                placed: result.placed,
            },
            changed,
            captures: result.captures,
            turn,
        }
    }

    pub(crate) fn from_reset(sequence: u64, cleared: Vec<Pos>, turn: Color) -> Self {
        Self {
            sequence,
            kind: UpdateKind::Reset,
            changed: cleared
                .into_iter()
                .map(|pos| CellChange {
                    pos,
                    stone: Stone::Empty,
                })
                .collect(),
            captures: ColorMap::default(),
            turn,
        }
    }

    /// Cells emptied by captures in this update.
    pub fn captured(&self) -> impl Iterator<Item = Pos> + '_ {
        let captured: &[CellChange] = match self.kind {
            UpdateKind::Move { .. } => self.changed.get(1..).unwrap_or(&[]),
            UpdateKind::Reset => &[],
        };
        captured.iter().map(|c| c.pos)
    }
}

/// Event delivered to observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BoardUpdated(BoardUpdate),
    /// A win threshold was reached. The controller accepts no moves until
    /// it is told to play again.
    GameOver { winner: Color },
}
