//! Connectivity analysis: does a group still have a liberty?
//!
//! A group is a maximal set of same-colour stones joined orthogonally. It
//! is surrounded when no member touches an empty cell. Off-board edges and
//! opposing stones never count as liberties.
//!
//! The traversal is iterative (explicit stack), so group size is bounded by
//! the board and not by the call stack.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::core::{Color, Grid, Pos, Stone};

/// Outcome of one connectivity analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surround {
    /// True when the group has no liberty.
    pub surrounded: bool,
    /// Members discovered, in traversal order. Complete only when
    /// `surrounded` is true; a safe verdict exits early.
    pub group: Vec<Pos>,
}

impl Surround {
    fn safe(group: Vec<Pos>) -> Self {
        Self {
            surrounded: false,
            group,
        }
    }
}

/// Analyse the group containing `start`.
///
/// `visited` is shared by every analysis made for one move:
/// - a `start` already in `visited` belongs to a group analysed earlier in
///   the move and is reported safe with an empty group, so nothing is
///   counted twice;
/// - reaching a same-colour stone that an earlier analysis visited means
///   this is the same group that analysis found safe.
///
/// An empty `start` is its own liberty and is reported safe.
pub fn is_surrounded(grid: &Grid, start: Pos, visited: &mut FxHashSet<Pos>) -> Surround {
    let Some(color) = grid.stone(start).color() else {
        return Surround::safe(Vec::new());
    };
    if !visited.insert(start) {
        return Surround::safe(Vec::new());
    }

    let mut members: FxHashSet<Pos> = FxHashSet::default();
    members.insert(start);
    let mut group = vec![start];
    let mut stack = vec![start];

    while let Some(pos) = stack.pop() {
        for next in grid.neighbors(pos) {
            match grid.stone(next).color() {
                None => {
                    trace!(%start, liberty = %next, "group has a liberty");
                    return Surround::safe(group);
                }
                Some(c) if c == color => {
                    if members.contains(&next) {
                        continue;
                    }
                    if !visited.insert(next) {
                        // Seen by an earlier, early-exiting analysis.
                        return Surround::safe(group);
                    }
                    members.insert(next);
                    group.push(next);
                    stack.push(next);
                }
                Some(_) => {}
            }
        }
    }

    Surround {
        surrounded: true,
        group,
    }
}

/// Opposing stones captured by a stone of `mover` standing at `placed`.
///
/// Runs one analysis per opposing neighbour (down, up, right, left) with a
/// shared visited set and unions the surrounded groups. The placed stone
/// itself is never part of the result.
#[must_use]
pub fn captured_by(grid: &Grid, placed: Pos, mover: Color) -> Vec<Pos> {
    let opponent = Stone::from(mover.opponent());
    let mut visited = FxHashSet::default();
    let mut captured = Vec::new();

    for neighbor in grid.neighbors(placed) {
        if grid.stone(neighbor) != opponent {
            continue;
        }
        let result = is_surrounded(grid, neighbor, &mut visited);
        if result.surrounded {
            captured.extend(result.group);
        }
    }

    captured
}
