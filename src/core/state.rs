//! Game state: turn, capture counters and restricted cells.
//!
//! The restricted set uses an `im` persistent set so snapshots handed to
//! observers share structure with the live state.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use super::color::{Color, ColorMap};
use super::config::GameConfig;
use super::grid::Pos;

/// Mutable per-game bookkeeping that lives next to the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Colour to move next.
    turn: Color,

    /// Stones captured by each colour. Only ever increases until reset.
    captures: ColorMap<u32>,

    /// Cells vacated by captures. Entries stay until reset.
    restricted: ImHashSet<Pos>,

    /// Captures needed to win.
    win_threshold: u32,
}

impl GameState {
    /// Fresh state for a configuration.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            turn: config.starting_color,
            captures: ColorMap::with_value(0),
            restricted: ImHashSet::new(),
            win_threshold: config.win_threshold,
        }
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Stones captured by `color`.
    #[must_use]
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[color]
    }

    #[must_use]
    pub fn capture_counts(&self) -> ColorMap<u32> {
        self.captures
    }

    #[must_use]
    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    #[must_use]
    pub fn is_restricted(&self, pos: Pos) -> bool {
        self.restricted.contains(&pos)
    }

    /// Restricted cells in row-major order.
    #[must_use]
    pub fn restricted(&self) -> Vec<Pos> {
        let mut cells: Vec<Pos> = self.restricted.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// The winner if a threshold has been reached. Black is checked first.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        let threshold = self.win_threshold();
        self.captures
            .iter()
            .find(|&(_, &count)| count >= threshold)
            .map(|(color, _)| color)
    }

    pub(crate) fn flip_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    pub(crate) fn add_captures(&mut self, color: Color, count: u32) {
        self.captures[color] = self.captures[color].saturating_add(count);
    }

    pub(crate) fn restrict(&mut self, pos: Pos) {
        self.restricted.insert(pos);
    }

    /// Back to the configured starting values.
    pub(crate) fn reset(&mut self, starting_color: Color) {
        self.turn = starting_color;
        self.captures = ColorMap::with_value(0);
        self.restricted.clear();
    }
}
