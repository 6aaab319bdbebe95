//! Board grid: positions, cell states and bounds-checked access.
//!
//! The grid is a single row-major `Vec<Cell>`. Cells never point at each
//! other; neighbours are computed from indices.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::color::Color;
use super::error::GameError;

/// Orthogonal directions in scan order: down, up, right, left.
///
/// Capture results depend on this order only through the order of the
/// captured list, so it is fixed to keep runs reproducible.
const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Neighbour list; never more than four entries.
pub type Neighbors = SmallVec<[Pos; 4]>;

/// A cell coordinate known to be on some board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    #[default]
    Empty,
    Black,
    White,
}

impl Stone {
    /// Colour of the stone, `None` for an empty cell.
    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Stone::Empty => None,
            Stone::Black => Some(Color::Black),
            Stone::White => Some(Color::White),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Stone::Empty)
    }

    fn symbol(self) -> char {
        match self {
            Stone::Empty => '.',
            Stone::Black => 'B',
            Stone::White => 'W',
        }
    }
}

impl From<Color> for Stone {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Stone::Black,
            Color::White => Stone::White,
        }
    }
}

/// One grid cell. Its position always equals its slot in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pos: Pos,
    stone: Stone,
}

impl Cell {
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.pos.row
    }

    #[must_use]
    pub fn col(&self) -> usize {
        self.pos.col
    }

    #[must_use]
    pub fn stone(&self) -> Stone {
        self.stone
    }
}

/// Square N×N grid of cells, fixed size after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Panics if `size` is zero; configurations are validated before a grid
    /// is built.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "Board size must be at least 1");

        let cells = (0..size * size)
            .map(|i| Cell {
                pos: Pos::new(i / size, i % size),
                stone: Stone::Empty,
            })
            .collect();

        Self { size, cells }
    }

    /// Build a grid from text rows: `.` empty, `B` black, `W` white.
    ///
    /// ```
    /// use komi_engine::core::{Grid, Pos, Stone};
    ///
    /// let grid = Grid::parse(&[".B.", "BWB", ".B."]).unwrap();
    /// assert_eq!(grid.stone(Pos::new(1, 1)), Stone::White);
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self, GameError> {
        let size = rows.len();
        if size == 0 {
            return Err(GameError::InvalidConfig {
                reason: "diagram has no rows".into(),
            });
        }

        let mut grid = Self::new(size);
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != size {
                return Err(GameError::InvalidConfig {
                    reason: format!("diagram row {row} has {} cells, expected {size}", symbols.len()),
                });
            }
            for (col, symbol) in symbols.into_iter().enumerate() {
                let stone = match symbol {
                    '.' => Stone::Empty,
                    'B' => Stone::Black,
                    'W' => Stone::White,
                    other => {
                        return Err(GameError::InvalidConfig {
                            reason: format!("unknown diagram symbol {other:?}"),
                        })
                    }
                };
                grid.set(Pos::new(row, col), stone);
            }
        }

        Ok(grid)
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `pos` lies on this grid.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Convert signed external coordinates into a position on this grid.
    pub fn pos(&self, row: i32, col: i32) -> Result<Pos, GameError> {
        let in_range = |v: i32| v >= 0 && (v as usize) < self.size;
        if in_range(row) && in_range(col) {
            Ok(Pos::new(row as usize, col as usize))
        } else {
            Err(GameError::OutOfBounds {
                row,
                col,
                size: self.size,
            })
        }
    }

    /// Bounds-checked cell lookup.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, GameError> {
        let pos = self.pos(row, col)?;
        Ok(&self.cells[self.index(pos)])
    }

    /// Stone at an in-bounds position.
    ///
    /// Out-of-bounds positions are a caller bug and panic.
    #[inline]
    #[must_use]
    pub fn stone(&self, pos: Pos) -> Stone {
        self.cells[self.index(pos)].stone
    }

    /// In-bounds orthogonal neighbours in the fixed order down, up, right, left.
    #[must_use]
    pub fn neighbors(&self, pos: Pos) -> Neighbors {
        let mut out = Neighbors::new();
        for (dr, dc) in DIRECTIONS {
            let row = pos.row as i64 + i64::from(dr);
            let col = pos.col as i64 + i64::from(dc);
            if row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size {
                out.push(Pos::new(row as usize, col as usize));
            }
        }
        out
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.stone.is_empty()).count()
    }

    pub(crate) fn set(&mut self, pos: Pos, stone: Stone) {
        let idx = self.index(pos);
        self.cells[idx].stone = stone;
    }

    /// Empty every cell.
    pub(crate) fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.stone = Stone::Empty;
        }
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        assert!(self.contains(pos), "{pos} is outside the {0}x{0} board", self.size);
        pos.row * self.size + pos.col
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.size) {
            let line: String = row.iter().map(|c| c.stone.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
