//! Stone colours and per-colour data storage.
//!
//! ## Color
//!
//! The two sides of the game. White moves first unless the configuration
//! says otherwise.
//!
//! ## ColorMap
//!
//! Fixed two-slot storage indexed by `Color`, used for capture counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A side in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colours, Black first.
    ///
    /// Black precedes White wherever the engine has to pick an order
    /// (win checks in particular).
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Slot index used by `ColorMap`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Per-colour data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use komi_engine::core::{Color, ColorMap};
///
/// let mut captures: ColorMap<u32> = ColorMap::default();
/// captures[Color::Black] += 3;
///
/// assert_eq!(captures[Color::Black], 3);
/// assert_eq!(captures[Color::White], 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a map from explicit per-colour values.
    pub const fn new(black: T, white: T) -> Self {
        Self {
            data: [black, white],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(value.clone(), value)
    }

    /// Get a reference to a colour's data.
    #[must_use]
    pub fn get(&self, color: Color) -> &T {
        &self.data[color.index()]
    }

    /// Get a mutable reference to a colour's data.
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        &mut self.data[color.index()]
    }

    /// Iterate over (Color, &T) pairs, Black first.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        self.get(color)
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        self.get_mut(color)
    }
}
