//! Core engine types: colours, grid, configuration, state, errors, RNG.

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod state;

pub use color::{Color, ColorMap};
pub use config::{GameConfig, DEFAULT_BOARD_SIZE, DEFAULT_WIN_THRESHOLD, MAX_BOARD_SIZE};
pub use error::GameError;
pub use grid::{Cell, Grid, Neighbors, Pos, Stone};
pub use rng::GameRng;
pub use state::GameState;
