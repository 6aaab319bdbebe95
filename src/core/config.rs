//! Game configuration.
//!
//! Everything is fixed at construction time:
//! - board size (default 9)
//! - capture count that wins the game (default 10)
//! - colour that moves first (default White)
//!
//! Configurations can be built in code or loaded from TOML; missing keys
//! fall back to the defaults.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::error::GameError;

/// Default board dimension.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Default number of captured stones that wins.
pub const DEFAULT_WIN_THRESHOLD: u32 = 10;

/// Largest supported board dimension.
pub const MAX_BOARD_SIZE: usize = 255;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Board dimension N (the board is N×N).
    pub board_size: usize,

    /// Captures needed to win.
    pub win_threshold: u32,

    /// Colour that moves first after construction and after every reset.
    pub starting_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            starting_color: Color::White,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board dimension.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the winning capture count.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: u32) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Set the colour that moves first.
    #[must_use]
    pub fn with_starting_color(mut self, color: Color) -> Self {
        self.starting_color = color;
        self
    }

    /// Check the configuration can drive a game.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig {
                reason: format!(
                    "board_size must be between 1 and {MAX_BOARD_SIZE}, got {}",
                    self.board_size
                ),
            });
        }
        if self.win_threshold == 0 {
            return Err(GameError::InvalidConfig {
                reason: "win_threshold must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// ```
    /// use komi_engine::core::{Color, GameConfig};
    ///
    /// let config = GameConfig::from_toml_str("board_size = 5\nstarting_color = \"black\"").unwrap();
    /// assert_eq!(config.board_size, 5);
    /// assert_eq!(config.win_threshold, 10);
    /// assert_eq!(config.starting_color, Color::Black);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self, GameError> {
        let config: Self = toml::from_str(text).map_err(|e| GameError::InvalidConfig {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
