//! Puzzle layouts: the built-in board and TOML puzzle files.
//!
//! ```toml
//! rows = 8
//! cols = 7
//! pieces = [
//!     { row = 0, col = 0 },
//!     { row = 0, col = 5 },
//! ]
//! ```

use fling_core::{Board, BoardError, GridSize, Piece};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading a puzzle file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid puzzle: {0}")]
    Board(#[from] BoardError),
}

/// A puzzle layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    pub pieces: Vec<Piece>,
}

fn default_rows() -> usize {
    GridSize::default().rows
}

fn default_cols() -> usize {
    GridSize::default().cols
}

impl Default for PuzzleConfig {
    /// Thirteen pieces on the standard 8x7 grid:
    ///
    /// ```text
    ///      0    1    2    3    4    5    6
    /// 0 |  0 |    |    |    |    |  5 |    |
    /// 1 |    |    |    |    |    |    |    |
    /// 2 |    |    |    |    |    |    |    |
    /// 3 |    |    |    |    |    | 26 |    |
    /// 4 |    |    |    | 31 | 32 |    |    |
    /// 5 |    | 36 |    |    | 39 |    | 41 |
    /// 6 |    | 43 | 44 |    |    |    |    |
    /// 7 | 49 | 50 | 51 |    |    |    |    |
    /// ```
    fn default() -> Self {
        let cells = [
            (0, 0),
            (0, 5),
            (3, 5),
            (4, 3),
            (4, 4),
            (5, 1),
            (5, 4),
            (5, 6),
            (6, 1),
            (6, 2),
            (7, 0),
            (7, 1),
            (7, 2),
        ];
        Self {
            rows: default_rows(),
            cols: default_cols(),
            pieces: cells.iter().map(|&(r, c)| Piece::new(r, c)).collect(),
        }
    }
}

impl PuzzleConfig {
    /// Loads a puzzle from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses a puzzle from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.cols)
    }

    /// Validate the layout and build the initial board
    pub fn into_board(self) -> Result<Board, ConfigError> {
        Ok(Board::new(self.size(), self.pieces)?)
    }
}
