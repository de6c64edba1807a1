//! Board model: pieces on a grid, the fling move, and the canonical encoding.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A piece, identified only by the cell it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub row: usize,
    pub col: usize,
}

impl Piece {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Check whether a piece lies inside the grid
    pub fn contains(&self, piece: Piece) -> bool {
        piece.row < self.rows && piece.col < self.cols
    }

    /// Compact integer label of a cell (row-major index), used for display only
    pub fn label(&self, piece: Piece) -> usize {
        piece.row * self.cols + piece.col
    }
}

impl Default for GridSize {
    /// The classic Fling board: 8 rows of 7 cells.
    fn default() -> Self {
        Self::new(8, 7)
    }
}

/// The line two pieces share.
///
/// `Row` means the pieces sit on the same row, so a fling travels along the
/// column coordinate; `Col` is the converse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Col,
}

impl Axis {
    /// The shared axis of two distinct pieces, if they are aligned at all
    pub fn between(a: Piece, b: Piece) -> Option<Axis> {
        if a == b {
            None
        } else if a.row == b.row {
            Some(Axis::Row)
        } else if a.col == b.col {
            Some(Axis::Col)
        } else {
            None
        }
    }

    /// Coordinate that stays constant along the line
    #[inline]
    pub fn fixed(self, piece: Piece) -> usize {
        match self {
            Axis::Row => piece.row,
            Axis::Col => piece.col,
        }
    }

    /// Coordinate that changes when a piece slides along the line
    #[inline]
    pub fn moving(self, piece: Piece) -> usize {
        match self {
            Axis::Row => piece.col,
            Axis::Col => piece.row,
        }
    }

    /// The same piece slid to `value` along the line
    #[inline]
    pub fn with_moving(self, piece: Piece, value: usize) -> Piece {
        match self {
            Axis::Row => Piece::new(piece.row, value),
            Axis::Col => Piece::new(value, piece.col),
        }
    }
}

/// Errors raised when a set of pieces does not form a valid board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("piece {piece} lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        piece: Piece,
        rows: usize,
        cols: usize,
    },

    #[error("two pieces occupy {0}")]
    DuplicatePiece(Piece),

    #[error("cannot encode board: {0}")]
    Encoding(String),
}

/// A set of pieces on a grid.
///
/// Pieces keep the order they were given in; that order drives move
/// enumeration. Equality ignores it: two boards are equal when they have the
/// same grid and the same occupied cells.
#[derive(Debug, Clone)]
pub struct Board {
    size: GridSize,
    pieces: Vec<Piece>,
}

impl Board {
    /// Build a board, rejecting pieces outside the grid or sharing a cell
    pub fn new(size: GridSize, pieces: Vec<Piece>) -> Result<Self, BoardError> {
        let board = Self { size, pieces };
        board.check_invariants()?;
        Ok(board)
    }

    /// Same grid, different pieces. Callers are responsible for validating.
    pub(crate) fn with_pieces(&self, pieces: Vec<Piece>) -> Self {
        Self {
            size: self.size,
            pieces,
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Pieces in iteration order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn contains(&self, piece: Piece) -> bool {
        self.pieces.contains(&piece)
    }

    /// All pieces on the same line as `through`, ordered along `axis`
    pub fn line(&self, axis: Axis, through: Piece) -> Vec<Piece> {
        collision_line(&self.pieces, axis, through)
    }

    /// Pieces sorted by (row, col)
    pub fn canonical(&self) -> Vec<Piece> {
        let mut pieces = self.pieces.clone();
        pieces.sort_unstable();
        pieces
    }

    /// Compact JSON of the canonical form, e.g. `[{"row":0,"col":0}]`.
    pub fn canonical_key(&self) -> Result<String, BoardError> {
        serde_json::to_string(&self.canonical()).map_err(|e| BoardError::Encoding(e.to_string()))
    }

    /// Re-check that every piece is on the grid and no cell is shared
    pub fn check_invariants(&self) -> Result<(), BoardError> {
        if let Some(&piece) = self.pieces.iter().find(|&&p| !self.size.contains(p)) {
            return Err(BoardError::OutOfBounds {
                piece,
                rows: self.size.rows,
                cols: self.size.cols,
            });
        }

        let sorted = self.canonical();
        if let Some(pair) = sorted.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(BoardError::DuplicatePiece(pair[0]));
        }

        Ok(())
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.canonical() == other.canonical()
    }
}

impl Eq for Board {}

/// Pieces of `pieces` sharing `through`'s fixed coordinate, sorted along the line
pub(crate) fn collision_line(pieces: &[Piece], axis: Axis, through: Piece) -> Vec<Piece> {
    let fixed = axis.fixed(through);
    let mut line: Vec<Piece> = pieces
        .iter()
        .copied()
        .filter(|&p| axis.fixed(p) == fixed)
        .collect();
    line.sort_unstable_by_key(|&p| axis.moving(p));
    line
}

/// Fling the piece at `source` toward the piece at `destination`.
///
/// Encoded as the two-element sequence `[source, destination]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Piece; 2]", into = "[Piece; 2]")]
pub struct Move {
    pub source: Piece,
    pub destination: Piece,
}

impl Move {
    pub const fn new(source: Piece, destination: Piece) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Axis shared by the two ends, if any
    pub fn axis(&self) -> Option<Axis> {
        Axis::between(self.source, self.destination)
    }

    /// Distance between the two ends along their shared axis
    pub fn gap(&self) -> Option<usize> {
        self.axis()
            .map(|axis| axis.moving(self.source).abs_diff(axis.moving(self.destination)))
    }
}

impl From<[Piece; 2]> for Move {
    fn from([source, destination]: [Piece; 2]) -> Self {
        Self::new(source, destination)
    }
}

impl From<Move> for [Piece; 2] {
    fn from(mv: Move) -> Self {
        [mv.source, mv.destination]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}
