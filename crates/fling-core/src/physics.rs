//! Collision physics: what a fling does to a board.
//!
//! The flung piece slides until it stops in front of its target. If the target
//! is the last piece on the line in the direction of travel it is knocked off
//! the board. Otherwise the target takes the impact and is flung in turn at the
//! next piece along, and so on down the line.

use crate::board::{collision_line, Axis, Board, BoardError, Move, Piece};
use thiserror::Error;

/// A move that cannot be applied to the board it was given
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlingError {
    #[error("no piece at {0}")]
    MissingPiece(Piece),

    #[error("{0} is not along a row or column")]
    NotAligned(Move),

    /// The resulting board broke a board invariant. Legal moves never do this.
    #[error("fling produced an invalid board: {0}")]
    Invariant(#[from] BoardError),
}

/// Apply `mv` to `board`, returning the new board.
///
/// `board` is never modified. The result has exactly one piece fewer; the
/// remaining pieces keep their order, a relocated piece keeping its slot.
pub fn apply(mv: &Move, board: &Board) -> Result<Board, FlingError> {
    let mut pieces = board.pieces().to_vec();
    let mut source = mv.source;
    let mut destination = mv.destination;

    loop {
        let axis = Axis::between(source, destination)
            .ok_or(FlingError::NotAligned(Move::new(source, destination)))?;
        let source_idx = slot(&pieces, source)?;
        let destination_idx = slot(&pieces, destination)?;

        // Line as it stands before this strike
        let line = collision_line(&pieces, axis, source);
        let at = line
            .iter()
            .position(|&p| p == destination)
            .ok_or(FlingError::MissingPiece(destination))?;

        let from = axis.moving(source);
        let to = axis.moving(destination);
        let forward = from < to;

        if from.abs_diff(to) != 1 {
            let landing = if forward { to - 1 } else { to + 1 };
            pieces[source_idx] = axis.with_moving(source, landing);
        }

        let beyond = if forward {
            line.get(at + 1).copied()
        } else {
            at.checked_sub(1).map(|i| line[i])
        };

        match beyond {
            Some(next) => {
                source = destination;
                destination = next;
            }
            None => {
                pieces.remove(destination_idx);
                break;
            }
        }
    }

    let result = board.with_pieces(pieces);
    debug_assert_eq!(result.len() + 1, board.len());
    result.check_invariants()?;
    Ok(result)
}

fn slot(pieces: &[Piece], piece: Piece) -> Result<usize, FlingError> {
    pieces
        .iter()
        .position(|&p| p == piece)
        .ok_or(FlingError::MissingPiece(piece))
}
