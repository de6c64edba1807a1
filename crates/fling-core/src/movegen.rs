//! Legal move generation.
//!
//! A piece can only be flung at its nearest neighbour on a row or column, and
//! only if there is at least one empty cell between them to travel through.

use crate::board::{Axis, Board, Move, Piece};

/// Nearest pieces to `piece` along its row and column.
///
/// Returned in the order row-predecessor, row-successor, col-predecessor,
/// col-successor, skipping any that do not exist.
pub fn neighbors(board: &Board, piece: Piece) -> Vec<Piece> {
    let mut found = Vec::with_capacity(4);

    for axis in [Axis::Row, Axis::Col] {
        let line = board.line(axis, piece);
        let Some(i) = line.iter().position(|&p| p == piece) else {
            continue;
        };
        if i > 0 {
            found.push(line[i - 1]);
        }
        if let Some(&next) = line.get(i + 1) {
            found.push(next);
        }
    }

    found
}

/// All legal flings on `board`.
///
/// Pieces are visited in board order and each piece's neighbours in
/// [`neighbors`] order. The search takes the first solution it finds, so this
/// order decides which solution that is.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();

    for &piece in board.pieces() {
        for other in neighbors(board, piece) {
            let mv = Move::new(piece, other);
            // Adjacent pieces have nowhere to slide
            if mv.gap().is_some_and(|gap| gap > 1) {
                moves.push(mv);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GridSize;

    fn board(cells: &[(usize, usize)]) -> Board {
        let pieces = cells.iter().map(|&(r, c)| Piece::new(r, c)).collect();
        Board::new(GridSize::default(), pieces).unwrap()
    }

    fn mv(a: (usize, usize), b: (usize, usize)) -> Move {
        Move::new(Piece::new(a.0, a.1), Piece::new(b.0, b.1))
    }

    #[test]
    fn test_both_directions_generated() {
        let moves = legal_moves(&board(&[(0, 0), (0, 5)]));
        assert_eq!(moves, vec![mv((0, 0), (0, 5)), mv((0, 5), (0, 0))]);
    }

    #[test]
    fn test_unaligned_pieces_have_no_moves() {
        assert!(legal_moves(&board(&[(0, 0), (3, 4)])).is_empty());
    }

    #[test]
    fn test_adjacent_pieces_cannot_move() {
        assert!(legal_moves(&board(&[(2, 2), (2, 3)])).is_empty());
        assert!(legal_moves(&board(&[(4, 1), (5, 1)])).is_empty());

        let moves = legal_moves(&board(&[(0, 0), (0, 1), (0, 4)]));
        assert_eq!(moves, vec![mv((0, 1), (0, 4)), mv((0, 4), (0, 1))]);
        for m in &moves {
            assert!(m.gap().unwrap() > 1);
        }
    }

    #[test]
    fn test_only_nearest_neighbour_is_a_target() {
        let moves = legal_moves(&board(&[(0, 0), (0, 2), (0, 4)]));
        assert_eq!(
            moves,
            vec![
                mv((0, 0), (0, 2)),
                mv((0, 2), (0, 0)),
                mv((0, 2), (0, 4)),
                mv((0, 4), (0, 2)),
            ]
        );
    }

    #[test]
    fn test_enumeration_order() {
        let moves = legal_moves(&board(&[(0, 0), (0, 3), (3, 0)]));
        assert_eq!(
            moves,
            vec![
                mv((0, 0), (0, 3)),
                mv((0, 0), (3, 0)),
                mv((0, 3), (0, 0)),
                mv((3, 0), (0, 0)),
            ]
        );
    }

    #[test]
    fn test_neighbors_order() {
        let b = board(&[(3, 3), (3, 0), (3, 6), (0, 3), (7, 3), (3, 1)]);
        assert_eq!(
            neighbors(&b, Piece::new(3, 3)),
            vec![
                Piece::new(3, 1),
                Piece::new(3, 6),
                Piece::new(0, 3),
                Piece::new(7, 3),
            ]
        );
        assert_eq!(neighbors(&b, Piece::new(3, 0)), vec![Piece::new(3, 1)]);
    }
}
