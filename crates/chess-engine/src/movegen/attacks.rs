//! Attack detection on the grid.

use crate::Board;
use chess_core::{Color, PieceKind, Square};

/// Knight jumps as (row, column) deltas.
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns true if any piece of `by` attacks `sq`.
///
/// Looks outward from `sq` for each kind of attacker. Pawns attack their
/// forward diagonals whether or not those squares are occupied.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // Pawn attacks: an attacking pawn sits one row behind, from its own
    // point of view.
    let back = -by.pawn_direction();
    for side in [-1, 1] {
        if let Some(from) = sq.offset(back, side) {
            if board.get(from).is_some_and(|p| p.is(by, PieceKind::Pawn)) {
                return true;
            }
        }
    }

    // Knight attacks
    if attacked_by_step(board, sq, by, &KNIGHT_OFFSETS, PieceKind::Knight) {
        return true;
    }

    // King attacks
    if attacked_by_step(board, sq, by, &KING_OFFSETS, PieceKind::King) {
        return true;
    }

    // Bishop/Queen attacks (diagonal)
    if attacked_by_ray(board, sq, by, &BISHOP_DIRECTIONS, PieceKind::Bishop) {
        return true;
    }

    // Rook/Queen attacks (orthogonal)
    attacked_by_ray(board, sq, by, &ROOK_DIRECTIONS, PieceKind::Rook)
}

fn attacked_by_step(
    board: &Board,
    sq: Square,
    by: Color,
    offsets: &[(i8, i8)],
    kind: PieceKind,
) -> bool {
    offsets.iter().any(|&(dr, dc)| {
        sq.offset(dr, dc)
            .and_then(|from| board.get(from))
            .is_some_and(|p| p.is(by, kind))
    })
}

/// The first piece met along each ray attacks `sq` if it is `by`'s `slider`
/// or queen.
fn attacked_by_ray(
    board: &Board,
    sq: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    for &(dr, dc) in directions {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, dc) {
            if let Some(p) = board.get(next) {
                if p.color == by && (p.kind == slider || p.kind == PieceKind::Queen) {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenRecord;

    fn board(fen: &str) -> Board {
        Board::from(&FenRecord::parse(fen).unwrap())
    }

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn is_square_attacked_startpos() {
        let board = Board::starting();

        // e3 is attacked by pawns
        assert!(is_square_attacked(&board, sq("e3"), Color::White));
        // e4 is not attacked at start
        assert!(!is_square_attacked(&board, sq("e4"), Color::White));
        assert!(is_square_attacked(&board, sq("f6"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e5"), Color::Black));
    }

    #[test]
    fn pawns_attack_empty_diagonals() {
        let board = board("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1");
        assert!(is_square_attacked(&board, sq("c3"), Color::White));
        assert!(is_square_attacked(&board, sq("e3"), Color::White));
        assert!(!is_square_attacked(&board, sq("d3"), Color::White));
        assert!(!is_square_attacked(&board, sq("c1"), Color::White));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = board("4k3/8/8/8/r2N3K/8/8/8 w - - 0 1");
        assert!(is_square_attacked(&board, sq("c4"), Color::Black));
        assert!(is_square_attacked(&board, sq("d4"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&board, sq("h4"), Color::Black));
    }

    #[test]
    fn queen_attacks_both_ways() {
        let board = board("4k3/8/8/3q4/8/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&board, sq("h1"), Color::Black));
        assert!(is_square_attacked(&board, sq("d1"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e1"), Color::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let board = board("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1");
        assert!(is_square_attacked(&board, sq("e1"), Color::Black));
        assert!(is_square_attacked(&board, sq("d7"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e2"), Color::Black));
        assert!(is_square_attacked(&board, sq("e2"), Color::White));
    }
}
