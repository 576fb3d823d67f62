//! Castling move generation.

use super::MoveList;
use crate::GameState;
use chess_core::{Color, Move, Piece, PieceKind, Square};

/// Adds the castling moves available to the side to move.
///
/// A side may castle when it still holds the right, its king is not in
/// check, the squares between king and rook are empty, its own rook stands
/// on the corner, and the king does not pass through or land on an
/// attacked square.
pub(crate) fn generate_castling_moves(state: &GameState, moves: &mut MoveList) {
    let us = state.side_to_move();
    let king_sq = state.king_square(us);
    if king_sq != home_square(us) || state.square_under_attack(king_sq, us.opposite()) {
        return;
    }

    if state.castling().kingside(us) {
        if let Some(m) = try_castle(state, king_sq, 1, 2) {
            moves.push(m);
        }
    }
    if state.castling().queenside(us) {
        if let Some(m) = try_castle(state, king_sq, -1, 3) {
            moves.push(m);
        }
    }
}

fn home_square(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

/// `between` squares in direction `dir` must be empty; the rook stands just
/// beyond them. Only the two squares the king crosses must be unattacked.
fn try_castle(state: &GameState, king_sq: Square, dir: i8, between: i8) -> Option<Move> {
    let us = state.side_to_move();
    let board = state.board();

    for step in 1..=between {
        if !board.is_empty(king_sq.offset(0, dir * step)?) {
            return None;
        }
    }

    let rook_sq = king_sq.offset(0, dir * (between + 1))?;
    if board.get(rook_sq) != Some(Piece::new(us, PieceKind::Rook)) {
        return None;
    }

    for step in 1..=2 {
        if state.square_under_attack(king_sq.offset(0, dir * step)?, us.opposite()) {
            return None;
        }
    }

    let to = king_sq.offset(0, 2 * dir)?;
    Some(Move::castle(king_sq, to, Piece::new(us, PieceKind::King)))
}
