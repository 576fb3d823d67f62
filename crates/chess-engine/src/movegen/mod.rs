//! Move generation.
//!
//! Pseudo-legal moves are generated per piece kind on the 8×8 grid, then
//! filtered to legal moves by applying each candidate to the live state and
//! checking whether the mover's king is left attacked.

mod attacks;
mod castling;
pub mod perft;

use crate::state::Status;
use crate::{Board, GameState};
use chess_core::{Color, Move, Piece, PieceKind, Square};

pub use attacks::is_square_attacked;
pub(crate) use attacks::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Finds the move between two squares, with its special-move flags.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        Move::find_in(from, to, self.as_slice())
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates all legal moves for the side to move and refreshes the
/// check/checkmate/stalemate flags of `state`.
pub fn legal_moves(state: &mut GameState) -> MoveList {
    let saved_en_passant = state.en_passant;
    let saved_castling = state.castling;
    let us = state.side_to_move;

    let mut moves = MoveList::new();
    generate_pseudo_legal(&state.board, us, state.en_passant, &mut moves);
    castling::generate_castling_moves(state, &mut moves);

    moves.retain(|m| {
        let probe = state.probe(*m);
        !probe.square_under_attack(probe.king_square(us), us.opposite())
    });

    let in_check = state.in_check();
    state.status = Status {
        in_check,
        checkmate: moves.is_empty() && in_check,
        stalemate: moves.is_empty() && !in_check,
    };

    state.en_passant = saved_en_passant;
    state.castling = saved_castling;
    moves
}

/// Generates every pseudo-legal move of `us` except castling.
///
/// King safety is not considered.
pub fn generate_pseudo_legal(
    board: &Board,
    us: Color,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    for (from, piece) in board.pieces().filter(|(_, p)| p.color == us) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, from, piece, en_passant, moves),
            PieceKind::Knight => generate_step_moves(board, from, piece, &KNIGHT_OFFSETS, moves),
            PieceKind::Bishop => {
                generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves)
            }
            PieceKind::Rook => generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => {
                generate_slider_moves(board, from, piece, &ROOK_DIRECTIONS, moves);
                generate_slider_moves(board, from, piece, &BISHOP_DIRECTIONS, moves);
            }
            PieceKind::King => generate_step_moves(board, from, piece, &KING_OFFSETS, moves),
        }
    }
}

fn generate_pawn_moves(
    board: &Board,
    from: Square,
    pawn: Piece,
    en_passant: Option<Square>,
    moves: &mut MoveList,
) {
    let dir = pawn.color.pawn_direction();

    if let Some(one) = from.offset(dir, 0).filter(|sq| board.is_empty(*sq)) {
        moves.push(Move::new(from, one, pawn, None));
        if from.row() == pawn.color.pawn_row() {
            if let Some(two) = one.offset(dir, 0).filter(|sq| board.is_empty(*sq)) {
                moves.push(Move::new(from, two, pawn, None));
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = from.offset(dir, side) else {
            continue;
        };
        match board.get(target) {
            Some(victim) if victim.color != pawn.color => {
                moves.push(Move::new(from, target, pawn, Some(victim)));
            }
            None if en_passant == Some(target) => {
                moves.push(Move::en_passant(from, target, pawn));
            }
            _ => {}
        }
    }
}

/// Knights and kings: one step along each offset.
fn generate_step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    offsets: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in offsets {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        let target = board.get(to);
        if target.map_or(true, |t| t.color != piece.color) {
            moves.push(Move::new(from, to, piece, target));
        }
    }
}

/// Bishops, rooks and queens: rays that stop at the first occupied square.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut sq = from;
        while let Some(next) = sq.offset(dr, dc) {
            match board.get(next) {
                None => moves.push(Move::new(from, next, piece, None)),
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(from, next, piece, Some(target)));
                    }
                    break;
                }
            }
            sq = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::FenRecord;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn pseudo(fen: &str) -> MoveList {
        let state = GameState::from_fen(fen).unwrap();
        let mut moves = MoveList::new();
        generate_pseudo_legal(state.board(), state.side_to_move(), state.en_passant(), &mut moves);
        moves
    }

    #[test]
    fn movelist_push_and_retain() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mut list = MoveList::new();
        assert!(list.is_empty());
        list.push(Move::new(sq("e2"), sq("e3"), pawn, None));
        list.push(Move::new(sq("e2"), sq("e4"), pawn, None));
        list.push(Move::new(sq("d2"), sq("d4"), pawn, None));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].to(), sq("e4"));

        list.retain(|m| m.from() == sq("e2"));
        assert_eq!(list.len(), 2);
        assert!(list.find(sq("d2"), sq("d4")).is_none());
        assert!(list.find(sq("e2"), sq("e4")).is_some());
    }

    #[test]
    fn legal_moves_startpos() {
        let mut state = GameState::new();
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 20);
        assert_eq!(state.status(), Status::default());
    }

    #[test]
    fn pawn_pushes_blocked() {
        // e3 blocked: neither single nor double push.
        let moves = pseudo("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.iter().all(|m| m.from() != sq("e2")));
        // e4 blocked: single push only.
        let moves = pseudo("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        let pawn: Vec<_> = moves.iter().filter(|m| m.from() == sq("e2")).collect();
        assert_eq!(pawn.len(), 1);
        assert_eq!(pawn[0].to(), sq("e3"));
    }

    #[test]
    fn pawn_captures_only_enemies() {
        let moves = pseudo("4k3/8/8/8/8/3p1N2/4P3/4K3 w - - 0 1");
        assert!(moves.find(sq("e2"), sq("d3")).unwrap().is_capture());
        assert!(moves.find(sq("e2"), sq("f3")).is_none());
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pseudo("4k3/3p4/8/8/8/8/8/4K3 b - - 0 1");
        assert!(moves.find(sq("d7"), sq("d6")).is_some());
        assert!(moves.find(sq("d7"), sq("d5")).is_some());
    }

    #[test]
    fn knight_skips_allies() {
        let moves = pseudo(FenRecord::STARTPOS);
        let knight: Vec<_> = moves.iter().filter(|m| m.from() == Square::B1).collect();
        assert_eq!(knight.len(), 2);
    }

    #[test]
    fn slider_rays_stop_at_first_piece() {
        let moves = pseudo("4k3/8/8/8/1p1R2P1/8/8/4K3 w - - 0 1");
        let rook: Vec<_> = moves.iter().filter(|m| m.from() == sq("d4")).collect();
        // Up 4, down 3, left to the b4 capture (2), right to f4 (2).
        assert_eq!(rook.len(), 11);
        assert!(moves.find(sq("d4"), sq("b4")).unwrap().is_capture());
        assert!(moves.find(sq("d4"), sq("a4")).is_none());
        assert!(moves.find(sq("d4"), sq("g4")).is_none());
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        let moves = pseudo("4k3/8/8/8/3Q4/8/7K/8 w - - 0 1");
        let queen = moves.iter().filter(|m| m.from() == sq("d4")).count();
        assert_eq!(queen, 27);
    }

    #[test]
    fn pinned_piece_cannot_move() {
        let mut state = GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        assert!(moves.iter().all(|m| m.from() != sq("e2")));
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        assert!(!state.status().in_check);
        assert!(moves.find(sq("e1"), sq("d1")).is_none());
        assert!(moves.find(sq("e1"), sq("e2")).is_none());
        assert!(moves.find(sq("e1"), sq("f2")).is_none());
        assert!(moves.find(sq("e1"), sq("f1")).is_some());
        assert!(moves.find(sq("e1"), sq("d2")).unwrap().is_capture());
    }

    #[test]
    fn only_check_evasions_are_legal() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/4q3/R3K3 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        assert!(state.status().in_check);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].from(), Square::E1);
        assert_eq!(moves[0].to(), sq("e2"));
    }

    #[test]
    fn generation_restores_rights_and_target() {
        let mut state =
            GameState::from_fen("r3k2r/8/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1").unwrap();
        state.legal_moves();
        assert_eq!(state.en_passant(), Some(sq("d6")));
        assert_eq!(state.castling(), chess_core::CastlingRights::ALL);
        assert!(state.move_log().is_empty());
    }
}
