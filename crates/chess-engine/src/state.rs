//! Mutable game state: board, turn, castling rights, en passant and history.

use chess_core::{CastlingRights, Color, FenError, FenRecord, Move, Piece, PieceKind, Square};

use crate::movegen::{self, MoveList};
use crate::{Board, EngineError, Outcome, Probe};

/// Check and terminal flags computed by [`GameState::legal_moves`].
///
/// They describe the position as of the last legal-move computation and are
/// stale once a move is applied or undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Status {
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

/// The engine's authoritative game state.
///
/// A single instance is mutated in place by [`apply_move`](Self::apply_move)
/// and rolled back by [`undo_move`](Self::undo_move). The search reuses the
/// same instance for the whole tree, so every apply must be paired with an
/// undo; [`probe`](Self::probe) does the pairing automatically.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    /// King squares indexed by [`Color::index`].
    pub(crate) kings: [Square; 2],
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    move_log: Vec<Move>,
    /// Rights after every applied move, starting with the initial rights.
    castling_log: Vec<CastlingRights>,
    /// En passant target before every applied move.
    en_passant_log: Vec<Option<Square>>,
    pub(crate) status: Status,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game in the standard starting position with White to move.
    pub fn new() -> Self {
        GameState {
            board: Board::starting(),
            side_to_move: Color::White,
            kings: [Square::E1, Square::E8],
            castling: CastlingRights::ALL,
            en_passant: None,
            move_log: Vec::new(),
            castling_log: vec![CastlingRights::ALL],
            en_passant_log: Vec::new(),
            status: Status::default(),
        }
    }

    /// Creates a game from a FEN string. Move counters are ignored.
    ///
    /// Positions where the side that just moved is left in check are
    /// rejected, since its king could be captured.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let record = FenRecord::parse(fen)?;
        let state = Self::from_record(&record);
        let them = state.side_to_move.opposite();
        if state.square_under_attack(state.king_square(them), state.side_to_move) {
            return Err(FenError::OpponentInCheck(them).into());
        }
        Ok(state)
    }

    fn from_record(record: &FenRecord) -> Self {
        let board = Board::from(record);
        // FenRecord::parse guarantees one king per color.
        let kings = [Color::White, Color::Black]
            .map(|color| board.find_king(color).unwrap_or(Square::A8));
        GameState {
            board,
            side_to_move: record.side_to_move,
            kings,
            castling: record.castling,
            en_passant: record.en_passant,
            move_log: Vec::new(),
            castling_log: vec![record.castling],
            en_passant_log: Vec::new(),
            status: Status::default(),
        }
    }

    /// Renders the position as FEN with zeroed move counters.
    pub fn to_fen(&self) -> String {
        FenRecord {
            placement: *self.board.rows(),
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
        .to_fen()
    }

    /// Starts a new game in place.
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.kings[color.index()]
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Moves applied so far, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    pub fn last_move(&self) -> Option<Move> {
        self.move_log.last().copied()
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Puts back flags saved with [`status`](Self::status).
    pub fn restore_status(&mut self, status: Status) {
        self.status = status;
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.status.checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.status.stalemate
    }

    /// The result of the game, if the last legal-move computation found none.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.status.checkmate {
            Some(Outcome::Checkmate {
                winner: self.side_to_move.opposite(),
            })
        } else if self.status.stalemate {
            Some(Outcome::Stalemate)
        } else {
            None
        }
    }

    /// Returns true if the side to move's king is attacked.
    pub fn in_check(&self) -> bool {
        let us = self.side_to_move;
        self.square_under_attack(self.king_square(us), us.opposite())
    }

    /// Returns true if any piece of `by` attacks `sq`.
    pub fn square_under_attack(&self, sq: Square, by: Color) -> bool {
        movegen::is_square_attacked(&self.board, sq, by)
    }

    /// Computes the legal moves for the side to move and refreshes
    /// [`status`](Self::status).
    pub fn legal_moves(&mut self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Legal moves starting on `from`, for highlighting destinations.
    pub fn moves_from(moves: &[Move], from: Square) -> impl Iterator<Item = Move> + '_ {
        moves.iter().copied().filter(move |m| m.from() == from)
    }

    /// Resolves a clicked `(from, to)` pair to the flagged legal move.
    pub fn find_move(moves: &[Move], from: Square, to: Square) -> Option<Move> {
        Move::find_in(from, to, moves)
    }

    /// Applies `m` without any legality check.
    ///
    /// `m` must come from the current [`legal_moves`](Self::legal_moves) (or
    /// the pseudo-legal generator while probing). Anything else corrupts the
    /// state; use [`make_move`](Self::make_move) for untrusted input.
    pub fn apply_move(&mut self, m: Move) {
        debug_assert_eq!(
            self.board[m.from()],
            Some(m.moved()),
            "{:?} does not match the board",
            m
        );
        let us = m.color();

        self.board.set(m.from(), None);
        self.board.set(m.to(), Some(m.placed()));

        if m.is_en_passant() {
            if let Some(victim) = Square::from_row_col(m.from().row(), m.to().col()) {
                self.board.set(victim, None);
            }
        }

        if m.is_castle() {
            if let Some((rook_from, rook_to)) = castle_rook_squares(m) {
                let rook = self.board.take(rook_from);
                self.board.set(rook_to, rook);
            }
        }

        if m.moved().kind == PieceKind::King {
            self.kings[us.index()] = m.to();
        }

        self.en_passant_log.push(self.en_passant);
        self.en_passant = if m.is_double_push() {
            Square::from_row_col((m.from().row() + m.to().row()) / 2, m.from().col())
        } else {
            None
        };

        self.update_castling_rights(m);
        self.castling_log.push(self.castling);
        self.move_log.push(m);
        self.side_to_move = us.opposite();
    }

    /// Takes back the last applied move. Returns `None` on an empty history.
    pub fn undo_move(&mut self) -> Option<Move> {
        let m = self.move_log.pop()?;
        let us = m.color();

        self.board.set(m.from(), Some(m.moved()));
        if m.is_en_passant() {
            self.board.set(m.to(), None);
            if let Some(victim) = Square::from_row_col(m.from().row(), m.to().col()) {
                self.board.set(victim, m.captured());
            }
        } else {
            self.board.set(m.to(), m.captured());
        }

        if m.is_castle() {
            if let Some((rook_from, rook_to)) = castle_rook_squares(m) {
                let rook = self.board.take(rook_to);
                self.board.set(rook_from, rook);
            }
        }

        if m.moved().kind == PieceKind::King {
            self.kings[us.index()] = m.from();
        }

        self.castling_log.pop();
        if let Some(&rights) = self.castling_log.last() {
            self.castling = rights;
        }
        self.en_passant = self.en_passant_log.pop().flatten();

        self.side_to_move = us;
        self.status.checkmate = false;
        self.status.stalemate = false;
        Some(m)
    }

    /// Applies `m` for as long as the returned guard lives.
    pub fn probe(&mut self, m: Move) -> Probe<'_> {
        Probe::new(self, m)
    }

    /// Applies a move after checking it against the legal moves.
    ///
    /// Only `(from, to)` of `m` is looked at; the matching legal move, with
    /// its special-move flags, is applied and returned.
    pub fn make_move(&mut self, m: Move) -> Result<Move, EngineError> {
        self.make_move_between(m.from(), m.to())
    }

    /// Applies the legal move from `from` to `to`.
    pub fn make_move_between(&mut self, from: Square, to: Square) -> Result<Move, EngineError> {
        let legal = self.legal_moves();
        let Some(m) = Self::find_move(legal.as_slice(), from, to) else {
            tracing::trace!(%from, %to, "rejected illegal move");
            return Err(EngineError::IllegalMove(format!("{}{}", from, to)));
        };
        self.apply_move(m);
        self.legal_moves();
        Ok(m)
    }

    /// Applies a move written in coordinate notation, e.g. "e2e4".
    pub fn play(&mut self, notation: &str) -> Result<Move, EngineError> {
        let invalid = || EngineError::InvalidNotation(notation.to_string());
        // A trailing promotion letter is accepted; promotion is always to a queen.
        let squares = match notation.len() {
            4 => notation,
            5 if notation.ends_with(['q', 'Q']) => &notation[..4],
            _ => return Err(invalid()),
        };
        let from = squares.get(0..2).and_then(Square::from_algebraic).ok_or_else(invalid)?;
        let to = squares.get(2..4).and_then(Square::from_algebraic).ok_or_else(invalid)?;
        self.make_move_between(from, to)
    }

    /// The color-reversed position: rows flipped, pieces and rights swapped,
    /// the other side to move. History is not carried over.
    pub fn mirrored(&self) -> GameState {
        let c = self.castling;
        let castling = CastlingRights {
            white_kingside: c.black_kingside,
            white_queenside: c.black_queenside,
            black_kingside: c.white_kingside,
            black_queenside: c.white_queenside,
        };
        GameState {
            board: self.board.mirrored(),
            side_to_move: self.side_to_move.opposite(),
            kings: [
                self.kings[Color::Black.index()].flip_vertical(),
                self.kings[Color::White.index()].flip_vertical(),
            ],
            castling,
            en_passant: self.en_passant.map(Square::flip_vertical),
            move_log: Vec::new(),
            castling_log: vec![castling],
            en_passant_log: Vec::new(),
            status: self.status,
        }
    }

    fn update_castling_rights(&mut self, m: Move) {
        let mover = m.color();
        match m.moved().kind {
            PieceKind::King => self.castling.remove_color(mover),
            PieceKind::Rook => self.revoke_corner(mover, m.from()),
            _ => {}
        }
        // A rook taken on its home corner can never castle again.
        if let Some(Piece {
            color,
            kind: PieceKind::Rook,
        }) = m.captured()
        {
            self.revoke_corner(color, m.to());
        }
    }

    fn revoke_corner(&mut self, color: Color, sq: Square) {
        if sq.row() != color.back_row() {
            return;
        }
        match sq.col() {
            0 => self.castling.remove_queenside(color),
            7 => self.castling.remove_kingside(color),
            _ => {}
        }
    }
}

/// Rook origin and destination for a castling move.
fn castle_rook_squares(m: Move) -> Option<(Square, Square)> {
    let kingside = m.to().col() > m.from().col();
    let (from, to) = if kingside {
        (m.to().offset(0, 1), m.to().offset(0, -1))
    } else {
        (m.to().offset(0, -2), m.to().offset(0, 1))
    };
    Some((from?, to?))
}
