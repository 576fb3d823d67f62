//! Move representation.

use crate::{Color, Piece, PieceKind, Square};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A chess move together with everything needed to take it back.
///
/// Equality and hashing only look at the `(from, to)` pair, so a move built
/// from two clicked squares compares equal to the fully flagged move in a
/// legal-move list.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    moved: Piece,
    captured: Option<Piece>,
    en_passant: bool,
    castle: bool,
    promotion: bool,
}

impl Move {
    /// Creates a move, flagging a promotion when a pawn reaches its last row.
    pub fn new(from: Square, to: Square, moved: Piece, captured: Option<Piece>) -> Self {
        let promotion =
            moved.kind == PieceKind::Pawn && to.row() == moved.color.promotion_row();
        Move {
            from,
            to,
            moved,
            captured,
            en_passant: false,
            castle: false,
            promotion,
        }
    }

    /// Creates an en passant capture. The captured pawn is the enemy pawn
    /// beside `from`, not the (empty) destination.
    pub fn en_passant(from: Square, to: Square, moved: Piece) -> Self {
        let victim = Piece::new(moved.color.opposite(), PieceKind::Pawn);
        Move {
            en_passant: true,
            ..Move::new(from, to, moved, Some(victim))
        }
    }

    /// Creates a castling move, expressed as the king's two-square step.
    pub fn castle(from: Square, to: Square, king: Piece) -> Self {
        Move {
            castle: true,
            ..Move::new(from, to, king, None)
        }
    }

    /// Resolves a coordinate-only move into the matching entry of `moves`.
    pub fn find_in(from: Square, to: Square, moves: &[Move]) -> Option<Move> {
        moves.iter().copied().find(|m| m.from == from && m.to == to)
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// The piece that moved (the pawn, for a promotion).
    #[inline]
    pub const fn moved(self) -> Piece {
        self.moved
    }

    /// The piece removed from the board by this move, if any.
    #[inline]
    pub const fn captured(self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.en_passant
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.castle
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion
    }

    /// Piece left on the destination square. Promotions always make a queen.
    pub const fn placed(self) -> Piece {
        if self.promotion {
            Piece::new(self.moved.color, PieceKind::Queen)
        } else {
            self.moved
        }
    }

    /// Returns true for a pawn advancing two rows.
    pub const fn is_double_push(self) -> bool {
        matches!(self.moved.kind, PieceKind::Pawn) && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// The color making this move.
    #[inline]
    pub const fn color(self) -> Color {
        self.moved.color
    }

    /// Coordinate notation, e.g. "e2e4".
    pub fn notation(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Placeholder used to fill fixed-capacity move buffers; never legal.
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        moved: Piece::new(Color::White, PieceKind::Pawn),
        captured: None,
        en_passant: false,
        castle: false,
        promotion: false,
    };
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.notation())?;
        if self.castle {
            write!(f, " castle")?;
        }
        if self.en_passant {
            write!(f, " e.p.")?;
        }
        if self.promotion {
            write!(f, " =Q")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notation())
    }
}
