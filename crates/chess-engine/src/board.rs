//! The 8×8 piece grid.

use chess_core::{Color, FenRecord, Piece, PieceKind, Placement, Square};
use std::fmt;
use std::ops::Index;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Board contents indexed `[row][column]`; row 0 is Black's back rank.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Placement,
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting arrangement.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.cells[0][col] = Some(Piece::new(Color::Black, kind));
            board.cells[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.cells[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.cells[7][col] = Some(Piece::new(Color::White, kind));
        }
        board
    }

    pub const fn from_placement(cells: Placement) -> Self {
        Board { cells }
    }

    /// The raw rows, for callers that address the board as `[row][col]`.
    #[inline]
    pub fn rows(&self) -> &Placement {
        &self.cells
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row() as usize][sq.col() as usize] = piece;
    }

    /// Empties a square, returning what stood on it.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Returns the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// Iterates over occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    /// Finds the king of `color` by scanning the grid.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.is(color, PieceKind::King))
            .map(|(sq, _)| sq)
    }

    /// The same position seen from the other side: rows reversed and every
    /// piece handed to the opponent.
    pub fn mirrored(&self) -> Board {
        let mut out = Board::empty();
        for (sq, piece) in self.pieces() {
            out.set(
                sq.flip_vertical(),
                Some(Piece::new(piece.color.opposite(), piece.kind)),
            );
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl From<&FenRecord> for Board {
    fn from(record: &FenRecord) -> Self {
        Board::from_placement(record.placement)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.cells[sq.row() as usize][sq.col() as usize]
    }
}

/// Renders rank 8 at the top, one FEN letter per piece and `.` for empty.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                let c = cell.map(Piece::to_fen_char).unwrap_or('.');
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(")?;
        writeln!(f, "{}", self)?;
        write!(f, ")")
    }
}
