//! FEN (Forsyth-Edwards Notation) parsing and serialization.
//!
//! Only the first four fields matter to the engine. The halfmove clock and
//! fullmove number are optional; when present they must be numbers but are
//! otherwise ignored.

use crate::{CastlingRights, Color, Piece, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 or 6 fields, got {0}")]
    InvalidFieldCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid move counter: {0}")]
    InvalidCounter(String),

    #[error("expected exactly one {0} king, found {1}")]
    KingCount(Color, usize),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),
}

/// Board rows as `[row][column]`, row 0 being rank 8.
pub type Placement = [[Option<Piece>; 8]; 8];

/// A decoded FEN position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenRecord {
    pub placement: Placement,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
}

impl FenRecord {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 4 && fields.len() != 6 {
            return Err(FenError::InvalidFieldCount(fields.len()));
        }

        let placement = parse_placement(fields[0])?;
        for color in [Color::White, Color::Black] {
            let kings = placement
                .iter()
                .flatten()
                .filter(|cell| **cell == Some(Piece::new(color, PieceKind::King)))
                .count();
            if kings != 1 {
                return Err(FenError::KingCount(color, kings));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingRights::from_fen(fields[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(fields[2].to_string()))?;

        let en_passant = match fields[3] {
            "-" => None,
            field => {
                let sq = Square::from_algebraic(field)
                    .filter(|sq| en_passant_is_consistent(&placement, side_to_move, *sq))
                    .ok_or_else(|| FenError::InvalidEnPassantSquare(field.to_string()))?;
                Some(sq)
            }
        };

        for counter in fields.iter().skip(4) {
            counter
                .parse::<u32>()
                .map_err(|_| FenError::InvalidCounter(counter.to_string()))?;
        }

        Ok(FenRecord {
            placement,
            side_to_move,
            castling,
            en_passant,
        })
    }

    /// Renders the record as a six-field FEN with zeroed clocks.
    pub fn to_fen(&self) -> String {
        let rows: Vec<String> = self
            .placement
            .iter()
            .map(|row| {
                let mut out = String::new();
                let mut empty = 0;
                for cell in row {
                    match cell {
                        Some(piece) => {
                            if empty > 0 {
                                out.push_str(&empty.to_string());
                                empty = 0;
                            }
                            out.push(piece.to_fen_char());
                        }
                        None => empty += 1,
                    }
                }
                if empty > 0 {
                    out.push_str(&empty.to_string());
                }
                out
            })
            .collect();

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let ep = self
            .en_passant
            .map(|sq| sq.to_algebraic())
            .unwrap_or_else(|| "-".to_string());

        format!("{} {} {} {} 0 1", rows.join("/"), side, self.castling.to_fen(), ep)
    }
}

/// The target must be the square just skipped by an opponent pawn: on rank 6
/// with White to move (rank 3 with Black), empty, with the pawn in front of
/// it and its starting square empty behind it.
fn en_passant_is_consistent(placement: &Placement, side_to_move: Color, sq: Square) -> bool {
    let pusher = side_to_move.opposite();
    let target_row = match side_to_move {
        Color::White => 2,
        Color::Black => 5,
    };
    let at = |sq: Option<Square>| sq.map(|sq| placement[sq.row() as usize][sq.col() as usize]);
    let dir = pusher.pawn_direction();

    sq.row() == target_row
        && at(Some(sq)) == Some(None)
        && at(sq.offset(-dir, 0)) == Some(None)
        && at(sq.offset(dir, 0)) == Some(Some(Piece::new(pusher, PieceKind::Pawn)))
}

fn parse_placement(field: &str) -> Result<Placement, FenError> {
    let rows: Vec<&str> = field.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::InvalidPiecePlacement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut placement: Placement = [[None; 8]; 8];
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0usize;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += skip as usize;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                if col < 8 {
                    placement[row][col] = Some(piece);
                }
                col += 1;
            } else {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    8 - row
                )));
            }
            if col > 8 {
                break;
            }
        }
        if col != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "rank {} has {} squares, expected 8",
                8 - row,
                col
            )));
        }
    }
    Ok(placement)
}

impl Default for FenRecord {
    fn default() -> Self {
        Self::parse(Self::STARTPOS).expect("STARTPOS is valid")
    }
}
