//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and the
//! search:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for `(row, column)` board coordinates
//! - [`Move`] for move records that can be taken back
//! - [`CastlingRights`]
//! - FEN parsing

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{FenError, FenRecord, Placement};
pub use mov::Move;
pub use piece::{Piece, PieceKind};
pub use square::{File, Rank, Square};
