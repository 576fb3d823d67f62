//! Engine error type.

use chess_core::FenError;
use thiserror::Error;

/// Errors returned by the checked entry points of [`GameState`](crate::GameState).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The move is not among the legal moves of the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// Coordinate notation such as "e2e4" could not be read.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}
