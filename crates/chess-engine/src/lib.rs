//! Chess rules engine over an 8×8 board.
//!
//! This crate provides:
//! - [`Board`] - the piece grid, addressed by [`Square`](chess_core::Square)
//! - [`GameState`] - the single mutable game state, with move history
//! - [`Probe`] - a guard that applies a move and takes it back on drop
//! - Legal move generation, check, checkmate and stalemate detection
//! - [`perft`] for validating the move generator
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//!
//! let mut game = GameState::new();
//! let moves = game.legal_moves();
//! println!("Legal moves from starting position: {}", moves.len());
//!
//! game.play("e2e4").unwrap();
//! game.play("e7e5").unwrap();
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//!
//! game.undo_move();
//! game.undo_move();
//! assert_eq!(game.to_fen(), chess_core::FenRecord::STARTPOS);
//! ```

mod board;
mod error;
pub mod movegen;
mod outcome;
mod probe;
mod state;

pub use board::Board;
pub use error::EngineError;
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{is_square_attacked, legal_moves, MoveList};
pub use outcome::Outcome;
pub use probe::Probe;
pub use state::{GameState, Status};
