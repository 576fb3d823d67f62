//! Move selection for [`chess_engine::GameState`].
//!
//! - [`evaluate`] scores a position by material, positive for White
//! - [`find_best_move`] runs a fixed-depth negamax search with alpha-beta
//!   pruning on the live state
//! - [`find_random_move`] picks uniformly among the legal moves
//! - [`MoveSelector`] puts both behind one interface for game drivers

mod config;
mod evaluation;
mod search;
mod selector;

pub use config::{ConfigError, SearchConfig};
pub use evaluation::{evaluate, MATE_SCORE, STALEMATE_SCORE};
pub use search::{
    find_best_move, find_random_move, find_random_move_thread, SearchStats, Searcher,
};
pub use selector::{MoveSelector, Negamax, RandomMover};
