//! Static evaluation.

use chess_core::Color;
use chess_engine::GameState;

/// Score of a checkmated position, from the winner's side.
pub const MATE_SCORE: f64 = 1000.0;

pub const STALEMATE_SCORE: f64 = 0.0;

/// Scores `state` from White's point of view.
///
/// Terminal flags come from the last [`GameState::legal_moves`] call, so
/// they must be fresh for the position being scored. Otherwise the score is
/// the material balance; kings count for nothing.
pub fn evaluate(state: &GameState) -> f64 {
    if state.is_checkmate() {
        return match state.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if state.is_stalemate() {
        return STALEMATE_SCORE;
    }

    state
        .board()
        .pieces()
        .map(|(_, piece)| f64::from(piece.color.sign()) * piece.kind.value())
        .sum()
}
