//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.

use crate::GameState;

/// Counts the number of leaf nodes at the given depth.
///
/// Moves are applied to `state` and undone again, so it is unchanged on
/// return apart from its status flags.
pub fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = state.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for m in &moves {
        let mut probe = state.probe(*m);
        nodes += perft(&mut probe, depth - 1);
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(state: &mut GameState, depth: u32) -> Vec<(String, u64)> {
    let moves = state.legal_moves();
    let mut results = Vec::with_capacity(moves.len());

    for m in &moves {
        let mut probe = state.probe(*m);
        let nodes = if depth > 1 {
            perft(&mut probe, depth - 1)
        } else {
            1
        };
        results.push((m.notation(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
