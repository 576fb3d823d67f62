//! Negamax search with alpha-beta pruning, and random move choice.

use chess_core::Move;
use chess_engine::GameState;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::evaluation::evaluate;
use crate::SearchConfig;

/// Counters from one call to [`Searcher::search`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes entered, the root included.
    pub nodes: u64,
    /// Times a node stopped early on `alpha >= beta`.
    pub cutoffs: u64,
    /// Root score from the side to move's point of view.
    pub best_score: f64,
}

/// Fixed-depth negamax searcher.
///
/// Holds the [`SearchConfig`] and the counters of the current search, which
/// are reset at the start of every [`search`](Self::search).
#[derive(Debug, Clone)]
pub struct Searcher {
    config: SearchConfig,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Searcher {
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Picks the best of `moves`, the legal moves of `state`, by a
    /// fixed-depth search.
    ///
    /// Moves are applied to `state` and taken back; on return the position
    /// and its status flags are as they were. Returns `None` only when
    /// `moves` is empty.
    pub fn search(&mut self, state: &mut GameState, moves: &[Move]) -> (Option<Move>, SearchStats) {
        self.stats = SearchStats::default();
        if moves.is_empty() {
            return (None, self.stats);
        }

        let saved = state.status();
        let sign = f64::from(state.side_to_move().sign());
        let depth = self.config.depth.max(1);
        let (score, best) = self.negamax(
            state,
            moves,
            depth,
            depth,
            f64::NEG_INFINITY,
            f64::INFINITY,
            sign,
        );
        state.restore_status(saved);

        self.stats.best_score = score;
        tracing::debug!(
            depth,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            score,
            best = ?best.map(Move::notation),
            "search finished"
        );
        (best, self.stats)
    }

    /// Returns the node's score from the point of view of the side to move
    /// (`sign` is +1 when that is White), and the best move when
    /// `depth == root_depth`.
    ///
    /// `moves` must be the legal moves of `state`, computed last so that the
    /// status flags describe this node.
    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        state: &mut GameState,
        moves: &[Move],
        depth: u32,
        root_depth: u32,
        mut alpha: f64,
        beta: f64,
        sign: f64,
    ) -> (f64, Option<Move>) {
        self.stats.nodes += 1;

        if depth == 0 || moves.is_empty() {
            return (sign * evaluate(state), None);
        }

        let mut best_score = f64::NEG_INFINITY;
        let mut best_move = None;

        for &m in moves {
            let score = {
                let mut probe = state.probe(m);
                let replies = probe.legal_moves();
                let (child, _) = self.negamax(
                    &mut probe,
                    replies.as_slice(),
                    depth - 1,
                    root_depth,
                    -beta,
                    -alpha,
                    -sign,
                );
                -child
            };

            if score > best_score {
                best_score = score;
                if depth == root_depth {
                    best_move = Some(m);
                }
            }

            alpha = alpha.max(best_score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        (best_score, best_move)
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

/// Searches `state` at the default depth. See [`Searcher::search`].
pub fn find_best_move(state: &mut GameState, moves: &[Move]) -> Option<Move> {
    Searcher::default().search(state, moves).0
}

/// Picks one of `moves` uniformly at random.
pub fn find_random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

/// [`find_random_move`] with the thread-local generator.
pub fn find_random_move_thread(moves: &[Move]) -> Option<Move> {
    find_random_move(moves, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn empty_move_list_returns_none() {
        let mut state = GameState::new();
        assert_eq!(find_best_move(&mut state, &[]), None);
        assert_eq!(find_random_move_thread(&[]), None);
    }

    #[test]
    fn finds_mate_in_one_for_white() {
        let mut state = GameState::from_fen(MATE_IN_ONE).unwrap();
        let moves = state.legal_moves();
        let best = find_best_move(&mut state, moves.as_slice()).unwrap();
        assert_eq!((best.from(), best.to()), (Square::A1, Square::A8));
    }

    #[test]
    fn finds_mate_in_one_for_black() {
        let mut state = GameState::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let moves = state.legal_moves();
        let (best, stats) = Searcher::default().search(&mut state, moves.as_slice());
        let best = best.unwrap();
        assert_eq!((best.from(), best.to()), (Square::A8, Square::A1));
        assert_eq!(stats.best_score, crate::MATE_SCORE);
    }

    #[test]
    fn takes_a_hanging_queen() {
        let mut state = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        let best = find_best_move(&mut state, moves.as_slice()).unwrap();
        assert_eq!((best.from(), best.to()), (sq("d1"), sq("d5")));
    }

    #[test]
    fn search_is_deterministic() {
        let mut state = GameState::new();
        let moves = state.legal_moves();
        let first = find_best_move(&mut state, moves.as_slice());
        let second = find_best_move(&mut state, moves.as_slice());
        assert_eq!(first, second);
    }

    #[test]
    fn search_restores_state_and_status() {
        let mut state = GameState::from_fen(KIWIPETE).unwrap();
        let moves = state.legal_moves();
        let fen = state.to_fen();
        let status = state.status();

        let (best, stats) = Searcher::default().search(&mut state, moves.as_slice());
        assert!(best.is_some_and(|m| moves.iter().any(|l| *l == m)));
        assert!(stats.nodes > moves.len() as u64);
        assert_eq!(state.to_fen(), fen);
        assert_eq!(state.status(), status);
        assert!(state.move_log().is_empty());
    }

    const KIWIPETE: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

    /// Plain negamax over the whole tree, no pruning.
    fn full_negamax(state: &mut GameState, moves: &[Move], depth: u32, sign: f64) -> f64 {
        if depth == 0 || moves.is_empty() {
            return sign * evaluate(state);
        }
        let mut best = f64::NEG_INFINITY;
        for &m in moves {
            let mut probe = state.probe(m);
            let replies = probe.legal_moves();
            best = best.max(-full_negamax(&mut probe, replies.as_slice(), depth - 1, -sign));
        }
        best
    }

    fn assert_same_root_score(fen: &str, depth: u32) {
        let mut state = GameState::from_fen(fen).unwrap();
        let moves = state.legal_moves();
        let sign = f64::from(state.side_to_move().sign());

        let expected = full_negamax(&mut state, moves.as_slice(), depth, sign);
        let (best, stats) = Searcher::new(SearchConfig { depth }).search(&mut state, moves.as_slice());

        assert!(best.is_some());
        assert_eq!(stats.best_score, expected, "{} at depth {}", fen, depth);
    }

    #[test]
    fn pruned_score_matches_full_tree_startpos() {
        for depth in 1..=3 {
            assert_same_root_score(chess_core::FenRecord::STARTPOS, depth);
        }
    }

    #[test]
    fn pruned_score_matches_full_tree_kiwipete() {
        for depth in 1..=2 {
            assert_same_root_score(KIWIPETE, depth);
        }
    }

    #[test]
    #[ignore = "slow in debug builds"]
    fn pruned_score_matches_full_tree_kiwipete_depth_3() {
        assert_same_root_score(KIWIPETE, 3);
    }

    #[test]
    fn pruned_score_matches_full_tree_mate_in_one() {
        for depth in 1..=3 {
            assert_same_root_score(MATE_IN_ONE, depth);
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes_than_full_tree() {
        let mut state = GameState::new();
        let moves = state.legal_moves();
        let (_, stats) = Searcher::default().search(&mut state, moves.as_slice());
        // Root + 20 children + 400 grandchildren without pruning.
        assert!(stats.nodes < 421);
        assert!(stats.cutoffs > 0);
    }

    #[test]
    fn single_move_is_returned() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/4q3/R3K3 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(find_best_move(&mut state, moves.as_slice()), Some(moves[0]));
    }

    #[test]
    fn random_move_is_legal_and_seedable() {
        let mut state = GameState::new();
        let moves = state.legal_moves();
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            let m = find_random_move(moves.as_slice(), &mut a).unwrap();
            assert!(moves.iter().any(|l| *l == m));
            assert_eq!(Some(m), find_random_move(moves.as_slice(), &mut b));
        }
    }
}
