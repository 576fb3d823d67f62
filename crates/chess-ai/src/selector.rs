//! Move selectors used by game drivers.

use chess_core::Move;
use chess_engine::GameState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::search::{find_random_move, Searcher};
use crate::SearchConfig;

/// Chooses a move for the side to move.
pub trait MoveSelector {
    /// Picks one of `moves`, the current legal moves of `state`.
    ///
    /// `state` may be used for look-ahead but must be left as it was.
    /// Returns `None` only when `moves` is empty.
    fn select(&mut self, state: &mut GameState, moves: &[Move]) -> Option<Move>;

    /// Human-readable name for this selector.
    fn name(&self) -> &str;
}

/// Picks a random legal move.
pub struct RandomMover<R = StdRng> {
    rng: R,
}

impl RandomMover<StdRng> {
    pub fn from_entropy() -> Self {
        RandomMover {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomMover<R> {
    pub fn with_rng(rng: R) -> Self {
        RandomMover { rng }
    }
}

impl<R: Rng> MoveSelector for RandomMover<R> {
    fn select(&mut self, _state: &mut GameState, moves: &[Move]) -> Option<Move> {
        find_random_move(moves, &mut self.rng)
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Fixed-depth negamax search, with a random legal move as fallback.
///
/// The search always yields a move when `moves` is non-empty, so the
/// fallback only guards against a future search that can give up.
pub struct Negamax<R = StdRng> {
    searcher: Searcher,
    fallback: RandomMover<R>,
}

impl Negamax<StdRng> {
    pub fn new(config: SearchConfig) -> Self {
        Negamax {
            searcher: Searcher::new(config),
            fallback: RandomMover::from_entropy(),
        }
    }

    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Negamax {
            searcher: Searcher::new(config),
            fallback: RandomMover::seeded(seed),
        }
    }
}

impl<R: Rng> MoveSelector for Negamax<R> {
    fn select(&mut self, state: &mut GameState, moves: &[Move]) -> Option<Move> {
        if moves.is_empty() {
            return None;
        }
        let (best, _) = self.searcher.search(state, moves);
        match best {
            Some(m) => Some(m),
            None => {
                tracing::warn!("search returned no move, playing a random one");
                self.fallback.select(state, moves)
            }
        }
    }

    fn name(&self) -> &str {
        "negamax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    #[test]
    fn random_mover_picks_legal_moves() {
        let mut state = GameState::new();
        let moves = state.legal_moves();
        let mut mover = RandomMover::seeded(42);
        for _ in 0..20 {
            let m = mover.select(&mut state, moves.as_slice()).unwrap();
            assert!(moves.iter().any(|l| *l == m));
        }
        assert_eq!(mover.select(&mut state, &[]), None);
    }

    #[test]
    fn negamax_finds_mate() {
        let mut state = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let moves = state.legal_moves();
        let mut selector = Negamax::seeded(SearchConfig::default(), 1);
        let m = selector.select(&mut state, moves.as_slice()).unwrap();
        assert_eq!(m.to(), Square::A8);
        assert_eq!(selector.name(), "negamax");
    }

    #[test]
    fn selectors_as_trait_objects() {
        let mut state = GameState::new();
        let mut players: Vec<Box<dyn MoveSelector>> = vec![
            Box::new(Negamax::seeded(SearchConfig::default(), 3)),
            Box::new(RandomMover::seeded(3)),
        ];
        for player in players.iter_mut() {
            let moves = state.legal_moves();
            let m = player.select(&mut state, moves.as_slice()).unwrap();
            state.make_move(m).unwrap();
        }
        assert_eq!(state.move_log().len(), 2);
    }
}
