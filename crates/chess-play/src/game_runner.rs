//! Plays one game between two move selectors.

use chess_ai::{MoveSelector, Negamax, RandomMover, SearchConfig};
use chess_core::{Color, Move};
use chess_engine::{EngineError, GameState, Outcome};

use crate::config::{PlayConfig, PlayerKind};

/// A finished (or abandoned) game.
#[derive(Debug)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    /// `None` if the ply limit was reached first.
    pub outcome: Option<Outcome>,
    pub state: GameState,
}

/// Builds the selector for one side.
pub fn make_player(kind: PlayerKind, search: SearchConfig, seed: Option<u64>) -> Box<dyn MoveSelector> {
    match (kind, seed) {
        (PlayerKind::Ai, Some(seed)) => Box::new(Negamax::seeded(search, seed)),
        (PlayerKind::Ai, None) => Box::new(Negamax::new(search)),
        (PlayerKind::Random, Some(seed)) => Box::new(RandomMover::seeded(seed)),
        (PlayerKind::Random, None) => Box::new(RandomMover::from_entropy()),
    }
}

pub struct GameRunner {
    white: Box<dyn MoveSelector>,
    black: Box<dyn MoveSelector>,
    max_plies: usize,
}

impl GameRunner {
    pub fn new(white: Box<dyn MoveSelector>, black: Box<dyn MoveSelector>, max_plies: usize) -> Self {
        GameRunner {
            white,
            black,
            max_plies,
        }
    }

    pub fn from_config(config: &PlayConfig) -> Self {
        let seeds = config.seed.map(|s| (s, s.wrapping_add(1)));
        GameRunner::new(
            make_player(config.white, config.search, seeds.map(|s| s.0)),
            make_player(config.black, config.search, seeds.map(|s| s.1)),
            config.max_plies,
        )
    }

    /// Plays from `state` until checkmate, stalemate, or the ply limit.
    pub fn play_game(&mut self, mut state: GameState) -> Result<GameRecord, EngineError> {
        let mut moves = Vec::new();

        loop {
            let legal = state.legal_moves();
            if legal.is_empty() || moves.len() >= self.max_plies {
                break;
            }

            let current = match state.side_to_move() {
                Color::White => &mut self.white,
                Color::Black => &mut self.black,
            };

            let Some(choice) = current.select(&mut state, legal.as_slice()) else {
                break;
            };
            let played = state.make_move(choice)?;
            tracing::debug!(
                ply = moves.len() + 1,
                player = current.name(),
                mv = %played.notation(),
                "move played"
            );
            moves.push(played);
        }

        let outcome = state.outcome();
        Ok(GameRecord {
            moves,
            outcome,
            state,
        })
    }
}
