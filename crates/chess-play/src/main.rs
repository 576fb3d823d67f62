//! Chess Play - headless driver for the rules engine and search.

mod config;
mod game_runner;

use anyhow::Context;
use chess_engine::{perft, perft_divide, GameState};
use clap::{Parser, Subcommand};
use config::PlayConfig;
use game_runner::GameRunner;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Self-play, perft and move listing for the chess engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the configured players against each other
    Selfplay {
        /// Path to the play configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Starting position in FEN
        #[arg(long)]
        fen: Option<String>,
        /// Stop after this many plies
        #[arg(long)]
        max_plies: Option<usize>,
        /// Seed for the random players
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        #[arg(short, long)]
        depth: u32,
        /// Starting position in FEN
        #[arg(long)]
        fen: Option<String>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
    /// List the legal moves of a position
    Moves {
        /// Position in FEN
        #[arg(long)]
        fen: Option<String>,
    },
}

fn load_state(fen: Option<&str>) -> anyhow::Result<GameState> {
    match fen {
        Some(fen) => GameState::from_fen(fen).with_context(|| format!("bad position: {}", fen)),
        None => Ok(GameState::new()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Selfplay {
            config,
            fen,
            max_plies,
            seed,
        } => {
            let path = config.unwrap_or_else(PlayConfig::config_path);
            let mut play = PlayConfig::load(&path)
                .with_context(|| format!("loading {}", path.display()))?;
            if let Some(max_plies) = max_plies {
                play.max_plies = max_plies;
            }
            if seed.is_some() {
                play.seed = seed;
            }

            let state = load_state(fen.as_deref())?;
            tracing::info!(
                white = ?play.white,
                black = ?play.black,
                depth = play.search.depth,
                "Starting self-play"
            );

            let mut runner = GameRunner::from_config(&play);
            let record = runner.play_game(state)?;

            for (i, pair) in record.moves.chunks(2).enumerate() {
                let line: Vec<String> = pair.iter().map(|m| m.notation()).collect();
                println!("{:>3}. {}", i + 1, line.join(" "));
            }
            println!();
            println!("{}", record.state.board());
            match record.outcome {
                Some(outcome) => println!("{}", outcome),
                None => {
                    tracing::warn!("Ply limit of {} reached", play.max_plies);
                    println!("Unfinished after {} plies", record.moves.len());
                }
            }
        }

        Commands::Perft { depth, fen, divide } => {
            let mut state = load_state(fen.as_deref())?;
            if divide {
                let results = perft_divide(&mut state, depth);
                let total: u64 = results.iter().map(|(_, n)| n).sum();
                for (mv, nodes) in &results {
                    println!("{}: {}", mv, nodes);
                }
                println!();
                println!("Nodes searched: {}", total);
            } else {
                println!("Nodes searched: {}", perft(&mut state, depth));
            }
        }

        Commands::Moves { fen } => {
            let mut state = load_state(fen.as_deref())?;
            let moves = state.legal_moves();
            println!("{}", state.board());
            println!();
            println!("{} to move, {} legal moves", state.side_to_move(), moves.len());
            let line: Vec<String> = moves.iter().map(|m| m.notation()).collect();
            println!("{}", line.join(" "));

            let status = state.status();
            if status.in_check {
                println!("Check");
            }
            if let Some(outcome) = state.outcome() {
                println!("{}", outcome);
            }
        }
    }

    Ok(())
}
