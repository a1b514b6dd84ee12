use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use grid_2048::config::PlayConfig;
use grid_2048::engine::{Game, GameStatus, GameSummary};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "grid-2048",
    version,
    about = "Play 2048 games with a random move policy and report outcomes"
)]
struct Cli {
    /// Optional TOML config; flags below override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Board side length
    #[arg(long, value_name = "N")]
    size: Option<usize>,
    /// Number of games to play in parallel
    #[arg(long, value_name = "N")]
    games: Option<usize>,
    /// Stop each game after this many board-changing moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u64>,
    /// Base seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,
    /// Print one JSON summary per game on stdout
    #[arg(long)]
    json: bool,
    /// Print each final board
    #[arg(long)]
    show: bool,
}

struct Played {
    summary: GameSummary,
    board: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut cfg = match &cli.config {
        Some(path) => PlayConfig::from_toml(path)?,
        None => PlayConfig::default(),
    };
    if let Some(size) = cli.size {
        cfg.size = size;
    }
    if let Some(games) = cli.games {
        cfg.games = games;
    }
    if let Some(max_moves) = cli.max_moves {
        cfg.max_moves = max_moves;
    }
    if cli.seed.is_some() {
        cfg.seed = cli.seed;
    }
    cfg.validate()?;
    info!(
        "Playing {} game(s) on a {}x{} board (max {} moves)",
        cfg.games, cfg.size, cfg.size, cfg.max_moves
    );

    let results: Vec<Played> = (0..cfg.games)
        .into_par_iter()
        .map(|idx| play_one(&cfg, idx))
        .collect::<Result<_>>()?;

    for (idx, played) in results.iter().enumerate() {
        let s = &played.summary;
        info!(
            "game {}: {:?} score={} moves={} max_tile={}",
            idx, s.status, s.score, s.moves, s.max_tile
        );
        if cli.show {
            println!("{}", played.board);
        }
        if cli.json {
            println!("{}", serde_json::to_string(s)?);
        }
    }

    if !results.is_empty() {
        let best = results.iter().map(|p| p.summary.score).max().unwrap_or(0);
        let total: f64 = results.iter().map(|p| p.summary.score as f64).sum();
        let mean = total / results.len() as f64;
        let wins = results.iter().filter(|p| p.summary.status == GameStatus::Won).count();
        info!("best score: {}, mean score: {:.1}, wins: {}/{}", best, mean, wins, results.len());
    }
    Ok(())
}

fn play_one(cfg: &PlayConfig, idx: usize) -> Result<Played> {
    let (mut game, mut policy) = match cfg.seed_for(idx) {
        Some(seed) => (Game::seeded(cfg.size, seed)?, StdRng::seed_from_u64(seed.rotate_left(32))),
        None => (Game::new(cfg.size)?, StdRng::from_entropy()),
    };
    while game.is_playable() && game.moves() < cfg.max_moves {
        let legal = game.legal_moves();
        let Some(&direction) = legal.choose(&mut policy) else {
            break;
        };
        game.apply_move(direction);
    }
    debug!("game {} finished after {} moves", idx, game.moves());
    Ok(Played {
        summary: game.summary(),
        board: game.board().to_string(),
    })
}
