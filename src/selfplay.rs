//! Random self-play.
//!
//! Plays complete games by picking uniformly among the non-full columns.
//! Used to exercise the engine over many positions and to benchmark it.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::board::{lowest_open_cell, PlayerId, ALL_COLUMNS};
use crate::config::{ConfigError, GameConfig};
use crate::engine::Engine;
use crate::record::{GameRecord, Stats};

/// Configuration for random self-play.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Number of worker threads; 1 plays sequentially.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` is seeded with `seed + i`.
    pub seed: u64,
    /// Players and storage key; only the players are used here.
    pub game: GameConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 100,
            threads: 4,
            seed: 0,
            game: GameConfig::default(),
        }
    }
}

fn game_rng(seed: u64, game_index: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_index as u64))
    } else {
        SmallRng::from_entropy()
    }
}

/// Plays uniformly random legal moves until the game completes.
pub fn play_random_game(mut engine: Engine, rng: &mut SmallRng) -> GameRecord {
    while !engine.status().is_complete {
        let occupied = engine.occupancy();
        let open: Vec<u8> = ALL_COLUMNS
            .iter()
            .filter(|c| lowest_open_cell(**c, occupied).is_some())
            .map(|c| c.number())
            .collect();
        // An incomplete game always has an open column.
        let Some(&column) = open.choose(rng) else {
            break;
        };
        if let Err(e) = engine.attempt_move(column) {
            log::error!("random move into column {} rejected: {}", column, e);
            break;
        }
    }
    engine.end_game()
}

/// Plays `config.num_games` random games, in parallel when `threads > 1`.
///
/// Results are returned in game-index order regardless of thread count.
pub fn run_random_games(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let fresh = Engine::from_config(&config.game)?;
    if config.threads <= 1 {
        return Ok((0..config.num_games)
            .map(|i| play_random_game(fresh.clone(), &mut game_rng(config.seed, i)))
            .collect());
    }

    let play_all = || {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| play_random_game(fresh.clone(), &mut game_rng(config.seed, i)))
            .collect::<Vec<GameRecord>>()
    };

    let games = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool.install(play_all),
        Err(e) => {
            log::warn!("failed to build thread pool ({}); using the global pool", e);
            play_all()
        }
    };
    Ok(games)
}

/// Aggregate results of a batch of games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub games: usize,
    pub stats: Stats,
    /// Mean number of moves per game, rounded down.
    pub avg_moves: usize,
    /// Games won by the player who moved first.
    pub first_player_wins: usize,
}

/// Tallies a batch of games.
pub fn summarize(config: &GameConfig, games: &[GameRecord]) -> Summary {
    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let stats = Stats::tally(&config.players, games);
    Summary {
        games: games.len(),
        first_player_wins: stats.wins(PlayerId::One),
        stats,
        avg_moves: total_moves / games.len().max(1),
    }
}

/// Writes one JSON record per line.
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}
