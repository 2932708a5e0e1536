//! Batch driver: runs many games per player count and sums their records.
//!
//! Every game gets its own RNG stream derived from the batch seed, the
//! player count and the game index, so a seeded batch produces the same
//! report whether it runs sequentially or across rayon workers.

use coven_core::error::DomainError;
use coven_core::rng::{SeededRng, entropy_seed, stream_seed};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::game::Simulation;
use crate::domain::player::Alignment;
use crate::domain::record::{OutcomeRecord, RoundCounts};

/// What to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSettings {
    /// Smallest player count (inclusive).
    pub min_players: usize,
    /// Largest player count (inclusive).
    pub max_players: usize,
    /// Games simulated per player count.
    pub games_per_count: u32,
    /// Batch seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Spread games across the rayon thread pool.
    pub parallel: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            min_players: 3,
            max_players: 9,
            games_per_count: 1000,
            seed: None,
            parallel: true,
        }
    }
}

/// Summed outcomes for one player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCountStats {
    /// Seats at the table.
    pub player_count: usize,
    /// Games simulated.
    pub games: u64,
    /// Games won by the Coven.
    pub coven_wins: u64,
    /// Games won by the Hollow.
    pub hollow_wins: u64,
    /// Summed per-game counters.
    pub totals: RoundCounts,
}

impl PlayerCountStats {
    /// Empty stats for a player count.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            games: 0,
            coven_wins: 0,
            hollow_wins: 0,
            totals: RoundCounts::default(),
        }
    }

    /// Folds one game record in.
    pub fn record(&mut self, outcome: &OutcomeRecord) {
        self.games += 1;
        match outcome.winner {
            Alignment::Coven => self.coven_wins += 1,
            Alignment::Hollow => self.hollow_wins += 1,
        }
        self.totals.add(&outcome.counts);
    }

    /// Per-game average of a counter; zero when no games were played.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn per_game(&self, total: u64) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            total as f64 / self.games as f64
        }
    }

    /// Share of games the Coven won.
    #[must_use]
    pub fn coven_win_rate(&self) -> f64 {
        self.per_game(self.coven_wins)
    }

    /// Share of games the Hollow won.
    #[must_use]
    pub fn hollow_win_rate(&self) -> f64 {
        self.per_game(self.hollow_wins)
    }
}

/// Result of a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Seed the batch ran with; rerun with it to reproduce the report.
    pub seed: u64,
    /// Games simulated per player count.
    pub games_per_count: u32,
    /// Whether Purging Moon counts are meaningful for this run.
    pub purging_moon_enabled: bool,
    /// One entry per player count, ascending.
    pub stats: Vec<PlayerCountStats>,
}

fn game_seed(base: u64, player_count: usize, game: u32) -> u64 {
    let count = u64::try_from(player_count).unwrap_or(u64::MAX);
    stream_seed(base, (count << 32) | u64::from(game))
}

fn run_count(
    simulation: &Simulation,
    player_count: usize,
    settings: &BatchSettings,
    seed: u64,
) -> Result<PlayerCountStats, DomainError> {
    let play = |game: u32| {
        let mut rng = SeededRng::from_seed(game_seed(seed, player_count, game));
        simulation.run_game(player_count, &mut rng)
    };

    let records: Vec<OutcomeRecord> = if settings.parallel {
        (0..settings.games_per_count)
            .into_par_iter()
            .map(play)
            .collect::<Result<_, _>>()?
    } else {
        (0..settings.games_per_count)
            .map(play)
            .collect::<Result<_, _>>()?
    };

    let mut stats = PlayerCountStats::new(player_count);
    for record in &records {
        stats.record(record);
    }
    Ok(stats)
}

/// Runs `games_per_count` games for every player count in range.
///
/// # Errors
///
/// Returns `DomainError::InvalidConfig` if the player range is empty, or
/// `DomainError::UnsupportedPlayerCount` if any count in range has no role
/// table entry. Both are checked before any game runs.
pub fn run_batch(
    simulation: &Simulation,
    settings: &BatchSettings,
) -> Result<BatchReport, DomainError> {
    if settings.min_players > settings.max_players {
        return Err(DomainError::InvalidConfig(format!(
            "player range {}..={} is empty",
            settings.min_players, settings.max_players
        )));
    }
    let counts: Vec<usize> = (settings.min_players..=settings.max_players).collect();
    for &n in &counts {
        simulation.config().composition(n)?;
    }

    let seed = settings.seed.unwrap_or_else(entropy_seed);
    tracing::info!(
        seed,
        games_per_count = settings.games_per_count,
        min_players = settings.min_players,
        max_players = settings.max_players,
        parallel = settings.parallel,
        "starting batch"
    );

    let mut stats = Vec::with_capacity(counts.len());
    for n in counts {
        let count_stats = run_count(simulation, n, settings, seed)?;
        tracing::info!(
            player_count = n,
            coven_wins = count_stats.coven_wins,
            hollow_wins = count_stats.hollow_wins,
            "player count finished"
        );
        stats.push(count_stats);
    }

    Ok(BatchReport {
        seed,
        games_per_count: settings.games_per_count,
        purging_moon_enabled: simulation.config().purging_moon.enabled,
        stats,
    })
}
