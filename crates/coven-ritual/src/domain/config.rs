//! Balance configuration for a simulation run.
//!
//! Every threshold, probability, ingredient bucket and role table the engine
//! reads lives here. `BalanceConfig::default()` is the reference balance;
//! alternative balances can be deserialized (any omitted field keeps its
//! default) and run side by side.

use coven_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Coven/Hollow split for one supported player count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleComposition {
    /// Total seats at the table.
    pub players: usize,
    /// Seats dealt to the Coven.
    pub coven: usize,
    /// Seats dealt to the Hollow.
    pub hollow: usize,
}

impl RoleComposition {
    const fn new(players: usize, coven: usize, hollow: usize) -> Self {
        Self {
            players,
            coven,
            hollow,
        }
    }
}

/// How many copies of each bucket an alignment's draw pool holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolWeights {
    /// Copies of the SAFE bucket.
    pub safe: usize,
    /// Copies of the NEUTRAL bucket.
    pub neutral: usize,
    /// Copies of the CORRUPT bucket.
    pub corrupt: usize,
}

/// Ingredient values and per-alignment pool weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientBuckets {
    /// SAFE values (negative).
    pub safe: Vec<f64>,
    /// NEUTRAL values (small positive).
    pub neutral: Vec<f64>,
    /// CORRUPT values (larger positive).
    pub corrupt: Vec<f64>,
    /// Pool weights for Coven players.
    pub coven_weights: PoolWeights,
    /// Pool weights for Hollow players.
    pub hollow_weights: PoolWeights,
}

impl Default for IngredientBuckets {
    fn default() -> Self {
        Self {
            safe: vec![-0.15, -0.10],
            neutral: vec![0.05, 0.06, 0.08],
            corrupt: vec![0.12, 0.14, 0.18, 0.30],
            coven_weights: PoolWeights {
                safe: 3,
                neutral: 1,
                corrupt: 1,
            },
            hollow_weights: PoolWeights {
                safe: 1,
                neutral: 1,
                corrupt: 3,
            },
        }
    }
}

/// Suspicion adjustments applied after every ritual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuspicionConfig {
    /// Draws at or above this value raise suspicion.
    pub high_corrupt_threshold: f64,
    /// Added for a high-corrupt draw.
    pub corrupt_penalty: f64,
    /// Subtracted for a draw at or below zero.
    pub safe_relief: f64,
}

impl Default for SuspicionConfig {
    fn default() -> Self {
        Self {
            high_corrupt_threshold: 0.14,
            corrupt_penalty: 1.0,
            safe_relief: 0.25,
        }
    }
}

/// Early-game Coven to Hollow conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfectionConfig {
    /// Smallest table where infection can happen.
    pub min_players: usize,
    /// First round (inclusive) of the infection window.
    pub start_round: u32,
    /// Last round (inclusive) of the infection window.
    pub end_round: u32,
    /// Conversions allowed over a whole game.
    pub max_extra_infected: u32,
    /// Conversion chance after a TAINTED ritual.
    pub tainted_chance: f64,
    /// Conversion chance after a BACKFIRED ritual.
    pub backfired_chance: f64,
}

impl Default for InfectionConfig {
    fn default() -> Self {
        Self {
            min_players: 6,
            start_round: 1,
            end_round: 3,
            max_extra_infected: 1,
            tainted_chance: 0.08,
            backfired_chance: 0.25,
        }
    }
}

/// The Exorcist's one-shot rite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExorcistConfig {
    /// Smallest table that seats an Exorcist.
    pub min_players: usize,
    /// Earliest round the rite can be performed.
    pub min_round: u32,
    /// The most suspicious target must reach this score.
    pub suspicion_threshold: f64,
}

impl Default for ExorcistConfig {
    fn default() -> Self {
        Self {
            min_players: 7,
            min_round: 3,
            suspicion_threshold: 2.0,
        }
    }
}

/// Late-game event that marks one Hollow player as scorched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurgingMoonConfig {
    /// Off in the reference balance.
    pub enabled: bool,
    /// Earliest round the moon can rise.
    pub start_round: u32,
    /// Chance per eligible round.
    pub chance: f64,
}

impl Default for PurgingMoonConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_round: 4,
            chance: 0.25,
        }
    }
}

/// Complete balance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Hard round cap; the majority rule decides games that reach it.
    pub max_rounds: u32,
    /// Per-player normalisation factor of the purity index.
    pub purity_scale: f64,
    /// Purity index below this is PURE.
    pub pure_threshold: f64,
    /// Purity index at or above this is BACKFIRED.
    pub backfire_threshold: f64,
    /// Ingredient buckets and pool weights.
    pub ingredients: IngredientBuckets,
    /// Suspicion tracking.
    pub suspicion: SuspicionConfig,
    /// Infection window and odds.
    pub infection: InfectionConfig,
    /// Exorcist gating.
    pub exorcist: ExorcistConfig,
    /// Purging Moon event.
    pub purging_moon: PurgingMoonConfig,
    /// Role table, one entry per supported player count.
    pub roles: Vec<RoleComposition>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            purity_scale: 0.3,
            pure_threshold: 0.25,
            backfire_threshold: 0.5,
            ingredients: IngredientBuckets::default(),
            suspicion: SuspicionConfig::default(),
            infection: InfectionConfig::default(),
            exorcist: ExorcistConfig::default(),
            purging_moon: PurgingMoonConfig::default(),
            roles: vec![
                RoleComposition::new(3, 2, 1),
                RoleComposition::new(4, 3, 1),
                RoleComposition::new(5, 3, 2),
                RoleComposition::new(6, 4, 2),
                RoleComposition::new(7, 4, 3),
                RoleComposition::new(8, 5, 3),
                RoleComposition::new(9, 5, 4),
            ],
        }
    }
}

fn check_probability(name: &str, value: f64) -> Result<(), DomainError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::InvalidConfig(format!(
            "{name} must be a finite number, got {value}"
        )))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<(), DomainError> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(DomainError::InvalidConfig(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}

fn check_bucket(name: &str, values: &[f64]) -> Result<(), DomainError> {
    if values.is_empty() {
        return Err(DomainError::InvalidConfig(format!(
            "{name} bucket must not be empty"
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(DomainError::InvalidConfig(format!(
            "{name} bucket must hold finite values"
        )));
    }
    Ok(())
}

impl BalanceConfig {
    /// Looks up the role composition for a player count.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedPlayerCount` if the table has no
    /// entry for `player_count`.
    pub fn composition(&self, player_count: usize) -> Result<RoleComposition, DomainError> {
        self.roles
            .iter()
            .find(|c| c.players == player_count)
            .copied()
            .ok_or(DomainError::UnsupportedPlayerCount(player_count))
    }

    /// Player counts the role table supports, in ascending order.
    #[must_use]
    pub fn supported_player_counts(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = self.roles.iter().map(|c| c.players).collect();
        counts.sort_unstable();
        counts
    }

    /// Validates the configuration before any simulation runs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` describing the first problem
    /// found.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_rounds == 0 {
            return Err(DomainError::InvalidConfig(
                "max_rounds must be at least 1".to_owned(),
            ));
        }
        if !(self.purity_scale.is_finite() && self.purity_scale > 0.0) {
            return Err(DomainError::InvalidConfig(
                "purity_scale must be a positive number".to_owned(),
            ));
        }
        if !(0.0 <= self.pure_threshold
            && self.pure_threshold <= self.backfire_threshold
            && self.backfire_threshold <= 1.0)
        {
            return Err(DomainError::InvalidConfig(
                "thresholds must satisfy 0 <= pure_threshold <= backfire_threshold <= 1"
                    .to_owned(),
            ));
        }

        let buckets = &self.ingredients;
        check_bucket("safe", &buckets.safe)?;
        check_bucket("neutral", &buckets.neutral)?;
        check_bucket("corrupt", &buckets.corrupt)?;
        for (name, weights) in [
            ("coven_weights", buckets.coven_weights),
            ("hollow_weights", buckets.hollow_weights),
        ] {
            if weights.safe + weights.neutral + weights.corrupt == 0 {
                return Err(DomainError::InvalidConfig(format!(
                    "{name} must give the pool at least one bucket"
                )));
            }
        }

        check_finite(
            "suspicion.high_corrupt_threshold",
            self.suspicion.high_corrupt_threshold,
        )?;
        check_non_negative("suspicion.corrupt_penalty", self.suspicion.corrupt_penalty)?;
        check_non_negative("suspicion.safe_relief", self.suspicion.safe_relief)?;
        check_finite(
            "exorcist.suspicion_threshold",
            self.exorcist.suspicion_threshold,
        )?;

        check_probability("infection.tainted_chance", self.infection.tainted_chance)?;
        check_probability("infection.backfired_chance", self.infection.backfired_chance)?;
        check_probability("purging_moon.chance", self.purging_moon.chance)?;
        if self.infection.start_round > self.infection.end_round {
            return Err(DomainError::InvalidConfig(
                "infection.start_round must not exceed infection.end_round".to_owned(),
            ));
        }

        if self.roles.is_empty() {
            return Err(DomainError::InvalidConfig(
                "role table must not be empty".to_owned(),
            ));
        }
        for (i, comp) in self.roles.iter().enumerate() {
            if comp.coven == 0 || comp.hollow == 0 {
                return Err(DomainError::InvalidConfig(format!(
                    "role table entry for {} players needs both factions",
                    comp.players
                )));
            }
            if comp.coven + comp.hollow != comp.players {
                return Err(DomainError::InvalidConfig(format!(
                    "role table entry for {} players deals {} seats",
                    comp.players,
                    comp.coven + comp.hollow
                )));
            }
            if self.roles[..i].iter().any(|c| c.players == comp.players) {
                return Err(DomainError::InvalidConfig(format!(
                    "role table lists {} players twice",
                    comp.players
                )));
            }
        }

        Ok(())
    }
}
