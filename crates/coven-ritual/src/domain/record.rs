//! Per-game outcome record.

use serde::{Deserialize, Serialize};

use super::game::RoundReport;
use super::outcome::RitualOutcome;
use super::player::Alignment;

/// Event counters for one game, or summed over many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundCounts {
    /// Rounds played (one ritual each).
    pub rounds: u64,
    /// PURE rituals.
    pub pure: u64,
    /// TAINTED rituals.
    pub tainted: u64,
    /// BACKFIRED rituals.
    pub backfired: u64,
    /// Rounds in which at least one infection happened.
    pub infection_events: u64,
    /// Exorcist rites performed.
    pub exorcist_attempts: u64,
    /// Rites that cleansed a Hollow player.
    pub exorcist_hits: u64,
    /// Rites that killed the Exorcist.
    pub exorcist_suicides: u64,
    /// Purging Moon scorchings.
    pub purging_events: u64,
}

impl RoundCounts {
    /// Folds one resolved round into the counters.
    pub fn absorb(&mut self, report: &RoundReport) {
        self.rounds += 1;
        match report.reading.outcome {
            RitualOutcome::Pure => self.pure += 1,
            RitualOutcome::Tainted => self.tainted += 1,
            RitualOutcome::Backfired => self.backfired += 1,
        }
        if report.infection.is_event() {
            self.infection_events += 1;
        }
        if report.exorcist.attempted() {
            self.exorcist_attempts += 1;
        }
        if report.exorcist.is_hit() {
            self.exorcist_hits += 1;
        }
        if report.exorcist.is_suicide() {
            self.exorcist_suicides += 1;
        }
        if report.scorched().is_some() {
            self.purging_events += 1;
        }
    }

    /// Adds another set of counters into this one.
    pub fn add(&mut self, other: &Self) {
        self.rounds += other.rounds;
        self.pure += other.pure;
        self.tainted += other.tainted;
        self.backfired += other.backfired;
        self.infection_events += other.infection_events;
        self.exorcist_attempts += other.exorcist_attempts;
        self.exorcist_hits += other.exorcist_hits;
        self.exorcist_suicides += other.exorcist_suicides;
        self.purging_events += other.purging_events;
    }

    /// Total rituals across all three outcome categories.
    #[must_use]
    pub fn rituals(&self) -> u64 {
        self.pure + self.tainted + self.backfired
    }
}

/// Summary of one finished game, handed to the caller for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Winning faction.
    pub winner: Alignment,
    /// Event counters.
    #[serde(flatten)]
    pub counts: RoundCounts,
}
