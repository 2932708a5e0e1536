//! Round and game state machine.
//!
//! A round runs: pick performer, ritual draws, outcome, suspicion update,
//! backfire elimination, infection check, council vote (only while the
//! performer lives), Exorcist check, Purging Moon. Win conditions are
//! evaluated before and after every round; a game that reaches the round
//! cap is decided by head-count.

use coven_core::error::DomainError;
use coven_core::rng::DeterministicRng;

use super::config::BalanceConfig;
use super::council::{CouncilVerdict, council_vote};
use super::exorcist::{Exorcist, ExorcistOutcome};
use super::infection::{InfectionOutcome, infection_check};
use super::ingredients::choose_ingredient;
use super::outcome::{RitualOutcome, RitualReading, evaluate_ritual};
use super::player::{Alignment, FactionCount, Player, alive_seats};
use super::purging::{PurgingOutcome, purging_moon};
use super::record::{OutcomeRecord, RoundCounts};
use super::roles::assign_roles;
use super::suspicion::SuspicionTracker;

/// Everything that happened in one resolved round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,
    /// Seat that dies if the ritual backfires.
    pub performer: usize,
    /// `(seat, value)` for every player alive at the start of the round.
    pub draws: Vec<(usize, f64)>,
    /// Suspicion change per draw, in the same order as `draws`.
    pub suspicion_deltas: Vec<f64>,
    /// Purity index and outcome.
    pub reading: RitualReading,
    /// The performer, if the ritual backfired.
    pub backfire_victim: Option<usize>,
    /// Infection check result.
    pub infection: InfectionOutcome,
    /// Council verdict, if a vote was held.
    pub council: Option<CouncilVerdict>,
    /// Exorcist check result.
    pub exorcist: ExorcistOutcome,
    /// Purging Moon result.
    pub purging: PurgingOutcome,
}

impl RoundReport {
    /// Seat scorched by the Purging Moon this round.
    #[must_use]
    pub fn scorched(&self) -> Option<usize> {
        match self.purging {
            PurgingOutcome::Scorched { seat } => Some(seat),
            PurgingOutcome::Dormant => None,
        }
    }
}

/// Mutable state of one game in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    players: Vec<Player>,
    suspicion: SuspicionTracker,
    last_ingredients: Vec<Option<f64>>,
    round: u32,
    exorcist: Exorcist,
    extra_infected: u32,
}

impl GameState {
    /// Deals roles and appoints the Exorcist for a fresh game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedPlayerCount` if the role table has no
    /// entry for `player_count`.
    pub fn new(
        config: &BalanceConfig,
        player_count: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, DomainError> {
        let players: Vec<Player> = assign_roles(config, player_count, rng)?
            .into_iter()
            .map(Player::new)
            .collect();
        let exorcist = Exorcist::appoint(&config.exorcist, &players, rng);
        Ok(Self::with_players(players, exorcist))
    }

    /// Starts a game from an explicit seating.
    #[must_use]
    pub fn with_players(players: Vec<Player>, exorcist: Exorcist) -> Self {
        let n = players.len();
        Self {
            players,
            suspicion: SuspicionTracker::new(n),
            last_ingredients: vec![None; n],
            round: 0,
            exorcist,
            extra_infected: 0,
        }
    }

    /// Replaces the suspicion scores.
    #[must_use]
    pub fn with_suspicion(mut self, suspicion: SuspicionTracker) -> Self {
        self.suspicion = suspicion;
        self
    }

    /// Seats, indexed by seat number.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Current suspicion scores.
    #[must_use]
    pub fn suspicion(&self) -> &SuspicionTracker {
        &self.suspicion
    }

    /// Number of the last round played; 0 before the first.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Exorcist seat and usage.
    #[must_use]
    pub fn exorcist(&self) -> Exorcist {
        self.exorcist
    }

    /// Infections so far.
    #[must_use]
    pub fn extra_infected(&self) -> u32 {
        self.extra_infected
    }

    /// The decisive winner at this point, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Alignment> {
        FactionCount::alive(&self.players).decisive_winner()
    }

    /// Plays the next round.
    ///
    /// # Panics
    ///
    /// Panics if no player is alive. A decisive winner always exists by
    /// then, so callers that check [`GameState::winner`] first never hit it.
    pub fn play_round(
        &mut self,
        config: &BalanceConfig,
        rng: &mut dyn DeterministicRng,
    ) -> RoundReport {
        self.round += 1;
        let round = self.round;

        let alive = alive_seats(&self.players);
        let performer = alive[rng.next_index(alive.len())];

        let mut draws = Vec::with_capacity(alive.len());
        for &seat in &alive {
            let value = choose_ingredient(
                &config.ingredients,
                self.players[seat].alignment,
                self.last_ingredients[seat],
                rng,
            );
            self.last_ingredients[seat] = Some(value);
            draws.push((seat, value));
        }
        let contributions: Vec<f64> = draws.iter().map(|&(_, v)| v).collect();
        let reading = evaluate_ritual(&contributions, config);
        let suspicion_deltas = self.suspicion.record_round(&config.suspicion, &draws);

        let backfire_victim = if reading.outcome == RitualOutcome::Backfired {
            self.players[performer].alive = false;
            Some(performer)
        } else {
            None
        };

        let infection = infection_check(
            &config.infection,
            round,
            reading.outcome,
            &mut self.extra_infected,
            &mut self.players,
            rng,
        );

        let council = if self.players[performer].alive {
            let voters = alive_seats(&self.players);
            let verdict = council_vote(&voters, &self.players, &self.suspicion, rng);
            if let Some(verdict) = &verdict {
                self.players[verdict.eliminated].alive = false;
            }
            verdict
        } else {
            None
        };

        let exorcist =
            self.exorcist
                .attempt(&config.exorcist, round, &mut self.players, &self.suspicion);
        let purging = purging_moon(&config.purging_moon, round, &mut self.players, rng);

        tracing::trace!(
            round,
            performer,
            purity = reading.purity_index,
            outcome = ?reading.outcome,
            eliminated = ?council.as_ref().map(|v| v.eliminated),
            "round resolved"
        );

        RoundReport {
            round,
            performer,
            draws,
            suspicion_deltas,
            reading,
            backfire_victim,
            infection,
            council,
            exorcist,
            purging,
        }
    }

    /// Plays rounds until a faction wins or the round cap is reached.
    pub fn play_out(
        mut self,
        config: &BalanceConfig,
        rng: &mut dyn DeterministicRng,
    ) -> OutcomeRecord {
        let mut counts = RoundCounts::default();

        while self.round < config.max_rounds {
            if let Some(winner) = self.winner() {
                return self.finish(winner, counts);
            }
            let report = self.play_round(config, rng);
            counts.absorb(&report);
            if let Some(winner) = self.winner() {
                return self.finish(winner, counts);
            }
        }

        let winner = FactionCount::alive(&self.players).majority_winner();
        tracing::debug!(rounds = self.round, "round cap reached");
        self.finish(winner, counts)
    }

    fn finish(&self, winner: Alignment, counts: RoundCounts) -> OutcomeRecord {
        tracing::debug!(
            players = self.players.len(),
            rounds = counts.rounds,
            winner = ?winner,
            "game over"
        );
        OutcomeRecord { winner, counts }
    }
}

/// Runs one complete game for `player_count` players.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedPlayerCount` if the role table has no
/// entry for `player_count`.
pub fn run_game(
    config: &BalanceConfig,
    player_count: usize,
    rng: &mut dyn DeterministicRng,
) -> Result<OutcomeRecord, DomainError> {
    let state = GameState::new(config, player_count, rng)?;
    Ok(state.play_out(config, rng))
}

/// A validated balance configuration ready to run games.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: BalanceConfig,
}

impl Simulation {
    /// Validates `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` if validation fails.
    pub fn new(config: BalanceConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The balance configuration in use.
    #[must_use]
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Runs one complete game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedPlayerCount` if the role table has no
    /// entry for `player_count`.
    pub fn run_game(
        &self,
        player_count: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<OutcomeRecord, DomainError> {
        run_game(&self.config, player_count, rng)
    }
}
