//! The Exorcist's one-shot Rite of Cleansing.

use coven_core::rng::DeterministicRng;

use super::config::ExorcistConfig;
use super::player::{Alignment, Player, alive_seats_of};
use super::suspicion::SuspicionTracker;

/// Result of a round's Exorcist check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExorcistOutcome {
    /// Not attempted this round; the rite remains available if it was.
    Skipped,
    /// The target was Hollow and has been cleansed to Coven.
    Hit {
        /// Seat that was cleansed.
        target: usize,
    },
    /// The target was Coven; the Exorcist died.
    Suicide {
        /// Seat that was wrongly accused.
        target: usize,
    },
}

impl ExorcistOutcome {
    /// The rite was performed (and consumed).
    #[must_use]
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::Skipped)
    }

    /// The rite cleansed a Hollow player.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// The rite killed the Exorcist.
    #[must_use]
    pub fn is_suicide(&self) -> bool {
        matches!(self, Self::Suicide { .. })
    }
}

/// Exorcist seat and whether the rite has been spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Exorcist {
    seat: Option<usize>,
    used: bool,
}

impl Exorcist {
    /// No Exorcist at this table.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// An unused Exorcist at `seat`.
    #[must_use]
    pub fn at(seat: usize) -> Self {
        Self {
            seat: Some(seat),
            used: false,
        }
    }

    /// Appoints a uniformly random Coven player when the table is large
    /// enough.
    pub fn appoint(
        config: &ExorcistConfig,
        players: &[Player],
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        if players.len() < config.min_players {
            return Self::none();
        }
        let coven = alive_seats_of(players, Alignment::Coven);
        if coven.is_empty() {
            return Self::none();
        }
        Self::at(coven[rng.next_index(coven.len())])
    }

    /// Seat holding the rite, if any.
    #[must_use]
    pub fn seat(&self) -> Option<usize> {
        self.seat
    }

    /// Whether the rite has been spent.
    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Performs the rite if every gate passes.
    ///
    /// Gates: an appointed, living, unused Exorcist; a table of at least
    /// `min_players`; `round >= min_round`; and a living non-self target
    /// whose suspicion reaches the threshold. A failed gate leaves the rite
    /// available. Otherwise it is consumed: a Hollow target is cleansed, any
    /// other target costs the Exorcist their life.
    pub fn attempt(
        &mut self,
        config: &ExorcistConfig,
        round: u32,
        players: &mut [Player],
        suspicion: &SuspicionTracker,
    ) -> ExorcistOutcome {
        let Some(seat) = self.seat else {
            return ExorcistOutcome::Skipped;
        };
        if self.used
            || players.len() < config.min_players
            || round < config.min_round
            || !players[seat].alive
        {
            return ExorcistOutcome::Skipped;
        }

        let candidates: Vec<usize> = players
            .iter()
            .enumerate()
            .filter(|(i, p)| p.alive && *i != seat)
            .map(|(i, _)| i)
            .collect();
        let Some(target) = suspicion.most_suspicious(&candidates) else {
            return ExorcistOutcome::Skipped;
        };
        if suspicion.score(target) < config.suspicion_threshold {
            return ExorcistOutcome::Skipped;
        }

        self.used = true;
        if players[target].alignment == Alignment::Hollow {
            let cleansed = &mut players[target];
            cleansed.alignment = Alignment::Coven;
            cleansed.infected = false;
            cleansed.cleansed = true;
            tracing::debug!(exorcist = seat, target, round, "exorcist cleansed a hollow");
            ExorcistOutcome::Hit { target }
        } else {
            players[seat].alive = false;
            tracing::debug!(exorcist = seat, target, round, "exorcist rite backfired");
            ExorcistOutcome::Suicide { target }
        }
    }
}
