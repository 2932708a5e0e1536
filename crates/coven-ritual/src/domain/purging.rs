//! The Purging Moon: a late-game event that scorches one Hollow player.
//!
//! Scorching is a spotlight only. It changes neither alignment, life nor
//! suspicion, so enabling the moon leaves win rates untouched and only adds
//! to the event counts.

use coven_core::rng::DeterministicRng;

use super::config::PurgingMoonConfig;
use super::player::{Alignment, Player};

/// Result of a round's Purging Moon check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgingOutcome {
    /// Disabled, too early, roll failed or no Hollow alive.
    Dormant,
    /// This seat was scorched.
    Scorched {
        /// Seat that was marked.
        seat: usize,
    },
}

/// Rolls the Purging Moon. Infected Hollow players are marked first.
pub fn purging_moon(
    config: &PurgingMoonConfig,
    round: u32,
    players: &mut [Player],
    rng: &mut dyn DeterministicRng,
) -> PurgingOutcome {
    if !config.enabled || round < config.start_round {
        return PurgingOutcome::Dormant;
    }
    if rng.next_f64() >= config.chance {
        return PurgingOutcome::Dormant;
    }

    let hollow = |infected: bool| -> Vec<usize> {
        players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive_as(Alignment::Hollow) && p.infected == infected)
            .map(|(i, _)| i)
            .collect()
    };
    let mut candidates = hollow(true);
    if candidates.is_empty() {
        candidates = hollow(false);
    }
    if candidates.is_empty() {
        return PurgingOutcome::Dormant;
    }

    let seat = candidates[rng.next_index(candidates.len())];
    players[seat].scorched = true;
    tracing::debug!(round, seat, "purging moon scorched a player");
    PurgingOutcome::Scorched { seat }
}
