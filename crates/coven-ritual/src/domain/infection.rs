//! Early-game infection: a TAINTED or BACKFIRED ritual may turn a living
//! Coven player Hollow.

use coven_core::rng::DeterministicRng;

use super::config::InfectionConfig;
use super::outcome::RitualOutcome;
use super::player::{Alignment, Player, alive_seats_of};

/// Result of a round's infection check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfectionOutcome {
    /// Table too small, round outside the window, or budget spent.
    Ineligible,
    /// Eligible, but nobody was converted.
    Spared,
    /// These seats were converted, in order.
    Infected(Vec<usize>),
}

impl InfectionOutcome {
    /// Whether this round counts as an infection event.
    #[must_use]
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Infected(_))
    }
}

fn convert_random_coven(players: &mut [Player], rng: &mut dyn DeterministicRng) -> Option<usize> {
    let coven = alive_seats_of(players, Alignment::Coven);
    if coven.is_empty() {
        return None;
    }
    let seat = coven[rng.next_index(coven.len())];
    players[seat].alignment = Alignment::Hollow;
    players[seat].infected = true;
    Some(seat)
}

/// Runs the infection check after a ritual.
///
/// The budget gate is checked once on entry. The TAINTED and BACKFIRED
/// rolls are independent and each is only drawn when the outcome matches.
/// `extra_infected` is incremented for every conversion.
pub fn infection_check(
    config: &InfectionConfig,
    round: u32,
    outcome: RitualOutcome,
    extra_infected: &mut u32,
    players: &mut [Player],
    rng: &mut dyn DeterministicRng,
) -> InfectionOutcome {
    if players.len() < config.min_players
        || round < config.start_round
        || round > config.end_round
        || *extra_infected >= config.max_extra_infected
    {
        return InfectionOutcome::Ineligible;
    }

    let mut converted = Vec::new();

    if outcome == RitualOutcome::Tainted && rng.next_f64() < config.tainted_chance {
        if let Some(seat) = convert_random_coven(players, rng) {
            *extra_infected += 1;
            converted.push(seat);
        }
    }

    if outcome == RitualOutcome::Backfired && rng.next_f64() < config.backfired_chance {
        if let Some(seat) = convert_random_coven(players, rng) {
            *extra_infected += 1;
            converted.push(seat);
        }
    }

    if converted.is_empty() {
        InfectionOutcome::Spared
    } else {
        tracing::debug!(round, seats = ?converted, "infection spread");
        InfectionOutcome::Infected(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coven_test_support::SequenceRng;

    fn six_seats() -> Vec<Player> {
        (0..6)
            .map(|i| {
                Player::new(if i < 4 {
                    Alignment::Coven
                } else {
                    Alignment::Hollow
                })
            })
            .collect()
    }

    #[test]
    fn test_backfire_roll_converts_random_coven() {
        let mut players = six_seats();
        let mut extra = 0;
        let mut rng = SequenceRng::new(vec![2]).with_floats(vec![0.1]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            1,
            RitualOutcome::Backfired,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Infected(vec![2]));
        assert!(outcome.is_event());
        assert_eq!(players[2].alignment, Alignment::Hollow);
        assert!(players[2].infected);
        assert_eq!(extra, 1);
    }

    #[test]
    fn test_tainted_roll_uses_lower_chance() {
        let mut players = six_seats();
        let mut extra = 0;
        // 0.1 beats the backfire odds but not the tainted odds.
        let mut rng = SequenceRng::new(vec![]).with_floats(vec![0.1]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            2,
            RitualOutcome::Tainted,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Spared);
        assert!(!outcome.is_event());
        assert_eq!(extra, 0);
    }

    #[test]
    fn test_pure_round_never_infects() {
        let mut players = six_seats();
        let mut extra = 0;
        let mut rng = SequenceRng::new(vec![]).with_floats(vec![0.0, 0.0]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            1,
            RitualOutcome::Pure,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Spared);
    }

    #[test]
    fn test_outside_window_is_ineligible() {
        let mut players = six_seats();
        let mut extra = 0;
        let mut rng = SequenceRng::new(vec![0]).with_floats(vec![0.0]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            4,
            RitualOutcome::Backfired,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Ineligible);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_small_table_is_ineligible() {
        let mut players: Vec<Player> = six_seats().into_iter().take(5).collect();
        let mut extra = 0;
        let mut rng = SequenceRng::new(vec![0]).with_floats(vec![0.0]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            1,
            RitualOutcome::Backfired,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Ineligible);
    }

    #[test]
    fn test_spent_budget_is_ineligible() {
        let mut players = six_seats();
        let mut extra = 1;
        let mut rng = SequenceRng::new(vec![0]).with_floats(vec![0.0]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            2,
            RitualOutcome::Backfired,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Ineligible);
        assert!(players.iter().all(|p| !p.infected));
    }

    #[test]
    fn test_no_living_coven_means_spared() {
        let mut players = six_seats();
        for p in players.iter_mut().take(4) {
            p.alive = false;
        }
        let mut extra = 0;
        let mut rng = SequenceRng::new(vec![]).with_floats(vec![0.0]);

        let outcome = infection_check(
            &InfectionConfig::default(),
            1,
            RitualOutcome::Backfired,
            &mut extra,
            &mut players,
            &mut rng,
        );

        assert_eq!(outcome, InfectionOutcome::Spared);
        assert_eq!(extra, 0);
    }
}
