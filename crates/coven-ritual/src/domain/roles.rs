//! Role assignment.

use coven_core::error::DomainError;
use coven_core::rng::DeterministicRng;

use super::config::BalanceConfig;
use super::player::Alignment;

/// Deals alignments for `player_count` seats from the role table and
/// shuffles them so faction is not correlated with seat index.
///
/// # Errors
///
/// Returns `DomainError::UnsupportedPlayerCount` if the role table has no
/// entry for `player_count`.
pub fn assign_roles(
    config: &BalanceConfig,
    player_count: usize,
    rng: &mut dyn DeterministicRng,
) -> Result<Vec<Alignment>, DomainError> {
    let composition = config.composition(player_count)?;

    let mut roles = Vec::with_capacity(player_count);
    roles.extend(std::iter::repeat_n(Alignment::Coven, composition.coven));
    roles.extend(std::iter::repeat_n(Alignment::Hollow, composition.hollow));

    // Fisher-Yates.
    for i in (1..roles.len()).rev() {
        let j = rng.next_index(i + 1);
        roles.swap(i, j);
    }

    Ok(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coven_core::rng::SeededRng;
    use coven_test_support::{MockRng, SequenceRng};

    #[test]
    fn test_assign_roles_matches_table_for_every_supported_count() {
        let config = BalanceConfig::default();
        let mut rng = SeededRng::from_seed(99);

        for n in 3..=9 {
            let composition = config.composition(n).unwrap();
            let roles = assign_roles(&config, n, &mut rng).unwrap();

            assert_eq!(roles.len(), n);
            let coven = roles.iter().filter(|a| **a == Alignment::Coven).count();
            let hollow = roles.iter().filter(|a| **a == Alignment::Hollow).count();
            assert_eq!((coven, hollow), (composition.coven, composition.hollow));
        }
    }

    #[test]
    fn test_assign_roles_identity_swaps_keep_table_order() {
        let config = BalanceConfig::default();
        // j == i at every step leaves the list untouched.
        let mut rng = SequenceRng::new(vec![2, 1]);

        let roles = assign_roles(&config, 3, &mut rng).unwrap();

        assert_eq!(
            roles,
            vec![Alignment::Coven, Alignment::Coven, Alignment::Hollow]
        );
    }

    #[test]
    fn test_assign_roles_follows_scripted_swaps() {
        let config = BalanceConfig::default();
        let mut rng = MockRng;

        let roles = assign_roles(&config, 3, &mut rng).unwrap();

        // swap(2, 0) then swap(1, 0)
        assert_eq!(
            roles,
            vec![Alignment::Coven, Alignment::Hollow, Alignment::Coven]
        );
    }

    #[test]
    fn test_assign_roles_spreads_hollow_across_seats() {
        let config = BalanceConfig::default();
        let mut rng = SeededRng::from_seed(5);
        let mut hollow_at_seat = [0u32; 3];

        for _ in 0..600 {
            let roles = assign_roles(&config, 3, &mut rng).unwrap();
            let seat = roles.iter().position(|a| *a == Alignment::Hollow).unwrap();
            hollow_at_seat[seat] += 1;
        }

        for count in hollow_at_seat {
            assert!(count > 120, "seat distribution skewed: {hollow_at_seat:?}");
        }
    }

    #[test]
    fn test_assign_roles_rejects_unsupported_count() {
        let config = BalanceConfig::default();
        let mut rng = MockRng;

        assert_eq!(
            assign_roles(&config, 10, &mut rng),
            Err(DomainError::UnsupportedPlayerCount(10))
        );
        assert_eq!(
            assign_roles(&config, 2, &mut rng),
            Err(DomainError::UnsupportedPlayerCount(2))
        );
    }
}
