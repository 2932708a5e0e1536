//! Ritual outcome evaluation.

use serde::{Deserialize, Serialize};

use super::config::BalanceConfig;

/// The three ritual outcome categories, in increasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RitualOutcome {
    /// Purity index below the pure threshold.
    Pure,
    /// Between the pure and backfire thresholds.
    Tainted,
    /// At or above the backfire threshold; the performer dies.
    Backfired,
}

impl RitualOutcome {
    /// Classifies a purity index against the configured thresholds.
    #[must_use]
    pub fn classify(purity_index: f64, config: &BalanceConfig) -> Self {
        if purity_index < config.pure_threshold {
            Self::Pure
        } else if purity_index < config.backfire_threshold {
            Self::Tainted
        } else {
            Self::Backfired
        }
    }
}

/// Purity index and category for one round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RitualReading {
    /// Normalised corruption in `[0, 1]`.
    pub purity_index: f64,
    /// Category derived from the index.
    pub outcome: RitualOutcome,
}

/// Computes the purity index of a round's contributions.
///
/// Negative (SAFE) values are dropped from the sum rather than subtracted,
/// so they only dilute the index through the fixed per-player denominator.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn purity_index(contributions: &[f64], config: &BalanceConfig) -> f64 {
    if contributions.is_empty() {
        return 0.0;
    }
    let corruption: f64 = contributions.iter().map(|v| v.max(0.0)).sum();
    let denominator = contributions.len() as f64 * config.purity_scale;
    (corruption / denominator).clamp(0.0, 1.0)
}

/// Reduces a round's contributions to a purity index and outcome.
#[must_use]
pub fn evaluate_ritual(contributions: &[f64], config: &BalanceConfig) -> RitualReading {
    let purity_index = purity_index(contributions, config);
    RitualReading {
        purity_index,
        outcome: RitualOutcome::classify(purity_index, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_safe_round_is_pure_with_zero_index() {
        let config = BalanceConfig::default();
        let reading = evaluate_ritual(&[-0.15, -0.10, -0.15], &config);

        assert!(reading.purity_index.abs() < f64::EPSILON);
        assert_eq!(reading.outcome, RitualOutcome::Pure);
    }

    #[test]
    fn test_safe_values_do_not_cancel_corrupt_ones() {
        let config = BalanceConfig::default();
        let with_safe = purity_index(&[0.30, -0.15], &config);
        let with_zero = purity_index(&[0.30, 0.0], &config);

        assert!((with_safe - with_zero).abs() < 1e-12);
        assert!((with_safe - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_index_is_clamped_to_one() {
        let config = BalanceConfig::default();
        let index = purity_index(&[5.0, 9.0], &config);

        assert!((index - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_round_is_pure() {
        let config = BalanceConfig::default();
        assert_eq!(evaluate_ritual(&[], &config).outcome, RitualOutcome::Pure);
    }

    #[test]
    fn test_classify_boundaries_are_exact() {
        let config = BalanceConfig::default();

        assert_eq!(RitualOutcome::classify(0.2499, &config), RitualOutcome::Pure);
        assert_eq!(RitualOutcome::classify(0.25, &config), RitualOutcome::Tainted);
        assert_eq!(RitualOutcome::classify(0.4999, &config), RitualOutcome::Tainted);
        assert_eq!(RitualOutcome::classify(0.5, &config), RitualOutcome::Backfired);
        assert_eq!(RitualOutcome::classify(1.0, &config), RitualOutcome::Backfired);
    }

    #[test]
    fn test_mixed_round_is_tainted() {
        let config = BalanceConfig::default();
        // (0.18 + 0.12 + 0.05) / (4 * 0.3) = 0.2916...
        let reading = evaluate_ritual(&[0.18, 0.12, 0.05, -0.10], &config);

        assert_eq!(reading.outcome, RitualOutcome::Tainted);
    }
}
