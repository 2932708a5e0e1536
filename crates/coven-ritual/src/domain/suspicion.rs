//! Per-player suspicion scores.

use super::config::SuspicionConfig;

/// Suspicion change caused by a single drawn value.
#[must_use]
pub fn suspicion_delta(config: &SuspicionConfig, value: f64) -> f64 {
    if value >= config.high_corrupt_threshold {
        config.corrupt_penalty
    } else if value <= 0.0 {
        -config.safe_relief
    } else {
        0.0
    }
}

/// Persistent suspicion, one score per seat. Scores are never reset and
/// outlive elimination; callers filter dead seats out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuspicionTracker {
    scores: Vec<f64>,
}

impl SuspicionTracker {
    /// All seats start at zero.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            scores: vec![0.0; player_count],
        }
    }

    /// Starts from explicit scores.
    #[must_use]
    pub fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Score of one seat.
    #[must_use]
    pub fn score(&self, seat: usize) -> f64 {
        self.scores[seat]
    }

    /// All scores, indexed by seat.
    #[must_use]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Applies one round of draws, returning the delta written per draw in
    /// the same order.
    pub fn record_round(&mut self, config: &SuspicionConfig, draws: &[(usize, f64)]) -> Vec<f64> {
        draws
            .iter()
            .map(|&(seat, value)| {
                let delta = suspicion_delta(config, value);
                self.scores[seat] += delta;
                delta
            })
            .collect()
    }

    /// The seat with the highest score among `candidates`; the earliest
    /// candidate wins ties.
    #[must_use]
    pub fn most_suspicious(&self, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().fold(None, |best, seat| match best {
            Some(b) if self.scores[seat] <= self.scores[b] => Some(b),
            _ => Some(seat),
        })
    }

    /// The seat with the lowest score among `candidates`; the earliest
    /// candidate wins ties.
    #[must_use]
    pub fn least_suspicious(&self, candidates: &[usize]) -> Option<usize> {
        candidates.iter().copied().fold(None, |best, seat| match best {
            Some(b) if self.scores[seat] >= self.scores[b] => Some(b),
            _ => Some(seat),
        })
    }
}
