//! Council vote: one plurality election per round.

use coven_core::rng::DeterministicRng;

use super::player::{Alignment, Player};
use super::suspicion::SuspicionTracker;

/// One cast vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ballot {
    /// Seat of the voter.
    pub voter: usize,
    /// Seat the voter wants eliminated.
    pub target: usize,
}

/// Result of a council vote. Elimination is applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouncilVerdict {
    /// Seat chosen for elimination.
    pub eliminated: usize,
    /// Every ballot cast, in voter seat order.
    pub ballots: Vec<Ballot>,
}

fn choose_target(
    voter: usize,
    alive: &[usize],
    players: &[Player],
    suspicion: &SuspicionTracker,
    rng: &mut dyn DeterministicRng,
) -> Option<usize> {
    let others: Vec<usize> = alive.iter().copied().filter(|&s| s != voter).collect();
    if others.is_empty() {
        return None;
    }

    match players[voter].alignment {
        Alignment::Coven => suspicion.most_suspicious(&others),
        Alignment::Hollow => {
            let coven: Vec<usize> = others
                .iter()
                .copied()
                .filter(|&s| players[s].alignment == Alignment::Coven)
                .collect();
            if coven.is_empty() {
                Some(others[rng.next_index(others.len())])
            } else {
                suspicion.least_suspicious(&coven)
            }
        }
    }
}

/// Runs the council vote among `alive` seats.
///
/// Coven voters target the most suspicious other player; Hollow voters
/// shield themselves by targeting the least suspicious living Coven. The
/// top vote-getter is eliminated, with ties broken uniformly at random.
/// A lone survivor is returned as-is. Returns `None` only when `alive` is
/// empty.
pub fn council_vote(
    alive: &[usize],
    players: &[Player],
    suspicion: &SuspicionTracker,
    rng: &mut dyn DeterministicRng,
) -> Option<CouncilVerdict> {
    let ballots: Vec<Ballot> = alive
        .iter()
        .filter_map(|&voter| {
            choose_target(voter, alive, players, suspicion, rng)
                .map(|target| Ballot { voter, target })
        })
        .collect();

    if ballots.is_empty() {
        return alive.first().map(|&lone| CouncilVerdict {
            eliminated: lone,
            ballots,
        });
    }

    // Tally in order of first vote received.
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for ballot in &ballots {
        match tally.iter_mut().find(|(seat, _)| *seat == ballot.target) {
            Some((_, count)) => *count += 1,
            None => tally.push((ballot.target, 1)),
        }
    }

    let top = tally.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let leaders: Vec<usize> = tally
        .iter()
        .filter(|(_, count)| *count == top)
        .map(|(seat, _)| *seat)
        .collect();

    let eliminated = if leaders.len() == 1 {
        leaders[0]
    } else {
        leaders[rng.next_index(leaders.len())]
    };

    tracing::trace!(eliminated, votes = top, tied = leaders.len(), "council verdict");

    Some(CouncilVerdict {
        eliminated,
        ballots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use coven_core::rng::SeededRng;
    use coven_test_support::{MockRng, SequenceRng};

    use crate::domain::player::alive_seats;

    fn table(alignments: &[Alignment]) -> Vec<Player> {
        alignments.iter().copied().map(Player::new).collect()
    }

    #[test]
    fn test_coven_votes_for_most_suspicious() {
        let players = table(&[Alignment::Coven, Alignment::Coven, Alignment::Hollow]);
        let suspicion = SuspicionTracker::from_scores(vec![-0.25, -0.25, 1.0]);
        let mut rng = SequenceRng::new(vec![]);

        let verdict = council_vote(&[0, 1, 2], &players, &suspicion, &mut rng).unwrap();

        assert_eq!(
            verdict.ballots,
            vec![
                Ballot { voter: 0, target: 2 },
                Ballot { voter: 1, target: 2 },
                Ballot { voter: 2, target: 0 },
            ]
        );
        assert_eq!(verdict.eliminated, 2);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_hollow_targets_least_suspicious_coven() {
        let players = table(&[
            Alignment::Hollow,
            Alignment::Coven,
            Alignment::Coven,
            Alignment::Hollow,
        ]);
        let suspicion = SuspicionTracker::from_scores(vec![0.0, 3.0, -1.0, -2.0]);
        let mut rng = SequenceRng::new(vec![]);

        let verdict = council_vote(&[0, 1, 2, 3], &players, &suspicion, &mut rng).unwrap();

        assert_eq!(verdict.ballots[0], Ballot { voter: 0, target: 2 });
        assert_eq!(verdict.ballots[3], Ballot { voter: 3, target: 2 });
    }

    #[test]
    fn test_hollow_picks_randomly_without_living_coven() {
        let players = table(&[Alignment::Hollow, Alignment::Hollow, Alignment::Hollow]);
        let suspicion = SuspicionTracker::new(3);
        // Each voter picks index 1 of its two "others".
        let mut rng = SequenceRng::new(vec![1, 1, 1]);

        let verdict = council_vote(&[0, 1, 2], &players, &suspicion, &mut rng).unwrap();

        assert_eq!(verdict.ballots[0].target, 2);
        assert_eq!(verdict.ballots[1].target, 2);
        assert_eq!(verdict.ballots[2].target, 1);
        assert_eq!(verdict.eliminated, 2);
    }

    #[test]
    fn test_tie_broken_by_rng() {
        let players = table(&[Alignment::Coven, Alignment::Coven]);
        let suspicion = SuspicionTracker::new(2);
        // Voter 0 -> 1, voter 1 -> 0: a 1-1 tie; tally order is [1, 0].
        let mut rng = SequenceRng::new(vec![1]);

        let verdict = council_vote(&[0, 1], &players, &suspicion, &mut rng).unwrap();

        assert_eq!(verdict.eliminated, 0);
    }

    #[test]
    fn test_lone_survivor_is_returned() {
        let players = table(&[Alignment::Hollow]);
        let suspicion = SuspicionTracker::new(1);
        let mut rng = MockRng;

        let verdict = council_vote(&[0], &players, &suspicion, &mut rng).unwrap();

        assert_eq!(verdict.eliminated, 0);
        assert!(verdict.ballots.is_empty());
    }

    #[test]
    fn test_empty_council_has_no_verdict() {
        let mut rng = MockRng;
        assert!(council_vote(&[], &[], &SuspicionTracker::new(0), &mut rng).is_none());
    }

    #[test]
    fn test_dead_players_neither_vote_nor_receive_votes() {
        let mut players = table(&[
            Alignment::Coven,
            Alignment::Hollow,
            Alignment::Coven,
            Alignment::Coven,
        ]);
        players[1].alive = false;
        let suspicion = SuspicionTracker::from_scores(vec![0.0, 9.0, 0.5, 0.0]);
        let alive = alive_seats(&players);
        let mut rng = MockRng;

        let verdict = council_vote(&alive, &players, &suspicion, &mut rng).unwrap();

        assert!(verdict.ballots.iter().all(|b| b.voter != 1 && b.target != 1));
        assert_eq!(verdict.eliminated, 2);
    }

    #[test]
    fn test_never_self_vote_and_always_alive_target() {
        let mut rng = SeededRng::from_seed(23);

        for round in 0..300u32 {
            let mut players: Vec<Player> = (0..7)
                .map(|i| {
                    Player::new(if (i + round as usize) % 3 == 0 {
                        Alignment::Hollow
                    } else {
                        Alignment::Coven
                    })
                })
                .collect();
            players[(round % 7) as usize].alive = false;
            let scores = (0..7).map(|_| rng.next_f64() * 4.0 - 1.0).collect();
            let suspicion = SuspicionTracker::from_scores(scores);
            let alive = alive_seats(&players);

            let verdict = council_vote(&alive, &players, &suspicion, &mut rng).unwrap();

            assert!(alive.contains(&verdict.eliminated));
            for ballot in &verdict.ballots {
                assert_ne!(ballot.voter, ballot.target);
                assert!(alive.contains(&ballot.target));
            }
        }
    }
}
