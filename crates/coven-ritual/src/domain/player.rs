//! Seats, alignments and faction counts.

use serde::{Deserialize, Serialize};

/// The two factions. Also used to report the winner of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Wins by eliminating every Hollow player.
    Coven,
    /// Wins by reaching parity with the Coven among the living.
    Hollow,
}

/// One seat at the table, identified by its index in the player list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Current faction; infection and cleansing flip it.
    pub alignment: Alignment,
    /// False once eliminated.
    pub alive: bool,
    /// Coven player converted to Hollow mid-game.
    pub infected: bool,
    /// Hollow player converted to Coven by the Exorcist.
    pub cleansed: bool,
    /// Hollow player marked by the Purging Moon.
    pub scorched: bool,
}

impl Player {
    /// Creates a living, unmarked player.
    #[must_use]
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            alive: true,
            infected: false,
            cleansed: false,
            scorched: false,
        }
    }

    /// Alive and aligned with `alignment`.
    #[must_use]
    pub fn is_alive_as(&self, alignment: Alignment) -> bool {
        self.alive && self.alignment == alignment
    }
}

/// Seat indices of living players, in seat order.
#[must_use]
pub fn alive_seats(players: &[Player]) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.alive)
        .map(|(i, _)| i)
        .collect()
}

/// Seat indices of living players with the given alignment, in seat order.
#[must_use]
pub fn alive_seats_of(players: &[Player], alignment: Alignment) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_alive_as(alignment))
        .map(|(i, _)| i)
        .collect()
}

/// Living head-count per faction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FactionCount {
    /// Living Coven players.
    pub coven: usize,
    /// Living Hollow players.
    pub hollow: usize,
}

impl FactionCount {
    /// Counts the living members of each faction.
    #[must_use]
    pub fn alive(players: &[Player]) -> Self {
        players
            .iter()
            .filter(|p| p.alive)
            .fold(Self::default(), |mut count, p| {
                match p.alignment {
                    Alignment::Coven => count.coven += 1,
                    Alignment::Hollow => count.hollow += 1,
                }
                count
            })
    }

    /// Total living players.
    #[must_use]
    pub fn total(&self) -> usize {
        self.coven + self.hollow
    }

    /// The decisive winner, if any: Coven once no Hollow is alive, Hollow
    /// once it matches or outnumbers the Coven.
    #[must_use]
    pub fn decisive_winner(&self) -> Option<Alignment> {
        if self.hollow == 0 {
            Some(Alignment::Coven)
        } else if self.hollow >= self.coven {
            Some(Alignment::Hollow)
        } else {
            None
        }
    }

    /// Winner when the round cap is reached: Coven only with a strict
    /// majority, Hollow on ties.
    #[must_use]
    pub fn majority_winner(&self) -> Alignment {
        if self.coven > self.hollow {
            Alignment::Coven
        } else {
            Alignment::Hollow
        }
    }
}
