//! Coven ritual simulator: game engine and batch driver.
//!
//! The domain layer owns the rules of a single game: role setup, the
//! per-round ritual, suspicion, council vote, infection, the Exorcist and
//! win evaluation. The application layer folds many games into per
//! player-count statistics.

pub mod application;
pub mod domain;
