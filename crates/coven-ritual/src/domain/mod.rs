//! Game rules for a single simulated Coven game.

pub mod config;
pub mod council;
pub mod exorcist;
pub mod game;
pub mod infection;
pub mod ingredients;
pub mod outcome;
pub mod player;
pub mod purging;
pub mod record;
pub mod roles;
pub mod suspicion;
