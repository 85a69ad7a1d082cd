//! Core logic: fixture generation and scoring.

mod fixture;
mod scoring;

pub use fixture::generate_fixture;
pub use scoring::{compute_scoring, LeaderboardRow, ScoringReport};
