//! Padel americano web app: library with models and the fixture/scoring logic.

pub mod logic;
pub mod models;

pub use logic::{compute_scoring, generate_fixture, LeaderboardRow, ScoringReport};
pub use models::{
    clamp_points, coerce_points, fallback_roster, normalize_roster, FixtureConfig, FixtureError,
    Match, MatchKey, PlayerId, RecordedScore, Scoreboard, Side, VenueId, MAX_TEAM_SCORE,
    WINNER_BONUS,
};
