//! Data structures for the americano scoreboard: players, matches, config, scores.

mod config;
mod fixture;
mod player;
mod score;

pub use config::FixtureConfig;
pub use fixture::{FixtureError, Match, MatchKey, VenueId};
pub use player::{fallback_roster, normalize_roster, PlayerId, FALLBACK_ROSTER};
pub use score::{
    clamp_points, coerce_points, RecordedScore, Scoreboard, Side, MAX_TEAM_SCORE, WINNER_BONUS,
};
