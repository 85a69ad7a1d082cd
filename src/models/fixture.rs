//! Match, MatchKey, and fixture-generation errors.

use crate::models::player::PlayerId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Label of one of the parallel courts (e.g. "Court 1"). List order is significant:
/// it fixes iteration order during generation, not fairness.
pub type VenueId = String;

/// Errors that can occur validating a configuration or generating a fixture.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FixtureError {
    /// Round count must be at least 1.
    NoRounds,
    /// Slots-per-round must be at least 1.
    NoSlots,
    /// Venue list must be non-empty.
    NoVenues,
    /// Roster is empty.
    EmptyRoster,
    /// The same player appears twice in the roster.
    DuplicatePlayer(PlayerId),
    /// Not enough players to form even one team pairing (need at least 4).
    NotEnoughPlayers { have: usize },
    /// A slot benched the entire roster, leaving nobody to rotate.
    EmptyAvailablePool { round: u32, slot: u32 },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::NoRounds => write!(f, "Round count must be at least 1"),
            FixtureError::NoSlots => write!(f, "Slots per round must be at least 1"),
            FixtureError::NoVenues => write!(f, "At least one venue is required"),
            FixtureError::EmptyRoster => write!(f, "Roster is empty"),
            FixtureError::DuplicatePlayer(p) => {
                write!(f, "Player \"{}\" appears more than once in the roster", p)
            }
            FixtureError::NotEnoughPlayers { have } => {
                write!(f, "Need at least 4 players to generate a fixture (have {})", have)
            }
            FixtureError::EmptyAvailablePool { round, slot } => {
                write!(f, "Round {} slot {}: every player is benched", round, slot)
            }
        }
    }
}

impl std::error::Error for FixtureError {}

/// Unique identity of a match within one fixture: (round, slot, venue).
///
/// Serializes as the delimited string `round-slot-venue` so it can be used
/// directly as a JSON object key in the recorded-score map.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MatchKey {
    pub round: u32,
    pub slot: u32,
    pub venue: VenueId,
}

impl MatchKey {
    pub fn new(round: u32, slot: u32, venue: impl Into<VenueId>) -> Self {
        Self {
            round,
            slot,
            venue: venue.into(),
        }
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.round, self.slot, self.venue)
    }
}

impl FromStr for MatchKey {
    type Err = String;

    /// Parse `round-slot-venue`. The venue label may itself contain dashes;
    /// only the first two segments are numeric.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let round = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| format!("Invalid match key \"{}\": bad round", s))?;
        let slot = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| format!("Invalid match key \"{}\": bad slot", s))?;
        let venue = parts
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("Invalid match key \"{}\": missing venue", s))?;
        Ok(MatchKey::new(round, slot, venue))
    }
}

impl Serialize for MatchKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One generated match: two 2-player teams at a venue, plus the players benched
/// for the whole slot. Immutable once generated; the fixture is regenerated
/// wholesale on any roster or configuration change, never patched in place.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// 1-based round number.
    pub round: u32,
    /// 1-based slot within the round.
    pub slot: u32,
    pub venue: VenueId,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    /// Players sitting out this slot (shared by every venue in the slot).
    pub benched: Vec<PlayerId>,
}

impl Match {
    /// The canonical identity key used by both generation and score lookup.
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.round, self.slot, self.venue.clone())
    }
}
