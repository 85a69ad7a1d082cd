//! Fixture configuration: rounds, slots per round, venues.

use crate::models::fixture::{FixtureError, VenueId};
use serde::{Deserialize, Serialize};

/// Schedule shape: how many rounds, slots per round, and which venues run in
/// parallel. Immutable for the duration of one generation call; any change
/// means regenerating the whole fixture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FixtureConfig {
    pub rounds: u32,
    pub slots_per_round: u32,
    pub venues: Vec<VenueId>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            slots_per_round: 3,
            venues: vec!["Court 1".to_string(), "Court 2".to_string()],
        }
    }
}

impl FixtureConfig {
    /// Check the configuration is usable for generation.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.rounds < 1 {
            return Err(FixtureError::NoRounds);
        }
        if self.slots_per_round < 1 {
            return Err(FixtureError::NoSlots);
        }
        if self.venues.is_empty() {
            return Err(FixtureError::NoVenues);
        }
        Ok(())
    }

    /// Players occupied per slot when every venue is filled (4 per venue: 2v2).
    pub fn capacity(&self) -> usize {
        self.venues.len() * 4
    }
}
