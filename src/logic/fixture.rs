//! Fixture generation: deterministic bench rotation and team dealing.

use crate::models::{FixtureConfig, FixtureError, Match, PlayerId};

/// Generate the full fixture for a roster and configuration.
///
/// Per (round, slot), in row-major order:
/// 1. `slot_index` = zero-based running counter over all slots; the only
///    source of variety between slots.
/// 2. Bench `max(0, n - venues*4)` players, starting at roster index
///    `(slot_index * bench_size) % n` and walking forward with wraparound.
/// 3. Remaining players, in roster order, are rotated left by
///    `slot_index % available` and dealt 4 per venue: first two are team A,
///    next two team B.
///
/// Venues that cannot draw a full 4 players (roster smaller than venues*4)
/// are skipped for that slot. Pure and deterministic: identical inputs always
/// yield the identical match sequence.
pub fn generate_fixture(
    roster: &[PlayerId],
    config: &FixtureConfig,
) -> Result<Vec<Match>, FixtureError> {
    config.validate()?;
    if roster.is_empty() {
        return Err(FixtureError::EmptyRoster);
    }
    for (i, p) in roster.iter().enumerate() {
        if roster[..i].contains(p) {
            return Err(FixtureError::DuplicatePlayer(p.clone()));
        }
    }
    if roster.len() < 4 {
        return Err(FixtureError::NotEnoughPlayers { have: roster.len() });
    }

    let n = roster.len();
    let bench_size = n.saturating_sub(config.capacity());
    let mut out =
        Vec::with_capacity(config.rounds as usize * config.slots_per_round as usize);

    for round in 1..=config.rounds {
        for slot in 1..=config.slots_per_round {
            let slot_index =
                (round as usize - 1) * config.slots_per_round as usize + (slot as usize - 1);

            let benched: Vec<PlayerId> = (0..bench_size)
                .map(|k| roster[(slot_index * bench_size + k) % n].clone())
                .collect();

            let available: Vec<&PlayerId> =
                roster.iter().filter(|p| !benched.contains(*p)).collect();
            if available.is_empty() {
                return Err(FixtureError::EmptyAvailablePool { round, slot });
            }

            let rot = slot_index % available.len();
            let rotated: Vec<&PlayerId> = available[rot..]
                .iter()
                .chain(available[..rot].iter())
                .copied()
                .collect();

            for (c, venue) in config.venues.iter().enumerate() {
                let base = c * 4;
                if base + 4 > rotated.len() {
                    break;
                }
                out.push(Match {
                    round,
                    slot,
                    venue: venue.clone(),
                    team_a: [rotated[base].clone(), rotated[base + 1].clone()],
                    team_b: [rotated[base + 2].clone(), rotated[base + 3].clone()],
                    benched: benched.clone(),
                });
            }
        }
    }

    Ok(out)
}
