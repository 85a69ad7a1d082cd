//! Recorded scores, the winner rule, and the caller-owned scoreboard state.

use crate::models::fixture::MatchKey;
use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A team can score at most this many points in one match (play to 32).
pub const MAX_TEAM_SCORE: i64 = 32;

/// Flat bonus per player on the winning team.
pub const WINNER_BONUS: i64 = 10;

/// Which side of a match a score belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    TeamA,
    TeamB,
}

/// Clamp a raw point value into the valid `[0, 32]` range. Idempotent.
pub fn clamp_points(value: i64) -> i64 {
    value.clamp(0, MAX_TEAM_SCORE)
}

/// Coerce an arbitrary JSON value into points: numbers pass through, numeric
/// strings parse, everything else becomes 0 (then the caller clamps).
pub fn coerce_points(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n.as_i64().unwrap_or(0),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Recorded result of one match. Sparse: a match with no entry counts as 0-0.
/// Values are clamped on write and re-clamped on read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RecordedScore {
    #[serde(default)]
    pub team_a: i64,
    #[serde(default)]
    pub team_b: i64,
}

impl RecordedScore {
    /// Both sides, clamped into `[0, 32]`.
    pub fn clamped(&self) -> (i64, i64) {
        (clamp_points(self.team_a), clamp_points(self.team_b))
    }

    /// The winning side, if any: a team wins iff its clamped score is exactly
    /// 32 and the opponent stayed at 31 or below. 32-32 has no winner.
    pub fn winner(&self) -> Option<Side> {
        let (a, b) = self.clamped();
        if a == MAX_TEAM_SCORE && b < MAX_TEAM_SCORE {
            Some(Side::TeamA)
        } else if b == MAX_TEAM_SCORE && a < MAX_TEAM_SCORE {
            Some(Side::TeamB)
        } else {
            None
        }
    }
}

/// All mutable scoring state, owned by the caller and passed read-only into
/// the scoring engine: manual point adjustments per player plus recorded
/// scores per match. Also the JSON interchange document for export/import.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Manual point adjustments (may be negative). Missing player means 0.
    #[serde(default)]
    pub points: HashMap<PlayerId, i64>,
    /// Recorded scores keyed by match identity. Missing match means 0-0.
    #[serde(default)]
    pub matches: HashMap<MatchKey, RecordedScore>,
}

impl Scoreboard {
    /// Record one side's score for a match, clamping into `[0, 32]`.
    pub fn record_score(&mut self, key: MatchKey, side: Side, value: i64) {
        let entry = self.matches.entry(key).or_default();
        match side {
            Side::TeamA => entry.team_a = clamp_points(value),
            Side::TeamB => entry.team_b = clamp_points(value),
        }
    }

    /// Set a player's manual adjustment.
    pub fn set_manual_points(&mut self, player: PlayerId, value: i64) {
        self.points.insert(player, value);
    }

    /// Zero every rostered player's manual points and forget all recorded scores.
    pub fn reset(&mut self, roster: &[PlayerId]) {
        self.points = roster.iter().map(|p| (p.clone(), 0)).collect();
        self.matches.clear();
    }

    /// After a roster change: keep manual points for retained players only,
    /// start new players at 0, and drop all recorded scores (the fixture they
    /// were keyed against no longer exists).
    pub fn rebuild_for_roster(&mut self, roster: &[PlayerId]) {
        self.points = roster
            .iter()
            .map(|p| (p.clone(), self.points.get(p).copied().unwrap_or(0)))
            .collect();
        self.matches.clear();
    }

    /// Re-clamp every recorded score in place (used after import, where the
    /// document may carry out-of-range values).
    pub fn clamp_all(&mut self) {
        for score in self.matches.values_mut() {
            score.team_a = clamp_points(score.team_a);
            score.team_b = clamp_points(score.team_b);
        }
    }
}
