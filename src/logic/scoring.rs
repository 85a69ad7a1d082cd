//! Scoring engine: point accrual, winner bonus, leaderboard, opponent diversity.

use crate::models::{Match, MatchKey, PlayerId, RecordedScore, Side, WINNER_BONUS};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One leaderboard entry. Ephemeral: recomputed from scratch on every call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub player: PlayerId,
    pub manual_points: i64,
    pub match_points: i64,
    pub total_points: i64,
}

/// Output of one scoring pass: the ranked leaderboard plus, per player, the
/// sorted distinct opponents faced anywhere in the fixture.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ScoringReport {
    pub leaderboard: Vec<LeaderboardRow>,
    pub opponents: BTreeMap<PlayerId, Vec<PlayerId>>,
}

/// Compute the leaderboard and opponent-diversity report.
///
/// Every match accrues its (clamped) team score to both members of each side,
/// whether or not a score was recorded (missing entries count 0-0). A side
/// that reached exactly 32 against an opponent at 31 or below additionally
/// earns each of its members a flat +10. Totals add the caller's manual
/// adjustments. The leaderboard covers every rostered player exactly once,
/// sorted by total descending with ties broken by name ascending.
pub fn compute_scoring(
    roster: &[PlayerId],
    fixture: &[Match],
    scores: &HashMap<MatchKey, RecordedScore>,
    manual: &HashMap<PlayerId, i64>,
) -> ScoringReport {
    let mut match_points: HashMap<&PlayerId, i64> =
        roster.iter().map(|p| (p, 0)).collect();
    // Every rostered player gets an entry, even with no matches played yet.
    let mut opponent_sets: BTreeMap<&PlayerId, BTreeSet<&PlayerId>> =
        roster.iter().map(|p| (p, BTreeSet::new())).collect();

    for m in fixture {
        let recorded = scores.get(&m.key()).copied().unwrap_or_default();
        let (a, b) = recorded.clamped();
        let winner = recorded.winner();

        let bonus_a = if winner == Some(Side::TeamA) { WINNER_BONUS } else { 0 };
        let bonus_b = if winner == Some(Side::TeamB) { WINNER_BONUS } else { 0 };
        for p in &m.team_a {
            *match_points.entry(p).or_insert(0) += a + bonus_a;
        }
        for p in &m.team_b {
            *match_points.entry(p).or_insert(0) += b + bonus_b;
        }

        // Opponent sets accumulate regardless of whether a score was recorded.
        for pa in &m.team_a {
            for pb in &m.team_b {
                opponent_sets.entry(pa).or_default().insert(pb);
                opponent_sets.entry(pb).or_default().insert(pa);
            }
        }
    }

    let mut leaderboard: Vec<LeaderboardRow> = roster
        .iter()
        .map(|p| {
            let manual_points = manual.get(p).copied().unwrap_or(0);
            let earned = match_points.get(p).copied().unwrap_or(0);
            LeaderboardRow {
                player: p.clone(),
                manual_points,
                match_points: earned,
                total_points: manual_points + earned,
            }
        })
        .collect();
    leaderboard.sort_by(|x, y| {
        y.total_points
            .cmp(&x.total_points)
            .then_with(|| x.player.cmp(&y.player))
    });

    let opponents = opponent_sets
        .into_iter()
        .map(|(p, set)| (p.clone(), set.into_iter().cloned().collect()))
        .collect();

    ScoringReport {
        leaderboard,
        opponents,
    }
}
