//! Integration tests for the scoring engine: accrual, bonus, leaderboard, opponents.

use padel_americano_web::{
    clamp_points, coerce_points, compute_scoring, generate_fixture, FixtureConfig, Match, MatchKey,
    RecordedScore, Scoreboard, Side,
};
use std::collections::HashMap;

fn letters() -> Vec<String> {
    ["A", "B", "C", "D", "E", "F", "G", "H"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn one_court(slots: u32) -> FixtureConfig {
    FixtureConfig {
        rounds: 1,
        slots_per_round: slots,
        venues: vec!["Court 1".to_string()],
    }
}

/// 8 players, 1 court, 1 slot: bench [A,B,C,D], match [E,F] vs [G,H].
fn single_match_fixture() -> Vec<Match> {
    generate_fixture(&letters(), &one_court(1)).unwrap()
}

fn points_of(report: &padel_americano_web::ScoringReport, player: &str) -> i64 {
    report
        .leaderboard
        .iter()
        .find(|r| r.player == player)
        .unwrap()
        .match_points
}

#[test]
fn winning_team_gets_raw_points_plus_bonus() {
    let fixture = single_match_fixture();
    let mut board = Scoreboard::default();
    let key = MatchKey::new(1, 1, "Court 1");
    board.record_score(key.clone(), Side::TeamA, 32);
    board.record_score(key, Side::TeamB, 20);

    let report = compute_scoring(&letters(), &fixture, &board.matches, &board.points);
    assert_eq!(points_of(&report, "E"), 42);
    assert_eq!(points_of(&report, "F"), 42);
    assert_eq!(points_of(&report, "G"), 20);
    assert_eq!(points_of(&report, "H"), 20);
    for benched in ["A", "B", "C", "D"] {
        assert_eq!(points_of(&report, benched), 0);
    }
}

#[test]
fn double_32_accrues_raw_points_but_no_bonus() {
    let fixture = single_match_fixture();
    let mut board = Scoreboard::default();
    let key = MatchKey::new(1, 1, "Court 1");
    board.record_score(key.clone(), Side::TeamA, 32);
    board.record_score(key, Side::TeamB, 32);

    let report = compute_scoring(&letters(), &fixture, &board.matches, &board.points);
    for player in ["E", "F", "G", "H"] {
        assert_eq!(points_of(&report, player), 32);
    }
}

#[test]
fn unrecorded_matches_count_as_zero_zero() {
    let fixture = generate_fixture(&letters(), &one_court(3)).unwrap();
    let report = compute_scoring(&letters(), &fixture, &HashMap::new(), &HashMap::new());
    assert!(report.leaderboard.iter().all(|r| r.match_points == 0));
    assert!(report.leaderboard.iter().all(|r| r.total_points == 0));
}

#[test]
fn recorded_scores_are_clamped_and_clamping_is_idempotent() {
    let mut board = Scoreboard::default();
    let key = MatchKey::new(1, 1, "Court 1");
    board.record_score(key.clone(), Side::TeamA, -5);
    board.record_score(key.clone(), Side::TeamB, 99);
    let rec = board.matches[&key];
    assert_eq!(rec.team_a, 0);
    assert_eq!(rec.team_b, 32);

    for v in [-5, 0, 17, 32, 99] {
        assert_eq!(clamp_points(clamp_points(v)), clamp_points(v));
    }
}

#[test]
fn at_most_one_side_can_win() {
    let cases = [
        (32, 31, Some(Side::TeamA)),
        (31, 32, Some(Side::TeamB)),
        (32, 32, None),
        (10, 5, None),
        (0, 0, None),
        // Out-of-range values clamp before the predicate applies.
        (99, 12, Some(Side::TeamA)),
        (99, 99, None),
    ];
    for (a, b, expected) in cases {
        let rec = RecordedScore { team_a: a, team_b: b };
        assert_eq!(rec.winner(), expected, "scores {}-{}", a, b);
    }
}

#[test]
fn leaderboard_covers_every_player_and_orders_by_total_then_name() {
    let fixture = single_match_fixture();
    let mut manual = HashMap::new();
    // H and A tie on total; A must sort first.
    manual.insert("A".to_string(), 20i64);
    manual.insert("B".to_string(), -3i64);
    let mut scores = HashMap::new();
    scores.insert(
        MatchKey::new(1, 1, "Court 1"),
        RecordedScore { team_a: 10, team_b: 20 },
    );

    let report = compute_scoring(&letters(), &fixture, &scores, &manual);
    assert_eq!(report.leaderboard.len(), 8);
    for pair in report.leaderboard.windows(2) {
        assert!(pair[0].total_points >= pair[1].total_points);
        if pair[0].total_points == pair[1].total_points {
            assert!(pair[0].player < pair[1].player);
        }
    }
    let order: Vec<&str> = report.leaderboard.iter().map(|r| r.player.as_str()).collect();
    // A 20, G 20, H 20 tie; then E/F at 10; then C/D at 0; B at -3.
    assert_eq!(order, ["A", "G", "H", "E", "F", "C", "D", "B"]);
    let b = report.leaderboard.iter().find(|r| r.player == "B").unwrap();
    assert_eq!(b.manual_points, -3);
    assert_eq!(b.total_points, -3);
}

#[test]
fn opponent_sets_are_symmetric_sorted_and_score_independent() {
    // Two slots, one court: E/F vs G/H in slot 1, then the bench flips.
    let fixture = generate_fixture(&letters(), &one_court(2)).unwrap();
    let report = compute_scoring(&letters(), &fixture, &HashMap::new(), &HashMap::new());

    assert_eq!(report.opponents["E"], vec!["G", "H"]);
    assert_eq!(report.opponents["G"], vec!["E", "F"]);
    // Slot 2 pairs [B,C] vs [D,A].
    assert_eq!(report.opponents["B"], vec!["A", "D"]);
    assert_eq!(report.opponents["A"], vec!["B", "C"]);

    for (player, opponents) in &report.opponents {
        let mut sorted = opponents.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(&sorted, opponents, "{} list not sorted/deduped", player);
        for o in opponents {
            assert!(
                report.opponents[o].contains(player),
                "{} faced {} but not vice versa",
                player,
                o
            );
        }
    }
}

#[test]
fn duplicate_pairings_collapse_in_opponent_sets() {
    // Same four players meeting twice still yields one entry per opponent.
    let fixture = vec![
        Match {
            round: 1,
            slot: 1,
            venue: "Court 1".to_string(),
            team_a: ["A".to_string(), "B".to_string()],
            team_b: ["C".to_string(), "D".to_string()],
            benched: vec![],
        },
        Match {
            round: 1,
            slot: 2,
            venue: "Court 1".to_string(),
            team_a: ["A".to_string(), "B".to_string()],
            team_b: ["C".to_string(), "D".to_string()],
            benched: vec![],
        },
    ];
    let roster: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
    let report = compute_scoring(&roster, &fixture, &HashMap::new(), &HashMap::new());
    assert_eq!(report.opponents["A"], vec!["C", "D"]);
    assert_eq!(report.opponents["C"], vec!["A", "B"]);
}

#[test]
fn opponent_map_covers_the_whole_roster() {
    // Single slot: A..D bench and face nobody, but still get (empty) entries.
    let fixture = single_match_fixture();
    let report = compute_scoring(&letters(), &fixture, &HashMap::new(), &HashMap::new());
    assert_eq!(report.opponents.len(), 8);
    for benched in ["A", "B", "C", "D"] {
        assert!(report.opponents[benched].is_empty());
    }
    assert_eq!(report.opponents["E"], vec!["G", "H"]);
}

#[test]
fn malformed_import_document_is_rejected_wholesale() {
    // A bad match key fails the whole document; nothing to partially apply.
    let bad = r#"{"points": {"A": 5}, "matches": {"nope": {"team_a": 1, "team_b": 2}}}"#;
    assert!(serde_json::from_str::<Scoreboard>(bad).is_err());

    // A valid document with out-of-range scores imports, then clamps in place.
    let good = r#"{"points": {"A": 5}, "matches": {"1-1-Court 1": {"team_a": 99, "team_b": -5}}}"#;
    let mut board: Scoreboard = serde_json::from_str(good).unwrap();
    board.clamp_all();
    let rec = board.matches[&MatchKey::new(1, 1, "Court 1")];
    assert_eq!(rec.team_a, 32);
    assert_eq!(rec.team_b, 0);
    assert_eq!(board.points["A"], 5);
}

#[test]
fn malformed_input_coerces_to_zero() {
    assert_eq!(coerce_points(&serde_json::json!(7)), 7);
    assert_eq!(coerce_points(&serde_json::json!("7")), 7);
    assert_eq!(coerce_points(&serde_json::json!(" 12 ")), 12);
    assert_eq!(coerce_points(&serde_json::json!("abc")), 0);
    assert_eq!(coerce_points(&serde_json::json!(null)), 0);
    assert_eq!(coerce_points(&serde_json::json!([1, 2])), 0);
}

#[test]
fn roster_rebuild_keeps_manual_points_for_retained_players_only() {
    let mut board = Scoreboard::default();
    board.set_manual_points("A".to_string(), 7);
    board.set_manual_points("B".to_string(), 3);
    board.record_score(MatchKey::new(1, 1, "Court 1"), Side::TeamA, 12);

    let new_roster: Vec<String> = ["A", "C"].iter().map(|s| s.to_string()).collect();
    board.rebuild_for_roster(&new_roster);
    assert_eq!(board.points.get("A"), Some(&7));
    assert_eq!(board.points.get("C"), Some(&0));
    assert!(!board.points.contains_key("B"));
    assert!(board.matches.is_empty());
}
