use std::collections::HashMap;

use oly26_terminal::normalize::{collapse_ws, first_int, normalize};
use oly26_terminal::scoring::{build_leaderboard, build_rank_lookup};
use oly26_terminal::state::{PickRow, SkaterStat};

fn stat(name: &str, points: i64, goals: i64, assists: i64) -> SkaterStat {
    SkaterStat {
        name: name.to_string(),
        team: String::new(),
        position: String::new(),
        points,
        goals,
        assists,
    }
}

fn pick(entrant: &str, team: &str, f1: &str, f2: &str, d: &str) -> PickRow {
    PickRow {
        entrant: entrant.to_string(),
        team: team.to_string(),
        forward1: f1.to_string(),
        forward2: f2.to_string(),
        defenceman: d.to_string(),
    }
}

#[test]
fn normalize_is_idempotent() {
    for raw in ["  Foo   Bar ", "foo bar", "", "  ", "MiXeD\tCase"] {
        let once = normalize(raw);
        assert_eq!(normalize(&once), once);
    }
    assert_eq!(normalize("  Foo   Bar"), "foo bar");
    assert_eq!(collapse_ws("  Foo   Bar "), "Foo Bar");
}

#[test]
fn first_int_scans_signed_values() {
    assert_eq!(first_int("5 (3 PP)"), Some(5));
    assert_eq!(first_int("abc-7"), Some(-7));
    assert_eq!(first_int("-12"), Some(-12));
    assert_eq!(first_int("no digits"), None);
}

#[test]
fn empty_stats_yield_empty_rank_lookup() {
    assert!(build_rank_lookup(&[]).is_empty());
}

#[test]
fn rank_is_dense_over_stat_triples() {
    let stats = vec![stat("A", 10, 5, 3), stat("B", 10, 5, 3), stat("C", 9, 9, 9)];
    let ranks = build_rank_lookup(&stats);
    assert_eq!(ranks.get("a"), Some(&1));
    assert_eq!(ranks.get("b"), Some(&1));
    // Dense: the next distinct triple is rank 2, not 3.
    assert_eq!(ranks.get("c"), Some(&2));
}

#[test]
fn rank_orders_by_points_then_goals_then_assists() {
    let stats = vec![
        stat("Low Points", 5, 9, 9),
        stat("High Points", 8, 1, 1),
        stat("More Goals", 5, 4, 0),
        stat("More Assists", 5, 2, 6),
        stat("Fewer Assists", 5, 2, 4),
    ];
    let ranks = build_rank_lookup(&stats);
    assert_eq!(ranks.get("high points"), Some(&1));
    assert_eq!(ranks.get("low points"), Some(&2));
    assert_eq!(ranks.get("more goals"), Some(&3));
    assert_eq!(ranks.get("more assists"), Some(&4));
    assert_eq!(ranks.get("fewer assists"), Some(&5));
}

#[test]
fn leaderboard_matches_pinned_example() {
    let picks = vec![pick("X", "CAN", "Foo Bar", "", "")];
    let stats = vec![stat("Foo Bar", 5, 2, 1)];
    let team_place = HashMap::from([("can".to_string(), 1u32)]);

    let rows = build_leaderboard(&picks, &stats, &team_place);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].team_place, 1);
    assert_eq!(rows[0].team_pts, 5);
    assert_eq!(rows[0].f1_rank, 1);
    assert_eq!(rows[0].f2_rank, 0);
    assert_eq!(rows[0].d_rank, 0);
    assert_eq!(rows[0].total, 6);
}

#[test]
fn leaderboard_preserves_every_pick() {
    let picks = vec![
        pick("Carol", "SWE", "", "", ""),
        pick("Alice", "CAN", "", "", ""),
        pick("Bob", "USA", "", "", ""),
    ];
    let rows = build_leaderboard(&picks, &[], &HashMap::new());
    assert_eq!(rows.len(), picks.len());

    let mut entrants: Vec<&str> = rows.iter().map(|r| r.entrant.as_str()).collect();
    entrants.sort_unstable();
    assert_eq!(entrants, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn equal_totals_sort_by_entrant() {
    let picks = vec![
        pick("Zed", "CAN", "", "", ""),
        pick("Amy", "USA", "", "", ""),
        pick("Mia", "FIN", "", "", ""),
    ];
    let team_place = HashMap::from([
        ("CAN".to_string(), 2u32),
        ("USA".to_string(), 2u32),
        ("FIN".to_string(), 1u32),
    ]);

    let rows = build_leaderboard(&picks, &[], &team_place);
    // Ascending total: the gold team (5 pts) sorts above the silver
    // teams (10 pts); ties break on the raw entrant string.
    assert_eq!(rows[0].entrant, "Mia");
    assert_eq!(rows[1].entrant, "Amy");
    assert_eq!(rows[2].entrant, "Zed");
}

#[test]
fn unmatched_names_resolve_to_zero() {
    let picks = vec![pick("X", "Atlantis", "Nobody Here", "", "Ghost Player")];
    let stats = vec![stat("Someone Else", 4, 2, 2)];
    let team_place = HashMap::from([("CAN".to_string(), 1u32)]);

    let rows = build_leaderboard(&picks, &stats, &team_place);
    assert_eq!(rows[0].team_place, 0);
    assert_eq!(rows[0].team_pts, 0);
    assert_eq!(rows[0].f1_rank, 0);
    assert_eq!(rows[0].d_rank, 0);
    assert_eq!(rows[0].total, 0);
}

#[test]
fn matching_ignores_case_and_whitespace() {
    let picks = vec![pick("X", "  cAn ", "  Foo   Bar", "", "")];
    let stats = vec![stat("foo bar", 3, 1, 2)];
    let team_place = HashMap::from([("CAN".to_string(), 1u32)]);

    let rows = build_leaderboard(&picks, &stats, &team_place);
    assert_eq!(rows[0].team_place, 1);
    assert_eq!(rows[0].f1_rank, 1);
}
