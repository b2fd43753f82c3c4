use std::collections::HashMap;

use crate::normalize::normalize;
use crate::state::{LeaderboardRow, PickRow, SkaterStat};

/// Dense rank over (points, goals, assists) descending, keyed by normalized
/// player name. Players sharing an identical triple share a rank and the
/// next distinct triple gets rank + 1; rank 1 is best. The name-ascending
/// tie-break fixes display order only, not the rank itself.
pub fn build_rank_lookup(stats: &[SkaterStat]) -> HashMap<String, u32> {
    if stats.is_empty() {
        return HashMap::new();
    }

    let mut sorted: Vec<&SkaterStat> = stats.iter().collect();
    sorted.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.goals.cmp(&a.goals))
            .then(b.assists.cmp(&a.assists))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut out = HashMap::new();
    let mut rank = 0u32;
    let mut prev: Option<(i64, i64, i64)> = None;
    for stat in sorted {
        let triple = (stat.points, stat.goals, stat.assists);
        if prev != Some(triple) {
            rank += 1;
            prev = Some(triple);
        }
        out.insert(normalize(&stat.name), rank);
    }
    out
}

/// Score every pick against the current stats and placements. One output
/// row per pick; unmatched teams and players contribute 0.
///
/// The sort is ascending by (total, entrant) even though team points grow
/// with better placement while player ranks shrink. The pool has always
/// ordered its table this way, so the mixed polarity is kept as-is.
pub fn build_leaderboard(
    picks: &[PickRow],
    stats: &[SkaterStat],
    team_place: &HashMap<String, u32>,
) -> Vec<LeaderboardRow> {
    let ranks = build_rank_lookup(stats);
    let place_by_key: HashMap<String, u32> = team_place
        .iter()
        .map(|(team, place)| (normalize(team), *place))
        .collect();

    let rank_of = |name: &str| -> u32 {
        if name.is_empty() {
            return 0;
        }
        ranks.get(&normalize(name)).copied().unwrap_or(0)
    };

    let mut rows: Vec<LeaderboardRow> = picks
        .iter()
        .map(|pick| {
            let team_place = place_by_key
                .get(&normalize(&pick.team))
                .copied()
                .unwrap_or(0);
            let team_pts = team_place * 5;
            let f1_rank = rank_of(&pick.forward1);
            let f2_rank = rank_of(&pick.forward2);
            let d_rank = rank_of(&pick.defenceman);
            LeaderboardRow {
                entrant: pick.entrant.clone(),
                team: pick.team.clone(),
                team_place,
                team_pts,
                forward1: pick.forward1.clone(),
                f1_rank,
                forward2: pick.forward2.clone(),
                f2_rank,
                defenceman: pick.defenceman.clone(),
                d_rank,
                total: team_pts + f1_rank + f2_rank + d_rank,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.total.cmp(&b.total).then_with(|| a.entrant.cmp(&b.entrant)));
    rows
}
