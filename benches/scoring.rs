use std::collections::HashMap;
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use oly26_terminal::scoring::{build_leaderboard, build_rank_lookup};
use oly26_terminal::state::{PickRow, SkaterStat};

fn sample_stats(count: usize) -> Vec<SkaterStat> {
    (0..count)
        .map(|i| SkaterStat {
            name: format!("Player {i:04}"),
            team: format!("T{:02}", i % 12),
            position: if i % 3 == 0 { "D" } else { "C" }.to_string(),
            points: (i % 29) as i64,
            goals: (i % 11) as i64,
            assists: (i % 17) as i64,
        })
        .collect()
}

fn sample_picks(count: usize) -> Vec<PickRow> {
    (0..count)
        .map(|i| PickRow {
            entrant: format!("Entrant {i:03}"),
            team: format!("T{:02}", i % 12),
            forward1: format!("Player {:04}", (i * 7) % 500),
            forward2: format!("Player {:04}", (i * 13) % 500),
            defenceman: format!("Player {:04}", (i * 19) % 500),
        })
        .collect()
}

fn bench_rank_lookup(c: &mut Criterion) {
    let stats = sample_stats(500);
    c.bench_function("rank_lookup_500", |b| {
        b.iter(|| {
            let ranks = build_rank_lookup(black_box(&stats));
            black_box(ranks.len());
        })
    });
}

fn bench_leaderboard(c: &mut Criterion) {
    let stats = sample_stats(500);
    let picks = sample_picks(100);
    let team_place: HashMap<String, u32> = (0..3u32)
        .map(|i| (format!("T{:02}", i), i + 1))
        .collect();

    c.bench_function("leaderboard_100x500", |b| {
        b.iter(|| {
            let rows = build_leaderboard(black_box(&picks), black_box(&stats), &team_place);
            black_box(rows.len());
        })
    });
}

criterion_group!(benches, bench_rank_lookup, bench_leaderboard);
criterion_main!(benches);
