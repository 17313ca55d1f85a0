use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use conviction_analytics::{aggregate, classify, rank, summarize_by_track, RankingRole};
use conviction_types::{Address, Balance, DelegationEdge, LockPeriod};

fn make_edges(n: usize) -> Vec<DelegationEdge> {
    (0..n)
        .map(|i| DelegationEdge {
            from: Address::new(format!("delegator{i}")),
            to: Address::new(format!("delegate{}", i % 97)),
            balance: Balance::from(1_000_000_000_000u64 + i as u64),
            lock_period: LockPeriod::new((i % 7) as u32),
            track: (i % 15) as u16,
            created_at: None,
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for edge_count in [100, 1_000, 10_000] {
        let edges = make_edges(edge_count);
        group.bench_with_input(BenchmarkId::new("aggregate", edge_count), &edges, |b, edges| {
            b.iter(|| black_box(aggregate(black_box(edges))));
        });
    }

    group.finish();
}

fn bench_summarize_by_track(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_by_track");
    let tracks: Vec<u16> = (0..15).collect();

    for edge_count in [1_000, 10_000] {
        let edges = make_edges(edge_count);
        group.bench_with_input(
            BenchmarkId::new("summarize_by_track", edge_count),
            &edges,
            |b, edges| {
                b.iter(|| black_box(summarize_by_track(black_box(edges), black_box(&tracks))));
            },
        );
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    let target = Address::new("delegate0");

    for edge_count in [10, 100, 1_000] {
        let edges: Vec<_> = make_edges(edge_count * 97)
            .into_iter()
            .filter(|e| e.touches(&target))
            .collect();
        group.bench_with_input(BenchmarkId::new("classify", edge_count), &edges, |b, edges| {
            b.iter(|| black_box(classify(&target, 0, edges.clone(), Address::clone)));
        });
    }

    group.finish();
}

fn bench_rank(c: &mut Criterion) {
    let analytics = aggregate(&make_edges(10_000));
    c.bench_function("rank_top_50", |b| {
        b.iter(|| black_box(rank(black_box(&analytics), RankingRole::Delegates, 50)));
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_summarize_by_track,
    bench_classify,
    bench_rank
);
criterion_main!(benches);
