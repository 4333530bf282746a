//! # Policy Benchmarks
//!
//! Throughput of the fleet comparison pass.
//!
//! Run with: `cargo bench -p privopt-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use privopt_core::{Comparison, UsagePolicy, sample_fleet, seeded_rng};
use std::hint::black_box;

fn bench_optimize(c: &mut Criterion) {
    let fleet = sample_fleet(1, &mut seeded_rng(1)).expect("sample");
    let profile = &fleet[0];

    c.bench_function("optimize_single", |b| {
        b.iter(|| black_box(UsagePolicy::optimize(black_box(profile))));
    });
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison_run");

    for size in [6usize, 100, 1000].iter() {
        let fleet = sample_fleet(*size, &mut seeded_rng(42)).expect("sample");
        group.bench_with_input(BenchmarkId::from_parameter(size), &fleet, |b, fleet| {
            b.iter(|| {
                let comparison = Comparison::run(black_box(fleet)).expect("run");
                black_box(comparison.summary())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_optimize, bench_comparison);
criterion_main!(benches);
