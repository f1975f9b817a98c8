//! Benchmark for coverage flags and top value ranking on synthetic tables
//!
//! Run with: cargo bench --bench coverage_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand::SeedableRng;

use labmerge::pipeline::{
    coverage_flags, top_values_by_key, LabKey, LabValueStat, DEFAULT_COVERAGE_PERCENT,
    DEFAULT_TOP_N,
};

/// Generate `(concept, records)` rows spread over `n_groups` concepts
fn generate_coverage_rows(n_rows: usize, n_groups: usize, seed: u64) -> Vec<(String, u64)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    (0..n_rows)
        .map(|_| {
            let group = rng.gen_range(0..n_groups);
            // Skewed counts so a few rows dominate each concept
            let v = rng.gen::<f64>();
            (format!("{}", 3_000_000 + group), (v * v * v * 100_000.0) as u64)
        })
        .collect()
}

/// Generate lab value statistics spread over `n_keys` lab test keys
fn generate_stats(n_rows: usize, n_keys: usize, seed: u64) -> Vec<LabValueStat> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let keys: Vec<LabKey> = (0..n_keys)
        .map(|k| LabKey::new(format!("{}", 3_000_000 + k), format!("{}", k), "abbr", "unit"))
        .collect();

    (0..n_rows)
        .map(|_| LabValueStat {
            key: keys[rng.gen_range(0..n_keys)].clone(),
            value: format!("{:.1}", rng.gen::<f64>() * 200.0),
            n_people: rng.gen_range(1..5_000),
            n_records: rng.gen_range(1..50_000),
        })
        .collect()
}

fn benchmark_coverage_flags(c: &mut Criterion) {
    let mut group = c.benchmark_group("coverage_flags");
    group.sample_size(30);

    for n_rows in [1_000, 10_000, 100_000] {
        let rows = generate_coverage_rows(n_rows, n_rows / 20, 42);
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &rows, |b, rows| {
            b.iter(|| coverage_flags(black_box(rows), DEFAULT_COVERAGE_PERCENT))
        });
    }

    group.finish();
}

fn benchmark_top_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("top_values_by_key");
    group.sample_size(30);

    for n_rows in [1_000, 10_000, 100_000] {
        let stats = generate_stats(n_rows, n_rows / 50, 7);
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &stats, |b, stats| {
            b.iter(|| top_values_by_key(black_box(stats), DEFAULT_TOP_N))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_coverage_flags, benchmark_top_values);
criterion_main!(benches);
