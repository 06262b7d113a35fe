//! # MLBF Cascade Benchmarks
//!
//! | Operation | Input |
//! |-----------|-------|
//! | Cascade build | 1k blocked / 10k..100k not blocked |
//! | Membership query | Built cascade, blocked and not-blocked keys |
//! | Serialize / parse | Built cascade |
//! | Snapshot diff | 100k-key snapshots |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mlbf_cascade::{
    diff, encode_key, Cascade, CascadeBuilder, FprSchedule, HashAlgorithm, Key, Salt,
};
use std::time::Duration;

fn keys(prefix: &str, count: usize) -> Vec<Key> {
    (0..count)
        .map(|i| encode_key(&format!("{prefix}{i}@example.com"), "1.0"))
        .collect()
}

fn build(blocked: &[Key], not_blocked: &[Key], algorithm: HashAlgorithm) -> Cascade {
    let rates = FprSchedule::reference(blocked.len(), not_blocked.len(), 0.5)
        .expect("reference schedule");
    CascadeBuilder::new(Salt::new([7u8; 16]))
        .hash_algorithm(algorithm)
        .build(blocked, not_blocked, &rates)
        .expect("cascade build")
}

// ============================================================================
// Build
// ============================================================================

fn bench_cascade_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade-build");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    let blocked = keys("b", 1_000);
    for size in [10_000, 100_000] {
        let not_blocked = keys("n", size);
        group.throughput(Throughput::Elements((blocked.len() + size) as u64));

        for algorithm in [HashAlgorithm::Sha256, HashAlgorithm::Murmur3] {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), size),
                &not_blocked,
                |b, not_blocked| b.iter(|| black_box(build(&blocked, not_blocked, algorithm))),
            );
        }
    }

    group.finish();
}

// ============================================================================
// Query
// ============================================================================

fn bench_cascade_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade-query");

    let blocked = keys("b", 1_000);
    let not_blocked = keys("n", 20_000);
    let cascade = build(&blocked, &not_blocked, HashAlgorithm::Sha256);

    group.bench_function("blocked_key", |b| {
        b.iter(|| black_box(cascade.is_blocked(&blocked[500])))
    });
    group.bench_function("not_blocked_key", |b| {
        b.iter(|| black_box(cascade.is_blocked(&not_blocked[10_000])))
    });
    group.throughput(Throughput::Elements(not_blocked.len() as u64));
    group.bench_function("scan_not_blocked", |b| {
        b.iter(|| not_blocked.iter().filter(|k| cascade.is_blocked(k)).count())
    });

    group.finish();
}

// ============================================================================
// Wire format
// ============================================================================

fn bench_wire_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("wire-format");

    let cascade = build(&keys("b", 1_000), &keys("n", 20_000), HashAlgorithm::Sha256);
    let bytes = cascade.to_bytes();
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("to_bytes", |b| b.iter(|| black_box(cascade.to_bytes())));
    group.bench_function("from_bytes", |b| {
        b.iter(|| black_box(Cascade::from_bytes(&bytes).expect("valid filter")))
    });

    group.finish();
}

// ============================================================================
// Diff
// ============================================================================

fn bench_snapshot_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot-diff");

    let previous = keys("b", 100_000);
    let mut current = previous[1_000..].to_vec();
    current.extend(keys("new", 1_000));

    group.throughput(Throughput::Elements((previous.len() + current.len()) as u64));
    group.bench_function("100k", |b| b.iter(|| black_box(diff(&previous, &current))));

    group.finish();
}

criterion_group!(
    benches,
    bench_cascade_build,
    bench_cascade_query,
    bench_wire_format,
    bench_snapshot_diff
);
criterion_main!(benches);
