//! Wall-clock benchmarks for the core forest operations.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench forest_perf
//!
//! # Single group
//! cargo bench --bench forest_perf -- insert_drain
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use binomial_forest::{BinomialForest, Heap, HeapOrder, Key};

/// Push N random keys, then drain the heap dry.
fn bench_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    for n in [1_000usize, 10_000, 100_000] {
        let mut rng = StdRng::seed_from_u64(0xB101);
        let keys: Vec<Key> = (0..n)
            .map(|_| rng.random_range(-1_000_000..1_000_000))
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| {
                let mut forest = BinomialForest::with_capacity(HeapOrder::Min, keys.len());
                let mut heap = Heap::new();
                for &k in keys {
                    forest.insert(&mut heap, k);
                }
                while let Ok(key) = forest.extract_extreme(&mut heap) {
                    black_box(key);
                }
            });
        });
    }
    group.finish();
}

/// Build many small heaps in one arena and fold them into a single heap.
fn bench_meld(c: &mut Criterion) {
    let mut group = c.benchmark_group("meld");
    for pieces in [8usize, 64, 512] {
        let per_piece = 4096 / pieces;
        group.bench_with_input(BenchmarkId::from_parameter(pieces), &pieces, move |b, &pieces| {
            b.iter(|| {
                let mut forest = BinomialForest::with_capacity(HeapOrder::Min, 4096);
                let mut target = Heap::new();
                for p in 0..pieces {
                    let mut donor = Heap::new();
                    for i in 0..per_piece {
                        forest.insert(&mut donor, (p * per_piece + i) as Key);
                    }
                    forest.meld(&mut target, donor);
                }
                black_box(target.len())
            });
        });
    }
    group.finish();
}

/// Push N elements with decrease_key on half, then drain.
fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for n in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements((n / 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut forest = BinomialForest::with_capacity(HeapOrder::Min, n);
                let mut heap = Heap::new();
                let handles: Vec<_> = (0..n)
                    .map(|i| forest.insert(&mut heap, (i as Key) * 2))
                    .collect();
                for (i, &h) in handles.iter().enumerate().step_by(2) {
                    let _ = forest.decrease_key(&mut heap, h, (i as Key) * 2 - 1);
                }
                while let Ok(key) = forest.extract_extreme(&mut heap) {
                    black_box(key);
                }
            });
        });
    }
    group.finish();
}

/// Dijkstra-like pattern: extract and relax a few neighbours per round.
fn bench_relaxation_pattern(c: &mut Criterion) {
    const UNREACHED: Key = 1 << 40;
    let mut group = c.benchmark_group("relaxation");
    let n = 10_000usize;
    group.bench_function(BenchmarkId::from_parameter(n), |b| {
        b.iter(|| {
            let mut forest = BinomialForest::with_capacity(HeapOrder::Min, n);
            let mut heap = Heap::new();
            let handles: Vec<_> = (0..n)
                .map(|_| forest.insert(&mut heap, UNREACHED))
                .collect();
            forest.decrease_key(&mut heap, handles[0], 0).unwrap();

            let mut settled = 0usize;
            while let Ok(dist) = forest.extract_extreme(&mut heap) {
                black_box(dist);
                settled += 1;
                for offset in 1..=3usize {
                    let neighbor = (settled + offset) % n;
                    // Extracted neighbours are stale; failed relaxations are expected.
                    let _ = forest.decrease_key(
                        &mut heap,
                        handles[neighbor],
                        (settled + offset) as Key,
                    );
                }
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_drain,
    bench_meld,
    bench_decrease_key,
    bench_relaxation_pattern
);
criterion_main!(benches);
