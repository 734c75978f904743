use criterion::{black_box, criterion_group, BenchmarkId, Criterion};
use dpalloc::redistribute;

use super::statistics;

/// Redistribution cost as the number of statistics grows.
fn redistribute_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("redistribute_by_size");
    for size in [1usize, 10, 50, 200].iter() {
        let mut stats = statistics(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| redistribute(black_box(&mut stats), 1.0, 0.0, 1e-5))
        });
    }
    group.finish();
}

criterion_group!(benches, redistribute_by_size);
