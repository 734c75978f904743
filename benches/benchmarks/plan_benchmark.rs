use criterion::{black_box, criterion_group, Criterion};
use dpalloc::{AnalysisPlan, Budget};

use super::statistics;

/// Building a plan one statistic at a time, validating and redistributing on each add.
fn build_plan(c: &mut Criterion) {
    let budget = Budget::new(1.0, 1e-6, 1e-5).unwrap();
    let stats: Vec<_> = statistics(50)
        .into_iter()
        .map(|mut s| {
            if s.kind.is_delta_sensitive() {
                s.histogram = Some(dpalloc::HistogramBins { edges: vec![0.0, 1.0] });
            }
            s.locked = false;
            s
        })
        .collect();
    c.bench_function("build_plan_50", |b| {
        b.iter(|| {
            let mut plan = AnalysisPlan::new(budget);
            for s in stats.iter() {
                plan.add_statistic(s.clone()).unwrap();
            }
            black_box(plan.summary())
        })
    });
}

criterion_group!(benches, build_plan);
