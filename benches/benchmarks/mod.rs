pub mod plan_benchmark;
pub mod redistribute_benchmark;

use dpalloc::{Statistic, StatisticKind, Variable};

/// A plan of `size` statistics cycling through every kind, every fourth locked.
pub fn statistics(size: usize) -> Vec<Statistic> {
    (0..size)
        .map(|i| {
            let kind = StatisticKind::ALL[i % StatisticKind::ALL.len()];
            let s = Statistic::new(i.to_string(), kind, Variable::new(format!("v{}", i)));
            if i % 4 == 0 {
                s.with_budget(0.001, 0.0).locked()
            } else {
                s
            }
        })
        .collect()
}
