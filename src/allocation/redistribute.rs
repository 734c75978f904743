//! Shares a fixed privacy budget across the statistics of a plan.
//!
//! Locked statistics keep the values the researcher pinned. What is left of
//! each dimension's total is split evenly across the unlocked statistics that
//! use that dimension, and statistics that do not use a dimension are driven
//! to zero in it.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::allocation::classify::statistic_uses_value;
use crate::statistic::{Dimension, Statistic};
use crate::utilities::exactarithmetic::{equal_share, exact_sum, to_exact, to_plain};
use crate::utilities::params::effective_delta;

/// Recomputes every statistic's epsilon and delta share in place.
///
/// Call after any statistic is added, removed, edited or (un)locked, and after
/// either total changes. The result depends only on the arguments, so calling
/// again with the same arguments reproduces the same allocation.
/// ## Arguments
///   * `statistics`: the plan's statistics, mutated in place
///   * `total_epsilon`: the total epsilon of the plan
///   * `total_delta`: the total delta of the plan, zero if not set
///   * `default_delta`: the delta shared when delta-sensitive statistics
///     exist and `total_delta` is zero
pub fn redistribute(statistics: &mut [Statistic], total_epsilon: f64, total_delta: f64, default_delta: f64) {
    let delta = effective_delta(statistics, total_delta, default_delta);
    redistribute_dimension(total_epsilon, Dimension::Epsilon, statistics);
    redistribute_dimension(delta, Dimension::Delta, statistics);
}

/// Shares `total_value` of one dimension across `statistics`.
///
/// Statistics that do not use `dimension` are set to zero whether locked or
/// not. Locked users keep their value; the unlocked users each receive
/// `(total_value - locked sum) / unlocked count`. A locked sum above the total
/// is not clamped.
pub fn redistribute_dimension(total_value: f64, dimension: Dimension, statistics: &mut [Statistic]) {
    let mut locked_values = Vec::new();
    let mut unlocked = Vec::new();

    for (index, statistic) in statistics.iter_mut().enumerate() {
        if !statistic_uses_value(dimension, statistic.kind) {
            statistic.set_value(dimension, 0.0);
        } else if !statistic.locked {
            unlocked.push(index);
        } else {
            match to_exact(statistic.value(dimension)) {
                Ok(value) => locked_values.push(value),
                Err(err) => warn!(id = %statistic.id, %dimension, %err, "ignoring locked value"),
            }
        }
    }

    let total = match to_exact(total_value) {
        Ok(total) => total,
        Err(err) => {
            warn!(%dimension, %err, "total is not usable, leaving shares as they are");
            return;
        }
    };
    let locked_value = exact_sum(&locked_values);
    let remaining = total - &locked_value;
    if remaining.cmp0() == Ordering::Less {
        warn!(
            %dimension,
            total = total_value,
            locked = to_plain(&locked_value),
            "locked shares exceed the total"
        );
    }

    let share = match equal_share(&remaining, unlocked.len()) {
        Some(share) => to_plain(&share),
        None => {
            debug!(%dimension, locked = locked_values.len(), "no unlocked statistics to share with");
            return;
        }
    };
    debug!(
        %dimension,
        total = total_value,
        locked = to_plain(&locked_value),
        unlocked = unlocked.len(),
        share,
        "redistributed"
    );
    for index in unlocked {
        statistics[index].set_value(dimension, share);
    }
}
