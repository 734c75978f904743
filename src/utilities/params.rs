//! Privacy budget parameters.

use serde::{Deserialize, Serialize};

use crate::allocation::{any_statistic_uses_delta, redistribute};
use crate::error::{AllocError, Result};
use crate::statistic::Statistic;

/// Delta used when a statistic needs one but the plan total is zero.
pub const DEFAULT_DELTA: f64 = 1e-5;

fn default_delta() -> f64 {
    DEFAULT_DELTA
}

/// The fixed total budget of a release, shared across its statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Total epsilon available to the plan
    pub total_epsilon: f64,
    /// Total delta available to the plan; zero means "not set"
    #[serde(default)]
    pub total_delta: f64,
    /// Fallback total delta for plans with delta-sensitive statistics
    #[serde(default = "default_delta")]
    pub default_delta: f64,
}

impl Budget {
    /// Create a new budget.
    /// ## Arguments
    ///   * `total_epsilon`: the total epsilon, positive
    ///   * `total_delta`: the total delta, zero or positive
    ///   * `default_delta`: the fallback delta, positive
    /// ## Errors
    /// Returns an error if any of the parameters are mis-specified.
    pub fn new(total_epsilon: f64, total_delta: f64, default_delta: f64) -> Result<Budget> {
        let budget = Budget { total_epsilon, total_delta, default_delta };
        budget.check()?;
        Ok(budget)
    }

    /// Create a budget with the given epsilon, no delta and the standard fallback.
    pub fn with_epsilon(total_epsilon: f64) -> Result<Budget> {
        Budget::new(total_epsilon, 0.0, DEFAULT_DELTA)
    }

    /// Check the parameters, e.g. after deserializing.
    pub fn check(&self) -> Result<()> {
        if !self.total_epsilon.is_finite() || self.total_epsilon <= 0.0 {
            return Err(AllocError::InvalidParameter("total epsilon must be positive and finite"));
        }
        if !self.total_delta.is_finite() || self.total_delta < 0.0 {
            return Err(AllocError::InvalidParameter("total delta must be non-negative and finite"));
        }
        if !self.default_delta.is_finite() || self.default_delta <= 0.0 {
            return Err(AllocError::InvalidParameter("default delta must be positive and finite"));
        }
        Ok(())
    }

    /// The delta total actually shared among `statistics`.
    ///
    /// Zero when no statistic uses delta; otherwise the configured total, or
    /// the default delta when the configured total is zero.
    pub fn effective_delta(&self, statistics: &[Statistic]) -> f64 {
        effective_delta(statistics, self.total_delta, self.default_delta)
    }

    /// Redistribute this budget across `statistics` in place.
    pub fn redistribute(&self, statistics: &mut [Statistic]) {
        redistribute(statistics, self.total_epsilon, self.total_delta, self.default_delta);
    }
}

pub(crate) fn effective_delta(statistics: &[Statistic], total_delta: f64, default_delta: f64) -> f64 {
    if !any_statistic_uses_delta(statistics) {
        0.0
    } else if total_delta == 0.0 {
        default_delta
    } else {
        total_delta
    }
}
