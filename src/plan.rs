//! An analysis plan: the statistics of a release together with its budget.
//!
//! Every edit to the plan ends with a full redistribution pass, so the plan
//! always holds a complete allocation of its budget.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::allocation::statistic_uses_value;
use crate::error::{AllocError, Result};
use crate::statistic::{Dimension, Statistic};
use crate::utilities::exactarithmetic::{exact_sum, to_exact, to_plain};
use crate::utilities::params::Budget;
use crate::validation::{validate_new_statistic, ValidationProblem};

/// How much of a plan's budget is held by its statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub allocated_epsilon: f64,
    pub allocated_delta: f64,
    pub remaining_epsilon: f64,
    pub remaining_delta: f64,
    pub locked_count: usize,
}

/// The statistics of a release and the budget they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPlan {
    pub budget: Budget,
    #[serde(default)]
    pub statistics: Vec<Statistic>,
}

impl AnalysisPlan {
    pub fn new(budget: Budget) -> Self {
        AnalysisPlan { budget, statistics: Vec::new() }
    }

    pub fn get(&self, id: &str) -> Option<&Statistic> {
        self.statistics.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Statistic> {
        self.statistics
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AllocError::UnknownStatistic(id.to_string()))
    }

    /// Re-share the budget across the current statistics.
    pub fn redistribute(&mut self) {
        self.budget.redistribute(&mut self.statistics);
    }

    /// Add a statistic after validating it against the plan.
    /// ## Errors
    /// Returns `Rejected` with the problems found if validation fails; the
    /// plan is left unchanged.
    pub fn add_statistic(&mut self, statistic: Statistic) -> Result<()> {
        let mut problems = validate_new_statistic(&statistic, &self.statistics);
        if self.get(&statistic.id).is_some() {
            problems.push(ValidationProblem::new("id", format!("Id {} is already in use", statistic.id)));
        }
        if !problems.is_empty() {
            return Err(AllocError::Rejected(problems));
        }
        info!(id = %statistic.id, kind = %statistic.kind, variable = %statistic.variable.name, "adding statistic");
        self.statistics.push(statistic);
        self.redistribute();
        Ok(())
    }

    /// Remove a statistic, returning it.
    pub fn remove_statistic(&mut self, id: &str) -> Result<Statistic> {
        let index = self
            .statistics
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| AllocError::UnknownStatistic(id.to_string()))?;
        let removed = self.statistics.remove(index);
        info!(id, "removed statistic");
        self.redistribute();
        Ok(removed)
    }

    /// Pin or release a statistic's current shares.
    pub fn set_locked(&mut self, id: &str, locked: bool) -> Result<()> {
        self.get_mut(id)?.locked = locked;
        self.redistribute();
        Ok(())
    }

    /// Manually set a statistic's shares, which locks it.
    /// ## Errors
    /// Returns `Rejected` if the locked shares would exceed a total, or would
    /// leave part of a total unallocated because no unlocked statistic remains
    /// to take it. Returns `UnknownStatistic` for an unknown id.
    pub fn set_statistic_budget(&mut self, id: &str, epsilon: f64, delta: f64) -> Result<()> {
        let kind = self.get(id).ok_or_else(|| AllocError::UnknownStatistic(id.to_string()))?.kind;

        let mut problems = Vec::new();
        for (dimension, value) in [(Dimension::Epsilon, epsilon), (Dimension::Delta, delta)].iter() {
            if statistic_uses_value(*dimension, kind) && (!value.is_finite() || *value < 0.0) {
                problems.push(ValidationProblem::new(dimension.name(), "Must be a non-negative number"));
            }
        }
        if !problems.is_empty() {
            return Err(AllocError::Rejected(problems));
        }

        let mut statistics = self.statistics.clone();
        if let Some(statistic) = statistics.iter_mut().find(|s| s.id == id) {
            statistic.epsilon = epsilon;
            statistic.delta = if statistic_uses_value(Dimension::Delta, kind) { delta } else { 0.0 };
            statistic.locked = true;
        }
        let problems = locked_share_problems(&self.budget, &statistics, Dimension::name)?;
        if !problems.is_empty() {
            return Err(AllocError::Rejected(problems));
        }

        self.statistics = statistics;
        self.redistribute();
        Ok(())
    }

    /// Change the total epsilon.
    /// ## Errors
    /// Returns `InvalidParameter` for a non-positive total, and `Rejected` if
    /// the locked shares no longer fit the new total.
    pub fn set_total_epsilon(&mut self, total_epsilon: f64) -> Result<()> {
        self.set_budget(Budget::new(total_epsilon, self.budget.total_delta, self.budget.default_delta)?)
    }

    /// Change the total delta; zero falls back to the default delta.
    /// ## Errors
    /// As for `set_total_epsilon`.
    pub fn set_total_delta(&mut self, total_delta: f64) -> Result<()> {
        self.set_budget(Budget::new(self.budget.total_epsilon, total_delta, self.budget.default_delta)?)
    }

    fn set_budget(&mut self, budget: Budget) -> Result<()> {
        let problems = locked_share_problems(&budget, &self.statistics, total_field)?;
        if !problems.is_empty() {
            return Err(AllocError::Rejected(problems));
        }
        self.budget = budget;
        self.redistribute();
        Ok(())
    }

    /// Totals held by the statistics and what is left of the budget.
    pub fn summary(&self) -> BudgetSummary {
        let allocated = |dimension: Dimension| {
            let values: Vec<_> = self
                .statistics
                .iter()
                .filter(|s| statistic_uses_value(dimension, s.kind))
                .filter_map(|s| to_exact(s.value(dimension)).ok())
                .collect();
            exact_sum(&values)
        };
        let remaining = |total: f64, held: &rug::Rational| match to_exact(total) {
            Ok(total) => to_plain(&(total - held)),
            Err(_) => 0.0,
        };

        let epsilon = allocated(Dimension::Epsilon);
        let delta = allocated(Dimension::Delta);
        BudgetSummary {
            allocated_epsilon: to_plain(&epsilon),
            allocated_delta: to_plain(&delta),
            remaining_epsilon: remaining(self.budget.total_epsilon, &epsilon),
            remaining_delta: remaining(self.budget.effective_delta(&self.statistics), &delta),
            locked_count: self.statistics.iter().filter(|s| s.locked).count(),
        }
    }
}

fn total_field(dimension: &Dimension) -> &'static str {
    match dimension {
        Dimension::Epsilon => "totalEpsilon",
        Dimension::Delta => "totalDelta",
    }
}

/// Problems with the locked shares of `statistics` under `budget`.
///
/// Locked shares may not exceed a total. When every statistic using a
/// dimension is locked they must add up to that total exactly, since nobody
/// is left to take the remainder.
fn locked_share_problems<F>(budget: &Budget, statistics: &[Statistic], field: F) -> Result<Vec<ValidationProblem>>
where
    F: Fn(&Dimension) -> &'static str,
{
    let mut problems = Vec::new();
    for dimension in [Dimension::Epsilon, Dimension::Delta].iter() {
        let users: Vec<&Statistic> = statistics
            .iter()
            .filter(|s| statistic_uses_value(*dimension, s.kind))
            .collect();
        if users.is_empty() {
            continue;
        }
        let total = match dimension {
            Dimension::Epsilon => budget.total_epsilon,
            Dimension::Delta => budget.effective_delta(statistics),
        };
        let mut locked = Vec::new();
        for s in users.iter().filter(|s| s.locked) {
            locked.push(to_exact(s.value(*dimension))?);
        }
        let locked_sum = exact_sum(&locked);
        let exact_total = to_exact(total)?;
        if locked_sum > exact_total {
            problems.push(ValidationProblem::new(
                field(dimension),
                format!("Locked {} would exceed the total of {}", dimension, total),
            ));
        } else if locked.len() == users.len() && locked_sum != exact_total {
            problems.push(ValidationProblem::new(
                field(dimension),
                format!(
                    "With every statistic locked, {} must add up to the total of {}",
                    dimension, total
                ),
            ));
        }
    }
    Ok(problems)
}
