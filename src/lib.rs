//! # Differential Privacy Budget Allocation Crate
//! Shares a fixed differential privacy budget (epsilon, and optionally delta)
//! across the statistics of a release before they are submitted for private
//! computation.
//!
//! **Status:** active development. The crate apportions budget only; it does
//! not compute any private statistic itself.
//! ## Background
//! A researcher configures a list of statistics under a total epsilon and
//! delta. Whenever a statistic is added, removed, edited or locked, or a total
//! changes, the budget is redistributed: locked statistics keep the shares the
//! researcher pinned, and whatever is left is split evenly across the unlocked
//! statistics. Only delta-sensitive kinds (histograms) hold a share of delta.
//!
//! Budgets are human-meaningful decimal fractions, so shares are computed with
//! exact rational arithmetic and only rounded to `f64` at the end; `0.01`
//! never silently becomes `0.009999999`.
//! ## Details
//! ### Example Usage
//! **Redistributing a plan**
//! ```
//! use dpalloc::{redistribute, Statistic, StatisticKind, Variable};
//!
//! let mut statistics = vec![
//!     Statistic::new("a", StatisticKind::Mean, Variable::new("age")).with_budget(0.3, 0.0).locked(),
//!     Statistic::new("b", StatisticKind::Mean, Variable::new("income")),
//!     Statistic::new("c", StatisticKind::Histogram, Variable::new("income")),
//! ];
//! redistribute(&mut statistics, 1.0, 0.0, 0.002);
//! assert_eq!(statistics[1].epsilon, 0.35);
//! assert_eq!(statistics[2].epsilon, 0.35);
//! assert_eq!(statistics[2].delta, 0.002);
//! assert_eq!(statistics[1].delta, 0.0);
//! ```
//! **Editing a plan**
//!
//! `AnalysisPlan` owns the statistics and budget and redistributes after
//! every edit. Statistics are validated before they are added.
//! ```
//! use dpalloc::{AllocError, AnalysisPlan, Budget, Statistic, StatisticKind, Variable};
//!
//! let mut plan = AnalysisPlan::new(Budget::with_epsilon(1.0).unwrap());
//! plan.add_statistic(Statistic::new("a", StatisticKind::Count, Variable::new("age"))).unwrap();
//! plan.add_statistic(Statistic::new("b", StatisticKind::Median, Variable::new("age"))).unwrap();
//! assert_eq!(plan.get("a").unwrap().epsilon, 0.5);
//!
//! let duplicate = Statistic::new("c", StatisticKind::Count, Variable::new("age"));
//! assert!(matches!(plan.add_statistic(duplicate), Err(AllocError::Rejected(_))));
//! ```

/// Error types
pub mod error;
/// Statistics and budget dimensions
pub mod statistic;
/// Exact arithmetic and budget parameters
pub mod utilities;
/// Budget classification and redistribution
pub mod allocation;
/// Validation of new statistics
pub mod validation;
/// Analysis plans
pub mod plan;

pub use error::{AllocError, Result};
pub use statistic::{Dimension, HistogramBins, MissingValuesHandling, Statistic, StatisticKind, ValueRange, Variable};
pub use utilities::params::Budget as Budget;
pub use utilities::params::DEFAULT_DELTA as DEFAULT_DELTA;
pub use allocation::classify::any_statistic_uses_delta as any_statistic_uses_delta;
pub use allocation::classify::is_delta_sensitive as is_delta_sensitive;
pub use allocation::classify::statistic_uses_value as statistic_uses_value;
pub use allocation::redistribute::redistribute as redistribute;
pub use allocation::redistribute::redistribute_dimension as redistribute_dimension;
pub use validation::{validate_new_statistic, ValidationProblem};
pub use plan::{AnalysisPlan, BudgetSummary};
