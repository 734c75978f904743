//! Statistics as defined in an analysis plan.
//!
//! A `Statistic` is one entry the researcher has configured: what to compute,
//! over which variable, and the share of the privacy budget it currently holds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AllocError;

/// The kinds of statistic a plan may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    Count,
    Mean,
    Median,
    Variance,
    Histogram,
}

impl StatisticKind {
    /// All known kinds, in display order.
    pub const ALL: [StatisticKind; 5] = [
        StatisticKind::Count,
        StatisticKind::Mean,
        StatisticKind::Median,
        StatisticKind::Variance,
        StatisticKind::Histogram,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StatisticKind::Count => "count",
            StatisticKind::Mean => "mean",
            StatisticKind::Median => "median",
            StatisticKind::Variance => "variance",
            StatisticKind::Histogram => "histogram",
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A privacy budget dimension a statistic may hold a share of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Epsilon,
    Delta,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Epsilon => "epsilon",
            Dimension::Delta => "delta",
        }
    }
}

impl FromStr for Dimension {
    type Err = AllocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epsilon" => Ok(Dimension::Epsilon),
            "delta" => Ok(Dimension::Delta),
            other => Err(AllocError::UnknownDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared bounds of a numeric variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

/// Reference to the dataset variable a statistic is computed over.
///
/// Only `name` takes part in identity; the range is consulted by histogram
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ValueRange>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into(), range: None }
    }

    pub fn with_range(name: impl Into<String>, min: f64, max: f64) -> Self {
        Variable { name: name.into(), range: Some(ValueRange { min, max }) }
    }
}

/// How missing values of the variable are treated before computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuesHandling {
    DropMissing,
    InsertRandom,
    InsertFixed,
}

impl Default for MissingValuesHandling {
    fn default() -> Self {
        MissingValuesHandling::DropMissing
    }
}

/// Histogram bin edges, in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBins {
    pub edges: Vec<f64>,
}

/// One statistic in an analysis plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    pub id: String,
    pub kind: StatisticKind,
    pub variable: Variable,
    #[serde(default)]
    pub epsilon: f64,
    #[serde(default)]
    pub delta: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub missing_values: MissingValuesHandling,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<HistogramBins>,
}

impl Statistic {
    /// Create an unlocked statistic holding no budget.
    pub fn new(id: impl Into<String>, kind: StatisticKind, variable: Variable) -> Self {
        Statistic {
            id: id.into(),
            kind,
            variable,
            epsilon: 0.0,
            delta: 0.0,
            locked: false,
            missing_values: MissingValuesHandling::default(),
            fixed_value: None,
            histogram: None,
        }
    }

    pub fn with_budget(mut self, epsilon: f64, delta: f64) -> Self {
        self.epsilon = epsilon;
        self.delta = delta;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    /// Impute missing values with `value`.
    pub fn with_fixed_value(mut self, value: impl Into<String>) -> Self {
        self.missing_values = MissingValuesHandling::InsertFixed;
        self.fixed_value = Some(value.into());
        self
    }

    pub fn with_bins(mut self, edges: Vec<f64>) -> Self {
        self.histogram = Some(HistogramBins { edges });
        self
    }

    /// The share this statistic currently holds in `dimension`.
    pub fn value(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Epsilon => self.epsilon,
            Dimension::Delta => self.delta,
        }
    }

    pub fn set_value(&mut self, dimension: Dimension, value: f64) {
        match dimension {
            Dimension::Epsilon => self.epsilon = value,
            Dimension::Delta => self.delta = value,
        }
    }
}
