//! Error types for the allocator.

use thiserror::Error;

use crate::validation::ValidationProblem;

/// Errors raised by budget construction and plan edits.
///
/// `redistribute` itself never fails; these cover the surfaces around it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("Value is not finite: {0}")]
    NonFiniteValue(f64),

    #[error("Unknown budget dimension: {0}")]
    UnknownDimension(String),

    #[error("No statistic with id {0}")]
    UnknownStatistic(String),

    #[error("Statistic rejected with {} problem(s)", .0.len())]
    Rejected(Vec<ValidationProblem>),
}

/// Result alias for fallible allocator operations.
pub type Result<T> = std::result::Result<T, AllocError>;
