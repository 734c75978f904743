/// Budget dimension classification
pub mod classify;
/// Budget redistribution
pub mod redistribute;

pub use classify::{any_statistic_uses_delta, is_delta_sensitive, statistic_uses_value, DELTA_SENSITIVE_KINDS};
pub use redistribute::{redistribute, redistribute_dimension};
