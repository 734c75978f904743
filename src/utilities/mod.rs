/// Exact arithmetic on budget shares
pub mod exactarithmetic;
/// Budget parameters
pub mod params;
