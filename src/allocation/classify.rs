//! Which budget dimensions each statistic kind consumes.

use crate::statistic::{Dimension, Statistic, StatisticKind};

/// Statistic kinds whose mechanism needs a delta share.
pub const DELTA_SENSITIVE_KINDS: &[StatisticKind] = &[StatisticKind::Histogram];

/// Whether `kind` needs a share of delta.
pub fn is_delta_sensitive(kind: StatisticKind) -> bool {
    DELTA_SENSITIVE_KINDS.contains(&kind)
}

/// Whether a statistic of `kind` holds budget in `dimension`.
///
/// Every kind uses epsilon; only delta-sensitive kinds use delta. Redistribution
/// consults nothing else.
pub fn statistic_uses_value(dimension: Dimension, kind: StatisticKind) -> bool {
    match dimension {
        Dimension::Epsilon => true,
        Dimension::Delta => is_delta_sensitive(kind),
    }
}

/// Whether any statistic in the plan uses delta.
pub fn any_statistic_uses_delta(statistics: &[Statistic]) -> bool {
    statistics
        .iter()
        .any(|s| statistic_uses_value(Dimension::Delta, s.kind))
}

impl StatisticKind {
    /// Whether this kind needs a share of delta.
    pub fn is_delta_sensitive(&self) -> bool {
        is_delta_sensitive(*self)
    }
}
