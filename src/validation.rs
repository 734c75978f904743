//! Checks a statistic must pass before it joins a plan.
//!
//! Problems are returned as data, one per offending field, so the caller can
//! show them next to the field they concern.

use serde::{Deserialize, Serialize};

use crate::statistic::{MissingValuesHandling, Statistic, StatisticKind};

/// A user-facing problem with one field of a candidate statistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationProblem {
    pub field: String,
    pub message: String,
}

impl ValidationProblem {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        ValidationProblem { field: field.to_string(), message: message.into() }
    }
}

/// Validates `candidate` against the statistics already in the plan.
///
/// An empty list means the candidate may be added.
pub fn validate_new_statistic(candidate: &Statistic, existing: &[Statistic]) -> Vec<ValidationProblem> {
    let mut problems = Vec::new();

    if existing.iter().any(|s| s.id != candidate.id && is_duplicate(candidate, s)) {
        problems.push(ValidationProblem::new(
            "statistic",
            format!(
                "A {} statistic on {} with the same settings already exists",
                candidate.kind, candidate.variable.name
            ),
        ));
    }

    match (candidate.missing_values, &candidate.fixed_value) {
        (MissingValuesHandling::InsertFixed, None) => {
            problems.push(ValidationProblem::new("fixedValue", "A fixed value is required"));
        }
        (MissingValuesHandling::InsertFixed, Some(value)) if value.trim().is_empty() => {
            problems.push(ValidationProblem::new("fixedValue", "A fixed value is required"));
        }
        _ => {}
    }

    check_histogram(candidate, &mut problems);
    problems
}

/// Same kind, variable and missing-value treatment.
fn is_duplicate(a: &Statistic, b: &Statistic) -> bool {
    a.kind == b.kind
        && a.variable.name == b.variable.name
        && a.missing_values == b.missing_values
        && fixed_value(a) == fixed_value(b)
}

fn fixed_value(s: &Statistic) -> Option<&str> {
    match s.missing_values {
        MissingValuesHandling::InsertFixed => s.fixed_value.as_deref().map(str::trim),
        _ => None,
    }
}

fn check_histogram(candidate: &Statistic, problems: &mut Vec<ValidationProblem>) {
    const FIELD: &str = "histogramBins";

    let edges = match (&candidate.kind, &candidate.histogram) {
        (StatisticKind::Histogram, Some(bins)) => &bins.edges,
        (StatisticKind::Histogram, None) => {
            problems.push(ValidationProblem::new(FIELD, "Histogram bin edges are required"));
            return;
        }
        (_, Some(_)) => {
            problems.push(ValidationProblem::new(
                FIELD,
                format!("A {} statistic does not take bin edges", candidate.kind),
            ));
            return;
        }
        (_, None) => return,
    };

    if edges.len() < 2 {
        problems.push(ValidationProblem::new(FIELD, "At least two bin edges are required"));
        return;
    }
    if edges.iter().any(|e| !e.is_finite()) {
        problems.push(ValidationProblem::new(FIELD, "Bin edges must be finite numbers"));
        return;
    }
    if edges.windows(2).any(|w| w[0] >= w[1]) {
        problems.push(ValidationProblem::new(FIELD, "Bin edges must be strictly increasing"));
        return;
    }
    if let Some(range) = candidate.variable.range {
        let (first, last) = (edges[0], edges[edges.len() - 1]);
        if first > range.min || last < range.max {
            problems.push(ValidationProblem::new(
                FIELD,
                format!(
                    "Bin edges must cover the range of {} ({} to {})",
                    candidate.variable.name, range.min, range.max
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistic::Variable;

    fn fields(problems: &[ValidationProblem]) -> Vec<&str> {
        problems.iter().map(|p| p.field.as_str()).collect()
    }

    #[test]
    fn test_valid_statistic() {
        let existing = vec![Statistic::new("a", StatisticKind::Mean, Variable::new("age"))];
        let candidate = Statistic::new("b", StatisticKind::Median, Variable::new("age"));
        assert!(validate_new_statistic(&candidate, &existing).is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let existing = vec![Statistic::new("a", StatisticKind::Mean, Variable::new("age"))];
        let candidate = Statistic::new("b", StatisticKind::Mean, Variable::new("age"));
        let problems = validate_new_statistic(&candidate, &existing);
        assert_eq!(fields(&problems), vec!["statistic"]);
    }

    #[test]
    fn test_fixed_value_distinguishes_duplicates() {
        let existing = vec![Statistic::new("a", StatisticKind::Mean, Variable::new("age")).with_fixed_value("30")];
        let same = Statistic::new("b", StatisticKind::Mean, Variable::new("age")).with_fixed_value(" 30 ");
        let other = Statistic::new("c", StatisticKind::Mean, Variable::new("age")).with_fixed_value("40");
        let dropped = Statistic::new("d", StatisticKind::Mean, Variable::new("age"));
        assert_eq!(fields(&validate_new_statistic(&same, &existing)), vec!["statistic"]);
        assert!(validate_new_statistic(&other, &existing).is_empty());
        assert!(validate_new_statistic(&dropped, &existing).is_empty());

        let existing = vec![Statistic::new("a", StatisticKind::Mean, Variable::new("age"))];
        let mut random = Statistic::new("b", StatisticKind::Mean, Variable::new("age"));
        random.missing_values = MissingValuesHandling::InsertRandom;
        assert!(validate_new_statistic(&random, &existing).is_empty());
    }

    #[test]
    fn test_revalidating_an_existing_entry_is_not_a_duplicate() {
        let s = Statistic::new("a", StatisticKind::Mean, Variable::new("age"));
        assert!(validate_new_statistic(&s, &[s.clone()]).is_empty());
    }

    #[test]
    fn test_fixed_value_required() {
        let mut candidate = Statistic::new("a", StatisticKind::Count, Variable::new("age"));
        candidate.missing_values = MissingValuesHandling::InsertFixed;
        assert_eq!(fields(&validate_new_statistic(&candidate, &[])), vec!["fixedValue"]);
        candidate.fixed_value = Some("  ".to_string());
        assert_eq!(fields(&validate_new_statistic(&candidate, &[])), vec!["fixedValue"]);
    }

    #[test]
    fn test_histogram_bins() {
        let var = Variable::with_range("age", 0.0, 100.0);
        let hist = |edges: Vec<f64>| Statistic::new("h", StatisticKind::Histogram, var.clone()).with_bins(edges);

        assert!(validate_new_statistic(&hist(vec![0.0, 50.0, 100.0]), &[]).is_empty());
        assert!(validate_new_statistic(&hist(vec![-10.0, 120.0]), &[]).is_empty());

        let messages = |s: Statistic| {
            validate_new_statistic(&s, &[]).into_iter().map(|p| p.message).collect::<Vec<_>>()
        };
        assert_eq!(messages(hist(vec![0.0])), vec!["At least two bin edges are required"]);
        assert_eq!(messages(hist(vec![0.0, 50.0, 50.0, 100.0])), vec!["Bin edges must be strictly increasing"]);
        assert_eq!(messages(hist(vec![0.0, f64::NAN])), vec!["Bin edges must be finite numbers"]);
        assert_eq!(
            messages(hist(vec![10.0, 100.0])),
            vec!["Bin edges must cover the range of age (0 to 100)"]
        );
        assert_eq!(
            messages(Statistic::new("h", StatisticKind::Histogram, var.clone())),
            vec!["Histogram bin edges are required"]
        );
    }

    #[test]
    fn test_bins_on_non_histogram() {
        let candidate = Statistic::new("m", StatisticKind::Mean, Variable::new("age")).with_bins(vec![0.0, 1.0]);
        assert_eq!(fields(&validate_new_statistic(&candidate, &[])), vec!["histogramBins"]);
    }
}
