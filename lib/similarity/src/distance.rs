//! Per-field distance and the dimension similarity score
//!
//! Every comparable field contributes its relative difference
//! `|a - b| / max(|a|, |b|)` as a percentage; the score is `100` minus the
//! average of those percentages, floored at `0`.

use partmatch_core::{DimensionSet, DimensionValue};
use serde::Serialize;

/// What happened to a single field when two dimension sets were compared
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldOutcome {
    /// Both sides present and comparable
    Compared { percent_diff: f64 },
    /// Absent (unset or empty) on at least one side
    Missing,
    /// Both sides parse to zero
    BothZero,
    /// Largest magnitude is zero
    ZeroMagnitude,
}

impl FieldOutcome {
    pub fn percent_diff(&self) -> Option<f64> {
        match self {
            FieldOutcome::Compared { percent_diff } => Some(*percent_diff),
            _ => None,
        }
    }
}

/// Relative difference of two numbers in percent, `None` when both are zero
///
/// # Returns
/// `|a - b| / max(|a|, |b|) * 100`, in `[0, 200]`
pub fn relative_difference(a: f64, b: f64) -> Option<f64> {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        None
    } else {
        Some((a - b).abs() / max * 100.0)
    }
}

/// Compare one field given the raw values from both sides
pub fn compare_values(
    query: Option<&DimensionValue>,
    candidate: Option<&DimensionValue>,
) -> FieldOutcome {
    let (a, b) = match (
        query.and_then(DimensionValue::present_f64),
        candidate.and_then(DimensionValue::present_f64),
    ) {
        (Some(a), Some(b)) => (a, b),
        _ => return FieldOutcome::Missing,
    };

    if a == 0.0 && b == 0.0 {
        return FieldOutcome::BothZero;
    }

    match relative_difference(a, b) {
        Some(percent_diff) => FieldOutcome::Compared { percent_diff },
        None => FieldOutcome::ZeroMagnitude,
    }
}

/// Outcome for every key of `query`, in key order
pub fn compare_dimensions<'a>(
    query: &'a DimensionSet,
    candidate: &'a DimensionSet,
) -> impl Iterator<Item = (&'a str, FieldOutcome)> + 'a {
    query
        .iter()
        .map(move |(name, value)| (name.as_str(), compare_values(Some(value), candidate.get(name))))
}

/// Turn a sum of percentage differences over `count` fields into a score
pub(crate) fn score_from_diffs(sum: f64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (100.0 - sum / count as f64).max(0.0)
}

/// Similarity of two dimension sets in `[0, 100]`
///
/// Only fields present on both sides are compared; fields that are zero on
/// both sides are skipped. With nothing left to compare the score is `0`,
/// never `100`.
pub fn calculate_dimension_similarity(query: &DimensionSet, candidate: &DimensionSet) -> f64 {
    let (sum, count) = compare_dimensions(query, candidate)
        .filter_map(|(_, outcome)| outcome.percent_diff())
        .fold((0.0, 0usize), |(sum, count), diff| (sum + diff, count + 1));

    score_from_diffs(sum, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(pairs: &[(&str, f64)]) -> DimensionSet {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn test_identical_dimensions() {
        let a = dims(&[("length", 100.0), ("radius", 10.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &a.clone()), 100.0);
    }

    #[test]
    fn test_single_field_difference() {
        let a = dims(&[("length", 100.0)]);
        let b = dims(&[("length", 110.0)]);
        let score = calculate_dimension_similarity(&a, &b);
        assert!((score - (100.0 - 10.0 / 110.0 * 100.0)).abs() < 1e-9);
        assert!((score - 90.909).abs() < 0.001);
    }

    #[test]
    fn test_both_zero_field_scores_zero() {
        let a = dims(&[("length", 0.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &a.clone()), 0.0);
    }

    #[test]
    fn test_zero_field_skipped_alongside_real_field() {
        let a = dims(&[("length", 0.0), ("radius", 10.0)]);
        let b = dims(&[("length", 0.0), ("radius", 10.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &b), 100.0);
    }

    #[test]
    fn test_one_side_zero_is_full_difference() {
        let a = dims(&[("length", 0.0)]);
        let b = dims(&[("length", 50.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_opposite_signs_floor_at_zero() {
        let a = dims(&[("offset", -10.0)]);
        let b = dims(&[("offset", 10.0)]);
        assert_eq!(compare_values(a.get("offset"), b.get("offset")).percent_diff(), Some(200.0));
        assert_eq!(calculate_dimension_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let a = dims(&[("length", 100.0)]);
        let b = dims(&[("radius", 100.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &b), 0.0);
        assert_eq!(calculate_dimension_similarity(&DimensionSet::new(), &b), 0.0);
    }

    #[test]
    fn test_empty_and_unset_values_are_missing() {
        let a = DimensionSet::new().with("length", "").with("width", 20.0);
        let b = DimensionSet::new()
            .with("length", 100.0)
            .with("width", DimensionValue::Unset);

        assert_eq!(compare_values(a.get("length"), b.get("length")), FieldOutcome::Missing);
        assert_eq!(compare_values(a.get("width"), b.get("width")), FieldOutcome::Missing);
        assert_eq!(calculate_dimension_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_text_values_parse_leniently() {
        let a = DimensionSet::new().with("length", "100").with("radius", "10mm");
        let b = dims(&[("length", 100.0), ("radius", 10.0)]);
        assert_eq!(calculate_dimension_similarity(&a, &b), 100.0);
    }

    #[test]
    fn test_unparseable_text_counts_as_zero() {
        let a = DimensionSet::new().with("length", "n/a");
        let b = dims(&[("length", 100.0)]);
        assert_eq!(compare_values(a.get("length"), b.get("length")).percent_diff(), Some(100.0));

        // Unparseable on both sides is the zero/zero case
        let c = DimensionSet::new().with("length", "abc");
        assert_eq!(compare_values(a.get("length"), c.get("length")), FieldOutcome::BothZero);
    }

    #[test]
    fn test_average_over_compared_fields() {
        let a = dims(&[("frontRadius", 5.0), ("depth", 20.0)]);
        let b = dims(&[("frontRadius", 5.0), ("depth", 20.5)]);
        let expected = 100.0 - (0.5 / 20.5 * 100.0) / 2.0;
        assert!((calculate_dimension_similarity(&a, &b) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_relative_difference() {
        assert_eq!(relative_difference(0.0, 0.0), None);
        assert_eq!(relative_difference(10.0, 5.0), Some(50.0));
        assert_eq!(relative_difference(5.0, 10.0), Some(50.0));
    }

    #[test]
    fn test_outcomes_follow_query_keys() {
        let a = DimensionSet::new().with("a", 1.0).with("b", 0.0).with("c", "");
        let b = dims(&[("a", 2.0), ("b", 0.0), ("c", 3.0), ("d", 4.0)]);

        let outcomes: Vec<_> = compare_dimensions(&a, &b).collect();
        assert_eq!(
            outcomes,
            vec![
                ("a", FieldOutcome::Compared { percent_diff: 50.0 }),
                ("b", FieldOutcome::BothZero),
                ("c", FieldOutcome::Missing),
            ]
        );
    }
}
