//! Explainability for similarity results
//!
//! Provides output structures that show how a similarity score was reached,
//! field by field, plus summary statistics for a ranked search.

use crate::distance::{compare_dimensions, score_from_diffs, FieldOutcome};
use crate::matcher::SimilarPart;
use partmatch_core::DimensionSet;
use serde::Serialize;

/// How one field of the query fared against the candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    pub field: String,
    /// Query value, when present
    pub query: Option<f64>,
    /// Candidate value, when present
    pub candidate: Option<f64>,
    #[serde(flatten)]
    pub outcome: FieldOutcome,
}

/// A similarity score with its per-field breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityBreakdown {
    /// Same value as `calculate_dimension_similarity` for the same inputs
    pub score: f64,
    /// Number of fields that contributed to the score
    pub compared_fields: usize,
    /// One entry per query field, in key order
    pub fields: Vec<FieldComparison>,
}

impl SimilarityBreakdown {
    /// The compared field with the largest difference, if any
    pub fn worst_field(&self) -> Option<&FieldComparison> {
        self.fields
            .iter()
            .filter(|f| f.outcome.percent_diff().is_some())
            .max_by(|a, b| {
                let da = a.outcome.percent_diff().unwrap_or(0.0);
                let db = b.outcome.percent_diff().unwrap_or(0.0);
                da.total_cmp(&db)
            })
    }
}

/// Compute the score of `candidate` against `query` with a full breakdown
pub fn explain_similarity(query: &DimensionSet, candidate: &DimensionSet) -> SimilarityBreakdown {
    let mut fields = Vec::with_capacity(query.len());
    let mut sum = 0.0;
    let mut compared_fields = 0;

    for (name, outcome) in compare_dimensions(query, candidate) {
        if let Some(diff) = outcome.percent_diff() {
            sum += diff;
            compared_fields += 1;
        }
        fields.push(FieldComparison {
            field: name.to_string(),
            query: query.get(name).and_then(|v| v.present_f64()),
            candidate: candidate.get(name).and_then(|v| v.present_f64()),
            outcome,
        });
    }

    SimilarityBreakdown {
        score: score_from_diffs(sum, compared_fields),
        compared_fields,
        fields,
    }
}

/// Summary statistics for a ranked search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of candidates sharing the query's type
    pub same_type_count: usize,
    /// Number of matches returned
    pub matches_count: usize,
    /// Average similarity of the matches
    pub avg_similarity: f64,
    /// Similarity of the best match
    pub best_similarity: f64,
}

impl MatchStats {
    /// Compute stats from ranked matches (most similar first)
    pub fn compute(
        matches: &[SimilarPart<'_>],
        candidates_count: usize,
        same_type_count: usize,
    ) -> Self {
        let (avg_similarity, best_similarity) = match matches.first() {
            None => (0.0, 0.0),
            Some(best) => {
                let total: f64 = matches.iter().map(|m| m.similarity).sum();
                (total / matches.len() as f64, best.similarity)
            }
        };

        Self {
            candidates_count,
            same_type_count,
            matches_count: matches.len(),
            avg_similarity,
            best_similarity,
        }
    }
}

/// Response structure for a ranked search
#[derive(Debug, Clone, Serialize)]
pub struct RankResponse<'a> {
    pub result: Vec<SimilarPart<'a>>,
    pub stats: MatchStats,
}

impl<'a> RankResponse<'a> {
    pub fn new(
        result: Vec<SimilarPart<'a>>,
        candidates_count: usize,
        same_type_count: usize,
    ) -> Self {
        let stats = MatchStats::compute(&result, candidates_count, same_type_count);
        Self { result, stats }
    }
}
