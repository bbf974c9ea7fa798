//! Best-match search over a part catalog
//!
//! Scores every candidate of the query's type and keeps the ones whose
//! similarity strictly exceeds the threshold.

use crate::config::{ConfigError, MatcherConfig, DEFAULT_THRESHOLD};
use crate::distance::calculate_dimension_similarity;
use crate::explain::{explain_similarity, SimilarityBreakdown};
use ordered_float::OrderedFloat;
use partmatch_core::{DimensionSet, PartDescriptor};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::{debug, trace};

/// A candidate part together with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarPart<'a> {
    pub part: &'a PartDescriptor,
    pub similarity: f64,
}

/// Find the single most similar part of the same type.
///
/// # Arguments
/// * `part_type` - Type tag of the part being created
/// * `dimensions` - Its dimensions
/// * `candidates` - Existing parts, any types
/// * `threshold` - Exclusive lower bound on similarity, `90` when `None`
///
/// # Returns
/// The first candidate reaching the highest score above the threshold, or
/// `None` when the query is empty or nothing qualifies.
pub fn find_similar_part<'a>(
    part_type: &str,
    dimensions: &DimensionSet,
    candidates: &'a [PartDescriptor],
    threshold: Option<f64>,
) -> Option<SimilarPart<'a>> {
    let threshold = threshold.unwrap_or(DEFAULT_THRESHOLD);
    if part_type.is_empty() || dimensions.is_empty() {
        debug!(part_type, "empty query, skipping similarity search");
        return None;
    }

    debug!(
        part_type,
        candidates = candidates.len(),
        threshold,
        "searching for similar part"
    );

    let mut best: Option<SimilarPart<'a>> = None;
    let mut best_score = 0.0;

    for scored in score_candidates(part_type, dimensions, candidates) {
        // Strict comparisons: equal scores keep the earlier candidate
        if scored.similarity > threshold && scored.similarity > best_score {
            best_score = scored.similarity;
            best = Some(scored);
        }
    }

    match &best {
        Some(found) => debug!(
            id = found.part.id.as_deref().unwrap_or("-"),
            similarity = found.similarity,
            "similar part found"
        ),
        None => debug!(part_type, "no similar part above threshold"),
    }

    best
}

/// Score every candidate sharing `part_type`, in input order
fn score_candidates<'a, 'q>(
    part_type: &'q str,
    dimensions: &'q DimensionSet,
    candidates: &'a [PartDescriptor],
) -> impl Iterator<Item = SimilarPart<'a>> + 'q
where
    'a: 'q,
{
    candidates
        .iter()
        .filter(move |part| part.type_tag == part_type)
        .map(move |part| {
            let similarity = calculate_dimension_similarity(dimensions, &part.dimensions);
            trace!(
                id = part.id.as_deref().unwrap_or("-"),
                similarity,
                "scored candidate"
            );
            SimilarPart { part, similarity }
        })
}

/// Duplicate-part detector with a validated configuration
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatcher {
    config: MatcherConfig,
}

impl SimilarityMatcher {
    /// Create a matcher, rejecting invalid configurations
    pub fn new(config: MatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create a matcher with the default limit and the given threshold
    pub fn with_threshold(threshold: f64) -> Result<Self, ConfigError> {
        Self::new(MatcherConfig::new(threshold))
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Similarity of two dimension sets, see [`calculate_dimension_similarity`]
    pub fn score(&self, query: &DimensionSet, candidate: &DimensionSet) -> f64 {
        calculate_dimension_similarity(query, candidate)
    }

    /// Best match above the configured threshold
    pub fn find<'a>(
        &self,
        part_type: &str,
        dimensions: &DimensionSet,
        candidates: &'a [PartDescriptor],
    ) -> Option<SimilarPart<'a>> {
        find_similar_part(part_type, dimensions, candidates, Some(self.config.threshold))
    }

    /// Best match for a whole query part
    pub fn find_for<'a>(
        &self,
        query: &PartDescriptor,
        candidates: &'a [PartDescriptor],
    ) -> Option<SimilarPart<'a>> {
        self.find(&query.type_tag, &query.dimensions, candidates)
    }

    /// All matches above the threshold, most similar first.
    ///
    /// Equal scores keep their input order, so the first entry is always the
    /// one [`SimilarityMatcher::find`] returns. Truncated to the configured
    /// limit, if any.
    pub fn rank<'a>(
        &self,
        part_type: &str,
        dimensions: &DimensionSet,
        candidates: &'a [PartDescriptor],
    ) -> Vec<SimilarPart<'a>> {
        if part_type.is_empty() || dimensions.is_empty() {
            return Vec::new();
        }

        let threshold = self.config.threshold;
        let mut results: Vec<SimilarPart<'a>> = score_candidates(part_type, dimensions, candidates)
            .filter(|scored| scored.similarity > threshold)
            .collect();

        // sort_by_key is stable
        results.sort_by_key(|scored| Reverse(OrderedFloat(scored.similarity)));

        if let Some(limit) = self.config.limit {
            results.truncate(limit);
        }

        debug!(
            part_type,
            candidates = candidates.len(),
            matches = results.len(),
            "ranked similar parts"
        );

        results
    }

    /// Per-field breakdown of how `candidate` scores against `query`
    pub fn explain(&self, query: &DimensionSet, candidate: &DimensionSet) -> SimilarityBreakdown {
        explain_similarity(query, candidate)
    }
}
