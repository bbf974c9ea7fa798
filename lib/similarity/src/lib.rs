//! # partmatch Similarity
//!
//! Dimension-based duplicate detection for manufactured parts.
//!
//! Given a part about to be created and the catalog of existing parts, this
//! crate scores every same-type part by how close its dimensions are and
//! reports the best match above a threshold, so the caller can warn before a
//! near-duplicate is added.
//!
//! ## Features
//!
//! - **Dimension Scorer**: Average relative difference over comparable fields, as a 0-100 score
//! - **Best-Match Finder**: First highest-scoring candidate strictly above the threshold
//! - **Ranking**: Every match above the threshold, most similar first
//! - **Explainability**: Per-field breakdown of how a score was reached
//!
//! ## Example
//!
//! ```rust
//! use partmatch_core::{DimensionSet, PartDescriptor};
//! use partmatch_similarity::{calculate_dimension_similarity, find_similar_part};
//!
//! let catalog = vec![
//!     PartDescriptor::new("Knob", DimensionSet::new().with("frontRadius", 5.0).with("depth", 20.5)),
//!     PartDescriptor::new("Button", DimensionSet::new().with("diameter", 12.0)),
//! ];
//!
//! let query = DimensionSet::new().with("frontRadius", "5").with("depth", "20");
//!
//! let found = find_similar_part("Knob", &query, &catalog, None).unwrap();
//! assert!(found.similarity > 98.0);
//!
//! let score = calculate_dimension_similarity(&query, &catalog[0].dimensions);
//! assert_eq!(score, found.similarity);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│  Matcher    │<────│   Catalog   │
//! │ (type+dims) │     │ (same type) │     │   (parts)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │  Distance   │
//!                     │ (per field) │
//!                     └─────────────┘
//!                            │
//!                     ┌─────────────┐
//!                     │  Explain    │
//!                     │ (breakdown) │
//!                     └─────────────┘
//! ```

pub mod config;
pub mod distance;
pub mod explain;
pub mod matcher;

// Re-export main types for convenience
pub use config::{ConfigError, MatcherConfig, DEFAULT_THRESHOLD};
pub use distance::{
    calculate_dimension_similarity, compare_values, relative_difference, FieldOutcome,
};
pub use explain::{
    explain_similarity, FieldComparison, MatchStats, RankResponse, SimilarityBreakdown,
};
pub use matcher::{find_similar_part, SimilarPart, SimilarityMatcher};
