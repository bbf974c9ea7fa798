//! # partmatch
//!
//! Near-duplicate detection for manufactured parts, based on their dimensions.
//!
//! Before a new part is added to a catalog, partmatch compares its dimensions
//! with every existing part of the same type and reports the closest one if
//! it is similar enough to be a likely duplicate.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! partmatch find --catalog parts.json --type Knob --dim frontRadius=5 --dim depth=20
//! partmatch rank --catalog parts.json --type Knob --dim depth=20 --threshold 80
//! partmatch compare --dim-a length=100 --dim-b length=110
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use partmatch::prelude::*;
//!
//! let catalog = vec![
//!     PartKind::Knob(KnobDimensions {
//!         front_radius: Some(5.0),
//!         depth: Some(20.5),
//!         ..Default::default()
//!     })
//!     .into_descriptor()
//!     .with_id("knob-1"),
//! ];
//!
//! let query = DimensionSet::new().with("frontRadius", 5.0).with("depth", 20.0);
//! let matcher = SimilarityMatcher::default();
//!
//! let found = matcher.find("Knob", &query, &catalog).unwrap();
//! assert_eq!(found.part.id.as_deref(), Some("knob-1"));
//! ```
//!
//! ## Crate Structure
//!
//! partmatch is composed of several crates:
//!
//! - [`partmatch-core`](https://docs.rs/partmatch-core) - Data model (DimensionSet, PartDescriptor, PartKind)
//! - [`partmatch-similarity`](https://docs.rs/partmatch-similarity) - Scoring, matching, explanations

pub mod cli;

// Re-export core types
pub use partmatch_core::{
    ButtonDimensions, DimensionSet, DimensionValue, Dimensions, Error, KnobDimensions,
    PartDescriptor, PartKind, Result, UShapeDimensions,
};

// Re-export similarity
pub use partmatch_similarity::{
    calculate_dimension_similarity, explain_similarity, find_similar_part, ConfigError,
    FieldComparison, FieldOutcome, MatchStats, MatcherConfig, RankResponse, SimilarPart,
    SimilarityBreakdown, SimilarityMatcher, DEFAULT_THRESHOLD,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        calculate_dimension_similarity, find_similar_part, ButtonDimensions, DimensionSet,
        DimensionValue, KnobDimensions, MatcherConfig, PartDescriptor, PartKind, SimilarPart,
        SimilarityMatcher, UShapeDimensions,
    };
}
