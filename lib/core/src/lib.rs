//! # partmatch Core
//!
//! Core data model for the partmatch part-similarity detector.
//!
//! This crate provides the types the matcher consumes:
//!
//! - [`DimensionValue`] - A raw dimension value (number, string, or unset)
//! - [`DimensionSet`] - Sparse mapping from dimension name to value
//! - [`PartDescriptor`] - A part's type tag plus its dimensions
//! - [`PartKind`] - Typed view of a part, one variant per known part type
//!
//! ## Example
//!
//! ```rust
//! use partmatch_core::{DimensionSet, KnobDimensions, PartDescriptor, PartKind};
//!
//! // Loosely typed, as it arrives from a form
//! let query = PartDescriptor::new(
//!     "Knob",
//!     DimensionSet::new().with("frontRadius", "5").with("depth", "20"),
//! );
//!
//! // Strongly typed, then lowered into the generic form
//! let kind = PartKind::from_descriptor(&query).unwrap();
//! assert_eq!(
//!     kind,
//!     PartKind::Knob(KnobDimensions {
//!         front_radius: Some(5.0),
//!         depth: Some(20.0),
//!         ..Default::default()
//!     })
//! );
//! assert_eq!(kind.dimension_set().len(), 2);
//! ```

pub mod dimension;
pub mod error;
pub mod part;

pub use dimension::{parse_lenient, DimensionSet, DimensionValue};
pub use error::{Error, Result};
pub use part::{
    ButtonDimensions, Dimensions, KnobDimensions, PartDescriptor, PartKind, UShapeDimensions,
    BUTTON, KNOB, U_SHAPE,
};
