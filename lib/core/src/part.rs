use crate::dimension::DimensionSet;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const U_SHAPE: &str = "U shape";
pub const KNOB: &str = "Knob";
pub const BUTTON: &str = "Button";

/// A part as seen by the matcher: a type tag plus loosely typed dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDescriptor {
    /// Caller-side identifier, e.g. the backend row id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Discriminator, e.g. "U shape", "Knob", "Button"
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub dimensions: DimensionSet,
}

impl PartDescriptor {
    pub fn new(type_tag: impl Into<String>, dimensions: DimensionSet) -> Self {
        Self {
            id: None,
            name: None,
            type_tag: type_tag.into(),
            dimensions,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Parse a JSON array of parts
    pub fn catalog_from_json(json: &str) -> Result<Vec<PartDescriptor>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A strongly typed dimension record that can be lowered into a [`DimensionSet`]
pub trait Dimensions {
    /// Wire names of the fields this record knows about
    const FIELDS: &'static [&'static str];

    fn to_dimension_set(&self) -> DimensionSet;

    fn from_dimension_set(type_tag: &str, set: &DimensionSet) -> Result<Self>
    where
        Self: Sized;
}

/// Look up `field` in `set` and convert strictly
fn strict_field(set: &DimensionSet, field: &str) -> Result<Option<f64>> {
    match set.get(field) {
        Some(value) => value.to_f64_strict(field),
        None => Ok(None),
    }
}

fn check_known_fields(type_tag: &str, set: &DimensionSet, known: &[&str]) -> Result<()> {
    match set.keys().find(|k| !known.contains(&k.as_str())) {
        Some(field) => Err(Error::UnknownDimension {
            type_tag: type_tag.to_string(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

// Generates a typed record whose serde field names match the dimension names
// used in `DimensionSet`.
macro_rules! dimension_record {
    (
        $(#[$meta:meta])*
        $name:ident { $($field:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(deny_unknown_fields)]
        pub struct $name {
            $(
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<f64>,
            )+
        }

        impl Dimensions for $name {
            const FIELDS: &'static [&'static str] = &[$($wire),+];

            fn to_dimension_set(&self) -> DimensionSet {
                let mut set = DimensionSet::new();
                $(
                    if let Some(value) = self.$field {
                        set.insert($wire, value);
                    }
                )+
                set
            }

            fn from_dimension_set(type_tag: &str, set: &DimensionSet) -> Result<Self> {
                check_known_fields(type_tag, set, Self::FIELDS)?;
                Ok(Self {
                    $($field: strict_field(set, $wire)?,)+
                })
            }
        }
    };
}

dimension_record! {
    /// Dimensions of a "U shape" profile
    UShapeDimensions {
        length => "length",
        width => "width",
        height => "height",
        thickness => "thickness",
        inner_radius => "innerRadius",
    }
}

dimension_record! {
    /// Dimensions of a rotary knob
    KnobDimensions {
        front_radius => "frontRadius",
        back_radius => "backRadius",
        depth => "depth",
        shaft_diameter => "shaftDiameter",
    }
}

dimension_record! {
    /// Dimensions of a push button
    ButtonDimensions {
        diameter => "diameter",
        height => "height",
        travel => "travel",
    }
}

/// Typed view of a part, keyed by its type discriminator.
///
/// Serialized in the same shape as [`PartDescriptor`] and deserialized through
/// [`PartKind::from_descriptor`], so a known type tag with dimensions that do
/// not fit its record is rejected rather than kept as [`PartKind::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PartDescriptor", into = "PartDescriptor")]
pub enum PartKind {
    UShape(UShapeDimensions),
    Knob(KnobDimensions),
    Button(ButtonDimensions),
    /// Any type the catalog does not model explicitly
    Other {
        type_tag: String,
        dimensions: DimensionSet,
    },
}

impl PartKind {
    pub fn type_tag(&self) -> &str {
        match self {
            PartKind::UShape(_) => U_SHAPE,
            PartKind::Knob(_) => KNOB,
            PartKind::Button(_) => BUTTON,
            PartKind::Other { type_tag, .. } => type_tag,
        }
    }

    /// Lower into the generic form the similarity scorer works on
    pub fn dimension_set(&self) -> DimensionSet {
        match self {
            PartKind::UShape(d) => d.to_dimension_set(),
            PartKind::Knob(d) => d.to_dimension_set(),
            PartKind::Button(d) => d.to_dimension_set(),
            PartKind::Other { dimensions, .. } => dimensions.clone(),
        }
    }

    pub fn into_descriptor(self) -> PartDescriptor {
        match self {
            PartKind::Other { type_tag, dimensions } => PartDescriptor::new(type_tag, dimensions),
            kind => {
                let dimensions = kind.dimension_set();
                PartDescriptor::new(kind.type_tag(), dimensions)
            }
        }
    }

    /// Build the typed variant for a generic descriptor.
    ///
    /// Known type tags must carry only known, numeric dimensions. Unknown tags
    /// are kept verbatim as [`PartKind::Other`].
    pub fn from_descriptor(part: &PartDescriptor) -> Result<Self> {
        let tag = part.type_tag.as_str();
        let dims = &part.dimensions;
        Ok(match tag {
            U_SHAPE => PartKind::UShape(UShapeDimensions::from_dimension_set(tag, dims)?),
            KNOB => PartKind::Knob(KnobDimensions::from_dimension_set(tag, dims)?),
            BUTTON => PartKind::Button(ButtonDimensions::from_dimension_set(tag, dims)?),
            _ => PartKind::Other {
                type_tag: part.type_tag.clone(),
                dimensions: dims.clone(),
            },
        })
    }
}

impl From<PartKind> for PartDescriptor {
    fn from(kind: PartKind) -> Self {
        kind.into_descriptor()
    }
}

impl TryFrom<PartDescriptor> for PartKind {
    type Error = Error;

    fn try_from(part: PartDescriptor) -> Result<Self> {
        PartKind::from_descriptor(&part)
    }
}

impl TryFrom<&PartDescriptor> for PartKind {
    type Error = Error;

    fn try_from(part: &PartDescriptor) -> Result<Self> {
        PartKind::from_descriptor(part)
    }
}
