use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid value for dimension '{field}': {value}")]
    InvalidDimension { field: String, value: String },

    #[error("Unknown dimension '{field}' for part type '{type_tag}'")]
    UnknownDimension { type_tag: String, field: String },

    #[error("Invalid dimension argument: {0} (expected name=value)")]
    InvalidDimensionArg(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
