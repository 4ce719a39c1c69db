use crate::schema::FieldType;
use snafu::Snafu;

/// Errors raised while reading, validating or converting resource configuration. Every variant is
/// a configuration problem; none of them involve running the external tool.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Error deserializing configuration: {}", source))]
    ConfigDeserialization { source: serde_json::Error },

    #[snafu(display("Field '{}' has an invalid value: {}", field, message))]
    InvalidValue { field: String, message: String },

    #[snafu(display("Required field '{}' is missing", field))]
    MissingField { field: String },

    #[snafu(display("Parse error: {}", source))]
    SerdePlain { source: serde_plain::Error },

    #[snafu(display("Field '{}' must be a {}", field, expected))]
    WrongType { field: String, expected: FieldType },
}

pub type Result<T> = std::result::Result<T, Error>;
