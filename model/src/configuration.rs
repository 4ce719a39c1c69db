use crate::error::{self, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use snafu::ResultExt;
use std::fmt::Debug;

/// The `Configuration` trait is for "plain old data" structs that carry a strongly typed view of a
/// resource's attributes. A lifecycle call decodes the untyped attribute map held by an
/// [`AttributeStore`](crate::AttributeStore) into one of these records once, up front, instead of
/// pulling loosely typed values out of the store field by field.
///
/// Records are expected to use the attribute keys as their serde field names so that the mapping
/// between the schema and the struct stays explicit.
pub trait Configuration:
    Serialize + DeserializeOwned + Clone + Debug + Default + Send + Sync + Sized + 'static
{
    /// Build the record from an attribute map.
    fn from_map(map: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map)).context(error::ConfigDeserializationSnafu)
    }
}
