use crate::error::{self, Result};
use crate::schema::FieldType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `AttributeStore` is the host engine's per-instance view of a resource: the configured
/// attributes, the identity of the live resource (empty when none is believed to exist), and the
/// computed attributes written back by the provider.
///
/// It is a trait so that a host can hand over its own state representation. [`ResourceData`] is
/// the in-memory implementation used by the command-line host and by tests.
pub trait AttributeStore: Send + Sync {
    /// The raw value of an attribute, `None` if it is not set.
    fn get(&self, key: &str) -> Option<&Value>;

    /// The identity of the live resource, or an empty string if there is none.
    fn id(&self) -> &str;

    /// Set the identity. An empty string marks the resource as absent.
    fn set_id(&mut self, id: String);

    /// Record a value for a computed attribute.
    fn set_computed(&mut self, key: &str, value: String);

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => wrong_type(key, FieldType::String),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(_) => wrong_type(key, FieldType::Bool),
        }
    }

    fn get_string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| match value {
                    Value::String(s) => Ok(s.clone()),
                    _ => wrong_type(key, FieldType::StringList),
                })
                .collect::<Result<Vec<String>>>()
                .map(Some),
            Some(_) => wrong_type(key, FieldType::StringList),
        }
    }

    /// Whether a live resource is believed to exist.
    fn is_present(&self) -> bool {
        !self.id().is_empty()
    }
}

fn wrong_type<T>(key: &str, expected: FieldType) -> Result<T> {
    error::WrongTypeSnafu {
        field: key,
        expected,
    }
    .fail()
}

/// The recorded state of one resource instance. This is also the on-disk state format used by the
/// command-line host:
///
/// ```json
/// { "id": "kube-system-my-sa", "attributes": { "name": "my-sa", "output": "..." } }
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Create the state of a resource that does not exist yet.
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn set<S, V>(&mut self, key: S, value: V)
    where
        S: Into<String>,
        V: Into<Value>,
    {
        self.attributes.insert(key.into(), value.into());
    }
}

impl AttributeStore for ResourceData {
    fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn set_computed(&mut self, key: &str, value: String) {
        self.attributes.insert(key.to_string(), Value::String(value));
    }
}
