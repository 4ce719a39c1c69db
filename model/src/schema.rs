/*!

Field declarations for a resource type. A [`Schema`] is what turns the loosely typed attribute map
of an [`AttributeStore`] into something a typed record can be deserialized from, and it is what a
host uses to decide whether a configuration change needs the resource to be replaced.

!*/

use crate::error::{self, Result};
use crate::{AttributeStore, ResourceData};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tabled::{Style, Table, Tabled};

/// The value type of a declared field.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    String,
    Bool,
    /// An ordered list of strings. Order and duplicates are preserved.
    StringList,
}

serde_plain::derive_display_from_serialize!(FieldType);

/// A single declared attribute of a resource type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    pub field_type: FieldType,
    /// The field must be present (and non-empty) in the configuration.
    pub required: bool,
    /// The field is written by the provider and never read from configuration.
    pub computed: bool,
    /// Changing the field requires the resource to be destroyed and created again.
    pub force_new: bool,
    /// The value used when an optional field is absent.
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl Field {
    pub fn required<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        Self::new(name.into(), field_type, true, false)
    }

    pub fn optional<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        Self::new(name.into(), field_type, false, false)
    }

    pub fn computed<S: Into<String>>(name: S, field_type: FieldType) -> Self {
        Self::new(name.into(), field_type, false, true)
    }

    fn new(name: String, field_type: FieldType, required: bool, computed: bool) -> Self {
        Self {
            name,
            field_type,
            required,
            computed,
            force_new: false,
            default: None,
            description: None,
        }
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default<V: Into<Value>>(mut self, default: V) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Read this field from `store` with its declared type. Empty strings and empty lists are
    /// treated the same as an absent value.
    fn read(&self, store: &dyn AttributeStore) -> Result<Option<Value>> {
        Ok(match self.field_type {
            FieldType::String => store
                .get_string(&self.name)?
                .filter(|value| !value.is_empty())
                .map(Value::from),
            FieldType::Bool => store.get_bool(&self.name)?.map(Value::from),
            FieldType::StringList => store
                .get_string_list(&self.name)?
                .filter(|values| !values.is_empty())
                .map(Value::from),
        })
    }

    /// The value this field effectively has, given the raw attribute value, after applying the
    /// default. An absent bool without a default is `false`, as it decodes. Used for comparisons,
    /// so it does not validate types.
    fn effective(&self, value: Option<&Value>) -> Value {
        let is_absent = match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(a)) => a.is_empty(),
            Some(_) => false,
        };
        match value {
            Some(value) if !is_absent => value.clone(),
            _ => self.default.clone().unwrap_or_else(|| match self.field_type {
                FieldType::Bool => Value::Bool(false),
                FieldType::String | FieldType::StringList => Value::Null,
            }),
        }
    }
}

/// The ordered set of fields declared by a resource type.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<Field>,
}

/// The outcome of comparing a resource's recorded state with a proposed configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Change {
    /// Nothing exists yet.
    Create,
    /// The configuration matches the recorded state.
    NoChange,
    /// Fields that do not force replacement have changed.
    Update { fields: Vec<String> },
    /// At least one force-new field has changed; `fields` lists all of them.
    Replace { fields: Vec<String> },
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Read every declared, non-computed field out of `store` using its declared type. Absent
    /// optional fields take their default (or are left out if they have none) and absent required
    /// fields are an error. The resulting map is suitable for
    /// [`Configuration::from_map`](crate::Configuration::from_map).
    pub fn decode(&self, store: &dyn AttributeStore) -> Result<Map<String, Value>> {
        let mut attributes = Map::new();
        for field in self.fields.iter().filter(|field| !field.computed) {
            let value = match field.read(store)?.or_else(|| field.default.clone()) {
                Some(value) => value,
                None if field.required => {
                    return error::MissingFieldSnafu {
                        field: field.name.as_str(),
                    }
                    .fail()
                }
                None => continue,
            };
            attributes.insert(field.name.clone(), value);
        }
        Ok(attributes)
    }

    /// Compare the recorded state `prior` with the `proposed` attributes and decide what the host
    /// needs to do to converge.
    pub fn plan(&self, prior: &ResourceData, proposed: &Map<String, Value>) -> Change {
        if prior.id().is_empty() {
            return Change::Create;
        }
        let mut replace = Vec::new();
        let mut update = Vec::new();
        for field in self.fields.iter().filter(|field| !field.computed) {
            let before = field.effective(prior.attributes().get(&field.name));
            let after = field.effective(proposed.get(&field.name));
            if before == after {
                continue;
            }
            debug!("Field '{}' changed from {} to {}", field.name, before, after);
            if field.force_new {
                replace.push(field.name.clone());
            } else {
                update.push(field.name.clone());
            }
        }
        if !replace.is_empty() {
            Change::Replace { fields: replace }
        } else if !update.is_empty() {
            Change::Update { fields: update }
        } else {
            Change::NoChange
        }
    }
}

impl From<&Schema> for Table {
    fn from(schema: &Schema) -> Self {
        let rows: Vec<FieldRow> = schema.fields.iter().map(FieldRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::blank());
        table
    }
}

#[derive(Tabled, Clone)]
struct FieldRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "TYPE")]
    field_type: FieldType,
    #[tabled(rename = "MODE")]
    mode: &'static str,
    #[tabled(rename = "FORCE NEW")]
    force_new: bool,
    #[tabled(rename = "DEFAULT")]
    #[tabled(display_with = "display_option")]
    default: Option<String>,
    #[tabled(rename = "DESCRIPTION")]
    #[tabled(display_with = "display_option")]
    description: Option<String>,
}

fn display_option(o: &Option<String>) -> String {
    o.clone().unwrap_or_default()
}

impl From<&Field> for FieldRow {
    fn from(field: &Field) -> Self {
        let mode = if field.computed {
            "computed"
        } else if field.required {
            "required"
        } else {
            "optional"
        };
        Self {
            name: field.name.clone(),
            field_type: field.field_type,
            mode,
            force_new: field.force_new,
            default: field.default.as_ref().map(|value| value.to_string()),
            description: field.description.clone(),
        }
    }
}
