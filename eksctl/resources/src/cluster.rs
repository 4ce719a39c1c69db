/*!

The `eksctl_cluster` resource: an EKS cluster created and deleted with `eksctl create|delete
cluster`.

A cluster is described either by plain fields, which are passed to eksctl as flags, or by an
eksctl `ClusterConfig` document in the `spec` field, which is piped to `eksctl create cluster -f -`.
When both are given the fields are authoritative: they are written into the document's metadata,
and a document that names a different cluster or region is rejected.

!*/

use agent_utils::constants::DEFAULT_REGION;
use log::trace;
use provider_model::schema::{Field, FieldType};
use provider_model::{AttributeStore, Configuration, Error, Result, Schema};
use resource_agent::{ResourceCodec, KEY_OUTPUT};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

pub const KEY_NAME: &str = "name";
pub const KEY_REGION: &str = "region";
pub const KEY_VERSION: &str = "version";
pub const KEY_ZONES: &str = "zones";
pub const KEY_SPEC: &str = "spec";

const API_VERSION: &str = "eksctl.io/v1alpha5";
const KIND: &str = "ClusterConfig";

#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    pub region: String,
    pub version: Option<String>,
    pub zones: Vec<String>,
    /// An eksctl `ClusterConfig` YAML document.
    pub spec: Option<String>,
}

impl Configuration for ClusterConfig {}

#[derive(Debug, Default, Clone, Copy)]
pub struct ClusterCodec {}

impl ResourceCodec for ClusterCodec {
    type Record = ClusterConfig;

    fn kind(&self) -> &'static str {
        "cluster"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_field(
                Field::required(KEY_NAME, FieldType::String)
                    .force_new()
                    .with_description("Name of the EKS cluster"),
            )
            .with_field(
                Field::optional(KEY_REGION, FieldType::String)
                    .force_new()
                    .with_default(DEFAULT_REGION)
                    .with_description("AWS region of the cluster"),
            )
            .with_field(
                Field::optional(KEY_VERSION, FieldType::String)
                    .force_new()
                    .with_description("Kubernetes version, e.g. 1.24"),
            )
            .with_field(
                Field::optional(KEY_ZONES, FieldType::StringList)
                    .force_new()
                    .with_description("Availability zones of the cluster"),
            )
            .with_field(
                Field::optional(KEY_SPEC, FieldType::String)
                    .force_new()
                    .with_description("eksctl ClusterConfig YAML"),
            )
            .with_field(
                Field::computed(KEY_OUTPUT, FieldType::String)
                    .with_description("stdout of eksctl create cluster"),
            )
    }

    /// In addition to the field checks, a `spec` document is parsed and checked against the
    /// fields so that a bad document is reported before eksctl runs.
    fn decode(&self, store: &dyn AttributeStore) -> Result<ClusterConfig> {
        let record = ClusterConfig::from_map(self.schema().decode(store)?)?;
        config_document(&record)?;
        Ok(record)
    }

    fn identity(&self, record: &ClusterConfig) -> String {
        record.name.clone()
    }

    fn create_args(&self, record: &ClusterConfig) -> Vec<String> {
        let mut args = vec!["create".to_string(), self.kind().to_string()];
        if record.spec.is_some() {
            args.push("-f".to_string());
            args.push("-".to_string());
            return args;
        }
        args.extend(target_args(record));
        if let Some(version) = &record.version {
            args.push("--version".to_string());
            args.push(version.clone());
        }
        if !record.zones.is_empty() {
            args.push("--zones".to_string());
            args.push(record.zones.join(","));
        }
        args
    }

    fn delete_args(&self, record: &ClusterConfig) -> Vec<String> {
        let mut args = vec!["delete".to_string(), self.kind().to_string()];
        args.extend(target_args(record));
        args
    }

    fn create_stdin(&self, record: &ClusterConfig) -> Result<Option<String>> {
        match config_document(record)? {
            Some(document) => {
                let rendered = serde_yaml::to_string(&document).map_err(invalid_spec)?;
                trace!("Rendered cluster config:\n{}", rendered);
                Ok(Some(rendered))
            }
            None => Ok(None),
        }
    }
}

fn target_args(record: &ClusterConfig) -> Vec<String> {
    vec![
        "--name".to_string(),
        record.name.clone(),
        "--region".to_string(),
        record.region.clone(),
    ]
}

fn invalid_spec<S: ToString>(message: S) -> Error {
    Error::InvalidValue {
        field: KEY_SPEC.to_string(),
        message: message.to_string(),
    }
}

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn describe(value: &Value) -> String {
    serde_yaml::to_string(value)
        .unwrap_or_default()
        .trim_start_matches("---")
        .trim()
        .to_string()
}

/// Set `mapping[name]` to `value`. If the document already has a different value there, the
/// document conflicts with the resource's fields.
fn merge(mapping: &mut Mapping, name: &str, value: Value) -> Result<()> {
    match mapping.get(&key(name)) {
        Some(existing) if existing != &value => Err(invalid_spec(format!(
            "'{}' is {} in the document but {} in the resource",
            name,
            describe(existing),
            describe(&value),
        ))),
        _ => {
            mapping.insert(key(name), value);
            Ok(())
        }
    }
}

/// The `ClusterConfig` document for `record`, or `None` if the record has no `spec`.
fn config_document(record: &ClusterConfig) -> Result<Option<Mapping>> {
    let spec = match &record.spec {
        Some(spec) => spec,
        None => return Ok(None),
    };
    let mut document = match serde_yaml::from_str::<Value>(spec).map_err(invalid_spec)? {
        Value::Mapping(document) => document,
        _ => return Err(invalid_spec("the document must be a YAML mapping")),
    };

    if document.get(&key("apiVersion")).is_none() {
        document.insert(key("apiVersion"), key(API_VERSION));
    }
    merge(&mut document, "kind", key(KIND))?;

    let mut metadata = match document.remove(&key("metadata")) {
        None | Some(Value::Null) => Mapping::new(),
        Some(Value::Mapping(metadata)) => metadata,
        Some(_) => return Err(invalid_spec("'metadata' must be a YAML mapping")),
    };
    merge(&mut metadata, KEY_NAME, key(&record.name))?;
    merge(&mut metadata, KEY_REGION, key(&record.region))?;
    if let Some(version) = &record.version {
        merge(&mut metadata, KEY_VERSION, key(version))?;
    }
    document.insert(key("metadata"), Value::Mapping(metadata));

    if !record.zones.is_empty() {
        let zones = record.zones.iter().map(|zone| key(zone)).collect();
        merge(&mut document, "availabilityZones", Value::Sequence(zones))?;
    }
    Ok(Some(document))
}
