use crate::codec::ResourceCodec;
use crate::lifecycle::CommandResource;
use crate::process::CommandRunner;
use crate::provider::Provider;
use provider_model::Schema;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// A resource type as the host sees it: its declared schema and the provider that carries out its
/// lifecycle.
pub struct ResourceType {
    schema: Schema,
    provider: Box<dyn Provider>,
}

impl ResourceType {
    pub fn new<P>(schema: Schema, provider: P) -> Self
    where
        P: Provider + 'static,
    {
        Self {
            schema,
            provider: Box::new(provider),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn provider(&self) -> &dyn Provider {
        self.provider.as_ref()
    }
}

impl Debug for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceType")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl<C, R> From<CommandResource<C, R>> for ResourceType
where
    C: ResourceCodec,
    R: CommandRunner + 'static,
{
    fn from(resource: CommandResource<C, R>) -> Self {
        Self::new(resource.schema(), resource)
    }
}

/// The set of resource types a provider exposes, keyed by the host-facing type name (e.g.
/// `eksctl_cluster`). The registry is built once and is read-only afterwards.
#[derive(Debug, Default)]
pub struct Registry {
    types: BTreeMap<String, ResourceType>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource type under `name`, replacing any earlier registration of the same name.
    pub fn with_resource<S: Into<String>>(mut self, name: S, resource_type: ResourceType) -> Self {
        self.types.insert(name.into(), resource_type);
        self
    }

    /// Add a resource type whose schema is taken from its codec.
    pub fn with_command_resource<S, C, R>(self, name: S, resource: CommandResource<C, R>) -> Self
    where
        S: Into<String>,
        C: ResourceCodec,
        R: CommandRunner + 'static,
    {
        self.with_resource(name, resource.into())
    }

    pub fn get(&self, name: &str) -> Option<&ResourceType> {
        self.types.get(name)
    }

    /// The registered type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}
