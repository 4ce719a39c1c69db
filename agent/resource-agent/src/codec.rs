use provider_model::{AttributeStore, Configuration, Result, Schema};

/// A `ResourceCodec` describes one resource type in terms of the external tool: which fields it
/// has, how its identity is derived, and exactly which arguments create and delete it.
///
/// The encoding functions must be pure and deterministic. The tool's argument grammar is
/// order-sensitive, so the order in which flags are pushed is part of the contract.
pub trait ResourceCodec: Send + Sync + 'static {
    /// The strongly typed view of the resource's configured attributes.
    type Record: Configuration;

    /// The resource-kind noun passed to the tool, e.g. `iamserviceaccount`.
    fn kind(&self) -> &'static str;

    /// The declared fields of the resource type.
    fn schema(&self) -> Schema;

    /// Read the typed record out of `store`. The default implementation validates the store
    /// against [`Self::schema`] and deserializes the result.
    fn decode(&self, store: &dyn AttributeStore) -> Result<Self::Record> {
        Self::Record::from_map(self.schema().decode(store)?)
    }

    /// The identity of the live resource described by `record`. Must be non-empty.
    fn identity(&self, record: &Self::Record) -> String;

    fn create_args(&self, record: &Self::Record) -> Vec<String>;

    fn delete_args(&self, record: &Self::Record) -> Vec<String>;

    /// Text to pipe to the tool's stdin when creating the resource.
    fn create_stdin(&self, _record: &Self::Record) -> Result<Option<String>> {
        Ok(None)
    }
}
