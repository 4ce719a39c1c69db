/*!

The `agent` module defines the `Agent` object which drives a single lifecycle operation against
one resource instance on behalf of a host.

!*/

use crate::error::{AgentError, AgentResult};
use crate::Registry;
use log::{error, info};
use provider_model::{AttributeStore, ResourceOperation};

/// The `Agent` dispatches lifecycle operations to the providers in a [`Registry`].
///
/// The agent holds no per-instance state. Everything it knows about a resource instance arrives in
/// the [`AttributeStore`] handed to [`Agent::run`], and everything it learns is written back there.
#[derive(Debug, Clone, Copy)]
pub struct Agent<'a> {
    registry: &'a Registry,
}

impl<'a> Agent<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Run `operation` for an instance of `resource_type`. Errors are logged and then returned.
    pub async fn run(
        &self,
        resource_type: &str,
        operation: ResourceOperation,
        data: &mut dyn AttributeStore,
    ) -> AgentResult<()> {
        let provider = self
            .registry
            .get(resource_type)
            .ok_or_else(|| AgentError::UnknownResourceType(resource_type.into()))?
            .provider();

        info!("Running {} for '{}'", operation, resource_type);
        let result = match operation {
            ResourceOperation::Create => provider.create(data).await,
            ResourceOperation::Read => provider.read(data).await,
            ResourceOperation::Update => provider.update(data).await,
            ResourceOperation::Delete => provider.destroy(data).await,
        };

        match result {
            Ok(()) => {
                info!(
                    "Finished {} for '{}', identity '{}'",
                    operation,
                    resource_type,
                    data.id()
                );
                Ok(())
            }
            Err(e) => {
                error!("Unable to {} '{}': {}", operation, resource_type, e);
                Err(e.into())
            }
        }
    }
}
