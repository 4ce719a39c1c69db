use crate::state::{read_state, write_state};
use anyhow::{Context, Result};
use clap::Parser;
use provider_model::{AttributeStore, ResourceOperation};
use resource_agent::Agent;
use std::path::PathBuf;

/// Run a single lifecycle operation against a resource's state file. The state file is only
/// written when the operation succeeds.
#[derive(Debug, Parser)]
pub(crate) struct Lifecycle {
    /// The resource type, e.g. `eksctl_iamserviceaccount`.
    #[clap(long = "type", short = 't')]
    resource_type: String,

    /// Path to the resource's JSON state file.
    #[clap(long = "state", short = 's')]
    state: PathBuf,
}

impl Lifecycle {
    pub(crate) async fn run(self, agent: Agent<'_>, operation: ResourceOperation) -> Result<()> {
        let mut data = read_state(&self.state).await?;
        agent
            .run(&self.resource_type, operation, &mut data)
            .await
            .context(format!(
                "Unable to {} '{}' from '{}'",
                operation,
                self.resource_type,
                self.state.display()
            ))?;
        write_state(&self.state, &data).await?;

        if data.is_present() {
            println!("{} '{}'", self.resource_type, data.id());
        } else {
            println!("{} does not exist", self.resource_type);
        }
        Ok(())
    }
}
