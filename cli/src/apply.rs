use crate::state::{read_attributes, read_state_or_default, write_state};
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use provider_model::{AttributeStore, Change, ResourceData, ResourceOperation, Schema};
use resource_agent::Agent;
use std::path::{Path, PathBuf};

/// Converge a resource on a configuration: create it, replace it, update it or leave it alone.
#[derive(Debug, Parser)]
pub(crate) struct Apply {
    /// The resource type, e.g. `eksctl_cluster`.
    #[clap(long = "type", short = 't')]
    resource_type: String,

    /// Path to a JSON object holding the desired attributes.
    #[clap(long = "config", short = 'c')]
    config: PathBuf,

    /// Path to the resource's JSON state file. It is created if it does not exist.
    #[clap(long = "state", short = 's')]
    state: PathBuf,
}

impl Apply {
    pub(crate) async fn run(self, agent: Agent<'_>) -> Result<()> {
        let schema = agent
            .registry()
            .get(&self.resource_type)
            .context(format!("Unknown resource type '{}'", self.resource_type))?
            .schema();
        let proposed = read_attributes(&self.config).await?;
        let mut prior = read_state_or_default(&self.state).await?;

        match schema.plan(&prior, &proposed) {
            Change::NoChange => {
                println!("{} '{}' is up to date", self.resource_type, prior.id());
                return Ok(());
            }
            Change::Create => {
                let mut data = ResourceData::new(proposed);
                self.step(agent, ResourceOperation::Create, &mut data)
                    .await?;
            }
            Change::Replace { fields } => {
                info!(
                    "Replacing {} '{}' because of changes to {}",
                    self.resource_type,
                    prior.id(),
                    fields.join(", ")
                );
                self.step(agent, ResourceOperation::Delete, &mut prior)
                    .await?;
                let mut data = ResourceData::new(proposed);
                self.step(agent, ResourceOperation::Create, &mut data)
                    .await?;
            }
            Change::Update { fields } => {
                info!(
                    "Updating {} of {} '{}'",
                    fields.join(", "),
                    self.resource_type,
                    prior.id()
                );
                let mut data = next_state(schema, &prior, proposed);
                self.step(agent, ResourceOperation::Update, &mut data)
                    .await?;
            }
        }
        Ok(())
    }

    /// Run one operation and record its result. A failed step leaves the state file as the last
    /// successful step wrote it.
    async fn step(
        &self,
        agent: Agent<'_>,
        operation: ResourceOperation,
        data: &mut ResourceData,
    ) -> Result<()> {
        agent
            .run(&self.resource_type, operation, data)
            .await
            .context(format!("Unable to {} '{}'", operation, self.resource_type))?;
        write_state(&self.state, data).await?;
        print_step(&self.resource_type, operation, data, &self.state);
        Ok(())
    }
}

/// The state handed to an in-place update: the new attributes with the identity and computed
/// attributes carried over from the recorded state.
fn next_state(
    schema: &Schema,
    prior: &ResourceData,
    proposed: serde_json::Map<String, serde_json::Value>,
) -> ResourceData {
    let mut data = ResourceData::new(proposed);
    data.set_id(prior.id().to_string());
    for field in schema.fields().iter().filter(|field| field.computed) {
        if let Some(value) = prior.attributes().get(&field.name) {
            data.set(field.name.clone(), value.clone());
        }
    }
    data
}

fn print_step(
    resource_type: &str,
    operation: ResourceOperation,
    data: &ResourceData,
    state: &Path,
) {
    match operation {
        ResourceOperation::Delete => println!("Deleted {}", resource_type),
        _ => println!(
            "{} {} '{}', state written to '{}'",
            operation,
            resource_type,
            data.id(),
            state.display()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provider_model::schema::{Field, FieldType};
    use serde_json::json;

    #[test]
    fn update_keeps_identity_and_computed_attributes() {
        let schema = Schema::new()
            .with_field(Field::optional("tags", FieldType::StringList))
            .with_field(Field::computed("output", FieldType::String));
        let mut prior = ResourceData::default();
        prior.set("tags", json!(["a"]));
        prior.set("output", "created");
        prior.set_id("prod".to_string());

        let mut proposed = serde_json::Map::new();
        proposed.insert("tags".to_string(), json!(["b"]));
        let data = next_state(&schema, &prior, proposed);

        assert_eq!(data.id(), "prod");
        assert_eq!(data.attributes().get("tags"), Some(&json!(["b"])));
        assert_eq!(data.attributes().get("output"), Some(&json!("created")));
    }
}
