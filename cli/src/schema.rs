use agent_utils::json_display;
use anyhow::{Context, Result};
use clap::Parser;
use resource_agent::Registry;
use tabled::Table;

/// List the resource types, or describe the fields of one of them.
#[derive(Debug, Parser)]
pub(crate) struct Schema {
    /// The resource type to describe. All types are listed when omitted.
    #[clap(long = "type", short = 't')]
    resource_type: Option<String>,

    /// Output the schema in JSON format.
    #[clap(long = "json")]
    json: bool,
}

impl Schema {
    pub(crate) fn run(self, registry: &Registry) -> Result<()> {
        let resource_type = match &self.resource_type {
            None => {
                for name in registry.names() {
                    println!("{}", name);
                }
                return Ok(());
            }
            Some(name) => registry
                .get(name)
                .context(format!("Unknown resource type '{}'", name))?,
        };

        if self.json {
            println!("{}", json_display(resource_type.schema()));
        } else {
            println!("{}", Table::from(resource_type.schema()));
        }
        Ok(())
    }
}
