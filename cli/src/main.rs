/*!

This is the command line host for the eksctl provider. It runs lifecycle operations for one resource
at a time against a JSON state file, playing the part of a configuration-management engine.

!*/

mod apply;
mod lifecycle;
mod schema;
mod state;

use agent_utils::init_agent_logger;
use anyhow::Result;
use clap::Parser;
use eksctl_resources::ProviderConfig;
use log::LevelFilter;
use provider_model::ResourceOperation;
use resource_agent::Agent;

/// Create and delete EKS clusters and IAM service accounts with eksctl.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// Path to the eksctl binary. Looked up on `PATH` when not given.
    #[clap(long = "eksctl-path", env = "EKSCTL_PATH")]
    eksctl_path: Option<String>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Create a resource from the attributes in its state file.
    Create(lifecycle::Lifecycle),
    /// Refresh a resource's state.
    Read(lifecycle::Lifecycle),
    /// Update a resource in place.
    Update(lifecycle::Lifecycle),
    /// Delete a resource recorded in a state file.
    Delete(lifecycle::Lifecycle),
    /// Create, replace or update a resource to match a configuration.
    Apply(apply::Apply),
    /// Describe the available resource types.
    Schema(schema::Schema),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_agent_logger(env!("CARGO_CRATE_NAME"), Some(args.log_level));
    if let Err(e) = run(args).await {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let config = args
        .eksctl_path
        .filter(|path| !path.is_empty())
        .map(ProviderConfig::new)
        .unwrap_or_else(ProviderConfig::from_env);
    let registry = eksctl_resources::registry(&config);
    let agent = Agent::new(&registry);
    match args.command {
        Command::Create(lifecycle) => lifecycle.run(agent, ResourceOperation::Create).await,
        Command::Read(lifecycle) => lifecycle.run(agent, ResourceOperation::Read).await,
        Command::Update(lifecycle) => lifecycle.run(agent, ResourceOperation::Update).await,
        Command::Delete(lifecycle) => lifecycle.run(agent, ResourceOperation::Delete).await,
        Command::Apply(apply) => apply.run(agent).await,
        Command::Schema(schema) => schema.run(&registry),
    }
}
