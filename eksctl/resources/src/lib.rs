/*!

The resource types this provider exposes, each backed by `eksctl`:

- `eksctl_cluster` ([`cluster`])
- `eksctl_iamserviceaccount` ([`iam_service_account`])

Call [`registry`] once at startup and hand the result to a
[`resource_agent::Agent`].

!*/

#![deny(
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic))]

pub mod cluster;
mod config;
pub mod iam_service_account;

pub use cluster::{ClusterCodec, ClusterConfig};
pub use config::ProviderConfig;
pub use iam_service_account::{IamServiceAccountCodec, IamServiceAccountConfig};

use log::debug;
use resource_agent::process::{CommandRunner, ProcessRunner};
use resource_agent::{CommandResource, Registry};

pub const CLUSTER: &str = "eksctl_cluster";
pub const IAM_SERVICE_ACCOUNT: &str = "eksctl_iamserviceaccount";

/// Build the registry of every resource type, running eksctl as a real process.
pub fn registry(config: &ProviderConfig) -> Registry {
    registry_with_runner(config, ProcessRunner)
}

/// Build the registry of every resource type with a custom [`CommandRunner`].
pub fn registry_with_runner<R>(config: &ProviderConfig, runner: R) -> Registry
where
    R: CommandRunner + Clone + 'static,
{
    debug!("Building the resource registry with configuration:\n{}", config);
    Registry::new()
        .with_command_resource(
            CLUSTER,
            CommandResource::with_runner(&config.eksctl_path, ClusterCodec {}, runner.clone()),
        )
        .with_command_resource(
            IAM_SERVICE_ACCOUNT,
            CommandResource::with_runner(&config.eksctl_path, IamServiceAccountCodec {}, runner),
        )
}
