use agent_utils::constants::{DEFAULT_EKSCTL, ENV_EKSCTL_PATH};
use agent_utils::impl_display_as_json;
use serde::{Deserialize, Serialize};

/// Provider-level settings shared by every resource type.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// The program that is run for every lifecycle operation. A bare name is looked up on `PATH`.
    pub eksctl_path: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            eksctl_path: DEFAULT_EKSCTL.to_string(),
        }
    }
}

impl_display_as_json!(ProviderConfig);

impl ProviderConfig {
    pub fn new<S: Into<String>>(eksctl_path: S) -> Self {
        Self {
            eksctl_path: eksctl_path.into(),
        }
    }

    /// Build the configuration from the environment. `EKSCTL_PATH` overrides the default program
    /// when it is set and not empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(ENV_EKSCTL_PATH).filter(|path| !path.is_empty()) {
            Some(path) => Self::new(path),
            None => Self::default(),
        }
    }
}
