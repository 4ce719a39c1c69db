/*!

The `eksctl_iamserviceaccount` resource: a Kubernetes service account bound to an IAM role with
the given policies attached, created and deleted with `eksctl create|delete iamserviceaccount`.

!*/

use provider_model::schema::{Field, FieldType};
use provider_model::{Configuration, Schema};
use resource_agent::{ResourceCodec, KEY_OUTPUT};
use serde::{Deserialize, Serialize};

pub const KEY_NAMESPACE: &str = "namespace";
pub const KEY_NAME: &str = "name";
pub const KEY_CLUSTER: &str = "cluster";
pub const KEY_OVERRIDE_EXISTING_SERVICE_ACCOUNTS: &str = "override_existing_serviceaccounts";
pub const KEY_ATTACH_POLICY_ARNS: &str = "attach_policy_arns";

pub const DEFAULT_NAMESPACE: &str = "default";

/// eksctl only applies the IAM changes when it is told to approve them.
const APPROVE: bool = true;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct IamServiceAccountConfig {
    pub name: String,
    pub namespace: String,
    pub cluster: String,
    pub override_existing_serviceaccounts: bool,
    /// Attached in this order. Duplicates are passed through as given.
    pub attach_policy_arns: Vec<String>,
}

impl Configuration for IamServiceAccountConfig {}

#[derive(Debug, Default, Clone, Copy)]
pub struct IamServiceAccountCodec {}

impl ResourceCodec for IamServiceAccountCodec {
    type Record = IamServiceAccountConfig;

    fn kind(&self) -> &'static str {
        "iamserviceaccount"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_field(
                Field::optional(KEY_NAMESPACE, FieldType::String)
                    .force_new()
                    .with_default(DEFAULT_NAMESPACE)
                    .with_description("Kubernetes namespace of the service account"),
            )
            .with_field(
                Field::required(KEY_NAME, FieldType::String)
                    .force_new()
                    .with_description("Name of the service account"),
            )
            .with_field(
                Field::required(KEY_CLUSTER, FieldType::String)
                    .force_new()
                    .with_description("Name of the EKS cluster"),
            )
            .with_field(
                Field::optional(KEY_OVERRIDE_EXISTING_SERVICE_ACCOUNTS, FieldType::Bool)
                    .force_new()
                    .with_description("Take over a service account that already exists"),
            )
            .with_field(
                Field::required(KEY_ATTACH_POLICY_ARNS, FieldType::StringList)
                    .force_new()
                    .with_description("IAM policies attached to the service account's role"),
            )
            .with_field(
                Field::computed(KEY_OUTPUT, FieldType::String)
                    .with_description("stdout of eksctl create iamserviceaccount"),
            )
    }

    fn identity(&self, record: &IamServiceAccountConfig) -> String {
        format!("{}-{}", record.namespace, record.name)
    }

    fn create_args(&self, record: &IamServiceAccountConfig) -> Vec<String> {
        let mut args = vec!["create".to_string(), self.kind().to_string()];
        if APPROVE {
            args.push("--approve".to_string());
        }
        args.extend(target_args(record));
        if record.override_existing_serviceaccounts {
            args.push("--override-existing-serviceaccounts".to_string());
        }
        for arn in &record.attach_policy_arns {
            args.push("--attach-policy-arn".to_string());
            args.push(arn.clone());
        }
        args
    }

    fn delete_args(&self, record: &IamServiceAccountConfig) -> Vec<String> {
        let mut args = vec!["delete".to_string(), self.kind().to_string()];
        args.extend(target_args(record));
        args
    }
}

/// The flags that select the service account, shared by create and delete.
fn target_args(record: &IamServiceAccountConfig) -> Vec<String> {
    vec![
        "--cluster".to_string(),
        record.cluster.clone(),
        "--name".to_string(),
        record.name.clone(),
        "--namespace".to_string(),
        record.namespace.clone(),
    ]
}
