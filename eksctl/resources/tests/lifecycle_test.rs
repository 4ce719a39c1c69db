pub(crate) mod mock;

use eksctl_resources::iam_service_account::{
    KEY_ATTACH_POLICY_ARNS, KEY_CLUSTER, KEY_NAME, KEY_NAMESPACE,
    KEY_OVERRIDE_EXISTING_SERVICE_ACCOUNTS,
};
use eksctl_resources::{
    cluster, registry_with_runner, ProviderConfig, CLUSTER, IAM_SERVICE_ACCOUNT,
};
use maplit::btreemap;
use mock::MockEksctl;
use resource_agent::error::AgentError;
use resource_agent::process;
use resource_agent::provider::Resources;
use resource_agent::{Agent, AttributeStore, ResourceData, ResourceOperation, KEY_OUTPUT};
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn service_account() -> ResourceData {
    let attributes: Map<String, Value> = btreemap! {
        KEY_NAMESPACE.to_string() => json!("kube-system"),
        KEY_NAME.to_string() => json!("my-sa"),
        KEY_CLUSTER.to_string() => json!("prod"),
        KEY_ATTACH_POLICY_ARNS.to_string() => json!(["arn:aws:iam::1:policy/P"]),
        KEY_OVERRIDE_EXISTING_SERVICE_ACCOUNTS.to_string() => json!(true),
    }
    .into_iter()
    .collect();
    ResourceData::new(attributes)
}

fn provider_error(err: &AgentError) -> &resource_agent::provider::ProviderError {
    err.provider_error().unwrap()
}

#[tokio::test]
async fn create_service_account() {
    let eksctl = Arc::new(MockEksctl::new().then_exit(0, "created serviceaccount\n"));
    let registry = registry_with_runner(&ProviderConfig::default(), Arc::clone(&eksctl));
    let mut data = service_account();

    Agent::new(&registry)
        .run(IAM_SERVICE_ACCOUNT, ResourceOperation::Create, &mut data)
        .await
        .unwrap();

    assert_eq!(
        eksctl.command_lines(),
        vec![
            "eksctl create iamserviceaccount --approve --cluster prod --name my-sa \
             --namespace kube-system --override-existing-serviceaccounts \
             --attach-policy-arn arn:aws:iam::1:policy/P"
        ]
    );
    assert_eq!(data.id(), "kube-system-my-sa");
    assert_eq!(
        data.get_string(KEY_OUTPUT).unwrap().as_deref(),
        Some("created serviceaccount\n")
    );
}

#[tokio::test]
async fn failed_delete_keeps_service_account() {
    let eksctl = Arc::new(MockEksctl::new().then_exit(1, "Error: cluster not reachable"));
    let registry = registry_with_runner(&ProviderConfig::default(), Arc::clone(&eksctl));
    let mut data = service_account();
    data.set_id("kube-system-my-sa".to_string());

    let err = Agent::new(&registry)
        .run(IAM_SERVICE_ACCOUNT, ResourceOperation::Delete, &mut data)
        .await
        .unwrap_err();

    assert_eq!(
        eksctl.command_lines(),
        vec!["eksctl delete iamserviceaccount --cluster prod --name my-sa --namespace kube-system"]
    );
    let err = provider_error(&err);
    assert_eq!(err.resources(), Resources::Remaining);
    match err.inner_as::<process::Error>() {
        Some(process::Error::ExecutionFailure {
            exit_code, stderr, ..
        }) => {
            assert_eq!(*exit_code, 1);
            assert_eq!(stderr, "Error: cluster not reachable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(data.id(), "kube-system-my-sa");
}

#[tokio::test]
async fn delete_service_account() {
    let eksctl = Arc::new(MockEksctl::new());
    let registry = registry_with_runner(
        &ProviderConfig::new("/usr/local/bin/eksctl"),
        Arc::clone(&eksctl),
    );
    let mut data = service_account();
    data.set_id("kube-system-my-sa".to_string());

    Agent::new(&registry)
        .run(IAM_SERVICE_ACCOUNT, ResourceOperation::Delete, &mut data)
        .await
        .unwrap();

    assert_eq!(eksctl.commands()[0].program, "/usr/local/bin/eksctl");
    assert!(!data.is_present());
}

#[tokio::test]
async fn invalid_configuration_never_runs_eksctl() {
    let eksctl = Arc::new(MockEksctl::new());
    let registry = registry_with_runner(&ProviderConfig::default(), Arc::clone(&eksctl));
    let agent = Agent::new(&registry);

    let mut data = service_account();
    data.set(KEY_CLUSTER, "");
    let err = agent
        .run(IAM_SERVICE_ACCOUNT, ResourceOperation::Create, &mut data)
        .await
        .unwrap_err();
    let err = provider_error(&err);
    assert_eq!(err.resources(), Resources::Clear);
    assert!(err.inner_as::<provider_model::Error>().is_some());

    let mut data = ResourceData::default();
    data.set(cluster::KEY_NAME, "prod");
    data.set(cluster::KEY_SPEC, "metadata: [not, a, mapping]");
    assert!(agent
        .run(CLUSTER, ResourceOperation::Create, &mut data)
        .await
        .is_err());

    assert!(eksctl.commands().is_empty());
}

#[tokio::test]
async fn cluster_from_config_document() {
    let eksctl = Arc::new(MockEksctl::new().then_exit(0, "").then_exit(0, ""));
    let registry = registry_with_runner(&ProviderConfig::default(), Arc::clone(&eksctl));
    let agent = Agent::new(&registry);
    let mut data = ResourceData::default();
    data.set(cluster::KEY_NAME, "prod");
    data.set(cluster::KEY_SPEC, "managedNodeGroups:\n  - name: ng-1\n");

    agent
        .run(CLUSTER, ResourceOperation::Create, &mut data)
        .await
        .unwrap();
    assert_eq!(data.id(), "prod");

    agent
        .run(CLUSTER, ResourceOperation::Delete, &mut data)
        .await
        .unwrap();
    assert_eq!(data.id(), "");

    let commands = eksctl.commands();
    assert_eq!(commands[0].to_string(), "eksctl create cluster -f -");
    let stdin = commands[0].stdin.as_deref().unwrap();
    assert!(stdin.contains("kind: ClusterConfig"));
    assert!(stdin.contains("name: prod"));
    assert!(stdin.contains("region: us-west-2"));
    assert_eq!(
        commands[1].to_string(),
        "eksctl delete cluster --name prod --region us-west-2"
    );
    assert_eq!(commands[1].stdin, None);
}

#[test]
fn registry_exposes_both_resource_types() {
    let registry = eksctl_resources::registry(&ProviderConfig::default());
    assert_eq!(
        registry.names().collect::<Vec<_>>(),
        vec![CLUSTER, IAM_SERVICE_ACCOUNT]
    );
    let schema = registry.get(IAM_SERVICE_ACCOUNT).unwrap().schema();
    assert!(schema.field(KEY_ATTACH_POLICY_ARNS).unwrap().required);
    assert!(schema.field(KEY_OUTPUT).unwrap().computed);
}
