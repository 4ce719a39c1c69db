use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Write an executable stand-in for eksctl into `dir`. It appends its arguments to `calls.log`,
/// echoes them to stdout and exits with `exit_code`.
pub(crate) fn fake_eksctl(dir: &Path, exit_code: i32) -> PathBuf {
    let path = dir.join("eksctl");
    let script = format!(
        "#!/bin/sh\necho \"$@\" >> \"$(dirname \"$0\")/calls.log\"\necho \"$@\"\nexit {}\n",
        exit_code
    );
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// The commands the fake eksctl in `dir` has been called with.
pub(crate) fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(ToString::to_string)
        .collect()
}

pub(crate) fn service_account_attributes() -> serde_json::Value {
    serde_json::json!({
        "namespace": "kube-system",
        "name": "my-sa",
        "cluster": "prod",
        "override_existing_serviceaccounts": true,
        "attach_policy_arns": ["arn:aws:iam::1:policy/P"]
    })
}

pub(crate) fn write_json(path: &Path, value: &serde_json::Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub(crate) fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
