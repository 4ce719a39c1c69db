use anyhow::{Context, Result};
use provider_model::ResourceData;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

/// Read a state file. The file must exist.
pub(crate) async fn read_state(path: &Path) -> Result<ResourceData> {
    let text = tokio::fs::read_to_string(path)
        .await
        .context(format!("Unable to read state file '{}'", path.display()))?;
    parse_state(path, &text)
}

/// Read a state file, treating a missing file as a resource that does not exist yet. Any other
/// error reading the file is returned.
pub(crate) async fn read_state_or_default(path: &Path) -> Result<ResourceData> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => parse_state(path, &text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ResourceData::default()),
        Err(e) => Err(e).context(format!("Unable to read state file '{}'", path.display())),
    }
}

fn parse_state(path: &Path, text: &str) -> Result<ResourceData> {
    serde_json::from_str(text).context(format!(
        "Unable to parse state file '{}'",
        path.display()
    ))
}

pub(crate) async fn write_state(path: &Path, data: &ResourceData) -> Result<()> {
    let text = serde_json::to_string_pretty(data).context("Unable to serialize state")?;
    tokio::fs::write(path, text)
        .await
        .context(format!("Unable to write state file '{}'", path.display()))
}

/// Read a JSON object of resource attributes.
pub(crate) async fn read_attributes(path: &Path) -> Result<Map<String, Value>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .context(format!("Unable to read configuration '{}'", path.display()))?;
    serde_json::from_str(&text).context(format!(
        "Configuration '{}' must be a JSON object",
        path.display()
    ))
}
