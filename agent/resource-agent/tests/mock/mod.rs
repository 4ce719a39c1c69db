/*!

This test module provides a scripted [`CommandRunner`] so that lifecycle behavior can be tested
without spawning real processes, and a tiny [`ResourceCodec`] for a made-up `widget` resource.

!*/

pub(crate) mod runner;

use provider_model::schema::{Field, FieldType};
use provider_model::{Configuration, Schema};
use resource_agent::ResourceCodec;
use serde::{Deserialize, Serialize};

pub(crate) const KEY_NAME: &str = "name";
pub(crate) const KEY_SIZE: &str = "size";
pub(crate) const KEY_LABELS: &str = "labels";

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Widget {
    pub(crate) name: String,
    pub(crate) size: String,
    pub(crate) labels: Vec<String>,
}

impl Configuration for Widget {}

/// WidgetCodec pretends that a tool called `widgetctl` manages widgets.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WidgetCodec {}

impl ResourceCodec for WidgetCodec {
    type Record = Widget;

    fn kind(&self) -> &'static str {
        "widget"
    }

    fn schema(&self) -> Schema {
        Schema::new()
            .with_field(Field::required(KEY_NAME, FieldType::String).force_new())
            .with_field(
                Field::optional(KEY_SIZE, FieldType::String)
                    .force_new()
                    .with_default("small"),
            )
            .with_field(Field::optional(KEY_LABELS, FieldType::StringList).force_new())
            .with_field(Field::computed(resource_agent::KEY_OUTPUT, FieldType::String))
    }

    fn identity(&self, record: &Widget) -> String {
        format!("widget-{}", record.name)
    }

    fn create_args(&self, record: &Widget) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            "widget".to_string(),
            "--name".to_string(),
            record.name.clone(),
            "--size".to_string(),
            record.size.clone(),
        ];
        for label in &record.labels {
            args.push("--label".to_string());
            args.push(label.clone());
        }
        args
    }

    fn delete_args(&self, record: &Widget) -> Vec<String> {
        vec![
            "delete".to_string(),
            "widget".to_string(),
            "--name".to_string(),
            record.name.clone(),
        ]
    }
}
