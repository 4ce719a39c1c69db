/*!

`agent-utils` is a collection of functions that may be used by the provider crates and the
command-line host: logger setup, JSON display helpers and shared constants.

!*/

use constants::DEFAULT_AGENT_LEVEL_FILTER;
use env_logger::Builder;
use log::LevelFilter;
use serde::Serialize;
use std::env;

pub mod constants;

/// The crates whose log output is shown at the requested level. Everything else is limited to
/// errors.
const LOGGED_CRATES: &[&str] = &[
    "agent_utils",
    "eksctl_resources",
    "provider_model",
    "resource_agent",
];

/// Extract the value of `RUST_LOG` if it exists, otherwise log this application at
/// `DEFAULT_AGENT_LEVEL_FILTER`.
pub fn init_agent_logger(bin_crate: &str, log_level: Option<LevelFilter>) {
    match env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            let log_level = log_level.unwrap_or(DEFAULT_AGENT_LEVEL_FILTER);
            let mut builder = Builder::new();
            // Set log level to Error for crates other than our own.
            builder
                .filter_level(LevelFilter::Error)
                .filter(Some(bin_crate), log_level);
            for name in LOGGED_CRATES {
                builder.filter(Some(name), log_level);
            }
            builder.init();
        }
    }
}

/// Print a value using `serde_json` `to_string_pretty` for types that implement Serialize.
pub fn json_display<T: Serialize>(object: T) -> String {
    serde_json::to_string_pretty(&object).unwrap_or_else(|e| format!("Serialization failed: {}", e))
}

/// Implement `Display` with [`json_display`] for types that implement Serialize.
#[macro_export]
macro_rules! impl_display_as_json {
    ($i:ident) => {
        impl std::fmt::Display for $i {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&$crate::json_display(self), f)
            }
        }
    };
}
