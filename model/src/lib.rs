/*!

This library provides the data model shared by the provider crates: the attribute store that
carries a resource instance's state, the schema declarations that describe a resource type's
fields, and the `Configuration` trait that typed resource records implement.

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

pub use configuration::Configuration;
pub use error::{Error, Result};
pub use operation::ResourceOperation;
pub use resource_data::{AttributeStore, ResourceData};
pub use schema::{Change, Field, FieldType, Schema};

mod configuration;
mod error;
mod operation;
mod resource_data;
pub mod schema;
