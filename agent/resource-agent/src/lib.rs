/*!

The `resource-agent` library lets you build resource providers that delegate every change to an
external command-line tool.

You describe a resource type with a [`ResourceCodec`]: its schema, how its identity is derived and
which arguments create and delete it. Wrapping the codec in a [`CommandResource`] gives you the
[`Create`](provider::Create), [`Read`](provider::Read), [`Update`](provider::Update) and
[`Destroy`](provider::Destroy) implementations. Put those in a [`Registry`] and hand the registry to
an [`Agent`] to serve a host.

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

mod agent;
mod codec;
pub mod error;
mod lifecycle;
pub mod process;
pub mod provider;
mod registry;

pub use agent::Agent;
pub use codec::ResourceCodec;
pub use lifecycle::{CommandResource, KEY_OUTPUT};
pub use provider_model::{AttributeStore, Configuration, ResourceData, ResourceOperation};
pub use registry::{Registry, ResourceType};
