/*!

The `lifecycle` module provides [`CommandResource`], which turns any [`ResourceCodec`] into a full
[`Provider`](crate::provider::Provider) by shelling out to the external tool.

A resource is `Absent` while its identity is empty and `Present` once it has one. Only a successful
create sets the identity and only a successful delete clears it; a failure never moves the resource
between the two.

Known limitations:
- `read` does not detect drift. The exit status of create is the only source of truth.
- A delete that fails because the infrastructure is already gone is reported like any other
  failure, so the resource stays `Present` until someone intervenes.
- There is no timeout. A hung tool blocks the call indefinitely.

!*/

use crate::codec::ResourceCodec;
use crate::process::{Command, CommandRunner, ProcessRunner};
use crate::provider::{
    Create, Destroy, IntoProviderError, ProviderError, ProviderResult, Read, Resources, Update,
};
use log::{debug, info, trace};
use provider_model::{AttributeStore, Schema};

/// The computed attribute that receives the tool's stdout after a successful create.
pub const KEY_OUTPUT: &str = "output";

/// A resource whose whole lifecycle is delegated to an external command-line tool.
#[derive(Debug, Clone)]
pub struct CommandResource<C, R = ProcessRunner>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    program: String,
    codec: C,
    runner: R,
}

impl<C> CommandResource<C, ProcessRunner>
where
    C: ResourceCodec,
{
    /// Create a resource that runs `program` as a real OS process.
    pub fn new<S: Into<String>>(program: S, codec: C) -> Self {
        Self::with_runner(program, codec, ProcessRunner)
    }
}

impl<C, R> CommandResource<C, R>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    pub fn with_runner<S: Into<String>>(program: S, codec: C, runner: R) -> Self {
        Self {
            program: program.into(),
            codec,
            runner,
        }
    }

    pub fn schema(&self) -> Schema {
        self.codec.schema()
    }

    pub fn create_command(&self, record: &C::Record) -> provider_model::Result<Command> {
        Ok(Command::new(&self.program)
            .args(self.codec.create_args(record))
            .stdin(self.codec.create_stdin(record)?))
    }

    pub fn delete_command(&self, record: &C::Record) -> Command {
        Command::new(&self.program).args(self.codec.delete_args(record))
    }
}

#[async_trait::async_trait]
impl<C, R> Create for CommandResource<C, R>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    async fn create(&self, data: &mut dyn AttributeStore) -> ProviderResult<()> {
        let kind = self.codec.kind();
        if data.is_present() {
            return Err(ProviderError::new_with_context(
                Resources::Remaining,
                format!(
                    "Unable to create {} '{}' because it already exists",
                    kind,
                    data.id()
                ),
            ));
        }

        let record = self.codec.decode(data).context(
            Resources::Clear,
            format!("Unable to read the {} configuration", kind),
        )?;
        debug!("Decoded {} configuration: {:?}", kind, record);
        let identity = self.codec.identity(&record);
        let command = self.create_command(&record).context(
            Resources::Clear,
            format!("Unable to build the command to create {} '{}'", kind, identity),
        )?;

        info!("Creating {} '{}'", kind, identity);
        let output = self.runner.run(&command).map_err(|e| {
            // A tool that never started cannot have changed anything. Anything else may have
            // left partially created infrastructure behind.
            let resources = if e.is_spawn() {
                Resources::Clear
            } else {
                Resources::Unknown
            };
            ProviderError::new_with_source_and_context(
                resources,
                format!("Unable to create {} '{}'", kind, identity),
                e,
            )
        })?;

        data.set_computed(KEY_OUTPUT, output);
        data.set_id(identity);
        info!("Created {} '{}'", kind, data.id());
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C, R> Read for CommandResource<C, R>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    async fn read(&self, data: &mut dyn AttributeStore) -> ProviderResult<()> {
        trace!(
            "Read of {} '{}' keeps the recorded state",
            self.codec.kind(),
            data.id()
        );
        Ok(())
    }
}

#[async_trait::async_trait]
impl<C, R> Update for CommandResource<C, R>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    async fn update(&self, data: &mut dyn AttributeStore) -> ProviderResult<()> {
        Err(ProviderError::new_with_context(
            Resources::Remaining,
            format!(
                "Unable to update {} '{}' in place, every field requires replacement",
                self.codec.kind(),
                data.id()
            ),
        ))
    }
}

#[async_trait::async_trait]
impl<C, R> Destroy for CommandResource<C, R>
where
    C: ResourceCodec,
    R: CommandRunner,
{
    async fn destroy(&self, data: &mut dyn AttributeStore) -> ProviderResult<()> {
        let kind = self.codec.kind();
        if !data.is_present() {
            debug!("No {} exists, nothing to delete", kind);
            return Ok(());
        }
        let identity = data.id().to_string();

        let record = self.codec.decode(data).context(
            Resources::Remaining,
            format!("Unable to read the configuration of {} '{}'", kind, identity),
        )?;
        let command = self.delete_command(&record);

        info!("Deleting {} '{}'", kind, identity);
        self.runner.run(&command).context(
            Resources::Remaining,
            format!("Unable to delete {} '{}'", kind, identity),
        )?;

        data.set_id(String::new());
        info!("Deleted {} '{}'", kind, identity);
        Ok(())
    }
}
