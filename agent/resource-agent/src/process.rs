/*!

The `process` module runs the external tool. [`CommandRunner`] is the narrow capability the
lifecycle adapter depends on, so that tests can substitute a scripted runner for real processes.

!*/

use log::{debug, trace, warn};
use serde::Serialize;
use snafu::{OptionExt, ResultExt, Snafu};
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::process::{Output, Stdio};

/// A program, its ordered arguments and optional text for its stdin. A `Command` is built fresh
/// for every lifecycle call and never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Command {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Command {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, stdin: Option<String>) -> Self {
        self.stdin = stdin;
        self
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The error type returned by a [`CommandRunner`].
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Unable to start '{}': {}", program, source))]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display("The stdin of '{}' was not available", program))]
    StdinMissing { program: String },

    #[snafu(display("Unable to wait for '{}': {}", program, source))]
    Wait {
        program: String,
        source: std::io::Error,
    },

    #[snafu(display(
        "Error running '{}', exit code {}\nstderr:\n{}\nstdout:\n{}",
        command,
        exit_code,
        stderr,
        stdout
    ))]
    ExecutionFailure {
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },
}

impl Error {
    /// Whether the program never started, in which case it cannot have changed anything.
    pub fn is_spawn(&self) -> bool {
        matches!(self, Error::Spawn { .. })
    }

    /// The exit code of a program that ran and failed.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::ExecutionFailure { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runs a [`Command`] to completion and returns its captured output.
///
/// Implementations must block until the program exits, must not retry, and must return
/// [`Error::ExecutionFailure`] for a non-zero exit.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &Command) -> Result<String>;
}

impl<T> CommandRunner for std::sync::Arc<T>
where
    T: CommandRunner + ?Sized,
{
    fn run(&self, command: &Command) -> Result<String> {
        self.as_ref().run(command)
    }
}

/// The default [`CommandRunner`], which spawns an OS process. On success only stdout is returned;
/// stderr is logged. On failure both streams are kept in the error.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &Command) -> Result<String> {
        trace!("Running '{}'", command);
        let mut child = std::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(if command.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context(SpawnSnafu {
                program: &command.program,
            })?;

        // Feed stdin from another thread so that a chatty child cannot fill its stdout pipe and
        // stall while we are still writing.
        let writer = match &command.stdin {
            Some(input) => {
                let mut stdin = child.stdin.take().context(StdinMissingSnafu {
                    program: &command.program,
                })?;
                let input = input.clone();
                Some(std::thread::spawn(move || stdin.write_all(input.as_bytes())))
            }
            None => None,
        };

        let output = child.wait_with_output().context(WaitSnafu {
            program: &command.program,
        })?;

        // The exit status decides the outcome. A child that exits without reading all of its stdin
        // is not an error in itself.
        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("Unable to write all of stdin to '{}': {}", command, e),
                Err(_) => warn!("The stdin writer for '{}' panicked", command),
            }
        }

        interpret_output(command, output)
    }
}

/// If the command was successful (exit code zero), returns the command's `stdout`. Otherwise
/// returns [`Error::ExecutionFailure`] carrying both captured streams.
pub fn interpret_output(command: &Command, output: Output) -> Result<String> {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    if output.status.success() {
        if !stderr.is_empty() {
            debug!("'{}' stderr:\n{}", command, stderr);
        }
        Ok(stdout)
    } else {
        ExecutionFailureSnafu {
            command: command.to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout,
            stderr,
        }
        .fail()
    }
}
