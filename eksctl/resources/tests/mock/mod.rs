/*!

A [`CommandRunner`] that records commands instead of running eksctl. Each run answers with the next
queued exit code and output.

!*/

use resource_agent::process::{self, Command, CommandRunner};
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct MockEksctl {
    exits: Mutex<VecDeque<(i32, String)>>,
    commands: Mutex<Vec<Command>>,
}

impl MockEksctl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next run.
    pub(crate) fn then_exit<S: Into<String>>(self, code: i32, output: S) -> Self {
        self.exits.lock().unwrap().push_back((code, output.into()));
        self
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }

    pub(crate) fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for MockEksctl {
    fn run(&self, command: &Command) -> process::Result<String> {
        self.commands.lock().unwrap().push(command.clone());
        let (code, output) = self
            .exits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default();
        if code == 0 {
            Ok(output)
        } else {
            Err(process::Error::ExecutionFailure {
                command: command.to_string(),
                exit_code: code,
                stdout: String::new(),
                stderr: output,
            })
        }
    }
}
