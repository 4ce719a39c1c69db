use resource_agent::process::{self, Command, CommandRunner};
use std::collections::VecDeque;
use std::sync::Mutex;

/// One scripted outcome for a single run.
#[derive(Debug, Clone)]
pub(crate) enum Outcome {
    Exit { code: i32, stdout: String, stderr: String },
    NotFound,
}

impl Outcome {
    pub(crate) fn success<S: Into<String>>(stdout: S) -> Self {
        Outcome::Exit {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub(crate) fn failure<S: Into<String>>(code: i32, stderr: S) -> Self {
        Outcome::Exit {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// ScriptedRunner records every command it is asked to run and answers with the next scripted
/// outcome. Running out of outcomes is treated as a successful run with no output.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRunner {
    outcomes: Mutex<VecDeque<Outcome>>,
    commands: Mutex<Vec<Command>>,
}

impl ScriptedRunner {
    pub(crate) fn new<I: IntoIterator<Item = Outcome>>(outcomes: I) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
            commands: Mutex::default(),
        }
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &Command) -> process::Result<String> {
        self.commands.lock().unwrap().push(command.clone());
        match self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Outcome::success(""))
        {
            Outcome::Exit { code: 0, stdout, .. } => Ok(stdout),
            Outcome::Exit {
                code,
                stdout,
                stderr,
            } => Err(process::Error::ExecutionFailure {
                command: command.to_string(),
                exit_code: code,
                stdout,
                stderr,
            }),
            Outcome::NotFound => Err(process::Error::Spawn {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}
