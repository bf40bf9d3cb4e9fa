//! Child process launching
//!
//! [`Spawner`] is the seam between task handlers and the operating system.
//! [`ProcessSpawner`] runs the real toolchain; tests substitute a recorder.

use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{Environment, Invocation};
use std::process::{Command as StdCommand, Stdio};

/// Exit status of a finished step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(i32);

impl Status {
    pub const SUCCESS: Status = Status(0);

    /// Status of the usage-error path (unknown task)
    pub const USAGE: Status = Status(1);

    pub fn from_code(code: i32) -> Self {
        Status(code)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }
}

/// Launches an invocation and blocks until it finishes
pub trait Spawner {
    fn spawn(&mut self, invocation: &Invocation, env: &Environment) -> ExecutionResult<Status>;
}

/// Spawns real child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&mut self, invocation: &Invocation, env: &Environment) -> ExecutionResult<Status> {
        let mut command = StdCommand::new(&invocation.program);
        command.args(&invocation.args);

        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        // The derived environment already contains every inherited variable
        command.env_clear();
        command.envs(env.iter());

        command.stdin(Stdio::inherit());
        command.stdout(Stdio::inherit());
        command.stderr(Stdio::inherit());

        let status = command.status().map_err(|error| ExecutionError::Spawn {
            program: invocation.program.clone(),
            error,
        })?;

        match status.code() {
            Some(code) => Ok(Status::from_code(code)),
            None => Err(ExecutionError::Terminated {
                program: invocation.program.clone(),
            }),
        }
    }
}
