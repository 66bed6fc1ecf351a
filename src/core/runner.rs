//! Execution of sqitch commands as child processes.
//!
//! The orchestrator talks to processes through the [`CommandRunner`] trait so that
//! tests can script sqitch's responses. [`SystemRunner`] is the real implementation.

use crate::core::{
    command::SqitchCommand,
    error::{Result, SqitchError},
};
use std::path::Path;
use std::process::Command;

/// Captured result of one finished process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecResult {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}

pub trait CommandRunner {
    /// Run `command` to completion, as `user` when given, capturing its output
    fn run(&self, command: &SqitchCommand, user: Option<&str>) -> Result<ExecResult>;
}

/// Runs commands on the local host, blocking until they exit
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn build_process(program: &Path, command: &SqitchCommand, user: Option<&str>) -> Command {
        match user {
            Some(user) => {
                let mut process = Command::new("sudo");
                process
                    .args(["-n", "-u", user, "--"])
                    .arg(program)
                    .args(command.args());
                process
            }
            None => {
                let mut process = Command::new(program);
                process.args(command.args());
                process
            }
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &SqitchCommand, user: Option<&str>) -> Result<ExecResult> {
        let program = which::which(command.program())
            .map_err(|_| SqitchError::sqitch_not_found(command.program()))?;
        let mut process = Self::build_process(&program, command, user);

        match user {
            Some(user) => log::debug!("Running as '{user}': {command}"),
            None => log::debug!("Running: {command}"),
        }

        let output = process.output()?;
        let result = ExecResult {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        log::debug!("'{command}' exited with {:?}", result.exit_code);
        Ok(result)
    }
}
