//! Shell command action
//!
//! Runs a single command line through a command interpreter (`sh -c ...` by
//! default). The command's output is thrown away unless verbose output has
//! been enabled, in which case stdout and stderr are captured together, in
//! the order they were written, and passed to the action's output sink once
//! the process exits.

mod process;


use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use wait_timeout::ChildExt;

use super::{Action, ActionError, Verbose};
use crate::manifest::{CommandSpec, DEFAULT_SHELL};
use process::{kill_child_process, spawn_shell, OutputCapture};

/// An [`Action`] that runs a command as a shell sub-process
pub struct ShellAction {
    command: String,
    shell: String,
    login: bool,
    timeout: Option<Duration>,
    verbose: bool,
    output: Box<dyn Write>,
}

impl ShellAction {
    /// Create an action running `command` with the default shell.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: DEFAULT_SHELL.to_string(),
            login: false,
            timeout: None,
            verbose: false,
            output: Box::new(io::stderr()),
        }
    }

    /// Create an action from a command spec.
    pub fn from_spec(spec: &CommandSpec) -> Self {
        Self {
            shell: spec.shell.clone(),
            login: spec.login,
            timeout: spec.timeout,
            ..Self::new(spec.command.clone())
        }
    }

    /// Redirect captured output to `writer` instead of stderr.
    pub fn with_output(mut self, writer: impl Write + 'static) -> Self {
        self.output = Box::new(writer);
        self
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }

    pub fn login(&self) -> bool {
        self.login
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    fn emit(&mut self, captured: &str) {
        let written = self
            .output
            .write_all(captured.as_bytes())
            .and_then(|_| self.output.flush());
        if let Err(e) = written {
            tracing::warn!(command = %self.command, "failed to write command output: {e}");
        }
    }
}

impl Action for ShellAction {
    fn run(&mut self) -> Result<(), ActionError> {
        tracing::debug!(shell = %self.shell, login = self.login, command = %self.command, "running shell action");

        let mut child = spawn_shell(&self.shell, self.login, &self.command, self.verbose)
            .map_err(|error| ActionError::Spawn {
                command: self.command.clone(),
                error,
            })?;

        let capture = self.verbose.then(|| OutputCapture::start(&mut child));

        let waited = match self.timeout {
            Some(timeout) => child.wait_timeout(timeout),
            None => child.wait().map(Some),
        };
        let status = match waited {
            Ok(status) => status,
            Err(error) => {
                kill_child_process(&mut child);
                return Err(ActionError::Wait {
                    command: self.command.clone(),
                    error,
                });
            }
        };

        if status.is_none() {
            kill_child_process(&mut child);
        }

        if let Some(capture) = capture {
            let captured = capture.collect();
            self.emit(&captured);
        }

        match status {
            Some(status) if status.success() => Ok(()),
            Some(status) => Err(ActionError::Exit {
                command: self.command.clone(),
                code: status.code(),
            }),
            None => Err(ActionError::TimedOut {
                command: self.command.clone(),
                secs: self.timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }),
        }
    }

    fn verbose(&mut self) -> Option<&mut dyn Verbose> {
        Some(self)
    }
}

impl Verbose for ShellAction {
    fn enable_verbose(&mut self) {
        self.verbose = true;
    }
}

impl fmt::Display for ShellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.shell, self.command)
    }
}

impl fmt::Debug for ShellAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellAction")
            .field("command", &self.command)
            .field("shell", &self.shell)
            .field("login", &self.login)
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
