//! Actions run on behalf of dependency nodes
//!
//! An action is anything that can be run and may fail. A node's verify
//! actions answer "is this already met?", its remediate actions try to make
//! it so. Some actions can additionally be asked to surface their output
//! while running; that capability is exposed through [`Action::verbose`].

mod shell;

pub use shell::ShellAction;

use std::fmt;
use std::io;

/// Error returned when an action could not be completed
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("shell_action: failed to start '{command}': {error}")]
    Spawn { command: String, error: io::Error },

    #[error("shell_action: failed waiting for '{command}': {error}")]
    Wait { command: String, error: io::Error },

    #[error("shell_action: '{command}' exited with {}", exit_label(.code))]
    Exit { command: String, code: Option<i32> },

    #[error("shell_action: '{command}' killed after {secs}s timeout")]
    TimedOut { command: String, secs: u64 },

    #[error("{0}")]
    Failed(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Something that can be run and may fail
pub trait Action: fmt::Debug {
    /// Run the action to completion.
    fn run(&mut self) -> Result<(), ActionError>;

    /// Verbose-output capability of this action, if it has one.
    ///
    /// Actions that cannot surface output keep the default.
    fn verbose(&mut self) -> Option<&mut dyn Verbose> {
        None
    }
}

/// Capability of an action to emit its output while running
pub trait Verbose {
    fn enable_verbose(&mut self);
}

/// Turn on verbose output for `action` if it supports it.
///
/// Returns whether the action had the capability.
pub fn enable_verbose(action: &mut dyn Action) -> bool {
    match action.verbose() {
        Some(verbose) => {
            verbose.enable_verbose();
            true
        }
        None => false,
    }
}
