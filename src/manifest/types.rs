//! Manifest and declaration type definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::settings::DEFAULT_SHELL;

/// Root structure of a `main.yaml` manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestFile {
    #[serde(default)]
    pub dependencies: Vec<DeclarationDef>,
}

/// A dependency as written in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclarationDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Names of other dependencies that must converge first
    #[serde(default)]
    pub requires: Vec<String>,
    /// Verify commands
    #[serde(default)]
    pub met: Vec<CommandDef>,
    /// Remediate commands
    #[serde(default)]
    pub meet: Vec<CommandDef>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Operating systems this dependency applies to; empty means all
    #[serde(default)]
    pub os: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

/// A command as written in the manifest: either a bare command line or a
/// table overriding the shell defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandDef {
    Line(String),
    Detailed {
        command: String,
        #[serde(default)]
        shell: Option<String>,
        #[serde(default)]
        login: Option<bool>,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl CommandDef {
    pub fn command(&self) -> &str {
        match self {
            CommandDef::Line(command) => command,
            CommandDef::Detailed { command, .. } => command,
        }
    }
}

/// A command to run through a command interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Literal shell line
    pub command: String,
    /// Interpreter, e.g. `sh` or `bash`
    pub shell: String,
    /// Run the interpreter as a login shell
    pub login: bool,
    pub timeout: Option<Duration>,
}

impl CommandSpec {
    /// A command run by the default shell with no timeout.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            shell: DEFAULT_SHELL.to_string(),
            login: false,
            timeout: None,
        }
    }
}

/// Raw declaration of a dependency, ready for graph construction
///
/// Requirements refer to other declarations by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub description: Option<String>,
    pub requires: Vec<String>,
    pub verify: Vec<CommandSpec>,
    pub remediate: Vec<CommandSpec>,
    pub enabled: bool,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            requires: Vec::new(),
            verify: Vec::new(),
            remediate: Vec::new(),
            enabled: true,
        }
    }

    pub fn requires<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requires.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn verify(mut self, command: CommandSpec) -> Self {
        self.verify.push(command);
        self
    }

    pub fn remediate(mut self, command: CommandSpec) -> Self {
        self.remediate.push(command);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Validation error with context
#[derive(Debug)]
pub struct ValidationError {
    pub message: String,
    pub dependency: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(name) = &self.dependency {
            write!(f, "Dependency '{}': {}", name, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}
