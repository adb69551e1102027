//! Settings read from `matryoshka.toml`
//!
//! ```toml
//! [defaults]
//! dep = "all"
//! shell = "sh"
//! login = false
//! timeout_secs = 300
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Interpreter used when a command does not name one
pub const DEFAULT_SHELL: &str = "sh";

/// Start node used when none is given on the command line
pub const DEFAULT_DEP: &str = "all";

/// Name of the settings file inside a deps directory
pub const SETTINGS_FILE: &str = "matryoshka.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: Defaults,
}

/// Defaults applied to every command and walk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Start node for `apply` and `print`
    pub dep: String,
    pub shell: String,
    pub login: bool,
    /// Per-command timeout; none means commands may run forever
    pub timeout_secs: Option<u64>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            dep: DEFAULT_DEP.to_string(),
            shell: DEFAULT_SHELL.to_string(),
            login: false,
            timeout_secs: None,
        }
    }
}

impl Defaults {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Settings {
    /// Load settings from `dir`, falling back to defaults when the file is absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.defaults.timeout_secs == Some(0) {
            bail!("defaults.timeout_secs must be at least 1; leave it unset for no timeout");
        }
        Ok(settings)
    }
}
