//! Declarative dependency manifests
//!
//! A deps directory holds a `main.yaml` manifest listing dependency
//! declarations and an optional `matryoshka.toml` with defaults. Loading a
//! directory yields the raw [`Declaration`]s the dependency graph is built
//! from.

mod settings;
mod types;


use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::validation::{validate_description, validate_name};

pub use settings::{Defaults, Settings, DEFAULT_DEP, DEFAULT_SHELL, SETTINGS_FILE};
pub use types::{
    CommandDef, CommandSpec, Declaration, DeclarationDef, ManifestFile, ValidationError,
};

/// Name of the manifest entrypoint inside a deps directory
pub const MANIFEST_FILE: &str = "main.yaml";

/// Maximum length of a single command line
const MAX_COMMAND_LENGTH: usize = 4096;

/// Everything loaded from a deps directory
#[derive(Debug, Clone)]
pub struct Manifest {
    pub settings: Settings,
    pub declarations: Vec<Declaration>,
}

/// Load the manifest and settings from a deps directory
pub fn load(dir: &Path) -> Result<Manifest> {
    if !dir.is_dir() {
        bail!("Deps directory not found: {}", dir.display());
    }

    let path = dir.join(MANIFEST_FILE);
    if !path.exists() {
        bail!("{MANIFEST_FILE} not found in {}", dir.display());
    }

    let settings = Settings::load(dir)?;
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let declarations = parse_manifest(&content, &settings.defaults, std::env::consts::OS)
        .with_context(|| format!("Invalid manifest: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        count = declarations.len(),
        "loaded manifest"
    );

    Ok(Manifest {
        settings,
        declarations,
    })
}

/// Parse and validate manifest text into declarations
///
/// `os` is the operating system declarations with an `os` list are matched
/// against; non-matching declarations come back disabled.
pub fn parse_manifest(content: &str, defaults: &Defaults, os: &str) -> Result<Vec<Declaration>> {
    let file: ManifestFile =
        serde_yaml::from_str(content).context("Failed to parse manifest YAML")?;

    if let Err(errors) = validate(&file) {
        let messages: Vec<String> = errors.iter().map(|e| format!("  - {e}")).collect();
        bail!("Manifest validation failed:\n{}", messages.join("\n"));
    }

    Ok(file
        .dependencies
        .iter()
        .map(|def| resolve(def, defaults, os))
        .collect())
}

/// Validate a parsed manifest, collecting every problem found
pub fn validate(file: &ManifestFile) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if file.dependencies.is_empty() {
        errors.push(ValidationError {
            message: "No dependencies defined".to_string(),
            dependency: None,
        });
    }

    let known: HashSet<&str> = file.dependencies.iter().map(|d| d.name.as_str()).collect();

    for def in &file.dependencies {
        let context = |message: String| ValidationError {
            message,
            dependency: Some(def.name.clone()),
        };

        if let Err(e) = validate_name(&def.name) {
            errors.push(context(e.to_string()));
        }

        if let Some(description) = &def.description {
            if let Err(e) = validate_description(description) {
                errors.push(context(e.to_string()));
            }
        }

        for required in &def.requires {
            if !known.contains(required.as_str()) {
                errors.push(context(format!("Unknown requirement '{required}'")));
            }
        }

        for (kind, commands) in [("met", &def.met), ("meet", &def.meet)] {
            for command in commands {
                if let Err(message) = validate_command(command) {
                    errors.push(context(format!("{kind}: {message}")));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_command(command: &CommandDef) -> Result<(), String> {
    let line = command.command();
    if line.trim().is_empty() {
        return Err("command cannot be empty".to_string());
    }
    if line.len() > MAX_COMMAND_LENGTH {
        return Err(format!(
            "command too long ({} chars, max {MAX_COMMAND_LENGTH})",
            line.len()
        ));
    }
    if let CommandDef::Detailed {
        shell, timeout_secs, ..
    } = command
    {
        if shell.as_deref().is_some_and(|s| s.trim().is_empty()) {
            return Err("shell cannot be empty".to_string());
        }
        if *timeout_secs == Some(0) {
            return Err("timeout_secs must be at least 1".to_string());
        }
    }
    Ok(())
}

/// Turn a manifest entry into a declaration, applying defaults
fn resolve(def: &DeclarationDef, defaults: &Defaults, os: &str) -> Declaration {
    let os_matches = def.os.is_empty() || def.os.iter().any(|o| o == os);
    let commands =
        |defs: &[CommandDef]| -> Vec<CommandSpec> { defs.iter().map(|c| spec(c, defaults)).collect() };

    Declaration {
        name: def.name.clone(),
        description: def.description.clone(),
        requires: def.requires.clone(),
        verify: commands(&def.met),
        remediate: commands(&def.meet),
        enabled: def.enabled && os_matches,
    }
}

fn spec(command: &CommandDef, defaults: &Defaults) -> CommandSpec {
    match command {
        CommandDef::Line(line) => CommandSpec {
            command: line.clone(),
            shell: defaults.shell.clone(),
            login: defaults.login,
            timeout: defaults.timeout(),
        },
        CommandDef::Detailed {
            command,
            shell,
            login,
            timeout_secs,
        } => CommandSpec {
            command: command.clone(),
            shell: shell.clone().unwrap_or_else(|| defaults.shell.clone()),
            login: login.unwrap_or(defaults.login),
            timeout: timeout_secs
                .map(std::time::Duration::from_secs)
                .or_else(|| defaults.timeout()),
        },
    }
}
