//! List every dependency in a deps directory

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

use crate::graph::DependencyGraph;
use crate::manifest;

/// One graph node as listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub requires: Vec<String>,
}

/// Every enabled dependency, sorted by name
pub fn entries(dir: &Path) -> Result<Vec<Entry>> {
    let manifest = manifest::load(dir)?;
    let graph = DependencyGraph::from_declarations(&manifest.declarations);

    let mut entries: Vec<Entry> = graph
        .all()
        .into_iter()
        .map(|dep| Entry {
            name: dep.name.clone(),
            description: dep.description.clone(),
            requires: dep.requirements.clone(),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Execute the list command
pub fn execute(dir: &Path, json: bool) -> Result<()> {
    let entries = entries(dir)?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&entries).context("Failed to serialize dependency list")?;
        println!("{rendered}");
        return Ok(());
    }

    for entry in &entries {
        let requires = if entry.requires.is_empty() {
            "-".dimmed().to_string()
        } else {
            entry.requires.join(", ")
        };
        match &entry.description {
            Some(description) => println!("{}: {requires}  {}", entry.name.bold(), description.dimmed()),
            None => println!("{}: {requires}", entry.name.bold()),
        }
    }
    Ok(())
}
