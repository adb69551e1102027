//! Shared loading for commands that walk a deps directory

use anyhow::{bail, Result};
use std::path::Path;

use crate::graph::DependencyGraph;
use crate::manifest;

/// A graph ready to walk and the node to start from
#[derive(Debug)]
pub struct Target {
    pub graph: DependencyGraph,
    pub dep: String,
}

/// Load `dir` and pick the start node: `dep` if given, else the settings default.
pub fn load_target(dir: &Path, dep: Option<&str>) -> Result<Target> {
    let manifest = manifest::load(dir)?;
    let graph = DependencyGraph::from_declarations(&manifest.declarations);

    let dep = dep
        .map(str::to_string)
        .unwrap_or(manifest.settings.defaults.dep);

    if !graph.contains(&dep) {
        bail!(
            "Dependency '{dep}' not found in {} (is it declared and enabled?)",
            dir.display()
        );
    }

    Ok(Target { graph, dep })
}
