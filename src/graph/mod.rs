//! Dependency graph
//!
//! Nodes are owned by the graph and keyed by name. Every edge is a name, so
//! a walk always resolves requirements through [`DependencyGraph::get`] and
//! never holds on to a node across lookups.

mod dependency;


use std::collections::{HashMap, HashSet};

use crate::manifest::Declaration;

pub use dependency::{Dependency, Status};

/// Directed graph of dependencies; an edge points from a node to a node it requires
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: HashMap<String, Dependency>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from raw declarations
    pub fn from_declarations(declarations: &[Declaration]) -> Self {
        let mut graph = Self::new();
        graph.construct(declarations);
        graph
    }

    /// Populate the graph from raw declarations.
    ///
    /// Declarations are processed in order and the first enabled declaration
    /// of a name wins; later ones are ignored with a warning. Disabled
    /// declarations never become nodes, and requirements naming them are
    /// dropped from the dependent's requirement list. Building a node builds
    /// its not-yet-built requirements as well.
    ///
    /// Calling this again with the same declarations leaves the graph unchanged.
    pub fn construct(&mut self, declarations: &[Declaration]) {
        let mut index: HashMap<&str, &Declaration> = HashMap::new();
        let mut disabled: HashSet<&str> = HashSet::new();

        for decl in declarations {
            if !decl.enabled {
                disabled.insert(decl.name.as_str());
                continue;
            }
            if index.contains_key(decl.name.as_str()) {
                tracing::warn!(name = %decl.name, "duplicate dependency declaration ignored");
                continue;
            }
            index.insert(decl.name.as_str(), decl);
        }

        for decl in declarations {
            if !decl.enabled {
                tracing::debug!(name = %decl.name, "skipping disabled dependency");
                continue;
            }
            self.make(decl, &index, &disabled);
        }
    }

    /// Insert the node for `decl` and, recursively, its requirements.
    fn make(
        &mut self,
        decl: &Declaration,
        index: &HashMap<&str, &Declaration>,
        disabled: &HashSet<&str>,
    ) {
        if self.nodes.contains_key(&decl.name) {
            return;
        }

        let requirements: Vec<String> = decl
            .requires
            .iter()
            .filter(|name| {
                let known =
                    index.contains_key(name.as_str()) || self.nodes.contains_key(name.as_str());
                if !known {
                    if disabled.contains(name.as_str()) {
                        tracing::debug!(dependency = %decl.name, requirement = %name, "omitting disabled requirement");
                    } else {
                        tracing::warn!(dependency = %decl.name, requirement = %name, "omitting unknown requirement");
                    }
                }
                known
            })
            .cloned()
            .collect();

        // Inserted before recursing so requirement cycles terminate here and
        // are left for the walker to report.
        self.nodes.insert(
            decl.name.clone(),
            Dependency::from_declaration(decl, requirements.clone()),
        );

        for name in &requirements {
            if let Some(required) = index.get(name.as_str()) {
                self.make(required, index, disabled);
            }
        }
    }

    /// Add a node unless one with the same name exists. Returns whether it was added.
    pub fn add(&mut self, dep: Dependency) -> bool {
        if self.nodes.contains_key(&dep.name) {
            tracing::warn!(name = %dep.name, "duplicate dependency ignored");
            return false;
        }
        self.nodes.insert(dep.name.clone(), dep);
        true
    }

    /// Get the dependency with the given name
    pub fn get(&self, name: &str) -> Option<&Dependency> {
        self.nodes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Dependency> {
        self.nodes.get_mut(name)
    }

    /// Status of the named dependency, if present
    pub fn status(&self, name: &str) -> Option<Status> {
        self.nodes.get(name).map(|d| d.status)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Every dependency in the graph, in no particular order
    pub fn all(&self) -> Vec<&Dependency> {
        self.nodes.values().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Forget every computed status so the graph can be walked again
    pub fn reset(&mut self) {
        for node in self.nodes.values_mut() {
            node.status = Status::Unknown;
        }
    }
}
