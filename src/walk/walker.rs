//! Depth-first, post-order graph walker

use std::collections::HashMap;

use super::error::WalkError;
use super::Visitor;
use crate::graph::DependencyGraph;

/// Per-node progress within one walk; absent means not started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the active path
    InProgress,
    /// Fully walked and visited
    Done,
}

/// Walks a [`DependencyGraph`] depth-first, visiting requirements before
/// the nodes that need them
///
/// A node already walked earlier in the same walk (a shared requirement in
/// a diamond) is entered and left again but not visited twice. Meeting a node
/// that is still on the active path is a cycle and ends the walk.
pub struct Walker<'a> {
    visitors: Vec<&'a mut dyn Visitor>,
    marks: HashMap<String, Mark>,
}

impl<'a> Walker<'a> {
    pub fn new(visitors: Vec<&'a mut dyn Visitor>) -> Self {
        Self {
            visitors,
            marks: HashMap::new(),
        }
    }

    /// Walk the graph from the node named `start`.
    pub fn walk(&mut self, graph: &mut DependencyGraph, start: &str) -> Result<(), WalkError> {
        self.marks.clear();

        if !graph.contains(start) {
            return Err(WalkError::NotFound {
                name: start.to_string(),
            });
        }

        tracing::debug!(start, nodes = graph.len(), "walking dependency graph");
        self.enter(graph, start)
    }

    /// Run the three hooks around walking `name`. `post_visit` runs however
    /// the walk below went.
    fn enter(&mut self, graph: &mut DependencyGraph, name: &str) -> Result<(), WalkError> {
        for visitor in self.visitors.iter_mut() {
            visitor.pre_visit(graph, name);
        }

        let result = self.walk_node(graph, name);

        for visitor in self.visitors.iter_mut() {
            visitor.post_visit(graph, name);
        }

        result
    }

    fn walk_node(&mut self, graph: &mut DependencyGraph, name: &str) -> Result<(), WalkError> {
        match self.marks.get(name) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::InProgress) => {
                return Err(WalkError::CycleDetected {
                    name: name.to_string(),
                })
            }
            None => {}
        }
        self.marks.insert(name.to_string(), Mark::InProgress);

        let requirements = match graph.get(name) {
            Some(dep) => dep.requirements.clone(),
            None => {
                return Err(WalkError::NotFound {
                    name: name.to_string(),
                })
            }
        };

        for requirement in &requirements {
            let result = if graph.contains(requirement) {
                self.enter(graph, requirement)
            } else {
                Err(WalkError::NotFound {
                    name: requirement.clone(),
                })
            };
            result.map_err(|inner| WalkError::Requirement {
                name: requirement.clone(),
                inner: Box::new(inner),
            })?;
        }

        for visitor in self.visitors.iter_mut() {
            visitor
                .visit(graph, name)
                .map_err(|inner| WalkError::Visit {
                    name: name.to_string(),
                    inner,
                })?;
        }

        self.marks.insert(name.to_string(), Mark::Done);
        Ok(())
    }
}
