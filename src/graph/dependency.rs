//! Dependency node types

use serde::Serialize;

use crate::actions::{Action, ShellAction};
use crate::manifest::Declaration;

/// Convergence status of a dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not evaluated yet in this pass
    #[default]
    Unknown,
    /// A requirement is unsatisfied, or a verify action still fails
    Unsatisfied,
    /// All requirements are satisfied and every verify action succeeds
    Satisfied,
}

impl Status {
    pub fn is_known(self) -> bool {
        self != Status::Unknown
    }
}

/// A node in the dependency graph
///
/// Requirements are held by name; the graph owns every node and resolves
/// names on each lookup.
#[derive(Debug)]
pub struct Dependency {
    pub name: String,
    pub description: Option<String>,
    /// Names of dependencies that must converge before this one
    pub requirements: Vec<String>,
    /// Actions deciding whether this dependency is already met
    pub verify_actions: Vec<Box<dyn Action>>,
    /// Actions run to try to meet this dependency
    pub remediate_actions: Vec<Box<dyn Action>>,
    pub status: Status,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            requirements: Vec::new(),
            verify_actions: Vec::new(),
            remediate_actions: Vec::new(),
            status: Status::Unknown,
        }
    }

    /// Build a node from a declaration, with its requirement list already
    /// filtered down to the names that belong in the graph.
    pub(crate) fn from_declaration(decl: &Declaration, requirements: Vec<String>) -> Self {
        let actions = |specs: &[crate::manifest::CommandSpec]| -> Vec<Box<dyn Action>> {
            specs
                .iter()
                .map(|spec| Box::new(ShellAction::from_spec(spec)) as Box<dyn Action>)
                .collect()
        };

        Self {
            name: decl.name.clone(),
            description: decl.description.clone(),
            requirements,
            verify_actions: actions(&decl.verify),
            remediate_actions: actions(&decl.remediate),
            status: Status::Unknown,
        }
    }

    pub fn with_requirement(mut self, name: impl Into<String>) -> Self {
        self.requirements.push(name.into());
        self
    }

    pub fn with_verify(mut self, action: impl Action + 'static) -> Self {
        self.verify_actions.push(Box::new(action));
        self
    }

    pub fn with_remediate(mut self, action: impl Action + 'static) -> Self {
        self.remediate_actions.push(Box::new(action));
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}
