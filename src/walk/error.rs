//! Errors raised while walking the dependency graph

use crate::actions::ActionError;

/// Failure of a visitor's `visit` hook
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// The executor saw a node whose status was already decided in this pass
    #[error("executor: dep {name} already visited")]
    AlreadyVisited { name: String },

    #[error("dependency '{name}' not found in graph")]
    Missing { name: String },

    /// A visitor inside a composite failed
    #[error("composite: {0}")]
    Composite(Box<VisitError>),

    #[error("{visitor}: {message}")]
    Failed {
        visitor: &'static str,
        message: String,
    },
}

/// Error ending a walk
///
/// Failures below the start node are wrapped once per requirement edge on
/// the way back up, so the message reads as a trail from the start node's
/// first requirement down to the node that failed.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("node {name} not found")]
    NotFound { name: String },

    #[error("detected cycle at '{name}'")]
    CycleDetected { name: String },

    #[error("error visiting '{name}': {inner}")]
    Visit { name: String, inner: VisitError },

    #[error("error visiting dependency '{name}': {inner}")]
    Requirement { name: String, inner: Box<WalkError> },
}

impl WalkError {
    /// Names from the outermost requirement down to the failing node.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        loop {
            match current {
                WalkError::Requirement { name, inner } => {
                    path.push(name.as_str());
                    current = inner;
                }
                WalkError::NotFound { name }
                | WalkError::CycleDetected { name }
                | WalkError::Visit { name, .. } => {
                    if path.last() != Some(&name.as_str()) {
                        path.push(name.as_str());
                    }
                    return path;
                }
            }
        }
    }

    /// The innermost error, with every requirement wrapper removed
    pub fn root(&self) -> &WalkError {
        match self {
            WalkError::Requirement { inner, .. } => inner.root(),
            other => other,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self.root(), WalkError::CycleDetected { .. })
    }
}

/// A remediate action failed while the executor tried to meet a dependency
#[derive(Debug, thiserror::Error)]
#[error("remediate action failed for '{dependency}': {error}")]
pub struct RemediationError {
    pub dependency: String,
    pub error: ActionError,
}
