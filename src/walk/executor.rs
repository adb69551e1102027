//! Convergence visitor
//!
//! For each node: propagate a failed requirement, otherwise check, remediate
//! and re-check. Action failures become node status; only remediation
//! failures are additionally recorded as errors for the caller.

use super::error::{RemediationError, VisitError};
use super::Visitor;
use crate::actions::{enable_verbose, Action, ActionError};
use crate::graph::{DependencyGraph, Status};

/// Executor configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutorOptions {
    /// Surface the output of every action that supports it
    pub debug: bool,
    /// Never run remediate actions
    pub dry_run: bool,
}

/// Visitor that converges each node it visits
#[derive(Debug, Default)]
pub struct Executor {
    options: ExecutorOptions,
    errors: Vec<RemediationError>,
}

impl Executor {
    pub fn new(options: ExecutorOptions) -> Self {
        Self {
            options,
            errors: Vec::new(),
        }
    }

    /// Remediation failures collected so far, in the order they happened
    pub fn errors(&self) -> &[RemediationError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<RemediationError> {
        std::mem::take(&mut self.errors)
    }

    /// Run `actions` in order, stopping at the first failure.
    fn run_all(&self, actions: &mut [Box<dyn Action>]) -> Result<(), ActionError> {
        for action in actions.iter_mut() {
            if self.options.debug {
                enable_verbose(action.as_mut());
            }
            action.run()?;
        }
        Ok(())
    }
}

impl Visitor for Executor {
    fn visit(&mut self, graph: &mut DependencyGraph, name: &str) -> Result<(), VisitError> {
        let missing = || VisitError::Missing {
            name: name.to_string(),
        };

        let dep = graph.get(name).ok_or_else(missing)?;
        if dep.status.is_known() {
            return Err(VisitError::AlreadyVisited {
                name: name.to_string(),
            });
        }

        let failed_requirement = dep
            .requirements
            .iter()
            .find(|r| graph.status(r) == Some(Status::Unsatisfied))
            .cloned();

        let dep = graph.get_mut(name).ok_or_else(missing)?;

        if let Some(requirement) = failed_requirement {
            tracing::debug!(dependency = name, requirement = %requirement, "requirement unsatisfied");
            dep.status = Status::Unsatisfied;
            return Ok(());
        }

        if let Err(e) = self.run_all(&mut dep.verify_actions) {
            tracing::debug!(dependency = name, "check failed: {e}");
        } else {
            tracing::debug!(dependency = name, "already satisfied");
            dep.status = Status::Satisfied;
            return Ok(());
        }

        if self.options.dry_run {
            tracing::debug!(dependency = name, "dry run, skipping remediation");
        } else if let Err(error) = self.run_all(&mut dep.remediate_actions) {
            tracing::debug!(dependency = name, "remediation failed: {error}");
            dep.status = Status::Unsatisfied;
            self.errors.push(RemediationError {
                dependency: name.to_string(),
                error,
            });
            return Ok(());
        }

        dep.status = match self.run_all(&mut dep.verify_actions) {
            Ok(()) => Status::Satisfied,
            Err(e) => {
                tracing::debug!(dependency = name, "re-check failed: {e}");
                Status::Unsatisfied
            }
        };
        Ok(())
    }
}
