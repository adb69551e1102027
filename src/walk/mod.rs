//! Walking the dependency graph
//!
//! A [`Walker`] performs a depth-first, post-order traversal from a start
//! node and drives one or more [`Visitor`]s through it:
//!
//! - `pre_visit` when a node is entered, before its requirements
//! - `visit` once every requirement has been fully walked
//! - `post_visit` when the node is left, even if walking it failed
//!
//! The [`Executor`] converges nodes, the [`Printer`] renders the trace, and a
//! [`CompositeVisitor`] runs several visitors as one in a fixed order.

mod error;
mod executor;
mod printer;
mod walker;


use crate::graph::DependencyGraph;

pub use error::{RemediationError, VisitError, WalkError};
pub use executor::{Executor, ExecutorOptions};
pub use printer::{is_met, Printer, PrinterOptions, FAILURE_GLYPH, SUCCESS_GLYPH};
pub use walker::Walker;

/// Behaviour driven by a graph walk
///
/// Nodes are identified by name and looked up in the graph on every call.
pub trait Visitor {
    /// Called when the walk enters a node.
    fn pre_visit(&mut self, _graph: &DependencyGraph, _name: &str) {}

    /// Called after all of the node's requirements have been walked.
    ///
    /// An error here is about the visitor itself, not about whether the
    /// node converged.
    fn visit(&mut self, graph: &mut DependencyGraph, name: &str) -> Result<(), VisitError>;

    /// Called when the walk leaves a node, whatever the outcome.
    fn post_visit(&mut self, _graph: &mut DependencyGraph, _name: &str) {}
}

/// Visitor fanning every event out to a list of visitors, in order
///
/// `pre_visit` and `post_visit` always reach every visitor. `visit` stops at
/// the first failure and reports it wrapped as [`VisitError::Composite`].
pub struct CompositeVisitor<'a> {
    visitors: Vec<&'a mut dyn Visitor>,
}

impl<'a> CompositeVisitor<'a> {
    pub fn new(visitors: Vec<&'a mut dyn Visitor>) -> Self {
        Self { visitors }
    }
}

impl Visitor for CompositeVisitor<'_> {
    fn pre_visit(&mut self, graph: &DependencyGraph, name: &str) {
        for visitor in self.visitors.iter_mut() {
            visitor.pre_visit(graph, name);
        }
    }

    fn visit(&mut self, graph: &mut DependencyGraph, name: &str) -> Result<(), VisitError> {
        for visitor in self.visitors.iter_mut() {
            visitor
                .visit(graph, name)
                .map_err(|e| VisitError::Composite(Box::new(e)))?;
        }
        Ok(())
    }

    fn post_visit(&mut self, graph: &mut DependencyGraph, name: &str) {
        for visitor in self.visitors.iter_mut() {
            visitor.post_visit(graph, name);
        }
    }
}
