//! Test doubles shared by unit tests

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;

use crate::actions::{Action, ActionError, Verbose};
use crate::graph::DependencyGraph;
use crate::manifest::Declaration;
use crate::walk::{VisitError, Visitor};

/// Writer that keeps everything written to it for later inspection
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Action that fails a set number of times before succeeding, counting every run.
///
/// Clones share their counters, so a test keeps one clone as a handle and
/// moves the other into the graph.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAction {
    calls: Rc<Cell<usize>>,
    verbose: Rc<Cell<bool>>,
    failures: usize,
}

impl ScriptedAction {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self::fail_times(usize::MAX)
    }

    pub fn fail_times(n: usize) -> Self {
        Self {
            failures: n,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn verbose_enabled(&self) -> bool {
        self.verbose.get()
    }
}

impl Action for ScriptedAction {
    fn run(&mut self) -> Result<(), ActionError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        if call > self.failures {
            Ok(())
        } else {
            Err(ActionError::Failed("oh noes".to_string()))
        }
    }

    fn verbose(&mut self) -> Option<&mut dyn Verbose> {
        Some(self)
    }
}

impl Verbose for ScriptedAction {
    fn enable_verbose(&mut self) {
        self.verbose.set(true);
    }
}

/// Visitor event recorded by [`Tracker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pre(String),
    Visit(String),
    Post(String),
}

/// Visitor recording every hook call, optionally failing `visit` on one node
#[derive(Debug, Default)]
pub struct Tracker {
    pub events: Rc<RefCell<Vec<Event>>>,
    pub fail_on: Option<String>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Names passed to `visit`, in order
    pub fn visited(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Visit(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&Event) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| wanted(e)).count()
    }
}

impl Visitor for Tracker {
    fn pre_visit(&mut self, _graph: &DependencyGraph, name: &str) {
        self.events.borrow_mut().push(Event::Pre(name.to_string()));
    }

    fn visit(&mut self, _graph: &mut DependencyGraph, name: &str) -> Result<(), VisitError> {
        self.events.borrow_mut().push(Event::Visit(name.to_string()));
        if self.fail_on.as_deref() == Some(name) {
            return Err(VisitError::Failed {
                visitor: "tracker",
                message: format!("refusing {name}"),
            });
        }
        Ok(())
    }

    fn post_visit(&mut self, _graph: &mut DependencyGraph, name: &str) {
        self.events.borrow_mut().push(Event::Post(name.to_string()));
    }
}

/// Declarations for the graph
///
/// ```text
///            foo
///          /     \
///        bar     bam
///        / \    /
///     baz   boom
/// ```
pub fn diamond_declarations() -> Vec<Declaration> {
    vec![
        Declaration::new("foo").requires(["bar", "bam"]),
        Declaration::new("bar").requires(["baz", "boom"]),
        Declaration::new("baz"),
        Declaration::new("bam").requires(["boom"]),
        Declaration::new("boom"),
    ]
}

pub fn diamond_graph() -> DependencyGraph {
    DependencyGraph::from_declarations(&diamond_declarations())
}
