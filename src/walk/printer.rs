//! Tree-shaped trace of a walk

use std::collections::HashSet;
use std::io::{self, Write};

use colored::{Color, Colorize};

use super::error::VisitError;
use super::Visitor;
use crate::graph::{DependencyGraph, Status};

pub const SUCCESS_GLYPH: &str = "✔";
pub const FAILURE_GLYPH: &str = "✖";

const INDENT: &str = "  ";

/// Printer configuration
#[derive(Debug, Clone, Copy)]
pub struct PrinterOptions {
    /// Colorize the closing glyph
    pub color: bool,
    pub success_color: Color,
    pub failure_color: Color,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            color: false,
            success_color: Color::Green,
            failure_color: Color::Red,
        }
    }
}

/// Visitor printing each node as a block
///
/// ```text
/// foo {
///   bar {
///   } bar ✔
/// } foo ✖
/// ```
pub struct Printer {
    options: PrinterOptions,
    indent: usize,
    out: Box<dyn Write>,
}

impl Printer {
    pub fn new(options: PrinterOptions) -> Self {
        Self::with_output(options, io::stdout())
    }

    pub fn with_output(options: PrinterOptions, out: impl Write + 'static) -> Self {
        Self {
            options,
            indent: 0,
            out: Box::new(out),
        }
    }

    fn line(&mut self, text: &str) {
        let written = writeln!(self.out, "{}{}", INDENT.repeat(self.indent), text)
            .and_then(|_| self.out.flush());
        if let Err(e) = written {
            tracing::warn!("failed to write walk trace: {e}");
        }
    }

    fn glyph(&self, met: bool) -> String {
        let (glyph, color) = if met {
            (SUCCESS_GLYPH, self.options.success_color)
        } else {
            (FAILURE_GLYPH, self.options.failure_color)
        };
        if self.options.color {
            glyph.color(color).to_string()
        } else {
            glyph.to_string()
        }
    }
}

impl Visitor for Printer {
    fn pre_visit(&mut self, _graph: &DependencyGraph, name: &str) {
        self.line(&format!("{name} {{"));
        self.indent += 1;
    }

    fn visit(&mut self, _graph: &mut DependencyGraph, _name: &str) -> Result<(), VisitError> {
        Ok(())
    }

    fn post_visit(&mut self, graph: &mut DependencyGraph, name: &str) {
        self.indent = self.indent.saturating_sub(1);
        let glyph = self.glyph(is_met(graph, name));
        self.line(&format!("}} {name} {glyph}"));
    }
}

/// Whether the named dependency is met, computing and caching its status if
/// it is still unknown.
///
/// An unknown node is met when every requirement is met and all of its
/// verify actions succeed. Remediate actions are never run. A missing node,
/// or one reached again through a requirement cycle, is not met.
pub fn is_met(graph: &mut DependencyGraph, name: &str) -> bool {
    let mut visiting = HashSet::new();
    check(graph, name, &mut visiting)
}

fn check(graph: &mut DependencyGraph, name: &str, visiting: &mut HashSet<String>) -> bool {
    let requirements = match graph.get(name) {
        Some(dep) => match dep.status {
            Status::Satisfied => return true,
            Status::Unsatisfied => return false,
            Status::Unknown => dep.requirements.clone(),
        },
        None => return false,
    };

    if !visiting.insert(name.to_string()) {
        return false;
    }

    let mut met = requirements.iter().all(|r| check(graph, r, visiting));
    visiting.remove(name);

    let Some(dep) = graph.get_mut(name) else {
        return false;
    };
    if met {
        met = dep.verify_actions.iter_mut().all(|action| match action.run() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(dependency = name, "check failed: {e}");
                false
            }
        });
    }

    dep.status = if met {
        Status::Satisfied
    } else {
        Status::Unsatisfied
    };
    met
}
