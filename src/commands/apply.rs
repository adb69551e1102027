//! Converge a deps directory

use anyhow::{bail, Result};
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

use super::common::load_target;
use crate::graph::Status;
use crate::walk::{
    CompositeVisitor, Executor, ExecutorOptions, Printer, PrinterOptions, RemediationError,
    WalkError, Walker,
};

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub dep: Option<String>,
    pub color: bool,
    pub debug: bool,
    pub dry_run: bool,
}

/// What an apply run ended with
#[derive(Debug)]
pub struct ApplyOutcome {
    pub dep: String,
    pub status: Status,
    pub walk_error: Option<WalkError>,
    pub remediation_errors: Vec<RemediationError>,
}

impl ApplyOutcome {
    pub fn succeeded(&self) -> bool {
        self.walk_error.is_none() && self.status == Status::Satisfied
    }
}

/// Walk the target with the printer ahead of the executor, writing the trace to `out`.
pub fn run(dir: &Path, options: &ApplyOptions, out: impl Write + 'static) -> Result<ApplyOutcome> {
    let mut target = load_target(dir, options.dep.as_deref())?;

    let mut printer = Printer::with_output(
        PrinterOptions {
            color: options.color,
            ..Default::default()
        },
        out,
    );
    let mut executor = Executor::new(ExecutorOptions {
        debug: options.debug,
        dry_run: options.dry_run,
    });

    let walked = {
        let mut composite = CompositeVisitor::new(vec![&mut printer, &mut executor]);
        let result = Walker::new(vec![&mut composite]).walk(&mut target.graph, &target.dep);
        result
    };

    let status = target.graph.status(&target.dep).unwrap_or_default();
    tracing::info!(dep = %target.dep, ?status, dry_run = options.dry_run, "apply finished");

    Ok(ApplyOutcome {
        dep: target.dep,
        status,
        walk_error: walked.err(),
        remediation_errors: executor.take_errors(),
    })
}

/// Execute the apply command
pub fn execute(dir: &Path, options: ApplyOptions) -> Result<()> {
    let outcome = run(dir, &options, io::stdout())?;

    for error in &outcome.remediation_errors {
        eprintln!("{} {error}", "✗".red().bold());
    }

    if let Some(error) = outcome.walk_error {
        return Err(error.into());
    }
    if outcome.status != Status::Satisfied {
        if options.dry_run {
            bail!("'{}' is not met (dry run, nothing was changed)", outcome.dep);
        }
        bail!("'{}' could not be met", outcome.dep);
    }
    Ok(())
}
