//! Check-only trace of a deps directory

use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::Path;

use super::common::load_target;
use crate::graph::Status;
use crate::walk::{Printer, PrinterOptions, Walker};

/// Walk the target with the printer alone and return its status.
///
/// Verify actions run; remediate actions never do.
pub fn run(dir: &Path, dep: Option<&str>, color: bool, out: impl Write + 'static) -> Result<Status> {
    let mut target = load_target(dir, dep)?;
    let mut printer = Printer::with_output(
        PrinterOptions {
            color,
            ..Default::default()
        },
        out,
    );

    Walker::new(vec![&mut printer]).walk(&mut target.graph, &target.dep)?;

    Ok(target.graph.status(&target.dep).unwrap_or_default())
}

/// Execute the print command
pub fn execute(dir: &Path, dep: Option<&str>, color: bool) -> Result<()> {
    let status = run(dir, dep, color, io::stdout())?;
    if status != Status::Satisfied {
        bail!("Not every dependency is met");
    }
    Ok(())
}
