use anyhow::Result;
use matryoshka::commands::apply::{self, ApplyOptions};
use matryoshka::commands::{list, print};

use super::types::Commands;

pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Apply {
            dir,
            dep,
            no_color,
            debug,
            dry_run,
        } => apply::execute(
            &dir,
            ApplyOptions {
                dep,
                color: !no_color,
                debug,
                dry_run,
            },
        ),
        Commands::Print { dir, dep, no_color } => print::execute(&dir, dep.as_deref(), !no_color),
        Commands::List { dir, json } => list::execute(&dir, json),
    }
}
