use clap::{Parser, Subcommand};
use matryoshka::validation::clap_name_validator;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "matryoshka")]
#[command(about = "Converge a machine towards a declared set of dependencies", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether any subcommand asked for debug output
    pub fn debug(&self) -> bool {
        matches!(self.command, Commands::Apply { debug: true, .. })
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every dependency and try to meet the ones that are not met
    Apply {
        /// Deps directory containing main.yaml
        #[arg(short = 'd', long, default_value = ".")]
        dir: PathBuf,

        /// Dependency to start from (default from matryoshka.toml, else "all")
        #[arg(long, value_parser = clap_name_validator)]
        dep: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show the output of every command
        #[arg(long)]
        debug: bool,

        /// Only check; never run remediation commands
        #[arg(long)]
        dry_run: bool,
    },

    /// Show which dependencies are met, without changing anything
    Print {
        /// Deps directory containing main.yaml
        #[arg(short = 'd', long, default_value = ".")]
        dir: PathBuf,

        /// Dependency to start from (default from matryoshka.toml, else "all")
        #[arg(long, value_parser = clap_name_validator)]
        dep: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List every enabled dependency with its requirements
    List {
        /// Deps directory containing main.yaml
        #[arg(short = 'd', long, default_value = ".")]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
