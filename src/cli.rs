//! CLI argument parsing module for pipcheck

use crate::domain::SelectedPackage;
use crate::error::SelectionError;
use clap::{Parser, Subcommand};

/// PyPI package compatibility checker
#[derive(Parser, Debug, Clone)]
#[command(name = "pipcheck", version, about = "PyPI package compatibility checker")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable quiet mode - no progress display
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check whether a set of packages is mutually compatible
    Check {
        /// Packages to check, as 'name' or 'name==version'
        #[arg(required = true)]
        packages: Vec<String>,

        /// Target Python version (e.g. 3.11)
        #[arg(long)]
        python: Option<String>,
    },

    /// List a package's release versions, latest first
    Versions {
        /// Package name
        name: String,
    },

    /// Suggest package names starting with a prefix
    Suggest {
        /// Name prefix to match against the PyPI simple index
        prefix: String,
    },
}

/// Parse the CLI package tokens into a selection, rejecting malformed ones
pub fn parse_selection(packages: &[String]) -> Result<Vec<SelectedPackage>, SelectionError> {
    packages
        .iter()
        .map(|token| SelectedPackage::parse(token))
        .collect()
}
