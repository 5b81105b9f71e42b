//! pipcheck - PyPI package compatibility checker CLI tool
//!
//! Checks whether a user-selected set of PyPI packages (optionally
//! version-pinned) is mutually compatible for a chosen Python version.

use clap::Parser;
use pipcheck::cli::{parse_selection, CliArgs, Command};
use pipcheck::orchestrator::Orchestrator;
use pipcheck::output::{create_formatter, OutputConfig};
use pipcheck::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let orchestrator = Orchestrator::new()?;
    let mut stdout = io::stdout().lock();

    match &args.command {
        Command::Check { packages, python } => {
            let selection = parse_selection(packages)?;

            let show_progress = !args.quiet && !args.json;
            let mut progress = Progress::new(show_progress);
            let outcome = orchestrator
                .check(&selection, python.as_deref(), &mut progress)
                .await?;

            let config = OutputConfig::from_cli(args.json, args.verbose);
            let formatter = create_formatter(config);
            formatter.format(&outcome, &mut stdout)?;
            stdout.flush()?;

            if outcome.report.overall_compatible {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Versions { name } => {
            let versions = orchestrator.versions(name).await?;
            write_list(&mut stdout, &versions, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Suggest { prefix } => {
            let suggestions = orchestrator.suggest(prefix).await?;
            write_list(&mut stdout, &suggestions, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Print a list of names, one per line, or as a JSON array
fn write_list(writer: &mut impl Write, items: &[String], json: bool) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *writer, items)?;
        writeln!(writer)?;
    } else {
        for item in items {
            writeln!(writer, "{}", item)?;
        }
    }
    writer.flush()?;
    Ok(())
}
