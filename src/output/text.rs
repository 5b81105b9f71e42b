//! Text output formatter for human-readable display
//!
//! One line per package with a colored status, indented detail lines
//! beneath it, and a closing verdict line.

use crate::domain::Status;
use crate::orchestrator::CheckOutcome;
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::{self, Write};

/// Text formatter for terminal output
pub struct TextFormatter {
    /// Whether to include fetch errors at the end
    verbose: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Colored status label, padded for alignment
    fn status_label(status: Status) -> String {
        match status {
            Status::Ok => "ok      ".green().to_string(),
            Status::Warning => "warning ".yellow().to_string(),
            Status::Conflict => "conflict".red().bold().to_string(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &CheckOutcome, writer: &mut dyn Write) -> io::Result<()> {
        let report = &outcome.report;

        if let Some(python) = &report.python_version {
            writeln!(writer, "Target Python: {}", python)?;
            writeln!(writer)?;
        }

        for package in &report.packages {
            writeln!(
                writer,
                "{} {}=={}",
                Self::status_label(package.status),
                package.name,
                package.version
            )?;
            for detail in &package.details {
                writeln!(writer, "    - {}", detail)?;
            }
        }

        writeln!(writer)?;
        if report.overall_compatible {
            writeln!(writer, "{}", "Selection is compatible".green())?;
        } else {
            writeln!(writer, "{}", "Selection has issues".red())?;
        }

        if self.verbose && !outcome.errors.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Fetch errors:")?;
            for error in &outcome.errors {
                writeln!(writer, "  - {}", error)?;
            }
        }

        Ok(())
    }
}
