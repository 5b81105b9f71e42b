//! JSON output formatter for machine processing

use crate::compat::EvaluationReport;
use crate::orchestrator::CheckOutcome;
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::{self, Write};

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// The evaluation report (overall flag, python version, per-package
    /// statuses and details)
    #[serde(flatten)]
    report: &'a EvaluationReport,
    /// Fetch errors encountered while building the snapshot
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: &'a Vec<String>,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, outcome: &CheckOutcome, writer: &mut dyn Write) -> io::Result<()> {
        let output = JsonOutput {
            report: &outcome.report,
            errors: &outcome.errors,
        };
        serde_json::to_writer_pretty(&mut *writer, &output)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        writeln!(writer)
    }
}
