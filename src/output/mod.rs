//! Output formatting for check results
//!
//! This module provides:
//! - Human-readable text output with colored statuses
//! - Machine-readable JSON output

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::orchestrator::CheckOutcome;
use std::io::{self, Write};

/// Output configuration derived from CLI options
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit JSON instead of text
    pub json: bool,
    /// Show extra detail (fetch errors) in text output
    pub verbose: bool,
}

impl OutputConfig {
    /// Build the configuration from CLI options
    pub fn from_cli(json: bool, verbose: bool) -> Self {
        Self { json, verbose }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the check outcome to the writer
    fn format(&self, outcome: &CheckOutcome, writer: &mut dyn Write) -> io::Result<()>;
}

/// Create the formatter matching the output configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    if config.json {
        Box::new(JsonFormatter::new())
    } else {
        Box::new(TextFormatter::new(config.verbose))
    }
}
