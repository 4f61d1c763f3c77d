//! Output formatting and writing utilities
//!
//! This module formats results as JSON, YAML or human-readable text, with
//! specialized support for validation outcomes and progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use compset_core::ValidationOutcome;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation outcome
    fn format_outcome(&self, outcome: &ValidationOutcome, list_validators: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output of arbitrary data falls back to pretty JSON
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_outcome(&self, outcome: &ValidationOutcome, list_validators: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_outcome_human(outcome, list_validators)),
            _ => self.format(outcome),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && format == OutputFormat::Human && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.writeln(formatted.trim_end())
    }

    /// Write a validation outcome.
    ///
    /// In human format errors are always written, even in quiet mode.
    pub fn outcome(&mut self, outcome: &ValidationOutcome, list_validators: bool) -> Result<()> {
        if self.quiet && self.is_human() && outcome.valid {
            return Ok(());
        }
        let formatted = self.format.format_outcome(outcome, list_validators)?;
        let formatted = if self.use_color && self.is_human() {
            colorize_outcome(&formatted, outcome.valid)
        } else {
            formatted
        };
        self.writeln(formatted.trim_end())
    }

    /// Write a table (human format only)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.chars().count());
                }
            }
        }

        let header_row = headers
            .iter()
            .enumerate()
            .map(|(i, h)| format!("{:width$}", h, width = widths[i]))
            .collect::<Vec<_>>()
            .join(" │ ");
        if self.use_color {
            self.writeln(header_row.trim_end().bold().to_string().as_str())?;
        } else {
            self.writeln(header_row.trim_end())?;
        }

        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        self.writeln(&separator)?;

        for row in rows {
            let row_str = row
                .iter()
                .enumerate()
                .map(|(i, cell)| match widths.get(i) {
                    Some(width) => format!("{:width$}", cell, width = width),
                    None => cell.clone(),
                })
                .collect::<Vec<_>>()
                .join(" │ ");
            self.writeln(row_str.trim_end())?;
        }

        Ok(())
    }

    /// Create a spinner for indeterminate progress
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// Helper function to create a spinner style
pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Format a validation outcome for human reading
fn format_outcome_human(outcome: &ValidationOutcome, list_validators: bool) -> String {
    let mut output = String::new();

    if outcome.valid {
        output.push_str("✓ Package is valid\n");
    } else {
        output.push_str(&format!(
            "✗ Package is invalid - {} error(s)\n",
            outcome.error_count()
        ));
    }

    if let Some(version) = &outcome.version {
        output.push_str(&format!("  Version: {}\n", version));
    }
    if let Some(schema) = &outcome.schema {
        output.push_str(&format!("  Schema: {}\n", schema));
    }

    if !outcome.errors.is_empty() {
        output.push('\n');
        for (i, error) in outcome.errors.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}\n", i + 1, error));
        }
    }

    if list_validators {
        output.push_str(&format!("\nValidators ({}):\n", outcome.validators.len()));
        for kind in &outcome.validators {
            output.push_str(&format!("  • {}\n", kind));
        }
    }

    output
}

/// Color the headline of a human-formatted outcome
fn colorize_outcome(formatted: &str, valid: bool) -> String {
    let (headline, rest) = formatted.split_once('\n').unwrap_or((formatted, ""));
    let headline = if valid {
        headline.green().bold()
    } else {
        headline.red().bold()
    };
    format!("{}\n{}", headline, rest)
}
